//! Interned strings.
//!
//! Identifiers, property names, and string-literal payloads flow through
//! every stage of the pipeline repeatedly (scope lookup, member-map keys,
//! enum member names). Interning them once means later comparisons are
//! pointer/length compares instead of byte-by-byte ones.
//!
//! The core pipeline is single-threaded (§5), so the table behind this is a
//! plain `Mutex`-guarded map rather than a lock-free concurrent one —
//! there is exactly one writer at a time and the mutex is never contended
//! in practice.

use rustc_hash::FxHashMap;
use std::sync::{Mutex, OnceLock};

struct Table {
    map: Mutex<FxHashMap<&'static str, Symbol>>,
    strings: Mutex<Vec<&'static str>>,
}

fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(|| Table {
        map: Mutex::new(FxHashMap::default()),
        strings: Mutex::new(Vec::new()),
    })
}

/// An interned string.
///
/// Cheap to copy and compare; use [`Symbol::as_str`] to get the original
/// text back.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `s`, allocating a new slot only if it hasn't been seen before.
    pub fn intern(s: &str) -> Self {
        let table = table();
        if let Some(sym) = table.map.lock().unwrap().get(s) {
            return *sym;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let mut strings = table.strings.lock().unwrap();
        let id = strings.len() as u32;
        strings.push(leaked);
        let sym = Symbol(id);
        table.map.lock().unwrap().insert(leaked, sym);
        sym
    }

    /// Recover the original string.
    pub fn as_str(&self) -> &'static str {
        table().strings.lock().unwrap()[self.0 as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
