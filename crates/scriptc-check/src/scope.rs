//! Lexical environments (§3 "Scopes").
//!
//! A parent-linked pair of value/type binding maps per environment. Lookup
//! walks upward from the current rib to the root; `define` only ever
//! touches the current rib. Environments are pushed at every block,
//! function/arrow/method body, loop iteration-variable binding, and catch
//! handler, and popped on exit (§4.3 "Scope discipline").
//!
//! `Rib`/`RibId` is a parent-linked `IndexVec<RibId, Rib>` generalized to
//! hold both a value map and a type map per rib instead of one resolution
//! map.

use crate::types::Type;
use scriptc_util::{FxHashMap, Idx, IndexVec, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RibId(pub u32);

impl Idx for RibId {
    fn from_usize(idx: usize) -> Self {
        RibId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Let,
    Const,
    Var,
    Function,
    Parameter,
}

#[derive(Debug, Clone)]
pub struct ValueBinding {
    pub ty: Type,
    pub kind: BindingKind,
    pub mutable: bool,
}

struct Rib {
    values: FxHashMap<Symbol, ValueBinding>,
    types: FxHashMap<Symbol, Type>,
    parent: Option<RibId>,
}

/// The chain of environments for one compilation. The root rib (index 0)
/// is the global scope; it has no parent.
pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib { values: FxHashMap::default(), types: FxHashMap::default(), parent: None });
        Self { ribs, current: root }
    }

    pub fn global(&self) -> RibId {
        RibId(0)
    }

    pub fn current(&self) -> RibId {
        self.current
    }

    /// Pushes a fresh environment parented to `parent` and makes it
    /// current. Returns the previous current rib so callers can restore it
    /// on exit without a separate stack.
    pub fn push(&mut self, parent: RibId) -> RibId {
        let previous = self.current;
        let id = self.ribs.push(Rib { values: FxHashMap::default(), types: FxHashMap::default(), parent: Some(parent) });
        self.current = id;
        previous
    }

    /// Pops back to `previous` (as returned by the matching [`push`]).
    pub fn pop(&mut self, previous: RibId) {
        self.current = previous;
    }

    pub fn define_value(&mut self, name: Symbol, binding: ValueBinding) {
        self.ribs[self.current].values.insert(name, binding);
    }

    pub fn define_type(&mut self, name: Symbol, ty: Type) {
        self.ribs[self.current].types.insert(name, ty);
    }

    /// Walks upward from the current rib.
    pub fn resolve_value(&self, name: Symbol) -> Option<&ValueBinding> {
        let mut rib = Some(self.current);
        while let Some(id) = rib {
            if let Some(binding) = self.ribs[id].values.get(&name) {
                return Some(binding);
            }
            rib = self.ribs[id].parent;
        }
        None
    }

    pub fn resolve_type(&self, name: Symbol) -> Option<&Type> {
        let mut rib = Some(self.current);
        while let Some(id) = rib {
            if let Some(ty) = self.ribs[id].types.get(&name) {
                return Some(ty);
            }
            rib = self.ribs[id].parent;
        }
        None
    }

    /// Inspects only the current rib — used for redeclaration checks
    /// (§4.3: "Redeclaration in the same local environment is a
    /// diagnostic").
    pub fn has_local_value(&self, name: Symbol) -> bool {
        self.ribs[self.current].values.contains_key(&name)
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(ty: Type) -> ValueBinding {
        ValueBinding { ty, kind: BindingKind::Let, mutable: true }
    }

    #[test]
    fn lookup_walks_upward() {
        let mut tree = ScopeTree::new();
        let global = tree.global();
        tree.define_value(Symbol::intern("x"), binding(Type::number()));
        let outer = tree.push(global);
        tree.define_value(Symbol::intern("y"), binding(Type::string()));
        assert!(tree.resolve_value(Symbol::intern("x")).is_some());
        assert!(tree.resolve_value(Symbol::intern("y")).is_some());
        tree.pop(outer);
        assert!(tree.resolve_value(Symbol::intern("y")).is_none());
    }

    #[test]
    fn has_local_ignores_parent() {
        let mut tree = ScopeTree::new();
        let global = tree.global();
        tree.define_value(Symbol::intern("x"), binding(Type::number()));
        tree.push(global);
        assert!(!tree.has_local_value(Symbol::intern("x")));
        assert!(tree.resolve_value(Symbol::intern("x")).is_some());
    }

    #[test]
    fn redefine_affects_only_local() {
        let mut tree = ScopeTree::new();
        let global = tree.global();
        let previous = tree.push(global);
        tree.define_value(Symbol::intern("x"), binding(Type::number()));
        tree.pop(previous);
        assert!(tree.resolve_value(Symbol::intern("x")).is_none());
    }
}
