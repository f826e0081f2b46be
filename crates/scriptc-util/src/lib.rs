//! scriptc-util - Foundation types shared by every pipeline stage.
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the fundamental utilities used by the lexer, parser,
//! checker, and emitter: interned strings ([`Symbol`]), source positions
//! ([`Span`]), typed index vectors ([`IndexVec`]), and diagnostics
//! ([`Diagnostic`], [`Handler`]).
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. ZERO-COST ABSTRACTIONS — typed indices and spans compile down to the
//!    same code as the raw integers they wrap.
//! 2. SINGLE-THREADED CORE — the pipeline runs one compilation at a time
//!    (see the crate-level concurrency notes in `scriptc-driver`), so the
//!    symbol table is guarded by a plain mutex rather than a lock-free map.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Severity};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
