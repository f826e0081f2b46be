//! scriptc-check - structural type checker for the scripting-language
//! superset (§4.3).
//!
//! Five passes over the syntax tree, in order: type aliases and enums,
//! then interfaces, then classes (seeding each subclass's member maps from
//! its superclass), then top-level function signatures into the global
//! scope, and finally a single walk of every statement that checks bodies,
//! initializers, and uses. No pass re-enters an earlier one; declaration
//! order between passes matters but declaration order *within* a pass does
//! not, since the first four passes only build type values from syntax.
//!
//! `check` never stops at the first diagnostic; emission proceeds
//! regardless of what this crate reports (`scriptc-driver` gates overall
//! success on whether anything was recorded here, not on parsing alone).

mod analysis;
mod infer;
mod scope;
mod types;

use scope::ScopeTree;
use scriptc_parse::ast::{Program, TypeExpr};
use scriptc_util::{Diagnostic, FxHashMap, Handler, Span, Symbol};
use types::Type;

/// The checker's running state across all five passes.
struct Checker {
    handler: Handler,
    scopes: ScopeTree,
    type_aliases: FxHashMap<Symbol, TypeExpr>,
    interfaces: FxHashMap<Symbol, Type>,
    classes: FxHashMap<Symbol, Type>,
    enums: FxHashMap<Symbol, Type>,
    /// Expected return type of the function/method currently being checked.
    return_stack: Vec<Type>,
    /// Type of `this` inside the class body currently being checked.
    this_stack: Vec<Type>,
    /// Guards against an alias that refers to itself, directly or through a
    /// cycle of other aliases.
    resolving_aliases: Vec<Symbol>,
}

impl Checker {
    fn new() -> Self {
        Self {
            handler: Handler::new(),
            scopes: ScopeTree::new(),
            type_aliases: FxHashMap::default(),
            interfaces: FxHashMap::default(),
            classes: FxHashMap::default(),
            enums: FxHashMap::default(),
            return_stack: Vec::new(),
            this_stack: Vec::new(),
            resolving_aliases: Vec::new(),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>, line: u32) {
        self.handler.error(message, Span::new(line, 1));
    }
}

/// Runs the checker over a parsed program, returning every diagnostic it
/// recorded in discovery order. An empty vector means the program is
/// well-typed; a non-empty one does not stop `scriptc-emit` from producing
/// output (§2).
pub fn check(program: &Program) -> Vec<Diagnostic> {
    let mut checker = Checker::new();
    checker.collect_aliases_and_enums(program);
    checker.collect_interfaces(program);
    checker.collect_classes(program);
    checker.collect_function_signatures(program);
    for stmt in &program.statements {
        checker.check_stmt(stmt);
    }
    checker.handler.into_diagnostics()
}

#[cfg(test)]
mod edge_cases;
