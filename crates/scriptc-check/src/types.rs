//! The checker's own type-value vocabulary (§3 "Type values").
//!
//! Distinct from `scriptc_parse::ast::TypeExpr` (syntax) — this is the
//! semantic value the checker computes *from* a type expression. Union and
//! intersection are kept flattened and deduplicated at construction so two
//! structurally equal types always compare equal without a separate
//! normalization pass.

use indexmap::IndexMap;
use scriptc_util::Symbol;
use std::fmt;

/// One interface/class member: its type plus the modifiers that affect
/// assignability (`optional`) and are otherwise just carried through
/// (`readonly`).
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub ty: Type,
    pub optional: bool,
    pub readonly: bool,
}

/// A function-type parameter: per-parameter optionality plus the rest flag
/// used by call-site arity checks (§4.3).
#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    pub ty: Type,
    pub optional: bool,
    pub rest: bool,
}

/// The scalar a literal type pins down.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(OrderedFloat),
    String(String),
    Boolean(bool),
}

/// `f64` wrapper with a total `PartialEq` so literal types can sit in a
/// `Vec` and compare without NaN surprises — the checker never produces a
/// NaN literal, but deriving `Eq` on a bare `f64` isn't legal.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

/// The checker's tagged sum of type values (§3).
///
/// Interface/class member maps use `IndexMap` rather than `FxHashMap` to
/// preserve declaration order, needed for deterministic diagnostics (§3:
/// "iteration order matches declaration order").
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(Primitive),
    Literal(LiteralValue),
    Array(Box<Type>),
    Tuple(Vec<Type>),
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    Function {
        params: Vec<FnParam>,
        return_type: Box<Type>,
    },
    Interface {
        name: Option<Symbol>,
        members: IndexMap<Symbol, Member>,
    },
    Class {
        name: Symbol,
        instance_members: IndexMap<Symbol, Member>,
        static_members: IndexMap<Symbol, Member>,
        superclass: Option<Symbol>,
    },
    Enumerated {
        name: Symbol,
        members: IndexMap<Symbol, EnumValue>,
    },
    Unknown,
    Never,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Number,
    String,
    Boolean,
    Void,
    Null,
    Undefined,
    Symbol,
    Bigint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

impl Type {
    pub fn number() -> Type {
        Type::Primitive(Primitive::Number)
    }
    pub fn string() -> Type {
        Type::Primitive(Primitive::String)
    }
    pub fn boolean() -> Type {
        Type::Primitive(Primitive::Boolean)
    }
    pub fn void() -> Type {
        Type::Primitive(Primitive::Void)
    }
    pub fn null() -> Type {
        Type::Primitive(Primitive::Null)
    }
    pub fn undefined() -> Type {
        Type::Primitive(Primitive::Undefined)
    }

    pub fn array_of(elem: Type) -> Type {
        Type::Array(Box::new(elem))
    }

    /// Builds a union, flattening nested unions and removing structural
    /// duplicates (§3 invariant: unions never contain nested unions in
    /// normalized form).
    pub fn union(arms: Vec<Type>) -> Type {
        let mut flat: Vec<Type> = Vec::new();
        for arm in arms {
            match arm {
                Type::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        dedup_structural(&mut flat);
        if flat.len() == 1 {
            flat.into_iter().next().unwrap()
        } else {
            Type::Union(flat)
        }
    }

    pub fn intersection(arms: Vec<Type>) -> Type {
        let mut flat: Vec<Type> = Vec::new();
        for arm in arms {
            match arm {
                Type::Intersection(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        dedup_structural(&mut flat);
        if flat.len() == 1 {
            flat.into_iter().next().unwrap()
        } else {
            Type::Intersection(flat)
        }
    }

    /// A literal's primitive widening (assignability table: "literal of
    /// scalar X assignable to the primitive corresponding to X").
    pub fn literal_widened(&self) -> Type {
        match self {
            Type::Literal(LiteralValue::Number(_)) => Type::number(),
            Type::Literal(LiteralValue::String(_)) => Type::string(),
            Type::Literal(LiteralValue::Boolean(_)) => Type::boolean(),
            other => other.clone(),
        }
    }

    /// Looks up a member by name on an interface or class instance-member
    /// map. Does not walk `array`/`string` builtins — see
    /// `Checker::member_type` in `analysis.rs` for that.
    pub fn find_member(&self, name: Symbol) -> Option<&Member> {
        match self {
            Type::Interface { members, .. } => members.get(&name),
            Type::Class { instance_members, .. } => instance_members.get(&name),
            _ => None,
        }
    }
}

/// Structural stringification used both for array-literal element-type
/// deduplication (§4.3) and for union/intersection normalization.
fn structural_key(ty: &Type) -> String {
    format!("{}", ty)
}

fn dedup_structural(types: &mut Vec<Type>) {
    let mut seen = std::collections::HashSet::new();
    types.retain(|t| seen.insert(structural_key(t)));
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => {
                let s = match p {
                    Primitive::Number => "number",
                    Primitive::String => "string",
                    Primitive::Boolean => "boolean",
                    Primitive::Void => "void",
                    Primitive::Null => "null",
                    Primitive::Undefined => "undefined",
                    Primitive::Symbol => "symbol",
                    Primitive::Bigint => "bigint",
                };
                write!(f, "{}", s)
            }
            Type::Literal(LiteralValue::Number(n)) => write!(f, "{}", n.0),
            Type::Literal(LiteralValue::String(s)) => write!(f, "\"{}\"", s),
            Type::Literal(LiteralValue::Boolean(b)) => write!(f, "{}", b),
            Type::Array(elem) => write!(f, "{}[]", elem),
            Type::Tuple(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Type::Union(arms) => {
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", arm)?;
                }
                Ok(())
            }
            Type::Intersection(arms) => {
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", arm)?;
                }
                Ok(())
            }
            Type::Function { params, return_type } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}{}", p.ty, if p.optional { "?" } else { "" })?;
                }
                write!(f, ") => {}", return_type)
            }
            Type::Interface { name, members } => {
                if let Some(name) = name {
                    write!(f, "{}", name)
                } else {
                    write!(f, "{{ ")?;
                    for (i, (name, m)) in members.iter().enumerate() {
                        if i > 0 {
                            write!(f, "; ")?;
                        }
                        write!(f, "{}: {}", name, m.ty)?;
                    }
                    write!(f, " }}")
                }
            }
            Type::Class { name, .. } => write!(f, "{}", name),
            Type::Enumerated { name, .. } => write!(f, "{}", name),
            Type::Unknown => write!(f, "unknown"),
            Type::Never => write!(f, "never"),
            Type::Any => write!(f, "any"),
        }
    }
}

/// Structural assignability (§4.3): is `source` assignable to `target`?
pub fn is_assignable(source: &Type, target: &Type) -> bool {
    match (source, target) {
        (Type::Any, _) | (_, Type::Any) => true,
        (_, Type::Unknown) => true,
        (Type::Never, _) => true,

        (Type::Primitive(Primitive::Null), _) => {
            matches!(target, Type::Primitive(Primitive::Null) | Type::Unknown | Type::Any)
        }
        (Type::Primitive(Primitive::Undefined), _) => matches!(
            target,
            Type::Primitive(Primitive::Undefined) | Type::Unknown | Type::Any
        ),

        (Type::Union(arms), _) => arms.iter().all(|arm| is_assignable(arm, target)),
        (_, Type::Union(arms)) => arms.iter().any(|arm| is_assignable(source, arm)),

        (Type::Literal(a), Type::Literal(b)) => a == b,
        (Type::Literal(_), Type::Primitive(_)) => is_assignable(&source.literal_widened(), target),

        (Type::Primitive(a), Type::Primitive(b)) => a == b,

        (Type::Array(a), Type::Array(b)) => is_assignable(a, b),
        (Type::Tuple(a), Type::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| is_assignable(x, y))
        }

        (
            Type::Function { params: sp, return_type: sr },
            Type::Function { params: tp, return_type: tr },
        ) => {
            if sp.len() < tp.len() {
                return false;
            }
            let params_ok = tp
                .iter()
                .enumerate()
                .all(|(i, tparam)| is_assignable(&tparam.ty, &sp[i].ty));
            params_ok && is_assignable(sr, tr)
        }

        (_, Type::Interface { members: target_members, .. }) => {
            target_members.iter().all(|(name, tmember)| match source.find_member(*name) {
                Some(smember) => tmember.optional || is_assignable(&smember.ty, &tmember.ty),
                None => tmember.optional,
            })
        }

        _ => source == target,
    }
}

/// String-to-union-of-string-literals relaxation (§4.3, §9 open question
/// 3): `is_assignable` alone rejects a bare `string` source against a union
/// target because no single arm structurally matches; this wraps it with
/// the deliberate widening relaxation described above.
pub fn is_assignable_relaxed(source: &Type, target: &Type) -> bool {
    if let (Type::Primitive(Primitive::String), Type::Union(arms)) = (source, target) {
        if arms.iter().all(|arm| matches!(arm, Type::Literal(LiteralValue::String(_)))) {
            return true;
        }
    }
    is_assignable(source, target)
}
