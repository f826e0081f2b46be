//! Expression type inference and operator typing (§4.3 "Type inference,
//! local only" and "Operator typing").
//!
//! No inference crosses a function boundary: a call's argument types never
//! narrow the callee's declared parameter types, and a function's return
//! type is never inferred from call sites (§1 Non-goals). Everything here
//! is a single bottom-up pass over one expression tree.

use crate::types::{FnParam, LiteralValue, Member, OrderedFloat, Primitive, Type};
use crate::Checker;
use indexmap::IndexMap;
use scriptc_parse::ast::*;
use scriptc_util::Symbol;

impl Checker {
    pub(crate) fn infer_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Literal { value, .. } => self.infer_literal(value),
            Expr::Identifier { name, line } => self.infer_identifier(*name, *line),
            Expr::This { .. } => self.this_stack.last().cloned().unwrap_or(Type::Any),
            Expr::Super { .. } => self
                .this_stack
                .last()
                .and_then(|t| match t {
                    Type::Class { superclass: Some(sup), .. } => self.classes.get(sup).cloned(),
                    _ => None,
                })
                .unwrap_or(Type::Any),
            Expr::Binary { op, left, right, line } => self.infer_binary(*op, left, right, *line),
            Expr::Logical { left, right, .. } => {
                let l = self.infer_expr(left);
                let r = self.infer_expr(right);
                Type::union(vec![l, r])
            }
            Expr::Unary { op, operand, line } => self.infer_unary(*op, operand, *line),
            Expr::Update { operand, line, .. } => {
                let ty = self.infer_expr(operand);
                if !matches!(ty, Type::Any) && !matches!(ty, Type::Primitive(Primitive::Number)) {
                    self.error(format!("Update operator requires a number, found '{}'", ty), *line);
                }
                Type::number()
            }
            Expr::Call { callee, args, line, .. } => self.infer_call(callee, args, *line),
            Expr::Member { object, property, optional, line } => {
                self.infer_member(object, *property, *optional, *line)
            }
            Expr::ComputedMember { object, .. } => {
                self.infer_expr(object);
                Type::Any
            }
            Expr::ObjectLiteral { properties, .. } => self.infer_object_literal(properties),
            Expr::ArrayLiteral { elements, .. } => self.infer_array_literal(elements),
            Expr::Arrow { params, return_type, body, .. } => {
                self.infer_function_like(params, return_type, Some(body), None)
            }
            Expr::FunctionExpr { params, return_type, body, .. } => {
                self.infer_function_like(params, return_type, None, Some(body))
            }
            Expr::Conditional { condition, then_branch, else_branch, .. } => {
                self.infer_expr(condition);
                let t = self.infer_expr(then_branch);
                let e = self.infer_expr(else_branch);
                Type::union(vec![t, e])
            }
            Expr::Assignment { target, value, op, line } => self.infer_assignment(*op, target, value, *line),
            Expr::New { callee, args, line, .. } => {
                for a in args {
                    self.infer_expr(a);
                }
                self.infer_new_target(callee, *line)
            }
            Expr::Spread { argument, .. } => self.infer_expr(argument),
            Expr::Yield { argument, .. } => {
                if let Some(arg) = argument {
                    self.infer_expr(arg);
                }
                Type::Any
            }
            Expr::TemplateLiteral { expressions, .. } | Expr::TaggedTemplate { expressions, .. } => {
                for e in expressions {
                    self.infer_expr(e);
                }
                Type::string()
            }
            Expr::TypeAssertion { type_annotation, expr, .. } => {
                self.infer_expr(expr);
                self.resolve_type_expr(type_annotation)
            }
            Expr::As { expr, type_annotation, .. } => {
                self.infer_expr(expr);
                self.resolve_type_expr(type_annotation)
            }
            Expr::NonNull { expr, .. } => {
                let ty = self.infer_expr(expr);
                strip_nullish(ty)
            }
            Expr::ClassExpr { class, .. } => self.check_class_decl(class),
            Expr::Parenthesized { expr, .. } => self.infer_expr(expr),
        }
    }

    fn infer_literal(&self, lit: &Literal) -> Type {
        match lit {
            Literal::Number(n) => Type::Literal(LiteralValue::Number(OrderedFloat(*n))),
            Literal::String(s) => Type::Literal(LiteralValue::String(s.clone())),
            Literal::Boolean(b) => Type::Literal(LiteralValue::Boolean(*b)),
            Literal::Null => Type::null(),
            Literal::Undefined => Type::undefined(),
        }
    }

    fn infer_identifier(&mut self, name: Symbol, line: u32) -> Type {
        if let Some(binding) = self.scopes.resolve_value(name) {
            return binding.ty.clone();
        }
        if let Some(enum_ty) = self.enums.get(&name) {
            return enum_ty.clone();
        }
        self.error(format!("Cannot find name '{}'", name), line);
        Type::Any
    }

    fn infer_binary(&mut self, op: BinOp, left: &Expr, right: &Expr, line: u32) -> Type {
        let l = self.infer_expr(left);
        let r = self.infer_expr(right);
        match op {
            BinOp::Add => {
                if is_stringish(&l) || is_stringish(&r) {
                    Type::string()
                } else {
                    self.require_numberish(&l, line);
                    self.require_numberish(&r, line);
                    Type::number()
                }
            }
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
                self.require_numberish(&l, line);
                self.require_numberish(&r, line);
                Type::number()
            }
            BinOp::Shl | BinOp::Shr | BinOp::Shru | BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor => {
                Type::number()
            }
            BinOp::Eq
            | BinOp::StrictEq
            | BinOp::NotEq
            | BinOp::StrictNotEq
            | BinOp::Lt
            | BinOp::Gt
            | BinOp::LtEq
            | BinOp::GtEq
            | BinOp::Instanceof
            | BinOp::In => Type::boolean(),
        }
    }

    fn require_numberish(&mut self, ty: &Type, line: u32) {
        if matches!(ty, Type::Any) {
            return;
        }
        if !matches!(ty.literal_widened(), Type::Primitive(Primitive::Number)) {
            self.error(format!("Operands must be numbers, found '{}'", ty), line);
        }
    }

    fn infer_unary(&mut self, op: UnOp, operand: &Expr, line: u32) -> Type {
        let ty = self.infer_expr(operand);
        match op {
            UnOp::Neg | UnOp::Pos | UnOp::BitNot => {
                self.require_numberish(&ty, line);
                Type::number()
            }
            UnOp::Not => Type::boolean(),
            UnOp::Typeof => Type::string(),
            UnOp::Delete => Type::boolean(),
            UnOp::Await => ty,
        }
    }

    fn infer_call(&mut self, callee: &Expr, args: &[Expr], line: u32) -> Type {
        let callee_ty = self.infer_expr(callee);
        let arg_types: Vec<Type> = args.iter().map(|a| self.infer_expr(a)).collect();
        match callee_ty {
            Type::Function { params, return_type } => {
                self.check_call_arity(&params, args, line);
                for (i, param) in params.iter().enumerate() {
                    if param.rest {
                        break;
                    }
                    if let (Some(arg_ty), Some(arg_expr)) = (arg_types.get(i), args.get(i)) {
                        if !matches!(arg_expr, Expr::Spread { .. })
                            && !crate::types::is_assignable_relaxed(arg_ty, &param.ty)
                        {
                            self.error(
                                format!(
                                    "Argument of type '{}' is not assignable to parameter of type '{}'",
                                    arg_ty, param.ty
                                ),
                                line,
                            );
                        }
                    }
                }
                *return_type
            }
            Type::Any => Type::Any,
            other => {
                self.error(format!("'{}' is not callable", other), line);
                Type::Any
            }
        }
    }

    fn check_call_arity(&mut self, params: &[FnParam], args: &[Expr], line: u32) {
        let has_rest = params.last().map(|p| p.rest).unwrap_or(false);
        let required = params.iter().filter(|p| !p.optional && !p.rest).count();
        let has_spread_arg = args.iter().any(|a| matches!(a, Expr::Spread { .. }));
        let k = args.len();
        if k < required && !has_spread_arg {
            self.error(format!("Expected at least {} arguments, but got {}", required, k), line);
        } else if !has_rest && k > params.len() && !has_spread_arg {
            self.error(format!("Expected at most {} arguments, but got {}", params.len(), k), line);
        }
    }

    fn infer_member(&mut self, object: &Expr, property: Symbol, optional: bool, line: u32) -> Type {
        let object_ty = self.infer_expr(object);
        let ty = self.member_type(&object_ty, property, line);
        if optional {
            Type::union(vec![ty, Type::undefined()])
        } else {
            ty
        }
    }

    /// Member access on an interface/class/array/string/any (§4.3 "Member
    /// access"). Unknown members on a known shape are a diagnostic; `any`
    /// propagates silently.
    pub(crate) fn member_type(&mut self, object_ty: &Type, property: Symbol, line: u32) -> Type {
        match object_ty {
            Type::Any | Type::Unknown => Type::Any,
            Type::Array(elem) => {
                if property.as_str() == "length" {
                    Type::number()
                } else {
                    Type::Any
                }
            }
            Type::Primitive(Primitive::String) | Type::Literal(LiteralValue::String(_)) => {
                if property.as_str() == "length" {
                    Type::number()
                } else {
                    Type::Any
                }
            }
            Type::Interface { .. } | Type::Class { .. } => match object_ty.find_member(property) {
                Some(member) => member.ty.clone(),
                None => {
                    self.error(
                        format!("Property '{}' does not exist on type '{}'", property, object_ty),
                        line,
                    );
                    Type::Any
                }
            },
            Type::Enumerated { members, name } => {
                if members.contains_key(&property) {
                    Type::Literal(LiteralValue::Number(OrderedFloat(0.0)))
                } else {
                    self.error(format!("Property '{}' does not exist on enum '{}'", property, name), line);
                    Type::Any
                }
            }
            _ => Type::Any,
        }
    }

    fn infer_object_literal(&mut self, properties: &[ObjectProperty]) -> Type {
        let mut members = IndexMap::new();
        for prop in properties {
            if prop.computed {
                self.infer_expr(&prop.value);
                continue;
            }
            let ty = self.infer_expr(&prop.value);
            members.insert(prop.key, Member { ty, optional: false, readonly: false });
        }
        Type::Interface { name: None, members }
    }

    fn infer_array_literal(&mut self, elements: &[Expr]) -> Type {
        if elements.is_empty() {
            return Type::array_of(Type::Any);
        }
        let elem_types: Vec<Type> = elements.iter().map(|e| self.infer_expr(e)).collect();
        Type::array_of(Type::union(elem_types))
    }

    pub(crate) fn infer_function_like(
        &mut self,
        params: &[Param],
        return_type: &Option<TypeExpr>,
        arrow_body: Option<&ArrowBody>,
        fn_body: Option<&Block>,
    ) -> Type {
        let fn_params: Vec<FnParam> = params
            .iter()
            .map(|p| FnParam {
                ty: p
                    .type_annotation
                    .as_ref()
                    .map(|t| self.resolve_type_expr(t))
                    .unwrap_or(Type::Any),
                optional: p.optional,
                rest: p.rest,
            })
            .collect();

        let declared_return = return_type.as_ref().map(|t| self.resolve_type_expr(t));

        let previous = self.scopes.push(self.scopes.global());
        for (param, fp) in params.iter().zip(&fn_params) {
            self.define_param(param, fp.ty.clone());
        }

        let inferred_return = match (arrow_body, fn_body) {
            (Some(ArrowBody::Expr(expr)), None) => Some(self.infer_expr(expr)),
            (Some(ArrowBody::Block(block)), None) => {
                self.check_block_body(block);
                None
            }
            (None, Some(block)) => {
                self.check_block_body(block);
                None
            }
            _ => None,
        };
        self.scopes.pop(previous);

        let return_type = declared_return
            .or(inferred_return)
            .unwrap_or(Type::void());

        Type::Function { params: fn_params, return_type: Box::new(return_type) }
    }

    fn define_param(&mut self, param: &Param, ty: Type) {
        use crate::scope::{BindingKind, ValueBinding};
        self.scopes.define_value(param.name, ValueBinding { ty, kind: BindingKind::Parameter, mutable: true });
    }

    fn check_block_body(&mut self, block: &Block) {
        let expected = self.return_stack.last().cloned();
        self.return_stack.push(expected.unwrap_or(Type::void()));
        for stmt in &block.statements {
            self.check_stmt(stmt);
        }
        self.return_stack.pop();
    }

    fn infer_assignment(&mut self, op: AssignOp, target: &Expr, value: &Expr, line: u32) -> Type {
        let target_ty = self.infer_expr(target);
        let value_ty = self.infer_expr(value);
        match op {
            AssignOp::Assign => {
                if !crate::types::is_assignable_relaxed(&value_ty, &target_ty) {
                    self.error(
                        format!("Type '{}' is not assignable to type '{}'", value_ty, target_ty),
                        line,
                    );
                }
            }
            _ => {
                self.require_numberish(&target_ty, line);
                self.require_numberish(&value_ty, line);
            }
        }
        target_ty
    }

    fn infer_new_target(&mut self, callee: &Expr, line: u32) -> Type {
        if let Expr::Identifier { name, .. } = callee {
            if let Some(class_ty) = self.classes.get(name) {
                return class_ty.clone();
            }
        }
        self.infer_expr(callee);
        let _ = line;
        Type::Any
    }
}

fn is_stringish(ty: &Type) -> bool {
    matches!(
        ty.literal_widened(),
        Type::Primitive(Primitive::String)
    )
}

fn strip_nullish(ty: Type) -> Type {
    match ty {
        Type::Union(arms) => {
            let kept: Vec<Type> = arms
                .into_iter()
                .filter(|a| !matches!(a, Type::Primitive(Primitive::Null) | Type::Primitive(Primitive::Undefined)))
                .collect();
            if kept.is_empty() {
                Type::Never
            } else {
                Type::union(kept)
            }
        }
        other => other,
    }
}
