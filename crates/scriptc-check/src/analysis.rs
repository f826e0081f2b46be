//! Declaration collection, statement checking, type-expression resolution,
//! and class inheritance (§4.3 "Pass ordering", "Class inheritance").

use crate::scope::{BindingKind, ValueBinding};
use crate::types::{EnumValue, FnParam, LiteralValue, Member, OrderedFloat, Primitive, Type};
use crate::Checker;
use indexmap::IndexMap;
use scriptc_parse::ast::*;
use scriptc_util::Symbol;

impl Checker {
    // -- pass 1: type aliases + enums --------------------------------------

    pub(crate) fn collect_aliases_and_enums(&mut self, program: &Program) {
        for stmt in &program.statements {
            match stmt {
                Stmt::TypeAlias(alias) => {
                    self.type_aliases.insert(alias.name, alias.value.clone());
                }
                Stmt::Enum(en) => {
                    let ty = self.build_enum_type(en);
                    self.enums.insert(en.name, ty);
                }
                Stmt::Export(ExportStmt::Declaration { decl, .. }) => match decl.as_ref() {
                    Stmt::TypeAlias(alias) => {
                        self.type_aliases.insert(alias.name, alias.value.clone());
                    }
                    Stmt::Enum(en) => {
                        let ty = self.build_enum_type(en);
                        self.enums.insert(en.name, ty);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn build_enum_type(&mut self, en: &EnumStmt) -> Type {
        let mut members = IndexMap::new();
        let mut next_numeric = 0.0_f64;
        for member in &en.members {
            let value = match &member.initializer {
                EnumInitializer::None => {
                    let v = EnumValue::Number(next_numeric);
                    next_numeric += 1.0;
                    v
                }
                EnumInitializer::Number(n) => {
                    next_numeric = n + 1.0;
                    EnumValue::Number(*n)
                }
                EnumInitializer::String(s) => EnumValue::String(s.clone()),
                // A non-literal initializer (e.g. a computed expression): best
                // effort, keep the auto-increment sequence moving.
                EnumInitializer::Expr(_) => {
                    let v = EnumValue::Number(next_numeric);
                    next_numeric += 1.0;
                    v
                }
            };
            members.insert(member.name, value);
        }
        Type::Enumerated { name: en.name, members }
    }

    // -- pass 2: interfaces ---------------------------------------------------

    pub(crate) fn collect_interfaces(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.collect_interface_stmt(stmt);
        }
    }

    fn collect_interface_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Interface(iface) => {
                let ty = self.build_interface_type(iface);
                self.interfaces.insert(iface.name, ty);
            }
            Stmt::Export(ExportStmt::Declaration { decl, .. }) => self.collect_interface_stmt(decl),
            _ => {}
        }
    }

    fn build_interface_type(&mut self, iface: &InterfaceStmt) -> Type {
        let mut members = IndexMap::new();
        for extend in &iface.extends {
            if let Type::Interface { members: parent_members, .. } = self.resolve_type_expr(extend) {
                for (name, member) in parent_members {
                    members.insert(name, member);
                }
            }
        }
        for member in &iface.members {
            let ty = self.resolve_type_expr(&member.type_annotation);
            members.insert(member.name, Member { ty, optional: member.optional, readonly: member.readonly });
        }
        Type::Interface { name: Some(iface.name), members }
    }

    // -- pass 3: classes --------------------------------------------------

    pub(crate) fn collect_classes(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.collect_class_stmt(stmt);
        }
    }

    fn collect_class_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Class(class) => {
                let ty = self.build_class_type(class);
                self.classes.insert(class.name, ty);
            }
            Stmt::Export(ExportStmt::Declaration { decl, .. }) => self.collect_class_stmt(decl),
            _ => {}
        }
    }

    /// Seeds the subclass's member maps with a shallow copy of the
    /// superclass's before adding its own (§4.3 "Class inheritance").
    fn build_class_type(&mut self, class: &ClassStmt) -> Type {
        let superclass_name = class.superclass.as_ref().and_then(type_expr_name);
        let mut instance_members = IndexMap::new();
        let mut static_members = IndexMap::new();
        if let Some(super_name) = superclass_name {
            if let Some(Type::Class { instance_members: parent_instance, static_members: parent_static, .. }) =
                self.classes.get(&super_name)
            {
                instance_members = parent_instance.clone();
                static_members = parent_static.clone();
            }
        }
        for member in &class.members {
            let ty = match member.kind {
                // An un-annotated field's type is refined from its
                // initializer in pass 5 (`check_class_body`), once value
                // and function bindings exist; inferring it here would
                // spuriously report "Cannot find name" for any initializer
                // that references a not-yet-collected binding (§4.3 "Pass
                // ordering").
                MemberKind::Field => member
                    .type_annotation
                    .as_ref()
                    .map(|t| self.resolve_type_expr(t))
                    .unwrap_or(Type::Any),
                MemberKind::Method => {
                    let params: Vec<FnParam> = member
                        .params
                        .iter()
                        .map(|p| FnParam {
                            ty: p.type_annotation.as_ref().map(|t| self.resolve_type_expr(t)).unwrap_or(Type::Any),
                            optional: p.optional,
                            rest: p.rest,
                        })
                        .collect();
                    let return_type = member
                        .return_type
                        .as_ref()
                        .map(|t| self.resolve_type_expr(t))
                        .unwrap_or(Type::void());
                    Type::Function { params, return_type: Box::new(return_type) }
                }
            };
            let entry = Member { ty, optional: false, readonly: member.readonly };
            if member.is_static {
                static_members.insert(member.name, entry);
            } else {
                instance_members.insert(member.name, entry);
            }
        }
        Type::Class {
            name: class.name,
            instance_members,
            static_members,
            superclass: superclass_name,
        }
    }

    // -- pass 4: function signatures ---------------------------------------

    pub(crate) fn collect_function_signatures(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.collect_function_signature_stmt(stmt);
        }
    }

    fn collect_function_signature_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Function(func) => self.define_function_signature(func),
            Stmt::Export(ExportStmt::Declaration { decl, .. }) => self.collect_function_signature_stmt(decl),
            _ => {}
        }
    }

    fn define_function_signature(&mut self, func: &FunctionStmt) {
        let params: Vec<FnParam> = func
            .params
            .iter()
            .map(|p| FnParam {
                ty: p.type_annotation.as_ref().map(|t| self.resolve_type_expr(t)).unwrap_or(Type::Any),
                optional: p.optional,
                rest: p.rest,
            })
            .collect();
        let return_type = func
            .return_type
            .as_ref()
            .map(|t| self.resolve_type_expr(t))
            .unwrap_or(Type::void());
        let ty = Type::Function { params, return_type: Box::new(return_type) };
        self.scopes.define_value(func.name, ValueBinding { ty, kind: BindingKind::Function, mutable: false });
    }

    // -- pass 5: statement walking ------------------------------------------

    pub(crate) fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Variable(v) => self.check_variable_stmt(v),
            Stmt::Function(f) => self.check_function_stmt(f),
            Stmt::Interface(_) | Stmt::TypeAlias(_) | Stmt::Enum(_) => {}
            Stmt::Class(c) => {
                self.check_class_body(c);
            }
            Stmt::Return(r) => self.check_return_stmt(r),
            Stmt::If(s) => {
                self.infer_expr(&s.condition);
                self.check_stmt(&s.then_branch);
                if let Some(else_branch) = &s.else_branch {
                    self.check_stmt(else_branch);
                }
            }
            Stmt::While(s) => {
                self.infer_expr(&s.condition);
                self.check_stmt(&s.body);
            }
            Stmt::DoWhile(s) => {
                self.check_stmt(&s.body);
                self.infer_expr(&s.condition);
            }
            Stmt::For(s) => self.check_for_stmt(s),
            Stmt::ForIn(s) => self.check_for_in_stmt(s),
            Stmt::ForOf(s) => self.check_for_of_stmt(s),
            Stmt::Switch(s) => self.check_switch_stmt(s),
            Stmt::Break(_) | Stmt::Continue(_) => {}
            Stmt::Throw(s) => {
                self.infer_expr(&s.value);
            }
            Stmt::Try(s) => self.check_try_stmt(s),
            Stmt::Expression(s) => {
                self.infer_expr(&s.expr);
            }
            Stmt::Block(b) => self.check_block(&b.block),
            Stmt::Import(_) => {}
            Stmt::Export(e) => self.check_export_stmt(e),
            Stmt::Empty { .. } => {}
        }
    }

    fn check_export_stmt(&mut self, export: &ExportStmt) {
        match export {
            ExportStmt::Declaration { decl, .. } => self.check_stmt(decl),
            ExportStmt::Named { .. } => {}
            ExportStmt::Default { value, .. } => {
                self.infer_expr(value);
            }
        }
    }

    fn check_block(&mut self, block: &Block) {
        let previous = self.scopes.push(self.scopes.current());
        for stmt in &block.statements {
            self.check_stmt(stmt);
        }
        self.scopes.pop(previous);
    }

    fn check_variable_stmt(&mut self, v: &VariableStmt) {
        if self.scopes.has_local_value(v.name) {
            self.error(format!("'{}' is already declared", v.name), v.line);
        }
        let annotation = v.type_annotation.as_ref().map(|t| self.resolve_type_expr(t));
        let initializer = v.initializer.as_ref().map(|e| self.infer_expr(e));
        let final_ty = match (&annotation, &initializer, &v.initializer) {
            (Some(ann), Some(init_ty), Some(init_expr)) => {
                if !crate::types::is_assignable_relaxed(init_ty, ann) {
                    self.error(
                        format!("Type '{}' is not assignable to type '{}'", init_ty, ann),
                        line_of_init(init_expr, v.line),
                    );
                }
                ann.clone()
            }
            (Some(ann), None, _) => ann.clone(),
            (None, Some(init_ty), _) => init_ty.literal_widened(),
            (None, None, _) => Type::Any,
        };
        let kind = match v.kind {
            VarKind::Let => BindingKind::Let,
            VarKind::Const => BindingKind::Const,
            VarKind::Var => BindingKind::Var,
        };
        self.scopes.define_value(
            v.name,
            ValueBinding { ty: final_ty, kind, mutable: !matches!(v.kind, VarKind::Const) },
        );
    }

    fn check_function_stmt(&mut self, func: &FunctionStmt) {
        if self.scopes.resolve_value(func.name).is_none() {
            self.define_function_signature(func);
        }
        let return_type = func
            .return_type
            .as_ref()
            .map(|t| self.resolve_type_expr(t))
            .unwrap_or(Type::void());
        if let Some(body) = &func.body {
            let previous = self.scopes.push(self.scopes.global());
            for param in &func.params {
                let ty = param.type_annotation.as_ref().map(|t| self.resolve_type_expr(t)).unwrap_or(Type::Any);
                self.scopes.define_value(
                    param.name,
                    ValueBinding { ty, kind: BindingKind::Parameter, mutable: true },
                );
            }
            self.return_stack.push(return_type);
            for stmt in &body.statements {
                self.check_stmt(stmt);
            }
            self.return_stack.pop();
            self.scopes.pop(previous);
        }
    }

    fn check_return_stmt(&mut self, ret: &ReturnStmt) {
        let value_ty = ret.value.as_ref().map(|v| self.infer_expr(v)).unwrap_or(Type::void());
        match self.return_stack.last().cloned() {
            Some(expected) => {
                if !crate::types::is_assignable_relaxed(&value_ty, &expected) {
                    self.error(
                        format!("Type '{}' is not assignable to return type '{}'", value_ty, expected),
                        ret.line,
                    );
                }
            }
            None => self.error("A 'return' statement can only be used within a function body".to_string(), ret.line),
        }
    }

    fn check_for_stmt(&mut self, s: &ForStmt) {
        let previous = self.scopes.push(self.scopes.current());
        match s.init.as_ref() {
            ForInit::Variable(v) => self.check_variable_stmt(v),
            ForInit::Expression(e) => {
                self.infer_expr(e);
            }
            ForInit::None => {}
        }
        if let Some(cond) = &s.condition {
            self.infer_expr(cond);
        }
        if let Some(update) = &s.update {
            self.infer_expr(update);
        }
        self.check_stmt(&s.body);
        self.scopes.pop(previous);
    }

    fn check_for_in_stmt(&mut self, s: &ForInStmt) {
        self.infer_expr(&s.object);
        let previous = self.scopes.push(self.scopes.current());
        let kind = match s.kind {
            VarKind::Let => BindingKind::Let,
            VarKind::Const => BindingKind::Const,
            VarKind::Var => BindingKind::Var,
        };
        // §4.3: for-in key is always `string`.
        self.scopes.define_value(s.name, ValueBinding { ty: Type::string(), kind, mutable: true });
        self.check_stmt(&s.body);
        self.scopes.pop(previous);
    }

    fn check_for_of_stmt(&mut self, s: &ForOfStmt) {
        let iterable_ty = self.infer_expr(&s.iterable);
        // §4.3: element type of the iterable if it's an array, else `any`.
        let element_ty = match iterable_ty {
            Type::Array(elem) => *elem,
            _ => Type::Any,
        };
        let previous = self.scopes.push(self.scopes.current());
        let kind = match s.kind {
            VarKind::Let => BindingKind::Let,
            VarKind::Const => BindingKind::Const,
            VarKind::Var => BindingKind::Var,
        };
        self.scopes.define_value(s.name, ValueBinding { ty: element_ty, kind, mutable: true });
        self.check_stmt(&s.body);
        self.scopes.pop(previous);
    }

    fn check_switch_stmt(&mut self, s: &SwitchStmt) {
        self.infer_expr(&s.discriminant);
        for case in &s.cases {
            if let Some(test) = &case.test {
                self.infer_expr(test);
            }
            let previous = self.scopes.push(self.scopes.current());
            for stmt in &case.consequent {
                self.check_stmt(stmt);
            }
            self.scopes.pop(previous);
        }
    }

    fn check_try_stmt(&mut self, s: &TryStmt) {
        self.check_block(&s.block);
        if let Some(handler) = &s.handler {
            let previous = self.scopes.push(self.scopes.current());
            if let Some(param) = handler.param {
                self.scopes.define_value(
                    param,
                    ValueBinding { ty: Type::Any, kind: BindingKind::Let, mutable: true },
                );
            }
            for stmt in &handler.body.statements {
                self.check_stmt(stmt);
            }
            self.scopes.pop(previous);
        }
        if let Some(finalizer) = &s.finalizer {
            self.check_block(finalizer);
        }
    }

    /// Used for a class expression encountered mid-expression, where
    /// collection hasn't already seen it: builds its type and checks its
    /// method bodies in one step.
    pub(crate) fn check_class_decl(&mut self, class: &ClassStmt) -> Type {
        let ty = self.build_class_type(class);
        self.classes.insert(class.name, ty.clone());
        self.check_class_body(class);
        ty
    }

    fn check_class_body(&mut self, class: &ClassStmt) {
        let self_ty = self.classes.get(&class.name).cloned().unwrap_or_else(|| self.build_class_type(class));
        for member in &class.members {
            if let MemberKind::Field = member.kind {
                self.check_class_field_initializer(class, member);
                continue;
            }
            let Some(body) = &member.body else { continue };
            let return_type = member
                .return_type
                .as_ref()
                .map(|t| self.resolve_type_expr(t))
                .unwrap_or(Type::void());
            let previous = self.scopes.push(self.scopes.global());
            for param in &member.params {
                let ty = param.type_annotation.as_ref().map(|t| self.resolve_type_expr(t)).unwrap_or(Type::Any);
                self.scopes.define_value(
                    param.name,
                    ValueBinding { ty, kind: BindingKind::Parameter, mutable: true },
                );
            }
            self.this_stack.push(self_ty.clone());
            self.return_stack.push(return_type);
            for stmt in &body.statements {
                self.check_stmt(stmt);
            }
            self.return_stack.pop();
            self.this_stack.pop();
            self.scopes.pop(previous);
        }
    }

    /// Checks a field's initializer in the pass-5 walk (§4.3 "Pass
    /// ordering" step 5), once value and function bindings from pass 4 are
    /// in scope. An annotated field is checked for assignability, matching
    /// `check_variable_stmt`; an un-annotated field's collected `any`
    /// placeholder is refined to the initializer's widened type.
    fn check_class_field_initializer(&mut self, class: &ClassStmt, member: &ClassMember) {
        let Some(value) = &member.value else { return };
        let init_ty = self.infer_expr(value);
        match &member.type_annotation {
            Some(annotation) => {
                let ann_ty = self.resolve_type_expr(annotation);
                if !crate::types::is_assignable_relaxed(&init_ty, &ann_ty) {
                    self.error(
                        format!("Type '{}' is not assignable to type '{}'", init_ty, ann_ty),
                        line_of_init(value, member.line),
                    );
                }
            }
            None => {
                let widened = init_ty.literal_widened();
                if let Some(Type::Class { instance_members, static_members, .. }) =
                    self.classes.get_mut(&class.name)
                {
                    let target = if member.is_static { static_members } else { instance_members };
                    if let Some(existing) = target.get_mut(&member.name) {
                        existing.ty = widened;
                    }
                }
            }
        }
    }

    // -- type-expression resolution ------------------------------------------

    /// Resolves a syntactic `TypeExpr` into a semantic `Type` (§3 "Type
    /// values"). A self-referential alias resolves to `any` rather than
    /// looping forever.
    pub(crate) fn resolve_type_expr(&mut self, te: &TypeExpr) -> Type {
        match te {
            TypeExpr::Reference { name, args } => self.resolve_reference(*name, args),
            TypeExpr::Array(inner) => Type::array_of(self.resolve_type_expr(inner)),
            TypeExpr::Tuple(items) => Type::Tuple(items.iter().map(|t| self.resolve_type_expr(t)).collect()),
            TypeExpr::Union(arms) => Type::union(arms.iter().map(|t| self.resolve_type_expr(t)).collect()),
            TypeExpr::Intersection(arms) => {
                Type::intersection(arms.iter().map(|t| self.resolve_type_expr(t)).collect())
            }
            TypeExpr::Function { params, return_type } => {
                let params = params
                    .iter()
                    .map(|p| FnParam {
                        ty: self.resolve_type_expr(&p.type_annotation),
                        optional: p.optional,
                        rest: p.rest,
                    })
                    .collect();
                Type::Function { params, return_type: Box::new(self.resolve_type_expr(return_type)) }
            }
            TypeExpr::Object { members, .. } => {
                let mut map = IndexMap::new();
                for member in members {
                    let ty = self.resolve_type_expr(&member.type_annotation);
                    map.insert(member.name, Member { ty, optional: member.optional, readonly: member.readonly });
                }
                Type::Interface { name: None, members: map }
            }
            TypeExpr::LiteralNumber(n) => Type::Literal(LiteralValue::Number(OrderedFloat(*n))),
            TypeExpr::LiteralString(s) => Type::Literal(LiteralValue::String(s.clone())),
            TypeExpr::LiteralBoolean(b) => Type::Literal(LiteralValue::Boolean(*b)),
            TypeExpr::Conditional { check, extends, true_type, false_type } => {
                let checked = self.resolve_type_expr(check);
                let constraint = self.resolve_type_expr(extends);
                if crate::types::is_assignable(&checked, &constraint) {
                    self.resolve_type_expr(true_type)
                } else {
                    self.resolve_type_expr(false_type)
                }
            }
            TypeExpr::IndexedAccess { object, index } => {
                let object_ty = self.resolve_type_expr(object);
                match (&object_ty, index.as_ref()) {
                    (Type::Array(elem), _) => (**elem).clone(),
                    (Type::Interface { members, .. }, TypeExpr::LiteralString(s)) => {
                        members.get(&Symbol::intern(s)).map(|m| m.ty.clone()).unwrap_or(Type::Any)
                    }
                    _ => Type::Any,
                }
            }
            TypeExpr::Parenthesized(inner) => self.resolve_type_expr(inner),
            // Mapped/infer types aren't instantiated (§1 Non-goals: generic
            // instantiation); erased to `any`.
            TypeExpr::Mapped { .. } | TypeExpr::Infer { .. } => Type::Any,
            TypeExpr::TypeQuery { name } => {
                self.scopes.resolve_value(*name).map(|b| b.ty.clone()).unwrap_or(Type::Any)
            }
            TypeExpr::Keyof(inner) => {
                let resolved = self.resolve_type_expr(inner);
                match resolved {
                    Type::Interface { members, .. } => Type::union(
                        members.keys().map(|k| Type::Literal(LiteralValue::String(k.to_string()))).collect(),
                    ),
                    _ => Type::string(),
                }
            }
            TypeExpr::Optional(inner) => Type::union(vec![self.resolve_type_expr(inner), Type::undefined()]),
            TypeExpr::Rest(inner) => Type::array_of(self.resolve_type_expr(inner)),
        }
    }

    fn resolve_reference(&mut self, name: Symbol, args: &[TypeExpr]) -> Type {
        match name.as_str() {
            "number" => return Type::number(),
            "string" => return Type::string(),
            "boolean" => return Type::boolean(),
            "void" => return Type::void(),
            "null" => return Type::null(),
            "undefined" => return Type::undefined(),
            "any" => return Type::Any,
            "unknown" => return Type::Unknown,
            "never" => return Type::Never,
            "symbol" => return Type::Primitive(Primitive::Symbol),
            "bigint" => return Type::Primitive(Primitive::Bigint),
            "object" => return Type::Interface { name: None, members: IndexMap::new() },
            "Array" if args.len() == 1 => return Type::array_of(self.resolve_type_expr(&args[0])),
            _ => {}
        }
        if let Some(local) = self.scopes.resolve_type(name) {
            return local.clone();
        }
        if self.resolving_aliases.contains(&name) {
            return Type::Any;
        }
        if let Some(alias) = self.type_aliases.get(&name).cloned() {
            self.resolving_aliases.push(name);
            let resolved = self.resolve_type_expr(&alias);
            self.resolving_aliases.pop();
            return resolved;
        }
        if let Some(iface) = self.interfaces.get(&name) {
            return iface.clone();
        }
        if let Some(class) = self.classes.get(&name) {
            return class.clone();
        }
        if let Some(en) = self.enums.get(&name) {
            return en.clone();
        }
        // An unresolved generic type parameter (generics are parsed but
        // never instantiated, §1 Non-goals) — not a name-not-found error.
        Type::Any
    }
}

fn type_expr_name(te: &TypeExpr) -> Option<Symbol> {
    match te {
        TypeExpr::Reference { name, .. } => Some(*name),
        _ => None,
    }
}

fn line_of_init(expr: &Expr, fallback: u32) -> u32 {
    let line = expr.line();
    if line == 0 {
        fallback
    } else {
        line
    }
}
