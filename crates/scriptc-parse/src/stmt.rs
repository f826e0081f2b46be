//! Statement parsing: declarations, control flow, decorators (§4.2).
//!
//! A leading `@` triggers decorator parsing; a decorator is only legal
//! immediately before a class declaration (including an exported one) or
//! before a class member — anywhere else it's a syntax error.

use crate::ast::*;
use crate::error::ParseResult;
use crate::Parser;
use scriptc_lex::TokenKind;
use scriptc_util::Symbol;

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.check(TokenKind::At) {
            let decorators = self.parse_decorators()?;
            return self.parse_decorated(decorators);
        }
        match self.current().kind {
            TokenKind::Const if self.peek_at(1).kind == TokenKind::Enum => {
                self.advance();
                self.parse_enum_stmt(true)
            }
            TokenKind::Let | TokenKind::Const | TokenKind::Var => self.parse_variable_stmt(),
            TokenKind::Async if self.peek_at(1).kind == TokenKind::Function => {
                self.advance();
                self.parse_function_stmt(true)
            }
            TokenKind::Function => self.parse_function_stmt(false),
            TokenKind::Interface => self.parse_interface_stmt(),
            TokenKind::Type => self.parse_type_alias_stmt(),
            TokenKind::Class => self.parse_class_declaration(Vec::new()),
            TokenKind::Abstract if self.peek_at(1).kind == TokenKind::Class => {
                self.parse_class_declaration(Vec::new())
            }
            TokenKind::Enum => self.parse_enum_stmt(false),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::Break => self.parse_break_stmt(),
            TokenKind::Continue => self.parse_continue_stmt(),
            TokenKind::Throw => self.parse_throw_stmt(),
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::LBrace => self.parse_block_stmt(),
            TokenKind::Import => self.parse_import_stmt(),
            TokenKind::Export => self.parse_export_stmt(Vec::new()),
            TokenKind::Semicolon => {
                let line = self.advance().line;
                Ok(Stmt::Empty { line })
            }
            _ => self.parse_expression_stmt(),
        }
    }

    // -- decorators --------------------------------------------------------

    fn parse_decorators(&mut self) -> ParseResult<Vec<Expr>> {
        let mut decorators = Vec::new();
        while self.check(TokenKind::At) {
            self.advance();
            decorators.push(self.parse_lhs_expression()?);
        }
        Ok(decorators)
    }

    fn parse_decorated(&mut self, decorators: Vec<Expr>) -> ParseResult<Stmt> {
        match self.current().kind {
            TokenKind::Class | TokenKind::Abstract => self.parse_class_declaration(decorators),
            TokenKind::Export => self.parse_export_stmt(decorators),
            _ => Err(self.error_here("a class declaration after a decorator")),
        }
    }

    // -- variable declarations ----------------------------------------------

    fn parse_var_kind(&mut self) -> VarKind {
        match self.advance().kind {
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => VarKind::Var,
        }
    }

    fn parse_variable_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.current().line;
        let kind = self.parse_var_kind();
        let name = self.parse_ident_name("a variable name")?;
        let type_annotation = if self.match_kind(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.match_kind(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Variable(VariableStmt { kind, name, type_annotation, initializer, line }))
    }

    // -- generic type parameters (parsed, then erased; §1 non-goals) -------

    pub(crate) fn skip_type_params(&mut self) -> Vec<Symbol> {
        if !self.check(TokenKind::Lt) {
            return Vec::new();
        }
        let checkpoint = self.checkpoint();
        let attempt: ParseResult<Vec<Symbol>> = (|| {
            self.advance();
            let mut names = Vec::new();
            while !self.check(TokenKind::Gt) {
                let name = self.parse_ident_name("a type parameter")?;
                names.push(name);
                if self.match_kind(TokenKind::Extends) {
                    self.parse_type()?;
                }
                if self.match_kind(TokenKind::Eq) {
                    self.parse_type()?;
                }
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::Gt, "'>'")?;
            Ok(names)
        })();
        match attempt {
            Ok(names) => names,
            Err(_) => {
                self.restore(checkpoint);
                Vec::new()
            }
        }
    }

    // -- functions -----------------------------------------------------------

    fn parse_function_stmt(&mut self, is_async: bool) -> ParseResult<Stmt> {
        let line = self.current().line;
        self.expect(TokenKind::Function, "'function'")?;
        let name = self.parse_ident_name("a function name")?;
        let type_params = self.skip_type_params();
        let params = self.parse_param_list()?;
        let return_type = if self.match_kind(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = if self.check(TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            // An ambient/declared signature with no body.
            self.match_kind(TokenKind::Semicolon);
            None
        };
        Ok(Stmt::Function(FunctionStmt {
            name,
            type_params,
            params,
            return_type,
            body,
            is_async,
            decorators: Vec::new(),
            line,
        }))
    }

    // -- interfaces ------------------------------------------------------------

    fn parse_interface_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.current().line;
        self.advance(); // 'interface'
        let name = self.parse_ident_name("an interface name")?;
        let type_params = self.skip_type_params();
        let mut extends = Vec::new();
        if self.match_kind(TokenKind::Extends) {
            loop {
                extends.push(self.parse_type()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let readonly = self.match_kind(TokenKind::Readonly);
            let name = self.parse_ident_name("an interface member name")?;
            let optional = self.match_kind(TokenKind::Question);
            // A method-signature member (`foo(a: T): R`) is modeled as a
            // field whose type is a function type, matching the type
            // system's uniform member-map shape (§3).
            let type_annotation = if self.check(TokenKind::LParen) {
                let params = self.parse_fn_type_params()?;
                self.expect(TokenKind::Colon, "':' in method signature")?;
                let return_type = self.parse_type()?;
                TypeExpr::Function { params, return_type: Box::new(return_type) }
            } else {
                self.expect(TokenKind::Colon, "':' in interface member")?;
                self.parse_type()?
            };
            members.push(InterfaceMember { name, type_annotation, optional, readonly });
            if !self.match_kind(TokenKind::Comma) {
                self.match_kind(TokenKind::Semicolon);
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::Interface(InterfaceStmt { name, type_params, extends, members, line }))
    }

    fn parse_fn_type_params(&mut self) -> ParseResult<Vec<FnTypeParam>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) {
            let rest = self.match_kind(TokenKind::DotDotDot);
            let name = self.parse_ident_name("a parameter name")?;
            let optional = self.match_kind(TokenKind::Question);
            self.expect(TokenKind::Colon, "':' in parameter")?;
            let type_annotation = self.parse_type()?;
            params.push(FnTypeParam { name, type_annotation, optional, rest });
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    // -- type aliases ------------------------------------------------------

    fn parse_type_alias_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.current().line;
        self.advance(); // 'type'
        let name = self.parse_ident_name("a type alias name")?;
        let type_params = self.skip_type_params();
        self.expect(TokenKind::Eq, "'=' in type alias")?;
        let value = self.parse_type()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::TypeAlias(TypeAliasStmt { name, type_params, value, line }))
    }

    // -- classes -------------------------------------------------------------

    pub(crate) fn parse_class_declaration(&mut self, decorators: Vec<Expr>) -> ParseResult<Stmt> {
        let line = self.current().line;
        let is_abstract = self.match_kind(TokenKind::Abstract);
        self.expect(TokenKind::Class, "'class'")?;
        let name = self.parse_ident_name("a class name")?;
        let type_params = self.skip_type_params();
        let superclass = if self.match_kind(TokenKind::Extends) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let mut implements = Vec::new();
        if self.match_kind(TokenKind::Implements) {
            loop {
                implements.push(self.parse_type()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        let _ = type_params; // erased at emission (§1 non-goals: generic instantiation)
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) {
            members.push(self.parse_class_member()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::Class(ClassStmt {
            name,
            type_params: Vec::new(),
            superclass,
            implements,
            members,
            is_abstract,
            decorators,
            line,
        }))
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        let line = self.current().line;
        let decorators = if self.check(TokenKind::At) {
            self.parse_decorators()?
        } else {
            Vec::new()
        };
        let is_static = self.match_kind(TokenKind::Static);
        let is_abstract = self.match_kind(TokenKind::Abstract);
        let readonly = self.match_kind(TokenKind::Readonly);
        let name = self.parse_ident_name("a member name")?;

        if self.check(TokenKind::LParen) || self.check(TokenKind::Lt) {
            self.skip_type_params();
            let params = self.parse_param_list()?;
            let return_type = if self.match_kind(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let body = if self.check(TokenKind::LBrace) {
                Some(self.parse_block()?)
            } else {
                // An abstract method has no body (§4.4 lowers it to a comment).
                self.match_kind(TokenKind::Semicolon);
                None
            };
            return Ok(ClassMember {
                kind: MemberKind::Method,
                name,
                is_static,
                is_abstract,
                readonly,
                type_annotation: None,
                params,
                return_type,
                body,
                value: None,
                decorators,
                line,
            });
        }

        let optional = self.match_kind(TokenKind::Question);
        let type_annotation = if self.match_kind(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if self.match_kind(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.match_kind(TokenKind::Semicolon);
        let _ = optional; // fields don't carry `optional` in `ClassMember` (§3 interface member shape covers it)
        Ok(ClassMember {
            kind: MemberKind::Field,
            name,
            is_static,
            is_abstract,
            readonly,
            type_annotation,
            params: Vec::new(),
            return_type: None,
            body: None,
            value,
            decorators,
            line,
        })
    }

    // -- enums -----------------------------------------------------------------

    fn parse_enum_stmt(&mut self, is_const: bool) -> ParseResult<Stmt> {
        let line = self.current().line;
        self.advance(); // 'enum'
        let name = self.parse_ident_name("an enum name")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let member_name = self.parse_ident_name("an enum member name")?;
            let initializer = if self.match_kind(TokenKind::Eq) {
                let expr = self.parse_assignment_for_enum()?;
                match expr {
                    Expr::Literal { value: Literal::Number(n), .. } => EnumInitializer::Number(n),
                    Expr::Literal { value: Literal::String(s), .. } => EnumInitializer::String(s),
                    other => EnumInitializer::Expr(other),
                }
            } else {
                EnumInitializer::None
            };
            members.push(EnumMember { name: member_name, initializer });
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::Enum(EnumStmt { name, is_const, members, line }))
    }

    fn parse_assignment_for_enum(&mut self) -> ParseResult<Expr> {
        self.parse_expression()
    }

    // -- return/if/while/do-while -------------------------------------------

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'return'
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Return(ReturnStmt { value, line }))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'if'
        self.expect(TokenKind::LParen, "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_kind(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If(IfStmt { condition, then_branch, else_branch, line }))
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'while'
        self.expect(TokenKind::LParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While(WhileStmt { condition, body, line }))
    }

    fn parse_do_while_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'do'
        let body = Box::new(self.parse_statement()?);
        self.expect(TokenKind::While, "'while' after 'do' body")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::DoWhile(DoWhileStmt { body, condition, line }))
    }

    // -- the three `for` forms -----------------------------------------------

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'for'
        self.expect(TokenKind::LParen, "'(' after 'for'")?;

        if matches!(self.current().kind, TokenKind::Let | TokenKind::Const | TokenKind::Var) {
            let checkpoint = self.checkpoint();
            let kind = self.parse_var_kind();
            let name = self.parse_ident_name("a loop variable name")?;
            if self.check(TokenKind::Of) || self.check(TokenKind::In) {
                let is_of = self.check(TokenKind::Of);
                self.advance();
                let rhs = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                let body = Box::new(self.parse_statement()?);
                return Ok(if is_of {
                    Stmt::ForOf(ForOfStmt { kind, name, iterable: rhs, body, line })
                } else {
                    Stmt::ForIn(ForInStmt { kind, name, object: rhs, body, line })
                });
            }
            self.restore(checkpoint);
        }

        let init = Box::new(if self.match_kind(TokenKind::Semicolon) {
            ForInit::None
        } else if matches!(self.current().kind, TokenKind::Let | TokenKind::Const | TokenKind::Var) {
            let var_line = self.current().line;
            let kind = self.parse_var_kind();
            let name = self.parse_ident_name("a variable name")?;
            let type_annotation = if self.match_kind(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let initializer = if self.match_kind(TokenKind::Eq) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            self.expect(TokenKind::Semicolon, "';'")?;
            ForInit::Variable(VariableStmt { kind, name, type_annotation, initializer, line: var_line })
        } else {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::Semicolon, "';'")?;
            ForInit::Expression(expr)
        });

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For(ForStmt { init, condition, update, body, line }))
    }

    // -- switch ------------------------------------------------------------

    fn parse_switch_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'switch'
        self.expect(TokenKind::LParen, "'(' after 'switch'")?;
        let discriminant = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut cases = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let test = if self.match_kind(TokenKind::Case) {
                let t = self.parse_expression()?;
                self.expect(TokenKind::Colon, "':' after case expression")?;
                Some(t)
            } else {
                self.expect(TokenKind::Default, "'case' or 'default'")?;
                self.expect(TokenKind::Colon, "':' after 'default'")?;
                None
            };
            let mut consequent = Vec::new();
            while !matches!(self.current().kind, TokenKind::Case | TokenKind::Default | TokenKind::RBrace) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, consequent });
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::Switch(SwitchStmt { discriminant, cases, line }))
    }

    // -- break/continue/throw/try --------------------------------------------

    fn parse_break_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Break(BreakStmt { line }))
    }

    fn parse_continue_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Continue(ContinueStmt { line }))
    }

    fn parse_throw_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Throw(ThrowStmt { value, line }))
    }

    fn parse_try_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'try'
        let block = self.parse_block()?;
        let handler = if self.match_kind(TokenKind::Catch) {
            let param = if self.match_kind(TokenKind::LParen) {
                let name = self.parse_ident_name("a catch parameter name")?;
                if self.match_kind(TokenKind::Colon) {
                    self.parse_type()?; // annotation erased; catch bindings are always `any`
                }
                self.expect(TokenKind::RParen, "')'")?;
                Some(name)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };
        let finalizer = if self.match_kind(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::Try(TryStmt { block, handler, finalizer, line }))
    }

    // -- blocks --------------------------------------------------------------

    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let line = self.current().line;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Block { statements, line })
    }

    fn parse_block_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.current().line;
        let block = self.parse_block()?;
        Ok(Stmt::Block(BlockStmt { block, line }))
    }

    // -- import/export ---------------------------------------------------------

    fn parse_import_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'import'
        let mut specifiers = Vec::new();
        let mut default = None;

        if matches!(self.current().kind, TokenKind::Identifier) {
            default = Some(self.advance().lexeme);
            self.match_kind(TokenKind::Comma);
        }

        if self.match_kind(TokenKind::LBrace) {
            while !self.check(TokenKind::RBrace) {
                let imported = self.parse_ident_name("an imported name")?;
                let local = if self.match_kind(TokenKind::As) {
                    self.parse_ident_name("a local binding name")?
                } else {
                    imported
                };
                specifiers.push(ImportSpecifier { imported, local });
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace, "'}'")?;
        }

        self.expect(TokenKind::From, "'from'")?;
        let source_tok = self.expect(TokenKind::String, "a module specifier string")?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Import(ImportStmt {
            specifiers,
            default,
            source: source_tok.lexeme.to_string(),
            line,
        }))
    }

    fn parse_export_stmt(&mut self, decorators: Vec<Expr>) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'export'
        if self.match_kind(TokenKind::Default) {
            let value = self.parse_expression()?;
            self.match_kind(TokenKind::Semicolon);
            return Ok(Stmt::Export(ExportStmt::Default { value, line }));
        }
        if self.match_kind(TokenKind::LBrace) {
            let mut specifiers = Vec::new();
            while !self.check(TokenKind::RBrace) {
                let imported = self.parse_ident_name("an exported name")?;
                let local = if self.match_kind(TokenKind::As) {
                    self.parse_ident_name("a local binding name")?
                } else {
                    imported
                };
                specifiers.push(ImportSpecifier { imported, local });
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace, "'}'")?;
            self.expect(TokenKind::Semicolon, "';'")?;
            return Ok(Stmt::Export(ExportStmt::Named { specifiers, line }));
        }
        let decl = if self.check(TokenKind::At) {
            let more = self.parse_decorators()?;
            let mut all = decorators;
            all.extend(more);
            self.parse_decorated(all)?
        } else if matches!(self.current().kind, TokenKind::Class | TokenKind::Abstract) {
            self.parse_class_declaration(decorators)?
        } else {
            self.parse_statement()?
        };
        Ok(Stmt::Export(ExportStmt::Declaration { decl: Box::new(decl), line }))
    }

    // -- expression statements ------------------------------------------------

    fn parse_expression_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.current().line;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Expression(ExpressionStmt { expr, line }))
    }
}
