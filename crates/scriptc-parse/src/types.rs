//! Type expression parsing (§4.2).
//!
//! Precedence lowest to highest: union (`|`) → intersection (`&`) → postfix
//! array/indexed-access (`T[]` / `T[K]`) → primary. Primary handles
//! parenthesized, tuple, object, literal, `typeof`, `keyof`, `infer`, and
//! identifier/primitive references optionally followed by a type-argument
//! list. An `extends` directly after a primary type reference begins a
//! conditional type `T extends U ? A : B` (ambiguity 3 in §4.2).

use crate::ast::*;
use crate::error::ParseResult;
use crate::Parser;
use scriptc_lex::TokenKind;

impl Parser {
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_union_type()
    }

    fn parse_union_type(&mut self) -> ParseResult<TypeExpr> {
        self.match_kind(TokenKind::Pipe); // permit a leading `|`
        let mut arms = vec![self.parse_intersection_type()?];
        while self.match_kind(TokenKind::Pipe) {
            arms.push(self.parse_intersection_type()?);
        }
        Ok(if arms.len() == 1 {
            arms.into_iter().next().unwrap()
        } else {
            TypeExpr::Union(arms)
        })
    }

    fn parse_intersection_type(&mut self) -> ParseResult<TypeExpr> {
        self.match_kind(TokenKind::Amp);
        let mut arms = vec![self.parse_postfix_type()?];
        while self.match_kind(TokenKind::Amp) {
            arms.push(self.parse_postfix_type()?);
        }
        Ok(if arms.len() == 1 {
            arms.into_iter().next().unwrap()
        } else {
            TypeExpr::Intersection(arms)
        })
    }

    fn parse_postfix_type(&mut self) -> ParseResult<TypeExpr> {
        let mut ty = self.parse_primary_type()?;
        loop {
            if self.check(TokenKind::LBracket) {
                self.advance();
                if self.match_kind(TokenKind::RBracket) {
                    ty = TypeExpr::Array(Box::new(ty));
                } else {
                    let index = self.parse_type()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    ty = TypeExpr::IndexedAccess {
                        object: Box::new(ty),
                        index: Box::new(index),
                    };
                }
            } else {
                break;
            }
        }
        Ok(ty)
    }

    /// Parses a primary type and, if an `extends` directly follows, folds it
    /// into a conditional type `ty extends U ? A : B`.
    fn parse_primary_type(&mut self) -> ParseResult<TypeExpr> {
        let check = self.parse_primary_type_inner()?;
        if self.check(TokenKind::Extends) {
            self.advance();
            let extends = self.parse_postfix_type()?;
            self.expect(TokenKind::Question, "'?' in conditional type")?;
            let true_type = self.parse_type()?;
            self.expect(TokenKind::Colon, "':' in conditional type")?;
            let false_type = self.parse_type()?;
            return Ok(TypeExpr::Conditional {
                check: Box::new(check),
                extends: Box::new(extends),
                true_type: Box::new(true_type),
                false_type: Box::new(false_type),
            });
        }
        Ok(check)
    }

    fn parse_primary_type_inner(&mut self) -> ParseResult<TypeExpr> {
        match self.current().kind {
            TokenKind::LParen => {
                let checkpoint = self.checkpoint();
                if let Some(ft) = self.try_parse_function_type()? {
                    return Ok(ft);
                }
                self.restore(checkpoint);
                self.advance();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(TypeExpr::Parenthesized(Box::new(inner)))
            }
            TokenKind::LBracket => self.parse_tuple_type(),
            TokenKind::LBrace => self.parse_object_type(),
            TokenKind::Number => {
                let tok = self.advance();
                Ok(TypeExpr::LiteralNumber(tok.lexeme.as_str().parse().unwrap_or(0.0)))
            }
            TokenKind::String => {
                let tok = self.advance();
                Ok(TypeExpr::LiteralString(tok.lexeme.to_string()))
            }
            TokenKind::True => {
                self.advance();
                Ok(TypeExpr::LiteralBoolean(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(TypeExpr::LiteralBoolean(false))
            }
            TokenKind::Typeof => {
                self.advance();
                let name = self.parse_ident_name("identifier after 'typeof'")?;
                Ok(TypeExpr::TypeQuery { name })
            }
            TokenKind::Keyof => {
                self.advance();
                let operand = self.parse_postfix_type()?;
                Ok(TypeExpr::Keyof(Box::new(operand)))
            }
            TokenKind::Infer => {
                self.advance();
                let name = self.parse_ident_name("type parameter name after 'infer'")?;
                Ok(TypeExpr::Infer { name })
            }
            TokenKind::DotDotDot => {
                self.advance();
                let inner = self.parse_postfix_type()?;
                Ok(TypeExpr::Rest(Box::new(inner)))
            }
            TokenKind::Question => {
                self.advance();
                let inner = self.parse_postfix_type()?;
                Ok(TypeExpr::Optional(Box::new(inner)))
            }
            _ => self.parse_type_reference(),
        }
    }

    fn parse_type_reference(&mut self) -> ParseResult<TypeExpr> {
        let name = self.parse_ident_name("a type")?;
        let args = if self.check(TokenKind::Lt) {
            self.try_parse_type_argument_list()?.unwrap_or_default()
        } else {
            Vec::new()
        };
        Ok(TypeExpr::Reference { name, args })
    }

    fn parse_tuple_type(&mut self) -> ParseResult<TypeExpr> {
        self.advance(); // '['
        let mut elements = Vec::new();
        while !self.check(TokenKind::RBracket) {
            elements.push(self.parse_type()?);
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "']'")?;
        Ok(TypeExpr::Tuple(elements))
    }

    fn parse_object_type(&mut self) -> ParseResult<TypeExpr> {
        self.advance(); // '{'
        if let Some(mapped) = self.try_parse_mapped_type()? {
            return Ok(mapped);
        }
        let mut members = Vec::new();
        let mut index_signatures = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let readonly = self.match_kind(TokenKind::Readonly);
            if self.check(TokenKind::LBracket)
                && matches!(self.peek_at(1).kind, TokenKind::Identifier)
                && self.peek_at(2).kind == TokenKind::Colon
            {
                self.advance(); // '['
                self.advance(); // key name (unused; only its type matters structurally)
                self.advance(); // ':'
                let key_type = self.parse_type()?;
                self.expect(TokenKind::RBracket, "']'")?;
                self.expect(TokenKind::Colon, "':' in index signature")?;
                let value_type = self.parse_type()?;
                index_signatures.push(IndexSignature { key_type, value_type });
            } else {
                let name = self.parse_ident_name("a member name")?;
                let optional = self.match_kind(TokenKind::Question);
                self.expect(TokenKind::Colon, "':' in object type member")?;
                let type_annotation = self.parse_type()?;
                members.push(ObjectTypeMember {
                    name,
                    type_annotation,
                    optional,
                    readonly,
                });
            }
            if !self.match_kind(TokenKind::Comma) {
                self.match_kind(TokenKind::Semicolon);
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(TypeExpr::Object { members, index_signatures })
    }

    /// Speculatively parses a mapped type `{ [K in T]: V }` (with an
    /// optional leading `readonly` and trailing `?`), immediately after the
    /// opening `{`. Restores the cursor and returns `None` on any mismatch,
    /// so the caller falls back to an ordinary member/index-signature
    /// object type — the same brace prefix (`[` then an identifier) as an
    /// index signature, disambiguated only by the `in` that follows the key
    /// name instead of `:`.
    fn try_parse_mapped_type(&mut self) -> ParseResult<Option<TypeExpr>> {
        let checkpoint = self.checkpoint();
        let attempt: ParseResult<TypeExpr> = (|| {
            self.match_kind(TokenKind::Readonly);
            self.expect(TokenKind::LBracket, "'['")?;
            let key_name = self.parse_ident_name("mapped-type key name")?;
            self.expect(TokenKind::In, "'in' in mapped type")?;
            let constraint = self.parse_type()?;
            self.expect(TokenKind::RBracket, "']'")?;
            self.match_kind(TokenKind::Question);
            self.expect(TokenKind::Colon, "':' in mapped type")?;
            let value_type = self.parse_type()?;
            self.match_kind(TokenKind::Semicolon);
            self.match_kind(TokenKind::Comma);
            self.expect(TokenKind::RBrace, "'}'")?;
            Ok(TypeExpr::Mapped {
                key_name,
                constraint: Box::new(constraint),
                value_type: Box::new(value_type),
            })
        })();
        match attempt {
            Ok(ty) => Ok(Some(ty)),
            Err(_) => {
                self.restore(checkpoint);
                Ok(None)
            }
        }
    }

    /// Speculatively parses `(params) => ReturnType` as a function type.
    /// Restores the cursor and returns `None` on any mismatch, so the
    /// caller falls back to a parenthesized type.
    fn try_parse_function_type(&mut self) -> ParseResult<Option<TypeExpr>> {
        let checkpoint = self.checkpoint();
        let attempt: ParseResult<TypeExpr> = (|| {
            self.expect(TokenKind::LParen, "'('")?;
            let mut params = Vec::new();
            while !self.check(TokenKind::RParen) {
                let rest = self.match_kind(TokenKind::DotDotDot);
                let name = self.parse_ident_name("parameter name")?;
                let optional = self.match_kind(TokenKind::Question);
                self.expect(TokenKind::Colon, "':' in function type parameter")?;
                let type_annotation = self.parse_type()?;
                params.push(FnTypeParam { name, type_annotation, optional, rest });
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
            self.expect(TokenKind::Arrow, "'=>'")?;
            let return_type = self.parse_type()?;
            Ok(TypeExpr::Function { params, return_type: Box::new(return_type) })
        })();
        match attempt {
            Ok(ty) => Ok(Some(ty)),
            Err(_) => {
                self.restore(checkpoint);
                Ok(None)
            }
        }
    }
}
