//! Declaration parsing implementation
//!
//! This module handles the two top-level declaration forms:
//!
//! - Struct declarations: `struct name field `type, field `type;`
//! - Function declarations: `fn name(arg `type, ...) [`type] { body }`
//!
//! # Grammar
//!
//! ```text
//! declaration ::= struct_decl | fn_decl
//! struct_decl ::= "struct" ws identifier field ("," field)* ";"
//! field       ::= identifier type
//! fn_decl     ::= "fn" ws identifier "(" (arg ("," arg)*)? ")" type? "{" statement* "}"
//! arg         ::= identifier type
//! ```
//!
//! A function's signature is registered before its body is parsed, so the
//! body may call the function itself. Functions declared later in the source
//! are not visible yet.

use crate::ast::{Argument, FunctionSignature, LocalVariable, StructField};
use crate::constants::MAX_FUNCTION_ARGS;
use crate::errors::CompileError;
use crate::parser::parse::Parser;
use crate::parser::types::TYPE_MARKER;

impl Parser<'_, '_> {
    /// Parse one top-level declaration
    pub(crate) fn parse_declaration(&mut self) -> Result<(), CompileError> {
        let start = self.cursor.location();
        match self.cursor.bump() {
            Some(b's') if self.cursor.try_match(b"truct") => self.parse_struct_declaration(),
            Some(b'f') if self.cursor.try_match(b"n") => self.parse_function_declaration(),
            _ => Err(CompileError::syntax(
                start,
                "Expected either 'struct' or 'fn' to begin declaration.",
            )),
        }
    }

    /// Parse the rest of a struct declaration after the `struct` keyword
    fn parse_struct_declaration(&mut self) -> Result<(), CompileError> {
        self.cursor.skip_whitespace1()?;
        let name = self.intern_identifier()?;
        let first_field_index = self.symbols.next_field_index();
        self.cursor.skip_whitespace();

        loop {
            let field_name = self.intern_identifier()?;
            self.cursor.skip_whitespace();
            let ty = self.parse_type()?;
            self.symbols.push_struct_field(StructField {
                name: field_name,
                ty,
            })?;

            self.cursor.skip_whitespace();
            let separator = self.cursor.location();
            match self.cursor.bump() {
                Some(b',') => self.cursor.skip_whitespace(),
                Some(b';') => break,
                _ => return Err(CompileError::syntax(separator, "Expected ',' or ';'.")),
            }
        }

        self.symbols.define_struct(name, first_field_index);
        log::debug!(
            "registered struct '{}' with {} field(s)",
            self.text(name),
            self.symbols.next_field_index() - first_field_index
        );
        Ok(())
    }

    /// Parse the rest of a function declaration after the `fn` keyword
    fn parse_function_declaration(&mut self) -> Result<(), CompileError> {
        self.cursor.skip_whitespace1()?;
        let name = self.intern_identifier()?;
        self.cursor.skip_whitespace();
        self.expect_char(b'(', "Expected '(' to begin argument list.")?;

        self.symbols.reset_locals();
        let args = self.parse_argument_list()?;

        self.cursor.skip_whitespace();
        let return_type = if self.cursor.peek() == Some(TYPE_MARKER) {
            let ty = self.parse_type()?;
            self.cursor.skip_whitespace();
            Some(ty)
        } else {
            None
        };
        self.expect_char(
            b'{',
            "Expected '{' after argument list to begin function body.",
        )?;

        let arity = args.len();
        self.symbols
            .define_function(name, FunctionSignature { args, return_type });
        log::debug!("registered fn '{}' with arity {}", self.text(name), arity);

        self.parse_function_body()
    }

    /// Parse arguments up to and including the closing `)`.
    ///
    /// Each argument also becomes a local variable of the body.
    fn parse_argument_list(&mut self) -> Result<Vec<Argument>, CompileError> {
        let mut args = Vec::new();
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(b')') {
            self.cursor.advance();
            return Ok(args);
        }

        loop {
            let arg_location = self.cursor.location();
            if args.len() == MAX_FUNCTION_ARGS {
                return Err(CompileError::syntax(
                    arg_location,
                    format!("Functions take at most {} arguments.", MAX_FUNCTION_ARGS),
                ));
            }
            let arg_name = self.intern_identifier()?;
            self.cursor.skip_whitespace();
            let ty = self.parse_type()?;
            args.push(Argument { name: arg_name, ty });
            self.symbols.push_local(LocalVariable {
                name: arg_name,
                ty: Some(ty),
            })?;

            self.cursor.skip_whitespace();
            let separator = self.cursor.location();
            match self.cursor.bump() {
                Some(b',') => self.cursor.skip_whitespace(),
                Some(b')') => return Ok(args),
                _ => return Err(CompileError::syntax(separator, "Expected ',' or ')'.")),
            }
        }
    }
}
