//! Statement parsing implementation
//!
//! This module handles the statements of a function body:
//!
//! - Control markers: `:if expr`, `:else`, `:switch expr`, `:case expr`,
//!   `:while expr`, `:end`
//! - Local declarations: `name = expr`
//! - Call statements: `name(args)`
//!
//! # Grammar
//!
//! ```text
//! body      ::= statement* "}"
//! statement ::= ":" marker | identifier "=" expression | identifier "(" args ")"
//! marker    ::= ("if" | "switch" | "case" | "while") expression | "else" | "end"
//! ```
//!
//! Markers are flat: nesting is not checked here. A local declared by
//! `name = expr` enters scope only after its initializer is parsed.

use crate::ast::LocalVariable;
use crate::errors::CompileError;
use crate::parser::cursor::is_identifier_start;
use crate::parser::parse::Parser;

/// Keyword following `:` in a function body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlMarker {
    If,
    Else,
    Switch,
    Case,
    While,
    End,
}

impl ControlMarker {
    /// Markers that are followed by a condition or selector expression
    fn takes_expression(self) -> bool {
        !matches!(self, ControlMarker::Else | ControlMarker::End)
    }
}

impl Parser<'_, '_> {
    /// Parse statements up to and including the closing `}`
    pub(crate) fn parse_function_body(&mut self) -> Result<(), CompileError> {
        loop {
            self.cursor.skip_whitespace();
            let location = self.cursor.location();
            match self.cursor.peek() {
                Some(b'}') => {
                    self.cursor.advance();
                    return Ok(());
                }
                Some(b':') => {
                    self.cursor.advance();
                    let marker = self.parse_control_marker()?;
                    log::trace!("control marker {:?} at {}", marker, location);
                    if marker.takes_expression() {
                        self.cursor.skip_whitespace();
                        self.parse_expression(0)?;
                    }
                }
                Some(c) if is_identifier_start(c) => self.parse_name_statement()?,
                _ => return Err(CompileError::syntax(location, "Expected statement or '}'.")),
            }
        }
    }

    fn parse_control_marker(&mut self) -> Result<ControlMarker, CompileError> {
        let start = self.cursor.location();
        let marker = match self.cursor.bump() {
            Some(b'i') if self.cursor.try_match(b"f") => Some(ControlMarker::If),
            Some(b'e') => match self.cursor.bump() {
                Some(b'l') if self.cursor.try_match(b"se") => Some(ControlMarker::Else),
                Some(b'n') if self.cursor.try_match(b"d") => Some(ControlMarker::End),
                _ => None,
            },
            Some(b's') if self.cursor.try_match(b"witch") => Some(ControlMarker::Switch),
            Some(b'c') if self.cursor.try_match(b"ase") => Some(ControlMarker::Case),
            Some(b'w') if self.cursor.try_match(b"hile") => Some(ControlMarker::While),
            _ => None,
        };
        marker.ok_or_else(|| {
            CompileError::syntax(
                start,
                "Expected one of 'if', 'else', 'switch', 'case', 'while', or 'end' after ':'.",
            )
        })
    }

    /// `name = expr` or `name(args)`
    fn parse_name_statement(&mut self) -> Result<(), CompileError> {
        let name_location = self.cursor.location();
        let name = self.intern_identifier()?;
        self.cursor.skip_whitespace();

        let location = self.cursor.location();
        match self.cursor.peek() {
            Some(b'=') => {
                self.cursor.advance();
                self.cursor.skip_whitespace();
                self.parse_expression(0)?;
                self.symbols.push_local(LocalVariable { name, ty: None })?;
                log::trace!("local '{}' declared at {}", self.text(name), name_location);
                Ok(())
            }
            Some(b'(') => {
                self.cursor.advance();
                self.parse_call(0, name_location, name)?;
                Ok(())
            }
            _ => Err(CompileError::syntax(location, "Expected statement or '}'.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::ExprKind;
    use crate::errors::CompileError;
    use crate::session::Session;
    use pretty_assertions::assert_eq;

    fn syntax_error(source: &str) -> (usize, usize, String) {
        let mut session = Session::new();
        let diag = session
            .compile_source("s.mc", source.as_bytes())
            .unwrap_err();
        match diag.error {
            CompileError::Syntax { location, message } => (location.line, location.column, message),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_control_markers() {
        let source = "fn f(x `u8) {\n  :if x\n  :else\n  :end\n  :switch x :case 1u8 :end\n  :while x :end\n}";
        let mut session = Session::new();
        session.compile_source("m.mc", source.as_bytes()).unwrap();

        let kinds: Vec<_> = session
            .symbols()
            .expressions()
            .iter()
            .map(|node| node.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ExprKind::Identifier,
                ExprKind::Identifier,
                ExprKind::IntegerLiteral,
                ExprKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_unknown_marker_reports_keyword_start() {
        let (line, column, message) = syntax_error("fn f() {\n  :for\n}");
        assert_eq!((line, column), (2, 4));
        assert_eq!(
            message,
            "Expected one of 'if', 'else', 'switch', 'case', 'while', or 'end' after ':'."
        );
    }

    #[test]
    fn test_partial_marker_reports_keyword_start() {
        let (line, column, _) = syntax_error("fn f() { :els }");
        assert_eq!((line, column), (1, 11));
        let (_, column, _) = syntax_error("fn f() { :ex }");
        assert_eq!(column, 11);
    }

    #[test]
    fn test_local_declaration_enters_scope_after_initializer() {
        let mut session = Session::new();
        session
            .compile_source("l.mc", b"fn f(a `u8) { b = a c = b }")
            .unwrap();
        let b = session.intern("b").unwrap();
        let c = session.intern("c").unwrap();
        let locals = session.symbols().locals();
        assert_eq!(locals.len(), 3);
        assert_eq!(locals[1].name, b);
        assert!(locals[1].ty.is_none());
        assert_eq!(locals[2].name, c);

        let diag = session
            .compile_source("l.mc", b"fn g() { x = x }")
            .unwrap_err();
        assert!(matches!(diag.error, CompileError::UnknownVariable { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_name_without_assignment_or_call() {
        let (line, column, message) = syntax_error("fn f() { x; }");
        assert_eq!((line, column), (1, 11));
        assert_eq!(message, "Expected statement or '}'.");
    }

    #[test]
    fn test_unterminated_body() {
        let (line, column, message) = syntax_error("fn f() {\n  x = 1u8\n");
        assert_eq!((line, column), (3, 1));
        assert_eq!(message, "Expected statement or '}'.");
    }

    #[test]
    fn test_unexpected_statement_character() {
        let (_, column, message) = syntax_error("fn f() { 42u8 }");
        assert_eq!(column, 10);
        assert_eq!(message, "Expected statement or '}'.");
    }
}
