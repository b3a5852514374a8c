//! Expression parsing implementation
//!
//! Expressions are function calls, local variable references and integer
//! literals. They are written to the flat expression tape in pre-order: a
//! call's `Operation` node comes first and is followed by exactly `arity`
//! argument subtrees.
//!
//! # Grammar
//!
//! ```text
//! expression ::= call | identifier | integer_literal
//! call       ::= identifier "(" expression{arity} ")"
//! integer    ::= digit+ ("i" | "u") digit+
//! ```
//!
//! Call arguments are separated by whitespace only.
//! The number of arguments comes from the callee's registered signature.
//!
//! Recursion depth is bounded by [`EXPRESSION_DEPTH_LIMIT`]; reaching it is
//! fatal no matter how much input remains.

use crate::ast::{ExprNode, Location};
use crate::constants::EXPRESSION_DEPTH_LIMIT;
use crate::errors::CompileError;
use crate::interner::StringId;
use crate::parser::cursor::{is_digit, is_identifier_start};
use crate::parser::parse::Parser;

impl Parser<'_, '_> {
    /// Parse one expression, returning the tape index of its root node
    pub(crate) fn parse_expression(&mut self, depth: u8) -> Result<usize, CompileError> {
        let location = self.cursor.location();
        if depth >= EXPRESSION_DEPTH_LIMIT {
            return Err(CompileError::DepthLimit { location });
        }

        match self.cursor.peek() {
            Some(c) if is_identifier_start(c) => {
                let name = self.intern_identifier()?;
                self.cursor.skip_whitespace();
                if self.cursor.peek() == Some(b'(') {
                    self.cursor.advance();
                    self.parse_call(depth, location, name)
                } else {
                    self.parse_variable(location, name)
                }
            }
            Some(c) if is_digit(c) => {
                let text = self.parse_integer_literal()?;
                self.symbols.push_expression(ExprNode::integer(text))
            }
            _ => Err(CompileError::syntax(
                location,
                "Expected identifier or number literal.",
            )),
        }
    }

    /// Parse call arguments after the opening `(`.
    ///
    /// `name_location` is where the callee's name starts; unknown functions
    /// and missing arguments are reported there.
    pub(crate) fn parse_call(
        &mut self,
        depth: u8,
        name_location: Location,
        name: StringId,
    ) -> Result<usize, CompileError> {
        let Some(arity) = self.symbols.function(name).map(|sig| sig.arity()) else {
            return Err(CompileError::UnknownFunction {
                location: name_location,
                name: self.text(name),
            });
        };

        let root = self.symbols.push_expression(ExprNode::operation(name, arity))?;
        log::trace!("call '{}' at {}", self.text(name), name_location);

        for _ in 0..arity {
            self.cursor.skip_whitespace();
            if self.cursor.peek() == Some(b')') {
                return Err(CompileError::ArityMismatch {
                    location: name_location,
                    name: self.text(name),
                    arity,
                });
            }
            self.parse_expression(depth + 1)?;
        }

        self.cursor.skip_whitespace();
        let close = self.cursor.location();
        if !self.cursor.try_match(b")") {
            return Err(CompileError::ArityMismatch {
                location: close,
                name: self.text(name),
                arity,
            });
        }
        Ok(root)
    }

    fn parse_variable(&mut self, location: Location, name: StringId) -> Result<usize, CompileError> {
        if self.symbols.find_local(name).is_none() {
            return Err(CompileError::UnknownVariable {
                location,
                name: self.text(name),
            });
        }
        self.symbols.push_expression(ExprNode::identifier(name))
    }

    /// Scan `digits (i|u) digits` and intern the literal text.
    ///
    /// The value is not computed.
    pub(crate) fn parse_integer_literal(&mut self) -> Result<StringId, CompileError> {
        let start = self.cursor.location();
        self.cursor
            .require_char(is_digit, "Expected digits to begin integer literal.")?;
        self.cursor.digits();
        self.cursor.require_char(
            |c| c == b'i' || c == b'u',
            "Expected 'u' or 'i' after digits to specify signedness.",
        )?;
        self.cursor.require_char(
            is_digit,
            "Expected digits after signedness to specify size.",
        )?;
        self.cursor.digits();
        let text = self.cursor.slice_from(&start);
        self.interner.intern(text)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ExprKind, ExprNode};
    use crate::errors::CompileError;
    use crate::session::Session;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_self_call_resolves() {
        let mut session = Session::new();
        session
            .compile_source("rec.mc", b"fn f(x `i32) { f(x) }")
            .unwrap();
        let f = session.intern("f").unwrap();
        let x = session.intern("x").unwrap();
        assert_eq!(
            session.symbols().expressions(),
            &[ExprNode::operation(f, 1), ExprNode::identifier(x)]
        );
    }

    #[test]
    fn test_nested_calls_are_prefix_ordered() {
        let mut session = Session::new();
        let source = b"fn one(a `u8) {}\nfn two(a `u8, b `u8) {}\nfn main(v `u8) { two(one(v) 7u8) }";
        session.compile_source("nest.mc", source).unwrap();

        let kinds: Vec<_> = session
            .symbols()
            .expressions()
            .iter()
            .map(|node| (node.kind, node.arity))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ExprKind::Operation, 2),
                (ExprKind::Operation, 1),
                (ExprKind::Identifier, 0),
                (ExprKind::IntegerLiteral, 0),
            ]
        );
        assert_eq!(session.symbols().expression_len(0), 4);
        let literal = session.symbols().expressions()[3].data;
        assert_eq!(session.interner().lookup(literal), b"7u8");
    }

    #[test]
    fn test_comma_between_call_arguments_is_rejected() {
        let mut session = Session::new();
        let source = b"fn two(a `u8, b `u8) {}\nfn main(v `u8) { two(v, v) }";
        let diag = session.compile_source("comma.mc", source).unwrap_err();
        match diag.error {
            CompileError::Syntax { location, message } => {
                assert_eq!((location.line, location.column), (2, 23));
                assert_eq!(message, "Expected identifier or number literal.");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_separated_arguments() {
        let mut session = Session::new();
        let source = b"fn two(a `u8, b `u8) {}\nfn main(v `u8) { two(v\n  1i32) }";
        session.compile_source("space.mc", source).unwrap();
        assert_eq!(session.symbols().expressions().len(), 3);
    }

    #[test]
    fn test_too_few_arguments_reports_call_site_and_arity() {
        let mut session = Session::new();
        let diag = session
            .compile_source("arity.mc", b"fn f(x `u8) {}\nfn g() { f() }")
            .unwrap_err();
        match diag.error {
            CompileError::ArityMismatch {
                location,
                ref name,
                arity,
            } => {
                assert_eq!(name, "f");
                assert_eq!(arity, 1);
                assert_eq!((location.line, location.column), (2, 10));
            }
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(diag.to_string().contains("has arity 1"));
    }

    #[test]
    fn test_too_many_arguments() {
        let mut session = Session::new();
        let diag = session
            .compile_source("arity.mc", b"fn f(x `u8) { f(x x) }")
            .unwrap_err();
        match diag.error {
            CompileError::ArityMismatch { location, arity, .. } => {
                assert_eq!(arity, 1);
                assert_eq!(location.column, 19);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_function() {
        let mut session = Session::new();
        let diag = session
            .compile_source("u.mc", b"fn f(x `u8) {\n  y = nope(x)\n}")
            .unwrap_err();
        match diag.error {
            CompileError::UnknownFunction { location, name } => {
                assert_eq!(name, "nope");
                assert_eq!((location.line, location.column), (2, 7));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_forward_call_is_not_hoisted() {
        let mut session = Session::new();
        let diag = session
            .compile_source("fwd.mc", b"fn a() { b() }\nfn b() {}")
            .unwrap_err();
        assert!(matches!(diag.error, CompileError::UnknownFunction { ref name, .. } if name == "b"));
    }

    #[test]
    fn test_unknown_variable_points_at_identifier() {
        let mut session = Session::new();
        let diag = session
            .compile_source("v.mc", b"fn f(x `u8) {\n  :while   missing\n}")
            .unwrap_err();
        match diag.error {
            CompileError::UnknownVariable { location, name } => {
                assert_eq!(name, "missing");
                assert_eq!((location.line, location.column), (2, 12));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_literal_requires_signedness_and_width() {
        let mut session = Session::new();
        let diag = session
            .compile_source("l.mc", b"fn f() { x = 12 }")
            .unwrap_err();
        assert!(matches!(
            diag.error,
            CompileError::Syntax { ref message, .. }
                if message == "Expected 'u' or 'i' after digits to specify signedness."
        ));

        let diag = session
            .compile_source("l.mc", b"fn f() { x = 12u }")
            .unwrap_err();
        assert!(matches!(
            diag.error,
            CompileError::Syntax { ref message, .. }
                if message == "Expected digits after signedness to specify size."
        ));
    }

    #[test]
    fn test_unexpected_expression_start() {
        let mut session = Session::new();
        let diag = session
            .compile_source("e.mc", b"fn f() { x = (y) }")
            .unwrap_err();
        match diag.error {
            CompileError::Syntax { location, message } => {
                assert_eq!(location.column, 14);
                assert_eq!(message, "Expected identifier or number literal.");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_depth_limit() {
        let nested = |depth: usize| {
            format!(
                "fn f(x `u8) {{ {}x{} }}",
                "f(".repeat(depth),
                ")".repeat(depth)
            )
        };

        // the innermost `x` of nested(n) is parsed at depth n
        let mut session = Session::new();
        session
            .compile_source("ok.mc", nested(254).as_bytes())
            .unwrap();

        let diag = session
            .compile_source("deep.mc", nested(255).as_bytes())
            .unwrap_err();
        match diag.error {
            CompileError::DepthLimit { location } => {
                // "fn f(x `u8) { " is 14 bytes, then 255 "f(" pairs
                assert_eq!(location.column, 15 + 2 * 255);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
