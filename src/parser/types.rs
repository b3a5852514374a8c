//! Type annotation parsing
//!
//! ```text
//! type     ::= "`" identifier modifier*
//! modifier ::= "*" | "[" integer_literal "]"
//! ```
//!
//! At most [`MAX_TYPE_MODIFIERS`] modifiers are allowed. Array lengths are
//! kept as interned literal text in the array-length arena.

use crate::ast::{Modifier, Type};
use crate::constants::MAX_TYPE_MODIFIERS;
use crate::errors::CompileError;
use crate::parser::parse::Parser;

/// Character that introduces every type annotation
pub const TYPE_MARKER: u8 = b'`';

impl Parser<'_, '_> {
    pub(crate) fn parse_type(&mut self) -> Result<Type, CompileError> {
        self.expect_char(TYPE_MARKER, "Expected '`' to begin type.")?;
        let base = self.intern_identifier()?;
        let mut ty = Type::new(base, self.symbols.next_array_length_index());

        loop {
            let location = self.cursor.location();
            let modifier = match self.cursor.peek() {
                Some(b'*') => Modifier::Pointer,
                Some(b'[') => Modifier::Array,
                _ => break,
            };
            if ty.modifier_count == MAX_TYPE_MODIFIERS {
                return Err(CompileError::syntax(
                    location,
                    format!(
                        "Types have at most {} pointer or array modifiers.",
                        MAX_TYPE_MODIFIERS
                    ),
                ));
            }
            self.cursor.advance();

            if modifier == Modifier::Array {
                let length = self.parse_integer_literal()?;
                self.symbols.push_array_length(length)?;
                self.expect_char(b']', "Expected ']' after array length.")?;
            }
            ty.push_modifier(modifier);
        }

        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Modifier;
    use crate::errors::CompileError;
    use crate::session::Session;
    use pretty_assertions::assert_eq;

    fn field_type(session: &mut Session, source: &str) -> Result<crate::ast::Type, CompileError> {
        session
            .compile_source("t.mc", source.as_bytes())
            .map_err(|diag| diag.error)?;
        let name = session.intern("t").unwrap();
        Ok(session.symbols().struct_fields(name).unwrap()[0].ty)
    }

    #[test]
    fn test_pointer_and_array_modifiers() {
        let mut session = Session::new();
        let ty = field_type(&mut session, "struct t f `u8*[16u64]*;").unwrap();
        assert_eq!(
            ty.modifiers().collect::<Vec<_>>(),
            vec![Modifier::Pointer, Modifier::Array, Modifier::Pointer]
        );
        let lengths = session.symbols().array_lengths(&ty).to_vec();
        assert_eq!(lengths.len(), 1);
        assert_eq!(session.interner().lookup(lengths[0]), b"16u64");
        assert_eq!(session.type_to_string(&ty), "`u8*[16u64]*");
    }

    #[test]
    fn test_array_lengths_in_order() {
        let mut session = Session::new();
        let ty = field_type(&mut session, "struct t grid `i8[3u8][4u8];").unwrap();
        let lengths: Vec<_> = session
            .symbols()
            .array_lengths(&ty)
            .iter()
            .map(|&id| session.interner().resolve(id))
            .collect();
        assert_eq!(lengths, vec!["3u8", "4u8"]);
    }

    #[test]
    fn test_six_modifiers_allowed_seventh_rejected() {
        let mut session = Session::new();
        let ty = field_type(&mut session, "struct t p `u8******;").unwrap();
        assert_eq!(ty.modifier_count, 6);

        let err = field_type(&mut session, "struct t p `u8*******;").unwrap_err();
        match err {
            CompileError::Syntax { location, .. } => assert_eq!(location.column, 21),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_marker() {
        let mut session = Session::new();
        let err = field_type(&mut session, "struct t x u8;").unwrap_err();
        match err {
            CompileError::Syntax { location, message } => {
                assert_eq!(location.column, 12);
                assert_eq!(message, "Expected '`' to begin type.");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_base_name() {
        let mut session = Session::new();
        let err = field_type(&mut session, "struct t x `*;").unwrap_err();
        assert!(
            matches!(err, CompileError::Syntax { ref message, .. } if message == "Expected identifier.")
        );
    }

    #[test]
    fn test_unclosed_array() {
        let mut session = Session::new();
        let err = field_type(&mut session, "struct t x `u8[2u8;").unwrap_err();
        assert!(
            matches!(err, CompileError::Syntax { ref message, .. } if message == "Expected ']' after array length.")
        );
    }
}
