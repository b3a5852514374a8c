//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the helpers shared by the
//! grammar modules. The parser reads characters straight from a [`Cursor`]
//! and writes its results into the process-wide [`StringInterner`] and
//! [`SymbolTables`] it borrows, so declarations from earlier files stay
//! visible to later ones.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and the top-level loop
//! - `declarations`: `struct` and `fn` declarations
//! - `statements`: function body statements and control markers
//! - `expressions`: calls, variables and integer literals
//! - `types`: type annotations
//!
//! Parsing is single pass and fail fast: the first error is returned and the
//! tables keep whatever was registered before it.

use crate::errors::CompileError;
use crate::interner::{StringId, StringInterner};
use crate::parser::cursor::Cursor;
use crate::symbols::SymbolTables;

pub struct Parser<'a, 's> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) interner: &'s mut StringInterner,
    pub(crate) symbols: &'s mut SymbolTables,
}

impl<'a, 's> Parser<'a, 's> {
    pub fn new(
        source: &'a [u8],
        interner: &'s mut StringInterner,
        symbols: &'s mut SymbolTables,
    ) -> Self {
        Parser {
            cursor: Cursor::new(source),
            interner,
            symbols,
        }
    }

    /// Parse every declaration in the source
    pub fn parse_program(&mut self) -> Result<(), CompileError> {
        self.cursor.skip_whitespace();
        while !self.cursor.is_at_end() {
            self.parse_declaration()?;
            self.cursor.skip_whitespace();
        }
        Ok(())
    }

    // ===== Helper methods =====

    /// Consume an identifier and intern it
    pub(crate) fn intern_identifier(&mut self) -> Result<StringId, CompileError> {
        let bytes = self.cursor.identifier()?;
        self.interner.intern(bytes)
    }

    pub(crate) fn expect_char(&mut self, expected: u8, message: &str) -> Result<(), CompileError> {
        self.cursor.require_char(|c| c == expected, message)?;
        Ok(())
    }

    /// Text of an interned name, for error messages
    pub(crate) fn text(&self, id: StringId) -> String {
        self.interner.resolve(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::CompileError;
    use crate::session::Session;

    #[test]
    fn test_empty_and_blank_sources() {
        let mut session = Session::new();
        session.compile_source("empty.mc", b"").unwrap();
        session.compile_source("blank.mc", b"  \n\t\n").unwrap();
        assert_eq!(session.symbols().structs().count(), 0);
    }

    #[test]
    fn test_multiple_declarations() {
        let mut session = Session::new();
        let source = b"struct point x `i32, y `i32;\n\nfn id(p `point) { }\nstruct pair a `u8;";
        session.compile_source("many.mc", source).unwrap();
        assert_eq!(session.symbols().structs().count(), 2);
        assert_eq!(session.symbols().functions().count(), 1);
    }

    #[test]
    fn test_unknown_leading_character() {
        let mut session = Session::new();
        let diag = session.compile_source("bad.mc", b"\n  let x").unwrap_err();
        match diag.error {
            CompileError::Syntax { location, message } => {
                assert_eq!((location.line, location.column), (2, 3));
                assert_eq!(message, "Expected either 'struct' or 'fn' to begin declaration.");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
