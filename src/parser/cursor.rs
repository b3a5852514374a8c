//! Character cursor with source location tracking
//!
//! The cursor walks an in-memory source buffer one byte at a time and keeps
//! the [`Location`] of the next unread byte up to date. There is no separate
//! token stream: the parser reads characters directly and captures locations
//! by value wherever it may later need to report an error.
//!
//! Character classes are byte-indexed lookup tables. Identifiers start with
//! `a`-`z` and continue with `a`-`z`, `0`-`9` or `_`; there are no uppercase
//! or non-ASCII identifier characters.

use crate::ast::Location;
use crate::errors::CompileError;

const fn class_table(ranges: &[(u8, u8)]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut r = 0;
    while r < ranges.len() {
        let (lo, hi) = ranges[r];
        let mut c = lo as usize;
        while c <= hi as usize {
            table[c] = true;
            c += 1;
        }
        r += 1;
    }
    table
}

static IDENTIFIER_START: [bool; 256] = class_table(&[(b'a', b'z')]);
static IDENTIFIER_REST: [bool; 256] = class_table(&[(b'a', b'z'), (b'0', b'9'), (b'_', b'_')]);
static DIGIT: [bool; 256] = class_table(&[(b'0', b'9')]);

pub fn is_identifier_start(c: u8) -> bool {
    IDENTIFIER_START[c as usize]
}

pub fn is_identifier_rest(c: u8) -> bool {
    IDENTIFIER_REST[c as usize]
}

pub fn is_digit(c: u8) -> bool {
    DIGIT[c as usize]
}

pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n')
}

/// Cursor over one source file
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a [u8],
    location: Location,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Cursor {
            source,
            location: Location::start(),
        }
    }

    /// Next character without consuming it; `None` at end of input
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.location.offset).copied()
    }

    /// Check whether the next character satisfies `predicate`
    pub fn peek_is(&self, predicate: impl Fn(u8) -> bool) -> bool {
        self.peek().is_some_and(predicate)
    }

    /// Consume one character.
    ///
    /// Must only be called after `peek()` returned a character.
    pub fn advance(&mut self) {
        debug_assert!(!self.is_at_end(), "advance past end of input");
        let Some(c) = self.peek() else {
            return;
        };
        self.location.offset += 1;
        if c == b'\n' {
            self.location.line += 1;
            self.location.column = 1;
            self.location.line_start = self.location.offset;
        } else {
            self.location.column += 1;
        }
    }

    /// Consume and return the next character, if there is one
    pub fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.advance();
        Some(c)
    }

    /// Current position snapshot
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_at_end(&self) -> bool {
        self.location.offset >= self.source.len()
    }

    /// Consume `literal` if the input continues with it.
    ///
    /// Matching does not backtrack: on failure the matched prefix stays
    /// consumed and the cursor sits on the first mismatching character.
    /// Callers that report the failure must use a location captured before
    /// the attempt.
    pub fn try_match(&mut self, literal: &[u8]) -> bool {
        for &expected in literal {
            if self.peek() != Some(expected) {
                return false;
            }
            self.advance();
        }
        true
    }

    /// Consume one character that must satisfy `predicate`.
    pub fn require_char(
        &mut self,
        predicate: impl Fn(u8) -> bool,
        message: &str,
    ) -> Result<u8, CompileError> {
        let location = self.location;
        match self.peek() {
            Some(c) if predicate(c) => {
                self.advance();
                Ok(c)
            }
            _ => Err(CompileError::syntax(location, message)),
        }
    }

    /// Skip any amount of whitespace, including none
    pub fn skip_whitespace(&mut self) {
        while self.peek_is(is_whitespace) {
            self.advance();
        }
    }

    /// Skip whitespace, requiring at least one whitespace character
    pub fn skip_whitespace1(&mut self) -> Result<(), CompileError> {
        self.require_char(is_whitespace, "Expected whitespace.")?;
        self.skip_whitespace();
        Ok(())
    }

    /// Consume an identifier and return its bytes.
    pub fn identifier(&mut self) -> Result<&'a [u8], CompileError> {
        let start = self.location.offset;
        self.require_char(is_identifier_start, "Expected identifier.")?;
        while self.peek_is(is_identifier_rest) {
            self.advance();
        }
        Ok(&self.source[start..self.location.offset])
    }

    /// Consume a run of digits, returning how many were consumed
    pub fn digits(&mut self) -> usize {
        let start = self.location.offset;
        while self.peek_is(is_digit) {
            self.advance();
        }
        self.location.offset - start
    }

    /// Bytes from `start` up to the current position
    pub fn slice_from(&self, start: &Location) -> &'a [u8] {
        &self.source[start.offset..self.location.offset]
    }
}
