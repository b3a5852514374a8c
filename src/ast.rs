//! Data model shared by the parser and the symbol tables
//!
//! Nothing here owns text: names and literals are [`StringId`]s issued by the
//! [`StringInterner`](crate::interner::StringInterner), and array lengths are
//! indices into the array-length arena of
//! [`SymbolTables`](crate::symbols::SymbolTables).

use crate::interner::StringId;
use std::fmt;

/// Source position captured by value so a diagnostic can point at an earlier
/// spot after the cursor has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
    /// Byte offset into the source buffer
    pub offset: usize,
    /// Byte offset of the first character of `line`
    pub line_start: usize,
}

impl Location {
    /// Position of the first byte of a buffer.
    pub fn start() -> Self {
        Location {
            line: 1,
            column: 1,
            offset: 0,
            line_start: 0,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One entry of a type's modifier sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Pointer, // *
    Array,   // [n]
}

/// A base type name plus up to six pointer/array modifiers.
///
/// Modifier `i` (in source order) is bit `i` of `modifiers`: 0 for a pointer,
/// 1 for an array. Array lengths live in the array-length arena starting at
/// `first_array_length`, one entry per array modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub base: StringId,
    pub modifier_count: u8,
    pub modifiers: u8,
    pub first_array_length: u32,
}

impl Type {
    pub fn new(base: StringId, first_array_length: u32) -> Self {
        Type {
            base,
            modifier_count: 0,
            modifiers: 0,
            first_array_length,
        }
    }

    /// Append a modifier. The caller enforces the six-modifier limit.
    pub fn push_modifier(&mut self, modifier: Modifier) {
        debug_assert!(self.modifier_count < 8);
        if modifier == Modifier::Array {
            self.modifiers |= 1 << self.modifier_count;
        }
        self.modifier_count += 1;
    }

    /// Modifiers in the order they were written
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        (0..self.modifier_count).map(move |i| {
            if self.modifiers & (1 << i) == 0 {
                Modifier::Pointer
            } else {
                Modifier::Array
            }
        })
    }

    /// Number of array modifiers, i.e. entries owned in the array-length arena
    pub fn array_count(&self) -> usize {
        let mask = ((1u16 << self.modifier_count) - 1) as u8;
        (self.modifiers & mask).count_ones() as usize
    }
}

/// Struct field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructField {
    pub name: StringId,
    pub ty: Type,
}

/// Location of a struct's fields inside the shared field arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructInfo {
    pub first_field_index: u32,
    pub field_count: u32,
}

/// Function parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument {
    pub name: StringId,
    pub ty: Type,
}

/// Function signature, registered before its body is parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub args: Vec<Argument>,
    pub return_type: Option<Type>,
}

impl FunctionSignature {
    pub fn arity(&self) -> u8 {
        // bounded by MAX_FUNCTION_ARGS when the signature is built
        self.args.len() as u8
    }
}

/// Variable visible in the function body currently being parsed.
///
/// Variables introduced by `name = expr` have no type until inference runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVariable {
    pub name: StringId,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// Function call; followed on the tape by `arity` operand subtrees
    Operation,
    /// `data` is the literal text, e.g. `42u8`
    IntegerLiteral,
    /// `data` is the variable name
    Identifier,
}

/// One node of the pre-order expression tape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub arity: u8,
    pub data: StringId,
}

impl ExprNode {
    pub fn operation(name: StringId, arity: u8) -> Self {
        ExprNode {
            kind: ExprKind::Operation,
            arity,
            data: name,
        }
    }

    pub fn integer(text: StringId) -> Self {
        ExprNode {
            kind: ExprKind::IntegerLiteral,
            arity: 0,
            data: text,
        }
    }

    pub fn identifier(name: StringId) -> Self {
        ExprNode {
            kind: ExprKind::Identifier,
            arity: 0,
            data: name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits_keep_arrival_order() {
        let mut ty = Type::new(StringId::from_raw(3), 0);
        ty.push_modifier(Modifier::Pointer);
        ty.push_modifier(Modifier::Array);
        ty.push_modifier(Modifier::Pointer);
        ty.push_modifier(Modifier::Array);

        assert_eq!(ty.modifier_count, 4);
        assert_eq!(ty.modifiers, 0b1010);
        assert_eq!(
            ty.modifiers().collect::<Vec<_>>(),
            vec![
                Modifier::Pointer,
                Modifier::Array,
                Modifier::Pointer,
                Modifier::Array
            ]
        );
        assert_eq!(ty.array_count(), 2);
    }

    #[test]
    fn test_plain_type_has_no_arrays() {
        let ty = Type::new(StringId::from_raw(0), 7);
        assert_eq!(ty.modifiers().count(), 0);
        assert_eq!(ty.array_count(), 0);
    }

    #[test]
    fn test_location_display() {
        let loc = Location {
            line: 4,
            column: 9,
            offset: 40,
            line_start: 32,
        };
        assert_eq!(loc.to_string(), "4:9");
    }
}
