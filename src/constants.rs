// Capacity constants for the compiler front end

/// Number of interner slots. Must equal the `StringId` id space so that a
/// probe sequence returning to its start means the table is full.
pub const STRING_TABLE_SLOTS: usize = 1 << 16;

/// Maximum number of bytes held by the string arena (100 MiB)
pub const MAX_STRING_BYTES: usize = 100 * 1024 * 1024;

/// Maximum size of a single source file (10 MiB)
pub const MAX_SOURCE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum number of struct fields across all structs
pub const MAX_STRUCT_FIELDS: usize = 1 << 16;

/// Maximum number of array lengths across all types
pub const MAX_ARRAY_LENGTHS: usize = 1 << 16;

/// Maximum number of local variables in one function body
pub const MAX_LOCAL_VARIABLES: usize = 1024;

/// Maximum number of expression nodes across all function bodies
pub const MAX_EXPRESSIONS: usize = 10 * 1024 * 1024;

/// Maximum number of arguments a function may declare
pub const MAX_FUNCTION_ARGS: usize = 14;

/// Maximum number of pointer/array modifiers on one type
pub const MAX_TYPE_MODIFIERS: u8 = 6;

/// Expression nesting depth at which parsing gives up
pub const EXPRESSION_DEPTH_LIMIT: u8 = 255;

/// Number of source bytes shown in a diagnostic excerpt before truncating
pub const MAX_LINE_LENGTH_FOR_ERRORS: usize = 120;

/// Capacities that may be lowered from their defaults.
///
/// The CLI always runs with [`Limits::default`]; smaller limits exist so the
/// overflow paths can be exercised without allocating the full tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub string_bytes: usize,
    pub source_bytes: usize,
    pub struct_fields: usize,
    pub array_lengths: usize,
    pub local_variables: usize,
    pub expressions: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            string_bytes: MAX_STRING_BYTES,
            source_bytes: MAX_SOURCE_BYTES,
            struct_fields: MAX_STRUCT_FIELDS,
            array_lengths: MAX_ARRAY_LENGTHS,
            local_variables: MAX_LOCAL_VARIABLES,
            expressions: MAX_EXPRESSIONS,
        }
    }
}
