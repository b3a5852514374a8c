//! # Introduction
//!
//! minorc is the front end of a compiler for a small systems language. It
//! reads source files in a single pass, interns every name, and fills symbol
//! tables with struct layouts, function signatures and a flat expression tape
//! for each function body. Type inference and code generation are later
//! stages and are not part of this crate.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Cursor → Parser → Interner + Symbol Tables → Reports
//! ```
//!
//! 1. [`parser`] — reads characters directly (no token stream) and writes
//!    declarations into the tables.
//! 2. [`interner`] — maps names and literals to 16-bit [`StringId`]s.
//! 3. [`symbols`] — struct, function, local-scope and expression tables.
//! 4. [`session`] — compiles files in order into shared state and renders
//!    the `show-structs`/`show-fns`/`sizes` reports.
//! 5. [`diagnostic`] — renders the first fatal error with a source excerpt.
//!
//! ## Language
//!
//! ```text
//! struct point x `i32, y `i32;
//!
//! fn dist(a `point*, b `point*) `u64 {
//!   dx = sub(a b)
//!   :if dx
//!     report(dx)
//!   :end
//! }
//! ```

pub mod ast;
pub mod constants;
pub mod diagnostic;
pub mod errors;
pub mod interner;
pub mod output;
pub mod parser;
pub mod session;
pub mod symbols;

pub use diagnostic::Diagnostic;
pub use errors::CompileError;
pub use interner::{StringId, StringInterner};
pub use session::Session;
