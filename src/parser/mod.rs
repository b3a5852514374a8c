//! Single-pass declaration parser
//!
//! This module reads source text character by character and fills the
//! symbol tables directly; there is no token stream and no syntax tree:
//! - [`cursor`]: character access and location tracking
//! - [`parse`]: the [`Parser`] struct and top-level loop
//! - [`types`]: type annotations
//! - `declarations`, `statements`, `expressions`: the grammar proper
//!
//! # Supported language
//!
//! - Declarations: `struct` with typed fields, `fn` with typed arguments
//!   and an optional return type
//! - Statements: control markers (`:if`, `:else`, `:switch`, `:case`,
//!   `:while`, `:end`), local declarations, call statements
//! - Expressions: calls, variables, integer literals such as `42u8`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with a bounded expression depth.
//! No external parser generator dependencies.

pub mod cursor;
mod declarations;
mod expressions;
pub mod parse;
mod statements;
pub mod types;

pub use parse::Parser;
