//! Fatal error types for the compiler front end
//!
//! This module defines [`CompileError`], which covers every condition that stops
//! compilation: capacity exhaustion, syntax errors, semantic errors, and
//! failures to load a source file.
//!
//! All errors are fatal. The parser performs no recovery; the first error is
//! propagated to the command line driver, rendered as a
//! [`Diagnostic`](crate::diagnostic::Diagnostic), and the process exits with
//! status 1.

use crate::ast::Location;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// A fixed-capacity table is full
    #[error("The compiler has reached the capacity of its '{table}' array and cannot continue{}.", detail_suffix(.detail))]
    Capacity {
        table: &'static str,
        detail: Option<String>,
    },

    /// Every interner slot holds a different string
    #[error("The string table is full; cannot intern '{text}'.")]
    InternerFull { text: String },

    /// Unexpected character or missing token
    #[error("{message}")]
    Syntax { location: Location, message: String },

    /// Call to a function whose signature has not been registered yet
    #[error("Unknown function '{name}'.")]
    UnknownFunction { location: Location, name: String },

    /// Reference to a name missing from the current local scope
    #[error("Unknown variable '{name}'.")]
    UnknownVariable { location: Location, name: String },

    /// Call whose argument list does not match the callee's arity
    #[error("Expected ')' because the function '{name}' has arity {arity}.")]
    ArityMismatch {
        location: Location,
        name: String,
        arity: u8,
    },

    /// Expressions nested deeper than the recursion limit
    #[error("Reached max expression depth.")]
    DepthLimit { location: Location },

    #[error("Got error while trying to read file \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reached {limit} byte file size limit while reading file \"{}\".", .path.display())]
    FileTooLarge { path: PathBuf, limit: usize },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" (while storing '{}')", detail),
        None => String::new(),
    }
}

impl CompileError {
    pub fn syntax(location: Location, message: impl Into<String>) -> Self {
        CompileError::Syntax {
            location,
            message: message.into(),
        }
    }

    pub fn capacity(table: &'static str) -> Self {
        CompileError::Capacity {
            table,
            detail: None,
        }
    }

    /// Source position the error points at, if it has one.
    ///
    /// Capacity and I/O failures are not tied to a position.
    pub fn location(&self) -> Option<Location> {
        match self {
            CompileError::Syntax { location, .. }
            | CompileError::UnknownFunction { location, .. }
            | CompileError::UnknownVariable { location, .. }
            | CompileError::ArityMismatch { location, .. }
            | CompileError::DepthLimit { location } => Some(*location),
            CompileError::Capacity { .. }
            | CompileError::InternerFull { .. }
            | CompileError::Io { .. }
            | CompileError::FileTooLarge { .. }
            | CompileError::Output(_) => None,
        }
    }
}
