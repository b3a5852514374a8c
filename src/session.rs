//! Process-wide compilation state
//!
//! A [`Session`] owns the string interner and the symbol tables. Files are
//! compiled one after another into the same session, so declarations from an
//! earlier file are visible while parsing a later one. Each file gets a fresh
//! cursor and therefore starts at line 1, column 1.
//!
//! The session also renders the reports behind the `show-structs`,
//! `show-fns` and `sizes` commands.

use crate::ast::{
    ExprNode, FunctionSignature, LocalVariable, Modifier, StructField, StructInfo, Type,
};
use crate::constants::Limits;
use crate::diagnostic::Diagnostic;
use crate::errors::CompileError;
use crate::interner::{StringId, StringInterner};
use crate::output::Printer;
use crate::parser::Parser;
use crate::symbols::SymbolTables;
use std::fs::File;
use std::io::{Read, Write};
use std::mem::size_of;
use std::path::Path;

pub struct Session {
    interner: StringInterner,
    symbols: SymbolTables,
    limits: Limits,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Session {
            interner: StringInterner::with_capacity(limits.string_bytes),
            symbols: SymbolTables::new(limits),
            limits,
        }
    }

    /// Read a file and compile it into this session.
    pub fn compile_file(&mut self, path: &Path) -> Result<(), Diagnostic> {
        let source = self.read_source(path).map_err(Diagnostic::bare)?;
        log::debug!("loaded {} ({} bytes)", path.display(), source.len());
        self.compile_source(&path.display().to_string(), &source)
    }

    /// Compile an in-memory source buffer.
    ///
    /// `filename` is only used to label diagnostics.
    pub fn compile_source(&mut self, filename: &str, source: &[u8]) -> Result<(), Diagnostic> {
        let mut parser = Parser::new(source, &mut self.interner, &mut self.symbols);
        parser
            .parse_program()
            .map_err(|error| Diagnostic::new(filename, source, error))?;
        log::debug!(
            "compiled {}: {} strings, {} expression nodes so far",
            filename,
            self.interner.len(),
            self.symbols.expressions().len()
        );
        Ok(())
    }

    fn read_source(&self, path: &Path) -> Result<Vec<u8>, CompileError> {
        let io_error = |source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;

        // read one byte past the limit to tell "exactly full" from "too large"
        let limit = self.limits.source_bytes;
        let mut source = Vec::new();
        file.take(limit as u64 + 1)
            .read_to_end(&mut source)
            .map_err(io_error)?;
        if source.len() > limit {
            return Err(CompileError::FileTooLarge {
                path: path.to_path_buf(),
                limit,
            });
        }
        Ok(source)
    }

    pub fn intern(&mut self, text: &str) -> Result<StringId, CompileError> {
        self.interner.intern_str(text)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    /// Render a type the way it is written, e.g. `` `u8*[16u64] ``
    pub fn type_to_string(&self, ty: &Type) -> String {
        let mut text = format!("`{}", self.interner.resolve(ty.base));
        let mut lengths = self.symbols.array_lengths(ty).iter();
        for modifier in ty.modifiers() {
            match modifier {
                Modifier::Pointer => text.push('*'),
                Modifier::Array => {
                    text.push('[');
                    if let Some(&length) = lengths.next() {
                        text.push_str(&self.interner.resolve(length));
                    }
                    text.push(']');
                }
            }
        }
        text
    }

    // ===== Reports =====

    /// Each struct name, then its fields one level deeper
    pub fn write_structs<W: Write>(&self, printer: &mut Printer<W>) -> Result<(), CompileError> {
        for (name, fields) in self.symbols.structs() {
            printer.line(self.interner.resolve(name))?;
            printer.indented(|p| -> Result<(), CompileError> {
                for (i, field) in fields.iter().enumerate() {
                    let terminator = if i + 1 == fields.len() { ';' } else { ',' };
                    p.line(format!(
                        "{} {}{}",
                        self.interner.resolve(field.name),
                        self.type_to_string(&field.ty),
                        terminator
                    ))?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    /// One line per function signature
    pub fn write_functions<W: Write>(&self, printer: &mut Printer<W>) -> Result<(), CompileError> {
        for (name, signature) in self.symbols.functions() {
            printer.line(self.signature_to_string(name, signature))?;
        }
        Ok(())
    }

    fn signature_to_string(&self, name: StringId, signature: &FunctionSignature) -> String {
        let args = signature
            .args
            .iter()
            .map(|arg| {
                format!(
                    "{} {}",
                    self.interner.resolve(arg.name),
                    self.type_to_string(&arg.ty)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        match &signature.return_type {
            Some(ty) => format!(
                "{}({}) {} {{ ... }}",
                self.interner.resolve(name),
                args,
                self.type_to_string(ty)
            ),
            None => format!("{}({}) {{ ... }}", self.interner.resolve(name), args),
        }
    }

    /// In-memory sizes of the table entry types
    pub fn write_sizes<W: Write>(printer: &mut Printer<W>) -> Result<(), CompileError> {
        let sizes = [
            ("Type", size_of::<Type>()),
            ("StructField", size_of::<StructField>()),
            ("StructInfo", size_of::<StructInfo>()),
            ("FunctionSignature", size_of::<FunctionSignature>()),
            ("LocalVariable", size_of::<LocalVariable>()),
            ("ExprNode", size_of::<ExprNode>()),
        ];
        for (name, bytes) in sizes {
            printer.line(format!("{}: {}", name, bytes))?;
        }
        Ok(())
    }
}
