//! Symbol tables built while parsing
//!
//! Struct layouts and function signatures are dense tables indexed directly by
//! the declared name's [`StringId`], so a lookup is a single array access and
//! a redeclaration overwrites the previous entry. Struct fields, array lengths
//! and expression nodes live in shared append-only arenas; every arena has a
//! fixed capacity and overflowing it is a [`CompileError::Capacity`].
//!
//! The local scope belongs to the function body currently being parsed. It is
//! cleared when the next function starts and searched front to back.

use crate::ast::{ExprKind, ExprNode, FunctionSignature, LocalVariable, StructField, StructInfo, Type};
use crate::constants::{Limits, STRING_TABLE_SLOTS};
use crate::errors::CompileError;
use crate::interner::StringId;

pub struct SymbolTables {
    structs: Box<[Option<StructInfo>]>,
    struct_order: Vec<StringId>,
    struct_fields: Vec<StructField>,
    functions: Box<[Option<FunctionSignature>]>,
    function_order: Vec<StringId>,
    array_lengths: Vec<StringId>,
    locals: Vec<LocalVariable>,
    expressions: Vec<ExprNode>,
    limits: Limits,
}

impl SymbolTables {
    pub fn new(limits: Limits) -> Self {
        SymbolTables {
            structs: vec![None; STRING_TABLE_SLOTS].into_boxed_slice(),
            struct_order: Vec::new(),
            struct_fields: Vec::new(),
            functions: vec![None; STRING_TABLE_SLOTS].into_boxed_slice(),
            function_order: Vec::new(),
            array_lengths: Vec::new(),
            locals: Vec::new(),
            expressions: Vec::new(),
            limits,
        }
    }

    // === Structs ===

    /// Index the next pushed field will get
    pub fn next_field_index(&self) -> u32 {
        self.struct_fields.len() as u32
    }

    pub fn push_struct_field(&mut self, field: StructField) -> Result<(), CompileError> {
        ensure_space(self.struct_fields.len(), self.limits.struct_fields, "struct_fields")?;
        self.struct_fields.push(field);
        Ok(())
    }

    /// Record a struct owning every field pushed since `first_field_index`.
    pub fn define_struct(&mut self, name: StringId, first_field_index: u32) {
        let info = StructInfo {
            first_field_index,
            field_count: self.next_field_index() - first_field_index,
        };
        let slot = &mut self.structs[name.index()];
        if slot.is_none() {
            self.struct_order.push(name);
        }
        *slot = Some(info);
    }

    pub fn struct_info(&self, name: StringId) -> Option<&StructInfo> {
        self.structs[name.index()].as_ref()
    }

    pub fn struct_fields(&self, name: StringId) -> Option<&[StructField]> {
        self.struct_info(name).map(|info| {
            let start = info.first_field_index as usize;
            &self.struct_fields[start..start + info.field_count as usize]
        })
    }

    /// Declared structs, in order of first declaration
    pub fn structs(&self) -> impl Iterator<Item = (StringId, &[StructField])> + '_ {
        self.struct_order
            .iter()
            .filter_map(move |&name| self.struct_fields(name).map(|fields| (name, fields)))
    }

    // === Types ===

    /// Index the next pushed array length will get
    pub fn next_array_length_index(&self) -> u32 {
        self.array_lengths.len() as u32
    }

    pub fn push_array_length(&mut self, length: StringId) -> Result<(), CompileError> {
        ensure_space(self.array_lengths.len(), self.limits.array_lengths, "array_lengths")?;
        self.array_lengths.push(length);
        Ok(())
    }

    /// Length literals of a type's array modifiers, in source order
    pub fn array_lengths(&self, ty: &Type) -> &[StringId] {
        let start = ty.first_array_length as usize;
        &self.array_lengths[start..start + ty.array_count()]
    }

    // === Functions ===

    pub fn define_function(&mut self, name: StringId, signature: FunctionSignature) {
        let slot = &mut self.functions[name.index()];
        if slot.is_none() {
            self.function_order.push(name);
        }
        *slot = Some(signature);
    }

    pub fn function(&self, name: StringId) -> Option<&FunctionSignature> {
        self.functions[name.index()].as_ref()
    }

    /// Declared functions, in order of first declaration
    pub fn functions(&self) -> impl Iterator<Item = (StringId, &FunctionSignature)> + '_ {
        self.function_order
            .iter()
            .filter_map(move |&name| self.function(name).map(|sig| (name, sig)))
    }

    // === Local scope ===

    /// Start a new function body with an empty scope
    pub fn reset_locals(&mut self) {
        self.locals.clear();
    }

    pub fn push_local(&mut self, variable: LocalVariable) -> Result<(), CompileError> {
        ensure_space(self.locals.len(), self.limits.local_variables, "local_variables")?;
        self.locals.push(variable);
        Ok(())
    }

    /// First variable in scope order with the given name
    pub fn find_local(&self, name: StringId) -> Option<&LocalVariable> {
        self.locals.iter().find(|variable| variable.name == name)
    }

    pub fn locals(&self) -> &[LocalVariable] {
        &self.locals
    }

    // === Expressions ===

    /// Append a node to the expression tape, returning its index.
    pub fn push_expression(&mut self, node: ExprNode) -> Result<usize, CompileError> {
        ensure_space(self.expressions.len(), self.limits.expressions, "expressions")?;
        self.expressions.push(node);
        Ok(self.expressions.len() - 1)
    }

    pub fn expressions(&self) -> &[ExprNode] {
        &self.expressions
    }

    /// Number of tape nodes in the subtree rooted at `start`.
    pub fn expression_len(&self, start: usize) -> usize {
        let mut pending = 1usize;
        let mut index = start;
        while pending > 0 {
            let node = &self.expressions[index];
            pending -= 1;
            if node.kind == ExprKind::Operation {
                pending += node.arity as usize;
            }
            index += 1;
        }
        index - start
    }
}

fn ensure_space(len: usize, capacity: usize, table: &'static str) -> Result<(), CompileError> {
    if len >= capacity {
        return Err(CompileError::capacity(table));
    }
    Ok(())
}
