use std::sync::Arc;

use crate::{
    ast::selection_set::{FieldSelection, SelectionSet},
    compiler::{compile_operation, error::CompileError},
    document::{Document, OperationKind},
    schema::SchemaMetadata,
};

/// Entry point for building documents against one schema.
///
/// Holds no state besides the schema, so a single builder can serve any number
/// of concurrent compilations.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    schema: Arc<SchemaMetadata>,
}

impl QueryBuilder {
    pub fn new(schema: impl Into<Arc<SchemaMetadata>>) -> Self {
        QueryBuilder {
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &SchemaMetadata {
        &self.schema
    }

    pub fn build_query<F>(&self, name: Option<&str>, selector: F) -> Result<Document, CompileError>
    where
        F: FnOnce(&RootSelector<'_>) -> SelectionSet,
    {
        self.build(OperationKind::Query, name, selector)
    }

    pub fn build_mutation<F>(
        &self,
        name: Option<&str>,
        selector: F,
    ) -> Result<Document, CompileError>
    where
        F: FnOnce(&RootSelector<'_>) -> SelectionSet,
    {
        self.build(OperationKind::Mutation, name, selector)
    }

    fn build<F>(
        &self,
        operation_kind: OperationKind,
        name: Option<&str>,
        selector: F,
    ) -> Result<Document, CompileError>
    where
        F: FnOnce(&RootSelector<'_>) -> SelectionSet,
    {
        let root = RootSelector {
            schema: &self.schema,
            type_name: self.schema.root_type_name(operation_kind),
        };
        let selection_set = selector(&root);

        compile_operation(&self.schema, operation_kind, name, &selection_set)
    }
}

/// The root type (`Query` or `Mutation`) handed to selectors.
pub struct RootSelector<'a> {
    schema: &'a SchemaMetadata,
    type_name: &'a str,
}

impl RootSelector<'_> {
    /// Starts a selection of a root field, with its argument types taken from
    /// the schema metadata when they are described there.
    pub fn field(&self, name: &str) -> FieldSelection {
        let field = FieldSelection::new(name);

        match self.schema.field_argument_types(self.type_name, name) {
            Some(argument_types) => field.with_argument_types(argument_types.clone()),
            None => field,
        }
    }
}
