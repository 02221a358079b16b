pub mod arguments;
pub mod assembler;
pub mod error;
pub mod variables;

use tracing::{debug, instrument};

use crate::{
    ast::selection_set::SelectionSet,
    compiler::{assembler::DocumentAssembler, error::CompileError},
    document::{Document, OperationKind},
    schema::SchemaMetadata,
};

/// Compiles the root selection set of an operation into a document.
///
/// Pure with respect to its inputs: every call owns a fresh variable registry.
#[instrument(level = "debug", skip(schema, selection_set))]
pub fn compile_operation(
    schema: &SchemaMetadata,
    operation_kind: OperationKind,
    name: Option<&str>,
    selection_set: &SelectionSet,
) -> Result<Document, CompileError> {
    let root_type_name = schema.root_type_name(operation_kind);
    let (body, variables) = DocumentAssembler::new(schema).render(root_type_name, selection_set)?;

    let document = Document {
        operation_kind,
        name: name.map(str::to_string),
        variable_definitions: variables.into_definitions(),
        body: body.trim_end().to_string(),
    };

    debug!("compiled document: {}", document);

    Ok(document)
}
