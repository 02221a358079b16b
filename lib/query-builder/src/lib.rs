pub mod ast;
pub mod builder;
pub mod compiler;
pub mod document;
pub mod schema;

#[cfg(test)]
mod tests;

pub use ast::{
    selection_item::SelectionItem,
    selection_set::{FieldSelection, InlineFragmentSelection, SelectionSet},
    type_node::TypeNode,
    value::{Value, VariableRef},
};
pub use builder::{QueryBuilder, RootSelector};
pub use compiler::{compile_operation, error::CompileError};
pub use document::{Document, OperationKind, VariableDefinition};
pub use schema::SchemaMetadata;
