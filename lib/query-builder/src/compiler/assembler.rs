use tracing::trace;

use crate::{
    ast::{
        selection_item::SelectionItem,
        selection_set::{FieldSelection, InlineFragmentSelection, SelectionSet},
    },
    compiler::{arguments::ArgumentSerializer, error::CompileError, variables::VariableRegistry},
    schema::SchemaMetadata,
};

/// Walks a selection tree depth-first and writes it as single-line document text,
/// collecting every variable it meets along the way.
///
/// Each rendered node is followed by one separator space, so a leaf field `id`
/// becomes `id ` and `pipeline { id }` becomes `pipeline{id } `.
pub struct DocumentAssembler<'a> {
    schema: &'a SchemaMetadata,
    variables: VariableRegistry,
    buffer: String,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(schema: &'a SchemaMetadata) -> Self {
        DocumentAssembler {
            schema,
            variables: VariableRegistry::new(),
            buffer: String::with_capacity(256),
        }
    }

    /// Renders the selection set of the synthetic root, starting at its `{`.
    pub fn render(
        mut self,
        root_type_name: &str,
        root: &SelectionSet,
    ) -> Result<(String, VariableRegistry), CompileError> {
        self.write_selection_set(root_type_name, Some(root_type_name), root)?;

        Ok((self.buffer, self.variables))
    }

    /// `parent_type` is the type the selections are made on, when it is known:
    /// the root type, or the type condition of an inline fragment.
    fn write_selection_set(
        &mut self,
        path: &str,
        parent_type: Option<&str>,
        selection_set: &SelectionSet,
    ) -> Result<(), CompileError> {
        self.buffer.push('{');
        for item in &selection_set.items {
            match item {
                SelectionItem::Field(field) => self.write_field(path, parent_type, field)?,
                SelectionItem::InlineFragment(fragment) => {
                    self.write_inline_fragment(path, fragment)?;
                }
                SelectionItem::Unknown => {
                    return Err(CompileError::UnknownNodeKind {
                        path: path.to_string(),
                    });
                }
            }
        }
        self.buffer.push('}');
        self.buffer.push(' ');

        Ok(())
    }

    fn write_field(
        &mut self,
        path: &str,
        parent_type: Option<&str>,
        field: &FieldSelection,
    ) -> Result<(), CompileError> {
        let field_path = format!("{}.{}", path, field.response_key());
        trace!("rendering field {}", field_path);

        if let Some(alias) = &field.alias {
            self.buffer.push_str(alias);
            self.buffer.push(':');
        }
        self.buffer.push_str(&field.name);

        if !field.arguments.is_empty() {
            let arguments = ArgumentSerializer::new(self.schema, &mut self.variables)
                .serialize_field_arguments(field, parent_type, &field_path)?;
            self.buffer.push('(');
            self.buffer.push_str(&arguments);
            self.buffer.push(')');
        }

        if field.is_leaf() {
            self.buffer.push(' ');
            Ok(())
        } else {
            self.write_selection_set(&field_path, None, &field.selections)
        }
    }

    fn write_inline_fragment(
        &mut self,
        path: &str,
        fragment: &InlineFragmentSelection,
    ) -> Result<(), CompileError> {
        let fragment_path = format!("{}.(... on {})", path, fragment.type_condition);
        trace!("rendering inline fragment {}", fragment_path);

        self.buffer.push_str("... on ");
        self.buffer.push_str(&fragment.type_condition);
        self.buffer.push(' ');
        self.write_selection_set(
            &fragment_path,
            Some(&fragment.type_condition),
            &fragment.selections,
        )
    }
}
