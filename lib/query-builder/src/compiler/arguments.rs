use tracing::trace;

use crate::{
    ast::{
        selection_set::FieldSelection,
        type_node::{is_valid_name, TypeNode},
        value::Value,
    },
    compiler::{error::CompileError, variables::VariableRegistry},
    schema::SchemaMetadata,
};

/// Turns argument values into document text.
///
/// The declared type of each position decides how strings are written (enum
/// identifiers stay bare), how nested input objects are typed, and what type a
/// variable gets declared with.
pub struct ArgumentSerializer<'a> {
    schema: &'a SchemaMetadata,
    variables: &'a mut VariableRegistry,
}

impl<'a> ArgumentSerializer<'a> {
    pub fn new(schema: &'a SchemaMetadata, variables: &'a mut VariableRegistry) -> Self {
        ArgumentSerializer { schema, variables }
    }

    /// `key:value` pairs of a field, comma-joined, without the surrounding parentheses.
    ///
    /// Argument types declared on the field itself take precedence. Otherwise they
    /// are looked up in the schema metadata under `parent_type`, when it is known.
    pub fn serialize_field_arguments(
        &mut self,
        field: &FieldSelection,
        parent_type: Option<&str>,
        path: &str,
    ) -> Result<String, CompileError> {
        let schema = self.schema;
        let argument_types = field.argument_types.as_ref().or_else(|| {
            parent_type.and_then(|type_name| schema.field_argument_types(type_name, &field.name))
        });
        let mut pairs = Vec::with_capacity(field.arguments.len());

        for (key, value) in &field.arguments {
            let argument_path = format!("{}.{}", path, key);
            let hint = match argument_types {
                None => None,
                Some(argument_types) => {
                    let type_ref = argument_types.get(key).ok_or_else(|| {
                        CompileError::schema(
                            &argument_path,
                            format!(
                                "argument '{}' is not declared for field '{}'",
                                key, field.name
                            ),
                        )
                    })?;
                    Some(parse_type_ref(type_ref, &argument_path)?)
                }
            };

            let serialized = self.serialize(value, hint.as_ref(), &argument_path)?;
            trace!("argument {} serialized as {}", argument_path, serialized);
            pairs.push(format!("{}:{}", key, serialized));
        }

        Ok(pairs.join(","))
    }

    pub fn serialize(
        &mut self,
        value: &Value,
        hint: Option<&TypeNode>,
        path: &str,
    ) -> Result<String, CompileError> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(serde_json::Value::from(*f).to_string()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Enum(e) => enum_literal(e, path),
            Value::String(s) => match hint {
                Some(hint) if self.schema.is_enum(hint.inner_type()) => enum_literal(s, path),
                _ => Ok(serde_json::Value::String(s.clone()).to_string()),
            },
            Value::Variable(variable) => {
                if !is_valid_name(&variable.name) {
                    return Err(CompileError::configuration(
                        &variable.name,
                        path,
                        "the variable name is not a valid GraphQL name",
                    ));
                }
                let hint = hint.ok_or_else(|| {
                    CompileError::configuration(
                        &variable.name,
                        path,
                        "the argument type of the field is not declared",
                    )
                })?;
                self.variables
                    .register(&variable.name, hint.clone(), variable.is_always_required);

                Ok(format!("${}", variable.name))
            }
            Value::List(items) => {
                // Coercion lets a single-value type accept a list, so the hint is
                // reused as-is when it has no list wrapper to peel.
                let element_hint = hint.map(|hint| hint.element_type().unwrap_or(hint));
                let serialized = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        self.serialize(item, element_hint, &format!("{}[{}]", path, index))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(format!("[{}]", serialized.join(",")))
            }
            Value::Object(entries) => {
                let schema = self.schema;
                let input_fields = match hint {
                    None => None,
                    Some(hint) => {
                        let type_name = hint.inner_type();
                        let fields = schema.input_type(type_name).ok_or_else(|| {
                            CompileError::schema(
                                path,
                                format!(
                                    "input type '{}' is not described by the schema metadata",
                                    type_name
                                ),
                            )
                        })?;
                        Some((type_name, fields))
                    }
                };

                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let field_path = format!("{}.{}", path, key);
                    let field_hint = match input_fields {
                        None => None,
                        Some((type_name, fields)) => {
                            let type_ref = fields.get(key).ok_or_else(|| {
                                CompileError::schema(
                                    &field_path,
                                    format!(
                                        "field '{}' is not declared on input type '{}'",
                                        key, type_name
                                    ),
                                )
                            })?;
                            Some(parse_type_ref(type_ref, &field_path)?)
                        }
                    };

                    let serialized = self.serialize(value, field_hint.as_ref(), &field_path)?;
                    pairs.push(format!("{}:{}", key, serialized));
                }

                Ok(format!("{{{}}}", pairs.join(",")))
            }
        }
    }
}

/// Enum values are written bare and must be plain names other than `true`, `false` and `null`.
fn enum_literal(value: &str, path: &str) -> Result<String, CompileError> {
    if is_valid_name(value) && !matches!(value, "true" | "false" | "null") {
        Ok(value.to_string())
    } else {
        Err(CompileError::schema(
            path,
            format!("'{}' is not a valid enum value", value),
        ))
    }
}

fn parse_type_ref(type_ref: &str, path: &str) -> Result<TypeNode, CompileError> {
    TypeNode::try_from(type_ref).map_err(|error| {
        CompileError::schema(
            path,
            format!("invalid type reference '{}': {}", type_ref, error),
        )
    })
}
