use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::OperationKind;

pub mod error;

pub use error::SchemaMetadataError;

/// `{ argumentName: typeReference }`, in declaration order.
pub type ArgumentTypes = IndexMap<String, String>;

/// Read-only description of the API surface the compiler needs: which type names
/// are enums, and the declared type of every input-object field and field argument.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SchemaMetadata {
    /// Name of the root query type.
    #[serde(default = "default_query_type")]
    pub query_type: String,

    /// Name of the root mutation type.
    #[serde(default = "default_mutation_type")]
    pub mutation_type: String,

    /// Every enum type name of the schema.
    #[serde(default)]
    pub enums: HashSet<String>,

    /// Input object types: `{ typeName: { fieldName: typeReference } }`.
    #[serde(default)]
    pub input_types: HashMap<String, ArgumentTypes>,

    /// Arguments of output type fields:
    /// `{ typeName: { fieldName: { argumentName: typeReference } } }`.
    /// Fields selected on the root type or under an inline fragment take their
    /// argument types from here when they do not declare their own.
    #[serde(default)]
    pub field_arguments: HashMap<String, HashMap<String, ArgumentTypes>>,
}

fn default_query_type() -> String {
    "Query".to_string()
}

fn default_mutation_type() -> String {
    "Mutation".to_string()
}

impl Default for SchemaMetadata {
    fn default() -> Self {
        SchemaMetadata {
            query_type: default_query_type(),
            mutation_type: default_mutation_type(),
            enums: HashSet::new(),
            input_types: HashMap::new(),
            field_arguments: HashMap::new(),
        }
    }
}

impl SchemaMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaMetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaMetadataError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| SchemaMetadataError::Read {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_json_str(&content)
    }

    /// JSON Schema describing the metadata file format.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(SchemaMetadata)
    }

    pub fn with_enum(mut self, name: impl Into<String>) -> Self {
        self.enums.insert(name.into());
        self
    }

    pub fn with_input_type<K, V, I>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.input_types.insert(
            name.into(),
            fields
                .into_iter()
                .map(|(field, type_ref)| (field.into(), type_ref.into()))
                .collect(),
        );
        self
    }

    pub fn with_field_arguments<K, V, I>(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        arguments: I,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.field_arguments
            .entry(type_name.into())
            .or_default()
            .insert(
                field_name.into(),
                arguments
                    .into_iter()
                    .map(|(argument, type_ref)| (argument.into(), type_ref.into()))
                    .collect(),
            );
        self
    }

    pub fn is_enum(&self, type_name: &str) -> bool {
        self.enums.contains(type_name)
    }

    pub fn input_type(&self, type_name: &str) -> Option<&ArgumentTypes> {
        self.input_types.get(type_name)
    }

    pub fn field_argument_types(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Option<&ArgumentTypes> {
        self.field_arguments
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
    }

    pub fn root_type_name(&self, operation_kind: OperationKind) -> &str {
        match operation_kind {
            OperationKind::Query => &self.query_type,
            OperationKind::Mutation => &self.mutation_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SchemaMetadata, SchemaMetadataError};
    use crate::document::OperationKind;

    #[test]
    fn loads_metadata_from_json() {
        let metadata = SchemaMetadata::from_json_str(
            r#"{
              "enums": ["BuildState"],
              "input_types": { "BuildFilter": { "state": "[BuildState!]" } },
              "field_arguments": { "Query": { "pipeline": { "slug": "ID!" } } }
            }"#,
        )
        .expect("valid metadata");

        assert!(metadata.is_enum("BuildState"));
        assert!(!metadata.is_enum("String"));
        assert_eq!(
            metadata
                .input_type("BuildFilter")
                .and_then(|fields| fields.get("state"))
                .map(String::as_str),
            Some("[BuildState!]")
        );
        assert_eq!(
            metadata
                .field_argument_types("Query", "pipeline")
                .and_then(|args| args.get("slug"))
                .map(String::as_str),
            Some("ID!")
        );
        assert_eq!(metadata.root_type_name(OperationKind::Query), "Query");
        assert_eq!(metadata.root_type_name(OperationKind::Mutation), "Mutation");
    }

    #[test]
    fn custom_root_type_names() {
        let metadata = SchemaMetadata::from_json_str(
            r#"{ "query_type": "QueryRoot", "mutation_type": "MutationRoot" }"#,
        )
        .expect("valid metadata");

        assert_eq!(metadata.root_type_name(OperationKind::Query), "QueryRoot");
        assert_eq!(
            metadata.root_type_name(OperationKind::Mutation),
            "MutationRoot"
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = SchemaMetadata::from_json_str(r#"{ "enum": ["Typo"] }"#);

        assert!(matches!(result, Err(SchemaMetadataError::Json(_))));
    }

    #[test]
    fn reports_missing_file() {
        let result = SchemaMetadata::from_file("./does-not-exist.json");

        assert!(matches!(result, Err(SchemaMetadataError::Read { .. })));
    }

    #[test]
    fn exposes_json_schema() {
        let schema = serde_json::to_value(SchemaMetadata::json_schema()).expect("serializable");

        assert!(schema["properties"]["input_types"].is_object());
    }
}
