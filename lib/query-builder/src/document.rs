use std::fmt::Display;

use graphql_parser::query::{self as parser, ParseError};
use serde::{Deserialize, Serialize, Serializer};

use crate::ast::type_node::TypeNode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "mutation")]
    Mutation,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDefinition {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_type_node")]
    pub variable_type: TypeNode,
}

fn serialize_type_node<S: Serializer>(
    type_node: &TypeNode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(type_node)
}

impl Display for VariableDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}:{}", self.name, self.variable_type)
    }
}

/// A compiled request document.
///
/// `Display` produces the single-line text:
/// `<kind> <name>(<variable definitions>){<selection set>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub operation_kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    /// Selection set of the operation, starting at its opening `{`.
    pub body: String,
}

impl Document {
    /// The variables the document declares, in first-use order.
    pub fn variable_definitions(&self) -> &[VariableDefinition] {
        &self.variable_definitions
    }

    /// `($a:T,$b:U)`, or an empty string when no variable is used.
    pub fn variable_preamble(&self) -> String {
        if self.variable_definitions.is_empty() {
            return String::new();
        }

        let definitions = self
            .variable_definitions
            .iter()
            .map(|definition| definition.to_string())
            .collect::<Vec<_>>()
            .join(",");

        format!("({})", definitions)
    }

    /// Hands the text over to the GraphQL parser.
    pub fn parse(&self) -> Result<parser::Document<'static, String>, ParseError> {
        let text = self.to_string();
        parser::parse_query::<String>(&text).map(|document| document.into_static())
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.operation_kind)?;

        if let Some(name) = &self.name {
            write!(f, "{}", name)?;
        }

        write!(f, "{}{}", self.variable_preamble(), self.body)
    }
}
