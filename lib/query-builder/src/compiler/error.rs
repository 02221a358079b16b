#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A variable cannot be declared: no type reference is available for its
    /// position, or its name is not a GraphQL name.
    #[error("Variable '${variable}' at '{path}': {message}")]
    Configuration {
        variable: String,
        path: String,
        message: String,
    },
    /// An argument or input field is missing from the schema metadata, its
    /// declared type reference cannot be parsed, or an enum value is not a name.
    #[error("Schema error at '{path}': {message}")]
    Schema { path: String, message: String },
    /// A selection node is neither a field nor an inline fragment.
    #[error("Unknown selection node kind under '{path}'")]
    UnknownNodeKind { path: String },
}

impl CompileError {
    pub(crate) fn configuration(variable: &str, path: &str, message: impl Into<String>) -> Self {
        CompileError::Configuration {
            variable: variable.to_string(),
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn schema(path: &str, message: impl Into<String>) -> Self {
        CompileError::Schema {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
