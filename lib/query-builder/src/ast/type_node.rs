use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TypeNodeParseError {
    #[error("type reference cannot be empty")]
    Empty,
    #[error("mismatched brackets in list type '{0}'")]
    MismatchedBrackets(String),
    #[error("invalid named type '{0}'")]
    InvalidName(String),
}

/// A type reference as written in argument positions: `Name`, `Name!`, `[Name]`, `[Name!]!`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TypeNode {
    List(Box<TypeNode>),
    NonNull(Box<TypeNode>),
    Named(String),
}

impl TypeNode {
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeNode::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            TypeNode::List(_) => true,
            TypeNode::NonNull(inner) => inner.as_ref().is_list(),
            TypeNode::Named(_) => false,
        }
    }

    /// The bare type name with every list and non-null marker stripped.
    pub fn inner_type(&self) -> &str {
        match self {
            TypeNode::List(inner) => inner.as_ref().inner_type(),
            TypeNode::NonNull(inner) => inner.as_ref().inner_type(),
            TypeNode::Named(name) => name,
        }
    }

    /// Peels exactly one list wrapper (and the `!` sitting on it).
    /// Returns `None` when the type is not a list.
    pub fn element_type(&self) -> Option<&TypeNode> {
        match self {
            TypeNode::List(inner) => Some(inner.as_ref()),
            TypeNode::NonNull(inner) => inner.as_ref().element_type(),
            TypeNode::Named(_) => None,
        }
    }

    /// Wraps the type in a non-null marker unless it already carries one.
    pub fn non_null(self) -> TypeNode {
        match self {
            TypeNode::NonNull(_) => self,
            other => TypeNode::NonNull(Box::new(other)),
        }
    }

    /// Same shape ignoring the outermost requiredness.
    pub fn same_shape_as(&self, other: &TypeNode) -> bool {
        self.nullable() == other.nullable()
    }

    /// The type without its outermost non-null marker.
    pub fn nullable(&self) -> &TypeNode {
        match self {
            TypeNode::NonNull(inner) => inner.as_ref(),
            other => other,
        }
    }
}

/// `true` when `s` matches the GraphQL `Name` production: `[_A-Za-z][_0-9A-Za-z]*`.
pub fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNode::List(inner) => write!(f, "[{}]", inner),
            TypeNode::NonNull(inner) => write!(f, "{}!", inner),
            TypeNode::Named(name) => write!(f, "{}", name),
        }
    }
}

impl TryFrom<&str> for TypeNode {
    type Error = TypeNodeParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();

        if s.is_empty() {
            return Err(TypeNodeParseError::Empty);
        }

        if let Some(inner) = s.strip_suffix('!') {
            let inner_type = TypeNode::try_from(inner)?;
            if inner_type.is_non_null() {
                return Err(TypeNodeParseError::InvalidName(s.to_string()));
            }
            return Ok(TypeNode::NonNull(Box::new(inner_type)));
        }

        if let Some(inner) = s.strip_prefix('[') {
            return match inner.strip_suffix(']') {
                Some(inner_content) => {
                    let inner_type = TypeNode::try_from(inner_content)?;
                    Ok(TypeNode::List(Box::new(inner_type)))
                }
                None => Err(TypeNodeParseError::MismatchedBrackets(s.to_string())),
            };
        }

        if s.ends_with(']') {
            return Err(TypeNodeParseError::MismatchedBrackets(s.to_string()));
        }

        if is_valid_name(s) {
            Ok(TypeNode::Named(s.to_string()))
        } else {
            Err(TypeNodeParseError::InvalidName(s.to_string()))
        }
    }
}
