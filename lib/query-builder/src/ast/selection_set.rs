use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{selection_item::SelectionItem, value::Value};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    pub items: Vec<SelectionItem>,
}

impl SelectionSet {
    pub fn new(items: Vec<SelectionItem>) -> Self {
        SelectionSet { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<SelectionItem>> for SelectionSet {
    fn from(items: Vec<SelectionItem>) -> Self {
        SelectionSet { items }
    }
}

impl<T: Into<SelectionItem>> FromIterator<T> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SelectionSet {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldSelection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, Value>,
    /// Declared type of every argument, keyed by argument name.
    /// `None` when the selector had no schema information for this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_types: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "SelectionSet::is_empty")]
    pub selections: SelectionSet,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        FieldSelection {
            name: name.into(),
            alias: None,
            arguments: IndexMap::new(),
            argument_types: None,
            selections: SelectionSet::default(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn argument_type(mut self, name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        self.argument_types
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), type_ref.into());
        self
    }

    pub fn with_argument_types(mut self, argument_types: IndexMap<String, String>) -> Self {
        self.argument_types = Some(argument_types);
        self
    }

    pub fn select<T, I>(mut self, items: I) -> Self
    where
        T: Into<SelectionItem>,
        I: IntoIterator<Item = T>,
    {
        self.selections
            .items
            .extend(items.into_iter().map(Into::into));
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InlineFragmentSelection {
    pub type_condition: String,
    #[serde(default)]
    pub selections: SelectionSet,
}

impl InlineFragmentSelection {
    pub fn new(type_condition: impl Into<String>) -> Self {
        InlineFragmentSelection {
            type_condition: type_condition.into(),
            selections: SelectionSet::default(),
        }
    }

    pub fn select<T, I>(mut self, items: I) -> Self
    where
        T: Into<SelectionItem>,
        I: IntoIterator<Item = T>,
    {
        self.selections
            .items
            .extend(items.into_iter().map(Into::into));
        self
    }
}
