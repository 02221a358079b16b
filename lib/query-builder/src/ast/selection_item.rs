use serde::{Deserialize, Serialize};

use super::selection_set::{FieldSelection, InlineFragmentSelection, SelectionSet};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum SelectionItem {
    Field(FieldSelection),
    InlineFragment(InlineFragmentSelection),
    /// A node whose `kind` tag is not understood. Trees handed over by an
    /// external selector end up here instead of failing deserialization, and
    /// the assembler rejects them.
    #[serde(other)]
    Unknown,
}

impl SelectionItem {
    pub fn selections(&self) -> Option<&SelectionSet> {
        match self {
            SelectionItem::Field(FieldSelection { selections, .. }) => Some(selections),
            SelectionItem::InlineFragment(InlineFragmentSelection { selections, .. }) => {
                Some(selections)
            }
            SelectionItem::Unknown => None,
        }
    }
}

impl From<FieldSelection> for SelectionItem {
    fn from(field: FieldSelection) -> Self {
        SelectionItem::Field(field)
    }
}

impl From<InlineFragmentSelection> for SelectionItem {
    fn from(fragment: InlineFragmentSelection) -> Self {
        SelectionItem::InlineFragment(fragment)
    }
}

impl From<&str> for SelectionItem {
    fn from(name: &str) -> Self {
        SelectionItem::Field(FieldSelection::new(name))
    }
}
