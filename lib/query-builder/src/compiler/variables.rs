use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::{ast::type_node::TypeNode, document::VariableDefinition};

/// Declared shape of one variable, as reconciled across all of its usages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    type_node: TypeNode,
}

impl VariableEntry {
    pub fn base_type_name(&self) -> &str {
        self.type_node.inner_type()
    }

    pub fn is_list(&self) -> bool {
        self.type_node.is_list()
    }

    pub fn list_element_required(&self) -> bool {
        self.type_node
            .element_type()
            .is_some_and(TypeNode::is_non_null)
    }

    pub fn is_required(&self) -> bool {
        self.type_node.is_non_null()
    }

    pub fn type_node(&self) -> &TypeNode {
        &self.type_node
    }
}

/// Variables used while compiling one document, keyed by name in first-seen order.
///
/// The first usage decides the shape. Later usages can only make it stricter:
/// once a name is required it stays required.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    entries: IndexMap<String, VariableEntry>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, derived_type: TypeNode, is_always_required: bool) {
        let derived_type = if is_always_required {
            derived_type.non_null()
        } else {
            derived_type
        };

        match self.entries.get_mut(name) {
            Some(entry) => {
                if !entry.type_node.same_shape_as(&derived_type) {
                    warn!(
                        "variable '${}' is used as '{}' but was first declared as '{}', keeping the first declaration",
                        name, derived_type, entry.type_node
                    );
                }

                entry.type_node = upgrade_requiredness(&entry.type_node, &derived_type);
                trace!("variable '${}' reused as '{}'", name, entry.type_node);
            }
            None => {
                trace!("variable '${}' registered as '{}'", name, derived_type);
                self.entries.insert(
                    name.to_string(),
                    VariableEntry {
                        type_node: derived_type,
                    },
                );
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&VariableEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &VariableEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_definitions(self) -> Vec<VariableDefinition> {
        self.entries
            .into_iter()
            .map(|(name, entry)| VariableDefinition {
                name,
                variable_type: entry.type_node,
            })
            .collect()
    }
}

/// Keeps the shape of `existing` and ORs in the non-null markers of `incoming`
/// wherever both shapes line up.
fn upgrade_requiredness(existing: &TypeNode, incoming: &TypeNode) -> TypeNode {
    let required = existing.is_non_null() || incoming.is_non_null();
    let existing = existing.nullable();
    let incoming = incoming.nullable();

    let upgraded = match (existing, incoming) {
        (TypeNode::List(existing_inner), TypeNode::List(incoming_inner)) => {
            TypeNode::List(Box::new(upgrade_requiredness(existing_inner, incoming_inner)))
        }
        (existing, _) => existing.clone(),
    };

    if required {
        upgraded.non_null()
    } else {
        upgraded
    }
}
