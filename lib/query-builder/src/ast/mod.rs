pub mod selection_item;
pub mod selection_set;
pub mod type_node;
pub mod value;
