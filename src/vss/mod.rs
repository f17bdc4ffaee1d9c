mod datatype;
mod loader;
mod tree;

pub use datatype::{BaseType, DataType, CUSTOM_SCALAR_NAMES};
pub use loader::{load_tree, LoadError};
pub use tree::{
    add_child, level_order, pre_order, sort_children, NodeRef, VssKind, VssNode,
};
