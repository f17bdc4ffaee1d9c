use itertools::Itertools;

use crate::options::GenerationOptions;
use crate::schema::{Declaration, Description, EnumBlock};
use crate::vss::{level_order, NodeRef};

use super::naming::{enum_name, str_as_uppercase_variable};

/// One enum type per node with an allowed-value list. Values are
/// case-normalized to uppercase and de-duplicated, first occurrence wins.
pub fn enum_declarations(roots: &[NodeRef], _options: &GenerationOptions) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("ENUM")];
    for root in roots {
        for node in level_order(root) {
            let node = node.borrow();
            if node.enum_values.is_empty() {
                continue;
            }
            let values: Vec<String> = node
                .enum_values
                .iter()
                .map(|v| v.to_uppercase())
                .unique()
                .map(|v| str_as_uppercase_variable(&v))
                .collect();
            declarations.push(Declaration::Enum(EnumBlock {
                name: enum_name(&node),
                description: Description::default(),
                values,
            }));
        }
    }
    declarations
}
