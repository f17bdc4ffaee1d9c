use crate::layer::Layer;
use crate::options::GenerationOptions;
use crate::schema::{Block, BlockKind, Declaration, Description, Field};
use crate::vss::{level_order, NodeRef, VssNode};

use super::naming::type_name;
use super::{id_field, type_field};

fn type_block(node: &VssNode, description: Description, fields: Vec<Field>) -> Declaration {
    Declaration::Block(Block {
        kind: BlockKind::Type,
        name: type_name(node),
        description,
        fields,
    })
}

/// One object type per branch, with one field per child. Leaves have no
/// children and therefore produce no block.
pub fn type_declarations(roots: &[NodeRef], options: &GenerationOptions) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("TYPE")];
    for root in roots {
        for node in level_order(root) {
            let node = node.borrow();
            let fields: Vec<Field> = node
                .children
                .iter()
                .map(|child| type_field(&child.borrow(), options))
                .collect();
            if !fields.is_empty() {
                declarations.push(type_block(&node, Description::default(), fields));
            }
        }
    }
    declarations
}

/// Layer-aware variant: children the overlay marks as repeated get
/// list-wrapped types, and repeated nodes gain an `id` field so single
/// elements stay addressable. Only this variant carries the branch
/// description onto the type block.
pub fn layer_type_declarations(
    roots: &[NodeRef],
    options: &GenerationOptions,
    layer: &Layer,
) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("TYPE")];
    for root in roots {
        for node in level_order(root) {
            let node = node.borrow();
            let mut fields: Vec<Field> = Vec::new();
            for child in &node.children {
                let child = child.borrow();
                let mut field = type_field(&child, options);
                if layer.is_list_node(&child.qualified_name("_")) {
                    field.wrap_list();
                }
                fields.push(field);
            }
            if layer.is_list_node(&node.qualified_name("_")) && !fields.is_empty() {
                fields.push(id_field());
            }
            if !fields.is_empty() {
                declarations.push(type_block(
                    &node,
                    Description::new(node.description.clone()),
                    fields,
                ));
            }
        }
    }
    declarations
}
