use crate::layer::Layer;
use crate::options::GenerationOptions;
use crate::schema::{Block, BlockKind, Declaration, Description, Field};
use crate::vss::{level_order, NodeRef, VssKind, VssNode};

use super::naming::input_name;
use super::{id_field, input_field};

fn input_block(node: &VssNode, fields: Vec<Field>) -> Declaration {
    Declaration::Block(Block {
        kind: BlockKind::Input,
        name: input_name(node),
        description: Description::default(),
        fields,
    })
}

/// Qualified names of the node and all its ancestors, innermost last.
fn ancestor_names(node: &VssNode) -> Vec<String> {
    let full = node.qualified_name("_");
    let segments: Vec<&str> = full.split('_').collect();
    (1..=segments.len())
        .map(|i| segments[..i].join("_"))
        .collect()
}

/// One input per branch owning actuators, mirroring the mutations that will
/// consume it. Every entry is a write field.
pub fn input_declarations(roots: &[NodeRef], options: &GenerationOptions) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("INPUT")];
    for root in roots {
        for node in level_order(root) {
            let node = node.borrow();
            let fields: Vec<Field> = node
                .children
                .iter()
                .filter(|child| child.borrow().kind == VssKind::Actuator)
                .map(|child| input_field(&child.borrow(), options))
                .collect();
            if !fields.is_empty() {
                declarations.push(input_block(&node, fields));
            }
        }
    }
    declarations
}

/// Layer-aware variant. Only nodes the overlay marks writable (or eligible
/// for parent-attribute merging) produce inputs; merged children reference
/// their own input type, list-wrapped when repeated; and a single `id`
/// field is appended when any enclosing structure is repeated.
pub fn layer_input_declarations(
    roots: &[NodeRef],
    options: &GenerationOptions,
    layer: &Layer,
) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("INPUT")];
    for root in roots {
        for node in level_order(root) {
            let node = node.borrow();
            let node_name = node.qualified_name("_");
            if !layer.is_write_node(&node_name) && !layer.has_parent_attribute(&node_name) {
                continue;
            }

            let mut fields: Vec<Field> = Vec::new();
            for child in &node.children {
                let child = child.borrow();
                let child_name = child.qualified_name("_");
                if child.kind == VssKind::Actuator {
                    let mut field = input_field(&child, options);
                    field.description = Description::default();
                    fields.push(field);
                }
                // Children merged under this input keep their own input
                // type as the reference.
                if layer.has_parent_attribute(&child_name) {
                    let mut field = Field::new(
                        super::naming::to_lower_camel_case(&child.name),
                        input_name(&child),
                    );
                    if layer.is_list_node(&child_name) {
                        field.wrap_list();
                    }
                    fields.push(field);
                }
            }

            if !fields.is_empty()
                && ancestor_names(&node).iter().any(|name| layer.is_list_node(name))
            {
                fields.push(id_field());
            }

            if !fields.is_empty() {
                declarations.push(input_block(&node, fields));
            }
        }
    }
    declarations
}
