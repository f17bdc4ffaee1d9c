use std::collections::HashSet;

use crate::layer::Layer;
use crate::options::GenerationOptions;
use crate::schema::{Block, BlockKind, Declaration, Description, Field, Parameter};
use crate::vss::{level_order, pre_order, NodeRef, VssKind, VssNode};

use super::naming::{input_name, mutation_name, type_name};

fn mutation_field(parent: &VssNode) -> Field {
    let mut field = Field::new(mutation_name(parent), type_name(parent));
    field
        .parameters
        .push(Parameter::new("input", input_name(parent)).required());
    field
}

fn mutation_block(fields: Vec<Field>) -> Declaration {
    Declaration::Block(Block {
        kind: BlockKind::Mutation,
        name: "Mutation".to_string(),
        description: Description::default(),
        fields,
    })
}

/// One mutation per branch owning at least one actuator. Deduplication is
/// keyed by the parent's qualified name, so actuator siblings collapse into
/// a single `set...` field.
pub fn mutation_declarations(
    roots: &[NodeRef],
    _options: &GenerationOptions,
) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("MUTATION")];
    let mut seen: HashSet<String> = HashSet::new();
    let mut fields = Vec::new();
    for root in roots {
        for node in level_order(root) {
            let node = node.borrow();
            if node.kind != VssKind::Actuator {
                continue;
            }
            let Some(parent) = node.parent.upgrade() else { continue };
            let parent = parent.borrow();
            if seen.insert(parent.qualified_name("_")) {
                fields.push(mutation_field(&parent));
            }
        }
    }
    if !fields.is_empty() {
        declarations.push(mutation_block(fields));
    }
    declarations
}

/// Layer-aware variant: only nodes the overlay marks writable and that own
/// an actuator child produce mutations.
pub fn layer_mutation_declarations(
    roots: &[NodeRef],
    _options: &GenerationOptions,
    layer: &Layer,
) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("MUTATION")];
    let mut fields = Vec::new();
    for root in roots {
        for node in pre_order(root) {
            let node = node.borrow();
            if layer.is_write_node(&node.qualified_name("_")) && node.has_child_actuator() {
                fields.push(mutation_field(&node));
            }
        }
    }
    if !fields.is_empty() {
        declarations.push(mutation_block(fields));
    }
    declarations
}
