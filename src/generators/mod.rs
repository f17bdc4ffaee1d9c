mod assemble;
mod directives;
mod enums;
mod inputs;
mod mutations;
pub mod naming;
mod queries;
mod scalars;
mod subscriptions;
mod types;

pub use assemble::assemble_schema;
pub use directives::directive_declarations;
pub use enums::enum_declarations;
pub use inputs::{input_declarations, layer_input_declarations};
pub use mutations::{layer_mutation_declarations, mutation_declarations};
pub use queries::query_declarations;
pub use scalars::custom_scalar_declarations;
pub use subscriptions::subscription_declarations;
pub use types::{layer_type_declarations, type_declarations};

use crate::options::GenerationOptions;
use crate::schema::directive::format_bound;
use crate::schema::{directive, Description, Field};
use crate::vss::VssNode;
use naming::{enum_name, to_lower_camel_case, type_name};

/// GraphQL type reference for a node: enum type when enabled and declared,
/// the node's own type name for branches, otherwise the mapped scalar.
fn field_type(node: &VssNode, options: &GenerationOptions) -> String {
    if options.enums && !node.enum_values.is_empty() {
        return enum_name(node);
    }
    if node.kind.is_branch() {
        return type_name(node);
    }
    match node.data_type {
        Some(data_type) => data_type.graphql_type(options.custom_scalars),
        None => "String".to_string(),
    }
}

/// Structured description for a leaf node; branches contribute nothing.
/// Allowed values are listed textually only while enum types are disabled.
fn node_description(node: &VssNode, include_enum: bool) -> Description {
    if node.kind.is_branch() {
        return Description::default();
    }
    Description {
        body: node.description.clone(),
        unit: node.unit.clone(),
        min: node.min.map(format_bound).unwrap_or_default(),
        max: node.max.map(format_bound).unwrap_or_default(),
        enum_values: if include_enum && !node.enum_values.is_empty() {
            node.enum_values.join(", ")
        } else {
            String::new()
        },
    }
}

fn permission_names(node: &VssNode, permissions: &[&str]) -> Vec<String> {
    let base = node.qualified_name(".");
    permissions.iter().map(|p| format!("{base}_{p}")).collect()
}

/// Field for a type declaration. Directive order is part of the output
/// contract: deprecated, then range, then hasPermissions.
fn type_field(node: &VssNode, options: &GenerationOptions) -> Field {
    let mut field = Field::new(to_lower_camel_case(&node.name), field_type(node, options));
    field.description = node_description(node, !options.enums);

    if let Some(reason) = &node.deprecation {
        field.directives.push(directive::deprecated(reason));
    }
    if options.range_directive {
        if let Some(range) = directive::range(node.min, node.max) {
            field.directives.push(range);
        }
    }
    if options.permission_directive && !node.kind.is_branch() {
        field.directives.push(directive::has_permissions(&permission_names(
            node,
            &[directive::PERMISSION_READ],
        )));
    }
    field
}

/// Field for an input declaration: same shape as a type field but with
/// write permission instead of read, and no deprecation.
fn input_field(node: &VssNode, options: &GenerationOptions) -> Field {
    let mut field = Field::new(to_lower_camel_case(&node.name), field_type(node, options));
    field.description = node_description(node, !options.enums);

    if options.range_directive {
        if let Some(range) = directive::range(node.min, node.max) {
            field.directives.push(range);
        }
    }
    if options.permission_directive {
        field.directives.push(directive::has_permissions(&permission_names(
            node,
            &[directive::PERMISSION_WRITE],
        )));
    }
    field
}

/// Synthetic identifier field addressing one element of a repeated
/// structure.
fn id_field() -> Field {
    Field::new("id", "ID!")
}
