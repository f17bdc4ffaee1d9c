use crate::layer::Layer;
use crate::options::GenerationOptions;
use crate::schema::Declaration;
use crate::vss::NodeRef;

use super::{
    custom_scalar_declarations, directive_declarations, enum_declarations,
    input_declarations, layer_input_declarations, layer_mutation_declarations,
    layer_type_declarations, mutation_declarations, query_declarations,
    subscription_declarations, type_declarations,
};

/// Assemble the full declaration stream in the fixed output order:
/// directives, custom scalars, query, subscription, mutation, input, type,
/// enums. The order is a textual-output contract, not a dependency one, and
/// must stay put for regenerable diffs. With a layer active, the
/// mutation/input/type builders are swapped for their layer-aware variants;
/// the rest are shared.
pub fn assemble_schema(
    roots: &[NodeRef],
    options: &GenerationOptions,
    layer: Option<&Layer>,
) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    declarations.extend(directive_declarations(options));
    if options.custom_scalars {
        declarations.extend(custom_scalar_declarations());
    }
    declarations.extend(query_declarations(roots, options));
    declarations.extend(subscription_declarations(roots, options));
    match layer {
        Some(layer) => {
            declarations.extend(layer_mutation_declarations(roots, options, layer));
            declarations.extend(layer_input_declarations(roots, options, layer));
            declarations.extend(layer_type_declarations(roots, options, layer));
        }
        None => {
            declarations.extend(mutation_declarations(roots, options));
            declarations.extend(input_declarations(roots, options));
            declarations.extend(type_declarations(roots, options));
        }
    }
    if options.enums {
        declarations.extend(enum_declarations(roots, options));
    }

    declarations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vss::{add_child, DataType, VssKind, VssNode};

    fn sample_roots() -> Vec<NodeRef> {
        let root = VssNode::new("Vehicle", VssKind::Branch).into_ref();
        let speed = VssNode::new("Speed", VssKind::Sensor).into_ref();
        speed.borrow_mut().data_type = DataType::parse("float");
        add_child(&root, speed);
        vec![root]
    }

    fn section_order(declarations: &[Declaration]) -> Vec<&'static str> {
        declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Section(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sections_follow_the_fixed_order() {
        let options = GenerationOptions {
            custom_scalars: true,
            permission_directive: true,
            range_directive: true,
            enums: true,
            subscription_delivery_interval: false,
        };
        let declarations = assemble_schema(&sample_roots(), &options, None);
        assert_eq!(
            section_order(&declarations),
            [
                "DIRECTIVES",
                "CUSTOM SCALARS",
                "QUERY",
                "SUBSCRIPTION",
                "MUTATION",
                "INPUT",
                "TYPE",
                "ENUM"
            ]
        );
    }

    #[test]
    fn default_options_skip_optional_sections() {
        let declarations =
            assemble_schema(&sample_roots(), &GenerationOptions::default(), None);
        assert_eq!(
            section_order(&declarations),
            ["QUERY", "SUBSCRIPTION", "MUTATION", "INPUT", "TYPE"]
        );
    }
}
