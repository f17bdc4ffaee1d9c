use crate::options::GenerationOptions;
use crate::schema::{
    directive, Block, BlockKind, Declaration, Description, EnumBlock, Field, Parameter,
};
use crate::vss::{NodeRef, VssNode};

use super::{field_type, naming::to_lower_camel_case, node_description};

const DELIVERY_INTERVAL_ENUM: &str = "SubscriptionDeliveryInterval";

fn subscription_permission_names(node: &VssNode, permissions: &[&str]) -> Vec<String> {
    let base = node.qualified_name(".");
    permissions
        .iter()
        .map(|p| format!("Subscription.{base}.{p}"))
        .collect()
}

/// One subscription field per root. With the delivery-interval option the
/// field takes an interval parameter defaulting to the 5-second tier, and
/// with permissions also enabled it is gated on the higher-frequency tiers.
pub fn subscription_declarations(
    roots: &[NodeRef],
    options: &GenerationOptions,
) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("SUBSCRIPTION")];
    if options.subscription_delivery_interval && !roots.is_empty() {
        declarations.push(Declaration::Enum(EnumBlock {
            name: DELIVERY_INTERVAL_ENUM.to_string(),
            description: Description::default(),
            values: vec![
                directive::PERMISSION_DELIVERY_INTERVAL_1_SECOND.to_string(),
                directive::PERMISSION_DELIVERY_INTERVAL_5_SECONDS.to_string(),
                directive::PERMISSION_REALTIME.to_string(),
            ],
        }));
    }

    let fields: Vec<Field> = roots
        .iter()
        .map(|root| {
            let node = root.borrow();
            let mut field =
                Field::new(to_lower_camel_case(&node.name), field_type(&node, options));
            field.description = node_description(&node, !options.enums);
            if options.subscription_delivery_interval {
                field.parameters.push(
                    Parameter::new("deliveryInterval", DELIVERY_INTERVAL_ENUM)
                        .required()
                        .with_default(directive::PERMISSION_DELIVERY_INTERVAL_5_SECONDS),
                );
                if options.permission_directive {
                    field.directives.push(directive::has_permissions(
                        &subscription_permission_names(
                            &node,
                            &[
                                directive::PERMISSION_DELIVERY_INTERVAL_1_SECOND,
                                directive::PERMISSION_REALTIME,
                            ],
                        ),
                    ));
                }
            }
            field
        })
        .collect();
    if !fields.is_empty() {
        declarations.push(Declaration::Block(Block {
            kind: BlockKind::Subscription,
            name: "Subscription".to_string(),
            description: Description::default(),
            fields,
        }));
    }
    declarations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vss::{VssKind, VssNode};

    fn roots() -> Vec<NodeRef> {
        vec![VssNode::new("Vehicle", VssKind::Branch).into_ref()]
    }

    #[test]
    fn plain_subscription_has_no_parameters() {
        let declarations = subscription_declarations(&roots(), &GenerationOptions::default());
        let Declaration::Block(block) = &declarations[1] else { panic!() };
        assert_eq!(block.fields[0].to_string(), "vehicle: Vehicle");
    }

    #[test]
    fn delivery_interval_adds_enum_and_parameter() {
        let options = GenerationOptions {
            subscription_delivery_interval: true,
            permission_directive: true,
            ..GenerationOptions::default()
        };
        let declarations = subscription_declarations(&roots(), &options);
        let Declaration::Enum(interval) = &declarations[1] else {
            panic!("expected interval enum");
        };
        assert_eq!(interval.name, "SubscriptionDeliveryInterval");
        let Declaration::Block(block) = &declarations[2] else { panic!() };
        assert_eq!(
            block.fields[0].to_string(),
            "vehicle(deliveryInterval: SubscriptionDeliveryInterval! = \
             DELIVERY_INTERVAL_5_SECONDS): Vehicle \
             @hasPermissions(permissions: [\"Subscription.Vehicle.DELIVERY_INTERVAL_1_SECOND\", \
             \"Subscription.Vehicle.REALTIME\"])"
        );
    }
}
