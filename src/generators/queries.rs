use crate::options::GenerationOptions;
use crate::schema::{Block, BlockKind, Declaration, Description, Field};
use crate::vss::NodeRef;

use super::{field_type, naming::to_lower_camel_case, node_description};

/// One query field per specification root, no parameters or directives.
pub fn query_declarations(
    roots: &[NodeRef],
    options: &GenerationOptions,
) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("QUERY")];
    let fields: Vec<Field> = roots
        .iter()
        .map(|root| {
            let node = root.borrow();
            let mut field =
                Field::new(to_lower_camel_case(&node.name), field_type(&node, options));
            field.description = node_description(&node, !options.enums);
            field
        })
        .collect();
    if !fields.is_empty() {
        declarations.push(Declaration::Block(Block {
            kind: BlockKind::Query,
            name: "Query".to_string(),
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

    #[test]
    fn one_field_per_root() {
        let roots = vec![
            VssNode::new("Vehicle", VssKind::Branch).into_ref(),
            VssNode::new("Charging", VssKind::Branch).into_ref(),
        ];
        let declarations = query_declarations(&roots, &GenerationOptions::default());
        let Declaration::Block(block) = &declarations[1] else {
            panic!("expected query block");
        };
        assert_eq!(block.name, "Query");
        assert_eq!(block.fields.len(), 2);
        assert_eq!(block.fields[0].to_string(), "vehicle: Vehicle");
        assert_eq!(block.fields[1].to_string(), "charging: Charging");
        assert!(block.fields[0].directives.is_empty());
    }

    #[test]
    fn empty_forest_emits_no_block() {
        let declarations = query_declarations(&[], &GenerationOptions::default());
        assert_eq!(declarations.len(), 1);
        assert!(matches!(declarations[0], Declaration::Section("QUERY")));
    }
}
