use regex::Regex;

use crate::layer::Layer;
use crate::vss::NodeRef;

pub type NamePredicate = Box<dyn Fn(&str) -> bool>;

/// Prunes a specification forest with a chain of qualified-name predicates.
///
/// A node survives when it passes every predicate and is either a leaf or
/// keeps at least one child after recursive filtering, so a branch whose
/// descendants are all rejected disappears even if its own name passes.
/// Children lists of surviving nodes are replaced in place.
#[derive(Default)]
pub struct TreeFilter {
    predicates: Vec<NamePredicate>,
}

impl TreeFilter {
    pub fn new() -> TreeFilter {
        TreeFilter::default()
    }

    pub fn add(&mut self, predicate: NamePredicate) {
        self.predicates.push(predicate);
    }

    pub fn filter_forest(&self, roots: Vec<NodeRef>) -> Vec<NodeRef> {
        roots
            .into_iter()
            .filter_map(|root| self.filter_node(root))
            .collect()
    }

    fn filter_node(&self, node: NodeRef) -> Option<NodeRef> {
        if !self.allowed(&node.borrow().qualified_name("_")) {
            return None;
        }
        let children = std::mem::take(&mut node.borrow_mut().children);
        let kept: Vec<NodeRef> = children
            .into_iter()
            .filter_map(|child| self.filter_node(child))
            .collect();
        let survives = {
            let mut n = node.borrow_mut();
            n.children = kept;
            n.kind.is_leaf() || !n.children.is_empty()
        };
        survives.then_some(node)
    }

    fn allowed(&self, qualified_name: &str) -> bool {
        self.predicates.iter().all(|p| p(qualified_name))
    }
}

/// Keep only names matching `pattern`.
pub fn match_pattern(pattern: &str) -> Result<NamePredicate, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Box::new(move |name| re.is_match(name)))
}

/// Drop names matching `pattern` (and with them their subtrees).
pub fn filter_pattern(pattern: &str) -> Result<NamePredicate, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Box::new(move |name| !re.is_match(name)))
}

/// Keep only names present in the layer's qualified-name catalog.
pub fn layer_membership(layer: &Layer) -> NamePredicate {
    let names = layer.qualified_names().clone();
    Box::new(move |name| names.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vss::{add_child, pre_order, VssKind, VssNode};

    fn sample_forest() -> Vec<NodeRef> {
        let root = VssNode::new("Vehicle", VssKind::Branch).into_ref();
        let cabin = VssNode::new("Cabin", VssKind::Branch).into_ref();
        add_child(&cabin, VssNode::new("Temperature", VssKind::Sensor).into_ref());
        add_child(&root, cabin);
        add_child(&root, VssNode::new("Speed", VssKind::Sensor).into_ref());
        vec![root]
    }

    fn names(roots: &[NodeRef]) -> Vec<String> {
        roots
            .iter()
            .flat_map(pre_order)
            .map(|n| n.borrow().qualified_name("_"))
            .collect()
    }

    #[test]
    fn no_predicates_keeps_everything() {
        let filtered = TreeFilter::new().filter_forest(sample_forest());
        assert_eq!(names(&filtered).len(), 4);
    }

    #[test]
    fn branch_with_all_children_rejected_is_dropped() {
        let mut filter = TreeFilter::new();
        // Cabin itself passes, but its only descendant does not.
        filter.add(filter_pattern("Temperature").unwrap());
        let filtered = filter.filter_forest(sample_forest());
        let kept = names(&filtered);
        assert_eq!(kept, ["Vehicle", "Vehicle_Speed"]);
    }

    #[test]
    fn match_pattern_keeps_matching_subtree_only() {
        let mut filter = TreeFilter::new();
        filter.add(match_pattern("^Vehicle(_Cabin.*)?$").unwrap());
        let filtered = filter.filter_forest(sample_forest());
        let kept = names(&filtered);
        assert_eq!(
            kept,
            ["Vehicle", "Vehicle_Cabin", "Vehicle_Cabin_Temperature"]
        );
    }

    #[test]
    fn root_failing_a_predicate_yields_empty_forest() {
        let mut filter = TreeFilter::new();
        filter.add(filter_pattern("^Vehicle$").unwrap());
        assert!(filter.filter_forest(sample_forest()).is_empty());
    }

    #[test]
    fn layer_membership_prunes_to_catalog() {
        let layer_yaml: serde_yaml::Value = serde_yaml::from_str(
            r#"
Vehicle:
  Speed: {}
"#,
        )
        .unwrap();
        let serde_yaml::Value::Mapping(tree) = layer_yaml else { panic!() };
        let layer = Layer::from_mapping(&tree);

        let mut filter = TreeFilter::new();
        filter.add(layer_membership(&layer));
        let filtered = filter.filter_forest(sample_forest());
        assert_eq!(names(&filtered), ["Vehicle", "Vehicle_Speed"]);
    }
}
