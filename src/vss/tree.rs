use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::datatype::DataType;

pub type NodeRef = Rc<RefCell<VssNode>>;

/// Node categories from the vspec `type` attribute. Branches are internal
/// nodes; the remaining kinds are leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VssKind {
    Branch,
    RootBranch,
    Attribute,
    Sensor,
    Actuator,
    Element,
}

impl VssKind {
    pub fn parse(raw: &str) -> Option<VssKind> {
        match raw {
            "branch" => Some(VssKind::Branch),
            "rbranch" => Some(VssKind::RootBranch),
            "attribute" => Some(VssKind::Attribute),
            "sensor" => Some(VssKind::Sensor),
            "actuator" => Some(VssKind::Actuator),
            "element" => Some(VssKind::Element),
            _ => None,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, VssKind::Branch | VssKind::RootBranch)
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_branch()
    }
}

/// One element of the signal specification tree. Children are owned by the
/// parent; the parent link is a non-owning back-reference.
#[derive(Debug)]
pub struct VssNode {
    pub name: String,
    pub kind: VssKind,
    pub data_type: Option<DataType>,
    pub description: String,
    pub unit: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub enum_values: Vec<String>,
    pub deprecation: Option<String>,
    pub children: Vec<NodeRef>,
    pub parent: Weak<RefCell<VssNode>>,
}

impl VssNode {
    pub fn new(name: impl Into<String>, kind: VssKind) -> VssNode {
        VssNode {
            name: name.into(),
            kind,
            data_type: None,
            description: String::new(),
            unit: String::new(),
            min: None,
            max: None,
            enum_values: Vec::new(),
            deprecation: None,
            children: Vec::new(),
            parent: Weak::new(),
        }
    }

    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    /// Path string from the tree root to this node, joined by `sep`.
    /// Computed on demand from the ancestor chain; never cached.
    pub fn qualified_name(&self, sep: &str) -> String {
        let mut names = vec![self.name.clone()];
        let mut cur = self.parent.upgrade();
        while let Some(node) = cur {
            let borrowed = node.borrow();
            names.push(borrowed.name.clone());
            let next = borrowed.parent.upgrade();
            drop(borrowed);
            cur = next;
        }
        names.reverse();
        names.join(sep)
    }

    pub fn has_child_actuator(&self) -> bool {
        self.children
            .iter()
            .any(|c| c.borrow().kind == VssKind::Actuator)
    }
}

/// Attach `child` to `parent`, fixing up the back-reference.
pub fn add_child(parent: &NodeRef, child: NodeRef) {
    child.borrow_mut().parent = Rc::downgrade(parent);
    parent.borrow_mut().children.push(child);
}

/// All nodes under `root` (root included) in level order.
pub fn level_order(root: &NodeRef) -> Vec<NodeRef> {
    let mut nodes = vec![Rc::clone(root)];
    let mut i = 0;
    while i < nodes.len() {
        let children: Vec<NodeRef> =
            nodes[i].borrow().children.iter().map(Rc::clone).collect();
        nodes.extend(children);
        i += 1;
    }
    nodes
}

/// All nodes under `root` (root included) in pre-order.
pub fn pre_order(root: &NodeRef) -> Vec<NodeRef> {
    let mut nodes = Vec::new();
    let mut stack = vec![Rc::clone(root)];
    while let Some(node) = stack.pop() {
        let children: Vec<NodeRef> =
            node.borrow().children.iter().rev().map(Rc::clone).collect();
        nodes.push(node);
        stack.extend(children);
    }
    nodes
}

/// Sort every node's children list by qualified name, so generation order
/// is stable across runs regardless of input ordering.
pub fn sort_children(root: &NodeRef) {
    for node in level_order(root) {
        // Take the list out first: the sort key borrows each child's parent
        // (this very node), which must not be mutably borrowed meanwhile.
        let mut children = std::mem::take(&mut node.borrow_mut().children);
        children.sort_by_key(|c| c.borrow().qualified_name("_"));
        node.borrow_mut().children = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> NodeRef {
        let root = VssNode::new("Vehicle", VssKind::Branch).into_ref();
        let cabin = VssNode::new("Cabin", VssKind::Branch).into_ref();
        let door = VssNode::new("Door", VssKind::Branch).into_ref();
        let locked = VssNode::new("IsLocked", VssKind::Actuator).into_ref();
        add_child(&door, locked);
        add_child(&cabin, door);
        add_child(&root, cabin);
        root
    }

    #[test]
    fn qualified_name_joins_ancestor_chain() {
        let root = sample_tree();
        let leaf = pre_order(&root).last().unwrap().clone();
        assert_eq!(
            leaf.borrow().qualified_name("_"),
            "Vehicle_Cabin_Door_IsLocked"
        );
        assert_eq!(
            leaf.borrow().qualified_name("."),
            "Vehicle.Cabin.Door.IsLocked"
        );
    }

    #[test]
    fn qualified_name_is_stable_and_sibling_independent() {
        let root = sample_tree();
        let speed = VssNode::new("Speed", VssKind::Sensor).into_ref();
        add_child(&root, Rc::clone(&speed));
        let first = speed.borrow().qualified_name("_");

        // Adding and reordering siblings must not change the result.
        add_child(&root, VssNode::new("Ignition", VssKind::Sensor).into_ref());
        root.borrow_mut().children.reverse();
        assert_eq!(speed.borrow().qualified_name("_"), first);
        assert_eq!(first, "Vehicle_Speed");
    }

    #[test]
    fn sort_children_orders_by_qualified_name() {
        let root = VssNode::new("Vehicle", VssKind::Branch).into_ref();
        for name in ["Speed", "Cabin", "Ignition"] {
            add_child(&root, VssNode::new(name, VssKind::Sensor).into_ref());
        }
        sort_children(&root);
        let names: Vec<String> = root
            .borrow()
            .children
            .iter()
            .map(|c| c.borrow().name.clone())
            .collect();
        assert_eq!(names, ["Cabin", "Ignition", "Speed"]);
    }
}
