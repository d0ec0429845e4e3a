use super::node::ValueNode;
use super::path::{FieldPath, index_of};

/// Look up the node at `path`.
///
/// Absence is the normal answer for paths the tree has no shape for: missing
/// keys, indices past the end, stepping into a leaf, or the empty path all
/// yield `None`. Error and touched trees are probed this way long before they
/// hold anything.
pub fn resolve<'a>(tree: &'a ValueNode, path: &FieldPath) -> Option<&'a ValueNode> {
    if path.is_empty() {
        return None;
    }
    path.segments()
        .iter()
        .try_fold(tree, |node, segment| step(node, segment))
}

pub fn resolve_str<'a>(tree: &'a ValueNode, path: &str) -> Option<&'a ValueNode> {
    resolve(tree, &FieldPath::parse(path))
}

pub fn resolve_mut<'a>(tree: &'a mut ValueNode, path: &FieldPath) -> Option<&'a mut ValueNode> {
    if path.is_empty() {
        return None;
    }
    path.segments()
        .iter()
        .try_fold(tree, |node, segment| step_mut(node, segment))
}

fn step<'a>(node: &'a ValueNode, segment: &str) -> Option<&'a ValueNode> {
    match node {
        ValueNode::Record(fields) => fields.get(segment),
        ValueNode::Sequence(items) => index_of(segment).and_then(|index| items.get(index)),
        ValueNode::Scalar(_) => None,
    }
}

fn step_mut<'a>(node: &'a mut ValueNode, segment: &str) -> Option<&'a mut ValueNode> {
    match node {
        ValueNode::Record(fields) => fields.get_mut(segment),
        ValueNode::Sequence(items) => index_of(segment).and_then(|index| items.get_mut(index)),
        ValueNode::Scalar(_) => None,
    }
}
