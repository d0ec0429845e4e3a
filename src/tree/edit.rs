//! Copy-on-write edits of repeated groups and leaves.
//!
//! The free functions without the `_in_place` suffix never touch the tree
//! they are given; they return an edited copy. Paths are resolved against the
//! tree passed to each call, so indices observed before an earlier removal
//! are never reused.

use indexmap::IndexMap;

use super::node::{Scalar, ValueNode};
use super::path::{FieldPath, PathError, index_of};
use super::resolve::resolve_mut;

/// Append an owned copy of `template` to the group at `group`.
///
/// A missing group or a null placeholder starts out empty. Text leaves and
/// records are not groups. Returns the new length of the group.
pub fn append_in_place(
    tree: &mut ValueNode,
    group: &FieldPath,
    template: &ValueNode,
) -> Result<usize, PathError> {
    let node = ensure_path_mut(tree, group)?;
    if matches!(node, ValueNode::Scalar(Scalar::Null)) {
        *node = ValueNode::Sequence(Vec::new());
    }
    match node {
        ValueNode::Sequence(items) => {
            items.push(template.clone());
            Ok(items.len())
        }
        _ => Err(PathError::NotAGroup {
            path: group.to_string(),
        }),
    }
}

pub fn append(
    tree: &ValueNode,
    group: &FieldPath,
    template: &ValueNode,
) -> Result<ValueNode, PathError> {
    let mut next = tree.clone();
    append_in_place(&mut next, group, template)?;
    Ok(next)
}

/// Remove the entry at `index` of the group at `group`.
///
/// Out-of-range indices and paths that do not reach a group leave the tree
/// alone and report `false`.
pub fn remove_in_place(tree: &mut ValueNode, group: &FieldPath, index: usize) -> bool {
    match resolve_mut(tree, group) {
        Some(ValueNode::Sequence(items)) if index < items.len() => {
            items.remove(index);
            true
        }
        _ => false,
    }
}

pub fn remove_at(tree: &ValueNode, group: &FieldPath, index: usize) -> ValueNode {
    let mut next = tree.clone();
    remove_in_place(&mut next, group, index);
    next
}

/// Replace the node at `path`, creating any missing records and groups on the
/// way. Returns whether the stored node changed.
pub fn set_in_place(
    tree: &mut ValueNode,
    path: &FieldPath,
    value: ValueNode,
) -> Result<bool, PathError> {
    let slot = ensure_path_mut(tree, path)?;
    if *slot == value {
        return Ok(false);
    }
    *slot = value;
    Ok(true)
}

pub fn set(tree: &ValueNode, path: &FieldPath, value: ValueNode) -> Result<ValueNode, PathError> {
    let mut next = tree.clone();
    set_in_place(&mut next, path, value)?;
    Ok(next)
}

fn ensure_path_mut<'a>(
    tree: &'a mut ValueNode,
    path: &FieldPath,
) -> Result<&'a mut ValueNode, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    path.segments()
        .iter()
        .try_fold(tree, |node, segment| descend_or_create(node, segment, path))
}

fn descend_or_create<'a>(
    node: &'a mut ValueNode,
    segment: &str,
    path: &FieldPath,
) -> Result<&'a mut ValueNode, PathError> {
    match node {
        ValueNode::Record(fields) => Ok(fields
            .entry(segment.to_string())
            .or_insert_with(ValueNode::null)),
        ValueNode::Sequence(items) => {
            let index = index_of(segment).ok_or_else(|| PathError::NotAnIndex {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
            if items.len() <= index {
                items.resize_with(index + 1, ValueNode::null);
            }
            Ok(&mut items[index])
        }
        ValueNode::Scalar(_) => {
            *node = if index_of(segment).is_some() {
                ValueNode::Sequence(Vec::new())
            } else {
                ValueNode::Record(IndexMap::new())
            };
            descend_or_create(node, segment, path)
        }
    }
}
