//! Recursive walk over the fixed three-level form.
//!
//! The walk mirrors what a UI draws: the top-level fields, then one block per
//! entry of each repeated group with that entry's fields and nested groups.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::domain::{GroupKind, JOB_TYPES, TYPE_OPTIONS, paths};
use crate::tree::{FieldPath, ValueNode};

use super::{
    binding::{ChoiceField, FieldBinding, TextField},
    state::FormModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub fields: Vec<FieldBinding>,
    pub schema_list: GroupBlock,
}

/// A repeated group and its current entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBlock {
    pub kind: GroupKind,
    pub path: FieldPath,
    pub entries: Vec<EntryBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBlock {
    pub title: String,
    pub index: usize,
    pub fields: Vec<FieldBinding>,
    pub groups: Vec<GroupBlock>,
}

impl FormLayout {
    pub fn walk(model: &FormModel) -> Self {
        Self {
            fields: vec![FieldBinding::Text(TextField::new(
                paths::table_config(),
                "Table Config",
            ))],
            schema_list: walk_group(model, GroupKind::SchemaList, paths::schema_list()),
        }
    }

    /// Every field binding, in display order.
    pub fn all_fields(&self) -> Vec<&FieldBinding> {
        let mut acc: Vec<&FieldBinding> = self.fields.iter().collect();
        collect_group_fields(&self.schema_list, &mut acc);
        acc
    }
}

fn collect_group_fields<'a>(group: &'a GroupBlock, acc: &mut Vec<&'a FieldBinding>) {
    for entry in &group.entries {
        acc.extend(entry.fields.iter());
        for nested in &entry.groups {
            collect_group_fields(nested, acc);
        }
    }
}

fn walk_group(model: &FormModel, kind: GroupKind, path: FieldPath) -> GroupBlock {
    let len = model
        .get_value(&path)
        .and_then(ValueNode::as_sequence)
        .map_or(0, <[ValueNode]>::len);
    let entries = (0..len)
        .map(|index| walk_entry(model, kind, &path, index))
        .collect();
    GroupBlock {
        kind,
        path,
        entries,
    }
}

fn walk_entry(model: &FormModel, kind: GroupKind, group: &FieldPath, index: usize) -> EntryBlock {
    let entry = group.index(index);
    let groups = kind
        .child()
        .map(|child| walk_group(model, child, entry.child(child.field_name())))
        .into_iter()
        .collect();
    EntryBlock {
        title: kind.entry_title(index),
        index,
        fields: entry_fields(kind, &entry),
        groups,
    }
}

fn entry_fields(kind: GroupKind, entry: &FieldPath) -> Vec<FieldBinding> {
    let text =
        |name: &str, label: &str| FieldBinding::Text(TextField::new(entry.child(name), label));
    let choice = |name: &str, label: &str, set: &str| {
        FieldBinding::Choice(ChoiceField::new(entry.child(name), label, set))
    };
    match kind {
        GroupKind::SchemaList => vec![
            choice(paths::JOB_TYPES, "Job Types", JOB_TYPES),
            text(paths::CONFIG, "Config"),
        ],
        GroupKind::SecondLevel => vec![
            text(paths::NAME, "Name"),
            choice(paths::TYPE, "Type", TYPE_OPTIONS),
        ],
        GroupKind::ThirdLevel => vec![
            text(paths::NAME, "Name"),
            choice(paths::RANDOM, "Random", TYPE_OPTIONS),
        ],
    }
}

/// Plain-text outline of the form with current values and visible errors.
pub fn render_outline(model: &FormModel) -> String {
    let layout = FormLayout::walk(model);
    let mut out = String::new();
    write_fields(&mut out, model, &layout.fields, 0);
    write_group(&mut out, model, &layout.schema_list, 0);
    out
}

fn write_group(out: &mut String, model: &FormModel, group: &GroupBlock, depth: usize) {
    let indent = "  ".repeat(depth);
    for entry in &group.entries {
        let _ = writeln!(out, "{indent}{}", entry.title);
        write_fields(out, model, &entry.fields, depth + 1);
        for nested in &entry.groups {
            write_group(out, model, nested, depth + 1);
        }
    }
    let _ = writeln!(out, "{indent}+ {} ({})", group.kind.add_label(), group.path);
}

fn write_fields(out: &mut String, model: &FormModel, fields: &[FieldBinding], depth: usize) {
    let indent = "  ".repeat(depth);
    let width = fields
        .iter()
        .map(|field| field.label().width())
        .max()
        .unwrap_or(0);
    for field in fields {
        let view = field.view(model);
        let pad = " ".repeat(width - field.label().width());
        let value = match field {
            FieldBinding::Text(_) => format!("{:?}", view.value),
            FieldBinding::Choice(_) if view.value.is_empty() => "<none>".to_string(),
            FieldBinding::Choice(_) => view.value.clone(),
        };
        let _ = write!(out, "{indent}{}{pad} : {value}", field.label());
        if let Some(error) = view.error {
            let _ = write!(out, "  ! {error}");
        }
        out.push('\n');
    }
}
