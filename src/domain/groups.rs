use crate::tree::{FieldPath, ValueNode, index_of};

use super::paths::{SCHEMA_LIST, SECOND_LEVEL, THIRD_LEVEL};
use super::records::{SchemaListEntry, SecondLevelEntry, ThirdLevelEntry};

/// The three repeated groups of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    SchemaList,
    SecondLevel,
    ThirdLevel,
}

impl GroupKind {
    /// Identify the group a path points at. Only the three group locations
    /// of the form count: `schemaList`, `schemaList[i].secondLevel` and
    /// `schemaList[i].secondLevel[j].thirdLevel`.
    pub fn from_path(group: &FieldPath) -> Option<Self> {
        let is_index = |segment: &String| index_of(segment).is_some();
        match group.segments() {
            [list] if list == SCHEMA_LIST => Some(GroupKind::SchemaList),
            [list, i, second] if list == SCHEMA_LIST && is_index(i) && second == SECOND_LEVEL => {
                Some(GroupKind::SecondLevel)
            }
            [list, i, second, j, third]
                if list == SCHEMA_LIST
                    && is_index(i)
                    && second == SECOND_LEVEL
                    && is_index(j)
                    && third == THIRD_LEVEL =>
            {
                Some(GroupKind::ThirdLevel)
            }
            _ => None,
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            GroupKind::SchemaList => SCHEMA_LIST,
            GroupKind::SecondLevel => SECOND_LEVEL,
            GroupKind::ThirdLevel => THIRD_LEVEL,
        }
    }

    /// Blank entry for this group, nested groups pre-populated with one
    /// blank child each.
    pub fn template(self) -> ValueNode {
        match self {
            GroupKind::SchemaList => ValueNode::from(&SchemaListEntry::template()),
            GroupKind::SecondLevel => ValueNode::from(&SecondLevelEntry::template()),
            GroupKind::ThirdLevel => ValueNode::from(&ThirdLevelEntry::template()),
        }
    }

    pub fn child(self) -> Option<GroupKind> {
        match self {
            GroupKind::SchemaList => Some(GroupKind::SecondLevel),
            GroupKind::SecondLevel => Some(GroupKind::ThirdLevel),
            GroupKind::ThirdLevel => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            GroupKind::SchemaList => "Schema List",
            GroupKind::SecondLevel => "2nd Level",
            GroupKind::ThirdLevel => "3rd Level",
        }
    }

    /// Heading of the entry at zero-based `index`.
    pub fn entry_title(self, index: usize) -> String {
        format!("{} {}", self.title(), index + 1)
    }

    pub fn add_label(self) -> String {
        format!("Add {}", self.title())
    }
}
