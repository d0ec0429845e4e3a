use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::tree::{Scalar, ValueNode};

use super::paths::{
    CONFIG, JOB_TYPES, NAME, RANDOM, SCHEMA_LIST, SECOND_LEVEL, TABLE_CONFIG, THIRD_LEVEL, TYPE,
};

/// Root of the form: a table config and the schema list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub table_config: Option<String>,
    pub schema_list: Vec<SchemaListEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaListEntry {
    pub job_types: Option<String>,
    pub config: Option<String>,
    pub second_level: Vec<SecondLevelEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecondLevelEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub third_level: Vec<ThirdLevelEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdLevelEntry {
    pub name: Option<String>,
    pub random: Option<String>,
}

fn blank() -> Option<String> {
    Some(String::new())
}

impl FormValues {
    /// Starting state: every repeated group holds one blank entry.
    pub fn initial() -> Self {
        Self {
            table_config: blank(),
            schema_list: vec![SchemaListEntry::template()],
        }
    }
}

impl SchemaListEntry {
    pub fn template() -> Self {
        Self {
            job_types: blank(),
            config: blank(),
            second_level: vec![SecondLevelEntry::template()],
        }
    }
}

impl SecondLevelEntry {
    pub fn template() -> Self {
        Self {
            name: blank(),
            kind: blank(),
            third_level: vec![ThirdLevelEntry::template()],
        }
    }
}

impl ThirdLevelEntry {
    pub fn template() -> Self {
        Self {
            name: blank(),
            random: blank(),
        }
    }
}

fn leaf(value: &Option<String>) -> ValueNode {
    ValueNode::Scalar(Scalar::from(value.clone()))
}

impl From<&ThirdLevelEntry> for ValueNode {
    fn from(entry: &ThirdLevelEntry) -> Self {
        ValueNode::record([(NAME, leaf(&entry.name)), (RANDOM, leaf(&entry.random))])
    }
}

impl From<&SecondLevelEntry> for ValueNode {
    fn from(entry: &SecondLevelEntry) -> Self {
        ValueNode::record([
            (NAME, leaf(&entry.name)),
            (TYPE, leaf(&entry.kind)),
            (
                THIRD_LEVEL,
                ValueNode::sequence(entry.third_level.iter().map(ValueNode::from)),
            ),
        ])
    }
}

impl From<&SchemaListEntry> for ValueNode {
    fn from(entry: &SchemaListEntry) -> Self {
        ValueNode::record([
            (JOB_TYPES, leaf(&entry.job_types)),
            (CONFIG, leaf(&entry.config)),
            (
                SECOND_LEVEL,
                ValueNode::sequence(entry.second_level.iter().map(ValueNode::from)),
            ),
        ])
    }
}

impl From<&FormValues> for ValueNode {
    fn from(values: &FormValues) -> Self {
        ValueNode::record([
            (TABLE_CONFIG, leaf(&values.table_config)),
            (
                SCHEMA_LIST,
                ValueNode::sequence(values.schema_list.iter().map(ValueNode::from)),
            ),
        ])
    }
}

#[derive(Debug, Error)]
#[error("value tree does not match the form shape: {0}")]
pub struct ShapeError(#[from] serde_json::Error);

impl TryFrom<&ValueNode> for FormValues {
    type Error = ShapeError;

    fn try_from(node: &ValueNode) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(Value::from(node))?)
    }
}
