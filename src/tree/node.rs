use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::path::FieldPath;

/// Leaf of a value tree.
///
/// Value trees only carry text (or null for "no selection"); touched trees
/// carry flags. Both fit here so every tree of a form has the same type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::Text(text)
    }
}

impl From<bool> for Scalar {
    fn from(flag: bool) -> Self {
        Scalar::Bool(flag)
    }
}

impl From<Option<String>> for Scalar {
    fn from(text: Option<String>) -> Self {
        text.map(Scalar::Text).unwrap_or(Scalar::Null)
    }
}

/// A node of a form tree: a leaf, a repeated group or a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueNode {
    Scalar(Scalar),
    Sequence(Vec<ValueNode>),
    Record(IndexMap<String, ValueNode>),
}

impl Default for ValueNode {
    fn default() -> Self {
        ValueNode::Record(IndexMap::new())
    }
}

impl ValueNode {
    pub fn null() -> Self {
        ValueNode::Scalar(Scalar::Null)
    }

    pub fn text(text: impl Into<String>) -> Self {
        ValueNode::Scalar(Scalar::Text(text.into()))
    }

    pub fn flag(flag: bool) -> Self {
        ValueNode::Scalar(Scalar::Bool(flag))
    }

    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ValueNode)>,
    {
        ValueNode::Record(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn sequence(items: impl IntoIterator<Item = ValueNode>) -> Self {
        ValueNode::Sequence(items.into_iter().collect())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ValueNode::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_text)
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ValueNode::Scalar(Scalar::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ValueNode]> {
        match self {
            ValueNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&IndexMap<String, ValueNode>> {
        match self {
            ValueNode::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ValueNode::Scalar(_))
    }

    /// Every scalar leaf together with the path that reaches it, in
    /// document order. Empty groups and records contribute nothing.
    pub fn leaves(&self) -> Vec<(FieldPath, &Scalar)> {
        let mut acc = Vec::new();
        collect_leaves(self, FieldPath::root(), &mut acc);
        acc
    }

    /// Path of the first flag leaf, if any. Value trees hold text and nulls
    /// only; flags belong to touched trees.
    pub fn first_flag(&self) -> Option<FieldPath> {
        self.leaves()
            .into_iter()
            .find(|(_, scalar)| matches!(scalar, Scalar::Bool(_)))
            .map(|(path, _)| path)
    }

    /// Number of text leaves; used to count messages in an error tree.
    pub fn text_leaf_count(&self) -> usize {
        match self {
            ValueNode::Scalar(Scalar::Text(_)) => 1,
            ValueNode::Scalar(_) => 0,
            ValueNode::Sequence(items) => items.iter().map(ValueNode::text_leaf_count).sum(),
            ValueNode::Record(fields) => fields.values().map(ValueNode::text_leaf_count).sum(),
        }
    }
}

fn collect_leaves<'a>(
    node: &'a ValueNode,
    path: FieldPath,
    acc: &mut Vec<(FieldPath, &'a Scalar)>,
) {
    match node {
        ValueNode::Scalar(scalar) => {
            if !path.is_empty() {
                acc.push((path, scalar));
            }
        }
        ValueNode::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_leaves(item, path.index(index), acc);
            }
        }
        ValueNode::Record(fields) => {
            for (key, value) in fields {
                collect_leaves(value, path.child(key), acc);
            }
        }
    }
}

impl From<&ValueNode> for Value {
    fn from(node: &ValueNode) -> Self {
        match node {
            ValueNode::Scalar(Scalar::Null) => Value::Null,
            ValueNode::Scalar(Scalar::Bool(flag)) => Value::Bool(*flag),
            ValueNode::Scalar(Scalar::Text(text)) => Value::String(text.clone()),
            ValueNode::Sequence(items) => Value::Array(items.iter().map(Value::from).collect()),
            ValueNode::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl TryFrom<Value> for ValueNode {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}
