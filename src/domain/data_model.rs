use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const TYPE_OPTIONS: &str = "typeOptions";
pub const JOB_TYPES: &str = "jobTypes";

/// One selectable entry of a closed-choice field. A `None` name stands for
/// "no selection".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub name: Option<String>,
    pub label: String,
}

impl OptionItem {
    pub fn new(name: Option<&str>, label: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    items: Vec<OptionItem>,
}

impl OptionSet {
    pub fn new(items: Vec<OptionItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    /// Option whose name equals `name`. A null name never matches, even
    /// though the set usually carries a null "no selection" entry.
    pub fn find_by_name(&self, name: Option<&str>) -> Option<&OptionItem> {
        let name = name?;
        self.items
            .iter()
            .find(|item| item.name.as_deref() == Some(name))
    }

    pub fn find_by_label(&self, label: &str) -> Option<&OptionItem> {
        self.items.iter().find(|item| item.label == label)
    }

    /// Names a stored value may take.
    pub fn names(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.name.as_deref())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Named option sets for every closed-choice field. Loaded once and shared
/// read-only by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataModel {
    sets: IndexMap<String, OptionSet>,
}

impl DataModel {
    pub fn empty() -> Self {
        Self {
            sets: IndexMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let type_options = OptionSet::new(vec![
            OptionItem::new(None, ""),
            OptionItem::new(Some("date"), "date"),
            OptionItem::new(Some("string"), "string"),
            OptionItem::new(Some("number"), "number"),
        ]);
        let job_types = OptionSet::new(vec![
            OptionItem::new(None, ""),
            OptionItem::new(
                Some("summarizedByDateAggregation"),
                "summarizedByDateAggregation",
            ),
            OptionItem::new(Some("dataGrid"), "dataGrid"),
            OptionItem::new(Some("gaCategories"), "gaCategories"),
        ]);
        Self::empty()
            .with_set(TYPE_OPTIONS, type_options)
            .with_set(JOB_TYPES, job_types)
    }

    pub fn with_set(mut self, name: impl Into<String>, set: OptionSet) -> Self {
        self.sets.insert(name.into(), set);
        self
    }

    /// Overlay `other` on top of `self`; sets present in both are replaced.
    pub fn merged(mut self, other: DataModel) -> Self {
        self.sets.extend(other.sets);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionSet> {
        self.sets.get(name)
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

impl Default for DataModel {
    fn default() -> Self {
        Self::builtin()
    }
}
