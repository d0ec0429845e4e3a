//! Typed builders for the paths of the fixed form shape.
//!
//! Field names are spelled once, here; callers only supply indices.
//!
//! ```
//! use nestform::domain::paths;
//!
//! let path = paths::schema_entry(0).second(1).third(2).name();
//! assert_eq!(path.to_string(), "schemaList[0].secondLevel[1].thirdLevel[2].name");
//! ```

use crate::tree::FieldPath;

pub const TABLE_CONFIG: &str = "tableConfig";
pub const SCHEMA_LIST: &str = "schemaList";
pub const JOB_TYPES: &str = "jobTypes";
pub const CONFIG: &str = "config";
pub const SECOND_LEVEL: &str = "secondLevel";
pub const THIRD_LEVEL: &str = "thirdLevel";
pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const RANDOM: &str = "random";

pub fn table_config() -> FieldPath {
    FieldPath::root().child(TABLE_CONFIG)
}

pub fn schema_list() -> FieldPath {
    FieldPath::root().child(SCHEMA_LIST)
}

pub fn schema_entry(index: usize) -> SchemaEntryPath {
    SchemaEntryPath(schema_list().index(index))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntryPath(FieldPath);

impl SchemaEntryPath {
    pub fn path(&self) -> &FieldPath {
        &self.0
    }

    pub fn job_types(&self) -> FieldPath {
        self.0.child(JOB_TYPES)
    }

    pub fn config(&self) -> FieldPath {
        self.0.child(CONFIG)
    }

    pub fn second_level(&self) -> FieldPath {
        self.0.child(SECOND_LEVEL)
    }

    pub fn second(&self, index: usize) -> SecondLevelPath {
        SecondLevelPath(self.second_level().index(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondLevelPath(FieldPath);

impl SecondLevelPath {
    pub fn path(&self) -> &FieldPath {
        &self.0
    }

    pub fn name(&self) -> FieldPath {
        self.0.child(NAME)
    }

    pub fn kind(&self) -> FieldPath {
        self.0.child(TYPE)
    }

    pub fn third_level(&self) -> FieldPath {
        self.0.child(THIRD_LEVEL)
    }

    pub fn third(&self, index: usize) -> ThirdLevelPath {
        ThirdLevelPath(self.third_level().index(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdLevelPath(FieldPath);

impl ThirdLevelPath {
    pub fn path(&self) -> &FieldPath {
        &self.0
    }

    pub fn name(&self) -> FieldPath {
        self.0.child(NAME)
    }

    pub fn random(&self) -> FieldPath {
        self.0.child(RANDOM)
    }
}

/// Option set backing the closed-choice field at `path`, if it is one.
pub fn choice_set(path: &FieldPath) -> Option<&'static str> {
    match path.last()? {
        JOB_TYPES => Some(super::JOB_TYPES),
        TYPE | RANDOM => Some(super::TYPE_OPTIONS),
        _ => None,
    }
}
