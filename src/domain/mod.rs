mod data_model;
mod groups;
pub mod paths;
mod records;

pub use data_model::{DataModel, JOB_TYPES, OptionItem, OptionSet, TYPE_OPTIONS};
pub use groups::GroupKind;
pub use records::{FormValues, SchemaListEntry, SecondLevelEntry, ShapeError, ThirdLevelEntry};
