mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{load_data_model, load_values, parse_document_str};
pub use output::{OutputDestination, SubmissionWriter};
