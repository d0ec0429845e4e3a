mod options;
mod session;

pub use options::SessionOptions;
pub use session::{FormSession, SessionReport};
