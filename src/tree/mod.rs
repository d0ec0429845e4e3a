//! Value trees addressed by string paths.
//!
//! A form keeps three trees of the same shape: its values, its validation
//! messages and its touched flags. All three are [`ValueNode`]s and share the
//! [`FieldPath`] grammar, so one path can be probed against each of them.

mod edit;
mod node;
mod path;
mod resolve;

pub use edit::{append, append_in_place, remove_at, remove_in_place, set, set_in_place};
pub use node::{Scalar, ValueNode};
pub use path::{FieldPath, PathError};
pub(crate) use path::index_of;
pub use resolve::{resolve, resolve_mut, resolve_str};
