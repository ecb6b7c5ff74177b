//! Red black tree index, keyed by `i64` with a `String` payload per
//! entry. Refer to [`Rbt`] for details.

mod depth;
mod error;
mod rbt;

pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::rbt::{Color, Iter, Node, Range, Rbt, Reverse, Stats};

#[cfg(test)]
mod depth_test;
