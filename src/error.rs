use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return. All of them are reported by [`Rbt::validate`] and
/// point to a broken tree, lookups and mutations never fail.
///
/// [`Rbt::validate`]: crate::Rbt::validate
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Fatal case, the shared sentinel node is not black.
    RedSentinel,
    /// Fatal case, root node is not black.
    RedRoot,
    /// Fatal case, red node, identified by its key, has a red child.
    ConsecutiveReds(i64),
    /// Fatal case, number of blacks differ under left and right child.
    /// The String component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order, (key, prev),
    /// where `key` was found after the larger key `prev`.
    SortError(i64, i64),
    /// Fatal case, parent link of node, identified by its key, does not
    /// point back to the node holding it.
    BrokenLink(i64),
    /// Fatal case, entry count (expected, found) does not match the
    /// number of nodes reachable from root.
    CountMismatch(usize, usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RedSentinel => write!(f, "sentinel is red"),
            Error::RedRoot => write!(f, "root is red"),
            Error::ConsecutiveReds(key) => write!(f, "consecutive reds at key {}", key),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(key, prev) => write!(f, "sort error, key {} after {}", key, prev),
            Error::BrokenLink(key) => write!(f, "broken parent link at key {}", key),
            Error::CountMismatch(expected, found) => {
                write!(f, "count mismatch, expected {} found {}", expected, found)
            }
        }
    }
}

impl error::Error for Error {}
