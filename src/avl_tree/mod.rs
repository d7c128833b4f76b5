//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod avl;
mod node;
mod set;
mod traversal;
mod tree;

pub use self::avl::AvlTree;
pub use self::node::Node;
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
pub use self::traversal::{IntoIter, Iter, Order, SortedIter, Thread, ThreadLink};

use std::error;
use std::fmt;
use std::result;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The operation requires at least one key.
    EmptyTree,
    /// The traversal order is not a permutation of `N`, `L` and `R`.
    InvalidOrder(String),
    /// A key could not be parsed from a string.
    InvalidKey(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyTree => write!(f, "empty tree"),
            Error::InvalidOrder(order) => write!(f, "invalid traversal order: {:?}", order),
            Error::InvalidKey(token) => write!(f, "invalid key: {:?}", token),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
