//! A height-balanced binary search tree and a set built on top of it.
//!
//! `AvlTree<T>` keeps duplicate keys, supports the six depth-first traversal orders, template
//! driven rendering, threading, subtree extraction and structural matching. `AvlSet<T>` reuses the
//! tree to provide set algebra.

#[macro_use]
extern crate log;
extern crate serde;

pub mod avl_tree;
