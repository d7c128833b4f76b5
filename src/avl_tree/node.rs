use crate::avl_tree::tree::{self, Link};
use std::cmp;

/// A struct representing an internal node of an avl tree.
///
/// Nodes are exclusively owned by their parent, or by the tree if they are the root. The height
/// and balance are cached and recomputed by the tree whenever the children of a node change.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub(crate) key: T,
    pub(crate) height: usize,
    pub(crate) balance: i32,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(key: T) -> Self {
        Node {
            key,
            height: 1,
            balance: 0,
            left: None,
            right: None,
        }
    }

    // assumes the cached values of both children are correct
    pub(crate) fn update(&mut self) {
        let left_height = tree::height(&self.left);
        let right_height = tree::height(&self.right);
        self.height = cmp::max(left_height, right_height) + 1;
        self.balance = left_height as i32 - right_height as i32;
    }

    /// Returns the key stored in the node.
    pub fn key(&self) -> &T {
        &self.key
    }

    /// Returns the left child of the node, if any.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_ref().map(|node| &**node)
    }

    /// Returns the right child of the node, if any.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_ref().map(|node| &**node)
    }

    /// Returns the cached height of the subtree rooted at this node. A leaf has a height of 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cached balance factor of the node: the height of the left subtree minus the
    /// height of the right subtree.
    pub fn balance(&self) -> i32 {
        self.balance
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Computes the height of the subtree rooted at this node without using any cached values.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![3, 2, 1].into_iter().collect();
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.recomputed_height(), root.height());
    /// ```
    pub fn recomputed_height(&self) -> usize {
        let left = self.left().map_or(0, Node::recomputed_height);
        let right = self.right().map_or(0, Node::recomputed_height);
        cmp::max(left, right) + 1
    }

    /// Computes the balance factor of the node without using any cached values.
    pub fn recomputed_balance(&self) -> i32 {
        let left = self.left().map_or(0, Node::recomputed_height);
        let right = self.right().map_or(0, Node::recomputed_height);
        left as i32 - right as i32
    }
}
