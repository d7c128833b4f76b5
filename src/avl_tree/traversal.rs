use crate::avl_tree::node::Node;
use crate::avl_tree::tree::Link;
use crate::avl_tree::{Error, Result};
use std::fmt::{self, Display, Write};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Step {
    Node,
    Left,
    Right,
}

/// The six depth-first traversal orders over a node (`N`), its left subtree (`L`) and its right
/// subtree (`R`).
///
/// An `Order` can be parsed from any permutation of the three letters.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::Order;
///
/// assert_eq!("LNR".parse::<Order>().unwrap(), Order::Lnr);
/// assert!("LLR".parse::<Order>().is_err());
/// assert_eq!(Order::Rnl.to_string(), "RNL");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Node, left, right (pre-order).
    Nlr,
    /// Node, right, left.
    Nrl,
    /// Left, right, node (post-order).
    Lrn,
    /// Left, node, right (in-order).
    Lnr,
    /// Right, left, node.
    Rln,
    /// Right, node, left (reverse in-order).
    Rnl,
}

impl Order {
    fn steps(self) -> [Step; 3] {
        match self {
            Order::Nlr => [Step::Node, Step::Left, Step::Right],
            Order::Nrl => [Step::Node, Step::Right, Step::Left],
            Order::Lrn => [Step::Left, Step::Right, Step::Node],
            Order::Lnr => [Step::Left, Step::Node, Step::Right],
            Order::Rln => [Step::Right, Step::Left, Step::Node],
            Order::Rnl => [Step::Right, Step::Node, Step::Left],
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::Nlr
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NLR" => Ok(Order::Nlr),
            "NRL" => Ok(Order::Nrl),
            "LRN" => Ok(Order::Lrn),
            "LNR" => Ok(Order::Lnr),
            "RLN" => Ok(Order::Rln),
            "RNL" => Ok(Order::Rnl),
            _ => Err(Error::InvalidOrder(s.to_string())),
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for step in &self.steps() {
            let c = match step {
                Step::Node => 'N',
                Step::Left => 'L',
                Step::Right => 'R',
            };
            f.write_char(c)?;
        }
        Ok(())
    }
}

pub fn traverse<'a, T, F>(tree: &'a Link<T>, order: Order, f: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(ref node) = tree {
        for step in &order.steps() {
            match step {
                Step::Node => f(&**node),
                Step::Left => traverse(&node.left, order, f),
                Step::Right => traverse(&node.right, order, f),
            }
        }
    }
}

pub fn join<T>(tree: &Link<T>, order: Order) -> String
where
    T: Display,
{
    let mut ret = String::new();
    traverse(tree, order, &mut |node| {
        if !ret.is_empty() {
            ret.push(' ');
        }
        // writing into a `String` cannot fail
        let _ = write!(ret, "{}", node.key);
    });
    ret
}

// A leaf is always rendered as its bare key. Otherwise `N` renders the key, `L` and `R` render
// the matching child if it exists, and every other character is copied verbatim.
pub fn render<T>(node: &Node<T>, template: &str, out: &mut String)
where
    T: Display,
{
    if node.is_leaf() {
        let _ = write!(out, "{}", node.key);
        return;
    }

    for c in template.chars() {
        match c {
            'N' => {
                let _ = write!(out, "{}", node.key);
            },
            'L' => {
                if let Some(left) = node.left() {
                    render(left, template, out);
                }
            },
            'R' => {
                if let Some(right) = node.right() {
                    render(right, template, out);
                }
            },
            c => out.push(c),
        }
    }
}

/// An iterator over the keys of an `AvlTree<T>` in pre-order (node, left, right).
pub struct Iter<'a, T>
where
    T: 'a,
{
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Link<T>) -> Self {
        Iter {
            stack: tree.iter().map(|node| &**node).collect(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        Some(&node.key)
    }
}

/// An owning iterator over the keys of an `AvlTree<T>` in pre-order (node, left, right).
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: Link<T>) -> Self {
        IntoIter {
            stack: tree.into_iter().collect(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { key, left, right, .. } = *node;
        self.stack.extend(right);
        self.stack.extend(left);
        Some(key)
    }
}

/// An iterator over the keys of an `AvlTree<T>` in sorted order.
pub struct SortedIter<'a, T>
where
    T: 'a,
{
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> SortedIter<'a, T> {
    pub(crate) fn new(tree: &'a Link<T>) -> Self {
        let mut ret = SortedIter { stack: Vec::new() };
        ret.push_left_spine(tree.as_ref().map(|node| &**node));
        ret
    }

    fn push_left_spine(&mut self, mut curr: Option<&'a Node<T>>) {
        while let Some(node) = curr {
            self.stack.push(node);
            curr = node.left();
        }
    }
}

impl<'a, T> Iterator for SortedIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.key)
    }
}

/// A chain linking the nodes of an `AvlTree<T>` in a particular traversal order.
///
/// A thread borrows the tree it was built from, so the tree cannot be modified while the thread
/// is alive. Building another thread over the same tree leaves existing threads intact.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::{AvlTree, Order};
///
/// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
///
/// let thread = tree.thread();
/// let first = thread.first().unwrap();
/// assert_eq!(first.key(), &8);
/// assert_eq!(first.next().map(|link| *link.key()), Some(3));
///
/// let thread = tree.thread_in(Order::Lnr);
/// assert_eq!(thread.iter().collect::<Vec<&u32>>(), vec![&3, &8, &10]);
/// ```
pub struct Thread<'a, T>
where
    T: 'a,
{
    order: Order,
    nodes: Vec<&'a Node<T>>,
}

impl<'a, T> Thread<'a, T> {
    pub(crate) fn new(tree: &'a Link<T>, order: Order) -> Self {
        let mut nodes = Vec::new();
        traverse(tree, order, &mut |node| nodes.push(node));
        Thread { order, nodes }
    }

    /// Returns the order in which the nodes were threaded.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Returns the first link of the thread, or `None` if the tree was empty.
    pub fn first(&self) -> Option<ThreadLink<'_, 'a, T>> {
        self.link(0)
    }

    /// Returns the number of nodes in the thread.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the thread contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the threaded nodes as a slice.
    pub fn nodes(&self) -> &[&'a Node<T>] {
        &self.nodes
    }

    /// Returns an iterator over the keys of the thread in threading order.
    pub fn iter<'b>(&'b self) -> impl Iterator<Item = &'a T> + 'b {
        self.nodes.iter().map(|node| &node.key)
    }

    fn link(&self, index: usize) -> Option<ThreadLink<'_, 'a, T>> {
        if index < self.nodes.len() {
            Some(ThreadLink { nodes: &self.nodes, index })
        } else {
            None
        }
    }
}

/// A cursor pointing at a single node of a `Thread`.
pub struct ThreadLink<'t, 'a, T>
where
    T: 'a,
{
    nodes: &'t [&'a Node<T>],
    index: usize,
}

impl<'t, 'a, T> ThreadLink<'t, 'a, T> {
    /// Returns the node this link points at.
    pub fn node(&self) -> &'a Node<T> {
        self.nodes[self.index]
    }

    /// Returns the key of the node this link points at.
    pub fn key(&self) -> &'a T {
        &self.nodes[self.index].key
    }

    /// Returns the link to the next node of the thread, or `None` at the end of the thread.
    pub fn next(&self) -> Option<ThreadLink<'t, 'a, T>> {
        let index = self.index + 1;
        if index < self.nodes.len() {
            Some(ThreadLink { nodes: self.nodes, index })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl_tree::tree;

    fn build(keys: &[u32]) -> Link<u32> {
        let mut ret = None;
        for key in keys {
            tree::insert(&mut ret, *key);
        }
        ret
    }

    #[test]
    fn test_order_parse() {
        for s in &["NLR", "NRL", "LRN", "LNR", "RLN", "RNL"] {
            let order: Order = s.parse().unwrap();
            assert_eq!(order.to_string(), *s);
        }
        assert!("NL".parse::<Order>().is_err());
        assert!("NNL".parse::<Order>().is_err());
        assert!("nlr".parse::<Order>().is_err());
    }

    #[test]
    fn test_join_all_orders() {
        let tree = build(&[8, 3, 10]);
        assert_eq!(join(&tree, Order::Nlr), "8 3 10");
        assert_eq!(join(&tree, Order::Nrl), "8 10 3");
        assert_eq!(join(&tree, Order::Lrn), "3 10 8");
        assert_eq!(join(&tree, Order::Lnr), "3 8 10");
        assert_eq!(join(&tree, Order::Rln), "10 3 8");
        assert_eq!(join(&tree, Order::Rnl), "10 8 3");
    }

    #[test]
    fn test_join_empty() {
        let tree: Link<u32> = None;
        assert_eq!(join(&tree, Order::Nlr), "");
    }

    #[test]
    fn test_render() {
        let tree = build(&[8, 3, 10]);
        let mut out = String::new();
        render(tree.as_ref().unwrap(), "(N)[L]{R}", &mut out);
        assert_eq!(out, "(8)[3]{10}");

        let tree = build(&[8, 3, 10, 1]);
        let mut out = String::new();
        render(tree.as_ref().unwrap(), "L N R", &mut out);
        assert_eq!(out, "1 3  8 10");
    }

    #[test]
    fn test_iterators() {
        let tree = build(&[8, 3, 10, 1, 6, 4, 7, 14, 13]);
        assert_eq!(
            Iter::new(&tree).cloned().collect::<Vec<u32>>(),
            vec![6, 3, 1, 4, 8, 7, 13, 10, 14],
        );
        assert_eq!(
            SortedIter::new(&tree).cloned().collect::<Vec<u32>>(),
            vec![1, 3, 4, 6, 7, 8, 10, 13, 14],
        );
        assert_eq!(
            IntoIter::new(tree).collect::<Vec<u32>>(),
            vec![6, 3, 1, 4, 8, 7, 13, 10, 14],
        );
    }

    #[test]
    fn test_thread_links() {
        let tree = build(&[8, 3, 10]);
        let nlr = Thread::new(&tree, Order::Nlr);
        let lnr = Thread::new(&tree, Order::Lnr);

        let first = nlr.first().unwrap();
        assert_eq!(*first.key(), 8);
        let second = first.next().unwrap();
        assert_eq!(*second.key(), 3);
        let third = second.next().unwrap();
        assert_eq!(*third.key(), 10);
        assert!(third.next().is_none());

        assert_eq!(lnr.iter().cloned().collect::<Vec<u32>>(), vec![3, 8, 10]);
        assert_eq!(nlr.iter().cloned().collect::<Vec<u32>>(), vec![8, 3, 10]);
        assert_eq!(lnr.order(), Order::Lnr);
    }

    #[test]
    fn test_thread_empty() {
        let tree: Link<u32> = None;
        let thread = Thread::new(&tree, Order::Nlr);
        assert!(thread.first().is_none());
        assert!(thread.is_empty());
    }
}
