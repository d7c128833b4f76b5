use crate::avl_tree::node::Node;
use crate::avl_tree::traversal::{self, IntoIter, Iter, Order, SortedIter, Thread};
use crate::avl_tree::tree::{self, Link};
use crate::avl_tree::{Error, Result};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::result;

/// An ordered multiset implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Keys equal to an existing key
/// are inserted into its left subtree, so duplicate keys are kept.
///
/// Iterating over the tree yields keys in pre-order (node, left, right). Use `iter_sorted` or
/// `to_lnr` for keys in sorted order.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(8);
/// tree.insert(3);
/// tree.insert(10);
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.to_nlr(), "8 3 10");
/// assert_eq!(tree.to_lnr(), "3 8 10");
///
/// assert_eq!(tree.min(), Ok(&3));
/// assert_eq!(tree.remove(&3), Some(3));
/// assert_eq!(tree.remove(&3), None);
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> AvlTree<T> {
    /// Constructs a new, empty `AvlTree<T>`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// ```
    pub fn new() -> Self {
        AvlTree { root: None, len: 0 }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        tree::height(&self.root)
    }

    /// Counts the nodes of the tree by visiting every node. This is always equal to `len`.
    pub fn count_nodes(&self) -> usize {
        tree::count(&self.root)
    }

    /// Clears the tree, removing all keys.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the root node of the tree, or `None` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![3, 2, 1].into_iter().collect();
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.balance(), 0);
    /// ```
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref().map(|node| &**node)
    }

    /// Visits every node of the tree in a particular order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, Order};
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
    /// let mut heights = Vec::new();
    /// tree.traverse(Order::Lrn, |node| heights.push(node.height()));
    /// assert_eq!(heights, vec![1, 1, 2]);
    /// ```
    pub fn traverse<'a, F>(&'a self, order: Order, mut f: F)
    where
        F: FnMut(&'a Node<T>),
    {
        traversal::traverse(&self.root, order, &mut f);
    }

    /// Returns an iterator over the tree. The iterator will yield keys using pre-order traversal
    /// (node, left, right).
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&8, &3, &10]);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter::new(&self.root)
    }

    /// Returns an iterator over the tree that yields keys in sorted order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
    /// assert_eq!(tree.iter_sorted().collect::<Vec<&u32>>(), vec![&3, &8, &10]);
    /// ```
    pub fn iter_sorted(&self) -> SortedIter<T> {
        SortedIter::new(&self.root)
    }

    /// Threads the nodes of the tree in pre-order (node, left, right).
    pub fn thread(&self) -> Thread<T> {
        self.thread_in(Order::Nlr)
    }

    /// Threads the nodes of the tree in a particular order.
    pub fn thread_in(&self, order: Order) -> Thread<T> {
        Thread::new(&self.root, order)
    }

    /// Threads the nodes of the tree in the order described by a three letter string such as
    /// `"LNR"`. Only the six permutations of `N`, `L` and `R` are accepted. A string with a
    /// repeated letter such as `"NNR"` would thread a node more than once, so it is rejected with
    /// `Error::InvalidOrder` along with every string that is not three letters long.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
    /// let thread = tree.thread_str("RNL").unwrap();
    /// assert_eq!(thread.iter().collect::<Vec<&u32>>(), vec![&10, &8, &3]);
    /// assert!(tree.thread_str("NLRN").is_err());
    /// assert!(tree.thread_str("NNR").is_err());
    /// ```
    pub fn thread_str(&self, order: &str) -> Result<Thread<T>> {
        Ok(self.thread_in(order.parse()?))
    }

    /// Folds every key of the tree into a single value.
    ///
    /// At a node the key is combined with the folded left subtree and the result is combined
    /// with the folded right subtree. The order in which keys are combined depends on the shape of
    /// the tree, so `f` should be associative and commutative. Returns `Error::EmptyTree` if the
    /// tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, Error};
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
    /// assert_eq!(tree.reduce(|a, b| a + b), Ok(21));
    ///
    /// let empty: AvlTree<u32> = AvlTree::new();
    /// assert_eq!(empty.reduce(|a, b| a + b), Err(Error::EmptyTree));
    /// ```
    pub fn reduce<F>(&self, mut f: F) -> Result<T>
    where
        T: Clone,
        F: FnMut(T, T) -> T,
    {
        match self.root {
            Some(ref node) => Ok(tree::reduce(node, &mut f)),
            None => Err(Error::EmptyTree),
        }
    }

    /// Returns the keys joined by spaces in a particular traversal order.
    pub fn to_string_in(&self, order: Order) -> String
    where
        T: Display,
    {
        traversal::join(&self.root, order)
    }

    /// Returns the keys joined by spaces in pre-order (node, left, right).
    pub fn to_nlr(&self) -> String
    where
        T: Display,
    {
        self.to_string_in(Order::Nlr)
    }

    /// Returns the keys joined by spaces in node, right, left order.
    pub fn to_nrl(&self) -> String
    where
        T: Display,
    {
        self.to_string_in(Order::Nrl)
    }

    /// Returns the keys joined by spaces in post-order (left, right, node).
    pub fn to_lrn(&self) -> String
    where
        T: Display,
    {
        self.to_string_in(Order::Lrn)
    }

    /// Returns the keys joined by spaces in-order (left, node, right), which is sorted order.
    pub fn to_lnr(&self) -> String
    where
        T: Display,
    {
        self.to_string_in(Order::Lnr)
    }

    /// Returns the keys joined by spaces in right, left, node order.
    pub fn to_rln(&self) -> String
    where
        T: Display,
    {
        self.to_string_in(Order::Rln)
    }

    /// Returns the keys joined by spaces in reverse in-order (right, node, left).
    pub fn to_rnl(&self) -> String
    where
        T: Display,
    {
        self.to_string_in(Order::Rnl)
    }

    /// Renders the tree using a template that is replayed at every inner node. In the template,
    /// `N` is replaced by the key of the node, `L` and `R` are replaced by the rendering of the
    /// left and right subtrees and every other character is copied as is. Leaves are rendered as
    /// their bare key. Leading and trailing whitespace is trimmed from the result.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10].into_iter().collect();
    /// assert_eq!(tree.to_string_with("N-L+R"), "8-3+10");
    /// assert_eq!(tree.to_string_with("(N)[L]{R}"), "(8)[3]{10}");
    /// ```
    pub fn to_string_with(&self, template: &str) -> String
    where
        T: Display,
    {
        let mut ret = String::new();
        if let Some(root) = self.root() {
            traversal::render(root, template, &mut ret);
        }
        ret.trim().to_string()
    }

    /// Returns `true` if both trees have the same shape and the same key at every position.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let a: AvlTree<u32> = vec![1, 2, 3].into_iter().collect();
    /// let b: AvlTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// let c: AvlTree<u32> = vec![1, 2, 3, 4].into_iter().collect();
    /// assert!(a.matches(&b));
    /// assert!(!a.matches(&c));
    /// ```
    pub fn matches(&self, other: &AvlTree<T>) -> bool
    where
        T: PartialEq,
    {
        tree::matches(self.root(), other.root())
    }
}

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Inserts a key into the tree. Keys that are already in the tree are inserted again.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.to_nlr(), "1 1");
    /// ```
    pub fn insert(&mut self, key: T) {
        tree::insert(&mut self.root, key);
        self.len += 1;
        self.after_mutation();
    }

    /// Removes a key from the tree. If the key exists in the tree, it will return the removed
    /// key. Otherwise it will return `None` and the tree is left unchanged.
    ///
    /// If the node holding the key has two children, the key is replaced by a copy of the
    /// smallest key of its right subtree and that key is then removed from the right subtree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree: AvlTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.to_nlr(), "3 1");
    /// assert_eq!(tree.remove(&2), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T>
    where
        T: Clone,
    {
        let ret = tree::remove(&mut self.root, key);
        if ret.is_some() {
            self.len -= 1;
        }
        self.after_mutation();
        ret
    }

    /// Checks if a key exists in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::find(&self.root, key).is_some()
    }

    /// Returns the node holding a particular key, or `None` if the key does not exist.
    pub fn find(&self, key: &T) -> Option<&Node<T>> {
        tree::find(&self.root, key)
    }

    /// Returns the minimum key of the tree. Returns `Error::EmptyTree` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, Error};
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.min(), Err(Error::EmptyTree));
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        tree::min(&self.root).ok_or(Error::EmptyTree)
    }

    /// Returns the maximum key of the tree. Returns `Error::EmptyTree` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        tree::max(&self.root).ok_or(Error::EmptyTree)
    }

    /// Returns a deep copy of the subtree rooted at the node holding a particular key, or `None`
    /// if the key does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10, 1, 6, 4, 7, 14, 13].into_iter().collect();
    /// let sub_tree = tree.sub_tree(&13).unwrap();
    /// assert_eq!(sub_tree.to_nlr(), "13 10 14");
    /// assert_eq!(sub_tree.len(), 3);
    /// assert!(tree.sub_tree(&5).is_none());
    /// ```
    pub fn sub_tree(&self, key: &T) -> Option<AvlTree<T>>
    where
        T: Clone,
    {
        tree::find(&self.root, key).map(|node| {
            let root = Some(Box::new(node.clone()));
            let len = tree::count(&root);
            debug!("extracted sub tree with {} of {} nodes", len, self.len);
            AvlTree { root, len }
        })
    }

    /// Returns `true` if the root key of `candidate` exists in the tree and the subtree rooted
    /// at that key matches `candidate`. Returns `false` if `candidate` is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![8, 3, 10, 1, 6, 4, 7, 14, 13].into_iter().collect();
    /// let candidate: AvlTree<u32> = vec![14, 10, 13].into_iter().collect();
    /// assert!(tree.contains_subtree(&candidate));
    /// assert!(!tree.contains_subtree(&AvlTree::new()));
    /// ```
    pub fn contains_subtree(&self, candidate: &AvlTree<T>) -> bool {
        match candidate.root() {
            Some(root) => match tree::find(&self.root, &root.key) {
                Some(node) => tree::matches(Some(node), Some(root)),
                None => false,
            },
            None => false,
        }
    }

    /// Returns a new tree containing the result of `f` for every key. The keys are visited in
    /// pre-order and the results are inserted one by one, so `f` does not need to preserve order
    /// and duplicate results are kept.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = vec![8, 3, 10].into_iter().collect();
    /// assert_eq!(tree.map(|key| key * key).to_lnr(), "9 64 100");
    /// assert_eq!(tree.map(|key| key % 2).to_lnr(), "0 0 1");
    /// ```
    pub fn map<U, F>(&self, mut f: F) -> AvlTree<U>
    where
        U: Ord,
        F: FnMut(&T) -> U,
    {
        self.iter().map(|key| f(key)).collect()
    }

    /// Returns a new tree containing the keys for which `predicate` returns `true`. The keys are
    /// inserted in pre-order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = vec![8, 3, 10].into_iter().collect();
    /// assert_eq!(tree.filter(|key| key % 2 == 0).to_lnr(), "8 10");
    /// assert!(tree.filter(|_| true).matches(&tree));
    /// ```
    pub fn filter<P>(&self, mut predicate: P) -> AvlTree<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|key| predicate(*key)).cloned().collect()
    }

    /// Checks the structure of the tree.
    ///
    /// # Panics
    ///
    /// Panics if a cached height or balance factor is stale, if a node is out of balance, if the
    /// keys are out of order, or if `len` differs from the number of nodes.
    pub fn check_consistency(&self) {
        let node_count = tree::check_consistency(&self.root);
        assert_eq!(node_count, self.len, "stale length");
        debug!("checked tree with {} nodes", node_count);
    }

    fn after_mutation(&self) {
        if cfg!(feature = "consistency_check") {
            self.check_consistency();
        }
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root)
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for AvlTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for AvlTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &AvlTree<T>) -> bool {
        self.matches(other)
    }
}

impl<T> Eq for AvlTree<T> where T: Eq {}

impl<T> Debug for AvlTree<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Serialize for AvlTree<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for key in self {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for AvlTree<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlTreeVisitor { marker: PhantomData })
    }
}

struct AvlTreeVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for AvlTreeVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = AvlTree<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut tree = AvlTree::new();
        while let Some(key) = seq.next_element()? {
            tree.insert(key);
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::AvlTree;
    use crate::avl_tree::{Error, Order};
    use serde_test::{assert_tokens, Token};

    fn wiki_tree() -> AvlTree<i32> {
        vec![8, 3, 10, 1, 6, 4, 7, 14, 13].into_iter().collect()
    }

    #[test]
    fn test_len_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_is_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.min(), Err(Error::EmptyTree));
        assert_eq!(tree.max(), Err(Error::EmptyTree));
    }

    #[test]
    fn test_small_tree() {
        let mut tree = AvlTree::new();
        tree.insert(8);
        assert_eq!(tree.to_lnr(), "8");
        assert_eq!(tree.to_string_with("N L R"), "8");
        assert_eq!(tree.reduce(|a, b| a + b), Ok(8));

        tree.insert(3);
        assert_eq!(tree.to_lnr(), "3 8");
        assert_eq!(tree.to_string_with("L N R"), "3 8");
        assert_eq!(tree.reduce(|a, b| a + b), Ok(11));

        tree.insert(10);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.to_nlr(), "8 3 10");
        assert_eq!(tree.to_string_with("N L R"), "8 3 10");
        assert_eq!(tree.to_nrl(), "8 10 3");
        assert_eq!(tree.to_string_with("N R L"), "8 10 3");
        assert_eq!(tree.to_lrn(), "3 10 8");
        assert_eq!(tree.to_lnr(), "3 8 10");
        assert_eq!(tree.to_rln(), "10 3 8");
        assert_eq!(tree.to_rnl(), "10 8 3");

        tree.insert(1);
        assert_eq!(tree.to_lnr(), "1 3 8 10");
        assert_eq!(tree.to_string_with("L N R"), "1 3  8 10");
        assert_eq!(tree.iter().cloned().collect::<Vec<i32>>(), vec![8, 3, 1, 10]);
    }

    #[test]
    fn test_wiki_tree() {
        let tree = wiki_tree();
        assert_eq!(tree.to_lnr(), "1 3 4 6 7 8 10 13 14");
        assert_eq!(tree.to_nlr(), "6 3 1 4 8 7 13 10 14");
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.count_nodes(), 9);
        tree.check_consistency();
    }

    #[test]
    fn test_sub_tree_and_match() {
        let tree = wiki_tree();
        let sub_tree = tree.sub_tree(&13).unwrap();
        assert_eq!(sub_tree.to_nlr(), "13 10 14");
        sub_tree.check_consistency();

        let mut other = AvlTree::new();
        other.insert(14);
        assert!(!sub_tree.matches(&other));
        other.insert(10);
        other.insert(13);
        assert_eq!(other.to_nlr(), "13 10 14");
        assert!(sub_tree.matches(&other));
        assert_eq!(sub_tree, other);

        assert!(tree.contains_subtree(&sub_tree));
        assert!(tree.contains_subtree(&other));
    }

    #[test]
    fn test_sub_tree_is_independent() {
        let mut tree = wiki_tree();
        let sub_tree = tree.sub_tree(&13).unwrap();
        tree.remove(&13);
        tree.remove(&14);
        assert_eq!(sub_tree.to_nlr(), "13 10 14");
        assert!(!tree.contains_subtree(&sub_tree));
    }

    #[test]
    fn test_contains_subtree_mismatch() {
        let tree = wiki_tree();
        let candidate: AvlTree<i32> = vec![3, 1].into_iter().collect();
        assert!(!tree.contains_subtree(&candidate));
        let candidate: AvlTree<i32> = vec![5].into_iter().collect();
        assert!(!tree.contains_subtree(&candidate));
        let candidate: AvlTree<i32> = vec![14].into_iter().collect();
        assert!(tree.contains_subtree(&candidate));
    }

    #[test]
    fn test_right_rotation() {
        let tree: AvlTree<i32> = vec![3, 2, 1].into_iter().collect();
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 2);
        assert_eq!(root.recomputed_height(), 2);
        assert_eq!(root.recomputed_balance(), 0);

        let thread = tree.thread();
        let keys: Vec<i32> = thread.nodes().iter().map(|node| *node.key()).collect();
        assert_eq!(keys, vec![2, 1, 3]);
    }

    #[test]
    fn test_insert_keeps_balance() {
        let mut tree: AvlTree<i32> = vec![3, 2, 1].into_iter().collect();
        tree.insert(0);
        tree.check_consistency();
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.root().unwrap().balance(), 1);

        tree.insert(4);
        tree.check_consistency();
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.root().unwrap().balance(), 0);
    }

    #[test]
    fn test_thread_orders() {
        let tree: AvlTree<i32> = vec![8, 3, 10].into_iter().collect();
        let nlr = tree.thread();
        let lnr = tree.thread_str("LNR").unwrap();
        assert_eq!(nlr.iter().cloned().collect::<Vec<i32>>(), vec![8, 3, 10]);
        assert_eq!(lnr.iter().cloned().collect::<Vec<i32>>(), vec![3, 8, 10]);
        assert_eq!(tree.thread_str("LN").err(), Some(Error::InvalidOrder(String::from("LN"))));
        assert_eq!(tree.thread_str("NNR").err(), Some(Error::InvalidOrder(String::from("NNR"))));
    }

    #[test]
    fn test_remove_duplicate_successor() {
        let mut tree: AvlTree<i32> = vec![2, 1, 5, 5, 7].into_iter().collect();
        assert_eq!(tree.to_nlr(), "2 1 5 5 7");

        assert_eq!(tree.remove(&2), Some(2));
        assert_eq!(tree.to_nlr(), "5 1 7 5");
        assert_eq!(tree.len(), 4);
        tree.check_consistency();

        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(tree.to_lnr(), "1 5 7");
        tree.check_consistency();
    }

    #[test]
    fn test_thread_matches_in_order_string() {
        let tree = wiki_tree();
        let thread = tree.thread_in(Order::Lnr);
        let joined = thread.iter().map(|key| key.to_string()).collect::<Vec<String>>().join(" ");
        assert_eq!(joined, tree.to_lnr());
    }

    #[test]
    fn test_map_filter_reduce() {
        let tree: AvlTree<i32> = vec![8, 3, 10].into_iter().collect();
        assert_eq!(tree.map(|key| key * key).to_lnr(), "9 64 100");
        assert!(tree.map(|key| *key).matches(&tree));
        assert_eq!(tree.filter(|key| key % 2 == 0).to_lnr(), "8 10");
        assert!(tree.filter(|_| true).matches(&tree));
        assert!(tree.filter(|_| false).is_empty());
        assert_eq!(tree.reduce(|a, b| a + b), Ok(21));
        assert_eq!(tree.map(|_| 1).len(), 3);
    }

    #[test]
    fn test_reduce_single() {
        let tree: AvlTree<i32> = vec![42].into_iter().collect();
        assert_eq!(tree.reduce(|a, b| a * b), Ok(42));
    }

    #[test]
    fn test_to_string_with_empty() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.to_string_with("N-L+R"), "");
        assert_eq!(tree.to_nlr(), "");
    }

    #[test]
    fn test_clear() {
        let mut tree = wiki_tree();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.count_nodes(), 0);
    }

    #[test]
    fn test_into_iter() {
        let tree = wiki_tree();
        assert_eq!(
            tree.into_iter().collect::<Vec<i32>>(),
            vec![6, 3, 1, 4, 8, 7, 13, 10, 14],
        );
    }

    #[test]
    fn test_serde() {
        let tree: AvlTree<i32> = vec![8, 3, 10].into_iter().collect();
        assert_tokens(
            &tree,
            &[
                Token::Seq { len: Some(3) },
                Token::I32(8),
                Token::I32(3),
                Token::I32(10),
                Token::SeqEnd,
            ],
        );
    }
}
