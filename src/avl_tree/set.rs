use crate::avl_tree::avl::AvlTree;
use crate::avl_tree::traversal::{IntoIter, Iter};
use crate::avl_tree::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use std::result;
use std::str::FromStr;

/// An ordered set implemented using an avl tree.
///
/// Unlike `AvlTree<T>`, a set never stores a key twice. Converting a set to a string yields its
/// keys in sorted order separated by spaces, and a set can be parsed back from such a string.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(4);
/// set.insert(1);
/// set.insert(3);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.to_string(), "1 3 4");
///
/// let other: AvlSet<i32> = "3 4 5".parse().unwrap();
/// assert_eq!(set.union(&other).to_string(), "1 3 4 5");
/// assert_eq!(set.intersection(&other).to_string(), "3 4");
/// assert_eq!(set.difference(&other).to_string(), "1");
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    tree: AvlTree<T>,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet {
            tree: AvlTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the tree backing the set.
    pub fn as_tree(&self) -> &AvlTree<T> {
        &self.tree
    }

    /// Returns an iterator over the set. The iterator yields keys in the pre-order of the
    /// backing tree, not in sorted order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![1, 2, 3].into_iter().collect();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    /// ```
    pub fn iter(&self) -> AvlSetIter<T> {
        AvlSetIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Folds every element of the set into a single value. Returns `Error::EmptyTree` if the set
    /// is empty. See `AvlTree::reduce`.
    pub fn reduce<F>(&self, f: F) -> Result<T>
    where
        T: Clone,
        F: FnMut(T, T) -> T,
    {
        self.tree.reduce(f)
    }
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Inserts a key into the set. Returns `false` and leaves the set unchanged if the key already
    /// exists in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        if self.tree.contains(&key) {
            return false;
        }
        self.tree.insert(key);
        true
    }

    /// Removes a key from the set. If the key exists in the set, it will return the removed key.
    /// Otherwise it will return `None`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T>
    where
        T: Clone,
    {
        self.tree.remove(key)
    }

    /// Checks if a key exists in the set.
    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    /// Returns the minimum key of the set. Returns `Error::EmptyTree` if the set is empty.
    pub fn min(&self) -> Result<&T> {
        self.tree.min()
    }

    /// Returns the maximum key of the set. Returns `Error::EmptyTree` if the set is empty.
    pub fn max(&self) -> Result<&T> {
        self.tree.max()
    }

    /// Returns a new set containing the keys that are in either set.
    pub fn union(&self, other: &AvlSet<T>) -> AvlSet<T>
    where
        T: Clone,
    {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Returns a new set containing the keys that are in both sets.
    pub fn intersection(&self, other: &AvlSet<T>) -> AvlSet<T>
    where
        T: Clone,
    {
        self.iter().filter(|key| other.contains(key)).cloned().collect()
    }

    /// Returns a new set containing the keys that are in this set, but not in `other`.
    pub fn difference(&self, other: &AvlSet<T>) -> AvlSet<T>
    where
        T: Clone,
    {
        self.iter().filter(|key| !other.contains(key)).cloned().collect()
    }

    /// Returns `true` if every key of this set is also in `other`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let a: AvlSet<u32> = vec![1, 3, 4].into_iter().collect();
    /// let b: AvlSet<u32> = vec![1, 3, 5, 4, 6].into_iter().collect();
    /// assert!(a.is_subset(&b));
    /// assert!(!b.is_subset(&a));
    /// ```
    pub fn is_subset(&self, other: &AvlSet<T>) -> bool {
        self.iter().all(|key| other.contains(key))
    }

    /// Returns a new set containing the result of `f` for every key. Equal results are only
    /// stored once.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<i32> = vec![-1, 1, 2].into_iter().collect();
    /// assert_eq!(set.map(|key| key * key).to_string(), "1 4");
    /// ```
    pub fn map<U, F>(&self, f: F) -> AvlSet<U>
    where
        U: Ord,
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// Returns a new set containing the keys for which `predicate` returns `true`.
    pub fn filter<P>(&self, predicate: P) -> AvlSet<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        AvlSet {
            tree: self.tree.filter(predicate),
        }
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in pre-order and yields owned keys.
pub struct AvlSetIntoIter<T> {
    tree_iter: IntoIter<T>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in pre-order and yields immutable references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    tree_iter: Iter<'a, T>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for AvlSet<T>
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

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: Ord,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T> Eq for AvlSet<T> where T: Ord {}

impl<T> Display for AvlSet<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, key) in self.tree.iter_sorted().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl<T> Debug for AvlSet<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.tree.iter_sorted()).finish()
    }
}

impl<T> FromStr for AvlSet<T>
where
    T: FromStr + Ord,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut set = AvlSet::new();
        for token in s.split_whitespace() {
            let key = token.parse().map_err(|_| Error::InvalidKey(token.to_string()))?;
            set.insert(key);
        }
        Ok(set)
    }
}

impl<T> Serialize for AvlSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for key in self.tree.iter_sorted() {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tree = AvlTree::<T>::deserialize(deserializer)?;
        Ok(tree.into_iter().collect())
    }
}
