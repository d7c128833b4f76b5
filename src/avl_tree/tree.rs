use crate::avl_tree::node::Node;
use std::cmp::{self, Ordering};
use std::mem;

pub type Link<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Link<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

pub fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    trace!("rotating left at height {}", node.height);
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

pub fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    trace!("rotating right at height {}", node.height);
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// double left rotation
pub fn rotate_right_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

// double right rotation
pub fn rotate_left_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

pub fn balance<T>(tree: &mut Link<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance <= -2 {
        let child_balance = node.right.as_ref().map_or(0, |child| child.balance);
        node = if child_balance <= 0 {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        };
    } else if node.balance >= 2 {
        let child_balance = node.left.as_ref().map_or(0, |child| child.balance);
        node = if child_balance >= 0 {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        };
    }

    debug_assert!(node.balance.abs() <= 1, "unbalanced node after rotation");
    *tree = Some(node);
}

// equal keys are routed to the left subtree
pub fn insert<T>(tree: &mut Link<T>, key: T)
where
    T: Ord,
{
    match tree {
        Some(ref mut node) => {
            if key <= node.key {
                insert(&mut node.left, key);
            } else {
                insert(&mut node.right, key);
            }
        },
        None => {
            *tree = Some(Box::new(Node::new(key)));
            return;
        },
    }

    balance(tree);
}

// A node with two children takes the minimum key of its right subtree, and that key is then
// removed from the right subtree by searching for it, so an equal key higher up the subtree is
// removed before a deeper one.
pub fn remove<T>(tree: &mut Link<T>, key: &T) -> Option<T>
where
    T: Ord + Clone,
{
    let ret = match tree.take() {
        Some(mut node) => match key.cmp(&node.key) {
            Ordering::Less => {
                let ret = remove(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                if node.left.is_some() && node.right.is_some() {
                    let successor = match min(&node.right) {
                        Some(successor) => successor.clone(),
                        None => unreachable!(),
                    };
                    remove(&mut node.right, &successor);
                    let ret = mem::replace(&mut node.key, successor);
                    *tree = Some(node);
                    Some(ret)
                } else {
                    let Node { key, left, right, .. } = *node;
                    *tree = left.or(right);
                    Some(key)
                }
            },
        },
        None => return None,
    };

    balance(tree);
    ret
}

pub fn find<'a, T>(tree: &'a Link<T>, key: &T) -> Option<&'a Node<T>>
where
    T: Ord,
{
    let mut curr = tree;
    while let Some(ref node) = curr {
        match key.cmp(&node.key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&**node),
        }
    }
    None
}

pub fn min<T>(tree: &Link<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Link<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

pub fn count<T>(tree: &Link<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => count(&node.left) + 1 + count(&node.right),
    }
}

// two trees match if they have the same shape and the same key at every position
pub fn matches<T>(a: Option<&Node<T>>, b: Option<&Node<T>>) -> bool
where
    T: PartialEq,
{
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.key == b.key && matches(a.left(), b.left()) && matches(a.right(), b.right())
        },
        _ => false,
    }
}

// reduce(n) = f(f(n.key, reduce(n.left)), reduce(n.right)), skipping missing children
pub fn reduce<T, F>(node: &Node<T>, f: &mut F) -> T
where
    T: Clone,
    F: FnMut(T, T) -> T,
{
    let mut ret = node.key.clone();
    if let Some(ref left) = node.left {
        let left_value = reduce(left, f);
        ret = f(ret, left_value);
    }
    if let Some(ref right) = node.right {
        let right_value = reduce(right, f);
        ret = f(ret, right_value);
    }
    ret
}

// Panics if a cached height or balance is stale, if a node is out of balance, or if the in-order
// key sequence decreases. Returns the number of nodes.
pub fn check_consistency<T>(tree: &Link<T>) -> usize
where
    T: Ord,
{
    let mut prev = None;
    check_subtree(tree, &mut prev)
}

fn check_subtree<'a, T>(tree: &'a Link<T>, prev: &mut Option<&'a T>) -> usize
where
    T: Ord,
{
    let node = match tree {
        Some(ref node) => node,
        None => return 0,
    };

    let mut node_count = check_subtree(&node.left, prev);
    if let Some(prev_key) = prev.take() {
        assert!(*prev_key <= node.key, "keys are out of order");
    }
    *prev = Some(&node.key);
    node_count += 1 + check_subtree(&node.right, prev);

    let left_height = height(&node.left);
    let right_height = height(&node.right);
    assert_eq!(node.height, cmp::max(left_height, right_height) + 1, "stale height");
    assert_eq!(node.balance, left_height as i32 - right_height as i32, "stale balance");
    assert!(node.balance.abs() <= 1, "node out of balance");

    node_count
}
