//! An ordered multiset implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::Ordering;

use log::debug;

use crate::balance::InsertBalance;
use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter, Nodes};
use crate::node::{Link, Node};

/// An ordered collection of values implemented with an AVL tree.
/// Equal values may be inserted any number of times and are all kept.
///
/// ```
/// use avl_tree::{AvlTree, Error};
/// let mut tree = AvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
/// assert_eq!(tree.root().map(|node| *node.value()), Some(20));
/// assert_eq!(tree.remove_one(&20), Ok(20));
/// assert_eq!(tree.remove_one(&20), Err(Error::NotFound));
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    num_nodes: usize,
    insert_balance: InsertBalance,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree using the default insertion policy.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self::with_insert_balance(InsertBalance::default())
    }

    /// Creates an empty tree that rebalances insertions with the given policy.
    pub fn with_insert_balance(insert_balance: InsertBalance) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            insert_balance,
        }
    }

    /// Returns a reference to a stored value equal to the given one.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(Node::value)
    }

    /// Returns true if the tree holds at least one value equal to the given one.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Inserts a value. Equal values are kept side by side; a new value
    /// descends to the left of every equal value it meets on the way down.
    pub fn insert(&mut self, value: T) {
        let root = Self::insert_into(self.root.take(), value, self.insert_balance);
        // The recursion balanced the root already unless a zig-zag case
        // was handled by a single rotation; check it once more.
        self.root = Some(rebalance_insertion(root, self.insert_balance));
        self.num_nodes += 1;
    }

    /// Removes one occurrence of a value and returns it.
    ///
    /// Fails with [`Error::NotFound`] without touching the tree if no
    /// equal value is stored.
    pub fn remove_one<Q>(&mut self, value: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains(value) {
            debug!("rejected removal of absent value");
            return Err(Error::NotFound);
        }
        let removed = Self::remove_from(&mut self.root, value).ok_or(Error::NotFound)?;
        self.num_nodes -= 1;
        Ok(removed)
    }

    /// Removes every occurrence of a value.
    /// Returns the number of values removed, zero if there was none.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut num_removed = 0;
        while self.contains(value) {
            if Self::remove_from(&mut self.root, value).is_none() {
                break;
            }
            self.num_nodes -= 1;
            num_removed += 1;
        }
        if num_removed > 0 {
            debug!("removed {num_removed} equal values");
        }
        num_removed
    }

    /// Asserts that the internal tree structure is consistent:
    /// cached heights, value order and node count.
    /// With [`InsertBalance::DoubleRotation`] the AVL condition is asserted as well.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check_node<T: Ord>(node: &Node<T>) -> usize {
            let mut left_height = 0;
            let mut right_height = 0;
            if let Some(left) = node.left() {
                assert!(left.value() <= node.value());
                left_height = left.height();
            }
            if let Some(right) = node.right() {
                assert!(right.value() >= node.value());
                right_height = right.height();
            }
            assert_eq!(node.height(), 1 + left_height.max(right_height));
            1 + node.left().map_or(0, check_node) + node.right().map_or(0, check_node)
        }

        let num_nodes = self.root().map_or(0, check_node);
        assert_eq!(num_nodes, self.num_nodes);
        assert!(self.iter().zip(self.iter().skip(1)).all(|(a, b)| a <= b));
        if self.insert_balance == InsertBalance::DoubleRotation {
            assert!(self.is_balanced());
        }
    }

    fn find<Q>(&self, value: &Q) -> Option<&Node<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(node.value().borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            }
        }
        current
    }

    fn insert_into(link: Link<T>, value: T, insert_balance: InsertBalance) -> Box<Node<T>> {
        let mut node = match link {
            None => return Node::leaf(value),
            Some(node) => node,
        };
        if value <= node.value {
            node.left = Some(Self::insert_into(node.left.take(), value, insert_balance));
        } else {
            node.right = Some(Self::insert_into(node.right.take(), value, insert_balance));
        }
        rebalance_insertion(node, insert_balance)
    }

    /// Removes one value equal to `value` from the subtree at `link`,
    /// rebalancing every node on the path back up.
    fn remove_from<Q>(link: &mut Link<T>, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = link.take()?;
        match value.cmp(node.value.borrow()) {
            Ordering::Less => {
                let removed = Self::remove_from(&mut node.left, value);
                *link = Some(rebalance(node));
                removed
            }
            Ordering::Greater => {
                let removed = Self::remove_from(&mut node.right, value);
                *link = Some(rebalance(node));
                removed
            }
            Ordering::Equal => {
                let (found, rest) = Self::unlink(node);
                *link = rest;
                Some(found)
            }
        }
    }

    /// Unlinks `node` from its subtree.
    /// Returns its value and the rebalanced subtree taking its place.
    fn unlink(node: Box<Node<T>>) -> (T, Link<T>) {
        let (found, left, right) = node.into_parts();
        match (left, right) {
            (Some(left), Some(right)) => {
                // Replace by the in-order successor
                let (successor, right) = Self::take_min(right);
                let node = Node::with_children(successor, Some(left), right);
                (found, Some(rebalance(node)))
            }
            (None, child) | (child, None) => (found, child.map(rebalance)),
        }
    }

    /// Removes the least value of a non-empty subtree from the node a search
    /// for that value stops at: the first node down the left spine holding it.
    /// Returns the value and the rebalanced remainder of the subtree.
    fn take_min(node: Box<Node<T>>) -> (T, Link<T>) {
        let depth = Self::min_depth(&node);
        Self::take_at_depth(node, depth)
    }

    fn min_depth(node: &Node<T>) -> usize {
        let mut leftmost = node;
        while let Some(left) = leftmost.left() {
            leftmost = left;
        }
        let mut current = node;
        let mut depth = 0;
        while current.value() != leftmost.value() {
            match current.left() {
                None => break,
                Some(left) => current = left,
            }
            depth += 1;
        }
        depth
    }

    fn take_at_depth(mut node: Box<Node<T>>, depth: usize) -> (T, Link<T>) {
        if depth > 0 {
            if let Some(left) = node.left.take() {
                let (value, left) = Self::take_at_depth(left, depth - 1);
                node.left = left;
                return (value, Some(rebalance(node)));
            }
        }
        Self::unlink(node)
    }
}

impl<T> AvlTree<T> {
    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of values in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Counts the nodes reachable from the root.
    /// Always equal to [`len`](Self::len), but computed by walking the tree.
    pub fn size(&self) -> usize {
        self.root().map_or(0, Node::size)
    }

    /// Returns the height of the tree, 0 if empty.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Returns the policy used to rebalance after insertions.
    pub fn insert_balance(&self) -> InsertBalance {
        self.insert_balance
    }

    /// Returns the greatest value, or `None` if the tree is empty.
    pub fn maximum(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node.value())
    }

    /// Returns the least value, or `None` if the tree is empty.
    pub fn minimum(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node.value())
    }

    /// Returns true if no node's subtree heights differ by more than one.
    ///
    /// Removals and [`InsertBalance::DoubleRotation`] insertions keep this true.
    /// [`InsertBalance::SingleRotation`] insertions may not.
    pub fn is_balanced(&self) -> bool {
        self.nodes().all(|(node, _)| node.balance_factor().abs() <= 1)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Gets an iterator over the values of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.nodes())
    }

    /// Gets an iterator over the nodes of the tree in ascending order,
    /// each paired with its level below the root (the root is at level 0).
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(self.root(), self.num_nodes)
    }
}

/// Restores the AVL condition at `node` after an insertion below it,
/// following the tree's insertion policy.
fn rebalance_insertion<T>(mut node: Box<Node<T>>, insert_balance: InsertBalance) -> Box<Node<T>> {
    match insert_balance {
        InsertBalance::DoubleRotation => rebalance(node),
        InsertBalance::SingleRotation => {
            node.adjust_height();
            let balance = node.balance_factor();
            if balance >= 2 {
                node.rotate_right()
            } else if balance <= -2 {
                node.rotate_left()
            } else {
                node
            }
        }
    }
}

/// Adjusts the height of `node` and restores the AVL condition at it,
/// using a double rotation for left-right and right-left shapes.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.adjust_height();
    let balance = node.balance_factor();
    if balance > 1 {
        if node.left().map_or(false, |left| left.balance_factor() < 0) {
            node.left = node.left.take().map(Node::rotate_left);
        }
        node.rotate_right()
    } else if balance < -1 {
        if node.right().map_or(false, |right| right.balance_factor() > 0) {
            node.right = node.right.take().map(Node::rotate_right);
        }
        node.rotate_left()
    } else {
        node
    }
}

impl<T: Ord> Default for AvlTree<T> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for AvlTree<T> {
    /// Trees are equal when they hold the same values in the same order,
    /// whatever their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTree<T> {}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<'a, T> Extend<&'a T> for AvlTree<T>
where
    T: Ord + Copy,
    T: 'a,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.num_nodes)
    }
}
