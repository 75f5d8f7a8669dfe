use std::cmp::{self, Ordering};

use log::trace;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single cell of an [`AvlTree`](crate::AvlTree).
///
/// Nodes compare by their values only; height and children are ignored.
#[derive(Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    height: usize,
}

/// Height of a possibly empty subtree; a missing child counts as zero.
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub(crate) fn with_children(value: T, left: Link<T>, right: Link<T>) -> Box<Self> {
        let mut node = Node {
            value,
            left,
            right,
            height: 0,
        };
        node.adjust_height();
        Box::new(node)
    }

    /// Returns the value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the left child, holding values less than or equal to this one.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// Returns the right child, holding values greater than or equal to this one.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Returns the number of nodes on the longest path down to a leaf,
    /// counting this node; a leaf has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the left subtree height minus the right subtree height.
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Counts the nodes of the subtree rooted here.
    pub fn size(&self) -> usize {
        1 + self.left().map_or(0, Node::size) + self.right().map_or(0, Node::size)
    }

    pub(crate) fn into_parts(self: Box<Self>) -> (T, Link<T>, Link<T>) {
        let node = *self;
        (node.value, node.left, node.right)
    }

    /// Recomputes the cached height from the children.
    /// Must run after any change to `left` or `right`.
    pub(crate) fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    /// Promotes the right child into this position.
    /// Returns the node unchanged if there is no right child.
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            None => self,
            Some(mut pivot) => {
                trace!("rotate left at height {}", self.height);
                self.right = pivot.left.take();
                self.adjust_height();
                pivot.left = Some(self);
                pivot.adjust_height();
                pivot
            }
        }
    }

    /// Promotes the left child into this position.
    /// Returns the node unchanged if there is no left child.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            None => self,
            Some(mut pivot) => {
                trace!("rotate right at height {}", self.height);
                self.left = pivot.right.take();
                self.adjust_height();
                pivot.right = Some(self);
                pivot.adjust_height();
                pivot
            }
        }
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Node<T> {}

impl<T: PartialOrd> PartialOrd for Node<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Node<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    #[test]
    fn test_leaf() {
        let leaf = Node::leaf(7);
        assert_eq!(*leaf.value(), 7);
        assert_eq!(leaf.height(), 1);
        assert_eq!(leaf.balance_factor(), 0);
        assert_eq!(leaf.size(), 1);
        assert!(leaf.left().is_none());
        assert!(leaf.right().is_none());
    }

    #[test]
    fn test_with_children_height() {
        //     4
        //    / \
        //   2   5
        //  /
        // 1
        let left = Node::with_children(2, Some(Node::leaf(1)), None);
        let node = Node::with_children(4, Some(left), Some(Node::leaf(5)));
        assert_eq!(node.height(), 3);
        assert_eq!(node.balance_factor(), 1);
        assert_eq!(node.size(), 4);

        let only_right = Node::with_children(1, None, Some(Node::leaf(2)));
        assert_eq!(only_right.height(), 2);
        assert_eq!(only_right.balance_factor(), -1);
    }

    #[test]
    fn test_compare_by_value_only() {
        let tall = Node::with_children(3, Some(Node::leaf(1)), Some(Node::leaf(4)));
        let short = Node::leaf(3);
        assert!(*tall == *short);
        assert!(*Node::leaf(2) < *tall);
        assert!(*Node::leaf(9) > *short);
    }

    #[test]
    fn test_rotate_left() {
        // 1          2
        //  \        / \
        //   2   -> 1   3
        //    \
        //     3
        let node = Node::with_children(
            1,
            None,
            Some(Node::with_children(2, None, Some(Node::leaf(3)))),
        );
        let node = node.rotate_left();
        assert_eq!(*node.value(), 2);
        assert_eq!(node.height(), 2);
        assert_eq!(node.left().map(|n| *n.value()), Some(1));
        assert_eq!(node.left().map(Node::height), Some(1));
        assert_eq!(node.right().map(|n| *n.value()), Some(3));
    }

    #[test]
    fn test_rotate_right() {
        //     5        3
        //    / \      / \
        //   3   6 -> 2   5
        //  / \          / \
        // 2   4        4   6
        let left = Node::with_children(3, Some(Node::leaf(2)), Some(Node::leaf(4)));
        let node = Node::with_children(5, Some(left), Some(Node::leaf(6)));
        let node = node.rotate_right();
        assert_eq!(*node.value(), 3);
        assert_eq!(node.height(), 3);
        let right = node.right().unwrap();
        assert_eq!(*right.value(), 5);
        assert_eq!(right.height(), 2);
        assert_eq!(right.left().map(|n| *n.value()), Some(4));
        assert_eq!(right.right().map(|n| *n.value()), Some(6));
    }

    #[test]
    fn test_rotate_without_child() {
        let node = Node::leaf(1).rotate_left().rotate_right();
        assert_eq!(*node.value(), 1);
        assert_eq!(node.height(), 1);
    }
}
