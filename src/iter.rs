//! Lazy in-order iterators over an [`AvlTree`](crate::AvlTree).

use std::iter::FusedIterator;

use crate::node::{Link, Node};

/// An iterator over the nodes of a tree in ascending order,
/// paired with their level (the root is at level 0).
///
/// This `struct` is created by the [`nodes`] method on [`AvlTree`].
///
/// [`AvlTree`]: crate::AvlTree
/// [`nodes`]: crate::AvlTree::nodes
pub struct Nodes<'a, T> {
    front: Vec<(&'a Node<T>, usize)>,
    back: Vec<(&'a Node<T>, usize)>,
    remaining: usize,
}

/// An iterator over the values of a tree in ascending order.
pub struct Iter<'a, T> {
    nodes: Nodes<'a, T>,
}

/// An owning iterator over the values of a tree in ascending order.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<'a, T> Nodes<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut nodes = Self {
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
        };
        nodes.descend_left(root, 0);
        nodes.descend_right(root, 0);
        nodes
    }

    fn descend_left(&mut self, mut current: Option<&'a Node<T>>, mut level: usize) {
        while let Some(node) = current {
            self.front.push((node, level));
            current = node.left();
            level += 1;
        }
    }

    fn descend_right(&mut self, mut current: Option<&'a Node<T>>, mut level: usize) {
        while let Some(node) = current {
            self.back.push((node, level));
            current = node.right();
            level += 1;
        }
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Nodes<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = (&'a Node<T>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (node, level) = self.front.pop()?;
        self.descend_left(node.right(), level + 1);
        self.remaining -= 1;
        Some((node, level))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Nodes<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (node, level) = self.back.pop()?;
        self.descend_right(node.left(), level + 1);
        self.remaining -= 1;
        Some((node, level))
    }
}

impl<T> ExactSizeIterator for Nodes<'_, T> {}

impl<T> FusedIterator for Nodes<'_, T> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: Nodes<'a, T>) -> Self {
        Self { nodes }
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|(node, _)| node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(|(node, _)| node.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut into_iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        into_iter.descend_left(root);
        into_iter
    }

    fn descend_left(&mut self, mut current: Link<T>) {
        while let Some(mut node) = current {
            current = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let (value, _, right) = node.into_parts();
        self.descend_left(right);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
