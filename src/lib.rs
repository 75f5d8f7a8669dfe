//! A self-balancing binary search tree (AVL tree) of ordered values.
//!
//! [`AvlTree`] keeps every inserted value, equal values included, and restores
//! its height bound after each insertion or removal by rotating nodes on the way
//! back up from the changed leaf. Nodes carry no parent links.
//!
//! ```
//! use avl_tree::AvlTree;
//! let mut tree: AvlTree<i32> = [30, 20, 10, 20].into_iter().collect();
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.maximum(), Some(&30));
//! assert_eq!(tree.remove_all(&20), 2);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 30]);
//!
//! for (node, level) in tree.nodes() {
//!     assert!(level < tree.height());
//!     assert!(node.height() >= 1);
//! }
//! ```

mod balance;
mod error;
pub mod iter;
mod node;
mod tree;

pub use balance::InsertBalance;
pub use error::{Error, Result};
pub use node::Node;
pub use tree::AvlTree;
