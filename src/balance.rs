/// Selects how insertion restores balance on the way back up.
///
/// Removal always applies double-rotation-aware rebalancing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InsertBalance {
    /// Applies a single rotation picked by the sign of the balance factor,
    /// without looking at the heavy child's own balance.
    ///
    /// Zig-zag insertions (e.g. `3, 1, 2`) therefore get a single rotation
    /// and may leave a node with a balance factor of two.
    /// The root is checked once more after the insertion returns.
    #[default]
    SingleRotation,

    /// Textbook AVL insertion: left-right and right-left cases are
    /// resolved with a double rotation, as on removal.
    DoubleRotation,
}
