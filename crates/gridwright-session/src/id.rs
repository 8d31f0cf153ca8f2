use slotmap::new_key_type;

new_key_type! {
    /// Identifies a placeable entity on the board.
    pub struct PlaceableId;
}
