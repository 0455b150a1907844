//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier, a generational key owned by the [`World`](super::World)
    pub struct Entity;
}
