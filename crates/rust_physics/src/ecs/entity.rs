//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational key: a despawned entity's identifier is never handed out
    /// again, so stale identifiers simply stop matching any component.
    pub struct Entity;
}
