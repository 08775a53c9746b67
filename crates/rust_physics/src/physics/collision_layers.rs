//! Collision layer system for filtering collision detection

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Collision layer bitmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
        /// Debris and small physics objects
        const DEBRIS = 1 << 4;
        /// Pickups and collectibles
        const PICKUP = 1 << 5;

        // Bits 8-31 are left for game-defined layers
        const _ = !0;
    }
}

impl CollisionLayers {
    /// Check if two entities should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask AND B's layer must be in A's mask.
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }

    /// A game-defined layer, `index` in `8..32`
    pub fn custom(index: u32) -> Option<Self> {
        (8..32).contains(&index).then(|| Self::from_bits_retain(1 << index))
    }
}
