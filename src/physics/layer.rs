//! Collision layers for filtering which collider pairs may interact.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask category of a collider.
///
/// Two colliders interact only when their layers share at least one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionLayer(pub u64);

impl CollisionLayer {
    /// No bits set. Never interacts with anything.
    pub const NONE: Self = Self(0);
    /// Every bit set.
    pub const ALL: Self = Self(u64::MAX);
    /// Layer given to new colliders (bit 0).
    pub const DEFAULT: Self = Self(1);

    /// A layer with only bit `n` set. Bits past 63 yield [`CollisionLayer::NONE`].
    pub fn bit(n: u32) -> Self {
        Self(1u64.checked_shl(n).unwrap_or(0))
    }

    /// Set or clear bit `n`.
    pub fn set_bit(&mut self, n: u32, value: bool) {
        let mask = Self::bit(n).0;
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Builder form of [`CollisionLayer::set_bit`].
    pub fn with_bit(mut self, n: u32, value: bool) -> Self {
        self.set_bit(n, value);
        self
    }

    /// Whether bit `n` is set.
    pub fn get_bit(&self, n: u32) -> bool {
        let mask = Self::bit(n).0;
        mask != 0 && self.0 & mask == mask
    }

    /// Whether the two layers share any bit.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl From<u64> for CollisionLayer {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl BitAnd for CollisionLayer {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for CollisionLayer {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionLayer {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
