//! Damage information

use ink_math::Vec3;
use serde::{Deserialize, Serialize};

/// One instance of damage being dealt
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Damage amount
    pub amount: f32,
    /// Actor that caused the damage, if any
    pub source: Option<u64>,
    /// World position where the damage was applied
    pub hit_point: Option<Vec3>,
    /// Surface normal at the hit point
    pub hit_normal: Option<Vec3>,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            source: None,
            hit_point: None,
            hit_normal: None,
        }
    }

    /// Set the source actor
    pub fn with_source(mut self, source: u64) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the hit point
    pub fn with_hit_point(mut self, point: Vec3) -> Self {
        self.hit_point = Some(point);
        self
    }

    /// Set the hit normal
    pub fn with_hit_normal(mut self, normal: Vec3) -> Self {
        self.hit_normal = Some(normal);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let damage = DamageInfo::new(25.0)
            .with_source(7)
            .with_hit_point(Vec3::X);
        assert_eq!(damage.amount, 25.0);
        assert_eq!(damage.source, Some(7));
        assert_eq!(damage.hit_point, Some(Vec3::X));
        assert_eq!(damage.hit_normal, None);
    }
}
