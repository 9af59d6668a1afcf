//! Overlap tests and removal sweeps
//!
//! Collision is axis-aligned only: circles are treated as radius-padded
//! points against rectangles, and sprite tilt is ignored.
//!
//! Removal is always two-phase. Predicates are evaluated over the whole
//! collection first, then the collection is compacted once. Nothing is
//! removed by index while a scan is still running.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyProjectile, Projectile};

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Grow by `pad` on every side
    pub fn padded(&self, pad: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(pad),
            max: self.max + Vec2::splat(pad),
        }
    }

    /// Inclusive point containment
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Player projectile against an enemy unit's box, padded by the projectile radius
pub fn shot_hits_unit(shot: &Projectile, unit: &Aabb) -> bool {
    unit.padded(shot.radius).contains(shot.pos)
}

/// Enemy projectile against the player's box
///
/// Only the projectile's bottom edge is tested vertically: anything at or
/// below the ship's top edge that overlaps it horizontally counts.
pub fn enemy_shot_hits_player(shot: &EnemyProjectile, player: &Aabb) -> bool {
    let left = shot.pos.x;
    let right = shot.pos.x + shot.size.x;
    let bottom = shot.pos.y + shot.size.y;

    bottom >= player.min.y && right > player.min.x && left < player.max.x
}

/// Drop every marked item in one compaction pass, preserving survivor order
///
/// `marks` must be parallel to `items`. Returns the number removed.
pub fn remove_marked<T>(items: &mut Vec<T>, marks: &[bool]) -> usize {
    debug_assert_eq!(items.len(), marks.len());
    let before = items.len();
    let mut keep = marks.iter().map(|doomed| !doomed);
    items.retain(|_| keep.next().unwrap_or(true));
    before - items.len()
}

/// Mark every item matching `doomed`, then compact once
pub fn sweep<T>(items: &mut Vec<T>, doomed: impl FnMut(&T) -> bool) -> usize {
    let marks: Vec<bool> = items.iter().map(doomed).collect();
    remove_marked(items, &marks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_box() -> Aabb {
        Aabb::from_pos_size(Vec2::new(100.0, 100.0), Vec2::new(30.0, 30.0))
    }

    #[test]
    fn test_shot_hits_unit_center() {
        assert_eq!(unit_box().center(), Vec2::new(115.0, 115.0));
        let shot = Projectile::new(unit_box().center());
        assert!(shot_hits_unit(&shot, &unit_box()));
    }

    #[test]
    fn test_shot_hits_unit_within_padding() {
        // 3px outside the right edge still touches with radius 3
        let shot = Projectile::new(Vec2::new(133.0, 115.0));
        assert!(shot_hits_unit(&shot, &unit_box()));

        let shot = Projectile::new(Vec2::new(133.5, 115.0));
        assert!(!shot_hits_unit(&shot, &unit_box()));

        let shot = Projectile::new(Vec2::new(115.0, 96.9));
        assert!(!shot_hits_unit(&shot, &unit_box()));
    }

    #[test]
    fn test_enemy_shot_hits_player_at_corner() {
        let player = Aabb::from_pos_size(Vec2::new(200.0, 400.0), Vec2::new(100.0, 100.0));
        let shot = EnemyProjectile::new(Vec2::new(200.0, 400.0));
        assert!(enemy_shot_hits_player(&shot, &player));
    }

    #[test]
    fn test_enemy_shot_misses_player() {
        let player = Aabb::from_pos_size(Vec2::new(200.0, 400.0), Vec2::new(100.0, 100.0));

        // Still above the ship
        let shot = EnemyProjectile::new(Vec2::new(250.0, 389.0));
        assert!(!enemy_shot_hits_player(&shot, &player));

        // Right edge exactly on the ship's left edge
        let shot = EnemyProjectile::new(Vec2::new(197.0, 450.0));
        assert!(!enemy_shot_hits_player(&shot, &player));

        // Left edge exactly on the ship's right edge
        let shot = EnemyProjectile::new(Vec2::new(300.0, 450.0));
        assert!(!enemy_shot_hits_player(&shot, &player));
    }

    #[test]
    fn test_sweep_removes_adjacent_matches() {
        // Consecutive matches are the classic skip-on-shift case
        let mut items = vec![1, 2, 2, 2, 3, 2];
        let removed = sweep(&mut items, |&v| v == 2);
        assert_eq!(removed, 4);
        assert_eq!(items, vec![1, 3]);
    }

    #[test]
    fn test_remove_marked() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(remove_marked(&mut items, &[true, false, false, true]), 2);
        assert_eq!(items, vec!['b', 'c']);
    }

    proptest! {
        #[test]
        fn prop_sweep_keeps_non_matching_in_order(items in prop::collection::vec(0u8..10, 0..64), cutoff in 0u8..10) {
            let expected: Vec<u8> = items.iter().copied().filter(|&v| v >= cutoff).collect();
            let matching = items.len() - expected.len();

            let mut swept = items.clone();
            let removed = sweep(&mut swept, |&v| v < cutoff);

            prop_assert_eq!(removed, matching);
            prop_assert_eq!(swept.len(), items.len() - matching);
            prop_assert_eq!(swept, expected);
        }
    }
}
