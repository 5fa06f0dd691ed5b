//! # Physics Module
//!
//! Collision and ground detection between the player and the voxel field.
//!
//! The player is approximated as a vertical pole running from the feet to the eye,
//! with a square horizontal footprint of half-width `radius`. A block collides with
//! the player when the two overlap on the vertical axis *and* in the horizontal plane.
//!
//! Only detection lives here. Nothing pushes the player out of an intersecting block.

use std::ops::RangeInclusive;

use cgmath::{Point3, Vector3};

use super::voxels::world::VoxelField;

/// Half-width of the player's horizontal footprint.
pub const PLAYER_RADIUS: f32 = 0.5;
/// Vertical distance from the feet to the eye.
pub const EYE_HEIGHT: f32 = 1.75;

/// Horizontal offsets scanned around the eye block, on both X and Z.
pub const HORIZONTAL_SCAN: RangeInclusive<i32> = -1..=1;
/// Vertical offsets scanned around the eye block by [`CollisionResolver::find_collisions`].
pub const COLLISION_SCAN_Y: RangeInclusive<i32> = -5..=1;
/// Vertical offsets scanned around the eye block by [`CollisionResolver::is_grounded`].
///
/// Narrower than `COLLISION_SCAN_Y`.
pub const GROUNDED_SCAN_Y: RangeInclusive<i32> = -3..=-1;

/// Returns `true` if the closed intervals `a` and `b` overlap. Touching counts.
///
/// Each interval is `(low, high)`. The test is symmetric in its arguments.
pub fn vertical_overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    a.1 >= b.0 && b.1 >= a.0
}

/// Vertical test between the block whose bottom is at `block_y` and the player span
/// `[feet_y, eye_y]`.
pub fn vertical_collision(block_y: i32, feet_y: f32, eye_y: f32) -> bool {
    let bottom = block_y as f32;
    vertical_overlap((bottom, bottom + 1.0), (feet_y, eye_y))
}

/// Horizontal test between a block and the player's square footprint around `eye`.
///
/// Strict inequalities: a block exactly touching the footprint does not collide.
pub fn horizontal_collision(block: Point3<i32>, eye: Point3<f32>, radius: f32) -> bool {
    let (bx, bz) = (block.x as f32, block.z as f32);
    bx + 0.5 > eye.x - radius
        && bz + 0.5 > eye.z - radius
        && bx - 0.5 < eye.x + radius
        && bz - 0.5 < eye.z + radius
}

/// The block containing `point`.
pub fn block_position(point: Point3<f32>) -> Point3<i32> {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// Detects blocks intersecting a player pole of fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    /// Half-width of the player's horizontal footprint.
    pub radius: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        CollisionResolver {
            radius: PLAYER_RADIUS,
        }
    }
}

impl CollisionResolver {
    /// Creates a resolver for a player of the given footprint half-width.
    pub fn new(radius: f32) -> Self {
        CollisionResolver { radius }
    }

    /// `true` if the solid block at `block` intersects the player whose eye is at `eye`.
    pub fn collides(&self, block: Point3<i32>, eye: Point3<f32>) -> bool {
        vertical_collision(block.y, eye.y - EYE_HEIGHT, eye.y)
            && horizontal_collision(block, eye, self.radius)
    }

    /// Solid blocks in the scan window around `eye`, paired with the collision test.
    fn scan<'a>(
        &'a self,
        field: &'a VoxelField,
        eye: Point3<f32>,
        vertical: RangeInclusive<i32>,
    ) -> impl Iterator<Item = Point3<i32>> + 'a {
        let origin = block_position(eye);

        HORIZONTAL_SCAN
            .flat_map(|i| HORIZONTAL_SCAN.map(move |k| (i, k)))
            .flat_map(move |(i, k)| vertical.clone().map(move |j| origin + Vector3::new(i, j, k)))
            .filter(move |block| !field.is_air(block.x, block.y, block.z))
            .filter(move |block| self.collides(*block, eye))
    }

    /// Every solid block within the collision window that intersects the player.
    ///
    /// The order of the returned blocks carries no meaning.
    pub fn find_collisions(&self, field: &VoxelField, eye: Point3<f32>) -> Vec<Point3<i32>> {
        self.scan(field, eye, COLLISION_SCAN_Y).collect()
    }

    /// `true` if any solid block in the grounded window intersects the player.
    pub fn is_grounded(&self, field: &VoxelField, eye: Point3<f32>) -> bool {
        self.scan(field, eye, GROUNDED_SCAN_Y).next().is_some()
    }
}
