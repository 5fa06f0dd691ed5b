//! # World Module
//!
//! This module provides the `VoxelField` which owns every chunk of the voxel world
//! and answers block queries in global coordinates.
//!
//! ## Architecture
//!
//! The field uses sparse storage: only chunks that have been referenced by
//! generation are kept, keyed by their X/Z chunk coordinate. Chunks span the full
//! world height, so the vertical axis is never partitioned.
//!
//! Coordinates not covered by any chunk read as air. This lets the collision code
//! probe arbitrarily far without bounds-checking against loaded chunks.

use std::collections::HashMap;
use std::fmt;

use cgmath::{Point2, Point3};

use super::block::Block;
use super::chunk::{Chunk, CHUNK_SIZE, WORLD_HEIGHT};

/// Errors returned by fallible voxel writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelError {
    /// A write targeted a y coordinate outside `0..WORLD_HEIGHT`.
    OutOfWorldHeight {
        /// The rejected y coordinate.
        y: i32,
    },
}

impl fmt::Display for VoxelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoxelError::OutOfWorldHeight { y } => {
                write!(f, "y = {} is outside the world height 0..{}", y, WORLD_HEIGHT)
            }
        }
    }
}

impl std::error::Error for VoxelError {}

/// The voxel world: a sparse map of chunk coordinates to chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_explorer::{Block, BlockType, VoxelField};
///
/// let mut field = VoxelField::new();
/// assert!(field.is_air(0, 50, 0));
///
/// field.set_block(0, 50, 0, Block::new(BlockType::DIRT)).unwrap();
/// assert!(!field.is_air(0, 50, 0));
/// assert_eq!(VoxelField::to_chunk(Point3::new(-1, 0, 16)), cgmath::Point2::new(-1, 1));
/// ```
#[derive(Default)]
pub struct VoxelField {
    /// A mapping from chunk coordinates (X, Z) to chunk data.
    pub chunks: HashMap<Point2<i32>, Chunk>,
}

impl VoxelField {
    /// Creates a new, empty field.
    pub fn new() -> Self {
        VoxelField {
            chunks: HashMap::new(),
        }
    }

    /// Converts a block position to the coordinate of the chunk containing it.
    ///
    /// Uses floor division on X and Z, so `-1` maps to chunk `-1`, not `0`.
    pub fn to_chunk(block_position: Point3<i32>) -> Point2<i32> {
        Point2::new(
            block_position.x.div_euclid(CHUNK_SIZE),
            block_position.z.div_euclid(CHUNK_SIZE),
        )
    }

    /// Converts global X/Z to coordinates local to the containing chunk.
    fn to_local(x: i32, z: i32) -> (usize, usize) {
        (
            x.rem_euclid(CHUNK_SIZE) as usize,
            z.rem_euclid(CHUNK_SIZE) as usize,
        )
    }

    /// Returns the chunk at `position`, creating an empty pending chunk first if needed.
    pub fn get_or_create_chunk(&mut self, position: Point2<i32>) -> &mut Chunk {
        self.chunks
            .entry(position)
            .or_insert_with(|| Chunk::empty(position))
    }

    /// Retrieves the chunk at the specified chunk coordinates, if it exists.
    pub fn get_chunk_at(&self, position: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Returns `true` if the chunk exists and its terrain has been generated.
    pub fn is_generated(&self, position: Point2<i32>) -> bool {
        self.chunks
            .get(&position)
            .is_some_and(|chunk| chunk.is_generated())
    }

    /// Reserves a chunk for background generation, creating it if needed.
    ///
    /// # Returns
    /// `true` if the caller now owns generation of this chunk.
    pub fn claim_chunk(&mut self, position: Point2<i32>) -> bool {
        self.get_or_create_chunk(position).claim()
    }

    /// Reads one voxel. Absent chunks and out-of-height coordinates are air.
    pub fn at(&self, x: i32, y: i32, z: i32) -> Block {
        if !(0..WORLD_HEIGHT).contains(&y) {
            return Block::AIR;
        }

        match self.chunks.get(&Self::to_chunk(Point3::new(x, y, z))) {
            Some(chunk) => {
                let (cx, cz) = Self::to_local(x, z);
                chunk.get_block_at(cx, y as usize, cz)
            }
            None => Block::AIR,
        }
    }

    /// Returns `true` if no solid block occupies the coordinate.
    pub fn is_air(&self, x: i32, y: i32, z: i32) -> bool {
        if !(0..WORLD_HEIGHT).contains(&y) {
            return true;
        }

        match self.chunks.get(&Self::to_chunk(Point3::new(x, y, z))) {
            Some(chunk) => {
                let (cx, cz) = Self::to_local(x, z);
                !chunk.is_block_solid(cx, y as usize, cz)
            }
            None => true,
        }
    }

    /// Writes one voxel, creating the containing chunk if it does not exist yet.
    ///
    /// # Errors
    /// Returns [`VoxelError::OutOfWorldHeight`] if `y` is outside `0..WORLD_HEIGHT`.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) -> Result<(), VoxelError> {
        if !(0..WORLD_HEIGHT).contains(&y) {
            return Err(VoxelError::OutOfWorldHeight { y });
        }

        let (cx, cz) = Self::to_local(x, z);
        self.get_or_create_chunk(Self::to_chunk(Point3::new(x, y, z)))
            .set_block(cx, y as usize, cz, block);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn to_chunk_floors_negative_coordinates() {
        assert_eq!(VoxelField::to_chunk(Point3::new(0, 0, 0)), Point2::new(0, 0));
        assert_eq!(VoxelField::to_chunk(Point3::new(15, 7, 15)), Point2::new(0, 0));
        assert_eq!(VoxelField::to_chunk(Point3::new(16, 0, -1)), Point2::new(1, -1));
        assert_eq!(VoxelField::to_chunk(Point3::new(-16, 0, -17)), Point2::new(-1, -2));
    }

    #[test]
    fn missing_chunks_read_as_air() {
        let field = VoxelField::new();
        assert!(field.is_air(1000, 60, -1000));
        assert_eq!(field.at(1000, 60, -1000), Block::AIR);
        assert!(field.chunks.is_empty());
    }

    #[test]
    fn out_of_height_reads_are_air() {
        let mut field = VoxelField::new();
        field.set_block(0, 0, 0, Block::new(BlockType::DIRT)).unwrap();
        assert!(field.is_air(0, -1, 0));
        assert!(field.is_air(0, WORLD_HEIGHT, 0));
        assert!(!field.is_air(0, 0, 0));
    }

    #[test]
    fn set_block_creates_the_chunk() {
        let mut field = VoxelField::new();
        field.set_block(-1, 10, 17, Block::new(BlockType::WOOD)).unwrap();

        let chunk = field.get_chunk_at(Point2::new(-1, 1)).unwrap();
        assert_eq!(chunk.get_block_at(15, 10, 1), Block::new(BlockType::WOOD));
        assert!(!chunk.is_generated());
        assert_eq!(field.at(-1, 10, 17), Block::new(BlockType::WOOD));
        assert!(field.is_air(-1, 11, 17));
    }

    #[test]
    fn set_block_rejects_out_of_height_writes() {
        let mut field = VoxelField::new();
        assert_eq!(
            field.set_block(0, WORLD_HEIGHT, 0, Block::new(BlockType::DIRT)),
            Err(VoxelError::OutOfWorldHeight { y: WORLD_HEIGHT })
        );
        assert!(field.chunks.is_empty());
    }

    #[test]
    fn claim_chunk_is_exclusive() {
        let mut field = VoxelField::new();
        let position = Point2::new(4, 4);
        assert!(field.claim_chunk(position));
        assert!(!field.claim_chunk(position));
        assert!(!field.is_generated(position));
    }
}
