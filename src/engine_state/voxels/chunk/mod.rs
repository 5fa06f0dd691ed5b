//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x16 column of blocks spanning the
//! full world height. Chunks are the unit of terrain generation and loading.
//!
//! ## Storage
//!
//! Each chunk keeps two parallel views of its blocks:
//! - `solid_array`: a bit vector (1 bit per block) answering occupancy queries in O(1)
//! - `blocks`: the dense material ids, laid out in the same order as `solid_array`
//!
//! Both are indexed x-fastest, then z, then y, so a horizontal layer is contiguous.
//! Writes always go through [`Chunk::set_block`], which keeps the two in sync.

use bitvec::prelude::BitVec;
use cgmath::Point2;

use super::block::Block;

pub mod chunk_iteration;

/// The horizontal dimension (width and depth) of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The height of the world, and therefore of every chunk, in blocks.
/// Valid y coordinates are `0..WORLD_HEIGHT`.
pub const WORLD_HEIGHT: i32 = 256;
/// The number of columns in a chunk (CHUNK_SIZE²).
pub const CHUNK_COLUMN_COUNT: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_COLUMN_COUNT * WORLD_HEIGHT as usize;

/// Where a chunk is in its generation lifecycle.
///
/// The only legal transitions are `Pending -> Claimed -> Generated` and
/// `Pending -> Generated`. A chunk never leaves `Generated`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenerationState {
    /// Created but not yet filled by the terrain generator.
    Pending,
    /// Reserved by a background generation task; terrain has not been written yet.
    Claimed,
    /// Terrain has been written. Regenerating is a programming error.
    Generated,
}

/// A full-height column of blocks at a fixed chunk coordinate.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (X and Z only).
    pub position: Point2<i32>,

    /// One bit per block, set when the block is solid.
    pub solid_array: BitVec,

    /// The material id of every block, air included.
    pub blocks: Vec<Block>,

    state: GenerationState,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air) in the `Pending` state.
    pub fn empty(position: Point2<i32>) -> Self {
        let mut solid_array = BitVec::with_capacity(CHUNK_VOLUME);
        solid_array.resize(CHUNK_VOLUME, false);

        Chunk {
            position,
            solid_array,
            blocks: vec![Block::AIR; CHUNK_VOLUME],
            state: GenerationState::Pending,
        }
    }

    /// Flattens chunk-local coordinates into an index shared by `solid_array` and `blocks`.
    ///
    /// # Panics
    /// Panics in debug builds if the coordinates are out of bounds.
    #[inline]
    pub fn index(cx: usize, y: usize, cz: usize) -> usize {
        debug_assert!(cx < CHUNK_SIZE as usize && cz < CHUNK_SIZE as usize);
        debug_assert!(y < WORLD_HEIGHT as usize);
        cx + CHUNK_SIZE as usize * cz + CHUNK_COLUMN_COUNT * y
    }

    /// Inverse of [`Chunk::index`], returning `(cx, y, cz)`.
    #[inline]
    pub fn unindex(index: usize) -> (usize, usize, usize) {
        let y = index / CHUNK_COLUMN_COUNT;
        let rem = index % CHUNK_COLUMN_COUNT;
        (rem % CHUNK_SIZE as usize, y, rem / CHUNK_SIZE as usize)
    }

    /// Gets the block at the specified chunk-relative coordinates.
    pub fn get_block_at(&self, cx: usize, y: usize, cz: usize) -> Block {
        self.blocks[Self::index(cx, y, cz)]
    }

    /// Checks if the block at the specified chunk-relative coordinates is solid.
    pub fn is_block_solid(&self, cx: usize, y: usize, cz: usize) -> bool {
        self.solid_array[Self::index(cx, y, cz)]
    }

    /// Writes one block, keeping the solidity bitmap consistent with the material ids.
    pub fn set_block(&mut self, cx: usize, y: usize, cz: usize, block: Block) {
        let index = Self::index(cx, y, cz);
        self.blocks[index] = block;
        self.solid_array.set(index, block.is_solid());
    }

    /// Number of solid blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// The raw material ids of the chunk, in storage order, for upload to a renderer.
    pub fn block_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Current lifecycle state.
    pub fn generation_state(&self) -> GenerationState {
        self.state
    }

    /// `true` once terrain has been written into this chunk.
    pub fn is_generated(&self) -> bool {
        self.state == GenerationState::Generated
    }

    /// Reserves a pending chunk for background generation.
    ///
    /// # Returns
    /// `true` if the chunk moved from `Pending` to `Claimed`, `false` if someone
    /// already claimed or generated it.
    pub fn claim(&mut self) -> bool {
        if self.state == GenerationState::Pending {
            self.state = GenerationState::Claimed;
            true
        } else {
            false
        }
    }

    /// Marks the chunk as generated.
    ///
    /// # Panics
    /// Panics if the chunk was already generated.
    pub fn mark_generated(&mut self) {
        assert!(
            self.state != GenerationState::Generated,
            "chunk {:?} was generated twice",
            self.position
        );
        self.state = GenerationState::Generated;
    }
}
