//! # Block Module
//!
//! This module provides the block-related types for the voxel field: the compact
//! per-voxel `Block` record and the `BlockType` material enumeration.

use block_type::BlockType;

pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// A value of 0 is air; every other value is a solid material id.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in the world.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the `Pod` derive let a chunk's block array be
/// handed to a renderer as raw bytes without copying.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// The material id of this block, encoded as a `BlockTypeSize`.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air block.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Creates a block directly from a raw material id.
    pub fn from_id(id: BlockTypeSize) -> Self {
        Block { block_type: id }
    }

    /// Returns `true` for any non-zero material id.
    pub fn is_solid(&self) -> bool {
        self.block_type != 0
    }
}
