//! # Block Type Module
//!
//! This module defines the different materials a block can carry.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates the known block materials.
///
/// The discriminant is the material id stored in the voxel field, so `AIR` must
/// stay at 0. The `FromPrimitive` derive allows conversion back from raw ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    AIR,

    /// A basic dirt block. Terrain generation fills columns with it.
    DIRT,

    /// A grass block with different textures on top and sides.
    GRASS,

    /// A wooden block with a bark texture on all sides.
    WOOD,

    /// A plain white block, often used for testing.
    WHITE,
}

impl BlockType {
    /// Converts a raw material id to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the id does not name a known material.
    pub fn from_id(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }
}
