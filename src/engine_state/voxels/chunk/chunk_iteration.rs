//! # Chunk Iteration Module
//!
//! Iteration over the solid blocks of a chunk. The solidity bitmap is walked with
//! `iter_ones`, so air is skipped without touching the material array.

use bitvec::slice::IterOnes;
use bitvec::order::Lsb0;
use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::{Chunk, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk, yielding world block coordinates.
pub struct ChunkBlockIterator<'a> {
    chunk_ref: &'a Chunk,
    ones: IterOnes<'a, usize, Lsb0>,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            ones: chunk_ref.solid_array.iter_ones(),
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.ones.next()?;
        let (cx, y, cz) = Chunk::unindex(index);
        let position = Point3::new(
            self.chunk_ref.position.x * CHUNK_SIZE + cx as i32,
            y as i32,
            self.chunk_ref.position.y * CHUNK_SIZE + cz as i32,
        );
        Some((position, self.chunk_ref.blocks[index]))
    }
}

impl Chunk {
    /// Iterates the solid blocks of this chunk in storage order.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point2;

    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn yields_world_coordinates_of_solid_blocks() {
        let mut chunk = Chunk::empty(Point2::new(-1, 2));
        chunk.set_block(0, 50, 0, Block::new(BlockType::DIRT));
        chunk.set_block(15, 51, 3, Block::new(BlockType::GRASS));

        let blocks: Vec<_> = chunk.solid_blocks().collect();
        assert_eq!(
            blocks,
            vec![
                (Point3::new(-16, 50, 32), Block::new(BlockType::DIRT)),
                (Point3::new(-1, 51, 35), Block::new(BlockType::GRASS)),
            ]
        );
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::empty(Point2::new(0, 0));
        assert_eq!(chunk.solid_blocks().count(), 0);
    }
}
