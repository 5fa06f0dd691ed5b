//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which computes a chunk's terrain
//! on a worker thread. The chunk must already be claimed in the voxel field before
//! the task is published; the result writes the blocks and marks it generated.

use cgmath::Point2;
use log::debug;
use noise::NoiseFn;

use crate::engine_state::{
    task_management::task::{Task, TaskResult},
    voxels::{
        chunk::GenerationState,
        terrain::{ColumnHeights, TerrainGenerator},
        world::VoxelField,
    },
};

/// A task that computes the column heights of one claimed chunk.
pub struct ChunkGenerationTask<N> {
    terrain: TerrainGenerator<N>,
    position: Point2<i32>,
}

impl<N> ChunkGenerationTask<N> {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `terrain` - The generator to sample; cloned from the engine's generator
    /// * `position` - The chunk coordinates to generate, already claimed by the caller
    pub fn new(terrain: TerrainGenerator<N>, position: Point2<i32>) -> Self {
        ChunkGenerationTask { terrain, position }
    }
}

impl<N: NoiseFn<f64, 2> + Send> Task for ChunkGenerationTask<N> {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        Box::new(ChunkGenerationTaskResult {
            columns: self.terrain.column_heights(self.position),
        })
    }
}

/// The computed terrain of one chunk, waiting to be written on the main thread.
pub struct ChunkGenerationTaskResult {
    columns: ColumnHeights,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Writes the terrain and marks the chunk generated.
    ///
    /// # Panics
    /// Panics if the chunk was not in the `Claimed` state.
    fn handle_result(self: Box<Self>, world: &mut VoxelField) -> Vec<Box<dyn Task + Send>> {
        let position = self.columns.position;
        let state = world.get_or_create_chunk(position).generation_state();
        assert_eq!(
            state,
            GenerationState::Claimed,
            "generation result for chunk {:?} arrived in state {:?}",
            position,
            state
        );

        self.columns.write_into(world);
        world.get_or_create_chunk(position).mark_generated();
        debug!("Chunk {:?} generated in the background", position);

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use noise::Constant;

    use super::*;

    #[test]
    fn result_fills_a_claimed_chunk() {
        let mut world = VoxelField::new();
        let position = Point2::new(2, -1);
        assert!(world.claim_chunk(position));

        let task = ChunkGenerationTask::new(TerrainGenerator::new(Constant::new(0.0)), position);
        let follow_ups = task.process().handle_result(&mut world);

        assert!(follow_ups.is_empty());
        assert!(world.is_generated(position));
        assert!(!world.is_air(32, 50, -16));
        assert!(world.is_air(32, 51, -16));
    }

    #[test]
    fn background_result_matches_direct_generation() {
        let terrain = TerrainGenerator::perlin(11);
        let position = Point2::new(-3, 5);

        let mut direct = VoxelField::new();
        terrain.generate_chunk(&mut direct, position);

        let mut background = VoxelField::new();
        background.claim_chunk(position);
        ChunkGenerationTask::new(terrain.clone(), position)
            .process()
            .handle_result(&mut background);

        assert_eq!(
            direct.get_chunk_at(position).unwrap().blocks,
            background.get_chunk_at(position).unwrap().blocks
        );
    }

    #[test]
    #[should_panic(expected = "arrived in state Pending")]
    fn unclaimed_chunk_is_rejected() {
        let mut world = VoxelField::new();
        ChunkGenerationTask::new(TerrainGenerator::new(Constant::new(0.0)), Point2::new(0, 0))
            .process()
            .handle_result(&mut world);
    }
}
