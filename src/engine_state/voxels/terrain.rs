//! # Terrain Module
//!
//! Height-mapped terrain generation for the voxel field.
//!
//! Every column of the world gets a thin surface layer whose height is a pure
//! function of the column's *global* X/Z coordinate, sampled from 2D noise. Because
//! chunk-local indices never enter the formula, chunks generated independently (and
//! on different threads) meet without seams.

use cgmath::{Point2, Vector2};
use log::{info, warn};
use noise::{NoiseFn, Perlin};

use super::block::{block_type::BlockType, Block};
use super::chunk::{CHUNK_COLUMN_COUNT, CHUNK_SIZE};
use super::world::VoxelField;

/// Surface height of a column where the noise samples to zero.
pub const SURFACE_BASE_HEIGHT: i32 = 50;
/// Scale applied to the noise sample before it is added to the base height.
pub const SURFACE_AMPLITUDE: f64 = 10.0;
/// World distance covered by one unit of noise input.
pub const NOISE_WAVELENGTH: f64 = 50.0;
/// Number of solid blocks in each column, counting down from the surface.
pub const COLUMN_DEPTH: i32 = 3;
/// Chebyshev radius, in chunks, generated around the player at spawn.
pub const DEFAULT_SPAWN_RADIUS: i32 = 3;

/// Surface heights for every column of one chunk.
///
/// This is the pure part of generation: it can be computed on any thread and
/// written into the field later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeights {
    /// The chunk these heights belong to.
    pub position: Point2<i32>,
    /// Surface height per column, indexed `cx + CHUNK_SIZE * cz`.
    pub heights: Vec<i32>,
}

impl ColumnHeights {
    /// Surface height of the column at chunk-local `(cx, cz)`.
    pub fn height_at(&self, cx: usize, cz: usize) -> i32 {
        self.heights[cx + CHUNK_SIZE as usize * cz]
    }

    /// Writes the surface layer of every column into `field`.
    ///
    /// Does not touch the chunk's generation state.
    pub fn write_into(&self, field: &mut VoxelField) {
        let base_x = self.position.x * CHUNK_SIZE;
        let base_z = self.position.y * CHUNK_SIZE;
        let dirt = Block::new(BlockType::DIRT);

        for cz in 0..CHUNK_SIZE {
            for cx in 0..CHUNK_SIZE {
                let height = self.height_at(cx as usize, cz as usize);
                for y in (height - COLUMN_DEPTH + 1)..=height {
                    if let Err(err) = field.set_block(base_x + cx, y, base_z + cz, dirt) {
                        warn!(
                            "Skipping terrain block in chunk {:?} at column ({}, {}): {}",
                            self.position, base_x + cx, base_z + cz, err
                        );
                    }
                }
            }
        }
    }
}

/// Deterministic terrain generator over a 2D noise function.
///
/// Any `noise::NoiseFn<f64, 2>` works; the engine uses seeded Perlin noise and
/// tests use `noise::Constant` for flat ground.
#[derive(Clone, Debug)]
pub struct TerrainGenerator<N = Perlin> {
    noise: N,
}

impl TerrainGenerator<Perlin> {
    /// Creates a generator sampling Perlin noise with the given seed.
    pub fn perlin(seed: u32) -> Self {
        TerrainGenerator::new(Perlin::new(seed))
    }
}

impl<N: NoiseFn<f64, 2>> TerrainGenerator<N> {
    /// Creates a generator sampling `noise`.
    pub fn new(noise: N) -> Self {
        TerrainGenerator { noise }
    }

    /// Surface height of the column at global `(x, z)`.
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .noise
            .get([x as f64 / NOISE_WAVELENGTH, z as f64 / NOISE_WAVELENGTH]);
        SURFACE_BASE_HEIGHT + (sample * SURFACE_AMPLITUDE).floor() as i32
    }

    /// Computes the surface height of every column in a chunk.
    pub fn column_heights(&self, position: Point2<i32>) -> ColumnHeights {
        let base_x = position.x * CHUNK_SIZE;
        let base_z = position.y * CHUNK_SIZE;
        let mut heights = Vec::with_capacity(CHUNK_COLUMN_COUNT);

        for cz in 0..CHUNK_SIZE {
            for cx in 0..CHUNK_SIZE {
                heights.push(self.column_height(base_x + cx, base_z + cz));
            }
        }

        ColumnHeights { position, heights }
    }

    /// Fills one chunk with terrain and marks it generated.
    ///
    /// # Panics
    /// Panics unless the chunk is `Pending`: a generated chunk must not be generated
    /// twice, and a claimed chunk belongs to a background task.
    pub fn generate_chunk(&self, field: &mut VoxelField, position: Point2<i32>) {
        let chunk = field.get_or_create_chunk(position);
        let state = chunk.generation_state();
        assert!(
            chunk.claim(),
            "chunk {:?} is {:?} and cannot be generated directly",
            position,
            state
        );

        self.column_heights(position).write_into(field);
        field.get_or_create_chunk(position).mark_generated();
    }

    /// Generates every chunk within Chebyshev `radius` of `center`.
    ///
    /// Chunks are created and filled first; all of them are marked generated only
    /// after the whole batch has been written. Chunks that are already generated,
    /// or claimed by a background task, are left alone.
    ///
    /// # Returns
    /// The chunk coordinates this call generated.
    pub fn spawn_area(
        &self,
        field: &mut VoxelField,
        center: Point2<i32>,
        radius: i32,
    ) -> Vec<Point2<i32>> {
        let side = (2 * radius + 1).max(0) as usize;
        let mut touched = Vec::with_capacity(side * side);

        for i in -radius..=radius {
            for k in -radius..=radius {
                let position = center + Vector2::new(i, k);
                if field.get_or_create_chunk(position).claim() {
                    self.column_heights(position).write_into(field);
                    touched.push(position);
                }
            }
        }

        for position in &touched {
            field.get_or_create_chunk(*position).mark_generated();
        }

        info!(
            "Generated {} chunks within radius {} of chunk {:?}",
            touched.len(),
            radius,
            center
        );

        touched
    }
}

#[cfg(test)]
mod tests {
    use noise::Constant;

    use super::*;
    use crate::engine_state::voxels::chunk::GenerationState;

    #[test]
    fn flat_noise_gives_base_height() {
        let terrain = TerrainGenerator::new(Constant::new(0.0));
        assert_eq!(terrain.column_height(0, 0), SURFACE_BASE_HEIGHT);
        assert_eq!(terrain.column_height(-300, 77), SURFACE_BASE_HEIGHT);
    }

    #[test]
    fn height_floors_the_scaled_sample() {
        assert_eq!(TerrainGenerator::new(Constant::new(0.25)).column_height(0, 0), 52);
        assert_eq!(TerrainGenerator::new(Constant::new(-0.25)).column_height(0, 0), 47);
    }

    #[test]
    fn generate_chunk_writes_three_block_columns() {
        let terrain = TerrainGenerator::new(Constant::new(0.0));
        let mut field = VoxelField::new();
        terrain.generate_chunk(&mut field, Point2::new(0, 0));

        for y in 48..=50 {
            assert!(!field.is_air(0, y, 0));
            assert!(!field.is_air(15, y, 15));
        }
        assert!(field.is_air(0, 47, 0));
        assert!(field.is_air(0, 51, 0));
        assert!(field.is_air(16, 50, 0));

        let chunk = field.get_chunk_at(Point2::new(0, 0)).unwrap();
        assert!(chunk.is_generated());
        assert_eq!(chunk.solid_count(), CHUNK_COLUMN_COUNT * COLUMN_DEPTH as usize);
        assert!(chunk
            .solid_blocks()
            .all(|(_, block)| block == Block::new(BlockType::DIRT)));
    }

    #[test]
    #[should_panic(expected = "is Generated and cannot be generated directly")]
    fn generating_a_chunk_twice_panics() {
        let terrain = TerrainGenerator::perlin(0);
        let mut field = VoxelField::new();
        terrain.generate_chunk(&mut field, Point2::new(1, 1));
        terrain.generate_chunk(&mut field, Point2::new(1, 1));
    }

    #[test]
    #[should_panic(expected = "is Claimed and cannot be generated directly")]
    fn generating_a_claimed_chunk_panics() {
        let terrain = TerrainGenerator::perlin(0);
        let mut field = VoxelField::new();
        assert!(field.claim_chunk(Point2::new(0, 0)));
        terrain.generate_chunk(&mut field, Point2::new(0, 0));
    }

    #[test]
    fn generation_is_deterministic() {
        let terrain = TerrainGenerator::perlin(7);
        let mut first = VoxelField::new();
        let mut second = VoxelField::new();
        terrain.generate_chunk(&mut first, Point2::new(-2, 3));
        terrain.generate_chunk(&mut second, Point2::new(-2, 3));

        let a = first.get_chunk_at(Point2::new(-2, 3)).unwrap();
        let b = second.get_chunk_at(Point2::new(-2, 3)).unwrap();
        assert_eq!(a.blocks, b.blocks);
        assert_eq!(a.solid_array, b.solid_array);
    }

    #[test]
    fn column_heights_depend_only_on_global_coordinates() {
        let terrain = TerrainGenerator::perlin(3);
        let left = terrain.column_heights(Point2::new(0, 0));
        let right = terrain.column_heights(Point2::new(1, 0));

        for cz in 0..CHUNK_SIZE {
            assert_eq!(left.height_at(15, cz as usize), terrain.column_height(15, cz));
            assert_eq!(right.height_at(0, cz as usize), terrain.column_height(16, cz));
        }
    }

    #[test]
    fn spawn_area_generates_the_full_square() {
        let terrain = TerrainGenerator::perlin(0);
        let mut field = VoxelField::new();
        let touched = terrain.spawn_area(&mut field, Point2::new(0, 0), DEFAULT_SPAWN_RADIUS);

        assert_eq!(touched.len(), 49);
        assert_eq!(field.chunks.len(), 49);
        assert!(field.chunks.values().all(|chunk| chunk.is_generated()));
        assert!(field.is_generated(Point2::new(-3, 3)));
        assert!(!field.is_generated(Point2::new(4, 0)));
    }

    #[test]
    fn spawn_area_skips_generated_and_claimed_chunks() {
        let terrain = TerrainGenerator::new(Constant::new(0.0));
        let mut field = VoxelField::new();
        terrain.generate_chunk(&mut field, Point2::new(0, 0));
        assert!(field.claim_chunk(Point2::new(1, 0)));

        let touched = terrain.spawn_area(&mut field, Point2::new(0, 0), 1);

        assert_eq!(touched.len(), 7);
        assert!(!touched.contains(&Point2::new(0, 0)));
        assert!(!touched.contains(&Point2::new(1, 0)));
        assert_eq!(
            field
                .get_chunk_at(Point2::new(1, 0))
                .unwrap()
                .generation_state(),
            GenerationState::Claimed
        );
        assert!(field.is_air(16, 50, 0));
    }

    #[test]
    fn out_of_height_columns_are_skipped() {
        let terrain = TerrainGenerator::new(Constant::new(30.0));
        let mut field = VoxelField::new();
        terrain.generate_chunk(&mut field, Point2::new(0, 0));

        assert_eq!(terrain.column_height(0, 0), 350);
        assert!(field.is_generated(Point2::new(0, 0)));
        assert_eq!(field.get_chunk_at(Point2::new(0, 0)).unwrap().solid_count(), 0);
        assert!(field.is_air(0, 255, 0));
    }
}
