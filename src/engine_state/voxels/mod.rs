//! # Voxel Module
//!
//! Storage and generation of the block world.
//!
//! ## Components
//!
//! * **Block**: material ids and the compact per-voxel record
//! * **Chunk**: a 16x16 full-height column of blocks, the unit of generation
//! * **World**: the `VoxelField`, a sparse map of chunks with global-coordinate queries
//! * **Terrain**: the deterministic height-map generator
//! * **Tasks**: background chunk generation
//!
//! ## Data Flow
//!
//! 1. The terrain generator fills the spawn area synchronously at startup
//! 2. As the player moves, chunks around them are claimed and generated on workers
//! 3. The player's tick reads the field through the collision resolver
//!
//! The field is only mutated on the main thread. Workers compute column heights
//! from the noise function alone and never see the field.

pub mod block;
pub mod chunk;
pub mod tasks;
pub mod terrain;
pub mod world;
