//! # Voxel Task System
//!
//! Background tasks that produce voxel data. Terrain for newly streamed chunks is
//! computed here and written into the field on the main thread.

pub mod chunk_generation_task;
