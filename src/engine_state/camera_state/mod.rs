//! # Camera State
//!
//! Camera position and orientation tracking. The player owns a `Camera` and moves
//! it; renderers read it for the view matrix.

pub mod camera;

pub use camera::Camera;
