//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system,
//! which runs work on background threads and applies the results on the main thread.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the main thread with the voxel field
//! 5. The result can spawn new tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred between threads
//! - `TaskResult` must be `Send` to be transferred back to the main thread
//! - Tasks never touch the voxel field; only results do, on the main thread

use crate::engine_state::voxels::world::VoxelField;

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own all the data they need. They must not hold references to
/// state the main thread mutates.
pub trait Task: Send {
    /// Processes the task and returns a result to be applied on the main thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`, applied on the main thread.
pub trait TaskResult: Send {
    /// Applies the result to the voxel field.
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty).
    fn handle_result(self: Box<Self>, world: &mut VoxelField) -> Vec<Box<dyn Task + Send>>;
}
