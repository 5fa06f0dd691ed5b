//! # Task Management System
//!
//! This module provides a small worker-thread pool for running work off the main
//! thread. Chunk terrain is computed here so that streaming new chunks around the
//! player never stalls the fixed-timestep simulation.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work that runs on a worker thread
//! - `TaskResult`: The result of a completed task, applied to the voxel field on the main thread
//! - `TaskChannel`: Communication channel between the main thread and one worker
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks and send back results
//! 4. Results are applied on the main thread in `process_completed_tasks()`
//! 5. Results can spawn new tasks
//!
//! ## Example Usage
//! ```rust,ignore
//! let mut task_manager = TaskManager::new(4);
//! task_manager.publish_task(Box::new(MyTask::new(...)));
//!
//! // In the main loop:
//! task_manager.process_completed_tasks(&mut world);
//! task_manager.process_queued_tasks();
//! ```

pub mod task;

use log::{debug, info};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use task::{Task, TaskResult};

use super::voxels::world::VoxelField;

/// A communication channel between the main thread and one worker thread.
///
/// The worker exits once `task_sender` is dropped, which happens when the owning
/// `TaskManager` is dropped.
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// # Fields
/// - `channels`: One channel per worker
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `current_channel`: Index for round-robin scheduling
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with `num_workers` worker threads.
    ///
    /// With zero workers every published task stays queued forever; that is only
    /// useful for tests.
    pub fn new(num_workers: usize) -> Self {
        info!(
            "Starting {} task workers, available parallelism: {:?}",
            num_workers,
            thread::available_parallelism()
        );

        let channels = (0..num_workers)
            .map(|_| {
                let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
                let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

                let worker = thread::spawn(move || {
                    while let Ok(task) = task_rx.recv() {
                        if result_tx.send(task.process()).is_err() {
                            break;
                        }
                    }
                });

                TaskChannel {
                    task_sender: task_tx,
                    result_receiver: result_rx,
                    num_tasks_in_flight: 0,
                    _worker: worker,
                }
            })
            .collect();

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Sends a task to a specific worker, handing it back if the worker is gone.
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(err) => Err(err.0),
        }
    }

    /// Finds the next worker below `MAX_TASKS_IN_FLIGHT`, round-robin from the last one used.
    fn find_available_channel(&self) -> Option<usize> {
        let count = self.channels.len();
        (0..count)
            .map(|offset| (self.current_channel + offset) % count)
            .find(|&idx| self.channels[idx].num_tasks_in_flight < MAX_TASKS_IN_FLIGHT)
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was sent to a worker immediately
    /// - `false` if it was queued because every worker is busy
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        let Some(channel_idx) = self.find_available_channel() else {
            self.queued_tasks.push_back(task);
            return false;
        };

        match self.try_send_task(task, channel_idx) {
            Ok(_) => {
                self.current_channel = (channel_idx + 1) % self.channels.len();
                true
            }
            Err(task) => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Moves queued tasks onto workers until the queue is empty or every worker is busy.
    ///
    /// Tasks are dispatched in FIFO order.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };

            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => {
                    // Worker disconnected; keep the task and stop for this frame.
                    self.queued_tasks.push_front(task);
                    return;
                }
            }
        }
    }

    /// Applies every finished result to `world` and schedules any follow-up tasks.
    ///
    /// Must be called from the main thread, which owns the voxel field.
    ///
    /// # Returns
    /// The number of results applied.
    pub fn process_completed_tasks(&mut self, world: &mut VoxelField) -> usize {
        let mut tasks_to_queue = Vec::new();
        let mut handled = 0;

        for channel in &mut self.channels {
            while let Ok(result) = channel.result_receiver.try_recv() {
                channel.num_tasks_in_flight -= 1;
                tasks_to_queue.extend(result.handle_result(world));
                handled += 1;
            }
        }

        if handled > 0 {
            debug!("Applied {} task results", handled);
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }

        handled
    }

    /// Tasks sent to workers whose results have not been applied yet.
    pub fn tasks_in_flight(&self) -> usize {
        self.channels
            .iter()
            .map(|channel| channel.num_tasks_in_flight)
            .sum()
    }

    /// Tasks waiting for a free worker.
    pub fn queued_task_count(&self) -> usize {
        self.queued_tasks.len()
    }

    /// `true` when nothing is queued or in flight.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.tasks_in_flight() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, Block};

    struct PlaceBlock(i32);

    struct PlaceBlockResult(i32);

    impl Task for PlaceBlock {
        fn process(&self) -> Box<dyn TaskResult + Send> {
            Box::new(PlaceBlockResult(self.0))
        }
    }

    impl TaskResult for PlaceBlockResult {
        fn handle_result(self: Box<Self>, world: &mut VoxelField) -> Vec<Box<dyn Task + Send>> {
            world
                .set_block(self.0, 10, 0, Block::new(BlockType::WHITE))
                .unwrap();
            if self.0 == 0 {
                vec![Box::new(PlaceBlock(100))]
            } else {
                Vec::new()
            }
        }
    }

    fn drain(manager: &mut TaskManager, world: &mut VoxelField) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !manager.is_idle() {
            assert!(Instant::now() < deadline, "tasks did not finish");
            manager.process_completed_tasks(world);
            manager.process_queued_tasks();
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn overflow_is_queued() {
        let mut manager = TaskManager::new(2);
        assert!(manager.publish_task(Box::new(PlaceBlock(1))));
        assert!(manager.publish_task(Box::new(PlaceBlock(2))));
        assert!(!manager.publish_task(Box::new(PlaceBlock(3))));
        assert_eq!(manager.queued_task_count(), 1);
        assert_eq!(manager.tasks_in_flight(), 2);
    }

    #[test]
    fn no_workers_keeps_everything_queued() {
        let mut manager = TaskManager::new(0);
        assert!(!manager.publish_task(Box::new(PlaceBlock(1))));
        manager.process_queued_tasks();
        assert_eq!(manager.queued_task_count(), 1);
        assert!(!manager.is_idle());
    }

    #[test]
    fn results_and_follow_ups_are_applied() {
        let mut manager = TaskManager::new(2);
        let mut world = VoxelField::new();
        for x in 0..5 {
            manager.publish_task(Box::new(PlaceBlock(x)));
        }

        drain(&mut manager, &mut world);

        for x in (0..5).chain([100]) {
            assert!(!world.is_air(x, 10, 0), "missing block at x = {}", x);
        }
        assert_eq!(world.at(100, 10, 0), Block::new(BlockType::WHITE));
    }
}
