//! # Engine State Module
//!
//! The simulation core of the explorer: the voxel world, the player moving through
//! it, and the machinery that keeps terrain generated around the player.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns every subsystem and runs the fixed-timestep tick
//! * `camera_state` - The eye point and orientation
//! * `physics` - Collision and ground detection against the voxel field
//! * `player` - Player movement state, tick and key handling
//! * `task_management` - Worker threads for background chunk generation
//! * `voxels` - Blocks, chunks, the voxel field and terrain generation
//!
//! ## Frame Flow
//!
//! 1. Key events go straight to `EngineState::handle_key`
//! 2. `EngineState::tick` runs once per 1/60 s step: the player ticks, then chunks
//!    around the player's current chunk are claimed and queued for generation
//! 3. `EngineState::process_tasks` applies finished chunks and feeds idle workers

use cgmath::{Point2, Point3, Vector2};
use log::{debug, info};
use winit::{event::ElementState, keyboard::KeyCode};

use player::{Mode, Player};
use task_management::TaskManager;
use voxels::{tasks::chunk_generation_task::ChunkGenerationTask, terrain::TerrainGenerator, world::VoxelField};

pub mod camera_state;
pub mod physics;
pub mod player;
pub mod task_management;
pub mod voxels;

/// Chebyshev radius, in chunks, kept generated around the player by default.
///
/// Wider than the spawn area, so the outer ring is generated in the background
/// while the player is already simulated.
pub const DEFAULT_STREAM_RADIUS: i32 = 6;

/// Settings the engine is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Seed for the terrain noise.
    pub seed: u32,
    /// Chebyshev radius, in chunks, generated synchronously at startup.
    pub spawn_radius: i32,
    /// Chebyshev radius, in chunks, kept generated around the player afterwards.
    pub stream_radius: i32,
    /// Number of background generation threads.
    pub worker_threads: usize,
    /// Initial eye point.
    pub spawn_position: Point3<f32>,
    /// Initial movement mode.
    pub initial_mode: Mode,
}

/// The main state container for the simulation.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_explorer::{EngineSettings, EngineState, Mode};
///
/// let mut engine = EngineState::new(EngineSettings {
///     seed: 0,
///     spawn_radius: 1,
///     stream_radius: 1,
///     worker_threads: 1,
///     spawn_position: Point3::new(0.0, 64.0, 0.0),
///     initial_mode: Mode::Creative,
/// });
///
/// engine.tick();
/// engine.process_tasks();
/// assert_eq!(engine.world.chunks.len(), 9);
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: VoxelField,
    /// The player
    pub player: Player,
    /// The terrain generator shared by spawn and streaming
    terrain: TerrainGenerator,
    /// Task manager for background generation
    task_manager: TaskManager,
    /// Chunk radius kept generated around the player
    stream_radius: i32,
    /// Chunk the player occupied after the last tick
    current_player_chunk_position: Point2<i32>,
}

impl EngineState {
    /// Creates the engine and synchronously generates the spawn area around the player.
    ///
    /// Chunks within the stream radius but outside the spawn area are queued for
    /// background generation straight away.
    pub fn new(settings: EngineSettings) -> Self {
        let terrain = TerrainGenerator::perlin(settings.seed);
        let player = Player::new(settings.spawn_position, settings.initial_mode);
        let mut world = VoxelField::new();

        let spawn_chunk = VoxelField::to_chunk(player.block_position());
        terrain.spawn_area(&mut world, spawn_chunk, settings.spawn_radius);

        info!(
            "Engine ready: seed {}, player at {:?} in {:?} mode",
            settings.seed,
            player.eye(),
            player.mode()
        );

        let mut engine = Self {
            world,
            player,
            terrain,
            task_manager: TaskManager::new(settings.worker_threads),
            stream_radius: settings.stream_radius,
            current_player_chunk_position: spawn_chunk,
        };
        engine.stream_chunks_around(spawn_chunk);
        engine
    }

    /// Forwards one key event to the player.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        self.player.handle_key(key, state);
    }

    /// Runs one fixed simulation step.
    pub fn tick(&mut self) {
        self.player.tick(&self.world);

        let chunk_position = VoxelField::to_chunk(self.player.block_position());
        if chunk_position != self.current_player_chunk_position {
            debug!(
                "Player moved from chunk {:?} to {:?}",
                self.current_player_chunk_position, chunk_position
            );
            self.current_player_chunk_position = chunk_position;
            self.stream_chunks_around(chunk_position);
        }
    }

    /// Claims every pending chunk within the stream radius and queues its generation.
    ///
    /// # Returns
    /// The number of chunks queued.
    pub fn stream_chunks_around(&mut self, center: Point2<i32>) -> usize {
        let mut queued = 0;
        let radius = self.stream_radius;

        for i in -radius..=radius {
            for k in -radius..=radius {
                let position = center + Vector2::new(i, k);
                if self.world.claim_chunk(position) {
                    self.task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                        self.terrain.clone(),
                        position,
                    )));
                    queued += 1;
                }
            }
        }

        if queued > 0 {
            debug!("Queued {} chunks around {:?}", queued, center);
        }
        queued
    }

    /// Applies finished background work and dispatches queued tasks.
    pub fn process_tasks(&mut self) {
        self.task_manager.process_completed_tasks(&mut self.world);
        self.task_manager.process_queued_tasks();
    }

    /// `true` when no chunk generation is queued or running.
    pub fn is_idle(&self) -> bool {
        self.task_manager.is_idle()
    }

    /// One-line description of the player for status displays.
    pub fn status_line(&self) -> String {
        let eye = self.player.eye();
        format!(
            "({:.1}, {:.1}, {:.1}) {:?}{}",
            eye.x,
            eye.y,
            eye.z,
            self.player.mode(),
            if self.player.is_grounded() { " grounded" } else { "" }
        )
    }
}
