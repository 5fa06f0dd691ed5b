#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Explorer
//!
//! The simulation core of a first-person voxel exploration game: procedurally
//! generated block terrain and a player that falls, jumps and lands on it.
//!
//! ## Key Modules
//!
//! * `application_state` - The `winit` host: window, keyboard input, fixed-timestep loop, config
//! * `engine_state` - The voxel field, terrain generation, collision and the player
//!
//! ## Architecture
//!
//! * The `VoxelField` is an explicitly owned value; every component that reads it
//!   is handed a reference
//! * Terrain is a pure function of global column coordinates, so chunks can be
//!   generated in any order, on any thread, without seams
//! * The player ticks at a fixed 60 Hz; only `Survival` mode obeys gravity
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_explorer::run();
//! }
//! ```

use application_state::{config::SimulationConfig, ApplicationState};
use log::{error, info};
use winit::event_loop::EventLoop;

pub mod application_state;
pub mod engine_state;

pub use engine_state::{
    camera_state::Camera,
    physics::CollisionResolver,
    player::{Mode, Player},
    voxels::{
        block::{block_type::BlockType, Block},
        chunk::{Chunk, GenerationState, CHUNK_SIZE, WORLD_HEIGHT},
        terrain::TerrainGenerator,
        world::{VoxelError, VoxelField},
    },
    EngineSettings, EngineState,
};

/// Initializes logging, loads the config and runs the event loop until exit.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = SimulationConfig::resolve(SimulationConfig::path_from_environment());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!("Could not create event loop: {}", err);
            return;
        }
    };

    let mut state = ApplicationState::new(config);

    if let Err(err) = event_loop.run_app(&mut state) {
        error!("Event loop terminated with an error: {}", err);
    }
}
