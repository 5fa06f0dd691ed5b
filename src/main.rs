//! # Voxel Explorer Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

fn main() {
    voxel_explorer::run();
}
