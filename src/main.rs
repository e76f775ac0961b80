//! # Voxel Collision Demo Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! VOXEL_COLLISION_CONFIG=world.json RUST_LOG=debug cargo run --release
//! ```

fn main() {
    voxel_collision::run();
}
