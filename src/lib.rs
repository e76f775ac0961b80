#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Collision
//!
//! Swept box collision against a chunked voxel world: how far a player can
//! move this tick, which block they look at, and where a new block would go.
//!
//! ## Key Modules
//!
//! * `core` - Shared read-write resource container
//! * `engine_state` - World, camera and the collision core
//! * `config` - JSON configuration
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Point3, Vector3};
//! use voxel_collision::{ChunkGenerationMethod, MovementController, World, AABB3};
//!
//! let mut world = World::new(ChunkGenerationMethod::Flat { surface_height: 0 });
//! world.add_chunks_around(Point3::new(0, 0, 0), 1);
//!
//! let controller = MovementController::new(AABB3::new(
//!     Point3::new(-0.25, -1.5, -0.25),
//!     Vector3::new(0.5, 1.75, 0.5),
//! ));
//! let response = controller
//!     .calculate_movement(&world, Point3::new(8.5, 1.5, 8.5), Vector3::new(0.0, -3.0, 0.0))
//!     .unwrap();
//! assert_eq!(response.new_camera_pos, Point3::new(8.5, 1.5, 8.5));
//! ```
//!
//! The headless demo binary walks a player through a generated world:
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use engine_state::{EngineState, PlayerAction};
use log::info;
use web_time::{Duration, Instant};

pub mod config;
pub mod core;
pub mod engine_state;

pub use config::{ConfigError, PhysicsConfig, WorldConfig};
pub use engine_state::collision::{
    find_adding_block, find_pointing_block, find_pointing_face, process_collision, scan, CollisionError,
    CollisionImpulse, MissingChunkPolicy, MovementController, MovementResponse, SweepHit, TimeOfImpact,
    COLLISION_EPSILON, MAX_GRID_COORDINATE, MAX_RESOLUTION_ITERATIONS, MAX_SWEEP_EXTENT,
};
pub use engine_state::math::{Axis, CollisionAxes, Line3, AABB3};
pub use engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType, Block};
pub use engine_state::voxels::chunk::{Chunk, ChunkGenerationMethod, ChunkState, CHUNK_DIMENSION};
pub use engine_state::voxels::chunk_grid::ChunkGrid;
pub use engine_state::voxels::world::World;

/// Fixed simulation step of the demo.
pub const DEMO_TICK: Duration = Duration::from_millis(50);

/// One scripted step: hold `actions` for `ticks` ticks.
struct ScriptStep {
    ticks: u32,
    actions: PlayerAction,
}

fn demo_script() -> Vec<ScriptStep> {
    let walk = |ticks, actions| ScriptStep { ticks, actions };
    vec![
        walk(1, PlayerAction { move_down: true, ..PlayerAction::default() }),
        walk(40, PlayerAction { move_forward: true, move_down: true, ..PlayerAction::default() }),
        walk(20, PlayerAction { move_right: true, move_forward: true, move_down: true, ..PlayerAction::default() }),
        walk(10, PlayerAction { rotate_view: Some((0.0, 20.0)), ..PlayerAction::default() }),
        walk(1, PlayerAction { break_block: true, ..PlayerAction::default() }),
        walk(1, PlayerAction { place_block: Some(BlockType::WOOD), ..PlayerAction::default() }),
        walk(20, PlayerAction { move_backward: true, move_up: true, ..PlayerAction::default() }),
    ]
}

/// Runs the headless demo.
///
/// Loads the config named by `VOXEL_COLLISION_CONFIG` (defaults otherwise),
/// generates the world and plays a short scripted walk, logging where the
/// player ends up and what it collided with.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match PhysicsConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            log::error!("could not load config: {}", error);
            return;
        }
    };

    let started = Instant::now();
    let mut engine_state = EngineState::new(config);
    info!("world ready in {:?}", started.elapsed());

    let mut slowest = Duration::ZERO;
    let mut ticks = 0u32;
    for step in demo_script() {
        engine_state.set_player_actions(step.actions);
        for _ in 0..step.ticks {
            let tick_started = Instant::now();
            if let Some(updates) = engine_state.process_input(DEMO_TICK) {
                if !updates.collided.is_empty() {
                    log::debug!("tick {}: collided on {:?}", ticks, updates.collided);
                }
            }
            slowest = slowest.max(tick_started.elapsed());
            ticks += 1;
        }
        info!(
            "after {} ticks: camera at {:?}, looking at {:?}",
            ticks,
            engine_state.camera_state.camera.position,
            engine_state.pointing_block()
        );
    }

    info!("{} ticks, slowest tick {:?}, total {:?}", ticks, slowest, started.elapsed());
}
