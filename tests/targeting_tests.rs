use std::collections::HashMap;

use cgmath::{Point3, Vector3};
use voxel_collision::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn world_with(blocks: &[Point3<i32>]) -> World {
    let mut world = World::new(ChunkGenerationMethod::Empty);
    world.add_chunks_around(Point3::new(0, 0, 0), 1);
    for block in blocks {
        world.set_block_at(*block, BlockType::WHITE);
    }
    world
}

#[test]
fn straight_ray_finds_the_block_three_cells_ahead() {
    init_logging();
    let world = world_with(&[Point3::new(3, 0, 0)]);
    let look = Line3::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(5.0, 0.0, 0.0));

    assert_eq!(find_pointing_block(&world, &look).unwrap(), Some(Point3::new(3, 0, 0)));
    assert_eq!(find_adding_block(&world, &look).unwrap(), Some(Point3::new(2, 0, 0)));
}

#[test]
fn empty_range_points_at_nothing() {
    init_logging();
    let world = world_with(&[Point3::new(7, 0, 0), Point3::new(0, 3, 0)]);
    let look = Line3::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(5.0, 0.0, 0.0));

    assert_eq!(find_pointing_block(&world, &look).unwrap(), None);
    assert_eq!(find_pointing_face(&world, &look).unwrap(), None);
    assert_eq!(find_adding_block(&world, &look).unwrap(), None);
}

#[test]
fn placement_is_in_front_of_the_struck_face() {
    init_logging();
    let world = world_with(&[Point3::new(5, 5, 5)]);
    let look = Line3::new(Point3::new(8.5, 5.5, 5.5), Vector3::new(-5.0, 0.0, 0.0));

    assert_eq!(
        find_pointing_face(&world, &look).unwrap(),
        Some((Point3::new(5, 5, 5), BlockSide::RIGHT))
    );
    assert_eq!(find_adding_block(&world, &look).unwrap(), Some(Point3::new(6, 5, 5)));
}

#[test]
fn rays_along_z_strike_front_and_back_faces() {
    init_logging();
    let world = world_with(&[Point3::new(4, 4, 3)]);

    let forward = Line3::new(Point3::new(4.5, 4.5, 0.5), Vector3::new(0.0, 0.0, 5.0));
    assert_eq!(
        find_pointing_face(&world, &forward).unwrap(),
        Some((Point3::new(4, 4, 3), BlockSide::BACK))
    );
    assert_eq!(find_adding_block(&world, &forward).unwrap(), Some(Point3::new(4, 4, 2)));

    let backward = Line3::new(Point3::new(4.5, 4.5, 7.5), Vector3::new(0.0, 0.0, -5.0));
    assert_eq!(find_adding_block(&world, &backward).unwrap(), Some(Point3::new(4, 4, 4)));
}

#[test]
fn rays_cross_into_negative_chunks() {
    init_logging();
    let world = world_with(&[Point3::new(-3, 0, 0)]);
    let look = Line3::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(-5.0, 0.0, 0.0));

    assert_eq!(find_pointing_block(&world, &look).unwrap(), Some(Point3::new(-3, 0, 0)));
    assert_eq!(find_adding_block(&world, &look).unwrap(), Some(Point3::new(-2, 0, 0)));
}

#[test]
fn unloaded_and_unprepared_chunks_are_see_through() {
    init_logging();
    let mut grid = HashMap::new();
    let mut hidden = Chunk::solid(&Point3::new(0, 0, 0));
    hidden.state = ChunkState::NotLoaded;
    grid.insert(Point3::new(0, 0, 0), hidden);

    let look = Line3::new(Point3::new(2.5, 2.5, 2.5), Vector3::new(30.0, 0.0, 0.0));
    assert_eq!(find_pointing_block(&grid, &look).unwrap(), None);
}

#[test]
fn look_line_from_a_camera_targets_the_ground() {
    init_logging();
    let mut world = World::new(ChunkGenerationMethod::Flat { surface_height: 0 });
    world.add_chunks_around(Point3::new(0, 0, 0), 1);

    let look = Line3::from_direction(Point3::new(8.5, 1.5, 8.5), Vector3::new(0.0, -1.0, 0.0), 8.0);
    assert_eq!(
        find_pointing_face(&world, &look).unwrap(),
        Some((Point3::new(8, -1, 8), BlockSide::TOP))
    );
    assert_eq!(find_adding_block(&world, &look).unwrap(), Some(Point3::new(8, 0, 8)));
}

#[test]
fn ray_along_the_seam_between_stacked_blocks_still_hits() {
    init_logging();
    let mut wall = Vec::new();
    for y in 0..4 {
        for z in 0..4 {
            wall.push(Point3::new(3, y, z));
        }
    }
    let world = world_with(&wall);
    let look = Line3::new(Point3::new(0.5, 2.0, 1.5), Vector3::new(8.0, 0.0, 0.0));

    assert_eq!(find_pointing_block(&world, &look).unwrap(), Some(Point3::new(3, 2, 1)));
    assert_eq!(
        find_pointing_face(&world, &look).unwrap(),
        Some((Point3::new(3, 2, 1), BlockSide::LEFT))
    );
    assert_eq!(find_adding_block(&world, &look).unwrap(), Some(Point3::new(2, 2, 1)));
}
