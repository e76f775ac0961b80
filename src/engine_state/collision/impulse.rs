//! # Collision Impulse Module
//!
//! Continuous collision detection between one moving box and one block, and
//! the ordering used to keep the most relevant of many such results.
//!
//! ## Sweep test
//!
//! For every axis the moving box has a *near gap* (distance to first touch)
//! and a *far gap* (distance until it has fully passed the block). Dividing by
//! the movement along that axis gives entry and exit times in unit time,
//! where 0 is the start of the tick and 1 its end. The boxes are in contact
//! during `[max(entry), min(exit))`; the axis that reaches `max(entry)` is the
//! collision axis, ties going to X, then Y, then Z.
//!
//! Faces that touch within `COLLISION_EPSILON` count as touching, not
//! overlapping. A contact where the box also only grazes the block on another
//! moving axis is an *edge contact*; at equal times it ranks behind face
//! contacts, so a box resting on a floor does not catch on the seams between
//! floor blocks.
//!
//! A flat box (a look ray) has no skin on the axes it does not move along: it
//! is inside a block there when it lies in the half-open cell `[min, max)`.

use std::cmp::Ordering;

use cgmath::{EuclideanSpace, Point3, Vector3};

use crate::engine_state::math::{Axis, CollisionAxes, AABB3};
use crate::engine_state::voxels::block::Block;

/// Contact skin in world units.
pub const COLLISION_EPSILON: f32 = 1e-4;

/// When, within the current tick, a moving box first touches a block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimeOfImpact {
    /// No contact during this tick.
    Never,
    /// First contact at this fraction of the tick, in `[0, 1]`.
    Within(f32),
    /// The box already overlaps the block at the start of the tick.
    Immediate,
}

impl TimeOfImpact {
    /// Whether no contact happens.
    pub fn never(&self) -> bool {
        matches!(self, TimeOfImpact::Never)
    }

    /// Whether contact happens at some point (including immediately).
    pub fn will(&self) -> bool {
        !self.never()
    }

    /// Whether contact happens at a time inside `[0, 1]`.
    pub fn in_unit_time(&self) -> bool {
        matches!(self, TimeOfImpact::Within(t) if (0.0..=1.0).contains(t))
    }

    /// Contact time for resolvable impacts.
    pub fn time(&self) -> Option<f32> {
        match *self {
            TimeOfImpact::Within(t) => Some(t),
            _ => None,
        }
    }
}

/// Outcome of sweeping a box against one block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionImpulse {
    /// When contact happens.
    pub time_of_impact: TimeOfImpact,
    /// The collided axis; empty unless the impact is resolvable.
    pub axes: CollisionAxes,
    /// Displacement that can be applied without penetrating the block.
    pub collision_free: Vector3<f32>,
    /// Movement left after the contact, with the collided axis removed.
    pub outstanding: Vector3<f32>,
    /// The box meets the block only along an edge or corner: on another
    /// moving axis it overlaps by no more than the skin at contact time.
    pub edge_contact: bool,
}

impl CollisionImpulse {
    /// The identity impulse: no contact, the whole movement is free.
    pub fn none(movement: Vector3<f32>) -> Self {
        CollisionImpulse {
            time_of_impact: TimeOfImpact::Never,
            axes: CollisionAxes::NONE,
            collision_free: movement,
            outstanding: Vector3::new(0.0, 0.0, 0.0),
            edge_contact: false,
        }
    }

    fn immediate(movement: Vector3<f32>) -> Self {
        CollisionImpulse {
            time_of_impact: TimeOfImpact::Immediate,
            ..Self::none(movement)
        }
    }

    /// Sweeps `moving` by `movement` against the static box `obstacle`.
    pub fn sweep(obstacle: &AABB3, moving: &AABB3, movement: Vector3<f32>) -> Self {
        let (c_min, c_max) = (obstacle.min(), obstacle.max());
        let (b_min, b_max) = (moving.min(), moving.max());

        let mut entry = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;
        let mut contact: Option<(Axis, f32)> = None;
        let mut approaches: [Option<(f32, f32)>; 3] = [None; 3];

        for axis in Axis::ALL {
            let v = axis.component(movement);
            let (b0, b1) = (axis.component(b_min.to_vec()), axis.component(b_max.to_vec()));
            let (c0, c1) = (axis.component(c_min.to_vec()), axis.component(c_max.to_vec()));

            if v == 0.0 {
                // A still axis must already overlap, or the pair never meets.
                if !overlaps_still_axis(b0, b1, c0, c1) {
                    return Self::none(movement);
                }
                continue;
            }

            let (near_gap, far_gap) = if v > 0.0 {
                (c0 - b1, c1 - b0)
            } else {
                (b0 - c1, b1 - c0)
            };
            if far_gap <= COLLISION_EPSILON {
                return Self::none(movement);
            }

            let speed = v.abs();
            let touching = near_gap >= -COLLISION_EPSILON;
            let axis_entry = if touching {
                near_gap.max(0.0) / speed
            } else {
                near_gap / speed
            };
            exit = exit.min(far_gap / speed);
            approaches[axis as usize] = Some((near_gap, speed));

            if axis_entry > entry {
                entry = axis_entry;
                contact = Some((axis, near_gap.max(0.0)));
            }
        }

        let Some((axis, gap)) = contact else {
            // Nothing moves and every axis overlaps.
            return Self::immediate(movement);
        };

        if entry >= exit || entry > 1.0 {
            return Self::none(movement);
        }
        if entry < 0.0 {
            return Self::immediate(movement);
        }

        let edge_contact = Axis::ALL
            .into_iter()
            .filter(|other| *other != axis)
            .filter_map(|other| approaches[other as usize])
            .any(|(near_gap, speed)| speed * entry - near_gap <= COLLISION_EPSILON);

        let v = axis.component(movement);
        let collision_free = axis.with_component(movement * entry, gap.copysign(v));
        let outstanding = axis.with_component(movement - collision_free, 0.0);

        CollisionImpulse {
            time_of_impact: TimeOfImpact::Within(entry),
            axes: CollisionAxes::from_axis(axis),
            collision_free,
            outstanding,
            edge_contact,
        }
    }

    /// Whether this impulse describes a contact the mover has to respect
    /// during this tick.
    pub fn is_resolvable(&self) -> bool {
        self.time_of_impact.in_unit_time() && !self.axes.is_empty()
    }

    /// Total relevance order: resolvable before unresolvable, then earlier
    /// time, then face contacts before edge contacts, then axis priority.
    /// `Less` means more relevant.
    pub fn cmp_relevance(&self, other: &Self) -> Ordering {
        match (self.relevance_key(), other.relevance_key()) {
            (Some((t_a, e_a, p_a)), Some((t_b, e_b, p_b))) => {
                t_a.total_cmp(&t_b).then(e_a.cmp(&e_b)).then(p_a.cmp(&p_b))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Whether this impulse strictly beats `other`.
    pub fn is_more_relevant_than(&self, other: &Self) -> bool {
        self.cmp_relevance(other) == Ordering::Less
    }

    fn relevance_key(&self) -> Option<(f32, bool, u8)> {
        if !self.is_resolvable() {
            return None;
        }
        let time = self.time_of_impact.time()?;
        let priority = self.axes.single_axis().map_or(u8::MAX, Axis::priority);
        Some((time, self.edge_contact, priority))
    }
}

/// Whether `[b0, b1]` overlaps the cell `[c0, c1]` on an axis the box does not
/// move along.
fn overlaps_still_axis(b0: f32, b1: f32, c0: f32, c1: f32) -> bool {
    if b1 > b0 {
        b1 - c0 > COLLISION_EPSILON && c1 - b0 > COLLISION_EPSILON
    } else {
        c0 <= b0 && b0 < c1
    }
}

/// Evaluates one block against a moving box.
///
/// Non-opaque blocks never collide. Opaque blocks are unit cubes at
/// `block_coord`.
pub fn process_collision(
    block: &Block,
    block_coord: Point3<i32>,
    moving: &AABB3,
    movement: Vector3<f32>,
) -> CollisionImpulse {
    if !block.is_opaque() {
        return CollisionImpulse::none(movement);
    }

    CollisionImpulse::sweep(&AABB3::unit_cube(block_coord), moving, movement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn player_at(x: f32, y: f32, z: f32) -> AABB3 {
        AABB3::new(Point3::new(x, y, z), Vector3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn passable_blocks_never_collide() {
        let moving = player_at(0.25, 0.25, 0.25);
        let movements = [
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(-1.0, 2.0, 0.5),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.75, 0.75, 0.75),
        ];
        for block_type in [BlockType::AIR, BlockType::WATER] {
            for movement in movements {
                for coord in [Point3::new(0, 0, 0), Point3::new(1, 0, 0), Point3::new(1, 1, 1)] {
                    let impulse = process_collision(&Block::new(block_type), coord, &moving, movement);
                    assert_eq!(impulse, CollisionImpulse::none(movement));
                }
            }
        }
    }

    #[test]
    fn head_on_hit_stops_at_the_face() {
        let moving = player_at(0.25, 0.25, 0.25);
        let impulse = process_collision(
            &Block::new(BlockType::DIRT),
            Point3::new(2, 0, 0),
            &moving,
            Vector3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(impulse.time_of_impact, TimeOfImpact::Within(0.625));
        assert_eq!(impulse.axes, CollisionAxes::X);
        assert_eq!(impulse.collision_free, Vector3::new(1.25, 0.0, 0.0));
        assert_eq!(impulse.outstanding, Vector3::new(0.0, 0.0, 0.0));
        assert!(impulse.is_resolvable());
    }

    #[test]
    fn negative_movement_hits_the_far_face() {
        let moving = player_at(3.25, 0.25, 0.25);
        let impulse = CollisionImpulse::sweep(
            &AABB3::unit_cube(Point3::new(1, 0, 0)),
            &moving,
            Vector3::new(-2.0, 0.5, 0.0),
        );
        assert_eq!(impulse.axes, CollisionAxes::X);
        assert_eq!(impulse.time_of_impact, TimeOfImpact::Within(0.625));
        assert_eq!(impulse.collision_free.x, -1.25);
        assert_eq!(impulse.outstanding, Vector3::new(0.0, 0.1875, 0.0));
    }

    #[test]
    fn diagonal_tie_goes_to_x() {
        let moving = player_at(0.25, 0.25, 0.25);
        let impulse = CollisionImpulse::sweep(
            &AABB3::unit_cube(Point3::new(1, 1, 0)),
            &moving,
            Vector3::new(1.0, 1.0, 0.0),
        );
        assert_eq!(impulse.time_of_impact, TimeOfImpact::Within(0.25));
        assert_eq!(impulse.axes, CollisionAxes::X);
        assert_eq!(impulse.outstanding, Vector3::new(0.0, 0.75, 0.0));
        assert!(impulse.edge_contact);
    }

    #[test]
    fn floor_seam_is_an_edge_contact_and_loses_the_tie() {
        let resting = AABB3::new(Point3::new(2.5, 0.0, 8.25), Vector3::new(0.5, 1.75, 0.5));
        let movement = Vector3::new(0.5, -0.1, 0.0);

        let under = CollisionImpulse::sweep(&AABB3::unit_cube(Point3::new(2, -1, 8)), &resting, movement);
        assert_eq!(under.axes, CollisionAxes::Y);
        assert_eq!(under.time_of_impact, TimeOfImpact::Within(0.0));
        assert!(!under.edge_contact);

        let seam = CollisionImpulse::sweep(&AABB3::unit_cube(Point3::new(3, -1, 8)), &resting, movement);
        assert_eq!(seam.axes, CollisionAxes::X);
        assert_eq!(seam.time_of_impact, TimeOfImpact::Within(0.0));
        assert!(seam.edge_contact);

        assert!(under.is_more_relevant_than(&seam));
        assert!(!seam.is_more_relevant_than(&under));
    }

    #[test]
    fn flat_box_on_a_face_plane_belongs_to_the_cell_above() {
        let ray = AABB3::point(Point3::new(0.5, 2.0, 1.5));
        let movement = Vector3::new(8.0, 0.0, 0.0);

        let upper = CollisionImpulse::sweep(&AABB3::unit_cube(Point3::new(3, 2, 1)), &ray, movement);
        assert_eq!(upper.axes, CollisionAxes::X);
        assert_eq!(upper.time_of_impact, TimeOfImpact::Within(0.3125));

        let lower = CollisionImpulse::sweep(&AABB3::unit_cube(Point3::new(3, 1, 1)), &ray, movement);
        assert!(lower.time_of_impact.never());
    }

    #[test]
    fn moving_away_or_sliding_past_never_collides() {
        let resting = AABB3::new(Point3::new(0.25, 1.0, 0.25), Vector3::new(0.5, 1.0, 0.5));
        let floor = AABB3::unit_cube(Point3::new(0, 0, 0));

        let slide = CollisionImpulse::sweep(&floor, &resting, Vector3::new(1.0, 0.0, 0.0));
        assert!(slide.time_of_impact.never());

        let lift = CollisionImpulse::sweep(&floor, &resting, Vector3::new(0.0, 1.0, 0.0));
        assert!(lift.time_of_impact.never());

        let press = CollisionImpulse::sweep(&floor, &resting, Vector3::new(0.5, -1.0, 0.0));
        assert_eq!(press.time_of_impact, TimeOfImpact::Within(0.0));
        assert_eq!(press.axes, CollisionAxes::Y);
        assert_eq!(press.collision_free, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(press.outstanding, Vector3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn contact_beyond_the_tick_is_ignored() {
        let moving = player_at(0.25, 0.25, 0.25);
        let impulse = CollisionImpulse::sweep(
            &AABB3::unit_cube(Point3::new(5, 0, 0)),
            &moving,
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert_eq!(impulse.time_of_impact, TimeOfImpact::Never);
        assert!(!impulse.is_resolvable());
    }

    #[test]
    fn starting_inside_is_immediate_and_unresolvable() {
        let moving = player_at(1.25, 0.25, 0.25);
        let block = AABB3::unit_cube(Point3::new(1, 0, 0));

        let still = CollisionImpulse::sweep(&block, &moving, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(still.time_of_impact, TimeOfImpact::Immediate);

        let moving_on = CollisionImpulse::sweep(&block, &moving, Vector3::new(0.125, 0.0, 0.0));
        assert_eq!(moving_on.time_of_impact, TimeOfImpact::Immediate);
        assert!(moving_on.time_of_impact.will());
        assert!(!moving_on.is_resolvable());
    }

    #[test]
    fn relevance_prefers_earlier_then_axis_priority() {
        let movement = Vector3::new(1.0, 1.0, 1.0);
        let early_y = CollisionImpulse {
            time_of_impact: TimeOfImpact::Within(0.25),
            axes: CollisionAxes::Y,
            collision_free: movement * 0.25,
            outstanding: movement * 0.75,
            edge_contact: false,
        };
        let early_x = CollisionImpulse {
            axes: CollisionAxes::X,
            ..early_y
        };
        let late_x = CollisionImpulse {
            time_of_impact: TimeOfImpact::Within(0.5),
            ..early_x
        };
        let edge_x = CollisionImpulse {
            edge_contact: true,
            ..early_x
        };
        let none = CollisionImpulse::none(movement);
        let immediate = CollisionImpulse::immediate(movement);

        assert!(early_x.is_more_relevant_than(&early_y));
        assert!(!early_y.is_more_relevant_than(&early_x));
        assert!(early_y.is_more_relevant_than(&late_x));
        assert!(late_x.is_more_relevant_than(&none));
        assert!(!none.is_more_relevant_than(&immediate));
        assert!(!immediate.is_more_relevant_than(&none));
        assert!(!early_x.is_more_relevant_than(&early_x));
        assert!(early_y.is_more_relevant_than(&edge_x));
        assert!(edge_x.is_more_relevant_than(&late_x));
    }
}
