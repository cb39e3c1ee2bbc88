//! Voxel raycasting and break/place targeting.
//!
//! The ray steps cell by cell along its direction (amanatides-woo style
//! traversal), stopping at the first solid block. Targeting derives the
//! breakable cell (the hit itself) and the placement cell (one step out
//! along the hit face normal) from that hit.

use glam::{IVec3, Vec3};
use terracube_core::math::{Aabb, Ray};
use terracube_core::types::BlockSource;

/// Hard cap on traversal steps, above what any in-range ray can need.
const MAX_STEPS: usize = 256;

/// Result of a raycast against the voxel grid.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The solid cell that was hit.
    pub cell: IVec3,
    /// Normal of the face the ray entered through. Zero if the ray
    /// started inside a solid cell.
    pub normal: IVec3,
    /// Distance from the ray origin to the entry face.
    pub distance: f32,
}

/// Break/place target pair under the view ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Cell to highlight and break.
    pub highlight: IVec3,
    /// Cell a placed block would occupy.
    pub place: IVec3,
}

/// Cast a ray against the voxel grid, returning the first solid cell
/// within `max_distance`.
pub fn raycast(
    world: &impl BlockSource,
    ray: Ray,
    max_distance: f32,
) -> Option<RaycastHit> {
    let dir = ray.direction;
    let mut cell = ray.origin.floor().as_ivec3();

    let step = IVec3::new(
        if dir.x > 0.0 { 1 } else { -1 },
        if dir.y > 0.0 { 1 } else { -1 },
        if dir.z > 0.0 { 1 } else { -1 },
    );

    // Ray distance to cross one cell on each axis.
    let t_delta = Vec3::new(
        if dir.x == 0.0 { f32::INFINITY } else { (1.0 / dir.x).abs() },
        if dir.y == 0.0 { f32::INFINITY } else { (1.0 / dir.y).abs() },
        if dir.z == 0.0 { f32::INFINITY } else { (1.0 / dir.z).abs() },
    );

    // Ray distance to the first boundary crossing on each axis.
    let mut t_max = Vec3::new(
        axis_t_max(ray.origin.x, cell.x, dir.x),
        axis_t_max(ray.origin.y, cell.y, dir.y),
        axis_t_max(ray.origin.z, cell.z, dir.z),
    );

    let mut normal = IVec3::ZERO;
    let mut distance = 0.0;

    for _ in 0..MAX_STEPS {
        if world.block_at(cell).is_solid() {
            return Some(RaycastHit {
                cell,
                normal,
                distance,
            });
        }

        if t_max.x < t_max.y && t_max.x < t_max.z {
            cell.x += step.x;
            distance = t_max.x;
            t_max.x += t_delta.x;
            normal = IVec3::new(-step.x, 0, 0);
        } else if t_max.y < t_max.z {
            cell.y += step.y;
            distance = t_max.y;
            t_max.y += t_delta.y;
            normal = IVec3::new(0, -step.y, 0);
        } else {
            cell.z += step.z;
            distance = t_max.z;
            t_max.z += t_delta.z;
            normal = IVec3::new(0, 0, -step.z);
        }

        if distance > max_distance {
            break;
        }
    }

    None
}

fn axis_t_max(origin: f32, cell: i32, dir: f32) -> f32 {
    if dir > 0.0 {
        ((cell + 1) as f32 - origin) / dir
    } else if dir < 0.0 {
        (origin - cell as f32) / -dir
    } else {
        f32::INFINITY
    }
}

/// Select the block under the view ray for break/place actions.
///
/// The highlight cell sits just behind the hit surface, the place cell
/// just in front of it along the face normal.
pub fn pick_target(
    world: &impl BlockSource,
    origin: Vec3,
    forward: Vec3,
    max_range: f32,
) -> Option<Target> {
    let hit = raycast(world, Ray::new(origin, forward), max_range)?;
    Some(Target {
        highlight: hit.cell,
        place: hit.cell + hit.normal,
    })
}

/// A block may only be placed where it does not trap the player inside it.
#[must_use]
pub fn place_allowed(place: IVec3, player: &Aabb) -> bool {
    !Aabb::unit_cube(place).intersects(player)
}
