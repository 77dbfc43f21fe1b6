//! Spatial query service.
//!
//! Circle and box overlap plus raycasts against circle colliders, filterable
//! by faction. This is the only way AI code looks at the world's geometry;
//! systems collect results first and mutate afterwards.

use glam::DVec2;
use hecs::{Entity, World};

use emberfall_core::components::{AgentTag, Collider, Health, Hero};
use emberfall_core::constants::HERO_ID;
use emberfall_core::enums::Faction;
use emberfall_core::types::Position;

/// Faction filter applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactionFilter {
    Any,
    Only(Faction),
    /// Entities the given faction deals damage to.
    HostileTo(Faction),
}

impl FactionFilter {
    pub fn matches(&self, faction: Faction) -> bool {
        match self {
            FactionFilter::Any => true,
            FactionFilter::Only(f) => *f == faction,
            FactionFilter::HostileTo(f) => f.hostile_to() == Some(faction),
        }
    }
}

/// An entity returned by an overlap query.
#[derive(Debug, Clone, Copy)]
pub struct SpatialHit {
    pub entity: Entity,
    /// Center-to-center distance from the query origin.
    pub distance: f64,
}

/// A raycast result.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub entity: Entity,
    /// Distance along the ray to the entry point.
    pub distance: f64,
}

/// Entities whose collider overlaps the query circle, nearest first.
pub fn query_circle(
    world: &World,
    origin: Position,
    radius: f64,
    filter: FactionFilter,
) -> Vec<SpatialHit> {
    let mut hits = Vec::new();
    for (entity, (pos, collider, faction)) in
        world.query::<(&Position, &Collider, &Faction)>().iter()
    {
        if !filter.matches(*faction) {
            continue;
        }
        let distance = origin.range_to(pos);
        if distance <= radius + collider.radius {
            hits.push(SpatialHit { entity, distance });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Entities whose collider overlaps an axis-aligned box centered at `center`.
pub fn query_box(
    world: &World,
    center: Position,
    half_width: f64,
    half_height: f64,
    filter: FactionFilter,
) -> Vec<SpatialHit> {
    let mut hits = Vec::new();
    for (entity, (pos, collider, faction)) in
        world.query::<(&Position, &Collider, &Faction)>().iter()
    {
        if !filter.matches(*faction) {
            continue;
        }
        // Closest point on the box to the collider center.
        let cx = pos.x.clamp(center.x - half_width, center.x + half_width);
        let cy = pos.y.clamp(center.y - half_height, center.y + half_height);
        let dx = pos.x - cx;
        let dy = pos.y - cy;
        if dx * dx + dy * dy <= collider.radius * collider.radius {
            hits.push(SpatialHit {
                entity,
                distance: center.range_to(pos),
            });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest collider hit by a ray, if any within `max_distance`.
pub fn raycast(
    world: &World,
    origin: Position,
    direction: DVec2,
    max_distance: f64,
    filter: FactionFilter,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == DVec2::ZERO {
        return None;
    }

    let mut nearest: Option<RayHit> = None;
    for (entity, (pos, collider, faction)) in
        world.query::<(&Position, &Collider, &Faction)>().iter()
    {
        if !filter.matches(*faction) {
            continue;
        }
        let to_center = pos.as_dvec2() - origin.as_dvec2();
        let along = to_center.dot(dir);
        if along < 0.0 {
            continue;
        }
        let closest_sq = to_center.length_squared() - along * along;
        let r_sq = collider.radius * collider.radius;
        if closest_sq > r_sq {
            continue;
        }
        let entry = along - (r_sq - closest_sq).sqrt();
        let entry = entry.max(0.0);
        if entry > max_distance {
            continue;
        }
        if nearest.map(|n| entry < n.distance).unwrap_or(true) {
            nearest = Some(RayHit {
                entity,
                distance: entry,
            });
        }
    }
    nearest
}

/// Line of sight between two points, considering only Neutral blockers
/// (arena obstacles).
pub fn los_clear(world: &World, from: &Position, to: &Position) -> bool {
    let delta = to.as_dvec2() - from.as_dvec2();
    let distance = delta.length();
    if distance < 1e-9 {
        return true;
    }
    match raycast(
        world,
        *from,
        delta / distance,
        distance,
        FactionFilter::Only(Faction::Neutral),
    ) {
        Some(hit) => hit.distance >= distance,
        None => true,
    }
}

/// A unit (hero or agent) snapshot used for targeting and homing.
#[derive(Debug, Clone, Copy)]
pub struct UnitRef {
    pub entity: Entity,
    pub id: u32,
    pub position: Position,
    pub faction: Faction,
    pub radius: f64,
    pub alive: bool,
}

/// Collect every unit in the world. Read-only; callers take this before any
/// mutable pass so homing and perception see one consistent snapshot.
pub fn collect_units(world: &World) -> Vec<UnitRef> {
    let mut units = Vec::new();
    for (entity, (_hero, pos, faction, collider, health)) in world
        .query::<(&Hero, &Position, &Faction, &Collider, &Health)>()
        .iter()
    {
        units.push(UnitRef {
            entity,
            id: HERO_ID,
            position: *pos,
            faction: *faction,
            radius: collider.radius,
            alive: !health.dead,
        });
    }
    for (entity, (tag, pos, faction, collider, health)) in world
        .query::<(&AgentTag, &Position, &Faction, &Collider, &Health)>()
        .iter()
    {
        units.push(UnitRef {
            entity,
            id: tag.id,
            position: *pos,
            faction: *faction,
            radius: collider.radius,
            alive: !health.dead,
        });
    }
    units
}

/// Look up a unit by id.
pub fn find_unit(units: &[UnitRef], id: u32) -> Option<&UnitRef> {
    units.iter().find(|u| u.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(bodies: &[(f64, f64, f64, Faction)]) -> World {
        let mut world = World::new();
        for (x, y, radius, faction) in bodies {
            world.spawn((
                Position::new(*x, *y),
                Collider { radius: *radius },
                *faction,
            ));
        }
        world
    }

    #[test]
    fn test_query_circle_sorts_nearest_first_and_filters() {
        let world = world_with(&[
            (6.0, 0.0, 0.5, Faction::Player),
            (2.0, 0.0, 0.5, Faction::Player),
            (3.0, 0.0, 0.5, Faction::Enemy),
            (50.0, 0.0, 0.5, Faction::Player),
        ]);

        let hits = query_circle(
            &world,
            Position::new(0.0, 0.0),
            8.0,
            FactionFilter::HostileTo(Faction::Enemy),
        );
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance < hits[1].distance);
        assert!((hits[0].distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_query_circle_counts_collider_radius() {
        // Center-to-center 5, query radius 4, collider radius 1.2: touching.
        let world = world_with(&[(5.0, 0.0, 1.2, Faction::Player)]);
        let hits = query_circle(&world, Position::new(0.0, 0.0), 4.0, FactionFilter::Any);
        assert_eq!(hits.len(), 1);

        let miss = query_circle(&world, Position::new(0.0, 0.0), 3.5, FactionFilter::Any);
        assert!(miss.is_empty());
    }

    #[test]
    fn test_query_box_uses_closest_point() {
        let world = world_with(&[
            (3.4, 0.0, 0.5, Faction::Player),  // past the +x edge but in reach
            (3.4, 2.4, 0.5, Faction::Player),  // outside the corner
            (0.0, 0.5, 0.5, Faction::Player),  // inside
        ]);

        let hits = query_box(
            &world,
            Position::new(0.0, 0.0),
            3.0,
            2.0,
            FactionFilter::Any,
        );
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_raycast_returns_nearest_entry() {
        let world = world_with(&[
            (10.0, 0.0, 1.0, Faction::Enemy),
            (4.0, 0.0, 1.0, Faction::Enemy),
        ]);

        let hit = raycast(
            &world,
            Position::new(0.0, 0.0),
            DVec2::X,
            20.0,
            FactionFilter::Any,
        )
        .expect("ray should hit the near collider");
        assert!((hit.distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_raycast_ignores_bodies_behind_origin() {
        let world = world_with(&[(-4.0, 0.0, 1.0, Faction::Enemy)]);
        let hit = raycast(
            &world,
            Position::new(0.0, 0.0),
            DVec2::X,
            20.0,
            FactionFilter::Any,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_los_blocked_only_by_neutral_bodies() {
        // A unit standing in the line does not block sight; a pillar does.
        let through_unit = world_with(&[(5.0, 0.0, 1.0, Faction::Player)]);
        assert!(los_clear(
            &through_unit,
            &Position::new(0.0, 0.0),
            &Position::new(10.0, 0.0)
        ));

        let through_pillar = world_with(&[(5.0, 0.0, 1.0, Faction::Neutral)]);
        assert!(!los_clear(
            &through_pillar,
            &Position::new(0.0, 0.0),
            &Position::new(10.0, 0.0)
        ));
    }
}
