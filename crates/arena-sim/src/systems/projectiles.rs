//! Projectile kinematics and player collision.

use arena_core::components::{Player, Volley};
use arena_core::events::SimEvent;
use arena_core::state::SessionStats;
use arena_core::types::WorldBounds;

use crate::combat;

/// Advance every projectile in `volley` by one tick.
///
/// A projectile that overlaps a living player deals its damage once and is
/// removed. One that leaves `[0, width] × [0, height]`, or whose position
/// stops being finite, is removed without damage.
pub fn advance(
    volley: &mut Volley,
    player: &mut Player,
    bounds: &WorldBounds,
    elapsed_ms: f64,
    events: &mut Vec<SimEvent>,
    stats: &mut SessionStats,
) {
    let dt = elapsed_ms / 1000.0;
    volley.projectiles.retain_mut(|projectile| {
        let next = projectile.position + projectile.direction * projectile.speed * dt;
        if !next.is_finite() {
            return false;
        }
        projectile.position = next;

        if player.alive && projectile.aabb().overlaps(&player.body.aabb()) {
            combat::damage_player(
                player,
                projectile.damage,
                Some(projectile.owner),
                events,
                stats,
            );
            return false;
        }

        bounds.contains(projectile.position)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::components::Projectile;
    use arena_core::geometry::direction;
    use arena_core::types::{DVec2, MobId};

    fn shot(from: DVec2, toward: DVec2) -> Projectile {
        Projectile {
            position: from,
            direction: direction(from, toward),
            speed: 180.0,
            damage: 12.0,
            size: DVec2::new(14.0, 14.0),
            owner: MobId(1),
        }
    }

    #[test]
    fn projectile_leaves_world_without_damage() {
        let bounds = WorldBounds::new(3200.0, 2560.0);
        let mut player = Player::new(DVec2::new(100.0, 2000.0), DVec2::splat(48.0), 100.0);
        let mut volley = Volley {
            projectiles: vec![shot(DVec2::new(100.0, 100.0), DVec2::new(400.0, 100.0))],
        };
        let mut events = Vec::new();
        let mut stats = SessionStats::default();

        let mut ticks = 0;
        while !volley.projectiles.is_empty() {
            advance(&mut volley, &mut player, &bounds, 50.0, &mut events, &mut stats);
            ticks += 1;
            assert!(ticks < 1000, "projectile never left the world");
        }

        // 3100 units at 9 units per tick.
        assert_eq!(ticks, 345);
        assert!(events.is_empty());
        assert_eq!(player.health.current, 100.0);
    }

    #[test]
    fn projectile_hits_player_exactly_once() {
        let bounds = WorldBounds::default();
        let mut player = Player::new(DVec2::new(400.0, 90.0), DVec2::splat(48.0), 100.0);
        let mut volley = Volley {
            projectiles: vec![shot(DVec2::new(100.0, 100.0), DVec2::new(400.0, 100.0))],
        };
        let mut events = Vec::new();
        let mut stats = SessionStats::default();

        for _ in 0..200 {
            advance(&mut volley, &mut player, &bounds, 50.0, &mut events, &mut stats);
        }

        assert!(volley.projectiles.is_empty());
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SimEvent::PlayerDamaged {
                source: Some(MobId(1)),
                ..
            }
        ));
        assert_eq!(player.health.current, 88.0);
    }

    #[test]
    fn dead_player_is_not_hit() {
        let bounds = WorldBounds::default();
        let mut player = Player::new(DVec2::new(400.0, 90.0), DVec2::splat(48.0), 100.0);
        player.alive = false;
        let mut volley = Volley {
            projectiles: vec![shot(DVec2::new(100.0, 100.0), DVec2::new(400.0, 100.0))],
        };
        let mut events = Vec::new();
        let mut stats = SessionStats::default();

        for _ in 0..60 {
            advance(&mut volley, &mut player, &bounds, 50.0, &mut events, &mut stats);
        }
        assert_eq!(volley.projectiles.len(), 1, "flies through the corpse");
        assert!(events.is_empty());
    }

    #[test]
    fn non_finite_projectile_is_dropped() {
        let bounds = WorldBounds::default();
        let mut player = Player::new(DVec2::ZERO, DVec2::splat(48.0), 100.0);
        let mut bad = shot(DVec2::new(500.0, 500.0), DVec2::new(600.0, 500.0));
        bad.speed = f64::INFINITY;
        let mut volley = Volley {
            projectiles: vec![bad],
        };
        advance(
            &mut volley,
            &mut player,
            &bounds,
            16.0,
            &mut Vec::new(),
            &mut SessionStats::default(),
        );
        assert!(volley.projectiles.is_empty());
    }
}
