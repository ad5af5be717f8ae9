#[cfg(test)]
mod tests {
    use crate::commands::HostCommand;
    use crate::components::Health;
    use crate::config::*;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::{ArenaSnapshot, ComboStats};
    use crate::types::{DVec2, MobId, SimTime, WorldBounds};

    /// Verify HostCommand round-trips through serde (tagged union).
    #[test]
    fn test_host_command_serde() {
        let commands = vec![
            HostCommand::MovePlayer { x: 10.0, y: 20.0 },
            HostCommand::StrikeMob {
                mob: MobId(7),
                amount: 40.0,
            },
            HostCommand::StrikeArea {
                x: 1.0,
                y: 2.0,
                radius: 100.0,
                damage: 30.0,
            },
            HostCommand::RevivePlayer,
            HostCommand::SetTargetPopulation { count: 3 },
            HostCommand::Pause,
            HostCommand::Resume,
            HostCommand::Reset,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: HostCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_host_command_tag_format() {
        let json = serde_json::to_string(&HostCommand::Pause).unwrap();
        assert_eq!(json, r#"{"type":"Pause"}"#);
    }

    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::MobKilled {
                mob: MobId(3),
                kind: BehaviorKind::RangedKite,
                base_reward: 50,
                reward: 75,
                bonus: 25,
                position: DVec2::new(4.0, 5.0),
            },
            SimEvent::PlayerDamaged {
                amount: 10.0,
                remaining: 90.0,
                source: None,
            },
            SimEvent::PlayerKilled,
            SimEvent::ComboChanged {
                streak: 5,
                multiplier: 1.5,
            },
            SimEvent::AreaEffect {
                kind: AreaEffectKind::ComboPulse,
                position: DVec2::ZERO,
                radius: 260.0,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snapshot = ArenaSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"mobs\":[]"));
        assert_eq!(snapshot.combo, ComboStats::default());
        assert_eq!(snapshot.combo.multiplier, 1.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(16.0);
        time.advance(34.0);
        assert_eq!(time.tick, 2);
        assert!((time.now_ms - 50.0).abs() < 1e-12);
    }

    // ---- Health ----

    #[test]
    fn test_health_full_rejects_bad_max() {
        assert_eq!(Health::full(f64::NAN).max, 0.0);
        assert_eq!(Health::full(-5.0).max, 0.0);
        assert_eq!(Health::full(35.0).current, 35.0);
    }

    #[test]
    fn test_health_at_clamps() {
        assert_eq!(Health::at(50.0, 35.0).current, 35.0);
        assert_eq!(Health::at(-1.0, 35.0).current, 0.0);
        // Non-finite current keeps full health rather than corrupting.
        assert_eq!(Health::at(f64::INFINITY, 35.0).current, 35.0);
        assert!(Health::at(0.0, 35.0).is_depleted());
    }

    // ---- World bounds ----

    #[test]
    fn test_world_bounds_sanitized() {
        let bounds = WorldBounds::new(f64::NAN, -10.0);
        assert_eq!(bounds.width, 0.0);
        assert_eq!(bounds.height, 0.0);

        let bounds = WorldBounds::default();
        assert!(bounds.contains(DVec2::new(3200.0, 2560.0)));
        assert!(!bounds.contains(DVec2::new(3200.1, 0.0)));
        assert!(!bounds.contains(DVec2::new(-0.1, 0.0)));
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_population, 14);
        assert_eq!(config.spawn.max_attempts, 30);
        assert_eq!(config.spawn.min_player_distance, 400.0);
        assert_eq!(config.world.width, 3200.0);
        assert_eq!(config.world.height, 2560.0);
        assert!(config.profile("slime").is_some());
        assert!(config.profile("ghost").is_none());
    }

    #[test]
    fn test_empty_mob_table_is_fatal() {
        let result = ArenaConfig::from_json_str(r#"{ "mobs": [] }"#);
        assert!(matches!(result, Err(ConfigError::NoMobTypes)));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ArenaConfig::from_json_str(r#"{ "seed": 7, "target_population": 3 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.target_population, 3);
        assert_eq!(config.mobs.len(), default_mob_table().len());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = ArenaConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ArenaConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = ArenaConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_profile_sanitized_clamps_ranges() {
        let profile = MobProfile {
            name: "broken".into(),
            weight: f64::NAN,
            behavior: BehaviorProfile::RangedKite(RangedParams {
                range: -1.0,
                projectile_speed: 0.0,
                projectile_damage: f64::INFINITY,
                projectile_size: DVec2::new(-3.0, 4.0),
                strafe_repick_chance: 7.0,
                strafe_stop_chance: f64::NAN,
            }),
            max_health: 0.0,
            speed: -50.0,
            contact_damage: f64::NEG_INFINITY,
            size: DVec2::new(10.0, f64::NAN),
            reward: 5,
            attack_interval_ms: -100.0,
        }
        .sanitized();

        assert_eq!(profile.weight, 0.0);
        assert_eq!(profile.max_health, 1.0);
        assert_eq!(profile.speed, 0.0);
        assert_eq!(profile.contact_damage, 0.0);
        assert_eq!(profile.size, DVec2::new(10.0, 0.0));
        assert_eq!(profile.attack_interval_ms, 0.0);
        match profile.behavior {
            BehaviorProfile::RangedKite(ranged) => {
                assert_eq!(ranged.range, 0.0);
                assert_eq!(ranged.projectile_speed, 1.0);
                assert_eq!(ranged.projectile_damage, 0.0);
                assert_eq!(ranged.projectile_size, DVec2::new(0.0, 4.0));
                assert_eq!(ranged.strafe_repick_chance, 1.0);
                assert_eq!(ranged.strafe_stop_chance, 0.0);
            }
            BehaviorProfile::MeleeAggressive => panic!("behavior kind changed"),
        }
    }

    #[test]
    fn test_combo_table_sanitized_is_monotone() {
        let combo = ComboConfig {
            thresholds: vec![
                ComboThreshold {
                    streak: 10,
                    multiplier: 1.2,
                },
                ComboThreshold {
                    streak: 5,
                    multiplier: 1.5,
                },
                ComboThreshold {
                    streak: 3,
                    multiplier: 0.5,
                },
                ComboThreshold {
                    streak: 20,
                    multiplier: f64::NAN,
                },
            ],
            ..ComboConfig::default()
        }
        .sanitized();

        let streaks: Vec<u32> = combo.thresholds.iter().map(|t| t.streak).collect();
        assert_eq!(streaks, vec![3, 5, 10]);
        let multipliers: Vec<f64> = combo.thresholds.iter().map(|t| t.multiplier).collect();
        assert_eq!(multipliers, vec![1.0, 1.5, 1.5]);
    }

    #[test]
    fn test_behavior_profile_serde_tag() {
        let json = serde_json::to_string(&BehaviorProfile::MeleeAggressive).unwrap();
        assert_eq!(json, r#"{"kind":"MeleeAggressive"}"#);
        let ranged = BehaviorProfile::RangedKite(RangedParams::default());
        let json = serde_json::to_string(&ranged).unwrap();
        let back: BehaviorProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ranged);
        assert_eq!(back.kind(), BehaviorKind::RangedKite);
    }
}
