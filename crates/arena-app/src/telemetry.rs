//! Tracing bootstrap and the event log observer.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use arena_core::events::SimEvent;
use arena_sim::events::EventObserver;

/// Install the global subscriber. `RUST_LOG` extends the default
/// `arena=info` filter.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("arena=info".parse()?))
        .try_init()?;
    Ok(())
}

/// Writes simulation events to the tracing log.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl EventObserver for TracingObserver {
    fn on_event(&mut self, event: &SimEvent) {
        match event {
            SimEvent::MobKilled {
                mob,
                kind,
                reward,
                bonus,
                ..
            } => tracing::info!(mob = mob.0, ?kind, reward, bonus, "mob killed"),
            SimEvent::PlayerKilled => tracing::info!("player killed"),
            SimEvent::AreaEffect {
                kind,
                position,
                radius,
            } => tracing::info!(?kind, x = position.x, y = position.y, radius, "area effect"),
            SimEvent::ComboChanged { streak, multiplier } => {
                tracing::debug!(streak, multiplier, "combo changed")
            }
            other => tracing::debug!(event = ?other, "sim event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::enums::{AreaEffectKind, BehaviorKind};
    use arena_core::types::MobId;

    #[test]
    fn test_observer_handles_events_without_subscriber() {
        let mut observer = TracingObserver;
        observer.on_event(&SimEvent::MobKilled {
            mob: MobId(1),
            kind: BehaviorKind::MeleeAggressive,
            base_reward: 50,
            reward: 75,
            bonus: 25,
            position: Default::default(),
        });
        observer.on_event(&SimEvent::AreaEffect {
            kind: AreaEffectKind::ComboPulse,
            position: Default::default(),
            radius: 200.0,
        });
        observer.on_event(&SimEvent::PlayerKilled);
        observer.on_event(&SimEvent::ComboChanged {
            streak: 0,
            multiplier: 1.0,
        });
    }

    #[test]
    fn test_default_filter_directive_parses() {
        let directive: Result<tracing_subscriber::filter::Directive, _> = "arena=info".parse();
        assert!(directive.is_ok());
    }
}
