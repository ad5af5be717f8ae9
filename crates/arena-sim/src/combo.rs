//! Combo/multiplier engine.
//!
//! A streak counter re-armed by every kill and cleared when its deadline
//! passes without one. The deadline is absolute simulated time, checked once
//! per active tick, so pausing the host freezes the window.

use arena_core::config::ComboConfig;
use arena_core::state::ComboStats;

/// Payout for one kill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillPayout {
    /// Streak after this kill.
    pub streak: u32,
    pub multiplier: f64,
    /// `floor(base_reward * multiplier)`.
    pub reward: u32,
    /// `reward - base_reward`.
    pub bonus: u32,
    /// This kill landed on a pulse milestone.
    pub pulse: bool,
}

#[derive(Debug, Clone)]
pub struct ComboEngine {
    config: ComboConfig,
    streak: u32,
    peak: u32,
    deadline_ms: Option<f64>,
}

impl ComboEngine {
    pub fn new(config: ComboConfig) -> Self {
        Self {
            config: config.sanitized(),
            streak: 0,
            peak: 0,
            deadline_ms: None,
        }
    }

    pub fn config(&self) -> &ComboConfig {
        &self.config
    }

    /// Multiplier of the highest threshold not exceeding `streak`, or 1.
    pub fn multiplier_for(&self, streak: u32) -> f64 {
        self.config
            .thresholds
            .iter()
            .rev()
            .find(|t| t.streak <= streak)
            .map_or(1.0, |t| t.multiplier)
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier_for(self.streak)
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Count a kill at `now_ms` and price it.
    pub fn register_kill(&mut self, now_ms: f64, base_reward: u32) -> KillPayout {
        self.streak = self.streak.saturating_add(1);
        self.peak = self.peak.max(self.streak);
        self.deadline_ms = Some(now_ms + self.config.window_ms);

        let multiplier = self.multiplier();
        // Float-to-int `as` saturates, so huge rewards pin at u32::MAX.
        let reward = (f64::from(base_reward) * multiplier).floor() as u32;
        let pulse = self.config.pulse_every > 0 && self.streak % self.config.pulse_every == 0;

        KillPayout {
            streak: self.streak,
            multiplier,
            reward,
            bonus: reward.saturating_sub(base_reward),
            pulse,
        }
    }

    /// Clear the streak if its deadline has passed. Returns whether it did.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if self.streak > 0 && now_ms >= deadline => {
                self.streak = 0;
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Session reset: streak, peak, and deadline all cleared.
    pub fn reset(&mut self) {
        self.streak = 0;
        self.peak = 0;
        self.deadline_ms = None;
    }

    pub fn stats(&self) -> ComboStats {
        ComboStats {
            streak: self.streak,
            peak: self.peak,
            multiplier: self.multiplier(),
            deadline_ms: self.deadline_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::config::ComboThreshold;

    fn engine() -> ComboEngine {
        ComboEngine::new(ComboConfig::default())
    }

    #[test]
    fn multiplier_is_monotone() {
        let combo = engine();
        let mut last = combo.multiplier_for(0);
        assert_eq!(last, 1.0);
        for streak in 1..=80 {
            let m = combo.multiplier_for(streak);
            assert!(m >= last, "multiplier dropped at streak {streak}");
            last = m;
        }
        assert!(combo.multiplier_for(49) < combo.multiplier_for(50));
    }

    #[test]
    fn fifth_kill_pays_one_and_a_half() {
        let mut combo = ComboEngine::new(ComboConfig {
            thresholds: vec![
                ComboThreshold {
                    streak: 5,
                    multiplier: 1.5,
                },
                ComboThreshold {
                    streak: 10,
                    multiplier: 2.0,
                },
            ],
            ..ComboConfig::default()
        });

        let payouts: Vec<KillPayout> = (0..5)
            .map(|i| combo.register_kill(i as f64 * 500.0, 33))
            .collect();

        for payout in &payouts[..4] {
            assert_eq!(payout.reward, 33);
            assert_eq!(payout.bonus, 0);
        }
        let fifth = payouts[4];
        assert_eq!(fifth.streak, 5);
        assert_eq!(fifth.multiplier, 1.5);
        // floor(33 * 1.5) = 49
        assert_eq!(fifth.reward, 49);
        assert_eq!(fifth.bonus, 16);
        assert!(fifth.pulse);
    }

    #[test]
    fn streak_decays_after_window() {
        let mut combo = engine();
        for i in 0..7 {
            combo.register_kill(i as f64 * 100.0, 10);
        }
        assert_eq!(combo.streak(), 7);
        assert_eq!(combo.multiplier(), 1.5);

        // Last kill at 600 ms; deadline 3600 ms.
        assert!(!combo.expire(3599.0));
        assert_eq!(combo.streak(), 7);
        assert!(combo.expire(3600.0));

        let stats = combo.stats();
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.peak, 7);
        assert_eq!(stats.multiplier, 1.0);
        assert_eq!(stats.deadline_ms, None);
        assert!(!combo.expire(10_000.0), "nothing left to expire");
    }

    #[test]
    fn kill_rearms_window_from_now() {
        let mut combo = engine();
        combo.register_kill(0.0, 10);
        combo.register_kill(2900.0, 10);
        assert!(!combo.expire(3100.0));
        assert_eq!(combo.stats().deadline_ms, Some(5900.0));
    }

    #[test]
    fn reset_clears_peak() {
        let mut combo = engine();
        combo.register_kill(0.0, 10);
        combo.reset();
        assert_eq!(combo.stats(), ComboStats::default());
    }

    #[test]
    fn pulses_disabled_at_zero() {
        let mut combo = ComboEngine::new(ComboConfig {
            pulse_every: 0,
            ..ComboConfig::default()
        });
        assert!((0..20).all(|i| !combo.register_kill(i as f64, 1).pulse));
    }
}
