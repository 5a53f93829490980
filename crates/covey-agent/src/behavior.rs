// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-behavior simulation: reply pacing, typing theatre, cooldowns.
//!
//! All sampling is parameterized by [`BehaviorConfig`] so tests can run
//! with millisecond-scale profiles, and generic over [`Rng`] so the
//! distributions themselves can be asserted deterministically in bulk.

use std::time::Duration;

use rand::Rng;
use tracing::trace;

use covey_config::BehaviorConfig;
use covey_core::traits::ChatSurface;
use covey_core::CoveyError;

/// Sampler for the human pacing profile.
pub struct HumanBehavior {
    config: BehaviorConfig,
}

impl HumanBehavior {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    /// Whether to skip replying to this message entirely.
    pub fn should_ignore<R: Rng>(&self, rng: &mut R) -> bool {
        self.config.enable_random_ignore && rng.gen_bool(self.config.ignore_probability)
    }

    /// Pre-reply think time. Mostly drawn from the base range, with a small
    /// chance of a much longer "walked away from the phone" delay.
    pub fn sample_reply_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        let ms = if rng.gen_bool(self.config.long_delay_probability) {
            rng.gen_range(self.config.long_delay_min_ms..self.config.long_delay_max_ms)
        } else {
            rng.gen_range(self.config.reply_delay_min_ms..self.config.reply_delay_max_ms)
        };
        Duration::from_millis(ms)
    }

    /// How long the typing indicator stays up: a random base plus a fixed
    /// per-character increment scaled by the inbound text length.
    pub fn sample_typing_duration<R: Rng>(&self, rng: &mut R, text_len: usize) -> Duration {
        let base = rng.gen_range(self.config.typing_min_ms..self.config.typing_max_ms);
        Duration::from_millis(base + self.config.typing_per_char_ms * text_len as u64)
    }

    /// Post-reply cooldown held before the per-peer lock is released.
    pub fn sample_cooldown<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(
            rng.gen_range(self.config.cooldown_min_ms..self.config.cooldown_max_ms),
        )
    }

    /// Sleep for one sampled reply delay.
    pub async fn reply_pause(&self) {
        let delay = self.sample_reply_delay(&mut rand::thread_rng());
        trace!(delay_ms = delay.as_millis() as u64, "pausing before reply");
        tokio::time::sleep(delay).await;
    }

    /// Sleep for one sampled cooldown.
    pub async fn cooldown_pause(&self) {
        let delay = self.sample_cooldown(&mut rand::thread_rng());
        trace!(delay_ms = delay.as_millis() as u64, "post-reply cooldown");
        tokio::time::sleep(delay).await;
    }

    /// Run the visible typing sequence against `peer`.
    ///
    /// Order is fixed: go online, mark the conversation seen, raise the
    /// typing indicator, hold it for the sampled duration, clear it.
    pub async fn simulate_typing(
        &self,
        chat: &dyn ChatSurface,
        peer: &str,
        text_len: usize,
    ) -> Result<(), CoveyError> {
        let duration = self.sample_typing_duration(&mut rand::thread_rng(), text_len);
        chat.set_presence_online().await?;
        chat.mark_seen(peer).await?;
        chat.start_typing(peer).await?;
        tokio::time::sleep(duration).await;
        chat.clear_typing(peer).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn profile() -> HumanBehavior {
        HumanBehavior::new(BehaviorConfig::default())
    }

    #[test]
    fn reply_delay_stays_in_one_of_the_two_ranges() {
        let behavior = profile();
        let mut rng = thread_rng();
        for _ in 0..10_000 {
            let ms = behavior.sample_reply_delay(&mut rng).as_millis() as u64;
            let short = (1500..5000).contains(&ms);
            let long = (8000..20000).contains(&ms);
            assert!(short || long, "delay {ms}ms outside both ranges");
        }
    }

    #[test]
    fn long_delay_fraction_tracks_configured_probability() {
        let behavior = profile();
        let mut rng = thread_rng();
        let samples = 10_000;
        let long = (0..samples)
            .filter(|_| behavior.sample_reply_delay(&mut rng).as_millis() >= 8000)
            .count();
        let fraction = long as f64 / samples as f64;
        // 0.15 nominal; 10k draws keep the observed rate well inside this band.
        assert!(
            (0.10..=0.20).contains(&fraction),
            "long-delay fraction {fraction} drifted from 0.15"
        );
    }

    #[test]
    fn typing_duration_scales_with_text_length() {
        let behavior = profile();
        let mut rng = thread_rng();
        for _ in 0..1_000 {
            let ms = behavior.sample_typing_duration(&mut rng, 25).as_millis() as u64;
            // base [1500, 4000) plus 25 * 40ms.
            assert!((2500..5000).contains(&ms), "typing duration {ms}ms out of range");
        }
        let empty = behavior.sample_typing_duration(&mut rng, 0).as_millis() as u64;
        assert!((1500..4000).contains(&empty));
    }

    #[test]
    fn cooldown_stays_in_range() {
        let behavior = profile();
        let mut rng = thread_rng();
        for _ in 0..1_000 {
            let ms = behavior.sample_cooldown(&mut rng).as_millis() as u64;
            assert!((2000..5000).contains(&ms));
        }
    }

    #[test]
    fn ignore_respects_probability_extremes() {
        let mut rng = thread_rng();

        let mut config = BehaviorConfig::default();
        config.ignore_probability = 0.0;
        let never = HumanBehavior::new(config.clone());
        assert!((0..1_000).all(|_| !never.should_ignore(&mut rng)));

        config.ignore_probability = 1.0;
        let always = HumanBehavior::new(config.clone());
        assert!((0..1_000).all(|_| always.should_ignore(&mut rng)));

        config.enable_random_ignore = false;
        let disabled = HumanBehavior::new(config);
        assert!((0..1_000).all(|_| !disabled.should_ignore(&mut rng)));
    }
}
