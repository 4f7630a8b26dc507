//! Flash choreography - hide/show pulses for end-of-round feedback
//!
//! A flash of `n` pulses at `p` ms hides the game at `0, 2p, 4p, ..` and shows it
//! again at `p, 3p, 5p, ..`, finishing at `(2n - 1) * p`. The engine turns each
//! [`FlashStep`] into a one-shot timer running `pause()` or `resume()` + paint.

use crate::types::{DEFAULT_FLASHES, DEFAULT_FLASH_PULSE_MS};

/// Where an engine is in its flash sequence.
///
/// Only `NotStarted` lets a new pulse train be scheduled. Game content resets
/// the marker explicitly when it wants to flash again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashPosition {
    #[default]
    NotStarted,
    Running,
    Finished,
}

/// One scheduled pulse edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStep {
    Hide { at_ms: u64 },
    Show { at_ms: u64 },
}

impl FlashStep {
    pub fn at_ms(&self) -> u64 {
        match *self {
            FlashStep::Hide { at_ms } | FlashStep::Show { at_ms } => at_ms,
        }
    }
}

/// Resolved flash parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashPlan {
    pub num_flashes: u32,
    pub pulse_ms: u64,
}

impl Default for FlashPlan {
    fn default() -> Self {
        Self {
            num_flashes: DEFAULT_FLASHES,
            pulse_ms: DEFAULT_FLASH_PULSE_MS,
        }
    }
}

impl FlashPlan {
    /// Zero for either argument selects its default.
    pub fn new(num_flashes: u32, pulse_ms: u64) -> Self {
        let defaults = Self::default();
        Self {
            num_flashes: if num_flashes == 0 {
                defaults.num_flashes
            } else {
                num_flashes
            },
            pulse_ms: if pulse_ms == 0 {
                defaults.pulse_ms
            } else {
                pulse_ms
            },
        }
    }

    /// Time from the first hide until the completion callback.
    pub fn total_ms(&self) -> u64 {
        (self.num_flashes as u64 * 2 - 1).saturating_mul(self.pulse_ms)
    }

    /// Hide/show edges in firing order.
    pub fn steps(&self) -> impl Iterator<Item = FlashStep> {
        let pulse = self.pulse_ms;
        (0..self.num_flashes as u64).flat_map(move |i| {
            let hide = pulse.saturating_mul(2 * i);
            [
                FlashStep::Hide { at_ms: hide },
                FlashStep::Show { at_ms: hide.saturating_add(pulse) },
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_arguments_use_defaults() {
        assert_eq!(FlashPlan::new(0, 0), FlashPlan::default());
        assert_eq!(FlashPlan::new(3, 0).pulse_ms, 150);
        assert_eq!(FlashPlan::default().total_ms(), 9 * 150);
    }

    #[test]
    fn huge_pulse_saturates() {
        let plan = FlashPlan::new(2, u64::MAX / 2);
        assert_eq!(plan.total_ms(), u64::MAX);
        let last = plan.steps().last().map(|s| s.at_ms());
        assert_eq!(last, Some(u64::MAX));
    }

    #[test]
    fn steps_alternate_starting_with_hide() {
        let plan = FlashPlan::new(3, 100);
        let steps: Vec<_> = plan.steps().collect();
        assert_eq!(
            steps,
            vec![
                FlashStep::Hide { at_ms: 0 },
                FlashStep::Show { at_ms: 100 },
                FlashStep::Hide { at_ms: 200 },
                FlashStep::Show { at_ms: 300 },
                FlashStep::Hide { at_ms: 400 },
                FlashStep::Show { at_ms: 500 },
            ]
        );
        assert_eq!(plan.total_ms(), 500);
    }
}
