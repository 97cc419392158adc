//! Display-only "time left" countdown.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining_secs: u64,
}

impl Countdown {
    #[must_use]
    pub const fn new(remaining_secs: u64) -> Self {
        Self { remaining_secs }
    }

    /// One second elapsed. Floors at zero.
    #[must_use]
    pub const fn ticked(self) -> Self {
        Self {
            remaining_secs: self.remaining_secs.saturating_sub(1),
        }
    }

    pub fn tick(&mut self) {
        *self = self.ticked();
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// `HH:MM:SS`; hours are not wrapped at 24.
    #[must_use]
    pub fn format_hms(&self) -> String {
        format_hms(self.remaining_secs)
    }
}

#[must_use]
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_decrements_and_floors() {
        let mut countdown = Countdown::new(2);
        countdown.tick();
        assert_eq!(countdown.remaining_secs, 1);
        countdown.tick();
        countdown.tick();
        assert_eq!(countdown.remaining_secs, 0);
        assert!(countdown.is_expired());
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(8_076), "02:14:36");
        assert_eq!(Countdown::new(59).format_hms(), "00:00:59");
        assert_eq!(format_hms(100 * 3600 + 61), "100:01:01");
    }
}
