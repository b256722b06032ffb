//! Multi-click detection for platforms that only report raw presses

use std::time::{Duration, Instant};

use crate::trigger::MouseButton;

/// Tracks consecutive presses of the same button to derive a click count
#[derive(Debug, Clone)]
pub struct ClickTracker {
    last_click_time: Option<Instant>,
    last_click_position: Option<(f64, f64)>,
    last_button: Option<MouseButton>,
    click_count: u32,
    interval: Duration,
    slop: f64,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), 4.0)
    }
}

impl ClickTracker {
    pub fn new(interval: Duration, slop: f64) -> Self {
        Self {
            last_click_time: None,
            last_click_position: None,
            last_button: None,
            click_count: 0,
            interval,
            slop,
        }
    }

    /// Update click count based on timing, position and button
    ///
    /// Returns the new click count. Counts keep growing for rapid series;
    /// anything above 1 is a double-click to the dispatcher.
    pub fn track_click(&mut self, button: MouseButton, x: f64, y: f64, now: Instant) -> u32 {
        let is_rapid_click = self
            .last_click_time
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval);
        let is_same_position = self
            .last_click_position
            .is_some_and(|(lx, ly)| within(self.slop, (lx, ly), (x, y)));
        let is_same_button = self.last_button == Some(button);

        if is_rapid_click && is_same_position && is_same_button {
            self.click_count += 1;
        } else {
            self.click_count = 1;
        }

        self.last_click_time = Some(now);
        self.last_click_position = Some((x, y));
        self.last_button = Some(button);

        self.click_count
    }

    /// Forget the current series (e.g. when the pointer leaves the window)
    pub fn reset(&mut self) {
        self.click_count = 0;
        self.last_click_time = None;
        self.last_click_position = None;
        self.last_button = None;
    }

    pub fn slop(&self) -> f64 {
        self.slop
    }
}

/// Whether two points are no further apart than `slop` on either axis
pub fn within(slop: f64, a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() <= slop && (a.1 - b.1).abs() <= slop
}
