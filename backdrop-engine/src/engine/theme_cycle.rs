use std::collections::VecDeque;

use bevy::prelude::Resource;
use constants::render_settings::{
    BURST_TRANSITION_DELAY_SECS, MAX_BURST_SLASHES, TRANSITION_DELAY_SECS,
};

/// A theme switch the host should apply now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTransition {
    pub index: usize,
    /// Slash count for the page's break effect; 0 for a plain switch.
    pub burst: u32,
}

/// Theme selection timing: periodic auto-advance plus click coalescing.
///
/// Clicks landing within `click_window` of each other collapse into a single
/// jump of that many steps. Once the window closes the jump is applied after
/// a short delay, longer when it was a multi-click burst. Time is in seconds
/// from any monotonic origin.
#[derive(Resource, Debug, Clone)]
pub struct ThemeCycler {
    theme_count: usize,
    current: usize,
    auto_interval: f64,
    click_window: f64,
    next_auto: Option<f64>,
    clicks: u32,
    click_deadline: Option<f64>,
    scheduled: VecDeque<(f64, ThemeTransition)>,
}

impl ThemeCycler {
    pub fn new(theme_count: usize, current: usize, auto_interval: f64, click_window: f64) -> Self {
        let theme_count = theme_count.max(1);
        Self {
            theme_count,
            current: current % theme_count,
            auto_interval,
            click_window,
            next_auto: None,
            clicks: 0,
            click_deadline: None,
            scheduled: VecDeque::new(),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn auto_enabled(&self) -> bool {
        self.next_auto.is_some()
    }

    pub fn set_auto(&mut self, enabled: bool, now: f64) {
        self.next_auto = enabled.then_some(now + self.auto_interval);
    }

    /// Theme the next click jump starts from: the last scheduled target, or
    /// the current theme when nothing is waiting.
    fn jump_base(&self) -> usize {
        self.scheduled
            .back()
            .map_or(self.current, |(_, transition)| transition.index)
    }

    /// Record a click and return the theme the pending jump would land on.
    pub fn register_click(&mut self, now: f64) -> usize {
        self.clicks += 1;
        self.click_deadline = Some(now + self.click_window);
        (self.jump_base() + self.clicks as usize) % self.theme_count
    }

    /// Switch straight to `index`, dropping any pending click jump.
    pub fn request(&mut self, index: usize) -> Option<ThemeTransition> {
        if index >= self.theme_count {
            return None;
        }
        self.clicks = 0;
        self.click_deadline = None;
        self.scheduled.clear();
        self.current = index;
        Some(ThemeTransition { index, burst: 0 })
    }

    pub fn advance(&mut self) -> ThemeTransition {
        self.current = (self.current + 1) % self.theme_count;
        ThemeTransition {
            index: self.current,
            burst: 0,
        }
    }

    /// Fire whatever is due at `now`. At most one transition per call.
    pub fn poll(&mut self, now: f64) -> Option<ThemeTransition> {
        if let Some(deadline) = self.click_deadline {
            if now >= deadline {
                let clicks = self.clicks;
                self.clicks = 0;
                self.click_deadline = None;

                let burst = if clicks > 1 {
                    (clicks * 2).min(MAX_BURST_SLASHES)
                } else {
                    0
                };
                let delay = if clicks > 1 {
                    BURST_TRANSITION_DELAY_SECS
                } else {
                    TRANSITION_DELAY_SECS
                };
                let index = (self.jump_base() + clicks as usize) % self.theme_count;
                self.scheduled
                    .push_back((deadline + delay, ThemeTransition { index, burst }));
            }
        }

        if let Some(&(at, transition)) = self.scheduled.front() {
            if now >= at {
                self.scheduled.pop_front();
                self.current = transition.index;
                return Some(transition);
            }
        }

        if let Some(next) = self.next_auto {
            if now >= next {
                self.next_auto = Some(now + self.auto_interval);
                return Some(self.advance());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycler() -> ThemeCycler {
        ThemeCycler::new(4, 0, 20.0, 0.3)
    }

    #[test]
    fn auto_change_advances_on_interval() {
        let mut cycler = cycler();
        cycler.set_auto(true, 0.0);

        assert_eq!(cycler.poll(19.9), None);
        assert_eq!(
            cycler.poll(20.0),
            Some(ThemeTransition { index: 1, burst: 0 })
        );
        assert_eq!(cycler.poll(39.0), None);
        assert_eq!(cycler.poll(40.0).map(|t| t.index), Some(2));

        cycler.set_auto(false, 40.0);
        assert_eq!(cycler.poll(100.0), None);
    }

    #[test]
    fn single_click_applies_after_short_delay() {
        let mut cycler = cycler();
        assert_eq!(cycler.register_click(1.0), 1);

        assert_eq!(cycler.poll(1.2), None);
        // Window closes at 1.3, transition lands 0.2 s later.
        assert_eq!(cycler.poll(1.3), None);
        assert_eq!(cycler.poll(1.49), None);
        assert_eq!(
            cycler.poll(1.51),
            Some(ThemeTransition { index: 1, burst: 0 })
        );
        assert_eq!(cycler.current(), 1);
    }

    #[test]
    fn rapid_clicks_coalesce_into_one_burst() {
        let mut cycler = cycler();
        for i in 0..7 {
            cycler.register_click(i as f64 * 0.1);
        }
        // Last click at 0.6 pushes the window to 0.9; burst delay is 0.4 s.
        assert_eq!(cycler.poll(0.85), None);
        assert_eq!(cycler.poll(0.9), None);
        let transition = cycler.poll(1.35).unwrap();
        assert_eq!(transition.index, 7 % 4);
        assert_eq!(transition.burst, MAX_BURST_SLASHES);

        cycler.register_click(5.0);
        cycler.register_click(5.1);
        assert_eq!(cycler.poll(5.45), None);
        assert_eq!(cycler.poll(5.85).map(|t| t.burst), Some(4));
    }

    #[test]
    fn explicit_request_cancels_pending_clicks() {
        let mut cycler = cycler();
        cycler.register_click(0.0);
        assert_eq!(
            cycler.request(3),
            Some(ThemeTransition { index: 3, burst: 0 })
        );
        assert_eq!(cycler.poll(5.0), None);
        assert_eq!(cycler.current(), 3);
        assert_eq!(cycler.request(4), None);
    }

    #[test]
    fn click_during_pending_burst_builds_on_its_target() {
        let mut cycler = cycler();
        cycler.register_click(0.0);
        cycler.register_click(0.1);
        // Window closes at 0.4; the two-step burst lands at 0.8.
        assert_eq!(cycler.poll(0.4), None);
        assert_eq!(cycler.register_click(0.45), 3);

        let mut fired = Vec::new();
        for step in 9..=48 {
            if let Some(transition) = cycler.poll(step as f64 * 0.05) {
                fired.push(transition);
            }
        }
        assert_eq!(
            fired,
            vec![
                ThemeTransition { index: 2, burst: 4 },
                ThemeTransition { index: 3, burst: 0 },
            ]
        );
        assert_eq!(cycler.current(), 3);
    }
}
