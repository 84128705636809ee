use std::time::Duration;

use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::Region,
};

/// Anchor jumps take this long regardless of distance.
pub const NAV_DURATION: Duration = Duration::from_millis(1000);
/// The menu button is always shown this close to the top of the page.
pub const BURGER_TOP_ZONE_PX: f64 = 10.0;
/// Scale transition of the menu button.
pub const BURGER_FADE: Duration = Duration::from_millis(300);

/// Smooth scroll from `from_y` to the top of `section` (no header offset).
pub fn scroll_to_section(from_y: f64, section: Region, now: Duration) -> Tween {
    Tween::new(from_y, section.top.max(0.0), now, NAV_DURATION, Ease::InOutCubic)
}

/// Shows the menu button while scrolling up or near the top, hides it while scrolling down.
#[derive(Clone, Debug)]
pub struct BurgerVisibility {
    last_y: Option<f64>,
    visible: bool,
    scale: Option<Tween>,
}

impl Default for BurgerVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl BurgerVisibility {
    pub fn new() -> Self {
        Self {
            last_y: None,
            visible: true,
            scale: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed a scroll position; returns the new visibility when it flips.
    pub fn observe(&mut self, y: f64, now: Duration) -> Option<bool> {
        let last = self.last_y.replace(y).unwrap_or(y);
        let visible = y <= last || y < BURGER_TOP_ZONE_PX;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        let target = if visible { 1.0 } else { 0.0 };
        self.scale = Some(match self.scale {
            Some(tw) => tw.retarget(target, now),
            None => Tween::new(1.0 - target, target, now, BURGER_FADE, Ease::Linear),
        });
        Some(visible)
    }

    /// Current button scale.
    pub fn scale(&self, now: Duration) -> f64 {
        match self.scale {
            Some(tw) => tw.sample(now),
            None => 1.0,
        }
    }

    pub fn is_settled(&self, now: Duration) -> bool {
        self.scale.is_none_or(|tw| tw.is_done(now))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/navigate.rs"]
mod tests;
