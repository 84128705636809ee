use crate::{
    foundation::core::{Region, Viewport},
    scroll::binding::{Distance, ProgressBinding, TriggerSpec},
};

/// Scroll band on each side of the pinned range where the pinned layout is pre-applied.
pub const DEFAULT_ANTICIPATE_PX: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinState {
    Unpinned,
    /// Inside the anticipation band before the start boundary.
    Pinning,
    Pinned,
    /// Inside the anticipation band past the end boundary.
    Releasing,
}

/// Visual treatment of a pinned element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinLayout {
    /// Normal flow, shifted down by `offset` px of pin spacing.
    InFlow { offset: f64 },
    /// Fixed to the viewport with its top edge at `top` px.
    Fixed { top: f64 },
}

impl PinLayout {
    pub const NATURAL: Self = Self::InFlow { offset: 0.0 };

    /// On-screen top edge for an element whose natural document top is `region_top`.
    pub fn screen_top(self, region_top: f64, scroll_y: f64) -> f64 {
        match self {
            Self::InFlow { offset } => region_top + offset - scroll_y,
            Self::Fixed { top } => top,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        match self {
            Self::InFlow { offset } => offset.is_finite(),
            Self::Fixed { top } => top.is_finite(),
        }
    }
}

/// Result of one [`Pin::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinFrame {
    pub state: PinState,
    pub layout: PinLayout,
    pub progress: f64,
    /// `state` or `layout` differ from the previous update.
    pub changed: bool,
}

/// Locks a region on screen while scroll advances through a virtual distance.
///
/// The fixed treatment is applied `tolerance` px before the start boundary and held
/// `tolerance` px past the end boundary, in both scroll directions. Inside those bands the
/// fixed top is chosen so the element sits exactly where normal flow would put it, so the
/// swap between flow and fixed placement is invisible.
#[derive(Clone, Debug)]
pub struct Pin {
    binding: ProgressBinding,
    tolerance: f64,
    state: PinState,
    layout: PinLayout,
}

impl Pin {
    pub fn new(region: Region, distance: Distance, viewport: Viewport) -> Self {
        Self {
            binding: ProgressBinding::new(TriggerSpec::pinned(distance), region, viewport),
            tolerance: DEFAULT_ANTICIPATE_PX,
            state: PinState::Unpinned,
            layout: PinLayout::NATURAL,
        }
    }

    pub fn with_tolerance(mut self, px: f64) -> Self {
        self.tolerance = if px.is_finite() { px.max(0.0) } else { 0.0 };
        self
    }

    /// Re-resolve geometry. Must run before the first scroll update after a resize.
    pub fn measure(&mut self, region: Region, viewport: Viewport) {
        self.binding.measure(region, viewport);
    }

    /// Replace the virtual distance with an absolute length, keeping the measured start.
    pub fn set_distance_px(&mut self, px: f64) {
        self.binding.set_distance(px);
    }

    pub fn binding(&self) -> &ProgressBinding {
        &self.binding
    }

    pub fn state(&self) -> PinState {
        self.state
    }

    pub fn layout(&self) -> PinLayout {
        self.layout
    }

    pub fn progress(&self) -> f64 {
        self.binding.progress()
    }

    pub fn is_degenerate(&self) -> bool {
        self.binding.is_degenerate()
    }

    /// Flow space the pin adds below the region once released.
    pub fn spacer(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.binding.distance()
        }
    }

    pub fn update(&mut self, scroll_y: f64) -> PinFrame {
        let (state, layout) = self.resolve(scroll_y);
        let progress = self.binding.update(scroll_y);
        let changed = state != self.state || layout != self.layout;
        if state != self.state {
            tracing::debug!(from = ?self.state, to = ?state, scroll_y, "pin state");
        }
        self.state = state;
        self.layout = layout;
        PinFrame {
            state,
            layout,
            progress,
            changed,
        }
    }

    fn resolve(&self, y: f64) -> (PinState, PinLayout) {
        if self.is_degenerate() || !y.is_finite() {
            return (PinState::Unpinned, PinLayout::NATURAL);
        }
        let start = self.binding.start();
        let end = self.binding.end();
        let pinned_top = self.binding.region().top - start;
        let tol = self.tolerance;

        if y < start - tol {
            (PinState::Unpinned, PinLayout::NATURAL)
        } else if y < start {
            (
                PinState::Pinning,
                PinLayout::Fixed {
                    top: pinned_top + (start - y),
                },
            )
        } else if y < end {
            (PinState::Pinned, PinLayout::Fixed { top: pinned_top })
        } else if y < end + tol {
            (
                PinState::Releasing,
                PinLayout::Fixed {
                    top: pinned_top - (y - end),
                },
            )
        } else {
            (
                PinState::Unpinned,
                PinLayout::InFlow {
                    offset: self.binding.distance(),
                },
            )
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/pin.rs"]
mod tests;
