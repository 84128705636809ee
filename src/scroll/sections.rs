use crate::foundation::core::{Region, Rgba8, Viewport};

/// One named page section with its accent color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionMarker {
    pub id: String,
    pub region: Region,
    pub color: Rgba8,
}

/// Tracks which section holds the viewport center line.
///
/// A section becomes active when its top edge reaches the center going down, or when its
/// bottom edge reaches the center going up. In gaps between sections the previous one stays
/// active.
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    sections: Vec<SectionMarker>,
    active: Option<usize>,
}

impl SectionTracker {
    pub fn new(sections: Vec<SectionMarker>) -> Self {
        Self {
            sections,
            active: None,
        }
    }

    pub fn sections(&self) -> &[SectionMarker] {
        &self.sections
    }

    pub fn active(&self) -> Option<&SectionMarker> {
        self.active.and_then(|i| self.sections.get(i))
    }

    /// Replace a section's measured region. Returns `false` for unknown ids.
    pub fn set_region(&mut self, id: &str, region: Region) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.region = region;
                true
            }
            None => false,
        }
    }

    /// Re-evaluate against a scroll snapshot; returns the newly active section on a crossing.
    pub fn update(&mut self, scroll_y: f64, viewport: Viewport) -> Option<&SectionMarker> {
        let line = scroll_y + viewport.height * 0.5;
        let hit = self.sections.iter().rposition(|s| {
            !s.region.is_degenerate() && s.region.top <= line && line < s.region.bottom()
        });
        match hit {
            Some(i) if self.active != Some(i) => {
                tracing::debug!(section = %self.sections[i].id, "section entered");
                self.active = Some(i);
                self.sections.get(i)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/sections.rs"]
mod tests;
