use std::time::Duration;

use crate::{
    animation::sink::PropertySink,
    animation::timeline::{TimedTimeline, Timeline},
    foundation::error::{ScrollworkError, ScrollworkResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How many times an autoplay run covers its duration.
pub enum Repeat {
    Once,
    /// Total number of plays (`>= 1`).
    Times(u32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Paused,
    Playing,
    Finished,
}

/// Free-running clock mapping elapsed time to progress in `[0, 1]`.
///
/// `reverse()` flips direction from the current position, so an interrupted forward run
/// continues backward from wherever it was without a visual jump.
#[derive(Clone, Debug)]
pub struct Playhead {
    duration: f64,
    repeat: Repeat,
    direction: Direction,
    time_scale: f64,
    position: f64,
    iteration: u32,
    state: PlayState,
}

impl Playhead {
    pub fn new(duration: Duration) -> ScrollworkResult<Self> {
        let duration = duration.as_secs_f64();
        if duration <= 0.0 {
            return Err(ScrollworkError::animation("playhead duration must be > 0"));
        }
        Ok(Self {
            duration,
            repeat: Repeat::Once,
            direction: Direction::Forward,
            time_scale: 1.0,
            position: 0.0,
            iteration: 0,
            state: PlayState::Paused,
        })
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> ScrollworkResult<Self> {
        if repeat == Repeat::Times(0) {
            return Err(ScrollworkError::animation("repeat count must be >= 1"));
        }
        self.repeat = repeat;
        Ok(self)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration)
    }

    pub fn progress(&self) -> f64 {
        (self.position / self.duration).clamp(0.0, 1.0)
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    /// Play forward from the current position.
    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.state = if self.at_forward_end() {
            PlayState::Finished
        } else {
            PlayState::Playing
        };
    }

    /// Play backward from the current position.
    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
        self.state = if self.position <= 0.0 && self.repeat != Repeat::Infinite {
            PlayState::Finished
        } else {
            PlayState::Playing
        };
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    pub fn restart(&mut self) {
        self.position = 0.0;
        self.iteration = 0;
        self.direction = Direction::Forward;
        self.state = PlayState::Playing;
    }

    /// Jump to `progress` without changing direction or play state.
    pub fn seek(&mut self, progress: f64) {
        self.position = crate::foundation::math::clamp_unit(progress) * self.duration;
    }

    /// Rate multiplier; negative values run against `direction`.
    pub fn set_time_scale(&mut self, scale: f64) -> ScrollworkResult<()> {
        if !scale.is_finite() {
            return Err(ScrollworkError::animation("time scale must be finite"));
        }
        self.time_scale = scale;
        Ok(())
    }

    fn at_forward_end(&self) -> bool {
        self.repeat != Repeat::Infinite
            && self.position >= self.duration
            && self.plays_left() == 0
    }

    fn plays_left(&self) -> u32 {
        match self.repeat {
            Repeat::Once => 0,
            Repeat::Times(n) => n.saturating_sub(self.iteration + 1),
            Repeat::Infinite => u32::MAX,
        }
    }

    /// Advance by `dt` and return the new progress.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.state != PlayState::Playing {
            return self.progress();
        }

        let sign = match self.direction {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        };
        let mut pos = self.position + dt.as_secs_f64() * self.time_scale * sign;

        if pos >= self.duration {
            let wraps = (pos / self.duration).floor() as u32;
            if self.repeat == Repeat::Infinite || self.plays_left() >= wraps {
                self.iteration = self.iteration.saturating_add(wraps);
                pos = pos.rem_euclid(self.duration);
            } else {
                self.iteration = self.iteration.saturating_add(self.plays_left());
                pos = self.duration;
                self.state = PlayState::Finished;
            }
        } else if pos <= 0.0 {
            if self.repeat == Repeat::Infinite && pos < 0.0 {
                pos = pos.rem_euclid(self.duration);
            } else {
                pos = 0.0;
                if self.direction == Direction::Backward || self.time_scale < 0.0 {
                    self.state = PlayState::Finished;
                }
            }
        }

        self.position = pos;
        self.progress()
    }
}

/// A timeline bound to its own autoplay clock.
#[derive(Clone, Debug)]
pub struct Autoplay {
    pub timeline: Timeline,
    pub playhead: Playhead,
    dirty: bool,
}

impl Autoplay {
    /// Paused at progress 0 until [`Playhead::play`] is called.
    pub fn new(timed: TimedTimeline) -> ScrollworkResult<Self> {
        Ok(Self {
            playhead: Playhead::new(timed.duration)?,
            timeline: timed.timeline,
            dirty: true,
        })
    }

    pub fn playing(mut self) -> Self {
        self.playhead.play();
        self
    }

    /// Force the next tick to write even if the clock did not move.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Advance the clock and write the current frame when anything changed.
    pub fn tick(&mut self, dt: Duration, sink: &mut dyn PropertySink) {
        let was_playing = self.playhead.is_playing();
        let progress = self.playhead.advance(dt);
        if was_playing || self.dirty {
            self.timeline.evaluate(progress, sink);
            self.dirty = false;
        }
    }
}

/// Open/close pair of autoplay parts: open plays forward, close reverses from wherever
/// each part currently is.
#[derive(Clone, Debug)]
pub struct Toggle {
    open: bool,
    parts: Vec<Autoplay>,
}

impl Toggle {
    pub fn new(parts: Vec<Autoplay>) -> Self {
        Self { open: false, parts }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.set_open(!self.open);
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        if open == self.open {
            return;
        }
        self.open = open;
        tracing::debug!(open, "toggle");
        for part in &mut self.parts {
            if open {
                part.playhead.play();
            } else {
                part.playhead.reverse();
            }
        }
    }

    pub fn parts(&self) -> &[Autoplay] {
        &self.parts
    }

    pub fn tick(&mut self, dt: Duration, sink: &mut dyn PropertySink) {
        for part in &mut self.parts {
            part.tick(dt, sink);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playhead.rs"]
mod tests;
