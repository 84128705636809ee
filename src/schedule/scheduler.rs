use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::{
    animation::{sink::PropertySink, tween::Tween},
    foundation::core::{Region, TargetId, Viewport, ViewportClass},
    schedule::effect::ScrollEffect,
    scroll::{
        navigate::scroll_to_section,
        source::{FrameCtx, ScrollSource},
    },
};

new_key_type! {
    /// Identifies one registered effect.
    pub struct EffectKey;
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameOutput {
    pub frame: u64,
    /// Document scroll position to apply, from navigation or a snap settle.
    pub scroll_to: Option<f64>,
    pub effects: usize,
}

type EffectTable = SlotMap<EffectKey, Option<Box<dyn ScrollEffect>>>;

struct Inner {
    source: ScrollSource,
    last_tick: Option<Duration>,
    navigation: Option<Tween>,
    frame: u64,
}

/// Input that arrived while a frame was running; applied before the next snapshot.
#[derive(Clone, Copy, Debug)]
enum Deferred {
    Scroll(f64, Duration),
    Resize(Viewport),
    NativeScroll(TargetId, f64, Duration),
    Navigate(Region, Duration),
}

/// Frame-driven scheduler: one coalesced scroll snapshot per frame, handed to every effect.
///
/// Cloning yields another handle to the same scheduler. Handles may be used from inside an
/// effect's `update`: reads see the frame's state, input and navigation are queued until the
/// frame ends, and registrations join from the next frame.
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<RefCell<Inner>>,
    effects: Rc<RefCell<EffectTable>>,
    released: Rc<RefCell<Vec<EffectKey>>>,
    deferred: Rc<RefCell<Vec<Deferred>>>,
}

impl FrameScheduler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                source: ScrollSource::new(viewport),
                last_tick: None,
                navigation: None,
                frame: 0,
            })),
            effects: Rc::new(RefCell::new(SlotMap::with_key())),
            released: Rc::new(RefCell::new(Vec::new())),
            deferred: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push_scroll(&self, y: f64, at: Duration) {
        self.apply(Deferred::Scroll(y, at));
    }

    pub fn push_resize(&self, viewport: Viewport) {
        self.apply(Deferred::Resize(viewport));
    }

    pub fn push_native_scroll(&self, container: TargetId, left: f64, at: Duration) {
        self.apply(Deferred::NativeScroll(container, left, at));
    }

    pub fn scroll_y(&self) -> f64 {
        self.inner.borrow().source.scroll_y()
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().source.viewport()
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.inner.borrow().source.viewport_class()
    }

    pub fn effect_count(&self) -> usize {
        self.reap();
        self.effects.borrow().len()
    }

    /// Register an effect. It is measured against the current viewport right away.
    pub fn register(&self, effect: impl ScrollEffect + 'static) -> Registration {
        self.register_boxed(Box::new(effect))
    }

    pub fn register_boxed(&self, mut effect: Box<dyn ScrollEffect>) -> Registration {
        effect.measure(self.viewport());
        let label = effect.label();
        let key = self.effects.borrow_mut().insert(Some(effect));
        tracing::debug!(?key, label, "effect registered");
        Registration {
            key,
            label,
            inner: Rc::downgrade(&self.inner),
            effects: Rc::downgrade(&self.effects),
            released: Rc::downgrade(&self.released),
            active: true,
        }
    }

    /// Smooth-scroll to the top of `section`, starting from the current position.
    ///
    /// User scroll input that arrives after `now` interrupts it.
    pub fn navigate_to(&self, section: Region, now: Duration) {
        self.apply(Deferred::Navigate(section, now));
    }

    fn apply(&self, op: Deferred) {
        match self.inner.try_borrow_mut() {
            Ok(mut inner) => inner.apply(op),
            Err(_) => self.deferred.borrow_mut().push(op),
        }
    }

    fn drain_deferred(&self, inner: &mut Inner) {
        let ops: Vec<Deferred> = self.deferred.borrow_mut().drain(..).collect();
        for op in ops {
            inner.apply(op);
        }
    }

    /// Run one frame at host time `now`.
    pub fn tick(&self, now: Duration, sink: &mut dyn PropertySink) -> FrameOutput {
        self.reap();
        let snapshot = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            self.drain_deferred(inner);
            inner.frame += 1;
            let snapshot = inner.source.snapshot(now);
            let last_input = inner.source.last_user_scroll();
            if snapshot.user_scrolled
                && let Some(nav) = inner.navigation
                && last_input.is_some_and(|t| t > nav.started())
            {
                inner.navigation = None;
                tracing::debug!("navigation interrupted by user scroll");
            }
            snapshot
        };
        if snapshot.resized {
            let _span = tracing::debug_span!("measure", viewport = ?snapshot.viewport).entered();
            for effect in self.effects.borrow_mut().values_mut().flatten() {
                effect.measure(snapshot.viewport);
            }
        }

        let mut request = None;
        {
            let inner = self.inner.borrow();
            let dt = inner
                .last_tick
                .map(|t| now.saturating_sub(t))
                .unwrap_or(Duration::ZERO);
            let ctx = FrameCtx {
                snapshot,
                source: &inner.source,
                dt,
            };
            let keys: Vec<EffectKey> = self.effects.borrow().keys().collect();
            for key in keys {
                let Some(mut effect) = self.effects.borrow_mut().get_mut(key).and_then(Option::take)
                else {
                    continue;
                };
                if let Some(r) = effect.update(&ctx, sink) {
                    request = Some(r.to_y);
                }
                if let Some(slot) = self.effects.borrow_mut().get_mut(key) {
                    *slot = Some(effect);
                }
            }
        }

        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.last_tick = Some(now);
        if let Some(nav) = inner.navigation {
            request = Some(nav.sample(now));
            if nav.is_done(now) {
                inner.navigation = None;
            }
        }
        if let Some(y) = request {
            inner.source.note_programmatic(y);
        }
        self.drain_deferred(inner);
        drop(guard);
        self.reap();

        FrameOutput {
            frame: self.inner.borrow().frame,
            scroll_to: request,
            effects: self.effects.borrow().len(),
        }
    }

    fn reap(&self) {
        let released: Vec<EffectKey> = self.released.borrow_mut().drain(..).collect();
        if released.is_empty() {
            return;
        }
        let mut effects = self.effects.borrow_mut();
        for key in released {
            effects.remove(key);
        }
    }
}

impl Inner {
    fn apply(&mut self, op: Deferred) {
        match op {
            Deferred::Scroll(y, at) => self.source.push_scroll(y, at),
            Deferred::Resize(viewport) => self.source.push_resize(viewport),
            Deferred::NativeScroll(container, left, at) => {
                self.source.push_native_scroll(container, left, at)
            }
            Deferred::Navigate(section, now) => {
                let from = self.source.scroll_y();
                self.navigation = Some(scroll_to_section(from, section, now));
            }
        }
    }
}

/// Owning handle for a registered effect. Dropping it unregisters the effect; no further
/// writes happen for it from the next frame on.
#[must_use = "dropping a Registration unregisters the effect immediately"]
pub struct Registration {
    key: EffectKey,
    label: &'static str,
    inner: Weak<RefCell<Inner>>,
    effects: Weak<RefCell<EffectTable>>,
    released: Weak<RefCell<Vec<EffectKey>>>,
    active: bool,
}

impl Registration {
    pub fn key(&self) -> EffectKey {
        self.key
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Whether the effect is still registered with a live scheduler.
    pub fn is_active(&self) -> bool {
        self.active && self.effects.strong_count() > 0
    }

    /// Re-bind the effect to a new element region and re-measure it.
    pub fn relayout(&self, region: Region) -> bool {
        let (Some(inner), Some(effects)) = (self.inner.upgrade(), self.effects.upgrade()) else {
            return false;
        };
        let Ok(inner) = inner.try_borrow() else {
            return false;
        };
        let viewport = inner.source.viewport();
        let Ok(mut effects) = effects.try_borrow_mut() else {
            return false;
        };
        match effects.get_mut(self.key).and_then(Option::as_mut) {
            Some(effect) => {
                effect.set_region(region);
                effect.measure(viewport);
                true
            }
            None => false,
        }
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        tracing::debug!(key = ?self.key, label = self.label, "effect released");
        if let Some(shared) = self.effects.upgrade()
            && let Ok(mut effects) = shared.try_borrow_mut()
        {
            effects.remove(self.key);
            return;
        }
        if let Some(released) = self.released.upgrade() {
            released.borrow_mut().push(self.key);
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
