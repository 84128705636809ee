use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::value::{Property, Value},
    foundation::core::TargetId,
};

/// Destination for every visual property write the engine produces.
///
/// The host implements this over its real elements. Writes to targets that are no longer
/// attached must be skipped by callers; [`PropertySink::is_attached`] is checked first.
pub trait PropertySink {
    /// Whether `target` still exists. Defaults to `true`.
    fn is_attached(&self, _target: TargetId) -> bool {
        true
    }

    /// Apply one property value.
    fn write(&mut self, target: TargetId, property: Property, value: Value);
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One recorded property write.
pub struct PropertyWrite {
    pub target: TargetId,
    pub property: Property,
    pub value: Value,
}

/// In-memory sink that keeps a log of writes plus the latest value per slot.
#[derive(Debug, Default)]
pub struct RecordingSink {
    log: Vec<PropertyWrite>,
    latest: BTreeMap<(TargetId, Property), Value>,
    detached: BTreeSet<TargetId>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `target` as removed from the document.
    pub fn detach(&mut self, target: TargetId) {
        self.detached.insert(target);
    }

    pub fn reattach(&mut self, target: TargetId) {
        self.detached.remove(&target);
    }

    pub fn writes(&self) -> &[PropertyWrite] {
        &self.log
    }

    pub fn latest(&self, target: TargetId, property: Property) -> Option<Value> {
        self.latest.get(&(target, property)).copied()
    }

    pub fn latest_scalar(&self, target: TargetId, property: Property) -> Option<f64> {
        self.latest(target, property).and_then(|v| v.as_scalar())
    }

    pub fn writes_to(&self, target: TargetId) -> usize {
        self.log.iter().filter(|w| w.target == target).count()
    }

    /// Drop the write log, keeping latest values.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn take_log(&mut self) -> Vec<PropertyWrite> {
        std::mem::take(&mut self.log)
    }
}

impl PropertySink for RecordingSink {
    fn is_attached(&self, target: TargetId) -> bool {
        !self.detached.contains(&target)
    }

    fn write(&mut self, target: TargetId, property: Property, value: Value) {
        if self.detached.contains(&target) {
            return;
        }
        self.log.push(PropertyWrite {
            target,
            property,
            value,
        });
        self.latest.insert((target, property), value);
    }
}
