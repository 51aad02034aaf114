use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Frame, GeoPoint, TargetIndex};

/// Names the owner of one animation, like a rescue team.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotName(pub String);

impl SlotName {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The renderer side of an animation. Implementations only draw; they never decide where the
/// marker goes.
pub trait MarkerSink {
    fn create_marker(&mut self, slot: &SlotName, pos: GeoPoint);
    fn apply_position(&mut self, slot: &SlotName, frame: &Frame);
    fn target_reached(&mut self, slot: &SlotName, target: TargetIndex);
    fn destroy_marker(&mut self, slot: &SlotName);
}

/// Fans out to several sinks, in order.
impl<A: MarkerSink, B: MarkerSink> MarkerSink for (A, B) {
    fn create_marker(&mut self, slot: &SlotName, pos: GeoPoint) {
        self.0.create_marker(slot, pos);
        self.1.create_marker(slot, pos);
    }

    fn apply_position(&mut self, slot: &SlotName, frame: &Frame) {
        self.0.apply_position(slot, frame);
        self.1.apply_position(slot, frame);
    }

    fn target_reached(&mut self, slot: &SlotName, target: TargetIndex) {
        self.0.target_reached(slot, target);
        self.1.target_reached(slot, target);
    }

    fn destroy_marker(&mut self, slot: &SlotName) {
        self.0.destroy_marker(slot);
        self.1.destroy_marker(slot);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Created(SlotName, GeoPoint),
    Moved(SlotName, GeoPoint),
    Reached(SlotName, TargetIndex),
    Destroyed(SlotName),
}

/// Remembers everything it's told. The live markers are whatever was created and not yet
/// destroyed.
#[derive(Default)]
pub struct Recording {
    pub events: Vec<SinkEvent>,
    pub markers: BTreeMap<SlotName, GeoPoint>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self, slot: &SlotName) -> Vec<GeoPoint> {
        self.events
            .iter()
            .filter_map(|ev| match ev {
                SinkEvent::Moved(s, pos) if s == slot => Some(*pos),
                _ => None,
            })
            .collect()
    }

    pub fn reached(&self, slot: &SlotName) -> Vec<TargetIndex> {
        self.events
            .iter()
            .filter_map(|ev| match ev {
                SinkEvent::Reached(s, idx) if s == slot => Some(*idx),
                _ => None,
            })
            .collect()
    }
}

impl MarkerSink for Recording {
    fn create_marker(&mut self, slot: &SlotName, pos: GeoPoint) {
        self.events.push(SinkEvent::Created(slot.clone(), pos));
        self.markers.insert(slot.clone(), pos);
    }

    fn apply_position(&mut self, slot: &SlotName, frame: &Frame) {
        self.events.push(SinkEvent::Moved(slot.clone(), frame.pos));
        self.markers.insert(slot.clone(), frame.pos);
    }

    fn target_reached(&mut self, slot: &SlotName, target: TargetIndex) {
        self.events.push(SinkEvent::Reached(slot.clone(), target));
    }

    fn destroy_marker(&mut self, slot: &SlotName) {
        self.events.push(SinkEvent::Destroyed(slot.clone()));
        self.markers.remove(slot);
    }
}
