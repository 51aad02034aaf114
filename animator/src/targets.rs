use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Position of a target in the list it was given in. 0-based; displayed 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetIndex(pub usize);

impl fmt::Display for TargetIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// Points of interest, like victims to reach. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct TargetSet {
    points: Vec<GeoPoint>,
}

impl TargetSet {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetIndex, GeoPoint)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, pt)| (TargetIndex(idx), *pt))
    }
}

impl From<Vec<GeoPoint>> for TargetSet {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

/// Remembers which targets one animation has already come within range of, so each only fires
/// once.
#[derive(Clone, Debug)]
pub struct ProximityDetector {
    targets: TargetSet,
    threshold_meters: f64,
    // Only grows
    triggered: BTreeSet<TargetIndex>,
}

impl ProximityDetector {
    pub fn new(targets: TargetSet, threshold_meters: f64) -> Self {
        Self {
            targets,
            threshold_meters,
            triggered: BTreeSet::new(),
        }
    }

    /// Returns targets strictly closer than the threshold that haven't fired before, in index
    /// order.
    pub fn check(&mut self, pos: GeoPoint) -> Vec<TargetIndex> {
        let mut reached = Vec::new();
        for (idx, target) in self.targets.iter() {
            if self.triggered.contains(&idx) {
                continue;
            }
            if pos.dist_to(target) < self.threshold_meters {
                self.triggered.insert(idx);
                reached.push(idx);
            }
        }
        reached
    }

    pub fn triggered(&self) -> &BTreeSet<TargetIndex> {
        &self.triggered
    }
}
