use std::collections::BTreeMap;

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde::Serialize;

use animator::{Frame, GeoPoint, MarkerSink, SlotName, TargetIndex, TargetSet};

/// Announces reached victims on stdout, the way the dashboard pops up a toast.
pub struct Toasts;

impl MarkerSink for Toasts {
    fn create_marker(&mut self, _: &SlotName, _: GeoPoint) {}

    fn apply_position(&mut self, _: &SlotName, _: &Frame) {}

    fn target_reached(&mut self, slot: &SlotName, target: TargetIndex) {
        println!("Victim Reached: {} has reached Victim {}.", slot, target);
    }

    fn destroy_marker(&mut self, _: &SlotName) {}
}

/// Remembers the path each marker took, for exporting afterwards.
#[derive(Default)]
pub struct Trace {
    teams: BTreeMap<SlotName, TeamTrace>,
}

#[derive(Default)]
struct TeamTrace {
    positions: Vec<GeoPoint>,
    // (victim, where the marker was when it got close enough)
    reached: Vec<(TargetIndex, GeoPoint)>,
    frames: usize,
}

#[derive(Serialize)]
pub struct Summary {
    pub teams: Vec<TeamSummary>,
}

#[derive(Serialize)]
pub struct TeamSummary {
    pub team: SlotName,
    pub frames: usize,
    /// 1-based, in the order they were reached
    pub victims_reached: Vec<usize>,
    pub final_position: Option<GeoPoint>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Summary {
        let mut teams = Vec::new();
        for (team, trace) in &self.teams {
            teams.push(TeamSummary {
                team: team.clone(),
                frames: trace.frames,
                victims_reached: trace.reached.iter().map(|(idx, _)| idx.0 + 1).collect(),
                final_position: trace.positions.last().copied(),
            });
        }
        Summary { teams }
    }

    pub fn to_geojson(&self, victims: &TargetSet) -> GeoJson {
        let mut features = Vec::new();

        for (idx, pos) in victims.iter() {
            let mut feature = point_feature(pos);
            feature.set_property("type", "victim");
            feature.set_property("victim", idx.0 + 1);
            features.push(feature);
        }

        for (team, trace) in &self.teams {
            // A LineString needs 2 positions
            if trace.positions.len() >= 2 {
                let mut feature = Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                        trace.positions.iter().map(|pt| vec![pt.lng, pt.lat]).collect(),
                    ))),
                    id: None,
                    properties: None,
                    foreign_members: None,
                };
                feature.set_property("type", "trace");
                feature.set_property("team", team.0.clone());
                feature.set_property("frames", trace.frames);
                features.push(feature);
            }

            for (idx, pos) in &trace.reached {
                let mut feature = point_feature(*pos);
                feature.set_property("type", "reached");
                feature.set_property("team", team.0.clone());
                feature.set_property("victim", idx.0 + 1);
                features.push(feature);
            }
        }

        GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn write_geojson(&self, path: &str, victims: &TargetSet) -> Result<()> {
        let gj = self.to_geojson(victims);
        fs_err::write(path, serde_json::to_string_pretty(&gj)?)?;
        info!("Wrote {}", path);
        Ok(())
    }
}

impl MarkerSink for Trace {
    fn create_marker(&mut self, slot: &SlotName, pos: GeoPoint) {
        // A restarted team starts a fresh trace
        self.teams.insert(
            slot.clone(),
            TeamTrace {
                positions: vec![pos],
                ..Default::default()
            },
        );
    }

    fn apply_position(&mut self, slot: &SlotName, frame: &Frame) {
        let trace = self.teams.entry(slot.clone()).or_default();
        trace.frames += 1;
        // Consecutive frames often don't move at all on short routes
        if trace.positions.last() != Some(&frame.pos) {
            trace.positions.push(frame.pos);
        }
    }

    fn target_reached(&mut self, slot: &SlotName, target: TargetIndex) {
        let trace = self.teams.entry(slot.clone()).or_default();
        if let Some(pos) = trace.positions.last().copied() {
            trace.reached.push((target, pos));
        }
    }

    fn destroy_marker(&mut self, slot: &SlotName) {
        self.teams.remove(slot);
    }
}

fn point_feature(pt: GeoPoint) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
            pt.lng, pt.lat,
        ]))),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use animator::{AnimationConfig, Fleet};

    use super::*;

    fn run() -> (Trace, TargetSet) {
        let victims: TargetSet = vec![GeoPoint::new(0.0, 0.001)].into();
        let mut fleet = Fleet::new(AnimationConfig::default().with_duration(Duration::from_secs(1)));
        let mut trace = Trace::new();
        fleet.start(
            SlotName::new("Team Alpha"),
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.002)],
            victims.clone(),
            &mut trace,
        );
        fleet.run_simulated(&mut trace, Duration::from_millis(100));
        (trace, victims)
    }

    #[test]
    fn summary() {
        let (trace, _) = run();
        let summary = trace.summary();
        assert_eq!(summary.teams.len(), 1);
        let team = &summary.teams[0];
        assert_eq!(team.frames, 11);
        assert_eq!(team.victims_reached, vec![1]);
        assert_eq!(team.final_position, Some(GeoPoint::new(0.0, 0.002)));
    }

    #[test]
    fn geojson_features() {
        let (trace, victims) = run();
        let fc = match trace.to_geojson(&victims) {
            GeoJson::FeatureCollection(fc) => fc,
            _ => unreachable!(),
        };
        let kinds: Vec<String> = fc
            .features
            .iter()
            .map(|f| f.property("type").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["victim", "trace", "reached"]);
    }

    #[test]
    fn restart_resets_the_trace() {
        let (mut trace, _) = run();
        let slot = SlotName::new("Team Alpha");
        trace.destroy_marker(&slot);
        trace.create_marker(&slot, GeoPoint::new(1.0, 1.0));
        let summary = trace.summary();
        assert_eq!(summary.teams[0].frames, 0);
        assert!(summary.teams[0].victims_reached.is_empty());
    }
}
