use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a whole route takes to play, no matter its length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(15_000);
/// A target counts as reached when the marker passes strictly closer than this.
pub const DEFAULT_REACH_THRESHOLD_METERS: f64 = 100.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(with = "millis")]
    pub duration: Duration,
    pub reach_threshold_meters: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            reach_threshold_meters: DEFAULT_REACH_THRESHOLD_METERS,
        }
    }
}

impl AnimationConfig {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_reach_threshold(mut self, meters: f64) -> Self {
        self.reach_threshold_meters = meters;
        self
    }
}

// Durations are written as whole milliseconds
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
