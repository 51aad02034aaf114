//! Walks a marker along a route over a fixed wall-clock duration, reporting when it passes near
//! targets. Nothing here renders; positions and events go out through a `MarkerSink`.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod animation;
mod config;
mod fleet;
mod geo_point;
mod route;
mod sink;
mod targets;

pub use self::animation::{AnimationState, CancelHandle, Frame, Status};
pub use self::config::{AnimationConfig, DEFAULT_DURATION, DEFAULT_REACH_THRESHOLD_METERS};
pub use self::fleet::Fleet;
pub use self::geo_point::{distance, interpolate, parse_points, GeoPoint};
pub use self::route::Route;
pub use self::sink::{MarkerSink, Recording, SinkEvent, SlotName};
pub use self::targets::{ProximityDetector, TargetIndex, TargetSet};
