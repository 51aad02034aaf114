use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{AnimationConfig, GeoPoint, ProximityDetector, Route, TargetIndex, TargetSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the first frame
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }
}

/// What one frame produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub pos: GeoPoint,
    /// In [0, 1]
    pub progress: f64,
    pub dist_along: f64,
    pub reached: Vec<TargetIndex>,
    /// This is the last frame; the position is exactly the end of the route.
    pub finished: bool,
}

/// Lets something that doesn't own the animation stop it, like a frame callback that was already
/// queued. Cheap to clone; all clones share one flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Moves a marker along one route over a fixed wall-clock duration. Timestamps come from a
/// monotonic clock, expressed as the offset from any fixed origin the caller likes.
pub struct AnimationState {
    route: Route,
    detector: ProximityDetector,
    duration: Duration,

    status: Status,
    start_time: Option<Duration>,
    progress: f64,
    pos: GeoPoint,
    cancel: CancelHandle,
}

impl AnimationState {
    /// Snapshots the points. None if there are fewer than 2, in which case there's nothing to
    /// animate.
    pub fn new(points: &[GeoPoint], targets: TargetSet, config: &AnimationConfig) -> Option<Self> {
        let route = Route::new(points)?;
        let pos = route.first_pt();
        Some(Self {
            route,
            detector: ProximityDetector::new(targets, config.reach_threshold_meters),
            duration: config.duration,

            status: Status::Idle,
            start_time: None,
            progress: 0.0,
            pos,
            cancel: CancelHandle::default(),
        })
    }

    /// Advance to timestamp `now`. Returns None once the animation is cancelled or complete;
    /// nothing is updated in that case.
    pub fn step(&mut self, now: Duration) -> Option<Frame> {
        if self.cancel.is_cancelled() && !self.status.is_terminal() {
            self.status = Status::Cancelled;
        }
        if self.status.is_terminal() {
            return None;
        }

        let start_time = *self.start_time.get_or_insert(now);
        self.status = Status::Running;

        // A frame stamped earlier than the last one doesn't move the marker backwards
        let elapsed = now.saturating_sub(start_time);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        };
        self.progress = self.progress.max(progress);

        let finished = self.progress >= 1.0;
        let dist_along = self.progress * self.route.total_length();
        self.pos = if finished {
            self.route.last_pt()
        } else {
            self.route.position_at(dist_along)
        };

        let reached = self.detector.check(self.pos);
        if finished {
            self.status = Status::Completed;
        }

        Some(Frame {
            pos: self.pos,
            progress: self.progress,
            dist_along,
            reached,
            finished,
        })
    }

    /// Stop for good. Calling this again, or after completion, does nothing.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.cancel.cancel();
            self.status = Status::Cancelled;
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn status(&self) -> Status {
        if self.cancel.is_cancelled() && !self.status.is_terminal() {
            return Status::Cancelled;
        }
        self.status
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The last emitted position, or the start of the route before the first frame.
    pub fn current_pos(&self) -> GeoPoint {
        self.pos
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn triggered(&self) -> impl Iterator<Item = TargetIndex> + '_ {
        self.detector.triggered().iter().copied()
    }
}
