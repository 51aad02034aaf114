use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::{AnimationConfig, AnimationState, GeoPoint, MarkerSink, SlotName, TargetSet};

/// Owns at most one animation per slot and drives all of them from the same clock. Each
/// animation keeps its own record of which targets it's reached, so two slots can both reach the
/// same target.
pub struct Fleet {
    config: AnimationConfig,
    animations: BTreeMap<SlotName, AnimationState>,
}

impl Fleet {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            animations: BTreeMap::new(),
        }
    }

    /// Replaces whatever was animating in this slot. A route with fewer than 2 points just leaves
    /// the slot empty. Returns true if a new animation started.
    pub fn start<S: MarkerSink + ?Sized>(
        &mut self,
        slot: SlotName,
        route: &[GeoPoint],
        targets: TargetSet,
        sink: &mut S,
    ) -> bool {
        self.cancel(&slot, sink);

        let anim = match AnimationState::new(route, targets, &self.config) {
            Some(anim) => anim,
            None => {
                debug!(
                    "{} has a route with {} points, not animating it",
                    slot,
                    route.len()
                );
                return false;
            }
        };
        info!(
            "Animating {} along {} points, {:.0}m over {:?}",
            slot,
            route.len(),
            anim.route().total_length(),
            anim.duration()
        );
        sink.create_marker(&slot, anim.current_pos());
        self.animations.insert(slot, anim);
        true
    }

    /// Stops and removes the marker. Unknown slots are ignored.
    pub fn cancel<S: MarkerSink + ?Sized>(&mut self, slot: &SlotName, sink: &mut S) {
        if let Some(mut anim) = self.animations.remove(slot) {
            anim.cancel();
            sink.destroy_marker(slot);
            debug!("Cancelled {} at {:.0}%", slot, 100.0 * anim.progress());
        }
    }

    pub fn cancel_all<S: MarkerSink + ?Sized>(&mut self, sink: &mut S) {
        let slots: Vec<SlotName> = self.animations.keys().cloned().collect();
        for slot in slots {
            self.cancel(&slot, sink);
        }
    }

    /// Runs one frame of every animation. Finished animations are dropped, but their markers
    /// stay where they ended.
    pub fn tick<S: MarkerSink + ?Sized>(&mut self, now: Duration, sink: &mut S) {
        let mut done = Vec::new();
        for (slot, anim) in &mut self.animations {
            let frame = match anim.step(now) {
                Some(frame) => frame,
                None => {
                    // Cancelled through a handle
                    sink.destroy_marker(slot);
                    debug!("Cancelled {} at {:.0}%", slot, 100.0 * anim.progress());
                    done.push(slot.clone());
                    continue;
                }
            };
            sink.apply_position(slot, &frame);
            for idx in &frame.reached {
                info!("{} has reached target {}", slot, idx);
                sink.target_reached(slot, *idx);
            }
            if frame.finished {
                info!("{} finished its route", slot);
                done.push(slot.clone());
            }
        }
        for slot in done {
            self.animations.remove(&slot);
        }
    }

    pub fn get(&self, slot: &SlotName) -> Option<&AnimationState> {
        self.animations.get(slot)
    }

    pub fn running(&self) -> impl Iterator<Item = &SlotName> {
        self.animations.keys()
    }

    pub fn is_idle(&self) -> bool {
        self.animations.is_empty()
    }

    /// Schedules frames against the monotonic clock until everything finishes. Frames that run
    /// late don't slow the animation down; progress only depends on elapsed time.
    pub fn run_realtime<S: MarkerSink + ?Sized>(&mut self, sink: &mut S, frame_interval: Duration) {
        let origin = Instant::now();
        while !self.is_idle() {
            let frame_start = Instant::now();
            self.tick(frame_start.duration_since(origin), sink);
            if let Some(left) = frame_interval.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(left);
            }
        }
    }

    /// Like `run_realtime`, but with a made-up clock advancing exactly `frame_interval` per frame.
    /// Returns how many frames it took.
    pub fn run_simulated<S: MarkerSink + ?Sized>(
        &mut self,
        sink: &mut S,
        frame_interval: Duration,
    ) -> usize {
        if frame_interval.is_zero() {
            warn!("A zero frame interval would never advance time, using 1ms");
        }
        let frame_interval = frame_interval.max(Duration::from_millis(1));
        let mut now = Duration::ZERO;
        let mut frames = 0;
        while !self.is_idle() {
            self.tick(now, sink);
            now += frame_interval;
            frames += 1;
        }
        frames
    }
}
