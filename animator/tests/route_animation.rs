use std::time::Duration;

use animator::{
    parse_points, AnimationConfig, AnimationState, Fleet, GeoPoint, Recording, SinkEvent,
    SlotName, Status, TargetIndex, TargetSet,
};

fn ms(x: u64) -> Duration {
    Duration::from_millis(x)
}

// Three points, two equal segments of ~111m along the equator, and a victim on the middle vertex
fn equator_route() -> Vec<GeoPoint> {
    parse_points(&["0,0", "0,0.001", "0,0.002"]).unwrap()
}

#[test]
fn halfway_frame_sits_on_the_victim() {
    let victims = TargetSet::new(vec![GeoPoint::new(0.0, 0.001)]);
    let mut anim =
        AnimationState::new(&equator_route(), victims, &AnimationConfig::default()).unwrap();

    let mut reached_at = Vec::new();
    let mut t = 0;
    while t < 7500 {
        let frame = anim.step(ms(t)).unwrap();
        if !frame.reached.is_empty() {
            reached_at.push(t);
        }
        t += 250;
    }
    let frame = anim.step(ms(7500)).unwrap();
    assert_eq!(frame.progress, 0.5);
    assert_eq!(frame.pos, GeoPoint::new(0.0, 0.001));
    if !frame.reached.is_empty() {
        reached_at.push(7500);
    }
    assert_eq!(reached_at.len(), 1);

    // The marker lingers within 100m of the victim for many more frames, but it never fires again
    let mut t = 7500;
    while let Some(frame) = anim.step(ms(t)) {
        assert!(frame.reached.is_empty());
        t += 16;
    }
    assert_eq!(anim.status(), Status::Completed);
    assert_eq!(anim.current_pos(), GeoPoint::new(0.0, 0.002));
}

#[test]
fn irregular_frame_rate_only_changes_sampling() {
    let route = parse_points(&[
        "46.8527,-121.7604",
        "46.8560,-121.7550",
        "46.8601,-121.7502",
        "46.8655,-121.7488",
    ])
    .unwrap();
    let config = AnimationConfig::default();

    let mut smooth = AnimationState::new(&route, TargetSet::empty(), &config).unwrap();
    let mut choppy = AnimationState::new(&route, TargetSet::empty(), &config).unwrap();
    smooth.step(ms(0)).unwrap();
    choppy.step(ms(0)).unwrap();
    for t in (16..5000).step_by(16) {
        smooth.step(ms(t)).unwrap();
    }
    choppy.step(ms(1200)).unwrap();
    choppy.step(ms(4992)).unwrap();
    let a = smooth.step(ms(5000)).unwrap();
    let b = choppy.step(ms(5000)).unwrap();
    assert_eq!(a.pos, b.pos);
    assert_eq!(a.progress, b.progress);
}

#[test]
fn fleet_replay_of_two_teams() {
    let victims: TargetSet = parse_points(&["46.8560,-121.7550", "46.8655,-121.7488"])
        .unwrap()
        .into();
    let alpha = SlotName::new("Team Alpha");
    let bravo = SlotName::new("Team Bravo");

    let mut fleet = Fleet::new(AnimationConfig::default().with_duration(ms(3000)));
    let mut sink = Recording::new();
    fleet.start(
        alpha.clone(),
        &parse_points(&["46.8527,-121.7604", "46.8560,-121.7550"]).unwrap(),
        victims.clone(),
        &mut sink,
    );
    fleet.start(
        bravo.clone(),
        &parse_points(&["46.8527,-121.7604", "46.8601,-121.7502", "46.8655,-121.7488"]).unwrap(),
        victims,
        &mut sink,
    );
    // Nobody else is around; this one never has a marker
    fleet.start(
        SlotName::new("Team Charlie"),
        &parse_points(&["46.8527,-121.7604"]).unwrap(),
        TargetSet::empty(),
        &mut sink,
    );

    let frames = fleet.run_simulated(&mut sink, ms(16));
    assert!(frames >= 3000 / 16);
    assert!(fleet.is_idle());

    assert_eq!(sink.reached(&alpha), vec![TargetIndex(0)]);
    // Bravo's first leg passes ~50m from the first victim, so it reaches both
    assert_eq!(sink.reached(&bravo), vec![TargetIndex(0), TargetIndex(1)]);
    assert_eq!(sink.markers.len(), 2);
    assert_eq!(sink.markers[&alpha], GeoPoint::new(46.8560, -121.7550));
    assert_eq!(sink.markers[&bravo], GeoPoint::new(46.8655, -121.7488));
    assert!(!sink
        .events
        .iter()
        .any(|ev| matches!(ev, SinkEvent::Destroyed(_))));

    // Both lists of positions start at the base and end exactly on the last route point
    for slot in [&alpha, &bravo] {
        let positions = sink.positions(slot);
        assert_eq!(positions[0], GeoPoint::new(46.8527, -121.7604));
        assert_eq!(positions.last(), sink.markers.get(slot));
    }
}
