use ar_ngin::{
    Deg, HitPose, Vector3,
    data_structures::scene_graph::{AnimationClip, AnimationTrack, SceneNode},
    resources::animation::Keyframes,
    session::{SceneSession, TransformBounds},
};
use instant::Duration;

fn bounds() -> TransformBounds {
    TransformBounds {
        min_scale: 0.1,
        max_scale: 10.0,
        pitch_limit: Deg(80.0),
    }
}

fn plain_node(label: &str) -> SceneNode {
    SceneNode {
        label: label.to_string(),
        meshes: Vec::new(),
        animation: None,
    }
}

fn animated_node(label: &str) -> SceneNode {
    let clip = AnimationClip {
        name: "spin".to_string(),
        keyframes: Keyframes::Other,
        timestamps: vec![0.0, 0.5, 1.0],
    };
    SceneNode {
        animation: Some(AnimationTrack::new(vec![clip])),
        ..plain_node(label)
    }
}

#[test]
fn attach_resets_transform_and_placement_lock() {
    let mut session = SceneSession::new(bounds());
    session.attach(plain_node("first"));
    session.apply_scale(3.0);
    session.apply_rotation(Deg(45.0), Deg(10.0));
    session.lock_placement().unwrap();

    session.attach(plain_node("second"));
    assert_eq!(session.node().unwrap().label, "second");
    assert_eq!(session.transform().scale, 1.0);
    assert_eq!(session.transform().yaw, Deg(0.0));
    assert_eq!(session.transform().position, Vector3::new(0.0, 0.0, -2.0));
    assert!(!session.placement_locked());
}

#[test]
fn scale_round_trips_inside_bounds() {
    let mut session = SceneSession::new(bounds());
    session.attach(plain_node("m"));
    session.apply_scale(2.0);
    session.apply_scale(0.5);
    assert!((session.transform().scale - 1.0).abs() < 1e-6);
}

#[test]
fn scale_never_leaves_bounds() {
    let mut session = SceneSession::new(bounds());
    session.attach(plain_node("m"));
    for _ in 0..20 {
        session.apply_scale(100.0);
    }
    assert_eq!(session.transform().scale, 10.0);
    for _ in 0..20 {
        session.apply_scale(1e-6);
    }
    assert_eq!(session.transform().scale, 0.1);
}

#[test]
fn pitch_is_clamped_at_the_gimbal_guard() {
    let mut session = SceneSession::new(bounds());
    session.attach(plain_node("m"));
    session.apply_rotation(Deg(0.0), Deg(200.0));
    assert_eq!(session.transform().pitch, Deg(80.0));
    session.apply_rotation(Deg(0.0), Deg(-500.0));
    assert_eq!(session.transform().pitch, Deg(-80.0));
}

#[test]
fn placement_lock_drops_later_poses_but_not_gestures() {
    let mut session = SceneSession::new(bounds());
    session.attach(plain_node("m"));

    let pose = HitPose {
        position: Vector3::new(1.0, 0.0, -3.0),
        yaw: Deg(90.0),
    };
    session.apply_placement(pose);
    assert_eq!(session.transform().position, pose.position);

    session.lock_placement().unwrap();
    session.apply_placement(HitPose {
        position: Vector3::new(5.0, 5.0, 5.0),
        yaw: Deg(0.0),
    });
    assert_eq!(session.transform().position, pose.position);

    // Gestures still adjust scale and orientation after the lock.
    session.apply_scale(2.0);
    assert_eq!(session.transform().scale, 2.0);
    session.apply_rotation(Deg(10.0), Deg(0.0));
    assert_eq!(session.transform().yaw, Deg(100.0));
}

#[test]
fn animation_toggle_is_a_no_op_without_a_track() {
    let mut session = SceneSession::new(bounds());
    session.attach(plain_node("static"));
    session.set_animation_playing(true);
    assert!(!session.animation_playing());
}

#[test]
fn animation_advances_only_while_playing_and_pausing_freezes() {
    let mut session = SceneSession::new(bounds());
    session.attach(animated_node("walker"));

    session.advance(Duration::from_millis(250));
    assert_eq!(session.node().unwrap().animation.as_ref().unwrap().elapsed(), 0.0);

    session.set_animation_playing(true);
    session.advance(Duration::from_millis(250));
    let elapsed = session.node().unwrap().animation.as_ref().unwrap().elapsed();
    assert!((elapsed - 0.25).abs() < 1e-6);

    session.set_animation_playing(false);
    session.advance(Duration::from_millis(250));
    assert_eq!(
        session.node().unwrap().animation.as_ref().unwrap().elapsed(),
        elapsed
    );
}

#[test]
fn animation_timeline_wraps_at_clip_duration() {
    let mut session = SceneSession::new(bounds());
    session.attach(animated_node("walker"));
    session.set_animation_playing(true);
    session.advance(Duration::from_millis(1750));
    let elapsed = session.node().unwrap().animation.as_ref().unwrap().elapsed();
    assert!((elapsed - 0.75).abs() < 1e-5);
}
