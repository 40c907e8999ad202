// Pose target math and the shared smoothing step.

use glam::Vec3;
use story_core::{
    dance_bounce, facing_yaw, pose_targets, Anim, CharacterRole, PoseState, DANCE_BEAT, POSE_BLEND,
};

#[test]
fn dance_bounce_is_zero_at_sine_zero_crossings() {
    // sin(t * beat) = 0 at t = k * pi / beat
    for k in 0..8 {
        let t = k as f32 * std::f32::consts::PI / DANCE_BEAT;
        assert!(
            dance_bounce(t).abs() < 1e-5,
            "bounce should vanish at crossing {k}, got {}",
            dance_bounce(t)
        );
    }
}

#[test]
fn dance_bounce_peaks_at_sine_extremes_and_never_dips() {
    let peak_t = std::f32::consts::FRAC_PI_2 / DANCE_BEAT; // sin = +1
    assert!((dance_bounce(peak_t) - 0.08).abs() < 1e-5);
    let trough_t = 3.0 * std::f32::consts::FRAC_PI_2 / DANCE_BEAT; // sin = -1
    assert!((dance_bounce(trough_t) - 0.08).abs() < 1e-5);

    for i in 0..2000 {
        let t = i as f32 * 0.01;
        assert!(dance_bounce(t) >= 0.0, "bounce went negative at t={t}");
    }
}

#[test]
fn dance_root_target_never_sinks_below_base() {
    let base = Vec3::new(0.0, 1.1, -3.0);
    for i in 0..500 {
        let t = i as f32 * 0.016;
        let targets = pose_targets(Anim::Dance, t, base, CharacterRole::LEAD);
        let root = targets.root_pos.expect("dance always drives the root");
        assert!(root.y >= base.y - 1e-6, "root dipped below base at t={t}");
    }
}

#[test]
fn party_guests_turn_toward_the_focus_point() {
    let focus = Vec3::new(0.6, 0.0, 0.0);

    for (pos, expect) in [
        (Vec3::new(-2.2, 0.0, -0.5), (0.6f32 - -2.2).atan2(0.5)),
        (Vec3::new(3.0, 0.0, 0.0), (0.6f32 - 3.0).atan2(0.0)),
    ] {
        let targets = pose_targets(Anim::Party { focus }, 0.0, pos, CharacterRole::elder(false));
        let yaw = targets.root_rot.expect("guests get a root yaw").y;
        assert!(
            (yaw - expect).abs() < 1e-5,
            "guest at {pos:?} should face the focus: expected {expect}, got {yaw}"
        );
        assert!((facing_yaw(pos, focus) - expect).abs() < 1e-5);
    }
}

#[test]
fn party_focus_character_holds_a_fixed_yaw() {
    let focus = Vec3::new(0.6, 0.0, 0.0);
    let targets = pose_targets(Anim::Party { focus }, 2.0, focus, CharacterRole::PARTNER);
    assert_eq!(targets.root_rot, Some(Vec3::new(0.0, -0.3, 0.0)));
}

#[test]
fn smoothing_is_monotonic_and_converges() {
    let mut pose = PoseState::at(Vec3::ZERO);
    let target = Vec3::new(1.0, 0.0, 0.0);
    let targets = story_core::JointTargets {
        head: Some(target),
        ..Default::default()
    };

    let mut prev = pose.head.x;
    for _ in 0..200 {
        pose.step(&targets, POSE_BLEND);
        assert!(pose.head.x >= prev, "smoothing reversed direction");
        assert!(pose.head.x <= target.x + 1e-6, "smoothing overshot");
        prev = pose.head.x;
    }
    assert!(
        (pose.head.x - target.x).abs() < 1e-3,
        "head failed to converge: {}",
        pose.head.x
    );
}

#[test]
fn idle_holds_the_previous_pose() {
    let base = Vec3::new(0.5, 0.0, 0.0);
    let mut pose = PoseState::at(base);
    // Bend the character into a sit first.
    for _ in 0..50 {
        pose.animate(Anim::Sit, 0.0, base, CharacterRole::LEAD);
    }
    let snapshot = pose;
    pose.animate(Anim::Idle, 10.0, base, CharacterRole::LEAD);
    assert_eq!(pose.body, snapshot.body);
    assert_eq!(pose.head, snapshot.head);
    assert_eq!(pose.left_leg, snapshot.left_leg);
    assert_eq!(pose.root_pos, snapshot.root_pos);
}

#[test]
fn sick_partner_reclines_and_rises() {
    let base = Vec3::new(0.0, 0.3, 0.0);
    let targets = pose_targets(Anim::Sick, 0.0, base, CharacterRole::PARTNER);
    assert_eq!(targets.root_rot, Some(Vec3::new(-1.6, 0.0, 0.0)));
    assert_eq!(targets.root_pos, Some(base + Vec3::new(0.0, 0.3, 0.0)));
    // The reclined pose leaves limbs alone.
    assert!(targets.left_arm.is_none());
}

#[test]
fn scare_startles_everyone_else() {
    for anim in [Anim::Scare, Anim::Sick] {
        let targets = pose_targets(anim, 0.0, Vec3::ZERO, CharacterRole::LEAD);
        assert_eq!(targets.head, Some(Vec3::new(0.5, 0.0, 0.0)));
        assert_eq!(targets.left_arm, Some(Vec3::new(-0.5, 0.5, 0.2)));
        assert_eq!(targets.right_arm, Some(Vec3::new(-0.5, -0.5, -0.2)));
    }
}

#[test]
fn kneel_turns_the_pair_toward_each_other() {
    let him = pose_targets(Anim::Kneel, 0.0, Vec3::new(-0.8, 0.0, 0.0), CharacterRole::LEAD);
    let her = pose_targets(
        Anim::Kneel,
        0.0,
        Vec3::new(0.8, 0.0, 0.0),
        CharacterRole::PARTNER,
    );
    assert_eq!(him.root_rot.unwrap().y, 1.2);
    assert_eq!(her.root_rot.unwrap().y, -1.2);
    // He sinks onto the knee; both his legs fold.
    assert!(him.root_pos.unwrap().y < 0.0);
    assert_eq!(him.left_leg, Some(Vec3::new(1.5, 0.0, 0.0)));
    assert_eq!(him.right_leg, Some(Vec3::new(1.5, 0.0, 0.0)));
}

#[test]
fn walk_legs_alternate_in_antiphase() {
    for i in 0..100 {
        let t = i as f32 * 0.03;
        let targets = pose_targets(Anim::Walk, t, Vec3::ZERO, CharacterRole::LEAD);
        let l = targets.left_leg.unwrap().x;
        let r = targets.right_leg.unwrap().x;
        assert!(
            (l + r).abs() < 1e-4,
            "legs should mirror each other at t={t}: {l} vs {r}"
        );
    }
}

#[test]
fn walk_partners_hold_hands_with_opposite_arms() {
    let him = pose_targets(Anim::Walk, 0.2, Vec3::new(-0.35, 0.0, 1.0), CharacterRole::LEAD);
    let her = pose_targets(
        Anim::Walk,
        0.2,
        Vec3::new(0.35, 0.0, 1.0),
        CharacterRole::PARTNER,
    );
    // Her left arm and his right arm reach toward the middle.
    assert_eq!(her.left_arm.unwrap().z, 0.6);
    assert_eq!(him.right_arm.unwrap().z, -0.6);
}

#[test]
fn meet_mirrors_by_role() {
    let him = pose_targets(Anim::Meet, 0.0, Vec3::ZERO, CharacterRole::LEAD);
    let her = pose_targets(Anim::Meet, 0.0, Vec3::ZERO, CharacterRole::PARTNER);
    assert_eq!(him.head.unwrap().y, 0.5);
    assert_eq!(her.head.unwrap().y, -0.5);
    assert_eq!(him.body.unwrap().y, 0.25);
    assert_eq!(her.body.unwrap().y, -0.25);
}
