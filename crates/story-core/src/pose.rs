//! Per-frame procedural pose animation.
//!
//! Every character owns a [`PoseState`]: Euler rotations for six joint
//! channels plus a root position and rotation. Once per frame the active
//! [`Anim`] variant computes targets for the channels it cares about, and
//! the shared smoothing step moves each current value a fixed fraction of
//! the way there. Channels without a target hold their last smoothed value,
//! so an unhandled animation is a harmless idle, not an error.

use glam::Vec3;

use crate::constants::{
    DANCE_BEAT, DANCE_BOUNCE, DANCE_STEP_X, LOVE_SWAY_HZ, POSE_BLEND, WALK_BEAT, WALK_BOUNCE,
};

/// Animation behavior applied to a character for the duration of a chapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anim {
    Dance,
    Walk,
    Meet,
    Scare,
    Sick,
    Love,
    /// Everyone orients toward `focus`; the partner character *is* the
    /// focus and holds a slight fixed yaw instead.
    Party { focus: Vec3 },
    Kneel,
    Sit,
    Idle,
}

/// Which of the pair this character is, plus cosmetic traits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharacterRole {
    /// The "her" of the couple; poses mirror around this flag.
    pub partner: bool,
    pub female: bool,
    pub elder: bool,
}

impl CharacterRole {
    pub const LEAD: Self = Self {
        partner: false,
        female: false,
        elder: false,
    };
    pub const PARTNER: Self = Self {
        partner: true,
        female: true,
        elder: false,
    };

    pub fn elder(female: bool) -> Self {
        Self {
            partner: false,
            female,
            elder: true,
        }
    }

    pub fn feminine(self) -> bool {
        self.partner || self.female
    }
}

/// Per-frame targets. `None` leaves the channel untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct JointTargets {
    pub root_pos: Option<Vec3>,
    pub root_rot: Option<Vec3>,
    pub body: Option<Vec3>,
    pub head: Option<Vec3>,
    pub left_arm: Option<Vec3>,
    pub right_arm: Option<Vec3>,
    pub left_leg: Option<Vec3>,
    pub right_leg: Option<Vec3>,
}

/// Smoothed joint state owned by one character instance.
#[derive(Clone, Copy, Debug)]
pub struct PoseState {
    pub root_pos: Vec3,
    pub root_rot: Vec3,
    pub body: Vec3,
    pub head: Vec3,
    pub left_arm: Vec3,
    pub right_arm: Vec3,
    pub left_leg: Vec3,
    pub right_leg: Vec3,
}

impl PoseState {
    pub fn at(base: Vec3) -> Self {
        Self {
            root_pos: base,
            root_rot: Vec3::ZERO,
            body: Vec3::ZERO,
            head: Vec3::ZERO,
            left_arm: Vec3::ZERO,
            right_arm: Vec3::ZERO,
            left_leg: Vec3::ZERO,
            right_leg: Vec3::ZERO,
        }
    }

    /// Move every targeted channel `blend` of the remaining distance toward
    /// its target. With a constant target the sequence is monotonic and
    /// converges asymptotically; nothing ever snaps.
    pub fn step(&mut self, targets: &JointTargets, blend: f32) {
        fn approach(current: &mut Vec3, target: Option<Vec3>, k: f32) {
            if let Some(t) = target {
                *current += (t - *current) * k;
            }
        }
        approach(&mut self.root_pos, targets.root_pos, blend);
        approach(&mut self.root_rot, targets.root_rot, blend);
        approach(&mut self.body, targets.body, blend);
        approach(&mut self.head, targets.head, blend);
        approach(&mut self.left_arm, targets.left_arm, blend);
        approach(&mut self.right_arm, targets.right_arm, blend);
        approach(&mut self.left_leg, targets.left_leg, blend);
        approach(&mut self.right_leg, targets.right_leg, blend);
    }

    /// One animation frame at elapsed time `t`.
    pub fn animate(&mut self, anim: Anim, t: f32, base: Vec3, role: CharacterRole) {
        let targets = pose_targets(anim, t, base, role);
        self.step(&targets, POSE_BLEND);
    }
}

/// Vertical bounce used by the dance cycle; absolute value, never negative.
#[inline]
pub fn dance_bounce(t: f32) -> f32 {
    (t * DANCE_BEAT).sin().abs() * DANCE_BOUNCE
}

/// Yaw that turns a character standing at `position` to face `focus`.
#[inline]
pub fn facing_yaw(position: Vec3, focus: Vec3) -> f32 {
    (focus.x - position.x).atan2(focus.z - position.z)
}

/// Pure target computation for one character, one frame.
pub fn pose_targets(anim: Anim, t: f32, base: Vec3, role: CharacterRole) -> JointTargets {
    let mut out = JointTargets::default();
    match anim {
        Anim::Dance => {
            let step_x = (t * DANCE_BEAT / 2.0).sin() * DANCE_STEP_X;
            out.root_pos = Some(base + Vec3::new(step_x, dance_bounce(t), 0.0));
            out.body = Some(Vec3::new(0.0, step_x * 0.5, -step_x * 0.3));
            out.left_arm = Some(Vec3::new(0.0, 0.0, 2.5 + (t * DANCE_BEAT).sin() * 0.6));
            out.right_arm = Some(Vec3::new(0.0, 0.0, -2.5 + (t * DANCE_BEAT).cos() * 0.6));
            out.head = Some(Vec3::new((t * DANCE_BEAT).sin().abs() * 0.15, 0.0, 0.0));
            let leg = (t * DANCE_BEAT).sin() * 0.4;
            out.left_leg = Some(Vec3::new(leg, 0.0, 0.0));
            out.right_leg = Some(Vec3::new(-leg, 0.0, 0.0));
        }
        Anim::Walk => {
            let tv = t * WALK_BEAT;
            out.root_pos = Some(base + Vec3::new(0.0, tv.sin().abs() * WALK_BOUNCE, 0.0));
            out.body = Some(Vec3::new(0.0, 0.0, (tv * 0.5).sin() * 0.03));
            out.left_leg = Some(Vec3::new(tv.sin() * 0.5, 0.0, 0.0));
            out.right_leg = Some(Vec3::new((tv + std::f32::consts::PI).sin() * 0.5, 0.0, 0.0));
            let tilt = if role.partner { 0.35 } else { -0.35 };
            out.head = Some(Vec3::new(0.1, 0.0, tilt));
            // The pair walk hand in hand: the inner arm reaches across, the
            // outer arm keeps swinging with the stride.
            let swing = (tv + std::f32::consts::PI).sin() * 0.3;
            if role.partner {
                out.left_arm = Some(Vec3::new(-0.3, 0.0, 0.6));
                out.right_arm = Some(Vec3::new(swing, 0.0, -0.2));
            } else {
                out.right_arm = Some(Vec3::new(-0.3, 0.0, -0.6));
                out.left_arm = Some(Vec3::new(swing, 0.0, 0.2));
            }
        }
        Anim::Meet => {
            out.root_pos = Some(base);
            let look = if role.partner { -0.5 } else { 0.5 };
            out.head = Some(Vec3::new(0.0, look, 0.0));
            out.body = Some(Vec3::new(0.0, look * 0.5, 0.0));
            out.left_arm = Some(Vec3::new(0.0, 0.0, 0.3));
            out.right_arm = Some(Vec3::new(0.0, 0.0, -0.3));
        }
        Anim::Sick if role.partner => {
            // Lying in the bed rather than standing beside it.
            out.root_rot = Some(Vec3::new(-1.6, 0.0, 0.0));
            out.root_pos = Some(base + Vec3::new(0.0, 0.3, 0.0));
        }
        Anim::Scare | Anim::Sick => {
            out.root_pos = Some(base);
            out.head = Some(Vec3::new(0.5, 0.0, 0.0));
            out.body = Some(Vec3::new(0.2, 0.0, 0.0));
            out.left_arm = Some(Vec3::new(-0.5, 0.5, 0.2));
            out.right_arm = Some(Vec3::new(-0.5, -0.5, -0.2));
        }
        Anim::Love => {
            out.root_pos = Some(base);
            let sway = (t * LOVE_SWAY_HZ).sin() * 0.1;
            out.body = Some(Vec3::new(0.0, 0.0, sway));
            let turn = if role.partner { -0.2 } else { 0.2 };
            out.head = Some(Vec3::new(-0.1, turn, sway * 0.5));
            if role.partner {
                out.left_arm = Some(Vec3::new(0.0, 0.0, 0.8));
                out.right_arm = Some(Vec3::new(0.0, 0.0, -0.2));
            } else {
                out.right_arm = Some(Vec3::new(0.0, 0.0, -0.8));
                out.left_arm = Some(Vec3::new(0.0, 0.0, 0.2));
            }
        }
        Anim::Party { focus } => {
            out.root_pos = Some(base);
            if role.partner {
                out.root_rot = Some(Vec3::new(0.0, -0.3, 0.0));
                out.head = Some(Vec3::new(0.1, 0.0, 0.0));
            } else {
                out.root_rot = Some(Vec3::new(0.0, facing_yaw(base, focus), 0.0));
                out.head = Some(Vec3::new(0.1, 0.0, 0.0));
                out.body = Some(Vec3::ZERO);
            }
            out.left_arm = Some(Vec3::new(0.0, 0.0, 0.2));
            out.right_arm = Some(Vec3::new(0.0, 0.0, -0.2));
        }
        Anim::Kneel => {
            if role.partner {
                out.root_pos = Some(base);
                out.root_rot = Some(Vec3::new(0.0, -1.2, 0.0));
                out.head = Some(Vec3::new(-0.2, -0.3, 0.0));
                out.left_arm = Some(Vec3::new(-1.5, 0.2, 0.0));
                out.right_arm = Some(Vec3::new(-1.5, -0.2, 0.0));
            } else {
                out.root_pos = Some(base + Vec3::new(0.0, -0.15, 0.0));
                out.root_rot = Some(Vec3::new(0.0, 1.2, 0.0));
                out.left_leg = Some(Vec3::new(1.5, 0.0, 0.0));
                out.right_leg = Some(Vec3::new(1.5, 0.0, 0.0));
                out.body = Some(Vec3::new(0.2, 0.0, 0.0));
                out.right_arm = Some(Vec3::new(-1.2, 0.0, 0.0));
            }
        }
        Anim::Sit => {
            out.root_pos = Some(base + Vec3::new(0.0, -0.2, 0.0));
            out.left_leg = Some(Vec3::new(-1.5, 0.2, 0.0));
            out.right_leg = Some(Vec3::new(-1.5, -0.2, 0.0));
            out.body = Some(Vec3::new(0.0, -0.2, 0.0));
            out.left_arm = Some(Vec3::new(-1.2, 0.0, 0.0));
            out.right_arm = Some(Vec3::new(-1.2, 0.0, 0.0));
            out.head = Some(Vec3::new(-0.2, 0.0, 0.0));
        }
        Anim::Idle => {}
    }
    out
}
