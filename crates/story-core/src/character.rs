//! Character assembly.
//!
//! A character is a small fixed skeleton (body, head, two arms, two legs)
//! rendered as chains and clusters of sphere billboards. The smoothed
//! [`PoseState`] owns all motion; this module only turns joint angles into
//! world-space instances, keeping the animation math testable without a
//! graphics context.

use glam::{EulerRot, Quat, Vec3};

use crate::pose::{Anim, CharacterRole, PoseState};
use crate::render_list::Instance;

const SKIN: [f32; 3] = [1.0, 0.91, 0.84];
const DARK: [f32; 3] = [0.13, 0.13, 0.13];
const GOLD: [f32; 3] = [1.0, 0.84, 0.0];
const RUBY: [f32; 3] = [1.0, 0.0, 0.4];
const BLUSH: [f32; 3] = [1.0, 0.67, 0.67];
const ELDER_HAIR: [f32; 3] = [0.6, 0.6, 0.6];
const HER_HAIR: [f32; 3] = [0.37, 0.26, 0.16];
const GIRL_HAIR: [f32; 3] = [0.85, 0.55, 0.60];

// Local pivots, relative to the character origin at the feet.
const BODY_PIVOT: Vec3 = Vec3::new(0.0, 0.55, 0.0);
const HEAD_PIVOT: Vec3 = Vec3::new(0.0, 1.10, 0.0);
const ARM_Y: f32 = 0.85;
const ARM_X: f32 = 0.22;
const LEG_X: f32 = 0.1;
const LEG_Y: f32 = -0.1;

/// Authoring-time description of one scene character.
#[derive(Clone, Copy, Debug)]
pub struct CharacterDef {
    pub position: Vec3,
    pub color: [f32; 3],
    pub anim: Anim,
    pub role: CharacterRole,
}

/// A mounted character: definition plus its smoothed joint state. The state
/// is created when the scene mounts and dropped when the chapter changes.
#[derive(Clone, Debug)]
pub struct Character {
    pub def: CharacterDef,
    pub pose: PoseState,
}

impl Character {
    pub fn new(def: CharacterDef) -> Self {
        Self {
            def,
            pose: PoseState::at(def.position),
        }
    }

    pub fn animate(&mut self, t: f32) {
        self.pose
            .animate(self.def.anim, t, self.def.position, self.def.role);
    }

    fn hair_color(&self) -> [f32; 3] {
        let role = self.def.role;
        if role.elder {
            ELDER_HAIR
        } else if role.feminine() {
            if role.partner {
                HER_HAIR
            } else {
                GIRL_HAIR
            }
        } else {
            DARK
        }
    }

    /// Emit the billboard chain for the current joint state.
    pub fn emit(&self, out: &mut Vec<Instance>) {
        let p = &self.pose;
        let root = Quat::from_euler(EulerRot::XYZ, p.root_rot.x, p.root_rot.y, p.root_rot.z);
        let base = p.root_pos;
        let place = |local: Vec3| base + root * local;

        let body_q = Quat::from_euler(EulerRot::XYZ, p.body.x, p.body.y, p.body.z);
        let in_body = |local: Vec3| place(BODY_PIVOT + body_q * local);

        // Torso: a cone-ish stack for dresses, a cylinder-ish stack otherwise.
        let c = self.def.color;
        if self.def.role.feminine() {
            out.push(Instance::new(in_body(Vec3::new(0.0, -0.05, 0.0)), 0.50, c));
            out.push(Instance::new(in_body(Vec3::new(0.0, 0.10, 0.0)), 0.40, c));
            out.push(Instance::new(in_body(Vec3::new(0.0, 0.25, 0.0)), 0.28, c));
        } else {
            out.push(Instance::new(in_body(Vec3::new(0.0, 0.0, 0.0)), 0.42, c));
            out.push(Instance::new(in_body(Vec3::new(0.0, 0.14, 0.0)), 0.42, c));
            out.push(Instance::new(in_body(Vec3::new(0.0, 0.28, 0.0)), 0.38, c));
        }

        // Legs hang from the torso, so they inherit the body rotation.
        for (side, rot) in [(-1.0, p.left_leg), (1.0, p.right_leg)] {
            let leg_q = Quat::from_euler(EulerRot::XYZ, rot.x, rot.y, rot.z);
            let pivot = Vec3::new(side * LEG_X, LEG_Y, 0.0);
            for i in 0..3 {
                let seg = leg_q * Vec3::new(0.0, -0.06 - 0.1 * i as f32, 0.0);
                out.push(Instance::new(in_body(pivot + seg), 0.13, DARK));
            }
        }

        // Head group is a sibling of the torso, not a child.
        let head_q = Quat::from_euler(EulerRot::XYZ, p.head.x, p.head.y, p.head.z);
        let in_head = |local: Vec3| place(HEAD_PIVOT + head_q * local);
        out.push(Instance::new(in_head(Vec3::ZERO), 0.56, SKIN));

        let hair = self.hair_color();
        if self.def.role.feminine() {
            out.push(Instance::new(in_head(Vec3::new(0.0, 0.05, -0.05)), 0.60, hair));
            out.push(Instance::new(in_head(Vec3::new(0.0, -0.20, -0.20)), 0.50, hair));
            if self.def.role.partner {
                // Crown: band, center spike, ruby.
                out.push(Instance::new(in_head(Vec3::new(0.0, 0.33, 0.0)), 0.22, GOLD));
                out.push(
                    Instance::new(in_head(Vec3::new(0.0, 0.42, 0.08)), 0.10, GOLD).with_glow(0.3),
                );
                out.push(
                    Instance::new(in_head(Vec3::new(0.0, 0.47, 0.10)), 0.07, RUBY).with_glow(0.8),
                );
            }
        } else {
            out.push(Instance::new(in_head(Vec3::new(0.0, 0.10, -0.02)), 0.60, hair));
            out.push(Instance::new(in_head(Vec3::new(0.0, 0.30, 0.0)), 0.26, hair));
        }

        // Face details sit on the +Z side of the head.
        for side in [-1.0, 1.0] {
            out.push(Instance::new(
                in_head(Vec3::new(side * 0.08, 0.02, 0.24)),
                0.07,
                DARK,
            ));
            out.push(
                Instance::new(in_head(Vec3::new(side * 0.12, -0.05, 0.23)), 0.08, BLUSH)
                    .with_alpha(0.5),
            );
        }

        // Arms pivot at the shoulders, siblings of the torso group.
        for (side, rot) in [(-1.0, p.left_arm), (1.0, p.right_arm)] {
            let arm_q = Quat::from_euler(EulerRot::XYZ, rot.x, rot.y, rot.z);
            let pivot = Vec3::new(side * ARM_X, ARM_Y, 0.0);
            for i in 0..3 {
                let seg = arm_q * Vec3::new(0.0, -0.07 - 0.09 * i as f32, 0.0);
                out.push(Instance::new(place(pivot + seg), 0.13, c));
            }
        }
    }
}
