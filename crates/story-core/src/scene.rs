//! Per-chapter scene authoring.
//!
//! Exactly one chapter's scene is mounted at a time. `Scene::for_chapter`
//! is an exhaustive match over the closed chapter set; each arm hand-places
//! that chapter's environment, props, characters and particle fields.
//! Mounting builds fresh pose state, so characters always blend in from
//! their rest pose.

use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::chapters::CHAPTER_COUNT;
use crate::character::{Character, CharacterDef};
use crate::constants::{CROWD_CANDIDATES, CROWD_CLEAR_CENTER, CROWD_CLEAR_RADIUS, CROWD_SEED};
use crate::particles::ParticleField;
use crate::pose::{Anim, CharacterRole};
use crate::props::{CrowdMember, Prop};
use crate::render_list::Instance;
use crate::theme::hex_color;

const HIM: &str = "#48cae4";
const HER: &str = "#f72585";

#[derive(Clone, Debug)]
pub struct Scene {
    pub chapter: usize,
    pub characters: SmallVec<[Character; 6]>,
    pub props: Vec<Prop>,
    pub crowd: Vec<CrowdMember>,
    pub particles: Vec<ParticleField>,
}

impl Scene {
    /// Build the authored scene for a chapter index. Indices past the end
    /// clamp to the final chapter, so the mapper can never mount nothing.
    pub fn for_chapter(index: usize) -> Scene {
        let index = index.min(CHAPTER_COUNT - 1);
        log::debug!("[scene] mount chapter {index}");

        let mut scene = Scene {
            chapter: index,
            characters: SmallVec::new(),
            props: Vec::new(),
            crowd: Vec::new(),
            particles: Vec::new(),
        };

        // Sakura petals drift through every chapter.
        scene.particles.push(ParticleField::new(
            200,
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(20.0, 10.0, 20.0),
            hex_color("#ffc8dd"),
            0.4,
            0.4,
            0.7,
            7,
        ));

        match index {
            // The first meeting, at night in the park.
            0 => {
                outdoor_park(&mut scene);
                scene.particles.push(star_field(250, 11));
                scene.spawn(Vec3::new(-0.8, 0.0, 0.0), HIM, Anim::Meet, CharacterRole::LEAD);
                scene.spawn(Vec3::new(0.8, 0.0, 0.0), HER, Anim::Meet, CharacterRole::PARTNER);
                scene.particles.push(ParticleField::new(
                    100,
                    Vec3::new(0.0, 2.0, 0.0),
                    Vec3::new(10.0, 6.0, 10.0),
                    [1.0, 1.0, 1.0],
                    0.25,
                    0.6,
                    0.5,
                    13,
                ));
            }
            // The college event: him on stage, her in the audience.
            1 => {
                indoor_room(&mut scene, hex_color("#240046"));
                scene.props.push(Prop::Stage {
                    position: Vec3::new(0.0, 0.0, -3.0),
                });
                scene.props.push(Prop::Speaker {
                    position: Vec3::new(-3.5, 1.5, -4.0),
                });
                scene.props.push(Prop::Speaker {
                    position: Vec3::new(3.5, 1.5, -4.0),
                });
                scene.spawn(
                    Vec3::new(0.0, 1.1, -3.0),
                    "#4cc9f0",
                    Anim::Dance,
                    CharacterRole::LEAD,
                );
                scene.spawn(
                    Vec3::new(1.5, 0.2, 2.5),
                    HER,
                    Anim::Sit,
                    CharacterRole::PARTNER,
                );
                scene.crowd = CrowdMember::scatter(
                    CROWD_CANDIDATES,
                    CROWD_SEED,
                    CROWD_CLEAR_CENTER,
                    CROWD_CLEAR_RADIUS,
                );
                // Spotlight washes over the dancer and over her seat.
                scene.props.push(Prop::Backdrop {
                    position: Vec3::new(0.0, 3.0, -3.0),
                    size: 4.0,
                    color: [0.0, 1.0, 1.0],
                    alpha: 0.10,
                });
                scene.props.push(Prop::Backdrop {
                    position: Vec3::new(1.5, 2.5, 2.5),
                    size: 3.0,
                    color: hex_color(HER),
                    alpha: 0.10,
                });
            }
            // Walking the campus avenue, hand in hand.
            2 => {
                campus(&mut scene);
                scene.spawn(
                    Vec3::new(-0.35, 0.0, 1.0),
                    HIM,
                    Anim::Walk,
                    CharacterRole::LEAD,
                );
                scene.spawn(
                    Vec3::new(0.35, 0.0, 1.0),
                    HER,
                    Anim::Walk,
                    CharacterRole::PARTNER,
                );
                scene.props.push(Prop::Cloud {
                    position: Vec3::new(0.0, 6.0, -5.0),
                    opacity: 0.4,
                    scale: 0.8,
                    drift: 0.2,
                });
                scene.props.push(Prop::Cloud {
                    position: Vec3::new(3.0, 5.0, -8.0),
                    opacity: 0.3,
                    scale: 0.6,
                    drift: 0.15,
                });
            }
            // The hospital room.
            3 => {
                indoor_room(&mut scene, hex_color("#caf0f8"));
                scene.props.push(Prop::Bed {
                    position: Vec3::ZERO,
                });
                scene.spawn(
                    Vec3::new(0.0, 0.3, 0.0),
                    HER,
                    Anim::Sick,
                    CharacterRole::PARTNER,
                );
                scene.spawn(
                    Vec3::new(-1.2, 0.0, 0.5),
                    HIM,
                    Anim::Scare,
                    CharacterRole::LEAD,
                );
                scene.spawn(
                    Vec3::new(1.2, 0.0, 0.5),
                    "#d88c9a",
                    Anim::Scare,
                    CharacterRole::elder(true),
                );
                scene.spawn(
                    Vec3::new(1.8, 0.0, 0.8),
                    "#6c757d",
                    Anim::Scare,
                    CharacterRole::elder(false),
                );
            }
            // The realization, under a giant heart.
            4 => {
                outdoor_park(&mut scene);
                scene.props.push(Prop::FloatingHeart {
                    position: Vec3::new(0.0, 3.5, -2.0),
                    scale: 2.0,
                    delay: 0.0,
                });
                scene.spawn(Vec3::new(-0.5, 0.0, 0.0), HIM, Anim::Love, CharacterRole::LEAD);
                scene.spawn(Vec3::new(0.5, 0.0, 0.0), HER, Anim::Love, CharacterRole::PARTNER);
                scene.particles.push(ParticleField::new(
                    150,
                    Vec3::new(0.0, 2.0, 0.0),
                    Vec3::new(8.0, 8.0, 8.0),
                    hex_color("#ff0055"),
                    0.4,
                    0.5,
                    0.7,
                    17,
                ));
            }
            // The proposal, on one knee under the lamp light.
            5 => {
                outdoor_park(&mut scene);
                scene.props.push(Prop::LampPost {
                    position: Vec3::new(-2.0, 0.0, 0.0),
                });
                scene.props.push(Prop::Ring {
                    position: Vec3::new(0.0, 1.2, 0.0),
                });
                scene.spawn(
                    Vec3::new(-0.8, 0.0, 0.0),
                    HIM,
                    Anim::Kneel,
                    CharacterRole::LEAD,
                );
                scene.spawn(
                    Vec3::new(0.8, 0.0, 0.0),
                    HER,
                    Anim::Kneel,
                    CharacterRole::PARTNER,
                );
                scene.particles.push(star_field(200, 19));
            }
            // The birthday party; everyone turns toward her.
            _ => {
                let focus = Vec3::new(0.6, 0.0, 0.0);
                indoor_room(&mut scene, hex_color("#3a0ca3"));
                scene.props.push(Prop::Cake {
                    position: Vec3::new(0.0, 0.0, 1.0),
                });
                scene.spawn(
                    Vec3::new(-0.6, 0.0, 0.0),
                    HIM,
                    Anim::Party { focus },
                    CharacterRole::LEAD,
                );
                scene.spawn(
                    focus,
                    HER,
                    Anim::Party { focus },
                    CharacterRole::PARTNER,
                );
                // His parents on the left, hers on the right.
                scene.spawn(
                    Vec3::new(-2.2, 0.0, -0.5),
                    "#6c757d",
                    Anim::Party { focus },
                    CharacterRole::elder(false),
                );
                scene.spawn(
                    Vec3::new(-3.0, 0.0, 0.0),
                    "#d88c9a",
                    Anim::Party { focus },
                    CharacterRole::elder(true),
                );
                scene.spawn(
                    Vec3::new(2.2, 0.0, -0.5),
                    "#e76f51",
                    Anim::Party { focus },
                    CharacterRole::elder(true),
                );
                scene.spawn(
                    Vec3::new(3.0, 0.0, 0.0),
                    "#264653",
                    Anim::Party { focus },
                    CharacterRole::elder(false),
                );
                for (pos, color) in [
                    (Vec3::new(-3.0, 3.0, -2.0), [0.0, 1.0, 1.0]),
                    (Vec3::new(3.0, 3.5, -2.0), [1.0, 0.41, 0.71]),
                    (Vec3::new(-1.5, 4.0, -3.0), [1.0, 0.84, 0.0]),
                    (Vec3::new(1.5, 4.2, -3.0), [0.5, 0.0, 0.5]),
                ] {
                    scene.props.push(Prop::Balloon {
                        position: pos,
                        color,
                        speed: 1.0,
                    });
                }
                scene.props.push(Prop::Cloud {
                    position: Vec3::new(0.0, 5.0, -5.0),
                    opacity: 0.6,
                    scale: 0.8,
                    drift: 0.3,
                });
                scene.particles.push(ParticleField::new(
                    300,
                    Vec3::new(0.0, 3.0, 0.0),
                    Vec3::new(12.0, 8.0, 8.0),
                    hex_color("#ff006e"),
                    0.5,
                    0.8,
                    0.8,
                    23,
                ));
                scene.particles.push(ParticleField::new(
                    200,
                    Vec3::new(0.0, 4.0, 0.0),
                    Vec3::new(10.0, 6.0, 6.0),
                    [1.0, 0.84, 0.0],
                    0.3,
                    2.0,
                    0.8,
                    29,
                ));
            }
        }

        scene
    }

    fn spawn(&mut self, position: Vec3, color: &str, anim: Anim, role: CharacterRole) {
        self.characters.push(Character::new(CharacterDef {
            position,
            color: hex_color(color),
            anim,
            role,
        }));
    }

    /// Advance every mounted character's pose one frame.
    pub fn animate(&mut self, t: f32) {
        for ch in &mut self.characters {
            ch.animate(t);
        }
    }

    /// Compose the frame's draw list: environment, props, crowd, particles
    /// and characters. Ordering within the list is irrelevant; the caller
    /// depth-sorts before upload.
    pub fn emit(&self, t: f32, out: &mut Vec<Instance>) {
        for prop in &self.props {
            prop.emit(t, out);
        }
        for member in &self.crowd {
            member.emit(t, out);
        }
        for field in &self.particles {
            field.emit(t, out);
        }
        for ch in &self.characters {
            ch.emit(out);
        }
    }
}

fn star_field(count: usize, seed: u64) -> ParticleField {
    ParticleField::new(
        count,
        Vec3::new(0.0, 12.0, -30.0),
        Vec3::new(80.0, 40.0, 30.0),
        [1.0, 1.0, 1.0],
        0.25,
        0.1,
        0.8,
        seed,
    )
}

/// Night park: grass, moon and halo, rolling hills on the horizon, sakura
/// trees framing the scene, fireflies.
fn outdoor_park(scene: &mut Scene) {
    scene.props.push(Prop::Backdrop {
        position: Vec3::new(0.0, -26.0, -18.0),
        size: 60.0,
        color: hex_color("#143621"),
        alpha: 1.0,
    });
    scene.props.push(Prop::Moon {
        position: Vec3::new(6.0, 12.0, -35.0),
    });
    scene.props.push(Prop::Hill {
        position: Vec3::new(-25.0, -15.0, -40.0),
        radius: 35.0,
        color: hex_color("#051f12"),
    });
    scene.props.push(Prop::Hill {
        position: Vec3::new(25.0, -18.0, -45.0),
        radius: 40.0,
        color: hex_color("#02140b"),
    });
    scene.props.push(Prop::Hill {
        position: Vec3::new(0.0, -22.0, -50.0),
        radius: 45.0,
        color: hex_color("#010f08"),
    });
    for (pos, s) in [
        (Vec3::new(-5.0, 0.0, -8.0), 1.5),
        (Vec3::new(6.0, 0.0, -9.0), 1.8),
        (Vec3::new(-8.0, 0.0, -12.0), 2.5),
        (Vec3::new(9.0, 0.0, -13.0), 2.2),
    ] {
        scene.props.push(Prop::SakuraTree { position: pos, scale: s });
    }
    scene.particles.push(ParticleField::new(
        150,
        Vec3::new(0.0, 5.0, -5.0),
        Vec3::new(30.0, 15.0, 20.0),
        hex_color("#ffffba"),
        0.45,
        0.4,
        0.6,
        3,
    ));
}

/// Interior: wooden floor wash plus a colored back wall.
fn indoor_room(scene: &mut Scene, wall: [f32; 3]) {
    scene.props.push(Prop::Backdrop {
        position: Vec3::new(0.0, -25.0, -14.0),
        size: 56.0,
        color: hex_color("#3d2b1f"),
        alpha: 1.0,
    });
    scene.props.push(Prop::Backdrop {
        position: Vec3::new(0.0, 5.0, -10.0),
        size: 34.0,
        color: wall,
        alpha: 1.0,
    });
}

/// Tree-lined campus avenue with a brick path, lamp posts and bushes.
fn campus(scene: &mut Scene) {
    scene.props.push(Prop::Backdrop {
        position: Vec3::new(0.0, -26.0, -18.0),
        size: 62.0,
        color: hex_color("#2d4a3e"),
        alpha: 1.0,
    });
    scene.props.push(Prop::Backdrop {
        position: Vec3::new(0.0, -24.5, -16.0),
        size: 50.0,
        color: hex_color("#8a3324"),
        alpha: 1.0,
    });
    let mut rng = StdRng::seed_from_u64(5);
    for i in 0..5 {
        let z = -12.0 + i as f32 * 8.0;
        scene.props.push(Prop::Tree {
            position: Vec3::new(-5.0, 0.0, z),
            scale: 1.5 + rng.gen::<f32>() * 0.5,
        });
        scene.props.push(Prop::Tree {
            position: Vec3::new(5.0, 0.0, z),
            scale: 1.5 + rng.gen::<f32>() * 0.5,
        });
        scene.props.push(Prop::LampPost {
            position: Vec3::new(-3.5, 0.0, z + 4.0),
        });
        scene.props.push(Prop::LampPost {
            position: Vec3::new(3.5, 0.0, z + 4.0),
        });
    }
    for i in 0..8 {
        let x = if i % 2 == 0 { -10.0 } else { 10.0 };
        scene.props.push(Prop::Hill {
            position: Vec3::new(x, 0.5, -10.0 + i as f32 * 5.0),
            radius: 0.8,
            color: hex_color("#1a4d2e"),
        });
    }
}
