// Scene authoring: one scene per chapter, the authored cast, the composed
// draw list.

use glam::Vec3;
use story_core::{
    sort_back_to_front, Anim, Scene, CHAPTER_COUNT, CROWD_CLEAR_CENTER, CROWD_CLEAR_RADIUS,
    MAX_INSTANCES, STORY_CHAPTERS,
};

#[test]
fn every_chapter_mounts_a_scene() {
    for i in 0..CHAPTER_COUNT {
        let scene = Scene::for_chapter(i);
        assert_eq!(scene.chapter, i);
        assert!(
            !scene.characters.is_empty(),
            "chapter {i} should have characters"
        );
        assert!(!scene.particles.is_empty(), "chapter {i} lost its petals");
    }
}

#[test]
fn out_of_range_indices_clamp_to_the_finale() {
    assert_eq!(Scene::for_chapter(99).chapter, CHAPTER_COUNT - 1);
}

#[test]
fn cast_sizes_match_the_authored_story() {
    let expected = [2, 2, 2, 4, 2, 2, 6];
    for (i, want) in expected.iter().enumerate() {
        let scene = Scene::for_chapter(i);
        assert_eq!(
            scene.characters.len(),
            *want,
            "chapter {i} cast size mismatch"
        );
    }
}

#[test]
fn exactly_one_partner_per_scene() {
    for i in 0..CHAPTER_COUNT {
        let scene = Scene::for_chapter(i);
        let partners = scene
            .characters
            .iter()
            .filter(|c| c.def.role.partner)
            .count();
        assert_eq!(partners, 1, "chapter {i} should star exactly one partner");
    }
}

#[test]
fn party_guests_share_the_partner_as_focus() {
    let scene = Scene::for_chapter(6);
    let her = scene
        .characters
        .iter()
        .find(|c| c.def.role.partner)
        .expect("the birthday girl is present");

    for ch in &scene.characters {
        match ch.def.anim {
            Anim::Party { focus } => {
                assert_eq!(
                    focus, her.def.position,
                    "party focus must be the partner's authored position"
                );
            }
            other => panic!("unexpected animation {other:?} at the party"),
        }
    }
}

#[test]
fn only_the_dance_chapter_has_a_crowd() {
    for i in 0..CHAPTER_COUNT {
        let scene = Scene::for_chapter(i);
        if i == 1 {
            assert!(!scene.crowd.is_empty(), "the dance needs an audience");
        } else {
            assert!(scene.crowd.is_empty(), "stray crowd in chapter {i}");
        }
    }
}

#[test]
fn crowd_respects_the_keep_clear_zone() {
    let scene = Scene::for_chapter(1);
    for m in &scene.crowd {
        let dx = m.x - CROWD_CLEAR_CENTER[0];
        let dz = m.z - CROWD_CLEAR_CENTER[1];
        assert!(
            (dx * dx + dz * dz).sqrt() >= CROWD_CLEAR_RADIUS,
            "crowd member at ({}, {}) blocks the view of her seat",
            m.x,
            m.z
        );
        assert!(
            !(m.x > 0.5 && m.x < 2.5 && m.z > 2.5),
            "crowd member at ({}, {}) stands in the sight line",
            m.x,
            m.z
        );
    }
}

#[test]
fn crowd_scatter_is_deterministic() {
    let a = Scene::for_chapter(1);
    let b = Scene::for_chapter(1);
    assert_eq!(a.crowd.len(), b.crowd.len());
    for (x, y) in a.crowd.iter().zip(b.crowd.iter()) {
        assert_eq!(x.x, y.x);
        assert_eq!(x.z, y.z);
    }
}

#[test]
fn composed_frames_stay_inside_the_instance_budget() {
    for i in 0..CHAPTER_COUNT {
        let mut scene = Scene::for_chapter(i);
        for frame in 0..5 {
            let t = frame as f32 * 0.4;
            scene.animate(t);
            let mut out = Vec::new();
            scene.emit(t, &mut out);
            assert!(!out.is_empty(), "chapter {i} composed an empty frame");
            assert!(
                out.len() <= MAX_INSTANCES,
                "chapter {i} emits {} instances, over budget",
                out.len()
            );
            for inst in &out {
                assert!(inst.pos.iter().all(|v| v.is_finite()));
                assert!(inst.scale.is_finite() && inst.scale > 0.0);
            }
        }
    }
}

#[test]
fn characters_mount_at_their_authored_positions() {
    for i in 0..CHAPTER_COUNT {
        let scene = Scene::for_chapter(i);
        for ch in &scene.characters {
            assert_eq!(
                ch.pose.root_pos, ch.def.position,
                "fresh pose state must start at the authored position"
            );
        }
    }
}

#[test]
fn depth_sort_orders_far_to_near() {
    let mut scene = Scene::for_chapter(0);
    scene.animate(0.5);
    let mut out = Vec::new();
    scene.emit(0.5, &mut out);

    let eye = STORY_CHAPTERS[0].camera_vec3();
    let target = Vec3::new(0.0, 0.8, 0.0);
    sort_back_to_front(&mut out, eye, target);

    // Far instances have the largest depth along the forward axis and must
    // come first.
    let forward = (target - eye).normalize();
    let mut prev = f32::INFINITY;
    for inst in &out {
        let depth = (Vec3::from(inst.pos) - eye).dot(forward);
        assert!(depth <= prev + 1e-4, "draw list not back-to-front");
        prev = depth;
    }
}
