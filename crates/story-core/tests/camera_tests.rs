// Viewport classification, camera rig smoothing, ambient theming.

use glam::Vec3;
use story_core::{
    hex_color, Camera, CameraRig, ThemeBlender, ViewportClass, STORY_CHAPTERS,
};

#[test]
fn viewport_classification_matches_screen_shapes() {
    // Phone held upright: aspect 0.5
    assert_eq!(ViewportClass::classify(400.0, 800.0), ViewportClass::Portrait);
    // Wide desktop window: aspect 2.0, width past the mobile boundary
    assert_eq!(ViewportClass::classify(1000.0, 500.0), ViewportClass::Desktop);
    // Small landscape phone: aspect 1.5 but narrow
    assert_eq!(
        ViewportClass::classify(600.0, 400.0),
        ViewportClass::MobileLandscape
    );
}

#[test]
fn viewport_offsets_pull_back_and_raise_as_screens_narrow() {
    let portrait = ViewportClass::Portrait.offsets();
    let mobile = ViewportClass::MobileLandscape.offsets();
    let desktop = ViewportClass::Desktop.offsets();

    assert_eq!((portrait.z_add, portrait.y_add, portrait.look_y), (7.5, 1.2, 2.0));
    assert_eq!((mobile.z_add, mobile.y_add, mobile.look_y), (2.5, 0.5, 1.0));
    assert_eq!((desktop.z_add, desktop.y_add, desktop.look_y), (0.0, 0.0, 0.8));

    assert!(portrait.z_add > mobile.z_add && mobile.z_add > desktop.z_add);
}

#[test]
fn look_target_sits_on_the_vertical_axis() {
    for class in [
        ViewportClass::Portrait,
        ViewportClass::MobileLandscape,
        ViewportClass::Desktop,
    ] {
        let look = class.look_target();
        assert_eq!(look.x, 0.0);
        assert_eq!(look.z, 0.0);
        assert_eq!(look.y, class.offsets().look_y);
    }
}

#[test]
fn rig_approaches_the_adjusted_target_without_overshoot() {
    let nominal = Vec3::new(0.0, 1.5, 8.0);
    let mut rig = CameraRig::new(Vec3::ZERO);
    let adjusted = Vec3::new(0.0, 1.5 + 1.2, 8.0 + 7.5); // portrait offsets

    let mut prev = (adjusted - rig.position).length();
    for _ in 0..600 {
        rig.step(nominal, ViewportClass::Portrait, 1.0 / 60.0);
        let dist = (adjusted - rig.position).length();
        assert!(dist <= prev + 1e-6, "camera moved away from its target");
        prev = dist;
    }
    assert!(prev < 1e-2, "camera failed to settle: {prev}");
}

#[test]
fn rig_survives_long_frames() {
    // A frame longer than the blend rate's reciprocal must clamp, not
    // overshoot past the target.
    let mut rig = CameraRig::new(Vec3::ZERO);
    rig.step(Vec3::new(0.0, 0.0, 10.0), ViewportClass::Desktop, 5.0);
    assert!(rig.position.z <= 10.0 + 1e-6);
}

#[test]
fn camera_matrices_are_finite() {
    let cam = Camera::new(Vec3::new(0.0, 1.5, 8.0), Vec3::new(0.0, 0.8, 0.0), 16.0 / 9.0);
    for col in cam.view_proj() {
        for v in col {
            assert!(v.is_finite());
        }
    }
}

#[test]
fn hex_colors_parse_to_unit_range() {
    assert_eq!(hex_color("#ffffff"), [1.0, 1.0, 1.0]);
    assert_eq!(hex_color("#000000"), [0.0, 0.0, 0.0]);
    let gold = hex_color("#ffb703");
    assert!((gold[0] - 1.0).abs() < 1e-6);
    assert!((gold[1] - 183.0 / 255.0).abs() < 1e-6);
    assert!((gold[2] - 3.0 / 255.0).abs() < 1e-6);
    // Permissive on junk: black, not a crash.
    assert_eq!(hex_color("oops"), [0.0, 0.0, 0.0]);
    assert_eq!(hex_color("#zzzzzz"), [0.0, 0.0, 0.0]);
}

#[test]
fn every_chapter_theme_parses() {
    for ch in &STORY_CHAPTERS {
        let rgb = hex_color(ch.color_theme);
        for c in rgb {
            assert!((0.0..=1.0).contains(&c), "bad theme on chapter {}", ch.id);
        }
    }
}

#[test]
fn theme_blender_chases_the_active_theme() {
    let mut blender = ThemeBlender::new(hex_color("#050505"));
    let target = hex_color("#fb6f92");
    let mut prev = f32::MAX;
    for _ in 0..600 {
        blender.step(target, 1.0 / 60.0);
        let dist = (blender.color - Vec3::from(target)).length();
        assert!(dist <= prev + 1e-6);
        prev = dist;
    }
    assert!(prev < 1e-3, "theme failed to settle: {prev}");
}
