// Shared tuning constants for the storybook simulation.

// Joint smoothing: fraction of the remaining distance closed per rendered
// frame. Deliberately a per-frame constant rather than a time-normalized
// rate; all joints share it so no channel overshoots.
pub const POSE_BLEND: f32 = 0.1;

// Pose frequency constants (radians per second multipliers on elapsed time)
pub const DANCE_BEAT: f32 = 8.0;
pub const WALK_BEAT: f32 = 8.0;
pub const LOVE_SWAY_HZ: f32 = 1.5;

// Dance / walk amplitudes
pub const DANCE_STEP_X: f32 = 0.25;
pub const DANCE_BOUNCE: f32 = 0.08;
pub const WALK_BOUNCE: f32 = 0.03;

// Camera position smoothing rate (per second, scaled by dt each frame)
pub const CAMERA_LERP_RATE: f32 = 1.5;
// Background and fog color smoothing rate (per second)
pub const THEME_LERP_RATE: f32 = 2.0;

// Perspective projection
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4; // 45 degrees
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Viewport classification boundary (CSS pixels)
pub const MOBILE_WIDTH_PX: f32 = 768.0;

// Scroll damping time constant (seconds)
pub const SCROLL_DAMPING_SEC: f32 = 0.4;

// Overlay text fade: band width at each edge of a chapter's occupancy
// window, and the tail length (in chapters) over which text is held visible
// at the very end of the scroll
pub const OVERLAY_FADE_BAND: f32 = 0.2;
pub const OVERLAY_FINAL_HOLD: f32 = 0.5;

// Exponential-squared fog density
pub const FOG_DENSITY: f32 = 0.03;

// Crowd authoring for the dance chapter
pub const CROWD_CANDIDATES: usize = 30;
pub const CROWD_SEED: u64 = 42;
// Keep-clear rules so the seated main character stays visible
pub const CROWD_CLEAR_CENTER: [f32; 2] = [1.5, 2.5];
pub const CROWD_CLEAR_RADIUS: f32 = 1.8;

// Upper bound on billboard instances in one composed frame; sized to the
// renderers' fixed instance buffers
pub const MAX_INSTANCES: usize = 2048;
