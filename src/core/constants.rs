// World geometry (canvas units)
pub const CANVAS_WIDTH: f64 = 1280.0;
pub const CANVAS_HEIGHT: f64 = 480.0;
pub const GROUND_HEIGHT: f64 = 60.0;

// Bird
pub const BIRD_X: f64 = 200.0;
pub const BIRD_SIZE: f64 = 40.0;
pub const HIT_INSET: f64 = 5.0;

// Physics (per nominal frame)
pub const GRAVITY: f64 = 0.5;
pub const JUMP_VELOCITY: f64 = -9.0;

// Pipes
pub const PIPE_SPEED: f64 = 3.0;
pub const PIPE_WIDTH: f64 = 80.0;
pub const PIPE_SPACING: f64 = 320.0;
pub const PRUNE_MARGIN: f64 = 10.0;

// Gap sizing per epoch
pub const GAP_EPOCH_ONE: f64 = 200.0;
pub const GAP_EPOCH_TWO: f64 = 150.0;
pub const GAP_MARGIN: f64 = 50.0;

// Difficulty ramp: fraction of base speed added per point, epoch-two bias, hard cap
pub const SPEED_RAMP_PER_POINT: f64 = 0.005;
pub const EPOCH_TWO_SPEED_BIAS: f64 = 0.25;
pub const MAX_PIPE_SPEED: f64 = 3.9;

// Match structure
pub const TOTAL_PIPES: u32 = 50;
pub const EPOCH_CHANGE_SCORE: u32 = 30;

// Frame timing
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_STEPS: f64 = 3.0;

// Timed screens
pub const COUNTDOWN_MS: f64 = 3000.0;
pub const MID_CUTSCENE_TEXT_MS: f64 = 3000.0;
pub const TYPEWRITER_CHARS_PER_SEC: f64 = 40.0;

// Cinematic clip lengths used by the scripted player
pub const INTRO_CLIP_MS: f64 = 6000.0;
pub const MID_CLIP_MS: f64 = 5000.0;
pub const FINALE_CLIP_MS: f64 = 7000.0;

// Volumes (0.0..=1.0)
pub const CINEMATIC_VOLUME: f32 = 0.8;
pub const MUSIC_VOLUME: f32 = 0.35;

// Debug autopilot proportional gain (velocity per unit of error)
pub const AUTOPILOT_GAIN: f64 = 0.15;

// Mute button: circle in the top-left corner, click tolerance added to radius
pub const MUTE_BUTTON_X: f64 = 10.0;
pub const MUTE_BUTTON_Y: f64 = 10.0;
pub const MUTE_BUTTON_RADIUS: f64 = 20.0;
pub const MUTE_BUTTON_TOLERANCE: f64 = 6.0;

// Death spin (degrees per nominal frame) and resting tilt
pub const DEATH_SPIN_RATE: f64 = 8.0;
pub const MAX_TILT_DEG: f64 = 90.0;
