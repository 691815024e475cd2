//! Engine tuning constants.
//!
//! These constants express intended behavior (rates, time constants, clamp
//! limits) and keep magic numbers out of the code. Audio-band mappings that
//! are part of a brush's identity stay inline in the brush modules.

// Energy composite (applied at the audio-source boundary)
pub const ENERGY_LOW_WEIGHT: f32 = 0.55;
pub const ENERGY_MID_WEIGHT: f32 = 1.0;
pub const ENERGY_HIGH_WEIGHT: f32 = 0.35;
pub const ENERGY_EMA_KEEP: f32 = 0.85; // new = keep*old + (1-keep)*raw

// Brush weight / crossfade smoothing
pub const WEIGHT_SMOOTH_RATE: f32 = 4.0; // per second, alpha = 1 - exp(-dt*rate)
pub const SPAWN_RATE_SMOOTH_RATE: f32 = 6.0;
pub const FADE_OUT_THRESHOLD: f32 = 0.03; // weight and target both below -> faded out
pub const EMISSION_SKIP_WEIGHT: f32 = 0.02;

// Stroke pools
pub const DEFAULT_MAX_STROKES: usize = 240;

// Spawn rates (events per second, lerped over the driving band)
pub const INK_RATE_MIN: f32 = 5.0;
pub const INK_RATE_MAX: f32 = 16.0;
pub const BUBBLE_RATE_MIN: f32 = 2.5;
pub const BUBBLE_RATE_MAX: f32 = 7.5;
pub const GLOW_RATE_MIN: f32 = 3.5;
pub const GLOW_RATE_MAX: f32 = 11.0;
pub const TUBE_RATE_MIN: f32 = 3.0;
pub const TUBE_RATE_MAX: f32 = 9.0;

// Ink path subdivision and splash sub-emissions
pub const INK_SEGMENT_LEN: f32 = 0.05;
pub const INK_MAX_SEGMENTS: usize = 6;
pub const INK_SPLASH_RATE_MAX: f32 = 3.0; // per second at full high band
pub const INK_SPLASH_DROPLETS: usize = 3;

// Tube bloom bursts
pub const TUBE_BLOOM_RATE: f32 = 0.8; // per second at full drive signal
pub const TUBE_BLOOM_SEGMENTS: usize = 6;

// Long per-stroke fade-outs (seconds), requested as backend animations
pub const INK_FADE_SECS: f32 = 120.0;
pub const BUBBLE_FADE_SECS: f32 = 130.0;
pub const GLOW_FADE_SECS: f32 = 110.0;
pub const TUBE_FADE_SECS: f32 = 100.0;
pub const SPLASH_FADE_SECS: f32 = 90.0;
pub const BLOOM_FADE_SECS: f32 = 80.0;

// Slot placement
pub const SLOT_HUE_SHIFTS: [f32; 3] = [-8.0, 0.0, 18.0];
pub const LIFT_MID_COEFF: f32 = 0.5;
pub const LIFT_LOW_COEFF: f32 = 0.22;
pub const LIFT_ENERGY_COEFF: f32 = 0.08;

// Radial symmetry trigger (tunable blend, see SymmetryConfig)
pub const SYMMETRY_PHASE_RATE: f32 = 0.25; // radians per second
pub const SYMMETRY_PHASE_WEIGHT: f32 = 0.45;
pub const SYMMETRY_HIGH_WEIGHT: f32 = 0.3;
pub const SYMMETRY_ENERGY_WEIGHT: f32 = 0.25;
pub const SYMMETRY_THRESHOLD_THREE: f32 = 0.62;
pub const SYMMETRY_THRESHOLD_FIVE: f32 = 0.82;

// Ribbon trail
pub const RIBBON_CONTROL_POINTS: usize = 5;
pub const RIBBON_CHASE_RATES: [f32; RIBBON_CONTROL_POINTS] = [2.4, 3.2, 4.2, 5.4, 7.2];
pub const RIBBON_SAMPLES: usize = 24;
pub const RIBBON_BASE_HALF_WIDTH: f32 = 0.035;
pub const RIBBON_WOBBLE_AMP: f32 = 0.01;
pub const RIBBON_DISTANCE: f32 = 1.1; // base draw distance in front of the viewer
pub const RIBBON_FREEZE_INTERVAL: f32 = 0.8; // seconds per snapshot
pub const RIBBON_HISTORY_MAX: usize = 36;
pub const FREEZE_OPACITY_DECAY: f32 = 0.78;
pub const FREEZE_EMISSIVE_DECAY: f32 = 0.7;

// Mine / particle bursts
pub const MINE_ENERGY_GATE: f32 = 0.25;
pub const MINE_RATE_MIN: f32 = 0.2; // per second just above the gate
pub const MINE_RATE_MAX: f32 = 1.4; // per second at full energy
pub const MINE_FUSE_SECS: f32 = 0.9;
pub const BURST_PARTICLES: usize = 14;
pub const PARTICLE_TTL_SECS: f32 = 1.4;
pub const PARTICLE_DRAG: f32 = 2.2; // velocity *= exp(-drag*dt)
pub const MAX_PARTICLES: usize = 160;

// Auto-program cycling
pub const PROGRAM_MAX_COMPRESSION_SECS: f32 = 4.0;
