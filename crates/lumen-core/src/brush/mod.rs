//! Audio-driven stroke emitters.
//!
//! Each brush is a tagged variant over a shared state record: a crossfade
//! weight chasing its target, a smoothed spawn rate in events per second,
//! and a fractional spawn accumulator whose integer overflow triggers
//! exactly one emission. Accumulating `rate * dt` makes the emission count
//! over any interval converge to the rate integral independent of frame
//! rate; there is no "one event per tick" logic anywhere.

mod bubble;
mod glow;
mod ink;
mod tube;

use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::audio::AudioBands;
use crate::backend::{
    AnimationSpec, GeometryDesc, MaterialDesc, VisualBackend,
};
use crate::constants::*;
use crate::math::{lerp, smooth_noise};
use crate::pool::{Stroke, StrokePool};

/// Brush variants a slot can host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushKind {
    Ink,
    Bubble,
    Glow,
    Tube,
}

impl BrushKind {
    /// Catalog-facing name lookup. Unknown names yield `None`; callers
    /// treat that as a no-op.
    pub fn from_name(name: &str) -> Option<BrushKind> {
        match name {
            "ink" => Some(BrushKind::Ink),
            "bubbles" => Some(BrushKind::Bubble),
            "glow" => Some(BrushKind::Glow),
            "tube" => Some(BrushKind::Tube),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Ink => "ink",
            BrushKind::Bubble => "bubbles",
            BrushKind::Glow => "glow",
            BrushKind::Tube => "tube",
        }
    }
}

/// Placement basis handed to a brush for one update: an anchor in front of
/// the viewer plus unit axes (already rotated for radial-symmetry replicas).
#[derive(Clone, Copy, Debug)]
pub struct PlacementFrame {
    pub origin: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Per-kind emission state.
enum VariantState {
    Ink { last_point: Option<Vec3>, splash_accum: f32 },
    Bubble { float_phase: f32 },
    Glow,
    Tube { last_point: Option<Vec3>, bloom_accum: f32 },
}

/// Read-only view of the shared record passed to the emission functions.
pub(crate) struct EmitCtx {
    pub seed: f32,
    pub hue_shift: f32,
    pub weight: f32,
    pub elapsed: f32,
}

pub struct Brush {
    kind: BrushKind,
    seed: f32,
    hue_shift: f32,
    weight: f32,
    target_weight: f32,
    spawn_accum: f32,
    spawn_rate: f32,
    elapsed: f32,
    pool: StrokePool,
    variant: VariantState,
}

impl Brush {
    /// `initial_weight` is only meaningful at the creation boundary: 1 for
    /// a brush filling an empty slot, 0 for one fading in over a crossfade.
    pub fn new(kind: BrushKind, seed: f32, hue_shift: f32, max_strokes: usize, initial_weight: f32) -> Self {
        let variant = match kind {
            BrushKind::Ink => VariantState::Ink {
                last_point: None,
                splash_accum: 0.0,
            },
            BrushKind::Bubble => VariantState::Bubble {
                float_phase: smooth_noise(seed, seed + 0.7) * TAU,
            },
            BrushKind::Glow => VariantState::Glow,
            BrushKind::Tube => VariantState::Tube {
                last_point: None,
                bloom_accum: 0.0,
            },
        };
        Self {
            kind,
            seed,
            hue_shift,
            weight: initial_weight.clamp(0.0, 1.0),
            target_weight: initial_weight.clamp(0.0, 1.0),
            spawn_accum: 0.0,
            spawn_rate: 0.0,
            elapsed: 0.0,
            pool: StrokePool::new(max_strokes),
            variant,
        }
    }

    pub fn kind(&self) -> BrushKind {
        self.kind
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn target_weight(&self) -> f32 {
        self.target_weight
    }

    pub fn set_target_weight(&mut self, target: f32) {
        self.target_weight = target.clamp(0.0, 1.0);
    }

    pub fn pool(&self) -> &StrokePool {
        &self.pool
    }

    pub fn is_faded_out(&self) -> bool {
        self.weight < FADE_OUT_THRESHOLD && self.target_weight < FADE_OUT_THRESHOLD
    }

    /// Release every pooled stroke. Idempotent.
    pub fn dispose(&mut self, backend: &mut dyn VisualBackend) {
        self.pool.dispose(backend);
    }

    pub fn update(
        &mut self,
        bands: &AudioBands,
        _time: f32,
        dt: f32,
        frame: &PlacementFrame,
        backend: &mut dyn VisualBackend,
    ) {
        self.elapsed += dt;
        let blend = 1.0 - (-dt * WEIGHT_SMOOTH_RATE).exp();
        self.weight += (self.target_weight - self.weight) * blend;
        if self.weight < EMISSION_SKIP_WEIGHT {
            return;
        }

        let target_rate = self.target_spawn_rate(bands);
        self.spawn_rate +=
            (target_rate - self.spawn_rate) * (1.0 - (-dt * SPAWN_RATE_SMOOTH_RATE).exp());
        self.spawn_accum += dt * self.spawn_rate;
        while self.spawn_accum >= 1.0 {
            self.spawn_accum -= 1.0;
            self.emit(bands, frame, backend);
        }

        self.tick_sub_accumulators(bands, dt, frame, backend);
    }

    fn target_spawn_rate(&self, bands: &AudioBands) -> f32 {
        match self.kind {
            BrushKind::Ink => {
                let density = (bands.low * 1.25).clamp(0.0, 1.0);
                lerp(INK_RATE_MIN, INK_RATE_MAX, density)
            }
            BrushKind::Bubble => {
                let frequency = (bands.mid * 1.15).clamp(0.0, 1.0);
                lerp(BUBBLE_RATE_MIN, BUBBLE_RATE_MAX, frequency)
            }
            BrushKind::Glow => {
                let rhythm = (bands.mid * 1.2).clamp(0.0, 1.0);
                lerp(GLOW_RATE_MIN, GLOW_RATE_MAX, rhythm)
            }
            BrushKind::Tube => {
                let drive = (bands.low * 0.6 + bands.energy * 0.6).clamp(0.0, 1.0);
                lerp(TUBE_RATE_MIN, TUBE_RATE_MAX, drive)
            }
        }
    }

    fn emit(&mut self, bands: &AudioBands, frame: &PlacementFrame, backend: &mut dyn VisualBackend) {
        let ctx = EmitCtx {
            seed: self.seed,
            hue_shift: self.hue_shift,
            weight: self.weight,
            elapsed: self.elapsed,
        };
        match &mut self.variant {
            VariantState::Ink { last_point, .. } => {
                ink::emit(&ctx, bands, frame, last_point, &mut self.pool, backend)
            }
            VariantState::Bubble { float_phase } => {
                bubble::emit(&ctx, bands, frame, *float_phase, &mut self.pool, backend)
            }
            VariantState::Glow => glow::emit(&ctx, bands, frame, &mut self.pool, backend),
            VariantState::Tube { last_point, .. } => {
                tube::emit(&ctx, bands, frame, last_point, &mut self.pool, backend)
            }
        }
    }

    /// Splash and bloom sub-emissions run off their own accumulators so
    /// their density tracks the gating signal, not the primary spawn rate.
    fn tick_sub_accumulators(
        &mut self,
        bands: &AudioBands,
        dt: f32,
        frame: &PlacementFrame,
        backend: &mut dyn VisualBackend,
    ) {
        let ctx = EmitCtx {
            seed: self.seed,
            hue_shift: self.hue_shift,
            weight: self.weight,
            elapsed: self.elapsed,
        };
        match &mut self.variant {
            VariantState::Ink { splash_accum, .. } => {
                *splash_accum += dt * bands.high * INK_SPLASH_RATE_MAX;
                while *splash_accum >= 1.0 {
                    *splash_accum -= 1.0;
                    ink::emit_splash(&ctx, bands, frame, &mut self.pool, backend);
                }
            }
            VariantState::Tube { bloom_accum, last_point } => {
                let drive = 0.4 * smooth_noise(self.elapsed, self.seed + 4.2) + 1.2 * bands.energy;
                *bloom_accum += dt * drive * TUBE_BLOOM_RATE;
                while *bloom_accum >= 1.0 {
                    *bloom_accum -= 1.0;
                    let centre = last_point.unwrap_or(frame.origin);
                    tube::emit_bloom(&ctx, bands, frame, centre, &mut self.pool, backend);
                }
            }
            VariantState::Bubble { .. } | VariantState::Glow => {}
        }
    }
}

/// Create a cylinder stroke centred on `centre`, its local Y axis rotated
/// onto `dir`, and register it with the pool.
pub(crate) fn spawn_oriented_segment(
    centre: Vec3,
    dir: Vec3,
    radius: f32,
    length: f32,
    material: &MaterialDesc,
    fade_secs: f32,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let axis = if dir.length_squared() > 1e-10 {
        dir.normalize()
    } else {
        Vec3::Y
    };
    let handle = backend.create_visual(
        &GeometryDesc::Cylinder { radius, height: length },
        material,
    );
    backend.set_transform(handle, centre, Vec3::ONE, Quat::from_rotation_arc(Vec3::Y, axis));
    backend.attach_animation(handle, &AnimationSpec::fade_to(0.02, fade_secs));
    pool.push(Stroke { handle }, backend);
}
