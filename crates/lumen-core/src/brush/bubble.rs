//! Bubble brush: discrete floating volumetric marks with a slow vertical
//! drift loop and a lifetime fade.

use glam::{Quat, Vec3};

use crate::audio::AudioBands;
use crate::backend::{
    AnimationSpec, AnimationTarget, Easing, GeometryDesc, MaterialDesc, VisualBackend,
};
use crate::constants::BUBBLE_FADE_SECS;
use crate::math::{noise_signed, smooth_noise};
use crate::palette::palette;
use crate::pool::{Stroke, StrokePool};

use super::{EmitCtx, PlacementFrame};

pub(crate) fn emit(
    ctx: &EmitCtx,
    bands: &AudioBands,
    frame: &PlacementFrame,
    float_phase: f32,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let frequency = (bands.mid * 1.15).clamp(0.0, 1.0);
    let t = ctx.elapsed;

    let size = 0.04 + bands.low * 0.18;
    let jitter = (0.01 + bands.high * 0.05) * ctx.weight;
    let pos = frame.origin
        + frame.right * (noise_signed(t, ctx.seed + 1.9) * jitter)
        + frame.up * (noise_signed(t, ctx.seed + 2.6) * jitter);

    let paint = palette(
        AudioBands {
            low: bands.low,
            mid: frequency,
            high: bands.high,
            energy: bands.energy,
        },
        ctx.hue_shift,
        0.05,
    );
    let material = MaterialDesc {
        color: paint.color,
        emissive: paint.emissive,
        emissive_intensity: 0.25,
        opacity: (0.1 + bands.low * 0.18) * ctx.weight,
        roughness: 0.2,
        metalness: 0.05,
        transparent: true,
        depth_write: false,
    };

    let handle = backend.create_visual(
        &GeometryDesc::Icosahedron { radius: 1.0, detail: 1 },
        &material,
    );
    backend.set_transform(handle, pos, Vec3::splat(size), Quat::IDENTITY);

    let float_offset = 0.12 + bands.low * 0.2;
    let float_secs = 6.5 + smooth_noise(t + float_phase, ctx.seed + 4.1) * 2.5;
    backend.attach_animation(
        handle,
        &AnimationSpec {
            target: AnimationTarget::Position(pos + Vec3::Y * float_offset),
            duration_secs: float_secs,
            easing: Easing::InOutSine,
            looping: true,
            alternate: true,
        },
    );
    backend.attach_animation(handle, &AnimationSpec::fade_to(0.02, BUBBLE_FADE_SECS));
    pool.push(Stroke { handle }, backend);
}
