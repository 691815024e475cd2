//! Tube brush: connected segments along a noisy path, with periodic radial
//! bloom bursts of extra segments.

use glam::Vec3;

use crate::audio::AudioBands;
use crate::backend::{MaterialDesc, VisualBackend};
use crate::constants::{BLOOM_FADE_SECS, TUBE_BLOOM_SEGMENTS, TUBE_FADE_SECS};
use crate::math::noise_signed;
use crate::palette::palette;
use crate::pool::StrokePool;

use super::{spawn_oriented_segment, EmitCtx, PlacementFrame};

pub(crate) fn emit(
    ctx: &EmitCtx,
    bands: &AudioBands,
    frame: &PlacementFrame,
    last_point: &mut Option<Vec3>,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let t = ctx.elapsed;
    let target = frame.origin
        + frame.right * (noise_signed(t, ctx.seed + 1.1) * 0.08)
        + frame.up * (noise_signed(t, ctx.seed + 2.3) * 0.07);

    let start = last_point.unwrap_or(target);
    *last_point = Some(target);

    let radius = 0.008 + bands.low * 0.025;
    let material = tube_material(ctx, bands, 0.0);

    let span = target - start;
    let span_len = span.length();
    if span_len < 1e-5 {
        spawn_oriented_segment(
            target,
            frame.forward,
            radius,
            0.05,
            &material,
            TUBE_FADE_SECS,
            pool,
            backend,
        );
        return;
    }
    spawn_oriented_segment(
        start + span * 0.5,
        span / span_len,
        radius,
        span_len,
        &material,
        TUBE_FADE_SECS,
        pool,
        backend,
    );
}

/// Radial ring of short segments blooming out of the path.
pub(crate) fn emit_bloom(
    ctx: &EmitCtx,
    bands: &AudioBands,
    frame: &PlacementFrame,
    centre: Vec3,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let material = tube_material(ctx, bands, 0.15);
    let length = 0.05 + bands.energy * 0.08;
    for k in 0..TUBE_BLOOM_SEGMENTS {
        let angle = k as f32 * std::f32::consts::TAU / TUBE_BLOOM_SEGMENTS as f32;
        let dir = frame.right * angle.cos() + frame.up * angle.sin();
        spawn_oriented_segment(
            centre + dir * (length * 0.5),
            dir,
            0.006,
            length,
            &material,
            BLOOM_FADE_SECS,
            pool,
            backend,
        );
    }
}

fn tube_material(ctx: &EmitCtx, bands: &AudioBands, extra_boost: f32) -> MaterialDesc {
    let paint = palette(*bands, ctx.hue_shift - 12.0, bands.energy * 0.12 + extra_boost);
    MaterialDesc {
        color: paint.color,
        emissive: paint.emissive,
        emissive_intensity: 0.35,
        opacity: (0.14 + bands.low * 0.18 + bands.energy * 0.08) * ctx.weight,
        roughness: 0.35,
        metalness: 0.15,
        transparent: true,
        depth_write: false,
    }
}
