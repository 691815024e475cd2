//! Ink brush: short connected segments along the wandering draw path,
//! with occasional high-band splash droplets.

use glam::Vec3;

use crate::audio::AudioBands;
use crate::backend::{AnimationSpec, GeometryDesc, MaterialDesc, VisualBackend};
use crate::constants::{
    INK_FADE_SECS, INK_MAX_SEGMENTS, INK_SEGMENT_LEN, INK_SPLASH_DROPLETS, SPLASH_FADE_SECS,
};
use crate::math::noise_signed;
use crate::palette::palette;
use crate::pool::{Stroke, StrokePool};

use super::{spawn_oriented_segment, EmitCtx, PlacementFrame};

pub(crate) fn emit(
    ctx: &EmitCtx,
    bands: &AudioBands,
    frame: &PlacementFrame,
    last_point: &mut Option<Vec3>,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let density = (bands.low * 1.25).clamp(0.0, 1.0);
    let t = ctx.elapsed;

    let wiggle = noise_signed(t, ctx.seed + 0.5) * bands.high;
    let jitter = 0.01 + bands.high * 0.03;
    let offset = frame.right * (wiggle * 0.02)
        + frame.up * (noise_signed(t, ctx.seed + 1.4) * 0.018)
        + frame.right * (noise_signed(t, ctx.seed + 2.2) * jitter)
        + frame.up * (noise_signed(t, ctx.seed + 3.1) * jitter);
    let target = frame.origin + offset;

    let start = last_point.unwrap_or(target);
    *last_point = Some(target);

    let thickness = 0.006 + bands.mid * 0.03;
    let paint = palette(
        AudioBands {
            low: density,
            mid: bands.mid,
            high: bands.high,
            energy: bands.energy,
        },
        ctx.hue_shift,
        bands.energy * 0.1,
    );
    let material = MaterialDesc {
        color: paint.color,
        emissive: paint.emissive,
        emissive_intensity: 0.15,
        opacity: (0.12 + density * 0.2) * ctx.weight,
        roughness: 0.55,
        metalness: 0.1,
        transparent: true,
        depth_write: false,
    };

    let span = target - start;
    let span_len = span.length();
    if span_len < 1e-5 {
        // First emission or a stalled path: drop a single mark along the
        // view direction, as the connected-path rule has nothing to span.
        let length = 0.06 + density * 0.12;
        spawn_oriented_segment(
            target, frame.forward, thickness, length, &material, INK_FADE_SECS, pool, backend,
        );
        return;
    }

    let segments = ((span_len / INK_SEGMENT_LEN).ceil() as usize).clamp(1, INK_MAX_SEGMENTS);
    let dir = span / span_len;
    let seg_len = span_len / segments as f32;
    for i in 0..segments {
        let centre = start + dir * (seg_len * (i as f32 + 0.5));
        spawn_oriented_segment(
            centre,
            dir,
            thickness,
            seg_len.max(0.02),
            &material,
            INK_FADE_SECS,
            pool,
            backend,
        );
    }
}

/// High-band droplets scattered around the current anchor.
pub(crate) fn emit_splash(
    ctx: &EmitCtx,
    bands: &AudioBands,
    frame: &PlacementFrame,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let t = ctx.elapsed;
    let radius = 0.02 + bands.high * 0.06;
    let paint = palette(*bands, ctx.hue_shift, 0.2);
    let material = MaterialDesc {
        color: paint.color,
        emissive: paint.emissive,
        emissive_intensity: 0.3,
        opacity: (0.08 + bands.high * 0.15) * ctx.weight,
        roughness: 0.4,
        metalness: 0.05,
        transparent: true,
        depth_write: false,
    };
    for k in 0..INK_SPLASH_DROPLETS {
        let ks = k as f32;
        let pos = frame.origin
            + frame.right * (noise_signed(t * 7.3 + ks * 1.7, ctx.seed + 5.0 + ks) * radius)
            + frame.up * (noise_signed(t * 6.1 + ks * 2.3, ctx.seed + 6.2 + ks) * radius);
        let size = 0.012 + bands.high * 0.02;
        let handle = backend.create_visual(
            &GeometryDesc::Icosahedron { radius: 1.0, detail: 0 },
            &material,
        );
        backend.set_transform(handle, pos, Vec3::splat(size), glam::Quat::IDENTITY);
        backend.attach_animation(handle, &AnimationSpec::fade_to(0.0, SPLASH_FADE_SECS));
        pool.push(Stroke { handle }, backend);
    }
}
