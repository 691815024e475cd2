//! Glow brush: small emissive marks along a sinusoidal path, scale pulsing
//! with the wave.

use glam::{Quat, Vec3};

use crate::audio::AudioBands;
use crate::backend::{AnimationSpec, GeometryDesc, MaterialDesc, VisualBackend};
use crate::constants::GLOW_FADE_SECS;
use crate::palette::palette;
use crate::pool::{Stroke, StrokePool};

use super::{EmitCtx, PlacementFrame};

pub(crate) fn emit(
    ctx: &EmitCtx,
    bands: &AudioBands,
    frame: &PlacementFrame,
    pool: &mut StrokePool,
    backend: &mut dyn VisualBackend,
) {
    let rhythm = (bands.mid * 1.2).clamp(0.0, 1.0);
    let t = ctx.elapsed;

    let amplitude = 0.05 + bands.mid * 0.18;
    let frequency = 0.6 + bands.high * 1.8;
    let wave = (t * frequency + ctx.seed).sin() * amplitude;
    let wave_up = (t * frequency * 0.8 + ctx.seed * 1.4).cos() * amplitude * 0.6;
    let pos = frame.origin + frame.right * wave + frame.up * wave_up;

    let pulse = 1.0 + 0.25 * (t * frequency * 2.0).sin();
    let size = (0.02 + bands.mid * 0.05) * pulse;

    let paint = palette(
        AudioBands {
            low: bands.low * 0.4,
            mid: rhythm,
            high: bands.high,
            energy: bands.energy,
        },
        ctx.hue_shift + 22.0,
        0.15,
    );
    let material = MaterialDesc {
        color: paint.color,
        emissive: paint.emissive,
        emissive_intensity: 0.6,
        opacity: (0.16 + rhythm * 0.24) * ctx.weight,
        roughness: 0.1,
        metalness: 0.2,
        transparent: true,
        depth_write: false,
    };

    let handle = backend.create_visual(&GeometryDesc::Sphere { radius: 1.0 }, &material);
    backend.set_transform(handle, pos, Vec3::splat(size), Quat::IDENTITY);
    backend.attach_animation(handle, &AnimationSpec::fade_to(0.04, GLOW_FADE_SECS));
    pool.push(Stroke { handle }, backend);
}
