//! Catmull-Rom sampling and frame derivation for the ribbon strip.

use glam::Vec3;

/// Uniform Catmull-Rom interpolation between `p1` and `p2`.
pub(crate) fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p3 - p0 + p1 * 3.0 - p2 * 3.0) * t3)
}

/// Sample the control chain into `samples + 1` points, endpoints clamped.
/// A zero sample count degenerates to a single segment.
pub(crate) fn sample_chain(points: &[Vec3], samples: usize, out: &mut Vec<Vec3>) {
    let samples = samples.max(1);
    out.clear();
    let n = points.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        out.resize(samples + 1, points[0]);
        return;
    }
    let segments = (n - 1) as f32;
    for i in 0..=samples {
        let u = i as f32 / samples as f32 * segments;
        let j = (u.floor() as usize).min(n - 2);
        let t = u - j as f32;
        let p0 = points[j.saturating_sub(1)];
        let p1 = points[j];
        let p2 = points[j + 1];
        let p3 = points[(j + 2).min(n - 1)];
        out.push(catmull_rom(p0, p1, p2, p3, t));
    }
}

/// Unit lateral (perpendicular) vector at a sample, from the finite
/// difference tangent crossed against the world up axis. Falls back to an
/// alternate axis when the tangent is nearly vertical, and to a constant
/// when the tangent itself degenerates.
pub(crate) fn lateral_at(samples: &[Vec3], index: usize) -> Vec3 {
    if samples.len() < 2 {
        return Vec3::X;
    }
    let last = samples.len() - 1;
    let tangent = if index == 0 {
        samples[1] - samples[0]
    } else if index == last {
        samples[last] - samples[last - 1]
    } else {
        samples[index + 1] - samples[index - 1]
    };
    let mut lateral = tangent.cross(Vec3::Y);
    if lateral.length_squared() < 1e-8 {
        lateral = tangent.cross(Vec3::X);
    }
    let lateral = lateral.normalize_or_zero();
    if lateral.length_squared() < 0.5 {
        Vec3::X
    } else {
        lateral
    }
}
