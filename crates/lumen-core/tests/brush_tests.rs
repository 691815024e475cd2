// Brush tick contract: crossfade weight smoothing, the spawn accumulator's
// frame-rate independence, and silence behaviour.

mod common;

use common::{bands, RecordingBackend};
use glam::Vec3;
use lumen_core::{AudioBands, Brush, BrushKind, PlacementFrame};

fn make_frame() -> PlacementFrame {
    PlacementFrame {
        origin: Vec3::new(0.0, 1.5, -1.1),
        forward: Vec3::NEG_Z,
        right: Vec3::X,
        up: Vec3::Y,
    }
}

fn make_brush(kind: BrushKind, initial_weight: f32) -> Brush {
    Brush::new(kind, 4.3, 0.0, 64, initial_weight)
}

#[test]
fn weight_decays_monotonically_without_overshoot() {
    let mut backend = RecordingBackend::new();
    let frame = make_frame();
    let mut brush = make_brush(BrushKind::Glow, 1.0);
    brush.set_target_weight(0.0);

    let mut prev = brush.weight();
    for i in 0..300 {
        brush.update(&AudioBands::ZERO, i as f32 * 0.016, 0.016, &frame, &mut backend);
        let w = brush.weight();
        assert!(w <= prev + 1e-6, "weight rose while fading out at tick {i}: {prev} -> {w}");
        assert!(w >= 0.0, "weight undershot zero at tick {i}: {w}");
        prev = w;
    }
    assert!(brush.is_faded_out(), "weight {prev} still above the fade-out threshold");
}

#[test]
fn weight_rises_monotonically_toward_one() {
    let mut backend = RecordingBackend::new();
    let frame = make_frame();
    let mut brush = make_brush(BrushKind::Glow, 0.0);
    brush.set_target_weight(1.0);

    let mut prev = brush.weight();
    for i in 0..300 {
        brush.update(&AudioBands::ZERO, i as f32 * 0.016, 0.016, &frame, &mut backend);
        let w = brush.weight();
        assert!(w >= prev - 1e-6, "weight fell while fading in at tick {i}");
        assert!(w <= 1.0, "weight overshot one at tick {i}: {w}");
        prev = w;
    }
    assert!(prev > 0.97, "weight {prev} did not converge to its target");
}

#[test]
fn faded_brush_emits_nothing() {
    let mut backend = RecordingBackend::new();
    let frame = make_frame();
    let mut brush = make_brush(BrushKind::Ink, 0.0);
    for i in 0..200 {
        brush.update(&bands(0.9, 0.9, 0.9, 0.9), i as f32 * 0.016, 0.016, &frame, &mut backend);
    }
    assert_eq!(backend.created, 0, "a zero-weight brush must skip emission");
}

#[test]
fn emission_count_tracks_the_rate_integral() {
    // Glow in silence runs at its floor rate of 3.5/s; over 20 seconds the
    // accumulator should land within a couple of events of the integral
    // (the rate ramps up over roughly the first second).
    let mut backend = RecordingBackend::new();
    let frame = make_frame();
    let mut brush = make_brush(BrushKind::Glow, 1.0);
    for i in 0..1250 {
        brush.update(&AudioBands::ZERO, i as f32 * 0.016, 0.016, &frame, &mut backend);
    }
    assert!(
        (66..=72).contains(&backend.created),
        "expected ~69 emissions over 20s at 3.5/s, got {}",
        backend.created
    );
}

#[test]
fn emission_count_is_independent_of_frame_partition() {
    let frame = make_frame();
    let reading = bands(0.0, 0.5, 0.0, 0.3);

    let mut even_backend = RecordingBackend::new();
    let mut even = make_brush(BrushKind::Glow, 1.0);
    let mut t = 0.0;
    for _ in 0..1250 {
        even.update(&reading, t, 0.016, &frame, &mut even_backend);
        t += 0.016;
    }

    let mut uneven_backend = RecordingBackend::new();
    let mut uneven = make_brush(BrushKind::Glow, 1.0);
    let mut t = 0.0;
    for _ in 0..625 {
        uneven.update(&reading, t, 0.008, &frame, &mut uneven_backend);
        t += 0.008;
        uneven.update(&reading, t, 0.024, &frame, &mut uneven_backend);
        t += 0.024;
    }

    let a = even_backend.created as i64;
    let b = uneven_backend.created as i64;
    assert!(
        (a - b).abs() <= 2,
        "same wall time, different partitions: {a} vs {b} emissions"
    );
}

#[test]
fn silence_marathon_stays_finite_and_bounded() {
    let mut backend = RecordingBackend::new();
    let frame = make_frame();
    let mut brush = make_brush(BrushKind::Ink, 1.0);
    for i in 0..1000 {
        brush.update(&AudioBands::ZERO, i as f32 * 0.016, 0.016, &frame, &mut backend);
    }
    assert!(backend.created > 0, "ink must keep emitting at its floor rate in silence");
    assert!(brush.pool().len() <= 64, "pool bound violated");
    assert!(brush.weight().is_finite());
    for (i, pos) in backend.positions.iter().enumerate() {
        assert!(pos.is_finite(), "non-finite transform at call {i}: {pos:?}");
    }
}

#[test]
fn high_band_drives_ink_splashes() {
    let frame = make_frame();

    let mut quiet_backend = RecordingBackend::new();
    let mut quiet = make_brush(BrushKind::Ink, 1.0);
    for i in 0..600 {
        quiet.update(&bands(0.5, 0.2, 0.0, 0.3), i as f32 * 0.016, 0.016, &frame, &mut quiet_backend);
    }

    let mut loud_backend = RecordingBackend::new();
    let mut loud = make_brush(BrushKind::Ink, 1.0);
    for i in 0..600 {
        loud.update(&bands(0.5, 0.2, 0.9, 0.3), i as f32 * 0.016, 0.016, &frame, &mut loud_backend);
    }

    assert!(
        loud_backend.created > quiet_backend.created,
        "high band should add splash droplets: quiet={} loud={}",
        quiet_backend.created,
        loud_backend.created
    );
}

#[test]
fn dispose_releases_the_pool() {
    let mut backend = RecordingBackend::new();
    let frame = make_frame();
    let mut brush = make_brush(BrushKind::Tube, 1.0);
    for i in 0..400 {
        brush.update(&bands(0.6, 0.4, 0.3, 0.6), i as f32 * 0.016, 0.016, &frame, &mut backend);
    }
    assert!(backend.created > 0);
    brush.dispose(&mut backend);
    assert_eq!(backend.live_count(), 0, "dispose must release every pooled stroke");
    brush.dispose(&mut backend);
    assert_eq!(backend.live_count(), 0);
}
