// Slot crossfade state machine: assignment semantics, promotion, radial
// symmetry and disposal.

mod common;

use common::{bands, RecordingBackend};
use glam::Vec3;
use lumen_core::{default_slots, AudioBands, BrushKind, BrushManager, SymmetryConfig};

fn make_manager() -> BrushManager {
    BrushManager::new(&default_slots(), 7)
}

fn tick(manager: &mut BrushManager, backend: &mut RecordingBackend, reading: &AudioBands, frames: usize) {
    let mut t = 0.0;
    for _ in 0..frames {
        t += 0.016;
        manager.update(
            reading,
            t,
            0.016,
            Vec3::new(0.0, 1.6, 0.0),
            Vec3::NEG_Z,
            Vec3::X,
            Vec3::Y,
            backend,
        );
    }
}

#[test]
fn first_assignment_fills_the_slot_at_full_weight() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink));
    assert!(manager.pending_kind(0).is_none());
    let brush = manager.slot_brush(0).unwrap();
    assert_eq!(brush.weight(), 1.0);
}

#[test]
fn crossfade_starts_on_reassignment_and_completes() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    tick(&mut manager, &mut backend, &AudioBands::ZERO, 10);

    manager.assign_brush(0, BrushKind::Glow, &mut backend);
    tick(&mut manager, &mut backend, &AudioBands::ZERO, 1);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink), "current survives the first tick");
    assert_eq!(manager.pending_kind(0), Some(BrushKind::Glow));
    let outgoing = manager.slot_brush(0).unwrap();
    assert_eq!(outgoing.target_weight(), 0.0);
    let incoming = manager.pending_brush(0).unwrap();
    assert!(incoming.weight() < 0.1, "incoming brush starts near zero weight");
    assert_eq!(incoming.target_weight(), 1.0);

    tick(&mut manager, &mut backend, &AudioBands::ZERO, 500);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Glow), "promotion after fade-out");
    assert!(manager.pending_kind(0).is_none());
    assert!(manager.slot_brush(0).unwrap().weight() > 0.9);
    assert_eq!(
        backend.created - backend.destroyed,
        backend.live_count() as u64,
        "counters must stay consistent through promotion"
    );
}

#[test]
fn reassigning_the_current_kind_is_a_no_op() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    assert!(manager.pending_kind(0).is_none(), "same-kind reassignment must not crossfade");
}

#[test]
fn reassigning_the_pending_kind_keeps_the_fade_in_progress() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    manager.assign_brush(0, BrushKind::Glow, &mut backend);
    tick(&mut manager, &mut backend, &AudioBands::ZERO, 30);
    let weight_before = manager.pending_brush(0).unwrap().weight();
    assert!(weight_before > 0.1, "fade should have progressed");

    manager.assign_brush(0, BrushKind::Glow, &mut backend);
    let weight_after = manager.pending_brush(0).unwrap().weight();
    assert_eq!(weight_before, weight_after, "re-request must not restart the fade");
}

#[test]
fn reasserting_the_current_kind_mid_fade_does_not_cancel_the_crossfade() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    manager.assign_brush(0, BrushKind::Glow, &mut backend);
    tick(&mut manager, &mut backend, &AudioBands::ZERO, 10);

    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink));
    assert_eq!(
        manager.pending_kind(0),
        Some(BrushKind::Glow),
        "re-requesting the outgoing kind must not displace the fade target"
    );

    tick(&mut manager, &mut backend, &AudioBands::ZERO, 500);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Glow), "the crossfade must still complete");
    assert!(manager.pending_kind(0).is_none());
}

#[test]
fn third_kind_mid_fade_replaces_the_pending_brush() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    manager.assign_brush(0, BrushKind::Glow, &mut backend);
    tick(&mut manager, &mut backend, &bands(0.6, 0.6, 0.2, 0.5), 40);
    let destroyed_before = backend.destroyed;

    manager.assign_brush(0, BrushKind::Tube, &mut backend);
    assert_eq!(manager.pending_kind(0), Some(BrushKind::Tube), "latest request wins");
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink));
    assert!(
        backend.destroyed > destroyed_before,
        "the displaced pending brush must release its strokes immediately"
    );
}

#[test]
fn unknown_brush_names_are_ignored() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush_by_name(0, "ink", &mut backend);
    manager.assign_brush_by_name(0, "sparkles", &mut backend);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink));
    assert!(manager.pending_kind(0).is_none());
}

#[test]
fn out_of_range_slot_assignment_is_ignored() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(99, BrushKind::Ink, &mut backend);
    tick(&mut manager, &mut backend, &AudioBands::ZERO, 5);
    assert_eq!(backend.created, 0);
}

#[test]
fn symmetry_replicas_multiply_emissions() {
    let loud = bands(0.4, 0.4, 0.9, 0.9);

    let mut single_backend = RecordingBackend::new();
    let mut single = make_manager();
    single.set_symmetry(SymmetryConfig {
        threshold_three: 99.0,
        threshold_five: 99.0,
        ..SymmetryConfig::default()
    });
    single.assign_brush(0, BrushKind::Glow, &mut single_backend);
    tick(&mut single, &mut single_backend, &loud, 400);

    let mut five_backend = RecordingBackend::new();
    let mut five = make_manager();
    five.set_symmetry(SymmetryConfig {
        threshold_three: -1.0,
        threshold_five: -1.0,
        ..SymmetryConfig::default()
    });
    five.assign_brush(0, BrushKind::Glow, &mut five_backend);
    tick(&mut five, &mut five_backend, &loud, 400);

    assert!(
        five_backend.created > single_backend.created * 3,
        "five replicas should emit far more than one: {} vs {}",
        five_backend.created,
        single_backend.created
    );
}

#[test]
fn dispose_releases_current_and_pending() {
    let mut backend = RecordingBackend::new();
    let mut manager = make_manager();
    manager.assign_brush(0, BrushKind::Ink, &mut backend);
    manager.assign_brush(1, BrushKind::Bubble, &mut backend);
    tick(&mut manager, &mut backend, &bands(0.5, 0.5, 0.3, 0.5), 120);
    manager.assign_brush(0, BrushKind::Glow, &mut backend);
    tick(&mut manager, &mut backend, &bands(0.5, 0.5, 0.3, 0.5), 30);

    manager.dispose(&mut backend);
    assert_eq!(backend.live_count(), 0, "dispose must release both fade sides");
    manager.dispose(&mut backend);
    assert_eq!(backend.live_count(), 0);
}
