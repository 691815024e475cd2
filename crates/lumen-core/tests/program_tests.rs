// Auto-program cycling: timed advancement, energy compression, manual
// selection and the disable switch.

mod common;

use common::RecordingBackend;
use lumen_core::{default_programs, default_slots, AutoProgramManager, BrushKind, BrushManager};

fn make_rig() -> (AutoProgramManager, BrushManager, RecordingBackend) {
    let mut backend = RecordingBackend::new();
    let mut manager = BrushManager::new(&default_slots(), 11);
    let mut programs = AutoProgramManager::new(default_programs());
    programs.apply_program(0, &mut manager, &mut backend);
    (programs, manager, backend)
}

#[test]
fn apply_assigns_every_slot() {
    let (programs, manager, _backend) = make_rig();
    assert_eq!(programs.current_index(), 0);
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink));
    assert_eq!(manager.slot_kind(1), Some(BrushKind::Bubble));
    assert_eq!(manager.slot_kind(2), Some(BrushKind::Glow));
}

#[test]
fn quiet_audio_advances_at_the_full_duration() {
    let (mut programs, mut manager, mut backend) = make_rig();
    // First program runs 16s; at zero energy nothing is compressed.
    for _ in 0..31 {
        programs.update(0.5, 0.0, &mut manager, &mut backend);
    }
    assert_eq!(programs.current_index(), 0, "15.5s of silence must not advance a 16s program");
    programs.update(0.6, 0.0, &mut manager, &mut backend);
    assert_eq!(programs.current_index(), 1);
    // "minimal-dense" swaps slot 1 from bubbles to ink via crossfade.
    assert_eq!(manager.pending_kind(1), Some(BrushKind::Ink));
    assert_eq!(manager.slot_kind(0), Some(BrushKind::Ink), "unchanged slots keep their brush");
}

#[test]
fn loud_audio_compresses_the_duration() {
    let (mut programs, mut manager, mut backend) = make_rig();
    // Full energy shaves the maximum compression off the 16s program.
    for _ in 0..25 {
        programs.update(0.5, 1.0, &mut manager, &mut backend);
    }
    assert_eq!(programs.current_index(), 1, "12.5s at full energy must pass the 12s mark");
}

#[test]
fn compression_never_fires_early_under_silence() {
    let (mut programs, mut manager, mut backend) = make_rig();
    for _ in 0..25 {
        programs.update(0.5, 0.0, &mut manager, &mut backend);
    }
    assert_eq!(programs.current_index(), 0, "12.5s of silence is short of the full 16s");
}

#[test]
fn advancement_wraps_around_the_catalog() {
    let (mut programs, mut manager, mut backend) = make_rig();
    let count = default_programs().len();
    for _ in 0..count {
        // Drive each program past its (uncompressed) duration.
        for _ in 0..41 {
            programs.update(0.5, 0.0, &mut manager, &mut backend);
        }
    }
    assert_eq!(programs.current_index(), 0, "catalog must cycle back to the start");
}

#[test]
fn manual_selection_wraps_and_restarts_the_timer() {
    let (mut programs, mut manager, mut backend) = make_rig();
    programs.update(5.0, 0.0, &mut manager, &mut backend);
    assert!(programs.elapsed() > 0.0);

    programs.apply_program(5, &mut manager, &mut backend);
    assert_eq!(programs.current_index(), 1, "selection is modulo the catalog length");
    assert_eq!(programs.elapsed(), 0.0);
}

#[test]
fn disabled_cycling_freezes_the_index() {
    let (mut programs, mut manager, mut backend) = make_rig();
    programs.set_enabled(false);
    for _ in 0..100 {
        programs.update(1.0, 1.0, &mut manager, &mut backend);
    }
    assert_eq!(programs.current_index(), 0);
    assert_eq!(programs.elapsed(), 0.0, "a disabled cycler must not accumulate time");
}
