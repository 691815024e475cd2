//! Slot crossfade state machine and placement geometry.
//!
//! Each slot holds a current brush and, during a transition, a fading-in
//! `next` brush. Per slot and frame the manager computes a placement anchor
//! in front of the viewer (lifted by the audio bands), optionally replicates
//! it at angularly spaced positions around the view axis, updates both
//! brushes per replica, and promotes `next` once `current` has faded out.

use glam::{Quat, Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use crate::audio::AudioBands;
use crate::backend::VisualBackend;
use crate::brush::{Brush, BrushKind, PlacementFrame};
use crate::constants::*;

/// Static description of one placement slot.
#[derive(Clone, Copy, Debug)]
pub struct SlotSpec {
    pub name: &'static str,
    pub lateral_offset: Vec2,
    pub distance: f32,
}

/// Default three-slot rig: a centre anchor flanked by two offset anchors.
pub fn default_slots() -> Vec<SlotSpec> {
    vec![
        SlotSpec {
            name: "centre",
            lateral_offset: Vec2::ZERO,
            distance: 1.1,
        },
        SlotSpec {
            name: "left",
            lateral_offset: Vec2::new(-0.45, 0.12),
            distance: 1.3,
        },
        SlotSpec {
            name: "right",
            lateral_offset: Vec2::new(0.45, -0.08),
            distance: 1.25,
        },
    ]
}

/// Audio lift applied to the slot distance: `mid*mid_coeff - low*low_coeff
/// + energy*energy_coeff`.
#[derive(Clone, Copy, Debug)]
pub struct LiftConfig {
    pub mid: f32,
    pub low: f32,
    pub energy: f32,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            mid: LIFT_MID_COEFF,
            low: LIFT_LOW_COEFF,
            energy: LIFT_ENERGY_COEFF,
        }
    }
}

/// Tunable blend for the radial-symmetry trigger signal: a slow phase
/// oscillator mixed with the high band and the energy composite, compared
/// against two thresholds to pick a replica count of 1, 3 or 5.
#[derive(Clone, Copy, Debug)]
pub struct SymmetryConfig {
    pub phase_rate: f32,
    pub phase_weight: f32,
    pub high_weight: f32,
    pub energy_weight: f32,
    pub threshold_three: f32,
    pub threshold_five: f32,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            phase_rate: SYMMETRY_PHASE_RATE,
            phase_weight: SYMMETRY_PHASE_WEIGHT,
            high_weight: SYMMETRY_HIGH_WEIGHT,
            energy_weight: SYMMETRY_ENERGY_WEIGHT,
            threshold_three: SYMMETRY_THRESHOLD_THREE,
            threshold_five: SYMMETRY_THRESHOLD_FIVE,
        }
    }
}

struct Slot {
    name: &'static str,
    lateral_offset: Vec2,
    distance: f32,
    current: Option<Brush>,
    next: Option<Brush>,
}

pub struct BrushManager {
    slots: Vec<Slot>,
    lift: LiftConfig,
    symmetry: SymmetryConfig,
    max_strokes: usize,
    rng: StdRng,
}

impl BrushManager {
    pub fn new(specs: &[SlotSpec], seed: u64) -> Self {
        let slots = specs
            .iter()
            .map(|spec| Slot {
                name: spec.name,
                lateral_offset: spec.lateral_offset,
                distance: spec.distance,
                current: None,
                next: None,
            })
            .collect();
        Self {
            slots,
            lift: LiftConfig::default(),
            symmetry: SymmetryConfig::default(),
            max_strokes: DEFAULT_MAX_STROKES,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_lift(&mut self, lift: LiftConfig) {
        self.lift = lift;
    }

    pub fn set_symmetry(&mut self, symmetry: SymmetryConfig) {
        self.symmetry = symmetry;
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_name(&self, index: usize) -> Option<&'static str> {
        self.slots.get(index).map(|s| s.name)
    }

    /// Kind of the slot's current brush, if any.
    pub fn slot_kind(&self, index: usize) -> Option<BrushKind> {
        self.slots
            .get(index)
            .and_then(|s| s.current.as_ref())
            .map(|b| b.kind())
    }

    /// Kind of the fading-in brush during a crossfade.
    pub fn pending_kind(&self, index: usize) -> Option<BrushKind> {
        self.slots
            .get(index)
            .and_then(|s| s.next.as_ref())
            .map(|b| b.kind())
    }

    pub fn slot_brush(&self, index: usize) -> Option<&Brush> {
        self.slots.get(index).and_then(|s| s.current.as_ref())
    }

    pub fn pending_brush(&self, index: usize) -> Option<&Brush> {
        self.slots.get(index).and_then(|s| s.next.as_ref())
    }

    /// Assign a brush kind to a slot, beginning a crossfade when the slot
    /// already hosts a different kind. Reassigning the kind already current
    /// (or already fading in) is a no-op; a third kind mid-fade replaces the
    /// pending brush rather than queueing behind it.
    pub fn assign_brush(&mut self, index: usize, kind: BrushKind, backend: &mut dyn VisualBackend) {
        {
            let Some(slot) = self.slots.get(index) else {
                log::debug!("ignoring brush assignment to out-of-range slot {index}");
                return;
            };
            let current_kind = slot.current.as_ref().map(|b| b.kind());
            let pending_kind = slot.next.as_ref().map(|b| b.kind());
            // The current kind stays the slot's kind until promotion, so
            // re-requesting it is a no-op even while a crossfade is running.
            if pending_kind == Some(kind) || current_kind == Some(kind) {
                return;
            }
        }

        let seed = (index as f32 + 1.0) * 3.3 + self.rng.gen::<f32>() * 4.0;
        let hue_shift = SLOT_HUE_SHIFTS[index % SLOT_HUE_SHIFTS.len()];
        let slot = &mut self.slots[index];

        if slot.current.is_none() {
            slot.current = Some(Brush::new(kind, seed, hue_shift, self.max_strokes, 1.0));
            log::info!("slot '{}' hosts {}", slot.name, kind.name());
            return;
        }

        // Replace semantics: a pending brush that lost the race releases its
        // strokes immediately instead of being queued.
        if let Some(mut stale) = slot.next.take() {
            stale.dispose(backend);
            log::debug!(
                "slot '{}' dropped pending {} for {}",
                slot.name,
                stale.kind().name(),
                kind.name()
            );
        }

        let mut incoming = Brush::new(kind, seed, hue_shift, self.max_strokes, 0.0);
        incoming.set_target_weight(1.0);
        slot.next = Some(incoming);
        if let Some(current) = slot.current.as_mut() {
            current.set_target_weight(0.0);
        }
        log::info!("slot '{}' crossfading to {}", slot.name, kind.name());
    }

    /// Stringly entry point used by catalogs and control surfaces; unknown
    /// names are silently ignored (surfaced only at debug level).
    pub fn assign_brush_by_name(
        &mut self,
        index: usize,
        name: &str,
        backend: &mut dyn VisualBackend,
    ) {
        match BrushKind::from_name(name) {
            Some(kind) => self.assign_brush(index, kind, backend),
            None => log::debug!("ignoring unknown brush kind '{name}'"),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        bands: &AudioBands,
        time: f32,
        dt: f32,
        viewer_pos: Vec3,
        forward: Vec3,
        right: Vec3,
        up: Vec3,
        backend: &mut dyn VisualBackend,
    ) {
        let lift =
            bands.mid * self.lift.mid - bands.low * self.lift.low + bands.energy * self.lift.energy;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let base = viewer_pos + forward * (slot.distance + lift);

            let phase = 0.5
                + 0.5 * (time * self.symmetry.phase_rate + index as f32 * 1.7).sin();
            let signal = self.symmetry.phase_weight * phase
                + self.symmetry.high_weight * bands.high
                + self.symmetry.energy_weight * bands.energy;
            let replicas: usize = if signal > self.symmetry.threshold_five {
                5
            } else if signal > self.symmetry.threshold_three {
                3
            } else {
                1
            };

            let mut frames: SmallVec<[PlacementFrame; 5]> = SmallVec::new();
            for r in 0..replicas {
                let rot = Quat::from_axis_angle(forward, r as f32 * TAU / replicas as f32);
                let r_right = rot * right;
                let r_up = rot * up;
                frames.push(PlacementFrame {
                    origin: base + r_right * slot.lateral_offset.x + r_up * slot.lateral_offset.y,
                    forward,
                    right: r_right,
                    up: r_up,
                });
            }

            if let Some(current) = slot.current.as_mut() {
                for frame in &frames {
                    current.update(bands, time, dt, frame, backend);
                    if let Some(next) = slot.next.as_mut() {
                        next.update(bands, time, dt, frame, backend);
                    }
                }
            }

            let promote = slot
                .current
                .as_ref()
                .is_some_and(|c| c.is_faded_out())
                && slot.next.is_some();
            if promote {
                if let Some(mut retired) = slot.current.take() {
                    retired.dispose(backend);
                }
                slot.current = slot.next.take();
                if let Some(current) = slot.current.as_ref() {
                    log::debug!("slot '{}' promoted {}", slot.name, current.kind().name());
                }
            }
        }
    }

    /// Release every brush and pending brush. Idempotent.
    pub fn dispose(&mut self, backend: &mut dyn VisualBackend) {
        for slot in &mut self.slots {
            if let Some(mut brush) = slot.current.take() {
                brush.dispose(backend);
            }
            if let Some(mut brush) = slot.next.take() {
                brush.dispose(backend);
            }
        }
    }
}
