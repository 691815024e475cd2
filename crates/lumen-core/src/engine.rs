//! Per-frame orchestrator tying audio input, brushes, ribbon and programs
//! together behind a single `update(dt, pose)` entry point.

use glam::{Quat, Vec3};
use thiserror::Error;

use crate::audio::{AudioBands, AudioFeatureSource};
use crate::backend::VisualBackend;
use crate::constants::RIBBON_DISTANCE;
use crate::manager::{BrushManager, SlotSpec};
use crate::program::{AutoProgramManager, Program};
use crate::ribbon::{RibbonConfig, RibbonTrail};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine requires at least one brush slot")]
    NoSlots,
    #[error("program catalog is empty")]
    EmptyProgramCatalog,
}

/// Viewer position and orientation sampled once per frame.
#[derive(Clone, Copy, Debug)]
pub struct ViewerPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl ViewerPose {
    /// Unit forward/right/up derived from the orientation (right-handed,
    /// camera looking down -Z).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (
            self.orientation * Vec3::NEG_Z,
            self.orientation * Vec3::X,
            self.orientation * Vec3::Y,
        )
    }
}

/// The whole mark-generation engine. Single-threaded: one `update` per
/// rendered frame, variable `dt`, no internal clocks.
pub struct PaintEngine<B: VisualBackend> {
    backend: B,
    manager: BrushManager,
    ribbon: RibbonTrail,
    programs: AutoProgramManager,
    audio: Option<Box<dyn AudioFeatureSource>>,
    capture_enabled: bool,
    time: f32,
    last_bands: AudioBands,
}

impl<B: VisualBackend> PaintEngine<B> {
    pub fn new(
        mut backend: B,
        slots: &[SlotSpec],
        programs: Vec<Program>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        if slots.is_empty() {
            return Err(EngineError::NoSlots);
        }
        if programs.is_empty() {
            return Err(EngineError::EmptyProgramCatalog);
        }
        let mut manager = BrushManager::new(slots, seed);
        let mut programs = AutoProgramManager::new(programs);
        programs.apply_program(0, &mut manager, &mut backend);
        // Derive an independent stream for the burst randomness so brush
        // seeding stays stable if the ribbon is reconfigured.
        let ribbon_seed = seed ^ 0x9E37_79B9_7F4A_7C15;
        Ok(Self {
            backend,
            manager,
            ribbon: RibbonTrail::new(RibbonConfig::default(), ribbon_seed),
            programs,
            audio: None,
            capture_enabled: true,
            time: 0.0,
            last_bands: AudioBands::ZERO,
        })
    }

    /// Build an engine with the default slot rig and program catalog.
    pub fn with_defaults(backend: B, seed: u64) -> Result<Self, EngineError> {
        Self::new(
            backend,
            &crate::manager::default_slots(),
            crate::program::default_programs(),
            seed,
        )
    }

    pub fn set_audio_source(&mut self, source: Box<dyn AudioFeatureSource>) {
        log::info!("audio source attached");
        self.audio = Some(source);
    }

    /// Microphone-capture toggle: while disabled every component sees the
    /// neutral zero reading.
    pub fn set_capture_enabled(&mut self, enabled: bool) {
        self.capture_enabled = enabled;
    }

    pub fn set_auto_cycle_enabled(&mut self, enabled: bool) {
        self.programs.set_enabled(enabled);
    }

    pub fn assign_brush_by_name(&mut self, slot: usize, name: &str) {
        self.manager.assign_brush_by_name(slot, name, &mut self.backend);
    }

    pub fn apply_program(&mut self, index: usize) {
        self.programs
            .apply_program(index, &mut self.manager, &mut self.backend);
    }

    pub fn update(&mut self, dt: f32, pose: ViewerPose) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let bands = if self.capture_enabled {
            self.audio
                .as_mut()
                .map(|source| source.poll().clamped())
                .unwrap_or(AudioBands::ZERO)
        } else {
            AudioBands::ZERO
        };
        self.last_bands = bands;
        self.time += dt;

        let (forward, right, up) = pose.basis();
        self.programs
            .update(dt, bands.energy, &mut self.manager, &mut self.backend);
        self.manager.update(
            &bands,
            self.time,
            dt,
            pose.position,
            forward,
            right,
            up,
            &mut self.backend,
        );

        // Draw distance breathes with the bands, like the slot lift.
        let ribbon_dist = RIBBON_DISTANCE + bands.mid * 0.6 - bands.low * 0.3;
        let draw_pos = pose.position + forward * ribbon_dist;
        self.ribbon
            .update(&bands, self.time, dt, draw_pos, &mut self.backend);
    }

    /// Release every resource the engine created. Idempotent.
    pub fn dispose(&mut self) {
        self.manager.dispose(&mut self.backend);
        self.ribbon.dispose(&mut self.backend);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn manager(&self) -> &BrushManager {
        &self.manager
    }

    pub fn ribbon(&self) -> &RibbonTrail {
        &self.ribbon
    }

    pub fn programs(&self) -> &AutoProgramManager {
        &self.programs
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn last_bands(&self) -> AudioBands {
        self.last_bands
    }
}
