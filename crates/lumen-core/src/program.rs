//! Timed macro-programs that reassign slot brushes.

use crate::backend::VisualBackend;
use crate::brush::BrushKind;
use crate::constants::PROGRAM_MAX_COMPRESSION_SECS;
use crate::manager::BrushManager;

/// A named, timed per-slot brush assignment.
#[derive(Clone, Debug)]
pub struct Program {
    pub name: &'static str,
    pub duration: f32,
    pub slots: &'static [BrushKind],
}

/// Static catalog cycled by [`AutoProgramManager`].
pub fn default_programs() -> Vec<Program> {
    use BrushKind::*;
    vec![
        Program {
            name: "ink-bubbles-glow",
            duration: 16.0,
            slots: &[Ink, Bubble, Glow],
        },
        Program {
            name: "minimal-dense",
            duration: 18.0,
            slots: &[Ink, Ink, Glow],
        },
        Program {
            name: "slow-breath",
            duration: 20.0,
            slots: &[Bubble, Ink, Bubble],
        },
        Program {
            name: "tube-storm",
            duration: 17.0,
            slots: &[Tube, Glow, Tube],
        },
    ]
}

/// Cycles a fixed program list, with loud audio shortening (never
/// lengthening) the active program's duration.
pub struct AutoProgramManager {
    programs: Vec<Program>,
    index: usize,
    elapsed: f32,
    enabled: bool,
    max_compression: f32,
}

impl AutoProgramManager {
    pub fn new(programs: Vec<Program>) -> Self {
        Self {
            programs,
            index: 0,
            elapsed: 0.0,
            enabled: true,
            max_compression: PROGRAM_MAX_COMPRESSION_SECS,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_name(&self) -> &'static str {
        self.programs.get(self.index).map_or("", |p| p.name)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn update(
        &mut self,
        dt: f32,
        energy: f32,
        manager: &mut BrushManager,
        backend: &mut dyn VisualBackend,
    ) {
        if !self.enabled || self.programs.is_empty() {
            return;
        }
        self.elapsed += dt;

        let duration = self.programs[self.index].duration
            - self.max_compression * energy.clamp(0.0, 1.0);
        if self.elapsed >= duration {
            self.elapsed = 0.0;
            self.index = (self.index + 1) % self.programs.len();
            self.apply_current(manager, backend);
            log::info!("program advanced to '{}'", self.current_name());
        }
    }

    /// Immediate, non-animated selection for initialization or manual
    /// control; restarts the program timer.
    pub fn apply_program(
        &mut self,
        index: usize,
        manager: &mut BrushManager,
        backend: &mut dyn VisualBackend,
    ) {
        if self.programs.is_empty() {
            return;
        }
        self.index = index % self.programs.len();
        self.elapsed = 0.0;
        self.apply_current(manager, backend);
        log::info!("program applied: '{}'", self.current_name());
    }

    fn apply_current(&self, manager: &mut BrushManager, backend: &mut dyn VisualBackend) {
        for (slot, kind) in self.programs[self.index].slots.iter().enumerate() {
            manager.assign_brush(slot, *kind, backend);
        }
    }
}
