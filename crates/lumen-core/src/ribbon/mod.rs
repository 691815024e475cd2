//! Continuous ribbon trail with frozen history and particle bursts.
//!
//! A short chain of control points chases the live draw position with
//! per-point lag (head most responsive), is resampled through a Catmull-Rom
//! spline each tick, and extruded into a triangle-strip ribbon whose
//! half-width peaks mid-ribbon and breathes with the audio. The live strip
//! mutates one persistent vertex buffer in place; persistence comes from
//! periodic freeze snapshots with decayed material, kept in a bounded FIFO
//! history. A mine/particle subsystem rides along the draw point.

mod burst;
mod spline;

use glam::Vec3;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::f32::consts::PI;

use crate::audio::AudioBands;
use crate::backend::{GeometryDesc, MaterialDesc, VisualBackend, VisualHandle};
use crate::constants::*;
use crate::palette::palette;

use burst::BurstField;

#[derive(Clone, Copy, Debug)]
pub struct RibbonConfig {
    pub samples: usize,
    pub base_half_width: f32,
    pub freeze_interval: f32,
    pub history_max: usize,
    pub hue_shift: f32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            samples: RIBBON_SAMPLES,
            base_half_width: RIBBON_BASE_HALF_WIDTH,
            freeze_interval: RIBBON_FREEZE_INTERVAL,
            history_max: RIBBON_HISTORY_MAX,
            hue_shift: 8.0,
        }
    }
}

pub struct RibbonTrail {
    config: RibbonConfig,
    control: SmallVec<[Vec3; RIBBON_CONTROL_POINTS]>,
    initialized: bool,
    samples_buf: Vec<Vec3>,
    vertices: Vec<Vec3>,
    live: Option<VisualHandle>,
    freeze_accum: f32,
    history: VecDeque<VisualHandle>,
    bursts: BurstField,
}

impl RibbonTrail {
    pub fn new(config: RibbonConfig, seed: u64) -> Self {
        Self {
            config,
            control: SmallVec::new(),
            initialized: false,
            samples_buf: Vec::new(),
            vertices: Vec::new(),
            live: None,
            freeze_accum: 0.0,
            history: VecDeque::new(),
            bursts: BurstField::new(seed),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn mine_count(&self) -> usize {
        self.bursts.mine_count()
    }

    pub fn particle_count(&self) -> usize {
        self.bursts.particle_count()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn update(
        &mut self,
        bands: &AudioBands,
        time: f32,
        dt: f32,
        draw_pos: Vec3,
        backend: &mut dyn VisualBackend,
    ) {
        // A non-finite draw position poisons the whole chain; skip the tick.
        if !draw_pos.is_finite() || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        if !self.initialized {
            self.control.clear();
            for _ in 0..RIBBON_CONTROL_POINTS {
                self.control.push(draw_pos);
            }
            self.initialized = true;
        }

        self.chase(draw_pos, dt);
        self.rebuild_strip(bands, time, backend);
        self.tick_freeze(bands, dt, backend);
        self.bursts.update(bands, dt, draw_pos, backend);
    }

    /// Head chases the draw position, each earlier point chases its
    /// successor; the exp-based alphas keep the lag frame-rate independent.
    fn chase(&mut self, draw_pos: Vec3, dt: f32) {
        let n = self.control.len();
        let alpha_head = 1.0 - (-dt * RIBBON_CHASE_RATES[n - 1]).exp();
        let head_delta = (draw_pos - self.control[n - 1]) * alpha_head;
        self.control[n - 1] += head_delta;
        for i in (0..n - 1).rev() {
            let alpha = 1.0 - (-dt * RIBBON_CHASE_RATES[i]).exp();
            let delta = (self.control[i + 1] - self.control[i]) * alpha;
            self.control[i] += delta;
        }
    }

    fn live_material(&self, bands: &AudioBands) -> MaterialDesc {
        let paint = palette(*bands, self.config.hue_shift, 0.12);
        MaterialDesc {
            color: paint.color,
            emissive: paint.emissive,
            emissive_intensity: 0.5,
            opacity: 0.35 + bands.energy * 0.3,
            roughness: 0.25,
            metalness: 0.1,
            transparent: true,
            depth_write: false,
        }
    }

    fn rebuild_strip(&mut self, bands: &AudioBands, time: f32, backend: &mut dyn VisualBackend) {
        spline::sample_chain(&self.control, self.config.samples, &mut self.samples_buf);
        let count = self.samples_buf.len();
        if count < 2 {
            return;
        }

        self.vertices.resize(count * 2, Vec3::ZERO);
        for (i, point) in self.samples_buf.iter().enumerate() {
            let s = i as f32 / (count - 1) as f32;
            let lateral = spline::lateral_at(&self.samples_buf, i);
            let profile = (PI * s).sin();
            let width = self.config.base_half_width * profile * (1.0 + bands.mid * 1.2);
            let wobble = RIBBON_WOBBLE_AMP * bands.high * (s * 26.0 + time * 9.0).sin();
            let half_width = (width + wobble).max(0.002);
            self.vertices[i * 2] = *point + lateral * half_width;
            self.vertices[i * 2 + 1] = *point - lateral * half_width;
        }

        let material = self.live_material(bands);
        let handle = match self.live {
            Some(handle) => {
                backend.set_material(handle, &material);
                handle
            }
            None => {
                let handle = backend.create_visual(
                    &GeometryDesc::Strip {
                        vertex_count: self.vertices.len(),
                    },
                    &material,
                );
                self.live = Some(handle);
                handle
            }
        };
        backend.write_strip(handle, &self.vertices);
    }

    fn tick_freeze(&mut self, bands: &AudioBands, dt: f32, backend: &mut dyn VisualBackend) {
        if self.live.is_none() {
            return;
        }
        self.freeze_accum += dt;
        while self.freeze_accum >= self.config.freeze_interval {
            self.freeze_accum -= self.config.freeze_interval;
            self.snapshot(bands, backend);
        }
    }

    /// Duplicate the live strip into an immutable history entry with decayed
    /// material, evicting the oldest snapshot beyond the bound.
    fn snapshot(&mut self, bands: &AudioBands, backend: &mut dyn VisualBackend) {
        let mut material = self.live_material(bands);
        material.opacity *= FREEZE_OPACITY_DECAY;
        material.emissive_intensity *= FREEZE_EMISSIVE_DECAY;
        let handle = backend.create_visual(
            &GeometryDesc::Strip {
                vertex_count: self.vertices.len(),
            },
            &material,
        );
        backend.write_strip(handle, &self.vertices);
        self.history.push_back(handle);
        while self.history.len() > self.config.history_max {
            if let Some(oldest) = self.history.pop_front() {
                backend.destroy(oldest);
                log::debug!("ribbon history evicted a snapshot");
            }
        }
    }

    /// Release the live strip, history, mines and particles. Idempotent.
    pub fn dispose(&mut self, backend: &mut dyn VisualBackend) {
        if let Some(live) = self.live.take() {
            backend.destroy(live);
        }
        while let Some(handle) = self.history.pop_front() {
            backend.destroy(handle);
        }
        self.bursts.dispose(backend);
        self.control.clear();
        self.vertices.clear();
        self.freeze_accum = 0.0;
        self.initialized = false;
    }
}
