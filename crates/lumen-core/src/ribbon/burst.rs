//! Timed mine markers and their particle bursts.
//!
//! A mine is a short-lived point entity dropped near the live draw point
//! when the audio is energetic; after a fixed fuse it is destroyed and
//! replaced by a radial burst of particles with a horizontal-biased cone of
//! initial velocities, exponential drag and a linear opacity/scale decay.

use glam::{Quat, Vec3};
use rand::prelude::*;
use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::audio::AudioBands;
use crate::backend::{GeometryDesc, MaterialDesc, VisualBackend, VisualHandle};
use crate::constants::*;
use crate::math::lerp;

struct Mine {
    handle: VisualHandle,
    position: Vec3,
    fuse_remaining: f32,
}

struct Particle {
    handle: VisualHandle,
    position: Vec3,
    velocity: Vec3,
    age: f32,
    base_scale: f32,
    base_opacity: f32,
    material: MaterialDesc,
}

pub(crate) struct BurstField {
    mines: Vec<Mine>,
    // Particles are appended at birth and age uniformly, so the deque stays
    // ordered oldest-first: expiry pops a front prefix and the size cap
    // evicts the front.
    particles: VecDeque<Particle>,
    accum: f32,
    rng: StdRng,
}

impl BurstField {
    pub fn new(seed: u64) -> Self {
        Self {
            mines: Vec::new(),
            particles: VecDeque::new(),
            accum: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn update(
        &mut self,
        bands: &AudioBands,
        dt: f32,
        draw_pos: Vec3,
        backend: &mut dyn VisualBackend,
    ) {
        if bands.energy > MINE_ENERGY_GATE {
            let rate = lerp(MINE_RATE_MIN, MINE_RATE_MAX, bands.energy.clamp(0.0, 1.0));
            self.accum += dt * rate;
            while self.accum >= 1.0 {
                self.accum -= 1.0;
                self.spawn_mine(draw_pos, backend);
            }
        }

        let mut i = 0;
        while i < self.mines.len() {
            self.mines[i].fuse_remaining -= dt;
            if self.mines[i].fuse_remaining <= 0.0 {
                let mine = self.mines.swap_remove(i);
                backend.destroy(mine.handle);
                self.burst(mine.position, bands.energy, backend);
            } else {
                i += 1;
            }
        }

        while self
            .particles
            .front()
            .is_some_and(|p| p.age + dt >= PARTICLE_TTL_SECS)
        {
            if let Some(spent) = self.particles.pop_front() {
                backend.destroy(spent.handle);
            }
        }

        let drag = (-PARTICLE_DRAG * dt).exp();
        for particle in &mut self.particles {
            particle.age += dt;
            particle.velocity *= drag;
            particle.position += particle.velocity * dt;
            let life = 1.0 - particle.age / PARTICLE_TTL_SECS;
            backend.set_transform(
                particle.handle,
                particle.position,
                Vec3::splat(particle.base_scale * life),
                Quat::IDENTITY,
            );
            let mut material = particle.material;
            material.opacity = particle.base_opacity * life;
            backend.set_material(particle.handle, &material);
        }
    }

    fn spawn_mine(&mut self, draw_pos: Vec3, backend: &mut dyn VisualBackend) {
        let position = draw_pos
            + Vec3::new(
                (self.rng.gen::<f32>() - 0.5) * 0.16,
                (self.rng.gen::<f32>() - 0.5) * 0.12,
                (self.rng.gen::<f32>() - 0.5) * 0.16,
            );
        let material = MaterialDesc {
            color: [0.1, 0.1, 0.12],
            emissive: [0.9, 0.4, 0.2],
            emissive_intensity: 0.5,
            opacity: 0.7,
            roughness: 0.3,
            metalness: 0.1,
            transparent: true,
            depth_write: false,
        };
        let handle = backend.create_visual(&GeometryDesc::Sphere { radius: 1.0 }, &material);
        backend.set_transform(handle, position, Vec3::splat(0.02), Quat::IDENTITY);
        self.mines.push(Mine {
            handle,
            position,
            fuse_remaining: MINE_FUSE_SECS,
        });
        log::debug!("mine armed at {position:?}");
    }

    fn burst(&mut self, position: Vec3, energy: f32, backend: &mut dyn VisualBackend) {
        let material = MaterialDesc {
            color: [1.0, 0.95, 0.85],
            emissive: [1.0, 0.8, 0.5],
            emissive_intensity: 0.8,
            opacity: 1.0,
            roughness: 0.2,
            metalness: 0.0,
            transparent: true,
            depth_write: false,
        };
        for _ in 0..BURST_PARTICLES {
            if self.particles.len() >= MAX_PARTICLES {
                if let Some(oldest) = self.particles.pop_front() {
                    backend.destroy(oldest.handle);
                }
            }
            let angle = self.rng.gen::<f32>() * TAU;
            let horizontal = 0.35 + self.rng.gen::<f32>() * 0.5 + energy * 0.4;
            let vertical = (self.rng.gen::<f32>() - 0.3) * 0.25;
            let velocity = Vec3::new(angle.cos() * horizontal, vertical, angle.sin() * horizontal);
            let base_scale = 0.012 + self.rng.gen::<f32>() * 0.01;
            let base_opacity = 0.5 + energy * 0.3;
            let handle = backend.create_visual(&GeometryDesc::Sphere { radius: 1.0 }, &material);
            backend.set_transform(handle, position, Vec3::splat(base_scale), Quat::IDENTITY);
            self.particles.push_back(Particle {
                handle,
                position,
                velocity,
                age: 0.0,
                base_scale,
                base_opacity,
                material,
            });
        }
    }

    /// Destroy every mine and particle. Idempotent.
    pub fn dispose(&mut self, backend: &mut dyn VisualBackend) {
        for mine in self.mines.drain(..) {
            backend.destroy(mine.handle);
        }
        for particle in self.particles.drain(..) {
            backend.destroy(particle.handle);
        }
        self.accum = 0.0;
    }
}
