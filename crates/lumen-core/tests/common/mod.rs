#![allow(dead_code)]

use std::collections::HashSet;

use glam::{Quat, Vec3};
use lumen_core::{
    AnimationSpec, AudioBands, GeometryDesc, MaterialDesc, VisualBackend, VisualHandle,
};

pub fn bands(low: f32, mid: f32, high: f32, energy: f32) -> AudioBands {
    AudioBands {
        low,
        mid,
        high,
        energy,
    }
}

/// Backend double that records every call so tests can check transform
/// finiteness and handle lifecycles, not just counts.
#[derive(Default)]
pub struct RecordingBackend {
    next_id: u64,
    pub live: HashSet<VisualHandle>,
    pub created: u64,
    pub destroyed: u64,
    pub positions: Vec<Vec3>,
    pub strip_writes: Vec<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl VisualBackend for RecordingBackend {
    fn create_visual(&mut self, _geometry: &GeometryDesc, _material: &MaterialDesc) -> VisualHandle {
        let handle = VisualHandle(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.live.insert(handle);
        handle
    }

    fn set_transform(&mut self, _handle: VisualHandle, position: Vec3, _scale: Vec3, _rotation: Quat) {
        self.positions.push(position);
    }

    fn set_material(&mut self, _handle: VisualHandle, _material: &MaterialDesc) {}

    fn write_strip(&mut self, _handle: VisualHandle, vertices: &[Vec3]) {
        self.strip_writes.push(vertices.len());
    }

    fn attach_animation(&mut self, _handle: VisualHandle, _spec: &AnimationSpec) {}

    fn destroy(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle) {
            self.destroyed += 1;
        }
    }
}
