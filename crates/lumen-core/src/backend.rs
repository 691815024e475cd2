//! Opaque rendering boundary.
//!
//! The engine never touches a display tree. It describes geometry and
//! material parameters, requests timed animations declaratively, and holds
//! on to opaque [`VisualHandle`]s that it must eventually destroy. The
//! interpolation engine behind [`AnimationSpec`] is the backend's business.

use fnv::FnvHashSet;
use glam::{Quat, Vec3};

/// Opaque identifier for a visual created by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryDesc {
    /// Low-poly volumetric mark (bubbles, splashes).
    Icosahedron { radius: f32, detail: u32 },
    /// Smooth emissive mark (glow, burst particles).
    Sphere { radius: f32 },
    /// Oriented segment (ink and tube strokes); local Y axis runs along it.
    Cylinder { radius: f32, height: f32 },
    /// Triangle strip whose vertices arrive via [`VisualBackend::write_strip`].
    Strip { vertex_count: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub transparent: bool,
    pub depth_write: bool,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            opacity: 1.0,
            roughness: 0.5,
            metalness: 0.0,
            transparent: false,
            depth_write: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    OutQuad,
    InOutSine,
}

/// Property a timed animation drives toward a target value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationTarget {
    Opacity(f32),
    Position(Vec3),
}

/// Declarative fire-and-forget animation request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub target: AnimationTarget,
    pub duration_secs: f32,
    pub easing: Easing,
    pub looping: bool,
    pub alternate: bool,
}

impl AnimationSpec {
    /// One-shot opacity fade, the most common stroke lifetime request.
    pub fn fade_to(opacity: f32, duration_secs: f32) -> Self {
        Self {
            target: AnimationTarget::Opacity(opacity),
            duration_secs,
            easing: Easing::OutQuad,
            looping: false,
            alternate: false,
        }
    }
}

/// Mesh factory and mutation surface the engine draws through.
pub trait VisualBackend {
    fn create_visual(&mut self, geometry: &GeometryDesc, material: &MaterialDesc) -> VisualHandle;
    fn set_transform(&mut self, handle: VisualHandle, position: Vec3, scale: Vec3, rotation: Quat);
    fn set_material(&mut self, handle: VisualHandle, material: &MaterialDesc);
    /// In-place vertex upload for [`GeometryDesc::Strip`] visuals.
    fn write_strip(&mut self, handle: VisualHandle, vertices: &[Vec3]);
    fn attach_animation(&mut self, handle: VisualHandle, spec: &AnimationSpec);
    fn destroy(&mut self, handle: VisualHandle);
}

/// Backend that allocates handles and tracks the live set without rendering
/// anything. Used by the headless driver and by every test that checks the
/// bounded-resource invariants.
#[derive(Debug, Default)]
pub struct NullBackend {
    next_id: u64,
    live: FnvHashSet<VisualHandle>,
    created: u64,
    destroyed: u64,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    pub fn is_live(&self, handle: VisualHandle) -> bool {
        self.live.contains(&handle)
    }
}

impl VisualBackend for NullBackend {
    fn create_visual(&mut self, _geometry: &GeometryDesc, _material: &MaterialDesc) -> VisualHandle {
        let handle = VisualHandle(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.live.insert(handle);
        handle
    }

    fn set_transform(&mut self, _handle: VisualHandle, _position: Vec3, _scale: Vec3, _rotation: Quat) {}

    fn set_material(&mut self, _handle: VisualHandle, _material: &MaterialDesc) {}

    fn write_strip(&mut self, _handle: VisualHandle, _vertices: &[Vec3]) {}

    fn attach_animation(&mut self, _handle: VisualHandle, _spec: &AnimationSpec) {}

    fn destroy(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle) {
            self.destroyed += 1;
        }
    }
}
