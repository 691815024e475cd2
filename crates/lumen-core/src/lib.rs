//! Core engine for lumenbrush: procedural, audio-reactive stroke painting.
//!
//! The engine turns a per-frame audio-band reading and a viewer pose into
//! persistent visual marks: pooled brush strokes emitted in front of the
//! viewer, a continuous ribbon trail with a frozen history, and timed
//! mine/particle bursts. Everything here is platform-free; rendering goes
//! through the opaque [`VisualBackend`] trait and audio capture through
//! [`AudioFeatureSource`], so the whole crate runs (and is tested) on the
//! host without a GPU or a microphone.

pub mod audio;
pub mod backend;
pub mod brush;
pub mod constants;
pub mod engine;
pub mod manager;
pub mod math;
pub mod palette;
pub mod pool;
pub mod program;
pub mod ribbon;

pub use audio::{AudioBands, AudioFeatureSource, EnergySmoother};
pub use backend::{
    AnimationSpec, AnimationTarget, Easing, GeometryDesc, MaterialDesc, NullBackend,
    VisualBackend, VisualHandle,
};
pub use brush::{Brush, BrushKind, PlacementFrame};
pub use engine::{EngineError, PaintEngine, ViewerPose};
pub use manager::{default_slots, BrushManager, LiftConfig, SlotSpec, SymmetryConfig};
pub use palette::{palette, Paint};
pub use pool::{Stroke, StrokePool};
pub use program::{default_programs, AutoProgramManager, Program};
pub use ribbon::{RibbonConfig, RibbonTrail};
