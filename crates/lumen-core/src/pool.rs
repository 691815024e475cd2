//! Bounded FIFO container for emitted strokes.

use std::collections::VecDeque;

use crate::backend::{VisualBackend, VisualHandle};

/// A persistent visual mark owned by exactly one pool until eviction.
#[derive(Clone, Copy, Debug)]
pub struct Stroke {
    pub handle: VisualHandle,
}

/// Ordered stroke container with push-back insertion and oldest-first
/// eviction. Bounds memory regardless of emission rate: evicted and
/// disposed strokes always release their backend handle.
pub struct StrokePool {
    strokes: VecDeque<Stroke>,
    max_strokes: usize,
}

impl StrokePool {
    pub fn new(max_strokes: usize) -> Self {
        Self {
            strokes: VecDeque::with_capacity(max_strokes.min(64)),
            max_strokes,
        }
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_strokes
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    pub fn push(&mut self, stroke: Stroke, backend: &mut dyn VisualBackend) {
        self.strokes.push_back(stroke);
        while self.strokes.len() > self.max_strokes {
            if let Some(old) = self.strokes.pop_front() {
                backend.destroy(old.handle);
            }
        }
    }

    /// Release every pooled stroke. Idempotent.
    pub fn dispose(&mut self, backend: &mut dyn VisualBackend) {
        while let Some(stroke) = self.strokes.pop_front() {
            backend.destroy(stroke.handle);
        }
    }
}
