//! Headless driver: runs the paint engine in real time with a scripted
//! audio source and the counting backend, logging per-second statistics.
//! Useful for profiling emission rates and checking the resource bounds
//! without a renderer attached.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use glam::{Quat, Vec3};
use lumen_core::{
    AudioBands, AudioFeatureSource, EnergySmoother, NullBackend, PaintEngine, ViewerPose,
};

/// Slow detuned sinusoid bands fed through the energy smoother, loud enough
/// to exercise crossfades, symmetry and the mine subsystem.
struct ScriptedAudio {
    started: Instant,
    smoother: EnergySmoother,
}

impl ScriptedAudio {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            smoother: EnergySmoother::new(),
        }
    }
}

impl AudioFeatureSource for ScriptedAudio {
    fn poll(&mut self) -> AudioBands {
        let t = self.started.elapsed().as_secs_f32();
        let low = (0.45 + 0.35 * (t * 0.8).sin()).clamp(0.0, 1.0);
        let mid = (0.40 + 0.40 * (t * 1.7 + 1.3).sin()).clamp(0.0, 1.0);
        let high = (0.30 + 0.30 * (t * 3.1 + 2.1).sin()).clamp(0.0, 1.0);
        self.smoother.compose(low, mid, high)
    }
}

/// Damped chase of a slowly orbiting target, like a handheld viewpoint.
struct OrbitRig {
    position: Vec3,
    velocity: Vec3,
}

impl OrbitRig {
    fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 3.2),
            velocity: Vec3::ZERO,
        }
    }

    fn pose(&mut self, t: f32, dt: f32) -> ViewerPose {
        let target = Vec3::new((t * 0.15).sin() * 2.2, 1.6, 3.2 + (t * 0.18).cos() * 2.2);
        let damping = 0.92_f32.powf(dt * 60.0);
        self.velocity = self.velocity * damping + (target - self.position) * (0.15 * dt);
        self.position += self.velocity;
        let yaw = (t * 0.1).sin() * 0.35;
        ViewerPose {
            position: self.position,
            orientation: Quat::from_rotation_y(yaw),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seconds: f32 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()
        .context("run duration must be a number of seconds")?
        .unwrap_or(10.0);

    let mut engine = PaintEngine::with_defaults(NullBackend::new(), 42)?;
    engine.set_audio_source(Box::new(ScriptedAudio::new()));
    log::info!("running for {seconds:.1}s, program '{}'", engine.programs().current_name());

    let mut rig = OrbitRig::new();
    let started = Instant::now();
    let mut last = started;
    let mut next_report = 1.0_f32;

    while started.elapsed().as_secs_f32() < seconds {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;

        let t = started.elapsed().as_secs_f32();
        let pose = rig.pose(t, dt);
        engine.update(dt, pose);

        if t >= next_report {
            next_report += 1.0;
            let backend = engine.backend();
            log::info!(
                "t={t:.1}s program='{}' energy={:.2} live={} created={} freezes={} particles={}",
                engine.programs().current_name(),
                engine.last_bands().energy,
                backend.live_count(),
                backend.created(),
                engine.ribbon().history_len(),
                engine.ribbon().particle_count(),
            );
        }

        thread::sleep(Duration::from_millis(16));
    }

    engine.dispose();
    let backend = engine.backend();
    log::info!(
        "done: created={} destroyed={} leaked={}",
        backend.created(),
        backend.destroyed(),
        backend.live_count()
    );
    Ok(())
}
