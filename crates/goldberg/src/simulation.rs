//! Fixed-timestep driver around the external world handle.

use derive_builder::Builder;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ensure_positive, Error, Result},
    math::FloatNum,
    world::PhysicsWorld,
};

/// World-level tuning, part of the per-scene description. Rope chains
/// with many links need more solver iterations to avoid visible
/// stretch, so the iteration count is not a global constant.
#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(pattern = "immutable")]
#[serde(default)]
pub struct SimulationConfig {
    /// downward positive in screen coordinates
    #[builder(default = "[0., 981.]")]
    pub gravity: [FloatNum; 2],
    /// per-step velocity damping applied to every dynamic body
    #[builder(default = "0.99")]
    pub damping: FloatNum,
    #[builder(default = "10")]
    pub solver_iterations: u32,
    #[builder(default = "1. / 60.")]
    pub delta_time: FloatNum,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: [0., 981.],
            damping: 0.99,
            solver_iterations: 10,
            delta_time: 1. / 60.,
        }
    }
}

/// Read-only observer invoked once per frame, after the step.
pub trait Renderer<W> {
    fn draw(&mut self, world: &W);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Owns the world handle and advances it one fixed `delta_time` at a
/// time. Real-time best effort: wall-clock drift is not compensated.
pub struct Simulation<W: PhysicsWorld> {
    world: W,
    config: SimulationConfig,
}

impl<W: PhysicsWorld> Simulation<W> {
    /// Apply the world-level parameters and wrap the handle. Fails
    /// fast on out-of-range tuning, before the loop ever runs.
    pub fn new(mut world: W, config: SimulationConfig) -> Result<Self> {
        ensure_positive("simulation delta time", config.delta_time)?;
        if !(config.damping > 0. && config.damping <= 1.) {
            return Err(Error::InvalidDamping(config.damping));
        }
        if config.solver_iterations == 0 {
            return Err(Error::ZeroSolverIterations);
        }

        world.set_gravity(config.gravity.into());
        world.set_damping(config.damping);
        world.set_solver_iterations(config.solver_iterations);

        Ok(Self { world, config })
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Advance the world by exactly one fixed timestep.
    pub fn step(&mut self) {
        self.world.step(self.config.delta_time);
    }

    /// Run the loop until `poll_input` asks to quit. Within a frame
    /// the queued input is drained first, the step completes fully,
    /// and only then is the frame drawn.
    pub fn run(
        &mut self,
        renderer: &mut impl Renderer<W>,
        mut poll_input: impl FnMut() -> ControlFlow,
    ) {
        debug!("simulation loop started, dt {}", self.config.delta_time);
        loop {
            if poll_input() == ControlFlow::Quit {
                break;
            }
            self.step();
            renderer.draw(&self.world);
        }
        debug!("simulation loop terminated");
    }
}
