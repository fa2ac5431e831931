//! Driver tests: world tuning application and frame ordering.

mod common;

use approx::assert_relative_eq;
use common::RecordingWorld;
use goldberg::prelude::*;

#[test]
fn world_parameters_are_applied_up_front() {
    let config = SimulationConfigBuilder::default()
        .gravity([0., 981.])
        .damping(0.95)
        .solver_iterations(30)
        .delta_time(1. / 120.)
        .build()
        .unwrap();

    let simulation = Simulation::new(RecordingWorld::default(), config).unwrap();
    let world = simulation.world();

    assert_eq!(world.gravity, Some(Vector::new(0., 981.)));
    assert_eq!(world.damping, Some(0.95));
    assert_eq!(world.solver_iterations, Some(30));
    assert!(world.steps.is_empty());
}

#[test]
fn out_of_range_tuning_fails_before_the_loop() {
    let bad_damping = SimulationConfigBuilder::default()
        .damping(1.5)
        .build()
        .unwrap();
    assert!(matches!(
        Simulation::new(RecordingWorld::default(), bad_damping),
        Err(Error::InvalidDamping(_))
    ));

    let bad_dt = SimulationConfigBuilder::default()
        .delta_time(0.)
        .build()
        .unwrap();
    assert!(matches!(
        Simulation::new(RecordingWorld::default(), bad_dt),
        Err(Error::NonPositive { .. })
    ));

    let bad_iterations = SimulationConfigBuilder::default()
        .solver_iterations(0)
        .build()
        .unwrap();
    assert!(matches!(
        Simulation::new(RecordingWorld::default(), bad_iterations),
        Err(Error::ZeroSolverIterations)
    ));
}

struct CountingRenderer {
    steps_seen_at_draw: Vec<usize>,
}

impl Renderer<RecordingWorld> for CountingRenderer {
    fn draw(&mut self, world: &RecordingWorld) {
        self.steps_seen_at_draw.push(world.steps.len());
    }
}

#[test]
fn each_frame_steps_once_then_draws() {
    let mut simulation =
        Simulation::new(RecordingWorld::default(), SimulationConfig::default()).unwrap();
    let mut renderer = CountingRenderer {
        steps_seen_at_draw: Vec::new(),
    };

    let mut frames = 0;
    simulation.run(&mut renderer, || {
        frames += 1;
        if frames > 3 {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        }
    });

    // three frames ran, each drawn after exactly one more step
    assert_eq!(renderer.steps_seen_at_draw, vec![1, 2, 3]);
    assert_eq!(simulation.world().steps.len(), 3);
    for &dt in &simulation.world().steps {
        assert_relative_eq!(dt, 1. / 60.);
    }
}
