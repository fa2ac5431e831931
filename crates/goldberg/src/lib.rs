pub mod error;
pub mod math;
pub mod mechanism;
pub mod path;
pub mod scene;
pub mod simulation;
pub mod world;

pub mod prelude {

    pub use super::error::{Error, Result};
    pub use super::math::{point::Point, size::Size, vector::Vector, FloatNum};
    pub use super::mechanism::rope::{Rope, RopeAnchor, RopeOptions, RopeOptionsBuilder};
    pub use super::mechanism::{DominoRow, Lever};
    pub use super::scene::config::{MechanismConfig, PathSection, SceneConfig};
    pub use super::scene::Scene;
    pub use super::simulation::{
        ControlFlow, Renderer, Simulation, SimulationConfig, SimulationConfigBuilder,
    };
    pub use super::world::{
        BodyDef, BodyHandle, BodyKind, CollisionTag, Geometry, JointDef, JointHandle, Moment,
        PhysicsWorld, ShapeDef, ShapeHandle,
    };
}
