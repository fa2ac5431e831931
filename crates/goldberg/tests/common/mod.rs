#![allow(dead_code)]

//! A recording stand-in for the external rigid body solver. It stores
//! every definition it is handed and advances nothing, which is all
//! the assembly layer needs for verification.

use goldberg::prelude::*;

pub const GROUND: BodyHandle = BodyHandle(u32::MAX);

#[derive(Default)]
pub struct RecordingWorld {
    pub bodies: Vec<BodyDef>,
    pub shapes: Vec<(BodyHandle, ShapeDef)>,
    pub joints: Vec<JointDef>,
    pub gravity: Option<Vector>,
    pub damping: Option<FloatNum>,
    pub solver_iterations: Option<u32>,
    pub steps: Vec<FloatNum>,
}

impl RecordingWorld {
    pub fn body(&self, handle: BodyHandle) -> &BodyDef {
        &self.bodies[handle.0 as usize]
    }

    pub fn shapes_of(&self, handle: BodyHandle) -> Vec<&ShapeDef> {
        self.shapes
            .iter()
            .filter(|(owner, _)| *owner == handle)
            .map(|(_, def)| def)
            .collect()
    }

    pub fn pin_joints(&self) -> Vec<&JointDef> {
        self.joints
            .iter()
            .filter(|joint| matches!(joint, JointDef::Pin { .. }))
            .collect()
    }
}

impl PhysicsWorld for RecordingWorld {
    fn ground(&self) -> BodyHandle {
        GROUND
    }

    fn create_body(&mut self, def: BodyDef) -> BodyHandle {
        self.bodies.push(def);
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    fn create_shape(&mut self, body: BodyHandle, def: ShapeDef) -> ShapeHandle {
        self.shapes.push((body, def));
        ShapeHandle(self.shapes.len() as u32 - 1)
    }

    fn create_joint(&mut self, def: JointDef) -> JointHandle {
        self.joints.push(def);
        JointHandle(self.joints.len() as u32 - 1)
    }

    fn set_gravity(&mut self, gravity: Vector) {
        self.gravity = Some(gravity);
    }

    fn set_damping(&mut self, damping: FloatNum) {
        self.damping = Some(damping);
    }

    fn set_solver_iterations(&mut self, iterations: u32) {
        self.solver_iterations = Some(iterations);
    }

    fn step(&mut self, delta_time: FloatNum) {
        self.steps.push(delta_time);
    }
}
