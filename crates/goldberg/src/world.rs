//! Contract of the external rigid body solver.
//!
//! The crate only builds the body/shape/joint graph; integration,
//! collision response and constraint solving all live behind
//! [`PhysicsWorld`]. Handles are plain indices so adapters for real
//! engines can mint them however they like.

use crate::math::{point::Point, size::Size, vector::Vector, FloatNum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Dynamic,
    Kinematic,
}

/// moment of inertia policy for a dynamic body
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Moment {
    /// derive from the attached shape's geometry and the body mass
    FromGeometry,
    /// explicit override
    Value(FloatNum),
    /// rotation suppressed entirely
    Infinite,
}

#[derive(Clone, Debug)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub position: Point,
    pub mass: FloatNum,
    pub moment: Moment,
}

impl BodyDef {
    pub fn fixed(position: impl Into<Point>) -> Self {
        Self {
            kind: BodyKind::Static,
            position: position.into(),
            mass: FloatNum::INFINITY,
            moment: Moment::Infinite,
        }
    }

    pub fn dynamic(position: impl Into<Point>, mass: FloatNum) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position: position.into(),
            mass,
            moment: Moment::FromGeometry,
        }
    }

    pub fn moment(mut self, moment: Moment) -> Self {
        self.moment = moment;
        self
    }
}

/// shape geometry, expressed in the owning body's local frame
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Circle { radius: FloatNum },
    Box { size: Size },
    Segment {
        start: Point,
        end: Point,
        thickness: FloatNum,
    },
    ConvexPolygon { vertices: Vec<Point> },
}

impl Geometry {
    /// moment of inertia of this geometry carrying `mass`, about the
    /// body origin
    pub fn moment_of_inertia(&self, mass: FloatNum) -> FloatNum {
        match self {
            Geometry::Circle { radius } => mass * radius.powi(2) * 0.5,
            Geometry::Box { size } => {
                mass * (size.width().powi(2) + size.height().powi(2)) / 12.
            }
            Geometry::Segment { start, end, .. } => {
                let length = start.distance(end);
                let offset = start.midpoint(end).to_vector().abs();
                mass * (length.powi(2) / 12. + offset.powi(2))
            }
            Geometry::ConvexPolygon { vertices } => moment_for_polygon(mass, vertices),
        }
    }
}

fn moment_for_polygon(mass: FloatNum, vertices: &[Point]) -> FloatNum {
    if vertices.len() < 3 {
        return 0.;
    }

    let mut numerator = 0.;
    let mut denominator = 0.;
    for i in 0..vertices.len() {
        let v1 = vertices[i].to_vector();
        let v2 = vertices[(i + 1) % vertices.len()].to_vector();
        let cross = (v1 ^ v2).abs();
        numerator += cross * (v1 * v1 + v1 * v2 + v2 * v2);
        denominator += cross;
    }

    mass * numerator / (6. * denominator)
}

/// collision category used to exempt certain pairs from gameplay
/// significant contact handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollisionTag(pub u32);

impl CollisionTag {
    pub const BALL: CollisionTag = CollisionTag(0);
    pub const DOMINO: CollisionTag = CollisionTag(1);
}

#[derive(Clone, Debug)]
pub struct ShapeDef {
    pub geometry: Geometry,
    pub friction: FloatNum,
    pub elasticity: FloatNum,
    pub tag: Option<CollisionTag>,
}

impl ShapeDef {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            friction: 0.5,
            elasticity: 0.2,
            tag: None,
        }
    }

    pub fn friction(mut self, friction: FloatNum) -> Self {
        self.friction = friction;
        self
    }

    pub fn elasticity(mut self, elasticity: FloatNum) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn tag(mut self, tag: CollisionTag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// joint anchors are always local to the body they belong to, so they
/// stay valid as the bodies move and rotate
#[derive(Clone, Debug)]
pub enum JointDef {
    /// both anchors coincide in world space, rotation stays free
    Pivot {
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Point,
        anchor_b: Point,
    },
    /// `anchor_b` slides along the segment fixed in `body_a`'s frame
    Groove {
        body_a: BodyHandle,
        body_b: BodyHandle,
        groove_start: Point,
        groove_end: Point,
        anchor_b: Point,
    },
    /// distance between the two anchors stays inside `limits`; equal
    /// bounds behave as a rigid pin
    Pin {
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Point,
        anchor_b: Point,
        limits: (FloatNum, FloatNum),
    },
}

impl JointDef {
    /// rigid pin with a fixed rest distance
    pub fn pin(
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Point,
        anchor_b: Point,
        rest_distance: FloatNum,
    ) -> Self {
        JointDef::Pin {
            body_a,
            body_b,
            anchor_a,
            anchor_b,
            limits: (rest_distance, rest_distance),
        }
    }
}

pub trait PhysicsWorld {
    /// the implicit static body every world carries, used as the fixed
    /// side of world anchored joints
    fn ground(&self) -> BodyHandle;

    fn create_body(&mut self, def: BodyDef) -> BodyHandle;

    fn create_shape(&mut self, body: BodyHandle, def: ShapeDef) -> ShapeHandle;

    fn create_joint(&mut self, def: JointDef) -> JointHandle;

    fn set_gravity(&mut self, gravity: Vector);

    fn set_damping(&mut self, damping: FloatNum);

    fn set_solver_iterations(&mut self, iterations: u32);

    fn step(&mut self, delta_time: FloatNum);
}
