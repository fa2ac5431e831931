//! Rope discretization: turn a path into a chain of linked point
//! masses.
//!
//! Each pair of consecutive links is pinned at the Euclidean distance
//! measured between their initial positions, never at a nominal
//! segment length. That keeps the resting chain exactly on the
//! supplied path with zero slack whatever the point spacing is, so
//! callers may feed straight runs, arcs and dense interpolations
//! interchangeably.

use derive_builder::Builder;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ensure_positive, Result},
    math::{point::Point, FloatNum},
    world::{BodyDef, BodyHandle, Geometry, JointDef, PhysicsWorld, ShapeDef},
};

#[derive(Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(pattern = "immutable")]
#[serde(default)]
pub struct RopeOptions {
    #[builder(default = "0.1")]
    pub link_mass: FloatNum,
    #[builder(default = "3.")]
    pub link_radius: FloatNum,
    /// rope rubs rather than bounces
    #[builder(default = "0.9")]
    pub friction: FloatNum,
    #[builder(default = "0.1")]
    pub elasticity: FloatNum,
}

impl Default for RopeOptions {
    fn default() -> Self {
        Self {
            link_mass: 0.1,
            link_radius: 3.,
            friction: 0.9,
            elasticity: 0.1,
        }
    }
}

/// A body the head of a rope hangs from, with its world position at
/// construction time.
#[derive(Clone, Copy, Debug)]
pub struct RopeAnchor {
    pub body: BodyHandle,
    pub position: Point,
}

/// Ordered chain of point-mass links.
#[derive(Clone, Debug, Default)]
pub struct Rope {
    links: Vec<BodyHandle>,
    tail_position: Option<Point>,
}

impl Rope {
    pub fn links(&self) -> &[BodyHandle] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn head(&self) -> Option<BodyHandle> {
        self.links.first().copied()
    }

    /// free end of the chain, the one callers attach to other
    /// mechanisms
    pub fn tail(&self) -> Option<BodyHandle> {
        self.links.last().copied()
    }

    pub fn tail_position(&self) -> Option<Point> {
        self.tail_position
    }
}

/// Build a chain of point masses along `path`, optionally hanging the
/// first link from `anchor`.
///
/// A path of length zero or one yields no inter-link joints; that is a
/// degenerate but non-fatal chain.
pub fn build_rope(
    world: &mut impl PhysicsWorld,
    path: &[Point],
    options: &RopeOptions,
    anchor: Option<RopeAnchor>,
) -> Result<Rope> {
    ensure_positive("rope link mass", options.link_mass)?;
    ensure_positive("rope link radius", options.link_radius)?;

    let mut links = Vec::with_capacity(path.len());
    let mut previous: Option<(BodyHandle, Point)> = None;

    for &position in path {
        let link = world.create_body(BodyDef::dynamic(position, options.link_mass));
        world.create_shape(
            link,
            ShapeDef::new(Geometry::Circle {
                radius: options.link_radius,
            })
            .friction(options.friction)
            .elasticity(options.elasticity),
        );

        match previous {
            None => {
                if let Some(anchor) = anchor {
                    world.create_joint(JointDef::pin(
                        anchor.body,
                        link,
                        Point::default(),
                        Point::default(),
                        anchor.position.distance(&position),
                    ));
                }
            }
            Some((previous_link, previous_position)) => {
                world.create_joint(JointDef::pin(
                    previous_link,
                    link,
                    Point::default(),
                    Point::default(),
                    previous_position.distance(&position),
                ));
            }
        }

        links.push(link);
        previous = Some((link, position));
    }

    debug!("rope of {} links built", links.len());

    Ok(Rope {
        links,
        tail_position: path.last().copied(),
    })
}
