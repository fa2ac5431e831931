//! Scene assembly: walk a [`SceneConfig`] in order, invoke the
//! primitive builders and wire the cross-mechanism joints.
//!
//! A joint may only reference a mechanism that was already built, so
//! forward references fail fast with
//! [`Error::UnknownMechanism`](crate::error::Error::UnknownMechanism)
//! instead of producing a half-wired contraption. Assembly is
//! all-or-nothing and runs once, before the loop starts.

pub mod config;

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    error::{ensure_positive, Error, Result},
    math::{point::Point, size::Size},
    mechanism::{
        self,
        rope::{self, Rope, RopeAnchor},
        DominoRow, Lever,
    },
    path,
    world::{BodyHandle, BodyKind, JointDef, PhysicsWorld},
};

use config::{Attachment, MechanismConfig, PathSection, SceneConfig};

/// registry entry for a named mechanism
#[derive(Clone, Copy, Debug)]
struct Built {
    body: BodyHandle,
    kind: BodyKind,
    position: Point,
    /// world tip position, only levers have one
    tip: Option<Point>,
}

/// The assembled contraption. Owns the handle table; the bodies,
/// shapes and joints themselves live in the physics world for the
/// whole run.
#[derive(Default)]
pub struct Scene {
    named: HashMap<String, Built>,
    ropes: HashMap<String, Rope>,
    bodies: Vec<BodyHandle>,
}

impl Scene {
    /// Build every mechanism of `config` into `world`, in order.
    pub fn assemble<W: PhysicsWorld>(world: &mut W, config: &SceneConfig) -> Result<Scene> {
        let mut scene = Scene::default();
        for mechanism_config in &config.mechanisms {
            scene.build_mechanism(world, mechanism_config)?;
        }
        info!(
            "scene assembled: {} mechanisms, {} bodies",
            config.mechanisms.len(),
            scene.bodies.len()
        );
        Ok(scene)
    }

    pub fn body(&self, name: &str) -> Option<BodyHandle> {
        self.named.get(name).map(|built| built.body)
    }

    pub fn rope(&self, name: &str) -> Option<&Rope> {
        self.ropes.get(name)
    }

    /// every body handle the builders returned, in construction order
    pub fn bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    fn build_mechanism<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        config: &MechanismConfig,
    ) -> Result<()> {
        match config {
            MechanismConfig::Boundary { width, height } => {
                let walls = mechanism::build_boundary(world, Size::new(*width, *height))?;
                self.bodies.extend(walls);
            }
            MechanismConfig::Ball {
                name,
                position,
                radius,
                mass,
            } => {
                self.claim_name(name)?;
                let body = mechanism::build_ball(world, *position, *radius, *mass)?;
                self.track(name, body, BodyKind::Dynamic, (*position).into(), None);
            }
            MechanismConfig::Table {
                width,
                surface_y,
                thickness,
            } => {
                let body = mechanism::build_table(world, *width, *surface_y, *thickness)?;
                self.bodies.push(body);
            }
            MechanismConfig::Ramp {
                start,
                end,
                thickness,
            } => {
                let body = mechanism::build_ramp(world, *start, *end, *thickness)?;
                self.bodies.push(body);
            }
            MechanismConfig::Domino {
                position,
                size,
                mass,
                friction,
                elasticity,
            } => {
                let body = mechanism::build_domino(
                    world,
                    *position,
                    (*size).into(),
                    *mass,
                    *friction,
                    *elasticity,
                )?;
                self.bodies.push(body);
            }
            MechanismConfig::DominoRow {
                count,
                start,
                size,
                mass,
                friction,
                elasticity,
                spacing_factor,
            } => {
                let row = DominoRow {
                    count: *count,
                    size: (*size).into(),
                    mass: *mass,
                    friction: *friction,
                    elasticity: *elasticity,
                    spacing_factor: *spacing_factor,
                    start: (*start).into(),
                };
                let dominoes = mechanism::build_domino_row(world, &row)?;
                self.bodies.extend(dominoes);
            }
            MechanismConfig::Lever {
                name,
                start,
                end,
                thickness,
                mass,
            } => {
                self.claim_name(name)?;
                let lever = mechanism::build_lever(world, *start, *end, *thickness, *mass)?;
                self.track_lever(name, lever);
            }
            MechanismConfig::SwingLever {
                name,
                pivot,
                tip,
                thickness,
                mass,
            } => {
                self.claim_name(name)?;
                let lever = mechanism::build_swing_lever(world, *pivot, *tip, *thickness, *mass)?;
                self.track_lever(name, lever);
            }
            MechanismConfig::Guide { position, size } => {
                let body = mechanism::build_guide(world, *position, (*size).into())?;
                self.bodies.push(body);
            }
            MechanismConfig::Funnel { position, size } => {
                let body = mechanism::build_funnel(world, *position, (*size).into())?;
                self.bodies.push(body);
            }
            MechanismConfig::Pulley {
                name,
                position,
                radius,
            } => {
                self.claim_name(name)?;
                let body = mechanism::build_pulley(world, *position, *radius)?;
                self.track(name, body, BodyKind::Static, (*position).into(), None);
            }
            MechanismConfig::Elevator {
                name,
                position,
                size,
                mass,
                travel,
            } => {
                self.claim_name(name)?;
                let body =
                    mechanism::build_elevator(world, *position, (*size).into(), *mass, *travel)?;
                self.track(name, body, BodyKind::Dynamic, (*position).into(), None);
            }
            MechanismConfig::Cart {
                name,
                position,
                size,
                mass,
            } => {
                self.claim_name(name)?;
                let body = mechanism::build_cart(world, *position, (*size).into(), *mass)?;
                self.track(name, body, BodyKind::Dynamic, (*position).into(), None);
            }
            MechanismConfig::Block { position, size } => {
                let body = mechanism::build_block(world, *position, (*size).into())?;
                self.bodies.push(body);
            }
            MechanismConfig::Weight {
                name,
                position,
                size,
                sides,
                mass,
            } => {
                self.claim_name(name)?;
                let body = mechanism::build_weight(world, *position, *size, *sides, *mass)?;
                self.track(name, body, BodyKind::Dynamic, (*position).into(), None);
            }
            MechanismConfig::Rope {
                name,
                path,
                options,
                anchor,
                attach,
            } => {
                self.build_rope(world, name, path, options, anchor, attach)?;
            }
            MechanismConfig::Groove { body, travel } => {
                ensure_positive("groove travel", *travel)?;
                let built = self.resolve(body)?;
                if built.kind != BodyKind::Dynamic {
                    return Err(Error::GrooveOnStaticBody(body.clone()));
                }
                mechanism::constrain_vertical(world, built.body, built.position, *travel);
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_rope<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        name: &Option<String>,
        sections: &[PathSection],
        options: &rope::RopeOptions,
        anchor: &Option<String>,
        attach: &Option<Attachment>,
    ) -> Result<()> {
        self.claim_name(name)?;
        let route = resolve_path(sections)?;

        let anchor = match anchor {
            Some(anchor_name) => {
                let built = self.resolve(anchor_name)?;
                Some(RopeAnchor {
                    body: built.body,
                    position: built.position,
                })
            }
            None => None,
        };

        let rope = rope::build_rope(world, &route, options, anchor)?;
        self.bodies.extend_from_slice(rope.links());

        if let Some(attach) = attach {
            self.attach_rope_tail(world, name, &rope, attach)?;
        }

        if let Some(name) = name {
            self.ropes.insert(name.clone(), rope);
        }
        Ok(())
    }

    /// Pin the free end of `rope` onto another mechanism.
    fn attach_rope_tail<W: PhysicsWorld>(
        &self,
        world: &mut W,
        rope_name: &Option<String>,
        rope: &Rope,
        attach: &Attachment,
    ) -> Result<()> {
        let (Some(tail), Some(tail_position)) = (rope.tail(), rope.tail_position()) else {
            let label = rope_name.clone().unwrap_or_else(|| "<anonymous>".into());
            return Err(Error::EmptyRope(label));
        };

        match attach {
            Attachment::Body { name } => {
                let built = self.resolve(name)?;
                world.create_joint(JointDef::pin(
                    tail,
                    built.body,
                    Point::default(),
                    Point::default(),
                    tail_position.distance(&built.position),
                ));
            }
            Attachment::LeverTip { name } => {
                let built = self.resolve(name)?;
                let tip = built.tip.ok_or_else(|| Error::NoAttachableTip(name.clone()))?;
                // anchor on the beam side is the world tip coordinate
                // converted into the beam's midpoint-centered frame
                let local_tip = (tip - built.position).to_point();
                world.create_joint(JointDef::pin(
                    tail,
                    built.body,
                    Point::default(),
                    local_tip,
                    tail_position.distance(&tip),
                ));
            }
        }
        debug!("rope tail attached: {:?}", attach);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<Built> {
        self.named
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownMechanism(name.into()))
    }

    /// Reject a taken name before any body is created, so a failed
    /// mechanism never leaves partial state behind in the world.
    fn claim_name(&self, name: &Option<String>) -> Result<()> {
        if let Some(name) = name {
            if self.named.contains_key(name) || self.ropes.contains_key(name) {
                return Err(Error::DuplicateName(name.clone()));
            }
        }
        Ok(())
    }

    fn track(
        &mut self,
        name: &Option<String>,
        body: BodyHandle,
        kind: BodyKind,
        position: Point,
        tip: Option<Point>,
    ) {
        self.bodies.push(body);
        if let Some(name) = name {
            self.named.insert(
                name.clone(),
                Built {
                    body,
                    kind,
                    position,
                    tip,
                },
            );
        }
    }

    fn track_lever(&mut self, name: &Option<String>, lever: Lever) {
        self.track(
            name,
            lever.body(),
            BodyKind::Dynamic,
            lever.center(),
            Some(lever.tip()),
        );
    }
}

/// Flatten the configured route sections into one world-space path.
fn resolve_path(sections: &[PathSection]) -> Result<Vec<Point>> {
    let mut route = Vec::new();
    for section in sections {
        match section {
            PathSection::Waypoints { points, max_spacing } => {
                let waypoints: Vec<Point> = points.iter().map(|&p| p.into()).collect();
                match max_spacing {
                    Some(max_spacing) => {
                        route.extend(path::densify(&waypoints, *max_spacing)?);
                    }
                    None => route.extend(waypoints),
                }
            }
            PathSection::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                segments,
            } => {
                route.extend(path::sample_arc(
                    *center,
                    *radius,
                    start_angle.to_radians(),
                    end_angle.to_radians(),
                    *segments,
                )?);
            }
        }
    }
    Ok(route)
}
