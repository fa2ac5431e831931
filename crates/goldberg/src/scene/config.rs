//! Data description of a contraption.
//!
//! A scene is a list of mechanisms in dependency order plus the world
//! tuning. Swapping the description changes the contraption without
//! touching any builder code, and a tuned variant is a different value
//! of this type, not a code fork.

use serde::{Deserialize, Serialize};

use crate::{math::FloatNum, mechanism::rope::RopeOptions, simulation::SimulationConfig};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub mechanisms: Vec<MechanismConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MechanismConfig {
    Boundary {
        width: FloatNum,
        height: FloatNum,
    },
    Ball {
        #[serde(default)]
        name: Option<String>,
        position: [FloatNum; 2],
        radius: FloatNum,
        mass: FloatNum,
    },
    Table {
        width: FloatNum,
        surface_y: FloatNum,
        #[serde(default = "default_table_thickness")]
        thickness: FloatNum,
    },
    Ramp {
        start: [FloatNum; 2],
        end: [FloatNum; 2],
        #[serde(default = "default_ramp_thickness")]
        thickness: FloatNum,
    },
    Domino {
        position: [FloatNum; 2],
        size: [FloatNum; 2],
        mass: FloatNum,
        friction: FloatNum,
        elasticity: FloatNum,
    },
    DominoRow {
        count: usize,
        start: [FloatNum; 2],
        size: [FloatNum; 2],
        mass: FloatNum,
        friction: FloatNum,
        elasticity: FloatNum,
        spacing_factor: FloatNum,
    },
    Lever {
        #[serde(default)]
        name: Option<String>,
        start: [FloatNum; 2],
        end: [FloatNum; 2],
        #[serde(default = "default_lever_thickness")]
        thickness: FloatNum,
        #[serde(default = "default_unit_mass")]
        mass: FloatNum,
    },
    /// lever pinned at one end, tip swings free
    SwingLever {
        #[serde(default)]
        name: Option<String>,
        pivot: [FloatNum; 2],
        tip: [FloatNum; 2],
        #[serde(default = "default_swing_lever_thickness")]
        thickness: FloatNum,
        #[serde(default = "default_unit_mass")]
        mass: FloatNum,
    },
    Guide {
        position: [FloatNum; 2],
        #[serde(default = "default_guide_size")]
        size: [FloatNum; 2],
    },
    Funnel {
        position: [FloatNum; 2],
        #[serde(default = "default_funnel_size")]
        size: [FloatNum; 2],
    },
    Pulley {
        #[serde(default)]
        name: Option<String>,
        position: [FloatNum; 2],
        #[serde(default = "default_pulley_radius")]
        radius: FloatNum,
    },
    Elevator {
        #[serde(default)]
        name: Option<String>,
        position: [FloatNum; 2],
        #[serde(default = "default_elevator_size")]
        size: [FloatNum; 2],
        #[serde(default = "default_unit_mass")]
        mass: FloatNum,
        #[serde(default = "default_elevator_travel")]
        travel: FloatNum,
    },
    Cart {
        #[serde(default)]
        name: Option<String>,
        position: [FloatNum; 2],
        #[serde(default = "default_cart_size")]
        size: [FloatNum; 2],
        #[serde(default = "default_unit_mass")]
        mass: FloatNum,
    },
    Block {
        position: [FloatNum; 2],
        #[serde(default = "default_block_size")]
        size: [FloatNum; 2],
    },
    Weight {
        #[serde(default)]
        name: Option<String>,
        position: [FloatNum; 2],
        size: FloatNum,
        #[serde(default = "default_weight_sides")]
        sides: usize,
        #[serde(default = "default_unit_mass")]
        mass: FloatNum,
    },
    Rope {
        #[serde(default)]
        name: Option<String>,
        path: Vec<PathSection>,
        #[serde(default)]
        options: RopeOptions,
        /// named body the first link hangs from
        #[serde(default)]
        anchor: Option<String>,
        /// where the free end gets pinned
        #[serde(default)]
        attach: Option<Attachment>,
    },
    /// bind an already built dynamic body to a vertical groove
    Groove {
        body: String,
        #[serde(default = "default_groove_travel")]
        travel: FloatNum,
    },
}

/// One stretch of a rope route. Sections are concatenated in order.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSection {
    Waypoints {
        points: Vec<[FloatNum; 2]>,
        /// densify so consecutive links stay within this spacing
        #[serde(default)]
        max_spacing: Option<FloatNum>,
    },
    /// arc over a pulley circumference, angles in degrees
    Arc {
        center: [FloatNum; 2],
        radius: FloatNum,
        start_angle: FloatNum,
        end_angle: FloatNum,
        #[serde(default = "default_arc_segments")]
        segments: usize,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Attachment {
    /// pin at the local origin of both bodies
    Body { name: String },
    /// pin on the lever side at its tip, expressed in the beam frame
    LeverTip { name: String },
}

fn default_table_thickness() -> FloatNum {
    10.
}

fn default_ramp_thickness() -> FloatNum {
    6.
}

fn default_lever_thickness() -> FloatNum {
    10.
}

fn default_swing_lever_thickness() -> FloatNum {
    8.
}

fn default_unit_mass() -> FloatNum {
    1.
}

fn default_guide_size() -> [FloatNum; 2] {
    [30., 80.]
}

fn default_funnel_size() -> [FloatNum; 2] {
    [60., 40.]
}

fn default_pulley_radius() -> FloatNum {
    15.
}

fn default_elevator_size() -> [FloatNum; 2] {
    [40., 10.]
}

fn default_cart_size() -> [FloatNum; 2] {
    [40., 20.]
}

fn default_block_size() -> [FloatNum; 2] {
    [20., 20.]
}

fn default_weight_sides() -> usize {
    5
}

fn default_elevator_travel() -> FloatNum {
    100.
}

fn default_groove_travel() -> FloatNum {
    200.
}

fn default_arc_segments() -> usize {
    12
}
