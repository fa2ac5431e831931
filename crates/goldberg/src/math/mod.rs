pub mod point;
pub mod size;
pub mod vector;

pub type FloatNum = f32;

pub const TAU: FloatNum = std::f32::consts::TAU;
