use crate::util::linalg::Vec2;

pub const EPSILON: f32 = 1e-5;

// Every GJK run starts by searching along +y.
pub const INITIAL_SEARCH_DIRECTION: Vec2 = Vec2 { x: 0.0, y: 1.0 };
pub const MAX_GJK_STEPS: usize = 32;

pub const DISTANCE_SENTINEL: f32 = f32::INFINITY;
