#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use tracing::{debug, error, info, trace, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    util::{
        collision::{minkowski_difference, minkowski_support, support, SupportMap},
        contour::{extract, ContourSegment},
        error::GeometryError,
        field::DistanceGrid,
        gjk::{intersects, GjkRun, GjkState, GjkStep, Simplex, SimplexTag, StepVerdict},
        hull::{compute_hull, minkowski_hull},
        linalg,
        linalg::{ccw, Point2, Vec2},
        polygon::{PlacedShape, Polygon},
    },
};
