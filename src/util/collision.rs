use crate::core::prelude::*;
use crate::util::error::Result;

/// Convex shapes that can answer support queries.
///
/// A support query returns the vertex of the shape maximising its dot product with `direction`.
/// The direction does not need to be normalised. Ties go to the first vertex in scan order.
pub trait SupportMap {
    fn support_point(&self, direction: Vec2) -> Result<Vec2>;
}

fn first_max_along<I: Iterator<Item = Vec2>>(mut vertices: I, direction: Vec2) -> Result<Vec2> {
    let mut best = vertices.next().ok_or(GeometryError::InvalidShape)?;
    let mut best_dot = best.dot(direction);
    for vertex in vertices {
        let dot = vertex.dot(direction);
        if dot > best_dot {
            best = vertex;
            best_dot = dot;
        }
    }
    Ok(best)
}

/// Local-space support.
impl SupportMap for Polygon {
    fn support_point(&self, direction: Vec2) -> Result<Vec2> {
        first_max_along(self.vertices().iter().copied(), direction)
    }
}

/// World-space support.
impl SupportMap for PlacedShape {
    fn support_point(&self, direction: Vec2) -> Result<Vec2> {
        first_max_along(self.world_vertices(), direction)
    }
}

impl<T: SupportMap> SupportMap for &T {
    fn support_point(&self, direction: Vec2) -> Result<Vec2> {
        (*self).support_point(direction)
    }
}

/// Returns the world-space vertex of `shape` farthest along `direction`.
///
/// # Errors
/// [`GeometryError::InvalidShape`] if the shape has no vertices.
///
/// # Examples
///
/// ```
/// use gjk2d::core::prelude::*;
/// use std::sync::Arc;
///
/// let square = Arc::new(Polygon::regular(1.0, 4));
/// let shape = PlacedShape::new(square, Vec2 { x: 5.0, y: 0.0 });
/// let top = support(&shape, Vec2 { x: 0.0, y: 1.0 }).unwrap();
/// assert_eq!(top, Vec2 { x: 5.0, y: 1.0 });
/// ```
pub fn support(shape: &PlacedShape, direction: Vec2) -> Result<Vec2> {
    shape.support_point(direction)
}

/// The support point of the Minkowski difference `a - b` along `direction`.
pub fn minkowski_support<A: SupportMap, B: SupportMap>(
    a: &A,
    b: &B,
    direction: Vec2,
) -> Result<Vec2> {
    Ok(a.support_point(direction)? - b.support_point(-direction)?)
}

/// Every pairwise world-space difference `a_i - b_j`, in `(i, j)` row-major order.
///
/// The convex hull of this set is the Minkowski difference of the two shapes.
pub fn minkowski_difference(a: &PlacedShape, b: &PlacedShape) -> Result<Vec<Vec2>> {
    if a.is_empty() || b.is_empty() {
        return Err(GeometryError::InvalidShape);
    }
    Ok(a.world_vertices()
        .cartesian_product(b.world_vertices().collect_vec())
        .map(|(u, v)| u - v)
        .collect_vec())
}
