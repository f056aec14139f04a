use crate::core::prelude::*;
use crate::util::error::Result;
use std::cmp::Ordering;

/// Pops the stack until the candidate makes a strict left turn with its top two points, then
/// pushes it. Collinear points are dropped.
fn monotone_scan<I: Iterator<Item = Vec2>>(vertices: I) -> Vec<Vec2> {
    let mut hull: Vec<Vec2> = Vec::new();
    for vertex in vertices {
        while hull.len() >= 2 {
            let last = hull[hull.len() - 1];
            let snd_last = hull[hull.len() - 2];
            if ccw(snd_last, last, vertex) > 0. {
                break;
            }
            hull.pop();
        }
        hull.push(vertex);
    }
    hull
}

fn lowest_index(points: &[Vec2]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
}

/// Builds the convex hull of an unordered point set.
///
/// The hull is returned counter-clockwise, starting from the lowest point (smallest `y`, then
/// smallest `x`; exact duplicates resolve to the first one found). Points lying on an edge of
/// the hull are not part of the result.
///
/// # Errors
/// [`GeometryError::DegenerateInput`] if there are fewer than 3 points, or if the points are all
/// collinear so that no polygon can be formed.
///
/// # Examples
///
/// ```
/// use gjk2d::core::prelude::*;
///
/// let points = [
///     Vec2 { x: 1.0, y: 1.0 },
///     Vec2 { x: 0.0, y: 2.0 },
///     Vec2 { x: 0.5, y: 0.5 },
///     Vec2 { x: 2.0, y: 2.0 },
///     Vec2 { x: 0.0, y: 0.0 },
///     Vec2 { x: 2.0, y: 0.0 },
/// ];
/// let hull = compute_hull(&points).unwrap();
/// assert_eq!(
///     hull,
///     vec![
///         Vec2 { x: 0.0, y: 0.0 },
///         Vec2 { x: 2.0, y: 0.0 },
///         Vec2 { x: 2.0, y: 2.0 },
///         Vec2 { x: 0.0, y: 2.0 },
///     ]
/// );
/// ```
pub fn compute_hull(points: &[Vec2]) -> Result<Vec<Vec2>> {
    if points.len() < 3 {
        return Err(GeometryError::DegenerateInput {
            count: points.len(),
        });
    }
    let pivot_index = lowest_index(points).ok_or(GeometryError::DegenerateInput { count: 0 })?;
    let pivot = points[pivot_index];

    // Every other point lies in the half-plane above the pivot, so the sign of ccw() is a
    // consistent angular order.
    let sorted = points
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pivot_index)
        .map(|(_, &p)| p)
        .sorted_by(|&a, &b| {
            let det = ccw(pivot, a, b);
            if det > 0. {
                Ordering::Less
            } else if det < 0. {
                Ordering::Greater
            } else {
                (a - pivot)
                    .len_squared()
                    .total_cmp(&(b - pivot).len_squared())
            }
        });

    let hull = monotone_scan(std::iter::once(pivot).chain(sorted));
    trace!("hull: {} points -> {} vertices", points.len(), hull.len());
    if hull.len() < 3 {
        return Err(GeometryError::DegenerateInput { count: hull.len() });
    }
    Ok(hull)
}

/// The convex hull of the Minkowski difference `a - b`, in world space.
///
/// The two shapes overlap iff this polygon contains the origin.
pub fn minkowski_hull(a: &PlacedShape, b: &PlacedShape) -> Result<Vec<Vec2>> {
    compute_hull(&minkowski_difference(a, b)?)
}
