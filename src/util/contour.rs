use crate::core::prelude::*;
use serde::Serialize;

/// One piece of an iso-contour, in grid-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ContourSegment {
    pub start: Vec2,
    pub end: Vec2,
    /// Index into the `levels` passed to [`extract`]; only used for styling.
    pub level_index: usize,
}

// A node exactly on the level only counts when it is the first endpoint of the edge.
fn crosses(first: f32, second: f32, level: f32) -> bool {
    (first <= level && second > level) || (first >= level && second < level)
}

fn interp(first: f32, second: f32, level: f32, from: f32, to: f32) -> f32 {
    // Sentinel (unreached) cells pull the crossing onto the finite endpoint.
    if first.is_infinite() {
        return to;
    }
    if second.is_infinite() {
        return from;
    }
    (level - first) * (to - from) / (second - first) + from
}

/// Extracts line segments approximating the iso-contours of `field` at each of `levels`.
///
/// Every unit cell is checked for sign changes of `value - level` along its four edges, and the
/// crossing points are linearly interpolated. A cell contributes a segment only if exactly two of
/// its edges cross; cells with one, three or four crossings (saddles) contribute nothing.
///
/// Segments are ordered by level, then row, then column.
///
/// # Examples
///
/// ```
/// use gjk2d::core::prelude::*;
///
/// let field = DistanceGrid::from_values(2, 2, 1.0, vec![0.0, 1.0, 1.0, 2.0]).unwrap();
/// let segments = extract(&field, &[0.5]);
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].start, Vec2 { x: 0.0, y: 0.5 });
/// assert_eq!(segments[0].end, Vec2 { x: 0.5, y: 0.0 });
/// ```
pub fn extract(field: &DistanceGrid, levels: &[f32]) -> Vec<ContourSegment> {
    let h = field.cell_size();
    let mut segments = Vec::new();
    for (level_index, &level) in levels.iter().enumerate() {
        for row in 0..field.rows().saturating_sub(1) {
            for col in 0..field.cols().saturating_sub(1) {
                let v00 = field[(row, col)];
                let v01 = field[(row, col + 1)];
                let v10 = field[(row + 1, col)];
                let v11 = field[(row + 1, col + 1)];
                let (x0, x1) = (col as f32 * h, (col + 1) as f32 * h);
                let (y0, y1) = (row as f32 * h, (row + 1) as f32 * h);

                let left = crosses(v00, v10, level).then(|| Vec2 {
                    x: x0,
                    y: interp(v00, v10, level, y0, y1),
                });
                let near = crosses(v00, v01, level).then(|| Vec2 {
                    x: interp(v00, v01, level, x0, x1),
                    y: y0,
                });
                let right = crosses(v01, v11, level).then(|| Vec2 {
                    x: x1,
                    y: interp(v01, v11, level, y0, y1),
                });
                let far = crosses(v10, v11, level).then(|| Vec2 {
                    x: interp(v10, v11, level, x0, x1),
                    y: y1,
                });
                if let Some((start, end)) = [left, near, right, far]
                    .into_iter()
                    .flatten()
                    .collect_tuple()
                {
                    segments.push(ContourSegment {
                        start,
                        end,
                        level_index,
                    });
                }
            }
        }
    }
    trace!(
        "contours: {} level(s) -> {} segment(s)",
        levels.len(),
        segments.len()
    );
    segments
}
