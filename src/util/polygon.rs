use crate::core::prelude::*;
use serde::Serialize;
use std::f32::consts::TAU;
use std::sync::Arc;

/// An ordered list of vertices in local (object) space.
///
/// Convexity is assumed, not validated. A polygon is pure data: several [`PlacedShape`]s may share
/// one through an [`Arc`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// A regular polygon inscribed in a circle of the given radius.
    ///
    /// The first vertex sits on the positive x axis and the rest follow clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use gjk2d::core::prelude::*;
    /// let square = Polygon::regular(1.0, 4);
    /// assert_eq!(square.len(), 4);
    /// assert_eq!(square.vertices()[0], Vec2 { x: 1.0, y: 0.0 });
    /// assert_eq!(square.vertices()[1], Vec2 { x: 0.0, y: -1.0 });
    /// ```
    pub fn regular(radius: f32, sides: usize) -> Self {
        let step = TAU / sides as f32;
        let vertices = (0..sides)
            .map(|i| {
                let angle = TAU - i as f32 * step;
                Vec2 {
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                }
            })
            .collect_vec();
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex centroid, or `None` for an empty polygon.
    pub fn centre(&self) -> Option<Vec2> {
        if self.is_empty() {
            None
        } else {
            Some(self.vertices.iter().copied().sum::<Vec2>() / self.len() as f32)
        }
    }
}

impl From<Vec<Vec2>> for Polygon {
    fn from(value: Vec<Vec2>) -> Self {
        Self::new(value)
    }
}

/// A [`Polygon`] translated into world space.
///
/// Only the offset ever changes; the vertices are shared and read-only.
#[derive(Debug, Clone)]
pub struct PlacedShape {
    polygon: Arc<Polygon>,
    offset: Vec2,
}

impl PlacedShape {
    pub fn new(polygon: Arc<Polygon>, offset: Vec2) -> Self {
        Self { polygon, offset }
    }

    pub fn polygon(&self) -> &Arc<Polygon> {
        &self.polygon
    }
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }
    pub fn translate(&mut self, by: Vec2) {
        self.offset += by;
    }
    #[must_use]
    pub fn translated(&self, by: Vec2) -> Self {
        Self {
            polygon: self.polygon.clone(),
            offset: self.offset + by,
        }
    }

    pub fn len(&self) -> usize {
        self.polygon.len()
    }
    pub fn is_empty(&self) -> bool {
        self.polygon.is_empty()
    }

    /// # Panics
    /// If `i` is out of range.
    pub fn vertex_world(&self, i: usize) -> Vec2 {
        self.polygon.vertices[i] + self.offset
    }
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.polygon.vertices.iter().map(|&v| v + self.offset)
    }

    pub fn centre(&self) -> Option<Vec2> {
        self.polygon.centre().map(|c| c + self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Arc<Polygon> {
        Arc::new(Polygon::new(vec![
            Vec2 { x: 0.0, y: 0.0 },
            Vec2 { x: 1.0, y: 0.0 },
            Vec2 { x: 1.0, y: 1.0 },
            Vec2 { x: 0.0, y: 1.0 },
        ]))
    }

    #[test]
    fn regular_triangle_winds_clockwise() {
        let triangle = Polygon::regular(50.0, 3);
        let v = triangle.vertices();
        assert_eq!(v.len(), 3);
        assert!((v[0] - Vec2 { x: 50.0, y: 0.0 }).len() < 1e-3);
        assert!((v[1] - Vec2 { x: -25.0, y: -43.30127 }).len() < 1e-3);
        assert!((v[2] - Vec2 { x: -25.0, y: 43.30127 }).len() < 1e-3);
        assert!(ccw(v[0], v[1], v[2]) < 0.0);
    }

    #[test]
    fn regular_with_no_sides_is_empty() {
        assert!(Polygon::regular(1.0, 0).is_empty());
        assert_eq!(Polygon::regular(1.0, 0).centre(), None);
    }

    #[test]
    fn centre_of_regular_polygon_is_origin() {
        let hexagon = Polygon::regular(3.0, 6);
        let centre = hexagon.centre().unwrap();
        assert!(centre.len() < 1e-5);
    }

    #[test]
    fn placed_shape_world_vertices() {
        let square = unit_square();
        let shape = PlacedShape::new(square.clone(), Vec2 { x: 10.0, y: -2.0 });
        assert_eq!(shape.len(), 4);
        assert_eq!(shape.vertex_world(2), Vec2 { x: 11.0, y: -1.0 });
        assert_eq!(
            shape.world_vertices().collect_vec(),
            vec![
                Vec2 { x: 10.0, y: -2.0 },
                Vec2 { x: 11.0, y: -2.0 },
                Vec2 { x: 11.0, y: -1.0 },
                Vec2 { x: 10.0, y: -1.0 },
            ]
        );
        assert_eq!(shape.centre(), Some(Vec2 { x: 10.5, y: -1.5 }));
    }

    #[test]
    fn shapes_share_polygon() {
        let square = unit_square();
        let mut a = PlacedShape::new(square.clone(), Vec2::zero());
        let b = a.translated(Vec2::one());
        a.translate(Vec2 { x: 2.0, y: 0.0 });
        assert!(Arc::ptr_eq(a.polygon(), b.polygon()));
        assert_eq!(Arc::strong_count(&square), 3);
        assert_eq!(a.offset(), Vec2 { x: 2.0, y: 0.0 });
        assert_eq!(b.offset(), Vec2::one());

        a.set_offset(Vec2::zero());
        assert_eq!(a.vertex_world(1), Vec2 { x: 1.0, y: 0.0 });
    }
}
