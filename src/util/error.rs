use thiserror::Error;

/// Errors raised by the geometry routines.
///
/// Every routine fails fast: none of them substitutes a degenerate result (an empty hull, an
/// empty simplex) for one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon with no vertices was passed to a support query or a GJK step.
    #[error("shape has no vertices")]
    InvalidShape,

    /// Hull construction needs at least 3 points that are not all collinear.
    #[error("degenerate hull input: {count} usable point(s), need at least 3")]
    DegenerateInput { count: usize },

    /// A distance grid needs a finite, positive cell size and non-negative extents.
    #[error("invalid grid: {width}x{height} with cell size {cell_size}")]
    InvalidGrid {
        width: f32,
        height: f32,
        cell_size: f32,
    },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
