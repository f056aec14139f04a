use crate::core::prelude::*;
use crate::util::assert::{check_eq, check_le};
use crate::util::error::Result;
use serde::Serialize;
use std::ops::Index;

/// Insertion order of a simplex point, for the renderer's colour choice only.
///
/// A point pushed onto a simplex of length `n` is tagged `n`; the tag travels with the point
/// when the simplex is reordered.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct SimplexTag(pub usize);

/// Up to three points of the Minkowski difference, with their [`SimplexTag`]s kept alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Simplex {
    points: Vec<Vec2>,
    tags: Vec<SimplexTag>,
}

impl Simplex {
    /// Builds a simplex from raw points, tagged in order.
    pub fn from_points(points: Vec<Vec2>) -> Self {
        let tags = (0..points.len()).map(SimplexTag).collect_vec();
        Self { points, tags }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
    pub fn tags(&self) -> &[SimplexTag] {
        &self.tags
    }
    pub fn iter(&self) -> impl Iterator<Item = (Vec2, SimplexTag)> + '_ {
        self.points.iter().copied().zip(self.tags.iter().copied())
    }

    /// Whether `point` lies inside or on a triangular simplex. Always false otherwise.
    pub fn encloses(&self, point: Vec2) -> bool {
        let [a, b, c] = self.points[..] else {
            return false;
        };
        let turns = [ccw(a, b, point), ccw(b, c, point), ccw(c, a, point)];
        turns.iter().all(|&t| t >= 0.) || turns.iter().all(|&t| t <= 0.)
    }

    fn push(&mut self, point: Vec2) {
        self.tags.push(SimplexTag(self.points.len()));
        self.points.push(point);
        check_eq!(self.points.len(), self.tags.len());
    }
    fn swap(&mut self, i: usize, j: usize) {
        self.points.swap(i, j);
        self.tags.swap(i, j);
    }
    fn pop(&mut self) {
        self.points.pop();
        self.tags.pop();
        check_eq!(self.points.len(), self.tags.len());
    }
    fn clear(&mut self) {
        self.points.clear();
        self.tags.clear();
    }
}

impl Index<usize> for Simplex {
    type Output = Vec2;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum StepVerdict {
    /// No conclusion yet; keep stepping.
    Searching,
    /// The last triangle enclosed the origin. The simplex was cleared, so the next step starts a
    /// fresh run.
    Overlap,
    /// The newest support point did not reach the origin along the search direction, which proves
    /// the shapes are disjoint. The simplex was still updated as usual.
    Separated,
    /// The incoming state held more points than a GJK iteration can handle and was discarded.
    Reset,
}

/// The state of a stepped GJK run: the current simplex and the next search direction.
///
/// Each call to [`step`](GjkState::step) consumes the state and performs exactly one iteration,
/// so a renderer can show the simplex as it evolves. The simplex lives in world-space
/// Minkowski-difference coordinates, where the shapes overlap iff the origin is enclosed.
///
/// # Examples
///
/// ```
/// use gjk2d::core::prelude::*;
/// use std::sync::Arc;
///
/// let centre = Vec2 { x: 250.0, y: 100.0 };
/// let a = PlacedShape::new(Arc::new(Polygon::regular(50.0, 3)), centre);
/// let b = PlacedShape::new(Arc::new(Polygon::regular(50.0, 4)), centre);
///
/// let mut state = GjkState::default();
/// let mut verdicts = Vec::new();
/// for _ in 0..3 {
///     let step = state.step(&a, &b).unwrap();
///     verdicts.push(step.verdict);
///     state = step.state;
/// }
/// assert_eq!(verdicts.last(), Some(&StepVerdict::Overlap));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GjkState {
    simplex: Simplex,
    direction: Vec2,
}

impl Default for GjkState {
    fn default() -> Self {
        Self {
            simplex: Simplex::default(),
            direction: INITIAL_SEARCH_DIRECTION,
        }
    }
}

/// The result of one GJK iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GjkStep {
    /// The state to pass to the next iteration.
    pub state: GjkState,
    /// The simplex right after the new support point was added, before it was reduced. This is
    /// what a renderer draws for the step.
    pub trace: Simplex,
    pub verdict: StepVerdict,
}

impl GjkStep {
    pub fn overlap(&self) -> bool {
        self.verdict == StepVerdict::Overlap
    }
}

/// The result of driving [`GjkState::step`] until a verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GjkRun {
    /// [`StepVerdict::Searching`] if the step budget ran out first.
    pub verdict: StepVerdict,
    pub steps: usize,
    pub traces: Vec<Simplex>,
    pub state: GjkState,
}

impl GjkState {
    /// Resumes from an explicit simplex and search direction, e.g. one replayed by a renderer.
    pub fn new(simplex: Simplex, direction: Vec2) -> Self {
        Self { simplex, direction }
    }

    pub fn simplex(&self) -> &Simplex {
        &self.simplex
    }
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Performs one GJK iteration on the shapes `a` and `b`.
    ///
    /// # Errors
    /// [`GeometryError::InvalidShape`] if either shape has no vertices.
    pub fn step<A: SupportMap, B: SupportMap>(self, a: &A, b: &B) -> Result<GjkStep> {
        let GjkState {
            mut simplex,
            mut direction,
        } = self;
        // World origin, in world-space difference coordinates.
        let origin = Vec2::zero();

        if simplex.is_empty() {
            direction = INITIAL_SEARCH_DIRECTION;
        }
        let point = minkowski_support(a, b, direction)?;
        let mut verdict = if point.dot(direction) < 0. {
            StepVerdict::Separated
        } else {
            StepVerdict::Searching
        };
        simplex.push(point);
        let trace = simplex.clone();

        match simplex.len() {
            1 => {
                direction = origin - simplex[0];
            }
            2 => {
                let edge = simplex[1] - simplex[0];
                if edge.cross(origin - simplex[0]) < 0. {
                    simplex.swap(0, 1);
                    direction = edge.perp_right();
                } else {
                    direction = edge.perp_left();
                }
            }
            3 => {
                let ac = simplex[2] - simplex[0];
                let bc = simplex[2] - simplex[1];
                if ac.cross(origin - simplex[0]) > 0. {
                    // Outside AC: drop B.
                    direction = ac.perp_left();
                    simplex.swap(1, 2);
                    simplex.pop();
                } else if bc.cross(origin - simplex[1]) < 0. {
                    // Outside BC: drop A.
                    direction = bc.perp_right();
                    simplex.swap(0, 2);
                    simplex.pop();
                } else {
                    simplex.clear();
                    verdict = StepVerdict::Overlap;
                }
            }
            n => {
                warn!("gjk: discarding malformed simplex with {n} points");
                simplex.clear();
                verdict = StepVerdict::Reset;
            }
        }
        check_le!(simplex.len(), 2);
        trace!(
            "gjk: added {point}, simplex now {} point(s), direction {direction}: {verdict:?}",
            simplex.len()
        );

        Ok(GjkStep {
            state: GjkState { simplex, direction },
            trace,
            verdict,
        })
    }

    /// Steps until the shapes are proven to overlap or to be disjoint, or `max_steps` run out.
    ///
    /// # Errors
    /// [`GeometryError::InvalidShape`] if either shape has no vertices.
    pub fn run<A: SupportMap, B: SupportMap>(
        self,
        a: &A,
        b: &B,
        max_steps: usize,
    ) -> Result<GjkRun> {
        let mut state = self;
        let mut traces = Vec::new();
        for steps in 1..=max_steps {
            let GjkStep {
                state: next,
                trace,
                verdict,
            } = state.step(a, b)?;
            debug!(
                "gjk step {steps}: {verdict:?}, simplex of {} point(s), next direction {}",
                trace.len(),
                next.direction()
            );
            state = next;
            traces.push(trace);
            if matches!(verdict, StepVerdict::Overlap | StepVerdict::Separated) {
                debug!("gjk: {verdict:?} after {steps} step(s)");
                return Ok(GjkRun {
                    verdict,
                    steps,
                    traces,
                    state,
                });
            }
        }
        debug!("gjk: undecided after {max_steps} step(s)");
        Ok(GjkRun {
            verdict: StepVerdict::Searching,
            steps: max_steps,
            traces,
            state,
        })
    }
}

/// Runs GJK from scratch for at most [`MAX_GJK_STEPS`] iterations.
///
/// Returns `Some(true)` for overlapping shapes, `Some(false)` for disjoint ones and `None` if the
/// run did not settle.
pub fn intersects<A: SupportMap, B: SupportMap>(a: &A, b: &B) -> Result<Option<bool>> {
    let run = GjkState::default().run(a, b, MAX_GJK_STEPS)?;
    Ok(match run.verdict {
        StepVerdict::Overlap => Some(true),
        StepVerdict::Separated => Some(false),
        StepVerdict::Searching | StepVerdict::Reset => None,
    })
}
