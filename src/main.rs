use anyhow::{Context, Result};
use gjk2d::core::prelude::*;
use gjk2d::util::setup_log;
use serde::Serialize;
use std::sync::Arc;

const CANVAS_WIDTH: f32 = 500.;
const CANVAS_HEIGHT: f32 = 200.;
const SHAPE_RADIUS: f32 = 50.;
const CELL_SIZE: f32 = 10.;
const CONTOUR_LEVELS: [f32; 4] = [15., 35., 55., 75.];

/// Everything a renderer needs to draw one pass of the scene.
#[derive(Serialize)]
struct Frame {
    shapes: Vec<Vec<Vec2>>,
    hull: Vec<Vec2>,
    trace: Simplex,
    verdict: StepVerdict,
    steps: usize,
    segments: Vec<ContourSegment>,
}

fn main() -> Result<()> {
    setup_log("run.log")?;

    let centre = Vec2 {
        x: CANVAS_WIDTH / 2.,
        y: CANVAS_HEIGHT / 2.,
    };
    let triangle = PlacedShape::new(Arc::new(Polygon::regular(SHAPE_RADIUS, 3)), centre);
    let square = PlacedShape::new(Arc::new(Polygon::regular(SHAPE_RADIUS, 4)), centre);
    info!("scene: triangle and square at {centre}");

    let hull = minkowski_hull(&triangle, &square).context("building Minkowski hull")?;
    info!("minkowski hull: {} vertices", hull.len());

    let run = GjkState::default()
        .run(&triangle, &square, MAX_GJK_STEPS)
        .context("running GJK")?;
    match run.verdict {
        StepVerdict::Overlap | StepVerdict::Separated => {
            info!("gjk: {:?} after {} step(s)", run.verdict, run.steps);
        }
        StepVerdict::Searching | StepVerdict::Reset => {
            warn!("gjk: no verdict after {} step(s)", run.steps);
        }
    }
    let trace = run.traces.last().cloned().unwrap_or_default();

    let mut field = DistanceGrid::new(CANVAS_WIDTH, CANVAS_HEIGHT, CELL_SIZE)
        .context("allocating distance field")?;
    let seeds = triangle
        .world_vertices()
        .chain(square.world_vertices())
        .collect_vec();
    field.compute_distances(&seeds);
    let segments = extract(&field, &CONTOUR_LEVELS);
    info!(
        "contours: {} segment(s) over {}x{} cells",
        segments.len(),
        field.rows(),
        field.cols()
    );

    let frame = Frame {
        shapes: vec![
            triangle.world_vertices().collect_vec(),
            square.world_vertices().collect_vec(),
        ],
        hull,
        trace,
        verdict: run.verdict,
        steps: run.steps,
        segments,
    };
    let json = serde_json::to_string_pretty(&frame).context("serialising frame")?;
    println!("{json}");
    Ok(())
}
