//! Headless scatter session over a procedural terrain.
//!
//! ```text
//! cargo run --example scatter
//! RUST_LOG=scatterbrush=debug cargo run --example scatter
//! ```
//!
//! Replays a short scripted session: hover, grow the brush with the scroll
//! wheel, raise the sample count, then spawn at the current hits.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scatterbrush::math::{Point2, Point3, Ray, Vector3};
use scatterbrush::scene::{Scene, Sphere, Terrain};
use scatterbrush::tool::{
    DrawList, FrameInput, InputEvent, KeyCode, Modifiers, PlacementStore, PrefabHandle,
    ScatterConfig, ScatterTool, ToolParameters,
};
use scatterbrush::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for scatterbrush.
    // Override with RUST_LOG env var (e.g. RUST_LOG=scatterbrush=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("scatter=info".parse().unwrap_or_default())
        .add_directive("scatterbrush=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let terrain = Terrain::from_fn(30.0, 60, |x, z| {
        1.5 * (0.15 * x).sin() * (0.1 * z).cos() + 0.05 * z
    })?;
    let scene = Scene::new()
        .with(terrain)
        .with(Sphere::new(Point3::new(8.0, 1.0, 8.0), 3.0)?);

    let mut tool = ScatterTool::with_rng(
        ScatterConfig::default(),
        ToolParameters {
            prefab: Some(PrefabHandle::new(1)),
            ..ToolParameters::default()
        },
        StdRng::seed_from_u64(2024),
    );
    let mut draw = DrawList::new();
    let mut store = PlacementStore::new();

    let camera_up = Vector3::new(0.0, 0.6, -0.8);
    let pointer = |x: f64, z: f64| Ray::new(Point3::new(x, 40.0, z + 20.0), Vector3::new(0.0, -1.0, -0.5));

    let scroll = |delta: f64| InputEvent::Scroll {
        delta,
        modifiers: Modifiers::NONE,
    };
    let frames = [
        FrameInput::new(pointer(0.0, 0.0)?, camera_up).with_event(InputEvent::MouseMove {
            position: Point2::new(640.0, 360.0),
        }),
        FrameInput::new(pointer(2.0, 1.0)?, camera_up)
            .with_event(scroll(1.0))
            .with_event(scroll(1.0))
            .with_event(scroll(1.0)),
        FrameInput::new(pointer(8.0, 8.0)?, camera_up),
        FrameInput::new(pointer(8.0, 8.0)?, camera_up).with_event(InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::NONE,
        }),
    ];

    for (i, input) in frames.iter().enumerate() {
        if i == 2 {
            tool.commit_parameters(ToolParameters {
                sample_count: 24,
                ..*tool.parameters()
            });
        }

        draw.clear();
        let report = tool.tick(input, &scene, &mut draw, &mut store);
        match &report.sample {
            Some(sample) => tracing::info!(
                frame = i,
                radius = tool.parameters().radius,
                primary = ?sample.primary.point,
                hits = sample.hits().len(),
                samples = sample.slots.len(),
                draw_calls = draw.len(),
                spawned = report.spawned,
                "frame sampled"
            ),
            None => tracing::info!(frame = i, "pointer is off the scene"),
        }
    }

    for (id, instance) in store.iter() {
        tracing::info!(
            ?id,
            position = ?instance.placement.position,
            up = ?instance.placement.up(),
            "instance"
        );
    }
    Ok(())
}
