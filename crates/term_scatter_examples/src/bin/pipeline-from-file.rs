use glam::Vec2;
use term_scatter::prelude::*;
use term_scatter_examples::{init_tracing, render_scene_to_png, PreviewScene, RenderConfig};

const DEFAULT_DOCUMENT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fox.txt");

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Optional first argument: path to a text file.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DOCUMENT.to_owned());

    let config = ScatterConfig::star_drop().with_seed(7);
    let height_offset = config.height_offset;
    let mut pipeline = TermScatterPipeline::try_new(config)?;
    let result = pipeline.load_from(&FileSource::new(&path))?;

    for count in &result.counts {
        println!("{}: {}", count.term, count.occurrences);
    }
    println!(
        "{} tokens, {} placement requests",
        result.tokens_scanned,
        result.requests.len()
    );

    let mut scene = PreviewScene::new();
    let mut population = ScenePopulation::new();
    population.populate(&result.requests, height_offset, &mut scene);

    let rc = RenderConfig::new((500, 800), Vec2::new(-8.0, 5.0), Vec2::new(8.0, 35.0))
        .with_background([40, 40, 40])
        .with_radius(5.0);
    render_scene_to_png(&scene, &rc, "pipeline-from-file.png")?;

    Ok(())
}
