use glam::Vec2;
use term_scatter::prelude::*;
use term_scatter_examples::{init_tracing, render_scene_to_png, PreviewScene, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ScatterConfig::new(vec![
        WatchTerm::new("fox", ColorTag::A),
        WatchTerm::new("bird", ColorTag::B),
    ])
    .with_seed(2025);
    let height_offset = config.height_offset;
    let mut pipeline = TermScatterPipeline::try_new(config)?;

    let result = pipeline.load("the Fox sat. The fox ran. A bird flew.");
    for count in &result.counts {
        println!(
            "{:>6} ({:?}): {} occurrences",
            count.term, count.color_tag, count.occurrences
        );
    }
    for request in &result.requests {
        println!(
            "token {:>2} -> normalized index {:>6.3} seed {:.3}",
            request.token_index, request.normalized_index, request.seed
        );
    }

    let mut scene = PreviewScene::new();
    let mut population = ScenePopulation::new();
    population.populate(&result.requests, height_offset, &mut scene);

    let rc = RenderConfig::new((400, 600), Vec2::new(-10.0, 5.0), Vec2::new(10.0, 35.0))
        .with_background([128, 128, 128]);
    render_scene_to_png(&scene, &rc, "pipeline-inline-text.png")?;

    Ok(())
}
