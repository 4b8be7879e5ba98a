//! Fetches the document on a worker thread while a simulated frame loop runs,
//! then populates the scene and animates it.
//!
//! With the `http` feature the document is downloaded from a URL argument or,
//! without arguments, from the configured source URL. A path argument (or the
//! bundled text when built without `http`) is read from disk.
use std::thread;
use std::time::Duration;

use glam::Vec2;
use term_scatter::prelude::*;
use term_scatter_examples::{init_tracing, render_scene_to_png, PreviewScene, RenderConfig};
use tracing::{info, warn};

const DEFAULT_DOCUMENT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fox.txt");
const FRAMES: usize = 240;
const FRAME_TIME: Duration = Duration::from_millis(4);

fn main() -> anyhow::Result<()> {
    init_tracing();

    let (bubbles, location) = parse_args(std::env::args().skip(1));
    let preset = if bubbles {
        ScatterConfig::bubbles()
    } else {
        ScatterConfig::star_drop()
    };
    let config = preset.with_seed(99);
    let height_offset = config.height_offset;

    let mut pending = start_fetch(location, &config);
    let mut pipeline = TermScatterPipeline::try_new(config)?;
    let mut scene = PreviewScene::new();
    let mut population = ScenePopulation::new();
    let animator = Animator::default();
    let view = ViewState::default()
        .with_idle(if bubbles {
            IdleMotion::Bubbles
        } else {
            IdleMotion::StarDrop
        })
        .with_camera_rotation(true);
    let clock = Clock::new();

    let mut camera = None;
    for _ in 0..FRAMES {
        if let Some(outcome) = pending.poll() {
            match outcome {
                Ok(doc) => {
                    let result = pipeline.load_document(doc, &mut ());
                    population.populate(&result.requests, height_offset, &mut scene);
                }
                // The scene simply stays empty.
                Err(err) => warn!("No document: {err}."),
            }
        }

        let update = animator.update(&mut population, &view, clock.elapsed_secs(), &mut scene);
        camera = update.camera.or(camera);
        thread::sleep(FRAME_TIME);
    }

    if let Some(camera) = camera {
        info!("Camera ended at {camera}.");
    }

    let rc = if bubbles {
        RenderConfig::new((600, 600), Vec2::new(-30.0, -25.0), Vec2::new(30.0, 15.0))
    } else {
        RenderConfig::new((500, 800), Vec2::new(-8.0, -2.0), Vec2::new(8.0, 35.0))
    };
    render_scene_to_png(&scene, &rc, "background-fetch-animated.png")?;

    Ok(())
}

/// Returns whether `--bubbles` was given and the first argument that is not a flag.
fn parse_args(args: impl IntoIterator<Item = String>) -> (bool, Option<String>) {
    let mut bubbles = false;
    let mut location = None;
    for arg in args {
        if arg == "--bubbles" {
            bubbles = true;
        } else if !arg.starts_with("--") && location.is_none() {
            location = Some(arg);
        }
    }
    (bubbles, location)
}

#[cfg(feature = "http")]
fn start_fetch(location: Option<String>, config: &ScatterConfig) -> PendingDocument {
    match location {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            spawn_fetch(HttpSource::new(url))
        }
        Some(path) => spawn_fetch(FileSource::new(path)),
        None => match HttpSource::from_config(config) {
            Some(source) => spawn_fetch(source),
            None => spawn_fetch(FileSource::new(DEFAULT_DOCUMENT)),
        },
    }
}

#[cfg(not(feature = "http"))]
fn start_fetch(location: Option<String>, config: &ScatterConfig) -> PendingDocument {
    if location.is_none() {
        if let Some(url) = config.source_url.as_deref() {
            warn!("Built without `http`; reading the bundled document instead of {url}.");
        }
    }
    spawn_fetch(FileSource::new(
        location.unwrap_or_else(|| DEFAULT_DOCUMENT.to_owned()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn location_is_found_after_flags() {
        assert_eq!(
            parse_args(args(&["--bubbles", "doc.txt"])),
            (true, Some("doc.txt".to_owned()))
        );
        assert_eq!(
            parse_args(args(&["doc.txt", "--bubbles"])),
            (true, Some("doc.txt".to_owned()))
        );
    }

    #[test]
    fn missing_location_and_flag() {
        assert_eq!(parse_args(args(&[])), (false, None));
        assert_eq!(
            parse_args(args(&["a.txt", "b.txt"])),
            (false, Some("a.txt".to_owned()))
        );
    }
}
