use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use term_scatter::prelude::{ColorTag, ObjectTransform, SceneSink, SpawnSpec};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Front view (x right, y up) rendering settings.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub view_min: Vec2,
    pub view_max: Vec2,
    pub background: [u8; 3],
    /// Radius in pixels of an object at scale 1.
    pub radius: f32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), view_min: Vec2, view_max: Vec2) -> Self {
        Self {
            image_size,
            view_min,
            view_max,
            background: [128, 128, 128],
            radius: 6.0,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    fn to_pixel(&self, p: Vec3) -> Vec2 {
        let size = Vec2::new(self.image_size.0 as f32, self.image_size.1 as f32);
        let t = (Vec2::new(p.x, p.y) - self.view_min) / (self.view_max - self.view_min);
        Vec2::new(t.x * size.x, (1.0 - t.y) * size.y)
    }
}

#[derive(Debug, Clone)]
struct PreviewObject {
    color_tag: ColorTag,
    translation: Vec3,
    scale: f32,
    visible: bool,
    alive: bool,
}

/// In-memory scene that renders its objects as discs.
#[derive(Debug, Default)]
pub struct PreviewScene {
    objects: Vec<PreviewObject>,
}

impl PreviewScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.iter().filter(|o| o.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SceneSink for PreviewScene {
    type Handle = usize;

    fn spawn(&mut self, spec: &SpawnSpec) -> usize {
        self.objects.push(PreviewObject {
            color_tag: spec.color_tag,
            translation: spec.transform.translation.into(),
            scale: Vec3::from(spec.transform.scale).x,
            visible: true,
            alive: true,
        });
        self.objects.len() - 1
    }

    fn set_transform(&mut self, handle: &usize, transform: &ObjectTransform) {
        if let Some(object) = self.objects.get_mut(*handle) {
            object.translation = transform.translation.into();
            object.scale = Vec3::from(transform.scale).x;
        }
    }

    fn set_visible(&mut self, handle: &usize, visible: bool) {
        if let Some(object) = self.objects.get_mut(*handle) {
            object.visible = visible;
        }
    }

    fn despawn(&mut self, handle: usize) {
        if let Some(object) = self.objects.get_mut(handle) {
            object.alive = false;
        }
    }
}

/// Draws every live, visible object of `scene` and writes a PNG to `path`.
pub fn render_scene_to_png(
    scene: &PreviewScene,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    let mut drawn = 0usize;
    for object in scene.objects.iter().filter(|o| o.alive && o.visible) {
        let center = config.to_pixel(object.translation);
        let radius = (config.radius * object.scale.abs()).max(1.0);
        fill_disc(&mut img, center, radius, Rgb(object.color_tag.rgb()));
        drawn += 1;
    }

    let path = path.as_ref();
    img.save(path)?;
    info!("Wrote {} ({} objects).", path.display(), drawn);
    Ok(())
}

fn fill_disc(img: &mut RgbImage, center: Vec2, radius: f32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let x0 = (center.x - radius).floor().max(0.0) as u32;
    let y0 = (center.y - radius).floor().max(0.0) as u32;
    let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(w);
    let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(h);
    let r2 = radius * radius;

    for y in y0..y1 {
        for x in x0..x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if d.length_squared() <= r2 {
                img.put_pixel(x, y, color);
            }
        }
    }
}
