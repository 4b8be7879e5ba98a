//! Contract with the scene collaborator.
//!
//! The rendering toolkit implements [`SceneSink`]. A [`ScenePopulation`] keeps
//! the handles it returned together with the request each object came from, so
//! per-frame code walks that collection instead of searching the scene graph.
use glam::Vec3;
use tracing::debug;

use crate::scatter::PlacementRequest;
use crate::terms::ColorTag;

/// Transform handed to the toolkit. Rotation is Euler XYZ in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub translation: mint::Vector3<f32>,
    pub rotation: mint::Vector3<f32>,
    pub scale: mint::Vector3<f32>,
}

impl ObjectTransform {
    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation: translation.into(),
            rotation: rotation.into(),
            scale: scale.into(),
        }
    }
}

/// Everything the toolkit needs to instantiate one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSpec {
    pub color_tag: ColorTag,
    pub transform: ObjectTransform,
    /// Idle-animation seed, for toolkits that animate on their own.
    pub seed: f32,
}

/// Scene-mutation collaborator implemented by the rendering toolkit.
pub trait SceneSink {
    type Handle: Clone;

    fn spawn(&mut self, spec: &SpawnSpec) -> Self::Handle;

    fn set_transform(&mut self, handle: &Self::Handle, transform: &ObjectTransform);

    fn set_visible(&mut self, handle: &Self::Handle, visible: bool);

    fn despawn(&mut self, handle: Self::Handle);
}

/// An object spawned from a request, with its current transform.
#[derive(Debug, Clone)]
pub struct PlacedObject<H> {
    pub handle: H,
    pub request: PlacementRequest,
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub visible: bool,
}

impl<H> PlacedObject<H> {
    pub fn transform(&self) -> ObjectTransform {
        ObjectTransform::new(self.translation, self.rotation, self.scale)
    }
}

/// Owned collection of the objects spawned for placement requests.
#[derive(Debug, Clone)]
pub struct ScenePopulation<H> {
    objects: Vec<PlacedObject<H>>,
}

impl<H> Default for ScenePopulation<H> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl<H: Clone> ScenePopulation<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns one object per request at `request.position(height_offset)`.
    ///
    /// Returns the number of objects spawned. Existing objects are kept.
    pub fn populate<S>(
        &mut self,
        requests: &[PlacementRequest],
        height_offset: f32,
        sink: &mut S,
    ) -> usize
    where
        S: SceneSink<Handle = H> + ?Sized,
    {
        self.objects.reserve(requests.len());
        for request in requests {
            let translation = request.position(height_offset);
            let transform = ObjectTransform::new(translation, request.rotation, Vec3::ONE);
            let handle = sink.spawn(&SpawnSpec {
                color_tag: request.color_tag,
                transform,
                seed: request.seed,
            });
            self.objects.push(PlacedObject {
                handle,
                request: request.clone(),
                translation,
                rotation: request.rotation,
                scale: Vec3::ONE,
                visible: true,
            });
        }
        debug!(
            "Spawned {} objects; population is now {}.",
            requests.len(),
            self.objects.len()
        );
        requests.len()
    }

    /// Despawns every object and empties the population.
    pub fn clear<S>(&mut self, sink: &mut S)
    where
        S: SceneSink<Handle = H> + ?Sized,
    {
        for object in self.objects.drain(..) {
            sink.despawn(object.handle);
        }
    }

    /// Shows or hides every object whose tag visibility changed.
    pub fn apply_visibility<S>(&mut self, is_visible: impl Fn(ColorTag) -> bool, sink: &mut S)
    where
        S: SceneSink<Handle = H> + ?Sized,
    {
        for object in &mut self.objects {
            let visible = is_visible(object.request.color_tag);
            if object.visible != visible {
                object.visible = visible;
                sink.set_visible(&object.handle, visible);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject<H>> + '_ {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedObject<H>> + '_ {
        self.objects.iter_mut()
    }
}
