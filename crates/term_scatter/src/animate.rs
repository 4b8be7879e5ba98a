//! Control-panel state and per-frame idle motion.
//!
//! [`ViewState`] is the explicit replacement for a shared mutable settings
//! object: the control panel writes it, [`Animator::update`] reads it once per
//! frame. Idle motions advance by a fixed step per call, so their speed follows
//! the frame rate.
use std::time::Instant;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scene::{SceneSink, ScenePopulation};
use crate::terms::ColorTag;

/// Angular speed of the orbiting camera in radians per second.
pub const CAMERA_ORBIT_SPEED: f32 = 0.2;
/// Height lost per frame by a dropping object with seed 1.
pub const STAR_DROP_STEP: f32 = 0.05;
/// Fixed camera position while objects drop.
pub const STAR_DROP_CAMERA: Vec3 = Vec3::new(0.0, 0.0, 20.0);
/// Horizontal drift per frame of a bubble.
pub const BUBBLE_DRIFT_STEP: f32 = 0.5;

/// Idle motion applied to placed objects.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdleMotion {
    #[default]
    None,
    /// Objects sink towards their normalized index height at a seed-scaled speed.
    StarDrop,
    /// Objects pulse in scale and wander on the x/z plane.
    Bubbles,
}

/// Mutable view state owned by the control panel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    visible: [bool; 3],
    pub rotate_camera: bool,
    pub idle: IdleMotion,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            visible: [true; 3],
            rotate_camera: false,
            idle: IdleMotion::None,
        }
    }
}

impl ViewState {
    pub fn is_visible(&self, tag: ColorTag) -> bool {
        self.visible[tag.index()]
    }

    pub fn set_visible(&mut self, tag: ColorTag, visible: bool) {
        self.visible[tag.index()] = visible;
    }

    pub fn with_idle(mut self, idle: IdleMotion) -> Self {
        self.idle = idle;
        self
    }

    pub fn with_camera_rotation(mut self, rotate: bool) -> Self {
        self.rotate_camera = rotate;
        self
    }
}

/// Wall clock measuring elapsed seconds since creation.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Camera position on a horizontal circle of `radius` at `height`.
pub fn camera_orbit(elapsed: f32, radius: f32, height: f32) -> Vec3 {
    let angle = elapsed * CAMERA_ORBIT_SPEED;
    Vec3::new(angle.sin() * radius, height, angle.cos() * radius)
}

/// Outcome of one [`Animator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUpdate {
    /// New camera position when the camera orbits or is pinned by star drop.
    pub camera: Option<Vec3>,
    /// Number of objects whose transform was pushed to the scene.
    pub moved: usize,
}

/// Applies the active idle motion to a population each frame.
#[derive(Debug, Clone)]
pub struct Animator {
    pub camera_radius: f32,
    pub camera_height: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            camera_radius: 16.0,
            camera_height: 0.0,
        }
    }
}

impl Animator {
    pub fn new(camera_radius: f32, camera_height: f32) -> Self {
        Self {
            camera_radius,
            camera_height,
        }
    }

    /// Advances one frame at `elapsed` seconds. Hidden objects are left alone.
    pub fn update<H, S>(
        &self,
        population: &mut ScenePopulation<H>,
        view: &ViewState,
        elapsed: f32,
        sink: &mut S,
    ) -> FrameUpdate
    where
        H: Clone,
        S: SceneSink<Handle = H> + ?Sized,
    {
        population.apply_visibility(|tag| view.is_visible(tag), sink);

        let mut moved = 0;
        for object in population.iter_mut().filter(|o| o.visible) {
            let changed = match view.idle {
                IdleMotion::None => false,
                IdleMotion::StarDrop => {
                    let floor = object.request.normalized_index;
                    if object.translation.y > floor {
                        object.translation.y -= STAR_DROP_STEP * object.request.seed;
                        true
                    } else {
                        false
                    }
                }
                IdleMotion::Bubbles => {
                    let pulse = (elapsed * object.request.seed).sin();
                    let phase = elapsed * object.request.drift;
                    object.scale = Vec3::splat(pulse);
                    object.translation.x += phase.cos() * BUBBLE_DRIFT_STEP;
                    object.translation.z += phase.sin() * BUBBLE_DRIFT_STEP;
                    true
                }
            };
            if changed {
                sink.set_transform(&object.handle, &object.transform());
                moved += 1;
            }
        }

        // Star drop pins the camera even while orbiting is enabled.
        let camera = if view.idle == IdleMotion::StarDrop {
            Some(STAR_DROP_CAMERA)
        } else {
            view.rotate_camera
                .then(|| camera_orbit(elapsed, self.camera_radius, self.camera_height))
        };

        FrameUpdate { camera, moved }
    }
}
