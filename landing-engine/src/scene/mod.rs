// scene/ - 3D scene state and per-frame update
//
// One owned context per canvas. The renderer behind it is reached only
// through `SceneBackend`, so the frame logic runs the same against
// Three.js in the browser and a recorder in tests.

mod avatar;
mod buffer;
mod camera;
mod mixer;
mod particles;

pub use avatar::{AvatarAsset, AvatarEntity, Clip, Submesh, Transform};
pub use buffer::PositionBuffer;
pub use camera::{Camera, Viewport};
pub use mixer::AnimationMixer;
pub use particles::{ParticleBounds, ParticleField};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::scroll::Cue;

// Longest step a single frame may take; covers tab switches.
const MAX_FRAME_DT: f32 = 0.1;

pub trait SceneBackend {
    fn resize(&mut self, camera: &Camera, viewport: Viewport);
    /// Packed xyz, one triple per particle.
    fn set_particles(&mut self, positions: &[f32]);
    /// Called every frame once the avatar is loaded. `submeshes` is in the
    /// order the loader reported them.
    fn set_avatar(&mut self, visible: bool, submeshes: &[Submesh]);
    fn set_animation_time(&mut self, seconds: f32);
    fn render(&mut self);
}

// Last avatar request made while the model was still loading.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Visible(bool),
    Fade { target: f32, duration: f32 },
}

pub struct SceneContext<B: SceneBackend> {
    viewport: Viewport,
    camera: Camera,

    // Entities
    avatar: Option<AvatarEntity>,
    avatar_transform: Transform,
    particles: ParticleField,
    mixer: AnimationMixer,

    // Output
    positions: PositionBuffer,
    backend: B,

    pending: Option<Pending>,
    fade_in_secs: f32,
    fade_out_secs: f32,
}

impl<B: SceneBackend> SceneContext<B> {
    pub fn initialize(config: &SceneConfig, viewport: Viewport, mut backend: B) -> Self {
        let mut camera = config.camera();
        camera.fit(viewport);
        backend.resize(&camera, viewport);

        log::info!(
            "scene ready: {}x{}, {} particles",
            viewport.width,
            viewport.height,
            config.particle_count
        );

        Self {
            viewport,
            camera,
            avatar: None,
            avatar_transform: config.avatar_transform(),
            particles: ParticleField::new(config.particle_count, config.particles),
            mixer: AnimationMixer::new(),
            positions: PositionBuffer::with_capacity(config.particle_count),
            backend,
            pending: None,
            fade_in_secs: config.fade_in_secs,
            fade_out_secs: config.fade_out_secs,
        }
    }

    /// Take the outcome of the model load. A failure is logged and the
    /// scene keeps running without an avatar.
    pub fn attach_avatar(&mut self, loaded: Result<AvatarAsset>) {
        let asset = match loaded {
            Ok(asset) => asset,
            Err(e) => {
                log::error!("{e}; continuing without avatar");
                return;
            }
        };

        log::info!(
            "avatar loaded: {} submeshes ({} hidden)",
            asset.submeshes.len(),
            asset.submeshes.iter().filter(|v| !**v).count()
        );
        self.mixer.play(asset.clip.clone());
        let mut avatar = AvatarEntity::new(&asset, self.avatar_transform);
        match self.pending.take() {
            Some(Pending::Visible(v)) => avatar.set_visible(v),
            Some(Pending::Fade { target, duration }) => avatar.fade_to(target, duration),
            None => {}
        }
        self.avatar = Some(avatar);
    }

    /// Take the outcome of the sprite load. Without it particles are drawn
    /// untextured.
    pub fn attach_sprite(&mut self, loaded: Result<()>) {
        match loaded {
            Ok(()) => log::debug!("particle sprite loaded"),
            Err(e) => log::warn!("{e}; particles drawn without sprite"),
        }
    }

    pub fn render_frame(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        if let Some(t) = self.mixer.advance(dt) {
            self.backend.set_animation_time(t);
        }

        self.particles.update(dt);
        self.particles.write_positions(&mut self.positions);
        self.backend.set_particles(self.positions.as_slice());

        if let Some(avatar) = &mut self.avatar {
            avatar.advance(dt);
            self.backend.set_avatar(avatar.visible(), avatar.submeshes());
        }

        self.backend.render();
    }

    pub fn set_avatar_opacity(&mut self, target: f32, duration: f32) {
        match &mut self.avatar {
            Some(avatar) => avatar.fade_to(target, duration),
            None => self.pending = Some(Pending::Fade { target, duration }),
        }
    }

    pub fn set_avatar_visible(&mut self, visible: bool) {
        match &mut self.avatar {
            Some(avatar) => avatar.set_visible(visible),
            None => self.pending = Some(Pending::Visible(visible)),
        }
    }

    /// Handle the avatar cues; returns false for cues meant for the page.
    pub fn apply_cue(&mut self, cue: Cue) -> bool {
        match cue {
            Cue::AvatarFadeIn => self.set_avatar_opacity(1.0, self.fade_in_secs),
            Cue::AvatarFadeOut => self.set_avatar_opacity(0.0, self.fade_out_secs),
            Cue::Show { .. } | Cue::Hide { .. } => return false,
        }
        true
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport || !self.camera.fit(viewport) {
            return;
        }
        self.viewport = viewport;
        self.backend.resize(&self.camera, viewport);
    }

    pub fn avatar(&self) -> Option<&AvatarEntity> {
        self.avatar.as_ref()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Hand avatar cues to the scene, if there is one. Cues the page has to
/// handle itself come back out.
pub fn route_cue<B: SceneBackend>(
    scene: Option<&mut SceneContext<B>>,
    cue: Cue,
) -> Option<Cue> {
    match scene {
        Some(scene) => {
            if scene.apply_cue(cue) {
                None
            } else {
                Some(cue)
            }
        }
        None => match cue {
            Cue::AvatarFadeIn | Cue::AvatarFadeOut => {
                log::debug!("{cue:?} dropped, no 3D scene");
                None
            }
            Cue::Show { .. } | Cue::Hide { .. } => Some(cue),
        },
    }
}
