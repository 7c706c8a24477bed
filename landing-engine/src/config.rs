// config.rs - Page configuration
//
// Everything numeric about the page lives here. Defaults describe the
// shipped page; an inline JSON block can override any part of it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::intro::IntroStrategy;
use crate::scene::{Camera, ParticleBounds, Transform};
use crate::scroll::{
    Anchor, BindingSpec, Boundary, Cue, Ease, Edge, Effect, Property, ScrollRange, Scrub,
};
use crate::section::SectionId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub intro: IntroStrategy,
    pub selectors: Selectors,
    pub assets: AssetPaths,
    pub scene: SceneConfig,
    pub bindings: Vec<BindingSpec>,
    /// Debug-level console output (boundary cues, load timings).
    pub diagnostics: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            intro: IntroStrategy::default(),
            selectors: Selectors::default(),
            assets: AssetPaths::default(),
            scene: SceneConfig::default(),
            bindings: default_bindings(),
            diagnostics: false,
        }
    }
}

impl PageConfig {
    /// Parse overrides; anything left out keeps its default.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub intro: String,
    pub landing: String,
    pub intro_text: String,
    pub scroll_content: String,
    pub overlay: String,
    pub overlay_heading: String,
    pub overlay_paragraph: String,
    pub avatar_image: String,
    pub canvas: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            intro: "#intro".into(),
            landing: ".landing-page".into(),
            intro_text: ".intro-text".into(),
            scroll_content: ".scroll-content".into(),
            overlay: ".overlay".into(),
            overlay_heading: ".overlay h2".into(),
            overlay_paragraph: ".overlay p".into(),
            avatar_image: ".avatar-img".into(),
            canvas: "#avatar-canvas".into(),
        }
    }
}

impl Selectors {
    pub fn get(&self, id: SectionId) -> &str {
        match id {
            SectionId::Intro => &self.intro,
            SectionId::Landing => &self.landing,
            SectionId::IntroText => &self.intro_text,
            SectionId::ScrollContent => &self.scroll_content,
            SectionId::Overlay => &self.overlay,
            SectionId::OverlayHeading => &self.overlay_heading,
            SectionId::OverlayParagraph => &self.overlay_paragraph,
            SectionId::AvatarImage => &self.avatar_image,
            SectionId::Canvas => &self.canvas,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub model: String,
    pub sprite: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            model: "assets/avatar.glb".into(),
            sprite: "assets/particle.png".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],

    pub avatar_position: [f32; 3],
    /// Degrees.
    pub avatar_rotation: [f32; 3],
    pub avatar_scale: f32,

    pub particle_count: usize,
    pub particles: ParticleBounds,

    /// Seconds for the boundary-driven avatar fades.
    pub fade_in_secs: f32,
    pub fade_out_secs: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            camera_position: [0.0, 1.5, 5.0],
            camera_target: [0.0, 1.0, 0.0],
            avatar_position: [0.0, -1.0, 0.0],
            avatar_rotation: [0.0, 0.0, 0.0],
            avatar_scale: 1.5,
            particle_count: 600,
            particles: ParticleBounds::default(),
            fade_in_secs: 1.0,
            fade_out_secs: 0.6,
        }
    }
}

impl SceneConfig {
    pub fn camera(&self) -> Camera {
        Camera {
            fov: self.fov,
            near: self.near,
            far: self.far,
            aspect: 1.0,
            position: Vec3::from(self.camera_position),
            target: Vec3::from(self.camera_target),
        }
    }

    pub fn avatar_transform(&self) -> Transform {
        let [x, y, z] = self.avatar_rotation;
        Transform {
            position: Vec3::from(self.avatar_position),
            rotation: Vec3::new(x.to_radians(), y.to_radians(), z.to_radians()),
            scale: Vec3::splat(self.avatar_scale),
        }
    }
}

fn edge(trigger: Anchor, viewport: Anchor) -> Edge {
    Edge::new(trigger, viewport)
}

/// The shipped page: intro text fades out over the first 100px, the 2D
/// avatar waves while the landing page is on screen, the overlay copy
/// fades in, and the 3D avatar appears once the overlay reaches mid-screen.
pub fn default_bindings() -> Vec<BindingSpec> {
    use Anchor::{Bottom, Center, Percent, Px, Top};

    vec![
        BindingSpec {
            trigger: SectionId::ScrollContent,
            target: SectionId::IntroText,
            range: ScrollRange::new(edge(Top, Top), edge(Px(100.0), Top)),
            effect: Effect::Scrub(Scrub::new(Property::Opacity, 1.0, 0.0)),
        },
        BindingSpec {
            trigger: SectionId::Landing,
            target: SectionId::AvatarImage,
            range: ScrollRange::new(edge(Top, Percent(80.0)), edge(Bottom, Top)),
            effect: Effect::Scrub(
                Scrub::new(Property::Rotation, 0.0, 10.0)
                    .eased(Ease::QuadInOut)
                    .yoyo(4),
            ),
        },
        BindingSpec {
            trigger: SectionId::Overlay,
            target: SectionId::OverlayHeading,
            range: ScrollRange::new(edge(Top, Percent(80.0)), edge(Top, Percent(40.0))),
            effect: Effect::Scrub(Scrub::new(Property::Opacity, 0.0, 1.0)),
        },
        BindingSpec {
            trigger: SectionId::Overlay,
            target: SectionId::OverlayParagraph,
            range: ScrollRange::new(edge(Top, Percent(70.0)), edge(Top, Percent(30.0))),
            effect: Effect::Scrub(Scrub::new(Property::Opacity, 0.0, 1.0)),
        },
        BindingSpec {
            trigger: SectionId::Overlay,
            target: SectionId::Canvas,
            range: ScrollRange::new(edge(Top, Bottom), edge(Top, Center)),
            effect: Effect::Boundary(Boundary {
                on_leave: Some(Cue::AvatarFadeIn),
                on_enter_back: Some(Cue::AvatarFadeOut),
                ..Boundary::default()
            }),
        },
    ]
}
