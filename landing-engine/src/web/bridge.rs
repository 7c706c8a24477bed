// bridge.rs - Three.js behind a small JS shim
//
// The shim owns the WebGL renderer, the GLTF loader and the scene graph.
// Rust decides what is visible and when; JS only draws.

use js_sys::{Array, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlCanvasElement;

use crate::error::{LandingError, Result};
use crate::scene::{AvatarAsset, Camera, Clip, SceneBackend, Submesh, Transform, Viewport};

#[wasm_bindgen(module = "/js/three_bridge.js")]
extern "C" {
    #[derive(Clone)]
    pub type ThreeScene;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(canvas: &HtmlCanvasElement) -> std::result::Result<ThreeScene, JsValue>;

    #[wasm_bindgen(method, js_name = setCamera)]
    fn set_camera(
        this: &ThreeScene,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
        position: &[f32],
        target: &[f32],
    );

    #[wasm_bindgen(method, js_name = setSize)]
    fn set_size(this: &ThreeScene, width: u32, height: u32);

    #[wasm_bindgen(method, js_name = setParticles)]
    fn set_particles(this: &ThreeScene, positions: &[f32]);

    /// One opacity per submesh, in `loadAvatar` order.
    #[wasm_bindgen(method, js_name = setAvatar)]
    fn set_avatar(this: &ThreeScene, visible: bool, opacities: &[f32]);

    #[wasm_bindgen(method, js_name = setAnimationTime)]
    fn set_animation_time(this: &ThreeScene, seconds: f32);

    #[wasm_bindgen(method)]
    fn render(this: &ThreeScene);

    /// Resolves to `{ submeshes: bool[], clip: { name, duration } | null }`.
    #[wasm_bindgen(method, js_name = loadAvatar)]
    fn load_avatar(
        this: &ThreeScene,
        path: &str,
        position: &[f32],
        rotation: &[f32],
        scale: &[f32],
    ) -> Promise;

    #[wasm_bindgen(method, js_name = loadSprite)]
    fn load_sprite(this: &ThreeScene, path: &str) -> Promise;
}

pub struct ThreeBackend {
    scene: ThreeScene,
    opacities: Vec<f32>,
}

impl ThreeBackend {
    pub fn new(scene: ThreeScene) -> Self {
        Self {
            scene,
            opacities: Vec::new(),
        }
    }
}

impl SceneBackend for ThreeBackend {
    fn resize(&mut self, camera: &Camera, viewport: Viewport) {
        self.scene.set_camera(
            camera.fov,
            camera.aspect,
            camera.near,
            camera.far,
            &camera.position.to_array(),
            &camera.target.to_array(),
        );
        self.scene.set_size(viewport.width, viewport.height);
    }

    fn set_particles(&mut self, positions: &[f32]) {
        self.scene.set_particles(positions);
    }

    fn set_avatar(&mut self, visible: bool, submeshes: &[Submesh]) {
        self.opacities.clear();
        self.opacities.extend(submeshes.iter().map(|m| m.opacity));
        self.scene.set_avatar(visible, &self.opacities);
    }

    fn set_animation_time(&mut self, seconds: f32) {
        self.scene.set_animation_time(seconds);
    }

    fn render(&mut self) {
        self.scene.render();
    }
}

pub async fn load_avatar(
    scene: &ThreeScene,
    path: &str,
    transform: &Transform,
) -> Result<AvatarAsset> {
    let promise = scene.load_avatar(
        path,
        &transform.position.to_array(),
        &transform.rotation.to_array(),
        &transform.scale.to_array(),
    );
    let info = JsFuture::from(promise)
        .await
        .map_err(|e| LandingError::asset(path, describe(&e)))?;

    let submeshes = field(&info, "submeshes")
        .filter(Array::is_array)
        .map(|v| {
            Array::from(&v)
                .iter()
                .map(|m| m.as_bool().unwrap_or(true))
                .collect()
        })
        .unwrap_or_default();
    let clip = field(&info, "clip")
        .filter(|c| c.is_object())
        .map(|c| Clip {
            name: field(&c, "name").and_then(|v| v.as_string()).unwrap_or_default(),
            duration: field(&c, "duration").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
        });

    Ok(AvatarAsset { submeshes, clip })
}

pub async fn load_sprite(scene: &ThreeScene, path: &str) -> Result<()> {
    JsFuture::from(scene.load_sprite(path))
        .await
        .map(|_| ())
        .map_err(|e| LandingError::asset(path, describe(&e)))
}

fn field(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| field(err, "message").and_then(|m| m.as_string()))
        .unwrap_or_else(|| format!("{err:?}"))
}
