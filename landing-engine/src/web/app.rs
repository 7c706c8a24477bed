// app.rs - Boot sequence
//
// ready -> markup check -> intro -> scene + choreography -> frame loop.
// Nothing is torn down: the page lifetime is the program lifetime. Without
// a 3D scene the scroll effects still run; only the avatar is lost.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Date, Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Window};

use super::bridge::{self, ThreeBackend, ThreeScene};
use super::dom::{Dom, DomStage};
use crate::config::PageConfig;
use crate::error::{LandingError, Result};
use crate::intro::{IntroController, IntroFrame};
use crate::scene::SceneContext;
use crate::scroll::Choreographer;
use crate::section::SectionId;

const CONFIG_ELEMENT: &str = "landing-config";

// Browser-side state shared by the event handlers and the frame loop.
struct Page {
    dom: Dom,
    choreographer: Choreographer,
    scene: Option<SceneContext<ThreeBackend>>,
}

impl Page {
    fn on_scroll(&mut self) {
        let offset = self.dom.scroll_offset();
        let mut stage = DomStage {
            dom: &self.dom,
            scene: self.scene.as_mut(),
        };
        self.choreographer.update(offset, &mut stage);
    }

    fn on_resize(&mut self) {
        if let Some(scene) = &mut self.scene {
            scene.on_resize(self.dom.viewport());
        }
        let dom = &self.dom;
        if let Err(e) = self.choreographer.relayout(|id| dom.layout_of(id)) {
            log::error!("relayout rejected, keeping previous ranges: {e}");
        }
        self.on_scroll();
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let window = web_sys::window();
    let loaded = window
        .as_ref()
        .and_then(|w| w.document())
        .map(|d| read_config(&d))
        .unwrap_or_else(|| Ok(PageConfig::default()));

    let level = match &loaded {
        Ok(c) if c.diagnostics => log::Level::Debug,
        _ => log::Level::Info,
    };
    console_log::init_with_level(level).ok();

    let config = loaded.unwrap_or_else(|e| {
        log::error!("{e}; using default page config");
        PageConfig::default()
    });
    let Some(window) = window else {
        log::error!("no window, nothing to do");
        return;
    };

    spawn_local(async move {
        if let Err(e) = boot(window, config).await {
            log::error!("landing page failed to start: {e}");
        }
    });
}

fn read_config(document: &Document) -> Result<PageConfig> {
    match document
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => PageConfig::from_json(&json),
        _ => Ok(PageConfig::default()),
    }
}

async fn boot(window: Window, config: PageConfig) -> Result<()> {
    page_ready(&window).await?;
    let dom = Dom::locate(window.clone(), &config.selectors)?;

    run_intro(&window, &dom, &config).await?;

    let three = match ThreeScene::new(dom.canvas()) {
        Ok(three) => Some(three),
        Err(e) => {
            log::error!(
                "3D scene unavailable, running scroll effects only: {}",
                LandingError::from(e)
            );
            None
        }
    };
    let mut scene = three.as_ref().map(|three| {
        SceneContext::initialize(
            &config.scene,
            dom.viewport(),
            ThreeBackend::new(three.clone()),
        )
    });

    // Ranges resolve now that the landing page has a layout.
    let mut choreographer = Choreographer::from_specs(&config.bindings, |id| dom.layout_of(id))?;
    let offset = dom.scroll_offset();
    let mut stage = DomStage {
        dom: &dom,
        scene: scene.as_mut(),
    };
    choreographer.reconcile(offset, &mut stage);
    log::debug!(
        "{} bindings reconciled at {offset:.0}px",
        choreographer.len()
    );

    let page = Rc::new(RefCell::new(Page {
        dom,
        choreographer,
        scene,
    }));

    listen(&window, "scroll", {
        let page = page.clone();
        move || page.borrow_mut().on_scroll()
    })?;
    listen(&window, "resize", {
        let page = page.clone();
        move || page.borrow_mut().on_resize()
    })?;

    match three {
        Some(three) => {
            load_assets(&page, &three, &config);
            frame_loop(&window, &page).await
        }
        None => Ok(()),
    }
}

async fn page_ready(window: &Window) -> Result<()> {
    let document = window
        .document()
        .ok_or_else(|| LandingError::missing("document"))?;
    if document.ready_state() == "complete" {
        return Ok(());
    }

    resolved_by(|done| window.add_event_listener_with_callback("load", done)).await?;
    Ok(())
}

// Await a one-shot browser callback registered by `register`.
async fn resolved_by<T>(
    register: impl FnOnce(&Function) -> std::result::Result<T, JsValue>,
) -> Result<JsValue> {
    let mut register = Some(register);
    let mut failed = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(register) = register.take() {
            if let Err(e) = register(&resolve) {
                failed = Some(e);
            }
        }
    });
    if let Some(e) = failed {
        return Err(e.into());
    }
    Ok(JsFuture::from(promise).await?)
}

async fn next_frame(window: &Window) -> Result<f64> {
    let stamp = resolved_by(|done| window.request_animation_frame(done)).await?;
    Ok(stamp.as_f64().unwrap_or(0.0))
}

// Timers keep firing (throttled) in background tabs; animation frames don't.
async fn sleep(window: &Window, ms: f64) -> Result<()> {
    let ms = ms.ceil().min(i32::MAX as f64) as i32;
    resolved_by(|done| window.set_timeout_with_callback_and_timeout_and_arguments_0(done, ms))
        .await?;
    Ok(())
}

async fn run_intro(window: &Window, dom: &Dom, config: &PageConfig) -> Result<()> {
    let mut intro = IntroController::new(config.intro);
    apply_intro(dom, intro.start(Date::now()));
    while !intro.is_done() {
        let hold = intro.hold_remaining(Date::now());
        if hold > 0.0 {
            sleep(window, hold).await?;
        } else {
            next_frame(window).await?;
        }
        apply_intro(dom, intro.advance(Date::now()));
    }
    Ok(())
}

fn apply_intro(dom: &Dom, frame: IntroFrame) {
    dom.set_opacity(SectionId::Intro, frame.intro_opacity);
    dom.set_display(
        SectionId::Intro,
        if frame.intro_displayed { "" } else { "none" },
    );
    dom.set_display(
        SectionId::Landing,
        if frame.landing_displayed { "flex" } else { "none" },
    );
}

// Both loads run on their own; either may fail without touching the other.
fn load_assets(page: &Rc<RefCell<Page>>, three: &ThreeScene, config: &PageConfig) {
    let sprite_path = config.assets.sprite.clone();
    spawn_local({
        let page = page.clone();
        let three = three.clone();
        async move {
            let loaded = bridge::load_sprite(&three, &sprite_path).await;
            if let Some(scene) = &mut page.borrow_mut().scene {
                scene.attach_sprite(loaded);
            }
        }
    });

    let model_path = config.assets.model.clone();
    let transform = config.scene.avatar_transform();
    spawn_local({
        let page = page.clone();
        let three = three.clone();
        async move {
            let loaded = bridge::load_avatar(&three, &model_path, &transform).await;
            if let Some(scene) = &mut page.borrow_mut().scene {
                scene.attach_avatar(loaded);
            }
        }
    });
}

async fn frame_loop(window: &Window, page: &Rc<RefCell<Page>>) -> Result<()> {
    let mut last = next_frame(window).await?;
    loop {
        let now = next_frame(window).await?;
        let dt = ((now - last) / 1000.0) as f32;
        last = now;
        if let Some(scene) = &mut page.borrow_mut().scene {
            scene.render_frame(dt);
        }
    }
}

fn listen(window: &Window, event: &str, handler: impl FnMut() + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
