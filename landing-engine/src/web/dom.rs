// dom.rs - Page elements and the DOM-backed stage
//
// Every element the page needs is looked up once, before anything runs.
// A missing one stops the boot.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, Window};

use crate::config::Selectors;
use crate::error::{LandingError, Result};
use crate::scene::{SceneBackend, SceneContext, Viewport, route_cue};
use crate::scroll::{Cue, Layout, Stage};
use crate::section::SectionId;

pub struct Dom {
    window: Window,
    elements: HashMap<SectionId, HtmlElement>,
    canvas: HtmlCanvasElement,
}

impl Dom {
    pub fn locate(window: Window, selectors: &Selectors) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| LandingError::missing("document"))?;

        let mut elements = HashMap::new();
        for id in SectionId::ALL {
            let selector = selectors.get(id);
            let element = document
                .query_selector(selector)?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .ok_or_else(|| LandingError::missing(selector))?;
            elements.insert(id, element);
        }

        let canvas = elements[&SectionId::Canvas]
            .clone()
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| LandingError::missing(format!("{} (canvas)", selectors.canvas)))?;

        Ok(Self {
            window,
            elements,
            canvas,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    pub fn viewport(&self) -> Viewport {
        let px = |v: Result<f64>| v.unwrap_or(0.0).max(0.0) as u32;
        Viewport::new(px(self.inner(true)), px(self.inner(false)))
    }

    /// Geometry of `id` in document coordinates, for range resolution.
    pub fn layout_of(&self, id: SectionId) -> Layout {
        let rect = self.elements[&id].get_bounding_client_rect();
        Layout {
            viewport_height: self.inner(false).unwrap_or(0.0),
            trigger_top: rect.top() + self.scroll_offset(),
            trigger_height: rect.height(),
        }
    }

    pub fn set_display(&self, id: SectionId, value: &str) {
        self.set_style(id, "display", value);
    }

    pub fn set_opacity(&self, id: SectionId, value: f64) {
        self.set_style(id, "opacity", &format!("{value:.3}"));
    }

    pub fn set_rotation(&self, id: SectionId, degrees: f64) {
        self.set_style(id, "transform", &format!("rotate({degrees:.2}deg)"));
    }

    fn set_style(&self, id: SectionId, property: &str, value: &str) {
        if let Err(e) = self.elements[&id].style().set_property(property, value) {
            log::warn!("{id:?}: could not set {property}: {e:?}");
        }
    }

    fn inner(&self, width: bool) -> Result<f64> {
        let value = if width {
            self.window.inner_width()?
        } else {
            self.window.inner_height()?
        };
        Ok(value.as_f64().unwrap_or(0.0))
    }
}

/// Stage that writes inline styles and forwards avatar cues to the scene,
/// when the page has one.
pub struct DomStage<'a, B: SceneBackend> {
    pub dom: &'a Dom,
    pub scene: Option<&'a mut SceneContext<B>>,
}

impl<B: SceneBackend> Stage for DomStage<'_, B> {
    fn set_opacity(&mut self, target: SectionId, value: f64) {
        self.dom.set_opacity(target, value);
    }

    fn set_rotation(&mut self, target: SectionId, degrees: f64) {
        self.dom.set_rotation(target, degrees);
    }

    fn cue(&mut self, cue: Cue) {
        match route_cue(self.scene.as_deref_mut(), cue) {
            Some(Cue::Show { section }) => self.dom.set_display(section, ""),
            Some(Cue::Hide { section }) => self.dom.set_display(section, "none"),
            _ => {}
        }
    }
}
