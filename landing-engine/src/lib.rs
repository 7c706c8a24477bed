// ============================================================================
// LANDING ENGINE - Intro hand-off, scroll choreography and avatar scene
// ============================================================================
//
// Everything except `web` is plain Rust and runs on the host; `web` wires
// it to the DOM and Three.js when built for wasm32.

pub mod config;
pub mod error;
pub mod intro;
pub mod scene;
pub mod scroll;
pub mod section;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::PageConfig;
pub use error::{LandingError, Result};
pub use intro::{IntroController, IntroFrame, IntroStrategy};
pub use scene::{SceneBackend, SceneContext, Viewport};
pub use scroll::{Choreographer, Stage};
pub use section::{Phase, SectionId};
