// web/ - Browser glue
//
// DOM lookups, event wiring and the Three.js bridge. Built for wasm32 only.

mod app;
mod bridge;
mod dom;
