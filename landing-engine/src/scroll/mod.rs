// scroll/ - Scroll choreography
//
// Edges resolve to offsets, ranges turn offsets into progress, bindings
// turn progress into property values and cues.

mod binding;
mod choreographer;
mod ease;
mod edge;
mod range;

pub use binding::{BindingSpec, Boundary, Cue, Effect, Property, Scrub};
pub use choreographer::{Choreographer, Stage};
pub use ease::Ease;
pub use edge::{Anchor, Edge, Layout};
pub use range::{Region, ResolvedRange, ScrollRange};
