// choreographer.rs - Applies scroll bindings to a stage
//
// Scrub bindings are grouped into tracks, one per target property, and
// evaluated from scratch on every update. Boundary bindings remember only
// the region they were last seen in, so each crossing fires once.

use super::binding::{BindingSpec, Boundary, Cue, Effect, Property, Scrub};
use super::edge::Layout;
use super::range::{Region, ResolvedRange};
use crate::error::Result;
use crate::section::SectionId;

/// Whatever the choreographer drives: the DOM in the browser, a recorder
/// in tests.
pub trait Stage {
    fn set_opacity(&mut self, target: SectionId, value: f64);
    fn set_rotation(&mut self, target: SectionId, degrees: f64);
    fn cue(&mut self, cue: Cue);
}

struct Segment {
    spec: usize,
    range: ResolvedRange,
    scrub: Scrub,
}

struct Track {
    target: SectionId,
    property: Property,
    // sorted by range start, registration order among equal starts
    segments: Vec<Segment>,
}

impl Track {
    fn value(&self, offset: f64) -> f64 {
        match self.segments.iter().rev().find(|s| s.range.start() <= offset) {
            Some(seg) => seg.scrub.value_at(seg.range.progress(offset)),
            None => self.segments[0].scrub.value_at(0.0),
        }
    }

    fn sort(&mut self) {
        self.segments
            .sort_by(|a, b| a.range.start().total_cmp(&b.range.start()));
    }
}

struct Gate {
    spec: usize,
    target: SectionId,
    range: ResolvedRange,
    boundary: Boundary,
    region: Region,
}

#[derive(Default)]
pub struct Choreographer {
    specs: Vec<BindingSpec>,
    tracks: Vec<Track>,
    gates: Vec<Gate>,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every spec, resolving each against its trigger's layout.
    pub fn from_specs(
        specs: &[BindingSpec],
        layout_of: impl Fn(SectionId) -> Layout,
    ) -> Result<Self> {
        let mut c = Self::new();
        for spec in specs {
            c.register(*spec, &layout_of(spec.trigger))?;
        }
        Ok(c)
    }

    /// Validates the range up front; a backwards range is rejected here.
    pub fn register(&mut self, spec: BindingSpec, layout: &Layout) -> Result<()> {
        let range = spec.range.resolve(layout)?;
        let index = self.specs.len();

        match spec.effect {
            Effect::Scrub(scrub) => {
                let segment = Segment {
                    spec: index,
                    range,
                    scrub,
                };
                let existing = self
                    .tracks
                    .iter_mut()
                    .find(|t| t.target == spec.target && t.property == scrub.property);
                match existing {
                    Some(track) => {
                        track.segments.push(segment);
                        track.sort();
                    }
                    None => self.tracks.push(Track {
                        target: spec.target,
                        property: scrub.property,
                        segments: vec![segment],
                    }),
                }
            }
            Effect::Boundary(boundary) => self.gates.push(Gate {
                spec: index,
                target: spec.target,
                range,
                boundary,
                region: Region::Before,
            }),
        }

        self.specs.push(spec);
        Ok(())
    }

    /// Re-resolve every range, e.g. after the viewport changed size.
    /// Boundary regions are kept; the next update fires whatever the new
    /// geometry implies. All or nothing: on error every range is left as
    /// it was.
    pub fn relayout(&mut self, layout_of: impl Fn(SectionId) -> Layout) -> Result<()> {
        let resolve = |index: usize| {
            let spec = &self.specs[index];
            spec.range.resolve(&layout_of(spec.trigger))
        };
        let segments = self
            .tracks
            .iter()
            .map(|t| {
                t.segments
                    .iter()
                    .map(|s| resolve(s.spec))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let gates = self
            .gates
            .iter()
            .map(|g| resolve(g.spec))
            .collect::<Result<Vec<_>>>()?;

        for (track, ranges) in self.tracks.iter_mut().zip(segments) {
            for (seg, range) in track.segments.iter_mut().zip(ranges) {
                seg.range = range;
            }
            track.sort();
        }
        for (gate, range) in self.gates.iter_mut().zip(gates) {
            gate.range = range;
        }
        Ok(())
    }

    /// Bring the stage in line with `offset`.
    pub fn update(&mut self, offset: f64, stage: &mut impl Stage) {
        for track in &self.tracks {
            let value = track.value(offset);
            match track.property {
                Property::Opacity => stage.set_opacity(track.target, value),
                Property::Rotation => stage.set_rotation(track.target, value),
            }
        }

        for gate in &mut self.gates {
            let next = gate.range.region(offset);
            if next == gate.region {
                continue;
            }
            for cue in gate.boundary.crossings(gate.region, next) {
                log::debug!(
                    "{:?}: {:?} -> {:?} at {offset:.1}px fires {cue:?}",
                    gate.target,
                    gate.region,
                    next
                );
                stage.cue(cue);
            }
            gate.region = next;
        }
    }

    /// Evaluate everything for a page that opened at `offset`, as if the
    /// user had scrolled there from the top.
    pub fn reconcile(&mut self, offset: f64, stage: &mut impl Stage) {
        for gate in &mut self.gates {
            gate.region = Region::Before;
        }
        self.update(offset, stage);
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::range::ScrollRange;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        opacity: HashMap<SectionId, f64>,
        rotation: HashMap<SectionId, f64>,
        cues: Vec<Cue>,
    }

    impl Stage for Recorder {
        fn set_opacity(&mut self, target: SectionId, value: f64) {
            self.opacity.insert(target, value);
        }

        fn set_rotation(&mut self, target: SectionId, degrees: f64) {
            self.rotation.insert(target, degrees);
        }

        fn cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
    }

    fn layout(top: f64) -> Layout {
        Layout {
            viewport_height: 800.0,
            trigger_top: top,
            trigger_height: 1000.0,
        }
    }

    fn range(start: &str, end: &str) -> ScrollRange {
        ScrollRange::new(start.parse().unwrap(), end.parse().unwrap())
    }

    fn scrub(target: SectionId, start: &str, end: &str, from: f64, to: f64) -> BindingSpec {
        BindingSpec {
            trigger: SectionId::ScrollContent,
            target,
            range: range(start, end),
            effect: Effect::Scrub(Scrub::new(Property::Opacity, from, to)),
        }
    }

    fn avatar_gate(start: &str, end: &str) -> BindingSpec {
        BindingSpec {
            trigger: SectionId::ScrollContent,
            target: SectionId::Canvas,
            range: range(start, end),
            effect: Effect::Boundary(Boundary {
                on_leave: Some(Cue::AvatarFadeIn),
                on_enter_back: Some(Cue::AvatarFadeOut),
                ..Boundary::default()
            }),
        }
    }

    #[test]
    fn fade_out_at_half_range() {
        let mut c = Choreographer::new();
        c.register(
            scrub(SectionId::IntroText, "top top", "100px top", 1.0, 0.0),
            &layout(0.0),
        )
        .unwrap();
        let mut stage = Recorder::default();

        c.update(50.0, &mut stage);
        assert_eq!(stage.opacity[&SectionId::IntroText], 0.5);
        c.update(0.0, &mut stage);
        assert_eq!(stage.opacity[&SectionId::IntroText], 1.0);
    }

    #[test]
    fn backwards_range_rejected_at_registration() {
        let mut c = Choreographer::new();
        let err = c.register(
            scrub(SectionId::IntroText, "100px top", "top top", 0.0, 1.0),
            &layout(0.0),
        );
        assert!(err.is_err());
        assert!(c.is_empty());
    }

    #[test]
    fn track_hands_over_between_segments() {
        let mut c = Choreographer::new();
        // fade in over 0..100, fade back out over 500..600
        c.register(scrub(SectionId::Overlay, "500px top", "600px top", 1.0, 0.0), &layout(0.0))
            .unwrap();
        c.register(scrub(SectionId::Overlay, "top top", "100px top", 0.0, 1.0), &layout(0.0))
            .unwrap();
        let mut stage = Recorder::default();

        let mut at = |offset: f64| {
            c.update(offset, &mut stage);
            stage.opacity[&SectionId::Overlay]
        };
        assert_eq!(at(-10.0), 0.0);
        assert_eq!(at(50.0), 0.5);
        assert_eq!(at(300.0), 1.0);
        assert_eq!(at(550.0), 0.5);
        assert_eq!(at(900.0), 0.0);
        assert_eq!(at(50.0), 0.5);
    }

    #[test]
    fn gate_fires_once_per_crossing() {
        let mut c = Choreographer::new();
        c.register(avatar_gate("top top", "200px top"), &layout(0.0)).unwrap();
        let mut stage = Recorder::default();

        for offset in [0.0, 100.0, 250.0, 260.0, 240.0, 300.0] {
            c.update(offset, &mut stage);
        }
        assert_eq!(stage.cues, vec![Cue::AvatarFadeIn]);

        for offset in [150.0, 120.0, 199.0] {
            c.update(offset, &mut stage);
        }
        assert_eq!(stage.cues, vec![Cue::AvatarFadeIn, Cue::AvatarFadeOut]);
    }

    #[test]
    fn reconcile_matches_scrolling_from_top() {
        let specs = [
            scrub(SectionId::IntroText, "top top", "100px top", 1.0, 0.0),
            avatar_gate("top top", "200px top"),
        ];

        let mut jumped = Choreographer::from_specs(&specs, |_| layout(0.0)).unwrap();
        let mut a = Recorder::default();
        jumped.reconcile(450.0, &mut a);

        let mut scrolled = Choreographer::from_specs(&specs, |_| layout(0.0)).unwrap();
        let mut b = Recorder::default();
        for step in 0..=45 {
            scrolled.update(step as f64 * 10.0, &mut b);
        }

        assert_eq!(a.opacity, b.opacity);
        assert_eq!(a.cues.last(), b.cues.last());
        assert_eq!(a.cues, vec![Cue::AvatarFadeIn]);
    }

    #[test]
    fn relayout_moves_ranges() {
        let mut c = Choreographer::new();
        c.register(scrub(SectionId::IntroText, "top top", "100px top", 1.0, 0.0), &layout(0.0))
            .unwrap();
        c.relayout(|_| layout(1000.0)).unwrap();
        let mut stage = Recorder::default();
        c.update(50.0, &mut stage);
        assert_eq!(stage.opacity[&SectionId::IntroText], 1.0);
        c.update(1050.0, &mut stage);
        assert_eq!(stage.opacity[&SectionId::IntroText], 0.5);
    }

    #[test]
    fn failed_relayout_keeps_every_range() {
        let heading = BindingSpec {
            trigger: SectionId::Overlay,
            target: SectionId::OverlayHeading,
            range: range("top top", "bottom top"),
            effect: Effect::Scrub(Scrub::new(Property::Opacity, 0.0, 1.0)),
        };
        let gate = BindingSpec {
            trigger: SectionId::Overlay,
            ..avatar_gate("top top", "bottom top")
        };
        let specs = [
            scrub(SectionId::IntroText, "top top", "100px top", 1.0, 0.0),
            heading,
            gate,
        ];
        let mut c = Choreographer::from_specs(&specs, |_| layout(0.0)).unwrap();
        let mut before = Recorder::default();
        c.update(50.0, &mut before);
        c.update(1500.0, &mut before);

        // overlay collapses to a negative height: its ranges turn backwards
        let moved = c.relayout(|id| match id {
            SectionId::Overlay => Layout {
                viewport_height: 800.0,
                trigger_top: 2000.0,
                trigger_height: -500.0,
            },
            _ => layout(1000.0),
        });
        assert!(moved.is_err());

        let mut after = Recorder::default();
        c.update(50.0, &mut after);
        assert_eq!(after.opacity[&SectionId::IntroText], 0.5);
        assert_eq!(after.cues, vec![Cue::AvatarFadeOut]);
        c.update(1500.0, &mut after);
        assert_eq!(after.opacity, before.opacity);
        assert_eq!(after.cues, vec![Cue::AvatarFadeOut, Cue::AvatarFadeIn]);
    }
}
