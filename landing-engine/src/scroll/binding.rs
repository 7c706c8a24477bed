// binding.rs - Scroll binding declarations
//
// A binding ties a trigger section and a scroll range to either a scrub
// (property value as a function of progress) or a boundary (cues fired
// when the offset moves between regions).

use serde::{Deserialize, Serialize};

use super::ease::Ease;
use super::range::{Region, ScrollRange};
use crate::section::SectionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Opacity,
    /// Degrees, applied as a 2D rotation.
    Rotation,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scrub {
    pub property: Property,
    pub from: f64,
    pub to: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Number of back-and-forth legs across the range; 0 or 1 is a plain sweep.
    #[serde(default)]
    pub yoyo: u32,
}

impl Scrub {
    pub fn new(property: Property, from: f64, to: f64) -> Self {
        Self {
            property,
            from,
            to,
            ease: Ease::Linear,
            yoyo: 0,
        }
    }

    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn yoyo(mut self, legs: u32) -> Self {
        self.yoyo = legs;
        self
    }

    pub fn value_at(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        let t = if self.yoyo > 1 {
            let x = p * self.yoyo as f64;
            let leg = x.floor();
            let frac = x - leg;
            if leg as u32 % 2 == 0 { frac } else { 1.0 - frac }
        } else {
            p
        };
        self.from + (self.to - self.from) * self.ease.apply(t)
    }
}

/// One-shot effect requested by a boundary crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Cue {
    AvatarFadeIn,
    AvatarFadeOut,
    Show { section: SectionId },
    Hide { section: SectionId },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boundary {
    /// Start passed going down.
    pub on_enter: Option<Cue>,
    /// End passed going down.
    pub on_leave: Option<Cue>,
    /// End passed going up.
    pub on_enter_back: Option<Cue>,
    /// Start passed going up.
    pub on_leave_back: Option<Cue>,
}

impl Boundary {
    /// Cues for a move between regions, in firing order. A jump over the
    /// whole range fires both of its edges.
    pub fn crossings(&self, from: Region, to: Region) -> Vec<Cue> {
        let fired = match (from, to) {
            (Region::Before, Region::Active) => [self.on_enter, None],
            (Region::Before, Region::After) => [self.on_enter, self.on_leave],
            (Region::Active, Region::After) => [self.on_leave, None],
            (Region::After, Region::Active) => [self.on_enter_back, None],
            (Region::After, Region::Before) => [self.on_enter_back, self.on_leave_back],
            (Region::Active, Region::Before) => [self.on_leave_back, None],
            _ => [None, None],
        };
        fired.into_iter().flatten().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Effect {
    Scrub(Scrub),
    Boundary(Boundary),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub trigger: SectionId,
    pub target: SectionId,
    pub range: ScrollRange,
    pub effect: Effect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_interpolates_linearly() {
        let fade_out = Scrub::new(Property::Opacity, 1.0, 0.0);
        assert_eq!(fade_out.value_at(0.0), 1.0);
        assert_eq!(fade_out.value_at(0.5), 0.5);
        assert_eq!(fade_out.value_at(1.0), 0.0);
        assert_eq!(fade_out.value_at(7.0), 0.0);
    }

    #[test]
    fn yoyo_folds_progress() {
        let wave = Scrub::new(Property::Rotation, 0.0, 10.0).yoyo(4);
        assert_eq!(wave.value_at(0.0), 0.0);
        assert_eq!(wave.value_at(0.25), 10.0);
        assert_eq!(wave.value_at(0.5), 0.0);
        assert_eq!(wave.value_at(0.125), 5.0);
        assert_eq!(wave.value_at(0.875), 5.0);
        assert_eq!(wave.value_at(1.0), 0.0);
    }

    #[test]
    fn crossing_table() {
        let b = Boundary {
            on_enter: Some(Cue::AvatarFadeIn),
            on_leave: Some(Cue::Hide {
                section: SectionId::Overlay,
            }),
            on_enter_back: Some(Cue::Show {
                section: SectionId::Overlay,
            }),
            on_leave_back: Some(Cue::AvatarFadeOut),
        };
        assert_eq!(
            b.crossings(Region::Before, Region::Active),
            vec![Cue::AvatarFadeIn]
        );
        assert_eq!(b.crossings(Region::Before, Region::After).len(), 2);
        assert_eq!(
            b.crossings(Region::After, Region::Before),
            vec![
                Cue::Show {
                    section: SectionId::Overlay
                },
                Cue::AvatarFadeOut
            ]
        );
        assert!(b.crossings(Region::Active, Region::Active).is_empty());
        assert!(b.crossings(Region::After, Region::After).is_empty());
    }

    #[test]
    fn binding_parses_from_json() {
        let json = r#"{
            "trigger": "scroll-content",
            "target": "intro-text",
            "range": { "start": "top top", "end": "100px top" },
            "effect": { "kind": "scrub", "property": "opacity", "from": 1, "to": 0 }
        }"#;
        let spec: BindingSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.target, SectionId::IntroText);
        assert_eq!(
            spec.effect,
            Effect::Scrub(Scrub::new(Property::Opacity, 1.0, 0.0))
        );

        let json = r#"{
            "trigger": "overlay",
            "target": "canvas",
            "range": { "start": "top bottom", "end": "top center" },
            "effect": { "kind": "boundary", "on_leave": { "action": "avatar-fade-in" } }
        }"#;
        let spec: BindingSpec = serde_json::from_str(json).unwrap();
        let Effect::Boundary(b) = spec.effect else {
            panic!("expected boundary");
        };
        assert_eq!(b.on_leave, Some(Cue::AvatarFadeIn));
        assert_eq!(b.on_enter, None);
    }
}
