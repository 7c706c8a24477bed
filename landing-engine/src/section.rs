// section.rs - Named page regions and their visibility phases
//
// Sections are static markup. They are toggled, never removed.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Intro,
    Landing,
    IntroText,
    ScrollContent,
    Overlay,
    OverlayHeading,
    OverlayParagraph,
    AvatarImage,
    Canvas,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::Intro,
        SectionId::Landing,
        SectionId::IntroText,
        SectionId::ScrollContent,
        SectionId::Overlay,
        SectionId::OverlayHeading,
        SectionId::OverlayParagraph,
        SectionId::AvatarImage,
        SectionId::Canvas,
    ];
}

/// Visibility lifecycle shared by page sections and the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Hidden,
    Entering,
    Visible,
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Show,
    Hide,
    /// The running transition reached its end value.
    Settled,
}

impl Phase {
    pub fn next(self, signal: Signal) -> Phase {
        match (self, signal) {
            (Phase::Hidden | Phase::Leaving, Signal::Show) => Phase::Entering,
            (Phase::Visible | Phase::Entering, Signal::Hide) => Phase::Leaving,
            (Phase::Entering, Signal::Settled) => Phase::Visible,
            (Phase::Leaving, Signal::Settled) => Phase::Hidden,
            (phase, _) => phase,
        }
    }

    /// Walk straight to the resting state of `signal`.
    pub fn settle(self, signal: Signal) -> Phase {
        self.next(signal).next(Signal::Settled)
    }

    pub fn is_displayed(self) -> bool {
        self != Phase::Hidden
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub phase: Phase,
    pub opacity: f64,
}

impl Section {
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            phase: Phase::Hidden,
            opacity: 0.0,
        }
    }

    pub fn show(&mut self) {
        self.phase = self.phase.settle(Signal::Show);
        self.opacity = 1.0;
    }

    pub fn hide(&mut self) {
        self.phase = self.phase.settle(Signal::Hide);
        self.opacity = 0.0;
    }

    /// Start a fade out; the section stays displayed until `hide`.
    pub fn fade(&mut self, opacity: f64) {
        self.phase = self.phase.next(Signal::Hide);
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn is_displayed(&self) -> bool {
        self.phase.is_displayed()
    }
}
