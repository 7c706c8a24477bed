// intro.rs - One-shot intro to landing page hand-off
//
// A hold followed by a fade. The timed variant is a fade with zero
// duration, so both strategies share one code path.

use serde::{Deserialize, Serialize};

use crate::section::{Section, SectionId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IntroStrategy {
    /// Keep the intro up for `hold_ms`, then swap sections.
    Timed { hold_ms: f64 },
    /// Wait `delay_ms`, fade the intro out over `duration_ms`, then swap.
    Fade { delay_ms: f64, duration_ms: f64 },
}

impl Default for IntroStrategy {
    fn default() -> Self {
        IntroStrategy::Timed { hold_ms: 10_000.0 }
    }
}

impl IntroStrategy {
    fn delay(&self) -> f64 {
        match *self {
            IntroStrategy::Timed { hold_ms } => hold_ms.max(0.0),
            IntroStrategy::Fade { delay_ms, .. } => delay_ms.max(0.0),
        }
    }

    fn duration(&self) -> f64 {
        match *self {
            IntroStrategy::Timed { .. } => 0.0,
            IntroStrategy::Fade { duration_ms, .. } => duration_ms.max(0.0),
        }
    }
}

/// What the page should look like after an `advance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroFrame {
    pub intro_opacity: f64,
    pub intro_displayed: bool,
    pub landing_displayed: bool,
    /// True on the single frame where the hand-off happened.
    pub completed: bool,
}

pub struct IntroController {
    strategy: IntroStrategy,
    started_at: Option<f64>,
    intro: Section,
    landing: Section,
    done: bool,
}

impl IntroController {
    pub fn new(strategy: IntroStrategy) -> Self {
        Self {
            strategy,
            started_at: None,
            intro: Section::new(SectionId::Intro),
            landing: Section::new(SectionId::Landing),
            done: false,
        }
    }

    /// Show the intro and start the clock. Later calls are ignored.
    pub fn start(&mut self, now_ms: f64) -> IntroFrame {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
            self.intro.show();
            self.landing.hide();
        }
        self.frame(false)
    }

    pub fn advance(&mut self, now_ms: f64) -> IntroFrame {
        let Some(t0) = self.started_at else {
            return self.frame(false);
        };
        if self.done {
            return self.frame(false);
        }

        let elapsed = now_ms - t0;
        let delay = self.strategy.delay();
        let duration = self.strategy.duration();

        if elapsed < delay {
            return self.frame(false);
        }

        if elapsed < delay + duration {
            let t = (elapsed - delay) / duration;
            self.intro.fade(1.0 - t);
            return self.frame(false);
        }

        self.intro.hide();
        self.landing.show();
        self.done = true;
        log::debug!("intro complete after {elapsed:.0}ms");
        self.frame(true)
    }

    /// Milliseconds left before anything changes on screen. Zero once the
    /// fade is due, while it runs, and after completion. Lets the caller
    /// sleep on a timer for the hold instead of polling every frame.
    pub fn hold_remaining(&self, now_ms: f64) -> f64 {
        match self.started_at {
            Some(t0) if !self.done => (t0 + self.strategy.delay() - now_ms).max(0.0),
            _ => 0.0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn frame(&self, completed: bool) -> IntroFrame {
        IntroFrame {
            intro_opacity: self.intro.opacity,
            intro_displayed: self.intro.is_displayed(),
            landing_displayed: self.landing.is_displayed(),
            completed,
        }
    }
}
