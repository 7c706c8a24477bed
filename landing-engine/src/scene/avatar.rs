// avatar.rs - The loaded avatar and its fade state
//
// Visibility and opacity move together: hidden means opacity 0, a fade in
// shows the avatar before raising opacity, a fade out that reaches 0 hides
// it.

use glam::Vec3;

use crate::section::{Phase, Signal};

/// Facts about a loaded model that the scene cares about.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarAsset {
    /// Authored visibility of each submesh, in traversal order. Hidden
    /// submeshes stay hidden and are skipped by fades.
    pub submeshes: Vec<bool>,
    pub clip: Option<Clip>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub name: String,
    pub duration: f32,
}

/// Fixed at load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Submesh {
    pub visible: bool,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug)]
struct Fade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

pub struct AvatarEntity {
    transform: Transform,
    phase: Phase,
    opacity: f32,
    submeshes: Vec<Submesh>,
    fade: Option<Fade>,
}

impl AvatarEntity {
    /// Starts hidden.
    pub fn new(asset: &AvatarAsset, transform: Transform) -> Self {
        Self {
            transform,
            phase: Phase::Hidden,
            opacity: 0.0,
            submeshes: asset
                .submeshes
                .iter()
                .map(|&visible| Submesh {
                    visible,
                    opacity: 0.0,
                })
                .collect(),
            fade: None,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn visible(&self) -> bool {
        self.phase.is_displayed()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Snap to fully shown or fully hidden, dropping any running fade.
    pub fn set_visible(&mut self, visible: bool) {
        self.fade = None;
        if visible {
            self.phase = self.phase.settle(Signal::Show);
            self.opacity = 1.0;
        } else {
            self.phase = self.phase.settle(Signal::Hide);
            self.opacity = 0.0;
        }
        self.apply_opacity();
    }

    /// Tween opacity towards `target` over `duration` seconds, starting
    /// from wherever it is now.
    pub fn fade_to(&mut self, target: f32, duration: f32) {
        let target = target.clamp(0.0, 1.0);
        if duration <= 0.0 {
            self.set_visible(target > 0.0);
            if target > 0.0 {
                self.opacity = target;
                self.apply_opacity();
            }
            return;
        }

        let signal = if target > 0.0 { Signal::Show } else { Signal::Hide };
        self.phase = self.phase.next(signal);
        if !self.phase.is_displayed() {
            // already hidden, nothing to fade out
            self.fade = None;
            return;
        }
        self.fade = Some(Fade {
            from: self.opacity,
            to: target,
            duration,
            elapsed: 0.0,
        });
    }

    pub fn advance(&mut self, dt: f32) {
        let Some(mut fade) = self.fade else {
            return;
        };
        fade.elapsed += dt;
        let t = (fade.elapsed / fade.duration).min(1.0);
        self.opacity = fade.from + (fade.to - fade.from) * t;

        if t >= 1.0 {
            self.fade = None;
            self.opacity = fade.to;
            self.phase = self.phase.next(Signal::Settled);
            if !self.phase.is_displayed() {
                self.opacity = 0.0;
            }
        } else {
            self.fade = Some(fade);
        }
        self.apply_opacity();
    }

    fn apply_opacity(&mut self) {
        let opacity = self.opacity;
        for mesh in self.submeshes.iter_mut().filter(|m| m.visible) {
            mesh.opacity = opacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar(submeshes: usize) -> AvatarEntity {
        with_meshes(vec![true; submeshes])
    }

    fn with_meshes(submeshes: Vec<bool>) -> AvatarEntity {
        AvatarEntity::new(
            &AvatarAsset {
                submeshes,
                clip: None,
            },
            Transform {
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                scale: Vec3::ONE,
            },
        )
    }

    #[test]
    fn starts_hidden_and_transparent() {
        let a = avatar(3);
        assert!(!a.visible());
        assert_eq!(a.opacity(), 0.0);
    }

    #[test]
    fn fade_in_shows_first() {
        let mut a = avatar(2);
        a.fade_to(1.0, 1.0);
        assert!(a.visible());
        assert_eq!(a.phase(), Phase::Entering);
        a.advance(0.5);
        assert_eq!(a.opacity(), 0.5);
        a.advance(0.6);
        assert_eq!(a.opacity(), 1.0);
        assert_eq!(a.phase(), Phase::Visible);
        assert!(!a.is_fading());
    }

    #[test]
    fn fade_out_hides_at_zero() {
        let mut a = avatar(2);
        a.set_visible(true);
        a.fade_to(0.0, 0.5);
        a.advance(0.25);
        assert!(a.visible());
        assert_eq!(a.opacity(), 0.5);
        a.advance(0.25);
        assert!(!a.visible());
        assert_eq!(a.opacity(), 0.0);
    }

    #[test]
    fn reversing_mid_fade_starts_from_current_opacity() {
        let mut a = avatar(1);
        a.fade_to(1.0, 1.0);
        a.advance(0.25);
        a.fade_to(0.0, 1.0);
        assert_eq!(a.phase(), Phase::Leaving);
        a.advance(0.5);
        assert_eq!(a.opacity(), 0.125);
        a.advance(1.0);
        assert!(!a.visible());
    }

    #[test]
    fn fade_out_while_hidden_is_a_no_op() {
        let mut a = avatar(1);
        a.fade_to(0.0, 1.0);
        assert!(!a.is_fading());
        assert!(!a.visible());
    }

    #[test]
    fn opacity_reaches_every_visible_submesh() {
        let mut a = with_meshes(vec![true, false, true]);
        a.set_visible(true);
        let ops: Vec<f32> = a.submeshes().iter().map(|m| m.opacity).collect();
        assert_eq!(ops, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn hiding_zeroes_opacity() {
        let mut a = avatar(2);
        a.fade_to(0.7, 0.0);
        assert!(a.visible());
        assert_eq!(a.opacity(), 0.7);
        a.set_visible(false);
        assert_eq!(a.opacity(), 0.0);
        assert!(a.submeshes().iter().all(|m| m.opacity == 0.0));
    }
}
