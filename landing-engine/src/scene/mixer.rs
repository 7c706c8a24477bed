// mixer.rs - Skeletal clip clock
//
// Only time is tracked here; the renderer owns the bones.

use super::avatar::Clip;

#[derive(Default)]
pub struct AnimationMixer {
    clip: Option<Clip>,
    time: f32,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, clip: Option<Clip>) {
        if let Some(c) = &clip {
            log::debug!("playing clip '{}' ({:.2}s)", c.name, c.duration);
        }
        self.clip = clip;
        self.time = 0.0;
    }

    pub fn clip(&self) -> Option<&Clip> {
        self.clip.as_ref()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the looping clock. Returns the new clip time, or `None`
    /// when nothing is playing.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        let clip = self.clip.as_ref()?;
        if clip.duration > 0.0 {
            self.time = (self.time + dt).rem_euclid(clip.duration);
        }
        Some(self.time)
    }
}
