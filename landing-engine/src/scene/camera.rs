// camera.rs - Perspective camera and viewport

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    /// Match the aspect ratio to `viewport`. Collapsed viewports are ignored.
    pub fn fit(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() {
            return false;
        }
        self.aspect = viewport.aspect();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_updates_aspect() {
        let mut cam = Camera {
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            aspect: 1.0,
            position: Vec3::Z,
            target: Vec3::ZERO,
        };
        assert!(cam.fit(Viewport::new(1600, 800)));
        assert_eq!(cam.aspect, 2.0);
        assert!(!cam.fit(Viewport::new(0, 800)));
        assert_eq!(cam.aspect, 2.0);
    }
}
