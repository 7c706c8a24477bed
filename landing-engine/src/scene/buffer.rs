// buffer.rs - Packed particle positions
//
// Flat xyz triples, handed to the renderer once per frame.

#[derive(Default)]
pub struct PositionBuffer {
    out: Vec<f32>,
}

impl PositionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(points: usize) -> Self {
        Self {
            out: Vec::with_capacity(points * 3),
        }
    }

    pub fn clear(&mut self) {
        self.out.clear();
    }

    #[inline]
    pub fn push(&mut self, x: f32, y: f32, z: f32) {
        self.out.extend_from_slice(&[x, y, z]);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }
}
