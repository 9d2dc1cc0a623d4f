//! Colorized output grid handed to the renderer.

use crate::core_types::Rgba;

/// Square grid of RGBA colors, same dimensions as the density field it
/// was colorized from. Row-major order (`y * resolution + x`).
#[derive(Debug, Clone)]
pub struct ColorGrid {
    data: Vec<Rgba>,
    resolution: usize,
}

impl ColorGrid {
    /// Create a new grid of `resolution x resolution` transparent cells.
    pub fn new(resolution: usize) -> Self {
        Self {
            data: vec![Rgba::TRANSPARENT; resolution * resolution],
            resolution,
        }
    }

    /// Cells per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Get color at grid position.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        assert!(
            x < self.resolution && y < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[y * self.resolution + x]
    }

    /// Set color at grid position.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) {
        assert!(
            x < self.resolution && y < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[y * self.resolution + x] = color;
    }

    /// Get reference to the raw cell data.
    pub fn as_slice(&self) -> &[Rgba] {
        &self.data
    }

    /// Get mutable reference to the raw cell data.
    pub fn as_mut_slice(&mut self) -> &mut [Rgba] {
        &mut self.data
    }

    /// Flatten to RGBA8 texture data for GPU upload, row-major,
    /// 4 bytes per cell.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_bytes());
        }
        bytes
    }
}
