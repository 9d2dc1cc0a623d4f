//! Scalar density grid accumulated by the splatting stage.

/// Square grid of non-negative density values.
///
/// Stores cell values as a flat `Vec<f32>` in row-major order
/// (`y * resolution + x`). A fresh field is allocated per generation
/// call; nothing is reused across calls.
#[derive(Debug, Clone)]
pub struct DensityField {
    data: Vec<f32>,
    resolution: usize,
}

impl DensityField {
    /// Create a new field of `resolution x resolution` cells, all zero.
    pub fn new(resolution: usize) -> Self {
        Self {
            data: vec![0.0; resolution * resolution],
            resolution,
        }
    }

    /// Cells per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Get value at grid position.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.resolution && y < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[y * self.resolution + x]
    }

    /// Set value at grid position.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.resolution && y < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[y * self.resolution + x] = value;
    }

    /// Add `value` to the cell at grid position.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    pub fn add(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.resolution && y < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[y * self.resolution + x] += value;
    }

    /// Get reference to the raw cell data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to the raw cell data.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Fill the entire field with a value.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Maximum cell value, or 0.0 for an all-zero (or empty) field.
    pub fn max_value(&self) -> f32 {
        self.data.iter().fold(0.0_f32, |max, &v| max.max(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = DensityField::new(64);
        assert_eq!(field.resolution(), 64);
        assert_eq!(field.as_slice().len(), 64 * 64);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set_add() {
        let mut field = DensityField::new(10);
        field.set(3, 4, 1.5);
        field.add(3, 4, 0.5);
        assert_eq!(field.get(3, 4), 2.0);

        // Verify row-major indexing
        assert_eq!(field.as_slice()[4 * 10 + 3], 2.0);
    }

    #[test]
    fn test_max_value() {
        let mut field = DensityField::new(8);
        assert_eq!(field.max_value(), 0.0);
        field.set(1, 1, 0.25);
        field.set(7, 0, 3.75);
        assert_eq!(field.max_value(), 3.75);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_bounds_check() {
        let field = DensityField::new(10);
        let _ = field.get(10, 5);
    }
}
