//! Planned forward FFT over real traces

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// Forward FFT processor with plan caching.
pub struct Fft {
    planner: FftPlanner<f64>,
    fft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { planner, fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Resize the FFT (creates new plan if needed)
    pub fn resize(&mut self, size: usize) {
        if size != self.size {
            self.fft = self.planner.plan_fft_forward(size);
            self.size = size;
        }
    }

    /// Forward FFT of real input.
    ///
    /// The input is zero-padded (or truncated) to the FFT size and the full,
    /// unnormalized complex spectrum of `size` bins is returned.
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn dc_lands_in_bin_zero() {
        let fft = Fft::new(256);
        let spectrum = fft.forward(&vec![1.0; 256]);

        assert!((spectrum[0].re - 256.0).abs() < 1e-9);
        let other: f64 = spectrum[1..].iter().map(|c| c.norm()).sum();
        assert!(other < 1e-9);
    }

    #[test]
    fn sine_lands_in_its_bin() {
        let fft = Fft::new(128);
        let input: Vec<f64> = (0..128)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / 128.0).sin())
            .collect();
        let spectrum = fft.forward(&input);
        assert!((spectrum[10].norm() - 64.0).abs() < 1e-9);
        assert!((spectrum[118].norm() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut fft = Fft::new(4);
        fft.resize(8);
        assert_eq!(fft.size(), 8);
        let spectrum = fft.forward(&[1.0]);
        assert_eq!(spectrum.len(), 8);
        assert!(spectrum.iter().all(|c| (c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12));
    }
}
