//! One-sided magnitude spectrum of a trace

use sigsweep_core::{SampleRate, Signal};

use crate::fft::Fft;

/// Magnitude spectrum: `magnitudes[k] = |Y[k]| / n` at `frequencies[k] = k·Fs/n`.
///
/// Holds bins `k = 0 .. floor(n/2) - 1`. The DC bin is kept as computed, so a
/// trace with a non-zero mean shows it in bin 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Normalized magnitude per bin.
    pub magnitudes: Vec<f64>,
    bin_width: f64,
}

impl Spectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True when the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Spacing between bins in Hz (`Fs / n`).
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Strongest bin above DC as `(frequency_hz, magnitude)`.
    ///
    /// Falls back to the DC bin when it is the only one.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let start = usize::from(self.len() > 1);
        self.magnitudes
            .iter()
            .enumerate()
            .skip(start)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, &mag)| (self.frequencies[k], mag))
    }

    /// Up to `count` local maxima above DC, strongest first.
    pub fn top_peaks(&self, count: usize) -> Vec<(f64, f64)> {
        let mags = &self.magnitudes;
        let mut peaks: Vec<(f64, f64)> = (1..mags.len())
            .filter(|&k| {
                let left = mags[k - 1];
                let right = mags.get(k + 1).copied().unwrap_or(f64::NEG_INFINITY);
                mags[k] > left && mags[k] >= right
            })
            .map(|k| (self.frequencies[k], mags[k]))
            .collect();

        peaks.sort_by(|a, b| b.1.total_cmp(&a.1));
        peaks.truncate(count);
        peaks
    }
}

/// One-sided spectrum of an amplitude column sampled at `sample_rate`.
pub fn magnitude_spectrum(amplitude: &[f64], sample_rate: SampleRate) -> Spectrum {
    let n = amplitude.len();
    if n == 0 {
        return Spectrum {
            frequencies: Vec::new(),
            magnitudes: Vec::new(),
            bin_width: 0.0,
        };
    }
    let bins = n / 2;
    let bin_width = sample_rate.hz() / n as f64;

    let fft = Fft::new(n);
    let scale = 1.0 / n as f64;
    let magnitudes: Vec<f64> = fft
        .forward(amplitude)
        .iter()
        .take(bins)
        .map(|c| c.norm() * scale)
        .collect();
    let frequencies = (0..bins).map(|k| k as f64 * bin_width).collect();

    Spectrum {
        frequencies,
        magnitudes,
        bin_width,
    }
}

/// One-sided spectrum of a signal, using its inferred sample rate.
pub fn one_sided_spectrum(signal: &Signal) -> Spectrum {
    magnitude_spectrum(signal.amplitude(), signal.sample_rate())
}
