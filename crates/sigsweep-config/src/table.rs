//! Filter table file format and conversion to pipeline plans.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use sigsweep_analysis::{Operation, PlanTable, SignalPlan};
use sigsweep_core::{FirSpec, IirWeights, MovingAverageSpec, WindowKind};

use crate::error::ConfigError;

/// Per-signal filter parameters for one batch.
///
/// Tables are stored as TOML. Signals are keyed by name (file stem or full
/// file name); `default`, when present, applies to signals the table does
/// not list.
///
/// # TOML Format
///
/// ```toml
/// name = "lab"
/// description = "Sensor captures from the bench"
///
/// [signals.sigC]
/// spectrum = true
/// moving_average = [100, 500]
///
/// [signals.sigC.fir]
/// numtaps = 201
/// cutoff_hz = 10.0
/// width_hz = 5.0
/// window = "hamming"
///
/// [[signals.sigC.iir]]
/// a = 0.9
/// b = 0.1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterTable {
    /// Name of the table.
    pub name: String,

    /// Optional description of the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plan for signals with no entry of their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<SignalConfig>,

    /// Entries keyed by signal name.
    #[serde(default)]
    pub signals: BTreeMap<String, SignalConfig>,
}

/// Operations for one signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalConfig {
    /// Compute the magnitude spectrum.
    #[serde(default = "default_spectrum")]
    pub spectrum: bool,

    /// Moving-average window lengths, one run each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moving_average: Vec<usize>,

    /// FIR low-pass design.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fir: Option<FirConfig>,

    /// IIR weight pairs, one run each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub iir: Vec<IirConfig>,
}

fn default_spectrum() -> bool {
    true
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            spectrum: true,
            moving_average: Vec::new(),
            fir: None,
            iir: Vec::new(),
        }
    }
}

/// FIR design parameters as written in a table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FirConfig {
    /// Number of taps.
    pub numtaps: usize,
    /// Cutoff in Hz.
    pub cutoff_hz: f64,
    /// Transition width in Hz; selects a Kaiser window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_hz: Option<f64>,
    /// Window name (`hamming`, `hann`, `blackman`, `rectangular`, `kaiser:β`).
    #[serde(default = "default_window")]
    pub window: String,
}

fn default_window() -> String {
    "hamming".to_string()
}

/// One IIR weight pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IirConfig {
    /// Feedback weight.
    pub a: f64,
    /// Input weight.
    pub b: f64,
}

impl FirConfig {
    /// Build the core design spec, parsing the window name.
    pub fn to_spec(&self) -> Result<FirSpec, sigsweep_core::FilterError> {
        let window: WindowKind = self.window.parse()?;
        let spec = FirSpec::new(self.numtaps, self.cutoff_hz, window);
        Ok(match self.width_hz {
            Some(width) => spec.with_width(width),
            None => spec,
        })
    }
}

impl SignalConfig {
    /// Operations in run order: spectrum, FIR, IIR pairs, moving averages.
    pub fn to_plan(&self, signal: &str) -> Result<SignalPlan, ConfigError> {
        let invalid = |e| ConfigError::invalid_filter(signal, e);
        let mut plan = SignalPlan::new();

        if self.spectrum {
            plan.push(Operation::Spectrum);
        }
        if let Some(fir) = &self.fir {
            plan.push(fir.to_spec().map_err(invalid)?);
        }
        for pair in &self.iir {
            plan.push(IirWeights::new(pair.a, pair.b).map_err(invalid)?);
        }
        for &window in &self.moving_average {
            plan.push(MovingAverageSpec::new(window).map_err(invalid)?);
        }
        Ok(plan)
    }

    /// Total number of operations this entry produces.
    pub fn operation_count(&self) -> usize {
        usize::from(self.spectrum)
            + usize::from(self.fir.is_some())
            + self.iir.len()
            + self.moving_average.len()
    }
}

impl FilterTable {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default: None,
            signals: BTreeMap::new(),
        }
    }

    /// Create a table with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add or replace a signal entry.
    pub fn with_signal(mut self, name: impl Into<String>, config: SignalConfig) -> Self {
        self.signals.insert(name.into(), config);
        self
    }

    /// Set the entry used for unlisted signals.
    pub fn with_default(mut self, config: SignalConfig) -> Self {
        self.default = Some(config);
        self
    }

    /// Load a table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let table: FilterTable = toml::from_str(&content)?;
        Ok(table)
    }

    /// Load a table from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the table to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the table to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of listed signals.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// True when no signal is listed.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Entry for a signal, using the same lookup as the pipeline: exact name,
    /// then file stem, then `default`.
    pub fn entry(&self, signal: &str) -> Option<&SignalConfig> {
        self.signals
            .get(signal)
            .or_else(|| {
                Path::new(signal)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| self.signals.get(stem))
            })
            .or(self.default.as_ref())
    }

    /// Build the pipeline's plan table. Fails on the first entry that does
    /// not describe a valid filter.
    pub fn to_plan_table(&self) -> Result<PlanTable, ConfigError> {
        let mut plans = PlanTable::new();
        for (signal, config) in &self.signals {
            plans.insert(signal.clone(), config.to_plan(signal)?);
        }
        if let Some(default) = &self.default {
            plans.set_fallback(Some(default.to_plan("default")?));
        }
        Ok(plans)
    }
}

impl Default for FilterTable {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
