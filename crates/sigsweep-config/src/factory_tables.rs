//! Filter tables bundled with the library.
//!
//! These are always available without external files. `hw10` carries the
//! per-signal parameters tuned for the four `sigA`..`sigD` bench captures.

use crate::FilterTable;

/// Array of factory table names for external access.
pub static FACTORY_TABLE_NAMES: &[&str] = &["hw10", "survey"];

/// TOML content for factory tables, embedded at compile time.
static FACTORY_TABLES_TOML: &[(&str, &str)] = &[("hw10", HW10_TABLE), ("survey", SURVEY_TABLE)];

/// Parameters tuned from each capture's spectrum.
///
/// `sigA` and `sigB` need very long filters for a 1 Hz cutoff; `sigC` keeps a
/// faster 10 Hz cutoff with far fewer taps.
const HW10_TABLE: &str = r#"
name = "hw10"
description = "Per-signal FIR, IIR and moving-average sweeps for the sigA-sigD captures"

[signals.sigA]
spectrum = true
moving_average = [100, 500, 1000, 5000]

[signals.sigA.fir]
numtaps = 10000
cutoff_hz = 1.0
width_hz = 10.0
window = "hamming"

[[signals.sigA.iir]]
a = 0.995
b = 0.005

[[signals.sigA.iir]]
a = 0.998
b = 0.002

[[signals.sigA.iir]]
a = 0.999
b = 0.001

[[signals.sigA.iir]]
a = 0.9995
b = 0.0005

[signals.sigB]
spectrum = true
moving_average = [100, 500, 1000, 5000]

[signals.sigB.fir]
numtaps = 5000
cutoff_hz = 1.0
width_hz = 10.0
window = "hamming"

[[signals.sigB.iir]]
a = 0.95
b = 0.05

[[signals.sigB.iir]]
a = 0.98
b = 0.02

[[signals.sigB.iir]]
a = 0.99
b = 0.01

[[signals.sigB.iir]]
a = 0.995
b = 0.005

[signals.sigC]
spectrum = true
moving_average = [100, 500, 1000, 5000]

[signals.sigC.fir]
numtaps = 201
cutoff_hz = 10.0
width_hz = 5.0
window = "hamming"

[[signals.sigC.iir]]
a = 0.7
b = 0.3

[[signals.sigC.iir]]
a = 0.8
b = 0.2

[[signals.sigC.iir]]
a = 0.9
b = 0.1

[[signals.sigC.iir]]
a = 0.95
b = 0.05

[signals.sigD]
spectrum = true
moving_average = [100, 500, 1000, 5000]

[signals.sigD.fir]
numtaps = 3000
cutoff_hz = 1.0
width_hz = 15.0
window = "hamming"

[[signals.sigD.iir]]
a = 0.95
b = 0.05

[[signals.sigD.iir]]
a = 0.98
b = 0.02

[[signals.sigD.iir]]
a = 0.99
b = 0.01

[[signals.sigD.iir]]
a = 0.995
b = 0.005
"#;

/// Spectrum only, for any signal: a first look before tuning filters.
const SURVEY_TABLE: &str = r#"
name = "survey"
description = "Magnitude spectrum of every signal, no filtering"

[default]
spectrum = true
"#;

/// Get all factory tables.
///
/// Tables that fail to parse are skipped.
pub fn factory_tables() -> Vec<FilterTable> {
    FACTORY_TABLES_TOML
        .iter()
        .filter_map(|(_, toml)| FilterTable::from_toml(toml).ok())
        .collect()
}

/// Get a factory table by name (case-insensitive).
pub fn get_factory_table(name: &str) -> Option<FilterTable> {
    FACTORY_TABLES_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| FilterTable::from_toml(toml).ok())
}

/// List factory table names.
pub fn factory_table_names() -> &'static [&'static str] {
    FACTORY_TABLE_NAMES
}

/// Check if a name refers to a factory table.
pub fn is_factory_table(name: &str) -> bool {
    FACTORY_TABLE_NAMES
        .iter()
        .any(|id| id.eq_ignore_ascii_case(name))
}
