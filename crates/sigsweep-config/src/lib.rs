//! Filter table management for sigsweep batch runs.
//!
//! A filter table says, per signal, which operations to run: the spectrum,
//! one FIR low-pass design, a sweep of IIR weight pairs, and a sweep of
//! moving-average windows.
//!
//! # Features
//!
//! - **Tables**: Load and save tables as TOML files
//! - **Validation**: Collect every bad entry, optionally against a sample rate
//! - **Paths**: Platform-specific user table directory (`std` feature)
//! - **Factory Tables**: Built-in tables, always available
//!
//! # Example
//!
//! ```rust,no_run
//! use sigsweep_config::{FilterTable, FirConfig, IirConfig, SignalConfig, user_tables_dir};
//!
//! let table = FilterTable::new("lab3")
//!     .with_description("Accelerometer captures")
//!     .with_signal(
//!         "sigA",
//!         SignalConfig {
//!             fir: Some(FirConfig {
//!                 numtaps: 301,
//!                 cutoff_hz: 5.0,
//!                 width_hz: Some(2.0),
//!                 window: "hamming".to_string(),
//!             }),
//!             iir: vec![IirConfig { a: 0.9, b: 0.1 }],
//!             moving_average: vec![10, 50],
//!             ..SignalConfig::default()
//!         },
//!     );
//!
//! let path = user_tables_dir().join("lab3.toml");
//! table.save(&path).unwrap();
//! let plans = table.to_plan_table().unwrap();
//! ```

mod error;
mod table;

/// Platform-specific paths for filter tables.
#[cfg(feature = "std")]
pub mod paths;

/// Filter table validation.
pub mod validation;

/// Factory tables bundled with the library.
pub mod factory_tables;

pub use error::ConfigError;
pub use factory_tables::{
    FACTORY_TABLE_NAMES, factory_table_names, factory_tables, get_factory_table,
    is_factory_table,
};
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_tables_dir, find_table, list_user_tables, resolve_table, table_name_from_path,
    user_config_dir, user_tables_dir,
};
pub use table::{FilterTable, FirConfig, IirConfig, SignalConfig};
pub use validation::{
    ValidationError, ValidationResult, validate_for_sample_rate, validate_signal_config,
    validate_table,
};
