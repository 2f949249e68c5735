//! Tracing setup.
//!
//! Every module logs through `tracing` macros; nothing is printed until the host
//! installs a subscriber. [`init_tracing`] installs a formatted subscriber for
//! hosts that have none of their own.
//!
//! # Configuration
//!
//! The filter is chosen by:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`TableOptions`](crate::TableOptions)
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use datatable::observability::init_tracing;
//! use datatable::TableOptions;
//!
//! let options = TableOptions {
//!     trace_level: Some("debug".to_string()),
//!     ..Default::default()
//! };
//! init_tracing(&options);
//!
//! tracing::debug!("tracing is now active");
//! ```

mod init;

pub use init::init_tracing;
