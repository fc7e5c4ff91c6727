//! Startup funding analysis core: load and clean a funding table, then run
//! aggregate, per-startup and per-investor queries over it.
//!
//! ```no_run
//! use std::path::Path;
//! use startup_lens::analysis::{overall_metrics, sector_ranking, DEFAULT_TOP_N};
//! use startup_lens::data::loader::load_file;
//!
//! let ds = load_file(Path::new("startup_cleaned.csv"))?;
//! let metrics = overall_metrics(&ds)?;
//! println!("{} Cr across {} startups", metrics.total, metrics.count);
//! for (sector, total) in sector_ranking(&ds, DEFAULT_TOP_N) {
//!     println!("{sector}: {total:.2}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod data;
pub mod error;
