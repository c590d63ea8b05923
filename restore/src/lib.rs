//! Restoration of saturated pixels by robust-weighted diffusion.
//!
//! Pixels stuck at 0 or 255 are treated as damaged and re-estimated from
//! their valid 3x3 neighbors, weighted by a robust kernel of the intensity
//! difference. A fixed number of in-place raster sweeps lets good values
//! diffuse into damaged regions.
//!
//! # Example
//!
//! ```
//! use restore::{restore, Image, RestoreConfig, Roi};
//!
//! let mut image = Image::filled(5, 5, 100);
//! image.set(2, 2, 255);
//!
//! let report = restore(&mut image, Roi::new(1, 1, 3), &RestoreConfig::default()).unwrap();
//!
//! assert_eq!(image.get(2, 2), 100);
//! assert_eq!(report.damaged_in_roi, 1);
//! ```

pub mod aggregate;
pub mod config;
pub mod damage;
mod error;
pub mod kernel;
pub mod quality;
mod raster;
mod roi;
mod scheduler;

pub use aggregate::{aggregate, Aggregate};
pub use config::{BorderPolicy, RestoreConfig, DEFAULT_PASSES};
pub use damage::{classify, DamageMap, DamageSnapshot, DamageState};
pub use error::{Error, Result};
pub use kernel::{weight, DEFAULT_ALPHA};
pub use raster::Image;
pub use roi::Roi;
pub use scheduler::{restore, PassStats, RestoreReport, Restorer};
