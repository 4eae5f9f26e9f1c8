pub mod device;
pub mod meter;
pub mod metrics;
pub mod profile;

pub use device::*;
pub use meter::*;
pub use metrics::*;
pub use profile::*;
