//! Safe SQL builder: identifiers from constants only, values as parameters.

mod builder;
pub mod pagination;
pub mod params;
pub use builder::*;
pub use pagination::*;
pub use params::*;
