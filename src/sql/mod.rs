//! Safe SQL builder for model tables: identifiers quoted, values always bound as parameters.

mod builder;
pub use builder::*;
