pub mod emit;
pub mod filter;
pub mod generators;
pub mod layer;
pub mod options;
pub mod schema;
pub mod vss;
