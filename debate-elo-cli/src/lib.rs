//! Pipeline behind the `debate-elo` command: tabroom results are downloaded
//! into a processed tournament document, folded into ratings, and rendered
//! as rankings.

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod store;

pub use error::Error;
