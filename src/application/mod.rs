// Application layer - use cases and orchestration.
// Every call re-reads the store and builds a fresh ledger; nothing is cached.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
