//! Database layer (Appwrite).

pub mod appwrite;

pub use appwrite::{AppwriteDb, UpsertOutcome};
