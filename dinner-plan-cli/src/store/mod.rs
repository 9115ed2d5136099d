//! Local meal store backing the CLI.
//!
//! This is the stand-in for the hosted document database the app would
//! normally sync with: same contract, but the collection lives in a JSON
//! file under the data directory.

mod json;

pub use json::JsonFileStore;
