//! User profiles and their file-backed store

mod data;
pub mod store;

pub use data::{RiskProfile, UserProfile, DEFAULT_AGE, MIN_AGE};
pub use store::{ProfileStore, DEFAULT_STORE_PATH};
