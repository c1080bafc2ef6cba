//! Data loaded from outside the process: translation tables and stored preferences.

pub mod storage;
pub mod translation;
