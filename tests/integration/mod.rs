//! End-to-end games driven by scripted input

pub mod config_tests;
pub mod transcript_tests;
