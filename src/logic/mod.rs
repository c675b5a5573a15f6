//! Logic modules — translates parameters and facts into concrete resources.
//!
//! The logic layer combines validated parameters with the platform policy
//! table and renders the files, package and service the apply engine needs.
//!
//! # Modules
//!
//! - `resolver` — Parameter + fact resolution into resource descriptors

pub mod resolver;
