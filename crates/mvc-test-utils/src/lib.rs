//! Shared test utilities for the mvc-harness workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`music`]: the music people XML document used by XPath scenarios
//! - [`resources`]: [`TestResources`] temporary classpath root for
//!   definition documents and web resources
//! - [`fixtures`]: paths into the checked-in `test-fixtures/` directory
//!
//! [`TestResources`]: resources::TestResources

pub mod fixtures;
pub mod music;
pub mod resources;
