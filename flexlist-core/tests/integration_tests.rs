//! Integration tests for `FlexList` core library
//!
//! This module contains end-to-end scenarios driving the public adapter API
//! together with settings and state persistence.

// Allow common test patterns that Clippy warns about
#![allow(clippy::redundant_clone)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]

mod integration;
