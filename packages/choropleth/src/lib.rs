#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth core: joins disasters onto counties, buckets counties by
//! cumulative property damage, and drives the hover info panel.
//!
//! [`ChoroplethApp`] owns all state. It draws onto any [`RenderSurface`]
//! and turns pointer events from that surface into info panel updates
//! through the [`hover`] state machine.

pub mod app;
pub mod classify;
pub mod format;
pub mod hover;
pub mod join;
pub mod surface;
pub mod svg;

pub use app::{ChoroplethApp, ChoroplethOptions};
pub use surface::RenderSurface;
