//! Direction-specific 2D collision sensing built from groups of short probes.
//!
//! A [`ProbeGroup`](probe_group::ProbeGroup) casts a row of rays from a boundary segment and
//! reduces the per-probe results to one boolean. A
//! [`CollisionAggregator`](aggregator::CollisionAggregator) owns the groups of one entity,
//! keyed by [`SurfaceId`](surface::SurfaceId), and refreshes all of them once per step.

pub mod aggregator;
pub mod caster;
pub mod config;
pub mod error;
pub mod plugin;
pub mod prelude;
pub mod probe_group;
pub mod surface;
