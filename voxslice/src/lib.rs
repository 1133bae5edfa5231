//! Layer slicing and exterior-shell analysis for decoded voxel models.
//!
//! Takes a [`voxfile::Model`] and partitions its voxels into horizontal
//! layers ([`slice()`]), optionally reducing each layer to its visible
//! two-voxel-thick shell so that layer-by-layer display stays light without
//! looking hollowed out. The building blocks, the coordinate lookup
//! ([`SpatialIndex`]) and the exterior classification ([`classify()`]), are
//! public for callers with their own spatial queries to run.
//!
//! Everything here is a pure computation: inputs are borrowed immutably,
//! outputs are freshly allocated, and no state survives a call. Display of
//! the resulting layers is the caller's business.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

mod index;
mod shell;
mod slicer;

pub use index::SpatialIndex;
pub use shell::{classify, is_exterior, ShellClassification};
pub use slicer::{slice, slice_with, Layer, SliceConfig};
