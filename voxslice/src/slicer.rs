use std::collections::BTreeMap;

use itertools::Itertools as _;
use voxfile::{Model, Voxel};

use crate::index::SpatialIndex;
use crate::shell::{classify, ShellClassification};

// -------------------------------------------------------------------------------------------------

/// The four horizontal (in-layer) neighbor offsets; the z axis is deliberately
/// excluded when growing the second shell.
const HORIZONTAL_NEIGHBORS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// One horizontal layer of a sliced model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layer {
    /// The z coordinate shared by every voxel of this layer.
    pub z: u8,
    /// The layer's voxels. After shell reduction this may be a subset of the
    /// model's voxels at this z.
    pub voxels: Vec<Voxel>,
}

/// Thresholds steering shell reduction.
///
/// The defaults are contractual, empirically chosen values carried over from
/// the tool this library grew out of, not derived quantities; changing them
/// changes which layers [`slice()`] reduces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SliceConfig {
    /// Layers whose maximum horizontal thickness is below this are kept
    /// unreduced; there is nothing useful to hollow out.
    pub min_reducible_thickness: u32,
    /// A reduced layer with at most this many voxels (while smaller than the
    /// original) is discarded in favor of the original: a near-empty shell is
    /// visually useless.
    pub max_discarded_candidate: usize,
    /// This many of the lowest z values are always kept unreduced, so the
    /// model's structural support remains visible.
    pub preserved_bottom_layers: u32,
}

impl SliceConfig {
    /// The thresholds [`slice()`] uses.
    pub const DEFAULT: Self = Self {
        min_reducible_thickness: 4,
        max_discarded_candidate: 4,
        preserved_bottom_layers: 2,
    };
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// -------------------------------------------------------------------------------------------------

/// Partitions a model's voxels into horizontal layers, in ascending z order,
/// with [`SliceConfig::DEFAULT`] thresholds.
///
/// With `exterior_only` false the layers are returned exactly as grouped.
/// With it true, each layer above the preserved bottom ones is replaced by
/// its visible shell (exterior voxels plus the interior voxels horizontally
/// adjacent to them) where that reduction is worthwhile; see
/// [`slice_with()`] for the full decision procedure.
///
/// Slicing is a pure function of its arguments: no state is retained between
/// calls, and identical inputs yield identical layer sets.
pub fn slice(model: &Model, exterior_only: bool) -> Vec<Layer> {
    slice_with(model, exterior_only, &SliceConfig::DEFAULT)
}

/// [`slice()`] with explicit thresholds.
///
/// Per layer strictly above the preserved bottom ones:
///
/// 1. Measure the layer's maximum horizontal thickness (per column, the
///    smaller of its contiguous x-run and y-run through the full model).
///    Below [`min_reducible_thickness`](SliceConfig::min_reducible_thickness)
///    the layer is kept as is.
/// 2. Build the reduction candidate: the layer's exterior voxels plus the
///    interior voxels with an exterior horizontal neighbor, giving the shell
///    two voxels of thickness.
/// 3. Keep the original if the candidate is both no larger than
///    [`max_discarded_candidate`](SliceConfig::max_discarded_candidate) and
///    strictly smaller than the original; otherwise use the candidate.
///
/// Layers with no voxels are never emitted.
pub fn slice_with(model: &Model, exterior_only: bool, config: &SliceConfig) -> Vec<Layer> {
    let mut grouped: BTreeMap<u8, Vec<Voxel>> = BTreeMap::new();
    for &voxel in &model.voxels {
        grouped.entry(voxel.z).or_default().push(voxel);
    }

    if exterior_only {
        if let Some(&min_z) = grouped.keys().next() {
            let full = SpatialIndex::build(&model.voxels);
            for (&z, voxels) in &mut grouped {
                if u32::from(z - min_z) < config.preserved_bottom_layers {
                    log::debug!("layer {z}: preserving bottom layer ({} voxels)", voxels.len());
                    continue;
                }
                if let Some(reduced) = reduce_layer(z, voxels, &full, config) {
                    *voxels = reduced;
                }
            }
        }
    }

    grouped
        .into_iter()
        .map(|(z, voxels)| Layer { z, voxels })
        .collect()
}

/// Computes the reduced voxel list for one layer, or [`None`] where the layer
/// should stay unmodified (too thin, or the candidate shell is too small to
/// be worth showing).
fn reduce_layer(
    z: u8,
    layer: &[Voxel],
    full: &SpatialIndex,
    config: &SliceConfig,
) -> Option<Vec<Voxel>> {
    let max_thickness = layer
        .iter()
        .map(|voxel| (voxel.x, voxel.y))
        .unique()
        .map(|(x, y)| column_thickness(x, y, z, full))
        .max()
        .unwrap_or(0);
    if max_thickness < config.min_reducible_thickness {
        log::debug!(
            "layer {z}: thickness is only {max_thickness}, keeping original ({} voxels)",
            layer.len(),
        );
        return None;
    }

    let ShellClassification { exterior, interior } = classify(layer, full);

    // Second shell: interior voxels horizontally adjacent to the exterior,
    // so the reduced layer keeps two voxels of wall.
    let exterior_index = SpatialIndex::build(&exterior);
    let mut candidate = exterior;
    candidate.extend(interior.iter().copied().filter(|voxel| {
        HORIZONTAL_NEIGHBORS.iter().any(|&(dx, dy)| {
            exterior_index.has_signed(
                i32::from(voxel.x) + dx,
                i32::from(voxel.y) + dy,
                i32::from(voxel.z),
            )
        })
    }));

    if candidate.len() <= config.max_discarded_candidate && candidate.len() < layer.len() {
        log::debug!(
            "layer {z}: keeping original ({} voxels) over a near-empty shell ({})",
            layer.len(),
            candidate.len(),
        );
        None
    } else {
        log::debug!(
            "layer {z}: reduced to two-voxel shell ({} of {} voxels)",
            candidate.len(),
            layer.len(),
        );
        Some(candidate)
    }
}

/// The horizontal thickness of the model at one column of a layer: the
/// smaller of the contiguous occupied runs along x and along y through the
/// full model, each including the column itself.
fn column_thickness(x: u8, y: u8, z: u8, full: &SpatialIndex) -> u32 {
    let x_run = axis_run(i32::from(x), i32::from(y), i32::from(z), full, (1, 0));
    let y_run = axis_run(i32::from(x), i32::from(y), i32::from(z), full, (0, 1));
    x_run.min(y_run)
}

/// Length of the contiguous occupied run through `(x, y, z)` along `step`,
/// walking both directions.
fn axis_run(x: i32, y: i32, z: i32, full: &SpatialIndex, step: (i32, i32)) -> u32 {
    let (dx, dy) = step;
    let mut run = 1;
    let (mut cx, mut cy) = (x + dx, y + dy);
    while full.has_signed(cx, cy, z) {
        run += 1;
        cx += dx;
        cy += dy;
    }
    let (mut cx, mut cy) = (x - dx, y - dy);
    while full.has_signed(cx, cy, z) {
        run += 1;
        cx -= dx;
        cy -= dy;
    }
    run
}
