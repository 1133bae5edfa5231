use voxfile::Voxel;

use crate::index::SpatialIndex;

// -------------------------------------------------------------------------------------------------

/// The six axis-aligned face-neighbor offsets.
pub(crate) const FACE_NEIGHBORS: [(i32, i32, i32); 6] = [
    (0, 0, 1),
    (0, 0, -1),
    (0, 1, 0),
    (0, -1, 0),
    (1, 0, 0),
    (-1, 0, 0),
];

/// A layer's voxels split into exterior shell and interior,
/// per [`classify()`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ShellClassification {
    /// Voxels with at least one unoccupied face neighbor in the full model.
    pub exterior: Vec<Voxel>,
    /// Voxels whose six face neighbors are all occupied.
    pub interior: Vec<Voxel>,
}

/// Classifies each voxel of a layer as exterior or interior.
///
/// `full` must index the whole model, not just the layer: a voxel whose only
/// exposed face points at the layer above or below still belongs to the
/// visible shell, which is exactly what the full-model lookup captures.
pub fn classify(layer: &[Voxel], full: &SpatialIndex) -> ShellClassification {
    let mut classification = ShellClassification::default();
    for &voxel in layer {
        if is_exterior(voxel, full) {
            classification.exterior.push(voxel);
        } else {
            classification.interior.push(voxel);
        }
    }
    classification
}

/// Whether at least one of `voxel`'s six face neighbors is absent from `full`.
pub fn is_exterior(voxel: Voxel, full: &SpatialIndex) -> bool {
    FACE_NEIGHBORS.iter().any(|&(dx, dy, dz)| {
        !full.has_signed(
            i32::from(voxel.x) + dx,
            i32::from(voxel.y) + dy,
            i32::from(voxel.z) + dz,
        )
    })
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A solid axis-aligned box of the given extents, color index 1.
    fn solid_box(sx: u8, sy: u8, sz: u8) -> Vec<Voxel> {
        let mut voxels = Vec::new();
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    voxels.push(Voxel {
                        x,
                        y,
                        z,
                        color_index: 1,
                    });
                }
            }
        }
        voxels
    }

    #[test]
    fn cube_3_has_26_exterior_voxels() {
        // Only the center voxel of a 3×3×3 solid cube is enclosed.
        let cube = solid_box(3, 3, 3);
        let full = SpatialIndex::build(&cube);
        let classification = classify(&cube, &full);

        assert_eq!(classification.exterior.len(), 26);
        assert_eq!(
            classification.interior,
            vec![Voxel {
                x: 1,
                y: 1,
                z: 1,
                color_index: 1,
            }]
        );
    }

    #[test]
    fn surface_voxel_count_matches_hollow_cube_formula() {
        // s^3 - (s-2)^3 surface voxels for a solid cube of side s.
        for s in 2u8..=5 {
            let cube = solid_box(s, s, s);
            let full = SpatialIndex::build(&cube);
            let exterior = classify(&cube, &full).exterior.len();
            let s = usize::from(s);
            assert_eq!(exterior, s.pow(3) - (s - 2).pow(3), "side {s}");
        }
    }

    #[test]
    fn exposure_toward_another_layer_counts() {
        // A 3×3×3 cube's middle layer: every voxel of the ring is exposed
        // sideways, and the center voxel of the layer has occupied neighbors
        // above and below, so only it is interior.
        let cube = solid_box(3, 3, 3);
        let full = SpatialIndex::build(&cube);
        let middle: Vec<Voxel> = cube.iter().copied().filter(|v| v.z == 1).collect();

        let classification = classify(&middle, &full);
        assert_eq!(classification.exterior.len(), 8);
        assert_eq!(classification.interior.len(), 1);
    }

    #[test]
    fn lone_voxel_is_exterior() {
        let voxels = solid_box(1, 1, 1);
        let full = SpatialIndex::build(&voxels);
        assert!(is_exterior(voxels[0], &full));
    }

    #[test]
    fn empty_layer_classifies_to_nothing() {
        let full = SpatialIndex::build(&[]);
        assert_eq!(classify(&[], &full), ShellClassification::default());
    }
}
