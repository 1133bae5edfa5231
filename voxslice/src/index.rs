use hashbrown::HashMap;
use voxfile::Voxel;

// -------------------------------------------------------------------------------------------------

/// Coordinate-keyed lookup over a set of voxels, for O(1) adjacency queries.
///
/// The three byte-range coordinates are packed into a single `u32` key, so no
/// allocation happens per lookup in the adjacency-walk hot loops. An index is
/// built fresh from its input and never mutated afterwards; rebuild it when
/// the input changes.
#[derive(Clone, Debug, Default)]
pub struct SpatialIndex {
    map: HashMap<u32, Voxel>,
}

/// Coordinates are bounded by the format's byte range, so they pack
/// losslessly into the low 24 bits.
fn key(x: u8, y: u8, z: u8) -> u32 {
    u32::from(x) | (u32::from(y) << 8) | (u32::from(z) << 16)
}

impl SpatialIndex {
    /// Builds an index over `voxels`.
    ///
    /// Duplicate coordinates are not expected, but must not break anything:
    /// the last voxel at a coordinate wins.
    pub fn build(voxels: &[Voxel]) -> Self {
        let mut map = HashMap::with_capacity(voxels.len());
        for &voxel in voxels {
            map.insert(key(voxel.x, voxel.y, voxel.z), voxel);
        }
        Self { map }
    }

    /// Whether a voxel occupies `(x, y, z)`.
    pub fn has(&self, x: u8, y: u8, z: u8) -> bool {
        self.map.contains_key(&key(x, y, z))
    }

    /// The voxel at `(x, y, z)`, if any.
    pub fn get(&self, x: u8, y: u8, z: u8) -> Option<Voxel> {
        self.map.get(&key(x, y, z)).copied()
    }

    /// [`has()`](Self::has) for neighbor arithmetic that may step outside the
    /// byte coordinate range; such positions are simply unoccupied.
    pub fn has_signed(&self, x: i32, y: i32, z: i32) -> bool {
        match (u8::try_from(x), u8::try_from(y), u8::try_from(z)) {
            (Ok(x), Ok(y), Ok(z)) => self.has(x, y, z),
            _ => false,
        }
    }

    /// Number of distinct occupied coordinates.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the index contains no voxels.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// -------------------------------------------------------------------------------------------------
