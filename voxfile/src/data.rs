//! The canonical in-memory form of a decoded `.vox` file.

// -------------------------------------------------------------------------------------------------

/// One voxel of a [`Model`].
///
/// Coordinates are local to the owning model's [`Size`] box. The format stores
/// them as single bytes, so they are bounded by `[0, 255]` regardless of the
/// declared size; consumers must tolerate voxels outside the box (the decoder
/// does not validate them).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Voxel {
    /// X coordinate.
    pub x: u8,
    /// Y coordinate.
    pub y: u8,
    /// Z coordinate. By MagicaVoxel convention this is the vertical axis.
    pub z: u8,
    /// Index into the file's [`palette`](VoxFile::palette).
    ///
    /// Index 0 denotes an empty/transparent voxel and should be skipped by
    /// consumers that materialize geometry.
    pub color_index: u8,
}

/// Declared bounding-box dimensions of one [`Model`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Size {
    /// Extent along the X axis.
    pub x: u32,
    /// Extent along the Y axis.
    pub y: u32,
    /// Extent along the Z axis.
    pub z: u32,
}

/// One RGBA palette entry, 8 bits per component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 0 is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the mandatory palette entry 0.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Unpacks a `0xRRGGBBAA` value with the red component in the high byte.
    pub(crate) const fn from_rgba_u32(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }
}

/// One independently-sized voxel grid within a decoded file.
///
/// Produced by the strict pairing of a `SIZE` chunk with the `XYZI` chunk
/// that follows it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Model {
    /// Declared bounding box of this model.
    pub size: Size,
    /// The voxels of this model, in file order.
    pub voxels: Vec<Voxel>,
}

/// A fully decoded `.vox` file.
///
/// Created once per [`decode()`](crate::decode) call and immutable thereafter;
/// the caller owns it exclusively and discards it (together with anything
/// derived from it) when loading a new file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoxFile {
    /// Format version read from the file header. The known version is 150,
    /// but other versions are decoded on a best-effort basis.
    pub version: u32,
    /// The models of the file, in file order. Packed-model files contain
    /// several; an empty list is valid.
    pub models: Vec<Model>,
    /// The color palette: exactly 256 entries, entry 0 always fully
    /// transparent. The built-in default unless the file carried its own
    /// `RGBA` chunk.
    pub palette: [Color; 256],
    /// Model count declared by a `PACK` chunk, if any.
    ///
    /// Informational only: corrupt files may declare absurd counts, so the
    /// actual number of decoded models is always `models.len()`.
    pub declared_model_count: Option<u32>,
}

impl VoxFile {
    /// Total number of voxels across all models.
    pub fn total_voxels(&self) -> usize {
        self.models.iter().map(|model| model.voxels.len()).sum()
    }
}
