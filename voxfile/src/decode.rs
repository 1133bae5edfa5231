use crate::chunk::{ChunkHeader, ChunkReader};
use crate::cursor::Cursor;
use crate::data::{Model, Size, VoxFile, Voxel};
use crate::error::DecodeError;
use crate::palette::{self, DEFAULT_PALETTE};

// -------------------------------------------------------------------------------------------------

/// Tag expected in the first four bytes of every `.vox` file.
const MAGIC: &str = "VOX ";
/// Tag of the root container chunk.
const ROOT_TAG: &str = "MAIN";
/// The format version this decoder was written against. Other versions are
/// decoded on a best-effort basis rather than rejected; the format has been
/// stable, and what other versions change is under-specified.
const KNOWN_VERSION: u32 = 150;
/// Magic tag plus version field.
const FILE_HEADER_LEN: usize = 8;

/// The chunk tags this decoder interprets. Anything else is skipped whole,
/// so that files written by newer tools still decode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ChunkTag {
    /// Declared model count of a packed-model file.
    Pack,
    /// Bounding box of the model in the next `XYZI` chunk.
    Size,
    /// Voxel list, paired with the preceding `SIZE`.
    Xyzi,
    /// Custom color palette.
    Rgba,
    /// Any tag this decoder does not interpret.
    Unknown,
}

impl ChunkTag {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "PACK" => Self::Pack,
            "SIZE" => Self::Size,
            "XYZI" => Self::Xyzi,
            "RGBA" => Self::Rgba,
            _ => Self::Unknown,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Decodes a MagicaVoxel `.vox` file from a byte buffer.
///
/// Structural problems (bad magic, missing root chunk, a chunk header lying
/// about its size, an `XYZI` chunk with no preceding `SIZE`) fail the decode
/// as a whole. Damage confined to a single chunk (a voxel count its chunk
/// cannot hold, an undersized palette, an unrecognized tag) is logged via
/// [`log`] and skipped, so a partially corrupt file still yields its intact
/// models.
pub fn decode(bytes: &[u8]) -> Result<VoxFile, DecodeError> {
    if bytes.len() < FILE_HEADER_LEN {
        return Err(DecodeError::TooSmall { len: bytes.len() });
    }

    let mut cursor = Cursor::new(bytes);
    let magic = cursor.read_tag(4);
    if magic != MAGIC {
        return Err(DecodeError::BadMagic { found: magic });
    }
    let version = cursor.read_u32_le()?;
    if version != KNOWN_VERSION {
        log::warn!("file declares version {version}, expected {KNOWN_VERSION}; decoding anyway");
    }

    // The root chunk header sits directly after the file header.
    let mut root_reader = ChunkReader::new(bytes, cursor.position(), bytes.len());
    let root = root_reader
        .next_header()?
        .ok_or_else(|| DecodeError::BadRootChunk {
            found: String::new(),
        })?;
    if root.tag != ROOT_TAG {
        return Err(DecodeError::BadRootChunk { found: root.tag });
    }

    // All known data lives in MAIN's children; MAIN's own content is skipped.
    let children_start = root.content_start + root.content_size as usize;
    let declared_end = children_start + root.children_size as usize;
    if declared_end > bytes.len() {
        log::warn!(
            "MAIN chunk declares {declared} bytes of children but only {remaining} remain; \
             decoding what is present",
            declared = root.children_size,
            remaining = bytes.len().saturating_sub(children_start),
        );
    }

    let mut models: Vec<Model> = Vec::new();
    let mut palette = DEFAULT_PALETTE;
    let mut declared_model_count = None;
    let mut pending_size: Option<Size> = None;

    let mut reader = ChunkReader::new(bytes, children_start, declared_end);
    while let Some(header) = reader.next_header()? {
        let content = chunk_content(bytes, &header);
        match ChunkTag::from_tag(&header.tag) {
            ChunkTag::Pack => match read_pack(content) {
                Ok(count) => {
                    log::debug!("PACK declares {count} models");
                    // Informational only. Never pre-allocate from it: corrupt
                    // files may declare absurd counts, and the actual model
                    // count falls out of the SIZE/XYZI pairs anyway.
                    declared_model_count = Some(count);
                }
                Err(error) => log::warn!("ignoring malformed PACK chunk: {error}"),
            },
            ChunkTag::Size => match read_size(content) {
                Ok(size) => pending_size = Some(size),
                Err(error) => log::warn!("ignoring malformed SIZE chunk: {error}"),
            },
            ChunkTag::Xyzi => {
                let size = pending_size.take().ok_or(DecodeError::MissingSize)?;
                match read_xyzi(content) {
                    Ok(voxels) => {
                        log::debug!("decoded model of {} voxels", voxels.len());
                        models.push(Model { size, voxels });
                    }
                    Err(error) => {
                        log::warn!("ignoring malformed XYZI chunk: {error}");
                        // The cached size stays available for a later XYZI.
                        pending_size = Some(size);
                    }
                }
            }
            ChunkTag::Rgba => match palette::custom_palette(content) {
                Some(custom) => palette = custom,
                None => log::warn!(
                    "ignoring RGBA palette chunk of {} bytes (need 1024); keeping default palette",
                    content.len(),
                ),
            },
            ChunkTag::Unknown => {
                log::debug!("skipping unknown chunk “{}”", header.tag);
            }
        }
        reader.advance_past(&header);
    }

    let file = VoxFile {
        version,
        models,
        palette,
        declared_model_count,
    };
    log::debug!(
        "decoded .vox file: {} models, {} voxels",
        file.models.len(),
        file.total_voxels(),
    );
    Ok(file)
}

/// The content bytes of `header`. In bounds because
/// [`ChunkReader::next_header`] already validated the declared size.
fn chunk_content<'a>(bytes: &'a [u8], header: &ChunkHeader) -> &'a [u8] {
    &bytes[header.content_start..header.content_start + header.content_size as usize]
}

fn read_pack(content: &[u8]) -> Result<u32, DecodeError> {
    Cursor::new(content).read_u32_le()
}

fn read_size(content: &[u8]) -> Result<Size, DecodeError> {
    let mut cursor = Cursor::new(content);
    Ok(Size {
        x: cursor.read_u32_le()?,
        y: cursor.read_u32_le()?,
        z: cursor.read_u32_le()?,
    })
}

fn read_xyzi(content: &[u8]) -> Result<Vec<Voxel>, DecodeError> {
    let mut cursor = Cursor::new(content);
    let count = cursor.read_u32_le()?;
    let needed = u64::from(count) * 4;
    if needed > cursor.remaining() as u64 {
        return Err(DecodeError::OutOfBounds {
            offset: cursor.position(),
            len: usize::try_from(needed).unwrap_or(usize::MAX),
        });
    }
    let mut voxels = Vec::with_capacity(count as usize);
    for _ in 0..count {
        voxels.push(Voxel {
            x: cursor.read_u8()?,
            y: cursor.read_u8()?,
            z: cursor.read_u8()?,
            color_index: cursor.read_u8()?,
        });
    }
    Ok(voxels)
}
