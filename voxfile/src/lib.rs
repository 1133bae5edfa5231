//! Decoder for the MagicaVoxel `.vox` file format.
//!
//! The format is a tagged chunk container: a `"VOX "` magic tag and version
//! number, then a `MAIN` chunk whose children describe the file. This crate
//! interprets the `PACK`, `SIZE`, `XYZI`, and `RGBA` chunks and skips
//! everything else, yielding a [`VoxFile`]: an ordered list of [`Model`]s
//! (each a declared [`Size`] paired with its [`Voxel`] list) and a 256-entry
//! color palette.
//!
//! Decoding is a pure computation over the input buffer: no I/O, no shared
//! state, no caching between calls. File acquisition and display belong to
//! the caller.
//!
//! ```
//! let mut bytes = b"VOX ".to_vec();
//! bytes.extend(150u32.to_le_bytes());
//! bytes.extend(b"MAIN");
//! bytes.extend(0u32.to_le_bytes());
//! bytes.extend(0u32.to_le_bytes());
//!
//! let file = voxfile::decode(&bytes).unwrap();
//! assert_eq!(file.models, vec![]);
//! assert_eq!(file.palette, voxfile::DEFAULT_PALETTE);
//! ```

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

mod chunk;
mod cursor;
mod data;
mod decode;
mod error;
mod palette;

pub use chunk::{ChunkHeader, ChunkReader, CHUNK_HEADER_LEN};
pub use cursor::Cursor;
pub use data::{Color, Model, Size, VoxFile, Voxel};
pub use decode::decode;
pub use error::DecodeError;
pub use palette::DEFAULT_PALETTE;
