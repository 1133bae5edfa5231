/// Errors that may occur while decoding a `.vox` file.
///
/// Any of these aborts the decode as a whole; a failed [`decode()`](crate::decode)
/// never hands back a partially assembled [`VoxFile`](crate::VoxFile).
/// Recoverable per-chunk problems (a voxel count that does not fit its chunk,
/// an undersized palette, an unrecognized tag) are logged and skipped instead.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer is shorter than the 8-byte file header.
    #[error("{len} bytes is too small to be a .vox file")]
    TooSmall {
        /// Length of the input buffer.
        len: usize,
    },

    /// The file does not start with the `"VOX "` tag.
    #[error("not a .vox file: expected tag “VOX ”, found “{found}”")]
    BadMagic {
        /// The four characters found where the magic tag should be.
        found: String,
    },

    /// The chunk following the file header is not the `"MAIN"` container.
    #[error("expected MAIN chunk after the file header, found “{found}”")]
    BadRootChunk {
        /// The tag found where `"MAIN"` was expected.
        found: String,
    },

    /// A chunk header declares more content than the remaining bytes can hold.
    #[error("chunk “{tag}” at offset {offset} declares more content than remains in the file")]
    TruncatedChunk {
        /// Tag of the offending chunk.
        tag: String,
        /// Offset of the chunk header within the file.
        offset: usize,
    },

    /// A fixed-size read ran past the end of the buffer.
    #[error("read of {len} bytes at offset {offset} runs past the end of the buffer")]
    OutOfBounds {
        /// Offset at which the read started.
        offset: usize,
        /// Number of bytes the read required.
        len: usize,
    },

    /// An `XYZI` voxel chunk appeared without a preceding unconsumed `SIZE` chunk.
    #[error("XYZI voxel chunk appeared before any SIZE chunk")]
    MissingSize,
}
