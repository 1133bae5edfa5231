use crate::cursor::Cursor;
use crate::error::DecodeError;

// -------------------------------------------------------------------------------------------------

/// Byte length of a chunk header: 4-byte tag + content size + children size.
pub const CHUNK_HEADER_LEN: usize = 12;

/// Header of one chunk in the `.vox` container format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChunkHeader {
    /// Four-character chunk tag, e.g. `"SIZE"` or `"XYZI"`.
    pub tag: String,
    /// Declared length of the chunk's own content, in bytes.
    pub content_size: u32,
    /// Declared total length of the chunk's child chunks, in bytes.
    pub children_size: u32,
    /// Buffer offset at which the content begins.
    pub content_start: usize,
}

impl ChunkHeader {
    /// Buffer offset of the first byte past this chunk's content and children,
    /// i.e. where the next sibling chunk header would begin.
    pub fn next_chunk_start(&self) -> usize {
        self.content_start + self.content_size as usize + self.children_size as usize
    }
}

/// Reads the tagged chunk sequence within a byte range `[start, end)`.
///
/// The sequence is lazy, finite, and non-restartable. After a header is
/// yielded, the caller must advance past the chunk's declared content and
/// children with [`advance_past()`](Self::advance_past) before requesting the
/// next header.
#[derive(Debug)]
pub struct ChunkReader<'a> {
    cursor: Cursor<'a>,
    end: usize,
}

impl<'a> ChunkReader<'a> {
    /// Constructs a reader over `bytes[start..end]`.
    ///
    /// `end` is clamped to the buffer length, so a window declared by an
    /// untrusted size field can be passed in directly.
    pub fn new(bytes: &'a [u8], start: usize, end: usize) -> Self {
        let mut cursor = Cursor::new(bytes);
        cursor.seek_to(start);
        Self {
            cursor,
            end: end.min(bytes.len()),
        }
    }

    /// Reads the next chunk header.
    ///
    /// Returns `Ok(None)` at the end of the window. A leftover of fewer than
    /// [`CHUNK_HEADER_LEN`] bytes is not a valid header and also ends the
    /// sequence (with a warning), mirroring the leniency of
    /// [`Cursor::read_tag()`]. A header whose declared content would extend
    /// past the window fails with [`DecodeError::TruncatedChunk`].
    pub fn next_header(&mut self) -> Result<Option<ChunkHeader>, DecodeError> {
        let offset = self.cursor.position();
        let remaining = self.end.saturating_sub(offset);
        if remaining < CHUNK_HEADER_LEN {
            if remaining != 0 {
                log::warn!("ignoring {remaining} trailing bytes too short to be a chunk header");
            }
            return Ok(None);
        }

        let tag = self.cursor.read_tag(4);
        let content_size = self.cursor.read_u32_le()?;
        let children_size = self.cursor.read_u32_le()?;
        let content_start = self.cursor.position();

        if content_start + content_size as usize > self.end {
            return Err(DecodeError::TruncatedChunk { tag, offset });
        }

        Ok(Some(ChunkHeader {
            tag,
            content_size,
            children_size,
            content_start,
        }))
    }

    /// Advances past `header`'s content and children, to the position of the
    /// next sibling chunk.
    pub fn advance_past(&mut self, header: &ChunkHeader) {
        self.cursor.seek_to(header.next_chunk_start());
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunk(tag: &str, content: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(tag.as_bytes());
        bytes.extend_from_slice(&u32::try_from(content.len()).unwrap().to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(content);
        bytes
    }

    #[test]
    fn yields_sibling_chunks_in_order() {
        let mut bytes = chunk("AAAA", &[1, 2, 3]);
        bytes.extend(chunk("BBBB", &[]));
        let len = bytes.len();

        let mut reader = ChunkReader::new(&bytes, 0, len);

        let first = reader.next_header().unwrap().unwrap();
        assert_eq!(
            first,
            ChunkHeader {
                tag: "AAAA".to_owned(),
                content_size: 3,
                children_size: 0,
                content_start: CHUNK_HEADER_LEN,
            }
        );
        reader.advance_past(&first);

        let second = reader.next_header().unwrap().unwrap();
        assert_eq!(second.tag, "BBBB");
        assert_eq!(second.content_size, 0);
        reader.advance_past(&second);

        assert_eq!(reader.next_header(), Ok(None));
    }

    #[test]
    fn oversized_content_is_a_truncated_chunk() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"XYZI");
        bytes.extend_from_slice(&1000u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]); // far fewer than 1000 bytes of content
        let len = bytes.len();

        let mut reader = ChunkReader::new(&bytes, 0, len);
        assert_eq!(
            reader.next_header(),
            Err(DecodeError::TruncatedChunk {
                tag: "XYZI".to_owned(),
                offset: 0,
            })
        );
    }

    #[test]
    fn partial_trailing_header_ends_the_sequence() {
        let mut bytes = chunk("AAAA", &[]);
        bytes.extend_from_slice(b"BB"); // 2 stray bytes, not a header
        let len = bytes.len();

        let mut reader = ChunkReader::new(&bytes, 0, len);
        let first = reader.next_header().unwrap().unwrap();
        reader.advance_past(&first);
        assert_eq!(reader.next_header(), Ok(None));
    }

    #[test]
    fn window_end_is_clamped_to_buffer() {
        let bytes = chunk("AAAA", &[9]);
        let mut reader = ChunkReader::new(&bytes, 0, usize::MAX);
        let header = reader.next_header().unwrap().unwrap();
        assert_eq!(header.tag, "AAAA");
        reader.advance_past(&header);
        assert_eq!(reader.next_header(), Ok(None));
    }
}
