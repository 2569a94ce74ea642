//! Byte-offset to line-number resolution over a source text.

/// Precomputed line-start offsets of a source text.
///
/// The syntax tool reports byte spans; this index turns a span start into the
/// 1-based line it falls on with a binary search instead of rescanning the
/// text for every declaration.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
    /// Length of the indexed text in bytes.
    len: u32,
}

impl LineIndex {
    /// Builds the index for `content`.
    ///
    /// Only `\n` bytes are looked at, so the text need not be valid UTF-8.
    pub fn new(content: impl AsRef<[u8]>) -> Self {
        let content = content.as_ref();
        let mut line_starts = vec![0u32];
        for (i, &byte) in content.iter().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self {
            line_starts,
            len: content.len() as u32,
        }
    }

    /// Returns the 1-based line containing `byte_offset`.
    ///
    /// Offsets past the end of the text resolve to the last line, so a dump
    /// produced from a slightly different file never panics here.
    pub fn line_of(&self, byte_offset: u32) -> u32 {
        let offset = byte_offset.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (line_idx as u32) + 1
    }

    /// Returns the number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_starts_computation() {
        let idx = LineIndex::new("abc\ndef\nghi");
        assert_eq!(idx.line_starts, vec![0, 4, 8]);
        assert_eq!(idx.line_count(), 3);
    }

    #[test]
    fn line_resolution() {
        let idx = LineIndex::new("abc\ndef\nghi");
        assert_eq!(idx.line_of(0), 1);
        assert_eq!(idx.line_of(3), 1);
        assert_eq!(idx.line_of(4), 2);
        assert_eq!(idx.line_of(5), 2);
        assert_eq!(idx.line_of(8), 3);
    }

    #[test]
    fn offset_past_end_clamps() {
        let idx = LineIndex::new("a\nb\n");
        assert_eq!(idx.line_of(1_000), 3);
    }

    #[test]
    fn offsets_count_raw_bytes() {
        // Latin-1 comment: every 0xE9 is one byte, not a replacement char.
        let mut src = b"// ".to_vec();
        src.extend([0xE9; 40]);
        src.extend_from_slice(b"\nmodule m;\n");
        let idx = LineIndex::new(&src);
        assert_eq!(idx.line_of(42), 1);
        assert_eq!(idx.line_of(44), 2);
        assert_eq!(idx.line_count(), 3);
    }

    #[test]
    fn empty_text() {
        let idx = LineIndex::new("");
        assert_eq!(idx.line_of(0), 1);
    }
}
