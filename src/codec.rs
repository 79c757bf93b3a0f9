//! UTF-8 ⇄ BMP codepoint conversion
//!
//! The layout engine works on 16-bit codepoints (Basic Multilingual Plane
//! only). 4-byte UTF-8 sequences encode supplementary-plane characters that
//! do not fit the 16-bit model; the decoder skips them entirely so they
//! contribute no placement and no advance.

/// Lazy iterator over the BMP codepoints of a UTF-8 byte sequence.
///
/// Malformed or truncated multi-byte sequences are dropped without
/// terminating iteration.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Codepoints<'a> {
    /// Decode from raw bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for Codepoints<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        while self.pos < self.bytes.len() {
            let lead = self.bytes[self.pos];
            self.pos += 1;

            if lead < 0x80 {
                return Some(lead as u16);
            } else if lead & 0xE0 == 0xC0 {
                // 2-byte sequence
                if self.pos < self.bytes.len() {
                    let c2 = self.bytes[self.pos];
                    self.pos += 1;
                    return Some((((lead & 0x1F) as u16) << 6) | (c2 & 0x3F) as u16);
                }
                // Truncated tail: dropped.
            } else if lead & 0xF0 == 0xE0 {
                // 3-byte sequence
                if self.pos + 1 < self.bytes.len() {
                    let c2 = self.bytes[self.pos];
                    let c3 = self.bytes[self.pos + 1];
                    self.pos += 2;
                    return Some(
                        (((lead & 0x0F) as u16) << 12)
                            | (((c2 & 0x3F) as u16) << 6)
                            | (c3 & 0x3F) as u16,
                    );
                }
                self.pos = self.bytes.len();
            } else if lead & 0xF8 == 0xF0 {
                // 4-byte sequence: supplementary plane, not representable.
                // Skip the continuation bytes and yield nothing for it.
                self.pos = (self.pos + 3).min(self.bytes.len());
            }
            // Stray continuation byte: dropped.
        }
        None
    }
}

/// Decode a string into BMP codepoints.
pub fn codepoints(text: &str) -> Codepoints<'_> {
    Codepoints::new(text.as_bytes())
}

/// UTF-8 encoding of a single BMP codepoint (at most 3 bytes).
#[derive(Debug, Clone, Copy)]
pub struct Utf8Bytes {
    buf: [u8; 3],
    len: u8,
}

impl std::ops::Deref for Utf8Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl AsRef<[u8]> for Utf8Bytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Encode a BMP codepoint as UTF-8.
pub fn encode(cp: u16) -> Utf8Bytes {
    let mut buf = [0u8; 3];
    let len;
    if cp < 0x80 {
        buf[0] = cp as u8;
        len = 1;
    } else if cp < 0x800 {
        buf[0] = 0xC0 | ((cp >> 6) & 0x1F) as u8;
        buf[1] = 0x80 | (cp & 0x3F) as u8;
        len = 2;
    } else {
        buf[0] = 0xE0 | ((cp >> 12) & 0x0F) as u8;
        buf[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
        buf[2] = 0x80 | (cp & 0x3F) as u8;
        len = 3;
    }
    Utf8Bytes { buf, len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_decode() {
        let cps: Vec<u16> = codepoints("AB c").collect();
        assert_eq!(cps, vec![0x41, 0x42, 0x20, 0x63]);
    }

    #[test]
    fn test_cjk_decode() {
        // 「あ」 = 3-byte sequences
        let cps: Vec<u16> = codepoints("「あ」").collect();
        assert_eq!(cps, vec![0x300C, 0x3042, 0x300D]);
    }

    #[test]
    fn test_round_trip_bmp() {
        for cp in 0x20..=0xFFFFu32 {
            let cp = cp as u16;
            if (0xD800..=0xDFFF).contains(&cp) {
                continue; // surrogates have no UTF-8 form
            }
            let bytes = encode(cp);
            let decoded: Vec<u16> = Codepoints::new(&bytes).collect();
            assert_eq!(decoded, vec![cp], "round trip failed for U+{cp:04X}");
        }
    }

    #[test]
    fn test_four_byte_sequence_skipped() {
        // "a𠀀b" - 𠀀 is U+20000, a 4-byte sequence
        let cps: Vec<u16> = codepoints("a\u{20000}b").collect();
        assert_eq!(cps, vec![b'a' as u16, b'b' as u16]);
    }

    #[test]
    fn test_truncated_tail_dropped() {
        // Lead byte of a 3-byte sequence with only one continuation byte
        let cps: Vec<u16> = Codepoints::new(&[b'a', 0xE3, 0x81]).collect();
        assert_eq!(cps, vec![b'a' as u16]);
    }

    #[test]
    fn test_stray_continuation_dropped() {
        let cps: Vec<u16> = Codepoints::new(&[0x80, b'x', 0xBF]).collect();
        assert_eq!(cps, vec![b'x' as u16]);
    }

    #[test]
    fn test_restartable() {
        let iter = codepoints("漢字");
        let first: Vec<u16> = iter.clone().collect();
        let second: Vec<u16> = iter.collect();
        assert_eq!(first, second);
    }
}
