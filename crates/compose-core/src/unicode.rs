//! Offset measurement for composing text.
//!
//! Hosts disagree on what one caret step is. Android-style editors count UTF-16
//! code units, most Rust consumers count scalar values. For BMP text (kana,
//! kanji, ASCII) the two agree.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values.
    Char,
    /// UTF-16 code units, as Java/Kotlin and Swift `NSString` hosts index.
    #[default]
    Utf16,
}

impl OffsetUnit {
    pub fn len(self, s: &str) -> usize {
        match self {
            Self::Char => s.chars().count(),
            Self::Utf16 => s.encode_utf16().count(),
        }
    }

    fn width(self, c: char) -> usize {
        match self {
            Self::Char => 1,
            Self::Utf16 => c.len_utf16(),
        }
    }

    /// Byte index of `offset` in `s`, clamped to `s.len()`.
    ///
    /// An offset that falls inside a surrogate pair rounds down to the start
    /// of that character.
    pub fn byte_index(self, s: &str, offset: usize) -> usize {
        let mut units = 0;
        for (idx, c) in s.char_indices() {
            let next = units + self.width(c);
            if next > offset {
                return idx;
            }
            units = next;
        }
        s.len()
    }

    /// Offset of the byte index `byte`. A byte inside a character maps to
    /// the start of that character.
    pub fn offset_of_byte(self, s: &str, byte: usize) -> usize {
        let mut end = byte.min(s.len());
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.len(&s[..end])
    }

    /// Offset of the first occurrence of `needle` in `haystack`.
    pub fn find(self, haystack: &str, needle: &str) -> Option<usize> {
        haystack
            .find(needle)
            .map(|byte| self.offset_of_byte(haystack, byte))
    }

    /// Substring covering offsets `[start, end)`, clamped.
    pub fn slice(self, s: &str, start: usize, end: usize) -> &str {
        let b0 = self.byte_index(s, start);
        let b1 = self.byte_index(s, end.max(start));
        &s[b0..b1]
    }
}

impl std::fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char => f.write_str("char"),
            Self::Utf16 => f.write_str("utf16"),
        }
    }
}

impl std::str::FromStr for OffsetUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(Self::Char),
            "utf16" => Ok(Self::Utf16),
            other => Err(format!("unknown offset unit '{other}' (expected char or utf16)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_byte_inside_char() {
        // "a😀b": 😀 spans bytes 1..5
        assert_eq!(OffsetUnit::Utf16.offset_of_byte("a😀b", 3), 1);
        assert_eq!(OffsetUnit::Utf16.offset_of_byte("a😀b", 5), 3);
        assert_eq!(OffsetUnit::Char.offset_of_byte("ねこ", 1), 0);
        assert_eq!(OffsetUnit::Char.offset_of_byte("ねこ", 99), 2);
    }

    #[test]
    fn test_kana_lengths_agree() {
        assert_eq!(OffsetUnit::Char.len("ねこ"), 2);
        assert_eq!(OffsetUnit::Utf16.len("ねこ"), 2);
    }

    #[test]
    fn test_astral_lengths_differ() {
        assert_eq!(OffsetUnit::Char.len("😀"), 1);
        assert_eq!(OffsetUnit::Utf16.len("😀"), 2);
    }

    #[test]
    fn test_byte_index() {
        let s = "aね😀b";
        assert_eq!(OffsetUnit::Char.byte_index(s, 0), 0);
        assert_eq!(OffsetUnit::Char.byte_index(s, 2), 4);
        assert_eq!(OffsetUnit::Char.byte_index(s, 3), 8);
        assert_eq!(OffsetUnit::Char.byte_index(s, 99), s.len());
        // inside the surrogate pair rounds down
        assert_eq!(OffsetUnit::Utf16.byte_index(s, 3), 4);
        assert_eq!(OffsetUnit::Utf16.byte_index(s, 4), 8);
    }

    #[test]
    fn test_find_and_slice() {
        let s = "😀きょうは";
        assert_eq!(OffsetUnit::Char.find(s, "きょう"), Some(1));
        assert_eq!(OffsetUnit::Utf16.find(s, "きょう"), Some(2));
        assert_eq!(OffsetUnit::Char.find(s, "ねこ"), None);
        assert_eq!(OffsetUnit::Char.slice(s, 1, 3), "きょ");
        assert_eq!(OffsetUnit::Char.slice(s, 3, 1), "");
    }

    #[test]
    fn test_parse() {
        assert_eq!("utf16".parse::<OffsetUnit>(), Ok(OffsetUnit::Utf16));
        assert!("bytes".parse::<OffsetUnit>().is_err());
    }
}
