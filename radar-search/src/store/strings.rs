//! The shared string table (`strings.txt`): one Latin-1 string per line,
//! indexed by line number and interned once at store construction so every
//! typed view can refer to names by a cheap `u16`/`u32` index instead of
//! carrying an owned `String`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringIndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for StringIndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "string index {} out of range (table has {} entries)",
            self.index, self.len
        )
    }
}

impl std::error::Error for StringIndexOutOfRange {}

pub struct StringTable {
    lines: Vec<String>,
}

impl StringTable {
    /// Parses `strings.txt`'s raw bytes, one Latin-1 string per line.
    /// Latin-1 maps bytes directly onto the first 256 Unicode scalar
    /// values, so decoding never fails and needs no external crate.
    pub fn from_latin1_bytes(bytes: &[u8]) -> StringTable {
        let text = decode_latin1(bytes);
        let lines = text.split('\n').map(|line| line.trim_end_matches('\r').to_owned()).collect();
        StringTable { lines }
    }

    pub fn get(&self, index: u32) -> Result<&str, StringIndexOutOfRange> {
        self.lines
            .get(index as usize)
            .map(String::as_str)
            .ok_or(StringIndexOutOfRange {
                index: index as usize,
                len: self.lines.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
