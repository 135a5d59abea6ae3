//! Opaque length-prefixed string payloads.
//!
//! Channel file strings carry no encoding guarantee. [`ByteString`] keeps the
//! exact bytes and only renders them as text (printable ASCII, everything else
//! escaped) when displayed or serialized.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::util::hex::escape_bytes;

/// The raw bytes of a string field, exactly as stored in the file.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    pub fn new(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the contents as `&str` if every byte is ASCII.
    pub fn as_ascii(&self) -> Option<&str> {
        if self.0.is_ascii() {
            std::str::from_utf8(&self.0).ok()
        } else {
            None
        }
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_bytes(&self.0))
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", escape_bytes(&self.0))
    }
}

impl Serialize for ByteString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&escape_bytes(&self.0))
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        ByteString(bytes.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        ByteString(s.as_bytes().to_vec())
    }
}

impl PartialEq<&str> for ByteString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_escapes_non_ascii() {
        let s = ByteString::from(vec![b'O', b'K', 0xff, 0x00]);
        assert_eq!(s.to_string(), "OK\\xff\\x00");
        assert_eq!(s.len(), 4);
        assert!(s.as_ascii().is_none());
    }

    #[test]
    fn test_ascii_view() {
        let s = ByteString::from("HEAD-07");
        assert_eq!(s.as_ascii(), Some("HEAD-07"));
        assert!(s == "HEAD-07");
    }

    #[test]
    fn test_serializes_as_text() {
        let s = ByteString::from(vec![b'x', 0x01]);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"x\\\\x01\"");
    }
}
