use crate::error::RemoteError;
use crate::reapi;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A content digest: an opaque hash and a size in bytes.
///
/// Written as `<hash>/<size>` on the command line and in rendered output.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    pub hash: String,
    pub size_bytes: i64,
}

impl Digest {
    /// Creates a new Digest from a hash string and size.
    pub fn new(hash: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            hash: hash.into(),
            size_bytes,
        }
    }

    /// Parses `<hash>/<size>`.
    ///
    /// The split is byte-exact: exactly one `/`, no trimming, and the size
    /// must be a non-negative base-10 integer.
    pub fn parse(text: &str) -> Result<Self, RemoteError> {
        let mut parts = text.split('/');
        let (Some(hash), Some(size), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(RemoteError::malformed_digest(
                text,
                "expected digest in the form hash/size",
            ));
        };

        // `i64::from_str` accepts a leading '+', the digest form does not
        if !size.bytes().all(|b| b.is_ascii_digit()) || size.is_empty() {
            return Err(RemoteError::malformed_digest(
                text,
                format!("invalid size '{size}'"),
            ));
        }
        let size_bytes = size.parse::<i64>().map_err(|e| {
            RemoteError::malformed_digest(text, format!("invalid size '{size}': {e}"))
        })?;

        Ok(Self::new(hash, size_bytes))
    }
}

impl FromStr for Digest {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hash, self.size_bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hash, self.size_bytes)
    }
}

impl From<reapi::Digest> for Digest {
    fn from(d: reapi::Digest) -> Self {
        Self::new(d.hash, d.size_bytes)
    }
}

impl From<&Digest> for reapi::Digest {
    fn from(d: &Digest) -> Self {
        Self {
            hash: d.hash.clone(),
            size_bytes: d.size_bytes,
        }
    }
}

impl From<Digest> for reapi::Digest {
    fn from(d: Digest) -> Self {
        Self {
            hash: d.hash,
            size_bytes: d.size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digest_parse() {
        let d: Digest = "abc/123".parse().unwrap();
        assert_eq!(d.hash, "abc");
        assert_eq!(d.size_bytes, 123);
    }

    #[test]
    fn test_digest_display_fmt() {
        let d = Digest::new("abc", 123);
        assert_eq!(d.to_string(), "abc/123");
        assert_eq!(format!("{d:?}"), "abc/123");
    }

    #[test]
    fn test_malformed_digests() {
        for input in ["abc", "a/b/c", "a/-1", "a/x", "a/", "a/+1", "a/ 1", ""] {
            let err = Digest::parse(input).unwrap_err();
            assert!(
                matches!(err, RemoteError::MalformedDigest { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_size_overflow_is_malformed() {
        let err = Digest::parse("a/99999999999999999999").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedDigest { .. }));
    }

    #[test]
    fn test_empty_hash_is_accepted() {
        let d = Digest::parse("/0").unwrap();
        assert_eq!(d.hash, "");
        assert_eq!(d.size_bytes, 0);
    }

    #[test]
    fn test_leading_zeros_parse_as_integer() {
        let d = Digest::parse("abc/007").unwrap();
        assert_eq!(d.size_bytes, 7);
    }

    #[test]
    fn test_wire_conversion() {
        let d = Digest::new("feed", 42);
        let wire = reapi::Digest::from(&d);
        assert_eq!(wire.hash, "feed");
        assert_eq!(wire.size_bytes, 42);
        assert_eq!(Digest::from(wire), d);
    }

    proptest! {
        #[test]
        fn prop_format_parse_round_trip(hash in "[0-9a-f]{0,64}", size in 0i64..=i64::MAX) {
            let text = format!("{hash}/{size}");
            let digest = Digest::parse(&text).unwrap();
            prop_assert_eq!(digest.to_string(), text);
        }
    }
}
