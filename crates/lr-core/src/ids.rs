//! Identifier types.
//!
//! `StreamId` is a dense index into the driver's stream list and follows the
//! `Copy + Ord + Hash` integer-wrapper pattern.  `SinkId` is opaque to the
//! scheduler: it names an output destination owned by the sink collaborator
//! (for the file sink, a path).

use std::fmt;
use std::sync::Arc;

/// Index of a stream in the order it was registered with the driver.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamId(pub u32);

impl StreamId {
    /// Sentinel meaning "no valid stream".
    pub const INVALID: StreamId = StreamId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for StreamId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamId({})", self.0)
    }
}

impl TryFrom<usize> for StreamId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<StreamId, Self::Error> {
        u32::try_from(n).map(StreamId)
    }
}

/// Opaque name of an output destination.
///
/// Backed by an `Arc<str>` so cloning into every event of a cycle does not
/// copy the string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SinkId(Arc<str>);

impl SinkId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SinkId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SinkId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for SinkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SinkId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SinkId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SinkId::from)
    }
}
