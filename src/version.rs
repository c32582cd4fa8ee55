//! Casthi addon version parsing and comparison
//!
//! Addon manifests carry fixed five-segment versions such as `14.0.1.0.0`.
//! Versions compare lexicographically segment by segment.

use std::fmt;

/// Number of dot-separated segments in a well-formed version string.
pub const VERSION_SEGMENTS: usize = 5;

/// Lower sentinel used when a rule declares no minimum version.
pub const EARLIEST_VERSION: &str = "0.0.0.0.0";

/// Upper sentinel used when a rule declares no maximum version.
/// Five `u32::MAX` segments, so every parseable version sits at or below it.
pub const LATEST_VERSION: &str =
    "4294967295.4294967295.4294967295.4294967295.4294967295";

/// A parsed five-segment addon version.
///
/// Derived `Ord` on the array gives the segment-by-segment lexicographic
/// comparison the gating logic relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version([u32; VERSION_SEGMENTS]);

impl Version {
    /// Parse a dotted version string.
    ///
    /// Returns `None` when the segment count is not exactly
    /// [`VERSION_SEGMENTS`] or any segment is not a non-negative integer.
    /// Never panics.
    pub fn parse(text: &str) -> Option<Version> {
        let mut segments = [0u32; VERSION_SEGMENTS];
        let mut count = 0;

        for part in text.split('.') {
            if count == VERSION_SEGMENTS {
                return None; // too many segments
            }
            segments[count] = part.parse().ok()?;
            count += 1;
        }

        if count == VERSION_SEGMENTS {
            Some(Version(segments))
        } else {
            None
        }
    }

    pub fn segments(&self) -> &[u32; VERSION_SEGMENTS] {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", seg)?;
            first = false;
        }
        Ok(())
    }
}
