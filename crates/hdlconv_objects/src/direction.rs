//! Port directions and their textual form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JsonError;

/// The signal-flow mode of a port.
///
/// The textual form is the upper-case mode name (`"IN"`, `"OUT"`, ...).
/// [`Display`](fmt::Display), [`FromStr`] and the serde representation all
/// use it, so a direction written to JSON reads back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// `in`: input port.
    In,
    /// `out`: output port.
    Out,
    /// `inout`: bidirectional port.
    Inout,
    /// `buffer`: output port readable internally.
    Buffer,
    /// `linkage`: linkage-mode port.
    Linkage,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Direction; 5] = [
        Direction::In,
        Direction::Out,
        Direction::Inout,
        Direction::Buffer,
        Direction::Linkage,
    ];

    /// Returns the upper-case name used in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
            Direction::Inout => "INOUT",
            Direction::Buffer => "BUFFER",
            Direction::Linkage => "LINKAGE",
        }
    }

    /// Returns `true` if the port can drive a value out of the entity.
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Out | Direction::Inout | Direction::Buffer)
    }

    /// Returns `true` if the port can receive a value from outside the entity.
    pub fn is_input(self) -> bool {
        matches!(self, Direction::In | Direction::Inout)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a direction name, ignoring ASCII case.
impl FromStr for Direction {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| JsonError::InvalidDirection(s.to_string()))
    }
}
