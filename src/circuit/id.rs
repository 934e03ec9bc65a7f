use std::fmt;

/// Stable handle to a gate
///
/// Handles are allocated in increasing order and never reused, so deleting a
/// component leaves the handles of all other components untouched.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct GateId(u32);

/// Stable handle to a wire
///
/// The numeric value doubles as the wire name in exported descriptions.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct WireId(u32);

impl GateId {
    /// Create a handle from its raw index
    pub fn from_raw(v: u32) -> GateId {
        GateId(v)
    }

    /// Return the raw index of the handle
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl WireId {
    /// Create a handle from its raw index
    pub fn from_raw(v: u32) -> WireId {
        WireId(v)
    }

    /// Return the raw index of the handle
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

impl fmt::Debug for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl fmt::Debug for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
