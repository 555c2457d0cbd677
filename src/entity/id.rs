use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-unique identity of a game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out object ids in strictly increasing order. An id is never handed out twice, even
/// after the object carrying it has been removed.
///
/// The allocator is owned by a `Scene` and can be moved into the next scene on a stage
/// transition, so ids stay unique for the whole run without a global counter.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub const fn allocated(&self) -> u64 {
        self.next
    }
}
