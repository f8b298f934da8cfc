use serde::{Deserialize, Serialize};

/// Monotonic numeric id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id(u64);

impl Id {
    pub fn new(n: u64) -> Self {
        Id(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out increasing ids, starting at 1.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> Id {
        self.last += 1;
        Id(self.last)
    }
}
