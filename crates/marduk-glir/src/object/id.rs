use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a GPU object in the command stream.
///
/// Id 0 is reserved for commands that address the context itself
/// (e.g. `CURRENT`); allocated ids start at 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Target of context-level commands.
    pub const CONTEXT: ObjectId = ObjectId(0);

    #[inline]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source.
///
/// Ids are strictly increasing and never handed out twice, even after the
/// object they named has been deleted. The process-wide instance is reached
/// through [`IdAllocator::global`]; tests that need predictable values build
/// their own.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

static GLOBAL_IDS: IdAllocator = IdAllocator::new();

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// The allocator used by [`GpuObject::new`](super::GpuObject::new).
    #[inline]
    pub fn global() -> &'static IdAllocator {
        &GLOBAL_IDS
    }

    /// Hands out the next id.
    pub fn allocate(&self) -> ObjectId {
        ObjectId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The id the next [`allocate`](Self::allocate) call will return.
    pub fn peek(&self) -> ObjectId {
        ObjectId(self.next.load(Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_allocator_starts_at_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.peek(), ObjectId::new(1));
        assert_eq!(ids.allocate(), ObjectId::new(1));
        assert_eq!(ids.allocate(), ObjectId::new(2));
        assert_eq!(ids.peek(), ObjectId::new(3));
    }

    #[test]
    fn global_ids_strictly_increase() {
        let ids = IdAllocator::global();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(a > ObjectId::CONTEXT);
        assert!(b > a);
    }
}
