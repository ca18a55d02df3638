use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;
use std::collections::HashSet;

use crate::enums::GLuint;

#[derive(PartialEq, Eq)]
struct InverseName(GLuint);

impl PartialOrd for InverseName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InverseName {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// `NameAllocator` hands out the non-zero integer names clients use to refer to
/// objects. Freed names are recycled, smallest first. Name 0 is reserved and is
/// never allocated nor freed.
pub struct NameAllocator {
    next: GLuint,
    frees: BinaryHeap<InverseName>,
    alive: HashSet<GLuint>,
}

impl Default for NameAllocator {
    fn default() -> Self {
        NameAllocator::new()
    }
}

impl NameAllocator {
    /// Constructs a new, empty `NameAllocator`.
    pub fn new() -> NameAllocator {
        NameAllocator {
            next: 1,
            frees: BinaryHeap::new(),
            alive: HashSet::new(),
        }
    }

    /// Reserves `count` unused names.
    pub fn allocate(&mut self, count: usize) -> Vec<GLuint> {
        (0..count).map(|_| self.allocate_one()).collect()
    }

    fn allocate_one(&mut self) -> GLuint {
        // The free heap might still hold names that have been reserved
        // explicitly since they were freed, skip them.
        while let Some(InverseName(name)) = self.frees.pop() {
            if self.alive.insert(name) {
                return name;
            }
        }

        loop {
            let name = self.next;
            self.next += 1;
            if self.alive.insert(name) {
                return name;
            }
        }
    }

    /// Reserves `count` consecutive unused names and returns the first one.
    /// Recycled names are not considered.
    pub fn allocate_range(&mut self, count: usize) -> Option<GLuint> {
        if count == 0 {
            return None;
        }

        let count = count as GLuint;
        let mut first = self.next;
        loop {
            let end = first.checked_add(count)?;
            match (first..end).rev().find(|v| self.alive.contains(v)) {
                Some(used) => first = used + 1,
                None => {
                    self.alive.extend(first..end);
                    self.next = end;
                    return Some(first);
                }
            }
        }
    }

    /// Marks a name that was never handed out by `allocate` as used. Returns
    /// false if the name is 0 or already alive.
    pub fn reserve(&mut self, name: GLuint) -> bool {
        name != 0 && self.alive.insert(name)
    }

    /// Returns true if the name is currently in use.
    #[inline]
    pub fn is_alive(&self, name: GLuint) -> bool {
        self.alive.contains(&name)
    }

    /// Recycles the name.
    pub fn free(&mut self, name: GLuint) -> bool {
        if name == 0 || !self.alive.remove(&name) {
            false
        } else {
            self.frees.push(InverseName(name));
            true
        }
    }

    /// Returns the total number of alive names.
    #[inline]
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }
}
