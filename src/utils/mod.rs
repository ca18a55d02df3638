//! Commonly used utilities.

pub mod name_allocator;

pub use self::name_allocator::NameAllocator;
