//! Transaction reference allocation.
//!
//! The reference is the opaque correlation key shared by a transfer record
//! and its ledger entries. Allocation is an injected capability so the
//! orchestrator never reaches for process-wide state.

use uuid::Uuid;

/// Allocates a unique opaque transaction reference per transfer.
pub trait ReferenceAllocator: Send + Sync {
    fn allocate(&self) -> String;
}

/// UUID v4 backed allocator.
pub struct UuidReferenceAllocator;

impl ReferenceAllocator for UuidReferenceAllocator {
    fn allocate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}


#[cfg(test)]
pub use sequence::SequenceReferenceAllocator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_allocator_is_unique() {
        let allocator = UuidReferenceAllocator;
        let a = allocator.allocate();
        let b = allocator.allocate();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36); // hyphenated UUID
    }

    #[test]
    fn test_sequence_allocator() {
        let allocator = SequenceReferenceAllocator::new();
        assert_eq!(allocator.allocate(), "REF-1");
        assert_eq!(allocator.allocate(), "REF-2");
    }
}
