/// Returns an approximate in-memory size, used for pool/tree capacity
/// accounting where an exact heap profile isn't worth the cost.
pub trait InMemorySize {
    /// Approximate size in bytes.
    fn size(&self) -> usize;
}

impl InMemorySize for alloy_primitives::Bytes {
    fn size(&self) -> usize {
        self.len()
    }
}
