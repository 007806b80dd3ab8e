use crate::types::ZakatError;

/// Trait for builders that produce a validated input or configuration.
///
/// This creates a unified interface for object creation across the crate.
pub trait AssetBuilder<T> {
    /// Builds the final object, returning a Result.
    fn build(self) -> Result<T, ZakatError>;
}

/// Checks a builder's accumulated state before `build` consumes it.
pub trait Validate {
    fn validate(&self) -> Result<(), ZakatError>;
}
