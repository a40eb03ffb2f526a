use crate::models::ClassDescriptor;
use std::sync::Arc;

/// Looks up the statically known descriptor of a class by its fully
/// qualified name.
///
/// This is the seam where a host plugs in whatever knows about compiled
/// classes: an explicit registry, a manifest produced at build time, or a
/// bridge into a live compiler.
pub trait ClassResolver: Send + Sync {
    /// Returns `None` when the class is unknown. Absence is an expected
    /// outcome (source files without compiled counterparts), not an error.
    fn resolve(&self, name: &str) -> Option<Arc<ClassDescriptor>>;

    /// Resolver name (for logging/debugging)
    fn name(&self) -> &str {
        "resolver"
    }
}
