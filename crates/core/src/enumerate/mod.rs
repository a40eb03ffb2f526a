//! Candidate enumeration.
//!
//! Enumerators only produce names; nothing here checks that a name refers
//! to a loadable annotation.

pub mod bundled;
pub mod external;

pub use bundled::BundledEnumerator;
pub use external::ExternalEnumerator;
