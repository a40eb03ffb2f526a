//! Discovery and validation of type-qualifier annotations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────┐   ┌──────────────────────┐
//! │ SearchPathCollector  │──▶│ PackageLocator   │──▶│ Bundled/External     │
//! │ (ordered roots)      │   │ (first match)    │   │ Enumerator (names)   │
//! └──────────────────────┘   └──────────────────┘   └──────────┬───────────┘
//!                                                              │
//!                                                              ▼
//!                            ┌──────────────────┐   ┌──────────────────────┐
//!                            │ LoadedQualifier  │◀──│ AnnotationValidator  │
//!                            │ Set              │   │ (shape, synthesis)   │
//!                            └──────────────────┘   └──────────────────────┘
//! ```

pub mod config;
pub mod diagnostics;
pub mod enumerate;
pub mod error;
pub mod loader;
pub mod locate;
pub mod logging;
pub mod registry;
pub mod search_path;
pub mod validate;

pub use config::{ArtifactLayout, LoaderConfig, SynthesisFailurePolicy};
pub use diagnostics::{CollectingSink, TracingSink};
pub use error::{LoaderError, Result};
pub use loader::{CheckerIdentity, QualifierLoader, QualifierLoaderBuilder};
pub use locate::PackageLocation;
pub use registry::{DescriptorManifest, DescriptorRegistry, LoadedQualifierSet};
pub use search_path::{SearchPath, SearchPathCollector, SearchPathConfig, UrlSource};
