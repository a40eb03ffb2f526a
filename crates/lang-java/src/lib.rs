//! JVM conventions for qualifier discovery: artifact layout, JDK boot path
//! discovery, search-path environment and descriptor manifests.

pub mod environment;
pub mod jdk;
pub mod layout;
pub mod manifest;

pub use environment::JvmEnvironment;
pub use jdk::{JdkDiscoverer, JdkInstallation};
pub use layout::JavaLayout;
pub use manifest::{builtin_descriptors, load_registry};
