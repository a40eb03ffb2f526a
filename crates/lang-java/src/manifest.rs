//! Descriptor manifests for JVM hosts.

use qualscan_api::{ClassDescriptor, ElementDescriptor, ElementType};
use qualscan_core::{DescriptorManifest, DescriptorRegistry, Result};
use std::path::Path;
use tracing::debug;

const TARGET: &str = "java.lang.annotation.Target";
const RETENTION: &str = "java.lang.annotation.Retention";
const DOCUMENTED: &str = "java.lang.annotation.Documented";
const INHERITED: &str = "java.lang.annotation.Inherited";
const REPEATABLE: &str = "java.lang.annotation.Repeatable";

/// The `java.lang.annotation` meta-annotation types. None of them is a type
/// qualifier, but qualifier descriptors refer to them by name.
pub fn builtin_descriptors() -> Vec<ClassDescriptor> {
    let meta = |name: &str| {
        ClassDescriptor::annotation(name)
            .with_target([ElementType::AnnotationType])
            .with_meta_annotation(DOCUMENTED)
    };
    vec![
        meta(TARGET).with_element(ElementDescriptor::new(
            "value",
            "java.lang.annotation.ElementType[]",
        )),
        meta(RETENTION).with_element(ElementDescriptor::new(
            "value",
            "java.lang.annotation.RetentionPolicy",
        )),
        meta(DOCUMENTED),
        meta(INHERITED),
        meta(REPEATABLE).with_element(ElementDescriptor::new("value", "java.lang.Class")),
    ]
}

/// Builds a registry from the builtin descriptors plus each manifest in
/// order. A later manifest replaces earlier descriptors of the same name.
pub fn load_registry<P: AsRef<Path>>(manifests: &[P]) -> Result<DescriptorRegistry> {
    let registry = DescriptorRegistry::new();
    registry.register_all(builtin_descriptors())?;
    for path in manifests {
        let path = path.as_ref();
        let manifest = DescriptorManifest::from_json_file(path)?;
        debug!(
            "Registering {} descriptors from {:?}",
            manifest.descriptors.len(),
            path
        );
        registry.register_all(manifest.descriptors)?;
    }
    Ok(registry)
}
