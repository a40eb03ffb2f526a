//! Accepted qualifier set and the explicit descriptor registry that stands
//! in for reflective class loading.

use crate::error::{LoaderError, Result};
use indexmap::IndexMap;
use qualscan_api::{ClassDescriptor, ClassResolver};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Accepted qualifier classes, keyed by fully qualified name in acceptance
/// order. Consumers only get read access; the loader that owns the set is
/// the only writer.
#[derive(Debug, Clone, Default)]
pub struct LoadedQualifierSet {
    entries: IndexMap<String, Arc<ClassDescriptor>>,
}

impl LoadedQualifierSet {
    pub(crate) fn insert(&mut self, descriptor: Arc<ClassDescriptor>) -> bool {
        let name = descriptor.name().to_string();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, descriptor);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClassDescriptor>> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copies the accepted descriptors out, for consumers that keep their
    /// own permanent registry.
    pub fn to_vec(&self) -> Vec<Arc<ClassDescriptor>> {
        self.entries.values().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a LoadedQualifierSet {
    type Item = &'a Arc<ClassDescriptor>;
    type IntoIter = indexmap::map::Values<'a, String, Arc<ClassDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// On-disk form of a descriptor registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptorManifest {
    #[serde(default)]
    pub descriptors: Vec<ClassDescriptor>,
}

impl DescriptorManifest {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let manifest: DescriptorManifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }
}

/// Thread-safe in-memory map from class name to descriptor, populated from
/// manifests or explicit registration calls.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: RwLock<HashMap<String, Arc<ClassDescriptor>>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: DescriptorManifest) -> Result<Self> {
        let registry = Self::new();
        registry.register_all(manifest.descriptors)?;
        Ok(registry)
    }

    pub fn from_manifest_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manifest = DescriptorManifest::from_json_file(path)?;
        debug!(
            "Loaded {} descriptors from {:?}",
            manifest.descriptors.len(),
            path
        );
        Self::from_manifest(manifest)
    }

    /// Registers a descriptor, replacing any previous one with the same name.
    pub fn register(&self, descriptor: ClassDescriptor) -> Result<()> {
        descriptor.validate()?;
        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if descriptors
            .insert(descriptor.name.clone(), Arc::new(descriptor))
            .is_some()
        {
            debug!("Replaced an already registered descriptor");
        }
        Ok(())
    }

    pub fn register_all(&self, descriptors: impl IntoIterator<Item = ClassDescriptor>) -> Result<()> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exports the registry as a manifest, sorted by name.
    pub fn to_manifest(&self) -> DescriptorManifest {
        let descriptors = self
            .descriptors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut descriptors: Vec<ClassDescriptor> =
            descriptors.values().map(|d| (**d).clone()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        DescriptorManifest { descriptors }
    }

    pub fn write_manifest(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_manifest())?;
        std::fs::write(path.as_ref(), json).map_err(LoaderError::from)
    }
}

impl ClassResolver for DescriptorRegistry {
    fn resolve(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        self.descriptors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    fn name(&self) -> &str {
        "descriptor registry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualscan_api::ElementType;

    #[test]
    fn test_loaded_set_dedupes_and_keeps_order() {
        let mut set = LoadedQualifierSet::default();
        assert!(set.insert(Arc::new(ClassDescriptor::annotation("demo.B"))));
        assert!(set.insert(Arc::new(ClassDescriptor::annotation("demo.A"))));
        assert!(!set.insert(Arc::new(ClassDescriptor::annotation("demo.B"))));

        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["demo.B", "demo.A"]);
        assert!(set.contains("demo.A"));
        assert_eq!(set.to_vec().len(), 2);
        assert_eq!((&set).into_iter().count(), 2);
    }

    #[test]
    fn test_registry_resolves_registered() {
        let registry = DescriptorRegistry::new();
        registry
            .register(ClassDescriptor::annotation("demo.qual.A").with_target([ElementType::TypeUse]))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("demo.qual.A").is_some());
        assert!(registry.resolve("demo.qual.B").is_none());
    }

    #[test]
    fn test_registry_rejects_invalid_descriptor() {
        let registry = DescriptorRegistry::new();
        let err = registry
            .register(ClassDescriptor::annotation("demo..A"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Api(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_manifest_file_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("qualifiers.json");

        let registry = DescriptorRegistry::new();
        registry
            .register_all([
                ClassDescriptor::annotation("demo.qual.B").with_target([ElementType::Method]),
                ClassDescriptor::annotation("demo.qual.A").with_target([ElementType::TypeUse]),
            ])
            .unwrap();
        registry.write_manifest(&path).unwrap();

        let loaded = DescriptorRegistry::from_manifest_file(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.resolve("demo.qual.B").unwrap().target,
            Some(vec![ElementType::Method])
        );
        assert_eq!(loaded.to_manifest().descriptors[0].name, "demo.qual.A");
    }
}
