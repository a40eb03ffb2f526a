use crate::jdk::JdkDiscoverer;
use qualscan_core::{SearchPathCollector, SearchPathConfig};
use tracing::debug;

/// Extension directories, joined with the platform path separator.
pub const EXT_DIRS_VAR: &str = "QUALSCAN_EXT_DIRS";
pub const CLASSPATH_VAR: &str = "CLASSPATH";

/// The path lists a JVM would search, captured once, plus the URLs of the
/// loader hosting the checker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JvmEnvironment {
    pub boot_path: Vec<String>,
    pub extension_dirs: Vec<String>,
    pub class_path: Vec<String>,
    pub loader_urls: Vec<String>,
}

impl JvmEnvironment {
    /// Reads the JDK boot path, `QUALSCAN_EXT_DIRS` and `CLASSPATH`. Missing
    /// pieces are left empty.
    pub fn from_env() -> Self {
        let boot_path = JdkDiscoverer::new()
            .discover()
            .map(|jdk| jdk.boot_path())
            .unwrap_or_default();
        let env = Self {
            boot_path,
            extension_dirs: env_list(EXT_DIRS_VAR),
            class_path: env_list(CLASSPATH_VAR),
            loader_urls: Vec::new(),
        };
        debug!(
            "JVM environment: {} boot, {} extension, {} class path lists",
            env.boot_path.len(),
            env.extension_dirs.len(),
            env.class_path.len()
        );
        env
    }

    /// Appends explicit class path entries after the environment's own.
    pub fn with_class_path(mut self, entries: impl IntoIterator<Item = String>) -> Self {
        self.class_path.extend(entries);
        self
    }

    /// `file:` URLs the checker's loader reads from, searched after the
    /// class path.
    pub fn with_loader_urls(mut self, urls: impl IntoIterator<Item = String>) -> Self {
        self.loader_urls.extend(urls);
        self
    }

    pub fn search_path_config(&self) -> SearchPathConfig {
        SearchPathConfig {
            boot_path: self.boot_path.clone(),
            extension_dirs: self.extension_dirs.clone(),
            class_path: self.class_path.clone(),
            loader_urls: self.loader_urls.clone(),
        }
    }

    pub fn collector(&self) -> SearchPathCollector {
        SearchPathCollector::new(self.search_path_config())
    }
}

fn env_list(var: &str) -> Vec<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => vec![value],
        _ => Vec::new(),
    }
}
