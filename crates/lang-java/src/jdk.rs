//! JDK discovery.
//!
//! Finds the boot path of an installed JDK from:
//! - JAVA_HOME environment variable
//! - macOS java_home tool
//! - Common installation paths
//! - SDKMAN

use crate::layout::JavaLayout;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A JDK found on this machine and the boot path entries it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkInstallation {
    pub root: PathBuf,
    pub version: Option<String>,
    pub boot_entries: Vec<PathBuf>,
}

impl JdkInstallation {
    /// Inspects `root` as a JDK home. `None` if it holds no runtime image.
    pub fn from_root(root: &Path) -> Option<Self> {
        let boot_entries = boot_entries(root)?;
        Some(Self {
            root: root.to_path_buf(),
            version: detect_jdk_version(root),
            boot_entries,
        })
    }

    /// Boot entries the package locator can search, ready for a
    /// `SearchPathConfig`. Only legacy `rt.jar` layouts qualify: a 9+
    /// `lib/modules` image or `.jmod` file is neither a `.jar` nor a
    /// directory, so it is left out.
    pub fn boot_path(&self) -> Vec<String> {
        self.boot_entries
            .iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(JavaLayout::ARCHIVE_SUFFIX))
            })
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }
}

pub struct JdkDiscoverer {
    java_home: Option<PathBuf>,
    search_roots: Vec<PathBuf>,
}

impl JdkDiscoverer {
    /// Discoverer configured from the process environment and the usual
    /// install locations for this platform.
    pub fn new() -> Self {
        Self {
            java_home: std::env::var_os("JAVA_HOME").map(PathBuf::from),
            search_roots: default_search_roots(),
        }
    }

    pub fn with_java_home(mut self, java_home: Option<PathBuf>) -> Self {
        self.java_home = java_home;
        self
    }

    pub fn with_search_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.search_roots = roots;
        self
    }

    pub fn discover(&self) -> Option<JdkInstallation> {
        // 1. JAVA_HOME
        if let Some(home) = &self.java_home {
            if let Some(jdk) = JdkInstallation::from_root(home) {
                debug!("Using JDK from JAVA_HOME at {:?}", jdk.root);
                return Some(jdk);
            }
        }

        // 2. macOS java_home tool
        #[cfg(target_os = "macos")]
        if let Some(jdk) = macos_java_home().and_then(|home| JdkInstallation::from_root(&home)) {
            return Some(jdk);
        }

        // 3. Install roots, either a JDK themselves or a parent of several
        for root in &self.search_roots {
            if !root.exists() {
                continue;
            }
            if let Some(jdk) = JdkInstallation::from_root(root) {
                return Some(jdk);
            }

            let Ok(entries) = std::fs::read_dir(root) else {
                continue;
            };
            let mut candidates: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            candidates.sort();
            for mut sdk_path in candidates {
                if cfg!(target_os = "macos") && sdk_path.join("Contents/Home").exists() {
                    sdk_path = sdk_path.join("Contents/Home");
                }
                if let Some(jdk) = JdkInstallation::from_root(&sdk_path) {
                    debug!("Using JDK found under {:?} at {:?}", root, jdk.root);
                    return Some(jdk);
                }
            }
        }

        debug!("No JDK found");
        None
    }
}

impl Default for JdkDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

fn default_search_roots() -> Vec<PathBuf> {
    let mut search_roots = Vec::new();

    #[cfg(target_os = "macos")]
    {
        search_roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines/"));
        search_roots.push(PathBuf::from("/opt/homebrew/opt/openjdk/"));
        search_roots.push(PathBuf::from("/usr/local/opt/openjdk/"));
    }
    #[cfg(target_os = "linux")]
    {
        search_roots.push(PathBuf::from("/usr/lib/jvm/"));
    }
    #[cfg(target_os = "windows")]
    {
        search_roots.push(PathBuf::from("C:\\Program Files\\Java\\"));
    }

    // SDKMAN
    if let Some(mut sdkman) = dirs::home_dir() {
        sdkman.push(".sdkman/candidates/java/");
        search_roots.push(sdkman);
    }
    search_roots
}

#[cfg(target_os = "macos")]
fn macos_java_home() -> Option<PathBuf> {
    let output = std::process::Command::new("/usr/libexec/java_home")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Runtime image entries in priority order: `lib/modules` (9+), then the
/// legacy `rt.jar`, then `jmods/*.jmod`.
fn boot_entries(sdk_path: &Path) -> Option<Vec<PathBuf>> {
    if !sdk_path.is_dir() {
        return None;
    }

    let modules = sdk_path.join("lib/modules");
    if modules.is_file() {
        return Some(vec![modules]);
    }

    for rt_jar in [sdk_path.join("jre/lib/rt.jar"), sdk_path.join("lib/rt.jar")] {
        if rt_jar.is_file() {
            return Some(vec![rt_jar]);
        }
    }

    let entries = std::fs::read_dir(sdk_path.join("jmods")).ok()?;
    let mut jmods: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(JavaLayout::MODULE_SUFFIX))
        })
        .collect();
    jmods.sort();
    (!jmods.is_empty()).then_some(jmods)
}

fn detect_jdk_version(jdk_root: &Path) -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(jdk_root.join("release")) {
        for line in content.lines() {
            if let Some(version) = line.strip_prefix("JAVA_VERSION=") {
                return Some(version.trim_matches('"').to_string());
            }
        }
    }

    // Fallback: try to extract from path
    let path_str = jdk_root.to_string_lossy();
    regex::Regex::new(r"jdk-?(\d+(?:\.\d+)*)")
        .ok()
        .and_then(|re| re.captures(&path_str))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::File::create(path).unwrap();
    }

    #[test]
    fn test_java_11_layout() {
        let temp = tempfile::tempdir().unwrap();
        let modules = temp.path().join("lib/modules");
        touch(&modules);
        fs::write(temp.path().join("release"), "JAVA_VERSION=\"11.0.2\"\n").unwrap();

        let jdk = JdkInstallation::from_root(temp.path()).unwrap();
        assert_eq!(jdk.boot_entries, vec![modules]);
        assert_eq!(jdk.version.as_deref(), Some("11.0.2"));
        // The runtime image is not searchable
        assert!(jdk.boot_path().is_empty());
    }

    #[test]
    fn test_java_8_layout() {
        let temp = tempfile::tempdir().unwrap();
        let rt_jar = temp.path().join("jre/lib/rt.jar");
        touch(&rt_jar);

        let jdk = JdkInstallation::from_root(temp.path()).unwrap();
        assert_eq!(jdk.boot_entries, vec![rt_jar.clone()]);
        assert_eq!(jdk.boot_path(), vec![rt_jar.to_string_lossy().into_owned()]);
    }

    #[test]
    fn test_jmods_fallback() {
        let temp = tempfile::tempdir().unwrap();
        touch(&temp.path().join("jmods/java.base.jmod"));
        touch(&temp.path().join("jmods/java.sql.jmod"));
        touch(&temp.path().join("jmods/README"));

        let jdk = JdkInstallation::from_root(temp.path()).unwrap();
        assert_eq!(jdk.boot_entries.len(), 2);
        assert!(jdk.boot_entries[0].ends_with("java.base.jmod"));
        assert!(jdk.boot_path().is_empty());
    }

    #[test]
    fn test_version_from_directory_name() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("jdk-17.0.1");
        touch(&root.join("lib/modules"));

        let jdk = JdkInstallation::from_root(&root).unwrap();
        assert_eq!(jdk.version.as_deref(), Some("17.0.1"));
    }

    #[test]
    fn test_discover_prefers_java_home_then_roots() {
        let temp = tempfile::tempdir().unwrap();
        let home = temp.path().join("home");
        let installs = temp.path().join("jvm");
        touch(&home.join("lib/modules"));
        touch(&installs.join("jdk-21/lib/modules"));

        let from_home = JdkDiscoverer::new()
            .with_java_home(Some(home.clone()))
            .with_search_roots(vec![installs.clone()])
            .discover()
            .unwrap();
        assert_eq!(from_home.root, home);

        let from_roots = JdkDiscoverer::new()
            .with_java_home(Some(temp.path().join("missing")))
            .with_search_roots(vec![installs.clone()])
            .discover()
            .unwrap();
        assert_eq!(from_roots.root, installs.join("jdk-21"));
    }

    #[test]
    fn test_empty_directory_is_not_a_jdk() {
        let temp = tempfile::tempdir().unwrap();
        assert!(JdkInstallation::from_root(temp.path()).is_none());
    }
}
