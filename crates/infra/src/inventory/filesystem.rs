//! Filesystem-backed inventory.
//!
//! Layout (relative to a content root):
//! - `plugins/`: regular plugins, as top-level `*.php` files or one directory
//!   level deep (`akismet/akismet.php`);
//! - `mu-plugins/`: must-use plugins, top-level `*.php` files only;
//! - the content root itself: drop-ins with fixed file names.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plugboard_catalog::raw::fields;
use plugboard_catalog::{BucketKind, InventoryEntry, InventoryError, InventorySource};

use super::headers::read_plugin_file;

/// Drop-ins recognized on every deployment.
pub const DROPINS: [&str; 8] = [
    "advanced-cache.php",
    "db.php",
    "db-error.php",
    "install.php",
    "maintenance.php",
    "object-cache.php",
    "php-error.php",
    "fatal-error-handler.php",
];

/// Drop-ins recognized only on network deployments.
pub const NETWORK_DROPINS: [&str; 4] = [
    "sunrise.php",
    "blog-deleted.php",
    "blog-inactive.php",
    "blog-suspended.php",
];

/// Placeholder `index.php` files at or below this size are not plugins.
const SILENCE_FILE_MAX_BYTES: u64 = 30;

#[derive(Debug, Clone)]
pub struct FsInventory {
    content_dir: PathBuf,
    plugin_dir: PathBuf,
    mu_plugin_dir: PathBuf,
    network: bool,
}

impl FsInventory {
    /// Conventional layout under `content_dir`.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        let content_dir = content_dir.into();
        Self {
            plugin_dir: content_dir.join("plugins"),
            mu_plugin_dir: content_dir.join("mu-plugins"),
            content_dir,
            network: false,
        }
    }

    pub fn with_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_dir = dir.into();
        self
    }

    pub fn with_mu_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mu_plugin_dir = dir.into();
        self
    }

    /// Recognize the network-only drop-ins as well.
    pub fn with_network_dropins(mut self, network: bool) -> Self {
        self.network = network;
        self
    }

    fn is_dropin(&self, file_name: &str) -> bool {
        DROPINS.contains(&file_name) || (self.network && NETWORK_DROPINS.contains(&file_name))
    }
}

impl InventorySource for FsInventory {
    fn all_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        let bucket = BucketKind::All;
        let mut candidates = Vec::new();

        for entry in list_dir(&self.plugin_dir, bucket)? {
            if entry.is_dir {
                let nested = match list_dir(&entry.path, bucket) {
                    Ok(nested) => nested,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable plugin directory");
                        continue;
                    }
                };
                for nested in nested {
                    if !nested.is_dir && is_php(&nested.name) {
                        candidates.push((format!("{}/{}", entry.name, nested.name), nested.path));
                    }
                }
            } else if is_php(&entry.name) {
                candidates.push((entry.name, entry.path));
            }
        }

        let mut entries: Vec<InventoryEntry> = candidates
            .into_iter()
            .filter_map(|(key, path)| read_entry(key, &path))
            .filter(|e| !e.record.text(fields::NAME).is_empty())
            .collect();

        entries.sort_by(by_name);
        Ok(entries)
    }

    fn dropins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        let mut entries: Vec<InventoryEntry> = list_dir(&self.content_dir, BucketKind::Dropin)?
            .into_iter()
            .filter(|e| !e.is_dir && self.is_dropin(&e.name))
            .filter_map(|e| read_entry(e.name, &e.path))
            .map(name_falls_back_to_key)
            .collect();

        entries.sort_by(|a, b| caseless(a.id.as_str(), b.id.as_str()));
        Ok(entries)
    }

    fn must_use_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        let mut entries: Vec<InventoryEntry> = list_dir(&self.mu_plugin_dir, BucketKind::MustUse)?
            .into_iter()
            .filter(|e| !e.is_dir && is_php(&e.name))
            .filter(|e| !(e.name == "index.php" && e.len <= SILENCE_FILE_MAX_BYTES))
            .filter_map(|e| read_entry(e.name, &e.path))
            .map(name_falls_back_to_key)
            .collect();

        entries.sort_by(by_name);
        Ok(entries)
    }
}

struct DirEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
    len: u64,
}

/// Visible entries of `dir`. A missing directory is an empty bucket.
fn list_dir(dir: &Path, bucket: BucketKind) -> Result<Vec<DirEntry>, InventoryError> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(InventoryError::unavailable(
                bucket,
                format!("{}: {e}", dir.display()),
            ));
        }
    };

    let mut entries = Vec::new();
    for item in read {
        let item = item.map_err(|e| {
            InventoryError::unavailable(bucket, format!("{}: {e}", dir.display()))
        })?;

        let Ok(name) = item.file_name().into_string() else {
            tracing::warn!(dir = %dir.display(), "skipping non UTF-8 file name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let path = item.path();
        // Follows symlinks, so linked plugin directories are scanned too.
        let Ok(meta) = fs::metadata(&path) else {
            tracing::warn!(path = %path.display(), "skipping unreadable entry");
            continue;
        };

        entries.push(DirEntry {
            name,
            path,
            is_dir: meta.is_dir(),
            len: meta.len(),
        });
    }

    Ok(entries)
}

fn read_entry(key: String, path: &Path) -> Option<InventoryEntry> {
    match read_plugin_file(path) {
        Ok(record) => Some(InventoryEntry::new(key, record)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable plugin file");
            None
        }
    }
}

fn name_falls_back_to_key(mut entry: InventoryEntry) -> InventoryEntry {
    if entry.record.text(fields::NAME).is_empty() {
        let key = entry.id.as_str().to_string();
        entry.record.insert(fields::NAME, key);
    }
    entry
}

fn is_php(name: &str) -> bool {
    name.len() > 4 && name.ends_with(".php")
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn by_name(a: &InventoryEntry, b: &InventoryEntry) -> Ordering {
    caseless(&a.record.text(fields::NAME), &b.record.text(fields::NAME))
        .then_with(|| a.id.cmp(&b.id))
}
