//! Local font cache.
//!
//! Font files are acquired through a [`FontSource`] (an unpacked archive, a download helper) and
//! copied into one directory per family. Charts pick a family by name through
//! `StyleConfig::font_name`; the store only keeps the files where the system font loader can see
//! them.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, Result};

/// Extensions recognized as font files.
const FONT_EXTS: &[&str] = &["ttf", "otf"];

/// Where font files for a family come from.
pub trait FontSource: Send + Sync {
    /// Paths of the font files of `family`, readable for the duration of the call.
    fn fetch(&self, family: &str) -> Result<Vec<PathBuf>>;
}

/// Reads families from an already unpacked directory laid out as `<root>/<family>/**/*.ttf`.
#[derive(Debug, Clone)]
pub struct DirectoryFontSource {
    root: PathBuf,
}

impl DirectoryFontSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FontSource for DirectoryFontSource {
    fn fetch(&self, family: &str) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(family);
        if !dir.is_dir() {
            return Err(ChartError::FontNotFound(family.to_string()));
        }
        let mut files = Vec::new();
        scan_fonts(&dir, &mut files)?;
        if files.is_empty() {
            return Err(ChartError::FontNotFound(family.to_string()));
        }
        files.sort();
        Ok(files)
    }
}

/// Cache of font families, one subdirectory each.
#[derive(Debug, Clone)]
pub struct FontStore {
    dir: PathBuf,
}

impl FontStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/ezchart/fonts`, if the platform has a data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("ezchart").join("fonts"))
    }

    /// Store rooted at [`FontStore::default_dir`].
    pub fn open_default() -> Result<Self> {
        let dir = Self::default_dir().ok_or_else(|| {
            ChartError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no data directory on this platform",
            ))
        })?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy the font files of `family` from `source` into the cache; returns the cached paths.
    pub fn install(&self, source: &dyn FontSource, family: &str) -> Result<Vec<PathBuf>> {
        let files = source.fetch(family)?;
        let target = self.dir.join(family);
        fs::create_dir_all(&target)?;

        let mut installed = Vec::with_capacity(files.len());
        for file in files.iter().filter(|f| is_font_file(f)) {
            let Some(name) = file.file_name() else {
                continue;
            };
            let dest = target.join(name);
            fs::copy(file, &dest)?;
            debug!("Cached {}", dest.display());
            installed.push(dest);
        }
        if installed.is_empty() {
            return Err(ChartError::FontNotFound(family.to_string()));
        }
        info!("Installed {} font files for '{}'", installed.len(), family);
        Ok(installed)
    }

    /// Cached families holding at least one font file, sorted by name.
    pub fn list_fonts(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut families = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let mut files = Vec::new();
            scan_fonts(&path, &mut files)?;
            if files.is_empty() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                families.push(name.to_string());
            }
        }
        families.sort();
        Ok(families)
    }

    /// Cached font files of `family`.
    pub fn font_paths(&self, family: &str) -> Result<Vec<PathBuf>> {
        DirectoryFontSource::new(&self.dir).fetch(family)
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FONT_EXTS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn scan_fonts(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_fonts(&path, files)?;
        } else if is_font_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}
