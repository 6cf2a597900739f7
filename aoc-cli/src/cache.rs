//! On-disk cache of puzzle inputs
//!
//! Layout: `{cache_dir}/{year}/day{DD}.txt`

use crate::error::CacheError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct InputCache {
    root: PathBuf,
}

impl InputCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(format!("day{day:02}.txt"))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Cached input, or `None` when nothing is stored for `year`/`day`
    pub fn read(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.path(year, day);
        match fs::read_to_string(&path) {
            Ok(input) => Ok(Some(input)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    pub fn write(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        let path = self.path(year, day);
        if let Some(dir) = path.parent() {
            create_dir(dir)?;
        }
        fs::write(&path, input).map_err(|source| CacheError::Io { path, source })
    }
}

fn create_dir(dir: &Path) -> Result<(), CacheError> {
    fs::create_dir_all(dir).map_err(|source| CacheError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
