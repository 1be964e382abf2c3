use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::config::default_data_dir;
use crate::repository::traits::KeyValueStore;

const FILE_EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create data directory {}", dir.display()))?;
        Ok(FileKeyValueStore { dir })
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(anyhow!("Invalid storage key: '{}'", key));
        }
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension(format!("{}.tmp", FILE_EXTENSION));

        // Write aside and rename so readers never see a half-written document.
        let written = write_file(&tmp_path, value).and_then(|()| {
            fs::rename(&tmp_path, &path)
                .with_context(|| format!("Could not replace {}", path.display()))
        });
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                debug!("could not remove {}: {}", tmp_path.display(), cleanup);
            }
            return Err(e);
        }

        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

fn write_file(path: &Path, value: &str) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(value.as_bytes())
        .and_then(|()| writer.flush())
        .with_context(|| format!("Could not write {}", path.display()))
}
