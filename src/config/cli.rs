use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }

    fn tmp_path(full_path: &Path) -> PathBuf {
        let mut tmp_name = full_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        PathBuf::from(tmp_name)
    }

    fn stage(full_path: &Path, data: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = Self::tmp_path(full_path);
        if let Err(e) = fs::write(&tmp_path, data) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(tmp_path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    /// Writes through a sibling `.tmp` file and a rename, so readers never
    /// see a half-written file.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let tmp_path = Self::stage(&full_path, data)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }

    /// Stages every file first and renames only once all of them are on
    /// disk; a failed stage removes the temp files already written.
    fn write_files(&self, files: &[(String, Vec<u8>)]) -> Result<()> {
        let mut staged = Vec::with_capacity(files.len());
        for (path, data) in files {
            let full_path = self.resolve(path);
            match Self::stage(&full_path, data) {
                Ok(tmp_path) => staged.push((tmp_path, full_path)),
                Err(e) => {
                    tracing::warn!(
                        "Discarding {} staged outputs after failed write of {}",
                        staged.len(),
                        path
                    );
                    for (tmp_path, _) in &staged {
                        let _ = fs::remove_file(tmp_path);
                    }
                    return Err(e);
                }
            }
        }

        for (tmp_path, full_path) in staged {
            fs::rename(&tmp_path, &full_path)?;
        }
        Ok(())
    }
}
