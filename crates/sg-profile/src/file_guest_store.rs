use crate::{GuestStore, ProfileError, ProfileResult};

use std::path::PathBuf;

use log::warn;
use sg_core::Profile;

/// Guest persistence backed by a single JSON file.
pub struct FileGuestStore {
    path: PathBuf,
}

impl FileGuestStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn io_error(&self, source: std::io::Error) -> ProfileError {
        ProfileError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl GuestStore for FileGuestStore {
    fn load(&self) -> ProfileResult<Option<Profile>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;

        match serde_json::from_str(&contents) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                // A corrupt cache is treated as absent, not fatal
                warn!(
                    "Discarding unreadable guest profile at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, profile: &Profile) -> ProfileResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_string_pretty(profile)
            .map_err(|e| ProfileError::configuration(format!("guest profile not serializable: {e}")))?;

        // Write-then-rename so a crash mid-write never leaves a torn file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        Ok(())
    }

    fn clear(&self) -> ProfileResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
