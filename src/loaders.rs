use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};

/// Resolves a weights file on local disk and maps it into a [`VarBuilder`].
#[derive(Debug, Clone)]
pub struct WeightsLoader {
    pub path: PathBuf,
}

impl WeightsLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, device: &Device) -> Result<VarBuilder<'static>> {
        if !self.path.is_file() {
            return Err(ServiceError::ModelNotFound(self.path.display().to_string()));
        }

        let is_safetensors = self
            .path
            .extension()
            .is_some_and(|e| e == "safetensors");
        if !is_safetensors {
            return Err(ServiceError::ModelFormat(format!(
                "'{}' is not a .safetensors file",
                self.path.display()
            )));
        }

        // SAFETY: the file is mapped read-only and not modified while the model is alive.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&self.path], DType::F32, device).map_err(|e| {
                ServiceError::ModelFormat(format!(
                    "Failed to map weights from '{}': {e}",
                    self.path.display()
                ))
            })?
        };

        Ok(vb)
    }
}
