//! Fake delivery: a fixed text payload handed to a save target.

use std::path::PathBuf;

use rfd::FileDialog;
use tracing::{info, warn};

use crate::errors::DeliveryError;
use crate::model::QualitySelection;

/// Body of every demo "download"
pub const DEMO_PAYLOAD: &str = "This is a demonstration. No actual video is downloaded.";

pub fn file_name(quality: &QualitySelection) -> String {
    format!("instagram_reel_{}_demo.txt", quality.label())
}

/// Where the payload ends up
pub trait SaveTarget {
    /// Returns the path written, or `None` if the user dismissed the dialog.
    fn save(&mut self, file_name: &str, payload: &[u8]) -> Result<Option<PathBuf>, DeliveryError>;
}

/// Native "Save as" dialog
#[derive(Debug, Default)]
pub struct DialogSaveTarget;

impl SaveTarget for DialogSaveTarget {
    fn save(&mut self, file_name: &str, payload: &[u8]) -> Result<Option<PathBuf>, DeliveryError> {
        let Some(path) = FileDialog::new()
            .set_file_name(file_name)
            .add_filter("Plain text", &["txt"])
            .save_file()
        else {
            return Ok(None);
        };
        std::fs::write(&path, payload)?;
        Ok(Some(path))
    }
}

/// Outcome of one emit, for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub quality: QualitySelection,
    pub file_name: String,
    pub saved_to: Option<PathBuf>,
}

pub struct DeliveryEmitter<S> {
    target: S,
}

impl<S: SaveTarget> DeliveryEmitter<S> {
    pub fn new(target: S) -> Self {
        Self { target }
    }

    #[cfg(test)]
    pub fn target(&self) -> &S {
        &self.target
    }

    /// Saves the demo payload. Never fails from the caller's side: save errors are logged.
    pub fn emit(&mut self, quality: &QualitySelection) -> DeliveryReceipt {
        let file_name = file_name(quality);
        let saved_to = match self.target.save(&file_name, DEMO_PAYLOAD.as_bytes()) {
            Ok(Some(path)) => {
                info!(quality = quality.label(), path = %path.display(), "demo payload saved");
                Some(path)
            }
            Ok(None) => {
                info!(quality = quality.label(), "save dialog dismissed");
                None
            }
            Err(e) => {
                warn!(quality = quality.label(), error = %e, "could not save demo payload");
                None
            }
        };

        DeliveryReceipt {
            quality: quality.clone(),
            file_name,
            saved_to,
        }
    }
}
