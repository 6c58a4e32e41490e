use crate::constants::{PRINT_OFFSET_PX, PRINT_SCALE};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Print sheet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrintOptions {
    // Paper
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Sheet transform
    /// Scale applied to the whole grid, about the top center of the sheet
    pub scale: f32,
    /// Offset applied before scaling, in layout units
    pub offset_px: (f32, f32),

    // Printer's marks
    pub marks: PrinterMarks,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            scale: PRINT_SCALE,
            offset_px: PRINT_OFFSET_PX,
            marks: PrinterMarks::default(),
        }
    }
}

impl PrintOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ZineError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ZineError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Paper dimensions in millimetres with the orientation applied
    pub fn paper_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ZineError::Config(format!(
                "Scale must be a positive number, got {}",
                self.scale
            )));
        }

        let (dx, dy) = self.offset_px;
        if !dx.is_finite() || !dy.is_finite() {
            return Err(ZineError::Config("Offset must be finite".to_string()));
        }

        let (width, height) = self.paper_size.dimensions_mm();
        if !(width > 0.0 && height > 0.0) {
            return Err(ZineError::Config(format!(
                "Paper size must be positive, got {} x {} mm",
                width, height
            )));
        }

        if self.orientation == Orientation::Portrait {
            log::warn!("Portrait sheets squeeze the zine pages; landscape is recommended");
        }

        Ok(())
    }
}
