use crate::constants::{
    DEFAULT_INITIALS_MARGIN_PT, DEFAULT_INITIALS_WIDTH_PT, DEFAULT_SIGNATURE_WIDTH_PT,
};
use crate::types::*;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Batch stamping configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchOptions {
    // Initials, stamped on every page
    pub initials: PathBuf,
    pub initials_width_pt: f32,
    pub initials_margin_pt: f32,

    // Optional one-off signature
    pub signature: Option<SignatureOptions>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            initials: PathBuf::new(),
            initials_width_pt: DEFAULT_INITIALS_WIDTH_PT,
            initials_margin_pt: DEFAULT_INITIALS_MARGIN_PT,
            signature: None,
        }
    }
}

/// Where and how large to place the signature
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignatureOptions {
    pub image: PathBuf,
    /// 0-based page index; `None` means the last page
    pub page: Option<usize>,
    /// Top-left corner in points; `None` skips the signature
    pub position: Option<SignaturePosition>,
    pub width_pt: f32,
}

impl SignatureOptions {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            page: None,
            position: None,
            width_pt: DEFAULT_SIGNATURE_WIDTH_PT,
        }
    }
}

/// Top-left corner of a signature in page points (origin at the top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignaturePosition {
    pub x: f32,
    pub y: f32,
}

impl fmt::Display for SignaturePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

impl FromStr for SignaturePosition {
    type Err = StampError;

    /// Parse `XxY`, e.g. `548x300`. The separator is case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StampError::Config(format!("Invalid position '{}': use XxY, e.g. 548x300", s));

        let lowered = s.trim().to_ascii_lowercase();
        let mut parts = lowered.split('x');
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Self { x, y })
    }
}

impl BatchOptions {
    pub fn new(initials: impl Into<PathBuf>) -> Self {
        Self {
            initials: initials.into(),
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| StampError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StampError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.initials.as_os_str().is_empty() {
            return Err(StampError::Config("No initials image specified".to_string()));
        }

        if !self.initials_width_pt.is_finite() || self.initials_width_pt <= 0.0 {
            return Err(StampError::Config(format!(
                "Initials width must be positive, got {}",
                self.initials_width_pt
            )));
        }

        if !self.initials_margin_pt.is_finite() || self.initials_margin_pt < 0.0 {
            return Err(StampError::Config(format!(
                "Initials margin must not be negative, got {}",
                self.initials_margin_pt
            )));
        }

        if let Some(signature) = &self.signature {
            if signature.image.as_os_str().is_empty() {
                return Err(StampError::Config("No signature image specified".to_string()));
            }
            if !signature.width_pt.is_finite() || signature.width_pt <= 0.0 {
                return Err(StampError::Config(format!(
                    "Signature width must be positive, got {}",
                    signature.width_pt
                )));
            }
            if let Some(position) = signature.position {
                if !position.x.is_finite() || !position.y.is_finite() {
                    return Err(StampError::Config(format!(
                        "Signature position must be finite, got {}",
                        position
                    )));
                }
            }
        }

        Ok(())
    }
}
