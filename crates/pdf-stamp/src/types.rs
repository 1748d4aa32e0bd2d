use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Document has no pages")]
    NoPages,
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, StampError>;

/// What kind of stamp a placement carries.
///
/// Initials repeat on every page of the output; signatures and other stamps
/// land only on the page they were placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StampTag {
    Initials,
    Signature,
    Other,
}

impl StampTag {
    pub const ALL: [StampTag; 3] = [StampTag::Initials, StampTag::Signature, StampTag::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            StampTag::Initials => "initials",
            StampTag::Signature => "signature",
            StampTag::Other => "other",
        }
    }

    /// Whether one placement of this tag targets every page of the document
    pub fn applies_to_all_pages(self) -> bool {
        matches!(self, StampTag::Initials)
    }
}

impl fmt::Display for StampTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StampTag {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "initials" => Ok(StampTag::Initials),
            "signature" => Ok(StampTag::Signature),
            "other" => Ok(StampTag::Other),
            _ => Err(StampError::Config(format!("Unknown stamp tag: {}", s))),
        }
    }
}

/// Summary of a stamping run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StampReport {
    /// Number of images composited onto pages
    pub stamps_placed: usize,
    /// Number of distinct pages touched
    pub pages_stamped: usize,
    /// Images that could not be decoded and were skipped
    pub skipped: Vec<PathBuf>,
}

impl StampReport {
    pub(crate) fn record_skip(&mut self, path: PathBuf) {
        if !self.skipped.contains(&path) {
            self.skipped.push(path);
        }
    }
}
