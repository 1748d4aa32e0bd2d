use std::path::PathBuf;

// Re-export types from the stamping library
pub use pdf_stamp::{PlacementSet, StampReport, StampTag};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum StampCommand {
    Load {
        path: PathBuf,
    },
    RenderPage {
        doc_id: DocumentId,
        page_index: usize,
    },
    Close {
        doc_id: DocumentId,
    },
    /// Decode a stamp image for its on-screen preview
    LoadImage {
        tag: StampTag,
        path: PathBuf,
    },
    /// Stamp `source` with the placed boxes and write the result
    Save {
        source: PathBuf,
        placements: PlacementSet,
        output_path: PathBuf,
    },
    SaveLayout {
        placements: PlacementSet,
        path: PathBuf,
    },
    LoadLayout {
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum StampUpdate {
    Loaded {
        doc_id: DocumentId,
        path: PathBuf,
        page_count: usize,
    },
    PageRendered {
        doc_id: DocumentId,
        page_index: usize,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    Closed {
        doc_id: DocumentId,
    },
    ImageLoaded {
        tag: StampTag,
        path: PathBuf,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    Saved {
        path: PathBuf,
        report: StampReport,
    },
    LayoutSaved {
        path: PathBuf,
    },
    LayoutLoaded {
        path: PathBuf,
        placements: PlacementSet,
    },
    Error {
        message: String,
    },
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);
