use pdf_stamp_runtime::DocumentId;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

#[cfg(feature = "pdf-viewer")]
use pdfium_render::prelude::*;

/// Directory searched first for the pdfium shared library
#[cfg(feature = "pdf-viewer")]
pub const PDFIUM_DIR_ENV: &str = "PDFIUM_LIB_DIR";

/// Bind pdfium from `$PDFIUM_LIB_DIR`, then `vendor/pdfium/lib`, then the system
#[cfg(feature = "pdf-viewer")]
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    let env_dir = std::env::var_os(PDFIUM_DIR_ENV).map(PathBuf::from);
    let vendor_dir = std::env::current_dir()
        .ok()
        .map(|dir| dir.join("vendor/pdfium/lib"));

    for dir in env_dir.into_iter().chain(vendor_dir) {
        if !dir.exists() {
            continue;
        }
        match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir)) {
            Ok(binding) => return Ok(Pdfium::new(binding)),
            Err(e) => log::debug!("No usable pdfium in {}: {}", dir.display(), e),
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// A rendered page pixmap
#[derive(Clone)]
pub struct CachedPage {
    pub rgba_data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Maximum number of pages to cache
const MAX_CACHED_PAGES: usize = 50;

type PageKey = (DocumentId, usize);

/// Open documents and an LRU cache of their rendered pages
pub struct ViewerState {
    documents: HashMap<DocumentId, PathBuf>,
    page_cache: HashMap<PageKey, CachedPage>,
    cache_order: VecDeque<PageKey>,
    next_doc_id: u64,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            page_cache: HashMap::new(),
            cache_order: VecDeque::new(),
            next_doc_id: 0,
        }
    }

    pub fn add_document(&mut self, path: PathBuf) -> DocumentId {
        let doc_id = DocumentId(self.next_doc_id);
        self.next_doc_id += 1;
        self.documents.insert(doc_id, path);
        doc_id
    }

    pub fn document(&self, doc_id: DocumentId) -> Option<&PathBuf> {
        self.documents.get(&doc_id)
    }

    pub fn add_to_cache(&mut self, key: PageKey, page: CachedPage) {
        if self.page_cache.contains_key(&key) {
            self.cache_order.retain(|k| k != &key);
        }

        while self.cache_order.len() >= MAX_CACHED_PAGES {
            if let Some(old_key) = self.cache_order.pop_front() {
                self.page_cache.remove(&old_key);
            }
        }

        self.page_cache.insert(key, page);
        self.cache_order.push_back(key);
    }

    pub fn get_from_cache(&mut self, key: &PageKey) -> Option<&CachedPage> {
        if self.page_cache.contains_key(key) {
            // Most recently used goes to the back
            self.cache_order.retain(|k| k != key);
            self.cache_order.push_back(*key);
            self.page_cache.get(key)
        } else {
            None
        }
    }

    pub fn remove_document(&mut self, doc_id: DocumentId) {
        self.documents.remove(&doc_id);
        self.cache_order.retain(|(id, _)| *id != doc_id);
        self.page_cache.retain(|(id, _), _| *id != doc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width: usize) -> CachedPage {
        CachedPage {
            rgba_data: vec![0; width * 4],
            width,
            height: 1,
        }
    }

    #[test]
    fn test_document_ids_are_fresh() {
        let mut state = ViewerState::new();
        let a = state.add_document(PathBuf::from("a.pdf"));
        let b = state.add_document(PathBuf::from("b.pdf"));
        assert_ne!(a, b);
        assert_eq!(state.document(b).unwrap(), &PathBuf::from("b.pdf"));
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut state = ViewerState::new();
        let doc = state.add_document(PathBuf::from("a.pdf"));

        for i in 0..MAX_CACHED_PAGES {
            state.add_to_cache((doc, i), page(i + 1));
        }
        // Touch page 0 so page 1 becomes the oldest
        assert!(state.get_from_cache(&(doc, 0)).is_some());
        state.add_to_cache((doc, MAX_CACHED_PAGES), page(1));

        assert!(state.get_from_cache(&(doc, 0)).is_some());
        assert!(state.get_from_cache(&(doc, 1)).is_none());
        assert_eq!(state.page_cache.len(), MAX_CACHED_PAGES);
    }

    #[test]
    fn test_remove_document_drops_its_pages() {
        let mut state = ViewerState::new();
        let a = state.add_document(PathBuf::from("a.pdf"));
        let b = state.add_document(PathBuf::from("b.pdf"));
        state.add_to_cache((a, 0), page(1));
        state.add_to_cache((b, 0), page(1));

        state.remove_document(a);

        assert!(state.document(a).is_none());
        assert!(state.get_from_cache(&(a, 0)).is_none());
        assert!(state.get_from_cache(&(b, 0)).is_some());
    }
}
