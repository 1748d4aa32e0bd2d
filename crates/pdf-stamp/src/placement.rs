//! Interactive placement session
//!
//! A [`PlacementSet`] is everything the placer knows about the boxes a user
//! has drawn: which tag each box carries, the page it was drawn on, and its
//! rectangle in that page's preview pixmap. Each tag shares one image.
//!
//! Boxes stay in pixmap pixels until [`PlacementSet::resolve_targets`]
//! projects them onto page point-space.

use crate::constants::{MIN_BOX_SIZE_PX, NEW_BOX_OFFSET_PX, default_box_size};
use crate::geometry::{PageSize, PixmapSize, Rect, map_to_page};
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable handle to a placement within its set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementId(pub u64);

/// A box drawn on a page preview
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub id: PlacementId,
    pub tag: StampTag,
    /// Page the box was drawn on (0-based)
    pub page_index: usize,
    /// Box in the source pixmap's pixels
    pub rect: Rect,
    /// Size of the pixmap the box was drawn on
    pub pixmap: PixmapSize,
}

impl Placement {
    /// This box projected onto a page of the given size
    pub fn target_rect(&self, page: PageSize) -> Result<Rect> {
        map_to_page(&self.rect, self.pixmap, page)
    }

    /// Keep the box inside its pixmap where it fits.
    fn clamp_to_pixmap(&mut self) {
        let max_x = (self.pixmap.width as f32 - self.rect.width).max(0.0);
        let max_y = (self.pixmap.height as f32 - self.rect.height).max(0.0);
        self.rect.x = self.rect.x.clamp(0.0, max_x);
        self.rect.y = self.rect.y.clamp(0.0, max_y);
    }
}

/// A placement resolved to one page in point-space
#[derive(Debug, Clone, PartialEq)]
pub struct StampTarget {
    pub tag: StampTag,
    pub page_index: usize,
    /// Box in displayed page points (top-left origin)
    pub rect: Rect,
    pub image: PathBuf,
}

/// Image chosen for each tag
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagImages {
    pub initials: Option<PathBuf>,
    pub signature: Option<PathBuf>,
    pub other: Option<PathBuf>,
}

impl TagImages {
    fn slot(&mut self, tag: StampTag) -> &mut Option<PathBuf> {
        match tag {
            StampTag::Initials => &mut self.initials,
            StampTag::Signature => &mut self.signature,
            StampTag::Other => &mut self.other,
        }
    }

    pub fn get(&self, tag: StampTag) -> Option<&Path> {
        match tag {
            StampTag::Initials => self.initials.as_deref(),
            StampTag::Signature => self.signature.as_deref(),
            StampTag::Other => self.other.as_deref(),
        }
    }
}

/// All boxes and images of one editing session
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementSet {
    placements: Vec<Placement>,
    images: TagImages,
    next_id: u64,
}

impl PlacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box of the tag's default size near the top-left of `page_index`.
    pub fn add(&mut self, tag: StampTag, page_index: usize, pixmap: PixmapSize) -> PlacementId {
        let (width, height) = default_box_size(tag);
        let rect = Rect::new(NEW_BOX_OFFSET_PX, NEW_BOX_OFFSET_PX, width, height);
        self.add_with_rect(tag, page_index, pixmap, rect)
    }

    /// Add a box with an explicit pixmap rectangle.
    pub fn add_with_rect(
        &mut self,
        tag: StampTag,
        page_index: usize,
        pixmap: PixmapSize,
        rect: Rect,
    ) -> PlacementId {
        let id = PlacementId(self.next_id);
        self.next_id += 1;
        self.placements.push(Placement {
            id,
            tag,
            page_index,
            rect,
            pixmap,
        });
        id
    }

    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Drag a box by a pixel offset, keeping it on its page.
    pub fn move_by(&mut self, id: PlacementId, dx: f32, dy: f32) -> Option<&Placement> {
        let placement = self.placements.iter_mut().find(|p| p.id == id)?;
        placement.rect = placement.rect.translated(dx, dy);
        placement.clamp_to_pixmap();
        Some(placement)
    }

    /// Resize a box from its top-left corner.
    pub fn resize_to(&mut self, id: PlacementId, width: f32, height: f32) -> Option<&Placement> {
        let placement = self.placements.iter_mut().find(|p| p.id == id)?;
        let max_width = (placement.pixmap.width as f32 - placement.rect.x).max(MIN_BOX_SIZE_PX);
        let max_height = (placement.pixmap.height as f32 - placement.rect.y).max(MIN_BOX_SIZE_PX);
        placement.rect.width = width.clamp(MIN_BOX_SIZE_PX, max_width);
        placement.rect.height = height.clamp(MIN_BOX_SIZE_PX, max_height);
        placement.clamp_to_pixmap();
        Some(placement)
    }

    /// Choose the image for a tag; every box of that tag shows it.
    pub fn set_image(&mut self, tag: StampTag, path: impl Into<PathBuf>) {
        *self.images.slot(tag) = Some(path.into());
    }

    pub fn image(&self, tag: StampTag) -> Option<&Path> {
        self.images.get(tag)
    }

    /// Remove every box of a tag and forget its image. Returns how many boxes went.
    pub fn remove_tag(&mut self, tag: StampTag) -> usize {
        let before = self.placements.len();
        self.placements.retain(|p| p.tag != tag);
        *self.images.slot(tag) = None;
        before - self.placements.len()
    }

    /// Whether a box is shown while previewing `page_index`.
    ///
    /// Initials follow the user across pages since they land on all of them.
    pub fn is_visible_on(placement: &Placement, page_index: usize) -> bool {
        placement.tag.applies_to_all_pages() || placement.page_index == page_index
    }

    /// Boxes shown while previewing `page_index`
    pub fn visible_on(&self, page_index: usize) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| Self::is_visible_on(p, page_index))
    }

    /// Project every box onto the pages it applies to.
    ///
    /// `page_sizes` holds each page's displayed size in points. Only the first
    /// initials box is used and it lands on every page; signature and other
    /// boxes land once, on their own page. Tags without an image are skipped.
    pub fn resolve_targets(&self, page_sizes: &[PageSize]) -> Result<Vec<StampTarget>> {
        if page_sizes.is_empty() {
            return Err(StampError::NoPages);
        }

        let mut targets = Vec::new();

        if let (Some(initials), Some(image)) = (
            self.placements.iter().find(|p| p.tag == StampTag::Initials),
            self.image(StampTag::Initials),
        ) {
            for (page_index, page) in page_sizes.iter().enumerate() {
                targets.push(StampTarget {
                    tag: StampTag::Initials,
                    page_index,
                    rect: initials.target_rect(*page)?,
                    image: image.to_owned(),
                });
            }
        }

        for tag in [StampTag::Signature, StampTag::Other] {
            let Some(image) = self.image(tag) else {
                continue;
            };
            for placement in self.placements.iter().filter(|p| p.tag == tag) {
                let page = page_sizes.get(placement.page_index).ok_or(
                    StampError::PageOutOfRange {
                        index: placement.page_index,
                        count: page_sizes.len(),
                    },
                )?;
                targets.push(StampTarget {
                    tag,
                    page_index: placement.page_index,
                    rect: placement.target_rect(*page)?,
                    image: image.to_owned(),
                });
            }
        }

        Ok(targets)
    }

    /// Load a saved layout from JSON
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let mut set: Self = serde_json::from_slice(&bytes)
            .map_err(|e| StampError::Config(format!("Failed to parse layout: {}", e)))?;
        // next_id must stay above every stored ID
        let max_id = set.placements.iter().map(|p| p.id.0 + 1).max().unwrap_or(0);
        set.next_id = set.next_id.max(max_id);
        Ok(set)
    }

    /// Save the layout to JSON
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StampError::Config(format!("Failed to serialize layout: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
