//! User actions echoed to stdout as space-delimited tokens
//!
//! These lines are a debugging aid for watching a session from a terminal;
//! they are not a stable protocol.

use pdf_stamp::{Rect, StampTag};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ActionEvent {
    OpenPdf(PathBuf),
    ImageSet { tag: StampTag, path: PathBuf },
    /// A box finished moving or resizing, in pixmap pixels
    Box {
        tag: StampTag,
        page_index: usize,
        rect: Rect,
    },
    RemovedTag(StampTag),
    Saved(PathBuf),
    LayoutSaved(PathBuf),
    LayoutLoaded(PathBuf),
}

impl ActionEvent {
    /// Print the event to stdout and record it in the app log.
    pub fn emit(&self) {
        println!("{}", self);
        log::info!("{}", self);
    }
}

fn image_set_token(tag: StampTag) -> &'static str {
    match tag {
        StampTag::Initials => "INITIALS_SET",
        StampTag::Signature => "FULLSIG_SET",
        StampTag::Other => "OTHER_STAMP_SET",
    }
}

impl fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionEvent::OpenPdf(path) => write!(f, "OPEN_PDF {}", path.display()),
            ActionEvent::ImageSet { tag, path } => {
                write!(f, "{} {}", image_set_token(*tag), path.display())
            }
            ActionEvent::Box {
                tag,
                page_index,
                rect,
            } => write!(
                f,
                "BOX {} PG {} PX {} {} {} {}",
                tag, page_index, rect.x as i32, rect.y as i32, rect.width as i32, rect.height as i32
            ),
            ActionEvent::RemovedTag(tag) => write!(f, "REMOVED_TAG {}", tag),
            ActionEvent::Saved(path) => write!(f, "SAVED {}", path.display()),
            ActionEvent::LayoutSaved(path) => write!(f, "LAYOUT_SAVED {}", path.display()),
            ActionEvent::LayoutLoaded(path) => write!(f, "LAYOUT_LOADED {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_token() {
        let event = ActionEvent::Box {
            tag: StampTag::Signature,
            page_index: 2,
            rect: Rect::new(40.7, 12.2, 180.0, 60.9),
        };
        assert_eq!(event.to_string(), "BOX signature PG 2 PX 40 12 180 60");
    }

    #[test]
    fn test_image_tokens() {
        let set = |tag| ActionEvent::ImageSet {
            tag,
            path: PathBuf::from("a.png"),
        };
        assert_eq!(set(StampTag::Initials).to_string(), "INITIALS_SET a.png");
        assert_eq!(set(StampTag::Signature).to_string(), "FULLSIG_SET a.png");
        assert_eq!(set(StampTag::Other).to_string(), "OTHER_STAMP_SET a.png");
    }

    #[test]
    fn test_document_tokens() {
        assert_eq!(
            ActionEvent::OpenPdf(PathBuf::from("in.pdf")).to_string(),
            "OPEN_PDF in.pdf"
        );
        assert_eq!(
            ActionEvent::Saved(PathBuf::from("out.pdf")).to_string(),
            "SAVED out.pdf"
        );
        assert_eq!(
            ActionEvent::RemovedTag(StampTag::Other).to_string(),
            "REMOVED_TAG other"
        );
    }
}
