use pdf_stamp::*;

fn letter_pixmap() -> PixmapSize {
    PixmapSize::for_page(PageSize::letter(), 1.0)
}

#[test]
fn test_add_uses_tag_default_size() {
    let mut set = PlacementSet::new();
    let initials = set.add(StampTag::Initials, 0, letter_pixmap());
    let signature = set.add(StampTag::Signature, 0, letter_pixmap());
    let other = set.add(StampTag::Other, 0, letter_pixmap());

    assert_eq!(set.get(initials).unwrap().rect, Rect::new(20.0, 20.0, 72.0, 48.0));
    assert_eq!(set.get(signature).unwrap().rect, Rect::new(20.0, 20.0, 180.0, 60.0));
    assert_eq!(set.get(other).unwrap().rect, Rect::new(20.0, 20.0, 120.0, 120.0));
    assert_eq!(set.placements().len(), 3);
}

#[test]
fn test_ids_are_unique() {
    let mut set = PlacementSet::new();
    let a = set.add(StampTag::Other, 0, letter_pixmap());
    let b = set.add(StampTag::Other, 0, letter_pixmap());
    assert_ne!(a, b);
}

#[test]
fn test_move_stays_on_pixmap() {
    let mut set = PlacementSet::new();
    let id = set.add(StampTag::Other, 0, PixmapSize::new(200, 300));

    let moved = set.move_by(id, 30.0, 40.0).unwrap();
    assert_eq!((moved.rect.x, moved.rect.y), (50.0, 60.0));

    let moved = set.move_by(id, -500.0, 1000.0).unwrap();
    assert_eq!((moved.rect.x, moved.rect.y), (0.0, 180.0));
    assert!(moved.rect.fits_within(200.0, 300.0));

    assert!(set.move_by(PlacementId(99), 1.0, 1.0).is_none());
}

#[test]
fn test_resize_is_clamped() {
    let mut set = PlacementSet::new();
    let id = set.add(StampTag::Other, 0, PixmapSize::new(200, 300));

    let resized = set.resize_to(id, 2.0, 0.0).unwrap();
    assert_eq!((resized.rect.width, resized.rect.height), (8.0, 8.0));

    let resized = set.resize_to(id, 1000.0, 1000.0).unwrap();
    assert_eq!((resized.rect.width, resized.rect.height), (180.0, 280.0));
    assert_eq!((resized.rect.x, resized.rect.y), (20.0, 20.0));
}

#[test]
fn test_remove_tag_clears_boxes_and_image() {
    let mut set = PlacementSet::new();
    set.set_image(StampTag::Signature, "sig.png");
    set.add(StampTag::Signature, 0, letter_pixmap());
    set.add(StampTag::Signature, 2, letter_pixmap());
    set.add(StampTag::Initials, 0, letter_pixmap());

    assert_eq!(set.remove_tag(StampTag::Signature), 2);
    assert_eq!(set.image(StampTag::Signature), None);
    assert_eq!(set.placements().len(), 1);
    assert_eq!(set.remove_tag(StampTag::Other), 0);
}

#[test]
fn test_visibility_per_page() {
    let mut set = PlacementSet::new();
    let initials = set.add(StampTag::Initials, 0, letter_pixmap());
    let signature = set.add(StampTag::Signature, 1, letter_pixmap());
    let other = set.add(StampTag::Other, 2, letter_pixmap());

    let ids_on = |page| set.visible_on(page).map(|p| p.id).collect::<Vec<_>>();
    assert_eq!(ids_on(0), vec![initials]);
    assert_eq!(ids_on(1), vec![initials, signature]);
    assert_eq!(ids_on(2), vec![initials, other]);
    assert_eq!(ids_on(7), vec![initials]);
}

#[test]
fn test_resolve_requires_pages() {
    let set = PlacementSet::new();
    assert!(matches!(set.resolve_targets(&[]), Err(StampError::NoPages)));
    assert!(set.resolve_targets(&[PageSize::letter()]).unwrap().is_empty());
}

#[test]
fn test_resolve_only_first_initials_box_counts() {
    let pages = vec![PageSize::letter(), PageSize::new(1224.0, 1584.0)];
    let mut set = PlacementSet::new();
    set.set_image(StampTag::Initials, "ini.png");
    set.add_with_rect(
        StampTag::Initials,
        1,
        letter_pixmap(),
        Rect::new(306.0, 396.0, 61.2, 79.2),
    );
    set.add_with_rect(
        StampTag::Initials,
        0,
        letter_pixmap(),
        Rect::new(0.0, 0.0, 10.0, 10.0),
    );

    let targets = set.resolve_targets(&pages).unwrap();
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| t.tag == StampTag::Initials));
    assert_eq!(targets[0].page_index, 0);
    assert_eq!(targets[1].page_index, 1);

    // Same relative position on a page twice the size
    let big = targets[1].rect;
    assert!((big.x - 612.0).abs() < 1e-3);
    assert!((big.y - 792.0).abs() < 1e-3);
    assert!((big.width - 122.4).abs() < 1e-3);
    assert!(targets.iter().all(|t| t.image.as_os_str() == "ini.png"));
}

#[test]
fn test_resolve_signature_on_its_page() {
    let pages = vec![PageSize::letter(); 3];
    let mut set = PlacementSet::new();
    set.set_image(StampTag::Signature, "sig.png");
    set.add(StampTag::Signature, 2, letter_pixmap());
    set.add(StampTag::Initials, 0, letter_pixmap());

    // Initials without an image are skipped
    let targets = set.resolve_targets(&pages).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].tag, StampTag::Signature);
    assert_eq!(targets[0].page_index, 2);
    assert_eq!(targets[0].rect, Rect::new(20.0, 20.0, 180.0, 60.0));
}

#[test]
fn test_resolve_page_out_of_range() {
    let mut set = PlacementSet::new();
    set.set_image(StampTag::Other, "other.png");
    set.add(StampTag::Other, 3, letter_pixmap());

    let result = set.resolve_targets(&[PageSize::letter()]);
    assert!(matches!(
        result,
        Err(StampError::PageOutOfRange { index: 3, count: 1 })
    ));
}

#[test]
fn test_target_rect_rejects_empty_pixmap() {
    let mut set = PlacementSet::new();
    let id = set.add(StampTag::Other, 0, PixmapSize::new(0, 0));
    let placement = set.get(id).unwrap();
    assert!(placement.target_rect(PageSize::letter()).is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_layout_save_load() {
    use tempfile::NamedTempFile;

    let mut set = PlacementSet::new();
    set.set_image(StampTag::Initials, "ini.png");
    set.add(StampTag::Initials, 0, letter_pixmap());
    set.add(StampTag::Signature, 1, letter_pixmap());

    let temp = NamedTempFile::new().unwrap();
    set.save(temp.path()).await.unwrap();

    let mut loaded = PlacementSet::load(temp.path()).await.unwrap();
    assert_eq!(loaded, set);

    // New boxes never reuse a stored ID
    let fresh = loaded.add(StampTag::Other, 0, letter_pixmap());
    assert!(set.placements().iter().all(|p| p.id != fresh));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_layout_load_repairs_next_id() {
    use tempfile::NamedTempFile;

    let json = r#"{
        "placements": [
            {
                "id": 7,
                "tag": "signature",
                "page_index": 0,
                "rect": { "x": 1.0, "y": 2.0, "width": 30.0, "height": 10.0 },
                "pixmap": { "width": 612, "height": 792 }
            }
        ],
        "images": { "signature": "sig.png" }
    }"#;
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), json).unwrap();

    let mut loaded = PlacementSet::load(temp.path()).await.unwrap();
    assert_eq!(loaded.image(StampTag::Signature).unwrap().to_str(), Some("sig.png"));
    assert_eq!(loaded.add(StampTag::Other, 0, letter_pixmap()), PlacementId(8));
}
