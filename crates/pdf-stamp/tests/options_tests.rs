use pdf_stamp::*;

#[test]
fn test_default_options() {
    let options = BatchOptions::default();
    assert_eq!(options.initials_width_pt, 72.0);
    assert_eq!(options.initials_margin_pt, 12.0);
    assert!(options.signature.is_none());
}

#[test]
fn test_signature_defaults() {
    let sig = SignatureOptions::new("sig.png");
    assert_eq!(sig.width_pt, 180.0);
    assert_eq!(sig.page, None);
    assert_eq!(sig.position, None);
}

#[test]
fn test_validate_options() {
    let options = BatchOptions::new("initials.png");
    assert!(options.validate().is_ok());

    let options = BatchOptions::default();
    assert!(matches!(options.validate(), Err(StampError::Config(_))));

    let mut options = BatchOptions::new("initials.png");
    options.initials_width_pt = -5.0;
    assert!(options.validate().is_err());

    let mut options = BatchOptions::new("initials.png");
    options.initials_width_pt = f32::NAN;
    assert!(options.validate().is_err());

    let mut options = BatchOptions::new("initials.png");
    options.initials_margin_pt = 0.0;
    assert!(options.validate().is_ok());
    options.initials_margin_pt = -1.0;
    assert!(options.validate().is_err());
}

#[test]
fn test_validate_rejects_infinite_sizes() {
    for width in [f32::INFINITY, f32::NEG_INFINITY] {
        let mut options = BatchOptions::new("initials.png");
        options.initials_width_pt = width;
        assert!(matches!(options.validate(), Err(StampError::Config(_))));
    }

    let mut options = BatchOptions::new("initials.png");
    options.initials_margin_pt = f32::INFINITY;
    assert!(matches!(options.validate(), Err(StampError::Config(_))));

    let mut sig = SignatureOptions::new("sig.png");
    sig.width_pt = f32::INFINITY;
    let mut options = BatchOptions::new("initials.png");
    options.signature = Some(sig);
    assert!(matches!(options.validate(), Err(StampError::Config(_))));
}

#[test]
fn test_validate_rejects_infinite_signature_position() {
    let mut options = BatchOptions::new("initials.png");
    for position in [
        SignaturePosition { x: f32::INFINITY, y: 10.0 },
        SignaturePosition { x: 10.0, y: f32::NEG_INFINITY },
        SignaturePosition { x: f32::NAN, y: 10.0 },
    ] {
        let mut sig = SignatureOptions::new("sig.png");
        sig.position = Some(position);
        options.signature = Some(sig);
        assert!(matches!(options.validate(), Err(StampError::Config(_))));
    }

    let mut sig = SignatureOptions::new("sig.png");
    sig.position = Some(SignaturePosition { x: 548.0, y: 300.0 });
    options.signature = Some(sig);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validate_signature() {
    let mut options = BatchOptions::new("initials.png");
    options.signature = Some(SignatureOptions::new(""));
    assert!(options.validate().is_err());

    let mut sig = SignatureOptions::new("sig.png");
    sig.width_pt = 0.0;
    options.signature = Some(sig);
    assert!(options.validate().is_err());

    options.signature = Some(SignatureOptions::new("sig.png"));
    assert!(options.validate().is_ok());
}

#[test]
fn test_parse_position() {
    let pos: SignaturePosition = "548x300".parse().unwrap();
    assert_eq!(pos, SignaturePosition { x: 548.0, y: 300.0 });

    let pos: SignaturePosition = "548X300".parse().unwrap();
    assert_eq!(pos, SignaturePosition { x: 548.0, y: 300.0 });

    let pos: SignaturePosition = " 12.5x40 ".parse().unwrap();
    assert_eq!(pos, SignaturePosition { x: 12.5, y: 40.0 });
}

#[test]
fn test_parse_position_rejects_malformed() {
    for input in ["548", "x300", "548x", "1x2x3", "ax3", "", "inf x 3", "NaNx1"] {
        let result = input.parse::<SignaturePosition>();
        assert!(
            matches!(result, Err(StampError::Config(_))),
            "{:?} should be rejected",
            input
        );
    }
}

#[test]
fn test_position_display_round_trips() {
    let pos = SignaturePosition { x: 548.0, y: 300.0 };
    assert_eq!(pos.to_string(), "548x300");
    assert_eq!(pos.to_string().parse::<SignaturePosition>().unwrap(), pos);
}

#[test]
fn test_stamp_tag_names() {
    assert_eq!(StampTag::Initials.to_string(), "initials");
    assert_eq!("Signature".parse::<StampTag>().unwrap(), StampTag::Signature);
    assert_eq!("OTHER".parse::<StampTag>().unwrap(), StampTag::Other);
    assert!("stamp".parse::<StampTag>().is_err());

    assert!(StampTag::Initials.applies_to_all_pages());
    assert!(!StampTag::Signature.applies_to_all_pages());
    assert!(!StampTag::Other.applies_to_all_pages());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_save_load() {
    use tempfile::NamedTempFile;

    let mut options = BatchOptions::new("initials.png");
    options.initials_margin_pt = 18.0;
    let mut sig = SignatureOptions::new("sig.png");
    sig.page = Some(2);
    sig.position = Some(SignaturePosition { x: 100.0, y: 650.0 });
    options.signature = Some(sig);

    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();

    let loaded = BatchOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_options_fill_defaults() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), r#"{ "initials": "me.png" }"#).unwrap();

    let loaded = BatchOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, BatchOptions::new("me.png"));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_malformed_options() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), "not json").unwrap();

    let result = BatchOptions::load(temp.path()).await;
    assert!(matches!(result, Err(StampError::Config(_))));
}
