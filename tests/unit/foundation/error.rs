use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BoothError::encode("x").to_string().contains("encode failure:"));
    assert!(BoothError::text("x").to_string().contains("text error:"));
    assert!(
        BoothError::decode(2, "bad magic")
            .to_string()
            .contains("decode failure for input 2")
    );
}

#[test]
fn wrong_photo_count_names_layout_and_counts() {
    let err = BoothError::WrongPhotoCount {
        layout: "grid_2x2".to_string(),
        expected: 4,
        actual: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("grid_2x2"));
    assert!(msg.contains("needs 4"));
    assert!(msg.contains("got 3"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
