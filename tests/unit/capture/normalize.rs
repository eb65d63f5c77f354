use super::*;

#[test]
fn pixel_size_becomes_view_box_and_background_rect_goes() {
    let raw = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="200">"#,
        r##"<rect width="300" height="200" fill="#fff"/>"##,
        r#"<g><rect id="r" width="1" height="1"/></g></svg>"#,
    );
    assert_eq!(
        normalize_capture(raw).unwrap(),
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 300 200">"#,
            r#"<g><rect id="r" width="1" height="1"/></g></svg>"#,
        )
    );
}

#[test]
fn replaces_an_existing_view_box_and_strips_px() {
    let raw = r#"<svg viewBox="1 1 2 2" width="64px" height="48.5"><rect><title>bg</title></rect><circle r="1"/></svg>"#;
    assert_eq!(
        normalize_capture(raw).unwrap(),
        r#"<svg width="100%" height="100%" viewBox="0 0 64 48.5"><circle r="1"/></svg>"#
    );
}

#[test]
fn already_normalized_documents_are_kept() {
    let doc = r#"<svg width="100%" height="100%" viewBox="0 0 10 10"><path d="M0 0"/></svg>"#;
    assert_eq!(normalize_capture(doc).unwrap(), doc);
}

#[test]
fn documents_without_size_information_are_rejected() {
    assert!(normalize_capture("<svg><g/></svg>").is_err());
    assert!(normalize_capture(r#"<html width="1" height="1"/>"#).is_err());
    assert!(normalize_capture("").is_err());
}
