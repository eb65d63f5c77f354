use super::*;

#[test]
fn group_ids_are_underscore_index() {
    assert_eq!(group_id(0), "_0");
    assert_eq!(group_id(12), "_12");
}

#[test]
fn prefixes_ids_and_local_references() {
    let src = concat!(
        r##"<defs><clipPath id="c"><rect width="1" height="1"/></clipPath>"##,
        r##"<linearGradient id="g"/></defs>"##,
        r##"<path clip-path="url(#c)" fill="url('#g')" d="M0 0"/>"##,
        r##"<use xlink:href="#c"/><use href="#g"/>"##,
    );
    let out = prefix_ids(src, "_3").unwrap();
    assert_eq!(
        out,
        concat!(
            r##"<defs><clipPath id="_3c"><rect width="1" height="1"/></clipPath>"##,
            r##"<linearGradient id="_3g"/></defs>"##,
            r##"<path clip-path="url(#_3c)" fill="url('#_3g')" d="M0 0"/>"##,
            r##"<use xlink:href="#_3c"/><use href="#_3g"/>"##,
        )
    );
}

#[test]
fn leaves_text_and_untouched_elements_byte_for_byte() {
    let src = "<text x='1'  y=\"2\">id=\"a\" url(#a) &amp;</text><!-- id=\"b\" -->";
    assert_eq!(prefix_ids(src, "_0").unwrap(), src);
}

#[test]
fn external_and_empty_hrefs_are_kept() {
    let src = r##"<a href="https://example.com/#x"/><use href="#"/>"##;
    assert_eq!(prefix_ids(src, "_1").unwrap(), src);
}

#[test]
fn url_refs_inside_style_attribute() {
    assert_eq!(
        prefix_url_refs(r##"fill:url("#a");mask:url(#b)"##, "_2").as_deref(),
        Some(r##"fill:url("#_2a");mask:url(#_2b)"##)
    );
    assert_eq!(prefix_url_refs("url(image.png)", "_2"), None);
    assert_eq!(prefix_url_refs("red", "_2"), None);
}

#[test]
fn rejects_duplicate_ids() {
    let err = prefix_ids(r#"<g id="a"/><g id="a"/>"#, "_0").unwrap_err();
    assert!(matches!(err, SvgBurstError::MalformedFrame(_)));
}

#[test]
fn rejects_ids_that_could_collide_across_frames() {
    assert!(prefix_ids(r#"<g id="2x"/>"#, "_1").is_err());
    assert!(prefix_ids(r#"<g id=""/>"#, "_1").is_err());
}

#[test]
fn stripping_the_prefix_recovers_the_original_id() {
    let out = prefix_ids(r#"<g id="layer-1"><g id="_x"/></g>"#, "_7").unwrap();
    assert!(out.contains(r#"id="_7layer-1""#));
    assert!(out.contains(r#"id="_7_x""#));
    assert_eq!("_7layer-1".strip_prefix("_7"), Some("layer-1"));
}

#[test]
fn escaped_values_survive_rewriting() {
    let out = prefix_ids(r#"<g id="a" data-note="x &amp; y"/>"#, "_0").unwrap();
    assert_eq!(out, r#"<g id="_0a" data-note="x &amp; y"/>"#);
}
