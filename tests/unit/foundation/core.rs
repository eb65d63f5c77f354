use super::*;
use serde_json::json;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(400, 300).unwrap(),
        Canvas {
            width: 400,
            height: 300
        }
    );
}

#[test]
fn view_box_parses_space_and_comma_separators() {
    let vb = ViewBox::parse("0 0 400 300").unwrap();
    assert_eq!((vb.width, vb.height), (400.0, 300.0));

    let vb = ViewBox::parse(" -5,2.5  10.75,8 ").unwrap();
    assert_eq!(vb.min_x, -5.0);
    assert_eq!(vb.min_y, 2.5);
    assert_eq!(Canvas::from_view_box(vb).unwrap().width, 10);
}

#[test]
fn view_box_rejects_bad_values() {
    assert!(ViewBox::parse("0 0 400").is_err());
    assert!(ViewBox::parse("0 0 a b").is_err());
    assert!(ViewBox::parse("0 0 0 300").is_err());
    assert!(ViewBox::parse("").is_err());
}

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse_hex("#FFFFFF").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::parse_hex("#f00").unwrap(), Rgba8::rgb(255, 0, 0));
    let c = Rgba8::parse_hex("#0000ff80").unwrap();
    assert_eq!(c.a, 128);
    assert!(!c.is_opaque());
    assert!(Rgba8::parse_hex("#12345").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
}

#[test]
fn color_deserializes_from_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 128, 0));

    let c: Rgba8 = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.5])).unwrap();
    assert_eq!(c.b, 255);
    assert_eq!(c.a, 128);

    assert!(serde_json::from_value::<Rgba8>(json!([0.0, 1.0])).is_err());
}

#[test]
fn color_serializes_as_hex() {
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(0xe7, 0x96, 0x00)).unwrap(),
        json!("#e79600")
    );
    assert_eq!(
        serde_json::to_value(Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0x40
        })
        .unwrap(),
        json!("#00000040")
    );
}

#[test]
fn background_accepts_transparent_keyword() {
    let bg: Background = serde_json::from_value(json!("transparent")).unwrap();
    assert!(bg.is_transparent());

    let bg: Background = serde_json::from_value(json!("#336699")).unwrap();
    assert_eq!(bg, Background::Opaque(Rgba8::rgb(0x33, 0x66, 0x99)));

    assert_eq!(Background::default(), Background::Opaque(Rgba8::WHITE));
    assert_eq!(
        serde_json::to_value(Background::Transparent).unwrap(),
        json!("transparent")
    );
}
