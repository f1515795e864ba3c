use quadwarp_core::Point;
use quadwarp_designer::{PathError, SuperPath};

#[test]
fn test_inkscape_style_path_data() {
    // Typical output of a drawing editor: relative commands, compact numbers
    let d = "m 10.5,20 c 5,-5 15,-5 20,0 l 0,10 h -20 z";
    let path = SuperPath::parse(d).unwrap();

    let anchors = path.anchors();
    assert_eq!(anchors[0], Point::new(10.5, 20.0));
    assert_eq!(anchors[1], Point::new(30.5, 20.0));
    assert_eq!(anchors[2], Point::new(30.5, 30.0));
    assert_eq!(anchors[3], Point::new(10.5, 30.0));
    assert_eq!(anchors.last(), Some(&Point::new(10.5, 20.0)));
    assert!(path.subpaths[0].closed);

    let node = path.subpaths[0].nodes[1];
    assert_eq!(node.incoming, Point::new(25.5, 15.0));
}

#[test]
fn test_serialized_form_reparses_identically() {
    let d = "M 0 0 Q 5 10 10 0 T 20 0 A 5 5 0 0 1 30 0 S 40 5 40 0 Z M 50 50 V 60";
    let path = SuperPath::parse(d).unwrap();
    let written = path.to_path_data(None);
    assert!(written.starts_with("M 0,0 C "));
    assert!(!written.contains('Q') && !written.contains('A'));

    let again = SuperPath::parse(&written).unwrap();
    assert_eq!(again, path);
    assert_eq!(again.subpaths.len(), 2);
}

#[test]
fn test_precision_limits_digits() {
    let path = SuperPath::parse("M 0.123456 1.987654 L 2 3").unwrap();
    assert_eq!(
        path.to_path_data(Some(2)),
        "M 0.12,1.99 C 0.12,1.99 2,3 2,3"
    );
}

#[test]
fn test_rejects_garbage() {
    assert!(matches!(
        SuperPath::parse("10 10"),
        Err(PathError::MissingMoveTo { .. })
    ));
    assert!(matches!(
        SuperPath::parse("M 0 0 C 1 1 2"),
        Err(PathError::ExpectedNumber { command: 'C', .. })
    ));
}
