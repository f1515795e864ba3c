use quadwarp_designer::{DocumentError, SvgDocument};

const INKSCAPE_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg
   xmlns:dc="http://purl.org/dc/elements/1.1/"
   xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
   xmlns="http://www.w3.org/2000/svg"
   width="744.09448819"
   height="1052.3622047"
   id="svg2">
  <g
     inkscape:label="Layer 1"
     inkscape:groupmode="layer"
     id="layer1">
    <path
       style="fill:#ff0000;stroke:#000000"
       d="M 100,100 L 200,100 L 200,200 L 100,200 Z"
       id="path10"
       inkscape:connector-curvature="0" />
    <svg:path xmlns:svg="http://www.w3.org/2000/svg" id="path20" d="M 0,0 L 1,0" />
  </g>
</svg>
"#;

#[test]
fn test_inkscape_document_attributes() {
    let doc = SvgDocument::parse(INKSCAPE_DOC.to_string()).unwrap();
    assert_eq!(doc.height(), Some("1052.3622047"));
    assert_eq!(doc.width(), Some("744.09448819"));
    assert_eq!(doc.element("svg2").unwrap().tag, "svg");
    assert!(doc.element("path10").unwrap().is_path());
    // Prefixed names resolve to their local name
    assert!(doc.element("path20").unwrap().is_path());
}

#[test]
fn test_rewrite_keeps_namespaced_attributes() {
    let mut doc = SvgDocument::parse(INKSCAPE_DOC.to_string()).unwrap();
    doc.set_path_data("path10", "M 1,2 C 3,4 5,6 7,8").unwrap();
    let out = doc.render().unwrap();

    assert!(out.contains(r#"d="M 1,2 C 3,4 5,6 7,8""#));
    assert!(out.contains(r#"inkscape:connector-curvature="0""#));
    assert!(out.contains(r#"style="fill:#ff0000;stroke:#000000""#));
    assert!(out.contains(r#"inkscape:label="Layer 1""#));
    assert!(!out.contains("M 100,100"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SvgDocument::load(dir.path().join("absent.svg")).unwrap_err();
    assert!(matches!(err, DocumentError::Io(_)));
}
