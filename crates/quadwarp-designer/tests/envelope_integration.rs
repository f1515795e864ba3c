use quadwarp_core::{AxisOrientation, Point, SourceBox};
use quadwarp_designer::{
    BoundsProvider, EffectError, EnvelopeEffect, FixedBounds, GeometryBounds, MeasureError,
    MeasuredBox, SuperPath, SvgDocument,
};

fn drawing(height: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200" height="{}">
  <path id="object" d="M 0,0 L 10,0 L 10,10 L 0,10 Z M 5,0 L 5,10"/>
  <path id="trapezoid" d="M 20,0 L 80,0 L 100,100 L 0,100 Z"/>
</svg>
"#,
        height
    )
}

fn selection() -> Vec<String> {
    vec!["object".to_string(), "trapezoid".to_string()]
}

fn object_path(doc: &SvgDocument) -> SuperPath {
    let d = doc.element("object").unwrap().path_data.clone().unwrap();
    SuperPath::parse(&d).unwrap()
}

#[test]
fn test_square_to_trapezoid() {
    let mut doc = SvgDocument::parse(drawing("100")).unwrap();
    let report = EnvelopeEffect::new(selection())
        .run(&mut doc, &GeometryBounds)
        .unwrap();

    assert_eq!(report.source, SourceBox::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(report.object_id, "object");
    assert_eq!(report.control_id, "trapezoid");

    let warped = object_path(&doc);
    let outline = warped.subpaths[0].nodes.iter().map(|n| n.anchor).collect::<Vec<_>>();
    let expected = [(20.0, 0.0), (80.0, 0.0), (100.0, 100.0), (0.0, 100.0), (20.0, 0.0)];
    for (got, want) in outline.iter().zip(expected) {
        assert!(got.approx_eq(&Point::from(want), 1e-3), "{} vs {:?}", got, want);
    }

    // The vertical centre line maps to the trapezoid's centre line
    let centre = &warped.subpaths[1].nodes;
    assert!(centre[0].anchor.approx_eq(&Point::new(50.0, 0.0), 1e-3));
    assert!(centre[1].anchor.approx_eq(&Point::new(50.0, 100.0), 1e-3));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    std::fs::write(&input, drawing("100")).unwrap();

    let mut doc = SvgDocument::load(&input).unwrap();
    EnvelopeEffect::new(selection())
        .with_precision(Some(4))
        .run(&mut doc, &GeometryBounds)
        .unwrap();
    doc.save(&output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains(r#"<path id="trapezoid" d="M 20,0 L 80,0 L 100,100 L 0,100 Z"/>"#));
    assert!(written.contains(r#"d="M 20,0 C "#));

    let reloaded = SvgDocument::load(&output).unwrap();
    assert_eq!(object_path(&reloaded).node_count(), 7);
}

#[test]
fn test_bottom_up_measurement_in_millimetres() {
    // 100mm tall page; a box measured 10 user units above the bottom edge
    let mut doc = SvgDocument::parse(drawing("100mm")).unwrap();
    let page = 100.0 * 3.5433070866;
    let bounds = FixedBounds::new(
        SourceBox::new(0.0, page - 10.0, 10.0, 10.0),
        AxisOrientation::BottomUp,
    );
    let report = EnvelopeEffect::new(selection()).run(&mut doc, &bounds).unwrap();
    assert!((report.source.y - 0.0).abs() < 1e-9);
}

#[test]
fn test_bad_height_is_reported() {
    let mut doc = SvgDocument::parse(drawing("tall")).unwrap();
    let bounds = FixedBounds::new(SourceBox::new(0.0, 0.0, 10.0, 10.0), AxisOrientation::BottomUp);
    let err = EnvelopeEffect::new(selection()).run(&mut doc, &bounds).unwrap_err();
    assert!(matches!(err, EffectError::Unit(_)));
    assert!(!doc.is_modified());
}

struct FailingBounds;

impl BoundsProvider for FailingBounds {
    fn measure(&self, id: &str, _path: &SuperPath) -> Result<MeasuredBox, MeasureError> {
        Err(MeasureError::EmptyGeometry { id: id.to_string() })
    }
}

#[test]
fn test_measure_failure_leaves_document() {
    let mut doc = SvgDocument::parse(drawing("100")).unwrap();
    let err = EnvelopeEffect::new(selection())
        .run(&mut doc, &FailingBounds)
        .unwrap_err();
    assert!(matches!(err, EffectError::Measure(_)));
    assert_eq!(doc.render().unwrap(), drawing("100"));
}

#[test]
fn test_triangle_control_path() {
    let mut doc = SvgDocument::parse(
        r#"<svg height="100"><path id="object" d="M 0,0 L 10,0 L 10,10 L 0,10 Z"/><path id="triangle" d="M 50,0 L 50,0 L 100,100 L 0,100 Z"/></svg>"#
            .to_string(),
    )
    .unwrap();
    EnvelopeEffect::new(vec!["object".to_string(), "triangle".to_string()])
        .run(&mut doc, &GeometryBounds)
        .unwrap();

    let anchors = object_path(&doc).anchors();
    let expected = [(50.0, 0.0), (50.0, 0.0), (100.0, 100.0), (0.0, 100.0), (50.0, 0.0)];
    for (got, want) in anchors.iter().zip(expected) {
        assert!(got.approx_eq(&Point::from(want), 1e-9), "{} vs {:?}", got, want);
    }
}
