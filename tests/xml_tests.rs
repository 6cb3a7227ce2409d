/// Integration-Tests fuer XML-Export und Ergebnis-Import
use approx::assert_abs_diff_eq;
use survey_adjust::app::parse_network_toml;
use survey_adjust::xml::apply_adjusted_points;
use survey_adjust::{
    build_request, parse_adjustment_result, write_document, Dimension, MemoryCoordinateStore,
};

#[test]
fn test_request_from_network_file() {
    let loaded = parse_network_toml(include_str!("fixtures/traverse.toml")).unwrap();
    let parameters = loaded.parameters.unwrap_or_default();

    let document = build_request(&loaded.model, &parameters).unwrap();
    let xml = write_document(&document);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- "));
    assert!(xml.contains("<gama-local version=\"2.0\">"));
    assert!(xml.contains("<network axes-xy=\"ne\" angles=\"left-handed\">"));
    assert!(xml.contains(
        "<parameters sigma-apr=\"1\" conf-pr=\"0.95\" tol-abs=\"1000\" \
         sigma-act=\"aposteriori\" update-constrained-coordinates=\"yes\"/>"
    ));
    assert!(xml.contains("<point id=\"4\" y=\"78.1562\" x=\"395.49\" adj=\"XY\"/>"));
    assert_eq!(xml.matches("<obs from=").count(), 5);
    assert_eq!(xml.matches("<direction to=").count(), 18);
    assert_eq!(xml.matches("<distance to=").count(), 18);

    // Punkte stehen vor den Standpunkten
    let last_point = xml.rfind("<point ").unwrap();
    let first_obs = xml.find("<obs ").unwrap();
    assert!(last_point < first_obs);
}

#[test]
fn test_parse_gama_result_fixture() {
    let result = parse_adjustment_result(include_str!("fixtures/gama_result.xml")).unwrap();
    let points = result.adjusted.as_ref().expect("adjusted erwartet");

    let ids: Vec<&str> = points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(result.ignored_orientations, 5);

    let mut store = MemoryCoordinateStore::new();
    assert_eq!(apply_adjusted_points(&result, Dimension::Two, &mut store), 5);

    let p3 = store.get("3").unwrap();
    assert_abs_diff_eq!(p3.easting.unwrap(), 257.95, epsilon = 0.005);
    assert_abs_diff_eq!(p3.northing.unwrap(), 375.64, epsilon = 0.005);
    assert_eq!(p3.elevation, None);
}
