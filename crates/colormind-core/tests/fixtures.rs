//! Regression fixtures pinned against the fixed CVD matrices.

use colormind_core::css::transform_colors;
use colormind_core::{
    CvdError, FilterKind, FilterRequest, Rgba, TransformConfig, TransformMode, apply_to_buffer,
    apply_to_bytes, daltonize, simulate,
};

fn assert_close(actual: Rgba, expected: Rgba, tol: u8) {
    let pairs = [
        (actual.r, expected.r),
        (actual.g, expected.g),
        (actual.b, expected.b),
    ];
    for (i, (a, e)) in pairs.into_iter().enumerate() {
        assert!(
            a.abs_diff(e) <= tol,
            "channel {} mismatch: got {}, expected {}, tol {}",
            i,
            a,
            e,
            tol
        );
    }
    assert_eq!(actual.a, expected.a, "alpha changed");
}

#[test]
fn daltonize_red_for_protanope() {
    let config = TransformConfig::new(FilterKind::Protanope, 1.0);
    let out = daltonize(Rgba::opaque(255, 0, 0), &config).unwrap();
    assert_eq!(out.r, 255);
    assert!(out.g > 0 && out.b > 0, "green and blue should be pushed up: {out}");
    assert_eq!(out, Rgba::opaque(255, 129, 157));
}

#[test]
fn simulate_gray_for_deuteranope_is_unchanged() {
    let gray = Rgba::opaque(128, 128, 128);
    let config = TransformConfig::new(FilterKind::Deuteranope, 1.0);
    assert_close(simulate(gray, &config).unwrap(), gray, 0);
}

#[test]
fn simulate_black_and_transparent_white_for_tritanope() {
    let buffer = [Rgba::new(0, 0, 0, 255), Rgba::new(255, 255, 255, 0)];
    let config = TransformConfig::new(FilterKind::Tritanope, 1.0);
    let out = apply_to_buffer(&buffer, &config, TransformMode::Simulate).unwrap();
    assert_eq!(out, buffer);
}

#[test]
fn simulate_primaries() {
    let config = |kind| TransformConfig::new(kind, 1.0);
    let cases = [
        (Rgba::opaque(255, 0, 0), FilterKind::Tritanope, Rgba::opaque(253, 23, 0)),
        (Rgba::opaque(0, 255, 0), FilterKind::Protanope, Rgba::opaque(248, 219, 0)),
        (Rgba::opaque(0, 255, 0), FilterKind::Tritanope, Rgba::opaque(117, 236, 255)),
        (Rgba::opaque(0, 0, 255), FilterKind::Protanope, Rgba::opaque(0, 74, 154)),
        (Rgba::opaque(0, 0, 255), FilterKind::Deuteranope, Rgba::opaque(0, 79, 130)),
        (Rgba::opaque(12, 200, 140), FilterKind::Deuteranope, Rgba::opaque(202, 168, 150)),
        (Rgba::opaque(12, 200, 140), FilterKind::Tritanope, Rgba::opaque(73, 191, 206)),
    ];
    for (input, kind, expected) in cases {
        assert_close(simulate(input, &config(kind)).unwrap(), expected, 1);
    }
}

#[test]
fn image_data_round_trip_through_bytes() {
    // Two pixels of canvas-style ImageData.
    let mut data = vec![255, 0, 0, 255, 40, 40, 40, 128];
    let request = FilterRequest::from_json(r#"{"mode": "daltonize", "kind": "Protanope"}"#).unwrap();
    let stats = apply_to_bytes(&mut data, &request.config, request.mode).unwrap();
    assert_eq!(stats.samples, 2);
    assert_eq!(stats.passthrough, 1);
    assert_eq!(data, vec![255, 129, 157, 255, 40, 40, 40, 128]);
}

#[test]
fn element_colors_are_transformed_in_order() {
    let config = TransformConfig::new(FilterKind::Achromatope, 1.0);
    let out = transform_colors(
        &["rgb(255, 0, 0)", "rgba(255, 0, 0, 0.5)", "transparent"],
        &config,
        TransformMode::Simulate,
    )
    .unwrap();
    assert_eq!(
        out,
        [
            "rgba(54, 54, 54, 1)",
            "rgba(54, 54, 54, 0.502)",
            "rgba(0, 0, 0, 0)"
        ]
    );
}

#[test]
fn invalid_request_fails_eagerly() {
    let err = FilterRequest::from_json(r#"{"mode": "simulate", "kind": "Protanope", "amount": 1.5}"#)
        .unwrap_err();
    assert!(matches!(err, CvdError::InvalidAmount(_)));

    let err = FilterRequest::from_json(r#"{"mode": "simulate", "kind": "Custom"}"#).unwrap_err();
    assert!(matches!(err, CvdError::UnknownDeficiencyKind(_)));
}
