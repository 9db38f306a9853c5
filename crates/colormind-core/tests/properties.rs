use colormind_core::{
    DeficiencyKind, FilterKind, Rgba, TransformConfig, TransformMode, apply_to_buffer, daltonize,
    simulate,
};
use proptest::prelude::*;

fn sample() -> impl Strategy<Value = Rgba> {
    any::<[u8; 4]>().prop_map(Rgba::from)
}

fn deficiency() -> impl Strategy<Value = DeficiencyKind> {
    prop_oneof![
        Just(DeficiencyKind::Protanope),
        Just(DeficiencyKind::Deuteranope),
        Just(DeficiencyKind::Tritanope),
    ]
}

fn simulate_kind() -> impl Strategy<Value = FilterKind> {
    prop_oneof![
        Just(FilterKind::Normal),
        Just(FilterKind::Protanope),
        Just(FilterKind::Deuteranope),
        Just(FilterKind::Tritanope),
        Just(FilterKind::Achromatope),
    ]
}

proptest! {
    #[test]
    fn zero_amount_simulation_is_identity(s in sample(), kind in simulate_kind()) {
        let config = TransformConfig::new(kind, 0.0);
        prop_assert_eq!(simulate(s, &config).unwrap(), s);
    }

    #[test]
    fn achromatic_samples_are_never_daltonized(v in any::<u8>(), a in any::<u8>(), kind in deficiency()) {
        let gray = Rgba::new(v, v, v, a);
        let config = TransformConfig::new(kind.into(), 1.0);
        prop_assert_eq!(daltonize(gray, &config).unwrap(), gray);
    }

    #[test]
    fn achromatope_blends_grays_instead_of_bypassing(v in any::<u8>(), a in any::<u8>()) {
        let gray = Rgba::new(v, v, v, a);
        let config = TransformConfig::new(FilterKind::Achromatope, 1.0);
        let x = f64::from(v);
        let mono = (x * 0.212656 + x * 0.715158 + x * 0.072186) as u8;
        let expected = Rgba::new(mono, mono, mono, a);
        prop_assert_eq!(simulate(gray, &config).unwrap(), expected);
        prop_assert_eq!(apply_to_buffer(&[gray], &config, TransformMode::Simulate).unwrap()[0], expected);
    }

    #[test]
    fn alpha_is_preserved(
        buffer in prop::collection::vec(sample(), 0..64),
        kind in simulate_kind(),
        amount in 0.0_f64..=1.0,
    ) {
        let config = TransformConfig::new(kind, amount);
        for mode in [TransformMode::Simulate, TransformMode::Daltonize] {
            if kind == FilterKind::Achromatope && mode == TransformMode::Daltonize {
                continue;
            }
            let out = apply_to_buffer(&buffer, &config, mode).unwrap();
            prop_assert_eq!(out.len(), buffer.len());
            for (src, dst) in buffer.iter().zip(&out) {
                prop_assert_eq!(src.a, dst.a);
            }
        }
    }

    #[test]
    fn transforms_are_deterministic(s in sample(), kind in deficiency(), amount in 0.0_f64..=1.0) {
        let config = TransformConfig::new(kind.into(), amount);
        let first = apply_to_buffer(&[s], &config, TransformMode::Simulate).unwrap();
        let second = apply_to_buffer(&[s], &config, TransformMode::Simulate).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(daltonize(s, &config).unwrap(), daltonize(s, &config).unwrap());
    }

    #[test]
    fn batch_output_matches_per_sample_output(
        buffer in prop::collection::vec(sample(), 1..64),
        kind in deficiency(),
    ) {
        let config = TransformConfig::new(kind.into(), 1.0);
        let out = apply_to_buffer(&buffer, &config, TransformMode::Daltonize).unwrap();
        for (i, src) in buffer.iter().enumerate() {
            prop_assert_eq!(out[i], daltonize(*src, &config).unwrap());
        }
    }

    #[test]
    fn near_gray_simulation_never_fails_the_batch(v in 1u8..=254, kind in deficiency()) {
        // One step off gray keeps the projection close to the white point.
        let s = Rgba::opaque(v, v, v + 1);
        let config = TransformConfig::new(kind.into(), 1.0);
        let out = apply_to_buffer(&[s], &config, TransformMode::Simulate).unwrap()[0];
        prop_assert_eq!(out.a, 255);
    }
}
