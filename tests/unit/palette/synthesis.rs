//! Tests for palette synthesis, harmony hues and the mud guard

#[cfg(test)]
mod tests {
    use ditherforge::math::color::{Hsl, Rgb};
    use ditherforge::math::random::{RandomSource, SeededRandom};
    use ditherforge::palette::synthesis::{
        Palette, color_count, is_muddy, jittered, strategy_hue, synthesize,
    };
    use ditherforge::theme::registry::{
        BUILTIN_THEMES, HarmonyStrategy, PaletteFlags, PaletteSpec, ValueRange,
    };

    struct Constant(f64);

    impl RandomSource for Constant {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn is_gray(color: Rgb) -> bool {
        color.r == color.g && color.g == color.b
    }

    // Tests every built-in theme yields palettes within its color bounds
    // Verified by allowing max_colors + 1
    #[test]
    fn test_palette_sizes_respect_theme_bounds() {
        let mut rng = SeededRandom::new(31);
        for theme in &BUILTIN_THEMES {
            for _ in 0..100 {
                let palette = synthesize(&theme.palette, &mut rng);
                assert!(
                    (theme.palette.min_colors..=theme.palette.max_colors).contains(&palette.len()),
                    "{} produced {} colors",
                    theme.key,
                    palette.len()
                );
                assert!((0.0..360.0).contains(&palette.key_hue()));
            }
        }
    }

    // Tests color counts cover both ends of the range
    // Verified by dropping the +1 from the span
    #[test]
    fn test_color_count_extremes() {
        let spec = PaletteSpec::new(3, 6);
        assert_eq!(color_count(&spec, &mut Constant(0.0)), 3);
        assert_eq!(color_count(&spec, &mut Constant(0.999_999)), 6);

        let fixed = PaletteSpec::new(4, 4);
        assert_eq!(color_count(&fixed, &mut Constant(0.5)), 4);
    }

    // Tests explicit strategies are reported on the palette
    // Verified by always resolving from flags
    #[test]
    fn test_explicit_strategy_is_used() {
        let mut rng = SeededRandom::new(9);
        let spec = PaletteSpec::new(3, 5).with_strategy(HarmonyStrategy::SplitComplementary);
        let palette = synthesize(&spec, &mut rng);
        assert_eq!(palette.strategy(), HarmonyStrategy::SplitComplementary);
    }

    // Tests mono-plus palettes are one accent over a grayscale ramp
    // Verified by applying the mud guard to the grays
    #[test]
    fn test_mono_plus_accent_and_grays() {
        let spec = PaletteSpec::new(3, 4)
            .with_saturation(85.0, 100.0)
            .with_lightness(45.0, 55.0)
            .with_flags(PaletteFlags {
                mono_plus: true,
                ..PaletteFlags::default()
            });

        let mut rng = SeededRandom::new(12);
        for _ in 0..50 {
            let palette = synthesize(&spec, &mut rng);
            assert_eq!(palette.strategy(), HarmonyStrategy::MonoPlus);

            let (accent, grays) = palette.colors().split_first().expect("palette is not empty");
            assert!(!is_gray(*accent), "accent {accent} should be saturated");
            assert!(grays.iter().all(|&c| is_gray(c)));

            let levels: Vec<u8> = grays.iter().map(|c| c.r).collect();
            let listed = [242, 20, 128];
            let reversed = [128, 20, 242];
            assert!(
                levels.iter().zip(listed).all(|(&l, e)| l == e)
                    || levels.iter().zip(reversed).all(|(&l, e)| l == e),
                "unexpected gray ramp {levels:?}"
            );
        }
    }

    // Tests key-color themes snap the key hue near a primary or secondary hue
    // Verified by drawing the key hue uniformly
    #[test]
    fn test_key_colors_snap_to_anchors() {
        let spec = PaletteSpec::new(3, 6).with_flags(PaletteFlags {
            use_key_colors: true,
            ..PaletteFlags::default()
        });

        let mut rng = SeededRandom::new(60);
        for _ in 0..100 {
            let key = synthesize(&spec, &mut rng).key_hue();
            let nearest = (key / 60.0).round() * 60.0;
            assert!((key - nearest).abs() <= 10.0, "key hue {key} is not near an anchor");
        }
    }

    // Tests muddy palettes still finish with the requested size
    // Verified by retrying without a bound
    #[test]
    fn test_unavoidable_mud_terminates() {
        let spec = PaletteSpec::new(5, 5)
            .with_saturation(0.0, 10.0)
            .with_lightness(5.0, 15.0);
        let palette = synthesize(&spec, &mut SeededRandom::new(1));
        assert_eq!(palette.len(), 5);
    }

    // Tests the mud predicate needs both low saturation and low lightness
    // Verified by using or instead of and
    #[test]
    fn test_is_muddy() {
        assert!(is_muddy(&Hsl::new(0.0, 20.0, 20.0)));
        assert!(!is_muddy(&Hsl::new(0.0, 20.0, 60.0)));
        assert!(!is_muddy(&Hsl::new(0.0, 60.0, 20.0)));
        assert!(!is_muddy(&Hsl::new(0.0, 40.0, 39.0)));
    }

    // Tests palettes that can escape mud do so, within conversion rounding
    // Verified by disabling the retry loop
    #[test]
    fn test_retries_escape_mud() {
        let spec = PaletteSpec::new(12, 12)
            .with_saturation(20.0, 100.0)
            .with_lightness(20.0, 100.0);
        let mut rng = SeededRandom::new(400);
        for _ in 0..20 {
            for color in synthesize(&spec, &mut rng).colors() {
                let hsl = Hsl::from_rgb_f64(color.to_f64());
                assert!(!(hsl.s < 37.0 && hsl.l < 37.0), "muddy color {color}");
            }
        }
    }

    // Tests harmony hue offsets for each strategy
    // Verified by using 90 degree complementary offsets
    #[test]
    fn test_strategy_hues() {
        // A roll of 0.5 makes every symmetric jitter zero
        let mut rng = Constant(0.5);

        assert!((strategy_hue(HarmonyStrategy::Spread, 10.0, 1, 4, &mut rng) - 100.0).abs() < 1e-9);
        assert!(
            (strategy_hue(HarmonyStrategy::Complementary, 300.0, 1, 2, &mut rng) - 120.0).abs()
                < 1e-9
        );
        assert!((strategy_hue(HarmonyStrategy::Triadic, 0.0, 2, 3, &mut rng) - 240.0).abs() < 1e-9);
        assert!((strategy_hue(HarmonyStrategy::Triadic, 0.0, 3, 4, &mut rng)).abs() < 1e-9);
        assert!(
            (strategy_hue(HarmonyStrategy::Analogous, 100.0, 0, 3, &mut rng) - 70.0).abs() < 1e-9
        );
        assert!(
            (strategy_hue(HarmonyStrategy::SplitComplementary, 0.0, 2, 5, &mut rng) - 210.0).abs()
                < 1e-9
        );
        assert!((strategy_hue(HarmonyStrategy::Random, 45.0, 7, 8, &mut rng) - 45.0).abs() < 1e-9);
    }

    // Tests jittered ranges stay ordered and inside 0..=100
    // Verified by skipping the clamp
    #[test]
    fn test_jittered_range_stays_valid() {
        let mut rng = SeededRandom::new(17);
        for _ in 0..500 {
            let range = jittered(ValueRange::new(95.0, 99.0), 10.0, &mut rng);
            assert!(range.is_within(0.0, 100.0));

            let low = jittered(ValueRange::new(1.0, 2.0), 10.0, &mut rng);
            assert!(low.is_within(0.0, 100.0));
        }
    }

    // Tests synthesis is a pure function of the random source
    // Verified by drawing the key hue from entropy
    #[test]
    fn test_synthesis_is_deterministic() {
        for theme in &BUILTIN_THEMES {
            let a = synthesize(&theme.palette, &mut SeededRandom::new(5));
            let b = synthesize(&theme.palette, &mut SeededRandom::new(5));
            assert_eq!(a, b);
        }
    }

    // Tests palette accessors and hex formatting
    // Verified by joining hex values with commas
    #[test]
    fn test_palette_accessors() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE], 125.0, HarmonyStrategy::Spread);
        assert_eq!(palette.len(), 2);
        assert!(!palette.is_empty());
        assert_eq!(palette.hue_name(), "Green");
        assert_eq!(palette.to_hex_list(), "#000000 #ffffff");
    }
}
