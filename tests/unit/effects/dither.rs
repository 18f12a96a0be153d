//! Tests for error-diffusion quantization and its helpers

#[cfg(test)]
mod tests {
    use ditherforge::effects::dither::{DIFFUSION_KERNEL, adjust_contrast, dither, nearest_color};
    use ditherforge::math::color::Rgb;
    use ditherforge::math::random::SeededRandom;
    use ditherforge::raster::surface::Surface;

    const MONO: [Rgb; 2] = [Rgb::BLACK, Rgb::WHITE];

    fn red_rows(surface: &Surface) -> Vec<Vec<u8>> {
        (0..surface.height())
            .map(|y| {
                (0..surface.width())
                    .map(|x| surface.channel(x, y, 0).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    fn gray(width: usize, height: usize, level: u8) -> Surface {
        Surface::filled(width, height, [level, level, level, 255])
    }

    // Tests mid-gray dithers to a checkerboard against black and white
    // Verified by diffusing only to the right-hand neighbour
    #[test]
    fn test_mid_gray_checkerboard() {
        let output = dither(gray(4, 4, 128), &MONO, 1.0, None);
        assert_eq!(
            red_rows(&output),
            vec![
                vec![255, 0, 255, 0],
                vec![0, 255, 0, 255],
                vec![255, 0, 255, 0],
                vec![0, 255, 0, 255],
            ]
        );
    }

    // Tests darker gray and a contrast stretch against reference output
    // Verified by applying contrast after quantization
    #[test]
    fn test_reference_patterns() {
        let dark = dither(gray(4, 4, 64), &MONO, 1.0, None);
        assert_eq!(
            red_rows(&dark),
            vec![
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 255, 255, 0],
                vec![0, 0, 0, 0],
            ]
        );

        let stretched = dither(gray(4, 4, 100), &MONO, 1.5, None);
        assert_eq!(
            red_rows(&stretched),
            vec![
                vec![0, 0, 0, 255],
                vec![255, 0, 0, 255],
                vec![0, 255, 0, 0],
                vec![0, 255, 255, 0],
            ]
        );
    }

    // Tests every output pixel is a palette color and alpha is untouched
    // Verified by writing the adjusted value instead of the chosen color
    #[test]
    fn test_output_uses_palette_only() {
        let palette = [Rgb::new(200, 30, 30), Rgb::new(20, 40, 180), Rgb::new(240, 240, 200)];
        let mut source = Surface::new(9, 7);
        for y in 0..7 {
            for x in 0..9 {
                source.set_pixel(x, y, [(x * 28) as u8, (y * 36) as u8, 90, (x + y) as u8]);
            }
        }

        let output = dither(source.clone(), &palette, 1.3, Some(&mut SeededRandom::new(3)));
        for y in 0..7 {
            for x in 0..9 {
                let [r, g, b, a] = output.pixel(x, y).expect("in bounds");
                assert!(palette.contains(&Rgb::new(r, g, b)));
                assert_eq!(Some(a), source.channel(x, y, 3));
            }
        }
    }

    // Tests re-dithering quantized output with the same palette changes nothing
    // Verified by diffusing error from pixels that already match the palette
    #[test]
    fn test_requantizing_is_idempotent() {
        let palette = [
            Rgb::new(230, 60, 40),
            Rgb::new(30, 90, 200),
            Rgb::new(250, 230, 120),
            Rgb::new(15, 15, 25),
        ];
        let mut source = Surface::new(13, 11);
        for y in 0..11 {
            for x in 0..13 {
                source.set_pixel(
                    x,
                    y,
                    [(x * 19) as u8, (y * 23) as u8, ((x * 7 + y * 11) % 256) as u8, 255],
                );
            }
        }

        let once = dither(source, &palette, 1.0, None);
        let twice = dither(once.clone(), &palette, 1.0, None);
        assert_eq!(twice, once);
    }

    // Tests a one-color palette paints everything and an empty palette is a no-op
    // Verified by skipping the empty palette guard
    #[test]
    fn test_degenerate_palettes() {
        let source = gray(3, 3, 77);
        let single = dither(source.clone(), &[Rgb::new(10, 20, 30)], 1.0, None);
        assert!(single.to_rgba_bytes().chunks(4).all(|px| px == [10, 20, 30, 255]));

        assert_eq!(dither(source.clone(), &[], 1.0, None), source);
    }

    // Tests jittered output is a pure function of the seed
    // Verified by jittering with the entropy source
    #[test]
    fn test_jitter_is_seeded() {
        let source = gray(16, 16, 111);
        let a = dither(source.clone(), &MONO, 1.0, Some(&mut SeededRandom::new(8)));
        let b = dither(source, &MONO, 1.0, Some(&mut SeededRandom::new(8)));
        assert_eq!(a, b);
    }

    // Tests nearest color ties resolve to the earliest entry
    // Verified by using <= in the comparison
    #[test]
    fn test_nearest_color_ties() {
        let gray_point = [127.5, 127.5, 127.5];
        assert_eq!(nearest_color(&MONO, gray_point), Some(Rgb::BLACK));
        assert_eq!(nearest_color(&[Rgb::WHITE, Rgb::BLACK], gray_point), Some(Rgb::WHITE));
        assert_eq!(nearest_color(&MONO, [200.0, 190.0, 180.0]), Some(Rgb::WHITE));
        assert!(nearest_color(&[], gray_point).is_none());
    }

    // Tests contrast stretches around 128 and clamps
    // Verified by stretching around 127.5
    #[test]
    fn test_adjust_contrast() {
        assert!((adjust_contrast(128, 3.0) - 128.0).abs() < f64::EPSILON);
        assert!((adjust_contrast(100, 1.5) - 86.0).abs() < 1e-9);
        assert!((adjust_contrast(250, 2.0) - 255.0).abs() < f64::EPSILON);
        assert!(adjust_contrast(5, 2.0).abs() < f64::EPSILON);
    }

    // Tests the kernel spreads all of the error forward
    // Verified by changing one weight
    #[test]
    fn test_kernel_weights_sum_to_one() {
        let total: f64 = DIFFUSION_KERNEL.iter().map(|&(_, _, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(DIFFUSION_KERNEL.iter().all(|&(dx, dy, _)| dy > 0 || dx > 0));
    }
}
