//! Tests for the red/blue misregistration effect

#[cfg(test)]
mod tests {
    use ditherforge::effects::misprint::{channel_shift, maybe_misprint};
    use ditherforge::math::random::RandomSource;
    use ditherforge::raster::surface::Surface;

    struct Constant(f64);

    impl RandomSource for Constant {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn row() -> Surface {
        let mut surface = Surface::new(6, 1);
        for x in 0..6 {
            let v = (x * 10) as u8;
            surface.set_pixel(x, 0, [v, v + 1, v + 2, 100]);
        }
        surface
    }

    // Tests red reads from the left, blue from the right, with clamping
    // Verified by shifting both channels the same way
    #[test]
    fn test_channel_shift() {
        let shifted = channel_shift(row(), 2);
        let reds: Vec<_> = (0..6).filter_map(|x| shifted.channel(x, 0, 0)).collect();
        let greens: Vec<_> = (0..6).filter_map(|x| shifted.channel(x, 0, 1)).collect();
        let blues: Vec<_> = (0..6).filter_map(|x| shifted.channel(x, 0, 2)).collect();
        let alphas: Vec<_> = (0..6).filter_map(|x| shifted.channel(x, 0, 3)).collect();

        assert_eq!(reds, vec![0, 0, 0, 10, 20, 30]);
        assert_eq!(greens, vec![1, 11, 21, 31, 41, 51]);
        assert_eq!(blues, vec![22, 32, 42, 52, 52, 52]);
        assert_eq!(alphas, vec![255; 6]);
    }

    // Tests rows narrower than the shift clamp both reads to the row edges
    // Verified by clamping blue to the width instead of the last pixel
    #[test]
    fn test_channel_shift_narrow_rows() {
        for width in 1..5 {
            let mut source = Surface::new(width, 2);
            for y in 0..2 {
                for x in 0..width {
                    let v = (x * 10 + y) as u8;
                    source.set_pixel(x, y, [v, v + 3, v + 5, 100]);
                }
            }

            let shifted = channel_shift(source.clone(), 2);
            assert_eq!(shifted.dimensions(), (width, 2));
            assert_eq!(shifted.to_rgba_bytes().len(), width * 2 * 4);

            for y in 0..2 {
                for x in 0..width {
                    let red_from = x.saturating_sub(2);
                    let blue_from = (x + 2).min(width - 1);
                    assert_eq!(shifted.channel(x, y, 0), source.channel(red_from, y, 0));
                    assert_eq!(shifted.channel(x, y, 1), source.channel(x, y, 1));
                    assert_eq!(shifted.channel(x, y, 2), source.channel(blue_from, y, 2));
                    assert_eq!(shifted.channel(x, y, 3), Some(255));
                }
            }
        }

        let mut four = Surface::new(4, 1);
        for x in 0..4 {
            let v = (x * 10) as u8;
            four.set_pixel(x, 0, [v, v, v + 5, 255]);
        }
        let shifted = channel_shift(four, 2);
        let reds: Vec<_> = (0..4).filter_map(|x| shifted.channel(x, 0, 0)).collect();
        let blues: Vec<_> = (0..4).filter_map(|x| shifted.channel(x, 0, 2)).collect();
        assert_eq!(reds, vec![0, 0, 0, 10]);
        assert_eq!(blues, vec![25, 35, 35, 35]);
    }

    // Tests a zero offset only forces opacity
    // Verified by skipping the alpha write
    #[test]
    fn test_zero_offset() {
        let source = row();
        let shifted = channel_shift(source.clone(), 0);
        assert_eq!(shifted.channel(3, 0, 0), source.channel(3, 0, 0));
        assert_eq!(shifted.channel(3, 0, 3), Some(255));
    }

    // Tests the probability roll gates the effect
    // Verified by inverting the roll comparison
    #[test]
    fn test_maybe_misprint_roll() {
        let (untouched, applied) = maybe_misprint(row(), &mut Constant(0.9));
        assert!(!applied);
        assert_eq!(untouched, row());

        let (shifted, applied) = maybe_misprint(row(), &mut Constant(0.01));
        assert!(applied);
        assert_eq!(shifted, channel_shift(row(), 2));
    }
}
