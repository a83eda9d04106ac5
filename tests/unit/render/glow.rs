use super::*;

fn layer(w: usize, h: usize, ink: &[(usize, usize, [u8; 4])]) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for &(x, y, px) in ink {
        let i = (y * w + x) * 4;
        buf[i..i + 4].copy_from_slice(&px);
    }
    buf
}

/// Direct 2-D Gaussian with clamp-to-edge, in floating point.
fn reference_blur(src: &[u8], w: usize, h: usize, radius: usize, sigma: f64) -> Vec<f64> {
    let r = radius as i64;
    let weights: Vec<f64> = (-r..=r)
        .map(|d| (-((d * d) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    let weights: Vec<f64> = weights.iter().map(|v| v / total).collect();

    let mut out = vec![0.0; src.len()];
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            for (j, wy) in weights.iter().enumerate() {
                for (i, wx) in weights.iter().enumerate() {
                    let sx = (x + i as i64 - r).clamp(0, w as i64 - 1) as usize;
                    let sy = (y + j as i64 - r).clamp(0, h as i64 - 1) as usize;
                    for c in 0..4 {
                        out[((y as usize) * w + x as usize) * 4 + c] +=
                            wx * wy * f64::from(src[(sy * w + sx) * 4 + c]);
                    }
                }
            }
        }
    }
    out
}

#[test]
fn ink_bounds_cover_every_lit_pixel() {
    let buf = layer(8, 6, &[(5, 1, [0, 0, 0, 9]), (2, 4, [3, 3, 3, 200])]);
    assert_eq!(
        ink_bounds(&buf, 8),
        Some(InkBounds {
            x0: 2,
            x1: 6,
            y0: 1,
            y1: 5
        })
    );
    assert_eq!(ink_bounds(&layer(8, 6, &[]), 8), None);
}

#[test]
fn zero_radius_copies_the_layer() {
    let src = layer(3, 2, &[(1, 1, [40, 30, 20, 90])]);
    let mut blur = GlowBlur::new(0, 0.0).unwrap();
    assert_eq!(blur.radius(), 0);
    assert_eq!(blur.apply(&src, 3, 2).unwrap(), src);
}

#[test]
fn blank_layer_stays_blank() {
    let mut blur = GlowBlur::new(4, 2.0).unwrap();
    let out = blur.apply(&layer(16, 16, &[]), 16, 16).unwrap();
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn halo_stays_within_the_radius_and_keeps_its_weight() {
    let (w, h, radius) = (21usize, 21usize, 3u32);
    let src = layer(w, h, &[(10, 10, [255, 255, 255, 255])]);
    let out = GlowBlur::new(radius, 1.5).unwrap().apply(&src, 21, 21).unwrap();

    let bounds = ink_bounds(&out, w).unwrap();
    assert_eq!(
        bounds,
        InkBounds {
            x0: 7,
            x1: 14,
            y0: 7,
            y1: 14
        }
    );
    let alpha: u32 = out.chunks_exact(4).map(|p| u32::from(p[3])).sum();
    assert!(alpha.abs_diff(255) <= 16, "alpha sum {alpha}");

    // Symmetric kernel gives a symmetric halo.
    let a = |x: usize, y: usize| out[(y * w + x) * 4 + 3];
    assert_eq!(a(8, 10), a(12, 10));
    assert_eq!(a(10, 8), a(10, 12));
}

#[test]
fn bounded_blur_matches_a_whole_canvas_convolution() {
    let (w, h) = (24usize, 12usize);
    let src = layer(
        w,
        h,
        &[
            (0, 5, [200, 100, 0, 255]),
            (1, 5, [120, 60, 0, 160]),
            (9, 3, [10, 250, 30, 255]),
            (10, 4, [0, 0, 90, 90]),
        ],
    );
    let got = GlowBlur::new(4, 2.0).unwrap().apply(&src, 24, 12).unwrap();
    let want = reference_blur(&src, w, h, 4, 2.0);

    for (g, r) in got.iter().zip(&want) {
        assert!((f64::from(*g) - r).abs() <= 2.0, "got {g}, expected ~{r}");
    }
}

#[test]
fn scratch_from_a_previous_frame_does_not_leak() {
    let mut reused = GlowBlur::new(2, 1.0).unwrap();
    let first = layer(10, 10, &[(1, 1, [255, 255, 255, 255]), (8, 8, [255, 0, 0, 255])]);
    let second = layer(10, 10, &[(5, 5, [0, 255, 0, 255])]);

    reused.apply(&first, 10, 10).unwrap();
    let again = reused.apply(&second, 10, 10).unwrap();
    let fresh = GlowBlur::new(2, 1.0).unwrap().apply(&second, 10, 10).unwrap();
    assert_eq!(again, fresh);
}

#[test]
fn glow_rejects_bad_sizes_and_sigma() {
    assert!(GlowBlur::new(3, 0.0).is_err());
    assert!(GlowBlur::new(3, f32::NAN).is_err());
    let mut blur = GlowBlur::new(1, 1.0).unwrap();
    assert!(matches!(
        blur.apply(&[0u8; 7], 1, 2),
        Err(ReelError::Rasterization(_))
    ));
}

#[test]
fn brighten_unit_factor_is_identity() {
    let mut buf = vec![10u8, 20, 30, 40, 200, 0, 0, 255];
    let before = buf.clone();
    brighten_rgba8_premul(&mut buf, 1.0).unwrap();
    assert_eq!(buf, before);
}

#[test]
fn brighten_scales_and_clamps_to_alpha() {
    let mut buf = vec![50u8, 100, 20, 128, 200, 0, 10, 255];
    brighten_rgba8_premul(&mut buf, 2.0).unwrap();
    assert_eq!(buf, vec![100, 128, 40, 128, 255, 0, 20, 255]);
    assert!(brighten_rgba8_premul(&mut buf, -1.0).is_err());
}

#[test]
fn over_transparent_and_opaque_sources() {
    let mut dst = vec![10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);

    premul_over_in_place(&mut dst, &[1, 2, 3, 255]).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn over_half_alpha_blends() {
    let mut dst = vec![0u8, 0, 200, 255];
    premul_over_in_place(&mut dst, &[128, 0, 0, 128]).unwrap();
    assert_eq!(dst[0], 128);
    assert_eq!(dst[2], ((200u32 * 127 + 127) / 255) as u8);
    assert_eq!(dst[3], 255);
}
