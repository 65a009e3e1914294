/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Luma/chroma conversions
//!
//! Both directions use BT.601 full range coefficients in 14 bit fixed point,
//! the same representation JPEG uses.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

// Bt.601 Full Range inverse coefficients computed with 14 bits of precision.
const Y_CF: i32 = 16384;
const CR_CF: i32 = 22970;
const CB_CF: i32 = 29032;
const C_G_CR_COEF_1: i32 = -11700;
const C_G_CB_COEF_2: i32 = -5638;
const YUV_PREC: i32 = 14;
// Rounding const for YUV -> RGB conversion: floating equivalent 0.499(9).
const YUV_RND: i32 = (1 << (YUV_PREC - 1)) - 1;

// Forward coefficients, each row sums to 1 << 14 (luma) or 0 (chroma)
// so that greys survive the round trip.
const R_Y: i32 = 4899;
const G_Y: i32 = 9617;
const B_Y: i32 = 1868;

const R_CB: i32 = -2765;
const G_CB: i32 = -5427;
const B_CB: i32 = 8192;

const R_CR: i32 = 8192;
const G_CR: i32 = -6860;
const B_CR: i32 = -1332;

const HALF: i32 = 1 << (YUV_PREC - 1);
const CHROMA_OFFSET: i32 = 128 << YUV_PREC;

/// Limit values to 0 and 255
#[inline]
fn clamp(a: i32) -> u8 {
    a.clamp(0, 255) as u8
}

/// Convert a single YCbCr triple to RGB
///
/// ```
/// use resample_image::color_convert::ycbcr_to_rgb;
/// assert_eq!(ycbcr_to_rgb(255, 128, 128), [255, 255, 255]);
/// assert_eq!(ycbcr_to_rgb(0, 128, 128), [0, 0, 0]);
/// ```
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let cr = i32::from(cr) - 128;
    let cb = i32::from(cb) - 128;

    let y0 = i32::from(y) * Y_CF + YUV_RND;

    let r = (y0 + cr * CR_CF) >> YUV_PREC;
    let g = (y0 + cr * C_G_CR_COEF_1 + cb * C_G_CB_COEF_2) >> YUV_PREC;
    let b = (y0 + cb * CB_CF) >> YUV_PREC;

    [clamp(r), clamp(g), clamp(b)]
}

/// Convert a single RGB triple to YCbCr
///
/// ```
/// use resample_image::color_convert::rgb_to_ycbcr;
/// assert_eq!(rgb_to_ycbcr(255, 255, 255), [255, 128, 128]);
/// ```
#[inline]
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));

    let y = (r * R_Y + g * G_Y + b * B_Y + HALF) >> YUV_PREC;
    let cb = (r * R_CB + g * G_CB + b * B_CB + CHROMA_OFFSET + HALF) >> YUV_PREC;
    let cr = (r * R_CR + g * G_CR + b * B_CR + CHROMA_OFFSET + HALF) >> YUV_PREC;

    [clamp(y), clamp(cb), clamp(cr)]
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::color_convert::{rgb_to_ycbcr, ycbcr_to_rgb};

    #[test]
    fn greys_survive_round_trip() {
        for v in 0..=255_u8 {
            let [y, cb, cr] = rgb_to_ycbcr(v, v, v);
            assert_eq!((y, cb, cr), (v, 128, 128));
            assert_eq!(ycbcr_to_rgb(y, cb, cr), [v, v, v]);
        }
    }

    #[test]
    fn test_round_trip_random() {
        // 8 bit chroma loses a bit of precision, but never more than this
        const T_EPSILON: i32 = 3;

        let mut rand = nanorand::WyRand::new();
        for _ in 0..1000 {
            let rgb: [u8; 3] = [rand.generate(), rand.generate(), rand.generate()];
            let [y, cb, cr] = rgb_to_ycbcr(rgb[0], rgb[1], rgb[2]);
            let back = ycbcr_to_rgb(y, cb, cr);

            for (e, f) in rgb.iter().zip(back.iter()) {
                let diff = (i32::from(*e) - i32::from(*f)).abs();
                assert!(diff <= T_EPSILON, "{rgb:?} != {back:?}");
            }
        }
    }
}
