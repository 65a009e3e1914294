/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Synthetic inputs for the benchmarks
use nanorand::Rng;
use resample::resample_image::image::Image;
use resample::resample_image::resample_core::colorspace::YCbCrSubsampleRatio;

fn noise(seed: u64, length: usize) -> Vec<u8> {
    let mut rand = nanorand::WyRand::new_seed(seed);
    (0..length).map(|_| rand.generate::<u8>()).collect()
}

/// A random 8 bit RGBA image
pub fn rgba8(width: usize, height: usize) -> Image {
    Image::from_rgba8(noise(0xbe4c, width * height * 4), width, height).unwrap()
}

/// A random luma/chroma image, like a decoded JPEG
pub fn ycbcr(width: usize, height: usize, ratio: YCbCrSubsampleRatio) -> Image {
    let (c_width, c_height) = ratio.chroma_dimensions(width, height);

    Image::from_ycbcr(
        noise(1, width * height),
        noise(2, c_width * c_height),
        noise(3, c_width * c_height),
        width,
        height,
        ratio
    )
    .unwrap()
}
