/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Storage of the resized image while workers fill it
//!
//! The buffer is handed out as disjoint chunks of whole rows, each
//! worker writes its own chunk and nothing else.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use resample_core::colorspace::YCbCrSubsampleRatio;
use resample_image::color_convert::rgb_to_ycbcr;
use resample_image::errors::ImageErrors;
use resample_image::image::{Image, PixelLayout};

use crate::converter::ColorSample;

#[inline(always)]
fn pack_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline(always)]
fn pack_u16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// Pixel storage of the output, one variant per layout the resampler writes
pub(crate) enum OutputBuffer {
    Rgba8(Vec<u8>),
    Rgba16(Vec<u16>),
    Luma8(Vec<u8>),
    Luma16(Vec<u16>),
    /// Full resolution luma/chroma
    YCbCr {
        y:  Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>
    }
}

/// Rows of one chunk, per layout
enum ChunkRows<'a> {
    Rgba8(&'a mut [u8]),
    Rgba16(&'a mut [u16]),
    Luma8(&'a mut [u8]),
    Luma16(&'a mut [u16]),
    YCbCr {
        y:  &'a mut [u8],
        cb: &'a mut [u8],
        cr: &'a mut [u8]
    }
}

/// A run of whole output rows owned by one worker
pub(crate) struct RowChunk<'a> {
    first_row: usize,
    width:     usize,
    rows:      ChunkRows<'a>
}

impl OutputBuffer {
    /// The layout written for a source stored as `source`
    ///
    /// Dedicated layouts are kept, luma/chroma comes back with full
    /// resolution chroma and any other interleaved layout becomes RGBA
    /// at the source depth.
    pub fn layout_for(source: PixelLayout) -> PixelLayout {
        use resample_core::bit_depth::BitDepth;

        match source {
            PixelLayout::Rgba8 | PixelLayout::Rgba16 | PixelLayout::Luma8 | PixelLayout::Luma16 => {
                source
            }
            PixelLayout::YCbCr(_) => PixelLayout::YCbCr(YCbCrSubsampleRatio::Ratio444),
            PixelLayout::Interleaved(_, BitDepth::Sixteen) => PixelLayout::Rgba16,
            PixelLayout::Interleaved(..) => PixelLayout::Rgba8
        }
    }

    /// Allocate zeroed storage for a `width` by `height` image in `layout`
    ///
    /// `layout` must be one returned by [`OutputBuffer::layout_for`]
    pub fn for_layout(layout: PixelLayout, width: usize, height: usize) -> OutputBuffer {
        let pixels = width * height;

        match layout {
            PixelLayout::Rgba16 => OutputBuffer::Rgba16(vec![0; pixels * 4]),
            PixelLayout::Luma8 => OutputBuffer::Luma8(vec![0; pixels]),
            PixelLayout::Luma16 => OutputBuffer::Luma16(vec![0; pixels]),
            PixelLayout::YCbCr(_) => OutputBuffer::YCbCr {
                y:  vec![0; pixels],
                cb: vec![0; pixels],
                cr: vec![0; pixels]
            },
            PixelLayout::Rgba8 | PixelLayout::Interleaved(..) => {
                OutputBuffer::Rgba8(vec![0; pixels * 4])
            }
        }
    }

    /// Split the buffer into chunks of `rows_per_chunk` rows
    ///
    /// The last chunk may be shorter.
    pub fn row_chunks(&mut self, width: usize, rows_per_chunk: usize) -> Vec<RowChunk<'_>> {
        let rows_per_chunk = rows_per_chunk.max(1);
        let pixels = width * rows_per_chunk;

        let chunks: Vec<ChunkRows<'_>> = match self {
            OutputBuffer::Rgba8(data) => data
                .chunks_mut(pixels * 4)
                .map(ChunkRows::Rgba8)
                .collect(),
            OutputBuffer::Rgba16(data) => data
                .chunks_mut(pixels * 4)
                .map(ChunkRows::Rgba16)
                .collect(),
            OutputBuffer::Luma8(data) => data.chunks_mut(pixels).map(ChunkRows::Luma8).collect(),
            OutputBuffer::Luma16(data) => data.chunks_mut(pixels).map(ChunkRows::Luma16).collect(),
            OutputBuffer::YCbCr { y, cb, cr } => y
                .chunks_mut(pixels)
                .zip(cb.chunks_mut(pixels))
                .zip(cr.chunks_mut(pixels))
                .map(|((y, cb), cr)| ChunkRows::YCbCr { y, cb, cr })
                .collect()
        };

        chunks
            .into_iter()
            .enumerate()
            .map(|(i, rows)| RowChunk {
                first_row: i * rows_per_chunk,
                width,
                rows
            })
            .collect()
    }

    /// Wrap the filled storage into an image
    ///
    /// # Errors
    /// If the storage does not match `width * height`
    pub fn into_image(self, width: usize, height: usize) -> Result<Image, ImageErrors> {
        match self {
            OutputBuffer::Rgba8(data) => Image::from_rgba8(data, width, height),
            OutputBuffer::Rgba16(data) => Image::from_rgba16(data, width, height),
            OutputBuffer::Luma8(data) => Image::from_luma8(data, width, height),
            OutputBuffer::Luma16(data) => Image::from_luma16(data, width, height),
            OutputBuffer::YCbCr { y, cb, cr } => {
                Image::from_ycbcr(y, cb, cr, width, height, YCbCrSubsampleRatio::Ratio444)
            }
        }
    }
}

impl RowChunk<'_> {
    /// Index of the first output row in this chunk
    pub const fn first_row(&self) -> usize {
        self.first_row
    }

    /// Number of rows in this chunk
    pub fn rows(&self) -> usize {
        if self.width == 0 {
            return 0;
        }
        let samples = match &self.rows {
            ChunkRows::Rgba8(data) => data.len() / 4,
            ChunkRows::Rgba16(data) => data.len() / 4,
            ChunkRows::Luma8(data) => data.len(),
            ChunkRows::Luma16(data) => data.len(),
            ChunkRows::YCbCr { y, .. } => y.len()
        };
        samples / self.width
    }

    /// Clamp, round and store one row of samples
    ///
    /// `row` is relative to the chunk, `samples` holds one entry per column.
    /// Gray outputs keep the first channel, luma/chroma outputs are converted
    /// from 8 bit RGB.
    pub fn store_row(&mut self, row: usize, samples: &[ColorSample]) {
        let width = self.width;
        let start = row * width;

        match &mut self.rows {
            ChunkRows::Rgba8(data) => {
                let out = &mut data[start * 4..(start + width) * 4];

                for (px, sample) in out.chunks_exact_mut(4).zip(samples) {
                    for (o, s) in px.iter_mut().zip(sample) {
                        *o = pack_u8(*s);
                    }
                }
            }
            ChunkRows::Rgba16(data) => {
                let out = &mut data[start * 4..(start + width) * 4];

                for (px, sample) in out.chunks_exact_mut(4).zip(samples) {
                    for (o, s) in px.iter_mut().zip(sample) {
                        *o = pack_u16(*s);
                    }
                }
            }
            ChunkRows::Luma8(data) => {
                for (o, sample) in data[start..start + width].iter_mut().zip(samples) {
                    *o = pack_u8(sample[0]);
                }
            }
            ChunkRows::Luma16(data) => {
                for (o, sample) in data[start..start + width].iter_mut().zip(samples) {
                    *o = pack_u16(sample[0]);
                }
            }
            ChunkRows::YCbCr { y, cb, cr } => {
                let planes = y[start..start + width]
                    .iter_mut()
                    .zip(cb[start..start + width].iter_mut())
                    .zip(cr[start..start + width].iter_mut());

                for (((y, cb), cr), sample) in planes.zip(samples) {
                    let [l, b, r] =
                        rgb_to_ycbcr(pack_u8(sample[0]), pack_u8(sample[1]), pack_u8(sample[2]));
                    *y = l;
                    *cb = b;
                    *cr = r;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use resample_core::bit_depth::BitDepth;
    use resample_core::colorspace::{ColorSpace, YCbCrSubsampleRatio};
    use resample_image::image::{PixelData, PixelLayout};

    use crate::output::{pack_u16, pack_u8, OutputBuffer};

    #[test]
    fn test_packing_clamps_then_rounds() {
        assert_eq!(pack_u8(-0.3), 0);
        assert_eq!(pack_u8(1.7), 255);
        assert_eq!(pack_u8(0.5), 128);
        assert_eq!(pack_u16(2.0), u16::MAX);
        assert_eq!(pack_u16(f32::from(300_u16) / 65535.0), 300);
    }

    #[test]
    fn test_layout_for() {
        assert_eq!(
            OutputBuffer::layout_for(PixelLayout::YCbCr(YCbCrSubsampleRatio::Ratio420)),
            PixelLayout::YCbCr(YCbCrSubsampleRatio::Ratio444)
        );
        assert_eq!(
            OutputBuffer::layout_for(PixelLayout::Interleaved(ColorSpace::BGR, BitDepth::Sixteen)),
            PixelLayout::Rgba16
        );
        assert_eq!(
            OutputBuffer::layout_for(PixelLayout::Interleaved(ColorSpace::LumaA, BitDepth::Eight)),
            PixelLayout::Rgba8
        );
        assert_eq!(
            OutputBuffer::layout_for(PixelLayout::Luma16),
            PixelLayout::Luma16
        );
    }

    #[test]
    fn test_chunks_cover_every_row() {
        let (width, height) = (3, 7);
        let mut buffer = OutputBuffer::for_layout(PixelLayout::Rgba8, width, height);

        {
            let mut chunks = buffer.row_chunks(width, 3);
            assert_eq!(chunks.len(), 3);

            for chunk in &mut chunks {
                for row in 0..chunk.rows() {
                    let value = (chunk.first_row() + row) as f32 / 255.0;
                    chunk.store_row(row, &[[value, value, value, 1.0]; 3]);
                }
            }
        }
        let image = buffer.into_image(width, height).unwrap();

        match image.data() {
            PixelData::U8(data) => {
                for (y, row) in data.chunks_exact(width * 4).enumerate() {
                    assert!(row.chunks_exact(4).all(|px| px == [y as u8, y as u8, y as u8, 255]));
                }
            }
            _ => panic!("expected 8 bit storage")
        }
    }

    #[test]
    fn test_gray_keeps_first_channel() {
        let mut buffer = OutputBuffer::for_layout(PixelLayout::Luma16, 2, 1);
        for mut chunk in buffer.row_chunks(2, 1) {
            chunk.store_row(0, &[[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 1.0, 1.0]]);
        }

        let image = buffer.into_image(2, 1).unwrap();
        assert_eq!(image.data(), &PixelData::U16(vec![u16::MAX, 0]));
    }

    #[test]
    fn test_ycbcr_output_is_full_resolution() {
        let mut buffer =
            OutputBuffer::for_layout(PixelLayout::YCbCr(YCbCrSubsampleRatio::Ratio444), 2, 2);

        for mut chunk in buffer.row_chunks(2, 1) {
            chunk.store_row(0, &[[0.5, 0.5, 0.5, 1.0]; 2]);
        }
        let image = buffer.into_image(2, 2).unwrap();

        assert_eq!(
            image.layout(),
            PixelLayout::YCbCr(YCbCrSubsampleRatio::Ratio444)
        );
        match image.data() {
            PixelData::YCbCr { y, cb, cr, .. } => {
                assert!(y.iter().all(|v| *v == 128));
                assert!(cb.iter().all(|v| *v == 128));
                assert!(cr.iter().all(|v| *v == 128));
            }
            _ => panic!("expected planar storage")
        }
    }
}
