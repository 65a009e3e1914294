/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable two pass resampling
//!
//! A resize is carried out as
//!
//! 1. A horizontal pass, every source row is filtered into
//!    `out_width` samples, giving an `out_width * in_height` intermediate.
//! 2. A vertical pass, every output row is filtered from rows of
//!    the intermediate and packed into the output image.
//!
//! Both passes are split into row chunks across workers, the second pass
//! only starts once every worker of the first one has finished.
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use resample_core::log::{debug, error, trace};
use resample_image::image::{Image, PixelLayout};
use resample_image::traits::PixelSource;

use crate::contributions::{ContributionList, ResamplePlan};
use crate::converter::{ColorSample, Converter};
use crate::kernels::ResizeMethod;
use crate::options::ResizeOptions;
use crate::output::OutputBuffer;
use crate::scheduler::RowScheduler;
use crate::transfer::{to_linear, to_srgb};

/// Where a resize call currently is
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ResizeState {
    Validating,
    BuildingPlan,
    ResamplingHorizontal,
    ResamplingVertical,
    BarrierWait,
    Done,
    Rejected
}

fn enter(state: ResizeState) {
    trace!("Resize state: {:?}", state);
}

/// Check a request, returning why it can't be served
fn validate(
    out_width: usize, out_height: usize, source: Option<(usize, usize)>
) -> Result<(usize, usize), &'static str> {
    let (in_width, in_height) = source.ok_or("no source image")?;

    if in_width == 0 || in_height == 0 {
        return Err("source image has no pixels");
    }
    if out_width == 0 || out_height == 0 {
        return Err("target width or height is zero");
    }
    let list = core::mem::size_of::<ContributionList>();
    let sample = core::mem::size_of::<ColorSample>();
    // plan, intermediate, output (RGBA16 is the widest layout) and row buffers
    let allocations = [
        (Some(out_width), list),
        (Some(out_height), list),
        (out_width.checked_mul(in_height), sample),
        (out_width.checked_mul(out_height), 4 * core::mem::size_of::<u16>()),
        (Some(in_width), sample)
    ];

    if !allocations
        .iter()
        .all(|(count, size)| fits_allocation(*count, *size))
    {
        return Err("target dimensions too large");
    }

    Ok((in_width, in_height))
}

/// Whether `count` items of `size` bytes can be allocated at once
fn fits_allocation(count: Option<usize>, size: usize) -> bool {
    count
        .and_then(|count| count.checked_mul(size))
        .is_some_and(|bytes| bytes <= isize::MAX as usize)
}

/// Resize an image
///
/// Uses [`ResizeOptions::default`] with `method` as the kernel.
///
/// # Arguments
/// - width: The new width
/// - height: The new height
/// - source: The image to resize
/// - method: The interpolation kernel
///
/// # Returns
/// - `None` if `source` is absent or empty, or if `width` or `height` is zero.
/// - Otherwise an image of exactly `width` by `height` pixels,
///   see [`resize_with_options`] for its layout.
///
/// # Example
/// ```
/// use resample::kernels::ResizeMethod;
/// use resample::resize;
/// use resample::resample_image::image::Image;
///
/// let image = Image::from_rgba8(vec![200; 40 * 30 * 4], 40, 30).unwrap();
/// let small = resize(10, 8, Some(&image), ResizeMethod::Bicubic).unwrap();
///
/// assert_eq!(small.dimensions(), (10, 8));
/// ```
pub fn resize(
    width: usize, height: usize, source: Option<&Image>, method: ResizeMethod
) -> Option<Image> {
    let options = ResizeOptions::default().set_method(method);

    resize_with_options(width, height, source, &options)
}

/// Resize an image with explicit options
///
/// The output keeps the source layout where one exists
///
/// | source              | output              |
/// |---------------------|---------------------|
/// | RGBA 8 / 16 bit     | same                |
/// | Luma 8 / 16 bit     | same                |
/// | YCbCr, any ratio    | YCbCr 4:4:4         |
/// | other 8 bit         | RGBA 8 bit          |
/// | other 16 bit        | RGBA 16 bit         |
///
/// Luma/chroma goes through 8 bit RGB and back, so triples outside
/// the RGB gamut come back as the closest in gamut color, even when
/// the size does not change.
///
/// Returns `None` under the same conditions as [`resize`], no
/// partially resized image is ever returned.
pub fn resize_with_options(
    width: usize, height: usize, source: Option<&Image>, options: &ResizeOptions
) -> Option<Image> {
    enter(ResizeState::Validating);

    let image = match validate(width, height, source.map(Image::dimensions)) {
        Ok(_) => source?,
        Err(reason) => {
            trace!("Rejecting resize to {}x{}: {}", width, height, reason);
            enter(ResizeState::Rejected);
            return None;
        }
    };
    let converter = Converter::new(image);
    let layout = OutputBuffer::layout_for(image.layout());

    run(width, height, converter, layout, options)
}

/// Resize anything that can be read pixel by pixel
///
/// This always goes through [`PixelSource::pixel_rgba16`] and
/// always produces 16 bit RGBA.
///
/// Returns `None` if the source is empty or if `width` or `height` is zero.
pub fn resize_source(
    width: usize, height: usize, source: &dyn PixelSource, options: &ResizeOptions
) -> Option<Image> {
    enter(ResizeState::Validating);

    if let Err(reason) = validate(width, height, Some(source.dimensions())) {
        trace!("Rejecting resize to {}x{}: {}", width, height, reason);
        enter(ResizeState::Rejected);
        return None;
    }

    run(
        width,
        height,
        Converter::generic(source),
        PixelLayout::Rgba16,
        options
    )
}

/// Run both passes for a validated request
fn run(
    out_width: usize, out_height: usize, converter: Converter, layout: PixelLayout,
    options: &ResizeOptions
) -> Option<Image> {
    let (in_width, in_height) = converter.dimensions();
    let linear = options.get_linear_light();
    let scheduler = RowScheduler::new(options.get_threads());

    trace!(
        "Resizing {}x{} to {}x{} with the {} reader",
        in_width,
        in_height,
        out_width,
        out_height,
        converter.name()
    );
    debug!("Each pass runs on up to {} workers", scheduler.threads());
    enter(ResizeState::BuildingPlan);

    let kernel = options.get_kernel();
    let plan = ResamplePlan::new(in_width, in_height, out_width, out_height, &kernel);

    trace!(
        "Plan: {} horizontal lists, {} vertical lists, support {}",
        plan.horizontal.len(),
        plan.vertical.len(),
        kernel.radius()
    );

    enter(ResizeState::ResamplingHorizontal);

    let mut intermediate = vec![[0.0_f32; 4]; out_width * in_height];
    let rows_per = scheduler.rows_per_worker(in_height);

    scheduler.run(
        intermediate.chunks_mut(out_width * rows_per).enumerate(),
        |(index, chunk)| {
            let mut source_row = vec![[0.0_f32; 4]; in_width];
            let first_row = index * rows_per;

            for (offset, out_row) in chunk.chunks_exact_mut(out_width).enumerate() {
                let y = (first_row + offset) as isize;

                for (x, sample) in source_row.iter_mut().enumerate() {
                    let value = converter.sample(x as isize, y);
                    *sample = if linear { to_linear(value) } else { value };
                }
                horizontal_row(&source_row, out_row, &plan);
            }
        }
    );
    enter(ResizeState::BarrierWait);
    enter(ResizeState::ResamplingVertical);

    let mut output = OutputBuffer::for_layout(layout, out_width, out_height);
    let rows_per = scheduler.rows_per_worker(out_height);

    scheduler.run(output.row_chunks(out_width, rows_per), |mut chunk| {
        let mut out_row = vec![[0.0_f32; 4]; out_width];

        for row in 0..chunk.rows() {
            let oy = chunk.first_row() + row;

            vertical_row(&intermediate, &mut out_row, oy, &plan);

            if linear {
                out_row.iter_mut().for_each(|s| *s = to_srgb(*s));
            }
            chunk.store_row(row, &out_row);
        }
    });
    enter(ResizeState::BarrierWait);

    match output.into_image(out_width, out_height) {
        Ok(image) => {
            enter(ResizeState::Done);
            Some(image)
        }
        Err(e) => {
            error!("Could not assemble resized image: {}", e);
            enter(ResizeState::Rejected);
            None
        }
    }
}

/// Filter one source row into `out.len()` samples
#[inline]
fn horizontal_row(source_row: &[ColorSample], out: &mut [ColorSample], plan: &ResamplePlan) {
    for (out_px, list) in out.iter_mut().zip(&plan.horizontal) {
        let mut acc = [0.0_f32; 4];
        let start = list.start();

        for (px, weight) in source_row[start..start + list.len()]
            .iter()
            .zip(list.weights())
        {
            for (a, p) in acc.iter_mut().zip(px) {
                *a += weight * p;
            }
        }
        *out_px = acc;
    }
}

/// Filter output row `oy` from rows of the intermediate buffer
#[inline]
fn vertical_row(
    intermediate: &[ColorSample], out: &mut [ColorSample], oy: usize, plan: &ResamplePlan
) {
    let width = out.len();
    let list = &plan.vertical[oy];

    out.fill([0.0; 4]);

    for (y, weight) in list.entries() {
        let row = &intermediate[y * width..(y + 1) * width];

        for (acc, px) in out.iter_mut().zip(row) {
            for (a, p) in acc.iter_mut().zip(px) {
                *a += weight * p;
            }
        }
    }
}

/// Resize an image
///
/// This is the operation form of [`resize_with_options`],
/// built once and applied to as many images as needed.
///
/// # Example
/// ```
/// use resample::kernels::ResizeMethod;
/// use resample::Resize;
/// use resample::resample_image::image::Image;
///
/// let image = Image::from_luma8(vec![10; 64 * 64], 64, 64).unwrap();
/// let thumb = Resize::new(16, 16, ResizeMethod::Lanczos3)
///     .execute(&image)
///     .unwrap();
///
/// assert_eq!(thumb.dimensions(), (16, 16));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Resize {
    new_width:  usize,
    new_height: usize,
    options:    ResizeOptions
}

impl Resize {
    /// Create a new resize operation
    ///
    /// # Arguments
    /// - new_width: The new image width
    /// - new_height: The new image height
    /// - method: The interpolation kernel
    #[must_use]
    pub fn new(new_width: usize, new_height: usize, method: ResizeMethod) -> Resize {
        Resize {
            new_width,
            new_height,
            options: ResizeOptions::default().set_method(method)
        }
    }

    /// Create a new resize operation with explicit options
    #[must_use]
    pub fn with_options(new_width: usize, new_height: usize, options: ResizeOptions) -> Resize {
        Resize {
            new_width,
            new_height,
            options
        }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.new_width, self.new_height)
    }

    pub const fn options(&self) -> &ResizeOptions {
        &self.options
    }

    /// Resize `image`, see [`resize_with_options`]
    pub fn execute(&self, image: &Image) -> Option<Image> {
        resize_with_options(self.new_width, self.new_height, Some(image), &self.options)
    }
}

#[cfg(test)]
mod tests {
    use resample_image::image::{Image, PixelData};

    use crate::kernels::ResizeMethod;
    use crate::options::ResizeOptions;
    use crate::resize::{resize, resize_with_options, validate};

    #[test]
    fn test_validate() {
        assert!(validate(10, 10, None).is_err());
        assert!(validate(10, 10, Some((0, 5))).is_err());
        assert!(validate(0, 10, Some((5, 5))).is_err());
        assert!(validate(10, 0, Some((5, 5))).is_err());
        assert!(validate(usize::MAX, 2, Some((5, 5))).is_err());

        let huge = 1_usize << (usize::BITS - 6);
        assert!(validate(huge, 1, Some((2, 2))).is_err());
        assert!(validate(1, huge, Some((2, 2))).is_err());
        assert!(validate(huge, 1, Some((1, 1))).is_err());
        assert!(validate(2, 2, Some((huge << 3, 1))).is_err());
        assert_eq!(validate(1, 1, Some((5, 6))), Ok((5, 6)));
    }

    #[test]
    fn test_identity_is_lossless() {
        let pixels: Vec<u8> = (0..=255).cycle().take(13 * 7 * 4).collect();
        let image = Image::from_rgba8(pixels, 13, 7).unwrap();

        for method in [ResizeMethod::Nearest, ResizeMethod::Bilinear, ResizeMethod::Lanczos3] {
            let out = resize(13, 7, Some(&image), method).unwrap();
            assert_eq!(out, image, "{method} changed pixels");
        }
    }

    #[test]
    fn test_single_pixel_source() {
        let image = Image::from_luma16(vec![4000], 1, 1).unwrap();
        let out = resize(5, 3, Some(&image), ResizeMethod::Lanczos2).unwrap();

        assert_eq!(out.data(), &PixelData::U16(vec![4000; 15]));
    }

    #[test]
    fn test_nearest_halving_picks_samples() {
        // the stretched box covers two samples per output pixel
        let image = Image::from_luma8(vec![0, 0, 255, 255], 4, 1).unwrap();
        let options = ResizeOptions::new()
            .set_method(ResizeMethod::Nearest)
            .set_threads(1);
        let out = resize_with_options(2, 1, Some(&image), &options).unwrap();

        assert_eq!(out.data(), &PixelData::U8(vec![0, 255]));
    }
}
