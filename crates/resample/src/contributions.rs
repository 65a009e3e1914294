/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Precomputed convolution weights
//!
//! For every output coordinate along an axis this finds the source
//! samples under the kernel and how much each one contributes.
//! It is pure geometry, no pixel is ever read here, so a table is
//! built once per resize and shared by all workers.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use crate::converter::replicate_border;
use crate::kernels::Kernel;

/// Normalized weights of one output coordinate
///
/// Source indices are clamped into the source and duplicates merged,
/// which leaves them contiguous, so the list is stored as the first
/// index followed by one weight per consecutive index.
///
/// Weights sum to one.
#[derive(Clone, Debug, PartialEq)]
pub struct ContributionList {
    start:   usize,
    weights: Vec<f32>
}

impl ContributionList {
    /// First source index
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One weight per source index starting at [`start`](Self::start)
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Iterate over `(source index, weight)` pairs
    pub fn entries(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        (self.start..).zip(self.weights.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Contribution lists for both axes of a resize
#[derive(Clone, Debug)]
pub struct ResamplePlan {
    /// One list per output column
    pub horizontal: Vec<ContributionList>,
    /// One list per output row
    pub vertical:   Vec<ContributionList>
}

impl ResamplePlan {
    pub fn new(
        in_width: usize, in_height: usize, out_width: usize, out_height: usize, kernel: &Kernel
    ) -> ResamplePlan {
        ResamplePlan {
            horizontal: precompute_contributions(in_width, out_width, kernel),
            vertical:   precompute_contributions(in_height, out_height, kernel)
        }
    }
}

/// Build the contribution list of every output coordinate of an axis
/// going from `in_size` to `out_size` samples
///
/// When shrinking, the kernel is stretched by `in_size / out_size`
/// so every source sample lands under some kernel.
///
/// # Panics
/// If `in_size` is zero
pub fn precompute_contributions(
    in_size: usize, out_size: usize, kernel: &Kernel
) -> Vec<ContributionList> {
    assert!(in_size > 0, "Cannot resample an empty axis");

    let ratio = in_size as f64 / out_size as f64;
    let scale = ratio.max(1.0);
    let support = f64::from(kernel.radius()) * scale;

    let mut lists = Vec::with_capacity(out_size);
    let mut raw_weights: Vec<f64> = Vec::new();

    for out_pos in 0..out_size {
        let center = (out_pos as f64 + 0.5) * ratio - 0.5;

        let first = (center - support).floor() as isize;
        let last = (center + support).ceil() as isize;

        raw_weights.clear();
        let mut start = None;

        for i in first..=last {
            let distance = i as f64 - center;

            if distance.abs() >= support {
                continue;
            }
            let weight = f64::from(kernel.weight((distance / scale) as f32));
            let index = replicate_border(i, in_size);

            match start {
                // clamped indices never decrease, a repeat can only be the last one
                Some(s) if index < s + raw_weights.len() => {
                    if let Some(last) = raw_weights.last_mut() {
                        *last += weight;
                    }
                }
                Some(_) => raw_weights.push(weight),
                None => {
                    start = Some(index);
                    raw_weights.push(weight);
                }
            }
        }
        let sum: f64 = raw_weights.iter().sum();

        let list = match start {
            Some(start) if sum.abs() > f64::EPSILON => ContributionList {
                start,
                weights: raw_weights.iter().map(|w| (w / sum) as f32).collect()
            },
            // nothing under the kernel, use the closest sample
            _ => ContributionList {
                start:   replicate_border(center.round() as isize, in_size),
                weights: vec![1.0]
            }
        };
        lists.push(list);
    }
    lists
}
