/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Interpolation kernels
//!
//! Every kernel is a radially symmetric weighting function of the
//! distance, in source pixels, between a source sample and the point
//! being reconstructed.
use core::fmt::{Display, Formatter};
use core::str::FromStr;

use resample_core::log::warn;

/// Largest support radius a kernel may have, in source pixels
///
/// Each contribution list visits about `2 * radius * scale` samples,
/// larger radii are clamped to this.
pub const MAX_KERNEL_RADIUS: f32 = 64.0;

/// The resize methods supported
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResizeMethod {
    /// Box filter, picks the closest pixel
    Nearest,
    /// Triangle filter
    Bilinear,
    /// Cubic convolution with `a = -0.5`
    Bicubic,
    /// Mitchell-Netravali, B = C = 1/3
    MitchellNetravali,
    /// Catmull-Rom spline, B = 0, C = 0.5
    CatmullRom,
    /// Cubic B-spline, B = 1, C = 0, smoothest and blurriest
    BSpline,
    /// Hermite, B = 0, C = 0
    Hermite,
    /// Windowed sinc with a radius of 2
    Lanczos2,
    /// Windowed sinc with a radius of 3
    Lanczos3
}

/// All resize methods
pub static ALL_METHODS: [ResizeMethod; 9] = [
    ResizeMethod::Nearest,
    ResizeMethod::Bilinear,
    ResizeMethod::Bicubic,
    ResizeMethod::MitchellNetravali,
    ResizeMethod::CatmullRom,
    ResizeMethod::BSpline,
    ResizeMethod::Hermite,
    ResizeMethod::Lanczos2,
    ResizeMethod::Lanczos3
];

/// A support radius paired with a weighting function
///
/// The weight is zero for every distance at or beyond the radius.
/// Weights may be negative.
#[derive(Copy, Clone, Debug)]
pub struct Kernel {
    radius:   f32,
    function: fn(f32) -> f32
}

impl Kernel {
    /// Create a kernel from a radius and a weighting function
    ///
    /// The function is only ever called with distances smaller
    /// than `radius` in magnitude.
    ///
    /// A radius above [`MAX_KERNEL_RADIUS`], or one that is NaN,
    /// is clamped to [`MAX_KERNEL_RADIUS`].
    pub fn new(radius: f32, function: fn(f32) -> f32) -> Kernel {
        let radius = if radius <= MAX_KERNEL_RADIUS {
            radius
        } else {
            warn!(
                "Kernel radius {} clamped to {}",
                radius, MAX_KERNEL_RADIUS
            );
            MAX_KERNEL_RADIUS
        };
        Kernel { radius, function }
    }

    /// Distance beyond which the weight is zero
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Weight of a sample `distance` pixels away
    #[inline]
    pub fn weight(&self, distance: f32) -> f32 {
        if distance.abs() >= self.radius {
            return 0.0;
        }
        (self.function)(distance)
    }
}

impl ResizeMethod {
    /// The kernel implementing this method
    pub fn kernel(self) -> Kernel {
        match self {
            ResizeMethod::Nearest => Kernel::new(0.5, nearest_kernel),
            ResizeMethod::Bilinear => Kernel::new(1.0, bilinear_kernel),
            ResizeMethod::Bicubic => Kernel::new(2.0, cubic_convolution_kernel),
            ResizeMethod::MitchellNetravali => {
                Kernel::new(2.0, |x| bc_kernel(x, 1.0 / 3.0, 1.0 / 3.0))
            }
            ResizeMethod::CatmullRom => Kernel::new(2.0, |x| bc_kernel(x, 0.0, 0.5)),
            ResizeMethod::BSpline => Kernel::new(2.0, |x| bc_kernel(x, 1.0, 0.0)),
            ResizeMethod::Hermite => Kernel::new(2.0, |x| bc_kernel(x, 0.0, 0.0)),
            ResizeMethod::Lanczos2 => Kernel::new(2.0, lanczos_kernel::<2>),
            ResizeMethod::Lanczos3 => Kernel::new(3.0, lanczos_kernel::<3>)
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ResizeMethod::Nearest => "nearest",
            ResizeMethod::Bilinear => "bilinear",
            ResizeMethod::Bicubic => "bicubic",
            ResizeMethod::MitchellNetravali => "mitchell",
            ResizeMethod::CatmullRom => "catmull-rom",
            ResizeMethod::BSpline => "bspline",
            ResizeMethod::Hermite => "hermite",
            ResizeMethod::Lanczos2 => "lanczos2",
            ResizeMethod::Lanczos3 => "lanczos3"
        }
    }
}

impl Display for ResizeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ResizeMethod {
    type Err = String;

    /// Parse a method name, case insensitive
    ///
    /// ```
    /// use resample::kernels::ResizeMethod;
    /// assert_eq!("Lanczos3".parse::<ResizeMethod>(), Ok(ResizeMethod::Lanczos3));
    /// assert_eq!("mitchell-netravali".parse::<ResizeMethod>(), Ok(ResizeMethod::MitchellNetravali));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s.to_ascii_lowercase().as_str() {
            "nearest" | "nearest-neighbor" | "box" => ResizeMethod::Nearest,
            "bilinear" | "triangle" | "linear" => ResizeMethod::Bilinear,
            "bicubic" | "cubic" => ResizeMethod::Bicubic,
            "mitchell" | "mitchell-netravali" => ResizeMethod::MitchellNetravali,
            "catmull-rom" | "catmullrom" => ResizeMethod::CatmullRom,
            "bspline" | "b-spline" => ResizeMethod::BSpline,
            "hermite" => ResizeMethod::Hermite,
            "lanczos2" => ResizeMethod::Lanczos2,
            "lanczos3" | "lanczos" => ResizeMethod::Lanczos3,
            _ => return Err(format!("Unknown resize method {s}"))
        };
        Ok(method)
    }
}

// ============================================================================
// KERNEL FUNCTIONS
// ============================================================================

/// Box filter, one inside the half pixel around the center
#[inline]
fn nearest_kernel(x: f32) -> f32 {
    if x.abs() < 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Bilinear kernel (triangle function)
#[inline]
fn bilinear_kernel(x: f32) -> f32 {
    let x = x.abs();

    if x < 1.0 {
        1.0 - x
    } else {
        0.0
    }
}

/// Keys cubic convolution
#[inline]
fn cubic_convolution_kernel(x: f32) -> f32 {
    const A: f32 = -0.5;

    let x = x.abs();

    if x <= 1.0 {
        (A + 2.0) * x.powi(3) - (A + 3.0) * x.powi(2) + 1.0
    } else if x < 2.0 {
        A * x.powi(3) - 5.0 * A * x.powi(2) + 8.0 * A * x - 4.0 * A
    } else {
        0.0
    }
}

/// Generalized bicubic kernel (Mitchell-Netravali family)
/// B and C are parameters that control the shape
/// Common presets:
/// - Mitchell: B=1/3, C=1/3 (balanced)
/// - Catmull-Rom: B=0, C=0.5 (sharper)
/// - B-Spline: B=1, C=0 (blurrier, smoothest)
/// - Hermite: B=0, C=0
#[inline]
fn bc_kernel(x: f32, b: f32, c: f32) -> f32 {
    let x = x.abs();

    if x < 1.0 {
        let x2 = x * x;
        let x3 = x2 * x;
        ((12.0 - 9.0 * b - 6.0 * c) * x3 + (-18.0 + 12.0 * b + 6.0 * c) * x2 + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        let x2 = x * x;
        let x3 = x2 * x;
        ((-b - 6.0 * c) * x3
            + (6.0 * b + 30.0 * c) * x2
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// `sin(pi x) / (pi x)`, one at zero
#[inline]
fn sinc(x: f32) -> f32 {
    let x = x.abs();

    if x < 1e-6 {
        return 1.0;
    }
    let pi_x = core::f32::consts::PI * x;
    pi_x.sin() / pi_x
}

/// Lanczos kernel with parameter a
#[inline]
#[allow(clippy::cast_precision_loss)]
fn lanczos_kernel<const A: i32>(x: f32) -> f32 {
    let a = A as f32;

    if x.abs() < a {
        sinc(x) * sinc(x / a)
    } else {
        0.0
    }
}
