// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers shared by the evaluator and the tracker.

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("spuro requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn sqrt(self) -> Self => sqrt;
}

/// Clamp a curve parameter into the unit interval.
///
/// NaN maps to `0.0`, so a bad parameter evaluates at the start of the curve.
#[inline]
#[expect(
    clippy::manual_clamp,
    reason = "`clamp` propagates NaN, chained `max` and `min` map it to 0"
)]
pub(crate) fn clamp_unit(t: f64) -> f64 {
    t.max(0.).min(1.)
}

/// The uniformly spaced parameter of sample `i` out of `resolution` steps.
///
/// A resolution of zero has a single sample at the start of the curve.
#[inline]
pub(crate) fn sample_param(i: usize, resolution: usize) -> f64 {
    if resolution == 0 {
        0.0
    } else if i >= resolution {
        1.0
    } else {
        i as f64 / resolution as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_unit, sample_param};

    #[test]
    fn clamp_unit_handles_nan() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(-3.0), 0.0);
        assert_eq!(clamp_unit(7.0), 1.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }

    #[test]
    fn sample_param_endpoints() {
        assert_eq!(sample_param(0, 0), 0.0);
        assert_eq!(sample_param(0, 200), 0.0);
        assert_eq!(sample_param(200, 200), 1.0);
        assert_eq!(sample_param(100, 200), 0.5);
    }
}
