// Coordinate scalar, picked by the `f64` or `f32` feature.
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Distance within which a vertex counts as lying on a plane. Set once, on
/// first use of [`tolerance`] or by [`set_tolerance`].
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-5
    }
    #[cfg(feature = "f64")]
    {
        1e-10
    }
}

/// Plane sidedness tolerance used by [`crate::Plane::side`] and the plane
/// selection predicates.
///
/// A `MESHCORE_TOLERANCE` value present at compile time wins over the
/// precision default. Never smaller than `Real::EPSILON`.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("MESHCORE_TOLERANCE")
            .and_then(|value| Real::from_str(value).ok())
            .map_or_else(default_tolerance, |value| value.max(Real::EPSILON))
    })
}

/// Fix the plane tolerance. Only the first call before any plane test has
/// an effect; returns whether this call set it.
pub fn set_tolerance(value: Real) -> bool {
    TOLERANCE_CELL.set(value.max(Real::EPSILON)).is_ok()
}
