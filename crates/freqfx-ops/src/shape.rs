//! Filter shape generation.
//!
//! Produces the three primitive weighting surfaces every filter family is
//! built from, each in ideal, Gaussian or Butterworth rolloff:
//!
//! - [`Geometry::Radial`] - lowpass around one center
//! - [`Geometry::Ring`] - band reject around a ring of radius `C0`
//! - [`Geometry::Notch`] - notch reject at a symmetric pair `±offset`
//!
//! All surfaces are laid out in centered spectral coordinates: index
//! `(rows / 2, cols / 2)` is zero frequency and [`Center`] values are offsets
//! from that origin.
//!
//! # Formulas
//!
//! With `R` the radius, `n` the Butterworth order, `W` the ring bandwidth:
//!
//! - Radial: ideal `1` if `D <= R`, Gaussian `exp(-0.5 (D/R)^2)`,
//!   Butterworth `1 / (1 + (D/R)^(2n))`
//! - Ring: ideal `0` if `R-W/2 <= D <= R+W/2`,
//!   Gaussian `1 - exp(-((D²-R²)/(D W))^2)`,
//!   Butterworth `1 / (1 + (D W/(D²-R²))^(2n))`
//! - Notch: ideal `0` if `D1 <= R or D2 <= R`,
//!   Gaussian `1 - exp(-0.5 D1 D2 / R²)`, Butterworth `1 / (1 + (R²/(D1 D2))^n)`
//!
//! Points where a formula divides by zero take the value of its limit:
//! ring Gaussian at `D = 0` is 1, ring Butterworth at `D = R` is 0 and notch
//! Butterworth at either notch center is 0.
//!
//! On an even axis index 0 is both `-n/2` and `+n/2`. Distances from that
//! line are measured to whichever alias is closer, which keeps
//! `H(k) == H(-k)` on the whole grid and lets a center sit at `+n/2`.
//!
//! # Example
//!
//! ```rust
//! use freqfx_ops::shape::{generate_shape, Center, Geometry, Shape};
//!
//! let h = generate_shape(64, 64, &Geometry::radial(Center::ORIGIN), 8.0, Shape::Ideal).unwrap();
//! assert_eq!(h.get(32, 32), 1.0);
//! assert_eq!(h.get(32, 41), 0.0);
//! ```

use crate::{FilterError, FilterResult};
use freqfx_core::TransferFunction;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use tracing::{debug, trace};

/// Offset from the zero-frequency origin, in frequency bins.
///
/// `u` runs along rows, `v` along columns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Center {
    /// Row offset
    pub u: f64,
    /// Column offset
    pub v: f64,
}

impl Center {
    /// The zero-frequency origin.
    pub const ORIGIN: Center = Center { u: 0.0, v: 0.0 };

    /// Creates an offset from the origin.
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Converts an absolute spectrum index into an origin offset.
    ///
    /// ```rust
    /// use freqfx_ops::shape::Center;
    ///
    /// assert_eq!(Center::absolute(64, 64, 32, 32), Center::ORIGIN);
    /// assert_eq!(Center::absolute(64, 64, 42, 22), Center::new(10.0, -10.0));
    /// ```
    pub fn absolute(rows: usize, cols: usize, u: usize, v: usize) -> Self {
        Self {
            u: u as f64 - (rows / 2) as f64,
            v: v as f64 - (cols / 2) as f64,
        }
    }

    /// Mirror image through the origin.
    pub fn mirrored(&self) -> Self {
        Self {
            u: -self.u,
            v: -self.v,
        }
    }

    /// Distance from this center to grid index (u, v), taking the nearer
    /// alias of a Nyquist line.
    fn distance(&self, grid: &Grid, u: usize, v: usize) -> f64 {
        let mut best = f64::INFINITY;
        for ku in axis_offsets(u, grid.rows) {
            for kv in axis_offsets(v, grid.cols) {
                let du = ku - self.u;
                let dv = kv - self.v;
                best = best.min((du * du + dv * dv).sqrt());
            }
        }
        best
    }

    fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }
}

/// Rolloff family of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Hard step at the cutoff.
    Ideal,
    /// Smooth exponential rolloff.
    Gaussian,
    /// Rational rolloff, steeper with larger `order`.
    Butterworth {
        /// Transition steepness, must be > 0
        order: f64,
    },
}

impl Shape {
    /// Butterworth order, if any.
    pub fn order(&self) -> Option<f64> {
        match self {
            Self::Butterworth { order } => Some(*order),
            _ => None,
        }
    }

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Gaussian => "gaussian",
            Self::Butterworth { .. } => "butterworth",
        }
    }

    fn validate(&self) -> FilterResult<()> {
        match self {
            Self::Butterworth { order } if !(order.is_finite() && *order > 0.0) => {
                Err(FilterError::InvalidParameter(format!(
                    "butterworth order must be > 0, got {order}"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Butterworth { order } => write!(f, "butterworth(n={order})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Where a primitive surface is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Single center; produces a lowpass surface.
    Radial {
        /// Filter center
        center: Center,
    },
    /// Ring of radius `C0` (the generator's radius) around a center;
    /// produces a band-reject surface.
    Ring {
        /// Ring center
        center: Center,
        /// Ring width, must be > 0
        bandwidth: f64,
    },
    /// Symmetric pair `±offset`; produces a notch-reject surface.
    Notch {
        /// Offset of one notch; the other sits at `-offset`
        offset: Center,
    },
}

impl Geometry {
    /// Radial geometry around `center`.
    pub const fn radial(center: Center) -> Self {
        Self::Radial { center }
    }

    /// Ring geometry around `center` with the given bandwidth.
    pub const fn ring(center: Center, bandwidth: f64) -> Self {
        Self::Ring { center, bandwidth }
    }

    /// Notch pair at `±offset`.
    pub const fn notch(offset: Center) -> Self {
        Self::Notch { offset }
    }
}

/// Spectrum extent used for validation and distances.
struct Grid {
    rows: usize,
    cols: usize,
}

/// Centered coordinates of index `i` on an axis of length `n`.
///
/// Index 0 of an even axis is the Nyquist bin and stands for both `-n/2`
/// and `+n/2`; every other index has a single coordinate.
fn axis_offsets(i: usize, n: usize) -> [f64; 2] {
    let k = i as f64 - (n / 2) as f64;
    if i == 0 && n % 2 == 0 { [k, -k] } else { [k, k] }
}

/// Whether `offset` names a bin on an axis of length `n`.
///
/// Valid offsets run from `-n/2` to the last index, plus `+n/2` on even
/// axes where it aliases the Nyquist bin.
fn axis_contains(offset: f64, n: usize) -> bool {
    let lo = -((n / 2) as f64);
    let hi = if n % 2 == 0 { (n / 2) as f64 } else { ((n - 1) / 2) as f64 };
    (lo..=hi).contains(&offset)
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Checks that `center` lands on the grid.
    fn contains(&self, center: &Center) -> bool {
        axis_contains(center.u, self.rows) && axis_contains(center.v, self.cols)
    }

    fn require(&self, center: &Center, what: &str) -> FilterResult<()> {
        if !center.is_finite() || !self.contains(center) {
            return Err(FilterError::InvalidParameter(format!(
                "{what} ({}, {}) lies outside the {}x{} spectrum",
                center.u, center.v, self.rows, self.cols
            )));
        }
        Ok(())
    }
}

fn require_positive(value: f64, what: &str) -> FilterResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "{what} must be > 0, got {value}"
        )));
    }
    Ok(())
}

/// Generates a primitive filter surface of shape `rows × cols`.
///
/// # Arguments
///
/// * `rows`, `cols` - Spectrum size (same as one image band)
/// * `geometry` - Radial, ring or notch anchoring
/// * `radius` - Cutoff radius (ring radius `C0` for [`Geometry::Ring`])
/// * `shape` - Rolloff family
///
/// # Errors
///
/// - [`FilterError::InvalidDimensions`] if either axis is zero
/// - [`FilterError::InvalidParameter`] for a non-positive radius, bandwidth
///   or order, or a center that lies off the grid
pub fn generate_shape(
    rows: usize,
    cols: usize,
    geometry: &Geometry,
    radius: f64,
    shape: Shape,
) -> FilterResult<TransferFunction> {
    if rows == 0 || cols == 0 {
        return Err(FilterError::InvalidDimensions(format!(
            "filter must be at least 1x1, got {rows}x{cols}"
        )));
    }
    require_positive(radius, "radius")?;
    shape.validate()?;

    let grid = Grid::new(rows, cols);
    let degenerate = Cell::new(0usize);

    trace!(rows, cols, radius, shape = %shape, ?geometry, "generate_shape");

    let h = match *geometry {
        Geometry::Radial { center } => {
            grid.require(&center, "center")?;
            TransferFunction::from_fn(rows, cols, |u, v| {
                radial_weight(center.distance(&grid, u, v), radius, shape)
            })?
        }
        Geometry::Ring { center, bandwidth } => {
            grid.require(&center, "center")?;
            require_positive(bandwidth, "bandwidth")?;
            TransferFunction::from_fn(rows, cols, |u, v| {
                ring_weight(center.distance(&grid, u, v), radius, bandwidth, shape, &degenerate)
            })?
        }
        Geometry::Notch { offset } => {
            let mirror = offset.mirrored();
            grid.require(&offset, "notch center")?;
            grid.require(&mirror, "mirrored notch center")?;
            TransferFunction::from_fn(rows, cols, |u, v| {
                let d1 = offset.distance(&grid, u, v);
                let d2 = mirror.distance(&grid, u, v);
                notch_weight(d1, d2, radius, shape, &degenerate)
            })?
        }
    };

    if degenerate.get() > 0 {
        trace!(points = degenerate.get(), "zero-distance points resolved to limit value");
    }
    debug!(rows, cols, shape = %shape, "Generated filter shape");

    Ok(h)
}

/// Lowpass weight at distance `d` from the center.
fn radial_weight(d: f64, radius: f64, shape: Shape) -> f64 {
    match shape {
        Shape::Ideal => {
            if d <= radius {
                1.0
            } else {
                0.0
            }
        }
        Shape::Gaussian => {
            let x = d / radius;
            (-0.5 * x * x).exp()
        }
        Shape::Butterworth { order } => 1.0 / (1.0 + (d / radius).powf(2.0 * order)),
    }
}

/// Band-reject weight at distance `d` from the ring center.
fn ring_weight(d: f64, c0: f64, width: f64, shape: Shape, degenerate: &Cell<usize>) -> f64 {
    match shape {
        Shape::Ideal => {
            if d >= c0 - width / 2.0 && d <= c0 + width / 2.0 {
                0.0
            } else {
                1.0
            }
        }
        Shape::Gaussian => {
            if d == 0.0 {
                degenerate.set(degenerate.get() + 1);
                return 1.0;
            }
            let x = (d * d - c0 * c0) / (d * width);
            1.0 - (-(x * x)).exp()
        }
        Shape::Butterworth { order } => {
            let denom = d * d - c0 * c0;
            if denom == 0.0 {
                degenerate.set(degenerate.get() + 1);
                return 0.0;
            }
            let x = (d * width / denom).abs();
            1.0 / (1.0 + x.powf(2.0 * order))
        }
    }
}

/// Notch-reject weight given distances to both notch centers.
fn notch_weight(d1: f64, d2: f64, radius: f64, shape: Shape, degenerate: &Cell<usize>) -> f64 {
    match shape {
        Shape::Ideal => {
            if d1 <= radius || d2 <= radius {
                0.0
            } else {
                1.0
            }
        }
        Shape::Gaussian => 1.0 - (-0.5 * (d1 * d2) / (radius * radius)).exp(),
        Shape::Butterworth { order } => {
            let product = d1 * d2;
            if product == 0.0 {
                degenerate.set(degenerate.get() + 1);
                return 0.0;
            }
            1.0 / (1.0 + (radius * radius / product).powf(order))
        }
    }
}
