//! Filter family composition.
//!
//! Six filter kinds come in three pass/reject pairs. Only one member of each
//! pair is ever computed from a formula (the *primitive*); its partner is
//! always `1 - primitive`:
//!
//! | Primitive     | Complement  |
//! |---------------|-------------|
//! | `Lowpass`     | `Highpass`  |
//! | `Bandreject`  | `Bandpass`  |
//! | `Notchreject` | `Notchpass` |
//!
//! so `pass + reject == 1` holds at every coordinate by construction.
//!
//! # Example
//!
//! ```rust
//! use freqfx_ops::compose::{compose_filter, FilterDescriptor};
//! use freqfx_ops::shape::Shape;
//!
//! let low = FilterDescriptor::lowpass(16.0, Shape::Gaussian);
//! let low = compose_filter(&low, 128, 128).unwrap();
//! let high = compose_filter(&FilterDescriptor::highpass(16.0, Shape::Gaussian), 128, 128)
//!     .unwrap();
//! assert_eq!(low.get(64, 64) + high.get(64, 64), 1.0);
//! ```

use crate::shape::{generate_shape, Center, Geometry, Shape};
use crate::{FilterError, FilterResult};
use freqfx_core::{dimensions, Image, TransferFunction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The six named filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Passes frequencies within the radius of the center.
    Lowpass,
    /// Complement of [`FilterKind::Lowpass`].
    Highpass,
    /// Complement of [`FilterKind::Bandreject`].
    Bandpass,
    /// Rejects a ring of frequencies.
    Bandreject,
    /// Complement of [`FilterKind::Notchreject`].
    Notchpass,
    /// Rejects a symmetric pair of frequencies.
    Notchreject,
}

impl FilterKind {
    /// All kinds, primitives first within each pair.
    pub const ALL: [FilterKind; 6] = [
        Self::Lowpass,
        Self::Highpass,
        Self::Bandreject,
        Self::Bandpass,
        Self::Notchreject,
        Self::Notchpass,
    ];

    /// The other member of this kind's pass/reject pair.
    pub const fn complement(&self) -> Self {
        match self {
            Self::Lowpass => Self::Highpass,
            Self::Highpass => Self::Lowpass,
            Self::Bandpass => Self::Bandreject,
            Self::Bandreject => Self::Bandpass,
            Self::Notchpass => Self::Notchreject,
            Self::Notchreject => Self::Notchpass,
        }
    }

    /// Whether this kind is computed directly by the shape generator.
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Lowpass | Self::Bandreject | Self::Notchreject)
    }

    /// The computed member of this kind's pair.
    pub const fn primitive(&self) -> Self {
        if self.is_primitive() { *self } else { self.complement() }
    }

    /// Whether this kind needs a bandwidth.
    pub const fn is_band(&self) -> bool {
        matches!(self, Self::Bandpass | Self::Bandreject)
    }

    /// Whether this kind targets a symmetric notch pair.
    pub const fn is_notch(&self) -> bool {
        matches!(self, Self::Notchpass | Self::Notchreject)
    }

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lowpass => "lowpass",
            Self::Highpass => "highpass",
            Self::Bandpass => "bandpass",
            Self::Bandreject => "bandreject",
            Self::Notchpass => "notchpass",
            Self::Notchreject => "notchreject",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete description of a filter, independent of image size.
///
/// For notch kinds `center` is the notch offset; the second notch sits at
/// `-center`. For the other kinds it is the filter center, usually
/// [`Center::ORIGIN`]. For band kinds `radius` is the ring radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Filter kind
    pub kind: FilterKind,
    /// Rolloff family
    pub shape: Shape,
    /// Center (or notch offset) relative to the zero-frequency origin
    #[serde(default)]
    pub center: Center,
    /// Cutoff radius, ring radius or notch radius
    pub radius: f64,
    /// Ring width (band kinds only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<f64>,
}

impl FilterDescriptor {
    fn new(
        kind: FilterKind,
        center: Center,
        radius: f64,
        bandwidth: Option<f64>,
        shape: Shape,
    ) -> Self {
        Self {
            kind,
            shape,
            center,
            radius,
            bandwidth,
        }
    }

    /// Lowpass with the given cutoff, centered on zero frequency.
    pub fn lowpass(cutoff: f64, shape: Shape) -> Self {
        Self::new(FilterKind::Lowpass, Center::ORIGIN, cutoff, None, shape)
    }

    /// Highpass with the given cutoff, centered on zero frequency.
    pub fn highpass(cutoff: f64, shape: Shape) -> Self {
        Self::new(FilterKind::Highpass, Center::ORIGIN, cutoff, None, shape)
    }

    /// Bandpass around the ring of radius `radial_center`.
    pub fn bandpass(radial_center: f64, bandwidth: f64, shape: Shape) -> Self {
        Self::new(FilterKind::Bandpass, Center::ORIGIN, radial_center, Some(bandwidth), shape)
    }

    /// Bandreject around the ring of radius `radial_center`.
    pub fn bandreject(radial_center: f64, bandwidth: f64, shape: Shape) -> Self {
        Self::new(FilterKind::Bandreject, Center::ORIGIN, radial_center, Some(bandwidth), shape)
    }

    /// Notch pass at `±offset`.
    pub fn notchpass(offset: Center, radius: f64, shape: Shape) -> Self {
        Self::new(FilterKind::Notchpass, offset, radius, None, shape)
    }

    /// Notch reject at `±offset`.
    pub fn notchreject(offset: Center, radius: f64, shape: Shape) -> Self {
        Self::new(FilterKind::Notchreject, offset, radius, None, shape)
    }

    /// Returns a copy with a different center.
    pub fn with_center(self, center: Center) -> Self {
        Self { center, ..self }
    }

    /// Descriptor of the complementary kind with the same parameters.
    pub fn complement(self) -> Self {
        Self {
            kind: self.kind.complement(),
            ..self
        }
    }

    /// Geometry of this descriptor's primitive surface.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidParameter`] if a band kind has no bandwidth or
    /// a non-band kind has one.
    pub fn geometry(&self) -> FilterResult<Geometry> {
        match (self.kind.is_band(), self.bandwidth) {
            (true, None) => {
                return Err(FilterError::InvalidParameter(format!(
                    "{} filter requires a bandwidth",
                    self.kind
                )));
            }
            (false, Some(_)) => {
                return Err(FilterError::InvalidParameter(format!(
                    "bandwidth only applies to band filters, not {}",
                    self.kind
                )));
            }
            _ => {}
        }
        Ok(match self.kind.primitive() {
            FilterKind::Bandreject => {
                Geometry::ring(self.center, self.bandwidth.unwrap_or_default())
            }
            FilterKind::Notchreject => Geometry::notch(self.center),
            _ => Geometry::radial(self.center),
        })
    }
}

/// Returns `1 - H`.
#[inline]
pub fn complement(h: &TransferFunction) -> TransferFunction {
    h.complement()
}

/// Builds the transfer function described by `descriptor` for a
/// `rows × cols` spectrum.
///
/// Primitive kinds come straight from [`generate_shape`]; their partners
/// are the complement of the same primitive.
pub fn compose_filter(
    descriptor: &FilterDescriptor,
    rows: usize,
    cols: usize,
) -> FilterResult<TransferFunction> {
    let geometry = descriptor.geometry()?;
    let primitive = generate_shape(rows, cols, &geometry, descriptor.radius, descriptor.shape)?;

    debug!(
        kind = %descriptor.kind,
        shape = %descriptor.shape,
        rows,
        cols,
        "Composed filter"
    );

    if descriptor.kind.is_primitive() {
        Ok(primitive)
    } else {
        Ok(complement(&primitive))
    }
}

/// Builds a filter sized to match one band of `image`.
pub fn compose_for(image: &Image, descriptor: &FilterDescriptor) -> FilterResult<TransferFunction> {
    let dims = dimensions(image);
    compose_filter(descriptor, dims.rows, dims.cols)
}
