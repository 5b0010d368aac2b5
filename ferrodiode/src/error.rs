// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error types for the library
//!
//! Errors fall into three families: invalid inputs (`ConfigurationError`), failures of the
//! numerics on valid inputs (`NumericalError`) and out-of-range position queries
//! (`LookupError`). None of them are recovered from inside the crate.

use miette::Diagnostic;
use nalgebra::RealField;

/// The property of a material requested from an info desk
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaterialProperty {
    /// Work function in eV
    WorkFunction,
    /// Electron affinity in eV
    ElectronAffinity,
    /// Static dielectric constant
    DielectricConstant,
}

impl std::fmt::Display for MaterialProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MaterialProperty::WorkFunction => write!(f, "work function"),
            MaterialProperty::ElectronAffinity => write!(f, "electron affinity"),
            MaterialProperty::DielectricConstant => write!(f, "dielectric constant"),
        }
    }
}

#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq)]
/// Invalid geometry, parameters or material references
pub enum ConfigurationError {
    /// A layer was given a negative thickness
    #[error("layer {layer} has negative thickness {thickness} m")]
    #[diagnostic(code(ferrodiode::configuration::thickness))]
    NegativeThickness {
        /// Name of the offending layer
        layer: String,
        /// The thickness supplied
        thickness: f64,
    },
    /// A parameter which must be strictly positive was not
    #[error("{quantity} must be positive, found {value}")]
    #[diagnostic(code(ferrodiode::configuration::non_positive))]
    NonPositive {
        /// Name of the offending quantity
        quantity: &'static str,
        /// The value supplied
        value: f64,
    },
    /// The info desk has no value for a property the calculation requires
    #[error("the {property} of {material} is unknown")]
    #[diagnostic(
        code(ferrodiode::configuration::unknown_material),
        help("add the material to the info desk, or a `[[materials]]` entry to the device file")
    )]
    UnknownProperty {
        /// Material identifier
        material: String,
        /// Which property was missing
        property: MaterialProperty,
    },
    /// The layer sequence does not describe a valid diode
    #[error("malformed layer stack: {0}")]
    #[diagnostic(code(ferrodiode::configuration::stack))]
    MalformedStack(String),
    /// Too few grid points were requested to resolve every active layer
    #[error("{requested} grid points cannot resolve {layers} layers, at least {minimum} are needed")]
    #[diagnostic(code(ferrodiode::configuration::grid))]
    TooFewGridPoints {
        /// Points requested
        requested: usize,
        /// Number of active layers
        layers: usize,
        /// Minimum admissible number of points
        minimum: usize,
    },
    /// Position and potential arrays do not describe a valid profile
    #[error("invalid potential profile: {0}")]
    #[diagnostic(code(ferrodiode::configuration::profile))]
    InvalidProfile(String),
}

#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq)]
/// Failures of the numerical methods
pub enum NumericalError {
    /// Adaptive quadrature ran out of subdivisions before meeting the tolerance
    #[error(
        "quadrature did not converge within {subdivisions} subdivisions: absolute tolerance \
         {absolute_tolerance}, relative tolerance {relative_tolerance}"
    )]
    #[diagnostic(
        code(ferrodiode::numerical::quadrature),
        help("loosen the quadrature tolerance or raise `maximum_subdivisions`")
    )]
    QuadratureDidNotConverge {
        /// The absolute tolerance requested
        absolute_tolerance: f64,
        /// The relative tolerance requested
        relative_tolerance: f64,
        /// The subdivision limit
        subdivisions: usize,
    },
    /// A NaN or infinite value was produced or supplied
    #[error("{quantity} is not finite")]
    #[diagnostic(code(ferrodiode::numerical::non_finite))]
    NonFinite {
        /// Name of the offending quantity
        quantity: &'static str,
    },
    /// The transmission coefficient came out negative
    #[error("transmission coefficient {0} is negative")]
    #[diagnostic(code(ferrodiode::numerical::negative_transmission))]
    NegativeTransmission(f64),
}

#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq)]
/// Position queries which fall outside the stack
pub enum LookupError {
    /// No active layer contains the position
    #[error("position {position} m lies outside the active region [0, {total_thickness}] m")]
    #[diagnostic(code(ferrodiode::lookup::outside))]
    OutsideStack {
        /// The queried position
        position: f64,
        /// Total active thickness of the stack
        total_thickness: f64,
    },
}

#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq)]
/// Umbrella error for operations which can fail in more than one way
pub enum FerroDiodeError {
    /// Invalid inputs
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Numerical failure
    #[error(transparent)]
    Numerical(#[from] NumericalError),
    /// Position lookup failure
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Converts a generic real into an `f64` for error reporting
pub(crate) fn to_f64<T: RealField>(value: T) -> f64 {
    nalgebra::try_convert::<T, f64>(value).unwrap_or(f64::NAN)
}

/// Returns `value` if it is finite, otherwise a `NumericalError::NonFinite` naming the quantity
pub(crate) fn ensure_finite<T: RealField>(
    value: T,
    quantity: &'static str,
) -> Result<T, NumericalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericalError::NonFinite { quantity })
    }
}

/// Returns `value` if it is strictly positive, otherwise a `ConfigurationError::NonPositive`
pub(crate) fn ensure_positive<T: Copy + RealField>(
    value: T,
    quantity: &'static str,
) -> Result<T, ConfigurationError> {
    if value > T::zero() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonPositive {
            quantity,
            value: to_f64(value),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn umbrella_error_preserves_the_message() {
        let error: FerroDiodeError = ConfigurationError::UnknownProperty {
            material: "Xx".into(),
            property: MaterialProperty::WorkFunction,
        }
        .into();
        assert_eq!(error.to_string(), "the work function of Xx is unknown");
    }

    #[test]
    fn nan_is_not_positive() {
        assert!(ensure_positive(f64::NAN, "dielectric constant").is_err());
        assert!(ensure_positive(0f64, "dielectric constant").is_err());
        assert_eq!(ensure_positive(2f64, "dielectric constant"), Ok(2.));
    }

    #[test]
    fn infinities_are_not_finite() {
        assert_eq!(
            ensure_finite(f64::INFINITY, "current density"),
            Err(NumericalError::NonFinite {
                quantity: "current density"
            })
        );
    }
}
