//! Adaptive energy integration
//!
//! The integral is handed to the Gauss-Kronrod integrator of `quad_rs`, which applies the 21
//! point Kronrod rule on each subinterval and bisects the worst one until the error target is
//! met. The limit on bisections is translated into the integrator's budget of function
//! evaluations.

use crate::error::{to_f64, ConfigurationError, NumericalError};
use nalgebra::RealField;
use quad_rs::{GaussKronrod, Integrate, IntegrationSettings};
use std::cell::RefCell;

/// Samples taken by the Kronrod rule on one subinterval
const KRONROD_POINTS: usize = 21;

/// Tolerances for the adaptive energy integral
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadratureSettings<T> {
    /// Absolute error target
    pub absolute_tolerance: T,
    /// Error target relative to the magnitude of the integral
    pub relative_tolerance: T,
    /// The largest number of bisections before giving up
    pub maximum_subdivisions: usize,
}

impl<T: RealField> Default for QuadratureSettings<T> {
    fn default() -> Self {
        Self {
            absolute_tolerance: nalgebra::convert(1.49e-8),
            relative_tolerance: nalgebra::convert(1.49e-8),
            maximum_subdivisions: 50,
        }
    }
}

impl<T: Copy + RealField> QuadratureSettings<T> {
    /// Rejects negative or non-finite tolerances and a zero subdivision limit
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (quantity, value) in [
            ("absolute tolerance", self.absolute_tolerance),
            ("relative tolerance", self.relative_tolerance),
        ] {
            if !(value >= T::zero() && value.is_finite()) {
                return Err(ConfigurationError::NonPositive {
                    quantity,
                    value: to_f64(value),
                });
            }
        }
        if self.maximum_subdivisions == 0 {
            return Err(ConfigurationError::NonPositive {
                quantity: "maximum subdivisions",
                value: 0.,
            });
        }
        Ok(())
    }

    /// Function evaluations needed for the initial rule plus `maximum_subdivisions` bisections
    pub(crate) fn maximum_evaluations(&self) -> usize {
        // The integrator gives up as soon as its count reaches the limit, hence the extra one
        KRONROD_POINTS * (2 * self.maximum_subdivisions + 1) + 1
    }

    fn integrator(&self) -> GaussKronrod<f64> {
        GaussKronrod::default()
            .with_absolute_tolerance(to_f64(self.absolute_tolerance))
            .with_relative_tolerance(to_f64(self.relative_tolerance))
            .with_maximum_function_evaluations(self.maximum_evaluations())
    }

    fn did_not_converge(&self) -> NumericalError {
        NumericalError::QuadratureDidNotConverge {
            absolute_tolerance: to_f64(self.absolute_tolerance),
            relative_tolerance: to_f64(self.relative_tolerance),
            subdivisions: self.maximum_subdivisions,
        }
    }
}

/// Integrates `integrand` over `[lower, upper]`
///
/// The first error raised by the integrand is returned in place of the integral, and a
/// non-finite sample is reported as `NumericalError::NonFinite`.
pub(crate) fn integrate<T, F, E>(
    integrand: F,
    lower: T,
    upper: T,
    settings: &QuadratureSettings<T>,
) -> Result<T, E>
where
    T: Copy + RealField,
    F: Fn(T) -> Result<T, E>,
    E: From<NumericalError>,
{
    let failure: RefCell<Option<E>> = RefCell::new(None);
    let sample = |x: f64| -> f64 {
        match integrand(nalgebra::convert(x)) {
            Ok(value) if value.is_finite() => to_f64(value),
            Ok(_) => {
                failure.borrow_mut().get_or_insert_with(|| {
                    NumericalError::NonFinite {
                        quantity: "quadrature integrand",
                    }
                    .into()
                });
                f64::NAN
            }
            Err(error) => {
                failure.borrow_mut().get_or_insert(error);
                f64::NAN
            }
        }
    };

    let outcome =
        settings
            .integrator()
            .integrate(sample, to_f64(lower)..to_f64(upper), None);

    if let Some(error) = failure.into_inner() {
        return Err(error);
    }
    let solution = outcome.map_err(|error| {
        tracing::debug!(%error, "Energy integral failed");
        settings.did_not_converge()
    })?;
    let integral = solution
        .result
        .ok_or_else(|| settings.did_not_converge())?;
    if !integral.is_finite() {
        return Err(NumericalError::NonFinite {
            quantity: "quadrature estimate",
        }
        .into());
    }
    tracing::trace!(
        integral,
        error = solution.error.unwrap_or(f64::NAN),
        "Quadrature converged"
    );
    Ok(nalgebra::convert(integral))
}
