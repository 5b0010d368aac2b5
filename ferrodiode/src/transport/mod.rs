// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Transport
//!
//! Tunnelling transmission through a sampled potential-energy profile in the WKB approximation,
//! and the net current density between two electrodes held at different Fermi levels.
//!
//! Positions are in m and energies in eV on the way in. The wavevector and the current prefactor
//! are evaluated in SI units, and the returned current density is in A / m^2.

mod quadrature;

pub use quadrature::QuadratureSettings;

use crate::barrier::{validate_samples, PotentialProfile};
use crate::constants::{BOLTZMANN_EV, ELECTRON_CHARGE, ELECTRON_MASS, HBAR};
use crate::error::{
    ensure_finite, ensure_positive, to_f64, ConfigurationError, FerroDiodeError, NumericalError,
};
use itertools::Itertools;
use nalgebra::RealField;
use numeric_literals::replace_float_literals;

/// Fermi-Dirac occupation of a state at `energy` for chemical potential `chemical_potential`
///
/// All arguments share one unit. The exponential is only ever taken of a non-positive argument
/// so the occupation never overflows.
pub fn fermi_dirac<T: Copy + RealField>(energy: T, chemical_potential: T, thermal_energy: T) -> T {
    let argument = (energy - chemical_potential) / thermal_energy;
    if argument > T::zero() {
        let decay = (-argument).exp();
        decay / (T::one() + decay)
    } else {
        T::one() / (T::one() + argument.exp())
    }
}

/// Calculates tunnelling transmission and current density for a fixed effective mass
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TunnelingCalculator<T> {
    effective_mass: T,
    quadrature: QuadratureSettings<T>,
}

impl<T: Copy + RealField> Default for TunnelingCalculator<T> {
    fn default() -> Self {
        Self {
            effective_mass: T::one(),
            quadrature: QuadratureSettings::default(),
        }
    }
}

impl<T: Copy + RealField> TunnelingCalculator<T> {
    /// A calculator for a free electron, with default quadrature tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the effective mass as a multiple of the free electron mass
    pub fn with_effective_mass(self, effective_mass: T) -> Result<Self, ConfigurationError> {
        let effective_mass = ensure_positive(effective_mass, "effective mass")?;
        if !effective_mass.is_finite() {
            return Err(ConfigurationError::NonPositive {
                quantity: "effective mass",
                value: to_f64(effective_mass),
            });
        }
        Ok(Self {
            effective_mass,
            ..self
        })
    }

    /// Replaces the tolerances of the energy integral
    pub fn with_quadrature(
        self,
        quadrature: QuadratureSettings<T>,
    ) -> Result<Self, ConfigurationError> {
        quadrature.validate()?;
        Ok(Self { quadrature, ..self })
    }

    /// The effective mass ratio
    pub fn effective_mass(&self) -> T {
        self.effective_mass
    }

    /// The tolerances of the energy integral
    pub fn quadrature(&self) -> &QuadratureSettings<T> {
        &self.quadrature
    }

    /// WKB transmission probability in [0, 1] for an electron of `energy` eV through the
    /// potential energy `potential` (eV) sampled at `positions` (m)
    ///
    /// The decay exponent is the trapezoid rule over the samples lying above `energy`, taken in
    /// order. Forbidden samples on either side of an allowed gap are joined by one trapezoid.
    pub fn transmission_wkb(
        &self,
        positions: &[T],
        potential: &[T],
        energy: T,
    ) -> Result<T, FerroDiodeError> {
        validate_samples(positions, potential)?;
        ensure_finite(energy, "energy")?;
        Ok(self.transmission_unchecked(positions, potential, energy)?)
    }

    /// WKB transmission through a validated profile
    pub fn transmission_profile(
        &self,
        profile: &PotentialProfile<T>,
        energy: T,
    ) -> Result<T, FerroDiodeError> {
        ensure_finite(energy, "energy")?;
        Ok(self.transmission_unchecked(
            profile.positions().as_slice(),
            profile.potential().as_slice(),
            energy,
        )?)
    }

    #[replace_float_literals(nalgebra::convert::<f64, T>(literal))]
    fn transmission_unchecked(
        &self,
        positions: &[T],
        potential: &[T],
        energy: T,
    ) -> Result<T, NumericalError> {
        if potential.iter().all(|&v| v <= energy) {
            return Ok(T::one());
        }

        // k = sqrt(2 m* m_e e (V - E)) / ħ with V - E in eV
        let mass_charge: T = nalgebra::convert(ELECTRON_MASS * ELECTRON_CHARGE);
        let hbar: T = nalgebra::convert(HBAR);
        let scale = (2.0 * self.effective_mass * mass_charge).sqrt() / hbar;
        let wavevector = |v: T| scale * (v - energy).sqrt();

        let exponent = positions
            .iter()
            .zip(potential.iter())
            .filter(|&(_, &v)| v > energy)
            .tuple_windows()
            .fold(T::zero(), |integral, ((&x0, &v0), (&x1, &v1))| {
                integral + 0.5 * (wavevector(v0) + wavevector(v1)) * (x1 - x0)
            });

        let transmission = (-2.0 * exponent).exp();
        if !transmission.is_finite() {
            return Err(NumericalError::NonFinite {
                quantity: "transmission",
            });
        }
        if transmission < T::zero() {
            return Err(NumericalError::NegativeTransmission(to_f64(transmission)));
        }
        Ok(transmission.min(T::one()))
    }

    /// Net tunnelling current density in A / m^2 at an applied `voltage` (V) and `temperature` (K)
    ///
    /// `J = e m* kT / (2π² ħ³) ∫₀^{5kT} T(E) [f(E, 0) − f(E, eV)] dE`, with the energy integral
    /// evaluated adaptively in eV and converted to J.
    #[tracing::instrument(
        name = "Current density",
        level = "debug",
        skip(self, positions, potential)
    )]
    pub fn current_density(
        &self,
        positions: &[T],
        potential: &[T],
        voltage: T,
        temperature: T,
    ) -> Result<T, FerroDiodeError> {
        validate_samples(positions, potential)?;
        self.current_density_unchecked(positions, potential, voltage, temperature)
    }

    /// Net tunnelling current density through a validated profile
    pub fn current_density_profile(
        &self,
        profile: &PotentialProfile<T>,
        voltage: T,
        temperature: T,
    ) -> Result<T, FerroDiodeError> {
        self.current_density_unchecked(
            profile.positions().as_slice(),
            profile.potential().as_slice(),
            voltage,
            temperature,
        )
    }

    #[replace_float_literals(nalgebra::convert::<f64, T>(literal))]
    fn current_density_unchecked(
        &self,
        positions: &[T],
        potential: &[T],
        voltage: T,
        temperature: T,
    ) -> Result<T, FerroDiodeError> {
        ensure_positive(temperature, "temperature")?;
        ensure_finite(temperature, "temperature")?;
        ensure_finite(voltage, "voltage")?;

        let thermal_energy = temperature * nalgebra::convert::<f64, T>(BOLTZMANN_EV);
        let maximum_energy = 5.0 * thermal_energy;

        let integral = quadrature::integrate(
            |energy: T| -> Result<T, NumericalError> {
                let transmission = self.transmission_unchecked(positions, potential, energy)?;
                Ok(transmission
                    * (fermi_dirac(energy, T::zero(), thermal_energy)
                        - fermi_dirac(energy, voltage, thermal_energy)))
            },
            T::zero(),
            maximum_energy,
            &self.quadrature,
        )?;

        let charge: T = nalgebra::convert(ELECTRON_CHARGE);
        let mass: T = nalgebra::convert(ELECTRON_MASS);
        let hbar: T = nalgebra::convert(HBAR);
        // kT enters in J
        let prefactor = charge * self.effective_mass * mass * thermal_energy * charge
            / (2.0 * T::pi() * T::pi() * hbar * hbar * hbar);
        let current = ensure_finite(prefactor * integral * charge, "current density")?;

        tracing::debug!(
            voltage = to_f64(voltage),
            current_density = to_f64(current),
            "Evaluated current density"
        );
        Ok(current)
    }
}
