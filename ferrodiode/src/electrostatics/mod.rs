//! Screening charge and depolarisation fields in a ferroelectric diode
//!
//! The electrodes and insulating layers are treated as capacitors in series. The bound charge of
//! the polarised layers is compensated by a screening charge `σs` on the electrodes, which is
//! spread over a Thomas-Fermi length inside each metal. Any charge left uncompensated gives rise
//! to a depolarisation field in each layer.
//!
//! Degenerate devices are described by parameters, never by separate code paths: an ideal
//! electrode has zero screening length, an absent dead layer has zero thickness and polarisation.

mod profile;

pub use profile::electrostatic_energy;

use crate::constants::{ELECTRON_CHARGE, EPSILON_0};
use crate::device::{LayerRole, LayerStack};
use crate::error::{
    ensure_finite, ensure_positive, to_f64, ConfigurationError, FerroDiodeError,
};
use nalgebra::RealField;
use numeric_literals::replace_float_literals;

/// Thomas-Fermi screening length `λ = sqrt(2 ε0 E_F κ / (3 e² ρ0))` in m
///
/// # Arguments
/// - `dielectric_constant`: background dielectric constant of the electrode
/// - `fermi_energy`: Fermi energy of the electrode in J
/// - `free_electron_density`: free electron density in m^-3
#[replace_float_literals(nalgebra::convert::<f64, T>(literal))]
pub fn thomas_fermi_length<T: Copy + RealField>(
    dielectric_constant: T,
    fermi_energy: T,
    free_electron_density: T,
) -> Result<T, ConfigurationError> {
    ensure_positive(free_electron_density, "free electron density")?;
    ensure_positive(dielectric_constant, "electrode dielectric constant")?;
    if !(fermi_energy >= T::zero()) {
        return Err(ConfigurationError::NonPositive {
            quantity: "Fermi energy",
            value: to_f64(fermi_energy),
        });
    }
    let epsilon_0: T = nalgebra::convert(EPSILON_0);
    let charge: T = nalgebra::convert(ELECTRON_CHARGE);
    Ok(
        (2.0 * epsilon_0 * fermi_energy * dielectric_constant
            / (3.0 * charge * charge * free_electron_density))
            .sqrt(),
    )
}

/// A layer carrying a spontaneous polarisation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolarizedLayer<T> {
    /// Polarisation in C / m^2
    pub polarization: T,
    /// Thickness in m
    pub thickness: T,
    /// Static dielectric constant
    pub dielectric_constant: T,
}

/// A non-polar insulating layer
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DielectricLayer<T> {
    /// Thickness in m
    pub thickness: T,
    /// Static dielectric constant
    pub dielectric_constant: T,
}

/// The screening response of an electrode
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElectrodeScreening<T> {
    /// Thomas-Fermi screening length in m
    pub screening_length: T,
    /// Background dielectric constant of the metal
    pub dielectric_constant: T,
}

impl<T: Copy + RealField> ElectrodeScreening<T> {
    /// A perfect metal, which screens at its surface
    pub fn ideal() -> Self {
        Self {
            screening_length: T::zero(),
            dielectric_constant: T::one(),
        }
    }

    /// An electrode whose screening length follows from its Thomas-Fermi parameters
    pub fn from_thomas_fermi(
        dielectric_constant: T,
        fermi_energy: T,
        free_electron_density: T,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            screening_length: thomas_fermi_length(
                dielectric_constant,
                fermi_energy,
                free_electron_density,
            )?,
            dielectric_constant,
        })
    }
}

/// Polarisation of the ferroelectric and of the dead layer, in C / m^2
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Polarization<T> {
    /// Polarisation of the switchable ferroelectric
    pub ferroelectric: T,
    /// Residual polarisation of the dead layer
    pub dead_layer: T,
}

/// Depolarisation field in each insulating layer, in V / m
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DepolarizationFields<T> {
    /// Field in the ferroelectric
    pub ferroelectric: T,
    /// Field in the dead layer
    pub dead_layer: T,
    /// Field in the oxide
    pub oxide: T,
}

/// The solved electrostatic state of the diode at a given bias
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreeningState<T> {
    screening_charge: T,
    fields: DepolarizationFields<T>,
}

impl<T: Copy + RealField> ScreeningState<T> {
    /// Screening charge density on the electrodes in C / m^2
    pub fn screening_charge(&self) -> T {
        self.screening_charge
    }

    /// The depolarisation field in every insulating layer
    pub fn fields(&self) -> &DepolarizationFields<T> {
        &self.fields
    }

    /// The depolarisation field in the layer with the given role, electrodes carry none
    pub fn field(&self, role: LayerRole) -> Option<T> {
        match role {
            LayerRole::Electrode => None,
            LayerRole::DeadLayer => Some(self.fields.dead_layer),
            LayerRole::Ferroelectric => Some(self.fields.ferroelectric),
            LayerRole::Oxide => Some(self.fields.oxide),
        }
    }
}

/// The series-capacitor description of a diode
///
/// This holds `Pfe, dfe, kfe` (ferroelectric), `Pdl, ddl, kdl` (dead layer), `dox, kox` (oxide)
/// and `λ1, k1`, `λ2, k2` (bottom and top electrodes).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DielectricStack<T> {
    /// The switchable ferroelectric
    pub ferroelectric: PolarizedLayer<T>,
    /// The dead layer between the bottom electrode and the ferroelectric
    pub dead_layer: PolarizedLayer<T>,
    /// The oxide between the ferroelectric and the top electrode
    pub oxide: DielectricLayer<T>,
    /// Screening in the bottom electrode
    pub bottom_electrode: ElectrodeScreening<T>,
    /// Screening in the top electrode
    pub top_electrode: ElectrodeScreening<T>,
}

impl<T: Copy + RealField> DielectricStack<T> {
    /// Reads thicknesses and dielectric constants from a validated `LayerStack`
    ///
    /// Inactive layers contribute zero thickness. Their dielectric constant is taken from the
    /// material when known and is unity otherwise, it multiplies a zero thickness either way.
    pub fn from_layer_stack(
        stack: &LayerStack<T>,
        polarization: Polarization<T>,
        bottom_electrode: ElectrodeScreening<T>,
        top_electrode: ElectrodeScreening<T>,
    ) -> Result<Self, ConfigurationError> {
        let dielectric_constant = |role| -> Result<T, ConfigurationError> {
            match stack.layer(role) {
                Some(layer) if layer.is_active() => layer.material().require_dielectric_constant(),
                Some(layer) => Ok(layer.material().dielectric_constant().unwrap_or_else(T::one)),
                None => Ok(T::one()),
            }
        };

        let stack = Self {
            ferroelectric: PolarizedLayer {
                polarization: polarization.ferroelectric,
                thickness: stack.thickness_of(LayerRole::Ferroelectric),
                dielectric_constant: dielectric_constant(LayerRole::Ferroelectric)?,
            },
            dead_layer: PolarizedLayer {
                polarization: polarization.dead_layer,
                thickness: stack.thickness_of(LayerRole::DeadLayer),
                dielectric_constant: dielectric_constant(LayerRole::DeadLayer)?,
            },
            oxide: DielectricLayer {
                thickness: stack.thickness_of(LayerRole::Oxide),
                dielectric_constant: dielectric_constant(LayerRole::Oxide)?,
            },
            bottom_electrode,
            top_electrode,
        };
        stack.validate()?;
        Ok(stack)
    }

    /// Checks every dielectric constant is positive and every length is non-negative
    ///
    /// The ferroelectric thickness must be strictly positive: `dfe / kfe` is the one term which
    /// keeps the series-capacitor denominator away from zero.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive(
            self.ferroelectric.dielectric_constant,
            "ferroelectric dielectric constant",
        )?;
        ensure_positive(self.dead_layer.dielectric_constant, "dead layer dielectric constant")?;
        ensure_positive(self.oxide.dielectric_constant, "oxide dielectric constant")?;
        ensure_positive(
            self.bottom_electrode.dielectric_constant,
            "bottom electrode dielectric constant",
        )?;
        ensure_positive(
            self.top_electrode.dielectric_constant,
            "top electrode dielectric constant",
        )?;
        ensure_positive(self.ferroelectric.thickness, "ferroelectric thickness")?;

        for (layer, length) in [
            ("Dead Layer", self.dead_layer.thickness),
            ("Insulating Layer", self.oxide.thickness),
            ("Bottom Electrode", self.bottom_electrode.screening_length),
            ("Top Electrode", self.top_electrode.screening_length),
        ] {
            if !(length >= T::zero()) {
                return Err(ConfigurationError::NegativeThickness {
                    layer: layer.to_string(),
                    thickness: to_f64(length),
                });
            }
        }
        Ok(())
    }

    /// Screening charge density `σs` in C / m^2 for an applied voltage in V
    ///
    /// `σs = [Pdl ddl/kdl + Pfe dfe/kfe + ε0 Vext] / [λ1/k1 + λ2/k2 + ddl/kdl + dfe/kfe + dox/kox]`
    pub fn screening_charge(&self, applied_voltage: T) -> Result<T, FerroDiodeError> {
        self.validate()?;
        let epsilon_0: T = nalgebra::convert(EPSILON_0);
        let (fe, dl, ox) = (&self.ferroelectric, &self.dead_layer, &self.oxide);
        let (bottom, top) = (&self.bottom_electrode, &self.top_electrode);

        let numerator = dl.polarization * dl.thickness / dl.dielectric_constant
            + fe.polarization * fe.thickness / fe.dielectric_constant
            + epsilon_0 * applied_voltage;
        let denominator = bottom.screening_length / bottom.dielectric_constant
            + top.screening_length / top.dielectric_constant
            + dl.thickness / dl.dielectric_constant
            + fe.thickness / fe.dielectric_constant
            + ox.thickness / ox.dielectric_constant;

        Ok(ensure_finite(numerator / denominator, "screening charge")?)
    }

    /// Depolarisation fields in V / m for a given screening charge density
    ///
    /// `Efe = (σs − Pfe)/(kfe ε0)`, `Edl = (σs − Pdl)/(kdl ε0)`, `Eox = σs/(kox ε0)`
    pub fn depolarization_fields(
        &self,
        screening_charge: T,
    ) -> Result<ScreeningState<T>, FerroDiodeError> {
        self.validate()?;
        let epsilon_0: T = nalgebra::convert(EPSILON_0);
        let fields = DepolarizationFields {
            ferroelectric: ensure_finite(
                (screening_charge - self.ferroelectric.polarization)
                    / (self.ferroelectric.dielectric_constant * epsilon_0),
                "ferroelectric depolarisation field",
            )?,
            dead_layer: ensure_finite(
                (screening_charge - self.dead_layer.polarization)
                    / (self.dead_layer.dielectric_constant * epsilon_0),
                "dead layer depolarisation field",
            )?,
            oxide: ensure_finite(
                screening_charge / (self.oxide.dielectric_constant * epsilon_0),
                "oxide depolarisation field",
            )?,
        };
        Ok(ScreeningState {
            screening_charge,
            fields,
        })
    }

    /// Solves for the screening charge and the resulting fields at the given bias
    #[tracing::instrument(name = "Screening solver", level = "debug", skip(self))]
    pub fn solve(&self, applied_voltage: T) -> Result<ScreeningState<T>, FerroDiodeError> {
        let screening_charge = self.screening_charge(applied_voltage)?;
        let state = self.depolarization_fields(screening_charge)?;
        tracing::trace!(
            screening_charge = to_f64(screening_charge),
            ferroelectric_field = to_f64(state.fields.ferroelectric),
            "Solved screening state"
        );
        Ok(state)
    }
}
