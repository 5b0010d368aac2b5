//! The voltage at which the ferroelectric polarisation reverses
//!
//! Switching happens when the field in the ferroelectric reaches the coercive field `Ec`. Fixing
//! `Efe = Ec` in the series-capacitor model and solving for the applied bias gives the closed
//! form implemented here. Ideal electrodes, a missing dead layer or a missing oxide are all
//! expressed by setting the corresponding parameters to zero.

use crate::constants::EPSILON_0;
use crate::electrostatics::DielectricStack;
use crate::error::{ensure_finite, to_f64, FerroDiodeError};
use nalgebra::RealField;

impl<T: Copy + RealField> DielectricStack<T> {
    /// The applied voltage in V at which the ferroelectric field equals `coercive_field` (V / m)
    ///
    /// `Vs = Pfe dfe/(kfe ε0) + Pdl ddl/(kdl ε0)
    ///     + [dfe + (kfe/kdl) ddl + (kfe/kox) dox + (kfe/k1) λ1 + (kfe/k2) λ2] [Ec − Pfe/(kfe ε0)]`
    #[tracing::instrument(name = "Switching voltage", level = "debug", skip(self))]
    pub fn switching_voltage(&self, coercive_field: T) -> Result<T, FerroDiodeError> {
        self.validate()?;
        let epsilon_0: T = nalgebra::convert(EPSILON_0);
        let (fe, dl, ox) = (&self.ferroelectric, &self.dead_layer, &self.oxide);
        let (bottom, top) = (&self.bottom_electrode, &self.top_electrode);
        let kfe = fe.dielectric_constant;

        let voltage = fe.polarization * fe.thickness / (kfe * epsilon_0)
            + dl.polarization * dl.thickness / (dl.dielectric_constant * epsilon_0)
            + (fe.thickness
                + (kfe / dl.dielectric_constant) * dl.thickness
                + (kfe / ox.dielectric_constant) * ox.thickness
                + (kfe / bottom.dielectric_constant) * bottom.screening_length
                + (kfe / top.dielectric_constant) * top.screening_length)
                * (coercive_field - fe.polarization / (kfe * epsilon_0));

        let voltage = ensure_finite(voltage, "switching voltage")?;
        tracing::debug!(switching_voltage = to_f64(voltage));
        Ok(voltage)
    }
}

#[cfg(test)]
mod test {
    use crate::constants::EPSILON_0;
    use crate::electrostatics::{
        DielectricLayer, DielectricStack, ElectrodeScreening, PolarizedLayer,
    };
    use crate::error::{ConfigurationError, FerroDiodeError};
    use approx::assert_relative_eq;
    use rand::Rng;

    fn stack(
        polarization: f64,
        thickness: f64,
        dielectric_constant: f64,
        oxide_thickness: f64,
        screening_length: f64,
    ) -> DielectricStack<f64> {
        DielectricStack {
            ferroelectric: PolarizedLayer {
                polarization,
                thickness,
                dielectric_constant,
            },
            dead_layer: PolarizedLayer {
                polarization: 0.,
                thickness: 0.,
                dielectric_constant,
            },
            oxide: DielectricLayer {
                thickness: oxide_thickness,
                dielectric_constant: 9.,
            },
            bottom_electrode: ElectrodeScreening {
                screening_length,
                dielectric_constant: 1.,
            },
            top_electrode: ElectrodeScreening {
                screening_length,
                dielectric_constant: 1.,
            },
        }
    }

    #[test]
    fn bare_ferroelectric_between_ideal_electrodes() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let polarization = rng.gen_range(-0.5..0.5);
            let thickness = rng.gen_range(1e-9..20e-9);
            let dielectric_constant = rng.gen_range(5.0..500.0);
            let coercive_field = rng.gen_range(1e7..1e9);

            let result = stack(polarization, thickness, dielectric_constant, 0., 0.)
                .switching_voltage(coercive_field)
                .unwrap();
            let expected = polarization * thickness / (dielectric_constant * EPSILON_0)
                + thickness
                    * (coercive_field - polarization / (dielectric_constant * EPSILON_0));
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn without_polarisation_the_stack_is_a_series_capacitor() {
        // Vs = Ec (dfe + kfe dox / kox + 2 kfe λ)
        let coercive_field = 1e8;
        let result = stack(0., 10e-9, 25., 2e-9, 0.5e-10)
            .switching_voltage(coercive_field)
            .unwrap();
        let expected = coercive_field * (10e-9 + 25. / 9. * 2e-9 + 2. * 25. * 0.5e-10);
        assert_relative_eq!(result, expected, max_relative = 1e-12);
    }

    #[test]
    fn imperfect_screening_raises_the_switching_voltage() {
        let ideal = stack(0.1, 10e-9, 25., 2e-9, 0.)
            .switching_voltage(2e8)
            .unwrap();
        let screened = stack(0.1, 10e-9, 25., 2e-9, 1e-10)
            .switching_voltage(2e8)
            .unwrap();
        assert!(screened > ideal);
    }

    #[test]
    fn switching_matches_the_field_of_the_screening_solver() {
        // Without bound charge, at Vs the ferroelectric field is the coercive field
        let dielectric = stack(0., 10e-9, 25., 2e-9, 0.8e-10);
        let coercive_field = 1.5e8;
        let voltage = dielectric.switching_voltage(coercive_field).unwrap();
        let state = dielectric.solve(voltage).unwrap();
        assert_relative_eq!(
            state.fields().ferroelectric,
            coercive_field,
            max_relative = 1e-8
        );
    }

    #[test]
    fn zero_dielectric_constant_is_a_configuration_error() {
        let mut dielectric = stack(0.2, 10e-9, 25., 2e-9, 0.);
        dielectric.dead_layer.dielectric_constant = 0.;
        assert!(matches!(
            dielectric.switching_voltage(1e8),
            Err(FerroDiodeError::Configuration(
                ConfigurationError::NonPositive { .. }
            ))
        ));
    }

    #[test]
    fn non_finite_coercive_field_is_a_numerical_error() {
        let dielectric = stack(0.2, 10e-9, 25., 2e-9, 0.);
        assert!(matches!(
            dielectric.switching_voltage(f64::NAN),
            Err(FerroDiodeError::Numerical(_))
        ));
    }
}
