//! # Calculations
//!
//! Delegated functions from `App`. Each point of a sweep is independent, so sweeps are
//! distributed over the rayon thread pool and collected in order.

use super::Configuration;
use crate::barrier::{BarrierHeights, PotentialProfile};
use crate::device::{Device, LayerStack};
use crate::electrostatics::{electrostatic_energy, DielectricStack};
use crate::error::{to_f64, FerroDiodeError};
use crate::transport::TunnelingCalculator;
use nalgebra::RealField;
use rayon::prelude::*;

/// Everything a calculation reads, resolved once from the files on disk
pub(crate) struct Context<'a, T> {
    pub(crate) config: &'a Configuration<T>,
    pub(crate) device: &'a Device<T>,
    pub(crate) stack: &'a LayerStack<T>,
    pub(crate) dielectric: &'a DielectricStack<T>,
    pub(crate) calculator: &'a TunnelingCalculator<T>,
}

/// Solves the screening problem at `voltage` and superposes the resulting electrostatic energy
/// on the interface barriers
pub(crate) fn potential_profile<T: Copy + RealField>(
    stack: &LayerStack<T>,
    dielectric: &DielectricStack<T>,
    barriers: &BarrierHeights<T>,
    number_of_points: usize,
    voltage: T,
) -> Result<PotentialProfile<T>, FerroDiodeError> {
    let positions = stack.position_grid(number_of_points)?;
    let state = dielectric.solve(voltage)?;
    let energy = electrostatic_energy(stack, &state, positions.as_slice())?;
    PotentialProfile::assemble(stack, &positions, barriers, &energy)
}

pub(crate) fn summary<T: Copy + RealField>(context: &Context<'_, T>) -> color_eyre::Result<()> {
    tracing::info!("\n{}", context.stack);

    let barriers = BarrierHeights::from_layer_stack(context.stack)?;
    tracing::info!(
        ferroelectric = to_f64(barriers.ferroelectric),
        dead_layer = to_f64(barriers.dead_layer),
        oxide = to_f64(barriers.oxide),
        "Interface barriers (eV)"
    );

    let state = context.dielectric.solve(T::zero())?;
    tracing::info!(
        screening_charge = to_f64(state.screening_charge()),
        ferroelectric = to_f64(state.fields().ferroelectric),
        dead_layer = to_f64(state.fields().dead_layer),
        oxide = to_f64(state.fields().oxide),
        "Screening charge (C/m^2) and depolarisation fields (V/m) at zero bias"
    );

    let switching = context
        .dielectric
        .switching_voltage(context.device.ferroelectric.coercive_field)?;
    tracing::info!(
        switching_voltage = to_f64(switching),
        "Switching voltage (V)"
    );
    Ok(())
}

pub(crate) fn transmission_sweep<T>(context: &Context<'_, T>) -> color_eyre::Result<()>
where
    T: Copy + RealField + Send + Sync,
{
    let sweep = &context.config.sweep;
    let barriers = BarrierHeights::from_layer_stack(context.stack)?;
    let profile = potential_profile(
        context.stack,
        context.dielectric,
        &barriers,
        context.config.mesh.number_of_points,
        T::zero(),
    )?;

    let steps = sweep.number_of_energies.max(2) - 1;
    let energies: Vec<T> = (0..=steps)
        .map(|i| {
            sweep.minimum_energy
                + (sweep.maximum_energy - sweep.minimum_energy)
                    * nalgebra::convert::<f64, T>(i as f64 / steps as f64)
        })
        .collect();

    let transmission = energies
        .par_iter()
        .map(|&energy| context.calculator.transmission_profile(&profile, energy))
        .collect::<Result<Vec<T>, FerroDiodeError>>()?;

    for (energy, transmission) in energies.into_iter().zip(transmission) {
        tracing::info!(
            energy = to_f64(energy),
            transmission = to_f64(transmission),
            "Transmission"
        );
    }
    Ok(())
}

pub(crate) fn current_sweep<T>(context: &Context<'_, T>) -> color_eyre::Result<()>
where
    T: Copy + RealField + Send + Sync,
{
    let barriers = BarrierHeights::from_layer_stack(context.stack)?;
    let temperature = context.device.temperature;
    let number_of_points = context.config.mesh.number_of_points;

    let currents = context
        .device
        .voltages
        .par_iter()
        .map(|&voltage| -> Result<T, FerroDiodeError> {
            let profile = potential_profile(
                context.stack,
                context.dielectric,
                &barriers,
                number_of_points,
                voltage,
            )?;
            context
                .calculator
                .current_density_profile(&profile, voltage, temperature)
        })
        .collect::<Result<Vec<T>, FerroDiodeError>>()?;

    for (&voltage, current) in context.device.voltages.iter().zip(currents) {
        tracing::info!(
            voltage = to_f64(voltage),
            current_density = to_f64(current),
            "Current density (A/m^2)"
        );
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::{LayerStackBuilder, MaterialDatabase, StandardStructure};
    use crate::electrostatics::{ElectrodeScreening, Polarization};

    fn standard() -> (LayerStack<f64>, DielectricStack<f64>, BarrierHeights<f64>) {
        let stack = LayerStack::standard_structure(
            &MaterialDatabase::default(),
            &StandardStructure::default(),
        )
        .unwrap();
        let dielectric = DielectricStack::from_layer_stack(
            &stack,
            Polarization {
                ferroelectric: 0.2,
                dead_layer: 0.,
            },
            ElectrodeScreening {
                screening_length: 0.5e-10,
                dielectric_constant: 1.,
            },
            ElectrodeScreening {
                screening_length: 0.5e-10,
                dielectric_constant: 1.,
            },
        )
        .unwrap();
        let barriers = BarrierHeights::from_layer_stack(&stack).unwrap();
        (stack, dielectric, barriers)
    }

    #[test]
    fn profile_spans_the_active_region() {
        let (stack, dielectric, barriers) = standard();
        let profile = potential_profile(&stack, &dielectric, &barriers, 131, 0.).unwrap();
        assert_eq!(profile.len(), 131);
        assert_eq!(profile.positions()[0], 0.);
        approx::assert_relative_eq!(
            profile.positions()[130],
            stack.total_thickness(),
            max_relative = 1e-12
        );
        // The first sample sits in the dead layer at zero electrostatic energy
        assert_eq!(profile.potential()[0], barriers.dead_layer);
    }

    #[test]
    fn bias_changes_the_profile() {
        let (stack, dielectric, barriers) = standard();
        let unbiased = potential_profile(&stack, &dielectric, &barriers, 131, 0.).unwrap();
        let biased = potential_profile(&stack, &dielectric, &barriers, 131, 0.5).unwrap();
        assert_ne!(unbiased.potential(), biased.potential());
    }

    #[test]
    fn currents_can_be_evaluated_in_parallel() {
        let (stack, dielectric, barriers) = standard();
        let calculator = TunnelingCalculator::new();
        let voltages = vec![-0.2, -0.1, 0., 0.1, 0.2];
        let currents = voltages
            .par_iter()
            .map(|&voltage| -> Result<f64, FerroDiodeError> {
                let profile =
                    potential_profile(&stack, &dielectric, &barriers, 131, voltage)?;
                calculator.current_density_profile(&profile, voltage, 300.)
            })
            .collect::<Result<Vec<f64>, FerroDiodeError>>()
            .unwrap();
        assert_eq!(currents.len(), 5);
        assert_eq!(currents[2], 0.);
        assert!(currents.iter().all(|current| current.is_finite()));
    }

    #[test]
    fn stacks_without_an_oxide_carry_current() {
        let info_desk = MaterialDatabase::default();
        let stack = LayerStackBuilder::new()
            .with_info_desk(&info_desk)
            .with_bottom_electrode("Ti")
            .with_top_electrode("Au")
            .with_ferroelectric("HfO2", 3e-9)
            .build()
            .unwrap();
        let dielectric = DielectricStack::from_layer_stack(
            &stack,
            Polarization {
                ferroelectric: 0.2,
                dead_layer: 0.,
            },
            ElectrodeScreening::ideal(),
            ElectrodeScreening::ideal(),
        )
        .unwrap();
        let barriers = BarrierHeights::from_layer_stack(&stack).unwrap();
        let profile = potential_profile(&stack, &dielectric, &barriers, 101, 0.2).unwrap();
        let current: f64 = TunnelingCalculator::new()
            .current_density_profile(&profile, 0.2, 300.)
            .unwrap();
        assert!(current.is_finite());
        assert!(current < 0.);
    }
}
