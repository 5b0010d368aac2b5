use super::ScreeningState;
use crate::device::LayerStack;
use crate::error::FerroDiodeError;
use nalgebra::{DVector, RealField};

/// Electron potential energy in eV at each of `positions`, zero at the bottom of the active region
///
/// The field is uniform within each layer, so `U(x) = ∫₀ˣ E dx'` is piecewise linear and
/// continuous across interfaces. Every position must lie inside the stack.
pub fn electrostatic_energy<T: Copy + RealField>(
    stack: &LayerStack<T>,
    state: &ScreeningState<T>,
    positions: &[T],
) -> Result<DVector<T>, FerroDiodeError> {
    let energies = positions
        .iter()
        .map(|&position| -> Result<T, FerroDiodeError> {
            stack.layer_at(position)?;
            Ok(stack.active_layers().fold(T::zero(), |energy, layer| {
                let field = state.field(layer.role()).unwrap_or_else(T::zero);
                let covered = (position.min(layer.end()) - layer.start()).max(T::zero());
                energy + field * covered
            }))
        })
        .collect::<Result<Vec<T>, FerroDiodeError>>()?;
    Ok(DVector::from_vec(energies))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::{MaterialDatabase, StandardStructure};
    use crate::electrostatics::{DielectricStack, ElectrodeScreening, Polarization};
    use approx::assert_relative_eq;

    fn standard() -> (LayerStack<f64>, ScreeningState<f64>) {
        let stack = LayerStack::standard_structure(
            &MaterialDatabase::default(),
            &StandardStructure::default(),
        )
        .unwrap();
        let dielectric = DielectricStack::from_layer_stack(
            &stack,
            Polarization {
                ferroelectric: 0.2,
                dead_layer: 0.02,
            },
            ElectrodeScreening {
                screening_length: 0.5e-10,
                dielectric_constant: 1.,
            },
            ElectrodeScreening::ideal(),
        )
        .unwrap();
        let state = dielectric.solve(0.5).unwrap();
        (stack, state)
    }

    #[test]
    fn energy_is_zero_at_the_bottom_and_sums_the_layer_drops_at_the_top() {
        let (stack, state) = standard();
        let top = stack.total_thickness();
        let energy = electrostatic_energy(&stack, &state, &[0., top]).unwrap();
        assert_eq!(energy[0], 0.);
        let fields = state.fields();
        let expected =
            fields.dead_layer * 1e-9 + fields.ferroelectric * 10e-9 + fields.oxide * 2e-9;
        assert_relative_eq!(energy[1], expected, max_relative = 1e-9);
    }

    #[test]
    fn energy_is_linear_within_a_layer() {
        let (stack, state) = standard();
        let positions = [2e-9, 4e-9, 6e-9];
        let energy = electrostatic_energy(&stack, &state, &positions).unwrap();
        let slope = state.fields().ferroelectric;
        assert_relative_eq!(energy[1] - energy[0], slope * 2e-9, max_relative = 1e-9);
        assert_relative_eq!(energy[2] - energy[1], slope * 2e-9, max_relative = 1e-9);
    }

    #[test]
    fn energy_is_continuous_across_interfaces() {
        let (stack, state) = standard();
        let interface = 11e-9;
        let delta = 1e-15;
        let energy =
            electrostatic_energy(&stack, &state, &[interface - delta, interface + delta]).unwrap();
        assert_relative_eq!(energy[0], energy[1], epsilon = 1e-6);
    }

    #[test]
    fn positions_outside_the_stack_are_rejected() {
        let (stack, state) = standard();
        assert!(matches!(
            electrostatic_energy(&stack, &state, &[-1e-9]),
            Err(FerroDiodeError::Lookup(_))
        ));
        assert!(electrostatic_energy(&stack, &state, &[14e-9]).is_err());
    }
}
