//! Interface barriers and the potential-energy profile seen by a tunnelling electron
//!
//! The conduction band offset of each insulating layer is set by the electrode it faces: the
//! dead layer and the ferroelectric sit against the bottom electrode, the oxide against the top.
//! The profile along the device is the superposition of these step barriers and the electrostatic
//! energy from the screening solver.

use crate::device::{LayerRole, LayerStack};
use crate::error::{ConfigurationError, FerroDiodeError, NumericalError};
use nalgebra::{DVector, RealField};

/// Barrier heights in eV for each insulating layer
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BarrierHeights<T> {
    /// Barrier in the ferroelectric, `φ_left − χ_fe`
    pub ferroelectric: T,
    /// Barrier in the dead layer, which shares the ferroelectric's material
    pub dead_layer: T,
    /// Barrier in the oxide, `φ_right − χ_ox`
    pub oxide: T,
}

/// Computes the interface barriers from electrode work functions and insulator electron
/// affinities, all in eV
///
/// Negative barriers are returned as they are.
pub fn barrier_potential<T: Copy + RealField>(
    left_work_function: T,
    right_work_function: T,
    ferroelectric_affinity: T,
    oxide_affinity: T,
) -> BarrierHeights<T> {
    let ferroelectric = left_work_function - ferroelectric_affinity;
    BarrierHeights {
        ferroelectric,
        dead_layer: ferroelectric,
        oxide: right_work_function - oxide_affinity,
    }
}

/// Superposes the electrostatic energy and the barrier at a single point, in eV
pub fn total_potential<T: Copy + RealField>(electrostatic: T, barrier: T) -> T {
    electrostatic + barrier
}

impl<T: Copy + RealField> BarrierHeights<T> {
    /// Reads the electrode work functions and insulator electron affinities of a layer stack
    ///
    /// A stack built without an oxide behaves like one with a zero-thickness oxide of the
    /// ferroelectric's material: the top electrode then faces the ferroelectric directly.
    pub fn from_layer_stack(stack: &LayerStack<T>) -> Result<Self, ConfigurationError> {
        let left = stack.bottom_electrode().material().require_work_function()?;
        let right = stack.top_electrode().material().require_work_function()?;
        let ferroelectric = stack
            .layer(LayerRole::Ferroelectric)
            .ok_or_else(|| {
                ConfigurationError::MalformedStack("the stack has no ferroelectric layer".into())
            })?
            .material()
            .require_electron_affinity()?;
        let oxide = match stack.layer(LayerRole::Oxide) {
            Some(layer) => layer.material().require_electron_affinity()?,
            None => ferroelectric,
        };
        Ok(barrier_potential(left, right, ferroelectric, oxide))
    }

    /// The barrier in a layer with the given role, electrodes have none
    pub fn barrier(&self, role: LayerRole) -> Option<T> {
        match role {
            LayerRole::Electrode => None,
            LayerRole::DeadLayer => Some(self.dead_layer),
            LayerRole::Ferroelectric => Some(self.ferroelectric),
            LayerRole::Oxide => Some(self.oxide),
        }
    }
}

/// Checks a sampled potential: equal lengths, at least two samples, finite values and strictly
/// increasing positions
pub(crate) fn validate_samples<T: Copy + RealField>(
    positions: &[T],
    potential: &[T],
) -> Result<(), FerroDiodeError> {
    if positions.len() != potential.len() {
        return Err(ConfigurationError::InvalidProfile(format!(
            "{} positions but {} potential samples",
            positions.len(),
            potential.len()
        ))
        .into());
    }
    if positions.len() < 2 {
        return Err(ConfigurationError::InvalidProfile(format!(
            "at least two samples are needed, found {}",
            positions.len()
        ))
        .into());
    }
    if positions.iter().any(|x| !x.is_finite()) {
        return Err(NumericalError::NonFinite {
            quantity: "position",
        }
        .into());
    }
    if potential.iter().any(|v| !v.is_finite()) {
        return Err(NumericalError::NonFinite {
            quantity: "potential",
        }
        .into());
    }
    if let Some(index) = positions.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(ConfigurationError::InvalidProfile(format!(
            "positions must be strictly increasing, sample {} is not",
            index + 1
        ))
        .into());
    }
    Ok(())
}

/// Potential energy in eV sampled at strictly increasing positions in m
#[derive(Clone, Debug, PartialEq)]
pub struct PotentialProfile<T: RealField> {
    positions: DVector<T>,
    potential: DVector<T>,
}

impl<T: Copy + RealField> PotentialProfile<T> {
    /// Wraps validated samples
    pub fn new(positions: DVector<T>, potential: DVector<T>) -> Result<Self, FerroDiodeError> {
        validate_samples(positions.as_slice(), potential.as_slice())?;
        Ok(Self {
            positions,
            potential,
        })
    }

    /// Superposes the barrier of the layer containing each grid point with the electrostatic
    /// energy at that point
    #[tracing::instrument(name = "Potential profile", level = "debug", skip_all)]
    pub fn assemble(
        stack: &LayerStack<T>,
        positions: &DVector<T>,
        barriers: &BarrierHeights<T>,
        electrostatic_energy: &DVector<T>,
    ) -> Result<Self, FerroDiodeError> {
        if positions.len() != electrostatic_energy.len() {
            return Err(ConfigurationError::InvalidProfile(format!(
                "{} positions but {} electrostatic energies",
                positions.len(),
                electrostatic_energy.len()
            ))
            .into());
        }
        let potential = positions
            .iter()
            .zip(electrostatic_energy.iter())
            .map(|(&position, &energy)| -> Result<T, FerroDiodeError> {
                let layer = stack.layer_at(position)?;
                let barrier = barriers.barrier(layer.role()).unwrap_or_else(T::zero);
                Ok(total_potential(energy, barrier))
            })
            .collect::<Result<Vec<T>, FerroDiodeError>>()?;
        Self::new(positions.clone(), DVector::from_vec(potential))
    }

    /// Sample positions in m
    pub fn positions(&self) -> &DVector<T> {
        &self.positions
    }

    /// Potential energy at each sample in eV
    pub fn potential(&self) -> &DVector<T> {
        &self.potential
    }

    /// The number of samples
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false, a profile holds at least two samples
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The highest potential energy in the profile
    pub fn maximum(&self) -> T {
        self.potential
            .iter()
            .skip(1)
            .fold(self.potential[0], |max, &value| max.max(value))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::{MaterialDatabase, StandardStructure};
    use approx::assert_relative_eq;

    #[test]
    fn barriers_for_the_standard_structure() {
        let stack = LayerStack::<f64>::standard_structure(
            &MaterialDatabase::default(),
            &StandardStructure::default(),
        )
        .unwrap();
        let barriers = BarrierHeights::from_layer_stack(&stack).unwrap();
        // Ti against HfO2, Au against Al2O3
        assert_relative_eq!(barriers.ferroelectric, 4.33 - 2.4, max_relative = 1e-12);
        assert_eq!(barriers.dead_layer, barriers.ferroelectric);
        assert_relative_eq!(barriers.oxide, 5.10 - 2.8, max_relative = 1e-12);
        assert_eq!(barriers.barrier(LayerRole::Electrode), None);
        assert_eq!(barriers.barrier(LayerRole::Oxide), Some(barriers.oxide));
    }

    #[test]
    fn a_stack_without_oxide_has_a_profile() {
        let info_desk = MaterialDatabase::default();
        let stack = crate::device::LayerStackBuilder::new()
            .with_info_desk(&info_desk)
            .with_bottom_electrode("Ti")
            .with_top_electrode("Au")
            .with_ferroelectric("HfO2", 5e-9)
            .build()
            .unwrap();
        let barriers = BarrierHeights::from_layer_stack(&stack).unwrap();
        assert_relative_eq!(barriers.ferroelectric, 4.33 - 2.4, max_relative = 1e-12);
        assert_relative_eq!(barriers.oxide, 5.10 - 2.4, max_relative = 1e-12);

        let positions = stack.position_grid(51).unwrap();
        let flat = DVector::zeros(positions.len());
        let profile = PotentialProfile::assemble(&stack, &positions, &barriers, &flat).unwrap();
        assert_eq!(profile.len(), 51);
        assert_relative_eq!(profile.maximum(), barriers.ferroelectric, max_relative = 1e-12);
    }

    #[test]
    fn negative_barriers_are_not_clamped() {
        let barriers = barrier_potential(3f64, 3., 4., 3.5);
        assert_eq!(barriers.ferroelectric, -1.);
        assert_eq!(barriers.dead_layer, -1.);
        assert_eq!(barriers.oxide, -0.5);
    }

    #[test]
    fn unknown_electron_affinity_is_a_configuration_error() {
        let info_desk = MaterialDatabase::default().with_dielectric_constant("Foo", 12.);
        let structure: StandardStructure<f64> = StandardStructure {
            oxide: "Foo".to_string(),
            ..StandardStructure::default()
        };
        let stack = LayerStack::standard_structure(&info_desk, &structure).unwrap();
        assert!(matches!(
            BarrierHeights::from_layer_stack(&stack),
            Err(ConfigurationError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn total_potential_is_a_plain_sum() {
        assert_eq!(total_potential(-0.25f64, 1.5), 1.25);
        assert_eq!(total_potential(-3f64, 1.), -2.);
    }

    #[test]
    fn profile_validation() {
        let positions = DVector::from_vec(vec![0f64, 1e-9, 2e-9]);
        assert!(PotentialProfile::new(positions.clone(), DVector::from_vec(vec![1., 2.])).is_err());
        assert!(PotentialProfile::new(
            DVector::from_vec(vec![0f64]),
            DVector::from_vec(vec![1.])
        )
        .is_err());
        assert!(matches!(
            PotentialProfile::new(
                DVector::from_vec(vec![0f64, 2e-9, 1e-9]),
                DVector::from_vec(vec![1., 2., 3.])
            ),
            Err(FerroDiodeError::Configuration(
                ConfigurationError::InvalidProfile(_)
            ))
        ));
        assert!(matches!(
            PotentialProfile::new(positions.clone(), DVector::from_vec(vec![1., f64::NAN, 3.])),
            Err(FerroDiodeError::Numerical(NumericalError::NonFinite {
                quantity: "potential"
            }))
        ));
        let profile =
            PotentialProfile::new(positions, DVector::from_vec(vec![1., 3., 2.])).unwrap();
        assert_eq!(profile.maximum(), 3.);
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn assembled_profile_steps_at_the_oxide() {
        let stack = LayerStack::<f64>::standard_structure(
            &MaterialDatabase::default(),
            &StandardStructure::default(),
        )
        .unwrap();
        let barriers = BarrierHeights::from_layer_stack(&stack).unwrap();
        let positions = stack.position_grid(27).unwrap();
        let flat = DVector::zeros(positions.len());
        let profile = PotentialProfile::assemble(&stack, &positions, &barriers, &flat).unwrap();

        for (&x, &v) in profile.positions().iter().zip(profile.potential().iter()) {
            let expected = if x < 11e-9 * (1. - 1e-12) {
                barriers.ferroelectric
            } else {
                barriers.oxide
            };
            assert_eq!(v, expected);
        }
        assert_eq!(profile.maximum(), barriers.oxide);
    }
}
