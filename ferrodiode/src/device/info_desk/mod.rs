//! Material properties and where they come from
//!
//! Calculations never reach for a global table: everything that needs a material property is
//! handed an implementation of `MaterialInfoDesk`. A property the desk does not know is `None`,
//! and every consumer has to decide explicitly what a missing value means for it.

mod materials;

pub use materials::MaterialDatabase;

use crate::error::{ConfigurationError, MaterialProperty};
use nalgebra::RealField;

/// A source of material parameters, keyed by material identifier
pub trait MaterialInfoDesk<T: RealField> {
    /// Work function in eV
    fn work_function(&self, material: &str) -> Option<T>;
    /// Electron affinity in eV
    fn electron_affinity(&self, material: &str) -> Option<T>;
    /// Static dielectric constant
    fn dielectric_constant(&self, material: &str) -> Option<T>;
    /// Every identifier with at least one known property, sorted
    fn materials(&self) -> Vec<String>;

    /// Collects everything the desk knows about `material`
    fn material(&self, material: &str) -> Material<T> {
        Material {
            id: material.to_string(),
            work_function: self.work_function(material),
            electron_affinity: self.electron_affinity(material),
            dielectric_constant: self.dielectric_constant(material),
        }
    }
}

/// A material resolved against an info desk
///
/// Each property is either known or explicitly unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Material<T> {
    id: String,
    work_function: Option<T>,
    electron_affinity: Option<T>,
    dielectric_constant: Option<T>,
}

impl<T: Copy + RealField> Material<T> {
    /// The identifier used to look the material up
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Work function in eV, if known
    pub fn work_function(&self) -> Option<T> {
        self.work_function
    }

    /// Electron affinity in eV, if known
    pub fn electron_affinity(&self) -> Option<T> {
        self.electron_affinity
    }

    /// Static dielectric constant, if known
    pub fn dielectric_constant(&self) -> Option<T> {
        self.dielectric_constant
    }

    /// Whether the info desk knew anything at all about this material
    pub fn is_known(&self) -> bool {
        self.work_function.is_some()
            || self.electron_affinity.is_some()
            || self.dielectric_constant.is_some()
    }

    /// The work function, or an error naming the material
    pub fn require_work_function(&self) -> Result<T, ConfigurationError> {
        self.require(self.work_function, MaterialProperty::WorkFunction)
    }

    /// The electron affinity, or an error naming the material
    pub fn require_electron_affinity(&self) -> Result<T, ConfigurationError> {
        self.require(self.electron_affinity, MaterialProperty::ElectronAffinity)
    }

    /// The dielectric constant, or an error naming the material
    pub fn require_dielectric_constant(&self) -> Result<T, ConfigurationError> {
        self.require(self.dielectric_constant, MaterialProperty::DielectricConstant)
    }

    fn require(
        &self,
        value: Option<T>,
        property: MaterialProperty,
    ) -> Result<T, ConfigurationError> {
        value.ok_or_else(|| ConfigurationError::UnknownProperty {
            material: self.id.clone(),
            property,
        })
    }
}
