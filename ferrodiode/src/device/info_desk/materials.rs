use super::MaterialInfoDesk;
use nalgebra::RealField;
use std::collections::{BTreeMap, BTreeSet};

/// Work functions in eV
const WORK_FUNCTIONS: [(&str, f64); 14] = [
    ("Au", 5.10),
    ("Pt", 5.65),
    ("Pd", 5.12),
    ("Ag", 4.26),
    ("Cu", 4.65),
    ("Al", 4.28),
    ("Ti", 4.33),
    ("Cr", 4.50),
    ("Ni", 5.15),
    ("W", 4.55),
    ("Mo", 4.36),
    ("Ta", 4.25),
    ("Si", 4.85),
    ("Ge", 5.00),
];

/// Electron affinities in eV
const ELECTRON_AFFINITIES: [(&str, f64); 8] = [
    ("BaTiO3", 4.0),
    ("PbTiO3", 3.9),
    ("PZT", 4.1),
    ("HfO2", 2.4),
    ("BFO", 4.2),
    ("SiO2", 0.9),
    ("Al2O3", 2.8),
    ("TiO2", 4.2),
];

const DIELECTRIC_CONSTANTS: [(&str, f64); 13] = [
    ("BaTiO3", 1700.),
    ("PbTiO3", 200.),
    ("PZT", 1000.),
    ("HfO2", 25.),
    ("BFO", 100.),
    ("SiO2", 3.9),
    ("Al2O3", 9.0),
    ("TiO2", 80.),
    ("Au", 1.0),
    ("Pt", 1.0),
    ("Al", 1.0),
    ("Ti", 1.0),
    ("Cu", 1.0),
];

/// A table-backed `MaterialInfoDesk`
///
/// `MaterialDatabase::default()` holds the reference electrode and oxide data. Entries can be
/// added or overridden with the `with_*` methods, which makes it easy to build fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDatabase {
    work_functions: BTreeMap<String, f64>,
    electron_affinities: BTreeMap<String, f64>,
    dielectric_constants: BTreeMap<String, f64>,
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|&(material, value)| (material.to_string(), value))
        .collect()
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self {
            work_functions: table(&WORK_FUNCTIONS),
            electron_affinities: table(&ELECTRON_AFFINITIES),
            dielectric_constants: table(&DIELECTRIC_CONSTANTS),
        }
    }
}

impl MaterialDatabase {
    /// A database with no entries
    pub fn empty() -> Self {
        Self {
            work_functions: BTreeMap::new(),
            electron_affinities: BTreeMap::new(),
            dielectric_constants: BTreeMap::new(),
        }
    }

    /// Adds or replaces the work function of `material`, in eV
    pub fn with_work_function(mut self, material: &str, value: f64) -> Self {
        self.work_functions.insert(material.to_string(), value);
        self
    }

    /// Adds or replaces the electron affinity of `material`, in eV
    pub fn with_electron_affinity(mut self, material: &str, value: f64) -> Self {
        self.electron_affinities.insert(material.to_string(), value);
        self
    }

    /// Adds or replaces the dielectric constant of `material`
    pub fn with_dielectric_constant(mut self, material: &str, value: f64) -> Self {
        self.dielectric_constants.insert(material.to_string(), value);
        self
    }
}

impl<T: RealField> MaterialInfoDesk<T> for MaterialDatabase {
    fn work_function(&self, material: &str) -> Option<T> {
        self.work_functions
            .get(material)
            .map(|&value| nalgebra::convert(value))
    }

    fn electron_affinity(&self, material: &str) -> Option<T> {
        self.electron_affinities
            .get(material)
            .map(|&value| nalgebra::convert(value))
    }

    fn dielectric_constant(&self, material: &str) -> Option<T> {
        self.dielectric_constants
            .get(material)
            .map(|&value| nalgebra::convert(value))
    }

    fn materials(&self) -> Vec<String> {
        self.work_functions
            .keys()
            .chain(self.electron_affinities.keys())
            .chain(self.dielectric_constants.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{MaterialDatabase, MaterialInfoDesk};

    #[test]
    fn reference_work_functions() {
        let info_desk = MaterialDatabase::default();
        let gold: Option<f64> = info_desk.work_function("Au");
        assert_eq!(gold, Some(5.10));
        for (material, expected) in [("Pt", 5.65), ("Ti", 4.33), ("Al", 4.28), ("Cu", 4.65)] {
            assert_eq!(info_desk.work_function(material), Some(expected));
        }
    }

    #[test]
    fn unknown_materials_are_none() {
        let info_desk = MaterialDatabase::default();
        let value: Option<f64> = info_desk.work_function("HfO2");
        assert_eq!(value, None);
        let value: Option<f64> = info_desk.dielectric_constant("Kryptonite");
        assert_eq!(value, None);
    }

    #[test]
    fn material_list_is_sorted_and_unique() {
        let info_desk = MaterialDatabase::default();
        let materials = MaterialInfoDesk::<f64>::materials(&info_desk);
        assert!(!materials.is_empty());
        assert!(materials.windows(2).all(|pair| pair[0] < pair[1]));
        // Au carries both a work function and a dielectric constant but is listed once
        assert_eq!(materials.iter().filter(|m| m.as_str() == "Au").count(), 1);
    }

    #[test]
    fn overrides_replace_reference_values() {
        let info_desk = MaterialDatabase::empty()
            .with_work_function("Au", 5.3)
            .with_electron_affinity("X", 1.0);
        assert_eq!(MaterialInfoDesk::<f64>::work_function(&info_desk, "Au"), Some(5.3));
        assert_eq!(MaterialInfoDesk::<f64>::work_function(&info_desk, "Pt"), None);
        assert_eq!(
            MaterialInfoDesk::<f64>::materials(&info_desk),
            vec!["Au".to_string(), "X".to_string()]
        );
    }
}
