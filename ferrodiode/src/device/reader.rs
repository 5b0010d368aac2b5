use super::{LayerStack, LayerStackBuilder, MaterialDatabase};
use crate::constants::{ELECTRON_CHARGE, NANOMETRE};
use crate::electrostatics::{DielectricStack, ElectrodeScreening, Polarization};
use crate::error::ConfigurationError;
use color_eyre::eyre::eyre;
use config::{Config, File};
use nalgebra::RealField;
use serde::{de::DeserializeOwned, Deserialize};
use std::path::PathBuf;

/// A diode as described in a device file
///
/// Thicknesses are given in nm, the Fermi energy of the electrodes in eV, everything else in SI.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Device<T> {
    /// Temperature in K
    pub temperature: T,
    /// The applied biases to evaluate, in V
    #[serde(default)]
    pub voltages: Vec<T>,
    /// Electrode materials
    pub electrodes: Electrodes,
    /// The ferroelectric and its dead layer
    pub ferroelectric: FerroelectricDescription<T>,
    /// The insulating layer under the top electrode
    pub oxide: OxideDescription<T>,
    /// Thomas-Fermi parameters for non-ideal electrodes
    #[serde(default)]
    pub screening: Option<Screening<T>>,
    /// Additions to, or replacements for, the built-in material table
    #[serde(default)]
    pub materials: Vec<MaterialOverride>,
}

/// Electrode material identifiers
#[derive(Debug, Deserialize)]
pub struct Electrodes {
    /// The electrode under the dead layer
    pub bottom: String,
    /// The electrode on the oxide
    pub top: String,
}

/// The ferroelectric film and its dead layer, which shares its material
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct FerroelectricDescription<T> {
    /// Material identifier
    pub material: String,
    /// Thickness in nm
    pub thickness: T,
    /// Dead layer thickness in nm, zero when absent
    #[serde(default)]
    pub dead_layer_thickness: Option<T>,
    /// Spontaneous polarisation in C / m^2
    pub polarization: T,
    /// Residual polarisation of the dead layer in C / m^2, zero when absent
    #[serde(default)]
    pub dead_layer_polarization: Option<T>,
    /// Coercive field in V / m
    pub coercive_field: T,
}

/// The insulating layer under the top electrode
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct OxideDescription<T> {
    /// Material identifier
    pub material: String,
    /// Thickness in nm, zero for a bare ferroelectric
    pub thickness: T,
}

/// Thomas-Fermi parameters of each electrode
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Screening<T> {
    /// Screening in the bottom electrode, ideal when absent
    #[serde(default)]
    pub bottom: Option<ThomasFermiParameters<T>>,
    /// Screening in the top electrode, ideal when absent
    #[serde(default)]
    pub top: Option<ThomasFermiParameters<T>>,
}

/// Parameters fixing the Thomas-Fermi screening length of a metal
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ThomasFermiParameters<T> {
    /// Background dielectric constant of the metal
    pub dielectric_constant: T,
    /// Fermi energy in eV
    pub fermi_energy: T,
    /// Free electron density in m^-3
    pub free_electron_density: T,
}

/// A single entry of the material table
///
/// The file lists these as an array of tables, as keys of the `config` crate are not case
/// sensitive and material identifiers are.
#[derive(Debug, Deserialize)]
pub struct MaterialOverride {
    /// Material identifier
    pub id: String,
    /// Work function in eV
    #[serde(default)]
    pub work_function: Option<f64>,
    /// Electron affinity in eV
    #[serde(default)]
    pub electron_affinity: Option<f64>,
    /// Static dielectric constant
    #[serde(default)]
    pub dielectric_constant: Option<f64>,
}

impl<T: DeserializeOwned + Copy + RealField> Device<T> {
    /// Reads a device file, the format follows from the extension
    pub fn build(path: PathBuf) -> color_eyre::Result<Self> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        s.try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize device: {:?}", e))
    }

    /// The built-in material table with the overrides from the file applied
    pub fn info_desk(&self) -> MaterialDatabase {
        self.materials
            .iter()
            .fold(MaterialDatabase::default(), |database, entry| {
                let database = match entry.work_function {
                    Some(value) => database.with_work_function(&entry.id, value),
                    None => database,
                };
                let database = match entry.electron_affinity {
                    Some(value) => database.with_electron_affinity(&entry.id, value),
                    None => database,
                };
                match entry.dielectric_constant {
                    Some(value) => database.with_dielectric_constant(&entry.id, value),
                    None => database,
                }
            })
    }

    /// Builds the five layer stack, converting thicknesses to m
    pub fn layer_stack(
        &self,
        info_desk: &MaterialDatabase,
    ) -> Result<LayerStack<T>, ConfigurationError> {
        let nanometre: T = nalgebra::convert(NANOMETRE);
        LayerStackBuilder::new()
            .with_info_desk(info_desk)
            .with_bottom_electrode(&self.electrodes.bottom)
            .with_top_electrode(&self.electrodes.top)
            .with_ferroelectric(
                &self.ferroelectric.material,
                self.ferroelectric.thickness * nanometre,
            )
            .with_dead_layer(
                self.ferroelectric
                    .dead_layer_thickness
                    .unwrap_or_else(T::zero)
                    * nanometre,
            )
            .with_oxide(&self.oxide.material, self.oxide.thickness * nanometre)
            .build()
    }

    /// The series-capacitor model of `stack` with the polarisation and screening from the file
    pub fn dielectric_stack(
        &self,
        stack: &LayerStack<T>,
    ) -> Result<DielectricStack<T>, ConfigurationError> {
        let charge: T = nalgebra::convert(ELECTRON_CHARGE);
        let electrode = |parameters: Option<&ThomasFermiParameters<T>>| match parameters {
            Some(p) => ElectrodeScreening::from_thomas_fermi(
                p.dielectric_constant,
                p.fermi_energy * charge,
                p.free_electron_density,
            ),
            None => Ok(ElectrodeScreening::ideal()),
        };
        let screening = self.screening.as_ref();

        DielectricStack::from_layer_stack(
            stack,
            Polarization {
                ferroelectric: self.ferroelectric.polarization,
                dead_layer: self
                    .ferroelectric
                    .dead_layer_polarization
                    .unwrap_or_else(T::zero),
            },
            electrode(screening.and_then(|s| s.bottom.as_ref()))?,
            electrode(screening.and_then(|s| s.top.as_ref()))?,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::{LayerRole, MaterialInfoDesk};
    use approx::assert_relative_eq;
    use std::io::Write;

    fn write_device(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const DEVICE: &str = r#"
temperature = 300.0
voltages = [-0.5, 0.0, 0.5]

[electrodes]
bottom = "Ti"
top = "Foo"

[ferroelectric]
material = "HfO2"
thickness = 10.0
dead_layer_thickness = 1.0
polarization = 0.2
coercive_field = 1.0e8

[oxide]
material = "Al2O3"
thickness = 2.0

[screening.bottom]
dielectric_constant = 1.0
fermi_energy = 5.0
free_electron_density = 5.7e28

[[materials]]
id = "Foo"
work_function = 4.9
"#;

    #[test]
    fn device_files_are_read() {
        let path = write_device("ferrodiode-device", DEVICE);
        let device: Device<f64> = Device::build(path.clone()).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(device.voltages, vec![-0.5, 0., 0.5]);
        let info_desk = device.info_desk();
        assert_eq!(
            MaterialInfoDesk::<f64>::work_function(&info_desk, "Foo"),
            Some(4.9)
        );

        let stack = device.layer_stack(&info_desk).unwrap();
        assert_relative_eq!(stack.total_thickness(), 13e-9, max_relative = 1e-12);
        assert_relative_eq!(stack.built_in_voltage(), 4.33 - 4.9, max_relative = 1e-12);

        let dielectric = device.dielectric_stack(&stack).unwrap();
        assert!(dielectric.bottom_electrode.screening_length > 0.);
        assert_eq!(dielectric.top_electrode, ElectrodeScreening::ideal());
        assert_eq!(dielectric.dead_layer.polarization, 0.);
        assert_relative_eq!(
            dielectric.ferroelectric.thickness,
            stack.thickness_of(LayerRole::Ferroelectric)
        );
    }

    #[test]
    fn unknown_electrodes_fail_to_build() {
        let contents = DEVICE.replace("[[materials]]\nid = \"Foo\"\nwork_function = 4.9\n", "");
        let path = write_device("ferrodiode-unknown", &contents);
        let device: Device<f64> = Device::build(path.clone()).unwrap();
        std::fs::remove_file(path).unwrap();
        assert!(matches!(
            device.layer_stack(&device.info_desk()),
            Err(ConfigurationError::UnknownProperty { .. })
        ));
    }
}
