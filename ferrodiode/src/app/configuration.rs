use crate::transport::QuadratureSettings;
use color_eyre::eyre::eyre;
use config::{Config, File};
use serde::{de::DeserializeOwned, Deserialize};
use std::env;
use std::path::{Path, PathBuf};

/// Numerical settings shared by every device
#[derive(Debug, Deserialize)]
pub(crate) struct Configuration<T> {
    pub(crate) mesh: MeshConfiguration,
    pub(crate) transport: TransportConfiguration<T>,
    pub(crate) sweep: SweepConfiguration<T>,
    pub(crate) output: OutputConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeshConfiguration {
    pub(crate) number_of_points: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransportConfiguration<T> {
    pub(crate) effective_mass: T,
    pub(crate) quadrature: QuadratureConfiguration<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuadratureConfiguration<T> {
    pub(crate) absolute_tolerance: T,
    pub(crate) relative_tolerance: T,
    pub(crate) maximum_subdivisions: usize,
}

impl<T: Copy> QuadratureConfiguration<T> {
    pub(crate) fn settings(&self) -> QuadratureSettings<T> {
        QuadratureSettings {
            absolute_tolerance: self.absolute_tolerance,
            relative_tolerance: self.relative_tolerance,
            maximum_subdivisions: self.maximum_subdivisions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SweepConfiguration<T> {
    pub(crate) minimum_energy: T,
    pub(crate) maximum_energy: T,
    pub(crate) number_of_energies: usize,
}

/// Where the run leaves its log
#[derive(Debug, Deserialize)]
pub(crate) struct OutputConfiguration {
    pub(crate) directory: PathBuf,
    pub(crate) log_file: String,
}

impl OutputConfiguration {
    pub(crate) fn log_path(&self) -> PathBuf {
        self.directory.join(&self.log_file)
    }
}

impl<T: DeserializeOwned> Configuration<T> {
    /// Reads `default.toml` and the optional `$RUN_MODE.toml` overrides from
    /// `$FERRODIODE_CONFIG_DIR`, or `.config` when it is unset
    pub(crate) fn build() -> color_eyre::Result<Self> {
        let directory = env::var("FERRODIODE_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".config"));
        Self::from_directory(&directory)
    }

    pub(crate) fn from_directory(directory: &Path) -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::from(directory.join("default.toml")))
            .add_source(File::from(directory.join(format!("{}.toml", run_mode))).required(false))
            .build()?;

        s.try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shipped_defaults_are_valid() {
        let directory = Path::new(env!("CARGO_MANIFEST_DIR")).join("../.config");
        let config: Configuration<f64> = Configuration::from_directory(&directory).unwrap();
        assert!(config.transport.effective_mass > 0.);
        assert!(config.transport.quadrature.settings().validate().is_ok());
        assert!(config.sweep.minimum_energy < config.sweep.maximum_energy);
        assert!(config.sweep.number_of_energies >= 2);
        assert!(config.mesh.number_of_points >= 6);
        assert_eq!(
            config.output.log_path(),
            PathBuf::from("results").join("ferrodiode.log")
        );
    }

    #[test]
    fn missing_defaults_are_an_error() {
        let directory = std::env::temp_dir().join("ferrodiode-no-config");
        assert!(Configuration::<f64>::from_directory(&directory).is_err());
    }
}
