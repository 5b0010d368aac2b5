//! # App
//!
//! The command line front end: reads a device file and the numerical configuration, installs the
//! tracing subscriber and dispatches to the requested calculation.

mod calculations;
mod configuration;
mod telemetry;

pub(crate) use configuration::Configuration;

use crate::device::Device;
use crate::transport::TunnelingCalculator;
use clap::{ArgEnum, Parser};
use color_eyre::eyre::eyre;
use nalgebra::RealField;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// The device description, a `.toml` file
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long, default_value = "summary")]
    calculation: Calculation,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum Calculation {
    /// Report the geometry, barriers, screening and switching voltage
    Summary,
    /// Transmission against energy at zero bias
    Transmission,
    /// Current density at each bias listed in the device file
    Current,
}

/// Parses the command line and runs the requested calculation
pub fn run<T>() -> color_eyre::Result<()>
where
    T: Copy + DeserializeOwned + RealField + Send + Sync,
{
    color_eyre::install()?;
    let cli = App::parse();

    let config: Configuration<T> = Configuration::build()?;

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &config.output)?;
    telemetry::init_subscriber(subscriber)?;
    tracing::debug!(log = %config.output.log_path().display(), "Logging initialised");

    let path = cli
        .file_path
        .ok_or_else(|| eyre!("A file path needs to be passed."))?;
    tracing::info!("Reading device from {}", path.display());

    let device: Device<T> = Device::build(path)?;
    let info_desk = device.info_desk();
    let stack = device.layer_stack(&info_desk)?;
    let dielectric = device.dielectric_stack(&stack)?;

    let calculator = TunnelingCalculator::new()
        .with_effective_mass(config.transport.effective_mass)?
        .with_quadrature(config.transport.quadrature.settings())?;

    let context = calculations::Context {
        config: &config,
        device: &device,
        stack: &stack,
        dielectric: &dielectric,
        calculator: &calculator,
    };

    match cli.calculation {
        Calculation::Summary => calculations::summary(&context)?,
        Calculation::Transmission => calculations::transmission_sweep(&context)?,
        Calculation::Current => calculations::current_sweep(&context)?,
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn log_levels_parse_as_env_filter_directives() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            assert!(tracing_subscriber::EnvFilter::try_new(level.to_string()).is_ok());
        }
    }

    #[test]
    fn command_line_is_parsed() {
        let app = App::parse_from(["ferrodiode", "device.toml", "-c", "current", "-l", "debug"]);
        assert_eq!(app.file_path, Some(PathBuf::from("device.toml")));
        assert_eq!(app.calculation, Calculation::Current);
        assert_eq!(app.log_level, LogLevel::Debug);

        let app = App::parse_from(["ferrodiode", "device.toml"]);
        assert_eq!(app.calculation, Calculation::Summary);
        assert_eq!(app.log_level, LogLevel::Info);
    }
}
