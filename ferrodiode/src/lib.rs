// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Ferrodiode models the electrostatics and tunnelling transport of ferroelectric diodes
//!
//! # Overview
//! Ferrodiode describes a metal / dead layer / ferroelectric / oxide / metal stack. The polarisation
//! of the ferroelectric is incompletely screened by the finite Thomas-Fermi length of the
//! electrodes, which leaves a depolarisation field across every insulating layer. Those fields,
//! superposed on the band offsets at each metal-insulator interface, define the potential energy
//! landscape an electron must tunnel through.
//!
//! The crate provides
//! - an immutable [`device::LayerStack`] built from a [`device::MaterialInfoDesk`],
//! - a closed-form series-capacitor model of the screening charge and depolarisation fields,
//! - a closed-form estimate of the voltage at which the polarisation switches,
//! - a WKB estimate of the transmission coefficient and the resulting current density.
//!
//! Every calculation is a pure function of its inputs, so sweeps over energy or bias can be
//! distributed over threads by the caller.
//!
//! # Usage
//! The crate is also distributed as a binary. Describe a device in a `.toml` file:
//!
//! ```toml
//! temperature = 300.0
//! voltages = [-0.5, 0.0, 0.5]
//!
//! [electrodes]
//! bottom = "Ti"
//! top = "Au"
//!
//! [ferroelectric]
//! material = "HfO2"
//! thickness = 10.0
//! dead_layer_thickness = 1.0
//! polarization = 0.2
//! coercive_field = 1.0e8
//!
//! [oxide]
//! material = "Al2O3"
//! thickness = 2.0
//! ```
//!
//! and run `ferrodiode device.toml --calculation summary`.

#![warn(missing_docs)]

/// The command line application, configuration and tracing
pub mod app;

/// Interface barriers and the potential energy profile
pub mod barrier;

/// Physical constants
pub mod constants;

/// Materials and the layered device geometry
pub mod device;

/// Screening charge, depolarisation fields and the electrostatic potential
pub mod electrostatics;

/// Error handling
pub mod error;

/// The ferroelectric switching voltage
pub mod switching;

/// WKB transmission and tunnelling current
pub mod transport;

pub use error::{ConfigurationError, FerroDiodeError, LookupError, NumericalError};
