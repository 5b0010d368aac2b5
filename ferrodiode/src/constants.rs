// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used in the simulation, all in SI units

/// The Boltzmann constant in J / K
pub const BOLTZMANN: f64 = 1.380649e-23;
/// Single electron charge in C
pub const ELECTRON_CHARGE: f64 = 1.602176634e-19;
/// Free electron mass in kg
pub const ELECTRON_MASS: f64 = 9.1093837e-31;
/// Permittivity of free space in F / m
pub const EPSILON_0: f64 = 8.854187e-12;
/// Reduced Planck constant in J s
pub const HBAR: f64 = 1.054571817e-34;
/// The Boltzmann constant in eV / K
pub const BOLTZMANN_EV: f64 = BOLTZMANN / ELECTRON_CHARGE;
/// Conversion factor from nanometres to metres
pub const NANOMETRE: f64 = 1e-9;
