use super::error::{EngineError, InvalidStateError, PreconditionError};
use crate::core::models::molecule::Molecule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Gas constant in kcal mol⁻¹ K⁻¹.
pub const GAS_CONSTANT: f64 = 1.98588e-3;

/// Default temperature in Kelvin.
pub const DEFAULT_TEMPERATURE: f64 = 298.15;

const DEGENERATE_POPULATION: f64 = 1.0 - 1e-12;

/// Statistical-mechanical regime used to assign frame populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensemble {
    /// Microcanonical: every frame is equally populated.
    #[default]
    Nve,
    /// Canonical: frames are Boltzmann-weighted by their potential energy.
    Nvt,
}

impl fmt::Display for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ensemble::Nve => write!(f, "NVE"),
            Ensemble::Nvt => write!(f, "NVT"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown ensemble '{0}'. Expected 'nve' or 'nvt'.")]
pub struct ParseEnsembleError(pub String);

impl FromStr for Ensemble {
    type Err = ParseEnsembleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nve" => Ok(Ensemble::Nve),
            "nvt" => Ok(Ensemble::Nvt),
            _ => Err(ParseEnsembleError(s.to_string())),
        }
    }
}

/// Assigns statistical populations to the frames of a molecule.
///
/// The thermostat holds only the ensemble policy and the temperature; it never owns
/// the molecule it populates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermostat {
    ensemble: Ensemble,
    /// Temperature in Kelvin.
    temperature: f64,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self {
            ensemble: Ensemble::Nve,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Thermostat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(ensemble: Ensemble, temperature: f64) -> Self {
        Self {
            ensemble,
            temperature,
        }
    }

    pub fn ensemble(&self) -> Ensemble {
        self.ensemble
    }

    pub fn set_ensemble(&mut self, ensemble: Ensemble) {
        self.ensemble = ensemble;
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Stores the temperature in Kelvin. The value is checked only when a Boltzmann
    /// distribution is computed.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    /// Replaces the molecule's population vector according to the ensemble.
    ///
    /// # Errors
    ///
    /// - [`InvalidStateError::MissingEnergy`] under NVT when a frame has no energy.
    /// - [`PreconditionError::EmptyMolecule`] when the molecule has no frames.
    /// - [`PreconditionError::NonPositiveTemperature`] under NVT for `T <= 0`.
    ///
    /// On error the previous population vector is left untouched.
    #[instrument(skip_all, name = "set_populations")]
    pub fn set_populations(&self, molecule: &mut Molecule) -> Result<(), EngineError> {
        debug!(
            ensemble = %self.ensemble,
            temperature = self.temperature,
            frames = molecule.n_frames(),
            "Assigning frame populations."
        );

        let populations = match self.ensemble {
            Ensemble::Nvt => {
                let energies: Vec<Option<f64>> = molecule.energies().collect();
                boltzmann_populations(&energies, self.temperature)?
            }
            Ensemble::Nve => uniform_populations(molecule.n_frames())?,
        };

        if populations.len() > 1 && populations.iter().any(|&p| p > DEGENERATE_POPULATION) {
            warn!(
                temperature = self.temperature,
                "A single frame holds essentially the whole population."
            );
        }

        molecule.set_populations(populations)?;
        Ok(())
    }
}

/// Equal populations `1/n` for `n` frames.
pub fn uniform_populations(n_frames: usize) -> Result<Vec<f64>, EngineError> {
    if n_frames == 0 {
        return Err(PreconditionError::EmptyMolecule.into());
    }
    Ok(vec![1.0 / n_frames as f64; n_frames])
}

/// Normalized Boltzmann weights `exp(-e_i / kT)` for per-frame energies in kcal/mol.
///
/// Energies are shifted by their minimum before exponentiation. The shift cancels in
/// the normalization and keeps every weight within `(0, 1]`.
pub fn boltzmann_populations(
    energies: &[Option<f64>],
    temperature: f64,
) -> Result<Vec<f64>, EngineError> {
    let energies = defined_energies(energies)?;
    if energies.is_empty() {
        return Err(PreconditionError::EmptyMolecule.into());
    }
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(PreconditionError::NonPositiveTemperature(temperature).into());
    }

    // A subnormal temperature can still underflow kT to zero.
    let kt = GAS_CONSTANT * temperature;
    if !(kt > 0.0 && kt.is_finite()) {
        return Err(PreconditionError::NonPositiveTemperature(temperature).into());
    }

    let e_min = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = energies.iter().map(|e| (-(e - e_min) / kt).exp()).collect();
    let partition: f64 = weights.iter().sum();
    if !(partition > 0.0 && partition.is_finite()) {
        return Err(PreconditionError::NonPositiveTemperature(temperature).into());
    }

    Ok(weights.into_iter().map(|w| w / partition).collect())
}

fn defined_energies(energies: &[Option<f64>]) -> Result<Vec<f64>, InvalidStateError> {
    energies
        .iter()
        .enumerate()
        .map(|(frame, energy)| match energy {
            None => Err(InvalidStateError::MissingEnergy { frame }),
            Some(value) if !value.is_finite() => Err(InvalidStateError::NonFiniteEnergy {
                frame,
                value: *value,
            }),
            Some(value) => Ok(*value),
        })
        .collect()
}
