use super::thermostat::{DEFAULT_TEMPERATURE, Ensemble, Thermostat};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationConfig {
    pub ensemble: Ensemble,
    /// Temperature in Kelvin.
    pub temperature: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            ensemble: Ensemble::Nve,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl PopulationConfig {
    pub fn thermostat(&self) -> Thermostat {
        Thermostat::with_settings(self.ensemble, self.temperature)
    }
}

#[derive(Default)]
pub struct PopulationConfigBuilder {
    ensemble: Option<Ensemble>,
    temperature: Option<f64>,
}

impl PopulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensemble(mut self, ensemble: Ensemble) -> Self {
        self.ensemble = Some(ensemble);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> Result<PopulationConfig, ConfigError> {
        Ok(PopulationConfig {
            ensemble: self
                .ensemble
                .ok_or(ConfigError::MissingParameter("ensemble"))?,
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
        })
    }
}
