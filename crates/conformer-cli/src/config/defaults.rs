use conformers::engine::thermostat::{DEFAULT_TEMPERATURE, Ensemble};

pub struct DefaultsConfig {
    pub ensemble: Ensemble,
    pub temperature: f64,
    pub scale: f64,
    pub blocked: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ensemble: Ensemble::Nve,
            temperature: DEFAULT_TEMPERATURE,
            scale: 1.0,
            blocked: true,
        }
    }
}
