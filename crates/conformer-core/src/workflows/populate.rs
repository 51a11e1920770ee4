use crate::core::models::molecule::Molecule;
use crate::engine::config::PopulationConfig;
use crate::engine::error::EngineError;
use crate::engine::thermostat::Ensemble;
use tracing::{info, instrument};

/// Outcome of a population assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationReport {
    pub ensemble: Ensemble,
    pub temperature: f64,
    pub populations: Vec<f64>,
    /// Index of the most populated frame (the first one on ties).
    pub dominant_frame: usize,
    /// Population-weighted mean potential energy, when every frame has an energy.
    pub mean_energy: Option<f64>,
}

#[instrument(skip_all, name = "populate_workflow")]
pub fn run(
    molecule: &mut Molecule,
    config: &PopulationConfig,
) -> Result<PopulationReport, EngineError> {
    info!(
        molecule = molecule.name(),
        ensemble = %config.ensemble,
        temperature = config.temperature,
        "Computing frame populations."
    );

    config.thermostat().set_populations(molecule)?;

    let populations = molecule.populations().to_vec();
    let dominant_frame = populations
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &p)| {
            if p > best.1 { (i, p) } else { best }
        })
        .0;
    let mean_energy = molecule
        .energies()
        .zip(populations.iter())
        .map(|(energy, p)| energy.map(|e| e * p))
        .sum::<Option<f64>>();

    info!(
        dominant_frame,
        population = populations[dominant_frame],
        "Population assignment complete."
    );

    Ok(PopulationReport {
        ensemble: config.ensemble,
        temperature: config.temperature,
        populations,
        dominant_frame,
        mean_energy,
    })
}
