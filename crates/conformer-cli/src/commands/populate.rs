use crate::cli::PopulateArgs;
use crate::config::{PopulateConfig, build_populate_config};
use crate::error::Result;
use conformers::core::io::energies::{EnergyTable, write_populations};
use conformers::core::models::molecule::Molecule;
use conformers::workflows::{self, populate::PopulationReport};
use std::fs::File;
use tracing::{info, warn};

pub fn run(args: PopulateArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_populate_config(&args)?;

    let (molecule, report) = compute_populations(&config)?;

    match &config.output_path {
        Some(path) => {
            info!("Writing population table to {:?}", path);
            write_populations(&molecule, File::create(path)?)?;
            println!(
                "✓ {} populations for {} frame(s) at {:.2} K written to: {}",
                report.ensemble,
                report.populations.len(),
                report.temperature,
                path.display()
            );
            println!(
                "  Most populated frame: {} ({:.4})",
                report.dominant_frame, report.populations[report.dominant_frame]
            );
            if let Some(mean) = report.mean_energy {
                println!("  Population-weighted mean energy: {:.4} kcal/mol", mean);
            }
        }
        None => write_populations(&molecule, std::io::stdout().lock())?,
    }

    Ok(())
}

fn compute_populations(config: &PopulateConfig) -> Result<(Molecule, PopulationReport)> {
    info!("Loading energy table from {:?}", &config.energies_path);
    let table = if config.plain_text {
        let content = std::fs::read_to_string(&config.energies_path)?;
        EnergyTable::from_text(&content)?
    } else {
        EnergyTable::from_csv_path(&config.energies_path)?
    };

    if table.len() < table.frame_span() {
        warn!(
            listed = table.len(),
            frames = table.frame_span(),
            "Energy table has gaps; unlisted frames have no energy."
        );
    }

    let name = config
        .energies_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut molecule = table.to_molecule(name);
    let report = workflows::populate::run(&mut molecule, &config.population)?;

    info!(
        "Assigned {} populations to {} frame(s).",
        report.ensemble,
        molecule.n_frames()
    );
    Ok((molecule, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use conformers::engine::config::PopulationConfig;
    use conformers::engine::error::{EngineError, InvalidStateError};
    use conformers::engine::thermostat::Ensemble;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_for(path: &Path, plain_text: bool, ensemble: Ensemble) -> PopulateConfig {
        PopulateConfig {
            energies_path: path.to_path_buf(),
            plain_text,
            output_path: None,
            population: PopulationConfig {
                ensemble,
                temperature: 298.15,
            },
        }
    }

    #[test]
    fn csv_energies_produce_boltzmann_populations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.csv");
        fs::write(&path, "frame,energy\n0,0.0\n1,0.5\n2,1.0\n").unwrap();

        let (molecule, report) =
            compute_populations(&config_for(&path, false, Ensemble::Nvt)).unwrap();

        assert_eq!(molecule.name(), "scan");
        assert_eq!(report.dominant_frame, 0);
        let sum: f64 = molecule.populations().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn plain_text_energies_are_supported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pasted.txt");
        fs::write(&path, "1.0\n0.2\n0.6\n").unwrap();

        let (_, report) = compute_populations(&config_for(&path, true, Ensemble::Nvt)).unwrap();

        assert_eq!(report.dominant_frame, 1);
    }

    #[test]
    fn missing_energy_under_nvt_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.csv");
        fs::write(&path, "frame,energy\n0,0.0\n2,1.0\n").unwrap();

        let result = compute_populations(&config_for(&path, false, Ensemble::Nvt));

        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::InvalidState(
                InvalidStateError::MissingEnergy { frame: 1 }
            )))
        ));
    }

    #[test]
    fn gaps_are_fine_under_nve() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.csv");
        fs::write(&path, "frame,energy\n0,0.0\n3,1.0\n").unwrap();

        let (molecule, _) =
            compute_populations(&config_for(&path, false, Ensemble::Nve)).unwrap();

        assert_eq!(molecule.populations(), &[0.25; 4]);
    }

    #[test]
    fn run_writes_population_table_to_output_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("energies.csv");
        let output = dir.path().join("populations.csv");
        fs::write(&input, "frame,energy\n0,2.0\n1,2.0\n").unwrap();

        let args = PopulateArgs {
            energies: input,
            text: false,
            output: Some(output.clone()),
            config: None,
            ensemble: Some(Ensemble::Nvt),
            temperature: None,
            set_values: Vec::new(),
        };
        run(args).unwrap();

        let content = fs::read_to_string(output).unwrap();
        assert_eq!(content, "frame,energy,population\n0,2.0,0.5\n1,2.0,0.5\n");
    }
}
