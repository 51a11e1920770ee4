use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{PopulateConfig, TransformConfig};
use crate::cli::{PopulateArgs, TransformArgs};
use crate::error::{CliError, Result};
use conformers::engine::config::PopulationConfigBuilder;
use conformers::engine::thermostat::Ensemble;
use nalgebra::Point3;
use std::path::Path;

pub fn build_populate_config(args: &PopulateArgs) -> Result<PopulateConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let thermostat_file = file_config.thermostat.take().unwrap_or_default();
    let ensemble = args
        .ensemble
        .or(thermostat_file.ensemble)
        .unwrap_or(defaults.ensemble);
    let temperature = args
        .temperature
        .or(thermostat_file.temperature)
        .unwrap_or(defaults.temperature);

    let population = PopulationConfigBuilder::new()
        .ensemble(ensemble)
        .temperature(temperature)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(PopulateConfig {
        energies_path: args.energies.clone(),
        plain_text: args.text,
        output_path: args.output.clone(),
        population,
    })
}

pub fn build_transform_config(args: &TransformArgs) -> Result<TransformConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    if args.frame >= args.frames {
        return Err(CliError::Argument(format!(
            "Frame index {} is out of range for {} frame(s).",
            args.frame, args.frames
        )));
    }

    let view_file = file_config.view.take().unwrap_or_default();
    let scale = args.scale.or(view_file.scale).unwrap_or(defaults.scale);
    let blocked = if args.unblocked {
        false
    } else {
        view_file.blocked.unwrap_or(defaults.blocked)
    };

    Ok(TransformConfig {
        n_frames: args.frames,
        frame: args.frame,
        rotations: args.rotations.clone(),
        center: args.center.map(Point3::from),
        scale,
        blocked,
    })
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        match key {
            "thermostat.ensemble" => {
                config
                    .thermostat
                    .get_or_insert_with(Default::default)
                    .ensemble = Some(
                    value_str
                        .parse::<Ensemble>()
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "thermostat.temperature" => {
                config
                    .thermostat
                    .get_or_insert_with(Default::default)
                    .temperature = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "view.scale" => {
                config.view.get_or_insert_with(Default::default).scale =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
            }
            "view.blocked" => {
                config.view.get_or_insert_with(Default::default).blocked =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unknown configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use nalgebra::Vector3;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn populate_args(extra: &[&str]) -> PopulateArgs {
        let mut argv = vec!["conformers", "populate", "-e", "energies.csv"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Populate(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn transform_args(extra: &[&str]) -> TransformArgs {
        let mut argv = vec!["conformers", "transform"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Transform(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("conformers.toml");
        fs::write(&path, content).unwrap();
        path
    }

    mod populate {
        use super::*;

        #[test]
        fn defaults_apply_without_file_or_flags() {
            let config = build_populate_config(&populate_args(&[])).unwrap();
            assert_eq!(config.population.ensemble, Ensemble::Nve);
            assert_eq!(config.population.temperature, 298.15);
            assert_eq!(config.energies_path, PathBuf::from("energies.csv"));
            assert!(config.output_path.is_none());
            assert!(!config.plain_text);
        }

        #[test]
        fn file_values_override_defaults() {
            let dir = tempdir().unwrap();
            let path = write_config(
                dir.path(),
                "[thermostat]\nensemble = \"nvt\"\ntemperature = 350.0\n",
            );
            let args = populate_args(&["-c", path.to_str().unwrap()]);

            let config = build_populate_config(&args).unwrap();

            assert_eq!(config.population.ensemble, Ensemble::Nvt);
            assert_eq!(config.population.temperature, 350.0);
        }

        #[test]
        fn set_values_override_file_and_flags_override_set_values() {
            let dir = tempdir().unwrap();
            let path = write_config(dir.path(), "[thermostat]\ntemperature = 350.0\n");
            let args = populate_args(&[
                "-c",
                path.to_str().unwrap(),
                "-S",
                "thermostat.temperature=400",
                "-S",
                "thermostat.ensemble=NVT",
                "--ensemble",
                "nve",
            ]);

            let config = build_populate_config(&args).unwrap();

            assert_eq!(config.population.temperature, 400.0);
            assert_eq!(config.population.ensemble, Ensemble::Nve);
        }

        #[test]
        fn invalid_set_values_are_reported() {
            let bad_format = populate_args(&["-S", "thermostat.temperature"]);
            assert!(matches!(
                build_populate_config(&bad_format),
                Err(CliError::Config(_))
            ));

            let bad_key = populate_args(&["-S", "thermostat.pressure=1"]);
            assert!(matches!(
                build_populate_config(&bad_key),
                Err(CliError::Config(_))
            ));

            let bad_value = populate_args(&["-S", "thermostat.temperature=hot"]);
            assert!(matches!(
                build_populate_config(&bad_value),
                Err(CliError::Config(_))
            ));
        }

        #[test]
        fn ensemble_flag_rejects_unknown_names() {
            let result = Cli::try_parse_from([
                "conformers",
                "populate",
                "-e",
                "energies.csv",
                "--ensemble",
                "npt",
            ]);
            assert!(result.is_err());
        }
    }

    mod transform {
        use super::*;

        #[test]
        fn rotation_steps_and_center_are_collected_in_order() {
            let args = transform_args(&[
                "-n",
                "3",
                "-f",
                "2",
                "-r",
                "90:0,0,1",
                "-r",
                "-30:1,0,0",
                "--center",
                "-1,2,0.5",
            ]);

            let config = build_transform_config(&args).unwrap();

            assert_eq!(config.n_frames, 3);
            assert_eq!(config.frame, 2);
            assert_eq!(config.rotations.len(), 2);
            assert_eq!(config.rotations[1].angle_degrees, -30.0);
            assert_eq!(config.rotations[1].axis, Vector3::x());
            assert_eq!(config.center, Some(Point3::new(-1.0, 2.0, 0.5)));
            assert!(config.blocked);
            assert_eq!(config.scale, 1.0);
        }

        #[test]
        fn view_section_and_flags_are_merged() {
            let dir = tempdir().unwrap();
            let path = write_config(dir.path(), "[view]\nscale = 3.0\nblocked = true\n");
            let args = transform_args(&["-c", path.to_str().unwrap(), "--unblocked"]);

            let config = build_transform_config(&args).unwrap();

            assert_eq!(config.scale, 3.0);
            assert!(!config.blocked);
        }

        #[test]
        fn scale_flag_beats_set_value() {
            let args = transform_args(&["-S", "view.scale=4", "-s", "0.5"]);
            let config = build_transform_config(&args).unwrap();
            assert_eq!(config.scale, 0.5);
        }

        #[test]
        fn frame_must_be_in_range() {
            let args = transform_args(&["-n", "2", "-f", "2"]);
            assert!(matches!(
                build_transform_config(&args),
                Err(CliError::Argument(_))
            ));
        }
    }
}
