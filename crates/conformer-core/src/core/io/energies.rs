use crate::core::models::frame::Frame;
use crate::core::models::molecule::Molecule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

const STREAM_LABEL: &str = "<stream>";

/// Largest frame index an energy table accepts.
pub const MAX_FRAME_INDEX: usize = 10_000_000;

#[derive(Debug, Error)]
pub enum EnergyTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid energy value '{token}' at position {position}")]
    InvalidValue { position: usize, token: String },
    #[error("Frame index {frame} exceeds the supported maximum of {max}")]
    FrameIndexTooLarge { frame: usize, max: usize },
    #[error("Energy for frame {frame} is listed more than once")]
    DuplicateFrame { frame: usize },
    #[error("Energy table refers to frame {frame} but the molecule has {len} frame(s)")]
    FrameOutOfRange { frame: usize, len: usize },
}

#[derive(Debug, Deserialize)]
struct EnergyRecord {
    frame: usize,
    energy: Option<f64>,
}

#[derive(Debug, Serialize)]
struct PopulationRecord {
    frame: usize,
    energy: Option<f64>,
    population: Option<f64>,
}

/// Per-frame potential energies (kcal/mol) keyed by frame index.
///
/// A `None` entry records a frame whose energy is explicitly unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyTable {
    entries: BTreeMap<usize, Option<f64>>,
}

impl EnergyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a CSV table with a `frame,energy` header. Blank energies are undefined.
    pub fn from_csv_path(path: &Path) -> Result<Self, EnergyTableError> {
        let label = path.to_string_lossy().to_string();
        let reader = csv::Reader::from_path(path).map_err(|e| EnergyTableError::Csv {
            path: label.clone(),
            source: e,
        })?;
        Self::from_csv(reader, &label)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, EnergyTableError> {
        Self::from_csv(csv::Reader::from_reader(reader), STREAM_LABEL)
    }

    fn from_csv<R: Read>(
        mut reader: csv::Reader<R>,
        label: &str,
    ) -> Result<Self, EnergyTableError> {
        let mut table = Self::new();
        for result in reader.deserialize::<EnergyRecord>() {
            let record = result.map_err(|e| EnergyTableError::Csv {
                path: label.to_string(),
                source: e,
            })?;
            table.insert(record.frame, record.energy.filter(|e| !e.is_nan()))?;
        }
        Ok(table)
    }

    /// Parses pasted text holding one energy per whitespace-separated token, in frame
    /// order. `-`, `na` and `nan` mark a frame whose energy is unknown.
    pub fn from_text(text: &str) -> Result<Self, EnergyTableError> {
        let mut table = Self::new();
        for (position, token) in text.split_whitespace().enumerate() {
            let value = match token.to_ascii_lowercase().as_str() {
                "-" | "na" | "nan" => None,
                _ => Some(token.parse::<f64>().map_err(|_| {
                    EnergyTableError::InvalidValue {
                        position,
                        token: token.to_string(),
                    }
                })?),
            };
            table.insert(position, value)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, frame: usize, energy: Option<f64>) -> Result<(), EnergyTableError> {
        if frame > MAX_FRAME_INDEX {
            return Err(EnergyTableError::FrameIndexTooLarge {
                frame,
                max: MAX_FRAME_INDEX,
            });
        }
        if self.entries.contains_key(&frame) {
            return Err(EnergyTableError::DuplicateFrame { frame });
        }
        self.entries.insert(frame, energy);
        Ok(())
    }

    pub fn get(&self, frame: usize) -> Option<Option<f64>> {
        self.entries.get(&frame).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of frames needed to hold every listed index.
    pub fn frame_span(&self) -> usize {
        self.entries.keys().next_back().map_or(0, |last| last + 1)
    }

    /// Copies the listed energies onto the molecule's frames.
    ///
    /// Frames missing from the table keep their current energy. Nothing is written
    /// unless every listed frame exists.
    pub fn apply_to(&self, molecule: &mut Molecule) -> Result<(), EnergyTableError> {
        let len = molecule.n_frames();
        if let Some((&frame, _)) = self.entries.iter().find(|&(&frame, _)| frame >= len) {
            return Err(EnergyTableError::FrameOutOfRange { frame, len });
        }
        for (&frame, &energy) in &self.entries {
            if let Some(target) = molecule.frame_mut(frame) {
                target.set_energy(energy);
            }
        }
        Ok(())
    }

    /// Builds a molecule of geometry-less frames carrying only these energies.
    pub fn to_molecule(&self, name: impl Into<String>) -> Molecule {
        let frames = (0..self.frame_span())
            .map(|i| {
                let mut frame = Frame::default();
                frame.set_energy(self.get(i).flatten());
                frame
            })
            .collect();
        Molecule::with_frames(name, frames)
    }
}

/// Writes a `frame,energy,population` CSV table for the molecule.
///
/// The population column is blank when populations have not been computed.
pub fn write_populations<W: Write>(
    molecule: &Molecule,
    writer: W,
) -> Result<(), EnergyTableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (frame, energy) in molecule.energies().enumerate() {
        csv_writer
            .serialize(PopulationRecord {
                frame,
                energy,
                population: molecule.population(frame),
            })
            .map_err(|e| EnergyTableError::Csv {
                path: STREAM_LABEL.to_string(),
                source: e,
            })?;
    }
    csv_writer.flush().map_err(|e| EnergyTableError::Io {
        path: STREAM_LABEL.to_string(),
        source: e,
    })
}
