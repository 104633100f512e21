use crate::core::models::bead::Bead;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile has {actual} values but the model has {expected} beads")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("CSV error for '{path}': {source}")]
    File { path: String, source: csv::Error },
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ProfileRow<'a> {
    serial: usize,
    chain: char,
    residue_number: isize,
    insertion_code: Option<char>,
    residue_name: &'a str,
    bead: &'a str,
    element: &'a str,
    x: f64,
    y: f64,
    z: f64,
    msf: f64,
}

/// Writes one CSV row per bead with its position and fluctuation value.
pub fn write_bead_profile<W: Write>(
    writer: W,
    beads: &[Bead],
    msf: &[f64],
) -> Result<(), ProfileError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_rows(&mut csv_writer, beads, msf)?;
    csv_writer.flush()?;
    Ok(())
}

pub fn save_bead_profile(path: &Path, beads: &[Bead], msf: &[f64]) -> Result<(), ProfileError> {
    let file_error = |source| ProfileError::File {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut csv_writer = csv::Writer::from_path(path).map_err(file_error)?;
    write_rows(&mut csv_writer, beads, msf)?;
    csv_writer.flush()?;
    Ok(())
}

fn write_rows<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    beads: &[Bead],
    msf: &[f64],
) -> Result<(), ProfileError> {
    if beads.len() != msf.len() {
        return Err(ProfileError::LengthMismatch {
            expected: beads.len(),
            actual: msf.len(),
        });
    }
    for (bead, &value) in beads.iter().zip(msf) {
        csv_writer.serialize(ProfileRow {
            serial: bead.serial,
            chain: bead.residue.chain_id,
            residue_number: bead.residue.residue_number,
            insertion_code: bead.residue.insertion_code,
            residue_name: &bead.residue_name,
            bead: bead.name,
            element: bead.element,
            x: bead.position.x,
            y: bead.position.y,
            z: bead.position.z,
            msf: value,
        })?;
    }
    Ok(())
}
