use super::residue::ResidueKey;
use nalgebra::Point3;
use std::str::FromStr;

/// Distinguishes standard polymer atoms from heteroatoms in a coordinate record.
///
/// Only [`RecordKind::Atom`] records take part in coarse-graining; heteroatoms
/// (ligands, waters, modified residues) are carried through so that per-atom
/// outputs stay index-aligned with the input, but they never produce beads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    /// A standard polymer atom (`ATOM` record).
    #[default]
    Atom,
    /// A heteroatom (`HETATM` record).
    HetAtom,
}

impl FromStr for RecordKind {
    type Err = ();

    /// Parses a record-type discriminant such as `"ATOM"` or `"HETATM"`.
    ///
    /// The comparison ignores surrounding whitespace and ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::HetAtom),
            _ => Err(()),
        }
    }
}

/// A normalized atom record as delivered by an external structure parser.
///
/// The record shape is format independent: PDB, mmCIF and MMTF readers all
/// reduce to this set of fields. Records are expected in file order, with the
/// atoms of one residue stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Whether this is a standard atom or a heteroatom.
    pub kind: RecordKind,
    /// The atom name (e.g., "CA", "CB", "C4'").
    pub name: String,
    /// The residue name (e.g., "ALA", "DG").
    pub residue_name: String,
    /// The residue sequence number from the source file.
    pub residue_number: isize,
    /// The single-character chain identifier.
    pub chain_id: char,
    /// The insertion code, if any.
    pub insertion_code: Option<char>,
    /// The Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

impl AtomRecord {
    /// Creates a standard (`ATOM`) record without an insertion code.
    pub fn new(
        name: &str,
        residue_name: &str,
        residue_number: isize,
        chain_id: char,
        position: Point3<f64>,
    ) -> Self {
        Self {
            kind: RecordKind::Atom,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            residue_number,
            chain_id,
            insertion_code: None,
            position,
        }
    }

    /// Returns the same record marked as a heteroatom.
    pub fn hetero(mut self) -> Self {
        self.kind = RecordKind::HetAtom;
        self
    }

    /// Returns the same record with the given insertion code.
    pub fn with_insertion_code(mut self, code: char) -> Self {
        self.insertion_code = Some(code);
        self
    }

    /// The key identifying the residue this atom belongs to.
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id,
            residue_number: self.residue_number,
            insertion_code: self.insertion_code,
        }
    }

    pub fn is_hetero(&self) -> bool {
        self.kind == RecordKind::HetAtom
    }
}
