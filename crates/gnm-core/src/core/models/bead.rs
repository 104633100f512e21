use super::residue::{ResidueFamily, ResidueKey, ResidueType};
use nalgebra::Point3;
use std::fmt;

/// The role a bead plays in the coarse-grained model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeadKind {
    /// Anchors the residue's backbone connectivity (CA or C4').
    Central,
    /// Center of mass of the residue's side chain or base.
    CenterOfMass,
    /// Nucleotide phosphate.
    Phosphate,
}

impl BeadKind {
    /// The pseudo-atom name written for beads of this kind.
    pub fn atom_name(self, residue_type: ResidueType) -> &'static str {
        match self {
            BeadKind::Central => match residue_type.family() {
                ResidueFamily::AminoAcid => "CA",
                ResidueFamily::Nucleotide => "C4'",
            },
            BeadKind::CenterOfMass => "COM",
            BeadKind::Phosphate => "P",
        }
    }

    /// The chemical element tag reported to viewers.
    pub fn element(self) -> &'static str {
        match self {
            BeadKind::Central | BeadKind::CenterOfMass => "C",
            BeadKind::Phosphate => "P",
        }
    }
}

impl fmt::Display for BeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BeadKind::Central => "Central",
                BeadKind::CenterOfMass => "CenterOfMass",
                BeadKind::Phosphate => "Phosphate",
            }
        )
    }
}

/// A coarse-grained pseudo-atom.
///
/// Bead serials are dense (`0..N`) and double as row/column indices of the
/// connectivity matrix built from the bead positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    /// Dense index of this bead within its model.
    pub serial: usize,
    /// Role of the bead within its residue.
    pub kind: BeadKind,
    /// Pseudo-atom name ("CA", "C4'", "COM" or "P").
    pub name: &'static str,
    /// Element tag used for display.
    pub element: &'static str,
    /// Type of the residue the bead was derived from.
    pub residue_type: ResidueType,
    /// Residue name as it appeared in the input records.
    pub residue_name: String,
    /// Identity of the parent residue.
    pub residue: ResidueKey,
    /// Position in Angstroms.
    pub position: Point3<f64>,
    /// Serials of the beads this bead is bonded to.
    pub bonds: Vec<usize>,
}

impl Bead {
    pub(crate) fn new(
        kind: BeadKind,
        residue_type: ResidueType,
        residue_name: &str,
        residue: ResidueKey,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial: 0,
            kind,
            name: kind.atom_name(residue_type),
            element: kind.element(),
            residue_type,
            residue_name: residue_name.to_string(),
            residue,
            position,
            bonds: Vec::new(),
        }
    }

    pub fn is_central(&self) -> bool {
        self.kind == BeadKind::Central
    }
}
