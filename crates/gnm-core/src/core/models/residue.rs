use crate::core::topology::rules;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifies a residue within one structure model.
///
/// Two atoms belong to the same residue when they share chain, sequence number
/// and insertion code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: char,               // Chain identifier (e.g., 'A')
    pub residue_number: isize,        // Residue sequence number from the source file
    pub insertion_code: Option<char>, // Insertion code, if present
}

impl ResidueKey {
    pub fn new(chain_id: char, residue_number: isize) -> Self {
        Self {
            chain_id,
            residue_number,
            insertion_code: None,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.residue_number)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

/// The polymer family a residue type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueFamily {
    AminoAcid,
    Nucleotide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidueType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS (also CYX)
    Glutamine,  // GLN
    Serine,     // SER
    Threonine,  // THR
    Methionine, // MET

    // --- Charged ---
    Arginine,     // ARG
    Lysine,       // LYS
    AsparticAcid, // ASP
    GlutamicAcid, // GLU
    Histidine,    // HIS (and its protonation-state aliases)

    // --- Ribonucleotides ---
    Adenosine, // A
    Cytidine,  // C
    Guanosine, // G
    Uridine,   // U
    Thymidine, // T

    // --- Deoxyribonucleotides ---
    Deoxyadenosine, // DA
    Deoxycytidine,  // DC
    Deoxyguanosine, // DG
    Deoxythymidine, // DT
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown residue name '{0}'")]
pub struct ParseResidueTypeError(pub String);

impl ResidueType {
    pub fn family(self) -> ResidueFamily {
        match self {
            ResidueType::Adenosine
            | ResidueType::Cytidine
            | ResidueType::Guanosine
            | ResidueType::Uridine
            | ResidueType::Thymidine
            | ResidueType::Deoxyadenosine
            | ResidueType::Deoxycytidine
            | ResidueType::Deoxyguanosine
            | ResidueType::Deoxythymidine => ResidueFamily::Nucleotide,
            _ => ResidueFamily::AminoAcid,
        }
    }

    /// The canonical residue name as written in coordinate files.
    pub fn canonical_name(self) -> &'static str {
        match self {
            ResidueType::Alanine => "ALA",
            ResidueType::Glycine => "GLY",
            ResidueType::Isoleucine => "ILE",
            ResidueType::Leucine => "LEU",
            ResidueType::Proline => "PRO",
            ResidueType::Valine => "VAL",
            ResidueType::Phenylalanine => "PHE",
            ResidueType::Tryptophan => "TRP",
            ResidueType::Tyrosine => "TYR",
            ResidueType::Asparagine => "ASN",
            ResidueType::Cysteine => "CYS",
            ResidueType::Glutamine => "GLN",
            ResidueType::Serine => "SER",
            ResidueType::Threonine => "THR",
            ResidueType::Methionine => "MET",
            ResidueType::Arginine => "ARG",
            ResidueType::Lysine => "LYS",
            ResidueType::AsparticAcid => "ASP",
            ResidueType::GlutamicAcid => "GLU",
            ResidueType::Histidine => "HIS",
            ResidueType::Adenosine => "A",
            ResidueType::Cytidine => "C",
            ResidueType::Guanosine => "G",
            ResidueType::Uridine => "U",
            ResidueType::Thymidine => "T",
            ResidueType::Deoxyadenosine => "DA",
            ResidueType::Deoxycytidine => "DC",
            ResidueType::Deoxyguanosine => "DG",
            ResidueType::Deoxythymidine => "DT",
        }
    }

    /// Atom names whose mean position defines the side-chain (or base) bead.
    ///
    /// Glycine has an empty set; its center-of-mass bead falls back to the
    /// position of the central atom.
    pub fn sidechain_bead_atoms(self) -> &'static [&'static str] {
        rules::sidechain_bead_atoms(self)
    }

    /// Returns `true` if `atom_name` anchors this residue's backbone connectivity.
    pub fn is_central_atom(self, atom_name: &str) -> bool {
        rules::is_central_atom(self.family(), atom_name)
    }
}

impl FromStr for ResidueType {
    type Err = ParseResidueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        rules::residue_type_for_name(s).ok_or_else(|| ParseResidueTypeError(s.trim().to_string()))
    }
}

impl fmt::Display for ResidueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_canonical_names() {
        assert_eq!("ALA".parse(), Ok(ResidueType::Alanine));
        assert_eq!("GLY".parse(), Ok(ResidueType::Glycine));
        assert_eq!("DG".parse(), Ok(ResidueType::Deoxyguanosine));
        assert_eq!("U".parse(), Ok(ResidueType::Uridine));
    }

    #[test]
    fn from_str_accepts_protonation_aliases_and_whitespace() {
        assert_eq!("HIE".parse(), Ok(ResidueType::Histidine));
        assert_eq!("HSP".parse(), Ok(ResidueType::Histidine));
        assert_eq!("CYX".parse(), Ok(ResidueType::Cysteine));
        assert_eq!(" LYS ".parse(), Ok(ResidueType::Lysine));
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert_eq!(
            "HOH".parse::<ResidueType>(),
            Err(ParseResidueTypeError("HOH".to_string()))
        );
        assert!("".parse::<ResidueType>().is_err());
    }

    #[test]
    fn canonical_name_round_trips_through_from_str() {
        for name in ["ALA", "TRP", "HIS", "A", "T", "DC"] {
            let residue_type: ResidueType = name.parse().unwrap();
            assert_eq!(residue_type.to_string(), name);
        }
    }

    #[test]
    fn family_distinguishes_amino_acids_from_nucleotides() {
        assert_eq!(ResidueType::Serine.family(), ResidueFamily::AminoAcid);
        assert_eq!(ResidueType::Thymidine.family(), ResidueFamily::Nucleotide);
        assert_eq!(ResidueType::Deoxyadenosine.family(), ResidueFamily::Nucleotide);
    }

    #[test]
    fn central_atom_depends_on_family() {
        assert!(ResidueType::Alanine.is_central_atom("CA"));
        assert!(!ResidueType::Alanine.is_central_atom("C4'"));
        assert!(ResidueType::Guanosine.is_central_atom("C4'"));
        assert!(ResidueType::Guanosine.is_central_atom("C4*"));
        assert!(!ResidueType::Guanosine.is_central_atom("CA"));
    }

    #[test]
    fn residue_key_display_includes_insertion_code() {
        let mut key = ResidueKey::new('A', 27);
        assert_eq!(key.to_string(), "A:27");
        key.insertion_code = Some('B');
        assert_eq!(key.to_string(), "A:27B");
    }
}
