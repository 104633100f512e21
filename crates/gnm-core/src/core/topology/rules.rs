use crate::core::models::residue::{ResidueFamily, ResidueType};
use phf::{Map, Set, phf_map, phf_set};

pub const PHOSPHATE_ATOM_NAME: &str = "P";

pub(crate) static RESIDUE_NAMES: Map<&'static str, ResidueType> = phf_map! {
    "ALA" => ResidueType::Alanine,
    "GLY" => ResidueType::Glycine,
    "ILE" => ResidueType::Isoleucine,
    "LEU" => ResidueType::Leucine,
    "PRO" => ResidueType::Proline,
    "VAL" => ResidueType::Valine,
    "PHE" => ResidueType::Phenylalanine,
    "TRP" => ResidueType::Tryptophan,
    "TYR" => ResidueType::Tyrosine,
    "ASN" => ResidueType::Asparagine,
    "CYS" => ResidueType::Cysteine, "CYX" => ResidueType::Cysteine,
    "GLN" => ResidueType::Glutamine,
    "SER" => ResidueType::Serine,
    "THR" => ResidueType::Threonine,
    "MET" => ResidueType::Methionine,
    "ARG" => ResidueType::Arginine,
    "LYS" => ResidueType::Lysine,
    "ASP" => ResidueType::AsparticAcid,
    "GLU" => ResidueType::GlutamicAcid,
    "HIS" => ResidueType::Histidine,
    "HID" => ResidueType::Histidine, "HIE" => ResidueType::Histidine, "HIP" => ResidueType::Histidine,
    "HSD" => ResidueType::Histidine, "HSE" => ResidueType::Histidine, "HSP" => ResidueType::Histidine,
    "A" => ResidueType::Adenosine,
    "C" => ResidueType::Cytidine,
    "G" => ResidueType::Guanosine,
    "U" => ResidueType::Uridine,
    "T" => ResidueType::Thymidine,
    "DA" => ResidueType::Deoxyadenosine,
    "DC" => ResidueType::Deoxycytidine,
    "DG" => ResidueType::Deoxyguanosine,
    "DT" => ResidueType::Deoxythymidine,
};

static AMINO_ACID_CENTRAL_ATOMS: Set<&'static str> = phf_set! { "CA" };

static NUCLEOTIDE_CENTRAL_ATOMS: Set<&'static str> = phf_set! { "C4'", "C4*" };

const BASE_RING_ATOMS: &[&str] = &["C2", "C4", "C6"];

/// Resolves a residue name (canonical or alias) to its type.
///
/// Names are matched exactly after trimming surrounding whitespace.
pub fn residue_type_for_name(name: &str) -> Option<ResidueType> {
    RESIDUE_NAMES.get(name.trim()).copied()
}

pub fn is_central_atom(family: ResidueFamily, atom_name: &str) -> bool {
    let name = atom_name.trim();
    match family {
        ResidueFamily::AminoAcid => AMINO_ACID_CENTRAL_ATOMS.contains(name),
        ResidueFamily::Nucleotide => NUCLEOTIDE_CENTRAL_ATOMS.contains(name),
    }
}

/// Atom names averaged into the side-chain (amino acid) or base (nucleotide) bead.
pub fn sidechain_bead_atoms(residue_type: ResidueType) -> &'static [&'static str] {
    match residue_type {
        ResidueType::Glycine => &[],
        ResidueType::Alanine | ResidueType::Valine | ResidueType::Threonine => &["CB"],
        ResidueType::Leucine
        | ResidueType::AsparticAcid
        | ResidueType::Asparagine
        | ResidueType::Proline
        | ResidueType::Phenylalanine
        | ResidueType::Histidine
        | ResidueType::Methionine => &["CG"],
        ResidueType::GlutamicAcid | ResidueType::Lysine | ResidueType::Glutamine => &["CD"],
        ResidueType::Isoleucine => &["CG1"],
        ResidueType::Arginine => &["NE"],
        ResidueType::Serine => &["CB", "OG"],
        ResidueType::Tyrosine => &["CD1", "CD2"],
        ResidueType::Tryptophan => &["CD2"],
        ResidueType::Cysteine => &["CB", "SG"],
        ResidueType::Adenosine
        | ResidueType::Cytidine
        | ResidueType::Guanosine
        | ResidueType::Uridine
        | ResidueType::Thymidine
        | ResidueType::Deoxyadenosine
        | ResidueType::Deoxycytidine
        | ResidueType::Deoxyguanosine
        | ResidueType::Deoxythymidine => BASE_RING_ATOMS,
    }
}

pub fn is_sidechain_bead_atom(residue_type: ResidueType, atom_name: &str) -> bool {
    sidechain_bead_atoms(residue_type).contains(&atom_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_type_for_name_resolves_every_table_entry() {
        for (name, expected) in RESIDUE_NAMES.entries() {
            assert_eq!(residue_type_for_name(name), Some(*expected));
        }
    }

    #[test]
    fn residue_type_for_name_is_case_sensitive_and_trims_whitespace() {
        assert_eq!(residue_type_for_name(" ALA "), Some(ResidueType::Alanine));
        assert_eq!(residue_type_for_name("ala"), None);
        assert_eq!(residue_type_for_name("HOH"), None);
    }

    #[test]
    fn only_glycine_has_an_empty_sidechain_set() {
        for residue_type in RESIDUE_NAMES.values() {
            let atoms = sidechain_bead_atoms(*residue_type);
            if *residue_type == ResidueType::Glycine {
                assert!(atoms.is_empty());
            } else {
                assert!(!atoms.is_empty(), "{residue_type} has no bead atoms");
            }
        }
    }

    #[test]
    fn multi_atom_sidechain_sets_match_three_point_model() {
        assert_eq!(sidechain_bead_atoms(ResidueType::Serine), &["CB", "OG"]);
        assert_eq!(sidechain_bead_atoms(ResidueType::Tyrosine), &["CD1", "CD2"]);
        assert_eq!(sidechain_bead_atoms(ResidueType::Cysteine), &["CB", "SG"]);
        assert_eq!(
            sidechain_bead_atoms(ResidueType::Deoxyguanosine),
            &["C2", "C4", "C6"]
        );
    }

    #[test]
    fn is_sidechain_bead_atom_checks_membership() {
        assert!(is_sidechain_bead_atom(ResidueType::Lysine, "CD"));
        assert!(!is_sidechain_bead_atom(ResidueType::Lysine, "CE"));
        assert!(!is_sidechain_bead_atom(ResidueType::Glycine, "CA"));
    }

    #[test]
    fn central_atoms_are_family_specific() {
        assert!(is_central_atom(ResidueFamily::AminoAcid, "CA"));
        assert!(is_central_atom(ResidueFamily::AminoAcid, " CA "));
        assert!(!is_central_atom(ResidueFamily::AminoAcid, "CB"));
        assert!(is_central_atom(ResidueFamily::Nucleotide, "C4'"));
        assert!(is_central_atom(ResidueFamily::Nucleotide, "C4*"));
        assert!(!is_central_atom(ResidueFamily::Nucleotide, "P"));
    }
}
