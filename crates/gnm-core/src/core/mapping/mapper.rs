use crate::core::models::atom::AtomRecord;
use crate::core::models::bead::{Bead, BeadKind};
use crate::core::models::residue::{ResidueFamily, ResidueKey, ResidueType};
use crate::core::topology::rules::{self, PHOSPHATE_ATOM_NAME};
use crate::core::utils::geometry::{centroid, is_finite_point};
use itertools::Itertools;
use nalgebra::Point3;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// How many beads a residue is reduced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeadModel {
    /// Central bead only (CA or C4').
    #[default]
    Backbone,
    /// Central bead, side-chain/base center of mass and, for nucleotides, the phosphate.
    ThreePoint,
}

/// Why a residue produced no beads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MappingIssue {
    #[error("unsupported residue type")]
    UnsupportedResidueType,
    #[error("central atom is missing")]
    MissingCentralAtom,
    #[error("center of mass is undefined")]
    UndefinedCenterOfMass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedResidue {
    pub residue: ResidueKey,
    pub residue_name: String,
    pub issue: MappingIssue,
}

/// The result of coarse-graining one structure.
#[derive(Debug, Clone, Default)]
pub struct CoarseGrainedModel {
    beads: Vec<Bead>,
    atom_beads: Vec<Option<usize>>,
    skipped: Vec<SkippedResidue>,
    central_index: HashMap<ResidueKey, usize>,
}

impl CoarseGrainedModel {
    /// Beads in serial order; `beads()[i].serial == i`.
    pub fn beads(&self) -> &[Bead] {
        &self.beads
    }

    /// For each input atom, the serial of the bead representing it.
    pub fn atom_beads(&self) -> &[Option<usize>] {
        &self.atom_beads
    }

    pub fn skipped(&self) -> &[SkippedResidue] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.beads.iter().map(|b| b.position).collect()
    }

    pub fn central_count(&self) -> usize {
        self.central_index.len()
    }

    /// Serial of the central bead of `residue`, if the residue was mapped.
    pub fn central_bead(&self, residue: &ResidueKey) -> Option<usize> {
        self.central_index.get(residue).copied()
    }
}

struct MappedResidue {
    beads: Vec<Bead>,
    // (input atom index, offset into `beads`)
    membership: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct CoarseGrainMapper {
    model: BeadModel,
    chains: Option<BTreeSet<char>>,
}

impl CoarseGrainMapper {
    pub fn new(model: BeadModel) -> Self {
        Self {
            model,
            chains: None,
        }
    }

    /// Restricts mapping to the given chains. Atoms of other chains map to no bead.
    pub fn with_chains<I: IntoIterator<Item = char>>(mut self, chains: I) -> Self {
        self.chains = Some(chains.into_iter().collect());
        self
    }

    pub fn model(&self) -> BeadModel {
        self.model
    }

    fn accepts(&self, atom: &AtomRecord) -> bool {
        !atom.is_hetero()
            && self
                .chains
                .as_ref()
                .is_none_or(|chains| chains.contains(&atom.chain_id))
    }

    #[instrument(skip_all, name = "coarse_grain")]
    pub fn map(&self, atoms: &[AtomRecord]) -> CoarseGrainedModel {
        let mut beads: Vec<Bead> = Vec::new();
        let mut atom_beads = vec![None; atoms.len()];
        let mut skipped = Vec::new();
        let mut central_index = HashMap::new();
        let mut residue_count = 0usize;

        let residues = atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| self.accepts(atom))
            .chunk_by(|&(_, atom)| atom.residue_key());

        for (key, group) in &residues {
            residue_count += 1;
            let group: Vec<(usize, &AtomRecord)> = group.collect();
            // The first record names the residue.
            let residue_name = group
                .first()
                .map_or("", |(_, atom)| atom.residue_name.as_str());

            let mapped = match self.map_residue(key, residue_name, &group) {
                Ok(mapped) => mapped,
                Err(issue) => {
                    warn!(residue = %key, residue_name, %issue, "Skipping residue.");
                    skipped.push(SkippedResidue {
                        residue: key,
                        residue_name: residue_name.to_string(),
                        issue,
                    });
                    continue;
                }
            };

            let base = beads.len();
            for (atom_index, offset) in mapped.membership {
                atom_beads[atom_index] = Some(base + offset);
            }
            for (offset, mut bead) in mapped.beads.into_iter().enumerate() {
                bead.serial = base + offset;
                if bead.is_central() {
                    central_index.insert(key, bead.serial);
                }
                beads.push(bead);
            }
        }

        connect_beads(&mut beads);

        info!(
            residues = residue_count,
            beads = beads.len(),
            skipped = skipped.len(),
            "Coarse-grained mapping complete."
        );

        CoarseGrainedModel {
            beads,
            atom_beads,
            skipped,
            central_index,
        }
    }

    fn map_residue(
        &self,
        key: ResidueKey,
        residue_name: &str,
        group: &[(usize, &AtomRecord)],
    ) -> Result<MappedResidue, MappingIssue> {
        let residue_type: ResidueType = residue_name
            .parse()
            .map_err(|_| MappingIssue::UnsupportedResidueType)?;

        let (_, central_atom) = group
            .iter()
            .find(|(_, atom)| residue_type.is_central_atom(&atom.name))
            .ok_or(MappingIssue::MissingCentralAtom)?;
        if !is_finite_point(&central_atom.position) {
            return Err(MappingIssue::UndefinedCenterOfMass);
        }

        let mut beads = vec![Bead::new(
            BeadKind::Central,
            residue_type,
            residue_name,
            key,
            central_atom.position,
        )];
        let mut membership: Vec<(usize, usize)> = Vec::with_capacity(group.len());

        if self.model == BeadModel::Backbone {
            membership.extend(group.iter().map(|(index, _)| (*index, 0)));
            return Ok(MappedResidue { beads, membership });
        }

        let sidechain: Vec<&(usize, &AtomRecord)> = group
            .iter()
            .filter(|(_, atom)| rules::is_sidechain_bead_atom(residue_type, &atom.name))
            .collect();
        let com = if residue_type.sidechain_bead_atoms().is_empty() {
            central_atom.position
        } else {
            centroid(sidechain.iter().map(|(_, atom)| &atom.position))
                .ok_or(MappingIssue::UndefinedCenterOfMass)?
        };
        beads.push(Bead::new(
            BeadKind::CenterOfMass,
            residue_type,
            residue_name,
            key,
            com,
        ));
        let com_offset = beads.len() - 1;

        let phosphate = (residue_type.family() == ResidueFamily::Nucleotide)
            .then(|| {
                group.iter().find(|(_, atom)| {
                    atom.name.trim() == PHOSPHATE_ATOM_NAME && is_finite_point(&atom.position)
                })
            })
            .flatten();
        let phosphate_offset = phosphate.map(|(_, atom)| {
            beads.push(Bead::new(
                BeadKind::Phosphate,
                residue_type,
                residue_name,
                key,
                atom.position,
            ));
            beads.len() - 1
        });

        for (index, atom) in group {
            let offset = if rules::is_sidechain_bead_atom(residue_type, &atom.name) {
                com_offset
            } else if atom.name.trim() == PHOSPHATE_ATOM_NAME {
                phosphate_offset.unwrap_or(0)
            } else {
                0
            };
            membership.push((*index, offset));
        }

        Ok(MappedResidue { beads, membership })
    }
}

/// Bonds each central bead to the preceding central bead when both lie on the
/// same chain, and every other bead to its residue's central bead. Bonds are
/// recorded on the later bead.
fn connect_beads(beads: &mut [Bead]) {
    let mut last_central: Option<(usize, char)> = None;
    for serial in 0..beads.len() {
        let bead = &beads[serial];
        let chain = bead.residue.chain_id;
        if bead.is_central() {
            if let Some((previous, previous_chain)) = last_central {
                if previous_chain == chain {
                    beads[serial].bonds.push(previous);
                }
            }
            last_central = Some((serial, chain));
        } else if let Some((central, _)) = last_central {
            beads[serial].bonds.push(central);
        }
    }
}
