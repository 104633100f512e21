use crate::core::models::residue::ResidueKey;
use crate::core::network::kirchhoff::KirchhoffMatrix;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Spring constant applied by a manual edit when the caller gives none.
pub const DEFAULT_SPRING_STRENGTH: f64 = 10.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error("No edit has been applied to edge ({i}, {j})")]
    EdgeNotFound { i: usize, j: usize },
    #[error("Bead index {index} is out of bounds for a network of {dimension} beads")]
    IndexOutOfBounds { index: usize, dimension: usize },
    #[error("Cannot edit the self-edge of bead {index}")]
    SelfEdge { index: usize },
    #[error("Invalid spring strength {0}")]
    InvalidStrength(f64),
    #[error("Residue {0} has no central bead")]
    UnknownResidue(ResidueKey),
}

/// The reference/live pair of Kirchhoff matrices and the ledger of edits
/// separating them.
///
/// The reference matrix is fixed at construction. Every edit touches the
/// mirrored off-diagonal pair of the live matrix and re-derives both affected
/// diagonal entries from their columns, so live rows always sum to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableNetwork {
    reference: KirchhoffMatrix,
    live: KirchhoffMatrix,
    edits: BTreeMap<(usize, usize), f64>, // (i, j) with i < j -> applied strength
}

impl EditableNetwork {
    pub fn new(reference: KirchhoffMatrix) -> Self {
        Self {
            live: reference.clone(),
            reference,
            edits: BTreeMap::new(),
        }
    }

    pub fn reference(&self) -> &KirchhoffMatrix {
        &self.reference
    }

    pub fn live(&self) -> &KirchhoffMatrix {
        &self.live
    }

    /// Applied edits keyed by `(i, j)` with `i < j`.
    pub fn edits(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.edits
    }

    pub fn is_edited(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.reference.dimension()
    }

    /// Dispatches on the sign of `strength`: negative restores the reference
    /// values of the edge, anything else sets it.
    pub fn edit_edge(&mut self, i: usize, j: usize, strength: f64) -> Result<(), EditorError> {
        if strength < 0.0 {
            self.restore_edge(i, j)
        } else {
            self.set_edge(i, j, strength)
        }
    }

    /// Sets the live spring between `i` and `j` to `strength`. Zero cuts the contact.
    pub fn set_edge(&mut self, i: usize, j: usize, strength: f64) -> Result<(), EditorError> {
        let pair = self.check_pair(i, j)?;
        if !(strength.is_finite() && strength >= 0.0) {
            return Err(EditorError::InvalidStrength(strength));
        }
        let value = if strength == 0.0 { 0.0 } else { -strength };
        self.live.set_pair(i, j, value);
        self.live.resum_diagonal(i);
        self.live.resum_diagonal(j);
        self.edits.insert(pair, strength);
        debug!(i, j, strength, "Edge set.");
        Ok(())
    }

    /// Copies the reference spring for `i`-`j` back into the live matrix.
    pub fn restore_edge(&mut self, i: usize, j: usize) -> Result<(), EditorError> {
        let pair = self.check_pair(i, j)?;
        if self.edits.remove(&pair).is_none() {
            return Err(EditorError::EdgeNotFound { i, j });
        }
        self.live.set_pair(i, j, self.reference.get(i, j));
        self.live.resum_diagonal(i);
        self.live.resum_diagonal(j);
        debug!(i, j, "Edge restored.");
        Ok(())
    }

    /// Discards every edit.
    pub fn reset(&mut self) {
        self.live = self.reference.clone();
        self.edits.clear();
    }

    fn check_pair(&self, i: usize, j: usize) -> Result<(usize, usize), EditorError> {
        let dimension = self.dimension();
        for index in [i, j] {
            if index >= dimension {
                return Err(EditorError::IndexOutOfBounds { index, dimension });
            }
        }
        if i == j {
            return Err(EditorError::SelfEdge { index: i });
        }
        Ok((i.min(j), i.max(j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_network() -> EditableNetwork {
        let mut k = KirchhoffMatrix::zeros(4);
        k.connect(0, 1);
        k.connect(1, 2);
        k.connect(2, 3);
        EditableNetwork::new(k)
    }

    fn assert_rows_sum_to_zero(k: &KirchhoffMatrix) {
        for sum in k.row_sums() {
            assert!(sum.abs() < 1e-12, "row sum {sum}");
        }
    }

    mod setting {
        use super::*;

        #[test]
        fn new_network_starts_with_live_equal_to_reference() {
            let network = path_network();
            assert_eq!(network.live(), network.reference());
            assert!(!network.is_edited());
        }

        #[test]
        fn set_edge_writes_mirrored_strength_and_resums_diagonals() {
            let mut network = path_network();
            network.edit_edge(0, 2, DEFAULT_SPRING_STRENGTH).unwrap();

            let live = network.live();
            assert_eq!(live.get(0, 2), -10.0);
            assert_eq!(live.get(2, 0), -10.0);
            assert_eq!(live.get(0, 0), 11.0);
            assert_eq!(live.get(2, 2), 12.0);
            assert_rows_sum_to_zero(live);
            assert_eq!(network.edits().get(&(0, 2)), Some(&10.0));
        }

        #[test]
        fn repeated_edits_on_shared_bead_use_full_column_sum() {
            let mut network = path_network();
            network.set_edge(1, 3, 5.0).unwrap();
            network.set_edge(1, 2, 4.0).unwrap();

            let live = network.live();
            assert_eq!(live.get(1, 1), 1.0 + 5.0 + 4.0);
            assert_rows_sum_to_zero(live);
        }

        #[test]
        fn zero_strength_cuts_contact() {
            let mut network = path_network();
            network.edit_edge(1, 2, 0.0).unwrap();

            assert_eq!(network.live().edges(), vec![(0, 1), (2, 3)]);
            assert_eq!(network.live().get(1, 1), 1.0);
            assert_rows_sum_to_zero(network.live());
        }

        #[test]
        fn reference_is_never_mutated() {
            let mut network = path_network();
            let before = network.reference().clone();
            network.set_edge(0, 3, 2.5).unwrap();
            network.set_edge(1, 2, 0.0).unwrap();
            assert_eq!(network.reference(), &before);
        }
    }

    mod restoring {
        use super::*;

        #[test]
        fn edit_then_restore_recovers_reference() {
            let mut network = path_network();
            network.edit_edge(0, 2, 10.0).unwrap();
            network.edit_edge(0, 2, -1.0).unwrap();

            for index in [0, 2] {
                for other in 0..4 {
                    assert_eq!(
                        network.live().get(index, other),
                        network.reference().get(index, other)
                    );
                    assert_eq!(
                        network.live().get(other, index),
                        network.reference().get(other, index)
                    );
                }
            }
            assert_eq!(network.live(), network.reference());
            assert!(!network.is_edited());
        }

        #[test]
        fn restore_keeps_other_edits_consistent() {
            let mut network = path_network();
            network.set_edge(0, 2, 10.0).unwrap();
            network.set_edge(0, 3, 3.0).unwrap();
            network.restore_edge(2, 0).unwrap();

            let live = network.live();
            assert_eq!(live.get(0, 2), 0.0);
            assert_eq!(live.get(0, 3), -3.0);
            assert_eq!(live.get(0, 0), 4.0);
            assert_rows_sum_to_zero(live);
            assert_eq!(network.edits().len(), 1);
        }

        #[test]
        fn restoring_unedited_edge_is_an_error() {
            let mut network = path_network();
            assert_eq!(
                network.edit_edge(1, 2, -1.0),
                Err(EditorError::EdgeNotFound { i: 1, j: 2 })
            );
            network.set_edge(1, 2, 4.0).unwrap();
            network.restore_edge(1, 2).unwrap();
            assert_eq!(
                network.restore_edge(1, 2),
                Err(EditorError::EdgeNotFound { i: 1, j: 2 })
            );
        }

        #[test]
        fn reset_discards_all_edits() {
            let mut network = path_network();
            network.set_edge(0, 3, 1.0).unwrap();
            network.set_edge(1, 3, 1.0).unwrap();
            network.reset();
            assert_eq!(network.live(), network.reference());
            assert!(network.edits().is_empty());
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn invalid_pairs_and_strengths_are_rejected() {
            let mut network = path_network();
            assert_eq!(
                network.set_edge(0, 4, 1.0),
                Err(EditorError::IndexOutOfBounds {
                    index: 4,
                    dimension: 4
                })
            );
            assert_eq!(
                network.set_edge(2, 2, 1.0),
                Err(EditorError::SelfEdge { index: 2 })
            );
            assert!(matches!(
                network.set_edge(0, 1, f64::NAN),
                Err(EditorError::InvalidStrength(_))
            ));
            assert_eq!(
                network.set_edge(0, 1, f64::INFINITY),
                Err(EditorError::InvalidStrength(f64::INFINITY))
            );
            assert_eq!(network.live(), network.reference());
        }
    }
}
