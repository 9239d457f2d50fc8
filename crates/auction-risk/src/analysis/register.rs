//! Reference-entry selection and survive/extinguish classification of recorded rights.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{RegisterEntry, RegisterKey, RightDisposition, RightPurpose};
use super::warnings::AnalysisWarning;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("no reference-eligible register entry found; manual review required")]
    NoReferenceEntryFound,
}

/// Why an entry received its disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispositionBasis {
    ReferenceEntry,
    OwnershipTransfer,
    AfterReference,
    PersistedFlag,
    ConservativeDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    pub key: RegisterKey,
    pub purpose: RightPurpose,
    pub receipt_date: NaiveDate,
    pub right_holder: String,
    pub claim_amount: Option<u64>,
    pub disposition: RightDisposition,
    pub basis: DispositionBasis,
    pub is_reference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterClassification {
    pub reference_date: NaiveDate,
    pub reference_entry: RegisterKey,
    pub classified: Vec<ClassifiedEntry>,
    pub warnings: Vec<AnalysisWarning>,
}

impl RegisterClassification {
    pub fn inherited(&self) -> impl Iterator<Item = &ClassifiedEntry> {
        self.classified
            .iter()
            .filter(|entry| entry.disposition == RightDisposition::Inherited)
    }
}

/// Stateless classifier over a full register transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterClassifier;

impl RegisterClassifier {
    pub fn classify(
        &self,
        registers: &[RegisterEntry],
    ) -> Result<RegisterClassification, RegisterError> {
        let mut ordered: Vec<&RegisterEntry> = registers.iter().collect();
        ordered.sort_by_key(|entry| (entry.receipt_date, entry.book, entry.sequence));

        let mut warnings = Vec::new();

        let mut seen = BTreeSet::new();
        for entry in &ordered {
            if !seen.insert(entry.key()) {
                warnings.push(AnalysisWarning::DuplicateRegisterKey { entry: entry.key() });
            }
        }

        let eligible = |entry: &RegisterEntry| entry.right_purpose().is_reference_eligible();
        let unreviewed = ordered.iter().position(|entry| eligible(entry));
        let computed = ordered
            .iter()
            .position(|entry| eligible(entry) && entry.reference_override != Some(false));
        let key_at = |index: Option<usize>| index.map(|index| ordered[index].key());

        let mut curated = ordered
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.reference_override == Some(true))
            .map(|(index, _)| index);
        let curated_pick = curated.next();
        // Only the earliest curated entry wins; the rest are reported.
        for extra in curated {
            warnings.push(AnalysisWarning::ReferenceOverrideDiscrepancy {
                computed: key_at(computed),
                curated: key_at(Some(extra)),
            });
        }

        if unreviewed != computed && curated_pick.is_none() {
            warnings.push(AnalysisWarning::ReferenceOverrideDiscrepancy {
                computed: key_at(unreviewed),
                curated: key_at(computed),
            });
        }

        let reference_index = match (curated_pick, computed) {
            (Some(curated), computed) => {
                if computed != Some(curated) {
                    warnings.push(AnalysisWarning::ReferenceOverrideDiscrepancy {
                        computed: key_at(computed),
                        curated: key_at(Some(curated)),
                    });
                }
                curated
            }
            (None, Some(computed)) => computed,
            (None, None) => return Err(RegisterError::NoReferenceEntryFound),
        };

        let reference = ordered[reference_index];
        let reference_key = reference.key();
        let reference_date = reference.receipt_date;

        let classified = ordered
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let is_reference = index == reference_index;
                let (disposition, basis) =
                    dispose(entry, is_reference, reference_date, &mut warnings);
                ClassifiedEntry {
                    key: entry.key(),
                    purpose: entry.right_purpose(),
                    receipt_date: entry.receipt_date,
                    right_holder: entry.right_holder.clone(),
                    claim_amount: entry.claim_amount,
                    disposition,
                    basis,
                    is_reference,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            reference = %reference_key,
            %reference_date,
            entries = classified.len(),
            "register classified"
        );

        Ok(RegisterClassification {
            reference_date,
            reference_entry: reference_key,
            classified,
            warnings,
        })
    }
}

fn dispose(
    entry: &RegisterEntry,
    is_reference: bool,
    reference_date: NaiveDate,
    warnings: &mut Vec<AnalysisWarning>,
) -> (RightDisposition, DispositionBasis) {
    // The baseline is extinguished by its own sale, whatever its purpose.
    let structural = if is_reference {
        Some((
            RightDisposition::Extinguished,
            DispositionBasis::ReferenceEntry,
        ))
    } else if entry.right_purpose() == RightPurpose::OwnershipTransfer {
        Some((RightDisposition::Inherited, DispositionBasis::OwnershipTransfer))
    } else {
        None
    };

    if let Some((derived, basis)) = structural {
        flag_mismatch(entry, derived, warnings);
        return (derived, basis);
    }

    if entry.receipt_date >= reference_date {
        let derived = RightDisposition::Extinguished;
        return match entry.persisted_status {
            Some(persisted) => {
                flag_mismatch(entry, derived, warnings);
                (persisted, DispositionBasis::PersistedFlag)
            }
            None => (derived, DispositionBasis::AfterReference),
        };
    }

    match entry.persisted_status {
        Some(persisted) => (persisted, DispositionBasis::PersistedFlag),
        None => {
            warnings.push(AnalysisWarning::UnverifiedSeniorRight {
                entry: entry.key(),
                receipt_date: entry.receipt_date,
            });
            (
                RightDisposition::Extinguished,
                DispositionBasis::ConservativeDefault,
            )
        }
    }
}

fn flag_mismatch(
    entry: &RegisterEntry,
    derived: RightDisposition,
    warnings: &mut Vec<AnalysisWarning>,
) {
    if let Some(persisted) = entry.persisted_status.filter(|status| *status != derived) {
        warnings.push(AnalysisWarning::StatusFlagDiscrepancy {
            entry: entry.key(),
            persisted,
            derived,
        });
    }
}
