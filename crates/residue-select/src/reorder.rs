//! Output ordering and reference checks for selector records.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::ast::SelectorRecord;
use crate::error::{SelectionError, SelectionResult};

/// Orders records so that every selector is defined before it is referenced.
///
/// Records are first stably sorted by name length, then by the numeric value
/// of the name (leading zeros stripped); records that tie keep their
/// emission order. They are then emitted in that order, except that a
/// record's operands are emitted (recursively, in operand order) right
/// before the record itself if they have not been emitted yet.
///
/// References to names that are not in `records` are skipped here and
/// reported by [`verify_references`].
pub fn reorder(records: Vec<SelectorRecord>) -> Vec<SelectorRecord> {
    let mut sorted = records;
    sorted.sort_by(|a, b| compare_names(&a.name, &b.name));

    let by_name: HashMap<&str, usize> = sorted
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.as_str(), i))
        .collect();

    let mut order = Vec::with_capacity(sorted.len());
    let mut visited = vec![false; sorted.len()];
    for i in 0..sorted.len() {
        emit(i, &sorted, &by_name, &mut visited, &mut order);
    }

    let mut slots: Vec<Option<SelectorRecord>> = sorted.into_iter().map(Some).collect();
    let reordered: Vec<SelectorRecord> = order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    log::trace!(
        "reordered selectors: {:?}",
        reordered.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
    );
    reordered
}

fn emit(
    i: usize,
    records: &[SelectorRecord],
    by_name: &HashMap<&str, usize>,
    visited: &mut [bool],
    order: &mut Vec<usize>,
) {
    if visited[i] {
        return;
    }
    visited[i] = true;
    for reference in records[i].references() {
        if let Some(&j) = by_name.get(reference) {
            emit(j, records, by_name, visited, order);
        }
    }
    order.push(i);
}

/// Compares two positional names: shorter first, then by numeric value.
///
/// Names are digit strings of arbitrary length, so the numeric comparison
/// is done on the digits rather than by converting to an integer.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| compare_numeric(a, b))
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Checks that names are unique and every reference points to a record
/// that appears earlier in `records`.
pub fn verify_references(records: &[SelectorRecord]) -> SelectionResult<()> {
    let all: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let mut defined: HashSet<&str> = HashSet::with_capacity(records.len());

    for record in records {
        for reference in record.references() {
            if defined.contains(reference) {
                continue;
            }
            let reason = if all.contains(reference) {
                format!("references selector '{}' before it is defined", reference)
            } else {
                format!("references undefined selector '{}'", reference)
            };
            return Err(SelectionError::Referential {
                name: record.name.clone(),
                reason,
            });
        }
        if !defined.insert(record.name.as_str()) {
            return Err(SelectionError::Referential {
                name: record.name.clone(),
                reason: "is defined more than once".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BoolOp, Predicate, PredicateKind};

    fn atom(name: &str) -> SelectorRecord {
        SelectorRecord::atomic(name, &Predicate::new(PredicateKind::Chain, "A", false))
    }

    fn names(records: &[SelectorRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    mod ordering {
        use super::*;

        #[test]
        fn test_shorter_atomic_name_first() {
            let records = reorder(vec![atom("10"), atom("0")]);
            assert_eq!(names(&records), vec!["0", "10"]);
        }

        #[test]
        fn test_equal_length_by_numeric_value() {
            let records = reorder(vec![atom("040"), atom("000"), atom("020")]);
            assert_eq!(names(&records), vec!["000", "020", "040"]);
        }

        #[test]
        fn test_ties_keep_emission_order() {
            let mut first = atom("020");
            first.values = "first".to_string();
            let mut second = atom("020");
            second.values = "second".to_string();
            let records = reorder(vec![first, second]);
            assert_eq!(records[0].values, "first");
            assert_eq!(records[1].values, "second");
        }

        #[test]
        fn test_operands_precede_aggregate() {
            let records = reorder(vec![
                atom("0000"),
                atom("0020"),
                SelectorRecord::aggregate(BoolOp::And, "000", &["0000", "0020"]),
                atom("020"),
                SelectorRecord::aggregate(BoolOp::Or, "00", &["000", "020"]),
            ]);
            assert_eq!(names(&records), vec!["0000", "0020", "000", "020", "00"]);
            verify_references(&records).unwrap();
        }

        #[test]
        fn test_independent_subtrees_stay_in_preference_order() {
            let records = reorder(vec![
                atom("0200"),
                atom("0220"),
                SelectorRecord::aggregate(BoolOp::And, "020", &["0200", "0220"]),
                atom("0000"),
                atom("0020"),
                SelectorRecord::aggregate(BoolOp::And, "000", &["0000", "0020"]),
                SelectorRecord::aggregate(BoolOp::Or, "00", &["000", "020"]),
            ]);
            assert_eq!(
                names(&records),
                vec!["0000", "0020", "000", "0200", "0220", "020", "00"]
            );
        }

        #[test]
        fn test_empty() {
            assert!(reorder(Vec::new()).is_empty());
        }

        #[test]
        fn test_long_names_do_not_overflow() {
            let long = "9".repeat(40);
            let longer = format!("1{}", "0".repeat(40));
            assert_eq!(compare_names(&long, &longer), Ordering::Less);
            assert_eq!(compare_names("0090", "0100"), Ordering::Less);
        }
    }

    mod verification {
        use super::*;

        #[test]
        fn test_valid_order() {
            let records = vec![
                atom("000"),
                atom("020"),
                SelectorRecord::aggregate(BoolOp::And, "00", &["000", "020"]),
            ];
            assert!(verify_references(&records).is_ok());
        }

        #[test]
        fn test_forward_reference() {
            let records = vec![
                SelectorRecord::aggregate(BoolOp::And, "00", &["000", "020"]),
                atom("000"),
                atom("020"),
            ];
            let err = verify_references(&records).unwrap_err();
            assert_eq!(
                err,
                SelectionError::Referential {
                    name: "00".to_string(),
                    reason: "references selector '000' before it is defined".to_string(),
                }
            );
        }

        #[test]
        fn test_undefined_reference() {
            let records = vec![
                atom("000"),
                SelectorRecord::aggregate(BoolOp::Or, "00", &["000", "040"]),
            ];
            let err = verify_references(&records).unwrap_err();
            assert!(err.to_string().contains("undefined selector '040'"));
        }

        #[test]
        fn test_duplicate_name() {
            let records = vec![atom("000"), atom("000")];
            let err = verify_references(&records).unwrap_err();
            assert!(err.to_string().contains("defined more than once"));
        }

        #[test]
        fn test_reorder_skips_unknown_references() {
            let records = reorder(vec![
                SelectorRecord::aggregate(BoolOp::Or, "00", &["000", "040"]),
                atom("000"),
            ]);
            assert_eq!(names(&records), vec!["000", "00"]);
            assert!(verify_references(&records).is_err());
        }
    }
}
