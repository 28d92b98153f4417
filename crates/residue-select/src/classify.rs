//! Predicate classification of atomic terms.
//!
//! Patterns are tried in a fixed order and the first one that matches the
//! whole term wins:
//!
//! | Order | Pattern | Kind |
//! |-------|---------|------|
//! | 1 | `resi N` | [`PredicateKind::ResidueIndex`] |
//! | 2 | `resi N-M`, `resi N - M` | [`PredicateKind::ResidueIndexRange`] |
//! | 3 | `resn NAME` | [`PredicateKind::ResidueName`] |
//! | 4 | `chain ID` | [`PredicateKind::Chain`] |
//!
//! Any of them may be prefixed with `not`. Keywords are case-insensitive,
//! values keep their case.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alphanumeric0, digit1, multispace0, multispace1},
    combinator::{all_consuming, map, opt, recognize},
    sequence::{pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::ast::{ParseTree, Predicate, PredicateKind, PredicateTree};
use crate::error::{SelectionError, SelectionResult};

/// Classify the text of one term.
///
/// # Examples
///
/// ```rust
/// use residue_select::{classify, PredicateKind};
///
/// let p = classify("not resi 10 - 20").unwrap();
/// assert_eq!(p.kind, PredicateKind::ResidueIndexRange);
/// assert_eq!(p.value, "10-20");
/// assert!(p.invert);
///
/// assert!(classify("foo bar").is_err());
/// ```
pub fn classify(term: &str) -> SelectionResult<Predicate> {
    match all_consuming(predicate)(term.trim()) {
        Ok((_, predicate)) => Ok(predicate),
        Err(_) => Err(SelectionError::Classification {
            terms: vec![term.to_string()],
        }),
    }
}

/// Classify every leaf of a parse tree.
///
/// All unclassifiable terms are reported together, in source order.
pub fn classify_tree(tree: &ParseTree) -> SelectionResult<PredicateTree> {
    tree.try_map(&mut |term: &String| classify(term).map_err(|_| term.clone()))
        .map_err(|unclassified| {
            log::debug!("unclassifiable terms: {:?}", unclassified);
            SelectionError::Classification {
                terms: unclassified,
            }
        })
}

// ============================================================================
// Patterns
// ============================================================================

fn predicate(input: &str) -> IResult<&str, Predicate> {
    let (input, invert) = negation(input)?;
    let (input, (kind, value)) = alt((
        all_consuming(residue_index),
        all_consuming(residue_index_range),
        all_consuming(residue_name),
        all_consuming(chain),
    ))(input)?;

    Ok((input, Predicate::new(kind, value, invert)))
}

fn negation(input: &str) -> IResult<&str, bool> {
    map(
        opt(terminated(tag_no_case("not"), multispace1)),
        |not| not.is_some(),
    )(input)
}

fn residue_index(input: &str) -> IResult<&str, (PredicateKind, String)> {
    map(
        preceded(pair(tag_no_case("resi"), multispace1), residue_number),
        |n| (PredicateKind::ResidueIndex, n.to_string()),
    )(input)
}

fn residue_index_range(input: &str) -> IResult<&str, (PredicateKind, String)> {
    map(
        preceded(
            pair(tag_no_case("resi"), multispace1),
            separated_pair(
                residue_number,
                tuple((multispace0, tag("-"), multispace0)),
                residue_number,
            ),
        ),
        |(lo, hi)| (PredicateKind::ResidueIndexRange, format!("{}-{}", lo, hi)),
    )(input)
}

fn residue_name(input: &str) -> IResult<&str, (PredicateKind, String)> {
    map(
        preceded(pair(tag_no_case("resn"), multispace1), identifier),
        |name| (PredicateKind::ResidueName, name.to_string()),
    )(input)
}

fn chain(input: &str) -> IResult<&str, (PredicateKind, String)> {
    map(
        preceded(pair(tag_no_case("chain"), multispace1), identifier),
        |id| (PredicateKind::Chain, id.to_string()),
    )(input)
}

/// A residue number with an optional insertion code: `42`, `42A`.
fn residue_number(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, alphanumeric0))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}
