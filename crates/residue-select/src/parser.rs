//! Selection grammar parser implemented with nom.
//!
//! ```text
//! expression := and_expr ("or" and_expr)*
//! and_expr   := operand ("and" operand)*
//! operand    := "(" expression ")" | term
//! term       := word word                (compact form)
//!             | word word [word [word [word]]]   (spaced form)
//! ```
//!
//! Operator keywords are case-insensitive and reserved: they never appear as
//! words inside a term. Parentheses only affect grouping and leave no node of
//! their own in the tree. Their nesting depth is bounded (see
//! [`ResolverConfig::max_depth`]).

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, cut, map, not, peek, recognize, verify},
    error::{Error, ErrorKind},
    multi::{many_m_n, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::ast::{BoolOp, ParseTree, SelectionNode};
use crate::config::{ResolverConfig, DEFAULT_MAX_DEPTH};
use crate::error::{SelectionError, SelectionResult};

/// Shape of the atomic terms the grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermForm {
    /// Exactly two words: `chain A`, `resi 10-20`.
    Compact,
    /// Two to five words: `not chain A`, `resi 10 - 20`, `not resi 10 - 20`.
    Spaced,
}

impl TermForm {
    fn word_range(self) -> (usize, usize) {
        match self {
            TermForm::Compact => (1, 1),
            TermForm::Spaced => (1, 4),
        }
    }
}

/// Term form plus the nesting limit, threaded through the grammar.
#[derive(Debug, Clone, Copy)]
struct Grammar {
    form: TermForm,
    max_depth: usize,
}

/// Parse a normalized selection string.
///
/// Tries the compact term form first and, if the whole string does not
/// parse, retries once with the spaced form. The error reported when both
/// fail is the one that got further into the input.
///
/// # Examples
///
/// ```rust
/// use residue_select::{parse, BoolOp, SelectionNode};
///
/// let tree = parse("(chain A and chain B and chain C)").unwrap();
/// match tree {
///     SelectionNode::Group { op, operands } => {
///         assert_eq!(op, BoolOp::And);
///         assert_eq!(operands.len(), 3);
///     }
///     _ => panic!("expected a group"),
/// }
///
/// // `not` needs the spaced form
/// let tree = parse("(not chain A)").unwrap();
/// assert_eq!(tree, SelectionNode::leaf("not chain A".to_string()));
/// ```
pub fn parse(normalized: &str) -> SelectionResult<ParseTree> {
    parse_with(normalized, &ResolverConfig::default())
}

/// Parse with the spaced-form retry enabled or disabled.
pub fn parse_with_fallback(normalized: &str, spaced_fallback: bool) -> SelectionResult<ParseTree> {
    parse_passes(normalized, spaced_fallback, DEFAULT_MAX_DEPTH)
}

/// Parse with the retry and nesting limit taken from `config`.
pub fn parse_with(normalized: &str, config: &ResolverConfig) -> SelectionResult<ParseTree> {
    parse_passes(normalized, config.spaced_fallback, config.max_depth)
}

fn parse_passes(
    normalized: &str,
    spaced_fallback: bool,
    max_depth: usize,
) -> SelectionResult<ParseTree> {
    let compact = Grammar {
        form: TermForm::Compact,
        max_depth,
    };
    match parse_grammar(normalized, compact) {
        Ok(tree) => {
            log::debug!("parsed '{}' with compact terms", normalized);
            Ok(tree)
        }
        Err(compact_err) if spaced_fallback => {
            log::debug!(
                "compact term grammar failed for '{}' ({}), retrying with spaced terms",
                normalized,
                compact_err
            );
            let spaced = Grammar {
                form: TermForm::Spaced,
                max_depth,
            };
            parse_grammar(normalized, spaced).map_err(|spaced_err| furthest(compact_err, spaced_err))
        }
        Err(compact_err) => Err(compact_err),
    }
}

/// Parse using a single term form, without any retry.
pub fn parse_form(normalized: &str, form: TermForm) -> SelectionResult<ParseTree> {
    parse_grammar(
        normalized,
        Grammar {
            form,
            max_depth: DEFAULT_MAX_DEPTH,
        },
    )
}

fn parse_grammar(normalized: &str, grammar: Grammar) -> SelectionResult<ParseTree> {
    match all_consuming(|i| full_expression(i, grammar))(normalized) {
        Ok((_, tree)) => Ok(tree),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = normalized.len() - e.input.len();
            Err(SelectionError::Syntax {
                position,
                fragment: fragment(normalized, position),
            })
        }
        Err(nom::Err::Incomplete(_)) => Err(SelectionError::Syntax {
            position: normalized.len(),
            fragment: String::new(),
        }),
    }
}

fn furthest(a: SelectionError, b: SelectionError) -> SelectionError {
    match (&a, &b) {
        (
            SelectionError::Syntax { position: pa, .. },
            SelectionError::Syntax { position: pb, .. },
        ) if pa > pb => a,
        _ => b,
    }
}

fn fragment(input: &str, position: usize) -> String {
    let rest = input.get(position..).unwrap_or("");
    if rest.is_empty() {
        return "<end of input>".to_string();
    }
    rest.chars().take(20).collect()
}

// ============================================================================
// Expressions
// ============================================================================

fn full_expression(input: &str, grammar: Grammar) -> IResult<&str, ParseTree> {
    delimited(multispace0, |i| or_expression(i, grammar, 0), multispace0)(input)
}

fn or_expression(input: &str, grammar: Grammar, depth: usize) -> IResult<&str, ParseTree> {
    map(
        separated_list1(
            |i| operator(i, "or"),
            |i| and_expression(i, grammar, depth),
        ),
        |operands| SelectionNode::group(BoolOp::Or, operands),
    )(input)
}

fn and_expression(input: &str, grammar: Grammar, depth: usize) -> IResult<&str, ParseTree> {
    map(
        separated_list1(|i| operator(i, "and"), |i| operand(i, grammar, depth)),
        |operands| SelectionNode::group(BoolOp::And, operands),
    )(input)
}

/// A term or a parenthesised expression.
///
/// Nothing but a group can start with `(`, so the group is committed to once
/// the parenthesis is seen and errors inside it keep their position. A group
/// opened at `max_depth` fails at its parenthesis.
fn operand(input: &str, grammar: Grammar, depth: usize) -> IResult<&str, ParseTree> {
    if depth >= grammar.max_depth && input.starts_with('(') {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    alt((
        preceded(
            pair(char('('), multispace0),
            cut(terminated(
                |i| or_expression(i, grammar, depth + 1),
                pair(multispace0, char(')')),
            )),
        ),
        map(|i| term(i, grammar.form), SelectionNode::Leaf),
    ))(input)
}

/// An operator keyword with its surrounding whitespace.
///
/// The keyword must not run on into a word (`order` is not `or` + `der`).
fn operator<'a>(input: &'a str, keyword: &'static str) -> IResult<&'a str, &'a str> {
    delimited(
        multispace0,
        terminated(tag_no_case(keyword), not(peek(take_while1(is_word_char)))),
        multispace0,
    )(input)
}

// ============================================================================
// Terms
// ============================================================================

fn term(input: &str, form: TermForm) -> IResult<&str, String> {
    let (min, max) = form.word_range();
    map(
        pair(word, many_m_n(min, max, preceded(multispace1, word))),
        |(first, rest)| {
            let mut words = Vec::with_capacity(rest.len() + 1);
            words.push(first);
            words.extend(rest);
            words.join(" ")
        },
    )(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    verify(recognize(take_while1(is_word_char)), |w: &str| {
        !is_operator_keyword(w)
    })(input)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_operator_keyword(word: &str) -> bool {
    word.eq_ignore_ascii_case("and") || word.eq_ignore_ascii_case("or")
}
