use std::collections::BTreeSet;

use crate::ast::RuleNode;

/// Failure of a path transition, mirroring the two error kinds of the
/// runtime the generated code links against.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathFailure {
    /// No path in the set could apply the action.
    Syntax,
    /// Applying the action needed input that is not there.
    EndOfInput,
}

impl std::fmt::Display for PathFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "No path can apply the action"),
            Self::EndOfInput => write!(f, "Unexpected end of input"),
        }
    }
}

impl std::error::Error for PathFailure {}

/// The path transition the generated code calls for every terminal.
pub trait PathRuntime {
    type Path: Ord + Clone;

    /// Applies `action` to every path in `paths` and returns the successors.
    ///
    /// # Errors
    /// - `PathFailure::Syntax` if no path can apply the action.
    /// - `PathFailure::EndOfInput` if the action needs input past the end.
    fn transition(
        &mut self,
        paths: &BTreeSet<Self::Path>,
        action: &str,
    ) -> Result<BTreeSet<Self::Path>, PathFailure>;
}

/// Runs `node` against `paths` with the same semantics as the code
/// [`emit`](crate::emit) produces for it.
///
/// Optional and repeat bodies swallow both failure kinds. Alternation
/// swallows `Syntax` per option, lets `EndOfInput` through, fails with
/// `Syntax` when no option succeeded, and otherwise replaces the input set
/// with the union of the successful options.
///
/// A repeat whose body can succeed without consuming input only stops on a
/// failure, exactly like the emitted loop.
///
/// # Errors
/// Any failure not swallowed by an enclosing combinator.
pub fn evaluate<R: PathRuntime>(
    node: &RuleNode,
    paths: BTreeSet<R::Path>,
    runtime: &mut R,
) -> Result<BTreeSet<R::Path>, PathFailure> {
    match node {
        RuleNode::Sequence(children) | RuleNode::Switch { body: children, .. } => {
            evaluate_body(children, paths, runtime)
        }
        RuleNode::Terminal { action } => runtime.transition(&paths, action),
        RuleNode::Optional(body) => match evaluate_body(body, paths.clone(), runtime) {
            Ok(attempt) => {
                let mut paths = paths;
                paths.extend(attempt);
                Ok(paths)
            }
            Err(PathFailure::Syntax | PathFailure::EndOfInput) => Ok(paths),
        },
        RuleNode::Repeat(body) => {
            let mut paths = paths;
            let mut attempt = paths.clone();
            loop {
                match evaluate_body(body, attempt, runtime) {
                    Ok(extended) => {
                        paths.extend(extended.iter().cloned());
                        attempt = extended;
                    }
                    Err(PathFailure::Syntax | PathFailure::EndOfInput) => break,
                }
            }
            Ok(paths)
        }
        RuleNode::Alternation(options) => match options.as_slice() {
            [only] => evaluate(only, paths, runtime),
            _ => {
                let mut accumulator = BTreeSet::new();
                for option in options {
                    match evaluate(option, paths.clone(), runtime) {
                        Ok(attempt) => accumulator.extend(attempt),
                        Err(PathFailure::Syntax) => {}
                        Err(PathFailure::EndOfInput) => return Err(PathFailure::EndOfInput),
                    }
                }
                if accumulator.is_empty() {
                    Err(PathFailure::Syntax)
                } else {
                    Ok(accumulator)
                }
            }
        },
    }
}

fn evaluate_body<R: PathRuntime>(
    body: &[RuleNode],
    paths: BTreeSet<R::Path>,
    runtime: &mut R,
) -> Result<BTreeSet<R::Path>, PathFailure> {
    body.iter()
        .try_fold(paths, |paths, child| evaluate(child, paths, runtime))
}
