use std::borrow::Cow;

use crate::ast::RuleNode;
use crate::interface::Features;

/// The literal description of a production body, before normalization.
///
/// Templates are usually written with the [`seq!`](crate::seq),
/// [`opt!`](crate::opt), [`repeat!`](crate::repeat),
/// [`one_of!`](crate::one_of) and [`switch!`](crate::switch) macros, which
/// accept any mix of nested templates, action literals and prebuilt nodes.
///
/// # Example
///
/// ```
/// use pathweave::{Features, RuleNode, opt, seq};
///
/// let template = seq!["IDENT", opt!["ASSIGN", "EXPR"], "SEMI"];
/// let node = template.build(&Features::new()).unwrap();
///
/// assert_eq!(node.actions(), vec!["IDENT", "ASSIGN", "EXPR", "SEMI"]);
/// assert!(matches!(node, RuleNode::Sequence(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleTemplate<'a> {
    Sequence(Vec<RuleTemplate<'a>>),
    Optional(Vec<RuleTemplate<'a>>),
    Repeat(Vec<RuleTemplate<'a>>),
    OneOf(Vec<RuleTemplate<'a>>),
    Switch {
        feature: Cow<'a, str>,
        body: Vec<RuleTemplate<'a>>,
    },
    /// An already normalized node, taken as is.
    Node(RuleNode),
    /// The action literal handed to the runtime's path transition.
    Terminal(Cow<'a, str>),
}

impl<'a> From<&'a str> for RuleTemplate<'a> {
    fn from(action: &'a str) -> Self {
        Self::Terminal(Cow::Borrowed(action))
    }
}

impl From<String> for RuleTemplate<'_> {
    fn from(action: String) -> Self {
        Self::Terminal(Cow::Owned(action))
    }
}

impl From<RuleNode> for RuleTemplate<'_> {
    fn from(node: RuleNode) -> Self {
        Self::Node(node)
    }
}

impl RuleTemplate<'_> {
    /// Normalizes the template into a canonical [`RuleNode`].
    ///
    /// Switches whose feature is not enabled in `features` are erased, nested
    /// sequences and alternations are spliced into their parents, and
    /// optional-of-optional / repeat-of-repeat collapse to a single level.
    ///
    /// Returns `None` when nothing is left, in which case the caller must
    /// leave the node out entirely.
    pub fn build(&self, features: &Features) -> Option<RuleNode> {
        let node = match self {
            Self::Terminal(action) => {
                return Some(RuleNode::Terminal {
                    action: action.to_string(),
                });
            }
            Self::Node(node) => node.clone(),
            Self::Sequence(items) => RuleNode::Sequence(build_sequence(items, features)),
            Self::Optional(items) => {
                RuleNode::Optional(collapse(build_sequence(items, features), |node| {
                    match node {
                        RuleNode::Optional(body) => Ok(body),
                        other => Err(other),
                    }
                }))
            }
            Self::Repeat(items) => {
                RuleNode::Repeat(collapse(build_sequence(items, features), |node| {
                    match node {
                        RuleNode::Repeat(body) => Ok(body),
                        other => Err(other),
                    }
                }))
            }
            Self::OneOf(items) => {
                let mut options = Vec::with_capacity(items.len());
                for option in build_children(items, features) {
                    splice_alternation(option, &mut options);
                }
                RuleNode::Alternation(options)
            }
            Self::Switch { feature, body } => {
                if !features.is_enabled(feature) {
                    return None;
                }
                RuleNode::Switch {
                    feature: feature.to_string(),
                    body: build_sequence(body, features),
                }
            }
        };

        (!node.is_empty()).then_some(node)
    }
}

/// Builds each template, dropping the ones that normalize to nothing.
fn build_children<'t>(
    items: &'t [RuleTemplate<'_>],
    features: &'t Features,
) -> impl Iterator<Item = RuleNode> + 't {
    items.iter().filter_map(move |item| item.build(features))
}

fn build_sequence(items: &[RuleTemplate<'_>], features: &Features) -> Vec<RuleNode> {
    let mut children = Vec::with_capacity(items.len());
    for child in build_children(items, features) {
        splice_sequence(child, &mut children);
    }
    children
}

fn splice_sequence(node: RuleNode, out: &mut Vec<RuleNode>) {
    match node {
        RuleNode::Sequence(children) => {
            for child in children.into_iter().filter(|c| !c.is_empty()) {
                splice_sequence(child, out);
            }
        }
        other => out.push(other),
    }
}

fn splice_alternation(node: RuleNode, out: &mut Vec<RuleNode>) {
    match node {
        RuleNode::Alternation(options) => {
            for option in options.into_iter().filter(|o| !o.is_empty()) {
                splice_alternation(option, out);
            }
        }
        other => out.push(other),
    }
}

/// Replaces a body made of a single node of the same kind with that node's
/// own body. `inner_body` hands the node back untouched when it is of
/// another kind.
fn collapse(
    body: Vec<RuleNode>,
    inner_body: fn(RuleNode) -> Result<Vec<RuleNode>, RuleNode>,
) -> Vec<RuleNode> {
    match <[RuleNode; 1]>::try_from(body) {
        Ok([only]) => inner_body(only).unwrap_or_else(|other| vec![other]),
        Err(body) => body,
    }
}

/// Builds a sequence template.
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::RuleTemplate::Sequence(vec![$($crate::RuleTemplate::from($item)),*])
    };
}

/// Builds an optional template: zero or one occurrence of the sequence.
#[macro_export]
macro_rules! opt {
    ($($item:expr),* $(,)?) => {
        $crate::RuleTemplate::Optional(vec![$($crate::RuleTemplate::from($item)),*])
    };
}

/// Builds a repeat template: zero or more occurrences of the sequence.
#[macro_export]
macro_rules! repeat {
    ($($item:expr),* $(,)?) => {
        $crate::RuleTemplate::Repeat(vec![$($crate::RuleTemplate::from($item)),*])
    };
}

/// Builds an alternation template from its options.
#[macro_export]
macro_rules! one_of {
    ($($item:expr),* $(,)?) => {
        $crate::RuleTemplate::OneOf(vec![$($crate::RuleTemplate::from($item)),*])
    };
}

/// Builds a feature-gated sequence: `switch!("feature"; items...)`.
#[macro_export]
macro_rules! switch {
    ($feature:expr; $($item:expr),* $(,)?) => {
        $crate::RuleTemplate::Switch {
            feature: ::std::borrow::Cow::from($feature),
            body: vec![$($crate::RuleTemplate::from($item)),*],
        }
    };
}
