/// A canonical rule node, produced by normalizing a
/// [`RuleTemplate`](crate::RuleTemplate).
///
/// Nodes built by the normalizer uphold the flattening invariants: no
/// `Sequence` sits directly inside a body, no `Alternation` directly inside an
/// `Alternation`, and no composite has an empty child list.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleNode {
    /// Children threaded in order through a single path set.
    Sequence(Vec<RuleNode>),
    /// Zero or one occurrence of the body.
    Optional(Vec<RuleNode>),
    /// Zero or more occurrences of the body.
    Repeat(Vec<RuleNode>),
    /// A mandatory choice among the options.
    Alternation(Vec<RuleNode>),
    /// A body gated by a compile-time feature. Only ever built when the
    /// feature is enabled.
    Switch { feature: String, body: Vec<RuleNode> },
    /// An atomic action handed to the runtime's path transition.
    Terminal { action: String },
}

impl RuleNode {
    /// The child list of a composite, or `None` for a terminal.
    pub fn children(&self) -> Option<&[RuleNode]> {
        match self {
            Self::Sequence(children)
            | Self::Optional(children)
            | Self::Repeat(children)
            | Self::Alternation(children)
            | Self::Switch { body: children, .. } => Some(children.as_slice()),
            Self::Terminal { .. } => None,
        }
    }

    /// A composite with nothing left in it. Terminals are never empty.
    pub fn is_empty(&self) -> bool {
        self.children().is_some_and(<[RuleNode]>::is_empty)
    }

    /// Whether the node can succeed without invoking any transition that
    /// must consume input.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Optional(_) | Self::Repeat(_) => true,
            Self::Sequence(children) | Self::Switch { body: children, .. } => {
                children.iter().all(Self::is_nullable)
            }
            Self::Alternation(options) => options.iter().any(Self::is_nullable),
            Self::Terminal { .. } => false,
        }
    }

    /// Every terminal action below this node, in emission order.
    pub fn actions(&self) -> Vec<&str> {
        let mut actions = Vec::new();
        collect_actions(self, &mut actions);
        actions
    }

    /// Short lowercase name of the variant, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "sequence",
            Self::Optional(_) => "optional",
            Self::Repeat(_) => "repeat",
            Self::Alternation(_) => "alternation",
            Self::Switch { .. } => "switch",
            Self::Terminal { .. } => "terminal",
        }
    }
}

fn collect_actions<'a>(node: &'a RuleNode, actions: &mut Vec<&'a str>) {
    match node {
        RuleNode::Terminal { action } => actions.push(action),
        RuleNode::Sequence(children)
        | RuleNode::Optional(children)
        | RuleNode::Repeat(children)
        | RuleNode::Alternation(children)
        | RuleNode::Switch { body: children, .. } => {
            for child in children {
                collect_actions(child, actions);
            }
        }
    }
}
