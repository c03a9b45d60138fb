use crate::ast::RuleNode;

/// Names the emitted code links against. Everything the generator does not
/// own (the production base type, the path transition, the two error kinds,
/// the lexer) is spelled through these settings.
///
/// The default targets the Alchemist Python runtime.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmitSettings {
    /// Base type every generated production derives from.
    pub base_class: String,
    /// Callable applying one action to a path set.
    pub transition: String,
    /// Recoverable "this attempt is not viable" error.
    pub syntax_error: String,
    /// Input exhausted error.
    pub end_of_input_error: String,
    pub lexer_type: String,
    /// Expression yielding the lexer's current state.
    pub lexer_state: String,
    /// Element type of the exposed path set.
    pub path_type: String,
    /// Where a production stores its final path set.
    pub result_attribute: String,
    /// One level of indentation.
    pub indent: String,
    /// Lines placed once at the top of a generated module.
    pub header: Vec<String>,
}

impl Default for EmitSettings {
    fn default() -> Self {
        Self {
            base_class: "Production".to_string(),
            transition: "self.process_paths".to_string(),
            syntax_error: "CompilerSyntaxError".to_string(),
            end_of_input_error: "CompilerEOIError".to_string(),
            lexer_type: "Lexer".to_string(),
            lexer_state: "lexer.get_state()".to_string(),
            path_type: "Terminal".to_string(),
            result_attribute: "self.paths".to_string(),
            indent: "    ".to_string(),
            header: Vec::new(),
        }
    }
}

/// Name of the path-set variable for a nesting level.
pub(crate) fn paths(slot: usize) -> String {
    format!("paths{}", slot)
}

/// Line-oriented output buffer. Blank lines never stack.
pub(crate) struct CodeWriter<'s> {
    settings: &'s EmitSettings,
    out: String,
}

impl<'s> CodeWriter<'s> {
    pub(crate) const fn new(settings: &'s EmitSettings) -> Self {
        Self {
            settings,
            out: String::new(),
        }
    }

    pub(crate) const fn settings(&self) -> &'s EmitSettings {
        self.settings
    }

    pub(crate) fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(&self.settings.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Emits the control flow for `node`, advancing the path set held in
    /// `paths{slot}`. Nested scopes use `slot + 1` and `slot + 2`.
    pub(crate) fn emit_node(&mut self, node: &RuleNode, depth: usize, slot: usize) {
        match node {
            RuleNode::Sequence(children) | RuleNode::Switch { body: children, .. } => {
                for child in children {
                    self.emit_node(child, depth, slot);
                }
            }
            RuleNode::Terminal { action } => {
                let current = paths(slot);
                self.line(
                    depth,
                    &format!(
                        "{} = {}({}, {})",
                        current, self.settings.transition, current, action
                    ),
                );
            }
            RuleNode::Optional(body) => self.emit_optional(body, depth, slot),
            RuleNode::Repeat(body) => self.emit_repeat(body, depth, slot),
            RuleNode::Alternation(options) => match options.as_slice() {
                [only] => self.emit_node(only, depth, slot),
                _ => self.emit_alternation(options, depth, slot),
            },
        }
    }

    fn emit_body(&mut self, body: &[RuleNode], depth: usize, slot: usize) {
        for child in body {
            self.emit_node(child, depth, slot);
        }
    }

    fn recoverable(&self) -> String {
        format!(
            "({}, {})",
            self.settings.syntax_error, self.settings.end_of_input_error
        )
    }

    fn emit_optional(&mut self, body: &[RuleNode], depth: usize, slot: usize) {
        let (outer, inner) = (paths(slot), paths(slot + 1));

        self.blank();
        self.line(depth, "try: # optional");
        self.line(depth + 1, &format!("{} = set({})", inner, outer));
        self.emit_body(body, depth + 1, slot + 1);
        self.line(depth + 1, &format!("{} |= {}", outer, inner));
        self.line(depth, &format!("except {}: pass", self.recoverable()));
        self.blank();
    }

    fn emit_repeat(&mut self, body: &[RuleNode], depth: usize, slot: usize) {
        let (outer, inner) = (paths(slot), paths(slot + 1));

        self.blank();
        self.line(depth, "# begin repeat");
        self.line(depth, &format!("{} = set({})", inner, outer));
        self.blank();
        self.line(depth, "while True:");
        self.line(depth + 1, "try:");
        self.emit_body(body, depth + 2, slot + 1);
        self.line(depth + 2, &format!("{} |= {}", outer, inner));
        self.line(depth + 1, &format!("except {}: break", self.recoverable()));
        self.blank();
        self.line(depth, "# end repeat");
        self.blank();
    }

    fn emit_alternation(&mut self, options: &[RuleNode], depth: usize, slot: usize) {
        let (outer, accumulator, attempt) = (paths(slot), paths(slot + 1), paths(slot + 2));

        self.blank();
        self.line(depth, "# begin one of");
        self.line(depth, &format!("{} = set()", accumulator));

        for (i, option) in options.iter().enumerate() {
            self.blank();
            self.line(depth, &format!("try: # option {}", i + 1));
            self.line(depth + 1, &format!("{} = set({})", attempt, outer));
            self.emit_node(option, depth + 1, slot + 2);
            self.line(depth + 1, &format!("{} |= {}", accumulator, attempt));
            self.line(
                depth,
                &format!("except {}: pass", self.settings.syntax_error),
            );
        }

        self.blank();
        self.line(depth, &format!("if not {}:", accumulator));
        self.line(
            depth + 1,
            &format!("raise {}(self)", self.settings.syntax_error),
        );
        self.blank();
        self.line(depth, &format!("{} = {}", outer, accumulator));
        self.line(depth, "# end one of");
        self.blank();
    }
}

/// Emits the control flow implementing `node` at indentation `depth`,
/// operating on the path set `paths{slot}`.
///
/// # Example
///
/// ```
/// use pathweave::{EmitSettings, RuleNode, emit};
///
/// let node = RuleNode::Terminal { action: "IDENT".to_string() };
/// let code = emit(&node, 0, 0, &EmitSettings::default());
///
/// assert_eq!(code, "paths0 = self.process_paths(paths0, IDENT)\n");
/// ```
pub fn emit(node: &RuleNode, depth: usize, slot: usize, settings: &EmitSettings) -> String {
    let mut writer = CodeWriter::new(settings);
    writer.emit_node(node, depth, slot);
    writer.finish()
}
