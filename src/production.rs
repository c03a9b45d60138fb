use crate::ast::RuleNode;
use crate::emitter::{CodeWriter, EmitSettings, paths};
use crate::interface::Features;
use crate::template::RuleTemplate;

/// Normalizes `rule` with `features` and emits the production `name`.
///
/// Returns an empty string when the rule normalizes to nothing: such a
/// production places no obligation on the input and is left out of the
/// generated source entirely.
///
/// # Example
///
/// ```
/// use pathweave::{EmitSettings, Features, generate_production, opt, seq, switch};
///
/// let settings = EmitSettings::default();
/// let code = generate_production("Statement", &seq!["EXPR", opt!["SEMI"]], &Features::new(), &settings);
/// assert!(code.starts_with("class Statement(Production):\n"));
///
/// let hook = switch!("debug"; "DEBUG_HOOK");
/// assert_eq!(generate_production("Hook", &hook, &Features::new(), &settings), "");
/// ```
pub fn generate_production(
    name: &str,
    rule: &RuleTemplate<'_>,
    features: &Features,
    settings: &EmitSettings,
) -> String {
    emit_production(name, rule.build(features).as_ref(), settings)
}

/// Emits the production `name` around an already normalized root. `None`
/// stands for an elided root.
pub fn emit_production(name: &str, root: Option<&RuleNode>, settings: &EmitSettings) -> String {
    let Some(root) = root.filter(|root| !root.is_empty()) else {
        return String::new();
    };

    let mut writer = CodeWriter::new(settings);
    let settings = writer.settings();
    let base = &settings.base_class;

    writer.line(0, &format!("class {}({}):", name, base));
    writer.line(
        1,
        &format!(
            "def __init__(self, parent: Optional[{}], lexer: \"{}\"):",
            base, settings.lexer_type
        ),
    );
    writer.line(2, "super().__init__(parent, lexer)");
    writer.line(2, &format!("{} = {{{}}}", paths(0), settings.lexer_state));
    writer.emit_node(root, 2, 0);
    writer.line(
        2,
        &format!(
            "{}: set[\"{}\"] = {}",
            settings.result_attribute,
            settings.path_type,
            paths(0)
        ),
    );
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{one_of, opt, repeat, seq, switch};

    fn generate(rule: &RuleTemplate<'_>) -> String {
        generate_production("Rule", rule, &Features::new(), &EmitSettings::default())
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_production_wrapper() {
        let code = generate(&RuleTemplate::from("IDENT"));
        let expected = concat!(
            "class Rule(Production):\n",
            "    def __init__(self, parent: Optional[Production], lexer: \"Lexer\"):\n",
            "        super().__init__(parent, lexer)\n",
            "        paths0 = {lexer.get_state()}\n",
            "        paths0 = self.process_paths(paths0, IDENT)\n",
            "        self.paths: set[\"Terminal\"] = paths0\n",
        );
        assert_eq!(code, expected);
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_block_before_result() {
        let code = generate(&seq!["A", repeat!["B"]]);
        assert!(code.contains("        # begin repeat\n"));
        assert!(code.ends_with("        # end repeat\n\n        self.paths: set[\"Terminal\"] = paths0\n"));
        assert!(!code.contains("\n\n\n"));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_disabled_production_is_elided() {
        assert_eq!(generate(&switch!("debug"; "DEBUG_HOOK")), "");
        assert_eq!(generate(&seq![switch!("a"; "X"), switch!("b"; "Y")]), "");
        assert_eq!(generate(&one_of![opt![], repeat![]]), "");
        assert_eq!(emit_production("Rule", None, &EmitSettings::default()), "");
        assert_eq!(
            emit_production(
                "Rule",
                Some(&RuleNode::Sequence(vec![])),
                &EmitSettings::default()
            ),
            ""
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_enabled_production_is_emitted() {
        let features = Features::from_iter(["debug"]);
        let code = generate_production(
            "Hook",
            &switch!("debug"; "DEBUG_HOOK"),
            &features,
            &EmitSettings::default(),
        );
        assert!(code.contains("paths0 = self.process_paths(paths0, DEBUG_HOOK)"));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_one_terminal_is_never_elided() {
        let code = generate(&seq![switch!("debug"; "X"), opt![switch!("debug"; "Y")], "Z"]);
        assert!(code.starts_with("class Rule(Production):"));
        assert_eq!(code.matches("self.process_paths(").count(), 1);
    }
}
