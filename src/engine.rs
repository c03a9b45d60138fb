use std::collections::{BTreeSet, HashMap};

use crate::ast::RuleNode;
use crate::emitter::EmitSettings;
use crate::error::{PathweaveError, PathweaveResult, validate_production_name};
use crate::eval::{PathFailure, PathRuntime, evaluate};
use crate::interface::{Features, PathweaveInterface};
use crate::log::{Log, Logger};
use crate::production::emit_production;
use crate::template::RuleTemplate;

/// A registered production: its name and its normalized root, `None` when
/// the whole production is elided.
#[derive(Debug, Clone)]
struct Production {
    name: String,
    root: Option<RuleNode>,
}

/// `PathweaveEngine` is the primary implementation of the
/// `PathweaveInterface` trait.
///
/// The engine owns one feature configuration and one set of emit settings.
/// Productions are normalized as they are added, so the features in effect
/// at construction decide which switches survive.
///
/// # Examples
///
/// ```
/// use pathweave::{PathweaveEngine, PathweaveInterface, one_of, opt, seq};
///
/// let mut engine = PathweaveEngine::new();
/// engine.add_production("Sign", one_of!["PLUS", "MINUS"]).unwrap();
/// engine.add_production("Number", seq![opt!["SIGN"], "DIGITS"]).unwrap();
///
/// let code = engine.generate("Sign").unwrap();
/// assert!(code.starts_with("class Sign(Production):"));
///
/// let module = engine.generate_all();
/// assert!(module.contains("class Number(Production):"));
/// ```
#[derive(Debug, Clone)]
pub struct PathweaveEngine {
    features: Features,
    settings: EmitSettings,
    productions: Vec<Production>,
    index: HashMap<String, usize>,
    log: Log,
}

impl PathweaveEngine {
    /// Creates an engine with no features enabled and default settings.
    pub fn new() -> Self {
        Self::with_config(Features::new(), EmitSettings::default())
    }

    /// Creates an engine with explicit features and emit settings.
    pub fn with_config(features: Features, settings: EmitSettings) -> Self {
        Self {
            features,
            settings,
            productions: Vec::new(),
            index: HashMap::new(),
            log: Log::new(),
        }
    }

    pub const fn features(&self) -> &Features {
        &self.features
    }

    pub const fn settings(&self) -> &EmitSettings {
        &self.settings
    }

    /// Notes and warnings gathered while productions were added.
    pub const fn log(&self) -> &Log {
        &self.log
    }

    /// The normalized root of a production, `None` if it is unknown or
    /// elided.
    pub fn root<N: AsRef<str>>(&self, name: N) -> Option<&RuleNode> {
        self.production(name.as_ref())
            .ok()
            .and_then(|production| production.root.as_ref())
    }

    /// Runs a registered production against `paths` through `runtime`,
    /// with the semantics of its generated code. An elided production
    /// returns `paths` untouched.
    ///
    /// # Errors
    /// - `MissingProduction` if the production name is not found.
    /// - The inner `Err` carries the failure escaping the production.
    pub fn evaluate<N: AsRef<str>, R: PathRuntime>(
        &self,
        name: N,
        paths: BTreeSet<R::Path>,
        runtime: &mut R,
    ) -> PathweaveResult<Result<BTreeSet<R::Path>, PathFailure>> {
        let production = self.production(name.as_ref())?;
        Ok(match &production.root {
            Some(root) => evaluate(root, paths, runtime),
            None => Ok(paths),
        })
    }

    fn production(&self, name: &str) -> PathweaveResult<&Production> {
        self.index
            .get(name)
            .and_then(|&i| self.productions.get(i))
            .ok_or_else(|| PathweaveError::MissingProduction {
                production_name: name.to_string(),
            })
    }

    fn record_diagnostics(&mut self, name: &str, root: Option<&RuleNode>) {
        let Some(root) = root else {
            self.log
                .add_note(format!("production `{}` is empty and will be elided", name));
            return;
        };
        lint_node(name, root, &mut self.log);
    }
}

/// Flags constructs that generate valid but suspicious code.
fn lint_node(name: &str, node: &RuleNode, log: &mut Log) {
    match node {
        RuleNode::Repeat(body) if body.iter().all(RuleNode::is_nullable) => {
            log.add_warning(format!(
                "repeat in production `{}` can succeed without consuming input; \
                 its loop only ends on an error",
                name
            ));
        }
        RuleNode::Alternation(options) => {
            let mut seen = Vec::with_capacity(options.len());
            for option in options {
                if seen.contains(&option) {
                    log.add_warning(format!(
                        "alternation in production `{}` lists the same {} option more than once",
                        name,
                        option.kind()
                    ));
                    break;
                }
                seen.push(option);
            }
        }
        RuleNode::Sequence(_)
        | RuleNode::Optional(_)
        | RuleNode::Repeat(_)
        | RuleNode::Switch { .. }
        | RuleNode::Terminal { .. } => {}
    }

    for child in node.children().unwrap_or_default() {
        lint_node(name, child, log);
    }
}

impl Default for PathweaveEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PathweaveInterface for PathweaveEngine {
    /// Normalizes `rule` with the engine's features and registers it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the production was registered, including when it is
    ///   elided
    /// * `Err(PathweaveError::InvalidProductionName)` if the name cannot name
    ///   a class
    /// * `Err(PathweaveError::ProductionExists)` if the name is taken
    fn add_production<'a, N: AsRef<str>, R: Into<RuleTemplate<'a>>>(
        &mut self,
        name: N,
        rule: R,
    ) -> PathweaveResult<()> {
        let name = name.as_ref();
        validate_production_name(name)?;

        if self.index.contains_key(name) {
            return Err(PathweaveError::ProductionExists {
                production_name: name.to_string(),
            });
        }

        let root = rule.into().build(&self.features);
        self.record_diagnostics(name, root.as_ref());

        self.index.insert(name.to_string(), self.productions.len());
        self.productions.push(Production {
            name: name.to_string(),
            root,
        });

        Ok(())
    }

    fn generate<N: AsRef<str>>(&self, name: N) -> PathweaveResult<String> {
        let production = self.production(name.as_ref())?;
        Ok(emit_production(
            &production.name,
            production.root.as_ref(),
            &self.settings,
        ))
    }

    fn generate_all(&self) -> String {
        let mut sections: Vec<String> = Vec::with_capacity(self.productions.len() + 1);

        if !self.settings.header.is_empty() {
            let mut header = self.settings.header.join("\n");
            header.push('\n');
            sections.push(header);
        }

        sections.extend(
            self.productions
                .iter()
                .map(|p| emit_production(&p.name, p.root.as_ref(), &self.settings))
                .filter(|code| !code.is_empty()),
        );

        sections.join("\n\n")
    }

    fn elided(&self) -> Vec<&str> {
        self.productions
            .iter()
            .filter(|p| p.root.is_none())
            .map(|p| p.name.as_str())
            .collect()
    }
}
