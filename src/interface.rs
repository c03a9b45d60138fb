use std::collections::BTreeSet;

use crate::template::RuleTemplate;

/// The set of compile-time features that are switched on.
///
/// Every [`switch!`](crate::switch) whose feature is absent from this set is
/// erased while its template is normalized. The set is fixed before any rule
/// is built and is never consulted by the generated code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Features {
    enabled: BTreeSet<String>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable<T: AsRef<str>>(&mut self, name: T) -> &mut Self {
        self.enabled.insert(name.as_ref().to_string());
        self
    }

    pub fn is_enabled<T: AsRef<str>>(&self, name: T) -> bool {
        self.enabled.contains(name.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Features {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

/// `PathweaveInterface` is the registry side of the generator: named
/// productions go in, parser source comes out.
pub trait PathweaveInterface {
    /// `add_production` normalizes `rule` and registers it under `name`.
    ///
    /// # Errors
    /// - If the name is not a valid identifier.
    /// - If a production with the same name is already registered.
    fn add_production<'a, N: AsRef<str>, R: Into<RuleTemplate<'a>>>(
        &mut self,
        name: N,
        rule: R,
    ) -> crate::PathweaveResult<()>;

    /// `generate` emits the parsing routine for one production. An elided
    /// production yields an empty string.
    ///
    /// # Errors
    /// - If the production name is not found.
    fn generate<N: AsRef<str>>(&self, name: N) -> crate::PathweaveResult<String>;

    /// `generate_all` emits every non-elided production in registration
    /// order, preceded by the configured header.
    fn generate_all(&self) -> String;

    /// `elided` lists the registered productions that generate nothing.
    fn elided(&self) -> Vec<&str>;
}
