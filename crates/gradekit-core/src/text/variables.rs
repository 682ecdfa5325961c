//! Variable maps and one-shot expansion.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type Producer = Arc<dyn Fn() -> String + Send + Sync>;

/// Variable names mapped to value producers.
///
/// Producers run on every expansion, so a variable can report a value that
/// changes over time (a counter, a clock).
#[derive(Clone, Default)]
pub struct VariableMap {
    vars: BTreeMap<String, Producer>,
}

impl VariableMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a fixed value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        self.vars
            .insert(name.into(), Arc::new(move || value.clone()));
    }

    /// Bind `name` to a producer evaluated at expansion time.
    pub fn insert_with<F>(&mut self, name: impl Into<String>, producer: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.vars.insert(name.into(), Arc::new(producer));
    }

    /// Current value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).map(|producer| producer())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

impl fmt::Debug for VariableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for VariableMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for VariableMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Expand `sigil`-delimited variables in `text`.
///
/// - `%name%` becomes the value of `name`
/// - `%%` becomes a single `%`
/// - an unknown `%name%` is kept verbatim
/// - an unterminated `%` copies the rest of the text verbatim
///
/// Expansion is a single pass; substituted values are not expanded again.
#[must_use]
pub fn expand_variables(text: &str, vars: &VariableMap, sigil: char) -> String {
    let width = sigil.len_utf8();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(sigil) {
        out.push_str(&rest[..open]);
        let after = &rest[open + width..];

        let Some(close) = after.find(sigil) else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        if name.is_empty() {
            out.push(sigil);
        } else if let Some(value) = vars.get(name) {
            out.push_str(&value);
        } else {
            tracing::trace!(name, "unknown variable left verbatim");
            out.push(sigil);
            out.push_str(name);
            out.push(sigil);
        }

        rest = &after[close + width..];
    }

    out.push_str(rest);
    out
}
