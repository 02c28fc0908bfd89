//! Dependency manifest aggregation
//!
//! Recipes declare gems while the composition script runs; the aggregator merges
//! repeated declarations for the same name and renders the whole collection as
//! grouped, sorted statements appended to the application's Gemfile.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Options accepted alongside a gem declaration.
///
/// Environment groups are a dedicated field rather than a reserved key inside the
/// free-form options map, so a declaration cannot smuggle a `group:` option past
/// the normalization step.
#[derive(Debug, Default, Clone)]
pub struct GemOptions {
    /// Environment tags the gem belongs to. Empty means ungrouped.
    pub groups: Vec<String>,
    /// Free-form options rendered verbatim into the gem statement, in
    /// declaration order.
    pub options: IndexMap<String, Value>,
}

impl GemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a declaration that only carries environment groups.
    pub fn group<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { groups: groups.into_iter().map(Into::into).collect(), options: IndexMap::new() }
    }

    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }
}

/// A single aggregated gem requirement. Serializable so embedders can pass
/// the aggregated declarations to external scripts as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct GemEntry {
    name: String,
    version: Option<String>,
    groups: Vec<String>,
    options: IndexMap<String, Value>,
}

impl GemEntry {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), version: None, groups: Vec::new(), options: IndexMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn options(&self) -> &IndexMap<String, Value> {
        &self.options
    }

    /// Renders the `gem ...` statement for this entry, without indentation.
    fn statement(&self) -> String {
        let mut args = vec![format!("'{}'", self.name)];
        if let Some(version) = &self.version {
            args.push(format!("'{version}'"));
        }
        for (key, value) in &self.options {
            args.push(format!("{key}: {}", render_value(value)));
        }
        format!("gem {}", args.join(", "))
    }
}

/// Collects gem declarations and renders them back out as manifest text.
#[derive(Debug, Default)]
pub struct GemfileAggregator {
    entries: IndexMap<String, GemEntry>,
}

impl GemfileAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or updates a gem declaration.
    ///
    /// Re-declaring an existing name merges instead of replacing: a supplied
    /// version overwrites the stored one, options merge right-biased, and a
    /// supplied group set replaces the stored one when it differs after
    /// normalization. Groups are never accumulated across calls.
    pub fn declare(&mut self, name: &str, version: Option<&str>, opts: GemOptions) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidDeclaration("gem name must not be empty".to_string()));
        }
        if opts.options.contains_key("group") {
            return Err(Error::InvalidDeclaration(format!(
                "'{name}' uses the reserved 'group' option key; use GemOptions::groups instead"
            )));
        }

        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| GemEntry::new(name));

        if let Some(version) = version {
            entry.version = Some(version.to_string());
        }

        let groups = normalize_groups(&opts.groups);
        if !groups.is_empty() && groups != entry.groups {
            entry.groups = groups;
        }

        for (key, value) in opts.options {
            entry.options.insert(key, value);
        }

        log::debug!("declared gem '{name}'");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&GemEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the full manifest body.
    ///
    /// Groups sort with the ungrouped entries first, then lexicographically by
    /// tag sequence; names sort lexicographically inside each group. Ungrouped
    /// entries render unindented, grouped ones inside a `group ... do` block.
    /// The output is deterministic for the same set of declarations.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (groups, mut names) in self.grouped() {
            names.sort();
            if groups.is_empty() {
                for name in names {
                    out.push_str(&self.entries[&name].statement());
                    out.push('\n');
                }
            } else {
                out.push_str(&format!("group :{} do\n", groups.join(", :")));
                for name in names {
                    out.push_str("  ");
                    out.push_str(&self.entries[&name].statement());
                    out.push('\n');
                }
                out.push_str("end\n");
            }
            out.push('\n');
        }
        out
    }

    /// Appends the rendered manifest body to an existing manifest file.
    ///
    /// Prior content is never replaced; a blank separator line and the body go
    /// out in a single write call.
    pub fn append_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut buf = String::from("\n");
        buf.push_str(&self.render());

        let mut file =
            std::fs::OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(buf.as_bytes())?;
        log::info!("appended {} gem(s) to {}", self.len(), path.display());
        Ok(())
    }

    fn grouped(&self) -> BTreeMap<Vec<String>, Vec<String>> {
        let mut groups: BTreeMap<Vec<String>, Vec<String>> = BTreeMap::new();
        for (name, entry) in &self.entries {
            groups.entry(entry.groups.clone()).or_default().push(name.clone());
        }
        groups
    }
}

/// Compacts, deduplicates and sorts a group tag list.
fn normalize_groups(groups: &[String]) -> Vec<String> {
    let mut groups: Vec<String> =
        groups.iter().filter(|g| !g.trim().is_empty()).cloned().collect();
    groups.sort();
    groups.dedup();
    groups
}

/// Renders an option value in manifest literal form.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let pairs: Vec<String> =
                map.iter().map(|(k, v)| format!("{k}: {}", render_value(v))).collect();
            format!("{{ {} }}", pairs.join(", "))
        }
    }
}
