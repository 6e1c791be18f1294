//! Tool catalog built from the tool host's advertised specs.

use crate::tools::descriptor::{ParamType, ToolDescriptor, ToolParameter, ToolSpec};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

const NO_DESCRIPTION: &str = "No description available";
const UNKNOWN_NAME: &str = "unknown";

/// Why a spec could not be turned into a callable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SpecIssue {
    MissingName,
    PropertiesNotObject,
    UnsupportedType { parameter: String, found: String },
    DuplicateName,
}

impl fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("tool has no name"),
            Self::PropertiesNotObject => f.write_str("input schema properties is not an object"),
            Self::UnsupportedType { parameter, found } => {
                write!(f, "parameter '{parameter}' has unsupported type '{found}'")
            }
            Self::DuplicateName => f.write_str("tool name already registered"),
        }
    }
}

#[derive(Debug, Clone)]
enum CatalogEntry {
    Tool(ToolDescriptor),
    Placeholder(Option<String>),
}

/// Ordered set of tools available to a session.
///
/// Entries keep discovery order. Specs that fail to normalize stay in the
/// listing as placeholders so one bad tool never blocks start-up, but they
/// cannot be called.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from specs in discovery order.
    #[must_use]
    pub fn from_specs(specs: impl IntoIterator<Item = ToolSpec>) -> Self {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.push_spec(spec);
        }
        catalog
    }

    fn push_spec(&mut self, spec: ToolSpec) {
        let position = self.entries.len() + 1;
        let name = spec.name.clone();
        match normalize(spec) {
            Ok(descriptor) => self.push_descriptor(descriptor),
            Err(issue) => {
                tracing::warn!(
                    position,
                    tool = name.as_deref().unwrap_or(UNKNOWN_NAME),
                    error = %issue,
                    "Error processing tool"
                );
                self.entries.push(CatalogEntry::Placeholder(name));
            }
        }
    }

    fn push_descriptor(&mut self, descriptor: ToolDescriptor) {
        if self.index.contains_key(&descriptor.name) {
            tracing::warn!(
                position = self.entries.len() + 1,
                tool = %descriptor.name,
                error = %SpecIssue::DuplicateName,
                "Error processing tool"
            );
            self.entries
                .push(CatalogEntry::Placeholder(Some(descriptor.name)));
            return;
        }
        self.index
            .insert(descriptor.name.clone(), self.entries.len());
        self.entries.push(CatalogEntry::Tool(descriptor));
    }

    /// Looks up a callable tool by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index
            .get(name)
            .and_then(|&i| match &self.entries[i] {
                CatalogEntry::Tool(descriptor) => Some(descriptor),
                CatalogEntry::Placeholder(_) => None,
            })
    }

    /// Iterates callable tools in catalog order.
    pub fn tools(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().filter_map(|entry| match entry {
            CatalogEntry::Tool(descriptor) => Some(descriptor),
            CatalogEntry::Placeholder(_) => None,
        })
    }

    /// Total listed entries, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that could not be normalized.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, CatalogEntry::Placeholder(_)))
            .count()
    }

    /// Renders the numbered, line-per-tool listing embedded in the system prompt.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| render_entry(i + 1, entry))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_entry(position: usize, entry: &CatalogEntry) -> String {
    match entry {
        CatalogEntry::Tool(descriptor) => {
            let params = if descriptor.parameters.is_empty() {
                "no parameters".to_string()
            } else {
                descriptor
                    .parameters
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.kind))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!(
                "{position}. {}({params}) - {}",
                descriptor.name, descriptor.description
            )
        }
        CatalogEntry::Placeholder(name) => format!(
            "{position}. Error processing tool {}",
            name.as_deref().unwrap_or(UNKNOWN_NAME)
        ),
    }
}

fn normalize(spec: ToolSpec) -> Result<ToolDescriptor, SpecIssue> {
    let name = spec
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(SpecIssue::MissingName)?;

    let parameters = match spec.input_schema.get("properties") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(props)) => props
            .iter()
            .map(|(param, schema)| {
                let keyword = schema.get("type").and_then(Value::as_str);
                keyword
                    .and_then(ParamType::from_schema)
                    .map(|kind| ToolParameter {
                        name: param.clone(),
                        kind,
                    })
                    .ok_or_else(|| SpecIssue::UnsupportedType {
                        parameter: param.clone(),
                        found: keyword.unwrap_or(UNKNOWN_NAME).to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(SpecIssue::PropertiesNotObject),
    };

    let description = spec
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    Ok(ToolDescriptor {
        name,
        parameters,
        description,
    })
}
