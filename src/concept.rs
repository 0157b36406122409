use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A value with translations keyed by language tag. A language with no entry,
/// or a blank entry, has no value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localizable(BTreeMap<String, String>);

impl Localizable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(lang.into(), value.into());
        self
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .get(lang)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|value| value.trim().is_empty())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// The display language and how to fall back when a value has no
/// translation in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageContext {
    pub active: String,
    pub fallbacks: Vec<String>,
    pub fallback_to_any: bool,
}

impl LanguageContext {
    /// Only the given language; no fallback.
    pub fn strict(active: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            fallbacks: Vec::new(),
            fallback_to_any: false,
        }
    }
}

/// Pick the translation to display: the active language first, then the
/// fallbacks in order, then (if allowed) the first language that has a value.
pub fn translate_value(value: &Localizable, language: &LanguageContext) -> Option<String> {
    std::iter::once(&language.active)
        .chain(&language.fallbacks)
        .find_map(|lang| value.get(lang))
        .or_else(|| {
            if language.fallback_to_any {
                value.languages().find_map(|lang| value.get(lang))
            } else {
                None
            }
        })
        .map(str::to_string)
}

/// The part of a concept needed to resolve and decorate a markdown link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptRef {
    pub code: String,
    pub graph_id: String,
    pub id: String,
    #[serde(default)]
    pub definition: Option<Localizable>,
}

impl ConceptRef {
    pub fn new(
        code: impl Into<String>,
        graph_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            graph_id: graph_id.into(),
            id: id.into(),
            definition: None,
        }
    }

    pub fn with_definition(mut self, definition: Localizable) -> Self {
        self.definition = Some(definition);
        self
    }

    /// The "definition" property, if the concept has one.
    pub fn definition(&self) -> Option<&Localizable> {
        self.definition.as_ref()
    }
}

/// A concept together with the concepts it references. Links in its
/// markdown properties are resolved against `related_concepts()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNode {
    #[serde(flatten)]
    pub concept: ConceptRef,
    #[serde(default)]
    pub related: Vec<ConceptRef>,
    #[serde(default)]
    pub broader: Vec<ConceptRef>,
}

impl ConceptNode {
    /// Related concepts first, then broader ones. Order decides which
    /// concept wins when several match a link.
    pub fn related_concepts(&self) -> Vec<ConceptRef> {
        self.related
            .iter()
            .chain(&self.broader)
            .cloned()
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConceptsFile {
    List(Vec<ConceptRef>),
    Node(ConceptNode),
}

/// Parse link candidates from JSON: either an array of concepts or a single
/// concept node with `related` and `broader` references.
pub fn concepts_from_json(json: &str) -> Result<Vec<ConceptRef>, Error> {
    let file: ConceptsFile = serde_json::from_str(json)?;
    Ok(match file {
        ConceptsFile::List(concepts) => concepts,
        ConceptsFile::Node(node) => node.related_concepts(),
    })
}

/// Load link candidates from a JSON file.
pub fn load_concepts(path: &Path) -> Result<Vec<ConceptRef>, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let concepts = concepts_from_json(&content)?;
    tracing::debug!(count = concepts.len(), path = %path.display(), "loaded concepts");
    Ok(concepts)
}
