//! The generation request.

use serde::Deserialize;

use stratum_core::spec::Payload;

use crate::error::StratumError;

fn default_scale() -> f64 {
    1.0
}

/// Everything one generation needs from the caller.
///
/// Deserializes from the JSON a tool layer sends, accepting a few spellings
/// for each field:
///
/// ```
/// # use stratum::GenerationRequest;
/// let request: GenerationRequest = serde_json::from_str(r#"{
///     "components": [{"id": "s1", "styleTypeId": "service"}, "{'id': 'u1', 'library_id': 'actor'}"],
///     "edges": [],
///     "filename_prefix": "shop",
///     "layout_multiplier": 1.5
/// }"#).unwrap();
///
/// assert_eq!(request.components().len(), 2);
/// assert_eq!(request.name(), "shop");
/// assert_eq!(request.scale(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    components: Vec<Payload>,
    #[serde(default)]
    edges: Vec<Payload>,
    #[serde(default, alias = "namePrefix", alias = "filename_prefix")]
    name: String,
    #[serde(
        default = "default_scale",
        alias = "scaleMultiplier",
        alias = "layout_multiplier"
    )]
    scale: f64,
    #[serde(default, alias = "provenanceText", alias = "source_prompt")]
    prompt: Option<String>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            edges: Vec::new(),
            name: String::new(),
            scale: default_scale(),
            prompt: None,
        }
    }
}

impl GenerationRequest {
    pub fn new(
        components: impl IntoIterator<Item = Payload>,
        edges: impl IntoIterator<Item = Payload>,
    ) -> Self {
        Self {
            components: components.into_iter().collect(),
            edges: edges.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Reads a request from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Json`] if the text is not a request object.
    pub fn from_json(text: &str) -> Result<Self, StratumError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Sets the artifact name prefix.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the layout scale multiplier.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the text recorded in the provenance sidecar.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn components(&self) -> &[Payload] {
        &self.components
    }

    pub fn edges(&self) -> &[Payload] {
        &self.edges
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The provenance text, if any non-empty text was given.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|prompt| !prompt.is_empty())
    }
}
