use std::collections::BTreeMap;

/// Surface id used when the caller does not name one.
pub const DEFAULT_SURFACE_ID: &str = "flower-surface";

/// Viewport dimensions in surface pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where a host-facing surface provider should mount the drawing surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Container {
    /// The host's document root.
    #[default]
    Root,
    /// A host element looked up by identifier; resolution failure is fatal.
    Id(String),
}

/// Construction-time configuration. All fields optional.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Options {
    /// Mount point for a newly created surface.
    #[serde(default)]
    pub container: Container,
    /// Identifier of an existing surface to reuse, or the id to create one
    /// under (defaults to [`DEFAULT_SURFACE_ID`]).
    pub surface_id: Option<String>,
    /// Visual-style properties applied to a newly created surface. Empty
    /// means [`default_styles`].
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    /// Seed for deterministic flower generation; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Options {
    pub fn surface_id(&self) -> &str {
        self.surface_id.as_deref().unwrap_or(DEFAULT_SURFACE_ID)
    }

    /// Styles to apply to a created surface: caller overrides on top of the
    /// defaults.
    pub fn effective_styles(&self) -> BTreeMap<String, String> {
        let mut styles = default_styles();
        for (k, v) in &self.styles {
            styles.insert(k.clone(), v.clone());
        }
        styles
    }
}

/// Default presentation for a created surface: a full-size overlay above the
/// page content that does not intercept pointer events.
pub fn default_styles() -> BTreeMap<String, String> {
    [
        ("display", "block"),
        ("width", "100%"),
        ("height", "100%"),
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("z-index", "1"),
        ("pointer-events", "none"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
