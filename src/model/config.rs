//! Parser and scene configuration

/// Multiplier applied to the largest bounding-box extent to get the camera distance
pub const DEFAULT_DISTANCE_FACTOR: f64 = 2.5;

/// Configuration for parsing building documents
///
/// # Example
///
/// ```
/// use gbxml_scene::ParserConfig;
///
/// let config = ParserConfig::new().strict(true);
/// assert!(config.is_strict());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Abort on the first invalid surface instead of skipping it
    strict: bool,
}

impl ParserConfig {
    /// Create a new parser configuration that skips invalid surfaces
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose whether an invalid surface aborts the parse
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether an invalid surface aborts the parse
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// Configuration for a scene session
///
/// # Example
///
/// ```
/// use gbxml_scene::{ParserConfig, SceneConfig};
///
/// let config = SceneConfig::new()
///     .with_distance_factor(3.0)
///     .with_parser_config(ParserConfig::new().strict(true));
/// assert_eq!(config.distance_factor(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    distance_factor: f64,
    double_sided: bool,
    parser: ParserConfig,
}

impl SceneConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            distance_factor: DEFAULT_DISTANCE_FACTOR,
            double_sided: true,
            parser: ParserConfig::new(),
        }
    }

    /// Set the camera distance multiplier
    ///
    /// Non-finite or non-positive values are ignored.
    pub fn with_distance_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.distance_factor = factor;
        }
        self
    }

    /// Choose whether meshes render both faces
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// Set the parser configuration used by loads
    pub fn with_parser_config(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Camera distance multiplier
    pub fn distance_factor(&self) -> f64 {
        self.distance_factor
    }

    /// Whether meshes render both faces
    pub fn double_sided(&self) -> bool {
        self.double_sided
    }

    /// Parser configuration used by loads
    pub fn parser_config(&self) -> &ParserConfig {
        &self.parser
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}
