//! Decoder configuration.

/// Configuration for the decoder.
///
/// Use the builder pattern to create a configuration:
///
/// ```
/// use hlsforged::DecoderConfig;
///
/// let config = DecoderConfig::builder()
///     .strict(false)
///     .build();
/// assert!(!config.strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderConfig {
    /// Reject tags this library does not know.
    /// When false, unknown tags are logged and skipped.
    /// Default: true
    pub strict: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl DecoderConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }

    /// Strict configuration: unknown tags are an error.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Lenient configuration: unknown tags are skipped.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Builder for `DecoderConfig`.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfigBuilder {
    strict: Option<bool>,
}

impl DecoderConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unknown tags are rejected.
    ///
    /// Default: true
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DecoderConfig {
        DecoderConfig {
            strict: self.strict.unwrap_or(true),
        }
    }
}
