//! Serializer configuration.
//!
//! Output options only change how the finished tree is written; they never
//! change the shape of the tree itself.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XMLBIND_XML_DECLARATION` | true | Write the `<?xml ...?>` declaration |
//! | `XMLBIND_ENCODING` | UTF-8 | Encoding named in the declaration |
//! | `XMLBIND_PRETTY_PRINT` | false | Indent nested elements |
//! | `XMLBIND_MAX_DEPTH` | 256 | Maximum record nesting depth |
//!
//! # Example
//!
//! ```rust
//! use xmlbind_serde::SerializerConfig;
//!
//! let config = SerializerConfig {
//!     pretty_print: true,
//!     xml_declaration: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::{ArgAction, Parser};

/// Default bound on record nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options applied when rendering a record to text.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "xmlbind")]
pub struct SerializerConfig {
    /// Write the XML declaration.
    #[arg(long, env = "XMLBIND_XML_DECLARATION", default_value_t = true, action = ArgAction::Set)]
    pub xml_declaration: bool,

    /// Encoding named in the XML declaration.
    #[arg(long, env = "XMLBIND_ENCODING", default_value = "UTF-8")]
    pub encoding: String,

    /// Indent nested elements.
    #[arg(long, env = "XMLBIND_PRETTY_PRINT", default_value_t = false, action = ArgAction::Set)]
    pub pretty_print: bool,

    /// Maximum nesting depth of records and wildcard elements.
    #[arg(long, env = "XMLBIND_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            encoding: "UTF-8".to_string(),
            pretty_print: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SerializerConfig {
    /// Creates a configuration from environment variables.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["xmlbind"]).unwrap_or_default()
    }

    /// Whether the configured encoding names UTF-8, the only encoding the
    /// writer produces.
    pub fn is_utf8(&self) -> bool {
        matches!(
            self.encoding.to_ascii_lowercase().as_str(),
            "utf-8" | "utf8"
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.is_utf8() {
            errors.push(format!("Unsupported encoding: {}", self.encoding));
        }

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
