//! Interpreter configuration

/// Configuration of a single interpretation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Document class loaded before the document is parsed.
    ///
    /// A document that loads a class itself with `\documentclass` fails if this is set.
    pub document_class: Option<String>,
    /// Options passed to `document_class`.
    pub class_options: Vec<String>,
    /// Number of decimals in renderer-facing lengths.
    pub precision: u32,
    /// Name of the input, used in error locations.
    pub file_name: String,
}

impl Config {
    pub const DEFAULT_PRECISION: u32 = 3;
}

impl Default for Config {
    fn default() -> Self {
        Config {
            document_class: None,
            class_options: vec![],
            precision: Config::DEFAULT_PRECISION,
            file_name: "input.tex".into(),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"document_class": "article"}"#).unwrap();
        assert_eq!(
            config,
            Config {
                document_class: Some("article".into()),
                ..Default::default()
            }
        );
    }
}
