//! Media types reported by the workspace and their bundler loaders.

use crate::host::{ImportAttributes, Loader};
use serde::{Deserialize, Serialize};

/// Media type the workspace detected for a loaded module.
///
/// Deserializing an unknown name yields [`MediaType::Unknown`], so media types
/// added by newer workspaces never fail a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    JavaScript,
    Jsx,
    Mjs,
    Cjs,
    TypeScript,
    Mts,
    Cts,
    Dts,
    Dmts,
    Dcts,
    Tsx,
    Css,
    Json,
    Html,
    Sql,
    Wasm,
    SourceMap,
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// Bundler loader for content of this media type.
    ///
    /// Anything without a dedicated loader falls back to [`Loader::Default`].
    #[must_use]
    pub fn loader(self) -> Loader {
        match self {
            Self::JavaScript | Self::Mjs | Self::Cjs => Loader::Js,
            Self::Jsx => Loader::Jsx,
            Self::TypeScript | Self::Mts | Self::Cts | Self::Dts | Self::Dmts | Self::Dcts => {
                Loader::Ts
            }
            Self::Tsx => Loader::Tsx,
            Self::Css => Loader::Css,
            Self::Json | Self::SourceMap => Loader::Json,
            Self::Wasm => Loader::Binary,
            Self::Html | Self::Sql | Self::Unknown => Loader::Default,
        }
    }
}

/// Module type requested through an import attribute (`with { type: "json" }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedModuleType {
    #[default]
    Default,
    Text,
    Bytes,
    Json,
}

impl RequestedModuleType {
    /// Map the value of a `type` attribute. Absent or unrecognized values
    /// request the default module type.
    #[must_use]
    pub fn from_type_attribute(value: Option<&str>) -> Self {
        match value {
            Some("text") => Self::Text,
            Some("bytes") => Self::Bytes,
            Some("json") => Self::Json,
            _ => Self::Default,
        }
    }

    /// Derive the requested module type from an import's attribute map.
    #[must_use]
    pub fn from_attributes(with: &ImportAttributes) -> Self {
        Self::from_type_attribute(with.get("type").map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_loaders() {
        assert_eq!(MediaType::JavaScript.loader(), Loader::Js);
        assert_eq!(MediaType::Mjs.loader(), Loader::Js);
        assert_eq!(MediaType::Cjs.loader(), Loader::Js);
        assert_eq!(MediaType::Jsx.loader(), Loader::Jsx);
    }

    #[test]
    fn test_typed_loaders() {
        for media in [
            MediaType::TypeScript,
            MediaType::Mts,
            MediaType::Cts,
            MediaType::Dts,
            MediaType::Dmts,
            MediaType::Dcts,
        ] {
            assert_eq!(media.loader(), Loader::Ts, "{media:?}");
        }
        assert_eq!(MediaType::Tsx.loader(), Loader::Tsx);
    }

    #[test]
    fn test_data_and_passthrough_loaders() {
        assert_eq!(MediaType::Css.loader(), Loader::Css);
        assert_eq!(MediaType::Json.loader(), Loader::Json);
        assert_eq!(MediaType::SourceMap.loader(), Loader::Json);
        assert_eq!(MediaType::Wasm.loader(), Loader::Binary);
        assert_eq!(MediaType::Html.loader(), Loader::Default);
        assert_eq!(MediaType::Sql.loader(), Loader::Default);
        assert_eq!(MediaType::Unknown.loader(), Loader::Default);
    }

    #[test]
    fn test_unknown_media_type_name_deserializes_to_unknown() {
        let media: MediaType = serde_json::from_str(r#""Svelte""#).unwrap();
        assert_eq!(media, MediaType::Unknown);
        assert_eq!(media.loader(), Loader::Default);

        let media: MediaType = serde_json::from_str(r#""Tsx""#).unwrap();
        assert_eq!(media, MediaType::Tsx);
    }

    #[test]
    fn test_requested_module_type_from_attribute() {
        assert_eq!(
            RequestedModuleType::from_type_attribute(Some("json")),
            RequestedModuleType::Json
        );
        assert_eq!(
            RequestedModuleType::from_type_attribute(Some("text")),
            RequestedModuleType::Text
        );
        assert_eq!(
            RequestedModuleType::from_type_attribute(Some("bytes")),
            RequestedModuleType::Bytes
        );
        assert_eq!(
            RequestedModuleType::from_type_attribute(Some("css")),
            RequestedModuleType::Default
        );
        assert_eq!(
            RequestedModuleType::from_type_attribute(None),
            RequestedModuleType::Default
        );
    }

    #[test]
    fn test_requested_module_type_from_attributes() {
        let mut with = ImportAttributes::default();
        assert_eq!(
            RequestedModuleType::from_attributes(&with),
            RequestedModuleType::Default
        );

        with.insert("type".to_string(), "json".to_string());
        assert_eq!(
            RequestedModuleType::from_attributes(&with),
            RequestedModuleType::Json
        );
    }
}
