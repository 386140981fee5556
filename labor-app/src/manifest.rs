//! Web app manifest.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

const ICON_SVG: &str = r##"<svg width="192" height="192" viewBox="0 0 192 192" xmlns="http://www.w3.org/2000/svg"><rect width="192" height="192" fill="#2563eb" rx="32"/><text x="96" y="120" font-family="Arial, sans-serif" font-size="80" font-weight="bold" fill="white" text-anchor="middle">AI</text></svg>"##;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub orientation: String,
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    pub fn default_manifest() -> Self {
        Self {
            name: "AI노무사 - 스마트 노무 관리".to_string(),
            short_name: "AI노무사".to_string(),
            description: "AI 기술로 더 쉽고 정확한 노무 업무를 경험하세요".to_string(),
            start_url: "/".to_string(),
            display: "standalone".to_string(),
            background_color: "#ffffff".to_string(),
            theme_color: "#2563eb".to_string(),
            orientation: "portrait-primary".to_string(),
            icons: vec![ManifestIcon {
                src: svg_data_uri(ICON_SVG),
                sizes: "192x192".to_string(),
                mime_type: "image/svg+xml".to_string(),
            }],
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
