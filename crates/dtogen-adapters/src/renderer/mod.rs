//! Code renderers.
//!
//! Renderers turn the abstract [`CodeDocument`](dtogen_core::domain::CodeDocument)
//! into target text. Layout is entirely a renderer concern.

pub mod csharp;
pub mod json;

use std::{fmt, str::FromStr};

use dtogen_core::application::ports::CodeRenderer;

pub use csharp::CSharpRenderer;
pub use json::JsonRenderer;

/// Available renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RendererKind {
    #[default]
    CSharp,
    Json,
}

impl RendererKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CSharp => "csharp",
            Self::Json => "json",
        }
    }

    /// Instantiate the renderer.
    pub fn create(self) -> Box<dyn CodeRenderer> {
        match self {
            Self::CSharp => Box::new(CSharpRenderer::new()),
            Self::Json => Box::new(JsonRenderer::new()),
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(Self::CSharp),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown renderer '{other}' (expected csharp or json)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_renderer_names() {
        assert_eq!("csharp".parse::<RendererKind>(), Ok(RendererKind::CSharp));
        assert_eq!("C#".parse::<RendererKind>(), Ok(RendererKind::CSharp));
        assert_eq!("JSON".parse::<RendererKind>(), Ok(RendererKind::Json));
        assert!("yaml".parse::<RendererKind>().is_err());
    }

    #[test]
    fn created_renderers_use_their_extension() {
        assert_eq!(RendererKind::CSharp.create().file_extension(), "cs");
        assert_eq!(RendererKind::Json.create().file_extension(), "json");
    }
}
