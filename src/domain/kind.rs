//! Component kind vocabulary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The artifact kinds a bundle may contain
///
/// Wire names are stable: they appear in manifests and in persisted
/// component records, so renaming a variant is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Service,
    Directory,
    Label,
    Asset,
    Widget,
    ContentType,
    ContentTemplate,
    Fragment,
    PageTemplate,
    Page,
}

impl ComponentKind {
    /// All kinds, in install priority order
    pub const ALL: [ComponentKind; 10] = [
        ComponentKind::Service,
        ComponentKind::Directory,
        ComponentKind::Label,
        ComponentKind::Asset,
        ComponentKind::Widget,
        ComponentKind::ContentType,
        ComponentKind::ContentTemplate,
        ComponentKind::Fragment,
        ComponentKind::PageTemplate,
        ComponentKind::Page,
    ];

    /// Stable wire name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Service => "service",
            ComponentKind::Directory => "directory",
            ComponentKind::Label => "label",
            ComponentKind::Asset => "asset",
            ComponentKind::Widget => "widget",
            ComponentKind::ContentType => "content-type",
            ComponentKind::ContentTemplate => "content-template",
            ComponentKind::Fragment => "fragment",
            ComponentKind::PageTemplate => "page-template",
            ComponentKind::Page => "page",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown component kind '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in ComponentKind::ALL {
            let parsed: ComponentKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ComponentKind::PageTemplate).unwrap();
        assert_eq!(json, "\"page-template\"");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("hologram".parse::<ComponentKind>().is_err());
    }
}
