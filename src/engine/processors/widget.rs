//! Widget processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(WidgetProcessor, Widget, register_widget);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::LocalPlatform;
    use crate::domain::{ArtifactDescriptor, WidgetDescriptor};
    use crate::engine::processors::{ComponentProcessor, PlatformContext};
    use crate::engine::readiness::ReadinessProbe;
    use crate::manifest::BundleManifest;
    use tempfile::TempDir;

    #[test]
    fn test_process_preserves_manifest_order() {
        let manifest: BundleManifest = serde_yaml::from_str(
            r#"
bundle: acme
version: "1.0"
widgets:
  - code: zeta
    titles: { en: Z }
  - code: alpha
    titles: { en: A }
"#,
        )
        .unwrap();

        let codes: Vec<String> = WidgetProcessor
            .process(&manifest)
            .iter()
            .map(|d| d.code().to_string())
            .collect();
        assert_eq!(codes, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_install_and_uninstall() {
        let temp = TempDir::new().unwrap();
        let platform = LocalPlatform::new(temp.path());
        let probe = ReadinessProbe::default();
        let ctx = PlatformContext {
            engine: &platform,
            cluster: &platform,
            readiness: &probe,
        };

        let descriptor = ArtifactDescriptor::Widget(WidgetDescriptor {
            code: "nav".to_string(),
            titles: Default::default(),
            group: None,
            custom_ui: None,
        });
        WidgetProcessor.install(&descriptor, &ctx).unwrap();
        assert!(WidgetProcessor.verify_live(&descriptor, &ctx).unwrap());

        WidgetProcessor.uninstall("nav", &ctx).unwrap();
        // Removing twice must not fail
        WidgetProcessor.uninstall("nav", &ctx).unwrap();
    }
}
