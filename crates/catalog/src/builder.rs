use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{CatalogError, Result};
use crate::registry::ModelRegistry;
use crate::types::{Method, Model, ModelCatalog, SdkConfig};
use sdkgen_descriptor::ClassDescriptor;

/// Uppercase the first character of a backend class name.
///
/// Client SDK class names start with a capital letter. An empty name has
/// no first character to capitalize, which is a hard input error rather
/// than something to paper over.
pub fn capitalize(name: &str) -> Result<String> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(CatalogError::InvalidName)?;
    Ok(first.to_uppercase().chain(chars).collect())
}

/// Stage 1: convert raw class descriptors into catalog models.
///
/// Classes without a shared constructor are not models; they are skipped
/// with a diagnostic and everything else proceeds. Duplicate names (under
/// case-insensitive comparison) abort the run.
pub struct ModelCatalogBuilder {
    registry: ModelRegistry,
}

impl ModelCatalogBuilder {
    pub fn new() -> Self {
        Self {
            registry: ModelRegistry::new(),
        }
    }

    /// Build the catalog and the name index over it.
    pub fn build(
        mut self,
        classes: Vec<ClassDescriptor>,
        diagnostics: &mut Diagnostics,
    ) -> Result<(ModelCatalog, ModelRegistry)> {
        let mut catalog = ModelCatalog::new();

        for class in classes {
            let display_name = capitalize(&class.name)?;
            let sdk_config = SdkConfig::overlay(class.sdk.as_ref());

            if !class.has_ctor {
                // Exposed on the same handler, but not a model
                diagnostics.push(Diagnostic::SkippedNonModel {
                    class_name: display_name,
                });
                continue;
            }

            let is_user_model =
                class.prototype.extends_user_base || class.prototype.is_user_base;

            let model = Model {
                name: class.name,
                display_name: display_name.clone(),
                description: class.description,
                sdk_config,
                properties: class.properties,
                is_user_model,
                methods: class.methods.into_iter().map(Method::from_descriptor).collect(),
                scopes: Default::default(),
                relations: class.relations,
            };

            self.registry.insert(&display_name)?;
            catalog.insert(display_name, model);
        }

        Ok((catalog, self.registry))
    }
}

impl Default for ModelCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sdkgen_descriptor::{MethodDescriptor, PrototypeInfo, SdkSettings};

    #[test]
    fn capitalize_uppercases_first_character() {
        assert_eq!(capitalize("product").expect("non-empty"), "Product");
        assert_eq!(capitalize("Product").expect("non-empty"), "Product");
        assert_eq!(capitalize("a").expect("non-empty"), "A");
    }

    #[test]
    fn capitalize_rejects_empty_name() {
        let err = capitalize("").expect_err("empty name");
        assert!(matches!(err, CatalogError::InvalidName));
    }

    #[test]
    fn model_classes_are_registered_under_display_name() {
        let mut diagnostics = Diagnostics::new();
        let classes = vec![
            ClassDescriptor::new("product").description("Catalog products"),
            ClassDescriptor::new("category"),
        ];

        let (catalog, registry) = ModelCatalogBuilder::new()
            .build(classes, &mut diagnostics)
            .expect("build");

        assert_eq!(catalog.len(), 2);
        assert!(diagnostics.is_empty());
        let product = &catalog["Product"];
        assert_eq!(product.name, "product");
        assert_eq!(product.display_name, "Product");
        assert_eq!(product.description.as_deref(), Some("Catalog products"));
        assert!(product.sdk_enabled());
        assert_eq!(registry.resolve("PRODUCT"), Some("Product"));
    }

    #[test]
    fn non_model_classes_are_skipped_with_a_diagnostic() {
        let mut diagnostics = Diagnostics::new();
        let classes = vec![
            ClassDescriptor::new("stats").without_ctor(),
            ClassDescriptor::new("product"),
        ];

        let (catalog, _) = ModelCatalogBuilder::new()
            .build(classes, &mut diagnostics)
            .expect("build");

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains_key("Product"));
        assert_eq!(
            diagnostics.entries(),
            &[Diagnostic::SkippedNonModel {
                class_name: "Stats".to_string(),
            }]
        );
    }

    #[test]
    fn duplicate_model_names_abort_the_run() {
        let mut diagnostics = Diagnostics::new();
        let classes = vec![
            ClassDescriptor::new("product"),
            ClassDescriptor::new("Product"),
        ];

        let err = ModelCatalogBuilder::new()
            .build(classes, &mut diagnostics)
            .expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateModel(_)));
    }

    #[test]
    fn sdk_settings_overlay_defaults() {
        let mut diagnostics = Diagnostics::new();
        let classes = vec![ClassDescriptor::new("invoice").sdk(SdkSettings {
            enabled: Some(false),
            blacklist: None,
        })];

        let (catalog, _) = ModelCatalogBuilder::new()
            .build(classes, &mut diagnostics)
            .expect("build");

        let invoice = &catalog["Invoice"];
        assert!(!invoice.sdk_enabled());
        assert!(invoice.sdk_config.blacklist.is_empty());
    }

    #[test]
    fn user_model_detection_honors_both_prototype_facts() {
        let mut diagnostics = Diagnostics::new();
        let classes = vec![
            ClassDescriptor::new("account").prototype(PrototypeInfo {
                is_user_base: true,
                extends_user_base: false,
            }),
            ClassDescriptor::new("customer").prototype(PrototypeInfo {
                is_user_base: false,
                extends_user_base: true,
            }),
            ClassDescriptor::new("product"),
        ];

        let (catalog, _) = ModelCatalogBuilder::new()
            .build(classes, &mut diagnostics)
            .expect("build");

        assert!(catalog["Account"].is_user_model);
        assert!(catalog["Customer"].is_user_model);
        assert!(!catalog["Product"].is_user_model);
    }

    #[test]
    fn methods_keep_declaration_order() {
        let mut diagnostics = Diagnostics::new();
        let classes = vec![ClassDescriptor::new("product")
            .method(MethodDescriptor::new("create").static_method())
            .method(MethodDescriptor::new("prototype.updateAttributes"))];

        let (catalog, _) = ModelCatalogBuilder::new()
            .build(classes, &mut diagnostics)
            .expect("build");

        let names: Vec<&str> = catalog["Product"]
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["create", "prototype.updateAttributes"]);
    }
}
