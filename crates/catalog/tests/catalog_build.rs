use anyhow::Result;
use pretty_assertions::assert_eq;
use sdkgen_catalog::{build_catalog, Diagnostic, ScopeSlot};
use sdkgen_descriptor::ClassDescriptor;

/// A provider snapshot the way it arrives on disk: camelCase JSON with
/// optional fields omitted.
const SNAPSHOT: &str = r#"[
    {
        "name": "customer",
        "description": "People who buy things",
        "hasCtor": true,
        "prototype": { "extendsUserBase": true },
        "sdk": { "blacklist": { "updateAll": true } },
        "properties": {
            "email": { "type": "string", "required": true }
        },
        "relations": {
            "orders": { "targetClass": "order" }
        },
        "methods": [
            { "name": "create", "isStatic": true },
            {
                "name": "prototype.__get__orders",
                "accepts": [ { "arg": "filter", "httpSource": "query" } ],
                "ctorAccepts": [ { "arg": "id", "httpSource": "path" } ],
                "deprecated": true
            }
        ]
    },
    {
        "name": "order",
        "hasCtor": true,
        "methods": [
            {
                "name": "prototype.__get__lineItems",
                "ctorAccepts": [ { "arg": "id", "httpSource": "path" } ],
                "deprecated": true
            }
        ],
        "relations": {
            "lineItems": {}
        }
    },
    {
        "name": "stats",
        "hasCtor": false
    }
]"#;

#[test]
fn snapshot_runs_through_all_three_stages() -> Result<()> {
    let classes: Vec<ClassDescriptor> = serde_json::from_str(SNAPSHOT)?;
    let (catalog, diagnostics) = build_catalog(classes)?;

    // `stats` has no shared constructor, `lineItems` has no target class.
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        diagnostics.entries(),
        &[
            Diagnostic::SkippedNonModel {
                class_name: "Stats".to_string(),
            },
            Diagnostic::ScopeMissingTarget {
                model: "Order".to_string(),
                scope: "lineItems".to_string(),
            },
        ]
    );

    let customer = &catalog["Customer"];
    assert_eq!(customer.name, "customer");
    assert!(customer.is_user_model);
    assert_eq!(customer.description.as_deref(), Some("People who buy things"));
    assert!(customer.sdk_enabled());
    assert!(customer.sdk_config.is_blacklisted("updateAll"));
    assert!(customer.properties.contains_key("email"));

    // Fixup merged the ctor argument ahead of the declared one.
    let scope_method = &customer.methods[1];
    let args: Vec<&str> = scope_method.accepts.iter().map(|a| a.arg.as_str()).collect();
    assert_eq!(args, ["id", "filter"]);
    assert!(!scope_method.has_resource_params);

    // The orders scope resolved and Order gained the reverse accessor.
    let ScopeSlot::Resolved(scope) = &customer.scopes["orders"] else {
        panic!("orders scope should resolve");
    };
    assert_eq!(scope.target_model_name, "Order");

    let order = &catalog["Order"];
    assert_eq!(order.scopes.get("lineItems"), Some(&ScopeSlot::Failed));
    let names: Vec<&str> = order.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["prototype.__get__lineItems", "::get::customer::orders"]);
    Ok(())
}

#[test]
fn deprecation_is_reset_on_synthesized_clones() -> Result<()> {
    let classes: Vec<ClassDescriptor> = serde_json::from_str(SNAPSHOT)?;
    let (catalog, _) = build_catalog(classes)?;

    // The encoded original on Customer is deprecated...
    assert!(catalog["Customer"].methods[1].deprecated);

    // ...but clones always reset the flag, whatever they inherited.
    let reverse = &catalog["Order"].methods[1];
    assert!(!reverse.deprecated);
    let ScopeSlot::Resolved(scope) = &catalog["Customer"].scopes["orders"] else {
        panic!("orders scope should resolve");
    };
    assert!(!scope.methods["orders"].deprecated);
    Ok(())
}

#[test]
fn empty_class_name_aborts_the_run() {
    let err = build_catalog(vec![ClassDescriptor::new("")]).expect_err("empty name");
    assert_eq!(
        err.to_string(),
        "Class name is empty: cannot derive a display name"
    );
}
