use sdkgen_descriptor::{ArgumentDescriptor, MethodDescriptor, RelationDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Effective SDK generation settings for one model.
///
/// Raw class settings are overlaid on the defaults: keys present in the
/// snapshot win, missing keys fall back to `enabled: true` and an empty
/// blacklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Generate client code for this model
    pub enabled: bool,

    /// Method names the renderer must leave out
    pub blacklist: BTreeMap<String, bool>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blacklist: BTreeMap::new(),
        }
    }
}

impl SdkConfig {
    /// Overlay raw settings on the defaults.
    pub fn overlay(raw: Option<&sdkgen_descriptor::SdkSettings>) -> Self {
        let defaults = Self::default();
        match raw {
            Some(settings) => Self {
                enabled: settings.enabled.unwrap_or(defaults.enabled),
                blacklist: settings.blacklist.clone().unwrap_or(defaults.blacklist),
            },
            None => defaults,
        }
    }

    /// Whether the renderer must leave this method out.
    pub fn is_blacklisted(&self, method_name: &str) -> bool {
        self.blacklist.get(method_name).copied().unwrap_or(false)
    }
}

/// One remotely invokable operation on a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Remoting name; synthesized reverse accessors use the
    /// `::op::model::scope` shape, which never collides with raw names
    pub name: String,

    /// Class-level method (never merged with constructor arguments)
    pub is_static: bool,

    /// Effective argument list. For instance methods this is the owning
    /// constructor's arguments followed by the declared ones.
    pub accepts: Vec<ArgumentDescriptor>,

    /// Path-carried arguments (other than `id`) a caller must supply
    pub resource_params: Vec<ArgumentDescriptor>,

    /// True iff `resource_params` is non-empty
    pub has_resource_params: bool,

    /// Note pointing users at the canonical scope accessor, set when the
    /// method turns out to encode a scope operation
    pub internal_note: Option<String>,

    /// Deprecation flag from the remoting metadata
    pub deprecated: bool,

    /// Owning constructor's accepted arguments (instance methods only)
    pub ctor_accepts: Option<Vec<ArgumentDescriptor>>,
}

impl Method {
    /// Take ownership of a raw method descriptor.
    pub fn from_descriptor(raw: MethodDescriptor) -> Self {
        Self {
            name: raw.name,
            is_static: raw.is_static,
            accepts: raw.accepts,
            resource_params: Vec::new(),
            has_resource_params: false,
            internal_note: None,
            deprecated: raw.deprecated,
            ctor_accepts: raw.ctor_accepts,
        }
    }
}

/// A derived, relation-based set of operations between two models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Scope name as decoded from the method naming convention
    pub scope_name: String,

    /// Capitalized display name of the model the scope operates against
    pub target_model_name: String,

    /// Canonical accessor methods, keyed by api name
    /// (e.g. `categories`, `categories.destroyAll`)
    pub methods: BTreeMap<String, Method>,
}

impl Scope {
    pub fn new(scope_name: impl Into<String>, target_model_name: impl Into<String>) -> Self {
        Self {
            scope_name: scope_name.into(),
            target_model_name: target_model_name.into(),
            methods: BTreeMap::new(),
        }
    }
}

/// Resolution state of one scope on a model.
///
/// Absence of a map entry is the third state: the scope has not been
/// visited yet. `Failed` is permanent; once a scope fails to resolve it
/// is never retried and only the first failure is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScopeSlot {
    /// Target class missing or not exposed; warning already reported
    Failed,

    /// Scope resolved; shared by every operation on the same scope
    Resolved(Scope),
}

/// A normalized description of one remotely-callable domain type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Raw class name as registered on the backend
    pub name: String,

    /// Capitalized name; client SDK classes start with a capital letter
    pub display_name: String,

    /// Human description from the class settings
    pub description: Option<String>,

    /// Effective SDK settings after the defaults overlay
    pub sdk_config: SdkConfig,

    /// Property definitions, passed through for the renderer
    pub properties: BTreeMap<String, serde_json::Value>,

    /// The model is, or descends from, the platform's user capability
    pub is_user_model: bool,

    /// Remote methods. Append-only during graph construction: reverse
    /// accessors synthesized for scopes on other models land here.
    pub methods: Vec<Method>,

    /// Scope resolution results, keyed by scope name
    pub scopes: BTreeMap<String, ScopeSlot>,

    /// Relation metadata keyed by scope name. The scope pass rewrites
    /// `target_class` to the resolved display name so the renderer need
    /// not re-resolve it.
    pub relations: BTreeMap<String, RelationDescriptor>,
}

impl Model {
    /// Whether the renderer should emit client code for this model.
    pub fn sdk_enabled(&self) -> bool {
        self.sdk_config.enabled
    }
}

/// Final mapping from capitalized model name to model, handed to the
/// renderer. `BTreeMap` keeps iteration (and with it diagnostic and
/// reverse-method append order) deterministic.
pub type ModelCatalog = BTreeMap<String, Model>;
