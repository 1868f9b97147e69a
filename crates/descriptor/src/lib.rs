//! # SDK Descriptor
//!
//! Owned value types for a remoting introspection snapshot.
//!
//! An introspection provider reflects over a running backend and dumps one
//! [`ClassDescriptor`] per exposed class. The snapshot is plain data: the
//! provider has already performed every check that requires live objects
//! (notably the user-capability prototype tests, see [`PrototypeInfo`]), so
//! downstream consumers never touch the service again.
//!
//! Field names follow the provider's JSON (`camelCase`), which makes a
//! snapshot file deserializable with `serde_json` as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an argument travels in the HTTP request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpSource {
    /// Bound into the URL path template (e.g. `:fk`)
    Path,
    /// Query string
    Query,
    /// Request body
    Body,
    /// Anything else (header, form, whole-request, ...)
    #[default]
    Other,
}

// Hand-written so unrecognized sources (header, form, ...) collapse to
// `Other` instead of failing the whole snapshot.
impl<'de> Deserialize<'de> for HttpSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Ok(match source.as_str() {
            "path" => Self::Path,
            "query" => Self::Query,
            "body" => Self::Body,
            _ => Self::Other,
        })
    }
}

/// One argument accepted by a remote method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDescriptor {
    /// Argument name as declared in the remoting metadata
    pub arg: String,

    /// HTTP mapping for this argument
    #[serde(default)]
    pub http_source: HttpSource,
}

impl ArgumentDescriptor {
    pub fn new(arg: impl Into<String>, http_source: HttpSource) -> Self {
        Self {
            arg: arg.into(),
            http_source,
        }
    }
}

/// One remotely invokable method, static or instance-bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    /// Remoting name (e.g. `create`, `prototype.__get__categories`)
    pub name: String,

    /// True for class-level methods, false for prototype methods
    #[serde(default)]
    pub is_static: bool,

    /// Arguments declared on the method itself, in declaration order
    #[serde(default)]
    pub accepts: Vec<ArgumentDescriptor>,

    /// Arguments accepted by the owning shared constructor.
    /// Present only for instance methods bound to a constructor; the
    /// provider resolves the reference and inlines the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctor_accepts: Option<Vec<ArgumentDescriptor>>,

    /// Deprecation flag carried over from the remoting metadata
    #[serde(default)]
    pub deprecated: bool,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            accepts: Vec::new(),
            ctor_accepts: None,
            deprecated: false,
        }
    }

    /// Builder: mark as a static (class-level) method
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Builder: add a declared argument
    #[must_use]
    pub fn accept(mut self, arg: ArgumentDescriptor) -> Self {
        self.accepts.push(arg);
        self
    }

    /// Builder: attach the owning constructor's accepted arguments
    #[must_use]
    pub fn ctor_accepts(mut self, args: Vec<ArgumentDescriptor>) -> Self {
        self.ctor_accepts = Some(args);
        self
    }

    /// Builder: set the deprecation flag
    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

/// Relation metadata attached to a class, keyed by scope name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDescriptor {
    /// Name of the class the relation targets. Absent when the backend's
    /// datasource layer did not record one (old juggler versions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_class: Option<String>,
}

impl RelationDescriptor {
    pub fn targeting(target_class: impl Into<String>) -> Self {
        Self {
            target_class: Some(target_class.into()),
        }
    }
}

/// SDK generation settings a backend class may carry.
///
/// Every field is optional; defaults are overlaid by the catalog builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkSettings {
    /// Generate client code for this model (default true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Method names the generated SDK must leave out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<BTreeMap<String, bool>>,
}

/// Prototype-chain facts the provider computed against the platform's
/// designated user capability.
///
/// The two flags are deliberately kept separate: "is exactly the user
/// base prototype" and "inherits from it" are reported independently by
/// the reflection layer and are both consulted for user-model detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrototypeInfo {
    /// The class prototype is identical to the user base prototype
    #[serde(default)]
    pub is_user_base: bool,

    /// The class prototype descends from the user base prototype
    #[serde(default)]
    pub extends_user_base: bool,
}

/// One exposed backend class, as reflected by the introspection provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    /// Raw class name as registered on the backend
    pub name: String,

    /// Human description from the class settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// SDK settings from the class settings, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<SdkSettings>,

    /// Property definitions, passed through untouched
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,

    /// Prototype-chain facts for user-model detection
    #[serde(default)]
    pub prototype: PrototypeInfo,

    /// Whether the class has a shared constructor. Classes without one
    /// are exposed on the same handler but are not models.
    #[serde(default)]
    pub has_ctor: bool,

    /// Relation metadata keyed by scope name
    #[serde(default)]
    pub relations: BTreeMap<String, RelationDescriptor>,

    /// Remote methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Create a minimal model-class descriptor (shared constructor present).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sdk: None,
            properties: BTreeMap::new(),
            prototype: PrototypeInfo::default(),
            has_ctor: true,
            relations: BTreeMap::new(),
            methods: Vec::new(),
        }
    }

    /// Builder: set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set SDK settings
    #[must_use]
    pub fn sdk(mut self, sdk: SdkSettings) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Builder: mark the class as having no shared constructor
    #[must_use]
    pub fn without_ctor(mut self) -> Self {
        self.has_ctor = false;
        self
    }

    /// Builder: set prototype facts
    #[must_use]
    pub fn prototype(mut self, prototype: PrototypeInfo) -> Self {
        self.prototype = prototype;
        self
    }

    /// Builder: add a property definition
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, definition: serde_json::Value) -> Self {
        self.properties.insert(name.into(), definition);
        self
    }

    /// Builder: attach relation metadata for a scope
    #[must_use]
    pub fn relation(mut self, scope: impl Into<String>, relation: RelationDescriptor) -> Self {
        self.relations.insert(scope.into(), relation);
        self
    }

    /// Builder: add a method
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}
