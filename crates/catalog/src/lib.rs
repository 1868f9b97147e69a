//! # SDK Catalog
//!
//! Normalizes a remoting introspection snapshot into a client-SDK-ready
//! metadata graph.
//!
//! ## Pipeline
//!
//! ```text
//! ClassDescriptor[]
//!     │
//!     ├──> Catalog Builder
//!     │      ├─ Capitalize names, overlay SDK defaults
//!     │      ├─ Skip non-model classes (no shared ctor)
//!     │      └─ Populate the case-insensitive registry
//!     │
//!     ├──> Prototype Argument Fixup
//!     │      ├─ Prepend ctor arguments to instance methods
//!     │      └─ Extract non-id path args as resource params
//!     │
//!     └──> Scope Graph Builder
//!            ├─ Decode `prototype.__op__scope` method names
//!            ├─ Resolve relation targets via the registry
//!            └─ Synthesize reverse accessors on target models
//! ```
//!
//! The three stages run in strict sequence over an in-memory snapshot;
//! nothing here performs I/O. Unresolvable scopes and non-model classes
//! degrade to [`Diagnostics`] entries, never errors.
//!
//! ## Example
//!
//! ```
//! use sdkgen_catalog::build_catalog;
//! use sdkgen_descriptor::ClassDescriptor;
//!
//! let (catalog, diagnostics) = build_catalog(vec![
//!     ClassDescriptor::new("product"),
//!     ClassDescriptor::new("category"),
//! ])?;
//!
//! assert!(catalog.contains_key("Product"));
//! assert!(diagnostics.is_empty());
//! # Ok::<(), sdkgen_catalog::CatalogError>(())
//! ```

mod builder;
mod diagnostics;
mod error;
mod fixup;
mod registry;
mod scopes;
mod types;

pub use builder::{capitalize, ModelCatalogBuilder};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{CatalogError, Result};
pub use fixup::fix_prototype_arguments;
pub use registry::ModelRegistry;
pub use scopes::{decode_scope_method, scope_api_name, ScopeGraphBuilder};
pub use types::{Method, Model, ModelCatalog, Scope, ScopeSlot, SdkConfig};

use sdkgen_descriptor::ClassDescriptor;

/// Run the full normalization over one snapshot.
///
/// Fatal conditions (empty class name, duplicate model name) abort the
/// run; everything else degrades to a diagnostic. The returned catalog is
/// what the renderer consumes.
pub fn build_catalog(
    classes: Vec<ClassDescriptor>,
) -> Result<(ModelCatalog, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();

    let (mut catalog, registry) =
        ModelCatalogBuilder::new().build(classes, &mut diagnostics)?;
    fix_prototype_arguments(&mut catalog);
    ScopeGraphBuilder::new(&registry).build(&mut catalog, &mut diagnostics);

    log::info!(
        "Built model catalog: {} models, {} warnings",
        catalog.len(),
        diagnostics.len()
    );

    Ok((catalog, diagnostics))
}
