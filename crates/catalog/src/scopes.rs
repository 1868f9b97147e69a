use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::registry::ModelRegistry;
use crate::types::{ModelCatalog, Scope, ScopeSlot};
use once_cell::sync::Lazy;
use regex::Regex;

// Scope operations are encoded by the backend's datasource layer as
// method names like `prototype.__get__categories`. The operation part
// never contains an underscore.
static SCOPE_METHOD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^prototype\.__([^_]+)__(.+)$").expect("pattern is valid"));

/// Split a method name of the shape `prototype.__<op>__<scope>`.
///
/// Returns `None` for every other name, including the `::op::model::scope`
/// names this module synthesizes itself.
pub fn decode_scope_method(name: &str) -> Option<(&str, &str)> {
    let caps = SCOPE_METHOD_PATTERN.captures(name)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Map a scope operation to the api name exposed on the owning model.
pub fn scope_api_name(op: &str, scope_name: &str) -> String {
    match op {
        "get" => scope_name.to_string(),
        "delete" => format!("{scope_name}.destroyAll"),
        _ => format!("{scope_name}.{op}"),
    }
}

/// Stage 3: reverse-engineer scope relationships from method names.
///
/// For every encoded scope operation the builder resolves the relation's
/// target model through the registry, records a [`Scope`] on the owning
/// model, and appends a reverse accessor to the target model so the
/// relationship is navigable from either side. Resolution failures are
/// permanent: the scope gets a [`ScopeSlot::Failed`] marker, one warning,
/// and later operations on it are skipped silently.
pub struct ScopeGraphBuilder<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> ScopeGraphBuilder<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Build the scope graph across the whole catalog.
    ///
    /// Method lists are snapshotted up front: reverse accessors appended
    /// to target models during this pass must not be re-examined. A
    /// re-run over the output is a no-op: synthesized names never decode,
    /// and encoded originals whose operation is already recorded on the
    /// resolved scope are skipped.
    pub fn build(&self, catalog: &mut ModelCatalog, diagnostics: &mut Diagnostics) {
        let snapshots: Vec<(String, Vec<String>)> = catalog
            .iter()
            .map(|(key, model)| {
                let names = model.methods.iter().map(|m| m.name.clone()).collect();
                (key.clone(), names)
            })
            .collect();

        for (model_key, method_names) in snapshots {
            for (index, name) in method_names.iter().enumerate() {
                self.build_scope_method(catalog, diagnostics, &model_key, index, name);
            }
        }
    }

    fn build_scope_method(
        &self,
        catalog: &mut ModelCatalog,
        diagnostics: &mut Diagnostics,
        model_key: &str,
        method_index: usize,
        method_name: &str,
    ) {
        let Some((op, scope_name)) = decode_scope_method(method_name) else {
            return;
        };
        let op = op.to_string();
        let scope_name = scope_name.to_string();

        let Some(target_key) = self.resolve_scope(catalog, diagnostics, model_key, &scope_name)
        else {
            return;
        };

        let Some(model) = catalog.get_mut(model_key) else {
            return;
        };
        let api_name = scope_api_name(&op, &scope_name);

        // The scope already records this operation: an earlier run over
        // the same catalog processed the method, and its reverse accessor
        // is already on the target model.
        if let Some(ScopeSlot::Resolved(scope)) = model.scopes.get(&scope_name) {
            if scope.methods.contains_key(&api_name) {
                return;
            }
        }

        let note = format!("Use {}.{}() instead.", model.display_name, api_name);
        let reverse_name = format!("::{}::{}::{}", op, model.name, scope_name);
        debug_assert!(decode_scope_method(&reverse_name).is_none());

        let Some(method) = model.methods.get_mut(method_index) else {
            return;
        };
        method.internal_note = Some(note);

        // Two presentations of the same remote operation: the clone that
        // lands on the target model keeps the note pointing users back at
        // the canonical accessor, the clone stored inside the scope is
        // the canonical accessor and carries no note.
        let mut reverse_method = method.clone();
        reverse_method.name = reverse_name;
        reverse_method.deprecated = false;

        let mut scope_method = reverse_method.clone();
        scope_method.internal_note = None;

        if let Some(ScopeSlot::Resolved(scope)) = model.scopes.get_mut(&scope_name) {
            scope.methods.insert(api_name, scope_method);
        }

        // Record the resolved display name so the renderer need not
        // consult the registry again.
        if let Some(relation) = model.relations.get_mut(&scope_name) {
            relation.target_class = Some(target_key.clone());
        }

        // The target may be this very model (self-relation); the second
        // lookup keeps the borrow checker out of the way.
        if let Some(target) = catalog.get_mut(&target_key) {
            target.methods.push(reverse_method);
        }
    }

    /// Tri-state slot handling for one scope; returns the target catalog
    /// key when the scope is usable.
    fn resolve_scope(
        &self,
        catalog: &mut ModelCatalog,
        diagnostics: &mut Diagnostics,
        model_key: &str,
        scope_name: &str,
    ) -> Option<String> {
        let model = catalog.get_mut(model_key)?;
        match model.scopes.get(scope_name) {
            // Already failed, warning already reported
            Some(ScopeSlot::Failed) => return None,
            // Every operation on the same scope shares one entity
            Some(ScopeSlot::Resolved(scope)) => return Some(scope.target_model_name.clone()),
            None => {}
        }

        let target_class = model
            .relations
            .get(scope_name)
            .and_then(|relation| relation.target_class.clone());
        let Some(target_class) = target_class else {
            diagnostics.push(Diagnostic::ScopeMissingTarget {
                model: model.display_name.clone(),
                scope: scope_name.to_string(),
            });
            model
                .scopes
                .insert(scope_name.to_string(), ScopeSlot::Failed);
            return None;
        };

        let Some(target_key) = self.registry.resolve(&target_class) else {
            diagnostics.push(Diagnostic::ScopeTargetNotExposed {
                model: model.display_name.clone(),
                scope: scope_name.to_string(),
                target_class,
            });
            model
                .scopes
                .insert(scope_name.to_string(), ScopeSlot::Failed);
            return None;
        };
        let target_key = target_key.to_string();

        model.scopes.insert(
            scope_name.to_string(),
            ScopeSlot::Resolved(Scope::new(scope_name, target_key.clone())),
        );
        Some(target_key)
    }
}
