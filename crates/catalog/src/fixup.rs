use crate::types::ModelCatalog;
use sdkgen_descriptor::HttpSource;

/// Stage 2: merge constructor path arguments into instance methods.
///
/// URL templates of prototype methods include the shared constructor's
/// parameters (e.g. `:id`), but client resource actions are flat
/// functions, so those parameters must appear in the method's own
/// argument list, ahead of the declared ones. Any path-carried argument
/// other than the primary `id` additionally becomes a resource parameter
/// the caller has to supply explicitly.
///
/// Static methods and methods without an owning constructor are left
/// untouched. This pass never fails.
pub fn fix_prototype_arguments(catalog: &mut ModelCatalog) {
    for model in catalog.values_mut() {
        for method in &mut model.methods {
            if method.is_static || method.ctor_accepts.is_none() {
                continue;
            }

            let mut merged = method.ctor_accepts.clone().unwrap_or_default();
            merged.extend(method.accepts.drain(..));
            method.accepts = merged;

            for arg in &method.accepts {
                if arg.http_source == HttpSource::Path && arg.arg != "id" {
                    method.resource_params.push(arg.clone());
                }
            }
            method.has_resource_params = !method.resource_params.is_empty();
        }
    }
}
