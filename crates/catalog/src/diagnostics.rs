use serde::{Deserialize, Serialize};
use std::fmt;

/// One warning raised while normalizing a snapshot.
///
/// None of these abort the run; the affected class or scope is skipped
/// and the rest of the catalog is built as usual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Class has no shared constructor and was left out of the catalog
    SkippedNonModel { class_name: String },

    /// Relation behind a scope does not record a target class
    ScopeMissingTarget { model: String, scope: String },

    /// Relation names a target class that is not exposed through the catalog
    ScopeTargetNotExposed {
        model: String,
        scope: String,
        target_class: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedNonModel { class_name } => {
                write!(f, "skipping {class_name:?}: class has no shared constructor and is not a model")
            }
            Self::ScopeMissingTarget { model, scope } => {
                write!(
                    f,
                    "scope {model}.{scope} is missing a target class; \
                     accessors for this scope will not be generated"
                )
            }
            Self::ScopeTargetNotExposed { model, scope, target_class } => {
                write!(
                    f,
                    "scope {model}.{scope} targets class {target_class:?}, which is not \
                     exposed via remoting; accessors for this scope will not be generated"
                )
            }
        }
    }
}

/// Collector threaded through the build stages.
///
/// Each entry is also mirrored to the `log` facade so embedding binaries
/// get warnings for free; the structured entries are what callers should
/// surface to users.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
