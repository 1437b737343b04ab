/// Configuration for a [`crate::builder::Builder`]: which built-in types
/// it starts with and how strictly it treats re-registration.
///
/// Mirrors the fluent, consuming `with_*` builder-options pattern used
/// throughout this crate family: a `#[derive(Clone)]` struct with a
/// `Default` impl, consumed by a terminal constructor
/// ([`crate::builder::Builder::with_options`]).
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    register_builtin_qualifier_types: bool,
    register_builtin_resource_types: bool,
    strict_resource_type_registration: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            register_builtin_qualifier_types: true,
            register_builtin_resource_types: true,
            strict_resource_type_registration: false,
        }
    }
}

impl ManagerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an empty qualifier-type registry instead of the built-in
    /// `literal`/`language`/`territory` trio.
    #[must_use]
    pub fn without_builtin_qualifier_types(mut self) -> Self {
        self.register_builtin_qualifier_types = false;
        self
    }

    /// Start without the built-in `json` resource type.
    #[must_use]
    pub fn without_builtin_resource_types(mut self) -> Self {
        self.register_builtin_resource_types = false;
        self
    }

    /// Re-registering a resource type name with a different implementation
    /// is a [`crate::error::Error::Conflict`] instead of silently keeping
    /// the first registration.
    #[must_use]
    pub fn strict_resource_type_registration(mut self) -> Self {
        self.strict_resource_type_registration = true;
        self
    }

    #[must_use]
    pub(crate) fn registers_builtin_qualifier_types(&self) -> bool {
        self.register_builtin_qualifier_types
    }

    #[must_use]
    pub(crate) fn registers_builtin_resource_types(&self) -> bool {
        self.register_builtin_resource_types
    }

    #[must_use]
    pub(crate) fn is_strict_resource_type_registration(&self) -> bool {
        self.strict_resource_type_registration
    }
}

/// Configuration for a [`crate::resolver::Resolver`]: how tree resolution
/// treats individual leaf failures.
#[derive(Clone, Default)]
pub struct ResolverOptions {
    tolerate_leaf_failures: bool,
    on_leaf_failure: Option<std::sync::Arc<dyn Fn(&resref::ResourceId, &crate::error::Error) + Send + Sync>>,
}

impl ResolverOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerate individual leaf resolution failures during
    /// [`crate::resolver::Resolver::resolve_tree`], omitting the failed leaf
    /// from the composed result rather than failing the whole walk.
    /// `on_failure` is invoked once per tolerated failure, taking the place
    /// of the logging this crate deliberately does not perform itself.
    #[must_use]
    pub fn tolerate_leaf_failures(
        mut self,
        on_failure: impl Fn(&resref::ResourceId, &crate::error::Error) + Send + Sync + 'static,
    ) -> Self {
        self.tolerate_leaf_failures = true;
        self.on_leaf_failure = Some(std::sync::Arc::new(on_failure));
        self
    }

    #[must_use]
    pub(crate) fn tolerates_leaf_failures(&self) -> bool {
        self.tolerate_leaf_failures
    }

    pub(crate) fn notify_leaf_failure(&self, id: &resref::ResourceId, error: &crate::error::Error) {
        if let Some(callback) = &self.on_leaf_failure {
            callback(id, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registers_builtins_non_strict() {
        let options = ManagerOptions::new();
        assert!(options.registers_builtin_qualifier_types());
        assert!(options.registers_builtin_resource_types());
        assert!(!options.is_strict_resource_type_registration());
    }

    #[test]
    fn without_builtins_opts_out() {
        let options = ManagerOptions::new().without_builtin_qualifier_types().without_builtin_resource_types();
        assert!(!options.registers_builtin_qualifier_types());
        assert!(!options.registers_builtin_resource_types());
    }
}
