/// Command registration types.
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use slashgate_core::{Params, ResponseEnvelope};

use crate::dispatch::CommandHandler;

// ---------------------------------------------------------------------------
// Spec (registration input)
// ---------------------------------------------------------------------------

/// Everything needed to register one command.
///
/// ```ignore
/// dispatcher.register(
///     "deploy",
///     CommandSpec::new(DeployHandler).token("s3cr3t").methods(["POST"]).param("env", "prod"),
/// );
/// ```
pub struct CommandSpec {
    handler: Arc<dyn CommandHandler>,
    token: Option<String>,
    methods: BTreeSet<String>,
    params: Params,
}

impl CommandSpec {
    pub fn new(handler: impl CommandHandler + 'static) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    /// Register a closure as the handler.
    pub fn from_fn<F>(handler: F) -> Self
    where
        F: Fn(&Params) -> anyhow::Result<ResponseEnvelope> + Send + Sync + 'static,
    {
        Self::new(handler)
    }

    pub fn from_arc(handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            handler,
            token: None,
            methods: BTreeSet::from(["GET".to_string()]),
            params: Params::new(),
        }
    }

    /// Shared secret callers must present as `token`.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn maybe_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Replace the allowed HTTP methods (default: `GET` only).
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Add one extra named value passed to every invocation.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.params.insert(k, v);
        }
        self
    }

    pub(crate) fn into_registration(self) -> Registration {
        Registration {
            handler: self.handler,
            token: self.token,
            methods: self.methods,
            params: self.params,
        }
    }
}

// ---------------------------------------------------------------------------
// Registration (stored record)
// ---------------------------------------------------------------------------

/// A registered command. Immutable once stored.
#[derive(Clone)]
pub struct Registration {
    pub handler: Arc<dyn CommandHandler>,
    pub token: Option<String>,
    pub methods: BTreeSet<String>,
    pub params: Params,
}

impl Registration {
    /// The secret to check, if any. An empty secret means none is required.
    pub fn required_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn allows(&self, method: &str) -> bool {
        self.methods.contains(method)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("methods", &self.methods)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
