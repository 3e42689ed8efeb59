//! The middleware contract.
//!
//! A [`Middleware`] is a factory that wraps a connector in one more onion
//! layer; [`CallHooks`] is the per-call interception surface that generated
//! delegation impls route through.

use std::sync::Arc;

use async_trait::async_trait;

use scout_types::{Capability, ScoutError};

use crate::connector::EngineConnector;

/// Per-call context handed to [`CallHooks`].
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    /// The capability being invoked.
    pub capability: Capability,
}

impl CallContext {
    /// Context for a call to the given capability.
    #[must_use]
    pub const fn new(capability: Capability) -> Self {
        Self { capability }
    }
}

/// Interception points used by delegated provider impls.
///
/// `pre_call` runs before the inner connector is invoked and can veto the
/// call; `map_error` sees every error on the way out.
#[async_trait]
pub trait CallHooks: Send + Sync {
    /// Runs before the inner call. Returning `Err` short-circuits the call.
    async fn pre_call(&self, _ctx: &CallContext) -> Result<(), ScoutError> {
        Ok(())
    }

    /// Transforms (or observes) an error produced by the inner call.
    fn map_error(&self, _ctx: &CallContext, err: ScoutError) -> ScoutError {
        err
    }
}

/// A composable connector wrapper.
///
/// Implementations consume themselves to wrap an inner connector and expose
/// their identity and configuration for stack introspection.
pub trait Middleware: Send + Sync {
    /// Wrap `inner` in this layer.
    fn apply(self: Box<Self>, inner: Arc<dyn EngineConnector>) -> Arc<dyn EngineConnector>;

    /// Stable layer type name (matches the wrapper struct name).
    fn name(&self) -> &'static str;

    /// Layer configuration as JSON, for stack serialization.
    fn config_json(&self) -> serde_json::Value;
}
