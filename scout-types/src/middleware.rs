use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One layer in a serialized middleware stack description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareLayer {
    /// Layer type name (e.g. `"CachingConnector"`).
    pub name: String,
    /// Layer configuration as free-form JSON.
    pub config: Value,
}

impl MiddlewareLayer {
    /// Create a layer descriptor.
    pub fn new(name: impl Into<String>, config: Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Serializable description of a connector's middleware onion.
///
/// `layers[0]` is the outermost layer (the first to see a request); the last
/// entry is the innermost. Used for introspection and for reconstructing a
/// builder from stored configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareStack {
    /// Layers, outermost first.
    pub layers: Vec<MiddlewareLayer>,
}

impl MiddlewareStack {
    /// Empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer at the innermost position.
    pub fn push_inner(&mut self, layer: MiddlewareLayer) {
        self.layers.push(layer);
    }

    /// The outermost layer, if any.
    #[must_use]
    pub fn outermost(&self) -> Option<&MiddlewareLayer> {
        self.layers.first()
    }

    /// Position of the first layer with the given name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }
}
