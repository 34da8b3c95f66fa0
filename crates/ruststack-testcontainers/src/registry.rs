//! Typed table of client builder factories.
//!
//! A [`ClientRegistry`] maps a client type `C` to a factory producing a boxed
//! builder `B`. `B` is usually a trait object describing one SDK's builder
//! shape (see [`crate::sdk`]), which lets the container construct any
//! registered client without depending on every client type at compile time.
//!
//! # Examples
//!
//! ```
//! use ruststack_testcontainers::ClientRegistry;
//!
//! trait Greeter: Send {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_owned()
//!     }
//! }
//!
//! struct Client;
//!
//! let mut registry = ClientRegistry::<dyn Greeter>::new();
//! registry.register::<Client, _>(|| Box::new(English));
//!
//! let builder = registry.builder::<Client>().unwrap();
//! assert_eq!(builder.greet(), "hello");
//! ```

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{LocalStackError, LocalStackResult};

type BuilderFactory<B> = Arc<dyn Fn() -> Box<B> + Send + Sync>;

struct Registration<B: ?Sized> {
    client: &'static str,
    factory: BuilderFactory<B>,
}

impl<B: ?Sized> Clone for Registration<B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            factory: Arc::clone(&self.factory),
        }
    }
}

/// Builder factories keyed by client type.
pub struct ClientRegistry<B: ?Sized> {
    entries: HashMap<TypeId, Registration<B>>,
}

impl<B: ?Sized> ClientRegistry<B> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register the builder factory for client type `C`.
    ///
    /// Replaces any factory previously registered for `C`.
    pub fn register<C, F>(&mut self, factory: F)
    where
        C: 'static,
        F: Fn() -> Box<B> + Send + Sync + 'static,
    {
        self.entries.insert(
            TypeId::of::<C>(),
            Registration {
                client: type_name::<C>(),
                factory: Arc::new(factory),
            },
        );
    }

    /// Builder-style variant of [`register`](Self::register).
    #[must_use]
    pub fn with<C, F>(mut self, factory: F) -> Self
    where
        C: 'static,
        F: Fn() -> Box<B> + Send + Sync + 'static,
    {
        self.register::<C, F>(factory);
        self
    }

    /// Whether a factory is registered for `C`.
    #[must_use]
    pub fn contains<C: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<C>())
    }

    /// Produce a fresh builder for client type `C`.
    ///
    /// # Errors
    /// Returns [`LocalStackError::UnsupportedBuilder`] if nothing is registered for `C`.
    pub fn builder<C: 'static>(&self) -> LocalStackResult<Box<B>> {
        self.entries
            .get(&TypeId::of::<C>())
            .map(|entry| (entry.factory)())
            .ok_or(LocalStackError::UnsupportedBuilder {
                client: type_name::<C>(),
            })
    }

    /// Type names of the registered clients, sorted.
    #[must_use]
    pub fn client_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|e| e.client).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered client types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B: ?Sized> Default for ClientRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized> Clone for ClientRegistry<B> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<B: ?Sized> fmt::Debug for ClientRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("clients", &self.client_names())
            .finish()
    }
}
