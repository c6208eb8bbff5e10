//! Provider Contract and Registry
//!
//! A provider is a named source of algorithm instances, typically one
//! cryptographic backend. Providers are held in an explicit
//! [`ProviderRegistry`] owned by the caller; there is no global registry.

use crate::algorithm::Algorithm;
use crate::error::{BenchError, Result};

/// A named source of algorithm instances
pub trait Provider {
    /// Unique provider name
    fn name(&self) -> &str;

    /// Provider (backend) version string
    fn version(&self) -> &str;

    /// Names of every algorithm this provider can create
    fn list_algorithms(&self) -> Vec<String>;

    /// Create an algorithm instance by name.
    ///
    /// Returns [`BenchError::AlgorithmNotFound`] for names the provider does
    /// not offer.
    fn create(&self, name: &str) -> Result<Algorithm>;

    /// Release an algorithm instance created by this provider
    fn destroy(&self, algorithm: Algorithm) {
        drop(algorithm);
    }

    /// Whether `name` can be created by this provider
    fn supports(&self, name: &str) -> bool {
        match self.create(name) {
            Ok(alg) => {
                self.destroy(alg);
                true
            }
            Err(_) => false,
        }
    }
}

/// Ordered collection of providers, unique by name
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    ///
    /// Registering a name that is already present is a no-op and returns
    /// `false`; the first registration wins.
    pub fn register(&mut self, provider: Box<dyn Provider>) -> Result<bool> {
        if provider.name().is_empty() {
            return Err(BenchError::NullInput("provider name"));
        }
        if self.find(provider.name()).is_some() {
            tracing::debug!(provider = provider.name(), "provider already registered");
            return Ok(false);
        }
        tracing::debug!(
            provider = provider.name(),
            version = provider.version(),
            "registered provider"
        );
        self.providers.push(provider);
        Ok(true)
    }

    /// Remove a provider by name and return it
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn Provider>> {
        let idx = self
            .providers
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| BenchError::ProviderNotFound(name.to_string()))?;
        Ok(self.providers.remove(idx))
    }

    /// Look up a provider by name
    pub fn find(&self, name: &str) -> Option<&dyn Provider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Names of all registered providers in registration order
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Registered providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Create `algorithm` from the named provider, or from the first
    /// registered provider that supports it when `provider` is `None`.
    pub fn create(&self, provider: Option<&str>, algorithm: &str) -> Result<Algorithm> {
        match provider {
            Some(name) => {
                let provider = self
                    .find(name)
                    .ok_or_else(|| BenchError::ProviderNotFound(name.to_string()))?;
                provider.create(algorithm)
            }
            None => self
                .iter()
                .find(|p| p.list_algorithms().iter().any(|a| a == algorithm))
                .ok_or_else(|| BenchError::AlgorithmNotFound(algorithm.to_string()))?
                .create(algorithm),
        }
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
