use graft::{Candidate, ProvideOp, Provider};

use crate::{Config, ConfigSection};

/// Adapts one typed config section into a dependency provider.
///
/// The section value is read from the [`Config`] document once at
/// construction; the single provide-operation then hands out clones of it,
/// so targets declare configuration requirements like any other dependency.
/// A section absent from the document makes the operation produce nothing,
/// which surfaces as an empty-provision error when the provider is scanned.
///
/// # Examples
///
/// ```rust
/// use graft::{Candidate, Injector, Slot};
/// use graft_base::{Config, ConfigSection, SectionProvider};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct DatabaseConfig {
///     url: String,
/// }
///
/// impl ConfigSection for DatabaseConfig {
///     fn key() -> &'static str {
///         "database"
///     }
/// }
///
/// let config = Config::new().with("database", DatabaseConfig {
///     url: "postgres://localhost".to_string(),
/// });
///
/// let candidates: Vec<Arc<dyn Candidate>> =
///     vec![Arc::new(SectionProvider::<DatabaseConfig>::from_config(&config))];
///
/// let mut injector = Injector::new();
/// injector.run(&candidates).unwrap();
/// assert_eq!(
///     injector.registry().get_ref::<DatabaseConfig>().unwrap().url,
///     "postgres://localhost"
/// );
/// ```
pub struct SectionProvider<T> {
    section: Option<T>,
}

impl<T> SectionProvider<T>
where
    T: ConfigSection,
{
    /// Reads `T`'s section out of `config`; an absent or malformed section
    /// leaves the provider empty-handed rather than failing here.
    pub fn from_config(config: &Config) -> Self {
        Self {
            section: config.get::<Option<T>>(T::key()).ok().flatten(),
        }
    }
}

impl<T> Provider for SectionProvider<T>
where
    T: ConfigSection + Clone + Send + Sync + 'static,
{
    fn operations(&self) -> Vec<ProvideOp<'_>> {
        vec![ProvideOp::new(T::key(), move || self.section.clone())]
    }
}

impl<T> Candidate for SectionProvider<T>
where
    T: ConfigSection + Clone + Send + Sync + 'static,
{
    fn as_provider(&self) -> Option<&dyn Provider> {
        Some(self)
    }
}
