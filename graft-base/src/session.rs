use graft::{Enumerate as _, InjectError, Injector, Unresolved};
use serde::{Deserialize, Serialize};

use crate::{Config, ConfigSection, Stage};

/// Behavior switches for a [`Session`], read from the `session` config
/// section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Refuse to run a cycle when validation reports unsatisfied
    /// requirements.
    #[serde(default)]
    pub validate: bool,
    /// Notify listeners after each successful cycle.
    #[serde(default = "default_notify")]
    pub notify: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            validate: false,
            notify: true,
        }
    }
}

impl ConfigSection for SessionConfig {
    fn key() -> &'static str {
        "session"
    }
}

fn default_notify() -> bool {
    true
}

/// Composition-root wrapper owning an [`Injector`] and a [`Stage`].
///
/// Replaces the host-environment startup hook: `run` enumerates the stage,
/// optionally pre-validates it, runs the injection cycle, and notifies
/// listeners strictly afterwards.
///
/// # Examples
///
/// ```rust
/// use graft::{Candidate, ProvideOp, Provider};
/// use graft_base::Session;
/// use std::sync::Arc;
///
/// struct Modules;
///
/// impl Provider for Modules {
///     fn operations(&self) -> Vec<ProvideOp<'_>> {
///         vec![ProvideOp::new("answer", || Some(Arc::new(42u32)))]
///     }
/// }
///
/// impl Candidate for Modules {
///     fn as_provider(&self) -> Option<&dyn Provider> {
///         Some(self)
///     }
/// }
///
/// let mut session = Session::new();
/// session.stage_mut().add(Modules);
/// session.run().unwrap();
/// assert_eq!(**session.injector().registry().get_ref::<Arc<u32>>().unwrap(), 42);
/// ```
pub struct Session {
    injector: Injector,
    stage: Stage,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            injector: Injector::new(),
            stage: Stage::new(),
            config,
        }
    }

    /// Builds a session configured from the `session` section of `config`.
    pub fn from_config(config: &Config) -> Result<Self, graft::StdError> {
        let session_config = config
            .get::<Option<SessionConfig>>(SessionConfig::key())?
            .unwrap_or_default();
        Ok(Self::with_config(session_config))
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    pub fn injector_mut(&mut self) -> &mut Injector {
        &mut self.injector
    }

    /// Runs one injection cycle over the staged candidates.
    ///
    /// With `validate` configured, a stage whose declared requirements are
    /// not all provided is refused before anything is manufactured; the
    /// first unsatisfied requirement is returned as an unresolved-dependency
    /// error. Listeners are notified only once the cycle succeeded.
    pub fn run(&mut self) -> Result<(), InjectError> {
        let candidates = self.stage.enumerate_all();
        if self.config.validate
            && let Some(record) = self.injector.validate(&candidates).into_iter().next()
        {
            return Err(unresolved_error(record));
        }
        self.injector.run(&candidates)?;
        if self.config.notify {
            self.injector.notify_listeners(&candidates);
        }
        Ok(())
    }

    /// Clears the registry and re-runs the cycle from scratch, then notifies
    /// listeners when configured to.
    pub fn reinject(&mut self) -> Result<(), InjectError> {
        let candidates = self.stage.enumerate_all();
        self.injector.reinject(&candidates)?;
        if self.config.notify {
            self.injector.notify_listeners(&candidates);
        }
        Ok(())
    }

    /// Reports unsatisfied requirements across the staged candidates without
    /// mutating anything.
    pub fn validate(&self) -> Vec<Unresolved> {
        self.injector.validate(&self.stage.enumerate_all())
    }
}

fn unresolved_error(record: Unresolved) -> InjectError {
    InjectError::UnresolvedDependency {
        target: record.target,
        member: record.member,
        key: record.key,
    }
}
