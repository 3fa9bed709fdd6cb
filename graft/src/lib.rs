//! # graft
//!
//! A declarative dependency-injection container. Values are manufactured by
//! *providers*, stored in a type-keyed *registry*, and assigned into the
//! inject-marked members of *targets*, all declared through descriptor
//! lists rather than runtime reflection.
//!
//! ## Core Concepts
//!
//! - **Registry**: the type-keyed store of available instances
//! - **Provider**: a capability exposing zero-argument operations that each
//!   manufacture one instance
//! - **Target**: a capability exposing injectable members: [`Slot`] fields
//!   filled once, and methods re-invoked with freshly resolved arguments on
//!   every pass
//! - **Injector**: the lifecycle coordinator driving the two-phase cycle
//!   (scan all providers, then inject all targets) over a candidate set
//! - **Candidate**: an object the host hands to the injector, probed for the
//!   capabilities above
//!
//! ## Basic Usage
//!
//! ```rust
//! use graft::{Candidate, Injector, MemberBinding, Provider, ProvideOp, Slot, Target};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct Modules {
//!     database: Arc<Database>,
//! }
//!
//! impl Provider for Modules {
//!     fn operations(&self) -> Vec<ProvideOp<'_>> {
//!         vec![ProvideOp::new("database", move || Some(self.database.clone()))]
//!     }
//! }
//!
//! impl Candidate for Modules {
//!     fn as_provider(&self) -> Option<&dyn Provider> {
//!         Some(self)
//!     }
//! }
//!
//! struct Repository {
//!     database: Slot<Arc<Database>>,
//! }
//!
//! impl Target for Repository {
//!     fn members(&self) -> Vec<MemberBinding<'_>> {
//!         vec![self.database.binding("database")]
//!     }
//! }
//!
//! impl Candidate for Repository {
//!     fn as_target(&self) -> Option<&dyn Target> {
//!         Some(self)
//!     }
//! }
//!
//! fn main() -> Result<(), graft::InjectError> {
//!     let repository = Arc::new(Repository {
//!         database: Slot::empty(),
//!     });
//!     let candidates: Vec<Arc<dyn Candidate>> = vec![
//!         Arc::new(Modules {
//!             database: Arc::new(Database {
//!                 url: "sqlite::memory:".to_string(),
//!             }),
//!         }),
//!         repository.clone(),
//!     ];
//!
//!     let mut injector = Injector::new();
//!     injector.run(&candidates)?;
//!
//!     assert_eq!(repository.database.get().unwrap().url, "sqlite::memory:");
//!     Ok(())
//! }
//! ```
//!
//! ## Using Macros
//!
//! With the `macros` feature enabled, provider and target declarations
//! become attribute-driven:
//!
//! ```rust
//! use graft::{provider, Candidate, Injector, Provider, Slot, Target};
//! use std::sync::Arc;
//!
//! struct Cache;
//!
//! struct Modules;
//!
//! #[provider]
//! impl Modules {
//!     #[provide]
//!     fn cache(&self) -> Arc<Cache> {
//!         Arc::new(Cache)
//!     }
//! }
//!
//! impl Candidate for Modules {
//!     fn as_provider(&self) -> Option<&dyn Provider> {
//!         Some(self)
//!     }
//! }
//!
//! #[derive(Target)]
//! struct Service {
//!     #[inject]
//!     cache: Slot<Arc<Cache>>,
//! }
//!
//! impl Candidate for Service {
//!     fn as_target(&self) -> Option<&dyn Target> {
//!         Some(self)
//!     }
//! }
//!
//! fn main() -> Result<(), graft::InjectError> {
//!     let service = Arc::new(Service { cache: Slot::empty() });
//!     let candidates: Vec<Arc<dyn Candidate>> = vec![Arc::new(Modules), service.clone()];
//!
//!     let mut injector = Injector::new();
//!     injector.run(&candidates)?;
//!
//!     assert!(!service.cache.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Validation
//!
//! Before running a cycle, the candidate set can be checked structurally:
//! every declared requirement cross-referenced against every declared
//! provision, without manufacturing or assigning anything.
//!
//! ```rust
//! use graft::{Candidate, Injector, MemberBinding, Slot, Target};
//! use std::sync::Arc;
//!
//! struct Repository {
//!     database: Slot<Arc<String>>,
//! }
//!
//! impl Target for Repository {
//!     fn members(&self) -> Vec<MemberBinding<'_>> {
//!         vec![self.database.binding("database")]
//!     }
//! }
//!
//! impl Candidate for Repository {
//!     fn as_target(&self) -> Option<&dyn Target> {
//!         Some(self)
//!     }
//! }
//!
//! let candidates: Vec<Arc<dyn Candidate>> = vec![Arc::new(Repository {
//!     database: Slot::empty(),
//! })];
//!
//! let injector = Injector::new();
//! let report = injector.validate(&candidates);
//! assert_eq!(report.len(), 1);
//! assert_eq!(report[0].member, "database");
//! ```
//!
//! ## Features
//!
//! - `macros` (default): Enables procedural macros for declaring providers
//!   and targets

mod coordinator;
mod error;
mod inject;
mod provide;
mod registry;
mod sink;
mod validate;

pub use coordinator::*;
pub use error::*;
pub use inject::*;
pub use provide::*;
pub use registry::*;
pub use sink::*;
pub use validate::*;

#[cfg(feature = "macros")]
pub use graft_macros::{Target, provider, target};
