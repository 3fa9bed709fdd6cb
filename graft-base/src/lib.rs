//! # graft-base
//!
//! Host integration services for graft applications, providing the pieces a
//! real host wires around the core container: configuration, logging setup,
//! the candidate store, and the composition-root session driving injection
//! cycles.
//!
//! ## Core Components
//!
//! - **Configuration System**: JSON section documents with typed access and
//!   deep merging
//! - **Stage**: the host-owned candidate collection handed to the injector
//! - **Session**: validate → run → notify in one explicit entry point
//! - **Section Providers**: config sections exposed as injectable
//!   dependencies
//! - **Tracing Integration**: subscriber setup from configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use graft::{Candidate, ProvideOp, Provider};
//! use graft_base::{Config, Session};
//! use std::sync::Arc;
//!
//! struct Modules;
//!
//! impl Provider for Modules {
//!     fn operations(&self) -> Vec<ProvideOp<'_>> {
//!         vec![ProvideOp::new("greeting", || Some(Arc::new("hello".to_string())))]
//!     }
//! }
//!
//! impl Candidate for Modules {
//!     fn as_provider(&self) -> Option<&dyn Provider> {
//!         Some(self)
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = Config::parse(r#"{"session": {"validate": true}}"#)?;
//! let mut session = Session::from_config(&config)?;
//! session.stage_mut().add(Modules);
//! session.run()?;
//!
//! let greeting = session.injector().registry().get::<Arc<String>>().unwrap();
//! assert_eq!(greeting.as_str(), "hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `macros` (default): Enables the `#[config_section]` attribute macro

mod config;
mod section_provider;
mod session;
mod stage;
mod tracing;

pub use config::*;
pub use section_provider::*;
pub use session::*;
pub use stage::*;
pub use tracing::*;

#[cfg(feature = "macros")]
pub use graft_macros::config_section;
