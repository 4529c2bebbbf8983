//! Rule-set backends for routerrules.
//!
//! A backend owns the durable, per-router rule sets. The core only needs two
//! operations from it, expressed by [`RulePolicyBackend`]:
//!
//! - `add_rule`: upsert a rule keyed by priority
//! - `remove_rules`: remove one rule by id, or reset the whole set
//!
//! # Example
//!
//! ```
//! use routerrules_rules::{RawRuleInput, RouterId, validate_and_normalize};
//! use routerrules_store::{MemoryBackend, RulePolicyBackend};
//!
//! # async fn example() -> Result<(), routerrules_store::BackendError> {
//! let backend = MemoryBackend::new();
//! let router = RouterId::new("router-1").unwrap();
//! let rule = validate_and_normalize(&RawRuleInput::new("permit", "any", "external")).unwrap();
//!
//! backend.add_rule(&router, &rule).await?;
//! backend.remove_rules(&router, None, true).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod traits;

#[cfg(feature = "http")]
pub mod http;

pub use error::BackendError;
pub use memory::MemoryBackend;
pub use traits::RulePolicyBackend;

#[cfg(feature = "http")]
pub use http::{Codec, HttpBackend};
