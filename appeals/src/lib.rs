//! Appeal engine — lets an author contest a removal.
//!
//! After a removal proposal executes, the original author may open exactly
//! one appeal, ever. The appeal runs the same token-weighted window/quorum
//! arithmetic as the proposal engine (it reuses `curia_governance::ballot`),
//! but both outcomes write content status: the content must leave the
//! transient `Appealing` state whether the appeal is upheld or rejected.

pub mod appeal;
pub mod engine;
pub mod error;

pub use appeal::{Appeal, AppealResult};
pub use engine::{AppealEngine, AppealEvent};
pub use error::AppealError;
