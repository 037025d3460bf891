//! # deplojo-compose
//!
//! Turns JSON templates into deployable task definitions.
//!
//! Handles:
//! - **Composer**: Rendering a template and stamping family, environment,
//!   and container overrides onto it.
//! - **Batch**: Generating every task definition named in a configuration.
//! - **Environment**: Layering group environments over the global one.
//! - **Overrides**: Field replacement and keyed list merging per container.
//! - **Validator**: Structural checks on rendered templates.
//! - **Registration**: Shaping a generated definition for the orchestration API.

pub mod batch;
pub mod composer;
pub mod definition;
pub mod environment;
pub mod overrides;
pub mod registration;
pub mod validator;

pub use batch::generate_task_definitions;
pub use composer::generate_task_definition;
pub use definition::{GeneratedTaskDefinition, TaskDefinition};
