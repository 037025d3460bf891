//! Workspace-wide constants: well-known template fields and defaults.

/// Top-level field holding the task definition family name.
pub const FAMILY_FIELD: &str = "family";

/// Top-level field holding the container specifications.
pub const CONTAINER_DEFINITIONS_FIELD: &str = "containerDefinitions";

/// Container field holding the container name.
pub const CONTAINER_NAME_FIELD: &str = "name";

/// Container field receiving the merged environment.
pub const ENVIRONMENT_FIELD: &str = "environment";

/// Container field holding port mappings.
pub const PORT_MAPPINGS_FIELD: &str = "portMappings";

/// Key used to match port mapping entries between base and override.
pub const CONTAINER_PORT_KEY: &str = "containerPort";

/// Default configuration file looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "deplojo.yml";
