// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for identifiers and the OTel service name)
pub const APP_NAME_LOWER: &str = "pullwatch";

/// Instrumentation scope name for the meter
pub const METER_NAME: &str = "pullwatch";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "pullwatch.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "PULLWATCH_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "PULLWATCH_LOG";

/// Environment variable for the kubeconfig context to use
pub const ENV_CONTEXT: &str = "PULLWATCH_CONTEXT";

/// Environment variable for the kubeconfig file path
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";

/// Environment variable for the OTLP metrics endpoint
pub const ENV_OTLP_ENDPOINT: &str = "PULLWATCH_OTLP_ENDPOINT";

/// Environment variable for the metric export interval in seconds
pub const ENV_EXPORT_INTERVAL: &str = "PULLWATCH_EXPORT_INTERVAL_SECS";

// =============================================================================
// Defaults
// =============================================================================

/// Default metric export interval in seconds
pub const DEFAULT_EXPORT_INTERVAL_SECS: u64 = 30;

/// Seconds to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
