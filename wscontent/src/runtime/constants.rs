//! Constants for workspace content initialization
//!
//! Centralized location for environment variables, directory and file names.

pub mod envs {
    pub const WSCONTENT_WORKSPACE_ROOT: &str = "WSCONTENT_WORKSPACE_ROOT";
}

pub mod dirs {
    /// Default workspace directory under the user's home.
    pub const WORKSPACE_DIR: &str = "workspace";

    /// Bookkeeping directory inside the workspace root.
    pub const STATE_DIR: &str = ".wscontent";
}

pub mod filenames {
    /// Marker written once the whole initializer tree has succeeded.
    pub const READY: &str = "ready";

    /// Prefix of the daily rolling log file.
    pub const LOG: &str = "wscontent.log";
}

pub mod defaults {
    pub const LOG_LEVEL: &str = "info";
}
