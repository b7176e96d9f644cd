//! Command implementations.

pub mod classify;
pub mod config;
pub mod params;
pub mod run;
pub mod scan;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::params::execute_params;
pub use self::run::execute_run;
pub use self::scan::execute_scan;
