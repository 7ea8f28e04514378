//! Command handlers, one module per subcommand.

pub mod completion;
pub mod config_cmd;
pub mod init;
pub mod inputs;
pub mod interval;
pub mod report;
pub mod team;
pub mod totals;
pub mod version;
