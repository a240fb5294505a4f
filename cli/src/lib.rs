//! Terminal host for the product catalog.
//!
//! Wires `catalog-core` screens to a reqwest transport, an in-memory screen
//! stack and a stdin confirmation prompt. `main.rs` only parses arguments,
//! loads settings and initializes logging.

pub mod commands;
pub mod host;
pub mod settings;
pub mod transport;

pub use commands::{run, Cli, Command};
pub use host::{AssumeYes, StackNavigator, StdinDialog};
pub use settings::{load_settings, Settings};
pub use transport::ReqwestTransport;
