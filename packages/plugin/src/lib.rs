//! Excalidraw-as-JSON transform plugin
//!
//! Turns `.excalidraw` drawings into ES modules exposing their parsed JSON content.
#![deny(clippy::all)]

pub mod bom;
pub mod data_to_esm;
pub mod error;
pub mod filter;
pub mod js_value;
pub mod logging;
pub mod options;
pub mod plugin;

// Re-exports
pub use bom::strip_bom_tag;
pub use data_to_esm::{data_to_esm, make_legal_identifier, DataToEsmOptions};
pub use error::{Diagnostic, Result, TransformError};
pub use filter::{is_excalidraw_module, is_json_request};
pub use logging::{ConsoleLogger, LogLevel, Logger, NullLogger};
pub use options::{BuildMode, JsonOptions, ResolvedConfig};
pub use plugin::{ExcalidrawJsonPlugin, SourceMapping, TransformOutput, PLUGIN_NAME};

/// Crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
