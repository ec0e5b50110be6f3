//! Excalidraw-as-JSON plugin
//!
//! `configResolved` captures the build mode once; `transform` then turns each matching
//! drawing into module source.

use crate::bom::strip_bom_tag;
use crate::data_to_esm::{data_to_esm, DataToEsmOptions};
use crate::error::{Result, TransformError};
use crate::filter::is_excalidraw_module;
use crate::js_value::{minify, quote};
use crate::logging::{Logger, NullLogger};
use crate::options::{BuildMode, JsonOptions, ResolvedConfig};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Name the plugin registers under with the host.
pub const PLUGIN_NAME: &str = "excalidraw-as-json";

/// Source map handed back with generated code. Always empty: the output has no
/// line/column correspondence to the drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMapping {
    pub mappings: String,
}

impl SourceMapping {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Generated module for one drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub map: SourceMapping,
}

impl TransformOutput {
    fn new(code: String) -> Self {
        Self {
            code,
            map: SourceMapping::empty(),
        }
    }
}

/// Code generation strategy, picked once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputStrategy {
    /// `export default JSON.parse("...")`
    Stringify(BuildMode),
    /// Object literal default export, plus named exports when requested
    Structured { named_exports: bool },
}

impl OutputStrategy {
    fn select(options: &JsonOptions, mode: BuildMode) -> Self {
        if options.stringify {
            OutputStrategy::Stringify(mode)
        } else {
            OutputStrategy::Structured {
                named_exports: options.named_exports,
            }
        }
    }

    fn generate(self, source: &str, parsed: &Value) -> String {
        match self {
            // Re-serializing drops the drawing's whitespace from the bundle.
            OutputStrategy::Stringify(BuildMode::Production) => {
                format!("export default JSON.parse({})", quote(&minify(parsed)))
            }
            OutputStrategy::Stringify(BuildMode::Development) => {
                format!("export default JSON.parse({})", quote(source))
            }
            OutputStrategy::Structured { named_exports } => data_to_esm(
                parsed,
                &DataToEsmOptions {
                    prefer_const: true,
                    named_exports,
                    ..DataToEsmOptions::default()
                },
            ),
        }
    }
}

/// Transform one request.
///
/// Returns `Ok(None)` when `id` is not an excalidraw module and the host should leave
/// it to other plugins.
pub fn transform(
    id: &str,
    raw_content: &str,
    options: &JsonOptions,
    mode: BuildMode,
) -> Result<Option<TransformOutput>> {
    if !is_excalidraw_module(id) {
        return Ok(None);
    }

    let source = strip_bom_tag(raw_content);
    let parsed = parse_json(source)?;

    let code = OutputStrategy::select(options, mode).generate(source, &parsed);
    Ok(Some(TransformOutput::new(code)))
}

/// Parse `source` with no nesting limit, growing the stack on demand.
fn parse_json(source: &str) -> Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();

    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(|err| TransformError::malformed_json(&err, source))?;
    deserializer
        .end()
        .map_err(|err| TransformError::malformed_json(&err, source))?;

    Ok(value)
}

/// Plugin instance shared by every transform of a build.
pub struct ExcalidrawJsonPlugin {
    options: JsonOptions,
    mode: OnceCell<BuildMode>,
    logger: Arc<dyn Logger>,
}

impl ExcalidrawJsonPlugin {
    pub fn new(options: JsonOptions) -> Self {
        Self {
            options,
            mode: OnceCell::new(),
            logger: Arc::new(NullLogger::new()),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    /// The captured build mode, if the host has resolved its configuration yet.
    pub fn mode(&self) -> Option<BuildMode> {
        self.mode.get().copied()
    }

    /// Capture the build mode. Only the first call takes effect.
    pub fn config_resolved(&self, config: &ResolvedConfig) {
        let mode = config.build_mode();
        if self.mode.set(mode).is_err() {
            self.logger.warn(&format!(
                "configuration already resolved as {:?}; ignoring mode '{}'",
                self.mode(),
                config.mode
            ));
            return;
        }
        self.logger.debug(&format!("build mode resolved: {:?}", mode));
    }

    pub fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>> {
        let mode = match self.mode() {
            Some(mode) => mode,
            None => {
                self.logger.warn(&format!(
                    "transform of {} before configuration was resolved; assuming development",
                    id
                ));
                BuildMode::Development
            }
        };

        let result = transform(id, code, &self.options, mode);
        match &result {
            Ok(None) => self.logger.debug(&format!("skipping {}", id)),
            Ok(Some(_)) => self.logger.debug(&format!(
                "transformed {} ({:?})",
                id,
                OutputStrategy::select(&self.options, mode)
            )),
            Err(err) => self.logger.error(&format!("{}: {}", id, err)),
        }
        result
    }
}

impl Default for ExcalidrawJsonPlugin {
    fn default() -> Self {
        Self::new(JsonOptions::default())
    }
}
