#![deny(clippy::all)]

use excalidraw_json::{
    ConsoleLogger, ExcalidrawJsonPlugin, JsonOptions, LogLevel, ResolvedConfig, TransformOutput,
};
use napi_derive::napi;
use serde::Deserialize;
use std::sync::Arc;

/// Options accepted from JavaScript, e.g. `{ namedExports: false, debug: true }`.
/// Missing fields take the plugin defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BindingOptions {
    #[serde(flatten)]
    json: JsonOptions,
    /// Log every transform to stderr
    debug: bool,
}

impl BindingOptions {
    fn from_js(options: Option<serde_json::Value>) -> napi::Result<Self> {
        match options {
            Some(value) => serde_json::from_value(value).map_err(|err| {
                napi::Error::new(
                    napi::Status::InvalidArg,
                    format!("invalid excalidraw-as-json options: {}", err),
                )
            }),
            None => Ok(Self::default()),
        }
    }
}

#[napi(object)]
pub struct JsSourceMapping {
    pub mappings: String,
}

/// Transform result handed back to the JavaScript shim, which forwards
/// `error`/`errorPosition` to the host's `this.error`.
#[napi(object)]
pub struct TransformOutcome {
    pub success: bool,
    pub code: Option<String>,
    pub map: Option<JsSourceMapping>,
    pub error: Option<String>,
    pub error_position: Option<u32>,
}

impl From<TransformOutput> for TransformOutcome {
    fn from(output: TransformOutput) -> Self {
        TransformOutcome {
            success: true,
            code: Some(output.code),
            map: Some(JsSourceMapping {
                mappings: output.map.mappings,
            }),
            error: None,
            error_position: None,
        }
    }
}

#[napi(js_name = "ExcalidrawJsonPlugin")]
pub struct JsExcalidrawJsonPlugin {
    inner: ExcalidrawJsonPlugin,
}

#[napi]
impl JsExcalidrawJsonPlugin {
    #[napi(constructor)]
    pub fn new(options: Option<serde_json::Value>) -> napi::Result<Self> {
        let options = BindingOptions::from_js(options)?;
        let level = if options.debug {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };

        Ok(JsExcalidrawJsonPlugin {
            inner: ExcalidrawJsonPlugin::new(options.json)
                .with_logger(Arc::new(ConsoleLogger::new(level))),
        })
    }

    #[napi(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[napi]
    pub fn config_resolved(&self, mode: String) {
        self.inner.config_resolved(&ResolvedConfig::new(mode));
    }

    /// `null` when `id` is not an excalidraw module.
    #[napi]
    pub fn transform(&self, code: String, id: String) -> Option<TransformOutcome> {
        match self.inner.transform(&code, &id) {
            Ok(output) => output.map(TransformOutcome::from),
            Err(err) => {
                let diagnostic = err.diagnostic();
                Some(TransformOutcome {
                    success: false,
                    code: None,
                    map: None,
                    error: Some(diagnostic.message),
                    error_position: diagnostic
                        .position
                        .and_then(|position| u32::try_from(position).ok()),
                })
            }
        }
    }
}

#[napi]
pub fn strip_bom_tag(content: String) -> String {
    excalidraw_json::strip_bom_tag(&content).to_string()
}

#[napi]
pub fn is_json_request(request: String) -> bool {
    excalidraw_json::is_json_request(&request)
}

