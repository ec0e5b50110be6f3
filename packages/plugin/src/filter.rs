//! Request filters
//!
//! The host re-runs transforms on synthetic `?commonjs-proxy` / `?commonjs-external`
//! ids derived from the same path, so the transform filter must skip those.

use once_cell::sync::Lazy;
use regex::Regex;

/// Extension marker followed by end of input or the start of a query string
static EXCALIDRAW_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.excalidraw(?:$|\?)").unwrap());

/// Same pattern, written as a language alternation like the host's JSON request check
static EXCALIDRAW_LANG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(?:excalidraw)(?:$|\?)").unwrap());

/// Query prefixes the host uses for its commonjs interop modules.
const RESERVED_QUERY_PREFIXES: [&str; 2] = ["commonjs-proxy", "commonjs-external"];

/// Whether the transform should handle `id`.
///
/// Matches `foo.excalidraw` and `foo.excalidraw?raw`, but not `foo.excalidraw.json`
/// nor the commonjs proxy/external variants.
pub fn is_excalidraw_module(id: &str) -> bool {
    // `regex` has no lookahead, so the exclusion is checked on the text after each hit.
    EXCALIDRAW_EXT_RE.find_iter(id).any(|m| {
        let rest = &id[m.end()..];
        !RESERVED_QUERY_PREFIXES
            .iter()
            .any(|prefix| rest.starts_with(prefix))
    })
}

/// Whether `request` looks like an excalidraw JSON request, proxies included.
pub fn is_json_request(request: &str) -> bool {
    EXCALIDRAW_LANG_RE.is_match(request)
}
