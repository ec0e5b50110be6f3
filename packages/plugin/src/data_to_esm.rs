//! Data to ES module serializer
//!
//! Renders a parsed JSON value as ES module source: a default export of the whole
//! value and, for plain objects, one named export per top-level key that is a legal
//! identifier.

use crate::js_value::{format_number, is_negative_zero, property_order, quote};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::collections::HashSet;

static DASH_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([A-Za-z0-9_])").unwrap());
static ILLEGAL_CHAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^$_a-zA-Z0-9]").unwrap());

const RESERVED_WORDS: &str = "break case class catch const continue debugger default delete do else export extends finally for function if import in instanceof let new return super switch this throw try typeof var void while with yield enum await implements package protected static interface private public";
const BUILTINS: &str = "arguments Infinity NaN undefined null true false eval uneval isFinite isNaN parseFloat parseInt decodeURI decodeURIComponent encodeURI encodeURIComponent escape unescape Object Function Boolean Symbol Error EvalError InternalError RangeError ReferenceError SyntaxError TypeError URIError Number Math Date String RegExp Array Int8Array Uint8Array Uint8ClampedArray Int16Array Uint16Array Int32Array Uint32Array Float32Array Float64Array Map Set WeakMap WeakSet SIMD ArrayBuffer DataView JSON Promise Generator GeneratorFunction Reflect Proxy Intl";

static FORBIDDEN_IDENTIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    RESERVED_WORDS
        .split(' ')
        .chain(BUILTINS.split(' '))
        .chain(std::iter::once(""))
        .collect()
});

/// Serializer options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataToEsmOptions {
    /// Drop all optional whitespace
    pub compact: bool,
    /// Indentation unit used when not compact
    pub indent: String,
    /// Declare named exports with `const` instead of `var`
    pub prefer_const: bool,
    /// Write `key` instead of `key: key` in the default export
    pub object_shorthand: bool,
    /// Emit one named export per legal top-level key
    pub named_exports: bool,
    /// Also export keys that are not identifiers, as `export { x as "key" }`
    pub include_arbitrary_names: bool,
}

impl Default for DataToEsmOptions {
    fn default() -> Self {
        Self {
            compact: false,
            indent: "\t".to_string(),
            prefer_const: false,
            object_shorthand: false,
            named_exports: true,
            include_arbitrary_names: false,
        }
    }
}

/// Turn an arbitrary string into a legal JavaScript identifier.
///
/// `foo-bar` becomes `fooBar`, illegal characters become `_`, and identifiers that
/// start with a digit or collide with a reserved word or builtin get a `_` prefix.
pub fn make_legal_identifier(name: &str) -> String {
    let camel = DASH_WORD_RE.replace_all(name, |caps: &Captures<'_>| caps[1].to_uppercase());
    let mut identifier = ILLEGAL_CHAR_RE.replace_all(&camel, "_").into_owned();

    let starts_with_digit = identifier
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || FORBIDDEN_IDENTIFIERS.contains(identifier.as_str()) {
        identifier.insert(0, '_');
    }

    identifier
}

/// Render `data` as ES module source.
pub fn data_to_esm(data: &Value, options: &DataToEsmOptions) -> String {
    let t = if options.compact { "" } else { options.indent.as_str() };
    let sp = if options.compact { "" } else { " " };
    let n = if options.compact { "" } else { "\n" };
    // An empty indent disables line breaks inside values, like a compact one.
    let indent = Some(options.indent.as_str()).filter(|i| !options.compact && !i.is_empty());
    let declaration = if options.prefer_const { "const" } else { "var" };

    let map = match data {
        Value::Object(map) if options.named_exports => map,
        _ => {
            let code = serialize(data, indent, "");
            let separator = if !sp.is_empty() {
                sp
            } else if code.starts_with(&['{', '[', '-', '/'][..]) {
                ""
            } else {
                " "
            };
            return format!("export default{}{};", separator, code);
        }
    };

    let arbitrary_prefix = format!("{}arbitrary", "_".repeat(max_underscore_prefix(map) + 1));

    let mut named_export_code = String::new();
    let mut default_rows = Vec::with_capacity(map.len());
    let mut arbitrary_rows = Vec::new();

    for (key, value) in property_order(map) {
        let code = serialize(value, indent, "");
        if *key == make_legal_identifier(key) {
            if options.object_shorthand {
                default_rows.push(key.clone());
            } else {
                default_rows.push(format!("{}:{}{}", key, sp, key));
            }
            named_export_code.push_str(&format!(
                "export {} {}{}={}{};{}",
                declaration, key, sp, sp, code, n
            ));
        } else {
            default_rows.push(format!("{}:{}{}", stringify(key), sp, code));
            if options.include_arbitrary_names {
                let variable = format!("{}{}", arbitrary_prefix, arbitrary_rows.len());
                named_export_code.push_str(&format!(
                    "{} {}{}={}{};{}",
                    declaration, variable, sp, sp, code, n
                ));
                arbitrary_rows.push(format!("{} as {}", variable, quote(key)));
            }
        }
    }

    let row_separator = format!(",{}{}", n, t);
    let arbitrary_export_code = if arbitrary_rows.is_empty() {
        String::new()
    } else {
        format!(
            "export{}{{{}{}{}{}}};{}",
            sp,
            n,
            t,
            arbitrary_rows.join(&row_separator),
            n,
            n
        )
    };

    format!(
        "{}{}export default{}{{{}{}{}{}}};{}",
        named_export_code,
        arbitrary_export_code,
        sp,
        n,
        t,
        default_rows.join(&row_separator),
        n,
        n
    )
}

fn max_underscore_prefix(map: &Map<String, Value>) -> usize {
    map.keys()
        .map(|key| key.bytes().take_while(|b| *b == b'_').count())
        .max()
        .unwrap_or(0)
}

/// JSON string literal that is also safe inside pre-ES2019 JavaScript source.
fn stringify(text: &str) -> String {
    quote(text)
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

fn serialize(value: &Value, indent: Option<&str>, base_indent: &str) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) if is_negative_zero(number) => "-0".to_string(),
        Value::Number(number) => format_number(number),
        Value::String(text) => stringify(text),
        Value::Array(items) => serialize_array(items, indent, base_indent),
        Value::Object(map) => serialize_object(map, indent, base_indent),
    }
}

fn serialize_array(items: &[Value], indent: Option<&str>, base_indent: &str) -> String {
    let nested_indent = format!("{}{}", base_indent, indent.unwrap_or(""));
    let separator = match indent {
        Some(_) => format!("\n{}", nested_indent),
        None => String::new(),
    };

    let mut output = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(&separator);
        output.push_str(&serialize(item, indent, &nested_indent));
    }
    close(output, indent, base_indent, ']')
}

fn serialize_object(map: &Map<String, Value>, indent: Option<&str>, base_indent: &str) -> String {
    let nested_indent = format!("{}{}", base_indent, indent.unwrap_or(""));
    let separator = match indent {
        Some(_) => format!("\n{}", nested_indent),
        None => String::new(),
    };
    let colon = if indent.is_some() { ": " } else { ":" };

    let mut output = String::from("{");
    for (i, (key, item)) in property_order(map).into_iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(&separator);
        if make_legal_identifier(key) == *key {
            output.push_str(key);
        } else {
            output.push_str(&stringify(key));
        }
        output.push_str(colon);
        output.push_str(&serialize(item, indent, &nested_indent));
    }
    close(output, indent, base_indent, '}')
}

fn close(mut output: String, indent: Option<&str>, base_indent: &str, bracket: char) -> String {
    if indent.is_some() {
        output.push('\n');
        output.push_str(base_indent);
    }
    output.push(bracket);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_camel_case_dashes() {
        assert_eq!(make_legal_identifier("foo-bar"), "fooBar");
        assert_eq!(make_legal_identifier("foo bar"), "foo_bar");
    }

    #[test]
    fn should_prefix_reserved_words_and_digits() {
        assert_eq!(make_legal_identifier("default"), "_default");
        assert_eq!(make_legal_identifier("JSON"), "_JSON");
        assert_eq!(make_legal_identifier("1st"), "_1st");
        assert_eq!(make_legal_identifier(""), "_");
    }
}
