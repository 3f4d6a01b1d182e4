//! WebAssembly bindings for JavaScript
//!
//! This module provides WASM bindings using wasm-bindgen so a browser
//! highlighter can tokenize, highlight and explain patterns. Enable with the
//! "wasm" feature flag.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::{Dialect, ParseResult, Token, describe, explain, highlight};

/// JavaScript-facing parse result wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct JsParseResult {
    result: ParseResult,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl JsParseResult {
    /// True when no errors were recorded
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.result.success()
    }

    /// Canonical dialect tag
    #[wasm_bindgen(getter)]
    pub fn dialect(&self) -> String {
        self.result.dialect.tag().to_string()
    }

    /// Tokens in source order
    #[wasm_bindgen(getter)]
    pub fn tokens(&self) -> js_sys::Array {
        let array = js_sys::Array::new();
        for token in &self.result.tokens {
            array.push(
                &JsToken {
                    token: token.clone(),
                    dialect: self.result.dialect,
                }
                .into(),
            );
        }
        array
    }

    /// Error messages with positions
    #[wasm_bindgen(getter)]
    pub fn errors(&self) -> js_sys::Array {
        self.result
            .errors
            .iter()
            .map(|d| JsValue::from_str(&d.to_string()))
            .collect()
    }

    /// Warning messages with positions
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> js_sys::Array {
        self.result
            .warnings
            .iter()
            .map(|d| JsValue::from_str(&d.to_string()))
            .collect()
    }

    /// Full result, including the tree, as JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.result).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Overlay markup with one span per token
    #[wasm_bindgen(js_name = highlightHtml)]
    pub fn highlight_html(&self) -> String {
        highlight::to_html(&self.result.tokens)
    }

    /// Plain-text explanation of the pattern
    #[wasm_bindgen(js_name = explain)]
    pub fn explain(&self) -> String {
        explain::explain(&self.result).to_string()
    }
}

/// JavaScript-facing token wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct JsToken {
    token: Token,
    dialect: Dialect,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl JsToken {
    /// Upper-case kind name, e.g. `QUANT_LAZY`
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.token.kind.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.token.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> usize {
        self.token.offset
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.token.length
    }

    /// Style classes for the overlay span
    #[wasm_bindgen(getter, js_name = cssClass)]
    pub fn css_class(&self) -> String {
        highlight::css_class(self.token.kind).to_string()
    }

    /// Tooltip as a JSON object with title, description and notes
    #[wasm_bindgen(js_name = tooltip)]
    pub fn tooltip(&self) -> Result<String, JsValue> {
        let tooltip = describe::tooltip(&self.token, self.dialect);
        serde_json::to_string(&tooltip).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Parse a pattern under a dialect tag
///
/// Returns an error string only for an unknown dialect; malformed patterns
/// are reported through the result's `errors`.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = parse)]
pub fn parse_pattern(pattern: &str, dialect: &str) -> Result<JsParseResult, JsValue> {
    match crate::analyze(pattern, dialect) {
        Ok(result) => Ok(JsParseResult { result }),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Canonical tags of every supported dialect
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = dialects)]
pub fn dialects() -> js_sys::Array {
    Dialect::all()
        .iter()
        .map(|d| JsValue::from_str(d.tag()))
        .collect()
}

/// Initialize panic hook for better error messages in WASM
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
