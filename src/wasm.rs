//! WASM bindings for in-browser extraction.

use wasm_bindgen::prelude::*;

use crate::{ParseOptions, parse_html};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Extract microformats from `html` and return them as a JSON string.
///
/// `base_url`, when given, resolves relative links.
#[wasm_bindgen]
pub fn parse(html: &str, base_url: Option<String>) -> Result<String, JsValue> {
    let mut options = ParseOptions::new();
    if let Some(url) = base_url.as_deref() {
        options = options
            .with_base_url(url)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
    }
    let result = parse_html(html, &options);
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}
