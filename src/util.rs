//! Byte decoding and URL helpers shared by the parser and resolvers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex_lite::Regex;
use url::Url;

/// Matches `<meta charset="...">` and the `http-equiv` content-type form.
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*charset\s*=\s*["']?([A-Za-z0-9_:.-]+)"#).unwrap()
});

/// Find the charset declared by a `<meta>` tag near the top of a document.
///
/// Only the first 1024 bytes are inspected, as browsers do.
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];
    let text = match std::str::from_utf8(prefix) {
        Ok(text) => text,
        // A multi-byte sequence may be cut at the boundary.
        Err(err) => std::str::from_utf8(&prefix[..err.valid_up_to()]).ok()?,
    };
    META_CHARSET_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 first (BOM handled by encoding_rs)
/// 2. If malformed, the hint encoding (from `<meta charset>`)
/// 3. Windows-1252 as a last resort
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Schemes whose URLs have no `//` authority or path hierarchy but are still
/// absolute, such as `mailto:jo@example.com`.
const OPAQUE_SCHEMES: &[&str] = &[
    "about", "blob", "data", "geo", "javascript", "magnet", "mailto", "sip", "sms", "tel", "urn",
    "xmpp",
];

/// Whether `value` is an absolute URL to keep verbatim.
///
/// `host:port/path` also parses as an opaque URL with scheme `host`; such
/// values only count as absolute for the schemes in [`OPAQUE_SCHEMES`].
fn is_absolute(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => !url.cannot_be_a_base() || OPAQUE_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}

/// Resolve an attribute value against an optional base URL.
///
/// Absolute URLs come back verbatim (no normalization). Relative values are
/// joined onto the base; without a base, or when joining fails, the trimmed
/// value is returned unchanged.
pub fn resolve_url(base: Option<&Url>, value: &str) -> String {
    let value = value.trim();
    if is_absolute(value) {
        return value.to_string();
    }
    let Some(base) = base else {
        return value.to_string();
    };
    // A leading `./` keeps `join` from reading `host:port` as a scheme.
    let joined = if Url::parse(value).is_ok() {
        base.join(&format!("./{value}"))
    } else {
        base.join(value)
    };
    match joined {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::debug!(%value, %err, "could not resolve relative url");
            value.to_string()
        }
    }
}
