//! Request path assembly.

use url::form_urlencoded;

/// Optional switches understood by the instant answer endpoint. A flag that
/// is off is omitted from the query string entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestFlags {
    /// Skip HTTP redirects (for !bang commands).
    pub no_redirect: bool,
    /// Strip HTML from text fields.
    pub no_html: bool,
    /// Skip disambiguation (`D`) results.
    pub skip_disambig: bool,
}

impl RequestFlags {
    pub fn all() -> Self {
        Self {
            no_redirect: true,
            no_html: true,
            skip_disambig: true,
        }
    }
}

/// Build `/?q=<query>&format=json[&no_redirect=1][&no_html=1][&skip_disambig=1]`.
///
/// The query is form-encoded: spaces become `+`, everything outside the
/// unreserved set is UTF-8 encoded and percent-escaped.
pub fn build_path(query: &str, flags: RequestFlags) -> String {
    let mut pairs = vec![("q", query), ("format", "json")];
    for (name, enabled) in [
        ("no_redirect", flags.no_redirect),
        ("no_html", flags.no_html),
        ("skip_disambig", flags.skip_disambig),
    ] {
        if enabled {
            pairs.push((name, "1"));
        }
    }

    let mut path = String::from("/?");
    for (i, (name, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            path.push('&');
        }
        path.push_str(&encode_component(name));
        path.push('=');
        path.push_str(&encode_component(value));
    }
    path
}

/// Form-encode one name or value, keeping only `A-Z a-z 0-9 - . _ ~` as is.
///
/// `byte_serialize` follows the WHATWG form set, which keeps `*` and escapes
/// `~`; both are swapped back to the RFC 3986 unreserved set here.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for chunk in form_urlencoded::byte_serialize(value.as_bytes()) {
        match chunk {
            "%7E" => out.push('~'),
            run => out.push_str(&run.replace('*', "%2A")),
        }
    }
    out
}
