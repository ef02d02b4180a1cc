//! Bundle reference injection.
//!
//! Pages planned with [`InjectionMode::Body`] receive two tags:
//!
//! ```html
//! <head>
//!   ...
//! <link rel="stylesheet" href="css/style.css"></head>
//! <body>
//!   ...
//! <script defer src="js/bundle.js"></script></body>
//! ```
//!
//! A template without `</head>` gets its stylesheet next to the script, and a
//! template without `</body>` gets both appended at the end. Pages planned
//! with [`InjectionMode::None`] are returned unchanged.
//!
//! Tags are rendered with [maud](https://maud.lambda.xyz/), so configured
//! paths are escaped before they reach the page.

use crate::config::{BundleConfig, ScriptLoading};
use crate::pages::InjectionMode;
use maud::{Markup, html};

/// Render the stylesheet `<link>` tag.
pub fn stylesheet_tag(href: &str) -> Markup {
    html! {
        link rel="stylesheet" href=(href);
    }
}

/// Render the script tag for the configured loading strategy.
pub fn script_tag(src: &str, loading: ScriptLoading) -> Markup {
    match loading {
        ScriptLoading::Defer => html! { script defer src=(src) {} },
        ScriptLoading::Blocking => html! { script src=(src) {} },
        ScriptLoading::Module => html! { script type="module" src=(src) {} },
    }
}

/// Apply `mode` to `template`, returning the page markup to emit.
pub fn inject(template: &str, mode: InjectionMode, bundle: &BundleConfig) -> String {
    match mode {
        InjectionMode::None => template.to_string(),
        InjectionMode::Body => inject_body(template, bundle),
    }
}

fn inject_body(template: &str, bundle: &BundleConfig) -> String {
    let link = stylesheet_tag(&bundle.stylesheet).into_string();
    let script = script_tag(&bundle.script, bundle.script_loading).into_string();

    // ASCII lowercasing keeps byte offsets aligned with `template`.
    let lower = template.to_ascii_lowercase();
    let head_end = lower.find("</head>");
    let body_end = lower.rfind("</body>").filter(|&b| head_end.is_none_or(|h| b > h));

    let mut out = String::with_capacity(template.len() + link.len() + script.len());
    match (head_end, body_end) {
        (Some(h), Some(b)) => {
            out.push_str(&template[..h]);
            out.push_str(&link);
            out.push_str(&template[h..b]);
            out.push_str(&script);
            out.push_str(&template[b..]);
        }
        (Some(h), None) => {
            out.push_str(&template[..h]);
            out.push_str(&link);
            out.push_str(&template[h..]);
            out.push_str(&script);
        }
        (None, Some(b)) => {
            out.push_str(&template[..b]);
            out.push_str(&link);
            out.push_str(&script);
            out.push_str(&template[b..]);
        }
        (None, None) => {
            out.push_str(template);
            out.push_str(&link);
            out.push_str(&script);
        }
    }
    out
}

/// Remove `<!-- ... -->` comments. An unterminated comment is kept as-is.
pub fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        let Some(len) = rest[start + 4..].find("-->") else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + 4 + len + 3..];
    }
    out.push_str(rest);
    out
}
