use crate::config::WidgetConfig;
use crate::error::InjectError;
use ammonia::Builder;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Markup, stylesheet and script produced for a generative widget.
///
/// The bundle is untrusted. What may run is decided by the [`ScriptPolicy`]
/// the caller mounts it with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub javascript: String,
}

/// How a widget's script is allowed to execute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPolicy {
    /// Run inside a sandboxed frame with an opaque origin
    #[default]
    Sandboxed,
    /// Inject straight into the host document. Only for content the host produced itself.
    Trusted,
    /// Never run script; markup is screened before insertion
    Deny,
}

impl ScriptPolicy {
    pub const fn runs_script(self) -> bool {
        !matches!(self, Self::Deny)
    }
}

impl Fragment {
    pub fn new(
        html: impl Into<String>,
        css: impl Into<String>,
        javascript: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            javascript: javascript.into(),
        }
    }

    /// Combined size of the three parts in bytes
    pub fn size(&self) -> usize {
        self.html.len() + self.css.len() + self.javascript.len()
    }

    pub fn has_script(&self) -> bool {
        !self.javascript.trim().is_empty()
    }

    /// Check the fragment is acceptable under `policy` before anything touches the document
    pub fn screen(&self, policy: ScriptPolicy) -> Result<(), InjectError> {
        let size = self.size();
        if size > WidgetConfig::MAX_FRAGMENT_BYTES {
            return Err(InjectError::TooLarge {
                size,
                limit: WidgetConfig::MAX_FRAGMENT_BYTES,
            });
        }

        if policy == ScriptPolicy::Deny {
            if self.has_script() {
                return Err(InjectError::ScriptRejected);
            }
            if let Some(reason) = find_active_markup(&self.html) {
                return Err(InjectError::MarkupRejected(reason));
            }
        }

        Ok(())
    }

    /// Markup as it should be inserted under `policy`; `Deny` gets the sanitized form
    pub fn markup(&self, policy: ScriptPolicy) -> Cow<'_, str> {
        match policy {
            ScriptPolicy::Deny => Cow::Owned(inert_markup(&self.html)),
            ScriptPolicy::Sandboxed | ScriptPolicy::Trusted => Cow::Borrowed(&self.html),
        }
    }
}

/// Form controls a script-free widget may still use
const FORM_TAGS: [&str; 10] = [
    "button", "fieldset", "form", "input", "label", "legend", "optgroup", "option", "select",
    "textarea",
];

const FORM_ATTRIBUTES: [&str; 19] = [
    "checked", "cols", "disabled", "for", "max", "maxlength", "min", "minlength", "multiple",
    "name", "pattern", "placeholder", "readonly", "required", "rows", "selected", "size", "step",
    "type",
];

/// Constructs that can run code; only the detecting builder lets them through
const ACTIVE_TAGS: [&str; 5] = ["script", "iframe", "object", "embed", "base"];
const SCRIPT_URL_SCHEMES: [&str; 3] = ["javascript", "vbscript", "data"];

/// Allow-list used for markup inserted under [`ScriptPolicy::Deny`]
fn inert_builder() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .add_tags(&FORM_TAGS)
        .add_generic_attributes(&["class", "id", "value"]);
    for tag in FORM_TAGS {
        builder.add_tag_attributes(tag, &FORM_ATTRIBUTES);
    }
    builder
}

/// Same allow-list plus everything active, so the two outputs differ exactly
/// when the inert builder had to remove something that could run
fn detecting_builder() -> Builder<'static> {
    let mut builder = inert_builder();
    builder
        .clean_content_tags(HashSet::from(["style"]))
        .add_tags(&ACTIVE_TAGS)
        .add_generic_attribute_prefixes(&["on"])
        .add_url_schemes(&SCRIPT_URL_SCHEMES);
    builder
}

/// Markup with everything outside the inert allow-list removed
fn inert_markup(markup: &str) -> String {
    inert_builder().clean(markup).to_string()
}

/// Returns a description of the active content in `markup`, if any.
///
/// Both builders parse with the same HTML parser, so entities are decoded and
/// attribute quoting is resolved before anything is compared.
fn find_active_markup(markup: &str) -> Option<String> {
    let detected = detecting_builder().clean(markup).to_string();
    (detected != inert_markup(markup)).then(|| {
        "script elements, event handlers, embedded content and script URLs are not allowed"
            .to_string()
    })
}
