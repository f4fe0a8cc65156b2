//! Isolated frame documents for untrusted widgets and the postMessage bridge
//! that carries form submissions out of them.

use crate::dom::SubmitControl;
use crate::types::{FormEntries, Fragment};
use serde::{Deserialize, Serialize};

/// Messages exchanged between the host page and a widget frame
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BridgeMessage {
    /// Frame → host: a form inside the frame was submitted
    Submit { entries: FormEntries },
    /// Host → frame: new state for the submitted form's button
    Control { disabled: bool, label: String },
}

impl From<SubmitControl> for BridgeMessage {
    fn from(control: SubmitControl) -> Self {
        Self::Control {
            disabled: control.disabled(),
            label: control.label().to_string(),
        }
    }
}

/// Runs inside the frame before the widget's own script
const BRIDGE_SCRIPT: &str = r#"(function () {
  var pending = null;
  document.addEventListener('submit', function (event) {
    var form = event.target;
    if (!(form instanceof HTMLFormElement)) { return; }
    event.preventDefault();
    pending = form;
    var entries = [];
    new FormData(form).forEach(function (value, name) {
      entries.push([name, typeof value === 'string' ? value : value.name]);
    });
    parent.postMessage({ kind: 'submit', entries: entries }, '*');
  }, true);
  window.addEventListener('message', function (event) {
    var data = event.data;
    if (event.source !== parent || !data || data.kind !== 'control' || !pending) { return; }
    var button = pending.querySelector('button[type="submit"]');
    if (button) {
      button.disabled = data.disabled;
      button.textContent = data.label;
    }
  });
})();"#;

/// Complete document for a sandboxed widget frame
pub fn frame_document(fragment: &Fragment) -> String {
    let mut doc = String::with_capacity(fragment.size() + BRIDGE_SCRIPT.len() + 256);
    doc.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    doc.push_str("<style>");
    doc.push_str(&neutralize_closing_tag(&fragment.css, "style"));
    doc.push_str("</style></head><body>");
    doc.push_str(&fragment.html);
    doc.push_str("<script>");
    doc.push_str(BRIDGE_SCRIPT);
    doc.push_str("</script>");
    if fragment.has_script() {
        doc.push_str("<script>");
        doc.push_str(&neutralize_closing_tag(&fragment.javascript, "script"));
        doc.push_str("</script>");
    }
    doc.push_str("</body></html>");
    doc
}

/// Keep raw text from terminating its `<style>`/`<script>` element early
fn neutralize_closing_tag(text: &str, tag: &str) -> String {
    let needle = format!("</{tag}");
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (pos, _) in lower.match_indices(&needle) {
        out.push_str(&text[last..pos]);
        out.push_str("<\\/");
        out.push_str(&text[pos + 2..pos + needle.len()]);
        last = pos + needle.len();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_document_orders_parts() {
        let fragment = Fragment::new("<form id=\"f\"></form>", "form{}", "init()");
        let doc = frame_document(&fragment);

        let style = doc.find("form{}").unwrap();
        let markup = doc.find("<form id=\"f\">").unwrap();
        let bridge = doc.find("parent.postMessage").unwrap();
        let script = doc.find("init()").unwrap();
        assert!(style < markup && markup < bridge && bridge < script);
    }

    #[test]
    fn empty_script_is_omitted() {
        let doc = frame_document(&Fragment::new("<p>x</p>", "", "   "));
        assert_eq!(doc.matches("<script>").count(), 1);
    }

    #[test]
    fn closing_tags_cannot_escape_their_element() {
        let fragment = Fragment::new(
            "",
            "a{}</STYLE><b>styled</b>",
            "var s = '</script><img src=x>';",
        );
        let doc = frame_document(&fragment);

        assert!(doc.contains("a{}<\\/STYLE>"));
        assert!(doc.contains("'<\\/script><img src=x>'"));
        // Only the bridge and the widget script open, and only they close
        assert_eq!(doc.matches("</script>").count(), 2);
        assert_eq!(doc.matches("</style>").count(), 1);
    }

    #[test]
    fn bridge_messages_use_kind_tag() {
        let control = serde_json::to_value(BridgeMessage::from(SubmitControl::Processing)).unwrap();
        assert_eq!(
            control,
            serde_json::json!({ "kind": "control", "disabled": true, "label": "Processing..." })
        );

        let submit: BridgeMessage = serde_json::from_value(serde_json::json!({
            "kind": "submit",
            "entries": [["name", "Ana"], ["age", "30"]],
        }))
        .unwrap();
        let expected: FormEntries = [("name", "Ana"), ("age", "30")].into_iter().collect();
        assert_eq!(submit, BridgeMessage::Submit { entries: expected });
    }
}
