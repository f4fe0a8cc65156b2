use super::sandbox::frame_document;
use crate::dom::DocumentPort;
use crate::error::InjectError;
use crate::types::{Fragment, ScriptPolicy};

/// Nodes added to the document for one mounted fragment
#[derive(Debug)]
pub struct Injection<N> {
    pub container: N,
    pub style: Option<N>,
    pub script: Option<N>,
    pub frame: Option<N>,
}

impl<N: Clone> Injection<N> {
    /// Targets whose form submissions must be wired up
    pub fn submit_targets<P>(&self, port: &P) -> Vec<N>
    where
        P: DocumentPort<Node = N>,
    {
        match &self.frame {
            Some(frame) => vec![frame.clone()],
            None => port.forms(&self.container),
        }
    }
}

/// Put `fragment` into `container` as `policy` allows.
///
/// On error, anything already added is removed again before returning.
pub fn inject<P: DocumentPort>(
    port: &P,
    container: &P::Node,
    fragment: &Fragment,
    policy: ScriptPolicy,
) -> Result<Injection<P::Node>, InjectError> {
    fragment.screen(policy)?;

    let mut injection = Injection {
        container: container.clone(),
        style: None,
        script: None,
        frame: None,
    };

    let result = match policy {
        ScriptPolicy::Sandboxed => attach_sandboxed(port, fragment, &mut injection),
        ScriptPolicy::Trusted | ScriptPolicy::Deny => {
            attach_inline(port, fragment, policy, &mut injection)
        }
    };

    if let Err(err) = result {
        teardown(port, injection);
        return Err(err);
    }

    tracing::debug!(
        ?policy,
        bytes = fragment.size(),
        script = injection.script.is_some() || injection.frame.is_some(),
        "widget fragment injected"
    );
    Ok(injection)
}

fn attach_sandboxed<P: DocumentPort>(
    port: &P,
    fragment: &Fragment,
    injection: &mut Injection<P::Node>,
) -> Result<(), InjectError> {
    let srcdoc = frame_document(fragment);
    injection.frame = Some(port.attach_frame(&injection.container, &srcdoc)?);
    Ok(())
}

fn attach_inline<P: DocumentPort>(
    port: &P,
    fragment: &Fragment,
    policy: ScriptPolicy,
    injection: &mut Injection<P::Node>,
) -> Result<(), InjectError> {
    port.insert_markup(&injection.container, &fragment.markup(policy))?;
    injection.style = Some(port.attach_style(&fragment.css)?);
    if policy.runs_script() && fragment.has_script() {
        injection.script = Some(port.attach_script(&fragment.javascript)?);
    }
    Ok(())
}

/// Remove everything [`inject`] added and empty the container
pub fn teardown<P: DocumentPort>(port: &P, injection: Injection<P::Node>) {
    let Injection {
        container,
        style,
        script,
        frame,
    } = injection;

    for node in [style, script, frame].into_iter().flatten() {
        port.detach(&node);
    }
    port.clear(&container);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::{Attached, FakeDocument};

    fn quote_form() -> Fragment {
        Fragment::new(
            "<form><input name=\"ticker\"><button type=\"submit\">Buy</button></form>",
            ".quote { color: green; }",
            "document.title = 'quote';",
        )
    }

    #[test]
    fn trusted_injects_markup_style_and_script() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");

        let injection = inject(&doc, &container, &quote_form(), ScriptPolicy::Trusted).unwrap();

        assert!(doc.content(container).contains("<form>"));
        assert_eq!(
            doc.attached(),
            vec![
                (Attached::Style, ".quote { color: green; }".to_string()),
                (Attached::Script, "document.title = 'quote';".to_string()),
            ]
        );
        assert_eq!(injection.submit_targets(&doc).len(), 1);
    }

    #[test]
    fn sandboxed_adds_only_a_frame() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");

        let injection = inject(&doc, &container, &quote_form(), ScriptPolicy::Sandboxed).unwrap();

        let attached = doc.attached();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].0, Attached::Frame);
        assert!(attached[0].1.contains("document.title = 'quote';"));
        assert!(doc.content(container).is_empty());
        assert_eq!(injection.submit_targets(&doc), vec![injection.frame.unwrap()]);
    }

    #[test]
    fn deny_runs_no_script() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");
        let fragment = Fragment::new("<form></form>", "form {}", "");

        let injection = inject(&doc, &container, &fragment, ScriptPolicy::Deny).unwrap();

        assert!(injection.script.is_none());
        assert_eq!(doc.attached(), vec![(Attached::Style, "form {}".to_string())]);
    }

    #[test]
    fn rejected_fragment_touches_nothing() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");

        let err = inject(&doc, &container, &quote_form(), ScriptPolicy::Deny).unwrap_err();

        assert_eq!(err, InjectError::ScriptRejected);
        assert!(doc.attached().is_empty());
        assert!(doc.content(container).is_empty());
    }

    #[test]
    fn teardown_is_symmetric() {
        for policy in [ScriptPolicy::Trusted, ScriptPolicy::Sandboxed] {
            let doc = FakeDocument::new();
            let container = doc.add_container("widget");

            let injection = inject(&doc, &container, &quote_form(), policy).unwrap();
            teardown(&doc, injection);

            assert!(doc.attached().is_empty(), "{policy:?} left nodes behind");
            assert!(doc.content(container).is_empty());
            assert!(doc.forms_of(container).is_empty());
        }
    }

    #[test]
    fn partial_failure_rolls_back() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");
        doc.fail_style_attach();

        let err = inject(&doc, &container, &quote_form(), ScriptPolicy::Trusted).unwrap_err();

        assert!(matches!(err, InjectError::Dom(_)));
        assert!(doc.content(container).is_empty());
        assert!(doc.attached().is_empty());
    }
}
