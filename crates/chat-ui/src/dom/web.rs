use super::{DocumentPort, SubmitControl, SubmitHandler};
use crate::config::WidgetConfig;
use crate::error::DomError;
use crate::styles::WIDGET_FRAME;
use crate::types::FormEntries;
use crate::widget::sandbox::BridgeMessage;
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, File, FormData, HtmlButtonElement, HtmlFormElement, HtmlIFrameElement,
    MessageEvent,
};

/// [`DocumentPort`] backed by the browser document
#[derive(Clone, PartialEq)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new() -> Result<Self, DomError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| Self { document })
            .ok_or(DomError::Unavailable)
    }

    fn create(&self, tag: &'static str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(DomError::js("createElement"))
    }
}

impl DocumentPort for WebDocument {
    type Node = Element;
    type Listener = EventListener;

    fn container(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn insert_markup(&self, container: &Element, markup: &str) -> Result<(), DomError> {
        container
            .insert_adjacent_html("beforeend", markup)
            .map_err(DomError::js("insertAdjacentHTML"))
    }

    fn clear(&self, container: &Element) {
        container.set_inner_html("");
    }

    fn attach_style(&self, css: &str) -> Result<Element, DomError> {
        let head = self.document.head().ok_or(DomError::MissingElement("head"))?;
        let style = self.create("style")?;
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(DomError::js("appendChild"))?;
        Ok(style)
    }

    fn attach_script(&self, source: &str) -> Result<Element, DomError> {
        let body = self.document.body().ok_or(DomError::MissingElement("body"))?;
        let script = self.create("script")?;
        script.set_text_content(Some(source));
        body.append_child(&script).map_err(DomError::js("appendChild"))?;
        Ok(script)
    }

    fn attach_frame(&self, container: &Element, srcdoc: &str) -> Result<Element, DomError> {
        let frame = self.create("iframe")?;
        frame
            .set_attribute("sandbox", WidgetConfig::SANDBOX_FLAGS)
            .map_err(DomError::js("setAttribute"))?;
        frame
            .set_attribute("class", WIDGET_FRAME)
            .map_err(DomError::js("setAttribute"))?;
        frame
            .set_attribute("srcdoc", srcdoc)
            .map_err(DomError::js("setAttribute"))?;
        container
            .append_child(&frame)
            .map_err(DomError::js("appendChild"))?;
        Ok(frame)
    }

    fn detach(&self, node: &Element) {
        node.remove();
    }

    fn forms(&self, container: &Element) -> Vec<Element> {
        let Ok(list) = container.query_selector_all("form") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn on_submit(&self, target: &Element, handler: SubmitHandler) -> Result<EventListener, DomError> {
        if let Some(frame) = target.dyn_ref::<HtmlIFrameElement>() {
            return listen_frame(frame.clone(), handler);
        }

        let form = target
            .dyn_ref::<HtmlFormElement>()
            .cloned()
            .ok_or_else(|| DomError::Js {
                op: "addEventListener",
                message: format!("<{}> is not a form", target.tag_name().to_lowercase()),
            })?;

        let options = EventListenerOptions::enable_prevent_default();
        let event_target = form.clone();
        Ok(EventListener::new_with_options(
            &event_target,
            "submit",
            options,
            move |event| {
                event.prevent_default();
                match read_form(&form) {
                    Ok(entries) => handler(entries),
                    Err(err) => tracing::warn!(error = %err, "could not read submitted form"),
                }
            },
        ))
    }

    fn set_submit_control(&self, target: &Element, control: SubmitControl) {
        if let Some(frame) = target.dyn_ref::<HtmlIFrameElement>() {
            post_control(frame, control);
            return;
        }

        let button = target
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if let Some(button) = button {
            button.set_disabled(control.disabled());
            button.set_text_content(Some(control.label()));
        }
    }
}

/// Entries of `form` in document order; file inputs contribute their file name
fn read_form(form: &HtmlFormElement) -> Result<FormEntries, DomError> {
    let data = FormData::new_with_form(form).map_err(DomError::js("FormData"))?;
    let iter = js_sys::try_iter(&data)
        .map_err(DomError::js("FormData.entries"))?
        .ok_or_else(|| DomError::Js {
            op: "FormData.entries",
            message: "FormData is not iterable".to_string(),
        })?;

    let mut entries = FormEntries::new();
    for item in iter {
        let pair: js_sys::Array = item.map_err(DomError::js("FormData.entries"))?.unchecked_into();
        let name = pair.get(0).as_string().unwrap_or_default();
        let value = pair.get(1);
        let value = value
            .as_string()
            .or_else(|| value.dyn_ref::<File>().map(File::name))
            .unwrap_or_default();
        entries.push(name, value);
    }
    Ok(entries)
}

fn listen_frame(frame: HtmlIFrameElement, handler: SubmitHandler) -> Result<EventListener, DomError> {
    let window = web_sys::window().ok_or(DomError::Unavailable)?;
    Ok(EventListener::new(&window, "message", move |event| {
        let Some(event) = event.dyn_ref::<MessageEvent>() else {
            return;
        };
        // Only the widget's own frame may submit on its behalf
        let from_frame = match (event.source(), frame.content_window()) {
            (Some(source), Some(own)) => js_sys::Object::is(&source, &own),
            _ => false,
        };
        if !from_frame {
            return;
        }

        match serde_wasm_bindgen::from_value::<BridgeMessage>(event.data()) {
            Ok(BridgeMessage::Submit { entries }) => handler(entries),
            Ok(BridgeMessage::Control { .. }) => {}
            Err(err) => tracing::debug!(error = %err, "ignoring malformed frame message"),
        }
    }))
}

fn post_control(frame: &HtmlIFrameElement, control: SubmitControl) {
    let Some(target) = frame.content_window() else {
        return;
    };
    let message = BridgeMessage::from(control);
    match serde_wasm_bindgen::to_value(&message) {
        Ok(value) => {
            // The frame's origin is opaque, so it cannot be named here
            if let Err(err) = target.post_message(&value, "*") {
                tracing::warn!(error = ?err, "failed to post control state to widget frame");
            }
        }
        Err(err) => tracing::warn!(error = %err, "failed to encode control state"),
    }
}
