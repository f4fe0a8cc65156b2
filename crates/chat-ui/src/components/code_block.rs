use crate::config::MarkdownConfig;
use crate::error::DomError;
use crate::styles::{CODE_BLOCK, CODE_BLOCK_BODY, CODE_BLOCK_HEADER, GHOST_BUTTON};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct CodeBlockProps {
    #[prop_or_default]
    pub language: AttrValue,
    pub value: AttrValue,
}

async fn write_clipboard(text: &str) -> Result<(), DomError> {
    let window = web_sys::window().ok_or(DomError::Unavailable)?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(drop)
        .map_err(DomError::js("clipboard.writeText"))
}

/// Fenced code with a language label and a copy button
#[function_component(CodeBlock)]
pub fn code_block(props: &CodeBlockProps) -> Html {
    let CodeBlockProps { language, value } = props;

    let copied = use_state(|| false);
    let reset = use_mut_ref(|| None::<Timeout>);

    let on_copy = {
        let copied = copied.clone();
        let value = value.clone();
        Callback::from(move |_: MouseEvent| {
            let copied = copied.clone();
            let reset = reset.clone();
            let value = value.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match write_clipboard(&value).await {
                    Ok(()) => {
                        copied.set(true);
                        // Replacing the handle cancels an earlier reset
                        *reset.borrow_mut() = Some(Timeout::new(
                            MarkdownConfig::COPY_RESET_MS,
                            move || copied.set(false),
                        ));
                    }
                    Err(err) => tracing::warn!(error = %err, "copy to clipboard failed"),
                }
            });
        })
    };

    let label = if language.is_empty() {
        "text"
    } else {
        language.as_str()
    };
    let code_class = (!language.is_empty()).then(|| format!("language-{language}"));

    html! {
        <div class={CODE_BLOCK}>
            <div class={CODE_BLOCK_HEADER}>
                <span class="text-xs lowercase">{label}</span>
                <button type="button" class={GHOST_BUTTON} onclick={on_copy}>
                    {if *copied { "Copied" } else { "Copy" }}
                </button>
            </div>
            <pre class={CODE_BLOCK_BODY}>
                <code class={classes!(code_class)}>{value.clone()}</code>
            </pre>
        </div>
    }
}
