use async_trait::async_trait;
use genui_chat_ui::{
    ActionError, ActionsHandle, ChatActions, ChatEntry, ChatProvider, FormEntries, Fragment,
    MessageList, ScriptPolicy, StreamableText, use_chat,
};
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;
use web_sys::window;
use yew::prelude::*;

const STREAMED_REPLY: &str = "Here is a quote widget for **AAPL**.\n\n\
Fill in a quantity and submit, the reply lands below.\n\n\
```rust\nlet order = Order::buy(\"AAPL\", 10);\n```\n";

/// Echoes submitted fields back after a short delay; an empty quantity fails
struct DemoActions;

#[async_trait(?Send)]
impl ChatActions for DemoActions {
    async fn submit_user_message(&self, entries: FormEntries) -> Result<ChatEntry, ActionError> {
        TimeoutFuture::new(800).await;

        if entries.get("quantity").is_some_and(str::is_empty) {
            return Err(ActionError::new("quantity is required"));
        }

        let fields = entries
            .iter()
            .map(|(name, value)| format!("- `{name}`: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(ChatEntry::bot(format!("Order received:\n\n{fields}")))
    }
}

fn quote_widget() -> Fragment {
    Fragment::new(
        r#"<form class="quote">
  <label>Ticker <input name="ticker" value="AAPL" readonly></label>
  <label>Quantity <input name="quantity" type="number" min="1"></label>
  <button type="submit">Buy</button>
</form>"#,
        ".quote { display: flex; gap: .75rem; align-items: end; font-family: sans-serif; }",
        "document.querySelector('input[name=quantity]').focus();",
    )
}

#[function_component(Conversation)]
fn conversation() -> Html {
    let Some(chat) = use_chat() else {
        return html! {};
    };

    html! {
        <MessageList entries={chat.entries().to_vec()} class="max-w-2xl mx-auto" />
    }
}

#[function_component(App)]
fn app() -> Html {
    let stream = use_memo((), |_| StreamableText::new());
    let actions = use_memo((), |_| ActionsHandle::new(DemoActions));

    // Feed the reply a few characters at a time
    use_effect_with((), {
        let stream = (*stream).clone();
        move |_| {
            let mut remaining = STREAMED_REPLY.chars().collect::<Vec<_>>().into_iter();
            let interval = Interval::new(40, move || {
                let chunk: String = remaining.by_ref().take(4).collect();
                if chunk.is_empty() {
                    stream.done();
                } else if let Err(err) = stream.append(&chunk) {
                    tracing::debug!(error = %err, "stream already finished");
                }
            });
            move || drop(interval)
        }
    });

    let initial = vec![
        ChatEntry::user("Show me a quote for AAPL"),
        ChatEntry::bot((*stream).clone()),
        ChatEntry::widget(quote_widget(), ScriptPolicy::Sandboxed),
        ChatEntry::card("Inline widgets run with `ScriptPolicy::Trusted`; the one above is sandboxed."),
        ChatEntry::spinner(),
    ];

    let toggle_dark_mode = Callback::from(|_: MouseEvent| {
        if let Some(element) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = element.class_list().toggle("dark");
        }
    });

    html! {
        <div class="min-h-screen py-8">
            <div class="max-w-2xl mx-auto flex justify-end px-4">
                <button class="text-sm px-3 py-1 rounded border" onclick={toggle_dark_mode}>
                    {"Toggle dark mode"}
                </button>
            </div>
            <ChatProvider actions={(*actions).clone()} initial={initial}>
                <Conversation />
            </ChatProvider>
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
