use crate::components::{
    BotCard, BotMessage, Markdown, RandomComponent, SpinnerMessage, UserMessage,
};
use crate::styles::{FLEX_COL_GAP_4, STANDARD_PADDING};
use crate::types::{ChatEntry, EntryKind};
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct MessageListProps {
    pub entries: Vec<ChatEntry>,
    #[prop_or_default]
    pub class: Classes,
}

fn render_entry(entry: &ChatEntry) -> Html {
    let key = entry.id.clone();
    match &entry.kind {
        EntryKind::User(text) => html! {
            <UserMessage key={key}>{text.clone()}</UserMessage>
        },
        EntryKind::Bot(content) => html! {
            <BotMessage key={key} content={content.clone()} />
        },
        EntryKind::Card { text, show_avatar } => html! {
            <BotCard key={key} show_avatar={*show_avatar}>
                <Markdown source={text.clone()} />
            </BotCard>
        },
        EntryKind::Widget { fragment, policy } => html! {
            <BotCard key={key}>
                <RandomComponent fragment={fragment.clone()} policy={*policy} />
            </BotCard>
        },
        EntryKind::Spinner => html! {
            <SpinnerMessage key={key} />
        },
    }
}

#[function_component(MessageList)]
pub fn message_list(props: &MessageListProps) -> Html {
    let MessageListProps { entries, class } = props;

    let container_ref = use_node_ref();

    // Auto-scroll to bottom when new entries arrive
    use_effect_with(entries.len(), {
        let container_ref = container_ref.clone();
        move |_| {
            if let Some(element) = container_ref.cast::<Element>() {
                element.set_scroll_top(element.scroll_height());
            }
        }
    });

    html! {
        <div ref={container_ref} class={classes!(STANDARD_PADDING, FLEX_COL_GAP_4, "overflow-y-auto", class.clone())}>
            {for entries.iter().map(render_entry)}
        </div>
    }
}
