use crate::components::{IconBot, Markdown};
use crate::hooks::use_streamable_text;
use crate::styles::{
    AVATAR_BASE, BOT_AVATAR, BOT_BODY_PADDING, CARD_BODY, MESSAGE_BODY, MESSAGE_ROW,
};
use crate::types::MessageContent;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct BotMessageProps {
    pub content: MessageContent,
    #[prop_or_default]
    pub class: Classes,
}

/// Bot reply rendered as markdown, following the stream while it grows
#[function_component(BotMessage)]
pub fn bot_message(props: &BotMessageProps) -> Html {
    let BotMessageProps { content, class } = props;
    let text = use_streamable_text(content);

    html! {
        <div class={classes!(MESSAGE_ROW, class.clone())}>
            <div class={classes!(AVATAR_BASE, BOT_AVATAR)}>
                <IconBot />
            </div>
            <div class={classes!(MESSAGE_BODY, BOT_BODY_PADDING)}>
                <Markdown source={text} />
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct BotCardProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or(true)]
    pub show_avatar: bool,
}

/// Bot row with arbitrary content; a hidden avatar still reserves its space
#[function_component(BotCard)]
pub fn bot_card(props: &BotCardProps) -> Html {
    let avatar_visibility = (!props.show_avatar).then_some("invisible");

    html! {
        <div class={MESSAGE_ROW}>
            <div class={classes!(AVATAR_BASE, BOT_AVATAR, avatar_visibility)}>
                <IconBot />
            </div>
            <div class={CARD_BODY}>
                {props.children.clone()}
            </div>
        </div>
    }
}
