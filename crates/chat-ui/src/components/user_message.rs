use crate::components::IconUser;
use crate::styles::{AVATAR_BASE, MESSAGE_BODY, MESSAGE_ROW, USER_AVATAR, USER_BODY_PADDING};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct UserMessageProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(UserMessage)]
pub fn user_message(props: &UserMessageProps) -> Html {
    html! {
        <div class={MESSAGE_ROW}>
            <div class={classes!(AVATAR_BASE, USER_AVATAR)}>
                <IconUser />
            </div>
            <div class={classes!(MESSAGE_BODY, USER_BODY_PADDING)}>
                {props.children.clone()}
            </div>
        </div>
    }
}
