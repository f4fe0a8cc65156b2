use crate::components::{IconBot, Spinner};
use crate::styles::{AVATAR_BASE, BOT_AVATAR, MESSAGE_ROW, SPINNER_BODY};
use yew::prelude::*;

/// Bot row holding only a spinner, shown while a reply is pending
#[function_component(SpinnerMessage)]
pub fn spinner_message() -> Html {
    html! {
        <div class={MESSAGE_ROW}>
            <div class={classes!(AVATAR_BASE, BOT_AVATAR)}>
                <IconBot />
            </div>
            <div class={SPINNER_BODY}>
                <Spinner />
            </div>
        </div>
    }
}
