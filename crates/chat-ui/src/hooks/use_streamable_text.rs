use crate::types::MessageContent;
use yew::prelude::*;

/// Current text of `content`, re-rendering the caller whenever a stream grows
#[hook]
pub fn use_streamable_text(content: &MessageContent) -> String {
    let force_update = use_force_update();
    let text = content.snapshot();

    use_effect_with(content.clone(), {
        let rendered = text.clone();
        move |content| {
            let subscription = match content {
                MessageContent::Stream(stream) => {
                    let subscription = (!stream.is_done()).then(|| {
                        let force_update = force_update.clone();
                        stream.subscribe(Callback::from(move |()| force_update.force_update()))
                    });
                    // Catch deltas that landed between render and subscribe
                    if stream.snapshot() != rendered {
                        force_update.force_update();
                    }
                    subscription
                }
                MessageContent::Text(_) => None,
            };
            move || drop(subscription)
        }
    });

    text
}
