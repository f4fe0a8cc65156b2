use crate::config::WidgetConfig;
use crate::dom::WebDocument;
use crate::store::use_chat;
use crate::styles::{ERROR_BG, ERROR_TEXT, NOTICE_PADDING, WARNING_BG, WARNING_TEXT, WIDGET_CONTAINER};
use crate::types::{Fragment, ScriptPolicy, next_id};
use crate::widget::{MountPoll, MountState, WidgetMount};
use futures::future::LocalBoxFuture;
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct RandomComponentProps {
    pub fragment: Fragment,
    #[prop_or_default]
    pub policy: ScriptPolicy,
    #[prop_or(WidgetConfig::POLL_INTERVAL_MS)]
    pub poll_interval_ms: u32,
    #[prop_or(WidgetConfig::MOUNT_TIMEOUT_MS)]
    pub mount_timeout_ms: u32,
    #[prop_or_default]
    pub on_state_change: Option<Callback<MountState>>,
}

fn spawn_local(future: LocalBoxFuture<'static, ()>) {
    wasm_bindgen_futures::spawn_local(future);
}

/// Mounts a generated html/css/js fragment into its own placeholder.
///
/// Forms inside the fragment submit through the surrounding [`ChatProvider`]'s
/// actions. Everything the widget adds is removed on unmount or when the
/// fragment or policy changes.
///
/// [`ChatProvider`]: crate::store::ChatProvider
#[function_component(RandomComponent)]
pub fn random_component(props: &RandomComponentProps) -> Html {
    let container_id = use_memo((), |_| next_id(WidgetConfig::CONTAINER_ID_PREFIX));
    let state = use_state(MountState::default);
    let chat = use_chat();

    {
        let container_id = container_id.clone();
        let state = state.clone();
        let on_state_change = props.on_state_change.clone();
        let deps = (
            props.fragment.clone(),
            props.policy,
            props.poll_interval_ms,
            props.mount_timeout_ms,
        );
        use_effect_with(deps, move |(fragment, policy, interval_ms, timeout_ms)| {
            let report = Rc::new(move |next: MountState| {
                if let Some(callback) = &on_state_change {
                    callback.emit(next.clone());
                }
                state.set(next);
            });

            let mount = match WebDocument::new() {
                Ok(port) => {
                    let mount = WidgetMount::new(
                        port,
                        container_id.as_str(),
                        fragment.clone(),
                        *policy,
                        MountPoll::new(*interval_ms, *timeout_ms),
                        spawn_local,
                    );
                    let mount = match &chat {
                        Some(chat) => mount.with_chat(chat.actions.clone(), chat.appender()),
                        None => mount,
                    };
                    Some(Rc::new(RefCell::new(mount)))
                }
                Err(err) => {
                    report(MountState::Failed(err.to_string()));
                    None
                }
            };

            let ticker: Rc<RefCell<Option<Interval>>> = Rc::default();
            if let Some(mount) = &mount {
                // The committed render is the ready signal; poll only if it is not there yet
                let first = mount.borrow_mut().step();
                if first == MountState::Waiting {
                    let mount = mount.clone();
                    let report = report.clone();
                    let slot = ticker.clone();
                    *ticker.borrow_mut() = Some(Interval::new(*interval_ms, move || {
                        let next = mount.borrow_mut().step();
                        if next != MountState::Waiting {
                            report(next);
                            let finished = slot.borrow_mut().take();
                            drop(finished);
                        }
                    }));
                } else {
                    report(first);
                }
            }

            move || {
                ticker.borrow_mut().take();
                // Dropping the last handle tears the widget down
                drop(mount);
            }
        });
    }

    let notice = state.notice().map(|text| {
        let colors = match *state {
            MountState::TimedOut => classes!(WARNING_BG, WARNING_TEXT),
            _ => classes!(ERROR_BG, ERROR_TEXT),
        };
        html! {
            <div role="alert" class={classes!(NOTICE_PADDING, colors)}>{text}</div>
        }
    });

    html! {
        <div class={WIDGET_CONTAINER}>
            <div id={(*container_id).clone()}></div>
            {for notice}
        </div>
    }
}
