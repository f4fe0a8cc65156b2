use crate::components::CodeBlock;
use crate::config::MarkdownConfig;
use crate::styles::MARKDOWN_PROSE;
use crate::utils::markdown::parse_markdown;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::create_portal;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct MarkdownProps {
    pub source: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Slot elements under `root`, in document order
fn code_block_slots(root: &NodeRef) -> Vec<Element> {
    let Some(root) = root.cast::<Element>() else {
        return Vec::new();
    };
    let selector = format!("[{}]", MarkdownConfig::CODE_BLOCK_SLOT);
    match root.query_selector_all(&selector) {
        Ok(nodes) => (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(err) => {
            tracing::warn!(error = ?err, "code block slots could not be queried");
            Vec::new()
        }
    }
}

/// Rendered markdown; re-renders only when `source` changes.
///
/// The document is inserted as one piece of html and each code block is
/// portalled into its slot once the html is committed.
#[function_component(Markdown)]
pub fn markdown(props: &MarkdownProps) -> Html {
    let rendered = use_memo(props.source.clone(), |source| parse_markdown(source));
    let root = use_node_ref();
    let slots = use_state_eq(Vec::<Element>::new);

    {
        let root = root.clone();
        let slots = slots.clone();
        use_effect_with(rendered.clone(), move |_| {
            slots.set(code_block_slots(&root));
        });
    }

    let blocks = slots
        .iter()
        .zip(rendered.code_blocks.iter())
        .map(|(slot, block)| {
            create_portal(
                html! {
                    <CodeBlock
                        language={block.language.clone()}
                        value={block.code.clone()}
                    />
                },
                slot.clone(),
            )
        });

    html! {
        <div ref={root} class={classes!(MARKDOWN_PROSE, props.class.clone())}>
            {Html::from_html_unchecked(AttrValue::from(rendered.html.clone()))}
            {for blocks}
        </div>
    }
}
