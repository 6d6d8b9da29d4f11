use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    /// Scroll container the observer watches; the viewport when unbound.
    pub root: NodeRef,
    #[prop_or_default]
    pub delay_ms: Option<u32>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

pub fn reveal_style(delay_ms: Option<u32>, visible: bool) -> String {
    match delay_ms {
        Some(delay) if visible => format!("transition-delay: {}ms;", delay),
        _ => String::new(),
    }
}

/// Fades its children in the first time they scroll into view.
#[function_component(RevealOnScroll)]
pub fn reveal_on_scroll(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_state(|| false);

    {
        let node = node.clone();
        let root = props.root.clone();
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let mut observer_and_callback = None;

                if let Some(target) = node.cast::<Element>() {
                    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new({
                        let visible = visible.clone();
                        move |entries: Array, observer: IntersectionObserver| {
                            for entry in entries.iter() {
                                let entry: IntersectionObserverEntry = entry.unchecked_into();
                                if entry.is_intersecting() {
                                    visible.set(true);
                                    observer.unobserve(&entry.target());
                                }
                            }
                        }
                    });

                    let mut init = IntersectionObserverInit::new();
                    init.root(root.cast::<Element>().as_ref());
                    init.root_margin(REVEAL_ROOT_MARGIN);
                    init.threshold(&JsValue::from_f64(REVEAL_THRESHOLD));

                    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                        Ok(observer) => {
                            observer.observe(&target);
                            observer_and_callback = Some((observer, callback));
                        }
                        Err(_) => {
                            gloo_console::warn!("IntersectionObserver unavailable, showing content immediately");
                            visible.set(true);
                        }
                    }
                }

                move || {
                    if let Some((observer, _callback)) = observer_and_callback {
                        observer.disconnect();
                    }
                }
            },
            (),
        );
    }

    html! {
        <div
            ref={node}
            class={classes!("reveal-on-scroll", props.class.clone(), (*visible).then(|| "visible"))}
            style={reveal_style(props.delay_ms, *visible)}
        >
            { for props.children.iter() }
        </div>
    }
}
