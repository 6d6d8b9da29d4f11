use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::components::footer::Footer;
use crate::components::header::{scroll_link, Header};
use crate::components::order_modal::OrderModal;
use crate::components::plan_toggle::PlanToggle;
use crate::components::reveal::RevealOnScroll;
use crate::components::ticker::Ticker;
use crate::components::toast::{use_toast, Toast};
use crate::config::{HEADER_SHADOW_THRESHOLD, ITEM_HIGHLIGHT_MS, SCROLL_SPY_DEBOUNCE_MS};
use crate::order::builder::{OrderAction, OrderEvent, OrderSession};
use crate::order::catalog::{format_price, Catalog};
use crate::scroll::{
    active_anchor, anchor_target, header_height, scroll_target_top, section_positions, smooth_scroll_to,
    AnchorTarget, HOME_ANCHOR,
};

const CHECKOUT_MESSAGE: &str = "🎉 Subscription Confirmed! Welcome to Allin Order!";

fn set_body_overflow(value: &str) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.style().set_property("overflow", value);
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let catalog = use_memo(|_| Catalog::load(), ());
    let order = {
        let catalog = catalog.clone();
        use_reducer(move || OrderSession::new(catalog))
    };
    let modal_open = use_state(|| false);
    let highlighted = use_state(|| None::<String>);
    let highlight_timer = use_mut_ref(|| None::<Timeout>);
    let header_scrolled = use_state_eq(|| false);
    let active_nav = use_state_eq(|| HOME_ANCHOR.to_string());
    let loaded = use_state(|| false);
    let container = use_node_ref();
    let toast = use_toast();

    // Preloader fades once the window has finished loading
    {
        let loaded = loaded.clone();
        use_effect_with_deps(
            move |_| {
                let mut listener = None;
                if let Some(window) = web_sys::window() {
                    let complete = window
                        .document()
                        .map(|d| d.ready_state() == "complete")
                        .unwrap_or(true);
                    if complete {
                        loaded.set(true);
                    } else {
                        let on_load = Closure::<dyn Fn()>::new({
                            let loaded = loaded.clone();
                            move || loaded.set(true)
                        });
                        if window
                            .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
                            .is_ok()
                        {
                            listener = Some((window, on_load));
                        }
                    }
                }

                move || {
                    if let Some((window, on_load)) = listener {
                        let _ = window.remove_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    // Header shadow and debounced scroll spy on the app container
    {
        let container = container.clone();
        let header_scrolled = header_scrolled.clone();
        let active_nav = active_nav.clone();
        use_effect_with_deps(
            move |_| {
                let spy_timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
                let mut listener = None;

                if let Some(element) = container.cast::<Element>() {
                    let on_scroll = Closure::<dyn Fn()>::new({
                        let element = element.clone();
                        let spy_timer = spy_timer.clone();
                        move || {
                            header_scrolled.set(element.scroll_top() > HEADER_SHADOW_THRESHOLD);

                            let element = element.clone();
                            let active_nav = active_nav.clone();
                            let timeout = Timeout::new(SCROLL_SPY_DEBOUNCE_MS, move || {
                                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                                    let sections = section_positions(&document);
                                    let anchor = active_anchor(element.scroll_top(), header_height(&document), &sections);
                                    if let Some(anchor) = anchor {
                                        active_nav.set(anchor);
                                    }
                                }
                            });
                            // Replacing the pending timeout cancels it
                            *spy_timer.borrow_mut() = Some(timeout);
                        }
                    });
                    if element
                        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
                        .is_ok()
                    {
                        listener = Some((element, on_scroll));
                    }
                }

                move || {
                    if let Some((element, on_scroll)) = listener {
                        let _ = element.remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                    }
                    spy_timer.borrow_mut().take();
                }
            },
            (),
        );
    }

    use_effect_with_deps(
        |open: &bool| {
            set_body_overflow(if *open { "hidden" } else { "" });
            || ()
        },
        *modal_open,
    );

    // Side effects of the latest dispatch, once per revision
    {
        let session = order.clone();
        let modal_open = modal_open.clone();
        let toast = toast.clone();
        let highlighted = highlighted.clone();
        let highlight_timer = highlight_timer.clone();
        use_effect_with_deps(
            move |_| {
                match session.last_event.clone() {
                    Some(OrderEvent::Confirmed(_)) => {
                        modal_open.set(false);
                        toast.show(CHECKOUT_MESSAGE);
                    }
                    Some(OrderEvent::Merged(name)) => {
                        highlighted.set(Some(name));
                        let highlighted = highlighted.clone();
                        let timeout = Timeout::new(ITEM_HIGHLIGHT_MS, move || highlighted.set(None));
                        *highlight_timer.borrow_mut() = Some(timeout);
                    }
                    None => {}
                }
                || ()
            },
            order.revision,
        );
    }

    let dispatch = {
        let order = order.clone();
        Callback::from(move |action: OrderAction| order.dispatch(action))
    };

    let open_order = {
        let dispatch = dispatch.clone();
        let modal_open = modal_open.clone();
        Callback::from(move |(plan_name, ai_build): (Option<String>, bool)| {
            dispatch.emit(OrderAction::Prepare { plan_name, ai_build });
            modal_open.set(true);
            info!("Opened order modal");
        })
    };

    let close_order = {
        let dispatch = dispatch.clone();
        let modal_open = modal_open.clone();
        Callback::from(move |_: ()| {
            modal_open.set(false);
            dispatch.emit(OrderAction::Reset);
            info!("Closed order modal");
        })
    };

    let quick_add = {
        let dispatch = dispatch.clone();
        let toast = toast.clone();
        Callback::from(move |name: String| {
            toast.show(format!("{} added to pack!", name));
            dispatch.emit(OrderAction::AddItem { name, quantity: 1, merge: true });
        })
    };

    let on_navigate = {
        let container = container.clone();
        let active_nav = active_nav.clone();
        Callback::from(move |(e, href): (MouseEvent, String)| {
            let Some(element) = container.cast::<Element>() else {
                return;
            };
            match anchor_target(&href) {
                AnchorTarget::Section(id) => {
                    e.prevent_default();
                    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                        return;
                    };
                    let target = document
                        .get_element_by_id(id)
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                    if let Some(target) = target {
                        smooth_scroll_to(&element, scroll_target_top(target.offset_top(), header_height(&document)));
                        active_nav.set(href.clone());
                    }
                }
                AnchorTarget::Top => {
                    e.prevent_default();
                    smooth_scroll_to(&element, 0);
                }
                AnchorTarget::External => {}
            }
        })
    };

    let open_with = |plan_name: Option<&str>, ai_build: bool| {
        let open_order = open_order.clone();
        let plan_name = plan_name.map(str::to_string);
        Callback::from(move |_: MouseEvent| open_order.emit((plan_name.clone(), ai_build)))
    };

    let choose_plan = {
        let open_order = open_order.clone();
        Callback::from(move |name: String| open_order.emit((Some(name), false)))
    };

    let today = Local::now().date_naive();

    html! {
        <>
            <style>{ LANDING_CSS }</style>
            <div id="preloader" class={classes!("preloader", (*loaded).then(|| "loaded"))}>
                <div class="preloader-spinner"></div>
            </div>
            <div class="app-container" ref={container.clone()}>
                <Header scrolled={*header_scrolled} on_navigate={on_navigate.clone()} />

                <section id="hero" class="hero">
                    <RevealOnScroll root={container.clone()}>
                        <h1>{"Fresh essentials, on repeat."}</h1>
                        <p class="hero-subtitle">
                            {"Milk, eggs, bread and the rest of your weekly basics, packed and delivered on your schedule."}
                        </p>
                    </RevealOnScroll>
                    <RevealOnScroll root={container.clone()} delay_ms={Some(150)} class={classes!("hero-cta-group")}>
                        <button class="cta-button" onclick={open_with(None, false)}>{"Build Your Pack"}</button>
                        <a href="#plans" class="secondary-link scroll-link" onclick={scroll_link(&on_navigate, "#plans")}>
                            {"See plans"}
                        </a>
                    </RevealOnScroll>
                </section>

                <section id="products" class="products">
                    <h2>{"Pick your essentials"}</h2>
                    <div class="product-grid">
                        { for catalog.products().iter().enumerate().map(|(i, product)| {
                            let onclick = {
                                let quick_add = quick_add.clone();
                                let product = product.clone();
                                Callback::from(move |_: MouseEvent| quick_add.emit(product.clone()))
                            };
                            html! {
                                <RevealOnScroll root={container.clone()} delay_ms={Some((i as u32 % 4) * 100)} class={classes!("product-card")}>
                                    <h3>{ product.clone() }</h3>
                                    <p class="product-price">{ format_price(catalog.unit_price(product)) }</p>
                                    <button class="add-to-pack" {onclick}>{"Add to pack"}</button>
                                </RevealOnScroll>
                            }
                        }) }
                    </div>
                </section>

                <section id="plans" class="plans">
                    <h2>{"Choose a plan"}</h2>
                    <RevealOnScroll root={container.clone()}>
                        <PlanToggle catalog={catalog.clone()} on_choose={choose_plan} />
                    </RevealOnScroll>
                </section>

                <section id="ai" class="smart-ai">
                    <h2>{"Let the pack build itself"}</h2>
                    <RevealOnScroll root={container.clone()}>
                        <Ticker phrases={catalog.phrases().to_vec()} />
                        <button class="cta-button ai-build" onclick={open_with(None, true)}>
                            {"✨ Build my pack with AI"}
                        </button>
                    </RevealOnScroll>
                </section>

                <Footer active={(*active_nav).clone()} on_navigate={on_navigate} />
            </div>

            <OrderModal
                builder={order.builder.clone()}
                open={*modal_open}
                today={today}
                highlighted={(*highlighted).clone()}
                on_action={dispatch}
                on_close={close_order}
            />
            <Toast state={toast.state()} />
        </>
    }
}

const LANDING_CSS: &str = r#"
    :root {
        --primary-green: #2e7d32;
        --butter-yellow: #fff3b0;
        --ink: #1d2320;
        --paper: #fbfaf6;
    }
    body {
        margin: 0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        color: var(--ink);
        background: var(--paper);
    }
    .preloader {
        position: fixed;
        inset: 0;
        display: flex;
        align-items: center;
        justify-content: center;
        background: var(--paper);
        z-index: 100;
        transition: opacity 0.4s ease, visibility 0.4s ease;
    }
    .preloader.loaded {
        opacity: 0;
        visibility: hidden;
    }
    .preloader-spinner {
        width: 48px;
        height: 48px;
        border-radius: 50%;
        border: 4px solid rgba(46, 125, 50, 0.2);
        border-top-color: var(--primary-green);
        animation: spin 0.8s linear infinite;
    }
    @keyframes spin {
        to { transform: rotate(360deg); }
    }
    .app-container {
        position: relative;
        height: 100vh;
        overflow-y: auto;
    }
    .app-header {
        position: sticky;
        top: 0;
        z-index: 10;
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 1rem 1.5rem;
        background: var(--paper);
        transition: box-shadow 0.2s ease;
    }
    .app-header.scrolled {
        box-shadow: 0 2px 12px rgba(0, 0, 0, 0.08);
    }
    .nav-logo {
        font-weight: 700;
        color: var(--primary-green);
        text-decoration: none;
    }
    .nav-links a {
        margin-left: 1.25rem;
        color: var(--ink);
        text-decoration: none;
    }
    .burger-menu {
        display: none;
        background: none;
        border: none;
    }
    .burger-menu span {
        display: block;
        width: 22px;
        height: 2px;
        margin: 4px 0;
        background: var(--ink);
    }
    section {
        padding: 4rem 1.5rem;
        max-width: 960px;
        margin: 0 auto;
    }
    .hero h1 {
        font-size: 2.6rem;
        margin-bottom: 0.5rem;
    }
    .cta-button {
        padding: 0.8rem 1.6rem;
        border: none;
        border-radius: 999px;
        background: var(--primary-green);
        color: white;
        font-size: 1rem;
        cursor: pointer;
    }
    .product-grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
        gap: 1rem;
    }
    .product-card, .plan-card {
        padding: 1.25rem;
        border-radius: 16px;
        background: white;
        box-shadow: 0 4px 16px rgba(0, 0, 0, 0.05);
    }
    .toggle-switch {
        position: relative;
        display: flex;
        max-width: 360px;
        margin-bottom: 1.5rem;
        padding: 5px;
        border-radius: 999px;
        background: #eceae3;
    }
    .toggle-indicator {
        position: absolute;
        top: 5px;
        bottom: 5px;
        left: 0;
        border-radius: 999px;
        background: white;
        transition: transform 0.3s ease;
    }
    .toggle-btn {
        position: relative;
        flex: 1;
        padding: 0.5rem;
        border: none;
        background: none;
        cursor: pointer;
    }
    .toggle-btn.active {
        font-weight: 700;
    }
    .plan-cards-container {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
        gap: 1rem;
    }
    .plan-card {
        animation: fadeInPlan 0.3s ease forwards;
    }
    .plan-card.fading-out {
        pointer-events: none;
        animation: fadeOutPlan 0.3s ease forwards;
    }
    @keyframes fadeInPlan {
        from { opacity: 0; transform: translateY(10px); }
        to { opacity: 1; transform: translateY(0); }
    }
    @keyframes fadeOutPlan {
        from { opacity: 1; transform: translateY(0); }
        to { opacity: 0; transform: translateY(10px); }
    }
    .auto-text-cycle p {
        font-size: 1.3rem;
        min-height: 1.8rem;
        transition: opacity 0.3s ease;
    }
    .reveal-on-scroll {
        opacity: 0;
        transform: translateY(20px);
        transition: opacity 0.6s ease, transform 0.6s ease;
    }
    .reveal-on-scroll.visible {
        opacity: 1;
        transform: none;
    }
    .modal-overlay {
        position: fixed;
        inset: 0;
        background: rgba(0, 0, 0, 0.4);
        opacity: 0;
        pointer-events: none;
        transition: opacity 0.2s ease;
        z-index: 40;
    }
    .modal-overlay.active {
        opacity: 1;
        pointer-events: auto;
    }
    .modal {
        position: fixed;
        left: 50%;
        top: 50%;
        width: min(520px, 92vw);
        max-height: 88vh;
        overflow-y: auto;
        padding: 1.5rem;
        border-radius: 20px;
        background: white;
        transform: translate(-50%, -45%);
        opacity: 0;
        pointer-events: none;
        transition: opacity 0.2s ease, transform 0.2s ease;
        z-index: 50;
    }
    .modal.active {
        transform: translate(-50%, -50%);
        opacity: 1;
        pointer-events: auto;
    }
    .modal-header {
        display: flex;
        justify-content: space-between;
        align-items: center;
    }
    .close-modal-btn, .remove-item {
        border: none;
        background: none;
        font-size: 1.4rem;
        cursor: pointer;
    }
    .step-indicator {
        display: flex;
        gap: 1rem;
        padding: 0;
        list-style: none;
        color: #999;
    }
    .step-indicator .active, .step-indicator .done {
        color: var(--primary-green);
        font-weight: 600;
    }
    .modal-step {
        display: none;
    }
    .modal-step.active-step {
        display: block;
    }
    .selected-items-list {
        padding: 0;
        list-style: none;
    }
    .selected-items-list li {
        display: flex;
        justify-content: space-between;
        align-items: center;
        padding: 0.5rem 0;
        border-bottom: 1px solid #eee;
    }
    .selected-items-list li.highlight {
        animation: highlightItem 0.5s ease;
    }
    @keyframes highlightItem {
        0%, 100% { background-color: transparent; }
        50% { background-color: var(--butter-yellow); }
    }
    .item-quantity {
        width: 3.5rem;
    }
    .empty-pack-message, .ai-note {
        text-align: center;
        color: var(--primary-green);
        font-size: 0.9rem;
    }
    .add-products {
        display: flex;
        flex-wrap: wrap;
        gap: 0.4rem;
        margin: 1rem 0;
    }
    .add-product-chip {
        padding: 0.3rem 0.7rem;
        border: 1px solid var(--primary-green);
        border-radius: 999px;
        background: none;
        color: var(--primary-green);
        cursor: pointer;
    }
    .total-price {
        font-size: 1.4rem;
        font-weight: 700;
    }
    .price-frequency {
        margin-left: 0.3rem;
        color: #777;
    }
    .step-buttons {
        display: flex;
        justify-content: space-between;
        margin-top: 1rem;
    }
    .toast {
        position: fixed;
        left: 50%;
        bottom: 2rem;
        padding: 0.8rem 1.4rem;
        border-radius: 999px;
        background: var(--ink);
        color: white;
        transform: translate(-50%, 150%);
        opacity: 0;
        transition: transform 0.3s ease, opacity 0.3s ease;
        z-index: 60;
    }
    .toast.show {
        transform: translate(-50%, 0);
        opacity: 1;
    }
    .app-footer {
        padding: 2rem 1.5rem 4rem;
        text-align: center;
    }
    .footer-nav a {
        margin: 0 0.6rem;
        color: #777;
        text-decoration: none;
    }
    .footer-nav a.active {
        color: var(--primary-green);
        font-weight: 600;
    }
    .lang-btn {
        margin: 1rem 0.2rem 0;
        border: 1px solid #ccc;
        border-radius: 6px;
        background: none;
        cursor: pointer;
    }
    .lang-btn.active {
        border-color: var(--primary-green);
        color: var(--primary-green);
    }
    @media (max-width: 700px) {
        .burger-menu {
            display: block;
        }
        .nav-links {
            display: none;
        }
        .nav-links.mobile-menu-open {
            display: flex;
            flex-direction: column;
            position: absolute;
            top: 100%;
            right: 1rem;
            padding: 1rem;
            background: white;
            border-radius: 12px;
        }
    }
"#;
