use yew::prelude::*;

pub const HEADER_LINKS: &[(&str, &str)] = &[
    ("#products", "Shop"),
    ("#plans", "Plans"),
    ("#ai", "Smart AI"),
];

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub scrolled: bool,
    /// Receives the click and the link's href.
    pub on_navigate: Callback<(MouseEvent, String)>,
}

pub fn scroll_link(on_navigate: &Callback<(MouseEvent, String)>, href: &str) -> Callback<MouseEvent> {
    let on_navigate = on_navigate.clone();
    let href = href.to_string();
    Callback::from(move |e: MouseEvent| on_navigate.emit((e, href.clone())))
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let menu_class = if *menu_open {
        "nav-links mobile-menu-open"
    } else {
        "nav-links"
    };

    html! {
        <header class={classes!("app-header", props.scrolled.then(|| "scrolled"))}>
            <a href="#" class="nav-logo scroll-link" onclick={scroll_link(&props.on_navigate, "#")}>
                {"Allin Order"}
            </a>
            <button class="burger-menu" onclick={toggle_menu} aria-label="Menu">
                <span></span>
                <span></span>
                <span></span>
            </button>
            <nav class={menu_class}>
                { for HEADER_LINKS.iter().map(|(href, label)| {
                    let navigate = scroll_link(&props.on_navigate, href);
                    let onclick = {
                        let menu_open = menu_open.clone();
                        Callback::from(move |e: MouseEvent| {
                            menu_open.set(false);
                            navigate.emit(e);
                        })
                    };
                    html! {
                        <a href={*href} class="nav-link scroll-link" {onclick}>{ *label }</a>
                    }
                }) }
            </nav>
        </header>
    }
}
