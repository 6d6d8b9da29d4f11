use log::info;
use yew::prelude::*;

use super::header::scroll_link;

pub const FOOTER_LINKS: &[(&str, &str)] = &[
    ("#hero", "Home"),
    ("#products", "Shop"),
    ("#plans", "Plans"),
    ("#ai", "Smart AI"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Finnish,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Finnish];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Finnish => "FI",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    /// Href of the highlighted link, e.g. "#plans".
    pub active: String,
    pub on_navigate: Callback<(MouseEvent, String)>,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let language = use_state(|| Language::English);

    html! {
        <footer class="app-footer">
            <nav class="footer-nav">
                { for FOOTER_LINKS.iter().map(|(href, label)| html! {
                    <a
                        href={*href}
                        class={classes!("scroll-link", (props.active == *href).then(|| "active"))}
                        onclick={scroll_link(&props.on_navigate, href)}
                    >
                        { *label }
                    </a>
                }) }
            </nav>
            <div class="language-toggle">
                { for Language::ALL.iter().map(|&lang| {
                    let onclick = {
                        let language = language.clone();
                        Callback::from(move |_: MouseEvent| {
                            if *language != lang {
                                info!("Language set to: {}", lang.code());
                                language.set(lang);
                            }
                        })
                    };
                    html! {
                        <button class={classes!("lang-btn", (*language == lang).then(|| "active"))} {onclick}>
                            { lang.code() }
                        </button>
                    }
                }) }
            </div>
            <p class="copyright">{"© Allin Order. Fresh essentials, delivered."}</p>
        </footer>
    }
}
