use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::{TICKER_FADE_MS, TICKER_INTERVAL_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerState {
    pub index: usize,
    pub len: usize,
    pub fading: bool,
}

pub enum TickerAction {
    FadeOut,
    Advance,
}

impl Reducible for TickerState {
    type Action = TickerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            TickerAction::FadeOut => Rc::new(TickerState { fading: true, ..*self }),
            TickerAction::Advance => {
                let index = if self.len == 0 { 0 } else { (self.index + 1) % self.len };
                Rc::new(TickerState { index, fading: false, ..*self })
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TickerProps {
    pub phrases: Vec<String>,
}

/// Cross-fades through the AI suggestion phrases.
#[function_component(Ticker)]
pub fn ticker(props: &TickerProps) -> Html {
    let len = props.phrases.len();
    let state = use_reducer(move || TickerState { index: 0, len, fading: false });

    {
        let state = state.clone();
        use_interval(
            move || {
                state.dispatch(TickerAction::FadeOut);
                let state = state.clone();
                Timeout::new(TICKER_FADE_MS, move || state.dispatch(TickerAction::Advance)).forget();
            },
            if len > 1 { TICKER_INTERVAL_MS } else { 0 },
        );
    }

    let phrase = props.phrases.get(state.index).cloned().unwrap_or_default();
    let opacity = if state.fading { "0" } else { "1" };

    html! {
        <div class="auto-text-cycle">
            <p style={format!("opacity: {};", opacity)}>{ phrase }</p>
        </div>
    }
}
