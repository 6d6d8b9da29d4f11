use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::PLAN_FADE_MS;
use crate::order::catalog::{format_price, Catalog, PlanKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanCategory {
    Weekly,
    Monthly,
    Custom,
}

impl PlanCategory {
    pub const ALL: [PlanCategory; 3] = [PlanCategory::Weekly, PlanCategory::Monthly, PlanCategory::Custom];

    pub fn label(self) -> &'static str {
        match self {
            PlanCategory::Weekly => "Weekly",
            PlanCategory::Monthly => "Monthly",
            PlanCategory::Custom => "Custom",
        }
    }

    fn index(self) -> usize {
        match self {
            PlanCategory::Weekly => 0,
            PlanCategory::Monthly => 1,
            PlanCategory::Custom => 2,
        }
    }

    pub fn card_class(self) -> &'static str {
        match self {
            PlanCategory::Weekly => "weekly-plan",
            PlanCategory::Monthly => "monthly-plan",
            PlanCategory::Custom => "custom-plan",
        }
    }
}

pub struct PlanCard {
    pub name: &'static str,
    pub category: PlanCategory,
    pub kind: PlanKind,
    pub blurb: &'static str,
}

pub const PLAN_CARDS: &[PlanCard] = &[
    PlanCard { name: "Basic Pack", category: PlanCategory::Weekly, kind: PlanKind::Basic, blurb: "Milk, eggs and bread every week." },
    PlanCard { name: "Family Pack", category: PlanCategory::Weekly, kind: PlanKind::Family, blurb: "Double the essentials plus butter and cottage cheese." },
    PlanCard { name: "Basic Pack Monthly", category: PlanCategory::Monthly, kind: PlanKind::Basic, blurb: "The basics, once a month." },
    PlanCard { name: "Family Pack Monthly", category: PlanCategory::Monthly, kind: PlanKind::Family, blurb: "Stock the fridge for the whole month." },
    PlanCard { name: "Smart AI Pack", category: PlanCategory::Monthly, kind: PlanKind::SmartAi, blurb: "Picked from what you usually run out of." },
    PlanCard { name: "Custom Pack", category: PlanCategory::Custom, kind: PlanKind::Custom, blurb: "Start empty and add exactly what you need." },
];

pub fn cards_for(category: PlanCategory) -> impl Iterator<Item = &'static PlanCard> {
    PLAN_CARDS.iter().filter(move |card| card.category == category)
}

/// Cards on screen after a toggle: the active category's cards, then the
/// previous category's cards (flagged `true`) while they fade out.
pub fn visible_cards(active: PlanCategory, leaving: Option<PlanCategory>) -> Vec<(&'static PlanCard, bool)> {
    let mut cards: Vec<_> = cards_for(active).map(|card| (card, false)).collect();
    if let Some(leaving) = leaving.filter(|&leaving| leaving != active) {
        cards.extend(cards_for(leaving).map(|card| (card, true)));
    }
    cards
}

pub fn indicator_style(category: PlanCategory) -> String {
    format!(
        "width: calc(100% / {}); transform: translateX({}%);",
        PlanCategory::ALL.len(),
        category.index() * 100
    )
}

fn price_line(catalog: &Catalog, card: &PlanCard) -> String {
    if card.kind == PlanKind::Custom {
        return "Pay per item".to_string();
    }
    let suffix = match card.category {
        PlanCategory::Monthly => "/ month",
        _ => "/ week",
    };
    format!("{} {}", format_price(catalog.pack_total(card.kind)), suffix)
}

#[derive(Properties, PartialEq)]
pub struct PlanToggleProps {
    pub catalog: Rc<Catalog>,
    /// Emits the chosen plan's name.
    pub on_choose: Callback<String>,
}

#[function_component(PlanToggle)]
pub fn plan_toggle(props: &PlanToggleProps) -> Html {
    let active = use_state(|| PlanCategory::Weekly);
    let leaving = use_state(|| None::<PlanCategory>);
    let fade_timer = use_mut_ref(|| None::<Timeout>);

    html! {
        <>
            <div class="toggle-switch">
                <span class="toggle-indicator" style={indicator_style(*active)}></span>
                { for PlanCategory::ALL.iter().map(|&category| {
                    let onclick = {
                        let active = active.clone();
                        let leaving = leaving.clone();
                        let fade_timer = fade_timer.clone();
                        Callback::from(move |_: MouseEvent| {
                            if *active == category {
                                return;
                            }
                            leaving.set(Some(*active));
                            active.set(category);
                            let leaving = leaving.clone();
                            let timeout = Timeout::new(PLAN_FADE_MS, move || leaving.set(None));
                            *fade_timer.borrow_mut() = Some(timeout);
                        })
                    };
                    html! {
                        <button class={classes!("toggle-btn", (*active == category).then(|| "active"))} {onclick}>
                            { category.label() }
                        </button>
                    }
                }) }
            </div>
            <div class="plan-cards-container">
                { for visible_cards(*active, *leaving).into_iter().map(|(card, fading)| {
                    let onclick = {
                        let on_choose = props.on_choose.clone();
                        let name = card.name.to_string();
                        Callback::from(move |_: MouseEvent| on_choose.emit(name.clone()))
                    };
                    html! {
                        <div key={card.name} class={classes!("plan-card", card.category.card_class(), fading.then(|| "fading-out"))}>
                            <h3>{ card.name }</h3>
                            <p class="plan-blurb">{ card.blurb }</p>
                            <p class="plan-price">{ price_line(&props.catalog, card) }</p>
                            <button class="cta-button" {onclick}>{"Customize & Order"}</button>
                        </div>
                    }
                }) }
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_category_has_cards() {
        for category in PlanCategory::ALL {
            assert!(cards_for(category).count() > 0);
        }
    }

    #[test]
    fn card_names_resolve_to_their_kind() {
        for card in PLAN_CARDS {
            assert_eq!(PlanKind::from_plan_name(card.name), Some(card.kind), "{}", card.name);
        }
    }

    #[test]
    fn indicator_slides_under_active_button() {
        assert_eq!(
            indicator_style(PlanCategory::Custom),
            "width: calc(100% / 3); transform: translateX(200%);"
        );
    }

    #[test]
    fn card_prices_come_from_seed_totals() {
        let catalog = Catalog::load();
        assert_eq!(price_line(&catalog, &PLAN_CARDS[0]), "$10.30 / week");
        assert_eq!(price_line(&catalog, &PLAN_CARDS[3]), "$27.30 / month");
        assert_eq!(price_line(&catalog, &PLAN_CARDS[5]), "Pay per item");
    }

    #[test]
    fn previous_category_fades_out_after_toggle() {
        let cards = visible_cards(PlanCategory::Monthly, Some(PlanCategory::Weekly));
        let fading: Vec<_> = cards.iter().filter(|(_, fading)| *fading).map(|(card, _)| card.name).collect();
        let shown: Vec<_> = cards.iter().filter(|(_, fading)| !*fading).map(|(card, _)| card.name).collect();
        assert_eq!(fading, ["Basic Pack", "Family Pack"]);
        assert_eq!(shown, ["Basic Pack Monthly", "Family Pack Monthly", "Smart AI Pack"]);
    }

    #[test]
    fn settled_toggle_shows_only_active_cards() {
        assert!(visible_cards(PlanCategory::Custom, None).iter().all(|(_, fading)| !fading));
        assert_eq!(visible_cards(PlanCategory::Custom, Some(PlanCategory::Custom)).len(), 1);
    }
}
