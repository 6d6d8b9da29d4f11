use std::rc::Rc;

use chrono::NaiveDate;
use log::{debug, info};
use yew::functional::Reducible;

use super::cart::{Cart, CartItem, Placeholder};
use super::catalog::{format_price, Catalog, PlanKind};
use super::delivery::{format_delivery_date, Frequency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    PackSelection,
    DeliveryDetails,
    Confirmation,
}

pub const STEP_COUNT: usize = WizardStep::ALL.len();

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::PackSelection,
        WizardStep::DeliveryDetails,
        WizardStep::Confirmation,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::PackSelection => 0,
            WizardStep::DeliveryDetails => 1,
            WizardStep::Confirmation => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::PackSelection => "Your Pack",
            WizardStep::DeliveryDetails => "Delivery",
            WizardStep::Confirmation => "Confirm",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::PackSelection => Some(WizardStep::DeliveryDetails),
            WizardStep::DeliveryDetails => Some(WizardStep::Confirmation),
            WizardStep::Confirmation => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            WizardStep::PackSelection => None,
            WizardStep::DeliveryDetails => Some(WizardStep::PackSelection),
            WizardStep::Confirmation => Some(WizardStep::DeliveryDetails),
        }
    }
}

/// Where the current pack came from; drives the modal title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOrigin {
    Blank,
    Plan { name: String, kind: Option<PlanKind> },
    AiBuild,
}

impl PackOrigin {
    pub fn title(&self) -> String {
        match self {
            PackOrigin::Blank => "Build Your Pack".to_string(),
            PackOrigin::Plan { kind: Some(PlanKind::SmartAi), .. } => "Your Smart AI Pack".to_string(),
            PackOrigin::Plan { kind: Some(PlanKind::Custom), .. } => "Build Your Custom Pack".to_string(),
            PackOrigin::Plan { name, .. } => format!("Customize {}", name.replace(" Monthly", "")),
            PackOrigin::AiBuild => "Your AI Generated Pack".to_string(),
        }
    }

    pub fn ai_note(&self) -> Option<&'static str> {
        match self {
            PackOrigin::AiBuild => Some("✨ AI built this pack based on typical needs!"),
            _ => None,
        }
    }
}

/// Everything the modal shows that is computed rather than stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub total_cents: u32,
    pub item_count: usize,
    pub frequency: Frequency,
    pub next_delivery: NaiveDate,
}

impl OrderSummary {
    pub fn total_display(&self) -> String {
        format_price(self.total_cents)
    }

    pub fn price_suffix(&self) -> &'static str {
        self.frequency.price_suffix()
    }

    pub fn next_delivery_display(&self) -> String {
        format_delivery_date(self.next_delivery)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub items: Vec<CartItem>,
    pub total_cents: u32,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Prepare { plan_name: Option<String>, ai_build: bool },
    AddItem { name: String, quantity: u32, merge: bool },
    RemoveItem(String),
    SetQuantity { name: String, quantity: i64 },
    SetFrequency(Frequency),
    NextStep,
    PrevStep,
    Checkout,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    /// An existing entry absorbed an added quantity.
    Merged(String),
    Confirmed(OrderConfirmation),
}

/// Cart and wizard position for one "build your pack" session.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBuilder {
    catalog: Rc<Catalog>,
    cart: Cart,
    step: WizardStep,
    frequency: Frequency,
    origin: PackOrigin,
}

impl OrderBuilder {
    pub fn new(catalog: Rc<Catalog>) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            step: WizardStep::PackSelection,
            frequency: Frequency::default(),
            origin: PackOrigin::Blank,
        }
    }

    pub fn apply(&mut self, action: OrderAction) -> Option<OrderEvent> {
        match action {
            OrderAction::Prepare { plan_name, ai_build } => {
                self.prepare(plan_name.as_deref(), ai_build);
                None
            }
            OrderAction::AddItem { name, quantity, merge } => {
                self.add_item(&name, quantity, merge).then(|| OrderEvent::Merged(name))
            }
            OrderAction::RemoveItem(name) => {
                self.remove_item(&name);
                None
            }
            OrderAction::SetQuantity { name, quantity } => {
                self.set_quantity(&name, quantity);
                None
            }
            OrderAction::SetFrequency(frequency) => {
                self.set_frequency(frequency);
                None
            }
            OrderAction::NextStep => {
                self.next_step();
                None
            }
            OrderAction::PrevStep => {
                self.prev_step();
                None
            }
            OrderAction::Checkout => self.checkout().map(OrderEvent::Confirmed),
            OrderAction::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Starts a fresh session. A plan name wins over the AI flag; nothing from
    /// the previous session survives.
    pub fn prepare(&mut self, plan_name: Option<&str>, ai_build: bool) {
        let catalog = Rc::clone(&self.catalog);
        let (origin, seeds, placeholder) = match plan_name {
            Some(name) => {
                let kind = PlanKind::from_plan_name(name);
                let seeds = kind.map(|kind| catalog.seed_for(kind)).unwrap_or(&[]);
                let placeholder = if kind == Some(PlanKind::Custom) {
                    Placeholder::StartCustom
                } else {
                    Placeholder::Empty
                };
                let origin = PackOrigin::Plan {
                    name: name.to_string(),
                    kind,
                };
                (origin, seeds, placeholder)
            }
            None if ai_build => (PackOrigin::AiBuild, catalog.ai_build(), Placeholder::Empty),
            None => (PackOrigin::Blank, &[][..], Placeholder::Empty),
        };

        self.cart.clear(placeholder);
        self.step = WizardStep::PackSelection;
        self.frequency = Frequency::default();
        for seed in seeds {
            self.cart.add(&seed.name, seed.quantity, false);
        }
        if self.cart.is_empty() {
            self.cart.clear(placeholder);
        }

        info!("Prepared pack \"{}\" with {} items", origin.title(), self.cart.len());
        self.origin = origin;
    }

    pub fn add_item(&mut self, name: &str, quantity: u32, merge: bool) -> bool {
        let merged = self.cart.add(name, quantity, merge);
        debug!("Added {} x{} (merged: {})", name, quantity.max(1), merged);
        merged
    }

    pub fn remove_item(&mut self, name: &str) {
        self.cart.remove(name);
        debug!("Removed {}", name);
    }

    pub fn set_quantity(&mut self, name: &str, quantity: i64) {
        self.cart.set_quantity(name, quantity);
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub fn next_step(&mut self) {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
    }

    pub fn prev_step(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    /// Only the confirmation step can check out. A confirmed order empties the
    /// cart and rewinds the wizard; anything else is ignored.
    pub fn checkout(&mut self) -> Option<OrderConfirmation> {
        if self.step != WizardStep::Confirmation {
            debug!("Ignoring checkout from {:?}", self.step);
            return None;
        }

        let confirmation = OrderConfirmation {
            items: self.cart.items().to_vec(),
            total_cents: self.cart.total_cents(&self.catalog),
            frequency: self.frequency,
        };
        info!(
            "Subscription confirmed (simulation): {} items, {} {}",
            confirmation.items.len(),
            format_price(confirmation.total_cents),
            confirmation.frequency.price_suffix()
        );

        self.cart.clear(Placeholder::Empty);
        self.step = WizardStep::PackSelection;
        self.origin = PackOrigin::Blank;
        Some(confirmation)
    }

    /// Rewinds the wizard without touching the cart.
    pub fn reset(&mut self) {
        self.step = WizardStep::PackSelection;
    }

    pub fn summary(&self, today: NaiveDate) -> OrderSummary {
        OrderSummary {
            total_cents: self.cart.total_cents(&self.catalog),
            item_count: self.cart.len(),
            frequency: self.frequency,
            next_delivery: self.frequency.next_delivery(today),
        }
    }

    /// The pack step cannot move on with nothing in the pack.
    pub fn can_advance(&self) -> bool {
        !(self.step == WizardStep::PackSelection && self.cart.is_empty())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn origin(&self) -> &PackOrigin {
        &self.origin
    }
}

/// The builder as page state. Every dispatch folds into the latest builder,
/// and the event it produced is kept with a revision so effects can react to
/// it once.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSession {
    pub builder: OrderBuilder,
    pub last_event: Option<OrderEvent>,
    pub revision: u64,
}

impl OrderSession {
    pub fn new(catalog: Rc<Catalog>) -> Self {
        Self {
            builder: OrderBuilder::new(catalog),
            last_event: None,
            revision: 0,
        }
    }
}

impl Reducible for OrderSession {
    type Action = OrderAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut builder = self.builder.clone();
        let last_event = builder.apply(action);
        Rc::new(OrderSession {
            builder,
            last_event,
            revision: self.revision.wrapping_add(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> OrderBuilder {
        OrderBuilder::new(Rc::new(Catalog::load()))
    }

    fn contents(builder: &OrderBuilder) -> Vec<(&str, u32)> {
        builder
            .cart()
            .items()
            .iter()
            .map(|item| (item.name.as_str(), item.quantity))
            .collect()
    }

    #[test]
    fn family_pack_seeds_five_items() {
        let mut builder = builder();
        builder.prepare(Some("Family Pack"), false);
        assert_eq!(
            contents(&builder),
            vec![("Milk", 2), ("Eggs", 2), ("Bread", 1), ("Butter", 1), ("Cottage Cheese", 1)]
        );
        assert_eq!(builder.step().index(), 0);
        assert_eq!(builder.origin().title(), "Customize Family Pack");
    }

    #[test]
    fn ai_build_seeds_substitutes() {
        let mut builder = builder();
        builder.prepare(None, true);
        assert_eq!(
            contents(&builder),
            vec![("Milk", 1), ("Eggs", 1), ("Butter (AI)", 1), ("Water", 1)]
        );
        assert_eq!(builder.origin().title(), "Your AI Generated Pack");
        assert!(builder.origin().ai_note().is_some());
    }

    #[test]
    fn plan_name_wins_over_ai_flag() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack Monthly"), true);
        assert_eq!(contents(&builder), vec![("Milk", 1), ("Eggs", 1), ("Bread", 1)]);
        assert_eq!(builder.origin().title(), "Customize Basic Pack");
    }

    #[test]
    fn custom_pack_starts_empty_with_prompt() {
        let mut builder = builder();
        builder.prepare(Some("Custom Pack"), false);
        assert!(builder.cart().is_empty());
        assert_eq!(builder.cart().placeholder(), Placeholder::StartCustom);
        assert_eq!(builder.origin().title(), "Build Your Custom Pack");
        assert!(!builder.can_advance());

        builder.add_item("Water", 1, true);
        assert_eq!(builder.cart().placeholder(), Placeholder::None);
        assert!(builder.can_advance());
    }

    #[test]
    fn unknown_plan_gets_empty_cart() {
        let mut builder = builder();
        builder.prepare(Some("Party Pack"), false);
        assert!(builder.cart().is_empty());
        assert_eq!(builder.cart().placeholder(), Placeholder::Empty);
        assert_eq!(builder.origin().title(), "Customize Party Pack");
    }

    #[test]
    fn prepare_discards_previous_session() {
        let mut builder = builder();
        builder.prepare(Some("Family Pack"), false);
        builder.add_item("Sour Cream", 3, true);
        builder.set_frequency(Frequency::Monthly);
        builder.next_step();
        builder.next_step();

        builder.prepare(Some("Smart AI Pack"), false);
        assert_eq!(contents(&builder), vec![("Milk", 1), ("Yogurt (AI)", 1), ("Eggs", 1)]);
        assert_eq!(builder.step(), WizardStep::PackSelection);
        assert_eq!(builder.frequency(), Frequency::Weekly);
        assert_eq!(builder.origin().title(), "Your Smart AI Pack");
    }

    #[test]
    fn steps_stay_in_range() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack"), false);
        let moves = [true, true, true, true, false, true, false, false, false, false, true];
        for forward in moves {
            if forward {
                builder.next_step();
            } else {
                builder.prev_step();
            }
            assert!(builder.step().index() < STEP_COUNT);
        }
        for _ in 0..10 {
            builder.next_step();
        }
        assert_eq!(builder.step(), WizardStep::Confirmation);
        for _ in 0..10 {
            builder.prev_step();
        }
        assert_eq!(builder.step(), WizardStep::PackSelection);
    }

    #[test]
    fn monthly_summary() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack"), false);
        builder.set_frequency(Frequency::Monthly);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = builder.summary(today);
        assert_eq!(summary.price_suffix(), "/ month");
        assert_eq!(summary.next_delivery, NaiveDate::from_ymd_opt(2026, 11, 19).unwrap());
        assert_eq!(summary.total_cents, 350 + 400 + 280);
        assert_eq!(summary.total_display(), "$10.30");
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn checkout_is_ignored_before_confirmation_step() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack"), false);
        assert_eq!(builder.apply(OrderAction::Checkout), None);
        builder.next_step();
        assert_eq!(builder.checkout(), None);
        assert_eq!(builder.cart().len(), 3);
    }

    #[test]
    fn checkout_confirms_and_clears() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack"), false);
        builder.set_frequency(Frequency::BiWeekly);
        builder.next_step();
        builder.next_step();

        let event = builder.apply(OrderAction::Checkout);
        match event {
            Some(OrderEvent::Confirmed(confirmation)) => {
                assert_eq!(confirmation.items.len(), 3);
                assert_eq!(confirmation.total_cents, 1030);
                assert_eq!(confirmation.frequency, Frequency::BiWeekly);
            }
            other => panic!("expected confirmation, got {:?}", other),
        }

        builder.reset();
        assert_eq!(builder.step(), WizardStep::PackSelection);
        assert!(builder.cart().is_empty());
        assert_eq!(builder.cart().placeholder(), Placeholder::Empty);
    }

    #[test]
    fn reset_keeps_cart() {
        let mut builder = builder();
        builder.prepare(Some("Family Pack"), false);
        builder.next_step();
        builder.reset();
        assert_eq!(builder.step(), WizardStep::PackSelection);
        assert_eq!(builder.cart().len(), 5);
    }

    #[test]
    fn merging_add_reports_merge_event() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack"), false);
        let merged = builder.apply(OrderAction::AddItem {
            name: "Milk".into(),
            quantity: 1,
            merge: true,
        });
        assert_eq!(merged, Some(OrderEvent::Merged("Milk".into())));
        let added = builder.apply(OrderAction::AddItem {
            name: "Water".into(),
            quantity: 1,
            merge: true,
        });
        assert_eq!(added, None);
        assert_eq!(builder.cart().quantity_of("Milk"), Some(2));
    }

    #[test]
    fn quantity_edits_flow_into_total() {
        let mut builder = builder();
        builder.prepare(Some("Basic Pack"), false);
        builder.apply(OrderAction::SetQuantity { name: "Bread".into(), quantity: 3 });
        builder.apply(OrderAction::SetQuantity { name: "Milk".into(), quantity: -4 });
        builder.apply(OrderAction::RemoveItem("Eggs".into()));
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(builder.summary(today).total_cents, 350 + 3 * 280);
    }

    #[test]
    fn fixture_catalog_can_be_injected() {
        let catalog = Catalog::from_json(
            r#"{ "prices": { "Tea": 199 }, "plans": { "basic": [{ "name": "Tea", "quantity": 2 }] } }"#,
        )
        .unwrap();
        let mut builder = OrderBuilder::new(Rc::new(catalog));
        builder.prepare(Some("Basic Pack"), false);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(builder.summary(today).total_cents, 398);
    }

    #[test]
    fn session_folds_each_dispatch_into_latest_state() {
        let session = Rc::new(OrderSession::new(Rc::new(Catalog::load())));
        let session = session.reduce(OrderAction::Prepare { plan_name: None, ai_build: false });
        let add = || OrderAction::AddItem { name: "Water".into(), quantity: 1, merge: true };
        let session = session.reduce(add());
        assert_eq!(session.last_event, None);
        let session = session.reduce(add());
        assert_eq!(session.builder.cart().quantity_of("Water"), Some(2));
        assert_eq!(session.last_event, Some(OrderEvent::Merged("Water".into())));
        assert_eq!(session.revision, 3);
    }

    #[test]
    fn session_keeps_confirmation_event() {
        let mut session = Rc::new(OrderSession::new(Rc::new(Catalog::load())));
        for action in [
            OrderAction::Prepare { plan_name: Some("Basic Pack".into()), ai_build: false },
            OrderAction::NextStep,
            OrderAction::NextStep,
            OrderAction::Checkout,
        ] {
            session = session.reduce(action);
        }
        assert!(matches!(session.last_event, Some(OrderEvent::Confirmed(_))));
        assert!(session.builder.cart().is_empty());
    }
}
