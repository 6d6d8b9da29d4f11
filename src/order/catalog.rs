use std::collections::HashMap;

use log::error;
use serde::Deserialize;
use thiserror::Error;

const CATALOG_JSON: &str = include_str!("../../static/catalog.json");

/// The named plans a pack can be seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKind {
    Basic,
    Family,
    SmartAi,
    Custom,
}

impl PlanKind {
    /// Plan buttons carry display names such as "Family Pack Monthly", so the
    /// named packs match by substring. Only the custom plan needs an exact name.
    pub fn from_plan_name(name: &str) -> Option<Self> {
        if name.contains("Basic Pack") {
            Some(PlanKind::Basic)
        } else if name.contains("Family Pack") {
            Some(PlanKind::Family)
        } else if name.contains("Smart AI Pack") {
            Some(PlanKind::SmartAi)
        } else if name == "Custom Pack" {
            Some(PlanKind::Custom)
        } else {
            None
        }
    }

    fn key(self) -> &'static str {
        match self {
            PlanKind::Basic => "basic",
            PlanKind::Family => "family",
            PlanKind::SmartAi => "smart_ai",
            PlanKind::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedItem {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("seed item `{0}` has no price")]
    MissingPrice(String),
}

/// Prices (in cents), plan seeds and the copy the page cycles through.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    prices: HashMap<String, u32>,
    #[serde(default)]
    products: Vec<String>,
    #[serde(default)]
    plans: HashMap<String, Vec<SeedItem>>,
    #[serde(default)]
    ai_build: Vec<SeedItem>,
    #[serde(default)]
    phrases: Vec<String>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Decodes the catalog bundled with the page. A broken bundle falls back
    /// to the built-in tables.
    pub fn load() -> Self {
        Self::from_json(CATALOG_JSON).unwrap_or_else(|e| {
            error!("Falling back to the built-in catalog: {}", e);
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let seeds = self.plans.values().flatten().chain(self.ai_build.iter());
        for item in seeds {
            if !self.prices.contains_key(&item.name) {
                return Err(CatalogError::MissingPrice(item.name.clone()));
            }
        }
        Ok(())
    }

    /// Unknown items are free rather than an error.
    pub fn unit_price(&self, name: &str) -> u32 {
        self.prices.get(name).copied().unwrap_or(0)
    }

    pub fn seed_for(&self, kind: PlanKind) -> &[SeedItem] {
        self.plans.get(kind.key()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ai_build(&self) -> &[SeedItem] {
        &self.ai_build
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn pack_total(&self, kind: PlanKind) -> u32 {
        self.seed_for(kind)
            .iter()
            .map(|item| self.unit_price(&item.name) * item.quantity)
            .sum()
    }
}

fn seeds(items: &[(&str, u32)]) -> Vec<SeedItem> {
    items
        .iter()
        .map(|&(name, quantity)| SeedItem { name: name.to_string(), quantity })
        .collect()
}

/// The same tables as `static/catalog.json`, kept in code so a page whose
/// bundle fails to decode can still seed packs.
impl Default for Catalog {
    fn default() -> Self {
        let prices = [
            ("Milk", 350),
            ("Eggs", 400),
            ("Bread", 280),
            ("Butter", 500),
            ("Cottage Cheese", 450),
            ("Sour Cream", 250),
            ("Water", 150),
            ("Yogurt (AI)", 300),
            ("Butter (AI)", 500),
        ]
        .iter()
        .map(|&(name, cents)| (name.to_string(), cents))
        .collect();

        let products = ["Milk", "Eggs", "Bread", "Butter", "Cottage Cheese", "Sour Cream", "Water"]
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut plans = HashMap::new();
        plans.insert(
            PlanKind::Basic.key().to_string(),
            seeds(&[("Milk", 1), ("Eggs", 1), ("Bread", 1)]),
        );
        plans.insert(
            PlanKind::Family.key().to_string(),
            seeds(&[("Milk", 2), ("Eggs", 2), ("Bread", 1), ("Butter", 1), ("Cottage Cheese", 1)]),
        );
        plans.insert(
            PlanKind::SmartAi.key().to_string(),
            seeds(&[("Milk", 1), ("Yogurt (AI)", 1), ("Eggs", 1)]),
        );
        plans.insert(PlanKind::Custom.key().to_string(), Vec::new());

        let phrases = [
            "Add yogurt? Records show you like it.",
            "Low on cheese? Let's refill.",
            "Milk supply check: Running low?",
            "Organic eggs needed soon?",
            "Weekend bread stock? Sorted.",
            "Fresh butter makes everything better.",
        ]
        .iter()
        .map(|phrase| phrase.to_string())
        .collect();

        Catalog {
            prices,
            products,
            plans,
            ai_build: seeds(&[("Milk", 1), ("Eggs", 1), ("Butter (AI)", 1), ("Water", 1)]),
            phrases,
        }
    }
}

pub fn format_price(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_decodes() {
        let catalog = Catalog::from_json(CATALOG_JSON).expect("bundled catalog");
        assert_eq!(catalog.unit_price("Milk"), 350);
        assert_eq!(catalog.unit_price("Butter (AI)"), 500);
        assert_eq!(catalog.phrases().len(), 6);
        assert!(catalog.seed_for(PlanKind::Custom).is_empty());
    }

    #[test]
    fn unknown_items_price_at_zero() {
        let catalog = Catalog::load();
        assert_eq!(catalog.unit_price("Caviar"), 0);
    }

    #[test]
    fn plan_names_match_by_substring() {
        assert_eq!(PlanKind::from_plan_name("Basic Pack"), Some(PlanKind::Basic));
        assert_eq!(PlanKind::from_plan_name("Family Pack Monthly"), Some(PlanKind::Family));
        assert_eq!(PlanKind::from_plan_name("Smart AI Pack"), Some(PlanKind::SmartAi));
        assert_eq!(PlanKind::from_plan_name("Custom Pack"), Some(PlanKind::Custom));
        assert_eq!(PlanKind::from_plan_name("Custom Pack Monthly"), None);
        assert_eq!(PlanKind::from_plan_name("Party Pack"), None);
    }

    #[test]
    fn seed_without_price_is_rejected() {
        let json = r#"{
            "prices": { "Milk": 350 },
            "plans": { "basic": [{ "name": "Cheese", "quantity": 1 }] }
        }"#;
        match Catalog::from_json(json) {
            Err(CatalogError::MissingPrice(name)) => assert_eq!(name, "Cheese"),
            other => panic!("expected missing price, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn pack_total_sums_seed_prices() {
        let catalog = Catalog::load();
        // 2*3.50 + 2*4.00 + 2.80 + 5.00 + 4.50
        assert_eq!(catalog.pack_total(PlanKind::Family), 2730);
        assert_eq!(format_price(2730), "$27.30");
        assert_eq!(format_price(5), "$0.05");
    }

    #[test]
    fn built_in_tables_match_the_bundle() {
        let bundled = Catalog::from_json(CATALOG_JSON).expect("bundled catalog");
        assert_eq!(Catalog::default(), bundled);
        assert!(Catalog::default().validate().is_ok());
    }

    #[test]
    fn fallback_catalog_still_seeds_plans() {
        use std::rc::Rc;
        use crate::order::builder::OrderBuilder;

        let catalog = Rc::new(Catalog::default());
        let mut builder = OrderBuilder::new(catalog.clone());
        builder.prepare(Some("Family Pack"), false);
        assert_eq!(builder.cart().len(), 5);
        assert_eq!(builder.cart().total_cents(&catalog), 2730);
    }
}
