use super::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub quantity: u32,
}

/// What the item list shows in place of items when the pack is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    None,
    StartCustom,
    Empty,
}

impl Placeholder {
    pub fn message(self) -> Option<&'static str> {
        match self {
            Placeholder::None => None,
            Placeholder::StartCustom => Some("Start by adding your favorite essentials!"),
            Placeholder::Empty => Some("Your pack is empty. Add items below!"),
        }
    }
}

/// Ordered list of pack items, unique by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    placeholder: Placeholder,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            placeholder: Placeholder::Empty,
        }
    }

    pub fn clear(&mut self, placeholder: Placeholder) {
        self.items.clear();
        self.placeholder = placeholder;
    }

    /// Returns true when an existing entry absorbed the quantity. A repeated
    /// name without `merge` leaves the cart unchanged, so names stay unique.
    pub fn add(&mut self, name: &str, quantity: u32, merge: bool) -> bool {
        let quantity = quantity.max(1);
        self.placeholder = Placeholder::None;

        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) if merge => {
                item.quantity = item.quantity.saturating_add(quantity);
                true
            }
            Some(_) => false,
            None => {
                self.items.push(CartItem {
                    name: name.to_string(),
                    quantity,
                });
                false
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.items.retain(|item| item.name != name);
        if self.items.is_empty() {
            self.placeholder = Placeholder::Empty;
        }
    }

    pub fn set_quantity(&mut self, name: &str, quantity: i64) {
        let clamped = quantity.clamp(1, i64::from(u32::MAX)) as u32;
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity = clamped;
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.quantity)
    }

    pub fn total_cents(&self, catalog: &Catalog) -> u32 {
        self.items
            .iter()
            .map(|item| catalog.unit_price(&item.name).saturating_mul(item.quantity))
            .fold(0u32, u32::saturating_add)
    }
}
