use serde::Serialize;

/// A sellable item on the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// Payload for creating a menu item or overwriting an existing one.
#[derive(Debug, Clone)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl MenuItemDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be blank".to_string());
        }
        if self.price < 0.0 {
            return Err(format!("price must not be negative, got {}", self.price));
        }
        Ok(())
    }
}

/// Case-insensitive containment filter over an already loaded item list.
pub fn filter_by_name(items: &[MenuItem], needle: &str) -> Vec<MenuItem> {
    let needle = needle.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
