//! Shopping session scripts.
//!
//! A script is a TOML file with a list of `[[steps]]`, each tagged by
//! `action`. Steps run in order against one fresh store.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{LineItem, LineKey};
use storefront_commerce::checkout::{CardDetails, DeliveryDetails, PaymentMethod};
use storefront_commerce::{ProductId, StorefrontStore};

/// A parsed session script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    /// Optional label shown before the run.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

impl SessionScript {
    /// Load a script from a TOML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::parse(&content, path.extension().is_some_and(|e| e == "json"))
            .with_context(|| format!("Failed to parse script: {}", path.display()))
    }

    pub fn parse(content: &str, json: bool) -> Result<Self> {
        let script: Self = if json {
            serde_json::from_str(content)?
        } else {
            toml::from_str(content)?
        };
        if script.steps.is_empty() {
            bail!("script has no steps");
        }
        Ok(script)
    }
}

/// Identifies a product variant. Missing size or color means the product's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub product: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl ItemRef {
    /// Configure the product through the variant selector and build a cart line.
    pub fn to_line_item(&self, store: &StorefrontStore) -> Result<LineItem> {
        let mut variant = store.open_product(&ProductId::new(self.product.as_str()))?;
        if let Some(size) = &self.size {
            variant.choose_size(size.as_str());
        }
        if let Some(color) = &self.color {
            variant.choose_color(color.as_str());
        }
        if let Some(quantity) = self.quantity {
            variant.set_quantity(quantity)?;
        }
        Ok(variant.to_line_item()?)
    }

    /// Resolve the cart key, filling defaults from the catalog.
    pub fn key(&self, store: &StorefrontStore) -> Result<LineKey> {
        let id = ProductId::new(self.product.as_str());
        let product = store
            .catalog()
            .find(&id)
            .ok_or_else(|| anyhow!("Product not found: {}", self.product))?;
        let size = self
            .size
            .as_deref()
            .or_else(|| product.default_size())
            .ok_or_else(|| anyhow!("Product {} has no sizes", self.product))?;
        let color = self
            .color
            .as_deref()
            .or_else(|| product.default_color())
            .ok_or_else(|| anyhow!("Product {} has no colors", self.product))?;
        Ok(LineKey::new(id, size, color))
    }
}

/// Card form values in a script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardInput {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl From<&CardInput> for CardDetails {
    fn from(input: &CardInput) -> Self {
        CardDetails::new(&input.number, input.expiry.as_str(), input.cvv.as_str())
    }
}

/// How the shopper signs in during checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LoginInput {
    Password { email: String, password: String },
    Google {
        #[serde(default)]
        email: Option<String>,
    },
}

/// Everything needed to run one checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutInput {
    pub login: LoginInput,
    pub details: DeliveryDetails,
    /// `card` or `cod`.
    pub method: String,
    #[serde(default)]
    pub card: Option<CardInput>,
    /// Pay with the card saved by an earlier checkout.
    #[serde(default)]
    pub use_saved_card: bool,
    #[serde(default)]
    pub save_card: bool,
}

impl CheckoutInput {
    pub fn payment_method(&self) -> Result<PaymentMethod> {
        PaymentMethod::parse(&self.method)
            .ok_or_else(|| anyhow!("Unknown payment method: {} (expected card or cod)", self.method))
    }
}

/// One scripted action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Add {
        #[serde(flatten)]
        item: ItemRef,
    },
    AddMany {
        items: Vec<ItemRef>,
    },
    SetQuantity {
        #[serde(flatten)]
        item: ItemRef,
    },
    Increment {
        #[serde(flatten)]
        item: ItemRef,
    },
    Decrement {
        #[serde(flatten)]
        item: ItemRef,
    },
    Remove {
        #[serde(flatten)]
        item: ItemRef,
    },
    Toggle {
        #[serde(flatten)]
        item: ItemRef,
    },
    SelectAll,
    ClearSelection,
    Checkout(Box<CheckoutInput>),
    /// Delete orders by their position in the history.
    DeleteOrders {
        positions: Vec<usize>,
    },
    ShowCart,
    ShowOrders,
}

impl Step {
    /// Short description for progress output.
    pub fn describe(&self) -> String {
        match self {
            Step::Add { item } => format!("Add {}", describe_item(item)),
            Step::AddMany { items } => format!("Add {} items", items.len()),
            Step::SetQuantity { item } => format!(
                "Set {} to {}",
                describe_item(item),
                item.quantity.unwrap_or_default()
            ),
            Step::Increment { item } => format!("Increment {}", describe_item(item)),
            Step::Decrement { item } => format!("Decrement {}", describe_item(item)),
            Step::Remove { item } => format!("Remove {}", describe_item(item)),
            Step::Toggle { item } => format!("Toggle {}", describe_item(item)),
            Step::SelectAll => "Select all".to_string(),
            Step::ClearSelection => "Clear selection".to_string(),
            Step::Checkout(input) => format!("Checkout ({})", input.method),
            Step::DeleteOrders { positions } => format!("Delete orders {:?}", positions),
            Step::ShowCart => "Show cart".to_string(),
            Step::ShowOrders => "Show orders".to_string(),
        }
    }
}

fn describe_item(item: &ItemRef) -> String {
    match (&item.size, &item.color) {
        (Some(size), Some(color)) => format!("product {} ({} / {})", item.product, size, color),
        (Some(size), None) => format!("product {} ({})", item.product, size),
        (None, Some(color)) => format!("product {} ({})", item.product, color),
        (None, None) => format!("product {}", item.product),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r##"
name = "weekend order"

[[steps]]
action = "add"
product = "1"
size = "L"
quantity = 2

[[steps]]
action = "toggle"
product = "1"
size = "L"

[[steps]]
action = "checkout"
method = "cod"

[steps.login]
provider = "google"

[steps.details]
first_name = "Ayesha"
last_name = "Khan"
country = "Pakistan"
street = "12 Mall Road"
city = "Lahore"
state = "Punjab"
zip = "54000"
phone = "03001234567"

[[steps]]
action = "delete-orders"
positions = [0]
"##;

    #[test]
    fn test_parse_script() {
        let script = SessionScript::parse(SCRIPT, false).unwrap();
        assert_eq!(script.name.as_deref(), Some("weekend order"));
        assert_eq!(script.steps.len(), 4);

        match &script.steps[0] {
            Step::Add { item } => {
                assert_eq!(item.product, "1");
                assert_eq!(item.size.as_deref(), Some("L"));
                assert_eq!(item.quantity, Some(2));
            }
            other => panic!("unexpected step: {:?}", other),
        }

        match &script.steps[2] {
            Step::Checkout(input) => {
                assert_eq!(input.payment_method().unwrap(), PaymentMethod::CashOnDelivery);
                assert!(matches!(input.login, LoginInput::Google { email: None }));
                assert!(input.details.is_complete());
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_empty_script_is_rejected() {
        assert!(SessionScript::parse("name = \"nothing\"\n", false).is_err());
    }

    #[test]
    fn test_item_ref_fills_defaults() {
        let store = StorefrontStore::default();
        let item = ItemRef {
            product: "1".to_string(),
            ..Default::default()
        };
        let key = item.key(&store).unwrap();
        let line = item.to_line_item(&store).unwrap();
        assert_eq!(line.key(), key);
        assert_eq!(line.quantity, 1);

        let missing = ItemRef {
            product: "nope".to_string(),
            ..Default::default()
        };
        assert!(missing.key(&store).is_err());
        assert!(missing.to_line_item(&store).is_err());
    }

    #[test]
    fn test_describe() {
        let step = Step::Remove {
            item: ItemRef {
                product: "3".to_string(),
                color: Some("#FF0000".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(step.describe(), "Remove product 3 (#FF0000)");
    }
}
