//! Product categories inferred from product names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category used by the home screen filter.
///
/// Products carry no explicit category; it is inferred from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dresses,
    Tops,
    Accessories,
    Uncategorized,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Dresses,
        Category::Tops,
        Category::Accessories,
        Category::Uncategorized,
    ];

    /// Infer a category from a product name by keyword.
    pub fn infer(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

        if has(&["dress", "jumpsuit"]) {
            Category::Dresses
        } else if has(&["blouse", "tee", "sweater"]) {
            Category::Tops
        } else if has(&["jeans", "skirt"]) {
            Category::Accessories
        } else {
            Category::Uncategorized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dresses => "dresses",
            Category::Tops => "tops",
            Category::Accessories => "accessories",
            Category::Uncategorized => "uncategorized",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Dresses => "Dresses",
            Category::Tops => "Tops",
            Category::Accessories => "Accessories",
            Category::Uncategorized => "Uncategorized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.to_lowercase())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_category() {
        assert_eq!(Category::infer("Floral Maxi Dress"), Category::Dresses);
        assert_eq!(Category::infer("Chic Jumpsuit"), Category::Dresses);
        assert_eq!(Category::infer("Silk Blouse"), Category::Tops);
        assert_eq!(Category::infer("Graphic Tee"), Category::Tops);
        assert_eq!(Category::infer("Knit Sweater"), Category::Tops);
        assert_eq!(Category::infer("High-Waisted Jeans"), Category::Accessories);
        assert_eq!(Category::infer("Denim Skirt"), Category::Accessories);
        assert_eq!(Category::infer("Leather Jacket"), Category::Uncategorized);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Category::parse("Tops"), Some(Category::Tops));
        assert_eq!(Category::parse("shoes"), None);
    }
}
