//! Thresholds that turn recipe fields into boolean facts.

/// Configuration for [`RecipeCatalog::facts`][crate::catalog::RecipeCatalog::facts].
///
/// With the defaults, a recipe gets these variables:
///
/// | Variable           | Holds when                                  |
/// |--------------------|---------------------------------------------|
/// | `cheap`            | price < 4.00                                |
/// | `quick`            | time ≤ 15 minutes                           |
/// | `healthy`          | calories < 400                              |
/// | `contains_chicken` | some ingredient contains "chicken"          |
///
/// Every entry of [`ingredients`][FactThresholds::ingredients] adds a `contains_<token>` fact,
/// matched case-insensitively as a substring of any ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct FactThresholds {
    /// `cheap` holds strictly below this price.
    pub cheap_below: f64,
    /// `quick` holds at or below this many minutes.
    pub quick_at_most: u32,
    /// `healthy` holds strictly below this many calories.
    pub healthy_below: u32,
    /// Ingredient tokens, each producing a `contains_<token>` fact.
    pub ingredients: Vec<String>,
}

impl Default for FactThresholds {
    fn default() -> Self {
        Self {
            cheap_below: 4.0,
            quick_at_most: 15,
            healthy_below: 400,
            ingredients: vec!["chicken".to_string()],
        }
    }
}

impl FactThresholds {
    pub fn with_cheap_below(mut self, price: f64) -> Self {
        self.cheap_below = price;
        self
    }

    pub fn with_quick_at_most(mut self, minutes: u32) -> Self {
        self.quick_at_most = minutes;
        self
    }

    pub fn with_healthy_below(mut self, calories: u32) -> Self {
        self.healthy_below = calories;
        self
    }

    /// Replaces the ingredient tokens.
    pub fn with_ingredients<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Names of all facts produced under this configuration, in ascending order.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = ["cheap", "quick", "healthy"].iter().map(|s| s.to_string()).collect();
        names.extend(self.ingredients.iter().map(|t| contains_variable(t)));
        names.sort();
        names.dedup();
        names
    }
}

/// Variable name for an ingredient token: lowercased, with non-identifier characters replaced
/// by `_`, so that `"olive oil"` becomes `contains_olive_oil`.
pub fn contains_variable(token: &str) -> String {
    let token: String = token
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("contains_{}", token)
}
