use std::fmt;

/// Separator for list-valued fields (ingredients, steps) in the flat file.
pub const LIST_SEPARATOR: char = ';';

/// A single recipe.
///
/// Numeric fields are clamped to be non-negative on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    /// Cost to prepare, in dollars.
    pub price: f64,
    pub time_minutes: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub calories: u32,
    pub difficulty: String,
    pub image_url: String,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        time_minutes: i64,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        Recipe {
            name: name.into(),
            category: category.into(),
            price: clamp_price(price),
            time_minutes: clamp_count(time_minutes),
            ingredients,
            steps,
            calories: 0,
            difficulty: String::new(),
            image_url: String::new(),
        }
    }

    pub fn with_calories(mut self, calories: i64) -> Self {
        self.calories = clamp_count(calories);
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = clamp_price(price);
    }

    pub fn set_time_minutes(&mut self, time_minutes: i64) {
        self.time_minutes = clamp_count(time_minutes);
    }

    pub fn set_calories(&mut self, calories: i64) {
        self.calories = clamp_count(calories);
    }

    /// Whether any ingredient contains `token`, ignoring case.
    pub fn has_ingredient(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.ingredients.iter().any(|i| i.to_lowercase().contains(&token))
    }
}

/// Negative and `NaN` prices become 0.
fn clamp_price(price: f64) -> f64 {
    if price.is_nan() {
        0.0
    } else {
        price.max(0.0)
    }
}

fn clamp_count(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Splits a `;`-separated list, trimming items and dropping empty ones.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(&LIST_SEPARATOR.to_string())
}

/// One-line summary, e.g. `Chicken Salad [main] - $5.50 (15 min)`.
impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] - ${:.2} ({} min)",
            self.name, self.category, self.price, self.time_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        let r = Recipe::new("Soup", "starter", -3.0, -10, vec![], vec![]).with_calories(-1);
        assert_eq!(r.price, 0.0);
        assert_eq!(r.time_minutes, 0);
        assert_eq!(r.calories, 0);

        let mut r = r;
        r.set_price(f64::NAN);
        assert_eq!(r.price, 0.0);
        r.set_time_minutes(25);
        assert_eq!(r.time_minutes, 25);
    }

    #[test]
    fn test_display() {
        let r = Recipe::new("Chicken Salad", "main", 5.5, 15, vec![], vec![]);
        assert_eq!(r.to_string(), "Chicken Salad [main] - $5.50 (15 min)");
    }

    #[test]
    fn test_split_and_join_list() {
        let items = split_list(" chicken; lettuce ;;dressing ");
        assert_eq!(items, vec!["chicken", "lettuce", "dressing"]);
        assert_eq!(join_list(&items), "chicken;lettuce;dressing");
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_has_ingredient() {
        let r = Recipe::new(
            "Wrap",
            "main",
            4.0,
            10,
            vec!["Grilled Chicken".to_string(), "tortilla".to_string()],
            vec![],
        );
        assert!(r.has_ingredient("chicken"));
        assert!(r.has_ingredient("TORT"));
        assert!(!r.has_ingredient("rice"));
    }
}
