//! In-memory recipe catalog.
//!
//! [`RecipeCatalog`] owns the loaded recipes and provides the record-store operations: flat-file
//! load/save, CRUD, the plain searches, logical search through the expression language, and
//! sorting through either [`SortAlgorithm`].
//!
//! The expression language never sees a recipe directly. Each recipe is first reduced to its
//! [`Facts`] (see [`FactThresholds`]), and expressions are evaluated against those.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::ast::Expr;
use crate::config::{contains_variable, FactThresholds};
use crate::error::{CatalogError, LogicError};
use crate::io;
use crate::parser::parse;
use crate::recipe::Recipe;
use crate::sort::{SortAlgorithm, SortStats, SortingAlgorithm};

/// Boolean facts about one recipe, keyed by variable name.
pub type Facts = BTreeMap<String, bool>;

/// Primary sort field.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum SortField {
    #[default]
    Price,
    Time,
    Calories,
}

impl SortField {
    pub fn key(self, recipe: &Recipe) -> f64 {
        match self {
            SortField::Price => recipe.price,
            SortField::Time => recipe.time_minutes as f64,
            SortField::Calories => recipe.calories as f64,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Price => write!(f, "price"),
            SortField::Time => write!(f, "time"),
            SortField::Calories => write!(f, "calories"),
        }
    }
}

/// Timings of both algorithms on one sample size.
#[derive(Debug, Clone)]
pub struct BenchmarkRow {
    pub size: usize,
    pub bubble: Duration,
    pub bubble_stats: SortStats,
    pub merge: Duration,
    pub merge_stats: SortStats,
}

#[derive(Debug, Default, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    thresholds: FactThresholds,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: FactThresholds) -> Self {
        Self {
            recipes: Vec::new(),
            thresholds,
        }
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            thresholds: FactThresholds::default(),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Replaces all recipes, e.g. with a sorted copy.
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn thresholds(&self) -> &FactThresholds {
        &self.thresholds
    }

    // ─── Persistence ───

    /// Replaces the catalog contents with the recipes in `path`.
    ///
    /// A missing file leaves the catalog empty. Returns the number of recipes loaded.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        self.recipes = io::load(path)?;
        info!("Loaded {} recipes from {}", self.recipes.len(), path.display());
        Ok(self.recipes.len())
    }

    /// Writes all recipes to `path`.
    ///
    /// An empty catalog writes nothing and returns `false`.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<bool, CatalogError> {
        if self.recipes.is_empty() {
            return Ok(false);
        }
        let path = path.as_ref();
        io::save(path, &self.recipes)?;
        info!("Saved {} recipes to {}", self.recipes.len(), path.display());
        Ok(true)
    }

    // ─── CRUD ───

    pub fn add(&mut self, recipe: Recipe) {
        debug!("add(name = {:?})", recipe.name);
        self.recipes.push(recipe);
    }

    /// Removes every recipe named `name` (ignoring case). Returns whether any was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.recipes.len();
        let name = name.to_lowercase();
        self.recipes.retain(|r| r.name.to_lowercase() != name);
        self.recipes.len() < before
    }

    /// First recipe named exactly `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Recipe> {
        let name = name.to_lowercase();
        self.recipes.iter().find(|r| r.name.to_lowercase() == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Recipe> {
        let name = name.to_lowercase();
        self.recipes.iter_mut().find(|r| r.name.to_lowercase() == name)
    }

    // ─── Searches ───

    /// Recipes whose name contains `name`, ignoring case.
    pub fn search_by_name(&self, name: &str) -> Vec<&Recipe> {
        let name = name.to_lowercase();
        self.search_custom(|r| r.name.to_lowercase().contains(&name))
    }

    /// Recipes in exactly `category`, ignoring case.
    pub fn search_by_category(&self, category: &str) -> Vec<&Recipe> {
        let category = category.to_lowercase();
        self.search_custom(|r| r.category.to_lowercase() == category)
    }

    /// Recipes with some ingredient containing `ingredient`, ignoring case.
    pub fn search_by_ingredient(&self, ingredient: &str) -> Vec<&Recipe> {
        self.search_custom(|r| r.has_ingredient(ingredient))
    }

    pub fn search_custom<P>(&self, mut predicate: P) -> Vec<&Recipe>
    where
        P: FnMut(&Recipe) -> bool,
    {
        self.recipes.iter().filter(|r| predicate(r)).collect()
    }

    // ─── Logic ───

    /// Boolean facts of `recipe` under the catalog thresholds.
    pub fn facts(&self, recipe: &Recipe) -> Facts {
        let t = &self.thresholds;
        let mut facts = Facts::new();
        facts.insert("cheap".to_string(), recipe.price < t.cheap_below);
        facts.insert("quick".to_string(), recipe.time_minutes <= t.quick_at_most);
        facts.insert("healthy".to_string(), recipe.calories < t.healthy_below);
        for token in &t.ingredients {
            facts.insert(contains_variable(token), recipe.has_ingredient(token.trim()));
        }
        facts
    }

    /// Recipes whose facts satisfy `text`.
    ///
    /// All-or-nothing: the first parse or evaluation error is returned and no partial match
    /// list is produced.
    pub fn logical_search(&self, text: &str) -> Result<Vec<&Recipe>, LogicError> {
        let expr = parse(text)?;
        let mut matched = Vec::new();
        for r in &self.recipes {
            if expr.eval(&self.facts(r))? {
                matched.push(r);
            }
        }
        debug!("logical_search({:?}) -> {} of {}", text, matched.len(), self.recipes.len());
        Ok(matched)
    }

    /// Secondary key: 0 when `expr` holds for `recipe`, 1 when it does not or cannot be
    /// evaluated.
    fn secondary_key(&self, expr: Option<&Expr>, recipe: &Recipe) -> u8 {
        match expr {
            None => 0,
            Some(e) => match e.eval(&self.facts(recipe)) {
                Ok(true) => 0,
                Ok(false) | Err(_) => 1,
            },
        }
    }

    // ─── Sorting ───

    /// Sorted copy of the recipes, keyed by `(field, secondary)`.
    ///
    /// With a `secondary` expression, recipes satisfying it come first among equal primary
    /// keys. A malformed `secondary` is reported; a recipe for which it cannot be evaluated
    /// (unknown variable) ranks as not satisfying it.
    pub fn sorted(
        &self,
        algorithm: SortAlgorithm,
        field: SortField,
        secondary: Option<&str>,
        reverse: bool,
    ) -> Result<Vec<Recipe>, LogicError> {
        let secondary = secondary.map(str::trim).filter(|s| !s.is_empty()).map(parse).transpose()?;
        debug!(
            "sorted(algorithm = {}, field = {}, secondary = {:?}, reverse = {})",
            algorithm,
            field,
            secondary.as_ref().map(ToString::to_string),
            reverse
        );
        let key = |r: &Recipe| (field.key(r), self.secondary_key(secondary.as_ref(), r));
        Ok(algorithm.sort_by_key(&self.recipes, key, reverse))
    }

    /// Times both algorithms on samples of the given sizes, sorting by cooking time.
    ///
    /// Each sample repeats the catalog as often as needed and is truncated to the size. An empty
    /// catalog yields no rows.
    pub fn benchmark(&self, sizes: &[usize]) -> Vec<BenchmarkRow> {
        if self.recipes.is_empty() {
            return Vec::new();
        }
        let key = |r: &Recipe| r.time_minutes;

        sizes
            .iter()
            .map(|&size| {
                let sample: Vec<Recipe> = self.recipes.iter().cycle().take(size).cloned().collect();

                let start = Instant::now();
                let (_, bubble_stats) = SortAlgorithm::Bubble.sort_by_key_with_stats(&sample, key, false);
                let bubble = start.elapsed();

                let start = Instant::now();
                let (_, merge_stats) = SortAlgorithm::Merge.sort_by_key_with_stats(&sample, key, false);
                let merge = start.elapsed();

                debug!("benchmark(n = {}): bubble {:?}, merge {:?}", size, bubble, merge);
                BenchmarkRow {
                    size,
                    bubble,
                    bubble_stats,
                    merge,
                    merge_stats,
                }
            })
            .collect()
    }
}
