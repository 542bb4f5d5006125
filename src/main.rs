use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use simplelog::LevelFilter;

use recipe_rs::catalog::{RecipeCatalog, SortField};
use recipe_rs::config::FactThresholds;
use recipe_rs::io;
use recipe_rs::recipe::{split_list, Recipe};
use recipe_rs::sort::SortAlgorithm;
use recipe_rs::table::truth_table;

#[derive(Parser)]
#[command(author, version, about = "Recipe catalog with boolean filters and sorting")]
struct Cli {
    /// Recipe file (CSV)
    #[arg(short, long, value_name = "FILE", default_value = "recipes.csv", global = true)]
    data: PathBuf,

    /// `cheap` holds below this price
    #[arg(long, value_name = "PRICE", global = true)]
    cheap_below: Option<f64>,

    /// `quick` holds at or below this many minutes
    #[arg(long, value_name = "MINUTES", global = true)]
    quick_at_most: Option<u32>,

    /// `healthy` holds below this many calories
    #[arg(long, value_name = "KCAL", global = true)]
    healthy_below: Option<u32>,

    /// Ingredient tokens for `contains_<token>` facts, comma-separated
    #[arg(long, value_name = "TOKENS", value_delimiter = ',', global = true)]
    contains: Vec<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes
    List,

    /// Show one recipe with its facts
    Show {
        /// Recipe name (case-insensitive)
        name: String,
    },

    /// Add a recipe
    Add {
        name: String,
        #[command(flatten)]
        fields: RecipeFields,
    },

    /// Change fields of an existing recipe
    Edit {
        /// Recipe name (case-insensitive)
        name: String,
        /// Rename the recipe
        #[arg(long)]
        rename: Option<String>,
        #[command(flatten)]
        fields: RecipeFields,
    },

    /// Delete all recipes with the given name
    Delete {
        /// Recipe name (case-insensitive)
        name: String,
    },

    /// Plain search by name, category or ingredient
    Search {
        /// Name substring
        #[arg(long)]
        name: Option<String>,
        /// Exact category
        #[arg(long)]
        category: Option<String>,
        /// Ingredient substring
        #[arg(long)]
        ingredient: Option<String>,
    },

    /// Recipes matching a boolean expression over their facts
    /// Example: "(contains_chicken and quick) or healthy"
    Filter {
        expr: String,
    },

    /// Print the truth table of a boolean expression
    TruthTable {
        expr: String,
        /// Only print satisfying assignments
        #[arg(long)]
        satisfying: bool,
    },

    /// Sort recipes and print them
    Sort {
        #[arg(short, long, value_enum, default_value_t = SortAlgorithm::Merge)]
        algorithm: SortAlgorithm,
        #[arg(short, long, value_enum, default_value_t = SortField::Price)]
        by: SortField,
        /// Descending order
        #[arg(long)]
        desc: bool,
        /// Among equal keys, recipes satisfying this expression come first
        #[arg(short, long, value_name = "EXPR")]
        secondary: Option<String>,
        /// Save the sorted order back to the data file
        #[arg(short, long)]
        write: bool,
    },

    /// Compare bubble and merge sort on replicated samples
    Bench {
        #[arg(long, value_delimiter = ',', default_value = "10,50,100")]
        sizes: Vec<usize>,
    },

    /// Write the catalog to another CSV file
    Export {
        path: PathBuf,
    },
}

#[derive(Args)]
struct RecipeFields {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    /// Cooking time in minutes
    #[arg(long)]
    time: Option<i64>,
    /// `;`-separated list
    #[arg(long)]
    ingredients: Option<String>,
    /// `;`-separated list
    #[arg(long)]
    steps: Option<String>,
    #[arg(long)]
    calories: Option<i64>,
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl RecipeFields {
    fn into_recipe(self, name: String) -> Recipe {
        let mut recipe = Recipe::new(name, "General", 0.0, 0, Vec::new(), Vec::new()).with_difficulty("Medium");
        self.apply(&mut recipe);
        recipe
    }

    fn apply(self, recipe: &mut Recipe) {
        if let Some(category) = self.category {
            recipe.category = category;
        }
        if let Some(price) = self.price {
            recipe.set_price(price);
        }
        if let Some(time) = self.time {
            recipe.set_time_minutes(time);
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = split_list(&ingredients);
        }
        if let Some(steps) = self.steps {
            recipe.steps = split_list(&steps);
        }
        if let Some(calories) = self.calories {
            recipe.set_calories(calories);
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = image_url;
        }
    }
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn thresholds(&self) -> FactThresholds {
        let mut thresholds = FactThresholds::default();
        if let Some(price) = self.cheap_below {
            thresholds = thresholds.with_cheap_below(price);
        }
        if let Some(minutes) = self.quick_at_most {
            thresholds = thresholds.with_quick_at_most(minutes);
        }
        if let Some(calories) = self.healthy_below {
            thresholds = thresholds.with_healthy_below(calories);
        }
        if !self.contains.is_empty() {
            thresholds = thresholds.with_ingredients(self.contains.iter().cloned());
        }
        thresholds
    }
}

fn print_recipes<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) {
    let mut count = 0;
    for recipe in recipes {
        println!("{}", recipe);
        count += 1;
    }
    if count == 0 {
        println!("No recipes found.");
    }
}

fn save(catalog: &RecipeCatalog, path: &Path) -> Result<()> {
    // Header-only file when the last recipe is gone.
    io::save(path, catalog.recipes())?;
    log::debug!("Wrote {} recipes to {}", catalog.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut catalog = RecipeCatalog::with_thresholds(cli.thresholds());
    // Truth tables do not need the catalog.
    if !matches!(cli.command, Commands::TruthTable { .. }) {
        catalog.load_csv(&cli.data)?;
    }

    match cli.command {
        Commands::List => {
            print_recipes(catalog.recipes());
        }

        Commands::Show { name } => {
            let recipe = catalog
                .find_by_name(&name)
                .ok_or_else(|| eyre!("No recipe named '{}'", name))?;
            println!("{}", recipe);
            println!("Difficulty:  {}", recipe.difficulty);
            println!("Calories:    {}", recipe.calories);
            println!("Ingredients: {}", recipe.ingredients.join(", "));
            for (i, step) in recipe.steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            if !recipe.image_url.is_empty() {
                println!("Image:       {}", recipe.image_url);
            }
            let facts: Vec<String> = catalog
                .facts(recipe)
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            println!("Facts:       {}", facts.join(" "));
        }

        Commands::Add { name, fields } => {
            if catalog.find_by_name(&name).is_some() {
                log::warn!("A recipe named '{}' already exists", name);
            }
            let recipe = fields.into_recipe(name);
            println!("Added: {}", recipe);
            catalog.add(recipe);
            save(&catalog, &cli.data)?;
        }

        Commands::Edit { name, rename, fields } => {
            let recipe = catalog
                .find_by_name_mut(&name)
                .ok_or_else(|| eyre!("No recipe named '{}'", name))?;
            fields.apply(recipe);
            if let Some(new_name) = rename {
                recipe.name = new_name;
            }
            println!("Updated: {}", recipe);
            save(&catalog, &cli.data)?;
        }

        Commands::Delete { name } => {
            if !catalog.delete(&name) {
                bail!("No recipe named '{}'", name);
            }
            println!("Deleted '{}'", name);
            save(&catalog, &cli.data)?;
        }

        Commands::Search {
            name,
            category,
            ingredient,
        } => {
            let found = match (name, category, ingredient) {
                (Some(name), _, _) => catalog.search_by_name(&name),
                (_, Some(category), _) => catalog.search_by_category(&category),
                (_, _, Some(ingredient)) => catalog.search_by_ingredient(&ingredient),
                _ => bail!("Use one of --name, --category or --ingredient"),
            };
            print_recipes(found);
        }

        Commands::Filter { expr } => {
            let found = catalog.logical_search(&expr)?;
            log::info!("{} of {} recipes match", found.len(), catalog.len());
            print_recipes(found);
        }

        Commands::TruthTable { expr, satisfying } => {
            let table = truth_table(&expr)?;
            if satisfying {
                println!("{}", table.variables.join(" | "));
                for row in table.satisfying_rows() {
                    let bits: Vec<String> = row.bits.iter().map(|b| b.to_string()).collect();
                    println!("{}", bits.join(" | "));
                }
            } else {
                print!("{}", table);
            }
            if table.is_tautology() {
                println!("Tautology");
            } else if table.is_contradiction() {
                println!("Contradiction");
            }
        }

        Commands::Sort {
            algorithm,
            by,
            desc,
            secondary,
            write,
        } => {
            let sorted = catalog.sorted(algorithm, by, secondary.as_deref(), desc)?;
            log::info!("Sorted {} recipes by {} using {}", sorted.len(), by, algorithm);
            print_recipes(&sorted);
            if write {
                catalog.set_recipes(sorted);
                save(&catalog, &cli.data)?;
            }
        }

        Commands::Bench { sizes } => {
            if catalog.is_empty() {
                bail!("No recipes loaded from {}", cli.data.display());
            }
            println!(
                "{:>6} | {:>12} | {:>11} | {:>12} | {:>11}",
                "n", "bubble", "comparisons", "merge", "comparisons"
            );
            for row in catalog.benchmark(&sizes) {
                println!(
                    "{:>6} | {:>12.3?} | {:>11} | {:>12.3?} | {:>11}",
                    row.size, row.bubble, row.bubble_stats.comparisons, row.merge, row.merge_stats.comparisons
                );
            }
        }

        Commands::Export { path } => {
            if catalog.save_csv(&path)? {
                println!("Exported {} recipes to {}", catalog.len(), path.display());
            } else {
                println!("Catalog is empty, nothing exported.");
            }
        }
    }

    Ok(())
}
