//! Flat-file (CSV) I/O for recipes.
//!
//! # Format
//!
//! ```text
//! name,category,price,time_minutes,ingredients,steps,calories,difficulty[,image_url]
//! Chicken Salad,main,5.50,15,chicken;lettuce;dressing,Chop;Combine,350,Easy
//! ```
//!
//! The first line is a header; columns are matched by name, so their order is free and unknown
//! columns are ignored. Quoting follows RFC 4180 via the [`csv`] crate, and a leading UTF-8
//! byte-order mark is ignored. List fields are `;`-separated. Blank or missing cells take the
//! defaults of [`Recipe`] loading: name `Unknown`, category `General`, difficulty `Medium`,
//! numbers `0`. Other text cells are kept exactly as written.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::StringRecord;
use log::{debug, warn};

use crate::error::CatalogError;
use crate::recipe::{join_list, split_list, Recipe};

pub const COLUMNS: [&str; 8] = [
    "name",
    "category",
    "price",
    "time_minutes",
    "ingredients",
    "steps",
    "calories",
    "difficulty",
];

pub const IMAGE_URL_COLUMN: &str = "image_url";

/// Column positions of a header record.
struct Header {
    index: HashMap<String, usize>,
}

impl Header {
    fn new(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();
        Self { index }
    }

    /// The cell of `column` in `record`, unless it is missing or blank.
    ///
    /// Text is returned as written; only the blank check ignores surrounding whitespace.
    fn get<'a>(&self, record: &'a StringRecord, column: &str) -> Option<&'a str> {
        let i = *self.index.get(column)?;
        let value = record.get(i)?;
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// 1-based line `record` starts on.
fn line_of(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

fn parse_number(record: &StringRecord, column: &str, value: Option<&str>) -> Result<f64, CatalogError> {
    match value {
        None => Ok(0.0),
        Some(s) => s.trim().parse::<f64>().map_err(|_| CatalogError::Format {
            line: line_of(record),
            message: format!("invalid {} '{}'", column, s.trim()),
        }),
    }
}

fn recipe_from_record(header: &Header, record: &StringRecord) -> Result<Recipe, CatalogError> {
    let text = |column: &str, default: &str| header.get(record, column).unwrap_or(default).to_string();

    let price = parse_number(record, "price", header.get(record, "price"))?;
    let time = parse_number(record, "time_minutes", header.get(record, "time_minutes"))?;
    let calories = parse_number(record, "calories", header.get(record, "calories"))?;

    let recipe = Recipe::new(
        text("name", "Unknown"),
        text("category", "General"),
        price,
        time as i64,
        split_list(header.get(record, "ingredients").unwrap_or("")),
        split_list(header.get(record, "steps").unwrap_or("")),
    )
    .with_calories(calories as i64)
    .with_difficulty(text("difficulty", "Medium"))
    .with_image_url(text(IMAGE_URL_COLUMN, ""));

    Ok(recipe)
}

/// Reads recipes from CSV. An empty input yields no recipes.
pub fn read_recipes<R: Read>(reader: R) -> Result<Vec<Recipe>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let width = headers.len();
    let header = Header::new(&headers);

    let mut recipes = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > width {
            warn!(
                "line {}: {} fields, header has {}; extra fields ignored",
                line_of(&record),
                record.len(),
                width
            );
        }
        recipes.push(recipe_from_record(&header, &record)?);
    }
    debug!("read_recipes: {} recipes", recipes.len());
    Ok(recipes)
}

/// Writes `recipes` as CSV, with a header line.
///
/// The `image_url` column is only written when some recipe has one.
pub fn write_recipes<W: Write>(writer: W, recipes: &[Recipe]) -> Result<(), CatalogError> {
    let with_image = recipes.iter().any(|r| !r.image_url.is_empty());
    let mut writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = COLUMNS.to_vec();
    if with_image {
        header.push(IMAGE_URL_COLUMN);
    }
    writer.write_record(&header)?;

    for r in recipes {
        let mut fields = vec![
            r.name.clone(),
            r.category.clone(),
            format!("{:.2}", r.price),
            r.time_minutes.to_string(),
            join_list(&r.ingredients),
            join_list(&r.steps),
            r.calories.to_string(),
            r.difficulty.clone(),
        ];
        if with_image {
            fields.push(r.image_url.clone());
        }
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}

/// Loads recipes from `path`. A missing file loads as no recipes.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>, CatalogError> {
    let path = path.as_ref();
    match fs::File::open(path) {
        Ok(file) => read_recipes(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("load: {} does not exist", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Saves recipes to `path`, replacing its contents.
pub fn save<P: AsRef<Path>>(path: P, recipes: &[Recipe]) -> Result<(), CatalogError> {
    let file = fs::File::create(path)?;
    write_recipes(io::BufWriter::new(file), recipes)
}
