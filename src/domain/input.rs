//! Form input parsing
//!
//! Every field arrives as text. These functions turn raw form payloads
//! into validated domain values before anything touches the database.

use chrono::NaiveDate;
use serde::Deserialize;

use super::DomainError;

/// Dates are accepted as day-month-year, e.g. `16-12-1775`.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Raw add-author form payload
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub date_of_death: String,
}

/// Raw add-book form payload
#[derive(Debug, Clone, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publication_year: String,
    #[serde(default)]
    pub author_id: String,
}

/// Raw rate-book form payload
#[derive(Debug, Clone, Deserialize)]
pub struct RatingForm {
    #[serde(default)]
    pub rating: String,
}

/// Validated author input
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Validated book input
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub author_id: i32,
}

impl NewAuthor {
    pub fn from_form(form: AuthorForm) -> Result<Self, DomainError> {
        let name = required(&form.name, "name")?;
        let birth_date = parse_date_opt(&form.birth_date, "birth_date")?;
        let date_of_death = parse_date_opt(&form.date_of_death, "date_of_death")?;

        if let (Some(birth), Some(death)) = (birth_date, date_of_death)
            && death < birth
        {
            return Err(DomainError::Validation(
                "date_of_death must be on or after birth_date".to_string(),
            ));
        }

        Ok(Self {
            name,
            birth_date,
            date_of_death,
        })
    }
}

impl NewBook {
    pub fn from_form(form: BookForm) -> Result<Self, DomainError> {
        let title = required(&form.title, "title")?;
        let isbn = optional(&form.isbn);
        let publication_year = match optional(&form.publication_year) {
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                DomainError::Validation(format!("publication_year '{}' is not a number", raw))
            })?),
            None => None,
        };
        let author_id = form.author_id.trim().parse::<i32>().map_err(|_| {
            DomainError::Validation(format!("author_id '{}' is not a number", form.author_id))
        })?;

        Ok(Self {
            title,
            isbn,
            publication_year,
            author_id,
        })
    }
}

/// Parse the rating field. Blank means "leave the rating alone".
pub fn parse_rating(raw: &str) -> Result<Option<i32>, DomainError> {
    let Some(raw) = optional(raw) else {
        return Ok(None);
    };

    let rating = raw
        .parse::<i32>()
        .map_err(|_| DomainError::Validation(format!("rating '{}' is not a number", raw)))?;

    if !(1..=10).contains(&rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between 1 and 10, got {}",
            rating
        )));
    }

    Ok(Some(rating))
}

/// Empty or whitespace-only input counts as absent.
fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required(raw: &str, field: &str) -> Result<String, DomainError> {
    optional(raw).ok_or_else(|| DomainError::Validation(format!("{} is required", field)))
}

fn parse_date_opt(raw: &str, field: &str) -> Result<Option<NaiveDate>, DomainError> {
    match optional(raw) {
        Some(value) => NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                DomainError::Validation(format!(
                    "{} '{}' does not match the DD-MM-YYYY format",
                    field, value
                ))
            }),
        None => Ok(None),
    }
}
