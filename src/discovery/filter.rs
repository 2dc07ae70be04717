//! Filter Predicate Builder
//!
//! Turns the optional filter parameters of a request into a `RecipePredicate`.
//! The `cheap` and `quick` flags map onto the configured price and duration
//! tiers; enumerated values must parse, an unknown one rejects the request.

use super::config::DiscoveryConfig;
use super::error::DiscoveryError;
use super::types::FilterParams;
use crate::catalog::store::RecipePredicate;
use crate::catalog::types::{Category, DifficultyLevel};

use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct FilterPredicateBuilder {
    cheap_price_threshold: f64,
    quick_duration_threshold: u32,
}

impl FilterPredicateBuilder {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            cheap_price_threshold: config.cheap_price_threshold,
            quick_duration_threshold: config.quick_duration_threshold,
        }
    }

    pub fn build(&self, params: &FilterParams) -> Result<RecipePredicate, DiscoveryError> {
        let category = parse_optional::<Category>(params.category.as_deref(), "category")?;
        let difficulty_level = parse_optional::<DifficultyLevel>(
            params.difficulty_level.as_deref(),
            "difficultyLevel",
        )?;
        let cheap = parse_flag(params.cheap.as_deref(), "cheap")?;
        let quick = parse_flag(params.quick.as_deref(), "quick")?;

        Ok(RecipePredicate {
            category,
            max_price: cheap.then_some(self.cheap_price_threshold),
            max_duration: quick.then_some(self.quick_duration_threshold),
            difficulty_level,
            owner: None,
        })
    }
}

/// Absent and blank values mean "no filter"; anything else has to parse.
pub(crate) fn parse_optional<T>(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<T>, DiscoveryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| DiscoveryError::validation(field, e.to_string())),
    }
}

/// `true`/`false` in any case; absent or blank is `false`.
fn parse_flag(raw: Option<&str>, field: &'static str) -> Result<bool, DiscoveryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(DiscoveryError::validation(
            field,
            format!("expected true or false, got '{v}'"),
        )),
    }
}
