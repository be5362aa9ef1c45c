// src/query.rs

//! Structured listing options for product queries.
//!
//! Callers used to pass sorting as a `"field,DIR"` string. Here the field is an enum
//! drawn from an allow-list, so repositories only ever see known column names.

use std::fmt;
use std::str::FromStr;

use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl SortDirection {
  pub fn as_sql(self) -> &'static str {
    match self {
      SortDirection::Asc => "ASC",
      SortDirection::Desc => "DESC",
    }
  }
}

impl FromStr for SortDirection {
  type Err = ShopError;

  fn from_str(raw: &str) -> ShopResult<Self> {
    match raw.trim().to_ascii_uppercase().as_str() {
      "ASC" => Ok(SortDirection::Asc),
      "DESC" => Ok(SortDirection::Desc),
      _ => Err(ShopError::validation(format!("Invalid sort direction '{}'", raw.trim()))),
    }
  }
}

/// Product columns that may be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
  #[default]
  Id,
  Name,
  Price,
  Inventory,
}

impl SortField {
  pub fn column(self) -> &'static str {
    match self {
      SortField::Id => "id",
      SortField::Name => "name",
      SortField::Price => "price",
      SortField::Inventory => "inventory",
    }
  }
}

impl FromStr for SortField {
  type Err = ShopError;

  fn from_str(raw: &str) -> ShopResult<Self> {
    match raw.trim() {
      "id" => Ok(SortField::Id),
      "name" => Ok(SortField::Name),
      "price" => Ok(SortField::Price),
      "inventory" => Ok(SortField::Inventory),
      other => Err(ShopError::validation(format!("Cannot sort products by '{}'", other))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductSort {
  pub field: SortField,
  pub direction: SortDirection,
}

impl ProductSort {
  pub fn new(field: SortField, direction: SortDirection) -> Self {
    Self { field, direction }
  }
}

/// Parses `"field"` or `"field,DIR"`.
impl FromStr for ProductSort {
  type Err = ShopError;

  fn from_str(raw: &str) -> ShopResult<Self> {
    let (field, direction) = match raw.split_once(',') {
      Some((field, direction)) => (field, direction.parse()?),
      None => (raw, SortDirection::Asc),
    };
    Ok(Self {
      field: field.parse()?,
      direction,
    })
  }
}

impl fmt::Display for ProductSort {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.field.column(), self.direction.as_sql())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
  pub sort: Option<ProductSort>,
  pub limit: Option<u32>,
  pub offset: Option<u32>,
}

impl ListOptions {
  /// Builds options from raw query-string values. Blank values count as absent.
  pub fn from_query(sort: Option<&str>, limit: Option<&str>, offset: Option<&str>) -> ShopResult<Self> {
    let sort = match non_blank(sort) {
      Some(raw) => Some(raw.parse::<ProductSort>()?),
      None => None,
    };
    Ok(Self {
      sort,
      limit: parse_count("limit", limit)?,
      offset: parse_count("offset", offset)?,
    })
  }

  pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
    self.sort = Some(ProductSort::new(field, direction));
    self
  }

  pub fn with_limit(mut self, limit: u32) -> Self {
    self.limit = Some(limit);
    self
  }

  pub fn with_offset(mut self, offset: u32) -> Self {
    self.offset = Some(offset);
    self
  }

  /// Sort to apply, falling back to id ascending.
  pub fn effective_sort(&self) -> ProductSort {
    self.sort.unwrap_or_default()
  }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
  raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_count(name: &str, raw: Option<&str>) -> ShopResult<Option<u32>> {
  match non_blank(raw) {
    Some(value) => value
      .parse::<u32>()
      .map(Some)
      .map_err(|_| ShopError::validation(format!("Invalid {} '{}'", name, value))),
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_field_and_direction() {
    let sort: ProductSort = "name,ASC".parse().unwrap();
    assert_eq!(sort, ProductSort::new(SortField::Name, SortDirection::Asc));

    let sort: ProductSort = "price,desc".parse().unwrap();
    assert_eq!(sort, ProductSort::new(SortField::Price, SortDirection::Desc));
  }

  #[test]
  fn direction_defaults_to_ascending() {
    let sort: ProductSort = "inventory".parse().unwrap();
    assert_eq!(sort.direction, SortDirection::Asc);
    assert_eq!(sort.to_string(), "inventory,ASC");
  }

  #[test]
  fn unknown_fields_are_not_sortable() {
    let err = "categoryId; DROP TABLE products,ASC".parse::<ProductSort>().unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));
    assert_eq!(err.to_string(), "Cannot sort products by 'categoryId; DROP TABLE products'");

    let err = "name,SIDEWAYS".parse::<ProductSort>().unwrap_err();
    assert_eq!(err.to_string(), "Invalid sort direction 'SIDEWAYS'");
  }

  #[test]
  fn query_values_are_parsed_from_strings() {
    let options = ListOptions::from_query(Some("name,ASC"), Some("10"), Some("15")).unwrap();
    assert_eq!(options.limit, Some(10));
    assert_eq!(options.offset, Some(15));
    assert_eq!(options.sort, Some(ProductSort::new(SortField::Name, SortDirection::Asc)));

    let options = ListOptions::from_query(None, Some(" "), None).unwrap();
    assert_eq!(options, ListOptions::default());
    assert_eq!(options.effective_sort(), ProductSort::new(SortField::Id, SortDirection::Asc));
  }

  #[test]
  fn malformed_counts_are_rejected() {
    let err = ListOptions::from_query(None, Some("ten"), None).unwrap_err();
    assert_eq!(err.to_string(), "Invalid limit 'ten'");

    let err = ListOptions::from_query(None, None, Some("-1")).unwrap_err();
    assert_eq!(err.to_string(), "Invalid offset '-1'");
  }
}
