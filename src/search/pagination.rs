//! # Pagination and Sort Order
//!
//! Hotel searches page and sort through four wire keys: `pageSize`,
//! `pageIndex`, `sortDirection` and `SortField`. Callers describe them with
//! a [`HotelQuery`]; [`build_query`] turns it into parameters.

use crate::configs::PageIndexBase;
use crate::search::params::Params;
use serde_json::Value;

pub const DEFAULT_LIMIT: u64 = 25;
pub const DEFAULT_PAGE: u64 = 0;
pub const DEFAULT_ORDER_BY: &str = "-popularity";

/// Parses `value` as an integer and takes its absolute value, falling back to
/// `default` when it is missing or not an integer.
///
/// Strings are trimmed before parsing and may use single `_` separators
/// between digits, so `" 3 "` and `"1_000"` are accepted but `"2/"`, `"2.5"`
/// and `"1__0"` are not.
pub fn int_or_default(value: Option<&Value>, default: u64) -> u64 {
    let Some(value) = value else {
        return default;
    };
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.unsigned_abs()
            } else if let Some(u) = n.as_u64() {
                u
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.abs() < u64::MAX as f64 => f.trunc().abs() as u64,
                    _ => default,
                }
            }
        }
        Value::String(s) => parse_int_literal(s).map(i64::unsigned_abs).unwrap_or(default),
        Value::Bool(b) => u64::from(*b),
        _ => default,
    }
}

fn parse_int_literal(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let well_formed = digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.ends_with(|c: char| c.is_ascii_digit())
        && !digits.contains("__");
    if !well_formed {
        return None;
    }
    text.replace('_', "").parse::<i64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Sort field plus direction, parsed from the `-field` convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub direction: SortDirection,
    pub field: String,
}

impl SortOrder {
    /// `"-id"` sorts by `id` descending, `"name"` by `name` ascending.
    /// Missing or empty input means `-popularity`.
    ///
    /// After a leading `-`, the field ends at the next `-`.
    pub fn parse(order_by: Option<&str>) -> Self {
        let order_by = match order_by {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_ORDER_BY,
        };

        match order_by.strip_prefix('-') {
            Some(rest) => SortOrder {
                direction: SortDirection::Descending,
                field: rest.split('-').next().unwrap_or_default().to_string(),
            },
            None => SortOrder {
                direction: SortDirection::Ascending,
                field: order_by.to_string(),
            },
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::parse(None)
    }
}

/// Paging, sorting and extra wire parameters for a hotel search.
///
/// `limit` and `page` take any JSON scalar; invalid values fall back to the
/// defaults instead of failing the call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelQuery {
    pub limit: Option<Value>,
    pub page: Option<Value>,
    pub order_by: Option<String>,
    /// Merged last, keys sent verbatim.
    pub extra: Params,
}

impl HotelQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: impl Into<Value>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn page(mut self, page: impl Into<Value>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.extra.extend(params);
        self
    }
}

/// Adds `pageSize`, `pageIndex`, `sortDirection` and `SortField` to `base`,
/// then overlays `query.extra`.
pub fn build_query(mut base: Params, query: &HotelQuery, page_base: PageIndexBase) -> Params {
    let page_size = int_or_default(query.limit.as_ref(), DEFAULT_LIMIT);

    let page_index = match page_base {
        PageIndexBase::Zero => int_or_default(query.page.as_ref(), DEFAULT_PAGE),
        PageIndexBase::One => int_or_default(query.page.as_ref(), DEFAULT_PAGE + 1).saturating_sub(1),
    };

    let sort = SortOrder::parse(query.order_by.as_deref());

    base.insert("pageSize".to_string(), Value::from(page_size));
    base.insert("pageIndex".to_string(), Value::from(page_index));
    base.insert(
        "sortDirection".to_string(),
        Value::from(sort.direction.as_str()),
    );
    base.insert("SortField".to_string(), Value::from(sort.field));

    base.extend(query.extra.clone());
    base
}
