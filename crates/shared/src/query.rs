//! Filter/sort state and its projection onto the `GET /documents` query string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::domain::{Category, Importance};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
    Importance,
    Active,
}

wire_enum!(SortField, "sort field", {
    CreatedAt => "created_at",
    Title => "title",
    Importance => "importance",
    Active => "active",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

wire_enum!(SortOrder, "sort order", {
    Asc => "asc",
    Desc => "desc",
});

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// User-selected filters and ordering for the document list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Option<Category>,
    pub active: Option<bool>,
    pub importance: Option<Importance>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

impl FilterState {
    pub fn query_params(&self) -> QueryParams {
        build_query_params(self)
    }
}

/// Ordered key/value pairs sent to the list endpoint. Only set filters appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

/// Projects `filters` onto query parameters. Date ordering is not checked;
/// the backend owns that validation.
pub fn build_query_params(filters: &FilterState) -> QueryParams {
    let mut pairs = Vec::with_capacity(7);

    if let Some(category) = filters.category {
        pairs.push(("category", category.as_str().to_string()));
    }
    if let Some(active) = filters.active {
        pairs.push(("active", active.to_string()));
    }
    if let Some(importance) = filters.importance {
        pairs.push(("importance", importance.as_str().to_string()));
    }
    pairs.push(("sort", filters.sort_field.as_str().to_string()));
    pairs.push(("order", filters.sort_order.as_str().to_string()));
    if let Some(from) = filters.created_from {
        pairs.push(("created_from", from.format(DATE_FORMAT).to_string()));
    }
    if let Some(to) = filters.created_to {
        pairs.push(("created_to", to.format(DATE_FORMAT).to_string()));
    }

    QueryParams { pairs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn defaults_only_carry_sort_and_order() {
        let params = build_query_params(&FilterState::default());

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["sort", "order"]);
        assert_eq!(params.get("sort"), Some("created_at"));
        assert_eq!(params.get("order"), Some("desc"));
    }

    #[test]
    fn category_adds_no_other_optional_keys() {
        let filters = FilterState {
            category: Some(Category::Internal),
            ..FilterState::default()
        };
        let params = filters.query_params();

        assert_eq!(params.get("category"), Some("internal"));
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["category", "sort", "order"]
        );
    }

    #[test]
    fn toggling_sort_order_twice_round_trips() {
        for order in SortOrder::ALL {
            assert_ne!(order.toggled(), *order);
            assert_eq!(order.toggled().toggled(), *order);
        }
    }

    #[test]
    fn public_title_ascending_renders_expected_query_string() {
        let filters = FilterState {
            category: Some(Category::Public),
            sort_field: SortField::Title,
            sort_order: SortOrder::Asc,
            ..FilterState::default()
        };

        assert_eq!(
            filters.query_params().to_query_string(),
            "category=public&sort=title&order=asc"
        );
    }

    #[test]
    fn every_filter_set_keeps_wire_key_order() {
        let filters = FilterState {
            category: Some(Category::Confidential),
            active: Some(false),
            importance: Some(Importance::High),
            sort_field: SortField::Importance,
            sort_order: SortOrder::Desc,
            created_from: Some(date(2024, 1, 5)),
            created_to: Some(date(2024, 12, 31)),
        };

        assert_eq!(
            filters.query_params().to_query_string(),
            "category=confidential&active=false&importance=high&sort=importance&order=desc\
             &created_from=2024-01-05&created_to=2024-12-31"
        );
    }

    #[test]
    fn inverted_date_range_is_passed_through() {
        let filters = FilterState {
            created_from: Some(date(2025, 6, 1)),
            created_to: Some(date(2025, 1, 1)),
            ..FilterState::default()
        };
        let params = filters.query_params();

        assert_eq!(params.get("created_from"), Some("2025-06-01"));
        assert_eq!(params.get("created_to"), Some("2025-01-01"));
    }

    #[test]
    fn sort_fields_parse_from_wire_names() {
        assert_eq!("created_at".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert_eq!("Title".parse::<SortField>(), Ok(SortField::Title));
        assert!("author".parse::<SortField>().is_err());
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
    }
}
