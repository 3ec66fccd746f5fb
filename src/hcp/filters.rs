//! List query construction: filters, paging, search, include and sort
//!
//! Filters are ordered `{keys, value}` entries rendered as bracketed query
//! parameters, e.g. `keys = ["workspace", "id"]` becomes
//! `filter[workspace][id]=value`. The client only checks a filter's shape;
//! which keys an endpoint requires is left to the server.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, TfeError};

/// A single list filter
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub keys: Vec<String>,
    pub value: String,
}

impl Filter {
    pub fn new<I, K>(keys: I, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }

    /// Shape check: at least one key, and no empty key segment
    pub fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(TfeError::InvalidFilter(format!(
                "filter with value '{}' has no keys",
                self.value
            )));
        }
        if self.keys.iter().any(|k| k.trim().is_empty()) {
            return Err(TfeError::InvalidFilter(format!(
                "filter {:?} contains an empty key",
                self.keys
            )));
        }
        Ok(())
    }

    /// Bracketed parameter name, e.g. `filter[workspace][id]`
    pub fn param_name(&self) -> String {
        let mut name = String::from("filter");
        for key in &self.keys {
            name.push('[');
            name.push_str(&urlencoding::encode(key));
            name.push(']');
        }
        name
    }

    /// Full `name=value` query segment
    pub fn to_query_segment(&self) -> Result<String> {
        self.validate()?;
        Ok(format!(
            "{}={}",
            self.param_name(),
            urlencoding::encode(&self.value)
        ))
    }
}

/// Parse `workspace.id=ws-123` (dot-separated key path)
impl FromStr for Filter {
    type Err = TfeError;

    fn from_str(s: &str) -> Result<Self> {
        let (path, value) = s.split_once('=').ok_or_else(|| {
            TfeError::InvalidFilter(format!("expected KEY.PATH=VALUE, got '{}'", s))
        })?;
        let filter = Filter::new(path.split('.'), value);
        filter.validate()?;
        Ok(filter)
    }
}

/// Render filters as `&`-joined query segments, preserving input order
pub fn filters_to_query(filters: &[Filter]) -> Result<String> {
    let segments = filters
        .iter()
        .map(Filter::to_query_segment)
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("&"))
}

/// Options for a single-page list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub include: Option<String>,
    pub search: Vec<(String, String)>,
    pub filters: Vec<Filter>,
    pub sort: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: &[Filter]) -> Self {
        self.filters = filters.to_vec();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn with_search(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.search.push((key.into(), value.into()));
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Build the query string (without leading `?`)
    ///
    /// Order: page number, page size, include, search, filters, sort.
    pub fn to_query_string(&self) -> Result<String> {
        let mut segments: Vec<String> = Vec::new();

        if let Some(page) = self.page_number {
            segments.push(format!("page[number]={}", page));
        }
        if let Some(size) = self.page_size {
            segments.push(format!("page[size]={}", size));
        }
        if let Some(ref include) = self.include {
            segments.push(format!("include={}", urlencoding::encode(include)));
        }
        for (key, value) in &self.search {
            segments.push(format!(
                "search[{}]={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            ));
        }
        let filters = filters_to_query(&self.filters)?;
        if !filters.is_empty() {
            segments.push(filters);
        }
        if let Some(ref sort) = self.sort {
            segments.push(format!("sort={}", urlencoding::encode(sort)));
        }

        Ok(segments.join("&"))
    }

    /// Append the query string to a URL, if there is one
    pub fn apply_to(&self, url: &str) -> Result<String> {
        let query = self.to_query_string()?;
        if query.is_empty() {
            return Ok(url.to_string());
        }
        let separator = if url.contains('?') { "&" } else { "?" };
        Ok(format!("{}{}{}", url, separator, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_filter() {
        let f = Filter::new(["workspace", "id"], "ws-123");
        assert_eq!(f.param_name(), "filter[workspace][id]");
        assert_eq!(f.to_query_segment().unwrap(), "filter[workspace][id]=ws-123");
    }

    #[test]
    fn test_filters_keep_input_order() {
        let filters = vec![
            Filter::new(["workspace", "id"], "ws-1"),
            Filter::new(["team", "id"], "team-2"),
            Filter::new(["access"], "admin"),
        ];
        let query = filters_to_query(&filters).unwrap();
        assert_eq!(
            query,
            "filter[workspace][id]=ws-1&filter[team][id]=team-2&filter[access]=admin"
        );
    }

    #[test]
    fn test_one_segment_per_filter() {
        for n in 0..6 {
            let filters: Vec<Filter> = (0..n)
                .map(|i| Filter::new(["k".to_string(), format!("n{}", i)], format!("v{}", i)))
                .collect();
            let query = filters_to_query(&filters).unwrap();
            let segments: Vec<&str> = if query.is_empty() {
                vec![]
            } else {
                query.split('&').collect()
            };
            assert_eq!(segments.len(), n);
            for (i, segment) in segments.iter().enumerate() {
                assert_eq!(*segment, format!("filter[k][n{}]=v{}", i, i));
            }
        }
    }

    #[test]
    fn test_duplicate_filters_are_kept() {
        let filters = vec![
            Filter::new(["workspace", "id"], "ws-1"),
            Filter::new(["workspace", "id"], "ws-1"),
        ];
        let query = filters_to_query(&filters).unwrap();
        assert_eq!(query.matches("filter[workspace][id]=ws-1").count(), 2);
    }

    #[test]
    fn test_value_is_encoded() {
        let f = Filter::new(["name"], "a b&c");
        assert_eq!(f.to_query_segment().unwrap(), "filter[name]=a%20b%26c");
    }

    #[test]
    fn test_empty_keys_rejected() {
        let f = Filter::new(Vec::<String>::new(), "ws-1");
        assert!(matches!(f.validate(), Err(TfeError::InvalidFilter(_))));
        assert!(filters_to_query(&[f]).is_err());
    }

    #[test]
    fn test_blank_key_rejected() {
        let f = Filter::new(["workspace", ""], "ws-1");
        assert!(matches!(
            f.to_query_segment(),
            Err(TfeError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_from_str() {
        let f: Filter = "workspace.id=ws-abc".parse().unwrap();
        assert_eq!(f, Filter::new(["workspace", "id"], "ws-abc"));

        let f: Filter = "access=read=only".parse().unwrap();
        assert_eq!(f.keys, vec!["access"]);
        assert_eq!(f.value, "read=only");
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("workspace.id".parse::<Filter>().is_err());
        assert!("workspace..id=x".parse::<Filter>().is_err());
        assert!("=x".parse::<Filter>().is_err());
    }

    #[test]
    fn test_deserialize_filter_shape() {
        let f: Filter = serde_json::from_value(serde_json::json!({
            "keys": ["workspace", "id"],
            "value": "foo"
        }))
        .unwrap();
        assert_eq!(f.to_query_segment().unwrap(), "filter[workspace][id]=foo");
    }

    #[test]
    fn test_list_options_empty() {
        let options = ListOptions::new();
        assert_eq!(options.to_query_string().unwrap(), "");
        assert_eq!(
            options.apply_to("https://x/api/v2/team-workspaces").unwrap(),
            "https://x/api/v2/team-workspaces"
        );
    }

    #[test]
    fn test_list_options_full_order() {
        let options = ListOptions::new()
            .with_sort("name")
            .with_filter(Filter::new(["workspace", "id"], "ws-1"))
            .with_search("name", "dev")
            .with_include("team")
            .with_page_size(50)
            .with_page(2);
        assert_eq!(
            options.to_query_string().unwrap(),
            "page[number]=2&page[size]=50&include=team&search[name]=dev&filter[workspace][id]=ws-1&sort=name"
        );
    }

    #[test]
    fn test_apply_to_existing_query() {
        let options = ListOptions::new().with_page(1);
        assert_eq!(
            options.apply_to("https://x/items?foo=bar").unwrap(),
            "https://x/items?foo=bar&page[number]=1"
        );
    }

    #[test]
    fn test_with_filters_replaces() {
        let options = ListOptions::new()
            .with_filter(Filter::new(["a"], "1"))
            .with_filters(&[Filter::new(["b"], "2")]);
        assert_eq!(options.filters.len(), 1);
        assert_eq!(options.to_query_string().unwrap(), "filter[b]=2");
    }
}
