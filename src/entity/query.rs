//! Query builders for list and count requests

use crate::entity::filter::{FilterOperator, SortOrder};

/// Filter criteria rendered as `field.operator=value` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    params: Vec<(String, String)>,
    distinct: Option<bool>,
}

impl Criteria {
    /// Create empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter with an arbitrary operator
    pub fn filter<V: ToString>(mut self, field: &str, op: FilterOperator, value: V) -> Self {
        self.params
            .push((format!("{}.{}", field, op.as_str()), value.to_string()));
        self
    }

    /// Field equals the value
    pub fn equals<V: ToString>(self, field: &str, value: V) -> Self {
        self.filter(field, FilterOperator::Equals, value)
    }

    /// Field differs from the value
    pub fn not_equals<V: ToString>(self, field: &str, value: V) -> Self {
        self.filter(field, FilterOperator::NotEquals, value)
    }

    /// Text field contains the value
    pub fn contains(self, field: &str, value: &str) -> Self {
        self.filter(field, FilterOperator::Contains, value)
    }

    /// Text field does not contain the value
    pub fn does_not_contain(self, field: &str, value: &str) -> Self {
        self.filter(field, FilterOperator::DoesNotContain, value)
    }

    /// Field is strictly greater than the value
    pub fn greater_than<V: ToString>(self, field: &str, value: V) -> Self {
        self.filter(field, FilterOperator::GreaterThan, value)
    }

    /// Field is greater than or equal to the value
    pub fn greater_than_or_equal<V: ToString>(self, field: &str, value: V) -> Self {
        self.filter(field, FilterOperator::GreaterThanOrEqual, value)
    }

    /// Field is strictly less than the value
    pub fn less_than<V: ToString>(self, field: &str, value: V) -> Self {
        self.filter(field, FilterOperator::LessThan, value)
    }

    /// Field is less than or equal to the value
    pub fn less_than_or_equal<V: ToString>(self, field: &str, value: V) -> Self {
        self.filter(field, FilterOperator::LessThanOrEqual, value)
    }

    /// Field is one of the given values
    pub fn in_list<V: ToString>(self, field: &str, values: &[V]) -> Self {
        let joined = join_values(values);
        self.filter(field, FilterOperator::In, joined)
    }

    /// Field is none of the given values
    pub fn not_in_list<V: ToString>(self, field: &str, values: &[V]) -> Self {
        let joined = join_values(values);
        self.filter(field, FilterOperator::NotIn, joined)
    }

    /// Field is set (`true`) or unset (`false`)
    pub fn specified(self, field: &str, value: bool) -> Self {
        self.filter(field, FilterOperator::Specified, value)
    }

    /// Ask the server to de-duplicate joined rows
    pub fn distinct(mut self, value: bool) -> Self {
        self.distinct = Some(value);
        self
    }

    /// No filter and no distinct flag set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.distinct.is_none()
    }

    /// Render the criteria as query parameters
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.params.len() + 1);
        if let Some(distinct) = self.distinct {
            params.push(("distinct".to_string(), distinct.to_string()));
        }
        params.extend(self.params.iter().cloned());
        params
    }
}

fn join_values<V: ToString>(values: &[V]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Page, sort and criteria for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Vec<String>,
    pub criteria: Criteria,
}

impl ListRequest {
    /// A request without paging, sort or filters
    pub fn new() -> Self {
        Self::default()
    }

    /// First page of the given size, optionally sorted
    pub fn first_page(size: u32, sort: Option<&str>) -> Self {
        let request = Self::new().page(0).size(size);
        match sort {
            Some(sort) => request.sort_raw(sort),
            None => request,
        }
    }

    /// Zero-based page index
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Page size
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sort by a field; may be called repeatedly for secondary keys
    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort.push(format!("{},{}", field, order.as_str()));
        self
    }

    /// Sort with an already formatted `field,direction` value
    pub fn sort_raw(mut self, sort: &str) -> Self {
        self.sort.push(sort.to_string());
        self
    }

    /// Filter the listed records
    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Render the request as query parameters, with an optional cache buster
    pub fn to_params(&self, cache_buster: Option<i64>) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
        for sort in &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        params.extend(self.criteria.to_params());
        if let Some(stamp) = cache_buster {
            params.push(("cacheBuster".to_string(), stamp.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn list_request_renders_paging_sort_and_cache_buster() {
        let request = ListRequest::new()
            .page(2)
            .size(10)
            .sort("name", SortOrder::Ascending)
            .sort("id", SortOrder::Descending);

        assert_eq!(
            request.to_params(Some(1_700_000_000_000)),
            vec![
                pair("page", "2"),
                pair("size", "10"),
                pair("sort", "name,asc"),
                pair("sort", "id,desc"),
                pair("cacheBuster", "1700000000000"),
            ]
        );
    }

    #[test]
    fn empty_request_only_carries_cache_buster() {
        assert_eq!(
            ListRequest::new().to_params(Some(5)),
            vec![pair("cacheBuster", "5")]
        );
        assert!(ListRequest::new().to_params(None).is_empty());
    }

    #[test]
    fn criteria_use_field_dot_operator_keys() {
        let criteria = Criteria::new()
            .distinct(true)
            .equals("name", "EU 42")
            .in_list("id", &[1, 2, 3])
            .specified("description", false)
            .greater_than_or_equal("price", 10.5);

        assert_eq!(
            criteria.to_params(),
            vec![
                pair("distinct", "true"),
                pair("name.equals", "EU 42"),
                pair("id.in", "1,2,3"),
                pair("description.specified", "false"),
                pair("price.greaterThanOrEqual", "10.5"),
            ]
        );
    }

    #[test]
    fn first_page_uses_given_sort() {
        let request = ListRequest::first_page(20, Some("id,asc"));
        assert_eq!(request.page, Some(0));
        assert_eq!(request.size, Some(20));
        assert_eq!(request.sort, vec!["id,asc".to_string()]);
        assert!(request.criteria.is_empty());
    }
}
