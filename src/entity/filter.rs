//! Filter operations for entity criteria

/// Operator for criteria expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to
    Equals,

    /// Not equal to
    NotEquals,

    /// In a list of values
    In,

    /// Not in a list of values
    NotIn,

    /// Field is (or is not) set
    Specified,

    /// Text contains
    Contains,

    /// Text does not contain
    DoesNotContain,

    /// Greater than
    GreaterThan,

    /// Less than
    LessThan,

    /// Greater than or equal to
    GreaterThanOrEqual,

    /// Less than or equal to
    LessThanOrEqual,
}

impl FilterOperator {
    /// Convert the operator to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "notEquals",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notIn",
            FilterOperator::Specified => "specified",
            FilterOperator::Contains => "contains",
            FilterOperator::DoesNotContain => "doesNotContain",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            FilterOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Direction as written in a `sort` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}
