use super::{ComparisonOp, FilterExpr, Literal};

/// Creates a fluent filter builder for the specified STAC property.
///
/// The returned `FluentProperty` builds comparison nodes directly, without
/// going through the raw JSON tree.
///
/// # Examples
///
/// ```rust
/// use stac_asf::filter::property;
///
/// let filter = property("sar:instrument_mode")
///     .eq("IW")
///     .and(property("sat:relative_orbit").in_list([10, 20]));
/// assert_eq!(
///     filter.to_string(),
///     "((sar:instrument_mode = 'IW') and (sat:relative_orbit in [10, 20]))"
/// );
/// ```
pub fn property(name: &str) -> FluentProperty {
    FluentProperty {
        property: name.to_string(),
    }
}

/// Combines filters with `and`.
pub fn and(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::And(filters)
}

/// Combines filters with `or`.
///
/// Note that the compiler only expresses `or` over a single field faithfully;
/// see [`FilterCompiler`](super::FilterCompiler).
pub fn or(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Or(filters)
}

/// A fluent builder for comparisons on one property.
pub struct FluentProperty {
    property: String,
}

impl FluentProperty {
    /// Property equals the value.
    #[inline]
    pub fn eq<T: Into<Literal>>(self, value: T) -> FilterExpr {
        FilterExpr::Comparison {
            op: ComparisonOp::Equals,
            property: self.property,
            value: value.into(),
        }
    }

    /// Property is one of the values.
    pub fn in_list<T, I>(self, values: I) -> FilterExpr
    where
        T: Into<Literal>,
        I: IntoIterator<Item = T>,
    {
        FilterExpr::Membership {
            property: self.property,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl FilterExpr {
    /// Conjunction of this filter and `other`, flattening a left-hand `and`.
    pub fn and(self, other: FilterExpr) -> FilterExpr {
        match self {
            FilterExpr::And(mut children) => {
                children.push(other);
                FilterExpr::And(children)
            }
            this => FilterExpr::And(vec![this, other]),
        }
    }

    /// Disjunction of this filter and `other`, flattening a left-hand `or`.
    pub fn or(self, other: FilterExpr) -> FilterExpr {
        match self {
            FilterExpr::Or(mut children) => {
                children.push(other);
                FilterExpr::Or(children)
            }
            this => FilterExpr::Or(vec![this, other]),
        }
    }
}
