use crate::record::{Record, ID_FIELD};

/// Selection expression evaluated against each record of a collection.
///
/// Built once per request by the resolver and reused for every record the
/// store hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every record.
    All,
    /// Matches records whose `field` holds exactly the integer `value`.
    ByField { field: String, value: i64 },
    /// Matches records accepted by both sides.
    And(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn by_id(id: i64) -> Self {
        Filter::by_field(ID_FIELD, id)
    }

    pub fn by_field(field: impl Into<String>, value: i64) -> Self {
        Filter::ByField {
            field: field.into(),
            value,
        }
    }

    pub fn and(self, other: Filter) -> Self {
        Filter::And(Box::new(self), Box::new(other))
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::ByField { field, value } => record.int_field(field) == Some(*value),
            Filter::And(left, right) => left.matches(record) && right.matches(record),
        }
    }

    /// Records accepted by this filter, in collection order.
    pub fn select<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        records.iter().filter(move |r| self.matches(r))
    }
}
