//! Structured project queries
//!
//! Macros describe what they need as a [`Query`] rather than a raw string.
//! `Display` renders the host's query-language text, e.g.
//!
//! ```text
//! SELECT name, 'End Date' WHERE Type = iteration AND 'End Date' < today ORDER BY 'End Date' desc
//! ```

use std::fmt;

/// One clause of a query's WHERE conjunction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Card type, compared case-insensitively
    TypeIs(String),
    Equals { field: String, value: String },
    NumberEquals { field: String, value: u32 },
    /// Date property strictly before the host's today
    BeforeToday { field: String },
    /// Property value outside the list; cards without a value match
    NotIn { field: String, values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub select: Vec<String>,
    pub conditions: Vec<Condition>,
    pub order: Option<Ordering>,
}

impl Query {
    /// Start a query selecting the given field labels
    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            select: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn card_type(mut self, card_type: impl Into<String>) -> Self {
        self.conditions.push(Condition::TypeIs(card_type.into()));
        self
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn where_number(mut self, field: impl Into<String>, value: u32) -> Self {
        self.conditions.push(Condition::NumberEquals {
            field: field.into(),
            value,
        });
        self
    }

    pub fn where_before_today(mut self, field: impl Into<String>) -> Self {
        self.conditions.push(Condition::BeforeToday {
            field: field.into(),
        });
        self
    }

    pub fn where_not_in<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.push(Condition::NotIn {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some(Ordering {
            field: field.into(),
            descending: true,
        });
        self
    }
}

/// Multi-word field labels are quoted, single words are not
fn quote_field(field: &str) -> String {
    if field.contains(char::is_whitespace) {
        format!("'{}'", field)
    } else {
        field.to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::TypeIs(card_type) => write!(f, "Type = {}", card_type),
            Condition::Equals { field, value } => {
                write!(f, "{} = '{}'", quote_field(field), value)
            }
            Condition::NumberEquals { field, value } => {
                write!(f, "{} = {}", quote_field(field), value)
            }
            Condition::BeforeToday { field } => write!(f, "{} < today", quote_field(field)),
            Condition::NotIn { field, values } => {
                let list = values
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "NOT {} in ({})", quote_field(field), list)
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .select
            .iter()
            .map(|field| quote_field(field))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "SELECT {}", fields)?;

        if !self.conditions.is_empty() {
            let clauses = self
                .conditions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" AND ");
            write!(f, " WHERE {}", clauses)?;
        }

        if let Some(order) = &self.order {
            write!(
                f,
                " ORDER BY {} {}",
                quote_field(&order.field),
                if order.descending { "desc" } else { "asc" }
            )?;
        }
        Ok(())
    }
}
