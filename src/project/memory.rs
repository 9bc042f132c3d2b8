//! In-memory project for fixtures and tests

use std::cell::RefCell;
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use super::query::{Condition, Query};
use super::record::Record;
use super::ProjectQuery;
use crate::error::helpers::common;
use crate::error::{ErrorCode, MacroError, Result};
use crate::metrics::{parse_date, to_integer};
use crate::params::key_for;

/// Project whose cards live in memory.
///
/// Cards are records keyed by snake_case column key and carry their card
/// type under `type`. Every executed query is recorded for later inspection.
#[derive(Debug)]
pub struct InMemoryProject {
    today: NaiveDate,
    variables: HashMap<String, String>,
    cards: Vec<Record>,
    /// 1-based index of the first failing query, with its message
    failure: Option<(usize, String)>,
    executed: RefCell<Vec<String>>,
}

impl InMemoryProject {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            variables: HashMap::new(),
            cards: Vec::new(),
            failure: None,
            executed: RefCell::new(Vec::new()),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_card(mut self, card: Record) -> Self {
        self.cards.push(card);
        self
    }

    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Record>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// Make every query fail with `message`
    pub fn failing_with(self, message: impl Into<String>) -> Self {
        self.failing_from(1, message)
    }

    /// Let the first `query - 1` queries succeed, then fail with `message`
    pub fn failing_from(mut self, query: usize, message: impl Into<String>) -> Self {
        self.failure = Some((query.max(1), message.into()));
        self
    }

    /// Text of every query executed so far, oldest first
    pub fn executed_queries(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    pub fn cards(&self) -> &[Record] {
        &self.cards
    }

    fn matches(&self, card: &Record, condition: &Condition) -> Result<bool> {
        let matched = match condition {
            Condition::TypeIs(card_type) => card
                .get("type")
                .is_some_and(|value| value.eq_ignore_ascii_case(card_type)),
            Condition::Equals { field, value } => {
                card.get(&key_for(field)).is_some_and(|v| v == value)
            }
            Condition::NumberEquals { field, value } => card
                .get(&key_for(field))
                .is_some_and(|v| to_integer(Some(v)) == i64::from(*value)),
            Condition::BeforeToday { field } => match card.get(&key_for(field)) {
                Some(v) => parse_date(v)? < self.today,
                None => false,
            },
            Condition::NotIn { field, values } => card
                .get(&key_for(field))
                .map_or(true, |v| !values.iter().any(|candidate| candidate == v)),
        };
        Ok(matched)
    }

    fn project(&self, card: &Record, select: &[String]) -> Record {
        select
            .iter()
            .map(|label| {
                let key = key_for(label);
                let value = card.get(&key).map(str::to_string);
                (key, value)
            })
            .collect()
    }
}

/// Dates sort as dates, anything else as text; missing values sort last
fn compare_values(a: Option<&str>, b: Option<&str>) -> CmpOrdering {
    match (a, b) {
        (Some(a), Some(b)) => match (parse_date(a), parse_date(b)) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => a.cmp(b),
        },
        (Some(_), None) => CmpOrdering::Less,
        (None, Some(_)) => CmpOrdering::Greater,
        (None, None) => CmpOrdering::Equal,
    }
}

impl ProjectQuery for InMemoryProject {
    fn execute(&self, query: &Query) -> Result<Vec<Record>> {
        let text = query.to_string();
        debug!(query = %text, "executing in-memory query");
        let issued = {
            let mut executed = self.executed.borrow_mut();
            executed.push(text);
            executed.len()
        };

        if let Some((_, message)) = self.failure.as_ref().filter(|(from, _)| issued >= *from) {
            return Err(MacroError::query_with_code(
                ErrorCode::QUERY_FAILED,
                message.clone(),
                None,
            ));
        }

        let mut matched = Vec::new();
        for card in &self.cards {
            let mut keep = true;
            for condition in &query.conditions {
                if !self.matches(card, condition)? {
                    keep = false;
                    break;
                }
            }
            if keep {
                matched.push(card);
            }
        }

        if let Some(order) = &query.order {
            let key = key_for(&order.field);
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(&key), b.get(&key));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        Ok(matched
            .into_iter()
            .map(|card| self.project(card, &query.select))
            .collect())
    }

    fn project_variable(&self, name: &str) -> Result<String> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| common::undefined_variable(name))
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
