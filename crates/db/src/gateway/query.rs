//! Composable, lazily-executed queries.
//!
//! A [`Query`] only describes what to read; nothing touches the store until it
//! is handed to [`Session::fetch`](super::Session::fetch). Column names are
//! `&'static str` so filters can only reference columns named in code.

use std::marker::PhantomData;

use super::{Column, Entity, Record, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A single ORDER BY term.
#[derive(Debug, Clone, Copy)]
pub struct Order {
    pub column: &'static str,
    pub direction: Direction,
}

/// A row predicate.
#[derive(Debug, Clone)]
pub enum Filter {
    /// `column = value`
    Eq(&'static str, Value),
    /// Case-insensitive substring match. The needle is matched literally.
    ContainsIgnoreCase(&'static str, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq(column, value.into())
    }

    pub fn contains(column: &'static str, needle: impl Into<String>) -> Self {
        Filter::ContainsIgnoreCase(column, needle.into())
    }

    /// `self OR other`
    pub fn or(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut filters) => {
                filters.push(other);
                Filter::Or(filters)
            }
            first => Filter::Or(vec![first, other]),
        }
    }

    /// `self AND other`
    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// Evaluate the predicate against an in-memory record.
    pub fn matches(&self, key: &str, record: &Record) -> bool {
        match self {
            Filter::Eq(column, expected) => record
                .get(key, column)
                .is_some_and(|actual| &actual == expected),
            Filter::ContainsIgnoreCase(column, needle) => match record.get(key, column) {
                Some(Value::Text(text)) => text.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(key, record)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(key, record)),
        }
    }
}

/// Type-erased read request handed to a [`Store`](super::Store).
#[derive(Debug, Clone)]
pub struct Select {
    pub table: &'static str,
    pub key: &'static str,
    pub columns: &'static [Column],
    pub filter: Option<Filter>,
    /// Explicit ordering. Stores always append the key ascending as a final
    /// tiebreaker, so an empty list means insertion order.
    pub order: Vec<Order>,
}

/// A typed, composable query over entity `E`.
#[derive(Debug, Clone)]
pub struct Query<E> {
    filter: Option<Filter>,
    order: Vec<Order>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Query<E> {
    /// All rows, natural order.
    pub fn new() -> Self {
        Self {
            filter: None,
            order: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Narrow the query. Repeated calls are AND-composed.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
        self
    }

    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order.push(Order { column, direction });
        self
    }

    /// Point lookup on the primary key.
    pub fn by_id(id: i64) -> Self {
        Self::new().filter(Filter::eq(E::KEY, id))
    }

    pub fn to_select(&self) -> Select {
        Select {
            table: E::TABLE,
            key: E::KEY,
            columns: E::COLUMNS,
            filter: self.filter.clone(),
            order: self.order.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
