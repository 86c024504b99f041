//! Custom `first` and `last` aggregate functions.
//!
//! SQLite ships `min`, `max` and `sum`, but no aggregate that keeps the
//! first or last value a group delivers, which is exactly what the open and
//! close of a resampled bar are. Both functions take one argument, kept as
//! its text representation, and reduce by order of arrival: chronological
//! results require the surrounding query to deliver rows in timestamp
//! order, which [`ResamplePlan`](crate::ResamplePlan) guarantees through
//! its ordered source subquery.

use rusqlite::functions::{Aggregate, Context, FunctionFlags};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, Error};
use tracing::warn;

use crate::accumulator::TextAccumulator;

/// SQL name of the first-by-arrival aggregate.
pub const FIRST_FN: &str = "first";

/// SQL name of the last-by-arrival aggregate.
pub const LAST_FN: &str = "last";

/// First-by-arrival aggregate: keeps the value of the first row delivered to
/// the group. NULL inputs are skipped.
#[derive(Debug)]
pub struct FirstByArrival;

/// Last-by-arrival aggregate: keeps the value of the most recently delivered
/// row. NULL inputs are skipped.
#[derive(Debug)]
pub struct LastByArrival;

/// Extracts the single argument of a step call as text.
///
/// The registered arity is enforced by the engine at prepare time, so a
/// mismatched call cannot normally reach this point; if one ever does it is
/// rejected with an explicit error rather than silently ignored. Integer and
/// real arguments are coerced to their text representation, so the
/// aggregates work directly over numeric price columns.
fn step_input(ctx: &Context<'_>, name: &str) -> rusqlite::Result<Option<String>> {
    if ctx.len() != 1 {
        warn!(
            function = name,
            args = ctx.len(),
            "aggregate step called with wrong argument count"
        );
        return Err(Error::InvalidParameterCount(ctx.len(), 1));
    }
    match ctx.get_raw(0) {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(i) => Ok(Some(i.to_string())),
        ValueRef::Real(r) => Ok(Some(r.to_string())),
        ValueRef::Text(t) => std::str::from_utf8(t)
            .map(|s| Some(s.to_string()))
            .map_err(Error::Utf8Error),
        ValueRef::Blob(_) => Err(Error::InvalidFunctionParameterType(0, Type::Blob)),
    }
}

impl Aggregate<TextAccumulator, Option<String>> for FirstByArrival {
    fn init(&self, _: &mut Context<'_>) -> rusqlite::Result<TextAccumulator> {
        Ok(TextAccumulator::new())
    }

    fn step(&self, ctx: &mut Context<'_>, acc: &mut TextAccumulator) -> rusqlite::Result<()> {
        if let Some(text) = step_input(ctx, FIRST_FN)? {
            acc.observe_first(text);
        }
        Ok(())
    }

    fn finalize(
        &self,
        _: &mut Context<'_>,
        acc: Option<TextAccumulator>,
    ) -> rusqlite::Result<Option<String>> {
        Ok(acc.and_then(TextAccumulator::into_value))
    }
}

impl Aggregate<TextAccumulator, Option<String>> for LastByArrival {
    fn init(&self, _: &mut Context<'_>) -> rusqlite::Result<TextAccumulator> {
        Ok(TextAccumulator::new())
    }

    fn step(&self, ctx: &mut Context<'_>, acc: &mut TextAccumulator) -> rusqlite::Result<()> {
        if let Some(text) = step_input(ctx, LAST_FN)? {
            acc.observe_last(text);
        }
        Ok(())
    }

    fn finalize(
        &self,
        _: &mut Context<'_>,
        acc: Option<TextAccumulator>,
    ) -> rusqlite::Result<Option<String>> {
        Ok(acc.and_then(TextAccumulator::into_value))
    }
}

/// Registers the `first` and `last` aggregates on a connection.
///
/// # Errors
///
/// Returns an error if the engine rejects the registration.
pub fn register_aggregates(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_aggregate_function(FIRST_FN, 1, FunctionFlags::SQLITE_UTF8, FirstByArrival)?;
    conn.create_aggregate_function(LAST_FN, 1, FunctionFlags::SQLITE_UTF8, LastByArrival)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        register_aggregates(&conn).unwrap();
        conn.execute_batch("CREATE TABLE t (x TEXT)").unwrap();
        conn
    }

    fn insert(conn: &Connection, values: &[&str]) {
        let mut stmt = conn.prepare("INSERT INTO t (x) VALUES (?1)").unwrap();
        for v in values {
            stmt.execute([v]).unwrap();
        }
    }

    #[test]
    fn first_and_last_reduce_by_arrival_order() {
        let conn = connection();
        // Deliberately not value-ordered: arrival order must win.
        insert(&conn, &["9", "1", "5"]);
        let first: String = conn
            .query_row("SELECT first(x) FROM t", [], |r| r.get(0))
            .unwrap();
        let last: String = conn
            .query_row("SELECT last(x) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(first, "9");
        assert_eq!(last, "5");
    }

    #[test]
    fn single_row_yields_identical_results() {
        let conn = connection();
        insert(&conn, &["7"]);
        let (first, last): (String, String) = conn
            .query_row("SELECT first(x), last(x) FROM t", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(first, last);
    }

    #[test]
    fn empty_scan_yields_null() {
        let conn = connection();
        let first: Option<String> = conn
            .query_row("SELECT first(x) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(first, None);
    }

    #[test]
    fn null_inputs_are_skipped() {
        let conn = connection();
        conn.execute("INSERT INTO t (x) VALUES (NULL)", []).unwrap();
        insert(&conn, &["a", "b"]);
        conn.execute("INSERT INTO t (x) VALUES (NULL)", []).unwrap();
        let (first, last): (String, String) = conn
            .query_row("SELECT first(x), last(x) FROM t", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(first, "a");
        assert_eq!(last, "b");
    }

    #[test]
    fn zero_argument_call_is_rejected_at_prepare() {
        let conn = connection();
        insert(&conn, &["1"]);
        assert!(conn.prepare("SELECT first() FROM t").is_err());
        assert!(conn.prepare("SELECT last() FROM t").is_err());
        // The connection stays usable for well-formed calls afterwards.
        let v: String = conn
            .query_row("SELECT first(x) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(v, "1");
    }

    #[test]
    fn numeric_inputs_are_coerced_to_text() {
        let conn = connection();
        conn.execute_batch(
            "CREATE TABLE n (v REAL);
             INSERT INTO n VALUES (100.5), (103.0);",
        )
        .unwrap();
        let (first, last): (String, String) = conn
            .query_row("SELECT first(v), last(v) FROM n", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(first, "100.5");
        assert_eq!(last, "103");
    }

    #[test]
    fn grouped_query_reduces_per_group() {
        let conn = connection();
        conn.execute_batch(
            "CREATE TABLE g (k INTEGER, x TEXT);
             INSERT INTO g VALUES (1, 'a'), (1, 'b'), (2, 'c');",
        )
        .unwrap();
        let mut stmt = conn
            .prepare("SELECT k, first(x), last(x) FROM g GROUP BY k ORDER BY k")
            .unwrap();
        let rows: Vec<(i64, String, String)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                (1, "a".to_string(), "b".to_string()),
                (2, "c".to_string(), "c".to_string()),
            ]
        );
    }
}
