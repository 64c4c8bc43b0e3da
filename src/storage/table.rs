//! Full-table read and truncate-and-reload.

use rusqlite::{params_from_iter, Connection, TransactionBehavior};

use super::value::{DbValue, Row};

/// Quote a table name as an SQL identifier.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Read every row of `table` in storage order.
pub fn read_rows(conn: &Connection, table: &str) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_identifier(table)))?;
    let width = stmt.column_count();
    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|idx| row.get::<_, DbValue>(idx))
                .collect::<rusqlite::Result<Row>>()
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Replace the contents of `table` with `rows` in a single transaction.
///
/// Existing rows are deleted (the schema is kept) and `rows` are inserted
/// with positional parameters. The placeholder count is taken from the first
/// row. If any statement fails the transaction is dropped uncommitted, which
/// rolls the table back to its previous contents.
///
/// Returns the number of rows inserted.
pub fn replace_rows(conn: &mut Connection, table: &str, rows: &[Row]) -> rusqlite::Result<usize> {
    let quoted = quote_identifier(table);
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let deleted = tx.execute(&format!("DELETE FROM {quoted}"), [])?;
    tracing::debug!(table, deleted, "Cleared destination table");

    if let Some(first) = rows.first() {
        let mut stmt = tx.prepare(&insert_statement(&quoted, first.len()))?;
        for row in rows {
            stmt.execute(params_from_iter(row.iter()))?;
        }
    }

    tx.commit()?;
    Ok(rows.len())
}

fn insert_statement(quoted_table: &str, width: usize) -> String {
    let placeholders = vec!["?"; width].join(", ");
    format!("INSERT INTO {quoted_table} VALUES ({placeholders})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(conn: &Connection) {
        conn.execute_batch(
            r#"
            CREATE TABLE algs (id INTEGER, name TEXT);
            INSERT INTO algs VALUES (9, 'z');
            "#,
        )
        .unwrap();
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("algs"), r#""algs""#);
        assert_eq!(quote_identifier(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_insert_statement() {
        assert_eq!(
            insert_statement(r#""algs""#, 3),
            r#"INSERT INTO "algs" VALUES (?, ?, ?)"#
        );
    }

    #[test]
    fn test_replace_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup(&conn);

        let rows = vec![
            vec![DbValue::from(1_i64), DbValue::from("a")],
            vec![DbValue::from(2_i64), DbValue::from("b")],
        ];
        assert_eq!(replace_rows(&mut conn, "algs", &rows).unwrap(), 2);

        let mut stored = read_rows(&conn, "algs").unwrap();
        stored.sort_by_key(|row| match row[0] {
            DbValue::Integer(id) => id,
            _ => i64::MAX,
        });
        assert_eq!(stored, rows);
    }

    #[test]
    fn test_width_mismatch_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup(&conn);

        let rows = vec![vec![DbValue::from(1_i64), DbValue::from("a"), DbValue::Null]];
        assert!(replace_rows(&mut conn, "algs", &rows).is_err());

        let stored = read_rows(&conn, "algs").unwrap();
        assert_eq!(stored, vec![vec![DbValue::from(9_i64), DbValue::from("z")]]);
    }

    #[test]
    fn test_ragged_row_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup(&conn);

        let rows = vec![
            vec![DbValue::from(1_i64), DbValue::from("a")],
            vec![DbValue::from(2_i64)],
        ];
        assert!(replace_rows(&mut conn, "algs", &rows).is_err());
        assert_eq!(read_rows(&conn, "algs").unwrap().len(), 1);
    }

    #[test]
    fn test_read_missing_table_fails() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(read_rows(&conn, "matrix_signals").is_err());
    }
}
