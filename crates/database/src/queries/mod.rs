use std::fmt::Write as _;

use sqlx::{
    postgres::PgArguments, query::Query, PgConnection, Postgres,
};
use tracking::database::DatabaseError;

pub mod location;

/// Postgres accepts at most 65535 bind parameters per statement.
const BULK_INSERT_MAX: usize = 999;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::other(why),
    }
}

// bulk insert

/// Inserts `values` in chunks of `BULK_INSERT_MAX` rows, one multi-row
/// statement per chunk. Returns the number of rows written.
pub async fn insert_all<T, B>(
    connection: &mut PgConnection,
    table: &str,
    columns: &[&str],
    values: &[T],
    bind: B,
) -> Result<u64, sqlx::Error>
where
    for<'a> B: Fn(Query<'a, Postgres, PgArguments>, &T) -> Query<'a, Postgres, PgArguments>,
{
    let mut rows_affected = 0;

    for chunk in values.chunks(BULK_INSERT_MAX) {
        let query_str = multi_row_insert(table, columns, chunk.len());

        let mut query = sqlx::query::<Postgres>(&query_str);
        for value in chunk {
            query = bind(query, value);
        }
        rows_affected += query.execute(&mut *connection).await?.rows_affected();
    }

    Ok(rows_affected)
}

fn multi_row_insert(table: &str, columns: &[&str], rows: usize) -> String {
    let mut query_str = format!("INSERT INTO {} ({}) VALUES ", table, columns.join(", "));
    let mut placeholder_index = 1;
    for i in 0..rows {
        if i > 0 {
            query_str.push_str(", ");
        }
        query_str.push('(');
        for j in 0..columns.len() {
            if j > 0 {
                query_str.push_str(", ");
            }
            let _ = write!(&mut query_str, "${}", placeholder_index);
            placeholder_index += 1;
        }
        query_str.push(')');
    }
    query_str.push(';');
    query_str
}
