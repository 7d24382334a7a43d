//! Storage layer - database entities and repositories

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

use crate::contract::{Page, PageRequest, SortOrder};
use crate::domain::repository::{StorageError, StorageResult};
use sea_orm::sea_query::{Expr, Func, IntoIden, LikeExpr, Order};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryOrder, Select, SqlErr,
};
use std::str::FromStr;

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::UniqueViolation(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                StorageError::ForeignKeyViolation(detail)
            }
            _ => StorageError::Other(err.into()),
        }
    }
}

/// `LOWER(column) LIKE '%search%'` over any of `columns`
pub(crate) fn contains_any<E, C>(columns: &[C], search: &str) -> Condition
where
    E: EntityTrait + Default,
    C: ColumnTrait + IntoIden + Copy,
{
    columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(
            Expr::expr(Func::lower(Expr::col((E::default(), *col)))).like(like_pattern(search)),
        )
    })
}

/// Case-insensitive exact match
pub(crate) fn equals_ignore_case<E, C>(column: C, value: &str) -> Condition
where
    E: EntityTrait + Default,
    C: ColumnTrait + IntoIden,
{
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col((E::default(), column)))).eq(value.to_lowercase()),
    )
}

const LIKE_ESCAPE: char = '\\';

/// Lowercased `%search%` where `%`, `_` and the escape char in `search` match literally
pub(crate) fn like_pattern(search: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(&search.to_lowercase()))).escape(LIKE_ESCAPE)
}

fn escape_like(search: &str) -> String {
    let mut out = String::with_capacity(search.len());
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Resolve a client supplied column key (snake_case or camelCase)
pub(crate) fn sort_column<E>(column_key: &str) -> StorageResult<E::Column>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    E::Column::from_str(&snake_case(column_key.trim()))
        .map_err(|_| StorageError::UnknownColumn(column_key.to_string()))
}

/// `productTitle` -> `product_title`; snake_case input is returned unchanged
fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Run one page of `select`, sorted by the requested column with `id` as tie-breaker
pub(crate) async fn fetch_page<E, T>(
    db: &DatabaseConnection,
    select: Select<E>,
    request: &PageRequest,
) -> StorageResult<Page<T>>
where
    E: EntityTrait,
    E::Column: FromStr,
    E::Model: FromQueryResult + Sized + Send + Sync,
    T: TryFrom<E::Model, Error = anyhow::Error>,
{
    let column = sort_column::<E>(&request.column_key)?;
    let tie_breaker = sort_column::<E>("id")?;
    let order = match request.sort {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };

    let paginator = select
        .order_by(column, order.clone())
        .order_by(tie_breaker, order)
        .paginate(db, request.page_size);

    let total_record_count = paginator.num_items().await?;
    let models = paginator.fetch_page(request.page.saturating_sub(1)).await?;

    let data = models
        .into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        data,
        total_record_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_column_keys() {
        assert_eq!(snake_case("productTitle"), "product_title");
        assert_eq!(snake_case("product_title"), "product_title");
        assert_eq!(snake_case("id"), "id");
        assert_eq!(snake_case("CompanyName"), "company_name");
    }

    #[test]
    fn test_escape_like_keeps_wildcards_literal() {
        assert_eq!(escape_like("eezee"), "eezee");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
    }
}
