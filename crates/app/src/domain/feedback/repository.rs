//! Feedback Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_u64,
    domain::{
        feedback::records::{FeedbackRecord, FeedbackStats, FeedbackUuid},
        users::{Requester, UserUuid},
    },
};

const CREATE_FEEDBACK_SQL: &str = include_str!("sql/create_feedback.sql");
const LIST_FEEDBACK_SQL: &str = include_str!("sql/list_feedback.sql");
const FEEDBACK_STATS_SQL: &str = include_str!("sql/feedback_stats.sql");
const DELETE_FEEDBACK_SQL: &str = include_str!("sql/delete_feedback.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFeedbackRepository;

impl PgFeedbackRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_feedback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: FeedbackUuid,
        author: &Requester,
        rating: u8,
        message: &str,
    ) -> Result<FeedbackRecord, sqlx::Error> {
        query_as::<Postgres, FeedbackRecord>(CREATE_FEEDBACK_SQL)
            .bind(uuid.into_uuid())
            .bind(author.uuid.into_uuid())
            .bind(&author.name)
            .bind(&author.email)
            .bind(i16::from(rating))
            .bind(message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_feedback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<FeedbackRecord>, sqlx::Error> {
        query_as::<Postgres, FeedbackRecord>(LIST_FEEDBACK_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn feedback_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<FeedbackStats, sqlx::Error> {
        query_as::<Postgres, FeedbackStats>(FEEDBACK_STATS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_feedback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        feedback: FeedbackUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_FEEDBACK_SQL)
            .bind(feedback.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for FeedbackRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;

        Ok(Self {
            uuid: FeedbackUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            rating: u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
                index: "rating".to_string(),
                source: Box::new(e),
            })?,
            message: row.try_get("message")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for FeedbackStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            average_rating: row.try_get("average_rating")?,
            total: try_get_u64(row, "total")?,
            five_star: try_get_u64(row, "five_star")?,
            four_star: try_get_u64(row, "four_star")?,
            three_star: try_get_u64(row, "three_star")?,
            two_star: try_get_u64(row, "two_star")?,
            one_star: try_get_u64(row, "one_star")?,
        })
    }
}
