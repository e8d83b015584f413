//! Feedback Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountId, Feedback, FeedbackCreate};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All feedback of one tenant, newest first
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .base
            .db()
            .query("SELECT * FROM feedback WHERE account = $account ORDER BY created_at DESC")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(feedback)
    }

    /// Persist a feedback submission
    pub async fn create(&self, account: &AccountId, data: FeedbackCreate) -> RepoResult<Feedback> {
        if !(1..=5).contains(&data.rating) {
            return Err(RepoError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE feedback SET
                    account = $account,
                    customer_name = $customer_name,
                    email = $email,
                    rating = $rating,
                    comment = $comment,
                    image = $image,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("customer_name", data.customer_name))
            .bind(("email", data.email))
            .bind(("rating", data.rating))
            .bind(("comment", data.comment))
            .bind(("image", data.image))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Feedback> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }
}
