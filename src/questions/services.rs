use std::collections::HashSet;

use sqlx::PgPool;
use tracing::info;

use crate::error::AppError;
use crate::questions::{
    bank::{BankQuestion, QUESTION_BANK},
    dto::QuestionAnswerPatch,
    repo,
    repo_types::QuestionAnswer,
};

/// Status of a freshly assigned question. Later statuses are caller-defined.
pub const STATUS_NEW: &str = "NEW";

/// Questions handed out per `start` or `more` call.
pub const BATCH_SIZE: usize = 3;

/// The opening batch: the head of the bank, regardless of what is already assigned.
pub fn initial_batch(bank: &[BankQuestion]) -> &[BankQuestion] {
    &bank[..bank.len().min(BATCH_SIZE)]
}

/// The next unassigned questions in bank order. Empty once the bank is exhausted.
pub fn next_batch<'a>(bank: &'a [BankQuestion], assigned: &HashSet<i32>) -> Vec<&'a BankQuestion> {
    bank.iter()
        .filter(|q| !assigned.contains(&q.id))
        .take(BATCH_SIZE)
        .collect()
}

/// Assigns the opening batch to (user, interview).
///
/// Repeated calls are not deduplicated: each call inserts the same head of
/// the bank again.
pub async fn start(
    db: &PgPool,
    user_id: i64,
    interview_id: i64,
) -> Result<Vec<QuestionAnswer>, AppError> {
    insert_batch(db, user_id, interview_id, initial_batch(QUESTION_BANK)).await
}

/// Assigns up to `BATCH_SIZE` questions not yet present for (user, interview).
pub async fn more(
    db: &PgPool,
    user_id: i64,
    interview_id: i64,
) -> Result<Vec<QuestionAnswer>, AppError> {
    let assigned = repo::assigned_question_ids(db, user_id, interview_id).await?;
    let batch: Vec<BankQuestion> = next_batch(QUESTION_BANK, &assigned)
        .into_iter()
        .copied()
        .collect();
    if batch.is_empty() {
        info!(user_id, interview_id, "question bank exhausted");
        return Ok(Vec::new());
    }
    insert_batch(db, user_id, interview_id, &batch).await
}

pub async fn list(
    db: &PgPool,
    user_id: i64,
    interview_id: i64,
) -> Result<Vec<QuestionAnswer>, AppError> {
    Ok(repo::list_for_pair(db, user_id, interview_id).await?)
}

/// Applies only the fields present in `patch`; fails with NotFound for an unknown id.
pub async fn update(
    db: &PgPool,
    qa_id: i64,
    patch: QuestionAnswerPatch,
) -> Result<QuestionAnswer, AppError> {
    let touched = patch.touched();

    let mut tx = db.begin().await?;
    let mut qa = repo::find_for_update_tx(&mut tx, qa_id)
        .await?
        .ok_or_else(|| AppError::not_found("QuestionAnswer not found"))?;
    if touched.is_empty() {
        tx.rollback().await?;
        return Ok(qa);
    }

    patch.apply(&mut qa);
    let saved = repo::save_tx(&mut tx, &qa).await?;
    tx.commit().await?;

    info!(qa_id, fields = ?touched, status = %saved.status, "question answer updated");
    Ok(saved)
}

async fn insert_batch(
    db: &PgPool,
    user_id: i64,
    interview_id: i64,
    batch: &[BankQuestion],
) -> Result<Vec<QuestionAnswer>, AppError> {
    let mut tx = db.begin().await?;
    let mut created = Vec::with_capacity(batch.len());
    for q in batch {
        let qa = repo::insert_assigned_tx(&mut tx, user_id, interview_id, q, STATUS_NEW)
            .await
            .map_err(|e| AppError::not_found_on_fk(e, "User or interview not found"))?;
        created.push(qa);
    }
    tx.commit().await?;

    for qa in &created {
        info!(
            qa_id = qa.id,
            question_id = qa.question_id,
            user_id,
            interview_id,
            "question assigned"
        );
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIG_BANK: &[BankQuestion] = &[
        BankQuestion { id: 10, text: "a" },
        BankQuestion { id: 20, text: "b" },
        BankQuestion { id: 30, text: "c" },
        BankQuestion { id: 40, text: "d" },
        BankQuestion { id: 50, text: "e" },
        BankQuestion { id: 60, text: "f" },
        BankQuestion { id: 70, text: "g" },
    ];

    fn ids(batch: &[&BankQuestion]) -> Vec<i32> {
        batch.iter().map(|q| q.id).collect()
    }

    #[test]
    fn initial_batch_is_bank_head() {
        let head: Vec<i32> = initial_batch(QUESTION_BANK).iter().map(|q| q.id).collect();
        assert_eq!(head, vec![1, 2, 3]);
        assert_eq!(initial_batch(BIG_BANK).len(), BATCH_SIZE);
        assert_eq!(initial_batch(&BIG_BANK[..2]).len(), 2);
    }

    #[test]
    fn more_after_start_on_default_bank_is_empty() {
        let assigned: HashSet<i32> = initial_batch(QUESTION_BANK).iter().map(|q| q.id).collect();
        assert!(next_batch(QUESTION_BANK, &assigned).is_empty());
    }

    #[test]
    fn next_batch_skips_assigned_and_keeps_bank_order() {
        let assigned: HashSet<i32> = [20, 50].into_iter().collect();
        assert_eq!(ids(&next_batch(BIG_BANK, &assigned)), vec![10, 30, 40]);
    }

    #[test]
    fn ids_outside_the_bank_are_harmless() {
        let assigned: HashSet<i32> = [999].into_iter().collect();
        assert_eq!(ids(&next_batch(BIG_BANK, &assigned)), vec![10, 20, 30]);
    }

    #[test]
    fn repeated_more_covers_bank_exactly_once() {
        let mut assigned: HashSet<i32> = HashSet::new();
        let mut handed_out = Vec::new();
        loop {
            let batch = next_batch(BIG_BANK, &assigned);
            if batch.is_empty() {
                break;
            }
            assert!(batch.len() <= BATCH_SIZE);
            for q in batch {
                assert!(assigned.insert(q.id), "question {} handed out twice", q.id);
                handed_out.push(q.id);
            }
        }
        let bank_ids: Vec<i32> = BIG_BANK.iter().map(|q| q.id).collect();
        assert_eq!(handed_out, bank_ids);
    }
}
