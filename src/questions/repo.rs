use std::collections::HashSet;

use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};

use crate::questions::{bank::BankQuestion, repo_types::QuestionAnswer};

/// Insert a freshly assigned question within a transaction. Status starts as `status`,
/// every answer/recording/grading column starts NULL.
pub async fn insert_assigned_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    interview_id: i64,
    question: &BankQuestion,
    status: &str,
) -> sqlx::Result<QuestionAnswer> {
    sqlx::query_as::<_, QuestionAnswer>(
        r#"
        INSERT INTO question_answers (user_id, interview_id, question_id, question_text, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, interview_id, question_id, question_text, status,
                  answer_text, camera_recording_path, screen_recording_path,
                  audio_recording_path, combined_recording_path,
                  ai_answer, ai_remark, candidate_score, candidate_grade
        "#,
    )
    .bind(user_id)
    .bind(interview_id)
    .bind(question.id)
    .bind(question.text)
    .bind(status)
    .fetch_one(&mut **tx)
    .await
}

/// All rows for a (user, interview) pair in insertion order.
pub async fn list_for_pair(
    db: &PgPool,
    user_id: i64,
    interview_id: i64,
) -> sqlx::Result<Vec<QuestionAnswer>> {
    sqlx::query_as::<_, QuestionAnswer>(
        r#"
        SELECT id, user_id, interview_id, question_id, question_text, status,
               answer_text, camera_recording_path, screen_recording_path,
               audio_recording_path, combined_recording_path,
               ai_answer, ai_remark, candidate_score, candidate_grade
          FROM question_answers
         WHERE user_id = $1 AND interview_id = $2
         ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .bind(interview_id)
    .fetch_all(db)
    .await
}

/// All rows of an interview, whoever answered them.
pub async fn list_for_interview(
    db: &PgPool,
    interview_id: i64,
) -> sqlx::Result<Vec<QuestionAnswer>> {
    sqlx::query_as::<_, QuestionAnswer>(
        r#"
        SELECT id, user_id, interview_id, question_id, question_text, status,
               answer_text, camera_recording_path, screen_recording_path,
               audio_recording_path, combined_recording_path,
               ai_answer, ai_remark, candidate_score, candidate_grade
          FROM question_answers
         WHERE interview_id = $1
         ORDER BY id ASC
        "#,
    )
    .bind(interview_id)
    .fetch_all(db)
    .await
}

pub async fn assigned_question_ids(
    db: &PgPool,
    user_id: i64,
    interview_id: i64,
) -> anyhow::Result<HashSet<i32>> {
    let ids: Vec<i32> = sqlx::query_scalar(
        r#"
        SELECT question_id
          FROM question_answers
         WHERE user_id = $1 AND interview_id = $2
        "#,
    )
    .bind(user_id)
    .bind(interview_id)
    .fetch_all(db)
    .await
    .context("load assigned question ids")?;
    Ok(ids.into_iter().collect())
}

/// Lock a row for a read-modify-write update.
pub async fn find_for_update_tx(
    tx: &mut Transaction<'_, Postgres>,
    qa_id: i64,
) -> sqlx::Result<Option<QuestionAnswer>> {
    sqlx::query_as::<_, QuestionAnswer>(
        r#"
        SELECT id, user_id, interview_id, question_id, question_text, status,
               answer_text, camera_recording_path, screen_recording_path,
               audio_recording_path, combined_recording_path,
               ai_answer, ai_remark, candidate_score, candidate_grade
          FROM question_answers
         WHERE id = $1
           FOR UPDATE
        "#,
    )
    .bind(qa_id)
    .fetch_optional(&mut **tx)
    .await
}

/// Write back every mutable column of `qa`. Identity columns are never touched.
pub async fn save_tx(
    tx: &mut Transaction<'_, Postgres>,
    qa: &QuestionAnswer,
) -> sqlx::Result<QuestionAnswer> {
    sqlx::query_as::<_, QuestionAnswer>(
        r#"
        UPDATE question_answers
           SET status = $2,
               answer_text = $3,
               camera_recording_path = $4,
               screen_recording_path = $5,
               audio_recording_path = $6,
               combined_recording_path = $7,
               ai_answer = $8,
               ai_remark = $9,
               candidate_score = $10,
               candidate_grade = $11
         WHERE id = $1
        RETURNING id, user_id, interview_id, question_id, question_text, status,
                  answer_text, camera_recording_path, screen_recording_path,
                  audio_recording_path, combined_recording_path,
                  ai_answer, ai_remark, candidate_score, candidate_grade
        "#,
    )
    .bind(qa.id)
    .bind(&qa.status)
    .bind(&qa.answer_text)
    .bind(&qa.camera_recording_path)
    .bind(&qa.screen_recording_path)
    .bind(&qa.audio_recording_path)
    .bind(&qa.combined_recording_path)
    .bind(&qa.ai_answer)
    .bind(&qa.ai_remark)
    .bind(qa.candidate_score)
    .bind(&qa.candidate_grade)
    .fetch_one(&mut **tx)
    .await
}
