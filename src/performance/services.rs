use sqlx::PgPool;

use crate::error::AppError;
use crate::performance::{
    dto::{InterviewDetails, InterviewStats, InterviewSummary},
    repo,
};
use crate::questions::{repo as qa_repo, services::STATUS_NEW, QuestionAnswer};

pub fn compute_stats(questions: &[QuestionAnswer]) -> InterviewStats {
    let scores: Vec<f64> = questions.iter().filter_map(|q| q.candidate_score).collect();
    let average_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    InterviewStats {
        total: questions.len(),
        attempted: questions.iter().filter(|q| q.status != STATUS_NEW).count(),
        scored: scores.len(),
        graded: questions.iter().filter(|q| q.candidate_grade.is_some()).count(),
        average_score,
    }
}

pub async fn list_interviews(db: &PgPool, user_id: i64) -> Result<Vec<InterviewSummary>, AppError> {
    Ok(repo::list_summaries(db, user_id).await?)
}

pub async fn interview_details(db: &PgPool, interview_id: i64) -> Result<InterviewDetails, AppError> {
    let interview = repo::find_summary(db, interview_id)
        .await?
        .ok_or_else(|| AppError::not_found("Interview not found"))?;
    let questions = qa_repo::list_for_interview(db, interview_id).await?;
    let stats = compute_stats(&questions);
    Ok(InterviewDetails {
        interview,
        questions,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa(id: i64, status: &str, score: Option<f64>, grade: Option<&str>) -> QuestionAnswer {
        QuestionAnswer {
            id,
            user_id: 7,
            interview_id: 42,
            question_id: id as i32,
            question_text: format!("question {id}"),
            status: status.into(),
            answer_text: None,
            camera_recording_path: None,
            screen_recording_path: None,
            audio_recording_path: None,
            combined_recording_path: None,
            ai_answer: None,
            ai_remark: None,
            candidate_score: score,
            candidate_grade: grade.map(str::to_string),
        }
    }

    #[test]
    fn empty_interview_has_no_average() {
        assert_eq!(compute_stats(&[]), InterviewStats::default());
    }

    #[test]
    fn stats_count_each_lifecycle_stage() {
        let rows = vec![
            qa(1, "NEW", None, None),
            qa(2, "ATTEMPTED", None, None),
            qa(3, "SCORED", Some(6.0), Some("B")),
            qa(4, "SCORED", Some(9.0), None),
        ];
        let stats = compute_stats(&rows);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.attempted, 3);
        assert_eq!(stats.scored, 2);
        assert_eq!(stats.graded, 1);
        assert_eq!(stats.average_score, Some(7.5));
    }
}
