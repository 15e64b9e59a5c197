//! Read-only access to records produced by the exam-taking pipeline.
//!
//! Question papers, questions and student results are keyed by exam id and
//! written elsewhere; the scheduler only displays them.

use crate::{
    entities::{
        Question, QuestionPaper, StudentExamResult, question, question_paper, student_exam_result,
    },
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// A question paper with its questions in paper order.
#[derive(Debug, Clone)]
pub struct PaperWithQuestions {
    /// The paper
    pub paper: question_paper::Model,
    /// Its questions, ordered by position
    pub questions: Vec<question::Model>,
}

impl PaperWithQuestions {
    /// Sum of the marks of every question on the paper.
    #[must_use]
    pub fn total_marks(&self) -> f64 {
        self.questions.iter().map(|q| q.marks).sum()
    }
}

/// The most recently published paper for an exam, or None.
pub async fn paper_for_exam(
    db: &DatabaseConnection,
    exam_id: i64,
) -> Result<Option<PaperWithQuestions>> {
    let Some(paper) = QuestionPaper::find()
        .filter(question_paper::Column::ExamId.eq(exam_id))
        .order_by_desc(question_paper::Column::CreatedAt)
        .order_by_desc(question_paper::Column::Id)
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let questions = Question::find()
        .filter(question::Column::PaperId.eq(paper.id))
        .order_by_asc(question::Column::Position)
        .all(db)
        .await?;

    Ok(Some(PaperWithQuestions { paper, questions }))
}

/// Student results for an exam, best score first.
pub async fn results_for_exam(
    db: &DatabaseConnection,
    exam_id: i64,
) -> Result<Vec<student_exam_result::Model>> {
    StudentExamResult::find()
        .filter(student_exam_result::Column::ExamId.eq(exam_id))
        .order_by_desc(student_exam_result::Column::Score)
        .order_by_asc(student_exam_result::Column::SubmittedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Utc;
    use sea_orm::Set;

    #[tokio::test]
    async fn test_missing_downstream_records_are_empty() -> Result<()> {
        let (db, _class, exam) = setup_with_exam().await?;
        assert!(paper_for_exam(&db, exam.id).await?.is_none());
        assert!(results_for_exam(&db, exam.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_pipeline_output() -> Result<()> {
        let (db, _class, exam) = setup_with_exam().await?;

        // Stand-in for the exam-taking pipeline
        let paper = question_paper::ActiveModel {
            exam_id: Set(exam.id),
            title: Set("Set A".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        for (position, text, marks) in [
            (2, "Define velocity", 4.0),
            (1, "State Newton's first law", 2.0),
        ] {
            question::ActiveModel {
                paper_id: Set(paper.id),
                position: Set(position),
                question_text: Set(text.to_string()),
                marks: Set(marks),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }
        for (student_id, score) in [(1, 40.0), (2, 72.5)] {
            student_exam_result::ActiveModel {
                exam_id: Set(exam.id),
                student_id: Set(student_id),
                score: Set(score),
                correct_answers: Set(10),
                wrong_answers: Set(2),
                submitted_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let loaded = paper_for_exam(&db, exam.id).await?;
        let Some(loaded) = loaded else {
            panic!("paper should be found");
        };
        assert_eq!(loaded.questions.len(), 2);
        assert_eq!(loaded.questions[0].position, 1);
        assert_eq!(loaded.total_marks(), 6.0);

        let results = results_for_exam(&db, exam.id).await?;
        let students: Vec<_> = results.iter().map(|r| r.student_id).collect();
        assert_eq!(students, vec![2, 1]);

        Ok(())
    }
}
