//! Core business logic - framework-agnostic exam-cycle, weekly-exam, syllabus
//! and grading operations. The bot layer only formats what these return.

/// Class directory and syllabus catalogue reads and seeding
pub mod catalogue;
/// Exam cycle rotation, activation and progress
pub mod cycle;
/// Percentage to letter-grade banding
pub mod grading;
/// Bulk replacement of per-exam student marks
pub mod marks;
/// Read-only access to exam-taking pipeline output
pub mod results;
/// Exam to syllabus-topic coverage links
pub mod syllabus;
/// Weekly exam scheduling and status transitions
pub mod weekly_exam;
