//! Gradebook CSV record.

use cssgrade_core::report::GradeReport;

/// `student,score,max_score` with a single aggregate row.
pub fn grade_csv(report: &GradeReport) -> String {
    format!(
        "student,score,max_score\nall_students,{},{}\n",
        report.total, report.total_max
    )
}
