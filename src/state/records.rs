//! Records dashboard data.
//!
//! The records service does not exist yet; this module keeps the
//! dashboard shape (totals, top performers, per-subject averages) with
//! placeholder inventory until it does, so the home and records views
//! have real state to render.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

/// One student in the top-performers list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub grade: u32,
}

/// Aggregate grade for one subject.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubjectPerformance {
    pub name: String,
    pub average_grade: u32,
}

/// Shared records state for the home and records views.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordsState {
    pub year_groups: Vec<String>,
    pub total_subjects: u32,
    pub total_classes: u32,
    pub total_students: u32,
    pub recent_activities: Vec<String>,
    pub top_performing_students: Vec<StudentSummary>,
    pub average_grade: u32,
    pub subject_performance: Vec<SubjectPerformance>,
    pub loading: bool,
}

impl RecordsState {
    /// Recompute the rounded mean grade of the top performers (0 when
    /// the list is empty).
    pub fn recalculate_average_grade(&mut self) {
        let count = u32::try_from(self.top_performing_students.len()).unwrap_or(u32::MAX);
        if count == 0 {
            self.average_grade = 0;
            return;
        }
        let sum: u32 = self.top_performing_students.iter().map(|s| s.grade).sum();
        self.average_grade = (sum + count / 2) / count;
    }

    /// Placeholder inventory until the records service exists.
    pub fn load_sample_data(&mut self) {
        self.year_groups = vec!["Year 9".to_owned(), "Year 10".to_owned(), "Year 11".to_owned()];
        self.total_subjects = 3;
        self.total_classes = 6;
        self.total_students = 142;
        self.top_performing_students = vec![
            StudentSummary {
                id: "1".to_owned(),
                name: "John Doe".to_owned(),
                class_name: "Grade 10A".to_owned(),
                grade: 95,
            },
            StudentSummary {
                id: "2".to_owned(),
                name: "Jane Smith".to_owned(),
                class_name: "Grade 11B".to_owned(),
                grade: 92,
            },
            StudentSummary {
                id: "3".to_owned(),
                name: "Alice Johnson".to_owned(),
                class_name: "Grade 9C".to_owned(),
                grade: 90,
            },
        ];
        self.subject_performance = vec![
            SubjectPerformance { name: "Math".to_owned(), average_grade: 85 },
            SubjectPerformance { name: "Science".to_owned(), average_grade: 78 },
            SubjectPerformance { name: "English".to_owned(), average_grade: 82 },
        ];
        self.recalculate_average_grade();
        self.loading = false;
    }
}
