use serde::{Deserialize, Serialize};

/// Columns every source must provide. Matched by header name.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "math",
    "science",
    "english",
    "attendance_pct",
    "study_hours_week",
    "class_tests_avg",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentRecord {
    pub math: f64,
    pub science: f64,
    pub english: f64,
    pub attendance_pct: f64,
    pub study_hours_week: f64,
    pub class_tests_avg: f64,
}

impl StudentRecord {
    /// Mean of the three subject scores, unrounded.
    pub fn final_score(&self) -> f64 {
        (self.math + self.science + self.english) / 3.0
    }

    /// Name of the first column holding NaN or an infinity, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let values = [
            self.math,
            self.science,
            self.english,
            self.attendance_pct,
            self.study_hours_week,
            self.class_tests_avg,
        ];
        REQUIRED_COLUMNS
            .into_iter()
            .zip(values)
            .find(|(_, value)| !value.is_finite())
            .map(|(column, _)| column)
    }
}

#[derive(Debug, Clone)]
pub struct DatasetRow {
    pub record: StudentRecord,
    pub final_score: f64,
    /// Raw text of every source column, in header order.
    pub fields: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a dataset with only the required columns.
    #[cfg(test)]
    pub fn from_records(source: impl Into<String>, records: Vec<StudentRecord>) -> Self {
        let headers = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut dataset = Self::new(source, headers);
        for record in records {
            let fields = vec![
                record.math.to_string(),
                record.science.to_string(),
                record.english.to_string(),
                record.attendance_pct.to_string(),
                record.study_hours_week.to_string(),
                record.class_tests_avg.to_string(),
            ];
            dataset.push(record, fields);
        }
        dataset
    }

    pub fn push(&mut self, record: StudentRecord, fields: Vec<String>) {
        let final_score = record.final_score();
        self.rows.push(DatasetRow {
            record,
            final_score,
            fields,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &StudentRecord> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn final_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.final_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    LowAttendance,
    LowStudyHours,
    WeakAverage,
    /// Stands in for an empty list when no rule fires.
    AllClear,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::LowAttendance => "Overall attendance is low.",
            Alert::LowStudyHours => "Average study hours are low.",
            Alert::WeakAverage => "Class average is weak. Needs improvement.",
            Alert::AllClear => "No alerts. Class is doing well!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub average_score: f64,
    pub pass_rate: f64,
    pub alerts: Vec<Alert>,
}

impl ClassSummary {
    pub fn alert_messages(&self) -> Vec<&'static str> {
        self.alerts.iter().map(Alert::message).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAverage {
    pub subject: &'static str,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Bar { labels: Vec<String>, values: Vec<f64> },
    Scatter { x: Vec<f64>, y: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub category: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: Option<&'static str>,
    pub y_label: Option<&'static str>,
    pub y_range: Option<(f64, f64)>,
    pub color: &'static str,
    pub data: SeriesData,
}
