use crate::analysis;
use crate::error::LoadResult;
use crate::models::{ChartKind, ChartSeries, Dataset, SeriesData, StudentRecord};

const FINAL_SCORE_LABEL: &str = "Final Score";

/// The four chart series in tab order: subjects, attendance, study hours, tests.
pub fn chart_series(dataset: &Dataset) -> LoadResult<Vec<ChartSeries>> {
    let averages = analysis::subject_averages(dataset)?;

    let subjects = ChartSeries {
        category: "Subjects",
        kind: ChartKind::Bar,
        title: "Subject Averages",
        x_label: None,
        y_label: None,
        y_range: Some((0.0, 100.0)),
        color: "skyblue",
        data: SeriesData::Bar {
            labels: averages.iter().map(|a| a.subject.to_string()).collect(),
            values: averages.iter().map(|a| a.mean).collect(),
        },
    };

    Ok(vec![
        subjects,
        scatter(
            dataset,
            "Attendance",
            "Attendance vs Final Score",
            "Attendance %",
            "green",
            |r| r.attendance_pct,
        ),
        scatter(
            dataset,
            "Study Hours",
            "Study Hours vs Final Score",
            "Hours/week",
            "purple",
            |r| r.study_hours_week,
        ),
        scatter(
            dataset,
            "Tests",
            "Class Tests Avg vs Final Score",
            "Tests Avg",
            "orange",
            |r| r.class_tests_avg,
        ),
    ])
}

fn scatter(
    dataset: &Dataset,
    category: &'static str,
    title: &'static str,
    x_label: &'static str,
    color: &'static str,
    x_of: impl Fn(&StudentRecord) -> f64,
) -> ChartSeries {
    ChartSeries {
        category,
        kind: ChartKind::Scatter,
        title,
        x_label: Some(x_label),
        y_label: Some(FINAL_SCORE_LABEL),
        y_range: None,
        color,
        data: SeriesData::Scatter {
            x: dataset.records().map(x_of).collect(),
            y: dataset.final_scores().collect(),
        },
    }
}

pub fn to_json(series: &[ChartSeries]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(series)
}
