use log::debug;

use crate::error::{LoadError, LoadResult};
use crate::models::{Alert, ClassSummary, Dataset, SubjectAverage};

pub const PASS_MARK: f64 = 50.0;
pub const MIN_ATTENDANCE_PCT: f64 = 75.0;
pub const MIN_STUDY_HOURS: f64 = 6.0;
pub const MIN_CLASS_AVERAGE: f64 = 60.0;

/// Computes class level statistics and threshold alerts for a loaded dataset.
pub fn analyze(dataset: &Dataset) -> LoadResult<ClassSummary> {
    if dataset.is_empty() {
        return Err(LoadError::Empty {
            source_name: dataset.source.clone(),
        });
    }

    let count = dataset.len() as f64;
    let average_score = mean(dataset.final_scores(), count);
    let passing = dataset.final_scores().filter(|s| *s >= PASS_MARK).count();
    let pass_rate = passing as f64 / count * 100.0;

    let attendance = mean(dataset.records().map(|r| r.attendance_pct), count);
    let study_hours = mean(dataset.records().map(|r| r.study_hours_week), count);

    let mut alerts = Vec::new();
    if attendance < MIN_ATTENDANCE_PCT {
        alerts.push(Alert::LowAttendance);
    }
    if study_hours < MIN_STUDY_HOURS {
        alerts.push(Alert::LowStudyHours);
    }
    if average_score < MIN_CLASS_AVERAGE {
        alerts.push(Alert::WeakAverage);
    }
    for alert in &alerts {
        debug!("{}: {}", dataset.source, alert.message());
    }
    if alerts.is_empty() {
        alerts.push(Alert::AllClear);
    }

    Ok(ClassSummary {
        average_score,
        pass_rate,
        alerts,
    })
}

/// Mean score per subject, in the order math, science, english.
pub fn subject_averages(dataset: &Dataset) -> LoadResult<Vec<SubjectAverage>> {
    if dataset.is_empty() {
        return Err(LoadError::Empty {
            source_name: dataset.source.clone(),
        });
    }

    let count = dataset.len() as f64;
    Ok(vec![
        SubjectAverage {
            subject: "math",
            mean: mean(dataset.records().map(|r| r.math), count),
        },
        SubjectAverage {
            subject: "science",
            mean: mean(dataset.records().map(|r| r.science), count),
        },
        SubjectAverage {
            subject: "english",
            mean: mean(dataset.records().map(|r| r.english), count),
        },
    ])
}

fn mean(values: impl Iterator<Item = f64>, count: f64) -> f64 {
    values.sum::<f64>() / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentRecord;
    use proptest::prelude::*;

    fn record(
        math: f64,
        science: f64,
        english: f64,
        attendance_pct: f64,
        study_hours_week: f64,
        class_tests_avg: f64,
    ) -> StudentRecord {
        StudentRecord {
            math,
            science,
            english,
            attendance_pct,
            study_hours_week,
            class_tests_avg,
        }
    }

    #[test]
    fn struggling_class_triggers_every_alert() {
        let dataset = Dataset::from_records(
            "mixed.csv",
            vec![
                record(80.0, 70.0, 90.0, 90.0, 8.0, 75.0),
                record(40.0, 30.0, 20.0, 60.0, 3.0, 35.0),
            ],
        );
        let summary = analyze(&dataset).unwrap();

        assert!((summary.average_score - 55.0).abs() < 1e-9);
        assert!((summary.pass_rate - 50.0).abs() < 1e-9);
        assert_eq!(
            summary.alert_messages(),
            vec![
                "Overall attendance is low.",
                "Average study hours are low.",
                "Class average is weak. Needs improvement.",
            ]
        );
    }

    #[test]
    fn healthy_class_reports_all_clear() {
        let dataset = Dataset::from_records(
            "strong.csv",
            vec![record(90.0, 90.0, 90.0, 95.0, 10.0, 88.0)],
        );
        let summary = analyze(&dataset).unwrap();

        assert!((summary.average_score - 90.0).abs() < 1e-9);
        assert!((summary.pass_rate - 100.0).abs() < 1e-9);
        assert_eq!(summary.alerts, vec![Alert::AllClear]);
        assert_eq!(summary.alert_messages(), vec!["No alerts. Class is doing well!"]);
    }

    #[test]
    fn rules_fire_independently() {
        // Good grades, poor attendance only.
        let dataset = Dataset::from_records(
            "absent.csv",
            vec![record(85.0, 80.0, 75.0, 50.0, 9.0, 70.0)],
        );
        let summary = analyze(&dataset).unwrap();
        assert_eq!(summary.alerts, vec![Alert::LowAttendance]);

        let dataset = Dataset::from_records(
            "weak.csv",
            vec![record(55.0, 55.0, 55.0, 80.0, 7.0, 50.0)],
        );
        let summary = analyze(&dataset).unwrap();
        assert_eq!(summary.alerts, vec![Alert::WeakAverage]);
    }

    #[test]
    fn thresholds_are_strict() {
        let dataset = Dataset::from_records(
            "edge.csv",
            vec![record(60.0, 60.0, 60.0, 75.0, 6.0, 60.0)],
        );
        let summary = analyze(&dataset).unwrap();
        assert_eq!(summary.alerts, vec![Alert::AllClear]);
    }

    #[test]
    fn pass_mark_is_inclusive() {
        let dataset = Dataset::from_records(
            "edge.csv",
            vec![
                record(50.0, 50.0, 50.0, 90.0, 8.0, 50.0),
                record(49.0, 50.0, 50.0, 90.0, 8.0, 50.0),
            ],
        );
        let summary = analyze(&dataset).unwrap();
        assert!((summary.pass_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let dataset = Dataset::from_records("empty.csv", Vec::new());
        assert!(matches!(analyze(&dataset), Err(LoadError::Empty { .. })));
        assert!(matches!(subject_averages(&dataset), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn subject_averages_follow_subject_order() {
        let dataset = Dataset::from_records(
            "mixed.csv",
            vec![
                record(80.0, 70.0, 90.0, 90.0, 8.0, 75.0),
                record(40.0, 30.0, 20.0, 60.0, 3.0, 35.0),
            ],
        );
        let averages = subject_averages(&dataset).unwrap();
        let subjects: Vec<&str> = averages.iter().map(|a| a.subject).collect();
        assert_eq!(subjects, vec!["math", "science", "english"]);
        assert!((averages[0].mean - 60.0).abs() < 1e-9);
        assert!((averages[1].mean - 50.0).abs() < 1e-9);
        assert!((averages[2].mean - 55.0).abs() < 1e-9);
    }

    fn arb_record() -> impl Strategy<Value = StudentRecord> {
        (
            0.0..=100.0f64,
            0.0..=100.0f64,
            0.0..=100.0f64,
            0.0..=100.0f64,
            0.0..=40.0f64,
            0.0..=100.0f64,
        )
            .prop_map(|(m, s, e, a, h, t)| record(m, s, e, a, h, t))
    }

    proptest! {
        #[test]
        fn average_ignores_record_order(records in prop::collection::vec(arb_record(), 1..40)) {
            let forward = analyze(&Dataset::from_records("a.csv", records.clone())).unwrap();
            let mut reversed_records = records.clone();
            reversed_records.reverse();
            let reversed = analyze(&Dataset::from_records("b.csv", reversed_records)).unwrap();

            let expected = records.iter().map(StudentRecord::final_score).sum::<f64>()
                / records.len() as f64;
            prop_assert!((forward.average_score - expected).abs() < 1e-9);
            prop_assert!((forward.average_score - reversed.average_score).abs() < 1e-9);
            prop_assert_eq!(forward.pass_rate, reversed.pass_rate);
            prop_assert_eq!(forward.alerts, reversed.alerts);
        }

        #[test]
        fn pass_rate_stays_in_bounds(records in prop::collection::vec(arb_record(), 1..40)) {
            let summary = analyze(&Dataset::from_records("c.csv", records.clone())).unwrap();
            prop_assert!((0.0..=100.0).contains(&summary.pass_rate));

            let all_pass = records.iter().all(|r| r.final_score() >= PASS_MARK);
            let none_pass = records.iter().all(|r| r.final_score() < PASS_MARK);
            if all_pass {
                prop_assert_eq!(summary.pass_rate, 100.0);
            }
            if none_pass {
                prop_assert_eq!(summary.pass_rate, 0.0);
            }
        }

        #[test]
        fn alerts_are_ordered_and_unique(records in prop::collection::vec(arb_record(), 1..40)) {
            let summary = analyze(&Dataset::from_records("d.csv", records)).unwrap();
            prop_assert!(!summary.alerts.is_empty());
            if summary.alerts.contains(&Alert::AllClear) {
                prop_assert_eq!(summary.alerts.len(), 1);
            } else {
                let order = [Alert::LowAttendance, Alert::LowStudyHours, Alert::WeakAverage];
                let positions: Vec<usize> = summary
                    .alerts
                    .iter()
                    .map(|a| order.iter().position(|o| o == a).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
