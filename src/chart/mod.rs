// src/chart/mod.rs

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::{bulletin::BulletinRecord, extract::date_parser::parse_token};

#[cfg(feature = "gui")]
mod window;

pub const TITLE: &str = "Visa Bulletin Trends";
pub const X_LABEL: &str = "Visa Bulletin Release Month";
pub const Y_LABEL: &str = "Final Action Date";
pub const SERIES_NAMES: [&str; 3] = [
    "EB1 Final Action Date",
    "EB2 Final Action Date",
    "EB3 Final Action Date",
];

/// One line of the chart. Both axes are days since 0001-01-01.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub name: &'static str,
    pub points: Vec<[f64; 2]>,
}

pub fn date_to_axis(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn axis_to_date(value: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
}

/// EB1..EB3 final action dates against the release month. Records whose
/// tokens are not dates (e.g. `U`) leave a gap in that series.
pub fn trend_series(records: &[BulletinRecord]) -> Vec<TrendSeries> {
    SERIES_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| TrendSeries {
            name,
            points: records
                .iter()
                .filter_map(|r| {
                    let x = parse_token(&r.release_month)?;
                    let y = parse_token(r.final_action()[i])?;
                    Some([date_to_axis(x), date_to_axis(y)])
                })
                .collect(),
        })
        .collect()
}

/// Show the chart and block until the window is closed.
pub fn show(records: &[BulletinRecord]) -> Result<()> {
    let series = trend_series(records);
    if series.iter().all(|s| s.points.is_empty()) {
        warn!("nothing to plot");
        return Ok(());
    }
    for s in &series {
        info!(series = s.name, points = s.points.len(), "plotting");
    }
    render(series)
}

#[cfg(feature = "gui")]
fn render(series: Vec<TrendSeries>) -> Result<()> {
    window::run(series)
}

#[cfg(not(feature = "gui"))]
fn render(_series: Vec<TrendSeries>) -> Result<()> {
    warn!("built without the gui feature; chart window skipped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(release: &str, fa: [&str; 3]) -> BulletinRecord {
        BulletinRecord {
            release_month: release.into(),
            eb1_final_action: fa[0].into(),
            eb2_final_action: fa[1].into(),
            eb3_final_action: fa[2].into(),
            eb1_filing: "C".into(),
            eb2_filing: "C".into(),
            eb3_filing: "C".into(),
        }
    }

    #[test]
    fn one_series_per_category_with_gaps() {
        let records = vec![
            record("01Oct23", ["01Oct23", "01Jan12", "U"]),
            record("01Nov23", ["01Jan22", "01Mar12", "01Jun12"]),
        ];
        let series = trend_series(&records);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].name, "EB1 Final Action Date");
        assert_eq!(series[0].points.len(), 2);
        assert_eq!(series[2].points.len(), 1);

        let [x, y] = series[1].points[1];
        assert_eq!(axis_to_date(x), NaiveDate::from_ymd_opt(2023, 11, 1));
        assert_eq!(axis_to_date(y), NaiveDate::from_ymd_opt(2012, 3, 1));
    }

    #[test]
    fn current_category_tracks_the_diagonal() {
        let series = trend_series(&[record("01Mar24", ["01Mar24", "C", "C"])]);
        let [x, y] = series[0].points[0];
        assert_eq!(x, y);
    }

    #[test]
    fn empty_input_shows_nothing() {
        assert!(show(&[]).is_ok());
    }
}
