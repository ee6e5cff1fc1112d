// src/chart/window.rs

use anyhow::{anyhow, Result};
use eframe::egui::{self, ViewportBuilder};
use egui_plot::{GridMark, Legend, Line, Plot};
use std::ops::RangeInclusive;

use super::{axis_to_date, TrendSeries, TITLE, X_LABEL, Y_LABEL};

pub fn run(series: Vec<TrendSeries>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1000.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(TrendChart { series }))),
    )
    .map_err(|e| anyhow!("chart window failed: {}", e))
}

struct TrendChart {
    series: Vec<TrendSeries>,
}

fn month_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    axis_to_date(mark.value)
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_default()
}

impl eframe::App for TrendChart {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            Plot::new("trends")
                .legend(Legend::default())
                .x_axis_label(X_LABEL)
                .y_axis_label(Y_LABEL)
                .x_axis_formatter(month_label)
                .y_axis_formatter(month_label)
                .show(ui, |plot_ui| {
                    for s in &self.series {
                        plot_ui.line(Line::new(s.name, s.points.clone()));
                    }
                });
        });
    }
}
