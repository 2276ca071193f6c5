//! Scatter plot with the fitted regression line.
//!
//! The window itself needs the `plot` feature (eframe + egui_plot). The series
//! builders below are always available so callers can render elsewhere.

use crate::error::Result;
use crate::stats::RegressionResult;
use crate::table::Table;

/// Window and chart title.
pub fn plot_title(predictor: &str, response: &str) -> String {
    format!("Linear Regression: {} vs {}", response, predictor)
}

/// Raw `(predictor, response)` pairs, skipping rows with a non-finite value.
pub fn scatter_points(table: &Table, predictor: &str, response: &str) -> Result<Vec<[f64; 2]>> {
    let xs = table.numeric_column(predictor)?;
    let ys = table.numeric_column(response)?;

    Ok(xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| [x, y])
        .collect())
}

/// End points of the fitted line across the observed predictor range.
pub fn regression_line(points: &[[f64; 2]], regression: &RegressionResult) -> Vec<[f64; 2]> {
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), [x, _]| {
            (lo.min(*x), hi.max(*x))
        });

    if lo > hi {
        return Vec::new();
    }

    vec![[lo, regression.predict(lo)], [hi, regression.predict(hi)]]
}

/// Open a window with the scatter and regression line; blocks until closed.
#[cfg(feature = "plot")]
pub fn show_regression(
    table: &Table,
    predictor: &str,
    response: &str,
    regression: &RegressionResult,
) -> Result<()> {
    use eframe::egui;

    use crate::error::PipelineError;

    let points = scatter_points(table, predictor, response)?;
    let line = regression_line(&points, regression);
    let title = plot_title(predictor, response);

    let app = window::RegressionPlot {
        title: title.clone(),
        x_label: predictor.to_string(),
        y_label: response.to_string(),
        points,
        line,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 500.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    log::info!("Opening plot window: {}", title);
    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| PipelineError::Plot(e.to_string()))
}

/// Plotting is compiled out; always fails with `PlotUnavailable`.
#[cfg(not(feature = "plot"))]
pub fn show_regression(
    _table: &Table,
    _predictor: &str,
    _response: &str,
    _regression: &RegressionResult,
) -> Result<()> {
    Err(crate::error::PipelineError::PlotUnavailable)
}

#[cfg(feature = "plot")]
mod window {
    use eframe::egui::{self, Color32};
    use egui_plot::{Legend, Line, Plot, Points};

    pub(super) struct RegressionPlot {
        pub title: String,
        pub x_label: String,
        pub y_label: String,
        pub points: Vec<[f64; 2]>,
        pub line: Vec<[f64; 2]>,
    }

    impl eframe::App for RegressionPlot {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(self.title.as_str());

                Plot::new("regression_plot")
                    .legend(Legend::default())
                    .x_axis_label(self.x_label.as_str())
                    .y_axis_label(self.y_label.as_str())
                    .allow_boxed_zoom(true)
                    .allow_drag(true)
                    .allow_scroll(true)
                    .allow_zoom(true)
                    .show(ui, |plot_ui| {
                        plot_ui.points(
                            Points::new(self.points.clone())
                                .name("Data")
                                .color(Color32::BLUE)
                                .radius(3.0),
                        );
                        plot_ui.line(
                            Line::new(self.line.clone())
                                .name("Regression line")
                                .color(Color32::RED)
                                .width(2.0),
                        );
                    });
            });
        }
    }
}
