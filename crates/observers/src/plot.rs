//! Plotting observer for visualizing a simulation run.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use heatloop_core::Observer;
use heatloop_sim::{Event, SimulationTrace};

/// Trace names used when plotting [`Event`]s directly.
pub const EVENT_TRACES: [&str; 3] = ["Measured", "Setpoint", "Output"];

/// Configuration for rendering a [`PlotObserver`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Ramp").legend().y_label("°C"))?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    y_label: Option<String>,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, no axis label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            y_label: None,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Labels the y-axis.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts plottable data from an event.
///
/// Return `None` from [`x`][Plottable::x] to skip the event entirely; return
/// `None` in a trace slot to skip that trace for the event.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    fn traces(&self) -> [Option<f64>; N];
}

/// Plots the state each control step produces against its time step.
///
/// An event for control step `t` contributes the point at `t + 1`: the
/// updated measured value, the setpoint it is compared against, and the
/// output that drove the update. The final time step of a run is therefore
/// plotted, while the starting point at step 0 (measured value zero) is not.
/// Use [`PlotObserver::record_trace`] to plot every time step from a finished
/// trace instead.
///
/// Pair with [`EVENT_TRACES`] for the trace names.
impl Plottable<3> for Event {
    #[allow(clippy::cast_precision_loss)]
    fn x(&self) -> Option<f64> {
        Some((self.index + 1) as f64)
    }

    fn traces(&self) -> [Option<f64>; 3] {
        [
            Some(self.next_measured),
            Some(self.next_setpoint),
            Some(self.output),
        ]
    }
}

/// An observer that collects trace data during a run and displays it via egui.
///
/// The const generic `N` is the number of traces. Record data by either:
///
/// - **Direct path**: pass `&mut PlotObserver` as the run observer for any
///   event type implementing [`Plottable<N>`][Plottable].
/// - **Closure path**: call [`record`][PlotObserver::record] manually, for
///   example from a finished [`SimulationTrace`] via
///   [`record_trace`][PlotObserver::record_trace].
///
/// # Example: direct path
///
/// ```ignore
/// let mut obs = PlotObserver::new(EVENT_TRACES);
/// sim.run_observed(config, &mut obs);
/// obs.show(ShowConfig::new().title("PID run").legend())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates a new `PlotObserver` with the given trace names.
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records a single data point across all traces.
    ///
    /// For each trace slot, `None` skips recording for that trace while
    /// leaving other traces unaffected.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (i, y) in traces.into_iter().enumerate() {
            if let Some(y) = y {
                self.data[i].push([x, y]);
            }
        }
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(PlotApp {
                    traces,
                    legend: config.legend,
                    y_label: config.y_label,
                }))
            }),
        )
    }
}

impl PlotObserver<2> {
    /// Records every time step of a finished run as `[measured, setpoint]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_trace(&mut self, trace: &SimulationTrace) {
        for (t, measured, setpoint) in trace.points() {
            self.record(t as f64, [Some(measured), Some(setpoint)]);
        }
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Allows `&mut PlotObserver<N>` to be passed to a run by value, so
/// [`PlotObserver::show`] can be called after the run completes.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    legend: bool,
    y_label: Option<String>,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("heatloop_plot").x_axis_label("step");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.y_label {
                plot = plot.y_axis_label(label.as_str());
            }
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}
