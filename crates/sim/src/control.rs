//! The discrete PID heating loop.
//!
//! Each control step advances the process by one time step:
//!
//! ```text
//! error[t]      = setpoint[t] - measured[t]
//! output        = max(Kp * error[t] + Ki * Σ error[0..=t] + Kd * (error[t] - error[t-1]), 0)
//! measured[t+1] = measured[t] + output + loss
//! ```
//!
//! The derivative term is zero on the first step. The update is clamped to be
//! non-negative according to the run's [`ClampPolicy`](crate::ClampPolicy).

use std::convert::Infallible;

use heatloop_core::Observer;

use crate::{ControllerParameters, Event, IntegralMode, RunConfig, SimulationTrace};

/// Runs the loop to completion and returns the recorded trace.
///
/// The observer receives an [`Event`] after each control step.
pub(crate) fn simulate<O>(
    params: &ControllerParameters,
    config: &RunConfig,
    mut observer: O,
) -> SimulationTrace
where
    O: Observer<Event, Infallible>,
{
    let mut trace = SimulationTrace::with_capacity(config.duration_steps());

    trace.time_steps.push(0);
    trace.setpoints.push(config.setpoint_at(0));
    trace.measured.push(0.0);

    let mut running_sum = 0.0;

    for index in 0..config.control_steps() {
        let setpoint = trace.setpoints[index];
        let measured = trace.measured[index];

        let error = setpoint - measured;
        trace.errors.push(error);

        let error_sum = match config.integral_mode() {
            IntegralMode::Resum => trace.errors.iter().sum::<f64>(),
            IntegralMode::RunningSum => {
                running_sum += error;
                running_sum
            }
        };

        let proportional = params.proportional_gain() * error;
        let integral = params.integral_gain() * error_sum;
        let derivative = if index == 0 {
            0.0
        } else {
            params.derivative_gain() * (error - trace.errors[index - 1])
        };

        // Heating only: negative control action is clamped to zero.
        let output = (proportional + integral + derivative).max(0.0);

        let next_measured = measured + output + params.loss_constant();
        let next_measured = if config.clamp_policy().clamps(index) {
            next_measured.max(0.0)
        } else {
            next_measured
        };
        let next_setpoint = config.setpoint_at(index + 1);

        trace.outputs.push(output);
        trace.time_steps.push(index + 1);
        trace.setpoints.push(next_setpoint);
        trace.measured.push(next_measured);

        let event = Event {
            index,
            setpoint,
            measured,
            error,
            proportional,
            integral,
            derivative,
            output,
            next_setpoint,
            next_measured,
        };
        if let Some(action) = observer.observe(&event) {
            match action {}
        }
    }

    trace
}
