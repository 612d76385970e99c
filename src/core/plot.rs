//! Plots of a recorded cycle through gnuplot. Needs a `gnuplot` executable in `PATH`.

use super::recorder::CycleRecorder;
use crate::error::EngineError;
use gnuplot::{AutoOption, AxesCommon, Caption, Figure, LineWidth};

/// Plots every column in `columns` against the crank angle over the recorded cycle.
///
/// `terminal` is any gnuplot terminal (`"svg"`, `"pngcairo"`, ...) and `file_name` its
/// output file.
pub fn plot_columns(
    recorder: &CycleRecorder,
    columns: &[&str],
    title: &str,
    terminal: &str,
    file_name: &str,
) -> Result<(), EngineError> {
    let angle = recorder.cycle_angles();

    let mut series = Vec::with_capacity(columns.len());
    for name in columns {
        let column = recorder
            .column(name)
            .ok_or_else(|| EngineError::UnknownColumn(name.to_string()))?;
        series.push((*name, column));
    }

    let mut fg = Figure::new();
    {
        let axes = fg
            .axes2d()
            .set_title(title, &[])
            .set_x_label("crank angle [CA deg]", &[])
            .set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(720.0));
        for (name, column) in series.iter() {
            axes.lines(angle.iter(), column.iter(), &[Caption(*name), LineWidth(1.5)]);
        }
    }
    fg.set_terminal(terminal, file_name);
    fg.show()
        .map_err(|err| EngineError::Plot(format!("gnuplot did not start: {}", err)))?;
    // waits for gnuplot to finish writing `file_name`
    fg.close();
    Ok(())
}

/// Piston position and valve lifts of cylinder `name`.
pub fn plot_cylinder(
    recorder: &CycleRecorder,
    name: &str,
    terminal: &str,
    file_name: &str,
) -> Result<(), EngineError> {
    let piston = format!("{} piston [mm]", name);
    let intake = format!("{} intake lift [mm]", name);
    let exhaust = format!("{} exhaust lift [mm]", name);
    plot_columns(
        recorder,
        &[&piston, &intake, &exhaust],
        name,
        terminal,
        file_name,
    )
}
