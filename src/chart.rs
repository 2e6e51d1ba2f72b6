use crate::results::{BenchmarkResults, Input, Method};
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

// Font sizes
const TITLE_FONT_SIZE: u32 = 30;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;

/// Thread counts a full run renders, one chart each
pub const THREAD_COUNTS: &[u32] = &[1, 2, 4, 8, 16, 32, 48];

/// Width of a single bar in x-axis units (inputs sit at integer positions)
pub const BAR_WIDTH: f64 = 0.2;

/// Extensions accepted as-is when resolving an output path
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

/// Color palette for the matmul backends
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180), // Blue (eigen)
    RGBColor(255, 127, 14), // Orange (matrixmultiply)
    RGBColor(44, 160, 44),  // Green (cblas)
];

fn method_color(method: Method) -> RGBColor {
    match method {
        Method::Eigen => COLORS[0],
        Method::MatrixMultiply => COLORS[1],
        Method::Cblas => COLORS[2],
    }
}

/// Methods plotted for a given thread count. The matrixmultiply backend is
/// single-threaded, so above 4 threads it is left off the chart.
pub fn methods_for_thread_count(thread_count: u32) -> &'static [Method] {
    if thread_count > 4 {
        &[Method::Eigen, Method::Cblas]
    } else {
        &[Method::Eigen, Method::MatrixMultiply, Method::Cblas]
    }
}

/// Offset of bar `index` from its group center, for a group of `count` bars.
/// Symmetric around the center for any group size.
pub fn bar_offset(index: usize, count: usize) -> f64 {
    (index as f64 - (count as f64 - 1.0) / 2.0) * BAR_WIDTH
}

/// Resolve the output path: recognized image extensions pass through,
/// anything else gets `.png` appended to the file name.
pub fn normalize_chart_path(path: &Path) -> PathBuf {
    let recognized = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if recognized {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_os_string();
        with_ext.push(".png");
        PathBuf::from(with_ext)
    }
}

/// Parameters for a single chart
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Thread count whose timings to plot; also selects the method set
    pub thread_count: u32,
    /// Where to write the image; `None` renders for display only
    pub destination: Option<PathBuf>,
    /// Open the rendered image in the platform viewer
    pub interactive: bool,
}

/// Generate one chart per thread count into `output_dir`
pub fn generate_charts(data: &BenchmarkResults, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    for &thread_count in THREAD_COUNTS {
        let spec = ChartSpec {
            thread_count,
            destination: Some(output_dir.join(format!("results_graph_{}", thread_count))),
            interactive: false,
        };
        render_chart(data, &spec)?;
    }

    Ok(())
}

/// Render a grouped bar chart (one group per input, one bar per method) for
/// the thread count in `spec`. Returns the path written, if any.
///
/// All timings are looked up before the output file is created, so a missing
/// thread count, input, or method fails the call without leaving a file
/// behind.
pub fn render_chart(data: &BenchmarkResults, spec: &ChartSpec) -> Result<Option<PathBuf>> {
    let thread_key = spec.thread_count.to_string();
    let methods = methods_for_thread_count(spec.thread_count);
    let inputs = Input::all();

    // Collect timings up front; lookup failures surface here.
    let mut timings: Vec<Vec<f64>> = Vec::with_capacity(inputs.len());
    for &input in inputs {
        let per_method: Vec<f64> = methods
            .iter()
            .map(|&method| data.duration(&thread_key, input, method))
            .collect::<Result<_>>()?;
        timings.push(per_method);
    }

    let path = match &spec.destination {
        Some(dest) => normalize_chart_path(dest),
        None if spec.interactive => {
            std::env::temp_dir().join(format!("results_graph_{}.png", spec.thread_count))
        }
        None => return Ok(None),
    };

    draw_grouped_bars(&path, spec.thread_count, methods, &timings)?;
    println!("Generated: {}", path.display());

    if spec.interactive {
        open_viewer(&path)?;
    }

    Ok(Some(path))
}

fn draw_grouped_bars(
    path: &Path,
    thread_count: u32,
    methods: &[Method],
    timings: &[Vec<f64>],
) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let num_inputs = Input::all().len();

    // Time range for the log scale; bars rise from the bottom of the range
    let min_time = timings
        .iter()
        .flatten()
        .copied()
        .filter(|&v| v > 0.0)
        .fold(f64::MAX, |a, b| a.min(b));
    let min_time = if min_time == f64::MAX { 1e-3 } else { min_time };

    let max_time = timings
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f64, |a, b| a.max(b))
        .max(min_time)
        * 2.0;

    let y_start = min_time / 2.0;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Performance by Method for Thread Count: {}", thread_count),
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            -0.5..(num_inputs as f64 - 0.5),
            (y_start..max_time).log_scale(),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.1))
        .x_labels(num_inputs)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            if idx < num_inputs && (x - idx as f64).abs() < 0.3 {
                Input::all()
                    .get(idx)
                    .map(|i| i.label().to_string())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_desc("Time (seconds)")
        .x_desc("Input")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (method_idx, &method) in methods.iter().enumerate() {
        let color = method_color(method);
        let offset = bar_offset(method_idx, methods.len());

        for (input_idx, per_method) in timings.iter().enumerate() {
            let value = per_method[method_idx];
            if value <= 0.0 {
                continue;
            }

            let x_center = input_idx as f64 + offset;
            let x_left = x_center - BAR_WIDTH / 2.0 + 0.02;
            let x_right = x_center + BAR_WIDTH / 2.0 - 0.02;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x_left, y_start), (x_right, value)],
                color.filled(),
            )))?;
        }
    }

    // Legend entries (zero-size markers carry the labels)
    for &method in methods {
        let color = method_color(method);
        chart
            .draw_series(std::iter::once(Circle::new(
                (num_inputs as f64 - 1.0, max_time),
                0,
                color.filled(),
            )))?
            .label(method.name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    root.present()?;
    Ok(())
}

fn open_viewer(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let program = "xdg-open";

    std::process::Command::new(program)
        .arg(path)
        .spawn()
        .with_context(|| format!("Failed to open {} in an image viewer", path.display()))?;
    Ok(())
}
