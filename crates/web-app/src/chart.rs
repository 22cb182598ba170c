use indexmap::IndexMap;
use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

use crate::Theme;

pub const COLOR_WEIGHT: usize = 8;

pub const OPACITY_LINE: f64 = 0.9;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_POINT: u32 = 3;

pub const HEIGHT: u32 = 200;
pub const DEFAULT_WIDTH: u32 = 640;

pub const FONT: (&str, u32) = ("Roboto", 11);

#[derive(Clone, Copy, Default)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |bounds: Option<Bounds>, value| {
            Some(bounds.map_or(
                Bounds {
                    min: value,
                    max: value,
                },
                |b| Bounds {
                    min: f64::min(b.min, value),
                    max: f64::max(b.max, value),
                },
            ))
        })
    }

    fn min_with_margin(self) -> f64 {
        if self.min >= 0. {
            return f64::max(self.min - self.margin(), 0.);
        }
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f64 {
        self.max + self.margin()
    }

    fn margin(self) -> f64 {
        if (self.max - self.min).abs() > f64::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Points of a chart keyed by label.
///
/// A label keeps the position of its first occurrence and the value of its last one.
pub(crate) fn key_by_label(data: &[(String, f64)]) -> IndexMap<&str, f64> {
    let mut points = IndexMap::new();
    for (label, value) in data {
        points.insert(label.as_str(), *value);
    }
    points
}

/// Plot the weight progression of one exercise as a line chart.
///
/// The x axis is categorical with one tick per distinct label in chronological order. Returns
/// `None` if there is nothing to plot.
#[allow(clippy::missing_errors_doc)]
pub fn plot_trend(
    data: &[(String, f64)],
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let points = key_by_label(data);

    let Some(bounds) = Bounds::of(points.values().copied()) else {
        return Ok(None);
    };

    let labels = points.keys().copied().collect::<Vec<_>>();
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let last = labels.len() as i32 - 1;

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (width, HEIGHT)).into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(40f32)
            .build_cartesian_2d(
                0..last.max(1),
                bounds.min_with_margin()..bounds.max_with_margin(),
            )?;

        let x_label_formatter = |x: &i32| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| labels.get(i))
                .map(ToString::to_string)
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(labels.len().min(10))
            .x_label_formatter(&x_label_formatter)
            .y_labels(6)
            .draw()?;

        let values = points
            .values()
            .zip(0..)
            .map(|(y, x)| (x, *y))
            .collect::<Vec<(i32, f64)>>();

        chart.draw_series(LineSeries::new(
            values.iter().copied(),
            Palette99::pick(COLOR_WEIGHT)
                .mix(OPACITY_LINE)
                .stroke_width(WIDTH_LINE),
        ))?;
        chart.draw_series(values.iter().map(|point| {
            Circle::new(
                *point,
                SIZE_POINT,
                Palette99::pick(COLOR_WEIGHT).mix(OPACITY_LINE).filled(),
            )
        }))?;

        root.present()?;
    }

    Ok(Some(result))
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}
