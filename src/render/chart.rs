use crate::core::filter::{FilteredView, Selection};
use crate::domain::model::{ChartPoint, Indicator};
use crate::render::format::{escape_html, format_si, format_thousands};

pub const EMPTY_WARNING: &str = "No hay datos disponibles para los filtros seleccionados.";

const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 460.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 170.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICKS: usize = 5;

/// Wide → long: one point per (row, indicator), keeping only positive values.
pub fn melt(view: &FilteredView) -> Vec<ChartPoint> {
    let mut points = Vec::with_capacity(view.len() * Indicator::CHART_ORDER.len());
    for indicator in Indicator::CHART_ORDER {
        for row in &view.rows {
            points.push(ChartPoint {
                country: row.country.clone(),
                indicator,
                value: row.value(indicator),
            });
        }
    }
    points.retain(|p| p.value > 0.0);
    points
}

pub fn chart_title(selection: &Selection) -> String {
    format!(
        "Comparación de Indicadores para {} en {}",
        selection.countries_label(),
        selection.year
    )
}

/// Step of 1, 2 or 5 times a power of ten that covers `max` in `TICKS` steps.
fn nice_step(max: f64) -> f64 {
    let raw = max / TICKS as f64;
    let power = 10f64.powi(raw.log10().floor() as i32);
    let fraction = raw / power;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * power
}

/// Grouped bar chart as inline SVG, or a warning when nothing was selected.
pub fn render_chart(view: &FilteredView, selection: &Selection) -> String {
    if view.is_empty() {
        return format!("<div class=\"warning\">⚠️ {}</div>\n", EMPTY_WARNING);
    }

    let points = melt(view);
    render_svg(&points, &chart_title(selection))
}

fn render_svg(points: &[ChartPoint], title: &str) -> String {
    let categories: Vec<Indicator> = Indicator::CHART_ORDER
        .into_iter()
        .filter(|i| points.iter().any(|p| p.indicator == *i))
        .collect();

    let mut countries: Vec<&str> = Vec::new();
    for point in points {
        if !countries.contains(&point.country.as_str()) {
            countries.push(&point.country);
        }
    }

    let max_value = points.iter().map(|p| p.value).fold(0.0, f64::max);
    let step = if max_value > 0.0 { nice_step(max_value) } else { 1.0 };
    let y_max = (max_value / step).ceil().max(1.0) * step;

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_of = |v: f64| MARGIN_TOP + plot_h - v / y_max * plot_h;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg class=\"chart\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" width=\"100%\" role=\"img\">\n",
        WIDTH, HEIGHT
    ));
    svg.push_str(&format!(
        "<text class=\"title\" x=\"{}\" y=\"28\">{}</text>\n",
        MARGIN_LEFT,
        escape_html(title)
    ));

    let tick_count = (y_max / step).round() as usize;
    for t in 0..=tick_count {
        let value = step * t as f64;
        let y = y_of(value);
        svg.push_str(&format!(
            "<line class=\"grid\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\"/><text class=\"tick\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_w,
            y,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            format_thousands(value)
        ));
    }

    if !categories.is_empty() {
        let group_w = plot_w / categories.len() as f64;
        let bar_w = group_w * 0.8 / countries.len() as f64;

        for (ci, indicator) in categories.iter().enumerate() {
            let group_x = MARGIN_LEFT + group_w * ci as f64;
            svg.push_str(&format!(
                "<text class=\"category\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
                group_x + group_w / 2.0,
                MARGIN_TOP + plot_h + 20.0,
                indicator.label()
            ));

            for (ki, country) in countries.iter().enumerate() {
                let Some(point) = points
                    .iter()
                    .find(|p| p.indicator == *indicator && p.country == *country)
                else {
                    continue;
                };
                let x = group_x + group_w * 0.1 + bar_w * ki as f64;
                let y = y_of(point.value);
                svg.push_str(&format!(
                    "<rect class=\"bar\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"><title>{} · {}: {}</title></rect><text class=\"bar-label\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
                    x,
                    y,
                    bar_w,
                    MARGIN_TOP + plot_h - y,
                    PALETTE[ki % PALETTE.len()],
                    escape_html(country),
                    indicator.label(),
                    format_thousands(point.value),
                    x + bar_w / 2.0,
                    y - 4.0,
                    format_si(point.value)
                ));
            }
        }
    }

    svg.push_str(&format!(
        "<text class=\"axis-label\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">Indicadores</text>\n",
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 20.0
    ));
    svg.push_str(&format!(
        "<text class=\"axis-label\" transform=\"translate(20 {:.1}) rotate(-90)\" text-anchor=\"middle\">Cantidad (separador de miles)</text>\n",
        MARGIN_TOP + plot_h / 2.0
    ));

    let legend_x = WIDTH - MARGIN_RIGHT + 20.0;
    svg.push_str(&format!(
        "<text class=\"legend-title\" x=\"{:.1}\" y=\"{:.1}\">País</text>\n",
        legend_x, MARGIN_TOP
    ));
    for (ki, country) in countries.iter().enumerate() {
        let y = MARGIN_TOP + 20.0 + 20.0 * ki as f64;
        svg.push_str(&format!(
            "<rect class=\"legend-swatch\" x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/><text class=\"legend\" x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
            legend_x,
            y - 10.0,
            PALETTE[ki % PALETTE.len()],
            legend_x + 18.0,
            y,
            escape_html(country)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
