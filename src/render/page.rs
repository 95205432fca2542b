use crate::config::toml_config::PageSettings;
use crate::core::filter::{FilteredView, Selection};
use crate::domain::model::Dataset;
use crate::render::chart::render_chart;
use crate::render::format::escape_html;
use crate::render::table::render_table;

const STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", Helvetica, Arial, sans-serif; color: #262730; display: flex; min-height: 100vh; }
aside { width: 300px; background: #f0f2f6; padding: 2rem 1.5rem; box-sizing: border-box; }
aside select { width: 100%; min-height: 12rem; }
aside input[type=range] { width: 100%; }
aside .year-value { font-weight: 600; }
aside .credit { margin-top: 2rem; font-size: 0.9rem; }
main { flex: 1; padding: 2rem 3rem; overflow-x: auto; }
table.data { border-collapse: collapse; font-size: 0.9rem; }
table.data th, table.data td { border: 1px solid #e6e9ef; padding: 0.3rem 0.6rem; }
table.data td.num { text-align: right; }
table.data td.idx { color: #808495; }
.warning { background: #fffce7; color: #926c05; padding: 1rem; border-radius: 0.5rem; }
svg.chart text { font-size: 12px; fill: #262730; }
svg.chart text.title { font-size: 16px; }
svg.chart line.grid { stroke: #e6e9ef; }
svg.chart text.bar-label { font-size: 10px; }
"#;

/// Minimal inline markdown: `**bold**` and `[label](url)`.
fn markdown_link_line(bold: &str, label: &str, url: &str) -> String {
    format!(
        "<p><strong>{}</strong> <a href=\"{}\" target=\"_blank\">{}</a></p>",
        escape_html(bold),
        escape_html(url),
        escape_html(label)
    )
}

fn render_sidebar(dataset: &Dataset, selection: &Selection, page: &PageSettings) -> String {
    let mut html = String::new();
    html.push_str("<aside>\n<h2>Filtros</h2>\n<form method=\"get\" action=\"/\">\n");

    html.push_str("<label for=\"country\">Selecciona Países</label>\n");
    html.push_str(
        "<select id=\"country\" name=\"country\" multiple onchange=\"this.form.submit()\">\n",
    );
    for country in dataset.countries() {
        let selected = if selection.contains(country) {
            " selected"
        } else {
            ""
        };
        let escaped = escape_html(country);
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escaped, selected, escaped
        ));
    }
    html.push_str("</select>\n");

    let (min, max) = dataset
        .year_bounds()
        .unwrap_or((selection.year, selection.year));
    html.push_str(&format!(
        "<label for=\"year\">Selecciona Año: <span class=\"year-value\">{}</span></label>\n",
        selection.year
    ));
    html.push_str(&format!(
        "<input id=\"year\" type=\"range\" name=\"year\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\" onchange=\"this.form.submit()\">\n",
        min, max, selection.year
    ));
    html.push_str("<noscript><button type=\"submit\">Aplicar</button></noscript>\n");
    html.push_str("</form>\n");

    html.push_str("<div class=\"credit\">");
    html.push_str(&markdown_link_line(
        "Desarrollado por:",
        &page.author,
        &page.author_url,
    ));
    html.push_str("</div>\n</aside>\n");
    html
}

/// Full dashboard document for one selection.
pub fn render_page(
    dataset: &Dataset,
    selection: &Selection,
    view: &FilteredView,
    page: &PageSettings,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&page.title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    html.push_str(&render_sidebar(dataset, selection, page));

    html.push_str("<main>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&page.heading)));
    html.push_str(&markdown_link_line(
        "Fuente:",
        &page.source_label,
        &page.source_url,
    ));
    html.push_str(&render_table(view, selection));
    html.push_str("<h3>Comparación de Indicadores</h3>\n");
    html.push_str(&render_chart(view, selection));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter;
    use crate::domain::model::Record;

    fn dataset() -> Dataset {
        let record = |country: &str, year: i32| Record {
            country: country.to_string(),
            code: String::new(),
            year,
            deaths: 95000.0,
            deaths_estimated: 0.0,
            births: 250000.0,
            births_estimated: 0.0,
        };
        Dataset::new(vec![
            record("Chile", 1950),
            record("Chile", 2000),
            record("Argentina", 2100),
        ])
    }

    #[test]
    fn test_page_shell_parts() {
        let data = dataset();
        let selection = Selection {
            countries: vec!["Chile".to_string()],
            year: 2000,
        };
        let view = filter(&data, &selection);
        let html = render_page(&data, &selection, &view, &PageSettings::default());

        assert!(html.contains("<title>Dashboard de Nacimientos y Muertes Estimadas</title>"));
        assert!(html.contains("<h1>Dashboard de Nacimientos 🍼 y Muertes ⚰️ Estimadas</h1>"));
        assert!(html.contains("<strong>Fuente:</strong> <a href=\"https://www.kaggle.com/datasets/shreyasur965/births-and-deaths\""));
        assert!(html.contains("<strong>Desarrollado por:</strong>"));
        assert!(html.contains("<option value=\"Chile\" selected>Chile</option>"));
        assert!(html.contains("<option value=\"Argentina\">Argentina</option>"));
        assert!(html.contains("min=\"1950\" max=\"2100\" step=\"1\" value=\"2000\""));
        assert!(html.contains("<h3>Comparación de Indicadores</h3>"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_page_without_matches_warns() {
        let data = dataset();
        let selection = Selection {
            countries: vec!["Argentina".to_string()],
            year: 2000,
        };
        let view = filter(&data, &selection);
        let html = render_page(&data, &selection, &view, &PageSettings::default());

        assert!(html.contains("No hay datos disponibles para los filtros seleccionados."));
        assert!(!html.contains("<svg"));
    }
}
