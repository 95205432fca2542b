use crate::core::filter::{FilteredView, Selection};
use crate::domain::model::{Indicator, COUNTRY, YEAR};
use crate::render::format::{escape_html, format_thousands};

/// "Datos para Chile, Argentina en 2000"
pub fn table_heading(selection: &Selection) -> String {
    format!(
        "Datos para {} en {}",
        selection.countries_label(),
        selection.year
    )
}

/// Filtered rows as an HTML table. The leading column is the display index.
pub fn render_table(view: &FilteredView, selection: &Selection) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<h2>{}</h2>\n",
        escape_html(&table_heading(selection))
    ));
    html.push_str("<table class=\"data\">\n<thead><tr><th></th>");
    html.push_str(&format!("<th>{}</th><th>{}</th>", COUNTRY, YEAR));
    for indicator in Indicator::TABLE_ORDER {
        html.push_str(&format!("<th>{}</th>", indicator.label()));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (index, row) in view.rows.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td class=\"idx\">{}</td><td>{}</td><td>{}</td>",
            index,
            escape_html(&row.country),
            row.year
        ));
        for indicator in Indicator::TABLE_ORDER {
            html.push_str(&format!(
                "<td class=\"num\">{}</td>",
                format_thousands(row.value(indicator))
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}
