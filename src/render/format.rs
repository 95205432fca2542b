/// Round to an integer and group thousands with `.` (`1234567.4` → `1.234.567`).
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| c != '0') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", rounded.as_str()),
    };

    // inf / NaN
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return rounded;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

const SI_PREFIXES: [(i32, &str); 6] = [(-1, "m"), (0, ""), (1, "k"), (2, "M"), (3, "G"), (4, "T")];

/// Two significant digits with an SI suffix, as used for bar labels (`95k`, `1.2M`).
pub fn format_si(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.1}", value);
    }

    let magnitude = |v: f64| v.abs().log10().floor() as i32;
    let exponent = magnitude(value);
    let factor = 10f64.powi(exponent - 1);
    let rounded = (value / factor).round() * factor;
    let exponent = magnitude(rounded);

    let group = exponent.div_euclid(3).clamp(-1, 4);
    let prefix = SI_PREFIXES
        .iter()
        .find(|(g, _)| *g == group)
        .map(|(_, p)| *p)
        .unwrap_or("");
    let scaled = rounded / 10f64.powi(group * 3);
    let integer_digits = exponent - group * 3 + 1;
    let decimals = (2 - integer_digits).max(0) as usize;

    format!("{:.*}{}", decimals, scaled, prefix)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
