use axum::http::StatusCode;

use crate::models::HomeView;

const STYLE: &str = "body{font-family:sans-serif;max-width:1040px;margin:2rem auto;padding:0 1rem;color:#222}\
form{margin-bottom:1.5rem}input{padding:.3rem}img{max-width:100%;border:1px solid #ddd}\
.prediction{font-size:1.2rem}.error{color:#a40000}";

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn render_form(number_of_years: Option<&str>) -> String {
    format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"number_of_years\">Number of years:</label>\n\
         <input type=\"text\" id=\"number_of_years\" name=\"number_of_years\" value=\"{}\">\n\
         <button type=\"submit\">Predict</button>\n</form>\n",
        escape_html(number_of_years.unwrap_or(""))
    )
}

/// Render the home page; chart and prediction sections appear only when present
pub fn render_home(view: &HomeView) -> String {
    let mut body = String::from("<h1>Apple Stock Price Prediction</h1>\n");
    body.push_str(&render_form(view.number_of_years.as_deref()));

    if let Some(plot) = &view.plot {
        body.push_str(&format!(
            "<img alt=\"Apple Stock Opening Price\" src=\"data:image/png;base64,{}\">\n",
            plot
        ));
    }

    if let Some(price) = view.predicted_close_price {
        body.push_str(&format!(
            "<p class=\"prediction\">Predicted close price: <strong>{:.2}</strong></p>\n",
            price
        ));
    }

    layout("Apple Stock Price Prediction", &body)
}

/// Render a failed submission with the form so the user can retry
pub fn render_error(status: StatusCode, message: &str) -> String {
    let mut body = String::from("<h1>Apple Stock Price Prediction</h1>\n");
    body.push_str(&render_form(None));
    body.push_str(&format!(
        "<p class=\"error\">Error {}: {}</p>\n",
        status.as_u16(),
        escape_html(message)
    ));
    layout("Error", &body)
}
