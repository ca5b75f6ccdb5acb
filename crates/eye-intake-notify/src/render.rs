//! HTML and plain-text rendering of a [`PatientSummary`].

use std::fmt::Write;

use crate::summary::{PatientSummary, SummaryValue};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; margin: 40px; color: #333; }
.header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #0070f3; padding-bottom: 20px; }
.logo { color: #0070f3; font-size: 28px; font-weight: bold; margin-bottom: 10px; }
.section { margin-bottom: 25px; }
.section-title { font-size: 18px; font-weight: bold; color: #0070f3; border-bottom: 1px solid #eee; padding-bottom: 5px; margin-bottom: 15px; }
.field { margin-bottom: 8px; }
.field-label { font-weight: bold; color: #555; }
.field-value { margin-left: 10px; }
.list-item { margin: 5px 0; padding-left: 20px; }
.medication-entry { background: #f8f9fa; padding: 10px; margin: 5px 0; border-radius: 5px; }";

/// Subject line of the clinic e-mail.
pub fn subject(summary: &PatientSummary) -> String {
    format!("Patient Registration Summary - {}", summary.patient_name)
}

/// Escape text for an HTML body.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Standalone HTML document, used as the e-mail body and attachment.
pub fn render_html(summary: &PatientSummary) -> String {
    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Patient Registration Summary</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<div class=\"logo\">{}</div>\n\
         <h2>Patient Registration Summary</h2>\n<p>Generated on {}</p>\n</div>\n",
        escape_html(&summary.clinic_name),
        summary.generated_on.format("%-m/%-d/%Y"),
    );

    for section in &summary.sections {
        let _ = write!(
            html,
            "<div class=\"section\">\n<div class=\"section-title\">{}</div>\n",
            escape_html(section.title)
        );
        for item in &section.items {
            let _ = write!(
                html,
                "<div class=\"field\">\n<span class=\"field-label\">{}:</span>\n",
                escape_html(item.label)
            );
            match &item.value {
                SummaryValue::Text(text) => {
                    let _ = writeln!(
                        html,
                        "<span class=\"field-value\">{}</span>",
                        escape_html(text)
                    );
                }
                SummaryValue::List(values) => {
                    for value in values {
                        let _ = writeln!(
                            html,
                            "<div class=\"list-item\">&bull; {}</div>",
                            escape_html(value)
                        );
                    }
                }
                SummaryValue::Medications(lines) => {
                    for line in lines {
                        let _ = write!(
                            html,
                            "<div class=\"medication-entry\">\n<strong>{}</strong><br>\n",
                            escape_html(&line.name)
                        );
                        if let Some(dosage) = &line.dosage {
                            let _ = writeln!(html, "Dosage: {}<br>", escape_html(dosage));
                        }
                        if let Some(eye) = &line.affected_eye {
                            let _ = writeln!(html, "Affected Eye: {}", escape_html(eye));
                        }
                        html.push_str("</div>\n");
                    }
                }
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Plain-text alternative body.
pub fn render_text(summary: &PatientSummary) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", summary.clinic_name);
    let _ = writeln!(
        text,
        "Patient Registration Summary ({})",
        summary.generated_on.format("%-m/%-d/%Y")
    );

    for section in summary.sections.iter().filter(|s| !s.items.is_empty()) {
        let _ = write!(text, "\n{}\n", section.title);
        for item in &section.items {
            match &item.value {
                SummaryValue::Text(value) => {
                    let _ = writeln!(text, "  {}: {}", item.label, value);
                }
                SummaryValue::List(values) => {
                    let _ = writeln!(text, "  {}:", item.label);
                    for value in values {
                        let _ = writeln!(text, "    - {value}");
                    }
                }
                SummaryValue::Medications(lines) => {
                    let _ = writeln!(text, "  {}:", item.label);
                    for line in lines {
                        let details: Vec<&str> = [line.dosage.as_deref(), line.affected_eye.as_deref()]
                            .into_iter()
                            .flatten()
                            .collect();
                        if details.is_empty() {
                            let _ = writeln!(text, "    - {}", line.name);
                        } else {
                            let _ = writeln!(text, "    - {} ({})", line.name, details.join(", "));
                        }
                    }
                }
            }
        }
    }
    text
}
