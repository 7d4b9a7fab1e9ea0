use crate::models::JobField;

use super::JobCard;

/// Escapes the five markup-special characters so résumé text is always
/// inert when inserted into the card markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty-state">{}</div>"#, escape_html(message))
}

pub(super) fn card(index: usize, card: &JobCard) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="job-card">"#);
    html.push_str(&format!(r#"<div class="job-badge">{}</div>"#, index + 1));
    html.push_str(r#"<div class="grid-gap">"#);
    html.push_str(&input(card, JobField::Company, "data-field"));
    html.push_str(&input(card, JobField::Title, "data-field"));
    html.push_str(&input(card, JobField::Location, "data-field"));
    html.push_str(r#"<div class="row">"#);
    html.push_str(&input(card, JobField::StartDate, "data-field half"));
    html.push_str(&input(card, JobField::EndDate, "data-field half"));
    html.push_str("</div>");
    html.push_str(&format!(
        r#"<textarea placeholder="{}" rows="3" class="data-field" data-key="{}">{}</textarea>"#,
        JobField::Description.placeholder(),
        JobField::Description.key(),
        escape_html(card.value(JobField::Description)),
    ));
    html.push_str("</div></div>");
    html
}

fn input(card: &JobCard, field: JobField, class: &str) -> String {
    format!(
        r#"<input type="text" placeholder="{}" class="{}" data-key="{}" value="{}">"#,
        field.placeholder(),
        class,
        field.key(),
        escape_html(card.value(field)),
    )
}
