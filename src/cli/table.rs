use crate::entity::Note;

const HEADERS: [&str; 5] = ["#", "Title", "Type", "Status", "Created At"];

/// Render notes as a plain-text table padded to the widest cell per column.
///
/// Widths are counted in `char`s, not terminal columns: rows holding wide
/// glyphs (the status emoji, CJK titles) can sit one or more columns off.
pub fn render_notes(notes: &[Note]) -> String {
    let rows: Vec<[String; 5]> = notes
        .iter()
        .map(|n| {
            [
                n.id.to_string(),
                n.title.clone(),
                n.note_type.to_string(),
                n.status_display().to_string(),
                n.created_display(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("-+-").as_str());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
