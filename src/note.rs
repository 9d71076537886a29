#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub title: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub body: String,
}

impl Note {
    /// Parses the raw text of a note file. Returns `None` when the note has
    /// fewer than two lines; such notes are skipped without side effects.
    pub fn parse(content: &str) -> Option<Self> {
        let mut lines: Vec<&str> = content.lines().collect();
        if lines.len() < 2 {
            return None;
        }

        let title = lines[0].trim().trim_start_matches('#').trim().to_string();

        // labels before assignees, so one line is never claimed twice
        let labels = take_prefixed_list(&mut lines, "labels:");
        let assignees = take_prefixed_list(&mut lines, "assign:");

        let body = lines[1..].join("\n").trim().to_string();

        Some(Self {
            title,
            labels,
            assignees,
            body,
        })
    }
}

/// Removes the first line starting with `prefix` (case-insensitive) from the
/// working sequence and splits its remainder on commas, trimming each token.
fn take_prefixed_list(lines: &mut Vec<&str>, prefix: &str) -> Vec<String> {
    let Some(pos) = lines.iter().position(|line| {
        line.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }) else {
        return Vec::new();
    };

    let line = lines.remove(pos);
    line[prefix.len()..]
        .split(',')
        .map(|token| token.trim().to_string())
        .collect()
}
