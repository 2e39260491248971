use ratatui::{
    style::Stylize,
    text::{Line, Span, Text},
};

#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub description: Option<String>,
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

fn key_to_span<'a>(key: &str) -> Span<'a> {
    Span::from(format!("({})", key)).bold()
}

/// Renders key bindings as `(k1) or (k2) description` lines
pub fn usage_to_text<'a>(usage: UsageInfo) -> Text<'a> {
    let mut lines: Vec<Line> = vec![];
    if let Some(description) = usage.description {
        lines.push(Line::from(description));
    }

    for usage_line in usage.lines {
        let mut spans: Vec<Span> = Vec::with_capacity(usage_line.keys.len() * 2 + 1);

        for (idx, key) in usage_line.keys.iter().enumerate() {
            if idx > 0 {
                spans.push(" or ".into());
            }
            spans.push(key_to_span(key));
        }

        spans.push(Span::from(format!(" {}", usage_line.description)));
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn joins_alternative_keys() {
        let text = usage_to_text(UsageInfo {
            description: Some("Room controls".into()),
            lines: vec![UsageInfoLine {
                keys: vec!["q".into(), "Ctrl+C".into()],
                description: "to exit".into(),
            }],
        });

        assert_eq!(text.lines.len(), 2);
        assert_eq!(line_text(&text.lines[0]), "Room controls");
        assert_eq!(line_text(&text.lines[1]), "(q) or (Ctrl+C) to exit");
    }
}
