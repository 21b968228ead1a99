// Human-readable terminal rendering of an analysis result.
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::analysis::AnalysisResult;
use crate::nlp::SentimentLabel;

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Negative => Color::Red,
        SentimentLabel::Neutral => Color::Yellow,
        SentimentLabel::Unknown => Color::White,
    }
}

fn heading(out: &mut impl WriteColor, title: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", title)?;
    out.reset()
}

pub fn write_report(out: &mut impl WriteColor, result: &AnalysisResult) -> io::Result<()> {
    heading(out, "Sentiment: ")?;
    out.set_color(ColorSpec::new().set_fg(Some(label_color(result.sentiment.label))))?;
    write!(out, "{}", result.sentiment.label)?;
    out.reset()?;
    writeln!(out, " ({:+.3})", result.sentiment.score)?;

    heading(out, "Entities:")?;
    if result.entities.is_empty() {
        writeln!(out, " (none)")?;
    } else {
        writeln!(out)?;
        for entity in &result.entities {
            writeln!(out, "  {:<8} {}", entity.label, entity.text)?;
        }
    }

    heading(out, "Emotions:")?;
    if result.emotions.is_empty() {
        writeln!(out, " (none)")?;
    } else {
        let mut emotions: Vec<(&String, &u32)> = result.emotions.iter().collect();
        emotions.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let line: Vec<String> = emotions.iter().map(|(name, count)| format!("{}={}", name, count)).collect();
        writeln!(out, " {}", line.join(", "))?;
    }

    heading(out, "Summary:")?;
    writeln!(out, " {}", result.summary)?;

    for warning in &result.warnings {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "warning:")?;
        out.reset()?;
        writeln!(out, " {}", warning)?;
    }
    Ok(())
}

pub fn print_report(result: &AnalysisResult) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_report(&mut stdout, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Entity, EntityLabel, Sentiment};
    use termcolor::NoColor;

    #[test]
    fn test_write_report_plain() {
        let mut result = AnalysisResult {
            sentiment: Sentiment::from_polarity(0.5),
            entities: vec![Entity { text: "Hawaii".into(), label: EntityLabel::Gpe, start: 0 }],
            summary: "Sunny.".into(),
            warnings: vec!["Emotion analysis failed: boom".into()],
            ..Default::default()
        };
        result.emotions.insert("joy".into(), 2);
        result.emotions.insert("anger".into(), 2);
        result.emotions.insert("trust".into(), 3);

        let mut out = NoColor::new(Vec::new());
        write_report(&mut out, &result).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("Sentiment: Positive (+0.500)"));
        assert!(text.contains("  GPE      Hawaii"));
        assert!(text.contains("Emotions: trust=3, anger=2, joy=2"));
        assert!(text.contains("Summary: Sunny."));
        assert!(text.contains("warning: Emotion analysis failed: boom"));
    }

    #[test]
    fn test_write_report_empty_sections() {
        let mut out = NoColor::new(Vec::new());
        write_report(&mut out, &AnalysisResult::default()).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("Sentiment: Unknown"));
        assert!(text.contains("Entities: (none)"));
        assert!(text.contains("Emotions: (none)"));
    }
}
