use chrono::{DateTime, Local};
use clap::Args;
use speech_eval::config::AppConfig;
use speech_eval::error::AppError;
use speech_eval::evaluation::{EvaluationResult, TranscriptEvaluator};
use speech_eval::features::TermFrequencyEmbedder;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_TRANSCRIPT: &str = "Hello everyone, good morning! My name is Priya Sharma and I \
    am 13 years old. I study in class eight at Sunrise Public School. I live with my mother, \
    my father and my little sister, who is always curious about everything. In my free time I \
    love painting landscapes and I enjoy playing badminton with my friends. I am also \
    interested in astronomy because the night sky is so beautiful. Thank you for listening!";

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Read the transcript from this file
    #[arg(long, conflicts_with = "text")]
    pub(crate) file: Option<PathBuf>,
    /// Transcript text passed inline
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Print the full evaluation result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full evaluation result as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Score coherence with the term-frequency model instead of the neutral fallback
    #[arg(long)]
    pub(crate) coherence: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs { file, text, json } = args;

    let transcript = match (file, text) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(text)) => text,
        (None, None) => {
            return Err(AppError::Input(
                "provide a transcript with --file or --text".to_string(),
            ))
        }
    };

    let config = AppConfig::load()?;
    let evaluator = TranscriptEvaluator::from_config(&config)?;
    let result = evaluator.evaluate(&transcript)?;

    print_result(&result, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut evaluator = TranscriptEvaluator::standard()?;
    if args.coherence {
        evaluator = evaluator.with_embedder(Arc::new(TermFrequencyEmbedder));
    }

    if !args.json {
        println!("Self-introduction evaluation demo");
        println!("Transcript:\n{}\n", DEMO_TRANSCRIPT);
    }

    let result = evaluator.evaluate(DEMO_TRANSCRIPT)?;
    print_result(&result, args.json)
}

fn print_result(result: &EvaluationResult, json: bool) -> Result<(), AppError> {
    if json {
        let rendered = serde_json::to_string_pretty(result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(result, Local::now()));
    }
    Ok(())
}

pub(crate) fn render_report(result: &EvaluationResult, evaluated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    let analysis = &result.detailed_analysis;

    let _ = writeln!(
        out,
        "Evaluated {}",
        evaluated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(
        out,
        "Overall score: {:.2} ({})",
        result.overall_score, result.grade
    );
    let _ = writeln!(
        out,
        "{} words | {} sentences | {:.0} WPM",
        result.word_count, result.sentence_count, analysis.speech_rate_wpm
    );

    let _ = writeln!(out, "\nCriteria");
    for criterion in &result.criteria_scores {
        let _ = writeln!(
            out,
            "- {}: {:.1}/{:.0} ({:.0}%, weight {:.0}%) {}",
            criterion.criterion,
            criterion.score(),
            criterion.max_score(),
            criterion.percentage(),
            criterion.weight,
            criterion.feedback
        );
    }

    if analysis.keywords_missing.is_empty() {
        let _ = writeln!(out, "\nMissing content: none");
    } else {
        let _ = writeln!(
            out,
            "\nMissing content: {}",
            analysis.keywords_missing.join(", ")
        );
    }

    if !analysis.filler_details.is_empty() {
        let fillers = analysis
            .filler_details
            .iter()
            .map(|(filler, count)| format!("{filler} x{count}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "Filler words: {fillers}");
    }

    let _ = writeln!(
        out,
        "Sentiment: {} | Flow: {} | Vocabulary richness {:.1}%",
        analysis.sentiment_label, analysis.flow_quality, analysis.vocabulary_richness
    );
    let _ = writeln!(out, "\n{}", result.summary);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn evaluated_at() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn demo_transcript_is_accepted() {
        let evaluator = TranscriptEvaluator::standard().expect("standard rubric is valid");
        let result = evaluator
            .evaluate(DEMO_TRANSCRIPT)
            .expect("demo transcript is valid");

        assert!(result.detailed_analysis.keywords_missing.is_empty());
        assert_eq!(result.criteria_scores.len(), 9);
    }

    #[test]
    fn report_lists_every_criterion_and_the_summary() {
        let evaluator = TranscriptEvaluator::standard().expect("standard rubric is valid");
        let result = evaluator
            .evaluate(DEMO_TRANSCRIPT)
            .expect("demo transcript is valid");

        let report = render_report(&result, evaluated_at());

        assert!(report.starts_with("Evaluated 2026-03-02 09:30:00\n"));
        assert!(report.contains(&format!("({})", result.grade)));
        for criterion in &result.criteria_scores {
            assert!(report.contains(&criterion.criterion), "{}", criterion.criterion);
        }
        assert!(report.contains("Missing content: none"));
        assert!(report.trim_end().ends_with(&result.summary));
    }

    #[test]
    fn evaluate_requires_a_transcript_source() {
        let err = run_evaluate(EvaluateArgs::default()).expect_err("no input given");
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn evaluate_surfaces_missing_files() {
        let args = EvaluateArgs {
            file: Some(PathBuf::from("/nonexistent/speech-eval/intro.txt")),
            ..EvaluateArgs::default()
        };

        let err = run_evaluate(args).expect_err("file does not exist");
        assert!(matches!(err, AppError::Io(_)));
    }
}
