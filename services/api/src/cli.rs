use crate::demo::{run_demo, run_evaluate, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use speech_eval::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Speech Evaluation Service",
    about = "Score spoken self-introduction transcripts over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a transcript from a file or inline text
    Evaluate(EvaluateArgs),
    /// Score a built-in sample introduction and print the report
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["speech-eval-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_accepts_a_file() {
        let cli = Cli::try_parse_from(["speech-eval-api", "evaluate", "--file", "intro.txt"])
            .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.file, Some(PathBuf::from("intro.txt")));
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn evaluate_rejects_file_and_text_together() {
        let parsed = Cli::try_parse_from([
            "speech-eval-api",
            "evaluate",
            "--file",
            "intro.txt",
            "--text",
            "Hello there everyone",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["speech-eval-api", "serve", "--port", "9000"])
            .expect("parses");

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
