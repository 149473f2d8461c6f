use crate::commands::{run_catalog, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use irrigation_assess::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Irrigation Network Assessment",
    about = "Score irrigation network operations surveys and serve the assessment API",
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
    /// Print the question catalog grouped by category
    Catalog,
    /// Score an answer set and print the report
    Score(ScoreArgs),
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
        Command::Catalog => run_catalog(),
        Command::Score(args) => run_score(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["irrigation-assess-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_score_flags() {
        let cli = Cli::try_parse_from([
            "irrigation-assess-api",
            "score",
            "--answers",
            "[5,1,3]",
            "--export",
            "out.json",
            "--summarize",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.answers.as_deref(), Some("[5,1,3]"));
                assert!(args.summarize);
                assert!(args.csv.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn answers_and_answers_file_conflict() {
        let result = Cli::try_parse_from([
            "irrigation-assess-api",
            "score",
            "--answers",
            "[1]",
            "--answers-file",
            "answers.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["irrigation-assess-api", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
