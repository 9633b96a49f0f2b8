use crate::evaluate::{run_evaluate, EvaluateArgs};
use crate::scheme::run_scheme;
use crate::server;
use clap::{Args, Parser, Subcommand};
use marking_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lab Marking Tool",
    about = "Grade lab portfolios against the marking rubric from the command line or over HTTP",
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
    /// Grade one submission from a JSON selection file
    Evaluate(EvaluateArgs),
    /// Print the marking scheme and grading bands
    Scheme,
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
        Command::Scheme => {
            run_scheme();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::OutputFormat;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["marking-tool"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_accepts_format_and_output_dir() {
        let cli = Cli::try_parse_from([
            "marking-tool",
            "evaluate",
            "--input",
            "pass.json",
            "--format",
            "csv",
            "--out-dir",
            "exports",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.format, OutputFormat::Csv);
                assert_eq!(args.input.to_str(), Some("pass.json"));
                assert_eq!(
                    args.out_dir.as_deref().and_then(|dir| dir.to_str()),
                    Some("exports")
                );
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_rejects_unknown_formats() {
        let result = Cli::try_parse_from([
            "marking-tool",
            "evaluate",
            "--input",
            "pass.json",
            "--format",
            "xlsx",
        ]);
        assert!(result.is_err());
    }
}
