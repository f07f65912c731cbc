use crate::prelude::{eprintln, *};
use clap::Parser;

mod error;
mod extract;
mod play;
mod prelude;
mod source;
mod validate;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Extract multiple-choice question banks from PDF or plain text, validate them, and quiz yourself"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "QUIZBANK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Extract questions from a PDF or text file into a JSON question bank
    Extract(crate::extract::App),

    /// Validate a question bank file or URL
    Validate(crate::validate::App),

    /// Take a quiz in the terminal
    Play(crate::play::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let result = match app.command {
        SubCommands::Extract(sub_app) => crate::extract::run(sub_app, app.global).await,
        SubCommands::Validate(sub_app) => crate::validate::run(sub_app, app.global).await,
        SubCommands::Play(sub_app) => crate::play::run(sub_app, app.global).await,
    };

    // An empty extraction needs human review of the source, not a retry.
    if let Err(err) = &result {
        if let Some(nothing @ Error::NothingExtracted { .. }) = err.downcast_ref::<Error>() {
            eprintln!("{}", nothing);
            std::process::exit(2);
        }
    }

    result
}
