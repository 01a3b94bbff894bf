use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use fogscore::{batch, Lexicon, Scorer};

#[allow(missing_docs)]
#[derive(Debug, StructOpt)]
#[structopt(name = "fogscore", about = "Sentiment and readability scoring for web articles.")]
struct App {
    #[structopt(
        name = "input",
        help = "The csv file with URL_ID and URL columns.",
        parse(from_os_str)
    )]
    input: PathBuf,
    #[structopt(
        long = "output",
        short = "o",
        help = "The csv file to write the scored rows to.",
        parse(from_os_str)
    )]
    output: PathBuf,
    #[structopt(
        long = "lexicon-dir",
        help = "Directory containing stop_words.txt, positive_words.txt and negative_words.txt.",
        parse(from_os_str)
    )]
    lexicon_dir: PathBuf,
    #[structopt(long = "timeout", help = "Request timeout in seconds.")]
    timeout: Option<u64>,
    #[structopt(long = "user-agent", help = "The user-agent used for requests.")]
    user_agent: Option<String>,
    #[structopt(long = "concurrency", help = "Number of urls fetched at a time.")]
    concurrency: Option<usize>,
}

impl App {
    async fn run(self) -> anyhow::Result<()> {
        let lexicon = Lexicon::load(
            self.lexicon_dir.join("stop_words.txt"),
            self.lexicon_dir.join("positive_words.txt"),
            self.lexicon_dir.join("negative_words.txt"),
        )?;

        let mut builder = Scorer::builder(lexicon);
        if let Some(timeout) = self.timeout {
            builder = builder.request_timeout(Duration::from_secs(timeout));
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(concurrency) = self.concurrency {
            builder = builder.concurrency(concurrency);
        }
        let scorer = builder.build()?;

        let rows = batch::read_input(&self.input)?;
        let scored = scorer.run(rows).await;
        batch::write_output(&self.output, &scored)?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    Ok(App::from_args().run().await?)
}
