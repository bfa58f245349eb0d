//! Ask command - one question, streamed progress, answer with citations

use clap::Args;

use crate::config::AppConfig;
use crate::domain::agent::{ChannelSink, Stage, StageEvent};
use crate::infrastructure::logging;

#[derive(Args)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// Corpus directory (overrides the configured path)
    #[arg(long)]
    pub corpus: Option<String>,

    /// Suppress per-stage progress output
    #[arg(long)]
    pub quiet: bool,
}

/// Run one traversal and print the answer
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(corpus) = args.corpus {
        config.corpus.path = corpus;
    }

    init_logging(&config);

    let driver = crate::create_agent(&config).await?;

    let (sink, mut rx) = ChannelSink::new();
    let quiet = args.quiet;
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !quiet {
                print_event(&event);
            }
        }
    });

    let result = driver.run(args.question, &sink).await;
    drop(sink);
    printer.await?;

    let state = result?;

    println!("\n{}\n", state.generation);

    if !state.documents.is_empty() {
        println!("Sources:");
        for (i, doc) in state.documents.iter().enumerate() {
            let source = doc.source.as_deref().unwrap_or(&doc.id);
            match doc.page() {
                Some(page) => println!("  [{}] {} (chunk {})", i + 1, source, page),
                None => println!("  [{}] {}", i + 1, source),
            }
        }
    }

    Ok(())
}

fn print_event(event: &StageEvent) {
    match event.stage {
        Stage::Retrieve => {
            println!("-> retrieve: {} candidates", event.state.documents.len());
        }
        Stage::Grade => {
            println!("-> grade: {} relevant", event.state.documents.len());
        }
        Stage::Reformulate => {
            println!(
                "-> reformulate (attempt {}): {}",
                event.state.retry_count, event.state.question
            );
        }
        Stage::Generate => println!("-> generate"),
        Stage::Route | Stage::Done => {}
    }
}

fn init_logging(config: &AppConfig) {
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });
}
