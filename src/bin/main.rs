use query_dispatcher::{
    config::Settings,
    dispatcher::Dispatcher,
    fetchers::HttpSource,
    formatter,
    models::{Intent, NewsCount},
    session::SessionState,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: :count N (news items, 1-50), :insights N, :history, :help, :quit";

/// Parse a 1-based item number
fn parse_item_number(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout is the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env()?;
    let mut news_count = settings.news_count;

    info!(timezone = %settings.timezone, "Query dispatcher starting");

    let source = HttpSource::new(settings)?;
    let dispatcher = Dispatcher::new(Arc::new(source));
    let mut session = SessionState::new();

    println!("🤖 AI Chatbot");
    println!("{}", formatter::GREETING);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if let Some(command) = line.trim().strip_prefix(':') {
            let (name, arg) = command.split_once(' ').unwrap_or((command, ""));

            match name {
                "quit" | "q" | "exit" => break,
                "help" => println!("{}", HELP),
                "count" => match arg.trim().parse::<u32>().map(NewsCount::new) {
                    Ok(Ok(count)) => {
                        news_count = count;
                        println!("Showing {} news article(s).", count.get());
                    }
                    _ => println!(
                        "{} News count must be between 1 and 50.",
                        formatter::FAILURE_MARKER
                    ),
                },
                "insights" => match parse_item_number(arg) {
                    Some(index) => {
                        println!("🔍 News Insights");
                        match dispatcher.insights(&session, index).await {
                            Ok(text) => println!("{}", text),
                            Err(e) => println!("{}", formatter::render_failure(Intent::News, &e)),
                        }
                    }
                    None => println!("Usage: :insights N"),
                },
                "history" => {
                    println!("📝 Previous Responses\n");
                    print!("{}", session.history.transcript());
                }
                _ => println!("Unknown command. {}", HELP),
            }
            continue;
        }

        let Some(answer) = dispatcher.handle(&mut session, &line, news_count).await else {
            continue;
        };

        if let Some(heading) = &answer.heading {
            println!("{}", heading);
        }
        println!("{}", answer.response);

        if !answer.news.is_empty() {
            println!("\nType :insights N to read more about article N.");
        }
    }

    println!("Goodbye!");
    Ok(())
}
