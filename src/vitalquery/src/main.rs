#[macro_use]
extern crate log;

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use serde::Serialize;
use vitalquery::{
    ChatClient, ChatConfig, ChatSession, HealthAssistant, HealthSnapshot, api::DEFAULT_BASE_URL,
};
use vitalquery_algos::{ImpactNarrator, QueryAnalyzer, SAMPLE_DATE};
use vitalquery_data::{MetricsProvider, SleepLog};

#[derive(Parser)]
#[command(name = "vitalquery", about = "Ask questions about your daily health metrics")]
pub struct VitalQueryCli {
    #[arg(env, long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,
    #[arg(env, long, default_value_t = 30)]
    pub chat_timeout_secs: u64,
    /// Minute-level sleep export (`Id,date,value,logId`)
    #[arg(env, long)]
    pub sleep_csv: Option<PathBuf>,
    #[clap(subcommand)]
    pub subcommand: VitalQueryCommand,
}

#[derive(Subcommand)]
pub enum VitalQueryCommand {
    ///
    /// Answer a free-text question, e.g. "What were my steps on April 9th?"
    ///
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    ///
    /// Print hourly steps for a date
    ///
    Steps {
        #[arg(long, default_value_t = SAMPLE_DATE)]
        date: NaiveDate,
    },
    ///
    /// Print hourly heart rate for a date
    ///
    HeartRate {
        #[arg(long, default_value_t = SAMPLE_DATE)]
        date: NaiveDate,
    },
    ///
    /// Print time spent in each sleep stage for a date
    ///
    Sleep {
        #[arg(long, default_value_t = SAMPLE_DATE)]
        date: NaiveDate,
    },
    ///
    /// Describe how activity affected heart rate on a date
    ///
    Impact {
        #[arg(long, default_value_t = SAMPLE_DATE)]
        date: NaiveDate,
    },
    ///
    /// Print daily totals for every date in a range
    ///
    Summary {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    ///
    /// Send a message to the remote assistant
    ///
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        #[arg(long, env)]
        session_id: Option<String>,
        /// Date whose metrics are attached to the message
        #[arg(long, default_value_t = SAMPLE_DATE)]
        date: NaiveDate,
    },
    ///
    /// Generate shell completions
    ///
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        if !error.not_found() {
            eprintln!("{}", error);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = VitalQueryCli::parse();

    let mut provider = MetricsProvider::with_sample_data();
    if let Some(path) = &cli.sleep_csv {
        let log = SleepLog::from_path(path)
            .with_context(|| format!("failed to load sleep log {}", path.display()))?;
        provider.load_sleep_log(log);
    }
    let assistant = HealthAssistant::new(QueryAnalyzer::default(), provider, ImpactNarrator::default());

    match cli.subcommand {
        VitalQueryCommand::Ask { query } => {
            let query = query.join(" ");
            let answer = assistant.answer(&query)?;
            println!("{}", answer);
            Ok(())
        }
        VitalQueryCommand::Steps { date } => print_json(&assistant.steps(date)?),
        VitalQueryCommand::HeartRate { date } => print_json(&assistant.heart_rate(date)?),
        VitalQueryCommand::Sleep { date } => print_json(&assistant.sleep(date)),
        VitalQueryCommand::Impact { date } => {
            let impact = assistant.impact(date)?;
            println!("{}", impact.narrative);
            Ok(())
        }
        VitalQueryCommand::Summary { start, end } => {
            print_json(&assistant.provider().daily_summaries(start, end))
        }
        VitalQueryCommand::Chat {
            message,
            session_id,
            date,
        } => {
            let client = ChatClient::new(ChatConfig {
                base_url: cli.api_base_url,
                timeout: Duration::from_secs(cli.chat_timeout_secs),
            })?;

            let snapshot = match HealthSnapshot::for_date(assistant.provider(), date) {
                Ok(snapshot) => Some(snapshot),
                Err(error) => {
                    warn!("sending message without health data: {error}");
                    None
                }
            };

            let mut session = ChatSession::new(client, session_id);
            match session.send(&message.join(" "), snapshot.as_ref()).await {
                Ok(reply) => {
                    println!("{}", reply);
                    info!("session id: {}", session.session_id());
                    Ok(())
                }
                Err(error) => {
                    let message = error.user_message();
                    Err(anyhow::Error::new(error).context(message))
                }
            }
        }
        VitalQueryCommand::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut VitalQueryCli::command(),
                "vitalquery",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
