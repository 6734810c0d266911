use anyhow::{Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand};

use momentum_core::{
    CoachPersona, HabitStates, MonthGrid, calc_achievement, month_back, today_in_tz,
};

mod auth;
mod config;
mod dashboard;
mod generate;
mod llm;
mod state;

#[derive(Parser, Debug)]
#[command(name = "momentum", version, about = "Momentum habit check-in CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive check-in dashboard (TUI)
    Checkin,

    /// One-shot condition report for today
    Report {
        /// Completed habits, comma separated (wake,water,study,workout,sleep)
        #[arg(long, value_delimiter = ',')]
        habits: Vec<String>,

        /// Mood 1-10
        #[arg(long, default_value_t = 7)]
        mood: u8,

        /// City (one of the fixed list; unknown names fall back to Seoul)
        #[arg(long, default_value = "Seoul")]
        city: String,

        /// Coach persona label (unknown labels fall back to 따뜻한 멘토)
        #[arg(long, default_value = "따뜻한 멘토")]
        persona: String,
    },

    /// Print the month calendar of achievement bands
    Calendar {
        /// Months back from the current month (0, 1, or 2)
        #[arg(long, default_value_t = 0)]
        back: u32,
    },

    /// Store API credentials in ~/.momentum/auth.json
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage ~/.momentum/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Prompt for and save an OpenAI API key
    PasteOpenaiApiKey,

    /// Prompt for and save an OpenWeatherMap API key
    PasteOwmApiKey,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MOMENTUM_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Checkin => {
            let cfg = config::load_config()?;
            let auth = auth::load_auth()?;
            let today = today_in_tz(&cfg.timezone)?;
            let session = state::Session::start(today);
            dashboard::run_checkin(session, cfg, auth)?;
        }

        Command::Report { habits, mood, city, persona } => {
            run_report(habits, mood, city, persona).await?;
        }

        Command::Calendar { back } => {
            if back > 2 {
                bail!("only the current month and the two preceding months are available (--back 0..2)");
            }
            let cfg = config::load_config()?;
            let today = today_in_tz(&cfg.timezone)?;
            let session = state::Session::start(today);
            print_calendar(&session, back);
        }

        Command::Auth { command } => match command {
            AuthCommand::PasteOpenaiApiKey => auth::openai_paste_api_key()?,
            AuthCommand::PasteOwmApiKey => auth::owm_paste_api_key()?,
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

async fn run_report(habits: Vec<String>, mood: u8, city: String, persona: String) -> Result<()> {
    let cfg = config::load_config()?;
    let auth = auth::load_auth()?;
    let today = today_in_tz(&cfg.timezone)?;

    let mut session = state::Session::start(today);
    session.today = session
        .today
        .clone()
        .with_habits(HabitStates::from_partial(
            habits.iter().map(|h| (h.trim(), true)),
        ))
        .with_mood(mood)
        .with_city(city)
        .with_persona(CoachPersona::from_label(&persona));

    let (done, pct) = calc_achievement(&session.today.habits);
    println!("📊 Momentum - {today}");
    println!(
        "달성률 {pct:.0}% ({done}/5) / 기분 {}/10 / 도시 {} / 코치 {}",
        session.today.clamped_mood(),
        session.today.city(),
        session.today.persona.label()
    );
    println!("스트릭: {}일\n", session.streak());

    let out = generate::run_generate(&mut session, &cfg, &auth).await?;

    match &out.weather {
        Some(w) => println!(
            "🌦️ {} {}°C (체감 {}°C) · 습도 {}% · 바람 {} m/s",
            w.description, w.temp_c, w.feels_like_c, w.humidity, w.wind_ms
        ),
        None => println!("날씨 정보를 가져오지 못했습니다(키/도시/네트워크 확인)."),
    }
    match &out.dog {
        Some(d) => println!("🐶 {} · {}", d.breed, d.url),
        None => println!("강아지 이미지를 가져오지 못했습니다(네트워크 확인)."),
    }
    println!();

    if out.missing_openai_key {
        println!("OpenAI API Key가 필요합니다. 실행: momentum auth paste-openai-api-key");
    } else {
        match &out.report {
            Some(report) => {
                println!("{report}\n");
                if let Some(share) = &out.share {
                    println!("🔗 공유용 텍스트\n---\n{share}\n---");
                }
            }
            None => println!("AI 리포트 생성에 실패했습니다. 키/네트워크/모델 설정을 확인하세요."),
        }
    }

    Ok(())
}

fn print_calendar(session: &state::Session, back: u32) {
    let today = session.today.date;
    let (year, month) = month_back(today.year(), today.month(), back);
    let series = session.chart_series();

    println!("{year}-{month:02}");
    println!(" 월            화            수            목            금            토            일");

    let Some(grid) = MonthGrid::build(&series, year, month) else {
        return;
    };
    for week in grid.weeks() {
        let mut row = String::new();
        for cell in week {
            match cell {
                Some(c) => row.push_str(&format!("{:>3} {:<10}", c.day, c.band().as_str())),
                None => row.push_str("  ·           "),
            }
        }
        println!("{}", row.trim_end());
    }
}
