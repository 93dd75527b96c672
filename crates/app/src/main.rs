use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use quickcheck_core::model::QuestionBank;
use services::{
    BookingConfig, CheckFlowService, CheckRun, Clock, EmailCapture, FlowError, Page, QuizView,
    ResultsPageView,
};
use storage::{BaserowConfig, BaserowStore, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum ArgsError {
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- run   [--memory]   # interactive quick check");
    eprintln!("  cargo run -p app -- check              # row-store connectivity check");
    eprintln!();
    eprintln!("Flags for run:");
    eprintln!("  --memory   use the in-memory store instead of the remote row store");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  BASEROW_BASE_URL, BASEROW_TOKEN,");
    eprintln!("  BASEROW_SESSIONS_TABLE, BASEROW_CONTACTS_TABLE, BASEROW_RESULTS_TABLE,");
    eprintln!("  QUICKCHECK_BOOKING_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "run" => Some(Self::Run),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

struct Args {
    memory: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut memory = false;
        for arg in args {
            match arg.as_str() {
                "--memory" => memory = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(ArgsError::UnknownArg(other.to_string())),
            }
        }
        Ok(Self { memory })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Run,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Run,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }
    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::Check => connectivity_check().await,
        Command::Run => interactive_check(args.memory).await,
    }
}

/// List one contacts row to prove the base URL, token, and table id work.
async fn connectivity_check() -> Result<(), Box<dyn std::error::Error>> {
    let config = BaserowConfig::from_env()?;
    let store = BaserowStore::connect(config)?;
    let count = store.ping().await?;
    println!("row store reachable; contacts table holds {count} row(s)");
    Ok(())
}

async fn interactive_check(memory: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = if memory {
        tracing::info!("using in-memory store");
        Store::in_memory()
    } else {
        // Missing secrets are fatal here, before any page is shown.
        Store::baserow(BaserowConfig::from_env()?)?
    };
    let booking = BookingConfig::from_env()?;

    let flow = CheckFlowService::new(
        Clock::default_clock(),
        Arc::new(QuestionBank::inventory_health()),
        store.sessions,
        store.contacts,
        store.results,
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        if !landing_page(&flow, &mut input)? {
            return Ok(());
        }
        let mut run = flow.start().await;

        while run.state().page() == Page::Quiz {
            quiz_page(&flow, &mut run, &mut input)?;
        }

        results_page(&flow, &mut run, &mut input).await?;

        if !booking_page(&booking, &run, &mut input)? {
            return Ok(());
        }
        // Retake: drop this run; the next start mints a fresh token.
    }
}

fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

/// Landing copy and the score legend; returns false when the user quits.
fn landing_page(flow: &CheckFlowService, input: &mut impl BufRead) -> io::Result<bool> {
    let thresholds = flow.thresholds();
    println!();
    println!("Inventory Health Quick Check");
    println!("============================");
    println!("Is your inventory costing you money?");
    println!(
        "Answer {} quick questions and get an Inventory Health Score,",
        flow.bank().len()
    );
    println!("plus clear, practical next steps.");
    println!();
    println!("How your score is read:");
    println!(
        "  Healthy   {} - 100   inventory is supporting operations and cash flow",
        thresholds.healthy_min()
    );
    println!(
        "  At Risk   {} - {}    noticeable inefficiencies and risk exposure",
        thresholds.at_risk_min(),
        thresholds.healthy_min() - 1
    );
    println!(
        "  Critical  below {}   inventory likely constraining cash or operations",
        thresholds.at_risk_min()
    );
    println!();

    let answer = prompt(input, "Press Enter to start the quick check (q to quit): ")?;
    Ok(!answer.eq_ignore_ascii_case("q"))
}

fn quiz_page(
    flow: &CheckFlowService,
    run: &mut CheckRun,
    input: &mut impl BufRead,
) -> io::Result<()> {
    let Some(view) = QuizView::from_state(run.state()) else {
        return Ok(());
    };

    println!();
    println!("Question {} of {}", view.ordinal + 1, view.total);
    println!("{}", view.prompt);
    for (index, label) in view.options.iter().enumerate() {
        let marker = if index == view.preselected { '*' } else { ' ' };
        println!("  {} {}) {label}", marker, index + 1);
    }
    let back_hint = if view.can_go_back { ", b = back" } else { "" };
    let next_hint = if view.is_last { "finish" } else { "next" };
    let line = prompt(
        input,
        &format!("Choose 1-{} (Enter = marked option, {next_hint}{back_hint}): ", view.options.len()),
    )?;

    if line.eq_ignore_ascii_case("b") {
        if view.can_go_back {
            flow.back(run);
        }
        return Ok(());
    }

    let choice = if line.is_empty() {
        Some(view.preselected)
    } else {
        line.parse::<usize>()
            .ok()
            .and_then(|n| (1..=view.options.len()).contains(&n).then_some(n - 1))
    };
    match choice {
        Some(index) => flow.answer(run, view.options[index].clone()),
        None => println!("Please pick one of the listed options."),
    }
    Ok(())
}

async fn results_page(
    flow: &CheckFlowService,
    run: &mut CheckRun,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let entry = flow.enter_results(run).await?;
    if entry.finalize_error.is_some() {
        println!("(We could not record your session; your results are unaffected.)");
    }

    let view = ResultsPageView::new(&entry.report, run.state().email_submitted());
    println!();
    println!("Inventory Health Results");
    println!("------------------------");
    println!("Score: {} / 100   [{}]", view.percentage, view.band_label);
    println!();
    println!("{}", view.headline);
    println!("{}", view.message);
    println!();

    while run.state().page() == Page::Results {
        println!("Get your PDF report, or go straight to booking:");
        println!("  1) Email me the full report");
        println!("  2) Finish and book a call");
        let line = prompt(input, "> ")?;
        match line.as_str() {
            "1" => email_capture(flow, run, input).await?,
            "2" => flow.finish(run).await?,
            _ => println!("Please choose 1 or 2."),
        }
    }
    Ok(())
}

async fn email_capture(
    flow: &CheckFlowService,
    run: &mut CheckRun,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = prompt(input, "Email address: ")?;
    match flow.submit_email(run, &raw).await {
        Ok(EmailCapture::Submitted { result_error, .. }) => {
            if result_error.is_some() {
                println!("We couldn't save your results. Please try again later.");
            }
            println!("Your report is being prepared and will arrive shortly.");
        }
        Ok(EmailCapture::AlreadySubmitted) => {
            println!("Your report request has already been submitted.");
        }
        Err(FlowError::Email(_)) => {
            println!("Please enter a valid email address.");
        }
        Err(FlowError::Storage(error)) => {
            tracing::warn!(%error, "contact capture failed");
            println!("Could not save your contact. Please try again.");
        }
        Err(other) => return Err(other.into()),
    }
    Ok(())
}

/// Booking page; returns false to quit, true to retake.
fn booking_page(
    booking: &BookingConfig,
    run: &CheckRun,
    input: &mut impl BufRead,
) -> io::Result<bool> {
    println!();
    println!("Book your inventory alignment call");
    println!("----------------------------------");
    println!("Schedule a 30-minute call to review your results, identify risks,");
    println!("and outline concrete next steps:");
    println!();
    println!("  {}", booking.link_for(run.session().token()));
    println!();
    println!("We'll have your assessment results ready for the discussion.");

    loop {
        let line = prompt(input, "r = retake the assessment, q = quit: ")?;
        if line.eq_ignore_ascii_case("r") {
            return Ok(true);
        }
        if line.eq_ignore_ascii_case("q") {
            return Ok(false);
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
