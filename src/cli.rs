//! CLI definition and dispatch.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvJournal;
use crate::domain::error::JournalError;
use crate::domain::metrics::{format_hold_time, TradeMetrics};
use crate::domain::quality::ExecutionQuality;
use crate::domain::summary::JournalSummary;
use crate::domain::trade::{Direction, TradeRecord};
use crate::ports::journal_port::JournalPort;

#[derive(Parser, Debug)]
#[command(name = "pipjournal", about = "Trade journal performance calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute metrics for every trade in a CSV journal
    Report {
        #[arg(short, long)]
        journal: PathBuf,
        /// Only report trades for this symbol
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Compute metrics for a single trade
    Calc {
        #[arg(long)]
        symbol: String,
        /// buy, sell, long, or short
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        exit: f64,
        /// Position size in standard lots
        #[arg(long)]
        volume: f64,
        #[arg(long)]
        stop_loss: Option<f64>,
        #[arg(long)]
        take_profit: Option<f64>,
        /// YYYY-MM-DDTHH:MM, seconds optional
        #[arg(long)]
        entry_time: Option<String>,
        #[arg(long)]
        exit_time: Option<String>,
    },
    /// Grade execution quality from 1-5 entry and exit ratings
    Grade {
        #[arg(long)]
        entry_quality: u8,
        #[arg(long)]
        exit_quality: u8,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report { journal, symbol } => run_report(&journal, symbol.as_deref()),
        Command::Calc {
            symbol,
            direction,
            entry,
            exit,
            volume,
            stop_loss,
            take_profit,
            entry_time,
            exit_time,
        } => run_calc(CalcArgs {
            symbol,
            direction,
            entry,
            exit,
            volume,
            stop_loss,
            take_profit,
            entry_time,
            exit_time,
        }),
        Command::Grade {
            entry_quality,
            exit_quality,
        } => run_grade(entry_quality, exit_quality),
    }
}

struct CalcArgs {
    symbol: String,
    direction: Direction,
    entry: f64,
    exit: f64,
    volume: f64,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    entry_time: Option<String>,
    exit_time: Option<String>,
}

fn run_report(journal_path: &PathBuf, symbol_filter: Option<&str>) -> ExitCode {
    eprintln!("Loading journal from {}", journal_path.display());

    let journal = CsvJournal::new(journal_path.clone());
    let mut trades = match journal.load_trades() {
        Ok(trades) => trades,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(filter) = symbol_filter {
        trades.retain(|trade| trade.symbol == filter);
    }

    if trades.is_empty() {
        eprintln!("No trades to report");
        return ExitCode::SUCCESS;
    }

    let metrics: Vec<TradeMetrics> = trades.iter().map(TradeMetrics::compute).collect();

    println!("=== Trades ===");
    for (i, (trade, trade_metrics)) in trades.iter().zip(&metrics).enumerate() {
        println!("{:>4}. {}", i + 1, render_trade_line(trade, trade_metrics));
    }

    let summary = JournalSummary::compute(&metrics);
    println!("\n=== Journal Summary ===");
    println!("Total Trades:   {}", summary.total_trades);
    println!(
        "Won/Lost/BE:    {}/{}/{}",
        summary.trades_won, summary.trades_lost, summary.trades_breakeven
    );
    println!("Win Rate:       {:.1}%", summary.win_rate * 100.0);
    println!("Total PnL:      {}", render_money(summary.total_pnl));
    println!("Profit Factor:  {:.2}", summary.profit_factor);
    println!("Avg Win:        ${:.2}", summary.avg_win);
    println!("Avg Loss:       ${:.2}", summary.avg_loss);
    println!("Largest Win:    ${:.2}", summary.largest_win);
    println!("Largest Loss:   ${:.2}", summary.largest_loss);
    println!(
        "Avg Hold Time:  {}",
        format_hold_time(summary.avg_hold_time_minutes.round() as i64)
    );

    ExitCode::SUCCESS
}

fn run_calc(args: CalcArgs) -> ExitCode {
    let entry_time = match args.entry_time.as_deref().map(parse_timestamp).transpose() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let exit_time = match args.exit_time.as_deref().map(parse_timestamp).transpose() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let record = TradeRecord {
        symbol: args.symbol,
        direction: args.direction,
        entry_price: args.entry,
        exit_price: args.exit,
        volume: args.volume,
        stop_loss: args.stop_loss,
        take_profit: args.take_profit,
        entry_time,
        exit_time,
        quality: None,
    };

    let metrics = TradeMetrics::compute(&record);

    println!("Pips:         {:+.1}", metrics.pips);
    println!("PnL:          {}", render_money(metrics.pnl));
    println!("Risk-Reward:  {}", metrics.risk_reward);
    println!("R-Multiple:   {}", render_r_multiple(metrics.r_multiple));
    println!("Hold Time:    {}", render_hold_time(metrics.hold_time_minutes));

    ExitCode::SUCCESS
}

fn run_grade(entry_quality: u8, exit_quality: u8) -> ExitCode {
    for rating in [entry_quality, exit_quality] {
        if !(1..=5).contains(&rating) {
            let err = JournalError::InvalidQuality { value: rating };
            eprintln!("error: {err}");
            return (&err).into();
        }
    }

    let quality = ExecutionQuality {
        entry_quality,
        exit_quality,
    };
    println!("Average:  {:.1}/5", quality.average());
    println!("Grade:    {}", quality.grade());

    ExitCode::SUCCESS
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, JournalError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| JournalError::Journal {
            reason: format!("invalid timestamp {value:?}: {e}"),
        })
}

fn render_trade_line(trade: &TradeRecord, metrics: &TradeMetrics) -> String {
    let mut line = format!(
        "{} {} {:.2} lots: {:+.1} pips, {}, RR {}, {}, held {}",
        trade.symbol,
        trade.direction,
        trade.volume,
        metrics.pips,
        render_money(metrics.pnl),
        metrics.risk_reward,
        render_r_multiple(metrics.r_multiple),
        render_hold_time(metrics.hold_time_minutes),
    );
    if let Some(quality) = trade.quality {
        line.push_str(&format!(", grade {}", quality.grade()));
    }
    line
}

fn render_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("+${:.2}", amount)
    }
}

fn render_r_multiple(r_multiple: Option<f64>) -> String {
    match r_multiple {
        Some(r) => format!("{r:+.2}R"),
        None => "n/a".to_string(),
    }
}

fn render_hold_time(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) => format_hold_time(m),
        None => "n/a".to_string(),
    }
}
