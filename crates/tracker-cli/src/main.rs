//! 매매 기록기 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 거래 2건짜리 스냅샷 생성
//! tracker init --count 2 --output trades_backup.json
//!
//! # 거래 입력
//! tracker set --file trades_backup.json --trade 2 --buy 100 --sell 150
//! tracker set --file trades_backup.json --trade 1 --buy 200 --tag red
//!
//! # 헤드라인 지표와 평가 과정
//! tracker summary --file trades_backup.json
//! tracker explain --file trades_backup.json --fold-order ascending
//!
//! # 색상별 표와 차트
//! tracker table --file trades_backup.json --view split
//! tracker charts --file trades_backup.json --format csv
//!
//! # 대화형 셸
//! tracker shell --file trades_backup.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use tracker_analytics::ViewMode;
use tracker_cli::commands::charts::{render_charts, OutputFormat};
use tracker_cli::commands::edit::{init_snapshot, resize, set_trade, SetTradeConfig};
use tracker_cli::commands::report::{render_explain, render_summary, render_tables};
use tracker_cli::commands::shell::Shell;
use tracker_cli::TrackerContext;
use tracker_core::{
    init_logging, init_logging_from_env, AppConfig, FoldOrder, LogConfig, Tag, DEFAULT_CONFIG_PATH,
};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Trade tracker - 거래별 손익과 누적 포트폴리오 평가", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML, 기본: config/default.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 빈 거래로 채운 새 스냅샷 생성
    Init {
        /// 거래 수 (기본: 설정의 default_trades)
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// 출력 파일 경로 (기본: 설정의 snapshot_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 거래 한 건 수정
    #[command(allow_negative_numbers = true)]
    Set {
        /// 스냅샷 파일 경로
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 거래 번호
        #[arg(short, long)]
        trade: u32,

        /// 매수가
        #[arg(long)]
        buy: Option<Decimal>,

        /// 매도가
        #[arg(long)]
        sell: Option<Decimal>,

        /// 수수료 (%)
        #[arg(long)]
        fee: Option<Decimal>,

        /// 색상 태그 (default, red, blue)
        #[arg(long)]
        tag: Option<Tag>,
    },

    /// 거래 수 변경 (스냅샷 값으로 미리 채움)
    Resize {
        /// 스냅샷 파일 경로
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 새 거래 수
        #[arg(short = 'n', long)]
        count: u32,
    },

    /// 헤드라인 지표 (총 손익, 총 수익률, 포트폴리오 가치)
    Summary {
        /// 스냅샷 파일 경로
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 평가 순서 (descending, ascending)
        #[arg(long)]
        fold_order: Option<FoldOrder>,
    },

    /// 포트폴리오 평가 과정 출력
    Explain {
        /// 스냅샷 파일 경로
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 평가 순서 (descending, ascending)
        #[arg(long)]
        fold_order: Option<FoldOrder>,
    },

    /// 거래 표 출력
    Table {
        /// 스냅샷 파일 경로
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 보기 방식 (all, split)
        #[arg(long, default_value = "all")]
        view: ViewMode,
    },

    /// 차트 시리즈 출력
    Charts {
        /// 스냅샷 파일 경로
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 보기 방식 (all, split)
        #[arg(long, default_value = "all")]
        view: ViewMode,

        /// 출력 형식 (json, csv)
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// 대화형 셸
    Shell {
        /// 시작할 때 로드할 스냅샷 파일
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 평가 순서 (descending, ascending)
        #[arg(long)]
        fold_order: Option<FoldOrder>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_default(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            // 설정 없이 RUST_LOG / LOG_FORMAT 으로 로깅
            init_logging_from_env()?;
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    init_logging(LogConfig::try_from(&config.logging)?)?;
    info!(
        config = %cli.config.as_deref().unwrap_or(Path::new(DEFAULT_CONFIG_PATH)).display(),
        "Configuration loaded"
    );

    let ctx = TrackerContext::new(config);

    if let Err(e) = run(&ctx, cli.command) {
        error!("Command failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(ctx: &TrackerContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init { count, output } => {
            let path = ctx.snapshot_path(output);
            let count = init_snapshot(ctx, count, &path)?;
            println!("Created {} with {} trades", path.display(), count);
        }

        Commands::Set {
            file,
            trade,
            buy,
            sell,
            fee,
            tag,
        } => {
            let path = ctx.snapshot_path(file);
            let config = SetTradeConfig {
                trade,
                buy,
                sell,
                fee,
                tag,
            };
            let input = set_trade(ctx, &path, &config)?;

            let fmt = ctx.display();
            println!(
                "Trade {}: buy {}, sell {}, fee {}, color {}",
                trade,
                fmt.currency(input.buy_price),
                fmt.currency(input.sell_price),
                fmt.percent(input.fee_percent),
                input.tag
            );
        }

        Commands::Resize { file, count } => {
            let path = ctx.snapshot_path(file);
            let applied = resize(ctx, &path, count)?;
            println!("Trade count: {}", applied);
        }

        Commands::Summary { file, fold_order } => {
            let session = ctx.load_session(&ctx.snapshot_path(file))?;
            let report = ctx.report(&session, ctx.fold_order(fold_order));
            println!("{}", render_summary(&report, &ctx.display()));
        }

        Commands::Explain { file, fold_order } => {
            let session = ctx.load_session(&ctx.snapshot_path(file))?;
            let report = ctx.report(&session, ctx.fold_order(fold_order));
            println!("{}", render_explain(&report, &ctx.display()));
        }

        Commands::Table { file, view } => {
            let session = ctx.load_session(&ctx.snapshot_path(file))?;
            let report = ctx.report(&session, ctx.fold_order(None));
            println!("{}", render_tables(&report, view, &ctx.display()));
        }

        Commands::Charts { file, view, format } => {
            let session = ctx.load_session(&ctx.snapshot_path(file))?;
            println!("{}", render_charts(&session.metrics(), view, format)?);
        }

        Commands::Shell { file, fold_order } => {
            let order = ctx.fold_order(fold_order);
            let mut shell = match file {
                Some(path) => Shell::with_file(ctx.clone(), order, path)?,
                None => Shell::new(ctx.clone(), order),
            };

            println!("Trade tracker shell. Type 'help' for commands.");
            let stdin = std::io::stdin();
            let executed = shell.run(stdin.lock(), std::io::stdout())?;
            info!(commands = executed, "Shell closed");
        }
    }

    Ok(())
}
