//! 대화형 셸.
//!
//! 표준 입력에서 한 줄씩 명령어를 읽어 세션을 수정하고 결과를 출력합니다.
//! 명령어가 실패해도 에러만 출력하고 세션은 계속됩니다.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, error, warn};

use tracker_analytics::ViewMode;
use tracker_core::{FoldOrder, Tag, TrackerError, TradeSession};

use super::charts::{render_charts, OutputFormat};
use super::context::TrackerContext;
use super::report::{render_explain, render_summary, render_tables};

const HELP: &str = "\
Commands:
  count N          거래 수 변경
  buy I X          I번 거래 매수가
  sell I X         I번 거래 매도가
  fee I X          I번 거래 수수료 (%)
  tag I T          I번 거래 색상 (default, red, blue)
  load PATH        스냅샷 로드
  save [PATH]      스냅샷 저장
  summary          헤드라인 지표
  table [split]    거래 표
  charts [split]   차트 시리즈 (JSON)
  explain          포트폴리오 평가 과정
  help             도움말
  quit             종료";

/// 거래 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeField {
    Buy,
    Sell,
    Fee,
}

/// 셸 명령어.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// 거래 수 변경
    Count(u32),
    /// 숫자 필드 수정
    Set {
        field: TradeField,
        trade: u32,
        value: Decimal,
    },
    /// 태그 수정
    Tag { trade: u32, tag: Tag },
    /// 스냅샷 로드
    Load(PathBuf),
    /// 스냅샷 저장 (경로가 없으면 현재 파일)
    Save(Option<PathBuf>),
    /// 헤드라인 지표
    Summary,
    /// 거래 표
    Table(ViewMode),
    /// 차트 시리즈
    Charts(ViewMode),
    /// 평가 과정
    Explain,
    /// 도움말
    Help,
    /// 종료
    Quit,
    /// 빈 줄
    Empty,
    /// 인자가 잘못된 명령어
    Invalid(String),
    /// 알 수 없는 명령어
    Unknown(String),
}

impl ShellCommand {
    /// 한 줄에서 명령어 파싱.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts.first().map(|s| s.to_lowercase());

        match command.as_deref() {
            None => ShellCommand::Empty,
            Some("count") | Some("n") => match parts.get(1).map(|s| s.parse::<u32>()) {
                Some(Ok(n)) => ShellCommand::Count(n),
                _ => ShellCommand::Invalid("usage: count N".to_string()),
            },
            Some("buy") => parse_set(TradeField::Buy, &parts),
            Some("sell") => parse_set(TradeField::Sell, &parts),
            Some("fee") => parse_set(TradeField::Fee, &parts),
            Some("tag") | Some("color") => {
                let trade = parts.get(1).and_then(|s| s.parse::<u32>().ok());
                let tag = parts.get(2).map(|s| Tag::from_str(s));
                match (trade, tag) {
                    (Some(trade), Some(Ok(tag))) => ShellCommand::Tag { trade, tag },
                    (Some(_), Some(Err(e))) => ShellCommand::Invalid(e.to_string()),
                    _ => ShellCommand::Invalid("usage: tag I default|red|blue".to_string()),
                }
            }
            Some("load") => match parts.get(1) {
                Some(path) => ShellCommand::Load(PathBuf::from(path)),
                None => ShellCommand::Invalid("usage: load PATH".to_string()),
            },
            Some("save") => ShellCommand::Save(parts.get(1).map(PathBuf::from)),
            Some("summary") | Some("s") => ShellCommand::Summary,
            Some("table") | Some("t") => parse_view(&parts).map_or_else(
                ShellCommand::Invalid,
                ShellCommand::Table,
            ),
            Some("charts") | Some("c") => parse_view(&parts).map_or_else(
                ShellCommand::Invalid,
                ShellCommand::Charts,
            ),
            Some("explain") | Some("e") => ShellCommand::Explain,
            Some("help") | Some("h") | Some("?") => ShellCommand::Help,
            Some("quit") | Some("q") | Some("exit") => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

fn parse_set(field: TradeField, parts: &[&str]) -> ShellCommand {
    let trade = parts.get(1).and_then(|s| s.parse::<u32>().ok());
    let value = parts.get(2).and_then(|s| Decimal::from_str(s).ok());
    match (trade, value) {
        (Some(trade), Some(value)) => ShellCommand::Set {
            field,
            trade,
            value,
        },
        _ => ShellCommand::Invalid(format!("usage: {} I X", parts[0].to_lowercase())),
    }
}

fn parse_view(parts: &[&str]) -> Result<ViewMode, String> {
    parts
        .get(1)
        .map_or(Ok(ViewMode::AllTrades), |s| ViewMode::from_str(s))
        .map_err(|e| e.to_string())
}

/// 입력을 고쳐 다시 시도할 수 있는 에러인지 확인합니다.
///
/// 셸 자체가 거부한 명령어(`bail!`)도 사용자 에러로 봅니다.
fn is_user_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<TrackerError>()
        .map_or(err.chain().count() == 1, TrackerError::is_user_error)
}

/// 명령어 실행 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// 출력 후 계속
    Continue(String),
    /// 종료
    Quit,
}

/// 대화형 셸 상태.
pub struct Shell {
    ctx: TrackerContext,
    session: TradeSession,
    order: FoldOrder,
    /// 마지막으로 로드/저장한 파일
    current_file: Option<PathBuf>,
}

impl Shell {
    /// 빈 세션으로 셸을 생성합니다.
    pub fn new(ctx: TrackerContext, order: FoldOrder) -> Self {
        let session = ctx.new_session();
        Self {
            ctx,
            session,
            order,
            current_file: None,
        }
    }

    /// 스냅샷 파일을 로드한 셸을 생성합니다.
    pub fn with_file(ctx: TrackerContext, order: FoldOrder, path: PathBuf) -> Result<Self> {
        let session = ctx.load_session(&path)?;
        Ok(Self {
            ctx,
            session,
            order,
            current_file: Some(path),
        })
    }

    /// 현재 세션.
    pub fn session(&self) -> &TradeSession {
        &self.session
    }

    /// 명령어 한 개를 실행합니다.
    pub fn execute(&mut self, command: ShellCommand) -> Result<ShellOutcome> {
        debug!(?command, "Shell command");
        let fmt = self.ctx.display();

        let output = match command {
            ShellCommand::Count(n) => {
                let applied = self.session.set_trade_count(n);
                let limits = self.session.limits();
                if applied == n {
                    format!("Trade count: {}", applied)
                } else {
                    format!(
                        "Trade count: {} (allowed {}..={})",
                        applied, limits.min, limits.max
                    )
                }
            }
            ShellCommand::Set {
                field,
                trade,
                value,
            } => {
                let (label, applied) = match field {
                    TradeField::Buy => ("Buy", fmt.currency(self.session.set_buy(trade, value)?)),
                    TradeField::Sell => {
                        ("Sell", fmt.currency(self.session.set_sell(trade, value)?))
                    }
                    TradeField::Fee => ("Fee", fmt.percent(self.session.set_fee(trade, value)?)),
                };
                format!("Trade {} {}: {}", trade, label, applied)
            }
            ShellCommand::Tag { trade, tag } => {
                self.session.set_tag(trade, tag)?;
                format!("Trade {} Color: {}", trade, tag)
            }
            ShellCommand::Load(path) => {
                self.session
                    .load_snapshot_file(&path)
                    .with_context(|| format!("Failed to load trades from {}", path.display()))?;
                let message = format!(
                    "Trades successfully loaded ({} trades)",
                    self.session.trade_count()
                );
                self.current_file = Some(path);
                message
            }
            ShellCommand::Save(path) => {
                let path = path
                    .or_else(|| self.current_file.clone())
                    .unwrap_or_else(|| self.ctx.snapshot_path(None));
                self.session
                    .save_snapshot_file(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let message = format!("Saved to {}", path.display());
                self.current_file = Some(path);
                message
            }
            ShellCommand::Summary => render_summary(&self.ctx.report(&self.session, self.order), &fmt),
            ShellCommand::Table(mode) => {
                render_tables(&self.ctx.report(&self.session, self.order), mode, &fmt)
            }
            ShellCommand::Charts(mode) => {
                render_charts(&self.session.metrics(), mode, OutputFormat::Json)?
            }
            ShellCommand::Explain => render_explain(&self.ctx.report(&self.session, self.order), &fmt),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return Ok(ShellOutcome::Quit),
            ShellCommand::Empty => String::new(),
            ShellCommand::Invalid(message) => anyhow::bail!(message),
            ShellCommand::Unknown(text) => {
                anyhow::bail!("Unknown command: {}. Type 'help' for commands", text)
            }
        };

        Ok(ShellOutcome::Continue(output))
    }

    /// 입력이 끝나거나 `quit`까지 명령어를 읽어 실행합니다.
    ///
    /// 실행한 명령어 수를 반환합니다.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<usize> {
        let mut executed = 0;

        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let command = ShellCommand::parse(&line?);
            if command != ShellCommand::Empty {
                executed += 1;
            }

            match self.execute(command) {
                Ok(ShellOutcome::Quit) => break,
                Ok(ShellOutcome::Continue(text)) if text.is_empty() => {}
                Ok(ShellOutcome::Continue(text)) => writeln!(output, "{}", text)?,
                Err(e) => {
                    if is_user_error(&e) {
                        warn!(error = %e, "Shell command rejected");
                    } else {
                        error!(error = %format!("{:#}", e), "Shell command failed");
                    }
                    writeln!(output, "Error: {:#}", e)?;
                }
            }

            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(executed)
    }
}
