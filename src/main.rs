//! herodraft 命令行：加载目录并输出推荐结果（JSON）

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use herodraft::{
    CatalogSource, ConfigManager, DamageType, DraftEngine, GlobalConfig, RemoteTableFetcher,
};

#[derive(Debug, Parser)]
#[command(name = "herodraft", version, about = "英雄/装备目录与选人出装推荐")]
struct Cli {
    /// 目录数据所在目录（heroes / items / draft_rules 表）
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// 从远程基础URL拉取CSV表（优先于 --data-dir）
    #[arg(long, global = true)]
    remote_url: Option<String>,

    /// 从 MessagePack 快照加载（优先于 --data-dir）
    #[arg(long, global = true, conflicts_with = "remote_url")]
    from_snapshot: Option<PathBuf>,

    /// HTTP 超时（秒）
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 出装建议
    Build {
        #[arg(long)]
        role: String,
        /// physical / magic，其他值走回退分支
        #[arg(long)]
        damage_type: String,
        #[arg(long, default_value = "early")]
        phase: String,
    },
    /// 预算内装备
    Budget {
        #[arg(long)]
        damage_type: String,
        #[arg(long)]
        max_price: f64,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// 纯性价比排行
    Value {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// 搭档推荐
    Partners {
        #[arg(long)]
        hero: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// 将加载的目录写入 MessagePack 快照
    Snapshot {
        #[arg(long, default_value = "herodraft_catalog.mp")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut builder = ConfigManager::custom()
        .http_timeout(cli.timeout)
        .verbose(cli.verbose);
    if let Command::Snapshot { output } = &cli.command {
        builder = builder.snapshot_path(output.clone());
    }
    let mut config = builder.build();
    init_logging(&config);

    config.source = resolve_source(&cli, &config).await?;
    debug!("目录数据源：{}", config.source);

    let engine = DraftEngine::init(config).context("目录加载失败")?;

    let malformed = engine.cache().malformed_rows();
    if malformed > 0 {
        info!("加载时跳过了 {} 行格式错误数据", malformed);
    }

    match cli.command {
        Command::Build { role, damage_type, phase } => {
            print_json(&engine.suggest_build(&role, parse_damage_type(&damage_type), &phase)?)
        }
        Command::Budget { damage_type, max_price, limit } => {
            print_json(&engine.budget_items(parse_damage_type(&damage_type), max_price, limit)?)
        }
        Command::Value { limit } => print_json(&engine.cost_effective_items(limit)?),
        Command::Partners { hero, limit } => print_json(&engine.recommend_partners(&hero, limit)?),
        Command::Snapshot { output } => {
            engine
                .save_snapshot()
                .with_context(|| format!("写入快照失败：{}", output.display()))?;
            info!(
                "快照已写入 {}（英雄{}条，装备{}条，规则{}条）",
                output.display(),
                engine.cache().heroes()?.len(),
                engine.cache().items()?.len(),
                engine.cache().rules()?.len()
            );
            Ok(())
        }
    }
}

fn init_logging(config: &GlobalConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn resolve_source(cli: &Cli, config: &GlobalConfig) -> Result<CatalogSource> {
    if let Some(url) = &cli.remote_url {
        let fetcher = RemoteTableFetcher::from_config(url, config)?;
        let tables = fetcher
            .fetch_all()
            .await
            .with_context(|| format!("远程拉取失败：{}", url))?;
        return Ok(CatalogSource::Inline(tables));
    }

    if let Some(path) = &cli.from_snapshot {
        return Ok(CatalogSource::Snapshot(path.clone()));
    }

    Ok(CatalogSource::Directory(cli.data_dir.clone()))
}

/// 命令行输入统一转小写后再交给引擎
fn parse_damage_type(raw: &str) -> DamageType {
    raw.trim().to_lowercase().parse().unwrap_or(DamageType::Unknown)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
