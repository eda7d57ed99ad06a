use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use grant_scraper::{clock, ScrapeRequest, ScraperError, ScraperService};
use tower::Service;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "grant-scraper", version, about = "助成金情報を表示")]
struct Cli {
    /// 基準時刻のタイムゾーン（Asia/Tokyo, Europe/Paris, +09:00 など）
    #[arg(long, default_value = clock::DEFAULT_ZONE)]
    zone: String,
    /// ブラウザを起動しない
    #[arg(long)]
    no_browser: bool,
    /// ブラウザを表示モードで起動
    #[arg(long)]
    headed: bool,
    /// Chrome実行ファイルのパス
    #[arg(long)]
    chrome: Option<PathBuf>,
    /// JSONで出力
    #[arg(long)]
    json: bool,
}

async fn run(cli: Cli) -> Result<(), ScraperError> {
    let reference_time = clock::reference_time(&cli.zone)?;

    let mut request = ScrapeRequest::new(reference_time)
        .with_headless(!cli.headed)
        .with_browser(!cli.no_browser);
    if let Some(path) = cli.chrome {
        request = request.with_chrome_executable(path);
    }

    let result = ScraperService::new().call(request).await?;

    let mut stdout = io::stdout().lock();
    result.write_to(&mut stdout, cli.json)
}

#[tokio::main]
async fn main() {
    // ログは標準エラーへ（標準出力は結果のみ）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("エラーが発生しました: {}", e);
        process::exit(1);
    }
}
