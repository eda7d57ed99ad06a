use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// ヘッドレスモード
    pub headless: bool,
    /// falseの場合ブラウザを起動しない
    pub launch_browser: bool,
    /// Chrome実行ファイル（未指定なら自動検出）
    pub chrome_executable: Option<PathBuf>,
    /// CDPリクエストタイムアウト
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            launch_browser: true,
            chrome_executable: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_browser(mut self, launch_browser: bool) -> Self {
        self.launch_browser = launch_browser;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
