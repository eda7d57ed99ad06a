use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ブラウザ終了エラー: {0}")]
    BrowserClose(String),

    #[error("日時の解析エラー: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("不明なタイムゾーン: {0}")]
    UnknownZone(String),

    #[error("出力エラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("シリアライズエラー: {0}")]
    Serialize(#[from] serde_json::Error),
}
