use std::path::PathBuf;
use thiserror::Error;

/// 画像の結合処理で発生するエラー。
///
/// どのエラーもその回の処理を打ち切るだけで、内部での再試行は行いません。
#[derive(Debug, Error)]
pub enum CombineError {
    #[error("上画面または下画面のファイルパスを指定してください")]
    EmptyPath,

    #[error("ファイルパスの入力を読み取れません")]
    ReadInput(#[source] std::io::Error),

    #[error("ファイル名に '_top' または '_bot' が含まれていません: {}", .0.display())]
    InvalidNamingConvention(PathBuf),

    #[error("対になるファイルが見つかりません: {}", .0.display())]
    SiblingNotFound(PathBuf),

    #[error("画像を読み込めません: {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("出力フォルダを作成できません: {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("結合画像を書き出せません: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
