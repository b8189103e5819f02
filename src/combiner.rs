//! 上下2枚の画面キャプチャを1枚の PNG にまとめる処理。
//!
//! 1回の呼び出しは「名前の検証 → 相手ファイルの確認 → 読み込み → 結合 → 書き出し」の
//! 一直線の流れで、途中で失敗した場合はその時点で打ち切ります。
//! 呼び出しをまたいで保持する状態はありません。

use crate::domain::combined_canvas::CombinedCanvas;
use crate::domain::screen_file_path::ScreenFilePath;
use crate::domain::screen_pair::ScreenPair;
use crate::error::CombineError;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 出力フォルダ名。カレントディレクトリからの相対パス。
pub const OUTPUT_DIR_NAME: &str = "output";

/// 画像ペアを結合し、`<カレントディレクトリ>/output/combined_<名前>.png` に保存します。
///
/// # 引数
/// * `primary_path`: 上画面 (`_top`) か下画面 (`_bot`) のどちらかのファイル。
///
/// # 戻り値
/// * `Ok(PathBuf)`: 書き出したファイルのパス。
/// * `Err(CombineError)`: 処理を打ち切った原因。
pub fn combine<P: AsRef<Path>>(primary_path: P) -> Result<PathBuf, CombineError> {
    // 名前の検証はファイルシステムに触れる前に済ませる
    let primary = ScreenFilePath::new(primary_path)?;
    combine_screen_file(&primary, default_output_dir)
}

/// 既定の出力フォルダ (`<カレントディレクトリ>/output`) を返します。
///
/// カレントディレクトリを取得できない場合は `CombineError::OutputDir`。
pub fn default_output_dir() -> Result<PathBuf, CombineError> {
    let cwd = env::current_dir().map_err(|source| CombineError::OutputDir {
        path: PathBuf::from(OUTPUT_DIR_NAME),
        source,
    })?;
    Ok(cwd.join(OUTPUT_DIR_NAME))
}

/// `combine` と同じ処理を、出力フォルダを指定して行います。
///
/// `output_dir` が存在しなければ作成します。
pub fn combine_into<P: AsRef<Path>>(
    primary_path: P,
    output_dir: &Path,
) -> Result<PathBuf, CombineError> {
    let primary = ScreenFilePath::new(primary_path)?;
    combine_screen_file(&primary, || Ok(output_dir.to_path_buf()))
}

// --- private なヘルパー関数 ---

/// `resolve_output_dir` は読み込みと結合が済んでから呼ばれる。
fn combine_screen_file<F>(
    primary: &ScreenFilePath,
    resolve_output_dir: F,
) -> Result<PathBuf, CombineError>
where
    F: FnOnce() -> Result<PathBuf, CombineError>,
{
    // 1. 相手のファイルを探す
    let sibling = primary.find_sibling()?;
    debug!("{} の相手: {}", primary, sibling.display());

    // 2. 読み込んで結合する
    let pair = ScreenPair::load(primary, &sibling)?;
    let canvas = CombinedCanvas::compose(&pair);

    // 3. 出力フォルダを用意する
    let output_dir = resolve_output_dir()?;
    fs::create_dir_all(&output_dir).map_err(|source| CombineError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    // 4. 書き出す
    let output_path = output_dir.join(primary.output_file_name());
    canvas.save_to_path(&output_path)?;

    Ok(output_path)
}
