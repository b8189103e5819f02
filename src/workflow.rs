//! 入力の受け取りから結合処理の呼び出しまでを行うモジュール。
//!
//! UI層（`cli`）とライブラリの `combine` を仲介します。
//! 結果の表示方法は呼び出し元 (`main`) が決めます。

use crate::cli::Args;
use ds_screen_combiner::error::CombineError;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// 引数で指定された（または標準入力から受け取った）ファイルを結合します。
///
/// # 戻り値
/// * `Ok(PathBuf)`: 書き出した PNG のパス。
/// * `Err(CombineError)`: 処理を打ち切った原因。
pub fn run(args: Args) -> Result<PathBuf, CombineError> {
    let input_path = match args.input_path {
        Some(path) => path,
        None => prompt_input_path(io::stdin().lock(), io::stdout())?,
    };
    ds_screen_combiner::combine(input_path)
}

/// エラーとその原因をつなげた表示用の文字列を作ります。
pub fn describe(err: &CombineError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

// --- private なヘルパー関数 ---

/// 「上画面または下画面:」と尋ねて、1行分のパスを読み取ります。
///
/// 前後の空白や、ドラッグ＆ドロップで付く引用符は取り除く。
/// 何も入力されなかった場合は `CombineError::EmptyPath`、読み取りに失敗した場合は
/// `CombineError::ReadInput`。
fn prompt_input_path<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<PathBuf, CombineError> {
    // プロンプトの表示に失敗しても入力は受け付けられるので無視する
    let _ = write!(output, "上画面または下画面: ");
    let _ = output.flush();

    let mut line = String::new();
    input.read_line(&mut line).map_err(CombineError::ReadInput)?;
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        return Err(CombineError::EmptyPath);
    }
    Ok(PathBuf::from(trimmed))
}
