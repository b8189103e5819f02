use clap::Parser;
use std::path::PathBuf;

/// ヘルプの末尾に表示するクレジット。
pub const CREDITS: &str = "クレジット: Kiley W.\nWeb: https://dreamykiley.carrd.co/";

/// 3DS の上画面・下画面のキャプチャを縦に並べて1枚の PNG にまとめるツール
///
/// `<名前>_top.bmp` と `<名前>_bot.bmp` のどちらかを指定すると、同じフォルダから相手を探し、
/// `./output/combined_<名前>.png` に書き出します。
#[derive(Parser, Debug)]
#[command(author, version, about, long_about, after_help = CREDITS)]
pub struct Args {
    /// 上画面 (_top) または下画面 (_bot) のファイルのパス (省略時は入力を求めます)
    pub input_path: Option<PathBuf>,
}
