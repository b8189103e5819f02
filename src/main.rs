mod cli;
mod workflow;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // RUST_LOG が未設定なら警告以上のみ表示する
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // コマンドライン引数を解析します
    let args = cli::Args::parse();

    match workflow::run(args) {
        Ok(output_path) => {
            println!("結合画像を保存しました: {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("エラー: {}", workflow::describe(&e));
            ExitCode::FAILURE
        }
    }
}
