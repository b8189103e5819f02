// use宣言：必要なクレートやモジュールをスコープに取り込む

use super::naming::ScreenRole;
use super::screen_file_path::ScreenFilePath;
use crate::error::CombineError;
use image::RgbaImage;
use log::debug;
use std::fs;
use std::path::Path;

// --- 構造体定義 ---

/// 上画面と下画面の2枚の画像。
///
/// どちらのファイルが選択されたかに関係なく、`_top` を含むファイルが常に `top` になります。
/// 画像は透過を扱えるよう RGBA に変換して保持します。
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPair {
    top: RgbaImage,
    bottom: RgbaImage,
}

// --- 実装ブロック ---

impl ScreenPair {
    /// 上下の画像から直接ペアを作ります。
    pub fn new(top: RgbaImage, bottom: RgbaImage) -> Self {
        Self { top, bottom }
    }

    /// 選択されたファイルと、その相手のファイルを読み込んでペアを作ります。
    ///
    /// # 引数
    /// * `primary`: ユーザーが選択したファイル。
    /// * `sibling`: `primary` から導出され、存在が確認された相手のファイル。
    ///
    /// # 戻り値
    /// * `Ok(ScreenPair)`: 両方の画像を読み込めた場合。
    /// * `Err(CombineError::Decode)`: どちらかが読めない、または画像として解釈できない場合。
    pub fn load(primary: &ScreenFilePath, sibling: &Path) -> Result<Self, CombineError> {
        let primary_image = Self::decode(primary.as_path())?;
        let sibling_image = Self::decode(sibling)?;

        let pair = match primary.role() {
            ScreenRole::Bottom => Self::new(sibling_image, primary_image),
            // Unknown は ScreenFilePath::new で弾かれている
            ScreenRole::Top | ScreenRole::Unknown => Self::new(primary_image, sibling_image),
        };
        debug!(
            "上画面 {}x{}, 下画面 {}x{}",
            pair.top.width(),
            pair.top.height(),
            pair.bottom.width(),
            pair.bottom.height()
        );
        Ok(pair)
    }

    /// ファイルを読み込み、RGBA 画像にデコードするヘルパー関数。
    ///
    /// 形式は拡張子ではなくファイルの中身から判定する。
    fn decode(path: &Path) -> Result<RgbaImage, CombineError> {
        let to_error = |source: image::ImageError| CombineError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let bytes = fs::read(path).map_err(|e| to_error(image::ImageError::IoError(e)))?;
        let image = image::load_from_memory(&bytes).map_err(to_error)?;
        Ok(image.to_rgba8())
    }

    // --- ゲッターメソッド ---

    pub fn top(&self) -> &RgbaImage {
        &self.top
    }
    pub fn bottom(&self) -> &RgbaImage {
        &self.bottom
    }
}

// --- テストモジュール ---
