use super::naming::{self, ScreenRole};
use crate::error::CombineError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// ユーザーが選択した、上画面または下画面の画像ファイルへのパス。
///
/// `new` を通じてのみ生成でき、ファイル名に役割マーカーが含まれることが保証されます。
/// 生成時にはファイルシステムへアクセスしません。
#[derive(Debug, Clone)]
pub struct ScreenFilePath {
    path: PathBuf,
    stem: OsString,
    role: ScreenRole,
}

impl ScreenFilePath {
    // --- Public Methods ---

    /// 新しい `ScreenFilePath` インスタンスを生成する。
    ///
    /// パスが空でなく、ファイル名（拡張子なし）に `_top` か `_bot` が含まれることを検証する。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CombineError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CombineError::EmptyPath);
        }

        let stem = path
            .file_stem()
            .ok_or_else(|| CombineError::InvalidNamingConvention(path.to_path_buf()))?;

        let role = naming::classify(stem);
        if role == ScreenRole::Unknown {
            return Err(CombineError::InvalidNamingConvention(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            stem: stem.to_os_string(),
            role,
        })
    }

    /// 内部の `Path` への参照を返す。
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// 拡張子を除いたファイル名。
    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    pub fn role(&self) -> ScreenRole {
        self.role
    }

    /// 対になるファイルのパスを組み立てる（同じフォルダ、同じ拡張子）。
    pub fn sibling_path(&self) -> PathBuf {
        // new で役割マーカーの存在を検証済みなので、None にはならない
        let stem =
            naming::sibling_stem(&self.stem, self.role).unwrap_or_else(|| self.stem.clone());
        let mut file_name = stem;
        if let Some(ext) = self.path.extension() {
            file_name.push(".");
            file_name.push(ext);
        }
        self.path.with_file_name(file_name)
    }

    /// 対になるファイルを探し、存在すればそのパスを返す。
    ///
    /// キャッシュはせず、呼び出しのたびにファイルシステムを確認する。
    pub fn find_sibling(&self) -> Result<PathBuf, CombineError> {
        let sibling = self.sibling_path();
        if sibling.is_file() {
            Ok(sibling)
        } else {
            Err(CombineError::SiblingNotFound(sibling))
        }
    }

    /// 出力ファイル名 (`combined_<名前>.png`)。
    pub fn output_file_name(&self) -> OsString {
        naming::output_file_name(&self.stem)
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for ScreenFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
