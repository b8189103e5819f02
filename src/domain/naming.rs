//! 上画面・下画面のファイル名規約を扱うモジュール。
//!
//! ファイル名（拡張子なし）に含まれる `_top` / `_bot` を役割マーカーとして扱い、
//! 対になるファイル名や出力ファイル名を導出します。
//! ここにある関数はすべて純粋な文字列操作で、ファイルシステムには触れません。
//!
//! ファイル名は UTF-8 とは限らないため `OsStr` のまま扱い、マーカー以外の部分には手を加えません。

use std::ffi::{OsStr, OsString};

/// 上画面を表すマーカー。
pub const TOP_MARKER: &str = "_top";
/// 下画面を表すマーカー。
pub const BOTTOM_MARKER: &str = "_bot";
/// 出力ファイル名の接頭辞。
pub const OUTPUT_PREFIX: &str = "combined_";
/// 出力ファイルの拡張子。
pub const OUTPUT_EXTENSION: &str = "png";

/// ファイルが画像ペアのどちら側かを表す列挙型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRole {
    Top,
    Bottom,
    /// どちらのマーカーも含まれていない。
    Unknown,
}

impl ScreenRole {
    /// このロールを示すマーカー文字列。`Unknown` には対応するマーカーがない。
    pub fn marker(self) -> Option<&'static str> {
        match self {
            ScreenRole::Top => Some(TOP_MARKER),
            ScreenRole::Bottom => Some(BOTTOM_MARKER),
            ScreenRole::Unknown => None,
        }
    }

    /// 対になる側のロール。
    pub fn counterpart(self) -> ScreenRole {
        match self {
            ScreenRole::Top => ScreenRole::Bottom,
            ScreenRole::Bottom => ScreenRole::Top,
            ScreenRole::Unknown => ScreenRole::Unknown,
        }
    }
}

/// ファイル名（拡張子なし）からロールを判定します。
///
/// 両方のマーカーを含む場合は `_top` を優先します。
pub fn classify<S: AsRef<OsStr>>(stem: S) -> ScreenRole {
    let bytes = stem.as_ref().as_encoded_bytes();
    if find(bytes, TOP_MARKER).is_some() {
        ScreenRole::Top
    } else if find(bytes, BOTTOM_MARKER).is_some() {
        ScreenRole::Bottom
    } else {
        ScreenRole::Unknown
    }
}

/// 対になるファイルのファイル名（拡張子なし）を返します。
///
/// 自分のマーカーの最初の出現箇所だけを相手側のマーカーに置き換えます。
/// `role` が `Unknown` の場合、あるいはマーカーが見つからない場合は `None`。
pub fn sibling_stem<S: AsRef<OsStr>>(stem: S, role: ScreenRole) -> Option<OsString> {
    let from = role.marker()?;
    let to = role.counterpart().marker()?;
    let bytes = stem.as_ref().as_encoded_bytes();
    let at = find(bytes, from)?;

    let mut swapped = Vec::with_capacity(bytes.len());
    swapped.extend_from_slice(&bytes[..at]);
    swapped.extend_from_slice(to.as_bytes());
    swapped.extend_from_slice(&bytes[at + from.len()..]);
    Some(from_encoded(swapped))
}

/// 出力ファイル名を返します (例: `screen_top` -> `combined_screen.png`)。
///
/// マーカーはすべての出現箇所が取り除かれるため、上下どちらから導出しても同じ名前になります。
pub fn output_file_name<S: AsRef<OsStr>>(stem: S) -> OsString {
    let base = remove_all(stem.as_ref().as_encoded_bytes(), TOP_MARKER);
    let base = remove_all(&base, BOTTOM_MARKER);

    let mut name = OsString::from(OUTPUT_PREFIX);
    name.push(from_encoded(base));
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    name
}

// --- private なヘルパー関数 ---

fn find(haystack: &[u8], marker: &str) -> Option<usize> {
    haystack
        .windows(marker.len())
        .position(|window| window == marker.as_bytes())
}

fn remove_all(bytes: &[u8], marker: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    while let Some(at) = find(rest, marker) {
        out.extend_from_slice(&rest[..at]);
        rest = &rest[at + marker.len()..];
    }
    out.extend_from_slice(rest);
    out
}

fn from_encoded(bytes: Vec<u8>) -> OsString {
    // SAFETY: `OsStr::as_encoded_bytes` の出力を ASCII のマーカーの直前・直後でだけ区切り、
    // UTF-8 のマーカーと連結したものなので、有効なエンコードのまま。
    unsafe { OsString::from_encoded_bytes_unchecked(bytes) }
}
