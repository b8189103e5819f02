// --- 依存モジュール ---

use super::screen_pair::ScreenPair;
use crate::error::CombineError;

// image クレートで画素のコピーと PNG エンコードを行います。
use image::codecs::png::PngEncoder;
use image::{imageops, ExtendedColorType, ImageEncoder, RgbaImage};
use log::{debug, info};
use tempfile::NamedTempFile;

use std::io::Write;
use std::path::Path;

/// 下画面を中央に置くための横方向オフセット。
///
/// 余白が奇数の場合は切り捨てる（例: 幅 401 に対して 400 の画像なら 0）。
/// 下画面の方が広い場合は 0。
pub fn bottom_offset(canvas_width: u32, bottom_width: u32) -> u32 {
    canvas_width.saturating_sub(bottom_width) / 2
}

/// 上下の画像を縦に並べた、エンコード前の結合画像。
///
/// 幅は2枚のうち広い方、高さは2枚の合計。どちらの画像にも覆われない画素は完全な透明になる。
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedCanvas {
    image: RgbaImage,
}

impl CombinedCanvas {
    /// `ScreenPair` から結合画像を組み立てます。
    ///
    /// 上画面を原点に、下画面を上画面の高さの位置へ中央揃えで配置します。
    /// 画素は合成せずに置き換えるため、元画像の透明度はそのまま残ります。
    pub fn compose(pair: &ScreenPair) -> Self {
        let (top, bottom) = (pair.top(), pair.bottom());

        let width = top.width().max(bottom.width());
        let height = top.height() + bottom.height();
        let bottom_x = bottom_offset(width, bottom.width());
        debug!(
            "キャンバス {}x{}, 下画面の位置 ({}, {})",
            width,
            height,
            bottom_x,
            top.height()
        );

        // ImageBuffer::new はすべての画素を (0, 0, 0, 0) で初期化する
        let mut image = RgbaImage::new(width, height);
        imageops::replace(&mut image, top, 0, 0);
        imageops::replace(&mut image, bottom, i64::from(bottom_x), i64::from(top.height()));

        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// メモリ上で PNG にエンコードしたバイト列を返します。
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf).write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(buf)
    }

    /// PNG として指定されたパスに保存します。同名のファイルがあれば上書きします。
    ///
    /// 同じフォルダの一時ファイルに書き切ってから `path` へ置き換えるため、
    /// 途中で失敗しても `path` は元のまま（無ければ無いまま）で、書きかけのファイルは残りません。
    pub fn save_to_path(&self, path: &Path) -> Result<(), CombineError> {
        let write_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            CombineError::Write {
                path: path.to_path_buf(),
                source,
            }
        };

        let data = self.encode_png().map_err(|e| write_error(Box::new(e)))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // 失敗時は NamedTempFile の drop で一時ファイルが削除される
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_error(Box::new(e)))?;
        temp.write_all(&data)
            .and_then(|_| share_with_others(temp.as_file()))
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| write_error(Box::new(e)))?;
        temp.persist(path).map_err(|e| write_error(Box::new(e.error)))?;
        info!("{} を書き出しました ({} バイト)", path.display(), data.len());
        Ok(())
    }
}

/// 一時ファイルは所有者のみ読み書きできる状態で作られるため、通常のファイルと同じ権限に戻す。
#[cfg(unix)]
fn share_with_others(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn share_with_others(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;
    use tempfile::tempdir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn pair(top: (u32, u32), bottom: (u32, u32)) -> ScreenPair {
        ScreenPair::new(
            RgbaImage::from_pixel(top.0, top.1, RED),
            RgbaImage::from_pixel(bottom.0, bottom.1, BLUE),
        )
    }

    #[test]
    fn bottom_offset_truncates() {
        assert_eq!(bottom_offset(400, 320), 40);
        assert_eq!(bottom_offset(401, 400), 0);
        assert_eq!(bottom_offset(403, 400), 1);
        assert_eq!(bottom_offset(400, 400), 0);
        // 下画面の方が広い場合
        assert_eq!(bottom_offset(400, 401), 0);
    }

    #[test]
    fn compose_size_is_max_width_and_summed_height() {
        let canvas = CombinedCanvas::compose(&pair((400, 240), (320, 240)));
        assert_eq!((canvas.width(), canvas.height()), (400, 480));

        let canvas = CombinedCanvas::compose(&pair((10, 7), (12, 3)));
        assert_eq!((canvas.width(), canvas.height()), (12, 10));
    }

    #[test]
    fn compose_centers_bottom_and_leaves_margins_transparent() {
        let canvas = CombinedCanvas::compose(&pair((8, 2), (4, 2)));
        let img = canvas.image();

        // 上画面は全面に敷かれる
        for x in 0..8 {
            assert_eq!(*img.get_pixel(x, 0), RED);
            assert_eq!(*img.get_pixel(x, 1), RED);
        }
        // 下画面は x = 2..6 に置かれ、左右の余白は透明
        for y in 2..4 {
            for x in 0..8 {
                let p = img.get_pixel(x, y);
                if (2..6).contains(&x) {
                    assert_eq!(*p, BLUE);
                } else {
                    assert_eq!(p.0[3], 0, "({}, {}) は透明のはずです", x, y);
                }
            }
        }
    }

    #[test]
    fn compose_odd_difference_places_bottom_at_floor() {
        let canvas = CombinedCanvas::compose(&pair((401, 1), (400, 1)));
        let img = canvas.image();
        assert_eq!(*img.get_pixel(0, 1), BLUE);
        assert_eq!(*img.get_pixel(399, 1), BLUE);
        assert_eq!(img.get_pixel(400, 1).0[3], 0);
    }

    #[test]
    fn compose_narrow_top_leaves_right_side_transparent() {
        let canvas = CombinedCanvas::compose(&pair((2, 1), (4, 1)));
        let img = canvas.image();
        assert_eq!(*img.get_pixel(1, 0), RED);
        assert_eq!(img.get_pixel(2, 0).0[3], 0);
        assert_eq!(img.get_pixel(3, 0).0[3], 0);
        assert_eq!(*img.get_pixel(0, 1), BLUE);
    }

    /// 透過画素は合成されず、そのままコピーされる。
    #[test]
    fn compose_copies_source_alpha_without_blending() {
        let top = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 128]));
        let bottom = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        let canvas = CombinedCanvas::compose(&ScreenPair::new(top, bottom));
        assert_eq!(canvas.image().get_pixel(0, 0).0, [10, 20, 30, 128]);
        assert_eq!(canvas.image().get_pixel(0, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn save_to_path_writes_decodable_png_and_overwrites() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("combined_x.png");
        fs::write(&out, b"old content").unwrap();

        let canvas = CombinedCanvas::compose(&pair((6, 3), (3, 3)));
        canvas.save_to_path(&out).expect("保存に失敗");

        let decoded = image::open(&out).expect("PNGとして読めるはず").to_rgba8();
        assert_eq!(&decoded, canvas.image());
    }

    /// 置き換えに失敗した場合、保存先はそのまま残り、一時ファイルも残らない。
    #[test]
    fn failed_save_leaves_target_untouched() {
        let dir = tempdir().unwrap();
        // 保存先にフォルダがあると、ファイルで置き換えることはできない
        let out = dir.path().join("combined_x.png");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("keep.txt"), b"keep").unwrap();

        let canvas = CombinedCanvas::compose(&pair((64, 64), (32, 32)));
        let res = canvas.save_to_path(&out);
        assert!(matches!(res, Err(CombineError::Write { .. })));

        assert!(out.is_dir());
        assert_eq!(fs::read(out.join("keep.txt")).unwrap(), b"keep");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("combined_x.png")]);
    }

    /// 上書きが成功した場合は完全な新しい内容だけが残る。
    #[test]
    fn overwrite_replaces_previous_output_completely() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("combined_x.png");

        let small = CombinedCanvas::compose(&pair((1, 1), (1, 1)));
        small.save_to_path(&out).unwrap();
        let large = CombinedCanvas::compose(&pair((300, 200), (120, 200)));
        large.save_to_path(&out).unwrap();

        assert_eq!(fs::read(&out).unwrap(), large.encode_png().unwrap());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&out).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644);
        }
    }

    #[test]
    fn save_to_missing_directory_is_write_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("no_such_dir").join("combined_x.png");

        let canvas = CombinedCanvas::compose(&pair((1, 1), (1, 1)));
        let res = canvas.save_to_path(&out);
        assert!(matches!(res, Err(CombineError::Write { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn encode_png_is_deterministic() {
        let canvas = CombinedCanvas::compose(&pair((5, 4), (3, 2)));
        assert_eq!(canvas.encode_png().unwrap(), canvas.encode_png().unwrap());
    }
}
