use std::io::Cursor;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit-assets").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("signs")).unwrap();
    std::fs::create_dir_all(dir.join("decor")).unwrap();
    dir
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(2, 2, vec![255u8; 16]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn load_tolerates_missing_icons() {
    let dir = scratch_dir("partial");
    std::fs::write(dir.join("signs").join("Leo.png"), png_bytes()).unwrap();
    std::fs::write(
        dir.join("decor").join("heart.svg"),
        br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"></svg>"#,
    )
    .unwrap();
    std::fs::write(dir.join("signs").join("Virgo.png"), b"broken").unwrap();

    let assets = ReelAssets::load(&dir, None).unwrap();
    assert!(assets.sign(Sign::Leo).is_some());
    assert!(assets.sign(Sign::Virgo).is_none());
    assert_eq!(assets.missing_signs().len(), 11);
    assert_eq!(assets.decor_count(), 1);
    assert!(assets.decor(DecorIcon::Heart).is_some());
    assert!(assets.font().is_none());
}

#[test]
fn load_rejects_missing_directory_and_unreadable_font() {
    assert!(matches!(
        ReelAssets::load("target/unit-assets/nope-not-here", None),
        Err(ReelError::Asset(_))
    ));
    let dir = scratch_dir("font");
    let err = ReelAssets::load(&dir, Some(Path::new("target/unit-assets/missing.ttf")));
    assert!(matches!(err, Err(ReelError::Asset(_))));
}

#[test]
fn builders_fill_slots() {
    let assets = ReelAssets::empty()
        .with_sign(Sign::Pisces, PreparedImage::solid(1, 1, [0, 0, 0, 255]))
        .with_decor(DecorIcon::CrystalBall, PreparedImage::solid(1, 1, [0, 0, 0, 255]))
        .with_font(vec![1, 2, 3]);
    assert!(assets.sign(Sign::Pisces).is_some());
    assert_eq!(assets.decor_count(), 1);
    assert_eq!(assets.font(), Some([1u8, 2, 3].as_slice()));
    assert!(!assets.missing_signs().contains(&Sign::Pisces));
}

#[test]
fn decor_stems_match_file_layout() {
    let stems: Vec<_> = DecorIcon::ALL.iter().map(|d| d.file_stem()).collect();
    assert_eq!(stems, ["heart", "trophy", "money-bag", "crystal-ball"]);
}
