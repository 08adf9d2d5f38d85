/// 校验文件开头的魔术字节是否与扩展名一致
///
/// `extension` 含点号，大小写不敏感。未列出的扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        ".pdf" => data.starts_with(b"%PDF"),
        // SVG 是文本，允许 BOM 与前导空白
        ".svg" => {
            let text = String::from_utf8_lossy(&data[..data.len().min(512)]);
            let text = text.trim_start_matches('\u{feff}').trim_start();
            text.starts_with("<svg") || text.starts_with("<?xml") || text.starts_with("<!--")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpg"));
        assert!(validate_magic_bytes(&jpeg_header, ".jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, ".pdf"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7\n", ".pdf"));
        assert!(!validate_magic_bytes(b"<html>", ".pdf"));
    }

    #[test]
    fn test_svg_text() {
        assert!(validate_magic_bytes(b"  <svg xmlns=\"http://www.w3.org/2000/svg\"/>", ".svg"));
        assert!(validate_magic_bytes(b"<?xml version=\"1.0\"?><svg/>", ".svg"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".svg"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
        assert!(!validate_magic_bytes(b"hello", ".txt"));
    }
}
