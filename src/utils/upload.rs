//! 上传文件落盘
//!
//! 所有上传都写入 `upload.web_root` 下的固定子目录，文件名为随机 UUID 加原扩展名，
//! 数据库中保存以 `/` 开头的访问路径，例如 `/img/news/3f2c….png`。

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::StreamExt;
use futures_util::TryStreamExt;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_magic_bytes;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif", ".svg"];
const FACULTY_PHOTO_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];
const SCREENSHOT_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".pdf", ".webp"];
const PDF_EXTENSIONS: &[&str] = &[".pdf"];

// 普通文本字段的上限
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    DepartmentImage,
    FacultyPhoto,
    NewsImage,
    SupportScreenshot,
    ArchivePdf,
}

impl UploadKind {
    /// 相对 web root 的目录
    pub fn folder(&self) -> &'static str {
        match self {
            UploadKind::DepartmentImage => "img/departments",
            UploadKind::FacultyPhoto => "img/faculty",
            UploadKind::NewsImage => "img/news",
            UploadKind::SupportScreenshot => "uploads/support",
            UploadKind::ArchivePdf => "docs/archive",
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::DepartmentImage | UploadKind::NewsImage => IMAGE_EXTENSIONS,
            UploadKind::FacultyPhoto => FACULTY_PHOTO_EXTENSIONS,
            UploadKind::SupportScreenshot => SCREENSHOT_EXTENSIONS,
            UploadKind::ArchivePdf => PDF_EXTENSIONS,
        }
    }

    pub fn max_size(&self) -> usize {
        let upload = &AppConfig::get().upload;
        match self {
            UploadKind::SupportScreenshot => upload.support_max_size,
            _ => upload.max_size,
        }
    }

    fn web_prefix(&self) -> String {
        format!("/{}/", self.folder())
    }
}

#[derive(Debug)]
pub enum UploadError {
    TypeNotAllowed(String),
    ContentMismatch,
    TooLarge(usize),
    MultipleFiles,
    Malformed(String),
    Io(std::io::Error),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::TypeNotAllowed(ext) => write!(f, "File type '{ext}' is not allowed"),
            UploadError::ContentMismatch => write!(f, "File content does not match its extension"),
            UploadError::TooLarge(limit) => write!(f, "File exceeds the {limit} byte limit"),
            UploadError::MultipleFiles => write!(f, "Only one file can be uploaded at a time"),
            UploadError::Malformed(msg) => write!(f, "Malformed multipart payload: {msg}"),
            UploadError::Io(e) => write!(f, "Failed to store file: {e}"),
        }
    }
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Io(e)
    }
}

impl UploadError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            UploadError::TypeNotAllowed(_) | UploadError::ContentMismatch => {
                ErrorCode::FileTypeNotAllowed
            }
            UploadError::TooLarge(_) => ErrorCode::FileSizeExceeded,
            UploadError::MultipleFiles => ErrorCode::MultifileUploadNotAllowed,
            UploadError::Malformed(_) => ErrorCode::BadRequest,
            UploadError::Io(_) => ErrorCode::FileUploadFailed,
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let body = ApiResponse::error_empty(self.error_code(), self.to_string());
        match self {
            UploadError::Io(e) => {
                tracing::error!("Upload write failed: {}", e);
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store the uploaded file",
                ))
            }
            UploadError::TooLarge(_) => HttpResponse::PayloadTooLarge().json(body),
            _ => HttpResponse::BadRequest().json(body),
        }
    }
}

/// 已落盘的文件
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub original_name: String,
    pub web_path: String,
    pub disk_path: PathBuf,
    pub size: usize,
}

impl StoredFile {
    /// 后续步骤失败时删除已写入的文件
    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.disk_path) {
            tracing::warn!("Failed to remove {}: {}", self.disk_path.display(), e);
        }
    }
}

/// 上传目标：web root 与文件类别
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub web_root: PathBuf,
    pub kind: UploadKind,
    pub max_size: usize,
}

impl UploadTarget {
    pub fn from_config(kind: UploadKind) -> Self {
        Self {
            web_root: PathBuf::from(&AppConfig::get().upload.web_root),
            kind,
            max_size: kind.max_size(),
        }
    }

    fn directory(&self) -> PathBuf {
        self.web_root.join(self.kind.folder())
    }
}

/// 逐块写入的文件，首块校验魔术字节，超限即删除
pub struct UploadSink {
    file: File,
    stored: StoredFile,
    extension: String,
    max_size: usize,
    received_any: bool,
}

impl UploadSink {
    pub fn create(target: &UploadTarget, original_name: &str) -> Result<Self, UploadError> {
        let extension = extension_of(original_name);
        if !target
            .kind
            .allowed_extensions()
            .contains(&extension.as_str())
        {
            return Err(UploadError::TypeNotAllowed(extension));
        }

        let dir = target.directory();
        fs::create_dir_all(&dir)?;

        let stored_name = format!("{}{}", Uuid::new_v4().simple(), extension);
        let disk_path = dir.join(&stored_name);
        let file = File::create(&disk_path)?;

        Ok(Self {
            file,
            stored: StoredFile {
                original_name: original_name.to_string(),
                web_path: format!("{}{}", target.kind.web_prefix(), stored_name),
                disk_path,
                size: 0,
            },
            extension,
            max_size: target.max_size,
            received_any: false,
        })
    }

    pub fn push(&mut self, data: &[u8]) -> Result<(), UploadError> {
        if data.is_empty() {
            return Ok(());
        }
        if !self.received_any {
            self.received_any = true;
            if !validate_magic_bytes(data, &self.extension) {
                self.stored.discard();
                return Err(UploadError::ContentMismatch);
            }
        }
        self.stored.size += data.len();
        if self.stored.size > self.max_size {
            self.stored.discard();
            return Err(UploadError::TooLarge(self.max_size));
        }
        if let Err(e) = self.file.write_all(data) {
            self.stored.discard();
            return Err(e.into());
        }
        Ok(())
    }

    /// 空文件视为内容不匹配
    pub fn finish(mut self) -> Result<StoredFile, UploadError> {
        if !self.received_any {
            self.stored.discard();
            return Err(UploadError::ContentMismatch);
        }
        if let Err(e) = self.file.flush() {
            self.stored.discard();
            return Err(e.into());
        }
        Ok(self.stored)
    }

    pub fn abort(self) {
        self.stored.discard();
    }
}

/// multipart 表单：文本字段加至多一个文件
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<StoredFile>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}

/// 读取整个 multipart 请求；未选择文件的文件字段（空文件名）被忽略
pub async fn read_multipart(
    mut payload: Multipart,
    target: &UploadTarget,
) -> Result<MultipartForm, UploadError> {
    let mut form = MultipartForm::default();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                discard_form_file(&form);
                return Err(UploadError::Malformed(e.to_string()));
            }
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let filename = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        match filename {
            Some(filename) if !filename.trim().is_empty() => {
                if form.file.is_some() {
                    discard_form_file(&form);
                    return Err(UploadError::MultipleFiles);
                }
                let mut sink = match UploadSink::create(target, &filename) {
                    Ok(sink) => sink,
                    Err(e) => {
                        discard_form_file(&form);
                        return Err(e);
                    }
                };
                while let Some(chunk) = field.next().await {
                    let data = match chunk {
                        Ok(data) => data,
                        Err(e) => {
                            sink.abort();
                            return Err(UploadError::Malformed(e.to_string()));
                        }
                    };
                    sink.push(&data)?;
                }
                form.file = Some(sink.finish()?);
            }
            Some(_) => {
                // 浏览器在未选择文件时仍会发送空文件字段
                while let Some(chunk) = field.next().await {
                    if let Err(e) = chunk {
                        discard_form_file(&form);
                        return Err(UploadError::Malformed(e.to_string()));
                    }
                }
            }
            None => {
                let mut buf = Vec::new();
                while let Some(chunk) = field.next().await {
                    let data = match chunk {
                        Ok(data) => data,
                        Err(e) => {
                            discard_form_file(&form);
                            return Err(UploadError::Malformed(e.to_string()));
                        }
                    };
                    if buf.len() + data.len() > MAX_TEXT_FIELD_SIZE {
                        discard_form_file(&form);
                        return Err(UploadError::Malformed(format!("field '{name}' is too large")));
                    }
                    buf.extend_from_slice(&data);
                }
                form.fields
                    .insert(name, String::from_utf8_lossy(&buf).into_owned());
            }
        }
    }

    Ok(form)
}

fn discard_form_file(form: &MultipartForm) {
    if let Some(file) = &form.file {
        file.discard();
    }
}

/// 小写并带点号的扩展名，没有扩展名时为空串
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 尽力删除旧文件，只处理位于该类别目录内的路径
pub fn try_delete_old(web_root: &Path, kind: UploadKind, web_path: Option<&str>) {
    let Some(web_path) = web_path else {
        return;
    };
    let Some(name) = web_path.strip_prefix(&kind.web_prefix()) else {
        tracing::warn!("Refusing to delete {} outside {}", web_path, kind.folder());
        return;
    };
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        tracing::warn!("Refusing to delete suspicious path {}", web_path);
        return;
    }

    let disk_path = web_root.join(kind.folder()).join(name);
    match fs::remove_file(&disk_path) {
        Ok(()) => tracing::debug!("Deleted old file {}", disk_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to delete old file {}: {}", disk_path.display(), e),
    }
}

/// 使用配置中的 web root 删除旧文件
pub fn delete_old_file(kind: UploadKind, web_path: Option<&str>) {
    try_delete_old(Path::new(&AppConfig::get().upload.web_root), kind, web_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn target(root: &Path, kind: UploadKind, max_size: usize) -> UploadTarget {
        UploadTarget {
            web_root: root.to_path_buf(),
            kind,
            max_size,
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Report.PDF"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_sink_stores_file_under_kind_folder() {
        let dir = tempfile::tempdir().unwrap();
        let t = target(dir.path(), UploadKind::NewsImage, 1024);

        let mut sink = UploadSink::create(&t, "cover.PNG").unwrap();
        sink.push(PNG).unwrap();
        let stored = sink.finish().unwrap();

        assert!(stored.web_path.starts_with("/img/news/"));
        assert!(stored.web_path.ends_with(".png"));
        assert_eq!(stored.size, PNG.len());
        assert!(stored.disk_path.starts_with(dir.path().join("img/news")));
        assert_eq!(fs::read(&stored.disk_path).unwrap(), PNG);
    }

    #[test]
    fn test_sink_rejects_disallowed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let t = target(dir.path(), UploadKind::ArchivePdf, 1024);
        assert!(matches!(
            UploadSink::create(&t, "exam.png"),
            Err(UploadError::TypeNotAllowed(ext)) if ext == ".png"
        ));
    }

    #[test]
    fn test_sink_removes_file_on_magic_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let t = target(dir.path(), UploadKind::SupportScreenshot, 1024);
        let mut sink = UploadSink::create(&t, "shot.png").unwrap();
        let path = sink.stored.disk_path.clone();

        assert!(matches!(
            sink.push(b"%PDF-1.4 not a png"),
            Err(UploadError::ContentMismatch)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_sink_removes_file_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let t = target(dir.path(), UploadKind::SupportScreenshot, 16);
        let mut sink = UploadSink::create(&t, "shot.png").unwrap();
        let path = sink.stored.disk_path.clone();

        sink.push(PNG).unwrap();
        assert!(matches!(sink.push(&[0u8; 8]), Err(UploadError::TooLarge(16))));
        assert!(!path.exists());
    }

    #[test]
    fn test_try_delete_old_stays_inside_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("img/departments");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("old.png"), PNG).unwrap();
        fs::create_dir_all(dir.path().join("img/news")).unwrap();
        fs::write(dir.path().join("img/news/keep.png"), PNG).unwrap();

        try_delete_old(
            dir.path(),
            UploadKind::DepartmentImage,
            Some("/img/news/keep.png"),
        );
        try_delete_old(
            dir.path(),
            UploadKind::DepartmentImage,
            Some("/img/departments/../news/keep.png"),
        );
        assert!(dir.path().join("img/news/keep.png").exists());

        try_delete_old(
            dir.path(),
            UploadKind::DepartmentImage,
            Some("/img/departments/old.png"),
        );
        assert!(!folder.join("old.png").exists());

        // 文件已不存在时静默返回
        try_delete_old(
            dir.path(),
            UploadKind::DepartmentImage,
            Some("/img/departments/old.png"),
        );
    }
}
