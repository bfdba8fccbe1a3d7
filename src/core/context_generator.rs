use crate::domain::errors::CopierResult;
use crate::domain::models::FileContext;
use log::{debug, info};
use std::path::Path;

pub const DOCUMENT_TITLE: &str = "# CodeCopier Output";

const LANGUAGE_TAGS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("java", "java"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("h", "cpp"),
    ("hpp", "cpp"),
    ("css", "css"),
    ("html", "html"),
];

/// Fence tag for a path's extension; empty for anything unmapped.
pub fn language_tag(path: &str) -> &'static str {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| {
            LANGUAGE_TAGS
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, tag)| *tag)
        })
        .unwrap_or("")
}

/// Reads every selected file in order. The first failure aborts the whole batch.
pub fn load_selected_files(
    selection: &[String],
    file_reader: impl Fn(&str) -> CopierResult<String>,
) -> CopierResult<Vec<FileContext>> {
    debug!("Loading {} selected files", selection.len());

    let files = selection
        .iter()
        .map(|path| {
            file_reader(path).map(|content| FileContext {
                path: path.clone(),
                content,
            })
        })
        .collect::<CopierResult<Vec<_>>>()?;

    info!("Successfully loaded {} files", files.len());
    Ok(files)
}

pub fn build_document(files: &[FileContext]) -> String {
    debug!("Building document from {} files", files.len());
    let mut document = String::new();

    document.push_str(DOCUMENT_TITLE);
    document.push_str("\n\n");

    for file in files {
        let tag = language_tag(&file.path);
        debug!("Adding file {} ({} bytes, tag '{}')", file.path, file.content.len(), tag);
        document.push_str(&format!(
            "## File: {}\n\n```{}\n{}\n```\n\n",
            file.path, tag, file.content
        ));
    }

    document
}
