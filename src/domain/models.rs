use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = ".codecopierrc.json";
pub const DEFAULT_OUTPUT_FILE: &str = "codecopier_output.md";

pub const DEFAULT_INCLUDE: &[&str] = &["**/*.{js,ts,py,java,c,cpp,h,hpp,css,html}"];
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules/**", ".git/**"];

#[derive(Debug, Clone)]
pub struct FileContext {
    pub path: String,
    pub content: String,
}

/// Include/exclude glob lists that drive file discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopierConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for CopierConfig {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub compress: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    NoFilesFound,
    NothingSelected,
    Written {
        path: PathBuf,
        files: usize,
        bytes: usize,
    },
}
