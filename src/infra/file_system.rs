use crate::domain::errors::{CopierError, CopierResult};
use crate::domain::models::CopierConfig;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{Clear, ClearType},
};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

// Progress indicator for file scanning
struct ScanProgress {
    start_time: Instant,
    update_interval: Duration,
    last_update: Instant,
    scanned_count: usize,
    matched_count: usize,
}

impl ScanProgress {
    fn new() -> Self {
        Self {
            start_time: Instant::now(),
            update_interval: Duration::from_millis(250),
            last_update: Instant::now(),
            scanned_count: 0,
            matched_count: 0,
        }
    }

    fn update(&mut self, matched: bool) -> io::Result<()> {
        self.scanned_count += 1;
        if matched {
            self.matched_count += 1;
        }

        let now = Instant::now();
        if now.duration_since(self.last_update) < self.update_interval {
            return Ok(());
        }
        self.last_update = now;

        let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let spinner_idx = ((now.duration_since(self.start_time).as_millis() / 100)
            % spinner_chars.len() as u128) as usize;

        let mut stdout = io::stdout();
        stdout.execute(cursor::SavePosition)?;
        stdout.execute(Clear(ClearType::CurrentLine))?;
        write!(
            stdout,
            "{} Scanning files: {} scanned, {} matched ({:.1} files/sec)",
            spinner_chars[spinner_idx],
            self.scanned_count,
            self.matched_count,
            self.files_per_sec()
        )?;
        stdout.flush()?;
        stdout.execute(cursor::RestorePosition)?;
        Ok(())
    }

    fn finish(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(Clear(ClearType::CurrentLine))?;
        writeln!(
            stdout,
            "✓ Scan complete: {} files scanned, {} files matched in {:.1}s",
            self.scanned_count,
            self.matched_count,
            self.start_time.elapsed().as_secs_f32()
        )
    }

    fn files_per_sec(&self) -> f32 {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.scanned_count as f32 / elapsed
        } else {
            0.0
        }
    }
}

/// Builds a glob set with `*` confined to a single path segment, `**` spanning
/// segments and `{a,b}` alternation.
pub fn compile_globset(patterns: &[String], source: &Path) -> CopierResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }

        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                CopierError::config(source, format!("invalid glob pattern '{}': {}", pattern, e))
            })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| CopierError::config(source, format!("failed to build glob set: {}", e)))
}

/// `dir/**` excludes everything below `dir`, so the walk can skip `dir` itself.
fn pruned_directories(exclude_patterns: &[String]) -> Vec<String> {
    exclude_patterns
        .iter()
        .filter_map(|pattern| pattern.trim().strip_suffix("/**"))
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
        .collect()
}

/// Relative path with `/` separators on every platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn classify_walk_error(err: walkdir::Error, root: &Path) -> CopierResult<()> {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    match err.io_error().map(io::Error::kind) {
        Some(io::ErrorKind::PermissionDenied) => Err(CopierError::PermissionDenied(path)),
        Some(io::ErrorKind::NotFound) if path == root => Err(CopierError::DirectoryNotFound(path)),
        _ => {
            warn!("Skipping {}: {}", path.display(), err);
            Ok(())
        }
    }
}

/// Lists the regular files under `root` matching an include pattern and no
/// exclude pattern, as relative paths in walk order (sorted by file name).
pub fn discover_files(root: &Path, config: &CopierConfig) -> CopierResult<Vec<String>> {
    info!("Discovering files in: {}", root.display());
    debug!("Include patterns: {:?}", config.include);
    debug!("Exclude patterns: {:?}", config.exclude);

    if !root.is_dir() {
        return Err(CopierError::DirectoryNotFound(root.to_path_buf()));
    }

    let include = compile_globset(&config.include, root)?;
    let exclude = compile_globset(&config.exclude, root)?;
    let pruned = compile_globset(&pruned_directories(&config.exclude), root)?;

    let mut result = Vec::new();
    let mut seen = HashSet::new();
    let mut progress = ScanProgress::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let skip = e.depth() > 0
                && e.file_type().is_dir()
                && pruned.is_match(relative_path(root, e.path()));
            if skip {
                debug!("Pruning excluded directory: {}", e.path().display());
            }
            !skip
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                classify_walk_error(err, root)?;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative_path(root, entry.path());
        let matched = include.is_match(&rel) && !exclude.is_match(&rel);
        if let Err(e) = progress.update(matched) {
            debug!("Scan progress display failed: {}", e);
        }

        if matched && seen.insert(rel.clone()) {
            debug!("Found matching file: {}", rel);
            result.push(rel);
        }
    }

    if let Err(e) = progress.finish() {
        debug!("Scan progress display failed: {}", e);
    }
    info!("Found {} matching files", result.len());
    Ok(result)
}

/// Reads a whole file as text; invalid UTF-8 sequences are replaced.
pub fn read_file_contents(root: &Path, relative: &str) -> CopierResult<String> {
    let path = root.join(relative);
    debug!("Reading file contents: {}", path.display());

    let bytes = fs::read(&path).map_err(|source| CopierError::FileRead {
        path: Path::new(relative).to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from file", bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
