use crate::core::context_generator::{build_document, load_selected_files};
use crate::core::file_selector::FileSelector;
use crate::domain::models::{DEFAULT_OUTPUT_FILE, RunOptions, RunOutcome};
use crate::infra::config::load_config;
use crate::infra::file_system::{discover_files, read_file_contents};
use crate::infra::logger::{print_welcome_message, setup_logger};
use crate::infra::output::write_output;
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codecopier", version)]
#[command(about = "Pick project files interactively and copy them into one Markdown document", long_about = None)]
pub struct Cli {
    /// Configuration file with include/exclude glob lists [default: ./.codecopierrc.json]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Gzip the document and append .gz to the output path
    #[arg(short = 'z', long)]
    pub compress: bool,

    /// Debug logging and detailed error reports
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_logger(cli.verbose)?;
    print_welcome_message()?;

    debug!("Command parameters: {:?}", cli);

    let options = RunOptions {
        root_path: std::env::current_dir()?,
        config_path: cli.config,
        output_path: cli.output,
        compress: cli.compress,
    };

    let selector = FileSelector::new(io::stdin().lock(), io::stdout());
    let outcome = copy_code(&options, selector)?;
    report_outcome(&outcome)?;
    Ok(())
}

/// Runs the whole pipeline: configuration, discovery, selection, assembly and output.
pub fn copy_code<R: BufRead, W: Write>(
    options: &RunOptions,
    selector: FileSelector<R, W>,
) -> anyhow::Result<RunOutcome> {
    let root = &options.root_path;

    let config = load_config(options.config_path.as_deref(), root)?;

    info!("Scanning for files in {}", root.display());
    let candidates = discover_files(root, &config)?;
    if candidates.is_empty() {
        info!("No files matched the include patterns");
        return Ok(RunOutcome::NoFilesFound);
    }

    info!("Selecting files");
    let selection = selector.run(&candidates)?;
    if selection.is_empty() {
        info!("No files selected");
        return Ok(RunOutcome::NothingSelected);
    }

    info!("Building document");
    let files = load_selected_files(&selection, |path| read_file_contents(root, path))?;
    let document = build_document(&files);

    info!("Writing output");
    let path = write_output(&document, &root.join(&options.output_path), options.compress)?;

    Ok(RunOutcome::Written {
        path,
        files: files.len(),
        bytes: document.len(),
    })
}

fn report_outcome(outcome: &RunOutcome) -> io::Result<()> {
    let mut stdout = io::stdout();

    match outcome {
        RunOutcome::NoFilesFound => {
            writeln!(stdout, "\nNo files found matching the configured patterns.")?;
        }
        RunOutcome::NothingSelected => {
            writeln!(stdout, "\nNo files selected. Nothing to write.")?;
        }
        RunOutcome::Written { path, files, bytes } => {
            stdout.execute(SetForegroundColor(Color::Green))?;
            writeln!(
                stdout,
                "\n✓ Copied {} file(s) ({} bytes) to {}",
                files,
                bytes,
                path.display()
            )?;
            stdout.execute(ResetColor)?;
        }
    }

    Ok(())
}

/// Prints a fatal error; `verbose` adds the full debug report.
pub fn print_error(err: &anyhow::Error, verbose: bool) {
    let mut stderr = io::stderr();
    let _ = stderr.execute(SetForegroundColor(Color::Red));
    if verbose {
        let _ = writeln!(stderr, "Error: {:?}", err);
    } else {
        let _ = writeln!(stderr, "Error: {:#}", err);
        let _ = writeln!(stderr, "Run with --verbose for more details.");
    }
    let _ = stderr.execute(ResetColor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CopierError;
    use crate::domain::models::DEFAULT_CONFIG_FILE;
    use std::fs::{self, File};
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        write!(file, "{}", content).unwrap();
    }

    fn options(root: &Path) -> RunOptions {
        RunOptions {
            root_path: root.to_path_buf(),
            config_path: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            compress: false,
        }
    }

    fn run_with_input(options: &RunOptions, input: &str) -> anyhow::Result<RunOutcome> {
        let selector = FileSelector::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        copy_code(options, selector)
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "codecopier",
            "--config",
            "custom.json",
            "-o",
            "out.md",
            "-z",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
        assert_eq!(cli.output, PathBuf::from("out.md"));
        assert!(cli.compress);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["codecopier"]).unwrap();

        assert_eq!(cli.config, None);
        assert_eq!(cli.output, PathBuf::from("codecopier_output.md"));
        assert!(!cli.compress);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_end_to_end_single_file() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.js", "console.log(1)");
        touch(temp_dir.path(), "b.png", "");

        let outcome = run_with_input(&options(temp_dir.path()), "y\n").unwrap();

        let expected_path = temp_dir.path().join(DEFAULT_OUTPUT_FILE);
        let expected = "# CodeCopier Output\n\n## File: a.js\n\n```javascript\nconsole.log(1)\n```\n\n";
        assert_eq!(
            outcome,
            RunOutcome::Written {
                path: expected_path.clone(),
                files: 1,
                bytes: expected.len(),
            }
        );
        assert_eq!(fs::read_to_string(expected_path).unwrap(), expected);
    }

    #[test]
    fn test_empty_discovery_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "image.png", "");

        let mut reader = Cursor::new(b"y\n".to_vec());
        let outcome = copy_code(
            &options(temp_dir.path()),
            FileSelector::new(&mut reader, Vec::new()),
        )
        .unwrap();

        assert_eq!(outcome, RunOutcome::NoFilesFound);
        assert_eq!(reader.position(), 0);
        assert!(!temp_dir.path().join(DEFAULT_OUTPUT_FILE).exists());
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.js", "");

        let outcome = run_with_input(&options(temp_dir.path()), "n\n").unwrap();

        assert_eq!(outcome, RunOutcome::NothingSelected);
        assert!(!temp_dir.path().join(DEFAULT_OUTPUT_FILE).exists());
    }

    #[test]
    fn test_invalid_config_aborts_before_discovery() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.js", "");
        touch(temp_dir.path(), DEFAULT_CONFIG_FILE, r#"{ "exclude": "notAnArray" }"#);

        let mut reader = Cursor::new(b"y\n".to_vec());
        let err = copy_code(
            &options(temp_dir.path()),
            FileSelector::new(&mut reader, Vec::new()),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CopierError>(),
            Some(CopierError::Config { .. })
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_compressed_output_round_trips() {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "src/main.py", "print('hi')\n");
        touch(temp_dir.path(), "src/style.css", "body {}\n");

        let mut opts = options(temp_dir.path());
        opts.compress = true;
        let outcome = run_with_input(&opts, "p\nsrc/*\n").unwrap();

        let gz_path = temp_dir.path().join("codecopier_output.md.gz");
        let RunOutcome::Written { path, files, .. } = outcome else {
            panic!("expected output to be written");
        };
        assert_eq!(path, gz_path);
        assert_eq!(files, 2);

        let mut decoded = String::new();
        GzDecoder::new(File::open(gz_path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(
            decoded,
            "# CodeCopier Output\n\n\
             ## File: src/main.py\n\n```python\nprint('hi')\n\n```\n\n\
             ## File: src/style.css\n\n```css\nbody {}\n\n```\n\n"
        );
    }

    #[test]
    fn test_custom_config_selects_other_files() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "notes.md", "# notes");
        touch(temp_dir.path(), "a.js", "");
        touch(temp_dir.path(), "cfg/copier.json", r#"{ "include": ["*.md"] }"#);

        let mut opts = options(temp_dir.path());
        opts.config_path = Some(PathBuf::from("cfg/copier.json"));
        opts.output_path = PathBuf::from("out.md");

        run_with_input(&opts, "y\n").unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("out.md")).unwrap(),
            "# CodeCopier Output\n\n## File: notes.md\n\n```\n# notes\n```\n\n"
        );
    }
}
