use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use batch_runner::config;
use batch_runner::joblist;
use batch_runner::pipeline::runner::run;
use batch_runner::task::CommandTask;

fn usage() {
    eprintln!("Usage: batch_runner <file-list> <workers> <outfile> [options]");
    eprintln!("  Process every file in the list through the worker command,");
    eprintln!("  recording failed files in failed_files.txt next to <outfile>.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --cmd <program>    worker command, run as: <program> <file> <outfile>");
    eprintln!("  --exclude <dir>    drop listed files whose name stem matches a file in <dir>");
    eprintln!("  --skip <n>         skip the first n files (after exclusion)");
    eprintln!("  --shuffle          shuffle the file list before dispatch");
}

struct CliArgs {
    file_list: PathBuf,
    workers: usize,
    outfile: PathBuf,
    cmd: Option<String>,
    exclude: Option<PathBuf>,
    skip: Option<usize>,
    shuffle: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut positionals: Vec<&str> = Vec::new();
    let mut cmd: Option<String> = None;
    let mut exclude: Option<PathBuf> = None;
    let mut skip: Option<usize> = None;
    let mut shuffle = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--cmd" => {
                let value = iter.next().ok_or("--cmd requires a value")?;
                cmd = Some(value.clone());
            }
            "--exclude" => {
                let value = iter.next().ok_or("--exclude requires a value")?;
                exclude = Some(PathBuf::from(value));
            }
            "--skip" => {
                let value = iter.next().ok_or("--skip requires a value")?;
                let n = value
                    .parse()
                    .map_err(|_| format!("invalid --skip value: '{value}'"))?;
                skip = Some(n);
            }
            "--shuffle" => shuffle = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {other}"));
            }
            other => positionals.push(other),
        }
    }

    let [file_list, workers, outfile] = positionals.as_slice() else {
        return Err(format!(
            "expected 3 positional arguments (file-list, workers, outfile), got {}",
            positionals.len()
        ));
    };

    let workers: usize = workers
        .parse()
        .map_err(|_| format!("invalid worker count: '{workers}'"))?;

    Ok(CliArgs {
        file_list: PathBuf::from(*file_list),
        workers,
        outfile: PathBuf::from(*outfile),
        cmd,
        exclude,
        skip,
        shuffle,
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("batch_runner {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("ERROR: {e}");
            usage();
            return ExitCode::FAILURE;
        }
    };

    if cli.workers < 1 {
        eprintln!("ERROR: worker count must be at least 1");
        return ExitCode::FAILURE;
    }

    // settings.yaml next to the file list supplies defaults; flags win.
    let settings = match config::load_settings_for_list(&cli.file_list) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "ERROR: Failed to load settings for {}: {e}",
                cli.file_list.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let Some(command) = cli.cmd.or(settings.command) else {
        eprintln!("ERROR: no worker command given (use --cmd or settings.yaml)");
        return ExitCode::FAILURE;
    };
    let exclude = cli.exclude.or(settings.exclude_dir);
    let skip = cli.skip.unwrap_or(settings.skip);
    let shuffle = cli.shuffle || settings.shuffle;

    let mut files = match joblist::read_job_list(&cli.file_list) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(exclude_dir) = exclude.as_deref() {
        if let Err(e) = joblist::apply_exclude(&mut files, exclude_dir) {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    }
    joblist::apply_skip(&mut files, skip);
    if shuffle {
        joblist::shuffle(&mut files);
        info!("list shuffled");
    }

    info!("starting to process {} files", files.len());

    let task = CommandTask::new(command);
    let result = run(files, &cli.outfile, cli.workers, move |job, out: &Path| {
        task.run(job, out)
    });

    match result {
        Ok(_summary) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
