use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for vecx-rs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test(TestArgs),
    /// Run benchmarks
    Bench {
        /// Benchmark target to run (raster_bench, frame_bench); all when omitted
        target: Option<String>,
    },
    /// Open a cartridge in the emulator window
    Run {
        /// Path to a cartridge image (.bin or .vec)
        cartridge: Option<String>,
        /// Build in release mode
        #[arg(long)]
        release: bool,
        /// Beam radius for both dots and lines
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

#[derive(Args, Default)]
struct TestArgs {
    #[arg(long)]
    doc: bool,
    #[arg(long)]
    ignored: bool,
    /// Run only rasterizer and compositor tests
    #[arg(long)]
    vector: bool,
    /// Run only input mapping tests
    #[arg(long)]
    input: bool,
    /// Run only audio conversion tests
    #[arg(long)]
    audio: bool,
    /// Run only frame runner, save state and cartridge tests
    #[arg(long)]
    emulator: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test(args) => run_test(&args),
        Commands::Bench { target } => run_bench(target.as_deref()),
        Commands::Run {
            cartridge,
            release,
            radius,
        } => run_emulator(cartridge.as_deref(), release, radius),
        Commands::PreCommit => run_pre_commit(),
        Commands::InstallHooks => install_hooks(),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(&TestArgs::default()), verbose)?;

    report_elapsed("✓ CI passed in", start);
    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    report_elapsed("✓ Checks passed in", start);
    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

/// cargo command with the feature set CI can build (no ALSA headers there)
fn cargo_with_features(subcommand: &str) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg(subcommand);

    if std::env::var("CI").is_ok() {
        cmd.arg("--no-default-features");
    } else {
        cmd.arg("--all-features");
    }

    cmd
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = cargo_with_features("clippy");
    cmd.arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(args: &TestArgs) -> Result<()> {
    if args.doc {
        let mut cmd = cargo_with_features("test");
        cmd.arg("--doc");
        if args.ignored {
            cmd.arg("--").arg("--ignored");
        }
        return execute_command(&mut cmd);
    }

    // (enabled, name, cargo test selectors)
    let groups: [(bool, &str, &[&[&str]]); 4] = [
        (args.vector, "Vector", &[&["--lib", "vector"], &["--lib", "display"]]),
        (args.input, "Input", &[&["--lib", "input"]]),
        (args.audio, "Audio", &[&["--lib", "audio"]]),
        (
            args.emulator,
            "Emulator",
            &[
                &["--lib", "emulator"],
                &["--test", "frame_runner_tests"],
                &["--test", "cartridge_tests"],
                &["--test", "save_state_tests"],
            ],
        ),
    ];
    let selected = groups.iter().filter(|(enabled, _, _)| *enabled).count();

    if selected == 0 {
        let mut cmd = cargo_with_features("test");
        if args.ignored {
            cmd.arg("--").arg("--ignored");
        }
        return execute_command(&mut cmd);
    }

    let mut failed = Vec::new();

    for (enabled, name, selectors) in groups {
        if !enabled {
            continue;
        }

        println!("{} Running {} tests...", "→".blue(), name.bold());

        let mut group_ok = true;
        for selector in selectors {
            let mut cmd = cargo_with_features("test");
            cmd.args(*selector);
            if args.ignored {
                cmd.arg("--").arg("--ignored");
            }
            if execute_command(&mut cmd).is_err() {
                group_ok = false;
            }
        }

        if group_ok {
            println!("{} {} tests passed\n", "✓".green(), name);
        } else {
            println!("{} {} tests failed\n", "✗".red(), name);
            failed.push(name);
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Failed test groups: {}", failed.join(", "))
    }
}

fn run_bench(target: Option<&str>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench");

    if let Some(target) = target {
        cmd.arg("--bench").arg(target);
    }

    execute_command(&mut cmd)
}

fn run_emulator(cartridge: Option<&str>, release: bool, radius: Option<u32>) -> Result<()> {
    println!("{}", "=== vecx-rs ===".bold().blue());

    if let Some(path) = cartridge {
        if !Path::new(path).exists() {
            println!(
                "{} Cartridge not found: {}",
                "✗".red().bold(),
                path.yellow()
            );
            anyhow::bail!("Cartridge file not found");
        }

        let lower = path.to_lowercase();
        if !lower.ends_with(".bin") && !lower.ends_with(".vec") {
            println!(
                "{} File does not have a .bin or .vec extension",
                "⚠".yellow().bold()
            );
        }

        println!("{} Cartridge: {}", "✓".green(), path.cyan());
    } else {
        println!("{} No cartridge, running the test pattern", "ℹ".blue());
    }
    println!(
        "{} Build mode: {}",
        "→".blue(),
        if release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    println!();

    let mut cmd = Command::new("cargo");
    cmd.arg("run");
    if release {
        cmd.arg("--release");
    }
    cmd.arg("--");
    if let Some(path) = cartridge {
        cmd.arg(path);
    }
    if let Some(radius) = radius {
        cmd.arg("--point-radius")
            .arg(radius.to_string())
            .arg("--line-radius")
            .arg(radius.to_string());
    }

    execute_command(&mut cmd)
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task("Test", || run_test(&TestArgs::default()), false)?;

    report_elapsed("✓ Pre-commit checks passed in", start);
    Ok(())
}

fn install_hooks() -> Result<()> {
    use std::fs;

    println!("{}", "Installing git hooks...".bold());

    let hook_content = r#"#!/bin/sh
# Auto-generated by cargo x install-hooks
set -e

echo "Running pre-commit checks..."
cargo x pre-commit
"#;

    let hook_path = ".git/hooks/pre-commit";
    fs::write(hook_path, hook_content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(hook_path, perms)?;
    }

    println!("{}", "✓ Git hooks installed".green());
    println!("  Pre-commit hook will run: fmt, clippy, test");

    Ok(())
}

fn report_elapsed(message: &str, start: Instant) {
    println!(
        "\n{} {}",
        message.green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", start.elapsed().as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
