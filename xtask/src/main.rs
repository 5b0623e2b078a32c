use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

type DynError = Box<dyn std::error::Error>;

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{}", e);
        std::process::exit(-1);
    }
}

fn try_main() -> Result<(), DynError> {
    if let Some(name) = env::args().nth(1) {
        if let Some(task) = TASKS.iter().find(|task| name == task.0) {
            (task.1)()?;
            return Ok(());
        }
    }
    print_help();
    Ok(())
}

fn print_help() {
    eprintln!("Tasks:");
    for task in TASKS {
        eprintln!("  {:20}{}", task.0, task.2);
    }
}

type Task = (&'static str, fn() -> Result<(), DynError>, &'static str);

const TASKS: &[Task] = &[
    ("ci", cmd_ci, "runs everything in CI"),
    ("check", cmd_check, "checks everything"),
    ("test", cmd_test, "tests everything"),
    (
        "features",
        cmd_features,
        "tests with various feature combinations",
    ),
    ("cross", cmd_cross, "tests for a big-endian and a 32-bit host"),
    ("fmt", cmd_fmt, "checks formatting"),
    ("doc", cmd_doc, "generates documentation"),
    ("clippy", cmd_clippy, "run clippy for everything"),
];

fn cmd_ci() -> Result<(), DynError> {
    cmd_check()?;
    cmd_test()?;
    cmd_features()?;
    cmd_fmt()?;
    cmd_doc()?;
    cmd_clippy()?;
    Ok(())
}

fn cmd_check() -> Result<(), DynError> {
    cargo(&["check", "--all-targets", "--features", "all"])
}

fn cmd_test() -> Result<(), DynError> {
    cargo(&["test", "--features", "all"])
}

fn cmd_features() -> Result<(), DynError> {
    // The library on its own, without logging or the command line tool.
    cargo(&["test", "--no-default-features"])?;
    cargo(&["test", "--no-default-features", "--features", "logging"])?;
    cargo(&["test"])?;
    Ok(())
}

fn cmd_cross() -> Result<(), DynError> {
    for target in [
        // 32-bit target
        "i686-unknown-linux-gnu",
        // big-endian target
        "powerpc64-unknown-linux-gnu",
    ] {
        cmd(
            "cross",
            &["test", "--features", "all", "--target", target],
        )?;
    }
    Ok(())
}

fn cmd_fmt() -> Result<(), DynError> {
    cargo(&["fmt", "--", "--check"])
}

fn cmd_doc() -> Result<(), DynError> {
    cargo_with(&["doc", "--lib", "--no-deps"], |cmd| {
        cmd.env("RUSTDOCFLAGS", "-D warnings");
    })
}

fn cmd_clippy() -> Result<(), DynError> {
    cargo(&["clippy", "--features", "all", "--all-targets"])
}

fn cargo(args: &[&str]) -> Result<(), DynError> {
    cargo_with(args, |_| ())
}

fn cargo_with(args: &[&str], f: impl FnOnce(&mut Command)) -> Result<(), DynError> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    cmd_with(&cargo, args, f)
}

fn cmd(cmd: &str, args: &[&str]) -> Result<(), DynError> {
    cmd_with(cmd, args, |_| ())
}

fn cmd_with<F>(program: &str, args: &[&str], f: F) -> Result<(), DynError>
where
    F: FnOnce(&mut Command),
{
    println!("Running '{} {}'", program, args.join(" "));
    let mut command = Command::new(program);
    command.current_dir(project_root()).args(args);
    f(&mut command);
    let status = command.status()?;
    if !status.success() {
        Err(format!("'{} {}' failed", program, args.join(" ")))?;
    }
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf()
}
