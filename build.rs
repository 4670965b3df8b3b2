// Build script - stamps build time and git commit into the binary
use std::process::Command;

fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let timestamp = if cfg!(windows) {
        command_output("powershell", &["-Command", "(Get-Date).ToUniversalTime().ToString('yyyy-MM-dd HH:mm:ss')"])
    } else {
        command_output("date", &["-u", "+%Y-%m-%d %H:%M:%S"])
    };
    let commit = command_output("git", &["rev-parse", "--short", "HEAD"]);

    println!("cargo:rustc-env=BUILD_TIMESTAMP={} UTC", timestamp);
    println!("cargo:rustc-env=BUILD_COMMIT={}", commit);
    println!("cargo:rerun-if-changed=.git/HEAD");
}
