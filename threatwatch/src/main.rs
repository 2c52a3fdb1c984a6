//! Entry point for the threatwatch TUI. Parses args and runs the App.

use std::env;
use std::io::{self, Write};

use threatwatch::app::App;
use threatwatch::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};

struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    save: bool,
    demo: bool,
    dry_run: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "threatwatch".into());
    let mut url: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut save = false; // --save
    let mut demo = false; // --demo
    let mut dry_run = false; // --dry-run: resolve + persist, skip connecting

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!(
                    "Usage: {prog} [--profile NAME|-P NAME] [--save] [--demo] [--dry-run] [ws://HOST:PORT/ws]"
                ));
            }
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--save" => {
                save = true;
            }
            "--demo" => {
                demo = true;
            }
            "--dry-run" => {
                dry_run = true;
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!(
                        "Unexpected argument. Usage: {prog} [--profile NAME|-P NAME] [--save] [--demo] [--dry-run] [ws://HOST:PORT/ws]"
                    ));
                }
            }
        }
    }
    Ok(ParsedArgs {
        url,
        profile,
        save,
        demo,
        dry_run,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    // Demo mode short-circuit: spawn the bundled agent and point at it.
    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        return run_demo_mode().await;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
    };
    let resolved = req.resolve(&profiles_file);

    let mut profiles_mut = profiles_file.clone();
    let url: String = match resolved {
        ResolveProfile::Direct(u) => {
            // Possibly save if profile specified and --save or new entry
            if let Some(name) = parsed.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut
                            .profiles
                            .insert(name.clone(), ProfileEntry { url: u.clone() });
                        let _ = save_profiles(&profiles_mut);
                    }
                    Some(entry) => {
                        if entry.url != u {
                            let overwrite = if parsed.save {
                                true
                            } else {
                                prompt_yes_no(&format!(
                                    "Overwrite existing profile '{name}'? [y/N]: "
                                ))
                            };
                            if overwrite {
                                profiles_mut
                                    .profiles
                                    .insert(name.clone(), ProfileEntry { url: u.clone() });
                                let _ = save_profiles(&profiles_mut);
                            }
                        }
                    }
                }
            }
            u
        }
        ResolveProfile::Loaded(u) => u,
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (ws://HOST:PORT/ws): ")?;
            if url.trim().is_empty() {
                return Ok(());
            }
            profiles_mut.profiles.insert(
                name.clone(),
                ProfileEntry {
                    url: url.trim().to_string(),
                },
            );
            let _ = save_profiles(&profiles_mut);
            url.trim().to_string()
        }
        ResolveProfile::Fallback(u) => u,
    };

    if let Err(e) = url::Url::parse(&url) {
        eprintln!("Invalid endpoint URL '{url}': {e}");
        return Ok(());
    }

    if parsed.dry_run {
        println!("Resolved endpoint: {url}");
        return Ok(());
    }

    let mut app = App::new();
    app.run(&url).await
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

// --- Demo Mode ---

async fn run_demo_mode() -> anyhow::Result<()> {
    let port = 5005;
    let url = format!("ws://127.0.0.1:{port}/ws");
    let agent = spawn_demo_agent(port)?;
    let mut app = App::new();
    tokio::select! {
        res = app.run(&url) => { drop(agent); res }
        _ = tokio::signal::ctrl_c() => {
            // Drop guard (kills agent) then return
            drop(agent);
            Ok(())
        }
    }
}

struct DemoGuard(Option<std::process::Child>);
impl Drop for DemoGuard {
    fn drop(&mut self) {
        if let Some(mut ch) = self.0.take() {
            let _ = ch.kill();
        }
    }
}

fn spawn_demo_agent(port: u16) -> anyhow::Result<DemoGuard> {
    let candidate = find_agent_executable();
    let mut cmd = std::process::Command::new(candidate);
    cmd.arg("--port").arg(port.to_string());
    // Detections every 2s so the demo feels alive.
    cmd.env("THREATWATCH_AGENT_PERIOD_MS", "2000");
    let child = cmd.spawn()?;
    // Give the agent a brief moment to start
    std::thread::sleep(std::time::Duration::from_millis(300));
    Ok(DemoGuard(Some(child)))
}

fn find_agent_executable() -> std::path::PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            #[cfg(windows)]
            let name = "threatwatch_agent.exe";
            #[cfg(not(windows))]
            let name = "threatwatch_agent";
            let candidate = parent.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    // Fallback to relying on PATH
    std::path::PathBuf::from("threatwatch_agent")
}

#[cfg(test)]
mod tests {
    use super::parse_args;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("threatwatch")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_url_profile_and_flags() {
        let p = parse_args(args(&["-P", "prod", "--save", "ws://h:1/ws"])).unwrap();
        assert_eq!(p.profile.as_deref(), Some("prod"));
        assert!(p.save);
        assert_eq!(p.url.as_deref(), Some("ws://h:1/ws"));
        assert!(!p.demo && !p.dry_run);

        let p = parse_args(args(&["--profile=dev", "--dry-run"])).unwrap();
        assert_eq!(p.profile.as_deref(), Some("dev"));
        assert!(p.dry_run);
    }

    #[test]
    fn help_and_extra_positional_error_out() {
        assert!(parse_args(args(&["--help"])).is_err());
        assert!(parse_args(args(&["ws://a/ws", "ws://b/ws"])).is_err());
    }
}
