use retro_save_sync::SyncDirection;
use std::io::{self, Write};

/// Print `question` and read one line. `None` once stdin is closed.
fn ask(question: &str) -> io::Result<Option<String>> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    match io::stdin().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

/// Yes/no question, re-asked until the answer parses. Closed stdin takes the default.
pub fn prompt_confirm(question: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        match ask(&format!("{} {} ", question, hint))? {
            None => return Ok(default),
            Some(line) => {
                if let Some(answer) = parse_confirm(&line, default) {
                    return Ok(answer);
                }
            }
        }
    }
}

/// Ask which side wins for the first sync of `name`. Empty input means auto.
pub fn prompt_direction(name: &str) -> io::Result<SyncDirection> {
    println!("{} has saves both locally and on the NAS.", name);
    loop {
        let question =
            "  [u]pload local -> NAS, [d]ownload NAS -> local, [a]uto by timestamp (default a): ";
        match ask(question)? {
            None => return Ok(SyncDirection::Auto),
            Some(line) => {
                if let Some(direction) = parse_direction(&line) {
                    return Ok(direction);
                }
            }
        }
    }
}

fn parse_confirm(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_direction(input: &str) -> Option<SyncDirection> {
    match input.trim().to_lowercase().as_str() {
        "u" | "upload" => Some(SyncDirection::ForceUpload),
        "d" | "download" => Some(SyncDirection::ForceDownload),
        "" | "a" | "auto" => Some(SyncDirection::Auto),
        _ => None,
    }
}
