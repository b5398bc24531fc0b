// ============================================================================
// User intents: what the presentation layer forwards to the engine
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UserIntent {
    /// Pick an offered element. Without a group, the pool currently
    /// offering the id is used.
    Select { id: String, group: Option<String> },

    /// Drop a selected element back into its pool.
    Deselect { id: String },
}

/// One line of input to the interactive loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(UserIntent),
    Show,
    Vector,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  select <id> [group]   pick an offered element
  deselect <id>         remove a selected element (aliases: remove, rm)
  show                  render pools and selection
  vector                print the output vector
  help                  this text
  quit                  finish the session (alias: exit)
";

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match verb.as_str() {
        "select" | "pick" => {
            let id = args
                .first()
                .ok_or_else(|| "select needs an element id".to_string())?;
            if args.len() > 2 {
                return Err(format!("select takes at most 2 arguments, got {}", args.len()));
            }
            Command::Intent(UserIntent::Select {
                id: id.to_string(),
                group: args.get(1).map(|g| g.to_lowercase()),
            })
        }
        "deselect" | "remove" | "rm" => {
            let id = args
                .first()
                .ok_or_else(|| format!("{} needs an element id", verb))?;
            if args.len() > 1 {
                return Err(format!("{} takes 1 argument, got {}", verb, args.len()));
            }
            Command::Intent(UserIntent::Deselect { id: id.to_string() })
        }
        "show" | "ls" => Command::Show,
        "vector" | "output" => Command::Vector,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(Some(command))
}
