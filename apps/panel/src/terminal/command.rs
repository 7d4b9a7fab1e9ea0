use std::path::PathBuf;

use crate::models::JobField;

pub const HELP: &str = "\
Commands:
  upload <path>                  extract job history from a PDF
  open <number|name>             open a saved resume
  show                           print the current cards
  html                           print the card markup
  edit <card> <field> <value>    change one field (fields: company, title,
                                 location, startDate, endDate, description)
  save                           save the cards to the open resume
  delete                         delete the open resume
  list                           list saved resumes
  forget-key                     clear the stored Secret Key
  help                           show this help
  quit                           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    Open(String),
    Show,
    Html,
    Edit {
        card: usize,
        field: JobField,
        value: String,
    },
    Save,
    Delete,
    List,
    ForgetKey,
    Help,
    Quit,
    Noop,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Noop),
            "upload" => required(rest, "upload <path>").map(|p| Command::Upload(PathBuf::from(p))),
            "open" => required(rest, "open <number|name>").map(|n| Command::Open(n.to_string())),
            "show" => Ok(Command::Show),
            "html" => Ok(Command::Html),
            "edit" => parse_edit(rest),
            "save" => Ok(Command::Save),
            "delete" => Ok(Command::Delete),
            "list" => Ok(Command::List),
            "forget-key" => Ok(Command::ForgetKey),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help'.")),
        }
    }
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg)
    }
}

fn parse_edit(rest: &str) -> Result<Command, String> {
    const USAGE: &str = "Usage: edit <card> <field> <value>";

    let mut parts = rest.splitn(3, char::is_whitespace);
    let card = parts
        .next()
        .and_then(|c| c.parse::<usize>().ok())
        .filter(|c| *c > 0)
        .ok_or_else(|| USAGE.to_string())?;
    let field_name = parts.next().ok_or_else(|| USAGE.to_string())?;
    let field = JobField::from_key(field_name).ok_or_else(|| format!("Unknown field '{field_name}'"))?;
    // A missing value clears the field.
    let value = parts.next().unwrap_or("").trim().to_string();

    Ok(Command::Edit {
        card: card - 1,
        field,
        value,
    })
}
