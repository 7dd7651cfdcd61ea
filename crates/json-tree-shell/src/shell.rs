//! Line-oriented presentation layer over a [`Session`].
//!
//! One command per input line. The shell owns only UI-local state (the last
//! search results); everything else lives in the session.

use std::io::{self, BufRead, Write};

use log::debug;
use thiserror::Error;

use json_tree::{resolve, EnterOutcome, Path, SearchHit, SearchScope, Session, View};
use json_tree_path::{
    format_pointer, parse_pointer, split_last, validate_pointer, ValidationError,
    DISPLAY_SEPARATOR,
};

pub const HELP: &str = "\
Commands:
  ls                 list the current container
  cd <key>|..|/      enter a child, go to the parent, or go to the root
  cd /<pointer>      jump to a pointer such as /servers/0
  sel <key>|<n>      select an entry by key or by listing position
  up, down           move the selection
  view               show the selected value
  set <literal>      replace the selected value (JSON, or plain text)
  add <key|literal>  add a key to an object or a value to an array
  rm                 delete the selected entry
  mv <new-key>       rename the selected key
  undo, redo         step through the edit history
  find [-here] <q>   search keys and string values
  open <n>           go to search result n
  pwd                print the current path
  help               show this text
  quit               save and exit
  abort              exit without saving";

// ── Parsing ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdTarget {
    Parent,
    Root,
    Key(String),
    /// Absolute pointer, e.g. `/servers/0/host`.
    Pointer(Path),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Ls,
    Cd(CdTarget),
    Select(String),
    Up,
    Down,
    View,
    Set(String),
    Add(String),
    Remove,
    Rename(String),
    Undo,
    Redo,
    Find { here: bool, query: String },
    Open(usize),
    Pwd,
    Help,
    Quit,
    Abort,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command {0:?}. Type `help` for a list.")]
    Unknown(String),
    #[error("`{0}` needs an argument.")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a number.")]
    NotANumber(String),
    #[error("Invalid pointer: {0}")]
    InvalidPointer(#[from] ValidationError),
}

fn required(command: &'static str, arg: &str) -> Result<String, ParseError> {
    if arg.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(arg.to_string())
    }
}

/// Parse one input line. Blank lines yield `None`.
///
/// The argument is everything after the command word, with surrounding
/// whitespace removed; inner whitespace is kept, so `set hello world` sets
/// the string `"hello world"`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word {
        "ls" => ShellCommand::Ls,
        "cd" => match arg {
            "" => return Err(ParseError::MissingArgument("cd")),
            ".." => ShellCommand::Cd(CdTarget::Parent),
            "/" => ShellCommand::Cd(CdTarget::Root),
            pointer if pointer.starts_with('/') => {
                validate_pointer(pointer)?;
                ShellCommand::Cd(CdTarget::Pointer(parse_pointer(pointer)))
            }
            key => ShellCommand::Cd(CdTarget::Key(key.to_string())),
        },
        "sel" => ShellCommand::Select(required("sel", arg)?),
        "up" => ShellCommand::Up,
        "down" => ShellCommand::Down,
        "view" => ShellCommand::View,
        // An empty literal is a valid (empty) string value.
        "set" => ShellCommand::Set(arg.to_string()),
        "add" => ShellCommand::Add(arg.to_string()),
        "rm" => ShellCommand::Remove,
        "mv" => ShellCommand::Rename(required("mv", arg)?),
        "undo" => ShellCommand::Undo,
        "redo" => ShellCommand::Redo,
        "find" => match arg.strip_prefix("-here") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                ShellCommand::Find { here: true, query: required("find", rest.trim())? }
            }
            _ => ShellCommand::Find { here: false, query: required("find", arg)? },
        },
        "open" => {
            let n = required("open", arg)?;
            ShellCommand::Open(n.parse().map_err(|_| ParseError::NotANumber(n))?)
        }
        "pwd" => ShellCommand::Pwd,
        "help" | "?" => ShellCommand::Help,
        "quit" | "q" => ShellCommand::Quit,
        "abort" => ShellCommand::Abort,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

// ── Running ───────────────────────────────────────────────────────────────

/// How the shell ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// `quit` or end of input: the document should be written back.
    Save,
    /// `abort`: discard all edits.
    Discard,
}

pub struct Shell {
    session: Session,
    hits: Vec<SearchHit>,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self { session, hits: Vec::new() }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Read commands from `input` until `quit`, `abort` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<Exit> {
        self.print_listing(out)?;
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    debug!("shell command {command:?}");
                    if let Some(exit) = self.execute(command, out)? {
                        return Ok(exit);
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        Ok(Exit::Save)
    }

    /// Run one command. Returns `Some` when the shell should stop.
    pub fn execute<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> io::Result<Option<Exit>> {
        match command {
            ShellCommand::Ls => self.print_listing(out)?,
            ShellCommand::Cd(target) => self.cd(target, out)?,
            ShellCommand::Select(arg) => {
                if self.session.select_key(&arg) {
                    self.print_selected(out)?;
                } else if let Ok(n) = arg.parse::<usize>() {
                    self.session.select(n);
                    self.print_selected(out)?;
                } else {
                    writeln!(out, "No entry {arg:?} here.")?;
                }
            }
            ShellCommand::Up => {
                self.session.move_selection(-1);
                self.print_selected(out)?;
            }
            ShellCommand::Down => {
                self.session.move_selection(1);
                self.print_selected(out)?;
            }
            ShellCommand::View => match self.session.view() {
                View::Placeholder(text) | View::Editable(text) | View::Viewer(text) => {
                    writeln!(out, "{text}")?
                }
            },
            ShellCommand::Set(text) => {
                let result = self.session.edit_selected(&text);
                self.after_edit(result, out)?;
            }
            ShellCommand::Add(text) => {
                let result = self.session.add_entry(&text);
                self.after_edit(result, out)?;
            }
            ShellCommand::Remove => {
                let result = self.session.delete_selected();
                self.after_edit(result, out)?;
            }
            ShellCommand::Rename(key) => {
                let result = self.session.rename_selected(&key);
                self.after_edit(result, out)?;
            }
            ShellCommand::Undo => match self.session.undo() {
                Ok(true) => self.print_listing(out)?,
                Ok(false) => writeln!(out, "Nothing to undo.")?,
                Err(_) => self.print_hint(out)?,
            },
            ShellCommand::Redo => match self.session.redo() {
                Ok(true) => self.print_listing(out)?,
                Ok(false) => writeln!(out, "Nothing to redo.")?,
                Err(_) => self.print_hint(out)?,
            },
            ShellCommand::Find { here, query } => self.find(here, &query, out)?,
            ShellCommand::Open(n) => match self.hits.get(n).cloned() {
                Some(hit) => {
                    self.session.open_hit(&hit);
                    self.print_listing(out)?;
                }
                None => writeln!(out, "No search result {n}.")?,
            },
            ShellCommand::Pwd => {
                let crumbs = self.session.breadcrumbs().join(DISPLAY_SEPARATOR);
                writeln!(out, "{crumbs} ({})", format_pointer(self.session.current_path()))?;
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(Some(Exit::Save)),
            ShellCommand::Abort => return Ok(Some(Exit::Discard)),
        }
        Ok(None)
    }

    fn cd<W: Write>(&mut self, target: CdTarget, out: &mut W) -> io::Result<()> {
        match target {
            CdTarget::Root => self.session.go_to(Vec::new(), None),
            CdTarget::Parent => match split_last(self.session.current_path()) {
                Ok((up, from)) => self.session.go_to(up, Some(from.as_str())),
                Err(_) => return writeln!(out, "Already at the root."),
            },
            CdTarget::Key(key) => {
                if !self.session.select_key(&key) {
                    return writeln!(out, "No entry {key:?} here.");
                }
                if let EnterOutcome::Leaf(key) = self.session.enter() {
                    return writeln!(out, "{key:?} is not an Object or Array. Use `set` to edit it.");
                }
            }
            CdTarget::Pointer(path) => {
                let is_container = match resolve(self.session.document().root(), &path) {
                    Ok(node) => node.is_container(),
                    Err(e) => return writeln!(out, "No such path: {e}"),
                };
                if is_container {
                    self.session.go_to(path, None);
                } else {
                    // Scalars are shown selected inside their container.
                    match split_last(&path) {
                        Ok((parent, key)) => self.session.go_to(parent, Some(key.as_str())),
                        Err(_) => self.session.go_to(Vec::new(), None),
                    }
                }
            }
        }
        self.print_listing(out)
    }

    fn find<W: Write>(&mut self, here: bool, query: &str, out: &mut W) -> io::Result<()> {
        let result = if here {
            self.session.search(query, SearchScope::Current)
        } else {
            self.session.search_default(query)
        };
        match result {
            Ok(hits) if hits.is_empty() => {
                self.hits.clear();
                writeln!(out, "No matches for {query:?}.")
            }
            Ok(hits) => {
                for (i, hit) in hits.iter().enumerate() {
                    writeln!(out, "[{i}] {}", hit.label)?;
                }
                self.hits = hits;
                Ok(())
            }
            Err(_) => self.print_hint(out),
        }
    }

    fn after_edit<T, E, W: Write>(&mut self, result: Result<T, E>, out: &mut W) -> io::Result<()> {
        match result {
            Ok(_) => self.print_listing(out),
            Err(_) => self.print_hint(out),
        }
    }

    fn print_hint<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.hint() {
            Some(hint) => writeln!(out, "{hint}"),
            None => Ok(()),
        }
    }

    fn print_selected<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.entries().get(self.session.selected_index()) {
            Some(entry) => writeln!(out, "* {:>3} {}", self.session.selected_index(), entry.label),
            None => writeln!(out, "(empty)"),
        }
    }

    fn print_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.session.breadcrumbs().join(DISPLAY_SEPARATOR))?;
        let entries = self.session.entries();
        if entries.is_empty() {
            return writeln!(out, "(empty)");
        }
        for (i, entry) in entries.iter().enumerate() {
            let marker = if i == self.session.selected_index() { '*' } else { ' ' };
            writeln!(out, "{marker} {i:>3} {}", entry.label)?;
        }
        Ok(())
    }
}
