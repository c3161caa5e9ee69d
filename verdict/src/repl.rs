//! Interactive session over a registry
//!
//! Lines are fragments evaluated against persistent bindings. `let x = ...`
//! binds a variable and `/`-prefixed lines are session commands.

use miette::Diagnostic;
use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use verdict_library::{Environment, FragmentInterpreter, LibraryError, Registry, Value};

#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Library(#[from] LibraryError),

    #[error("Readline error: {source}")]
    #[diagnostic(code(verdict::repl::readline))]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("REPL command error: {message}")]
    #[diagnostic(code(verdict::repl::command), help("Type /help for available commands"))]
    Command { message: String },
}

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub show_types: bool,
    pub prompt: String,
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_types: true,
            prompt: "verdict> ".to_string(),
            history_file: Some(".verdict_history".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplStats {
    pub expressions_evaluated: usize,
    pub variables_bound: usize,
    pub errors_encountered: usize,
}

#[derive(Debug, PartialEq)]
pub enum ReplResult {
    Value(Value),
    Binding { name: String, value: Value },
    Command { message: String },
    Empty,
    Exit,
}

/// Everything a session remembers between lines, without the terminal
pub struct ReplState {
    registry: Registry,
    environment: Environment,
    config: ReplConfig,
    stats: ReplStats,
}

impl ReplState {
    pub fn new(registry: Registry, config: ReplConfig) -> Self {
        Self {
            registry,
            environment: Environment::new(),
            config,
            stats: ReplStats::default(),
        }
    }

    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(ReplResult::Empty);
        }
        if let Some(command) = line.strip_prefix('/') {
            return self.execute_command(command);
        }

        let interpreter = FragmentInterpreter::new(&self.registry);

        if let Some(binding) = line.strip_prefix("let ") {
            let (name, source) = binding.split_once('=').ok_or_else(|| ReplError::Command {
                message: "Expected `let NAME = EXPR`".to_string(),
            })?;
            let name = name.trim();
            if !is_identifier(name) {
                return Err(ReplError::Command {
                    message: format!("Not a variable name: {}", name),
                });
            }

            let value = interpreter.evaluate_source(source.trim(), &self.environment)?;
            self.environment.define(name, value.clone());
            self.stats.variables_bound += 1;
            return Ok(ReplResult::Binding {
                name: name.to_string(),
                value,
            });
        }

        let value = interpreter.evaluate_source(line, &self.environment)?;
        self.stats.expressions_evaluated += 1;
        Ok(ReplResult::Value(value))
    }

    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        let Some(&name) = parts.first() else {
            return Ok(ReplResult::Empty);
        };

        let message = match name {
            "help" | "h" => help_message(),
            "vars" | "variables" => self.format_variables(),
            "functions" | "fns" => self.format_functions(parts.get(1).copied()),
            "clear" => {
                self.environment = Environment::new();
                "Variables cleared".to_string()
            }
            "stats" => format!(
                "Expressions evaluated: {}\nVariables bound: {}\nErrors: {}",
                self.stats.expressions_evaluated,
                self.stats.variables_bound,
                self.stats.errors_encountered
            ),
            "types" => {
                match parts.get(1) {
                    Some(&"on") => self.config.show_types = true,
                    Some(&"off") => self.config.show_types = false,
                    _ => {}
                }
                format!(
                    "Type display is {}",
                    if self.config.show_types { "on" } else { "off" }
                )
            }
            "quit" | "q" | "exit" => return Ok(ReplResult::Exit),
            unknown => {
                return Err(ReplError::Command {
                    message: format!("Unknown command: /{}", unknown),
                });
            }
        };

        Ok(ReplResult::Command { message })
    }

    fn format_variables(&self) -> String {
        if self.environment.is_empty() {
            return "No variables defined".to_string();
        }
        let mut lines = vec!["Variables:".to_string()];
        for (name, value) in self.environment.iter() {
            lines.push(format!("  {} = {}", name, self.format_value(value)));
        }
        lines.join("\n")
    }

    fn format_functions(&self, filter: Option<&str>) -> String {
        let lines: Vec<String> = self
            .registry
            .functions()
            .filter(|function| filter.is_none_or(|f| function.name().contains(f)))
            .map(|function| format!("  {} {}", function.name(), function.overloads()))
            .collect();

        if lines.is_empty() {
            "No matching functions".to_string()
        } else {
            lines.join("\n")
        }
    }

    pub fn format_value(&self, value: &Value) -> String {
        if self.config.show_types {
            format!("{}: {}", value, value.concrete_type())
        } else {
            value.to_string()
        }
    }

    fn record_error(&mut self) {
        self.stats.errors_encountered += 1;
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn help_message() -> String {
    r#"Verdict REPL Commands:
  /help, /h              Show this help message
  /vars, /variables      List bound variables
  /functions [filter]    List registered functions and their signatures
  /clear                 Remove all variables
  /stats                 Show session statistics
  /types [on|off]        Toggle type display
  /quit, /q, /exit       Exit the REPL

Examples:
  m.round(2.5)           # long 3
  m.round(2.5f)          # int 3
  let x = 0.5            # Bind a variable
  sin(x) * 2.0           # Host primitives take doubles
  1 + 2L                 # Error: no implicit widening

Use Ctrl+C to cancel a line, Ctrl+D to exit."#
        .to_string()
}

/// A terminal session: line editing and history around a [`ReplState`]
pub struct ReplSession {
    editor: DefaultEditor,
    state: ReplState,
}

impl ReplSession {
    pub fn new(registry: Registry) -> Result<Self, ReplError> {
        let config = ReplConfig::default();
        let mut editor = DefaultEditor::new()?;
        if let Some(history_file) = &config.history_file {
            let _ = editor.load_history(history_file); // Absent on first run
        }

        Ok(Self {
            editor,
            state: ReplState::new(registry, config),
        })
    }

    pub fn run(&mut self) -> Result<(), ReplError> {
        println!("Verdict REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type /help for commands, /quit to exit");
        println!();

        while let Some(line) = self.read_line()? {
            match self.state.evaluate_line(&line) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result),
                Err(error) => {
                    self.state.record_error();
                    eprintln!("{:?}", miette::Report::new(error));
                }
            }
        }

        self.save_history()
    }

    fn read_line(&mut self) -> Result<Option<String>, ReplError> {
        match self.editor.readline(&self.state.config.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Ok(Some(String::new()))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(source) => Err(ReplError::Readline { source }),
        }
    }

    fn display_result(&self, result: ReplResult) {
        match result {
            ReplResult::Value(value) => println!("{}", self.state.format_value(&value)),
            ReplResult::Binding { name, value } => {
                println!("{} = {}", name, self.state.format_value(&value))
            }
            ReplResult::Command { message } => println!("{}", message),
            ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    fn save_history(&mut self) -> Result<(), ReplError> {
        if let Some(history_file) = &self.state.config.history_file {
            self.editor.save_history(history_file)?;
        }
        Ok(())
    }
}
