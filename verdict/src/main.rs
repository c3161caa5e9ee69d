use clap::{Parser, Subcommand};
use miette::{MietteHandlerOpts, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use verdict_library::{Environment, FragmentInterpreter, LibraryConfig, Registry};
use verdict_signature::{render_type_list, ConcreteType, ResolvedCall};

mod repl;

#[derive(Parser)]
#[command(
    name = "verdict",
    version,
    about = "Typed library functions: resolve, evaluate and inline",
    long_about = "Verdict resolves calls against typed overloads, evaluates them with checked \
                  numeric narrowing, and emits inline fragments where a function has one."
)]
struct Cli {
    /// Namespace prefix of the standard functions
    #[arg(long, global = true, default_value = "m.")]
    prefix: String,

    /// Never hand out inline forms
    #[arg(long, global = true)]
    no_inline: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered function with its signatures
    List,

    /// Resolve a call from its argument types
    Resolve {
        /// Qualified function name, e.g. m.round
        name: String,

        /// Argument types, e.g. double int
        types: Vec<String>,
    },

    /// Print the inline fragment of a resolved call
    Emit {
        name: String,

        types: Vec<String>,

        /// Argument expressions to substitute (default a0, a1, ...)
        #[arg(long, value_delimiter = ',')]
        args: Option<Vec<String>>,
    },

    /// Evaluate an expression such as `m.round(2.5) + 1L`
    Eval {
        expression: String,

        /// Bind a variable before evaluating, e.g. -D x=2.5
        #[arg(short = 'D', long = "define", value_name = "NAME=EXPR")]
        define: Vec<String>,
    },

    /// Start an interactive session
    Repl,
}

fn main() -> Result<()> {
    setup_miette_handler();

    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let mut config = LibraryConfig::default().with_prefix(cli.prefix.clone());
    if cli.no_inline {
        config = config.without_inline();
    }
    debug!(prefix = %config.prefix, inline = config.inline, "building registry");
    let registry = Registry::with_config(config)?;

    match cli.command {
        Some(Commands::List) => handle_list(&registry),
        Some(Commands::Resolve { name, types }) => handle_resolve(&registry, &name, &types),
        Some(Commands::Emit { name, types, args }) => handle_emit(&registry, &name, &types, args),
        Some(Commands::Eval { expression, define }) => {
            handle_eval(&registry, &expression, &define)
        }
        Some(Commands::Repl) => {
            let mut session = repl::ReplSession::new(registry)?;
            session.run()?;
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["verdict", "--help"]);
            Ok(())
        }
    }
}

fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn parse_types(types: &[String]) -> Result<Vec<ConcreteType>> {
    types
        .iter()
        .map(|name| name.parse::<ConcreteType>().map_err(Into::into))
        .collect()
}

fn describe_resolution(registry: &Registry, resolved: &ResolvedCall) -> String {
    let mut lines = vec![format!(
        "{}{} -> {}",
        resolved.function,
        render_type_list(&resolved.parameter_types),
        resolved.return_type
    )];

    if let Some(signature) = registry
        .get(&resolved.function)
        .and_then(|function| function.overloads().get(resolved.signature_index))
    {
        lines.push(format!(
            "  signature {}: {}",
            resolved.signature_index, signature
        ));
    }
    for (symbol, bound) in &resolved.bindings {
        lines.push(format!("  {} = {}", symbol, bound));
    }
    lines.join("\n")
}

fn handle_list(registry: &Registry) -> Result<()> {
    for function in registry.functions() {
        let marker = if function.has_inline() && registry.config().inline {
            " [inline]"
        } else {
            ""
        };
        println!("{}{}", function.name(), marker);
        for signature in function.overloads() {
            println!("    {}", signature);
        }
    }
    Ok(())
}

fn handle_resolve(registry: &Registry, name: &str, types: &[String]) -> Result<()> {
    let types = parse_types(types)?;
    let resolved = registry.resolve(name, &types)?;
    println!("{}", describe_resolution(registry, &resolved));
    Ok(())
}

fn handle_emit(
    registry: &Registry,
    name: &str,
    types: &[String],
    args: Option<Vec<String>>,
) -> Result<()> {
    let types = parse_types(types)?;
    let resolved = registry.resolve(name, &types)?;

    let args = args.unwrap_or_else(|| (0..resolved.arity()).map(|n| format!("a{}", n)).collect());
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match registry.emit(&resolved, &args)? {
        Some(fragment) => println!("{}", fragment),
        None => println!("{} has no inline form; evaluate it directly", resolved.function),
    }
    Ok(())
}

fn handle_eval(registry: &Registry, expression: &str, define: &[String]) -> Result<()> {
    let interpreter = FragmentInterpreter::new(registry);
    let mut environment = Environment::new();

    for binding in define {
        let (name, source) = binding
            .split_once('=')
            .ok_or_else(|| miette::miette!("Expected NAME=EXPR, got: {}", binding))?;
        let value = interpreter.evaluate_source(source.trim(), &environment)?;
        environment.define(name.trim(), value);
    }

    let value = interpreter.evaluate_source(expression, &environment)?;
    println!("{}: {}", value, value.concrete_type());
    Ok(())
}
