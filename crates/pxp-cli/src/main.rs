use clap::{Parser, Subcommand};
use pxp_style::{Directive, InlineStyle, StylePxpDirective, StyleValue};
use pxp_value::PxpOptions;

#[derive(Parser)]
#[command(name = "pxp")]
#[command(about = "pxp — rewrite viewport-proportional pixel units into calc()")]
#[command(version)]
struct Cli {
    /// CSS custom property holding the live viewport dimension
    #[arg(long, global = true)]
    variable_name: Option<String>,

    /// Reference dimension the design was drawn at
    #[arg(long, global = true)]
    default_value: Option<String>,

    /// Log each rewrite to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite a CSS value, e.g. "red 2pxp solid"
    Value {
        /// CSS declaration value
        value: String,
    },

    /// Rewrite template literals in a binding expression, e.g. '{ width: `${w}pxp` }'
    Expr {
        /// Expression source
        expression: String,
    },

    /// Resolve declarations the way the style-pxp directive does
    Style {
        /// Declarations as NAME=VALUE
        declarations: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let options = options(cli.variable_name, cli.default_value);

    match cli.command {
        Command::Value { value } => cmd_value(&value, &options),
        Command::Expr { expression } => cmd_expr(&expression, &options),
        Command::Style { declarations } => cmd_style(&declarations, &options),
    }
}

fn options(variable_name: Option<String>, default_value: Option<String>) -> PxpOptions {
    let (Some(variable_name), Some(default_value)) = (variable_name, default_value) else {
        eprintln!("Error: --variable-name and --default-value are required");
        std::process::exit(1);
    };

    match PxpOptions::new(variable_name, default_value) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_value(value: &str, options: &PxpOptions) {
    println!("{}", pxp_value::transform_pxp(value, options));
}

fn cmd_expr(expression: &str, options: &PxpOptions) {
    println!(
        "{}",
        pxp_template::rewrite_template_literals(expression, options)
    );
}

fn cmd_style(declarations: &[String], options: &PxpOptions) {
    let mut binding = Vec::with_capacity(declarations.len());

    for declaration in declarations {
        let Some((name, value)) = declaration.split_once('=') else {
            eprintln!("Error: expected NAME=VALUE, got '{declaration}'");
            std::process::exit(1);
        };
        binding.push((name.trim().to_string(), Some(StyleValue::from(value))));
    }

    let mut style = InlineStyle::new();
    StylePxpDirective::new(options.clone()).apply(&mut style, &binding);
    println!("{style}");
}
